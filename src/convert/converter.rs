// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The converter value object.
//!
//! A [`Converter`] binds one platform attribute to one vendor key and carries
//! the transform applied between them. Instances are built once per
//! device-attribute binding at device-model build time and hold no per-call
//! state afterwards; all mutation happens on the externally-owned payload.

use std::collections::BTreeSet;

use serde_json::Value;

use crate::convert::{Channel, Transform, event, light, primitive};
use crate::device::Device;
use crate::error::Result;
use crate::payload::Payload;

/// A bidirectional transform between a vendor key and a platform attribute.
///
/// `decode` turns a vendor-reported value into platform-facing attributes,
/// `encode` turns a platform command value into the vendor wire
/// representation, and `read` pulls a previously-decoded vendor property back
/// out of an accumulated payload.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yeepro_lib::{Converter, Device, Payload, Transform};
///
/// let device = Device::gateway();
/// let conv = Converter::new("brightness", Transform::brightness())
///     .with_prop("l")
///     .with_parent("light");
///
/// let mut payload = Payload::new();
/// conv.decode(&device, &mut payload, &json!(50)).unwrap();
/// assert_eq!(payload.get("brightness"), Some(&json!(128)));
///
/// let mut payload = Payload::new();
/// conv.encode(&device, &mut payload, &json!(128)).unwrap();
/// assert_eq!(payload.get("l"), Some(&json!(50)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    attr: String,
    domain: Option<String>,
    unit_of_measurement: Option<String>,
    device_class: Option<String>,
    prop: Option<String>,
    parent: Option<String>,
    enabled: Option<bool>,
    poll: bool,
    childs: Option<BTreeSet<String>>,
    transform: Transform,
    channel: Channel,
}

impl Converter {
    /// Creates a converter for `attr` with the given transform.
    ///
    /// The channel defaults per transform kind; see
    /// [`Transform::default_channel`].
    pub fn new(attr: impl Into<String>, transform: Transform) -> Self {
        let channel = transform.default_channel();
        Self {
            attr: attr.into(),
            domain: None,
            unit_of_measurement: None,
            device_class: None,
            prop: None,
            parent: None,
            enabled: Some(true),
            poll: false,
            childs: None,
            transform,
            channel,
        }
    }

    /// A boolean converter on the property channel.
    pub fn prop_bool(attr: impl Into<String>, prop: impl Into<String>) -> Self {
        Self::new(attr, Transform::Bool)
            .with_prop(prop)
            .property()
    }

    /// A map converter on the property channel.
    pub fn prop_map(
        attr: impl Into<String>,
        prop: impl Into<String>,
        pairs: impl IntoIterator<Item = (Value, Value)>,
    ) -> Self {
        Self::new(attr, Transform::map(pairs))
            .with_prop(prop)
            .property()
    }

    /// A passthrough converter on the property channel.
    pub fn prop_passthrough(attr: impl Into<String>, prop: impl Into<String>) -> Self {
        Self::new(attr, Transform::Identity)
            .with_prop(prop)
            .property()
    }

    /// A readable duration converter.
    pub fn duration(attr: impl Into<String>) -> Self {
        Self::new(attr, Transform::duration(true))
    }

    /// An event converter. The attribute may carry a compound
    /// `namespace.subtype` key.
    pub fn event(attr: impl Into<String>) -> Self {
        Self::new(attr, Transform::Event)
    }

    /// A motor command converter.
    pub fn motor(attr: impl Into<String>) -> Self {
        Self::new(attr, Transform::motor())
    }

    /// A scene converter carrying the scene's node description.
    pub fn scene(attr: impl Into<String>, node: Value) -> Self {
        Self::new(attr, Transform::Scene { node })
    }

    /// Sets the target entity domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Sets the unit of measurement passed through to the platform.
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit_of_measurement = Some(unit.into());
        self
    }

    /// Sets the device class passed through to the platform.
    #[must_use]
    pub fn with_device_class(mut self, device_class: impl Into<String>) -> Self {
        self.device_class = Some(device_class.into());
        self
    }

    /// Sets the vendor property key. Without one, the attribute name doubles
    /// as the vendor key.
    #[must_use]
    pub fn with_prop(mut self, prop: impl Into<String>) -> Self {
        self.prop = Some(prop.into());
        self
    }

    /// Nests this converter under another converter's attribute.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Sets the enabled tri-state: `Some(true)`/`Some(false)`, or `None` for
    /// lazy activation decided by the external layer.
    #[must_use]
    pub fn with_enabled(mut self, enabled: Option<bool>) -> Self {
        self.enabled = enabled;
        self
    }

    /// Marks this attribute as requiring active polling.
    #[must_use]
    pub fn with_poll(mut self) -> Self {
        self.poll = true;
        self
    }

    /// Sets the child attribute names derived alongside this one. The field
    /// is owned by whichever external code populates it.
    #[must_use]
    pub fn with_childs(mut self, childs: impl IntoIterator<Item = String>) -> Self {
        self.childs = Some(childs.into_iter().collect());
        self
    }

    /// Puts this converter on the property channel.
    #[must_use]
    pub fn property(mut self) -> Self {
        self.channel = Channel::Property;
        self
    }

    /// Overrides the channel classification.
    #[must_use]
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = channel;
        self
    }

    /// The platform attribute name.
    #[must_use]
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// The target entity domain, if any.
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    /// The unit of measurement, if any.
    #[must_use]
    pub fn unit_of_measurement(&self) -> Option<&str> {
        self.unit_of_measurement.as_deref()
    }

    /// The device class, if any.
    #[must_use]
    pub fn device_class(&self) -> Option<&str> {
        self.device_class.as_deref()
    }

    /// The vendor property key, if one was set.
    #[must_use]
    pub fn prop(&self) -> Option<&str> {
        self.prop.as_deref()
    }

    /// The parent converter attribute, if any.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// The enabled tri-state. `None` means lazy activation.
    #[must_use]
    pub fn enabled(&self) -> Option<bool> {
        self.enabled
    }

    /// Whether this attribute requires active polling.
    #[must_use]
    pub fn poll(&self) -> bool {
        self.poll
    }

    /// The child attribute names, if populated.
    #[must_use]
    pub fn childs(&self) -> Option<&BTreeSet<String>> {
        self.childs.as_ref()
    }

    /// The transform this converter applies.
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The channel classification.
    #[must_use]
    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// The key this converter reads and writes on the vendor side: the
    /// property key if set, else the attribute name.
    #[must_use]
    pub fn vendor_key(&self) -> &str {
        self.prop.as_deref().unwrap_or(&self.attr)
    }

    /// Transforms a vendor-reported value into platform attributes written
    /// into `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is ill-typed for this transform or
    /// has no representation (see [`ConvertError`](crate::ConvertError)).
    pub fn decode(&self, _device: &Device, payload: &mut Payload, value: &Value) -> Result<()> {
        match &self.transform {
            Transform::Identity | Transform::Scene { .. } => {
                self.store_attr(payload, value.clone());
                Ok(())
            }
            Transform::Bool => primitive::decode_bool(self, payload, value),
            Transform::Map { map } => {
                primitive::decode_map(self, map, payload, value);
                Ok(())
            }
            Transform::Duration { readable, .. } => {
                primitive::decode_duration(self, *readable, payload, value)
            }
            Transform::Brightness { max } => light::decode_brightness(self, *max, payload, value),
            Transform::ColorTempKelvin { .. } => light::decode_color_temp(self, payload, value),
            Transform::ColorRgb => light::decode_rgb(self, payload, value),
            Transform::Event => event::decode_event(self, payload, value),
            Transform::Motor { readable } => event::decode_motor(self, *readable, payload, value),
            Transform::IntNormalization {
                attr_range,
                prop_range,
            } => primitive::decode_normalized(self, *prop_range, *attr_range, payload, value),
        }
    }

    /// Transforms a platform command value into the vendor wire
    /// representation written into `payload`.
    ///
    /// # Errors
    ///
    /// Returns an error when the value is ill-typed for this transform or
    /// has no vendor counterpart (see [`ConvertError`](crate::ConvertError)).
    pub fn encode(&self, _device: &Device, payload: &mut Payload, value: &Value) -> Result<()> {
        match &self.transform {
            Transform::Identity | Transform::Scene { .. } | Transform::Event => {
                self.store_prop(payload, value.clone());
                Ok(())
            }
            Transform::Bool => primitive::encode_bool(self, payload, value),
            Transform::Map { map } => primitive::encode_map(self, map, payload, value),
            Transform::Duration { .. } => primitive::encode_duration(self, payload, value),
            Transform::Brightness { max } => light::encode_brightness(self, *max, payload, value),
            Transform::ColorTempKelvin { mink, maxk } => {
                light::encode_color_temp(self, *mink, *maxk, payload, value)
            }
            Transform::ColorRgb => light::encode_rgb(self, payload, value),
            Transform::Motor { .. } => event::encode_motor(self, payload, value),
            Transform::IntNormalization {
                attr_range,
                prop_range,
            } => primitive::encode_normalized(self, *attr_range, *prop_range, payload, value),
        }
    }

    /// Returns the value stored under this converter's vendor key in an
    /// accumulated payload, or `None` when no property key is set or the key
    /// was never populated.
    #[must_use]
    pub fn read(&self, _device: &Device, payload: &Payload) -> Option<Value> {
        let prop = self.prop.as_deref()?;
        payload.get(prop).cloned()
    }

    /// Stores a decoded value under the platform attribute.
    pub(crate) fn store_attr(&self, payload: &mut Payload, value: Value) {
        payload.insert(&self.attr, value);
    }

    /// Stores an encoded value under the vendor key.
    pub(crate) fn store_prop(&self, payload: &mut Payload, value: Value) {
        payload.insert(self.vendor_key(), value);
    }
}
