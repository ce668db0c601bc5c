// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device model: a converter registry per device, built from the node
//! description the gateway reports, plus the drivers that route vendor
//! messages through the registry.

use std::collections::BTreeSet;

use serde_json::{Map, Value, json};
use tracing::{debug, warn};

use crate::convert::{Channel, Converter, Transform};
use crate::device::{DeviceType, NodeType};
use crate::error::Result;
use crate::payload::{Payload, as_integer};

/// Color capabilities of a light device family.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ColorMode {
    /// Plain on/off.
    OnOff,
    /// Dimmable.
    Brightness,
    /// Tunable white.
    ColorTemp,
    /// Full RGB color.
    Rgb,
}

/// A Yeelight Pro device and its converter registry.
///
/// The registry is keyed by platform attribute and keeps insertion order;
/// re-adding an attribute replaces the converter in place, so converter
/// setup can be re-run as the device reports new properties.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yeepro_lib::Device;
///
/// let node = json!({"id": 7, "nt": 2, "type": 4, "n": "desk lamp"});
/// let device = Device::from_node(&node).unwrap();
///
/// let report = json!({"params": {"p": 1, "l": 50}});
/// let payload = device.decode(report.as_object().unwrap()).unwrap();
/// assert_eq!(payload.get("light"), Some(&json!(true)));
/// assert_eq!(payload.get("brightness"), Some(&json!(128)));
/// ```
#[derive(Debug, Clone)]
pub struct Device {
    id: i64,
    name: String,
    node_type: Option<NodeType>,
    device_type: DeviceType,
    pid: Option<Value>,
    cids: Vec<i64>,
    ch_num: Option<i64>,
    props: Map<String, Value>,
    converters: Vec<Converter>,
}

impl Device {
    /// Builds a device from a gateway topology node.
    ///
    /// Returns `None` for nodes that are not mesh devices (rooms, groups,
    /// and scenes; the gateway device owns scenes, see [`Device::add_scene`]),
    /// for nodes without an id, and for device types this library does not
    /// support (logged at warn level).
    #[must_use]
    pub fn from_node(node: &Value) -> Option<Self> {
        let obj = node.as_object()?;
        let node_type = obj
            .get("nt")
            .and_then(Value::as_i64)
            .and_then(NodeType::from_code)?;
        if !matches!(node_type, NodeType::Mesh | NodeType::MeshGroup) {
            return None;
        }
        let id = obj
            .get("id")
            .and_then(|id| as_integer(id).ok())
            .filter(|id| *id != 0)?;
        let type_code = obj.get("type").and_then(Value::as_i64).unwrap_or(0);
        let device_type = DeviceType::from_code(type_code);
        let Some(device_type) = device_type.filter(|dt| Self::is_supported(*dt)) else {
            warn!("unsupported device: {node}");
            return None;
        };

        let mut device = Self {
            id,
            name: obj
                .get("n")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            node_type: Some(node_type),
            device_type,
            pid: obj.get("pid").cloned(),
            cids: obj
                .get("cids")
                .and_then(Value::as_array)
                .map(|cids| cids.iter().filter_map(Value::as_i64).collect())
                .unwrap_or_default(),
            ch_num: obj.get("ch_num").and_then(Value::as_i64),
            props: Map::new(),
            converters: Vec::new(),
        };
        device.setup_converters();
        Some(device)
    }

    /// The gateway pseudo-device. It starts with no converters; scene
    /// converters are registered as the gateway reports them.
    #[must_use]
    pub fn gateway() -> Self {
        Self {
            id: 0,
            name: "Yeelight Pro".to_string(),
            node_type: Some(NodeType::Gateway),
            device_type: DeviceType::Gateway,
            pid: None,
            cids: Vec::new(),
            ch_num: None,
            props: Map::new(),
            converters: Vec::new(),
        }
    }

    /// The all-screen Wi-Fi panel: a double relay with a key panel.
    #[must_use]
    pub fn wifi_panel(node: &Value) -> Option<Self> {
        let obj = node.as_object()?;
        let id = obj.get("id").and_then(|id| as_integer(id).ok())?;
        let mut device = Self {
            id,
            name: "Yeelight Wifi Panel".to_string(),
            node_type: obj
                .get("nt")
                .and_then(Value::as_i64)
                .and_then(NodeType::from_code),
            device_type: DeviceType::WifiPanel,
            pid: obj.get("pid").cloned(),
            cids: Vec::new(),
            ch_num: obj.get("ch_num").and_then(Value::as_i64),
            props: Map::new(),
            converters: Vec::new(),
        };
        device.setup_converters();
        Some(device)
    }

    fn is_supported(device_type: DeviceType) -> bool {
        device_type.is_light()
            || matches!(
                device_type,
                DeviceType::Curtain
                    | DeviceType::RelayDouble
                    | DeviceType::SwitchPanel
                    | DeviceType::AirConditioner
                    | DeviceType::SwitchSensor
                    | DeviceType::MotionSensor
                    | DeviceType::MagnetSensor
                    | DeviceType::Knob
                    | DeviceType::MotionWithLight
            )
    }

    /// The device id.
    #[must_use]
    pub fn id(&self) -> i64 {
        self.id
    }

    /// The device name as reported by the gateway.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renames the device (the gateway may push a new name).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// The topology node type, if the gateway reported a known one.
    #[must_use]
    pub fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }

    /// The device family.
    #[must_use]
    pub fn device_type(&self) -> DeviceType {
        self.device_type
    }

    /// The product id, passed through as reported.
    #[must_use]
    pub fn pid(&self) -> Option<&Value> {
        self.pid.as_ref()
    }

    /// The capability ids, used to tell apart hardware variants sharing a
    /// type code.
    #[must_use]
    pub fn cids(&self) -> &[i64] {
        &self.cids
    }

    /// The channel count, for multi-channel hardware.
    #[must_use]
    pub fn ch_num(&self) -> Option<i64> {
        self.ch_num
    }

    /// The last raw properties reported by the gateway.
    #[must_use]
    pub fn props(&self) -> &Map<String, Value> {
        &self.props
    }

    /// The `params` sub-map of the last reported properties.
    #[must_use]
    pub fn prop_params(&self) -> Option<&Map<String, Value>> {
        self.props.get("params").and_then(Value::as_object)
    }

    /// Whether the device is online, if reported.
    #[must_use]
    pub fn online(&self) -> Option<bool> {
        self.props.get("o").and_then(Value::as_bool)
    }

    /// The firmware version, if reported.
    #[must_use]
    pub fn firmware_version(&self) -> Option<&str> {
        self.props.get("fv").and_then(Value::as_str)
    }

    /// A stable identifier combining device family and id.
    #[must_use]
    pub fn unique_id(&self) -> String {
        format!("{}_{}", self.device_type, self.id)
    }

    /// The registered converters, in registration order.
    #[must_use]
    pub fn converters(&self) -> &[Converter] {
        &self.converters
    }

    /// Looks up a converter by platform attribute.
    #[must_use]
    pub fn converter(&self, attr: &str) -> Option<&Converter> {
        self.converters.iter().find(|conv| conv.attr() == attr)
    }

    /// Registers a converter, replacing any converter with the same
    /// attribute in place.
    pub fn add_converter(&mut self, conv: Converter) {
        if let Some(existing) = self
            .converters
            .iter_mut()
            .find(|existing| existing.attr() == conv.attr())
        {
            *existing = conv;
        } else {
            self.converters.push(conv);
        }
    }

    /// Registers several converters at once.
    pub fn add_converters(&mut self, convs: impl IntoIterator<Item = Converter>) {
        for conv in convs {
            self.add_converter(conv);
        }
    }

    /// Registers a scene reported by the gateway as a button converter
    /// carrying the scene node. Returns `false` for nodes without an id.
    pub fn add_scene(&mut self, node: &Value) -> bool {
        let Some(id) = node
            .get("id")
            .and_then(|id| as_integer(id).ok())
            .filter(|id| *id != 0)
        else {
            return false;
        };
        self.add_converter(Converter::scene(format!("scene_{id}"), node.clone()).with_domain("button"));
        true
    }

    /// (Re)builds the converter registry for this device family.
    ///
    /// Some converters depend on reported properties (relay channels, the
    /// panel backlight, hardware variant ids), so this runs again whenever
    /// [`Device::prop_changed`] sees new property keys.
    pub fn setup_converters(&mut self) {
        match self.device_type {
            dt if dt.is_light() => self.setup_light(),
            DeviceType::SwitchPanel => self.setup_switch_panel(),
            DeviceType::RelayDouble => self.setup_relay_double(),
            DeviceType::SwitchSensor | DeviceType::Knob => self.setup_knob(),
            DeviceType::MotionSensor | DeviceType::MotionWithLight => self.setup_motion(),
            DeviceType::MagnetSensor => self.setup_contact(),
            DeviceType::Curtain => self.setup_cover(),
            DeviceType::AirConditioner => self.setup_climate(),
            DeviceType::WifiPanel => self.setup_wifi_panel(),
            _ => {}
        }
    }

    /// The color capabilities of this device family.
    #[must_use]
    pub fn color_modes(&self) -> BTreeSet<ColorMode> {
        let mut modes = BTreeSet::from([ColorMode::OnOff]);
        match self.device_type {
            DeviceType::LightWithBrightness => {
                modes.insert(ColorMode::Brightness);
            }
            DeviceType::LightWithColorTemp => {
                modes.insert(ColorMode::Brightness);
                modes.insert(ColorMode::ColorTemp);
            }
            DeviceType::LightWithColor => {
                modes.insert(ColorMode::Brightness);
                modes.insert(ColorMode::ColorTemp);
                modes.insert(ColorMode::Rgb);
            }
            _ => {}
        }
        modes
    }

    fn setup_light(&mut self) {
        self.add_converter(Converter::prop_bool("light", "p").with_domain("light"));
        self.add_converter(Converter::duration("delay").with_parent("light"));
        self.add_converter(
            Converter::new("delayoff", Transform::duration(false)).with_domain("number"),
        );
        self.add_converter(
            Converter::duration("transition")
                .with_prop("duration")
                .with_parent("light"),
        );
        let modes = self.color_modes();
        if modes.contains(&ColorMode::Brightness) {
            self.add_converter(
                Converter::new("brightness", Transform::brightness())
                    .with_prop("l")
                    .with_parent("light"),
            );
        }
        if modes.contains(&ColorMode::ColorTemp) {
            self.add_converter(
                Converter::new("color_temp", Transform::color_temp_kelvin())
                    .with_prop("ct")
                    .with_parent("light"),
            );
        }
        if modes.contains(&ColorMode::Rgb) {
            self.add_converter(
                Converter::new("rgb_color", Transform::ColorRgb)
                    .with_prop("c")
                    .with_parent("light"),
            );
        }
        if self.device_type == DeviceType::LightWithZoomCt {
            self.add_converter(
                Converter::new("angel", Transform::Identity)
                    .property()
                    .with_domain("number"),
            );
        }
    }

    fn setup_action_sensor(&mut self) {
        self.add_converter(Converter::new("action", Transform::Identity).with_domain("sensor"));
    }

    fn setup_panel_events(&mut self) {
        self.add_converters([
            Converter::event("panel.click"),
            Converter::event("panel.hold"),
            Converter::event("panel.release"),
        ]);
    }

    fn setup_switch_panel(&mut self) {
        self.setup_action_sensor();
        self.setup_panel_events();
        let channels = self.switch_channels("sp");
        if channels.len() == 1 {
            self.add_converter(Converter::prop_bool("switch", "1-sp").with_domain("switch"));
        } else {
            for ch in channels {
                self.add_converter(
                    Converter::prop_bool(format!("switch{ch}"), format!("{ch}-sp"))
                        .with_domain("switch"),
                );
            }
        }
        if self
            .prop_params()
            .is_some_and(|params| params.contains_key("0-blp"))
        {
            self.add_converter(Converter::prop_bool("backlight", "0-blp").with_domain("light"));
        }
    }

    fn setup_relay_double(&mut self) {
        self.add_converters([
            Converter::prop_bool("switch1", "1-p").with_domain("switch"),
            Converter::prop_bool("switch2", "2-p").with_domain("switch"),
        ]);
    }

    fn setup_knob(&mut self) {
        self.setup_action_sensor();
        self.setup_panel_events();
        self.add_converter(Converter::event("knob.spin"));
    }

    fn setup_motion(&mut self) {
        self.add_converter(Converter::prop_bool("motion", "mv").with_domain("binary_sensor"));
        self.add_converters([
            Converter::event("motion.true"),
            Converter::event("motion.false"),
        ]);
        if self.device_type == DeviceType::MotionWithLight {
            self.add_converter(Converter::prop_passthrough("light", "level").with_domain("sensor"));
        }
        // Ceiling-mounted presence sensors with light detection share the
        // motion sensor type code; only cids tells them apart (73 vs 9).
        if self.cids.contains(&73) {
            self.add_converter(
                Converter::prop_passthrough("luminance", "luminance")
                    .with_domain("sensor")
                    .with_unit("lx")
                    .with_device_class("illuminance"),
            );
        }
    }

    fn setup_contact(&mut self) {
        self.add_converter(Converter::new("contact", Transform::Identity).with_domain("binary_sensor"));
        self.add_converters([
            Converter::event("contact.open"),
            Converter::event("contact.close"),
        ]);
    }

    fn setup_cover(&mut self) {
        self.add_converters([
            Converter::motor("motor").with_domain("cover"),
            Converter::prop_passthrough("position", "tp").with_parent("motor"),
            Converter::prop_passthrough("current_position", "cp").with_parent("motor"),
        ]);
        if self
            .prop_params()
            .is_some_and(|params| params.contains_key("rs"))
        {
            self.add_converter(Converter::prop_bool("reverse", "rs").with_domain("switch"));
        }
    }

    fn setup_climate(&mut self) {
        self.add_converter(Converter::new("climate", Transform::Identity).with_domain("climate"));
        self.add_converters([
            Converter::prop_bool("is_on", "1-acp").with_parent("climate"),
            Converter::prop_passthrough("current_temperature", "1-acct").with_parent("climate"),
            Converter::prop_passthrough("target_temperature", "1-actt").with_parent("climate"),
            Converter::prop_map(
                "mode",
                "1-acm",
                [
                    (json!(1), json!("cool")),
                    (json!(2), json!("dry")),
                    (json!(4), json!("fan_only")),
                    (json!(8), json!("heat")),
                ],
            )
            .with_parent("climate"),
            Converter::prop_map(
                "fan_mode",
                "1-acf",
                [
                    (json!(1), json!("high")),
                    (json!(2), json!("medium")),
                    (json!(4), json!("low")),
                ],
            )
            .with_parent("climate"),
        ]);
        // The gateway also reports `acd` (delay switch remaining time, ms)
        // and `aco` (AC online); neither is exposed yet.
    }

    fn setup_wifi_panel(&mut self) {
        self.setup_relay_double();
        self.setup_action_sensor();
        self.add_converter(Converter::event("keyClick"));
    }

    fn switch_channels(&self, suffix: &str) -> Vec<u8> {
        (1..=8)
            .filter(|ch| {
                self.prop_params()
                    .is_some_and(|params| params.contains_key(&format!("{ch}-{suffix}")))
            })
            .collect()
    }

    /// Decodes a property report into platform attributes.
    ///
    /// Property-channel converters read from the message's `params` sub-map,
    /// everything else from the top level; converters whose vendor key is
    /// absent contribute nothing.
    ///
    /// # Errors
    ///
    /// Propagates the first converter failure; see
    /// [`Converter::decode`](crate::Converter::decode).
    pub fn decode(&self, data: &Map<String, Value>) -> Result<Payload> {
        let mut payload = Payload::new();
        for conv in &self.converters {
            let source = if conv.channel() == Channel::Property {
                match data.get("params").and_then(Value::as_object) {
                    Some(params) => params,
                    None => continue,
                }
            } else {
                data
            };
            if let Some(value) = source.get(conv.vendor_key()) {
                conv.decode(self, &mut payload, value)?;
            }
        }
        Ok(payload)
    }

    /// Decodes an event message by dispatching on its `value` (or `type`)
    /// discriminator to the converter registered under that attribute.
    ///
    /// # Errors
    ///
    /// Propagates converter failures unchanged.
    pub fn decode_event(&self, data: &Map<String, Value>) -> Result<Payload> {
        let mut payload = Payload::new();
        let event = data
            .get("value")
            .and_then(Value::as_str)
            .filter(|event| !event.is_empty())
            .or_else(|| data.get("type").and_then(Value::as_str));
        if let Some(event) = event
            && let Some(conv) = self.converter(event)
        {
            let params = data
                .get("params")
                .filter(|params| !params.is_null())
                .cloned()
                .unwrap_or_else(|| Value::Object(Map::new()));
            conv.decode(self, &mut payload, &params)?;
        }
        Ok(payload)
    }

    /// Encodes platform attribute values into a vendor message. Property
    /// writes accumulate under a `set` sub-map; commands stay at the top
    /// level.
    ///
    /// # Errors
    ///
    /// Propagates the first converter failure; nothing is sent partially by
    /// this library, the caller owns the transmit decision.
    pub fn encode(&self, values: &Map<String, Value>) -> Result<Payload> {
        let mut payload = Payload::new();
        let mut set = Payload::new();
        for conv in &self.converters {
            let Some(value) = values.get(conv.attr()) else {
                continue;
            };
            if conv.channel() == Channel::Property {
                conv.encode(self, &mut set, value)?;
            } else {
                conv.encode(self, &mut payload, value)?;
            }
        }
        if !set.is_empty() {
            payload.insert("set", set.into_value());
        }
        Ok(payload)
    }

    /// Pulls previously-decoded vendor properties back out of an accumulated
    /// payload, keyed by vendor key, for the requested attributes.
    #[must_use]
    pub fn encode_read(&self, attrs: &BTreeSet<String>, accumulated: &Payload) -> Payload {
        let mut payload = Payload::new();
        for conv in &self.converters {
            if !attrs.contains(conv.attr()) {
                continue;
            }
            if let Some(value) = conv.read(self, accumulated) {
                payload.insert(conv.vendor_key(), value);
            }
        }
        payload
    }

    /// Records a property report, re-running converter setup when it brings
    /// new property keys, and decodes it.
    ///
    /// # Errors
    ///
    /// Propagates converter failures from the decode.
    pub fn prop_changed(&mut self, data: &Map<String, Value>) -> Result<Payload> {
        let has_new = data.keys().any(|key| !self.props.contains_key(key));
        for (key, value) in data {
            self.props.insert(key.clone(), value.clone());
        }
        if has_new {
            self.setup_converters();
        }
        self.decode(data)
    }

    /// Decodes an event message and logs the result.
    ///
    /// # Errors
    ///
    /// Propagates converter failures from the decode.
    pub fn event_fired(&self, data: &Map<String, Value>) -> Result<Payload> {
        let decoded = self.decode_event(data)?;
        debug!(device = self.id, event = ?data, decoded = ?decoded, "event fired");
        Ok(decoded)
    }

    /// The attributes an entity bound to `conv` should subscribe to: the
    /// converter's own attribute, its childs, and every registered converter
    /// nested under it.
    #[must_use]
    pub fn subscribe_attrs(&self, conv: &Converter) -> BTreeSet<String> {
        let mut attrs = BTreeSet::new();
        attrs.insert(conv.attr().to_string());
        if let Some(childs) = conv.childs() {
            attrs.extend(childs.iter().cloned());
        }
        attrs.extend(
            self.converters
                .iter()
                .filter(|other| other.parent() == Some(conv.attr()))
                .map(|other| other.attr().to_string()),
        );
        attrs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_node() -> Value {
        json!({"id": 7, "nt": 2, "type": 4, "n": "desk lamp"})
    }

    fn attrs(device: &Device) -> Vec<&str> {
        device.converters().iter().map(Converter::attr).collect()
    }

    #[test]
    fn from_node_builds_color_light() {
        let device = Device::from_node(&light_node()).unwrap();
        assert_eq!(device.id(), 7);
        assert_eq!(device.name(), "desk lamp");
        assert_eq!(device.device_type(), DeviceType::LightWithColor);
        assert_eq!(
            attrs(&device),
            [
                "light",
                "delay",
                "delayoff",
                "transition",
                "brightness",
                "color_temp",
                "rgb_color",
            ]
        );
    }

    #[test]
    fn from_node_rejects_non_device_nodes() {
        // A room node.
        assert!(Device::from_node(&json!({"id": 3, "nt": 1, "type": 1})).is_none());
        // A scene node; scenes belong to the gateway device.
        assert!(Device::from_node(&json!({"id": 3, "nt": 6})).is_none());
        // No id.
        assert!(Device::from_node(&json!({"nt": 2, "type": 1})).is_none());
        assert!(Device::from_node(&json!({"id": 0, "nt": 2, "type": 1})).is_none());
    }

    #[test]
    fn from_node_rejects_unsupported_types() {
        // Temperature/humidity sensors have no converter set yet.
        assert!(Device::from_node(&json!({"id": 5, "nt": 2, "type": 136})).is_none());
        assert!(Device::from_node(&json!({"id": 5, "nt": 2, "type": 99})).is_none());
    }

    #[test]
    fn on_off_light_has_no_color_converters() {
        let device = Device::from_node(&json!({"id": 1, "nt": 2, "type": 1})).unwrap();
        assert_eq!(attrs(&device), ["light", "delay", "delayoff", "transition"]);
        assert_eq!(device.color_modes(), BTreeSet::from([ColorMode::OnOff]));
    }

    #[test]
    fn zoom_ct_light_exposes_beam_angle() {
        let device = Device::from_node(&json!({"id": 1, "nt": 2, "type": 14})).unwrap();
        let angel = device.converter("angel").unwrap();
        assert_eq!(angel.channel(), Channel::Property);
        assert_eq!(angel.domain(), Some("number"));
    }

    #[test]
    fn decode_routes_property_channel_through_params() {
        let device = Device::from_node(&light_node()).unwrap();
        let data = json!({
            "params": {"p": 1, "l": 50, "ct": 4000},
            "delay": 5000,
        });
        let payload = device.decode(data.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("light"), Some(&json!(true)));
        assert_eq!(payload.get("brightness"), Some(&json!(128)));
        assert_eq!(payload.get("color_temp"), Some(&json!(250)));
        assert_eq!(payload.get("color_temp_kelvin"), Some(&json!(4000)));
        assert_eq!(payload.get("delay"), Some(&json!(5)));
    }

    #[test]
    fn decode_without_params_skips_property_converters() {
        let device = Device::from_node(&light_node()).unwrap();
        let data = json!({"o": true, "delay": 3000});
        let payload = device.decode(data.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("delay"), Some(&json!(3)));
        assert!(payload.get("light").is_none());
    }

    #[test]
    fn encode_nests_property_writes_under_set() {
        let device = Device::from_node(&light_node()).unwrap();
        let values = json!({"light": true, "brightness": 128, "transition": 2});
        let payload = device.encode(values.as_object().unwrap()).unwrap();
        assert_eq!(
            payload.into_value(),
            json!({
                "set": {"p": true, "l": 50},
                "duration": 2000,
            })
        );
    }

    #[test]
    fn encode_skips_attrs_without_converters() {
        let device = Device::from_node(&light_node()).unwrap();
        let values = json!({"volume": 10});
        let payload = device.encode(values.as_object().unwrap()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn relay_double_encode() {
        let device = Device::from_node(&json!({"id": 2, "nt": 2, "type": 7})).unwrap();
        let values = json!({"switch1": true, "switch2": 0});
        let payload = device.encode(values.as_object().unwrap()).unwrap();
        assert_eq!(
            payload.into_value(),
            json!({"set": {"1-p": true, "2-p": false}})
        );
    }

    #[test]
    fn switch_panel_discovers_channels_from_props() {
        let mut device = Device::from_node(&json!({"id": 9, "nt": 2, "type": 13})).unwrap();
        assert!(device.converter("switch1").is_none());

        let report = json!({"params": {"1-sp": 1, "2-sp": 0, "0-blp": 1}});
        let payload = device.prop_changed(report.as_object().unwrap()).unwrap();

        assert!(device.converter("switch1").is_some());
        assert!(device.converter("switch2").is_some());
        assert!(device.converter("backlight").is_some());
        assert_eq!(payload.get("switch1"), Some(&json!(true)));
        assert_eq!(payload.get("switch2"), Some(&json!(false)));
        assert_eq!(payload.get("backlight"), Some(&json!(true)));
    }

    #[test]
    fn switch_panel_single_channel_uses_plain_attr() {
        let mut device = Device::from_node(&json!({"id": 9, "nt": 2, "type": 13})).unwrap();
        let report = json!({"params": {"1-sp": 1}});
        device.prop_changed(report.as_object().unwrap()).unwrap();
        assert!(device.converter("switch").is_some());
        assert!(device.converter("switch1").is_none());
    }

    #[test]
    fn knob_decodes_spin_events() {
        let device = Device::from_node(&json!({"id": 4, "nt": 2, "type": 132})).unwrap();
        let event = json!({"value": "knob.spin", "params": {"free_spin": 2}});
        let payload = device.decode_event(event.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("action"), Some(&json!("free_spin")));
        assert_eq!(payload.get("event"), Some(&json!("knob.spin")));
    }

    #[test]
    fn switch_sensor_type_gets_knob_converters() {
        // E-series knobs report the switch sensor type code.
        let device = Device::from_node(&json!({"id": 4, "nt": 2, "type": 128})).unwrap();
        assert!(device.converter("knob.spin").is_some());
        assert!(device.converter("panel.click").is_some());
    }

    #[test]
    fn decode_event_falls_back_to_type_discriminator() {
        let device = Device::from_node(&json!({"id": 4, "nt": 2, "type": 130})).unwrap();
        let event = json!({"type": "contact.open", "params": {}});
        let payload = device.decode_event(event.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("contact"), Some(&json!(true)));
    }

    #[test]
    fn decode_event_ignores_unknown_discriminators() {
        let device = Device::from_node(&light_node()).unwrap();
        let event = json!({"value": "panel.click", "params": {"key": "1"}});
        let payload = device.decode_event(event.as_object().unwrap()).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn motion_sensor_with_light_detection() {
        let device =
            Device::from_node(&json!({"id": 6, "nt": 2, "type": 129, "cids": [73]})).unwrap();
        let luminance = device.converter("luminance").unwrap();
        assert_eq!(luminance.unit_of_measurement(), Some("lx"));
        assert_eq!(luminance.device_class(), Some("illuminance"));

        let plain = Device::from_node(&json!({"id": 6, "nt": 2, "type": 129, "cids": [9]})).unwrap();
        assert!(plain.converter("luminance").is_none());
    }

    #[test]
    fn cover_encode_mixes_motor_and_position() {
        let device = Device::from_node(&json!({"id": 8, "nt": 2, "type": 6})).unwrap();
        let values = json!({"motor": "pause", "position": 40});
        let payload = device.encode(values.as_object().unwrap()).unwrap();
        assert_eq!(
            payload.into_value(),
            json!({
                "motor": {"action": {"motorAdjust": {"type": "pause"}}},
                "set": {"tp": 40},
            })
        );
    }

    #[test]
    fn cover_reverse_switch_needs_props() {
        let mut device = Device::from_node(&json!({"id": 8, "nt": 2, "type": 6})).unwrap();
        assert!(device.converter("reverse").is_none());
        device
            .prop_changed(json!({"params": {"rs": 0}}).as_object().unwrap())
            .unwrap();
        assert!(device.converter("reverse").is_some());
    }

    #[test]
    fn climate_maps_modes() {
        let device = Device::from_node(&json!({"id": 3, "nt": 2, "type": 15})).unwrap();
        let report = json!({"params": {"1-acp": 1, "1-acm": 8, "1-acf": 2, "1-acct": 23}});
        let payload = device.decode(report.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("is_on"), Some(&json!(true)));
        assert_eq!(payload.get("mode"), Some(&json!("heat")));
        assert_eq!(payload.get("fan_mode"), Some(&json!("medium")));
        assert_eq!(payload.get("current_temperature"), Some(&json!(23)));

        let values = json!({"mode": "cool", "target_temperature": 21});
        let payload = device.encode(values.as_object().unwrap()).unwrap();
        assert_eq!(
            payload.into_value(),
            json!({"set": {"1-acm": 1, "1-actt": 21}})
        );

        // An unknown platform mode has no vendor encoding.
        let values = json!({"mode": "auto"});
        assert!(device.encode(values.as_object().unwrap()).is_err());

        // Unknown vendor codes decode to null rather than failing.
        let report = json!({"params": {"1-acm": 3}});
        let payload = device.decode(report.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("mode"), Some(&json!(null)));
    }

    #[test]
    fn encode_read_pulls_props_back_out() {
        let device = Device::from_node(&json!({"id": 8, "nt": 2, "type": 6})).unwrap();
        let mut accumulated = Payload::new();
        accumulated.insert("cp", json!(65));
        accumulated.insert("tp", json!(100));

        let attrs = BTreeSet::from(["current_position".to_string(), "motor".to_string()]);
        let payload = device.encode_read(&attrs, &accumulated);
        // The motor converter has no vendor property to read back.
        assert_eq!(payload.into_value(), json!({"cp": 65}));
    }

    #[test]
    fn subscribe_attrs_includes_nested_converters() {
        let device = Device::from_node(&json!({"id": 8, "nt": 2, "type": 6})).unwrap();
        let motor = device.converter("motor").unwrap();
        assert_eq!(
            device.subscribe_attrs(motor),
            BTreeSet::from([
                "motor".to_string(),
                "position".to_string(),
                "current_position".to_string(),
            ])
        );
    }

    #[test]
    fn gateway_registers_scenes() {
        let mut gateway = Device::gateway();
        assert_eq!(gateway.unique_id(), "gateway_0");
        assert!(gateway.add_scene(&json!({"id": 9, "n": "movie night", "nt": 6})));
        assert!(!gateway.add_scene(&json!({"n": "nameless"})));

        let scene = gateway.converter("scene_9").unwrap();
        assert_eq!(scene.domain(), Some("button"));
        assert!(matches!(scene.transform(), Transform::Scene { .. }));
    }

    #[test]
    fn wifi_panel_converters() {
        let device = Device::wifi_panel(&json!({"id": 11})).unwrap();
        assert_eq!(device.unique_id(), "wifi_panel_11");
        assert!(device.converter("switch1").is_some());
        assert!(device.converter("switch2").is_some());
        assert!(device.converter("keyClick").is_some());

        let event = json!({"value": "keyClick", "params": {"key": "2", "count": 1}});
        let payload = device.decode_event(event.as_object().unwrap()).unwrap();
        assert_eq!(payload.get("action"), Some(&json!("button2_single")));
    }

    #[test]
    fn prop_changed_tracks_online_state() {
        let mut device = Device::from_node(&light_node()).unwrap();
        device
            .prop_changed(json!({"o": true, "fv": "1.2.3"}).as_object().unwrap())
            .unwrap();
        assert_eq!(device.online(), Some(true));
        assert_eq!(device.firmware_version(), Some("1.2.3"));
    }
}
