// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transform kinds and channel classification.
//!
//! A [`Converter`](super::Converter) carries two orthogonal tags: a
//! [`Transform`] selecting the value transformation and the configuration it
//! needs, and a [`Channel`] classifying which side of the vendor protocol the
//! converter speaks to. The two compose freely, so a boolean transform can sit
//! on the property channel just as well as on the direct command channel.

use serde_json::Value;

/// The value transformation a converter applies.
///
/// Each variant carries only the configuration its kind actually uses, so a
/// map converter always has its lookup table and a boolean converter has no
/// dangling unused fields.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use yeepro_lib::Transform;
///
/// // Defaults via the constructors:
/// let brightness = Transform::brightness();
///
/// // Custom configuration via direct construction:
/// let wide = Transform::Brightness { max: 255.0 };
///
/// let mode = Transform::map([(json!(1), json!("cool")), (json!(8), json!("heat"))]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Transform {
    /// Passthrough copy in both directions.
    Identity,

    /// Coerces booleans and 0/1 integers into booleans.
    Bool,

    /// Bidirectional lookup through an insertion-ordered table of
    /// `(vendor, platform)` pairs. Decoding an unknown vendor value yields
    /// JSON null; encoding an unknown platform value is a fatal lookup error.
    Map {
        /// The `(vendor, platform)` pairs, in insertion order. When two pairs
        /// share a platform value, encode resolves to the first.
        map: Vec<(Value, Value)>,
    },

    /// Millisecond (vendor) to second (platform) duration conversion.
    Duration {
        /// Smallest platform-facing value. Not enforced here.
        min: f64,
        /// Largest platform-facing value. Not enforced here.
        max: f64,
        /// Platform-facing step size. Not enforced here.
        step: f64,
        /// Whether the vendor reports this duration back. When false, decode
        /// is a no-op.
        readable: bool,
    },

    /// Linear rescale between vendor brightness (0..`max`) and platform
    /// brightness (0..255).
    Brightness {
        /// The vendor-side full-scale value.
        max: f64,
    },

    /// Kelvin (platform) to mired (vendor) color temperature conversion.
    ColorTempKelvin {
        /// Lower clamp bound applied to the mired-converted value on encode.
        mink: i64,
        /// Upper clamp bound applied to the mired-converted value on encode.
        maxk: i64,
    },

    /// Packs and unpacks 24-bit RGB integers.
    ColorRgb,

    /// Interprets vendor event payloads (buttons, knobs, motion, contact)
    /// into platform action vocabulary.
    Event,

    /// Wraps motor commands into the vendor's single-shot action structure.
    Motor {
        /// Whether the vendor reports motor state back. Defaults to false.
        readable: bool,
    },

    /// Configuration-only converter carrying a scene graph node. Values pass
    /// through unmodified.
    Scene {
        /// The scene node description as reported by the gateway.
        node: Value,
    },

    /// Integer range remapping with overflow clamping, generalizing
    /// [`Transform::Brightness`].
    IntNormalization {
        /// The platform-facing range.
        attr_range: (i64, i64),
        /// The vendor-facing range.
        prop_range: (i64, i64),
    },
}

impl Transform {
    /// Creates a map transform from `(vendor, platform)` pairs.
    pub fn map(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        Self::Map {
            map: pairs.into_iter().collect(),
        }
    }

    /// Creates a duration transform with the default 0..3600 s range.
    #[must_use]
    pub fn duration(readable: bool) -> Self {
        Self::Duration {
            min: 0.0,
            max: 3600.0,
            step: 1.0,
            readable,
        }
    }

    /// Creates a brightness transform with the default vendor scale of 100.
    #[must_use]
    pub fn brightness() -> Self {
        Self::Brightness { max: 100.0 }
    }

    /// Creates a color temperature transform with the default bounds.
    // 2700..6500 => 370..153
    #[must_use]
    pub fn color_temp_kelvin() -> Self {
        Self::ColorTempKelvin {
            mink: 2700,
            maxk: 6500,
        }
    }

    /// Creates a motor transform. Motor state is not normally reported back.
    #[must_use]
    pub fn motor() -> Self {
        Self::Motor { readable: false }
    }

    /// Creates an integer normalization transform between the given ranges.
    #[must_use]
    pub fn int_normalization(attr_range: (i64, i64), prop_range: (i64, i64)) -> Self {
        Self::IntNormalization {
            attr_range,
            prop_range,
        }
    }

    /// The channel a converter of this kind sits on unless overridden at
    /// construction.
    #[must_use]
    pub fn default_channel(&self) -> Channel {
        match self {
            Self::Event => Channel::Event,
            Self::Motor { .. } => Channel::Action,
            Self::Brightness { .. }
            | Self::ColorTempKelvin { .. }
            | Self::ColorRgb
            | Self::IntNormalization { .. } => Channel::Property,
            _ => Channel::Action,
        }
    }
}

/// Which side of the vendor protocol a converter speaks to.
///
/// The external layer uses this to pick a polling/subscription strategy and
/// to route values: property converters read from a message's `params`
/// sub-map and write under a `set` sub-map, while event and action
/// converters work on the message top level.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// A device state key reported and set via passive property get/set.
    Property,
    /// A device-originated message distinct from steady-state property sync.
    Event,
    /// A command-originated message or direct top-level key.
    Action,
}
