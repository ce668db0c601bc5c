// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node and device type codes reported by the gateway.

use std::fmt;

/// The kind of node a gateway reports in its topology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    /// The gateway itself.
    Gateway,
    /// A room grouping.
    Room,
    /// A mesh device.
    Mesh,
    /// A device group.
    Group,
    /// A mesh device group.
    MeshGroup,
    /// The whole home.
    Home,
    /// A scene definition.
    Scene,
}

impl NodeType {
    /// Resolves a raw `nt` code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -1 => Some(Self::Gateway),
            1 => Some(Self::Room),
            2 => Some(Self::Mesh),
            3 => Some(Self::Group),
            4 => Some(Self::MeshGroup),
            5 => Some(Self::Home),
            6 => Some(Self::Scene),
            _ => None,
        }
    }

    /// The raw code used on the wire.
    #[must_use]
    pub const fn code(self) -> i64 {
        match self {
            Self::Gateway => -1,
            Self::Room => 1,
            Self::Mesh => 2,
            Self::Group => 3,
            Self::MeshGroup => 4,
            Self::Home => 5,
            Self::Scene => 6,
        }
    }
}

/// The device family reported in a node's `type` field.
///
/// [`DeviceType::Gateway`] and [`DeviceType::WifiPanel`] have no numeric
/// code; they are assigned by the constructors that synthesize those devices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceType {
    /// On/off light.
    Light,
    /// Dimmable light.
    LightWithBrightness,
    /// Dimmable light with tunable white.
    LightWithColorTemp,
    /// Full color light.
    LightWithColor,
    /// Curtain or cover motor.
    Curtain,
    /// Two-channel relay.
    RelayDouble,
    /// VRF air conditioning gateway.
    Vrf,
    /// Wall switch panel.
    SwitchPanel,
    /// Light with a motorized zoom color-temperature head.
    LightWithZoomCt,
    /// Air conditioner.
    AirConditioner,
    /// Wireless switch sensor (E-series knobs report this code).
    SwitchSensor,
    /// Motion sensor.
    MotionSensor,
    /// Door/window magnet sensor.
    MagnetSensor,
    /// Rotary knob.
    Knob,
    /// Motion sensor with ambient light measurement.
    MotionWithLight,
    /// Standalone illumination sensor.
    IlluminationSensor,
    /// Temperature and humidity sensor.
    TemperatureHumidity,
    /// The gateway pseudo-device that owns scene converters.
    Gateway,
    /// The all-screen Wi-Fi panel.
    WifiPanel,
}

impl DeviceType {
    /// Resolves a raw `type` code.
    #[must_use]
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Self::Light),
            2 => Some(Self::LightWithBrightness),
            3 => Some(Self::LightWithColorTemp),
            4 => Some(Self::LightWithColor),
            6 => Some(Self::Curtain),
            7 => Some(Self::RelayDouble),
            10 => Some(Self::Vrf),
            13 => Some(Self::SwitchPanel),
            14 => Some(Self::LightWithZoomCt),
            15 => Some(Self::AirConditioner),
            128 => Some(Self::SwitchSensor),
            129 => Some(Self::MotionSensor),
            130 => Some(Self::MagnetSensor),
            132 => Some(Self::Knob),
            134 => Some(Self::MotionWithLight),
            135 => Some(Self::IlluminationSensor),
            136 => Some(Self::TemperatureHumidity),
            _ => None,
        }
    }

    /// The raw code, absent for the synthesized kinds.
    #[must_use]
    pub const fn code(self) -> Option<i64> {
        match self {
            Self::Light => Some(1),
            Self::LightWithBrightness => Some(2),
            Self::LightWithColorTemp => Some(3),
            Self::LightWithColor => Some(4),
            Self::Curtain => Some(6),
            Self::RelayDouble => Some(7),
            Self::Vrf => Some(10),
            Self::SwitchPanel => Some(13),
            Self::LightWithZoomCt => Some(14),
            Self::AirConditioner => Some(15),
            Self::SwitchSensor => Some(128),
            Self::MotionSensor => Some(129),
            Self::MagnetSensor => Some(130),
            Self::Knob => Some(132),
            Self::MotionWithLight => Some(134),
            Self::IlluminationSensor => Some(135),
            Self::TemperatureHumidity => Some(136),
            Self::Gateway | Self::WifiPanel => None,
        }
    }

    /// Returns `true` for the light device families.
    #[must_use]
    pub const fn is_light(self) -> bool {
        matches!(
            self,
            Self::Light
                | Self::LightWithBrightness
                | Self::LightWithColorTemp
                | Self::LightWithColor
                | Self::LightWithZoomCt
        )
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(code) = self.code() {
            write!(f, "{code}")
        } else if *self == Self::Gateway {
            f.write_str("gateway")
        } else {
            f.write_str("wifi_panel")
        }
    }
}
