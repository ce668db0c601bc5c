// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `YeePro` Lib - A Rust library to normalize Yeelight Pro device state.
//!
//! This library translates between the Yeelight Pro gateway wire protocol
//! (flat property keys, raw numeric encodings, vendor event payloads) and a
//! smart-home platform's entity attribute model (brightness 0-255, RGB
//! triples, cover positions, discrete action strings). It is a pure
//! transformation library: the transport that talks to gateways and the
//! entity layer that owns platform state live elsewhere and drive it through
//! `decode`/`encode` calls.
//!
//! # Supported Devices
//!
//! - **Lights**: on/off, brightness, color temperature, RGB, beam angle
//! - **Switch panels and relays**: multi-channel switches, panel backlight
//! - **Buttons and knobs**: click/hold/release actions, knob spins
//! - **Sensors**: motion, contact, illuminance
//! - **Covers**: motor commands, target and current position
//! - **Climate**: HVAC and fan modes, temperatures
//!
//! # Quick Start
//!
//! ## Decoding a property report
//!
//! ```
//! use serde_json::json;
//! use yeepro_lib::Device;
//!
//! // A dimmable color light as the gateway reports it.
//! let device = Device::from_node(&json!({"id": 7, "nt": 2, "type": 4})).unwrap();
//!
//! let report = json!({"params": {"p": 1, "l": 75, "c": 0xFF8000}});
//! let payload = device.decode(report.as_object().unwrap()).unwrap();
//!
//! assert_eq!(payload.get("light"), Some(&json!(true)));
//! assert_eq!(payload.get("brightness"), Some(&json!(191)));
//! assert_eq!(payload.get("rgb_color"), Some(&json!([255, 128, 0])));
//! ```
//!
//! ## Encoding a command
//!
//! ```
//! use serde_json::json;
//! use yeepro_lib::Device;
//!
//! let device = Device::from_node(&json!({"id": 7, "nt": 2, "type": 4})).unwrap();
//!
//! let command = json!({"light": true, "brightness": 191});
//! let payload = device.encode(command.as_object().unwrap()).unwrap();
//!
//! // Property writes nest under `set` in the vendor message.
//! assert_eq!(payload.into_value(), json!({"set": {"p": true, "l": 75}}));
//! ```
//!
//! ## Interpreting device events
//!
//! ```
//! use serde_json::json;
//! use yeepro_lib::Device;
//!
//! // A wireless knob.
//! let device = Device::from_node(&json!({"id": 4, "nt": 2, "type": 132})).unwrap();
//!
//! let event = json!({"value": "panel.click", "params": {"key": "1", "count": 2}});
//! let payload = device.decode_event(event.as_object().unwrap()).unwrap();
//!
//! assert_eq!(payload.get("action"), Some(&json!("button1_double")));
//! ```

pub mod convert;
pub mod device;
pub mod error;
pub mod payload;

pub use convert::{Channel, Converter, Transform};
pub use device::{ColorMode, Device, DeviceType, NodeType};
pub use error::{ConvertError, Error, Result, ValueError};
pub use payload::Payload;
