// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The device model built on top of the converter registry.
//!
//! A [`Device`] is constructed once from the node description a gateway
//! reports and carries the converter set for its device family. The entity
//! and transport layers drive it through [`Device::decode`],
//! [`Device::decode_event`], [`Device::encode`], and [`Device::encode_read`].

mod model;
mod node;

pub use model::{ColorMode, Device};
pub use node::{DeviceType, NodeType};
