// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Event payload interpretation.
//!
//! Yeelight Pro devices report button presses, knob spins, and sensor
//! triggers as event messages rather than property updates, and the payload
//! shapes are not consistent across device families. The decoder here turns
//! them into the platform's action vocabulary; encode is a passthrough that
//! exists only for interface symmetry.

use serde_json::{Map, Value, json};

use crate::convert::Converter;
use crate::error::{Result, ValueError};
use crate::payload::Payload;

/// Spin keys checked in order. The numbered variants cover multi-knob
/// E-series hardware.
const SPIN_KEYS: [&str; 6] = [
    "free_spin",
    "hold_spin",
    "1-free_spin",
    "2-free_spin",
    "3-free_spin",
    "4-free_spin",
];

/// Attributes whose events carry a `key`/`count` button payload.
const BUTTON_EVENTS: [&str; 4] = ["panel.click", "panel.hold", "panel.release", "keyClick"];

pub(crate) fn decode_event(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    let params = value
        .as_object()
        .ok_or_else(|| ValueError::NotAnObject(value.to_string()))?;
    let attr = conv.attr();
    let (namespace, subtype) = match attr.split_once('.') {
        Some((namespace, subtype)) => (namespace, Some(subtype)),
        None => (attr, None),
    };

    if matches!(namespace, "motion" | "contact") {
        payload.insert(
            namespace,
            Value::Bool(matches!(subtype, Some("true" | "open"))),
        );
        payload.merge(params);
    } else if BUTTON_EVENTS.contains(&attr) {
        decode_button(attr, subtype, params, payload);
    } else if attr == "knob.spin" {
        // Multiple spin keys firing in one payload overwrite each other;
        // the last matching key in SPIN_KEYS order survives.
        for spin in SPIN_KEYS {
            if !params.get(spin).is_some_and(spin_fired) {
                continue;
            }
            payload.insert("action", Value::String(spin.to_string()));
            payload.insert("event", Value::String(attr.to_string()));
            payload.merge(params);
        }
    }
    Ok(())
}

fn decode_button(attr: &str, subtype: Option<&str>, params: &Map<String, Value>, payload: &mut Payload) {
    let key = params
        .get("key")
        .cloned()
        .unwrap_or_else(|| Value::String(String::new()));
    let mut action = format!("button{}", key_text(&key));
    let suffix = match params.get("count").and_then(Value::as_i64) {
        Some(1) => Some("single"),
        Some(2) => Some("double"),
        Some(3) => Some("triple"),
        _ => subtype,
    };
    if let Some(suffix) = suffix.filter(|suffix| !suffix.is_empty()) {
        action.push('_');
        action.push_str(suffix);
    }
    payload.insert("action", Value::String(action));
    payload.insert("event", Value::String(attr.to_string()));
    payload.insert("button", key);
    payload.merge(params);
}

/// Null and zero are idle values; anything else counts as a spin.
fn spin_fired(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(fired) => *fired,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        _ => true,
    }
}

fn key_text(key: &Value) -> String {
    match key {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

pub(crate) fn decode_motor(
    conv: &Converter,
    readable: bool,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    if readable && !value.is_null() {
        conv.store_attr(payload, value.clone());
    }
    Ok(())
}

/// Motor moves are single-shot commands, not property sets.
pub(crate) fn encode_motor(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    if !value.is_null() {
        conv.store_prop(payload, json!({"action": {"motorAdjust": {"type": value}}}));
    }
    Ok(())
}
