// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic reusable transforms independent of any entity domain: booleans,
//! map lookups, millisecond durations, and integer range normalization.

use serde_json::Value;

use crate::convert::Converter;
use crate::error::{ConvertError, Result};
use crate::payload::{Payload, as_boolean, as_number};

pub(crate) fn decode_bool(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    let value = as_boolean(value)?;
    conv.store_attr(payload, Value::Bool(value));
    Ok(())
}

pub(crate) fn encode_bool(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    let value = as_boolean(value)?;
    conv.store_prop(payload, Value::Bool(value));
    Ok(())
}

/// Unknown vendor values normalize to JSON null rather than raising.
pub(crate) fn decode_map(
    conv: &Converter,
    map: &[(Value, Value)],
    payload: &mut Payload,
    value: &Value,
) {
    let mapped = map
        .iter()
        .find(|(vendor, _)| vendor == value)
        .map_or(Value::Null, |(_, platform)| platform.clone());
    conv.store_attr(payload, mapped);
}

/// A platform value with no vendor counterpart is fatal: there is nothing
/// meaningful to send.
pub(crate) fn encode_map(
    conv: &Converter,
    map: &[(Value, Value)],
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let vendor = map
        .iter()
        .find(|(_, platform)| platform == value)
        .map(|(vendor, _)| vendor.clone())
        .ok_or_else(|| ConvertError::ReverseLookupFailed {
            value: value.to_string(),
        })?;
    conv.store_prop(payload, vendor);
    Ok(())
}

pub(crate) fn decode_duration(
    conv: &Converter,
    readable: bool,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    if readable && !value.is_null() {
        let millis = as_number(value)?;
        conv.store_attr(payload, Value::from(truncate(millis / 1000.0)));
    }
    Ok(())
}

pub(crate) fn encode_duration(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    if !value.is_null() {
        let seconds = as_number(value)?;
        conv.store_prop(payload, Value::from(truncate(seconds * 1000.0)));
    }
    Ok(())
}

pub(crate) fn decode_normalized(
    conv: &Converter,
    prop_range: (i64, i64),
    attr_range: (i64, i64),
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let value = as_number(value)?;
    let normalized = normalize(value, prop_range, attr_range)?;
    conv.store_attr(payload, Value::from(normalized));
    Ok(())
}

pub(crate) fn encode_normalized(
    conv: &Converter,
    attr_range: (i64, i64),
    prop_range: (i64, i64),
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let value = as_number(value)?;
    let normalized = normalize(value, attr_range, prop_range)?;
    conv.store_prop(payload, Value::from(normalized));
    Ok(())
}

/// Clamps `value` into `from` (endpoint order does not matter), then linearly
/// interpolates into `to`, truncating toward zero.
#[allow(clippy::cast_precision_loss)]
fn normalize(value: f64, from: (i64, i64), to: (i64, i64)) -> Result<i64> {
    if from.0 == from.1 {
        return Err(ConvertError::DegenerateRange {
            lo: from.0,
            hi: from.1,
        }
        .into());
    }
    let clamped = value.clamp(from.0.min(from.1) as f64, from.0.max(from.1) as f64);
    let scaled = to.0 as f64
        + (clamped - from.0 as f64) / (from.1 as f64 - from.0 as f64) * (to.1 as f64 - to.0 as f64);
    Ok(truncate(scaled))
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::convert::Transform;
    use crate::device::Device;
    use crate::error::Error;

    fn device() -> Device {
        Device::gateway()
    }

    #[test]
    fn bool_decode_coerces_integers() {
        let conv = Converter::new("light", Transform::Bool);
        for (input, expected) in [
            (json!(0), false),
            (json!(1), true),
            (json!(false), false),
            (json!(true), true),
        ] {
            let mut payload = Payload::new();
            conv.decode(&device(), &mut payload, &input).unwrap();
            assert_eq!(payload.get("light"), Some(&json!(expected)));
        }
    }

    #[test]
    fn bool_round_trip() {
        let dev = device();
        let conv = Converter::prop_bool("light", "p");
        for input in [json!(0), json!(1), json!(false), json!(true)] {
            let mut decoded = Payload::new();
            conv.decode(&dev, &mut decoded, &input).unwrap();

            let mut encoded = Payload::new();
            conv.encode(&dev, &mut encoded, decoded.get("light").unwrap())
                .unwrap();
            assert_eq!(
                encoded.get("p"),
                Some(&json!(as_boolean(&input).unwrap())),
                "round trip of {input}"
            );
        }
    }

    #[test]
    fn map_decode_known_and_unknown() {
        let conv = Converter::new(
            "mode",
            Transform::map([(json!(1), json!("low")), (json!(2), json!("high"))]),
        );
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(1)).unwrap();
        assert_eq!(payload.get("mode"), Some(&json!("low")));

        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(9)).unwrap();
        assert_eq!(payload.get("mode"), Some(&json!(null)));
    }

    #[test]
    fn map_encode_reverse_lookup() {
        let conv = Converter::prop_map(
            "mode",
            "1-acm",
            [(json!(1), json!("low")), (json!(2), json!("high"))],
        );
        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!("low")).unwrap();
        assert_eq!(payload.get("1-acm"), Some(&json!(1)));
    }

    #[test]
    fn map_encode_unknown_value_fails() {
        let conv = Converter::new(
            "mode",
            Transform::map([(json!(1), json!("low")), (json!(2), json!("high"))]),
        );
        let mut payload = Payload::new();
        let err = conv
            .encode(&device(), &mut payload, &json!("unknown"))
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Convert(ConvertError::ReverseLookupFailed { .. })
        ));
        assert!(payload.is_empty());
    }

    #[test]
    fn map_encode_duplicate_values_take_first() {
        let conv = Converter::new(
            "speed",
            Transform::map([
                (json!(1), json!("slow")),
                (json!(2), json!("fast")),
                (json!(3), json!("fast")),
            ]),
        );
        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!("fast")).unwrap();
        assert_eq!(payload.get("speed"), Some(&json!(2)));
    }

    #[test]
    fn duration_decode_milliseconds_to_seconds() {
        let conv = Converter::duration("delay");
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(5000)).unwrap();
        assert_eq!(payload.get("delay"), Some(&json!(5)));

        // Truncation, not rounding.
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(5999)).unwrap();
        assert_eq!(payload.get("delay"), Some(&json!(5)));
    }

    #[test]
    fn duration_decode_accepts_numeric_strings() {
        let conv = Converter::duration("delay");
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!("5000")).unwrap();
        assert_eq!(payload.get("delay"), Some(&json!(5)));
    }

    #[test]
    fn duration_encode_seconds_to_milliseconds() {
        let conv = Converter::duration("transition").with_prop("duration");
        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!(5)).unwrap();
        assert_eq!(payload.get("duration"), Some(&json!(5000)));
    }

    #[test]
    fn duration_null_is_a_no_op() {
        let dev = device();
        let conv = Converter::duration("delay");
        let mut payload = Payload::new();
        conv.decode(&dev, &mut payload, &json!(null)).unwrap();
        conv.encode(&dev, &mut payload, &json!(null)).unwrap();
        assert!(payload.is_empty());
    }

    #[test]
    fn unreadable_duration_skips_decode() {
        let conv = Converter::new("delayoff", Transform::duration(false)).with_domain("number");
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(5000)).unwrap();
        assert!(payload.is_empty());

        // Encode still works.
        conv.encode(&device(), &mut payload, &json!(5)).unwrap();
        assert_eq!(payload.get("delayoff"), Some(&json!(5000)));
    }

    #[test]
    fn normalization_scales_between_ranges() {
        let conv = Converter::new("volume", Transform::int_normalization((0, 255), (0, 100)));
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(50)).unwrap();
        // 50/100 of 255 is 127.5, truncated.
        assert_eq!(payload.get("volume"), Some(&json!(127)));

        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!(255)).unwrap();
        assert_eq!(payload.get("volume"), Some(&json!(100)));
    }

    #[test]
    fn normalization_clamps_overflow() {
        let conv = Converter::new("volume", Transform::int_normalization((0, 255), (0, 100)));
        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(900)).unwrap();
        assert_eq!(payload.get("volume"), Some(&json!(255)));

        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!(-12)).unwrap();
        assert_eq!(payload.get("volume"), Some(&json!(0)));
    }

    #[test]
    fn normalization_accepts_descending_ranges() {
        // An inverted vendor range maps low platform values to high vendor ones.
        let conv = Converter::new("level", Transform::int_normalization((0, 100), (100, 0)));
        let mut payload = Payload::new();
        conv.encode(&device(), &mut payload, &json!(25)).unwrap();
        assert_eq!(payload.get("level"), Some(&json!(75)));

        let mut payload = Payload::new();
        conv.decode(&device(), &mut payload, &json!(75)).unwrap();
        assert_eq!(payload.get("level"), Some(&json!(25)));
    }

    #[test]
    fn normalization_rejects_degenerate_range() {
        let conv = Converter::new("level", Transform::int_normalization((0, 100), (5, 5)));
        let mut payload = Payload::new();
        let err = conv.decode(&device(), &mut payload, &json!(5)).unwrap_err();
        assert!(matches!(
            err,
            Error::Convert(ConvertError::DegenerateRange { lo: 5, hi: 5 })
        ));
    }
}
