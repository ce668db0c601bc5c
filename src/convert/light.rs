// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lighting transforms: brightness rescaling, Kelvin/mired color temperature
//! conversion, and 24-bit RGB packing.

use serde_json::{Value, json};

use crate::convert::Converter;
use crate::error::{ConvertError, Result, ValueError};
use crate::payload::{Payload, as_integer, as_number};

/// Raw Kelvin is preserved alongside the derived mired value on decode.
const COLOR_TEMP_KELVIN: &str = "color_temp_kelvin";

pub(crate) fn decode_brightness(
    conv: &Converter,
    max: f64,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let value = as_number(value)?;
    conv.store_attr(payload, Value::from(round(value / max * 255.0)));
    Ok(())
}

pub(crate) fn encode_brightness(
    conv: &Converter,
    max: f64,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let value = as_number(value)?;
    conv.store_prop(payload, Value::from(round(value / 255.0 * max)));
    Ok(())
}

/// Converts degrees Kelvin to a mired shift, dual-writing the raw Kelvin.
pub(crate) fn decode_color_temp(
    conv: &Converter,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let mired = kelvin_to_mired(value)?;
    conv.store_attr(payload, Value::from(mired));
    payload.insert(COLOR_TEMP_KELVIN, value.clone());
    Ok(())
}

pub(crate) fn encode_color_temp(
    conv: &Converter,
    mink: i64,
    maxk: i64,
    payload: &mut Payload,
    value: &Value,
) -> Result<()> {
    let mut mired = kelvin_to_mired(value)?;
    // The bounds apply to the mired-converted value; keeping the command and
    // state paths on the same formula matters more than the field naming.
    if mired < mink {
        mired = mink;
    }
    if mired > maxk {
        mired = maxk;
    }
    conv.store_prop(payload, Value::from(mired));
    Ok(())
}

pub(crate) fn decode_rgb(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    let packed = as_integer(value)?;
    let red = (packed >> 16) & 0xFF;
    let green = (packed >> 8) & 0xFF;
    let blue = packed & 0xFF;
    conv.store_attr(payload, json!([red, green, blue]));
    Ok(())
}

pub(crate) fn encode_rgb(conv: &Converter, payload: &mut Payload, value: &Value) -> Result<()> {
    let channels = value
        .as_array()
        .filter(|channels| channels.len() == 3)
        .ok_or_else(|| ValueError::NotRgbTriple(value.to_string()))?;
    let red = as_integer(&channels[0])?;
    let green = as_integer(&channels[1])?;
    let blue = as_integer(&channels[2])?;
    conv.store_prop(payload, Value::from((red << 16) | (green << 8) | blue));
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn kelvin_to_mired(value: &Value) -> Result<i64> {
    let kelvin = as_integer(value)?;
    if kelvin == 0 {
        return Err(ConvertError::InvalidKelvin { kelvin }.into());
    }
    Ok((1_000_000.0 / kelvin as f64).trunc() as i64)
}

#[allow(clippy::cast_possible_truncation)]
fn round(value: f64) -> i64 {
    value.round() as i64
}
