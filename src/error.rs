// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `YeePro` library.
//!
//! This module provides the error hierarchy for value conversion failures:
//! ill-typed payload values on one side, and transforms whose input has no
//! representation on the other (reverse lookup misses, math-domain faults).

use thiserror::Error;

/// The main error type for this library.
///
/// This enum encompasses all possible errors that can occur when converting
/// values between a Yeelight Pro gateway and a smart-home platform.
#[derive(Debug, Error)]
pub enum Error {
    /// A payload value had an unexpected type.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// A conversion could not produce a result.
    #[error("convert error: {0}")]
    Convert(#[from] ConvertError),
}

/// Errors raised when a payload value has the wrong shape for a transform.
///
/// The offending value is carried in its JSON rendering so the caller can
/// log exactly what the device (or the platform) handed over.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    /// Expected a boolean or a 0/1 integer.
    #[error("expected a boolean or 0/1 value, got {0}")]
    NotBoolean(String),

    /// Expected a number (or a numeric string).
    #[error("expected a numeric value, got {0}")]
    NotNumeric(String),

    /// Expected a three-element RGB array.
    #[error("expected an RGB triple, got {0}")]
    NotRgbTriple(String),

    /// Expected an event parameter object.
    #[error("expected an event object, got {0}")]
    NotAnObject(String),
}

/// Errors raised when a well-typed value has no converted representation.
///
/// These are fatal for the single call that raised them: substituting a
/// default would send a wrong command or corrupt reported state, so they
/// propagate to the caller unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConvertError {
    /// A platform value has no vendor counterpart in a map converter.
    #[error("no vendor value maps to {value}")]
    ReverseLookupFailed {
        /// The platform value that failed the reverse lookup.
        value: String,
    },

    /// A color temperature of 0 K cannot be expressed in mired.
    #[error("cannot convert {kelvin} K to mired")]
    InvalidKelvin {
        /// The offending Kelvin value.
        kelvin: i64,
    },

    /// A normalization range with identical endpoints. This is a
    /// configuration error, not bad device data.
    #[error("cannot normalize over degenerate range [{lo}, {hi}]")]
    DegenerateRange {
        /// First endpoint of the range.
        lo: i64,
        /// Second endpoint of the range.
        hi: i64,
    },
}

/// A specialized Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_error_display() {
        let err = ValueError::NotNumeric("\"five\"".to_string());
        assert_eq!(err.to_string(), "expected a numeric value, got \"five\"");
    }

    #[test]
    fn convert_error_display() {
        let err = ConvertError::ReverseLookupFailed {
            value: "\"auto\"".to_string(),
        };
        assert_eq!(err.to_string(), "no vendor value maps to \"auto\"");

        let err = ConvertError::DegenerateRange { lo: 5, hi: 5 };
        assert_eq!(
            err.to_string(),
            "cannot normalize over degenerate range [5, 5]"
        );
    }

    #[test]
    fn error_from_value_error() {
        let value_err = ValueError::NotBoolean("[]".to_string());
        let err: Error = value_err.into();
        assert!(matches!(err, Error::Value(ValueError::NotBoolean(_))));
    }

    #[test]
    fn error_from_convert_error() {
        let convert_err = ConvertError::InvalidKelvin { kelvin: 0 };
        let err: Error = convert_err.into();
        assert_eq!(
            err.to_string(),
            "convert error: cannot convert 0 K to mired"
        );
    }
}
