//! JSON witness ingestion.
//!
//! Witness files map decimal wire indices to field values. Values may be
//! native JSON integers or decimal strings; strings are required once
//! values exceed what JSON numbers carry losslessly, e.g. elements of a
//! 254-bit field:
//!
//! ```json
//! { "0": 1, "1": "21888242871839275222246405745257275088548364400416034343698204186575808495616" }
//! ```
//!
//! Everything is range-checked here, so the validator only ever sees
//! values in `[0, modulus)`.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use thiserror::Error as ThisError;
use tracing::debug;

use r1cs_core::{Error as CoreError, FieldParams, WireId, Witness};

/// Errors raised while parsing a JSON witness document.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum WitnessParseError {
    /// The document is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level value is not an object.
    #[error("witness document must be a JSON object mapping wire indices to values")]
    NotAnObject,

    /// An object key is not a decimal wire index.
    #[error("invalid wire index {key:?}: {reason}")]
    BadWireIndex {
        /// The offending key.
        key: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A value is not a non-negative integer literal.
    #[error("invalid value for wire {}: {reason}", .wire.index())]
    BadValue {
        /// Wire whose value was rejected.
        wire: WireId,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A value failed the field range check (or re-assigned wire 0).
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Parse a JSON object into a validated [`Witness`].
///
/// Wire 0 may be omitted (it is implicitly 1) or supplied explicitly,
/// in which case it must be 1.
///
/// # Errors
///
/// Returns a [`WitnessParseError`] for malformed JSON, non-decimal
/// keys, negative or fractional values, and values `>= modulus`.
pub fn witness_from_json(json: &str, field: &FieldParams) -> Result<Witness, WitnessParseError> {
    let document: BTreeMap<String, serde_json::Value> =
        serde_json::from_str(json).map_err(|err| {
            // Distinguish "not an object" from token-level errors.
            match serde_json::from_str::<serde_json::Value>(json) {
                Ok(_) => WitnessParseError::NotAnObject,
                Err(_) => WitnessParseError::Json(err),
            }
        })?;

    let mut witness = Witness::new();
    for (key, value) in &document {
        let wire = parse_wire_index(key)?;
        let element = parse_field_value(wire, value)?;
        witness.assign(wire, element, field)?;
    }
    debug!(entries = witness.len(), "parsed JSON witness");
    Ok(witness)
}

fn parse_wire_index(key: &str) -> Result<WireId, WitnessParseError> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return Err(WitnessParseError::BadWireIndex {
            key: key.to_owned(),
            reason: "expected a decimal wire index",
        });
    }
    key.parse::<u32>()
        .map(WireId)
        .map_err(|_| WitnessParseError::BadWireIndex {
            key: key.to_owned(),
            reason: "wire index does not fit in 32 bits",
        })
}

fn parse_field_value(
    wire: WireId,
    value: &serde_json::Value,
) -> Result<BigUint, WitnessParseError> {
    match value {
        serde_json::Value::Number(number) => {
            if let Some(unsigned) = number.as_u64() {
                Ok(BigUint::from(unsigned))
            } else if number.is_i64() {
                Err(WitnessParseError::BadValue {
                    wire,
                    reason: "field values may not be negative",
                })
            } else {
                Err(WitnessParseError::BadValue {
                    wire,
                    reason: "field values must be integers; use a decimal string for large values",
                })
            }
        }
        serde_json::Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.starts_with('-') {
                return Err(WitnessParseError::BadValue {
                    wire,
                    reason: "field values may not be negative",
                });
            }
            if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
                return Err(WitnessParseError::BadValue {
                    wire,
                    reason: "expected a decimal integer string",
                });
            }
            trimmed
                .parse::<BigUint>()
                .map_err(|_| WitnessParseError::BadValue {
                    wire,
                    reason: "expected a decimal integer string",
                })
        }
        _ => Err(WitnessParseError::BadValue {
            wire,
            reason: "expected an integer or a decimal string",
        }),
    }
}
