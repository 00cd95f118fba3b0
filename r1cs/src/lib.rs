//! Rank-1 constraint system construction, serialization, and witness
//! validation.
//!
//! This crate is the user-facing surface over the [`r1cs_core`] data
//! model:
//!
//! - [`Builder`] - incremental construction of wires and constraints,
//!   finalized into an immutable [`R1cs`] snapshot
//! - [`codec`] - deterministic, versioned binary encode/decode
//! - [`validator`] - exhaustive witness checking that reports every
//!   violated constraint, not just the first
//! - [`witness`] - JSON witness ingestion for values beyond 64 bits
//!
//! # Quick Start
//!
//! ```
//! use num_bigint::BigUint;
//! use r1cs::{Builder, FieldParams, Visibility, WireId, Witness};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let field = FieldParams::bn254_scalar();
//! let mut builder = Builder::new(field.clone());
//!
//! // x * x = 1, i.e. x is a square root of unity.
//! let (x, _label) = builder.add_wire(Visibility::PublicInput)?;
//! let a = builder.linear_combination([(x, BigUint::from(1u32))]);
//! let b = builder.linear_combination([(x, BigUint::from(1u32))]);
//! let c = builder.linear_combination([(WireId::CONSTANT, BigUint::from(1u32))]);
//! builder.add_constraint(a, b, c)?;
//!
//! let system = builder.finalize();
//!
//! // -1 mod p is a square root of unity.
//! let mut witness = Witness::new();
//! witness.assign(x, field.modulus() - BigUint::from(1u32), &field)?;
//!
//! let report = r1cs::validate(&system, &witness)?;
//! assert!(report.is_satisfied());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, rust_2018_idioms)]

pub use r1cs_core::{
    Constraint, Error as CoreError, FieldParams, LabelId, LinearCombination, R1cs, Term,
    Visibility, Wire, WireId, Witness,
};

mod builder;
pub mod codec;
pub mod validator;
pub mod witness;

pub use builder::Builder;
pub use codec::{decode, encode, FormatError};
pub use validator::{validate, ValidationReport, Violation};
pub use witness::{witness_from_json, WitnessParseError};
