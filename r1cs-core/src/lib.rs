//! Core types for rank-1 constraint systems (R1CS).
//!
//! An R1CS instance is a set of constraints of the form
//!
//! ```text
//! (A · w) * (B · w) = (C · w)   (mod p)
//! ```
//!
//! over a prime field Z_p, where `w` is the witness vector. This crate
//! defines the fundamental vocabulary shared across the stack:
//!
//! - [`WireId`] / [`LabelId`] - strongly-typed circuit identifiers
//! - [`Visibility`] - public-input / public-output / private wire classes
//! - [`FieldParams`] - the working modulus and its derived byte width
//! - [`LinearCombination`] / [`Constraint`] - canonical sparse rows
//! - [`R1cs`] - the immutable constraint-system snapshot
//! - [`Witness`] - a wire-to-field-element assignment
//!
//! Construction (the builder), the binary codec, and witness validation
//! live in the `r1cs` crate; this crate only owns the data model and its
//! invariants.

#![deny(unsafe_op_in_unsafe_fn)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod field;
pub mod lc;
pub mod system;
pub mod witness;

pub use field::FieldParams;
pub use lc::{Constraint, LinearCombination, Term};
pub use system::{R1cs, Wire};
pub use witness::Witness;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

/// Identifier of a circuit variable.
///
/// Wire 0 is reserved for the constant wire, whose value is fixed to 1 in
/// every witness. All other wires are allocated sequentially starting
/// at 1.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct WireId(pub u32);

impl WireId {
    /// The reserved constant-1 wire.
    pub const CONSTANT: WireId = WireId(0);

    /// Raw index of this wire.
    #[inline]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Whether this is the reserved constant wire.
    #[inline]
    pub const fn is_constant(self) -> bool {
        self.0 == 0
    }
}

/// Identifier correlating a wire with an externally-supplied name.
///
/// Labels are assigned once per wire creation and move in lockstep with
/// wire allocation: label count equals wire count at all times.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LabelId(pub u32);

impl LabelId {
    /// Raw value of this label.
    #[inline]
    pub const fn value(self) -> u32 {
        self.0
    }
}

/// Visibility class of a wire.
///
/// Every non-constant wire is tagged exactly one of `PublicInput`,
/// `PublicOutput`, or `Private`. The `Constant` tag is reserved for
/// wire 0 and may not be requested through the builder.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// The constant-1 wire (wire 0 only).
    Constant,
    /// Wire supplied by the verifier as a public input.
    PublicInput,
    /// Wire exposed by the circuit as a public output.
    PublicOutput,
    /// Internal witness wire.
    Private,
}

impl Visibility {
    /// Byte tag used by the binary format.
    #[inline]
    pub const fn tag(self) -> u8 {
        match self {
            Visibility::Constant => 0,
            Visibility::PublicInput => 1,
            Visibility::PublicOutput => 2,
            Visibility::Private => 3,
        }
    }

    /// Inverse of [`Visibility::tag`].
    pub const fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Visibility::Constant),
            1 => Some(Visibility::PublicInput),
            2 => Some(Visibility::PublicOutput),
            3 => Some(Visibility::Private),
            _ => None,
        }
    }
}

/// Errors raised by the core data model.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum Error {
    /// A modulus smaller than 2 defines no field.
    #[error("invalid field modulus {0}: must be at least 2")]
    InvalidModulus(BigUint),

    /// The modulus needs more bytes per element than the binary format's
    /// one-byte width field can express.
    #[error("modulus requires {width} byte(s) per element; the limit is 255")]
    ModulusTooWide {
        /// Bytes needed to encode one element.
        width: usize,
    },

    /// A constraint referenced a wire that was never allocated.
    #[error("wire {} is out of range: only {wire_count} wire(s) allocated", .wire.index())]
    UnallocatedWire {
        /// The offending wire.
        wire: WireId,
        /// Number of wires allocated when the reference was checked.
        wire_count: u32,
    },

    /// The witness has no value for a wire referenced by a constraint.
    #[error("witness is missing a value for wire {}", .wire.index())]
    MissingWitness {
        /// The unassigned wire.
        wire: WireId,
    },

    /// A coefficient or witness value fell outside `[0, modulus)`.
    #[error("value {value} is not a field element: modulus is {modulus}")]
    OutOfRange {
        /// The rejected value.
        value: BigUint,
        /// Modulus in effect.
        modulus: BigUint,
    },

    /// Wire 0 must always carry the value 1.
    #[error("the constant wire must carry the value 1, got {0}")]
    BadConstantValue(BigUint),

    /// `Visibility::Constant` is reserved for wire 0.
    #[error("the constant visibility class is reserved for wire 0")]
    ReservedVisibility,

    /// Linear-combination terms were not in strictly ascending wire order.
    #[error("linear combination terms are not in canonical ascending-wire order")]
    NonCanonicalTerms,

    /// The wire table is inconsistent (missing or misplaced constant wire).
    #[error("malformed wire table: {0}")]
    MalformedWireTable(&'static str),
}
