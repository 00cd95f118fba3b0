//! Deterministic, versioned binary format for constraint systems.
//!
//! Layout (all counts little-endian `u32`, all field elements fixed-width
//! big-endian at the field's byte width):
//!
//! ```text
//! header:      magic "r1cs" | version u32 | field width u8
//!              | modulus (width bytes)
//!              | wire count | public-input count | public-output count
//!              | private count | constraint count | label count
//! wire table:  per wire, allocation order: visibility tag u8 | label u32
//! constraints: per constraint, three linear combinations, each:
//!              term count u32 | (wire u32 | coefficient width bytes)*
//!              terms in ascending-wire order
//! ```
//!
//! Decoding is all-or-nothing: any malformed input yields a
//! [`FormatError`] and no partial system. The round-trip law
//! `decode(encode(x)) == x` holds for every valid snapshot, explicit
//! zero-valued terms included.

use num_bigint::BigUint;
use thiserror::Error as ThisError;
use tracing::debug;

use r1cs_core::{
    Constraint, Error as CoreError, FieldParams, LabelId, LinearCombination, R1cs, Term,
    Visibility, Wire, WireId,
};

/// Magic bytes opening every encoded constraint system.
pub const MAGIC: [u8; 4] = *b"r1cs";

/// Current format version.
pub const VERSION: u32 = 1;

/// Errors produced when decoding a byte stream.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
#[non_exhaustive]
pub enum FormatError {
    /// The stream does not open with the `r1cs` magic bytes.
    #[error("bad magic bytes: not an r1cs stream")]
    BadMagic,

    /// The stream declares a format version this library cannot read.
    #[error("unsupported format version {0} (expected {VERSION})")]
    UnsupportedVersion(u32),

    /// The stream ended before the declared content.
    #[error("truncated stream: needed {needed} more byte(s) for {context}")]
    Truncated {
        /// What was being read when the stream ran out.
        context: &'static str,
        /// How many bytes were missing.
        needed: usize,
    },

    /// The declared field width disagrees with the declared modulus.
    #[error("field width {declared} does not match modulus width {expected}")]
    WidthMismatch {
        /// Width stored in the header.
        declared: usize,
        /// Width required by the stored modulus.
        expected: usize,
    },

    /// A decoded coefficient was not below the modulus.
    #[error("coefficient {value} is not below the modulus {modulus}")]
    CoefficientOutOfRange {
        /// The decoded value.
        value: BigUint,
        /// Modulus declared by the header.
        modulus: BigUint,
    },

    /// A declared count disagrees with the decoded content.
    #[error("count mismatch for {what}: header declares {declared}, stream holds {actual}")]
    CountMismatch {
        /// Which counter disagreed.
        what: &'static str,
        /// Value declared in the header.
        declared: u64,
        /// Value observed in the stream.
        actual: u64,
    },

    /// A wire carried an unknown visibility tag.
    #[error("unknown visibility tag {0:#04x}")]
    UnknownVisibilityTag(u8),

    /// Linear-combination terms were not in ascending wire order.
    #[error("linear combination terms are not in canonical ascending-wire order")]
    NonCanonicalTerms,

    /// Well-formed sections followed by leftover bytes.
    #[error("{0} trailing byte(s) after the constraint section")]
    TrailingBytes(usize),

    /// The decoded parts violate a core data-model invariant.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Exact size in bytes of the encoding of `system`.
pub fn encoded_len(system: &R1cs) -> usize {
    let width = system.field().element_width();
    let header = MAGIC.len() + 4 + 1 + width + 6 * 4;
    let wires = system.wire_count() * (1 + 4);
    let constraints: usize = system
        .constraints()
        .iter()
        .map(|constraint| {
            [&constraint.a, &constraint.b, &constraint.c]
                .into_iter()
                .map(|lc| 4 + lc.len() * (4 + width))
                .sum::<usize>()
        })
        .sum();
    header + wires + constraints
}

/// Encode a constraint system into its canonical byte representation.
///
/// Wires, labels, and constraints are emitted in stored (allocation)
/// order; linear-combination terms are already canonical. Encoding the
/// same snapshot twice yields identical bytes.
pub fn encode(system: &R1cs) -> Vec<u8> {
    let field = system.field();
    let width = field.element_width();
    let mut out = Vec::with_capacity(encoded_len(system));

    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&VERSION.to_le_bytes());
    // FieldParams rejects moduli wider than 255 bytes, so the width
    // always fits its single header byte.
    out.push(width as u8);
    push_element(&mut out, field.modulus(), width);

    out.extend_from_slice(&(system.wire_count() as u32).to_le_bytes());
    out.extend_from_slice(&(system.public_input_count() as u32).to_le_bytes());
    out.extend_from_slice(&(system.public_output_count() as u32).to_le_bytes());
    out.extend_from_slice(&(system.private_count() as u32).to_le_bytes());
    out.extend_from_slice(&(system.constraint_count() as u32).to_le_bytes());
    out.extend_from_slice(&(system.label_count() as u32).to_le_bytes());

    for wire in system.wires() {
        out.push(wire.visibility.tag());
        out.extend_from_slice(&wire.label.value().to_le_bytes());
    }

    for constraint in system.constraints() {
        for lc in [&constraint.a, &constraint.b, &constraint.c] {
            out.extend_from_slice(&(lc.len() as u32).to_le_bytes());
            for term in lc.terms() {
                out.extend_from_slice(&term.wire.index().to_le_bytes());
                push_element(&mut out, &term.coefficient, width);
            }
        }
    }

    debug!(bytes = out.len(), "encoded constraint system");
    out
}

/// Decode a byte stream produced by [`encode`].
///
/// # Errors
///
/// Returns a [`FormatError`] and no partial system for any malformed
/// input; see the variant list for the failure modes.
pub fn decode(bytes: &[u8]) -> Result<R1cs, FormatError> {
    let mut reader = Reader { bytes, at: 0 };

    let magic = reader.take(MAGIC.len(), "magic bytes")?;
    if magic != MAGIC {
        return Err(FormatError::BadMagic);
    }
    let version = reader.u32("format version")?;
    if version != VERSION {
        return Err(FormatError::UnsupportedVersion(version));
    }

    let declared_width = reader.u8("field width")? as usize;
    let modulus = BigUint::from_bytes_be(reader.take(declared_width, "field modulus")?);
    let field = FieldParams::new(modulus).map_err(FormatError::Core)?;
    if field.element_width() != declared_width {
        return Err(FormatError::WidthMismatch {
            declared: declared_width,
            expected: field.element_width(),
        });
    }

    let wire_count = reader.u32("wire count")? as usize;
    let public_inputs = reader.u32("public-input count")? as u64;
    let public_outputs = reader.u32("public-output count")? as u64;
    let private = reader.u32("private count")? as u64;
    let constraint_count = reader.u32("constraint count")? as usize;
    let label_count = reader.u32("label count")? as u64;

    if label_count != wire_count as u64 {
        return Err(FormatError::CountMismatch {
            what: "labels",
            declared: label_count,
            actual: wire_count as u64,
        });
    }

    let mut wires = Vec::with_capacity(wire_count.min(reader.remaining()));
    let mut tallies = [0u64; 3];
    for _ in 0..wire_count {
        let tag = reader.u8("wire visibility tag")?;
        let visibility =
            Visibility::from_tag(tag).ok_or(FormatError::UnknownVisibilityTag(tag))?;
        let label = LabelId(reader.u32("wire label")?);
        match visibility {
            Visibility::Constant => {}
            Visibility::PublicInput => tallies[0] += 1,
            Visibility::PublicOutput => tallies[1] += 1,
            Visibility::Private => tallies[2] += 1,
        }
        wires.push(Wire { label, visibility });
    }
    for (what, declared, actual) in [
        ("public-input wires", public_inputs, tallies[0]),
        ("public-output wires", public_outputs, tallies[1]),
        ("private wires", private, tallies[2]),
    ] {
        if declared != actual {
            return Err(FormatError::CountMismatch {
                what,
                declared,
                actual,
            });
        }
    }

    let mut constraints = Vec::with_capacity(constraint_count.min(reader.remaining()));
    for _ in 0..constraint_count {
        let a = decode_linear_combination(&mut reader, &field)?;
        let b = decode_linear_combination(&mut reader, &field)?;
        let c = decode_linear_combination(&mut reader, &field)?;
        constraints.push(Constraint::new(a, b, c));
    }

    if reader.remaining() > 0 {
        return Err(FormatError::TrailingBytes(reader.remaining()));
    }

    let system = R1cs::from_parts(field, wires, constraints)?;
    debug!(
        wires = system.wire_count(),
        constraints = system.constraint_count(),
        "decoded constraint system"
    );
    Ok(system)
}

fn decode_linear_combination(
    reader: &mut Reader<'_>,
    field: &FieldParams,
) -> Result<LinearCombination, FormatError> {
    let width = field.element_width();
    let term_count = reader.u32("term count")? as usize;
    let mut terms = Vec::with_capacity(term_count.min(reader.remaining()));
    for _ in 0..term_count {
        let wire = WireId(reader.u32("term wire")?);
        let coefficient = field
            .element_from_bytes(reader.take(width, "term coefficient")?)
            .map_err(|err| match err {
                CoreError::OutOfRange { value, modulus } => {
                    FormatError::CoefficientOutOfRange { value, modulus }
                }
                other => FormatError::Core(other),
            })?;
        terms.push(Term { wire, coefficient });
    }
    LinearCombination::from_canonical(terms).map_err(|_| FormatError::NonCanonicalTerms)
}

fn push_element(out: &mut Vec<u8>, value: &BigUint, width: usize) {
    // Snapshot invariants keep every element below the modulus, so the
    // big-endian digits always fit the field width.
    let digits = value.to_bytes_be();
    out.resize(out.len() + (width - digits.len()), 0);
    out.extend_from_slice(&digits);
}

struct Reader<'a> {
    bytes: &'a [u8],
    at: usize,
}

impl<'a> Reader<'a> {
    fn take(&mut self, n: usize, context: &'static str) -> Result<&'a [u8], FormatError> {
        let end = self.at.saturating_add(n);
        if end > self.bytes.len() {
            return Err(FormatError::Truncated {
                context,
                needed: end - self.bytes.len(),
            });
        }
        let slice = &self.bytes[self.at..end];
        self.at = end;
        Ok(slice)
    }

    fn u8(&mut self, context: &'static str) -> Result<u8, FormatError> {
        Ok(self.take(1, context)?[0])
    }

    fn u32(&mut self, context: &'static str) -> Result<u32, FormatError> {
        let bytes = self.take(4, context)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.at
    }
}
