//! The immutable constraint-system snapshot.

use serde::{Deserialize, Serialize};

use crate::field::FieldParams;
use crate::lc::Constraint;
use crate::{Error, LabelId, Visibility};

/// Bookkeeping for a single wire: its label and visibility class.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    /// Label correlating this wire with an external name.
    pub label: LabelId,
    /// Visibility class of this wire.
    pub visibility: Visibility,
}

/// An immutable rank-1 constraint system.
///
/// Produced only by finalizing a builder or by decoding the binary
/// format; there is no mutating API. Once produced, a snapshot is safe
/// for unsynchronized concurrent reads: encoding and validation are pure
/// functions over it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct R1cs {
    field: FieldParams,
    wires: Vec<Wire>,
    constraints: Vec<Constraint>,
}

impl R1cs {
    /// Assemble a snapshot from its parts, checking every structural
    /// invariant.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedWireTable`] if the wire table is empty, if
    ///   wire 0 is not the constant wire, or if any other wire carries
    ///   the constant visibility.
    /// - [`Error::UnallocatedWire`] if a constraint references a wire
    ///   beyond the table.
    /// - [`Error::OutOfRange`] if any coefficient is not below the
    ///   modulus.
    pub fn from_parts(
        field: FieldParams,
        wires: Vec<Wire>,
        constraints: Vec<Constraint>,
    ) -> Result<Self, Error> {
        let Some(first) = wires.first() else {
            return Err(Error::MalformedWireTable("wire table is empty"));
        };
        if first.visibility != Visibility::Constant {
            return Err(Error::MalformedWireTable(
                "wire 0 must be the constant wire",
            ));
        }
        if wires[1..]
            .iter()
            .any(|wire| wire.visibility == Visibility::Constant)
        {
            return Err(Error::MalformedWireTable(
                "only wire 0 may be the constant wire",
            ));
        }

        let wire_count = wires.len() as u32;
        for constraint in &constraints {
            if let Some(max) = constraint.max_wire() {
                if max.index() >= wire_count {
                    return Err(Error::UnallocatedWire {
                        wire: max,
                        wire_count,
                    });
                }
            }
            for lc in [&constraint.a, &constraint.b, &constraint.c] {
                for term in lc.terms() {
                    if !field.contains(&term.coefficient) {
                        return Err(Error::OutOfRange {
                            value: term.coefficient.clone(),
                            modulus: field.modulus().clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            field,
            wires,
            constraints,
        })
    }

    /// Field parameters in effect.
    #[inline]
    pub fn field(&self) -> &FieldParams {
        &self.field
    }

    /// Wires in allocation order, the constant wire first.
    #[inline]
    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    /// Constraints in insertion order.
    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Total number of wires, the constant wire included.
    #[inline]
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of labels. Labels move in lockstep with wires, so this
    /// always equals [`R1cs::wire_count`].
    #[inline]
    pub fn label_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of constraints.
    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Number of wires in the given visibility class.
    pub fn visibility_count(&self, visibility: Visibility) -> usize {
        self.wires
            .iter()
            .filter(|wire| wire.visibility == visibility)
            .count()
    }

    /// Number of public-input wires.
    pub fn public_input_count(&self) -> usize {
        self.visibility_count(Visibility::PublicInput)
    }

    /// Number of public-output wires.
    pub fn public_output_count(&self) -> usize {
        self.visibility_count(Visibility::PublicOutput)
    }

    /// Number of private wires.
    pub fn private_count(&self) -> usize {
        self.visibility_count(Visibility::Private)
    }
}
