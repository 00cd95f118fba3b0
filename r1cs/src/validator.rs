//! Exhaustive witness validation.
//!
//! Validation is a full scan: every constraint is evaluated and every
//! violation is collected into the report, so one pass gives the caller
//! complete diagnostic information. Only a structurally malformed
//! witness (a referenced wire with no value) short-circuits, since that
//! indicates a broken input rather than an unsatisfied circuit.

use num_bigint::BigUint;
use tracing::debug;

use r1cs_core::{Error, R1cs, Witness};

/// One unsatisfied constraint, with the three evaluated sides for
/// diagnosis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    /// Index of the constraint in the system.
    pub constraint: usize,
    /// `A · w mod p`.
    pub a: BigUint,
    /// `B · w mod p`.
    pub b: BigUint,
    /// `C · w mod p`.
    pub c: BigUint,
}

/// Outcome of validating a witness against a constraint system.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationReport {
    checked: usize,
    violations: Vec<Violation>,
}

impl ValidationReport {
    /// Whether every constraint held.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.violations.is_empty()
    }

    /// Number of constraints evaluated (always the full system).
    #[inline]
    pub fn checked(&self) -> usize {
        self.checked
    }

    /// Every violated constraint, in constraint order.
    #[inline]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

/// Evaluate every constraint of `system` against `witness` modulo the
/// system's field prime.
///
/// # Errors
///
/// Returns [`Error::MissingWitness`] if any wire referenced by any
/// constraint has no value in the witness. Constraint violations are
/// not errors: they are data in the returned report.
pub fn validate(system: &R1cs, witness: &Witness) -> Result<ValidationReport, Error> {
    let field = system.field();
    let mut violations = Vec::new();

    for (index, constraint) in system.constraints().iter().enumerate() {
        let a = constraint.a.evaluate(field, witness)?;
        let b = constraint.b.evaluate(field, witness)?;
        let c = constraint.c.evaluate(field, witness)?;
        if field.mul_mod(&a, &b) != c {
            violations.push(Violation {
                constraint: index,
                a,
                b,
                c,
            });
        }
    }

    debug!(
        checked = system.constraint_count(),
        violations = violations.len(),
        "validated witness"
    );
    Ok(ValidationReport {
        checked: system.constraint_count(),
        violations,
    })
}
