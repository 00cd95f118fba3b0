//! Linear combinations and constraints.
//!
//! A [`LinearCombination`] is a sparse weighted sum of wires held in
//! canonical form: terms sorted by strictly ascending wire id, one term
//! per wire. The canonical form is what equality comparison and the
//! binary codec operate on.
//!
//! Inserting a second coefficient for an existing wire merges by summing
//! modulo p. A coefficient that merges to zero stays as an explicit
//! zero-valued term: it contributes nothing to evaluation but preserves
//! the builder's intent across serialization round-trips.

use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::field::FieldParams;
use crate::witness::Witness;
use crate::{Error, WireId};

/// A single `(wire, coefficient)` term of a linear combination.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// Referenced wire.
    pub wire: WireId,
    /// Field coefficient, always reduced below the modulus.
    pub coefficient: BigUint,
}

/// Sparse weighted sum of wires in canonical ascending-wire order.
///
/// The empty combination is valid and evaluates to 0.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinearCombination {
    terms: Vec<Term>,
}

impl LinearCombination {
    /// The empty combination.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a combination by inserting every `(wire, coefficient)` pair.
    ///
    /// Insertion order is irrelevant: the result is canonical regardless.
    pub fn from_pairs<I>(pairs: I, field: &FieldParams) -> Self
    where
        I: IntoIterator<Item = (WireId, BigUint)>,
    {
        let mut lc = Self::new();
        for (wire, coefficient) in pairs {
            lc.insert(wire, coefficient, field);
        }
        lc
    }

    /// Assemble a combination from terms already in canonical order.
    ///
    /// Coefficients are taken as-is; callers are expected to have
    /// range-checked them against the field.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NonCanonicalTerms`] if the terms are not in
    /// strictly ascending wire order.
    pub fn from_canonical(terms: Vec<Term>) -> Result<Self, Error> {
        for pair in terms.windows(2) {
            if pair[0].wire >= pair[1].wire {
                return Err(Error::NonCanonicalTerms);
            }
        }
        Ok(Self { terms })
    }

    /// Merge `coefficient` into the term for `wire`, reducing modulo p.
    ///
    /// Creates the term if the wire is not yet present; otherwise the
    /// coefficients are summed mod p. A sum of zero is kept as an
    /// explicit zero term, never silently dropped.
    pub fn insert(&mut self, wire: WireId, coefficient: BigUint, field: &FieldParams) {
        let coefficient = field.reduce(coefficient);
        match self.terms.binary_search_by_key(&wire, |term| term.wire) {
            Ok(at) => {
                let merged = field.add_mod(&self.terms[at].coefficient, &coefficient);
                self.terms[at].coefficient = merged;
            }
            Err(at) => self.terms.insert(at, Term { wire, coefficient }),
        }
    }

    /// Terms in canonical ascending-wire order.
    #[inline]
    pub fn terms(&self) -> &[Term] {
        &self.terms
    }

    /// Number of terms, explicit zeros included.
    #[inline]
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the combination has no terms at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Highest wire referenced, if any. Terms are sorted, so this is the
    /// last one.
    pub fn max_wire(&self) -> Option<WireId> {
        self.terms.last().map(|term| term.wire)
    }

    /// Evaluate `Σ coefficient_i * witness[wire_i] mod p`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingWitness`] if any referenced wire has no
    /// value in the witness.
    pub fn evaluate(&self, field: &FieldParams, witness: &Witness) -> Result<BigUint, Error> {
        let mut acc = BigUint::zero();
        for term in &self.terms {
            if term.coefficient.is_zero() {
                // Explicit zero terms still require the wire to exist in
                // the witness map, matching the structural check.
                if witness.get(term.wire).is_none() {
                    return Err(Error::MissingWitness { wire: term.wire });
                }
                continue;
            }
            let value = witness
                .get(term.wire)
                .ok_or(Error::MissingWitness { wire: term.wire })?;
            let product = field.mul_mod(&term.coefficient, value);
            acc = field.add_mod(&acc, &product);
        }
        Ok(acc)
    }
}

/// One rank-1 constraint: `(A · w) * (B · w) = (C · w) mod p`.
///
/// Any of the three combinations may be empty. Satisfiability is never
/// judged at construction time; that is the validator's job.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Constraint {
    /// Left multiplicand.
    pub a: LinearCombination,
    /// Right multiplicand.
    pub b: LinearCombination,
    /// Product side.
    pub c: LinearCombination,
}

impl Constraint {
    /// Create a constraint from its three linear combinations.
    pub fn new(a: LinearCombination, b: LinearCombination, c: LinearCombination) -> Self {
        Self { a, b, c }
    }

    /// Highest wire referenced by any side, if any side is non-empty.
    pub fn max_wire(&self) -> Option<WireId> {
        [&self.a, &self.b, &self.c]
            .into_iter()
            .filter_map(LinearCombination::max_wire)
            .max()
    }
}
