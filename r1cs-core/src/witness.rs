//! Witness assignments: concrete field values for circuit wires.

use std::collections::BTreeMap;

use num_bigint::BigUint;
use num_traits::One;

use crate::field::FieldParams;
use crate::{Error, WireId};

/// A mapping from wire id to field element.
///
/// Wire 0 (the constant wire) is pre-assigned the value 1 on creation
/// and may never be assigned anything else. All other values are
/// range-checked against the field on assignment, so a `Witness` always
/// holds reduced field elements.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Witness {
    values: BTreeMap<WireId, BigUint>,
}

impl Witness {
    /// Create a witness holding only the implicit constant-wire value 1.
    pub fn new() -> Self {
        let mut values = BTreeMap::new();
        values.insert(WireId::CONSTANT, BigUint::one());
        Self { values }
    }

    /// Assign a value to a wire.
    ///
    /// Re-assigning a wire overwrites its previous value.
    ///
    /// # Errors
    ///
    /// - [`Error::OutOfRange`] if `value >= p`.
    /// - [`Error::BadConstantValue`] if wire 0 is assigned anything
    ///   other than 1.
    pub fn assign(&mut self, wire: WireId, value: BigUint, field: &FieldParams) -> Result<(), Error> {
        if !field.contains(&value) {
            return Err(Error::OutOfRange {
                value,
                modulus: field.modulus().clone(),
            });
        }
        if wire.is_constant() && !value.is_one() {
            return Err(Error::BadConstantValue(value));
        }
        self.values.insert(wire, value);
        Ok(())
    }

    /// Value assigned to `wire`, if any.
    #[inline]
    pub fn get(&self, wire: WireId) -> Option<&BigUint> {
        self.values.get(&wire)
    }

    /// Number of assigned wires, the constant wire included.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// A witness is never empty: wire 0 is always present.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate assignments in ascending wire order.
    pub fn iter(&self) -> impl Iterator<Item = (WireId, &BigUint)> {
        self.values.iter().map(|(wire, value)| (*wire, value))
    }
}

impl Default for Witness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    fn field() -> FieldParams {
        FieldParams::new(BigUint::from(101u32)).unwrap()
    }

    #[test]
    fn constant_wire_is_preassigned_one() {
        let witness = Witness::new();
        assert_eq!(witness.get(WireId::CONSTANT), Some(&BigUint::one()));
        assert_eq!(witness.len(), 1);
    }

    #[test]
    fn assigning_one_to_the_constant_wire_is_allowed() {
        let f = field();
        let mut witness = Witness::new();
        assert!(witness.assign(WireId::CONSTANT, BigUint::one(), &f).is_ok());
    }

    #[test]
    fn constant_wire_rejects_other_values() {
        let f = field();
        let mut witness = Witness::new();
        assert_eq!(
            witness.assign(WireId::CONSTANT, BigUint::from(2u32), &f),
            Err(Error::BadConstantValue(BigUint::from(2u32)))
        );
        assert_eq!(
            witness.assign(WireId::CONSTANT, BigUint::zero(), &f),
            Err(Error::BadConstantValue(BigUint::zero()))
        );
    }

    #[test]
    fn values_are_range_checked() {
        let f = field();
        let mut witness = Witness::new();
        assert!(matches!(
            witness.assign(WireId(1), BigUint::from(101u32), &f),
            Err(Error::OutOfRange { .. })
        ));
        assert!(witness.assign(WireId(1), BigUint::from(100u32), &f).is_ok());
    }

    #[test]
    fn reassignment_overwrites() {
        let f = field();
        let mut witness = Witness::new();
        witness.assign(WireId(1), BigUint::from(5u32), &f).unwrap();
        witness.assign(WireId(1), BigUint::from(7u32), &f).unwrap();
        assert_eq!(witness.get(WireId(1)), Some(&BigUint::from(7u32)));
        assert_eq!(witness.len(), 2);
    }

    #[test]
    fn iteration_is_in_wire_order() {
        let f = field();
        let mut witness = Witness::new();
        witness.assign(WireId(9), BigUint::from(1u32), &f).unwrap();
        witness.assign(WireId(2), BigUint::from(1u32), &f).unwrap();
        let wires: Vec<WireId> = witness.iter().map(|(wire, _)| wire).collect();
        assert_eq!(wires, vec![WireId(0), WireId(2), WireId(9)]);
    }
}
