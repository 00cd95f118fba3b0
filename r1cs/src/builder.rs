//! Incremental construction of constraint systems.

use num_bigint::BigUint;
use tracing::debug;

use r1cs_core::{
    Constraint, Error, FieldParams, LabelId, LinearCombination, R1cs, Visibility, Wire, WireId,
};

/// Mutable, in-progress constraint system.
///
/// A builder starts with the constant wire 0 pre-registered (label 0)
/// and is mutated by repeated [`Builder::add_wire`] /
/// [`Builder::add_constraint`] calls. [`Builder::finalize`] consumes it
/// and yields the immutable [`R1cs`] snapshot; there is no way to mutate
/// a system after that point.
///
/// Wire and label ids are allocated atomically as a pair and always move
/// in lockstep. No satisfiability check happens at build time: an
/// unsatisfiable constraint is legal to build, and only the validator
/// judges satisfaction against a concrete witness.
#[derive(Debug)]
pub struct Builder {
    field: FieldParams,
    wires: Vec<Wire>,
    constraints: Vec<Constraint>,
    next_wire: u32,
    next_label: u32,
}

impl Builder {
    /// Create an empty builder over the given field, with the constant
    /// wire 0 pre-registered.
    pub fn new(field: FieldParams) -> Self {
        Self {
            field,
            wires: vec![Wire {
                label: LabelId(0),
                visibility: Visibility::Constant,
            }],
            constraints: Vec::new(),
            next_wire: 1,
            next_label: 1,
        }
    }

    /// Field parameters this builder works over.
    #[inline]
    pub fn field(&self) -> &FieldParams {
        &self.field
    }

    /// Allocate the next wire/label pair and record its visibility.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ReservedVisibility`] for
    /// [`Visibility::Constant`], which only wire 0 may carry.
    pub fn add_wire(&mut self, visibility: Visibility) -> Result<(WireId, LabelId), Error> {
        if visibility == Visibility::Constant {
            return Err(Error::ReservedVisibility);
        }
        let wire = WireId(self.next_wire);
        let label = LabelId(self.next_label);
        self.next_wire += 1;
        self.next_label += 1;
        self.wires.push(Wire { label, visibility });
        debug!(wire = wire.index(), label = label.value(), ?visibility, "allocated wire");
        Ok((wire, label))
    }

    /// Build a canonical linear combination over this builder's field.
    ///
    /// Purely a convenience around [`LinearCombination::from_pairs`];
    /// wires are not checked here but at [`Builder::add_constraint`].
    pub fn linear_combination<I>(&self, pairs: I) -> LinearCombination
    where
        I: IntoIterator<Item = (WireId, BigUint)>,
    {
        LinearCombination::from_pairs(pairs, &self.field)
    }

    /// Append the constraint `(a · w) * (b · w) = (c · w)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnallocatedWire`] if any side references a wire
    /// this builder never allocated.
    pub fn add_constraint(
        &mut self,
        a: LinearCombination,
        b: LinearCombination,
        c: LinearCombination,
    ) -> Result<(), Error> {
        let constraint = Constraint::new(a, b, c);
        if let Some(max) = constraint.max_wire() {
            if max.index() >= self.next_wire {
                return Err(Error::UnallocatedWire {
                    wire: max,
                    wire_count: self.next_wire,
                });
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }

    /// Number of wires allocated so far, the constant wire included.
    #[inline]
    pub fn wire_count(&self) -> usize {
        self.wires.len()
    }

    /// Number of constraints added so far.
    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Freeze this builder into an immutable [`R1cs`] snapshot.
    pub fn finalize(self) -> R1cs {
        debug!(
            wires = self.wires.len(),
            constraints = self.constraints.len(),
            "finalizing constraint system"
        );
        // The builder maintains every snapshot invariant incrementally,
        // so assembly cannot fail.
        match R1cs::from_parts(self.field, self.wires, self.constraints) {
            Ok(system) => system,
            Err(err) => unreachable!("builder invariant broken: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    fn field() -> FieldParams {
        FieldParams::new(BigUint::from(101u32)).unwrap()
    }

    fn one() -> BigUint {
        BigUint::from(1u32)
    }

    #[test]
    fn new_builder_holds_only_the_constant_wire() {
        let builder = Builder::new(field());
        assert_eq!(builder.wire_count(), 1);
        assert_eq!(builder.constraint_count(), 0);
    }

    #[test]
    fn wires_and_labels_move_in_lockstep() {
        let mut builder = Builder::new(field());
        let (w1, l1) = builder.add_wire(Visibility::PublicInput).unwrap();
        let (w2, l2) = builder.add_wire(Visibility::Private).unwrap();
        let (w3, l3) = builder.add_wire(Visibility::PublicOutput).unwrap();
        assert_eq!((w1, l1), (WireId(1), LabelId(1)));
        assert_eq!((w2, l2), (WireId(2), LabelId(2)));
        assert_eq!((w3, l3), (WireId(3), LabelId(3)));
        assert_eq!(builder.wire_count(), 4);
    }

    #[test]
    fn constant_visibility_cannot_be_requested() {
        let mut builder = Builder::new(field());
        assert_eq!(
            builder.add_wire(Visibility::Constant),
            Err(Error::ReservedVisibility)
        );
        // The failed call must not burn a wire or label.
        let (wire, label) = builder.add_wire(Visibility::Private).unwrap();
        assert_eq!((wire, label), (WireId(1), LabelId(1)));
    }

    #[test]
    fn constraints_may_reference_any_allocated_wire() {
        let mut builder = Builder::new(field());
        let (x, _) = builder.add_wire(Visibility::PublicInput).unwrap();
        let a = builder.linear_combination([(x, one())]);
        let b = builder.linear_combination([(WireId::CONSTANT, one())]);
        let c = builder.linear_combination([(x, one())]);
        assert!(builder.add_constraint(a, b, c).is_ok());
        assert_eq!(builder.constraint_count(), 1);
    }

    #[test]
    fn unallocated_wire_references_are_rejected() {
        let mut builder = Builder::new(field());
        let (x, _) = builder.add_wire(Visibility::Private).unwrap();
        let a = builder.linear_combination([(x, one())]);
        let b = builder.linear_combination([(WireId(9), one())]);
        let c = builder.linear_combination([(x, one())]);
        assert_eq!(
            builder.add_constraint(a, b, c),
            Err(Error::UnallocatedWire {
                wire: WireId(9),
                wire_count: 2,
            })
        );
        assert_eq!(builder.constraint_count(), 0);
    }

    #[test]
    fn empty_sides_are_legal() {
        let mut builder = Builder::new(field());
        let (x, _) = builder.add_wire(Visibility::Private).unwrap();
        let b = builder.linear_combination([(x, one())]);
        assert!(builder
            .add_constraint(LinearCombination::new(), b, LinearCombination::new())
            .is_ok());
    }

    #[test]
    fn finalize_snapshots_wires_and_constraints() {
        let mut builder = Builder::new(field());
        let (x, _) = builder.add_wire(Visibility::PublicInput).unwrap();
        let (y, _) = builder.add_wire(Visibility::Private).unwrap();
        let a = builder.linear_combination([(x, one())]);
        let b = builder.linear_combination([(x, one())]);
        let c = builder.linear_combination([(y, one())]);
        builder.add_constraint(a, b, c).unwrap();

        let system = builder.finalize();
        assert_eq!(system.wire_count(), 3);
        assert_eq!(system.label_count(), 3);
        assert_eq!(system.constraint_count(), 1);
        assert_eq!(system.public_input_count(), 1);
        assert_eq!(system.private_count(), 1);
        assert_eq!(system.wires()[0].visibility, Visibility::Constant);
    }

    #[test]
    fn finalize_of_an_empty_builder_yields_the_minimal_system() {
        let system = Builder::new(field()).finalize();
        assert_eq!(system.wire_count(), 1);
        assert_eq!(system.constraint_count(), 0);
    }

    #[test]
    fn builder_coefficients_are_reduced() {
        let mut builder = Builder::new(field());
        let (x, _) = builder.add_wire(Visibility::Private).unwrap();
        let lc = builder.linear_combination([(x, BigUint::from(205u32))]);
        assert_eq!(lc.terms()[0].coefficient, BigUint::from(3u32));
    }
}
