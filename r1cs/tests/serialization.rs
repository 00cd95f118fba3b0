//! Binary-format round-trip and determinism tests.

use num_bigint::BigUint;
use r1cs::{codec, decode, encode, Builder, FieldParams, LinearCombination, Visibility, WireId};

fn coeff(v: u64) -> BigUint {
    BigUint::from(v)
}

fn mixed_system(field: &FieldParams) -> r1cs::R1cs {
    let mut builder = Builder::new(field.clone());
    let (x, _) = builder.add_wire(Visibility::PublicInput).unwrap();
    let (y, _) = builder.add_wire(Visibility::Private).unwrap();
    let (z, _) = builder.add_wire(Visibility::PublicOutput).unwrap();

    // x * y = z
    let a = builder.linear_combination([(x, coeff(1))]);
    let b = builder.linear_combination([(y, coeff(1))]);
    let c = builder.linear_combination([(z, coeff(1))]);
    builder.add_constraint(a, b, c).unwrap();

    // (2x + 3y) * 1 = z, inserted out of order to exercise canonicalization
    let sum = builder.linear_combination([(y, coeff(3)), (x, coeff(2))]);
    let one = builder.linear_combination([(WireId::CONSTANT, coeff(1))]);
    let out = builder.linear_combination([(z, coeff(1))]);
    builder.add_constraint(sum, one, out).unwrap();

    // Empty sides are legal and must round-trip.
    builder
        .add_constraint(
            LinearCombination::new(),
            LinearCombination::new(),
            LinearCombination::new(),
        )
        .unwrap();

    builder.finalize()
}

#[test]
fn round_trip_over_a_small_field() {
    let field = FieldParams::new(coeff(65537)).unwrap();
    let system = mixed_system(&field);
    let decoded = decode(&encode(&system)).unwrap();
    assert_eq!(decoded, system);
    assert_eq!(decoded.field().element_width(), 3);
}

#[test]
fn round_trip_over_bn254() {
    let field = FieldParams::bn254_scalar();
    let system = mixed_system(&field);
    let bytes = encode(&system);
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, system);

    // Field width and modulus survive the trip.
    assert_eq!(decoded.field(), system.field());
    assert_eq!(decoded.field().element_width(), 32);
}

#[test]
fn visibility_counts_survive_the_round_trip() {
    let field = FieldParams::new(coeff(65537)).unwrap();
    let system = mixed_system(&field);
    let decoded = decode(&encode(&system)).unwrap();
    assert_eq!(decoded.wire_count(), system.wire_count());
    assert_eq!(decoded.label_count(), system.label_count());
    assert_eq!(decoded.public_input_count(), system.public_input_count());
    assert_eq!(decoded.public_output_count(), system.public_output_count());
    assert_eq!(decoded.private_count(), system.private_count());
    assert_eq!(decoded.constraint_count(), system.constraint_count());
}

#[test]
fn encoding_is_deterministic() {
    let field = FieldParams::bn254_scalar();
    let system = mixed_system(&field);
    assert_eq!(encode(&system), encode(&system));
}

#[test]
fn encoded_len_matches_actual_output() {
    for field in [
        FieldParams::new(coeff(251)).unwrap(),
        FieldParams::new(coeff(65537)).unwrap(),
        FieldParams::bn254_scalar(),
    ] {
        let system = mixed_system(&field);
        assert_eq!(encode(&system).len(), codec::encoded_len(&system));
    }
}

#[test]
fn terms_are_serialized_in_ascending_wire_order() {
    let field = FieldParams::new(coeff(251)).unwrap();
    let system = mixed_system(&field);
    let bytes = encode(&system);

    // Decode once and confirm the second constraint's A-side is sorted,
    // even though it was inserted y-before-x.
    let decoded = decode(&bytes).unwrap();
    let sum = &decoded.constraints()[1].a;
    let wires: Vec<u32> = sum.terms().iter().map(|t| t.wire.index()).collect();
    assert_eq!(wires, vec![1, 2]);
}

#[test]
fn maximum_coefficients_round_trip() {
    let field = FieldParams::bn254_scalar();
    let max = field.modulus() - coeff(1);
    let mut builder = Builder::new(field.clone());
    let (x, _) = builder.add_wire(Visibility::Private).unwrap();
    let a = builder.linear_combination([(x, max.clone())]);
    let b = builder.linear_combination([(WireId::CONSTANT, max.clone())]);
    let c = builder.linear_combination([(x, max)]);
    builder.add_constraint(a, b, c).unwrap();
    let system = builder.finalize();

    let decoded = decode(&encode(&system)).unwrap();
    assert_eq!(decoded, system);
}

#[test]
fn swapping_two_encoded_term_wires_breaks_canonical_order() {
    let field = FieldParams::new(coeff(251)).unwrap();
    let mut builder = Builder::new(field.clone());
    let (x, _) = builder.add_wire(Visibility::Private).unwrap();
    let (y, _) = builder.add_wire(Visibility::Private).unwrap();
    let a = builder.linear_combination([(x, coeff(2)), (y, coeff(3))]);
    let one = builder.linear_combination([(WireId::CONSTANT, coeff(1))]);
    builder.add_constraint(a, one.clone(), one).unwrap();
    let system = builder.finalize();

    let mut bytes = encode(&system);
    // The A-side holds terms (wire=1, coeff) then (wire=2, coeff); swap
    // the two wire ids in place. Each term is 4 + 1 bytes here.
    let terms_at = bytes.len() - (3 * 4 + 2 * 5 + 2 * 5);
    let first = terms_at + 4;
    let second = terms_at + 4 + 5;
    bytes.swap(first, second);
    assert_eq!(
        decode(&bytes),
        Err(r1cs::FormatError::NonCanonicalTerms)
    );
}
