//! Field parameters: the working prime modulus and its derived byte width.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};

use crate::Error;

/// Decimal digits of the BN254 scalar-field modulus (254 bits).
const BN254_SCALAR_DECIMAL: &str =
    "21888242871839275222246405745257275088548364400416034343698204186575808495617";

/// Parameters of the prime field Z_p.
///
/// The byte width is computed once from the modulus and used uniformly for
/// every coefficient and witness value in the binary format. Primality of
/// the modulus is the caller's responsibility; arithmetic here only
/// requires a modulus of at least 2.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldParams {
    modulus: BigUint,
    element_width: usize,
}

/// Minimum number of bytes that losslessly encodes any value in
/// `[0, modulus)`: `ceil(bit_length(modulus) / 8)`.
pub fn element_width_for(modulus: &BigUint) -> usize {
    ((modulus.bits() as usize) + 7) / 8
}

impl FieldParams {
    /// Create field parameters for the given modulus.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidModulus`] if the modulus is below 2.
    /// - [`Error::ModulusTooWide`] if elements need more than 255 bytes,
    ///   the most the binary format's one-byte width field can declare.
    pub fn new(modulus: BigUint) -> Result<Self, Error> {
        if modulus < BigUint::from(2u32) {
            return Err(Error::InvalidModulus(modulus));
        }
        let element_width = element_width_for(&modulus);
        if element_width > u8::MAX as usize {
            return Err(Error::ModulusTooWide {
                width: element_width,
            });
        }
        Ok(Self {
            modulus,
            element_width,
        })
    }

    /// The BN254 scalar field, the default field for realistic circuits.
    pub fn bn254_scalar() -> Self {
        let modulus = BN254_SCALAR_DECIMAL
            .parse::<BigUint>()
            .expect("BN254 modulus literal is valid decimal");
        Self {
            element_width: element_width_for(&modulus),
            modulus,
        }
    }

    /// The field modulus p.
    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Fixed byte width of an encoded field element.
    #[inline]
    pub fn element_width(&self) -> usize {
        self.element_width
    }

    /// Whether `value` lies in `[0, p)`.
    #[inline]
    pub fn contains(&self, value: &BigUint) -> bool {
        *value < self.modulus
    }

    /// Reduce an arbitrary value into `[0, p)`.
    pub fn reduce(&self, value: BigUint) -> BigUint {
        if self.contains(&value) {
            value
        } else {
            value % &self.modulus
        }
    }

    /// `(a + b) mod p` for reduced operands.
    pub fn add_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let sum = a + b;
        if sum < self.modulus {
            sum
        } else {
            sum - &self.modulus
        }
    }

    /// `(a * b) mod p`.
    pub fn mul_mod(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    /// Encode a field element as a fixed-width big-endian byte string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `value >= p`.
    pub fn element_to_bytes(&self, value: &BigUint) -> Result<Vec<u8>, Error> {
        if !self.contains(value) {
            return Err(Error::OutOfRange {
                value: value.clone(),
                modulus: self.modulus.clone(),
            });
        }
        let digits = value.to_bytes_be();
        let mut bytes = vec![0u8; self.element_width - digits.len()];
        bytes.extend_from_slice(&digits);
        Ok(bytes)
    }

    /// Decode a fixed-width big-endian byte string into a field element.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if the decoded value is not below p.
    pub fn element_from_bytes(&self, bytes: &[u8]) -> Result<BigUint, Error> {
        let value = BigUint::from_bytes_be(bytes);
        if !self.contains(&value) {
            return Err(Error::OutOfRange {
                value,
                modulus: self.modulus.clone(),
            });
        }
        Ok(value)
    }

    /// The additive identity.
    #[inline]
    pub fn zero(&self) -> BigUint {
        BigUint::zero()
    }

    /// The multiplicative identity, the fixed value of the constant wire.
    #[inline]
    pub fn one(&self) -> BigUint {
        BigUint::one()
    }
}
