//! Prime field `F_p` for a runtime-chosen prime `p`.
//!
//! Elements carry a shared handle to their field so that arithmetic never needs
//! the descriptor passed alongside. Values are kept fully reduced.

use core::fmt::{self, Display, Formatter};
use core::ops::{Add, Mul, Neg, Sub};
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{is_prime, modinv, reduce};
use crate::random::random_below;
use crate::{Field, FieldElement, FieldError, Irreducible};

/// The prime field of order `p`.
///
/// Serializes as the bare modulus; deserializing re-runs the primality check.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "BigUint", into = "BigUint")]
pub struct PrimeField {
    p: Arc<BigUint>,
}

impl PrimeField {
    /// Creates `F_p`, rejecting composite moduli.
    pub fn new(p: BigUint) -> Result<Self, FieldError> {
        if !is_prime(&p) {
            return Err(FieldError::NonPrimeModulus(p));
        }
        Ok(PrimeField { p: Arc::new(p) })
    }

    pub fn from_u64(p: u64) -> Result<Self, FieldError> {
        Self::new(BigUint::from(p))
    }

    #[inline]
    pub fn modulus(&self) -> &BigUint {
        &self.p
    }

    /// Element from an already reduced residue.
    #[inline]
    pub(crate) fn element_unchecked(&self, value: BigUint) -> Fp {
        debug_assert!(value < *self.p);
        Fp {
            value,
            field: self.clone(),
        }
    }

    /// Element from any unsigned integer.
    pub fn element(&self, value: BigUint) -> Fp {
        let value = value % &*self.p;
        self.element_unchecked(value)
    }
}

impl TryFrom<BigUint> for PrimeField {
    type Error = FieldError;

    fn try_from(p: BigUint) -> Result<Self, FieldError> {
        Self::new(p)
    }
}

impl From<PrimeField> for BigUint {
    fn from(field: PrimeField) -> BigUint {
        Arc::unwrap_or_clone(field.p)
    }
}

impl Display for PrimeField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "F_{}", self.p)
    }
}

impl Field for PrimeField {
    type Elem = Fp;

    #[inline]
    fn characteristic(&self) -> &BigUint {
        &self.p
    }

    #[inline]
    fn degree(&self) -> u32 {
        1
    }

    #[inline]
    fn extension(&self) -> Option<Irreducible> {
        None
    }

    fn zero(&self) -> Fp {
        self.element_unchecked(BigUint::zero())
    }

    fn one(&self) -> Fp {
        self.element(BigUint::one())
    }

    fn from_int(&self, n: &BigInt) -> Fp {
        self.element_unchecked(reduce(n, &self.p))
    }

    fn from_components(&self, components: &[BigInt]) -> Result<Fp, FieldError> {
        match components {
            [c0] => Ok(self.from_int(c0)),
            _ => Err(FieldError::ComponentCount {
                expected: 1,
                got: components.len(),
            }),
        }
    }

    fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp {
        self.element_unchecked(random_below(rng, &self.p))
    }
}

/// Element of a [`PrimeField`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "FpRepr", into = "FpRepr")]
pub struct Fp {
    value: BigUint,
    field: PrimeField,
}

/// Wire form of [`Fp`]; decoding reduces `value` modulo the field.
#[derive(Serialize, Deserialize)]
struct FpRepr {
    value: BigUint,
    field: PrimeField,
}

impl From<FpRepr> for Fp {
    fn from(repr: FpRepr) -> Fp {
        repr.field.element(repr.value)
    }
}

impl From<Fp> for FpRepr {
    fn from(x: Fp) -> FpRepr {
        FpRepr {
            value: x.value,
            field: x.field,
        }
    }
}

impl Fp {
    /// The canonical residue in `[0, p)`.
    #[inline]
    pub fn value(&self) -> &BigUint {
        &self.value
    }

    #[inline]
    pub fn field(&self) -> &PrimeField {
        &self.field
    }

    #[inline]
    fn with_value(&self, value: BigUint) -> Fp {
        self.field.element(value)
    }
}

impl Display for Fp {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FieldElement for Fp {
    #[inline]
    fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.value.is_one()
    }

    fn inverse(&self) -> Result<Fp, FieldError> {
        modinv(&self.value, self.field.modulus())
            .map(|inv| self.field.element_unchecked(inv))
            .ok_or(FieldError::DivisionByZero)
    }

    fn components(&self) -> Vec<BigUint> {
        vec![self.value.clone()]
    }

    fn pow(&self, exp: &BigUint) -> Fp {
        self.with_value(self.value.modpow(exp, self.field.modulus()))
    }

    fn one_like(&self) -> Fp {
        self.field.one()
    }
}

macro_rules! impl_binop {
    ($trait:ident, $method:ident, $body:expr) => {
        impl<'a> $trait<&'a Fp> for &'a Fp {
            type Output = Fp;

            #[inline]
            fn $method(self, rhs: &'a Fp) -> Fp {
                debug_assert_eq!(self.field, rhs.field);
                let value = ($body)(&self.value, &rhs.value, self.field.modulus());
                self.field.element_unchecked(value)
            }
        }

        impl<'a> $trait<&'a Fp> for Fp {
            type Output = Fp;

            #[inline]
            fn $method(self, rhs: &'a Fp) -> Fp {
                (&self).$method(rhs)
            }
        }

        impl $trait for Fp {
            type Output = Fp;

            #[inline]
            fn $method(self, rhs: Fp) -> Fp {
                (&self).$method(&rhs)
            }
        }
    };
}

impl_binop!(Add, add, |a: &BigUint, b: &BigUint, p: &BigUint| {
    let sum = a + b;
    if sum >= *p {
        sum - p
    } else {
        sum
    }
});

impl_binop!(Sub, sub, |a: &BigUint, b: &BigUint, p: &BigUint| {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
});

impl_binop!(Mul, mul, |a: &BigUint, b: &BigUint, p: &BigUint| (a * b) % p);

impl Neg for &Fp {
    type Output = Fp;

    #[inline]
    fn neg(self) -> Fp {
        if self.value.is_zero() {
            self.clone()
        } else {
            self.field
                .element_unchecked(self.field.modulus() - &self.value)
        }
    }
}

impl Neg for Fp {
    type Output = Fp;

    #[inline]
    fn neg(self) -> Fp {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn f101() -> PrimeField {
        PrimeField::from_u64(101).unwrap()
    }

    #[test]
    fn test_rejects_composite() {
        assert_eq!(
            PrimeField::from_u64(91),
            Err(FieldError::NonPrimeModulus(BigUint::from(91u32)))
        );
        assert!(PrimeField::from_u64(1).is_err());
    }

    #[test]
    fn test_add_sub() {
        let f = f101();
        let a = f.from_i64(50);
        let b = f.from_i64(60);
        assert_eq!((a.clone() + &b).value(), &BigUint::from(9u32));
        assert_eq!((a.clone() - &b).value(), &BigUint::from(91u32));
        assert_eq!(a.clone() - a, f.zero());
    }

    #[test]
    fn test_mul_and_neg() {
        let f = f101();
        let a = f.from_i64(10);
        let b = f.from_i64(11);
        assert_eq!((a * b).value(), &BigUint::from(9u32));
        assert_eq!(-f.from_i64(1), f.from_i64(100));
        assert_eq!(-f.zero(), f.zero());
        assert_eq!(f.from_i64(-16), f.from_i64(85));
    }

    #[test]
    fn test_inverse() {
        let f = f101();
        let a = f.from_i64(5);
        let a_inv = a.inverse().unwrap();
        assert!((a * a_inv).is_one());
        assert_eq!(f.zero().inverse(), Err(FieldError::DivisionByZero));
        assert_eq!(
            f.one().checked_div(&f.zero()),
            Err(FieldError::DivisionByZero)
        );
    }

    #[test]
    fn test_pow_matches_trait_default() {
        let f = f101();
        let a = f.from_i64(3);
        // Fermat: a^(p-1) = 1
        assert!(a.pow(&BigUint::from(100u32)).is_one());
        assert_eq!(a.pow(&BigUint::zero()), f.one());
        assert_eq!(a.pow(&BigUint::from(4u32)), f.from_i64(81));
        assert_eq!(
            a.pow_signed(&BigInt::from(-1)).unwrap(),
            a.inverse().unwrap()
        );
    }

    #[test]
    fn test_components_and_queries() {
        let f = f101();
        assert_eq!(f.characteristic(), &BigUint::from(101u32));
        assert_eq!(f.degree(), 1);
        assert_eq!(f.order(), BigUint::from(101u32));
        assert!(f.extension().is_none());
        let x = f.from_components(&[BigInt::from(205)]).unwrap();
        assert_eq!(x.components(), vec![BigUint::from(3u32)]);
        assert!(f.from_components(&[BigInt::from(1), BigInt::from(2)]).is_err());
        assert!(f.from_i64(-1).is_minus_one());
        assert_eq!(f.to_string(), "F_101");
    }

    #[test]
    fn test_serde_round_trip() {
        let f = f101();
        let x = f.from_i64(42);

        let decoded: Fp = bincode::deserialize(&bincode::serialize(&x).unwrap()).unwrap();
        assert_eq!(decoded, x);
        let field: PrimeField = bincode::deserialize(&bincode::serialize(&f).unwrap()).unwrap();
        assert_eq!(field, f);
    }

    #[test]
    fn test_deserialize_validates() {
        let composite = bincode::serialize(&BigUint::from(91u32)).unwrap();
        assert!(bincode::deserialize::<PrimeField>(&composite).is_err());

        // (value, modulus) with an unreduced value
        let raw = bincode::serialize(&(BigUint::from(205u32), BigUint::from(101u32))).unwrap();
        let x: Fp = bincode::deserialize(&raw).unwrap();
        assert_eq!(x.value(), &BigUint::from(3u32));

        let raw = bincode::serialize(&(BigUint::from(5u32), BigUint::from(100u32))).unwrap();
        assert!(bincode::deserialize::<Fp>(&raw).is_err());
    }
}
