use core::fmt::{Debug, Display};
use core::ops::{Add, Mul, Neg, Sub};
use num_bigint::{BigInt, BigUint};
use num_traits::Zero;
use rand::Rng;

use crate::{FieldError, Irreducible};

/// A finite field as seen by curve code: a descriptor that mints elements.
pub trait Field: Clone + Debug + Display + PartialEq + Eq + Send + Sync + 'static {
    type Elem: FieldElement;

    /// The characteristic `p`.
    fn characteristic(&self) -> &BigUint;

    /// Degree of the field over its prime subfield.
    fn degree(&self) -> u32;

    /// Number of elements, `p^degree`.
    fn order(&self) -> BigUint {
        self.characteristic().pow(self.degree())
    }

    /// The defining polynomial when this is the quadratic extension.
    fn extension(&self) -> Option<Irreducible>;

    fn zero(&self) -> Self::Elem;

    fn one(&self) -> Self::Elem;

    /// Embeds an integer through the prime subfield.
    fn from_int(&self, n: &BigInt) -> Self::Elem;

    #[inline]
    fn from_i64(&self, n: i64) -> Self::Elem {
        self.from_int(&BigInt::from(n))
    }

    /// Builds an element from its coordinates over the prime subfield.
    fn from_components(&self, components: &[BigInt]) -> Result<Self::Elem, FieldError>;

    /// Uniform element, each coordinate drawn independently.
    fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Elem;
}

/// Arithmetic every field element supports.
///
/// Binary operators are available both by value and with a borrowed right-hand
/// side, so formulas can be written as `x.clone() * &y` without extra clones.
pub trait FieldElement:
    Sized
    + Clone
    + Debug
    + Display
    + PartialEq
    + Eq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + for<'a> Add<&'a Self, Output = Self>
    + for<'a> Sub<&'a Self, Output = Self>
    + for<'a> Mul<&'a Self, Output = Self>
{
    fn is_zero(&self) -> bool;

    fn is_one(&self) -> bool;

    fn inverse(&self) -> Result<Self, FieldError>;

    /// Coordinates over the prime subfield, lowest degree first.
    fn components(&self) -> Vec<BigUint>;

    /// `self / rhs`, failing when `rhs` is zero.
    #[inline]
    fn checked_div(&self, rhs: &Self) -> Result<Self, FieldError> {
        Ok(self.clone() * &rhs.inverse()?)
    }

    #[inline]
    fn square(&self) -> Self {
        self.clone() * self
    }

    /// Square-and-multiply exponentiation, least significant bit first.
    fn pow(&self, exp: &BigUint) -> Self {
        let mut result = self.one_like();
        let mut base = self.clone();
        let bits = exp.bits();

        for i in 0..bits {
            if exp.bit(i) {
                result = result * &base;
            }
            if i + 1 < bits {
                base = base.square();
            }
        }

        result
    }

    /// The multiplicative identity of the field `self` lives in.
    fn one_like(&self) -> Self;

    /// `self^exp` for a signed exponent.
    fn pow_signed(&self, exp: &BigInt) -> Result<Self, FieldError> {
        let power = self.pow(exp.magnitude());
        if exp.sign() == num_bigint::Sign::Minus {
            power.inverse()
        } else {
            Ok(power)
        }
    }

    /// True when every coordinate above the constant term vanishes.
    fn is_in_prime_subfield(&self) -> bool {
        self.components().iter().skip(1).all(Zero::is_zero)
    }

    /// `self == -1`.
    fn is_minus_one(&self) -> bool {
        (self.clone() + &self.one_like()).is_zero()
    }
}
