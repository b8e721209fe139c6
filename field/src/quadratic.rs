//! Quadratic extension `F_{p^2} = F_p[w] / (f(w))` for the two defining
//! polynomials used by pairing-friendly constructions.

use core::fmt::{self, Display, Formatter};
use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::arith::{modinv, reduce};
use crate::random::random_below;
use crate::{Field, FieldElement, FieldError, PrimeField};

/// Defining polynomial of the extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Irreducible {
    /// `x^2 + 1`, so `w^2 = -1`. Irreducible iff `p ≡ 3 (mod 4)`.
    XSquarePlusOne,
    /// `x^2 + x + 1`, so `w` is a primitive cube root of unity. Irreducible iff `p ≡ 2 (mod 3)`.
    XSquarePlusXPlusOne,
}

impl Irreducible {
    /// Numeric selector: 1 for `x^2+1`, 2 for `x^2+x+1`.
    pub fn tag(&self) -> u8 {
        match self {
            Irreducible::XSquarePlusOne => 1,
            Irreducible::XSquarePlusXPlusOne => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            1 => Some(Irreducible::XSquarePlusOne),
            2 => Some(Irreducible::XSquarePlusXPlusOne),
            _ => None,
        }
    }

    pub fn polynomial(&self) -> &'static str {
        match self {
            Irreducible::XSquarePlusOne => "x^2+1",
            Irreducible::XSquarePlusXPlusOne => "x^2+x+1",
        }
    }

    fn is_irreducible_mod(&self, p: &BigUint) -> bool {
        match self {
            Irreducible::XSquarePlusOne => p % 4u32 == BigUint::from(3u32),
            Irreducible::XSquarePlusXPlusOne => p % 3u32 == BigUint::from(2u32),
        }
    }
}

/// The degree-2 extension of a prime field.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "QuadraticFieldRepr", into = "QuadraticFieldRepr")]
pub struct QuadraticField {
    base: PrimeField,
    poly: Irreducible,
}

#[derive(Serialize, Deserialize)]
struct QuadraticFieldRepr {
    p: BigUint,
    poly: Irreducible,
}

impl TryFrom<QuadraticFieldRepr> for QuadraticField {
    type Error = FieldError;

    fn try_from(repr: QuadraticFieldRepr) -> Result<Self, FieldError> {
        QuadraticField::new(repr.p, repr.poly)
    }
}

impl From<QuadraticField> for QuadraticFieldRepr {
    fn from(field: QuadraticField) -> Self {
        QuadraticFieldRepr {
            p: field.base.into(),
            poly: field.poly,
        }
    }
}

impl QuadraticField {
    pub fn new(p: BigUint, poly: Irreducible) -> Result<Self, FieldError> {
        let base = PrimeField::new(p)?;
        if !poly.is_irreducible_mod(base.modulus()) {
            return Err(FieldError::ReducibleModulus {
                p: base.modulus().clone(),
                poly: poly.polynomial(),
            });
        }
        Ok(QuadraticField { base, poly })
    }

    pub fn from_u64(p: u64, poly: Irreducible) -> Result<Self, FieldError> {
        Self::new(BigUint::from(p), poly)
    }

    #[inline]
    pub fn base(&self) -> &PrimeField {
        &self.base
    }

    #[inline]
    pub fn polynomial(&self) -> Irreducible {
        self.poly
    }

    #[inline]
    fn p(&self) -> &BigUint {
        self.base.modulus()
    }

    /// Element `c0 + c1*w` from reduced coordinates.
    #[inline]
    fn element_unchecked(&self, c0: BigUint, c1: BigUint) -> Fp2 {
        debug_assert!(c0 < *self.p() && c1 < *self.p());
        Fp2 {
            c0,
            c1,
            field: self.clone(),
        }
    }

    /// Element `c0 + c1*w` from arbitrary unsigned coordinates.
    pub fn element(&self, c0: BigUint, c1: BigUint) -> Fp2 {
        let p = self.p();
        self.element_unchecked(c0 % p, c1 % p)
    }
}

impl Display for QuadraticField {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "F_{}^2 mod {}", self.p(), self.poly.polynomial())
    }
}

impl Field for QuadraticField {
    type Elem = Fp2;

    #[inline]
    fn characteristic(&self) -> &BigUint {
        self.p()
    }

    #[inline]
    fn degree(&self) -> u32 {
        2
    }

    #[inline]
    fn extension(&self) -> Option<Irreducible> {
        Some(self.poly)
    }

    fn zero(&self) -> Fp2 {
        self.element_unchecked(BigUint::zero(), BigUint::zero())
    }

    fn one(&self) -> Fp2 {
        self.element(BigUint::one(), BigUint::zero())
    }

    fn from_int(&self, n: &BigInt) -> Fp2 {
        self.element_unchecked(reduce(n, self.p()), BigUint::zero())
    }

    fn from_components(&self, components: &[BigInt]) -> Result<Fp2, FieldError> {
        let p = self.p();
        match components {
            [c0] => Ok(self.from_int(c0)),
            [c0, c1] => Ok(self.element_unchecked(reduce(c0, p), reduce(c1, p))),
            _ => Err(FieldError::ComponentCount {
                expected: 2,
                got: components.len(),
            }),
        }
    }

    fn random_element<R: Rng + ?Sized>(&self, rng: &mut R) -> Fp2 {
        let c0 = random_below(rng, self.p());
        let c1 = random_below(rng, self.p());
        self.element_unchecked(c0, c1)
    }
}

/// Element `c0 + c1*w` of a [`QuadraticField`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Fp2Repr", into = "Fp2Repr")]
pub struct Fp2 {
    c0: BigUint,
    c1: BigUint,
    field: QuadraticField,
}

#[derive(Serialize, Deserialize)]
struct Fp2Repr {
    c0: BigUint,
    c1: BigUint,
    field: QuadraticField,
}

impl From<Fp2Repr> for Fp2 {
    fn from(repr: Fp2Repr) -> Fp2 {
        repr.field.element(repr.c0, repr.c1)
    }
}

impl From<Fp2> for Fp2Repr {
    fn from(x: Fp2) -> Fp2Repr {
        Fp2Repr {
            c0: x.c0,
            c1: x.c1,
            field: x.field,
        }
    }
}

#[inline]
fn sub_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    if a >= b {
        a - b
    } else {
        p - (b - a)
    }
}

#[inline]
fn add_mod(a: &BigUint, b: &BigUint, p: &BigUint) -> BigUint {
    let sum = a + b;
    if sum >= *p {
        sum - p
    } else {
        sum
    }
}

impl Fp2 {
    #[inline]
    pub fn c0(&self) -> &BigUint {
        &self.c0
    }

    #[inline]
    pub fn c1(&self) -> &BigUint {
        &self.c1
    }

    #[inline]
    pub fn field(&self) -> &QuadraticField {
        &self.field
    }

    /// The Frobenius image `self^p`.
    ///
    /// For both polynomials `w^p` is the other root of `f`, so this is the
    /// conjugate `c0 + c1*w'`.
    pub fn conjugate(&self) -> Fp2 {
        let p = self.field.p();
        let neg_c1 = sub_mod(&BigUint::zero(), &self.c1, p);
        match self.field.poly {
            Irreducible::XSquarePlusOne => self.field.element_unchecked(self.c0.clone(), neg_c1),
            // w' = w^2 = -1 - w
            Irreducible::XSquarePlusXPlusOne => self
                .field
                .element_unchecked(sub_mod(&self.c0, &self.c1, p), neg_c1),
        }
    }

    /// `self * conjugate(self)`, an element of the base field.
    pub fn norm(&self) -> BigUint {
        let p = self.field.p();
        let a2 = &self.c0 * &self.c0;
        let b2 = &self.c1 * &self.c1;
        match self.field.poly {
            Irreducible::XSquarePlusOne => (a2 + b2) % p,
            Irreducible::XSquarePlusXPlusOne => {
                let ab = (&self.c0 * &self.c1) % p;
                sub_mod(&((a2 + b2) % p), &ab, p)
            }
        }
    }
}

impl Display for Fp2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.c1.is_zero() {
            write!(f, "{}", self.c0)
        } else {
            write!(f, "{} + {}*w", self.c0, self.c1)
        }
    }
}

impl FieldElement for Fp2 {
    #[inline]
    fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.c0.is_one() && self.c1.is_zero()
    }

    fn inverse(&self) -> Result<Fp2, FieldError> {
        let p = self.field.p();
        let norm_inv = modinv(&self.norm(), p).ok_or(FieldError::DivisionByZero)?;
        let conj = self.conjugate();
        Ok(self
            .field
            .element_unchecked((&conj.c0 * &norm_inv) % p, (&conj.c1 * &norm_inv) % p))
    }

    fn components(&self) -> Vec<BigUint> {
        vec![self.c0.clone(), self.c1.clone()]
    }

    fn one_like(&self) -> Fp2 {
        self.field.one()
    }
}

impl<'a> Add<&'a Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn add(self, rhs: &'a Fp2) -> Fp2 {
        debug_assert_eq!(self.field, rhs.field);
        let p = self.field.p();
        self.field
            .element_unchecked(add_mod(&self.c0, &rhs.c0, p), add_mod(&self.c1, &rhs.c1, p))
    }
}

impl<'a> Sub<&'a Fp2> for &'a Fp2 {
    type Output = Fp2;

    #[inline]
    fn sub(self, rhs: &'a Fp2) -> Fp2 {
        debug_assert_eq!(self.field, rhs.field);
        let p = self.field.p();
        self.field
            .element_unchecked(sub_mod(&self.c0, &rhs.c0, p), sub_mod(&self.c1, &rhs.c1, p))
    }
}

impl<'a> Mul<&'a Fp2> for &'a Fp2 {
    type Output = Fp2;

    fn mul(self, rhs: &'a Fp2) -> Fp2 {
        debug_assert_eq!(self.field, rhs.field);
        let p = self.field.p();
        let ac = (&self.c0 * &rhs.c0) % p;
        let bd = (&self.c1 * &rhs.c1) % p;
        let cross = (&self.c0 * &rhs.c1 + &self.c1 * &rhs.c0) % p;
        let c0 = sub_mod(&ac, &bd, p);
        let c1 = match self.field.poly {
            // w^2 = -1
            Irreducible::XSquarePlusOne => cross,
            // w^2 = -1 - w
            Irreducible::XSquarePlusXPlusOne => sub_mod(&cross, &bd, p),
        };
        self.field.element_unchecked(c0, c1)
    }
}

macro_rules! forward_owned_binop {
    ($trait:ident, $method:ident) => {
        impl<'a> $trait<&'a Fp2> for Fp2 {
            type Output = Fp2;

            #[inline]
            fn $method(self, rhs: &'a Fp2) -> Fp2 {
                (&self).$method(rhs)
            }
        }

        impl $trait for Fp2 {
            type Output = Fp2;

            #[inline]
            fn $method(self, rhs: Fp2) -> Fp2 {
                (&self).$method(&rhs)
            }
        }
    };
}

forward_owned_binop!(Add, add);
forward_owned_binop!(Sub, sub);
forward_owned_binop!(Mul, mul);

impl Neg for &Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        let p = self.field.p();
        let zero = BigUint::zero();
        self.field
            .element_unchecked(sub_mod(&zero, &self.c0, p), sub_mod(&zero, &self.c1, p))
    }
}

impl Neg for Fp2 {
    type Output = Fp2;

    #[inline]
    fn neg(self) -> Fp2 {
        -&self
    }
}
