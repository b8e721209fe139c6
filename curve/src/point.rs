use core::fmt;
use core::ops::{Add, Mul, Neg, Sub};

use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};
use pairing_field::{Field, FieldElement, Irreducible};

use crate::group::Coordinates;
use crate::{Curve, CurveError};

/// A rational point of a [`Curve`], borrowed from the curve it lives on.
///
/// Points are immutable; every group operation returns a new point. The
/// identity is always stored as the canonical `(0 : 1 : 0)`.
#[derive(Clone, Debug)]
pub struct Point<'c, F: Field> {
    curve: &'c Curve<F>,
    coords: Coordinates<F::Elem>,
}

impl<'c, F: Field> Point<'c, F> {
    /// Validated construction, see [`Curve::point_projective`].
    pub fn new(
        curve: &'c Curve<F>,
        x: F::Elem,
        y: F::Elem,
        z: F::Elem,
    ) -> Result<Self, CurveError> {
        curve.point_projective(x, y, z)
    }

    pub(crate) fn from_trusted(curve: &'c Curve<F>, coords: Coordinates<F::Elem>) -> Self {
        debug_assert!(
            coords.is_infinity() || curve.is_on_curve(&coords.x, &coords.y, &coords.z)
        );
        Point { curve, coords }
    }

    #[inline]
    pub fn curve(&self) -> &'c Curve<F> {
        self.curve
    }

    #[inline]
    pub fn coordinates(&self) -> &Coordinates<F::Elem> {
        &self.coords
    }

    #[inline]
    pub fn x(&self) -> &F::Elem {
        &self.coords.x
    }

    #[inline]
    pub fn y(&self) -> &F::Elem {
        &self.coords.y
    }

    #[inline]
    pub fn z(&self) -> &F::Elem {
        &self.coords.z
    }

    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.coords.is_infinity()
    }

    /// `(x, y, z)` in order.
    pub fn iter(&self) -> impl Iterator<Item = &F::Elem> + '_ {
        [&self.coords.x, &self.coords.y, &self.coords.z].into_iter()
    }

    /// The same point scaled to `z = 1`; the identity is returned unchanged.
    pub fn normalize(&self) -> Self {
        match self.to_affine() {
            Some((x, y)) => Point {
                curve: self.curve,
                coords: Coordinates::new(x, y, self.curve.field().one()),
            },
            None => self.clone(),
        }
    }

    /// `(x/z, y/z)`, or `None` at infinity.
    pub fn to_affine(&self) -> Option<(F::Elem, F::Elem)> {
        let z_inv = self.coords.z.inverse().ok()?;
        Some((
            self.coords.x.clone() * &z_inv,
            self.coords.y.clone() * &z_inv,
        ))
    }

    /// Re-validates the coordinates as a point of `curve`.
    pub fn regroup<'d>(&self, curve: &'d Curve<F>) -> Result<Point<'d, F>, CurveError> {
        let Coordinates { x, y, z } = self.coords.clone();
        curve.point_projective(x, y, z)
    }

    /// Group law, with `O` as the neutral element.
    pub fn add(&self, rhs: &Self) -> Self {
        debug_assert!(self.curve == rhs.curve, "points on different curves");
        if rhs.is_infinity() {
            return self.clone();
        }
        if self.is_infinity() {
            return Point::from_trusted(self.curve, rhs.coords.clone());
        }
        Point::from_trusted(self.curve, self.curve.add_coordinates(&self.coords, &rhs.coords))
    }

    /// `self + (-rhs)`.
    pub fn sub(&self, rhs: &Self) -> Self {
        self.add(&rhs.neg())
    }

    /// `(x, -y, z)`; the identity maps to itself.
    pub fn neg(&self) -> Self {
        Point::from_trusted(self.curve, self.curve.neg_coordinates(&self.coords))
    }

    /// `2 * self`.
    pub fn double(&self) -> Self {
        self.add(self)
    }

    /// `k * self`; negative scalars multiply `-self`. Not constant time.
    pub fn scalar_mul(&self, k: &BigInt) -> Self {
        if k.is_zero() || self.is_infinity() {
            return self.curve.identity();
        }
        let product = Point::from_trusted(
            self.curve,
            self.curve.mul_coordinates(&self.coords, k.magnitude()),
        );
        if k.sign() == Sign::Minus {
            Point::neg(&product)
        } else {
            product
        }
    }

    #[inline]
    pub fn mul_i64(&self, k: i64) -> Self {
        self.scalar_mul(&BigInt::from(k))
    }

    /// Slope of the chord through `self` and `other`, or of the tangent when
    /// the abscissas agree. Both points must be normalized.
    pub fn line_coeff(&self, other: &Self) -> Result<F::Elem, CurveError> {
        if !self.coords.z.is_one() || !other.coords.z.is_one() {
            return Err(CurveError::NotNormalized);
        }

        let field = self.curve.field();
        let (x1, y1) = (&self.coords.x, &self.coords.y);
        let (x2, y2) = (&other.coords.x, &other.coords.y);

        let slope = if x1 == x2 {
            let numerator = field.from_i64(3) * &x1.square() + self.curve.a();
            numerator.checked_div(&(field.from_i64(2) * y1))?
        } else {
            (y2.clone() - y1).checked_div(&(x2.clone() - x1))?
        };
        Ok(slope)
    }

    /// Smallest `n >= 1` with `n * self = O`, found by repeated addition.
    pub fn order(&self) -> Result<u64, CurveError> {
        let limit = self.curve.bounds().max_order;
        let mut acc = self.clone();
        let mut n = 1u64;

        while !acc.is_infinity() {
            if n >= limit {
                return Err(CurveError::SearchExhausted {
                    what: "point order",
                    limit,
                });
            }
            acc = &acc + self;
            n += 1;
        }

        Ok(n)
    }

    /// Distortion map over `F_{p^2}`.
    ///
    /// For `F_p[i]/(i^2 + 1)` this is `(x, y) -> (-x, i y)`, an endomorphism of
    /// `y^2 = x^3 + ax`. For `F_p[w]/(w^2 + w + 1)` it is `(x, y) -> (w x, y)`,
    /// an endomorphism of `y^2 = x^3 + b`. Fails with `InvalidPoint` when the
    /// image leaves the curve.
    pub fn distortion_map(&self) -> Result<Self, CurveError> {
        let field = self.curve.field();
        let Some(poly) = field.extension() else {
            return Err(CurveError::RequiresExtensionField("distortion map"));
        };
        if self.is_infinity() {
            return Ok(self.clone());
        }

        let generator = field.from_components(&[BigInt::zero(), BigInt::one()])?;
        let Coordinates { x, y, z } = self.coords.clone();
        let (x, y) = match poly {
            Irreducible::XSquarePlusOne => (-x, generator * &y),
            Irreducible::XSquarePlusXPlusOne => (generator * &x, y),
        };
        self.curve.point_projective(x, y, z)
    }
}

impl<F: Field> PartialEq for Point<'_, F> {
    fn eq(&self, other: &Self) -> bool {
        self.curve == other.curve && self.curve.equ(&self.coords, &other.coords)
    }
}

impl<F: Field> Eq for Point<'_, F> {}

impl<F: Field> fmt::Display for Point<'_, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_infinity() {
            return write!(f, "Infinity Point (0 : 1 : 0) on {}", self.curve);
        }
        let Coordinates { x, y, z } = &self.coords;
        write!(f, "Point ({} : {} : {}) on {}", x, y, z, self.curve)
    }
}

impl<'c, F: Field> Add for &Point<'c, F> {
    type Output = Point<'c, F>;

    fn add(self, rhs: Self) -> Point<'c, F> {
        Point::add(self, rhs)
    }
}

impl<'c, F: Field> Add for Point<'c, F> {
    type Output = Point<'c, F>;

    fn add(self, rhs: Self) -> Point<'c, F> {
        Point::add(&self, &rhs)
    }
}

impl<'c, F: Field> Sub for &Point<'c, F> {
    type Output = Point<'c, F>;

    fn sub(self, rhs: Self) -> Point<'c, F> {
        Point::sub(self, rhs)
    }
}

impl<'c, F: Field> Sub for Point<'c, F> {
    type Output = Point<'c, F>;

    fn sub(self, rhs: Self) -> Point<'c, F> {
        Point::sub(&self, &rhs)
    }
}

impl<'c, F: Field> Neg for &Point<'c, F> {
    type Output = Point<'c, F>;

    fn neg(self) -> Point<'c, F> {
        Point::neg(self)
    }
}

impl<'c, F: Field> Neg for Point<'c, F> {
    type Output = Point<'c, F>;

    fn neg(self) -> Point<'c, F> {
        Point::neg(&self)
    }
}

impl<'c, F: Field> Mul<&BigInt> for &Point<'c, F> {
    type Output = Point<'c, F>;

    fn mul(self, k: &BigInt) -> Point<'c, F> {
        self.scalar_mul(k)
    }
}

impl<'c, F: Field> Mul<i64> for &Point<'c, F> {
    type Output = Point<'c, F>;

    fn mul(self, k: i64) -> Point<'c, F> {
        self.mul_i64(k)
    }
}
