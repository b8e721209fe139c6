use core::fmt;
use std::sync::Arc;

use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};
use pairing_field::{random_nonzero_below, Field, FieldElement};
use rand::Rng;
use tracing::debug;

use crate::group::{Coordinates, PointArithmetic};
use crate::root::SquareRoot;
use crate::{CurveError, Point, ProjectiveArithmetic, SearchBounds};

/// Short Weierstrass curve `y^2 = x^3 + ax + b` over `F`.
///
/// Non-singularity is the caller's responsibility; a singular curve only shows
/// up as a division error from [`Curve::j_invariant`].
#[derive(Clone, Debug)]
pub struct Curve<F: Field> {
    field: F,
    a: F::Elem,
    b: F::Elem,
    identity: Coordinates<F::Elem>,
    arithmetic: Arc<dyn PointArithmetic<F>>,
    bounds: SearchBounds,
}

impl<F: Field> Curve<F> {
    /// Curve with the default projective arithmetic and the process-wide
    /// [`SearchBounds`].
    pub fn new(field: F, a: F::Elem, b: F::Elem) -> Self {
        let identity = Coordinates::new(field.zero(), field.one(), field.zero());
        Curve {
            field,
            a,
            b,
            identity,
            arithmetic: Arc::new(ProjectiveArithmetic),
            bounds: SearchBounds::global(),
        }
    }

    /// Replaces the point arithmetic used by every point of this curve.
    pub fn with_arithmetic<A: PointArithmetic<F> + 'static>(mut self, arithmetic: A) -> Self {
        debug!(strategy = arithmetic.name(), "point arithmetic selected");
        self.arithmetic = Arc::new(arithmetic);
        self
    }

    /// Replaces the limits on randomized searches and order computation.
    pub fn with_bounds(mut self, bounds: SearchBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// A curve over `field` whose j-invariant is `j0`.
    ///
    /// The result is one of the twists with that j-invariant, picked by a
    /// random nonzero scale `R` from the prime subfield.
    pub fn from_j_invariant<R: Rng + ?Sized>(
        field: F,
        j0: &F::Elem,
        rng: &mut R,
    ) -> Result<Self, CurveError> {
        let scale = random_nonzero_below(rng, field.characteristic());
        let r = field.from_int(&BigInt::from(scale));
        let j1728 = field.from_i64(1728);

        let (a, b) = if j0.is_zero() {
            (field.zero(), r)
        } else if *j0 == j1728 {
            (r, field.zero())
        } else {
            let u_inv = (j1728 - j0).inverse()?;
            let r2 = r.square();
            let a = field.from_i64(3) * j0 * &r2 * &u_inv;
            let b = field.from_i64(2) * j0 * &r2 * &r * &u_inv;
            (a, b)
        };

        debug!(%j0, %a, %b, "curve constructed from j-invariant");
        Ok(Curve::new(field, a, b))
    }

    #[inline]
    pub fn field(&self) -> &F {
        &self.field
    }

    #[inline]
    pub fn a(&self) -> &F::Elem {
        &self.a
    }

    #[inline]
    pub fn b(&self) -> &F::Elem {
        &self.b
    }

    #[inline]
    pub fn bounds(&self) -> &SearchBounds {
        &self.bounds
    }

    /// The active point arithmetic strategy.
    pub fn arithmetic(&self) -> &dyn PointArithmetic<F> {
        self.arithmetic.as_ref()
    }

    /// The shared `(0 : 1 : 0)` triple.
    #[inline]
    pub fn identity_coordinates(&self) -> &Coordinates<F::Elem> {
        &self.identity
    }

    /// `y^2 z == x^3 + a x z^2 + b z^3`.
    pub fn is_on_curve(&self, x: &F::Elem, y: &F::Elem, z: &F::Elem) -> bool {
        let z2 = z.square();
        let lhs = y.square() * z;
        let rhs = x.square() * x + &(self.a.clone() * x * &z2) + &(self.b.clone() * &z2 * z);
        lhs == rhs
    }

    pub fn contains(&self, point: &Point<'_, F>) -> bool {
        let Coordinates { x, y, z } = point.coordinates();
        point.is_infinity() || self.is_on_curve(x, y, z)
    }

    pub fn identity(&self) -> Point<'_, F> {
        Point::from_trusted(self, self.identity.clone())
    }

    /// Affine point `(x, y)`.
    pub fn point(&self, x: F::Elem, y: F::Elem) -> Result<Point<'_, F>, CurveError> {
        let z = self.field.one();
        self.point_projective(x, y, z)
    }

    /// Projective point `(x : y : z)`. Any `(0 : y : 0)` with `y != 0` is the
    /// identity; every other triple must satisfy the curve equation.
    pub fn point_projective(
        &self,
        x: F::Elem,
        y: F::Elem,
        z: F::Elem,
    ) -> Result<Point<'_, F>, CurveError> {
        if z.is_zero() && x.is_zero() && !y.is_zero() {
            return Ok(self.identity());
        }
        if z.is_zero() || !self.is_on_curve(&x, &y, &z) {
            return Err(CurveError::InvalidPoint {
                x: x.to_string(),
                y: y.to_string(),
                z: z.to_string(),
            });
        }
        Ok(Point::from_trusted(self, Coordinates::new(x, y, z)))
    }

    /// `-16 (4a^3 + 27b^2)`.
    pub fn determinant(&self) -> F::Elem {
        let field = &self.field;
        let a3 = self.a.square() * &self.a;
        let b2 = self.b.square();
        field.from_i64(-16) * &(field.from_i64(4) * &a3 + &(field.from_i64(27) * &b2))
    }

    /// `-1728 (4a)^3 / Δ`, failing on a singular curve.
    pub fn j_invariant(&self) -> Result<F::Elem, CurveError> {
        let four_a = self.field.from_i64(4) * &self.a;
        let numerator = self.field.from_i64(-1728) * &four_a.square() * &four_a;
        Ok(numerator.checked_div(&self.determinant())?)
    }

    /// Group law on raw triples; the result is normalized or the identity.
    pub fn add_coordinates(
        &self,
        p: &Coordinates<F::Elem>,
        q: &Coordinates<F::Elem>,
    ) -> Coordinates<F::Elem> {
        self.arithmetic.add(self, p, q)
    }

    /// `k * p` on raw triples, delegated to the active strategy.
    pub fn mul_coordinates(&self, p: &Coordinates<F::Elem>, k: &BigUint) -> Coordinates<F::Elem> {
        self.arithmetic.scalar_mul(self, p, k)
    }

    /// Projective equality: the triples are proportional.
    ///
    /// This is also what selects doubling over the chord rule.
    pub fn equ(&self, p: &Coordinates<F::Elem>, q: &Coordinates<F::Elem>) -> bool {
        p.x.clone() * &q.y == p.y.clone() * &q.x
            && p.x.clone() * &q.z == p.z.clone() * &q.x
            && p.y.clone() * &q.z == p.z.clone() * &q.y
    }

    /// `(x, -y, z)`, or the identity for the identity.
    pub fn neg_coordinates(&self, p: &Coordinates<F::Elem>) -> Coordinates<F::Elem> {
        if p.is_infinity() {
            return self.identity.clone();
        }
        Coordinates::new(p.x.clone(), -p.y.clone(), p.z.clone())
    }

    /// Smallest `k >= 1` with `m | p^(k * degree) - 1`.
    pub fn embedding_degree(&self, m: &BigUint) -> Result<u64, CurveError> {
        if m.is_zero() {
            return Err(CurveError::ZeroModulus);
        }
        if m.is_one() {
            return Ok(1);
        }

        let q = self.field.order() % m;
        let mut power = q.clone();
        for k in 1..=self.bounds.max_embedding_degree {
            if power.is_one() {
                debug!(modulus = %m, k, "embedding degree found");
                return Ok(k);
            }
            power = (power * &q) % m;
        }

        Err(CurveError::SearchExhausted {
            what: "embedding degree search",
            limit: self.bounds.max_embedding_degree,
        })
    }
}

impl<F: Field> Curve<F>
where
    F::Elem: SquareRoot,
{
    /// A `y` with `y^2 = x^3 + ax + b`, if `x` is the abscissa of a point.
    pub fn corresponding_y<R: Rng + ?Sized>(
        &self,
        x: &F::Elem,
        rng: &mut R,
    ) -> Result<Option<F::Elem>, CurveError> {
        let y_square = x.square() * x + &(self.a.clone() * x) + &self.b;
        let roots = y_square.square_roots(rng, &self.bounds)?;
        Ok(roots.into_iter().find(|y| y.square() == y_square))
    }

    /// Scans upward from a uniformly random `x` until `x^3 + ax + b` is a square.
    pub fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Point<'_, F>, CurveError> {
        let one = self.field.one();
        let mut x = self.field.random_element(rng);

        for step in 0..self.bounds.max_attempts {
            if let Some(y) = self.corresponding_y(&x, rng)? {
                if self.is_on_curve(&x, &y, &one) {
                    debug!(step, "random point found");
                    return Ok(Point::from_trusted(self, Coordinates::new(x, y, one)));
                }
            }
            x = x + &one;
        }

        Err(CurveError::SearchExhausted {
            what: "random point search",
            limit: self.bounds.max_attempts,
        })
    }
}

impl<F: Field> PartialEq for Curve<F> {
    fn eq(&self, other: &Self) -> bool {
        self.field == other.field && self.a == other.a && self.b == other.b
    }
}

impl<F: Field> Eq for Curve<F> {}

impl<F: Field> fmt::Display for Curve<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Elliptic Curve y^2 = x^3")?;
        if !self.a.is_zero() {
            if self.a.is_one() {
                write!(f, " + x")?;
            } else {
                write!(f, " + {}x", self.a)?;
            }
        }
        if !self.b.is_zero() {
            write!(f, " + {}", self.b)?;
        }
        write!(f, " over {}", self.field)
    }
}
