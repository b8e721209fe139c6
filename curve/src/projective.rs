use pairing_field::{Field, FieldElement};

use crate::group::{normalize_coordinates, Coordinates, PointArithmetic};
use crate::Curve;

/// Pure field-arithmetic group law on projective coordinates.
///
/// Both branches stay inversion-free until a single normalization of the
/// resulting `Z`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProjectiveArithmetic;

impl ProjectiveArithmetic {
    /// Tangent rule for `y^2 = x^3 + ax + b`. A point with `Y = 0` doubles to
    /// the identity through `Z = 0`.
    pub fn double<F: Field>(
        &self,
        curve: &Curve<F>,
        p: &Coordinates<F::Elem>,
    ) -> Coordinates<F::Elem> {
        let field = curve.field();
        let Coordinates { x, y, z } = p;

        let u = field.from_i64(3) * &x.square() + &(curve.a().clone() * &z.square());
        let v = y.clone() * z;
        let a = y.clone() * &v;
        let xa = x.clone() * &a;
        let w = u.square() - (field.from_i64(8) * &xa);

        let rx = field.from_i64(2) * &v * &w;
        let ry = u * &(field.from_i64(4) * &xa - &w) - (field.from_i64(8) * &a.square());
        let rz = field.from_i64(8) * &v.square() * &v;

        normalize_coordinates(curve, rx, ry, &rz)
    }

    /// Chord rule for distinct points. Opposite points meet at `Z = 0`.
    pub fn chord<F: Field>(
        &self,
        curve: &Curve<F>,
        p: &Coordinates<F::Elem>,
        q: &Coordinates<F::Elem>,
    ) -> Coordinates<F::Elem> {
        let field = curve.field();

        let u = q.y.clone() * &p.z - &(p.y.clone() * &q.z);
        let v = q.x.clone() * &p.z - &(p.x.clone() * &q.z);
        let v2 = v.square();
        let v3 = v2.clone() * &v;
        let zz = p.z.clone() * &q.z;
        let px_qz = p.x.clone() * &q.z;

        let w = u.square() * &zz - &v3 - &(field.from_i64(2) * &v2 * &px_qz);
        let rx = v * &w;
        let ry = u * &(v2 * &px_qz - &w) - (v3.clone() * &p.y * &q.z);
        let rz = v3 * &zz;

        normalize_coordinates(curve, rx, ry, &rz)
    }
}

impl<F: Field> PointArithmetic<F> for ProjectiveArithmetic {
    fn name(&self) -> &'static str {
        "projective"
    }

    fn add(
        &self,
        curve: &Curve<F>,
        p: &Coordinates<F::Elem>,
        q: &Coordinates<F::Elem>,
    ) -> Coordinates<F::Elem> {
        if p.is_infinity() {
            return q.clone();
        }
        if q.is_infinity() {
            return p.clone();
        }

        if curve.equ(p, q) {
            self.double(curve, p)
        } else {
            self.chord(curve, p, q)
        }
    }
}
