use core::fmt::Debug;

use num_bigint::BigUint;
use pairing_field::{Field, FieldElement};
use serde::{Deserialize, Serialize};

use crate::Curve;

/// Raw projective triple `(x : y : z)`, representing the affine point
/// `(x/z, y/z)` when `z != 0`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coordinates<E> {
    pub x: E,
    pub y: E,
    pub z: E,
}

impl<E: FieldElement> Coordinates<E> {
    pub fn new(x: E, y: E, z: E) -> Self {
        Coordinates { x, y, z }
    }

    /// The `z = 0` triples are the point at infinity.
    #[inline]
    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }
}

/// Point arithmetic on raw coordinates, chosen once per [`Curve`].
///
/// Every implementation must be observably identical: `add` returns either the
/// curve identity `(0 : 1 : 0)` or a triple normalized to `z = 1`, and
/// `scalar_mul` returns the same points as repeated `add`.
pub trait PointArithmetic<F: Field>: Debug + Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// `p + q` on `curve`. Either operand may be the identity.
    fn add(
        &self,
        curve: &Curve<F>,
        p: &Coordinates<F::Elem>,
        q: &Coordinates<F::Elem>,
    ) -> Coordinates<F::Elem>;

    /// `k * p` by double-and-add over the bits of `k`, least significant first.
    fn scalar_mul(
        &self,
        curve: &Curve<F>,
        p: &Coordinates<F::Elem>,
        k: &BigUint,
    ) -> Coordinates<F::Elem> {
        let mut result = curve.identity_coordinates().clone();
        let mut temp = p.clone();
        let bits = k.bits();

        for i in 0..bits {
            if k.bit(i) {
                result = self.add(curve, &result, &temp);
            }
            if i + 1 < bits {
                temp = self.add(curve, &temp, &temp);
            }
        }

        result
    }
}

/// Scales `(x : y : z)` to `z = 1`, or returns the identity when `z` is not
/// invertible.
pub(crate) fn normalize_coordinates<F: Field>(
    curve: &Curve<F>,
    x: F::Elem,
    y: F::Elem,
    z: &F::Elem,
) -> Coordinates<F::Elem> {
    match z.inverse() {
        Ok(z_inv) => Coordinates::new(x * &z_inv, y * &z_inv, curve.field().one()),
        Err(_) => curve.identity_coordinates().clone(),
    }
}
