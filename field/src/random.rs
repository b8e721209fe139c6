use num_bigint::BigUint;
use num_traits::Zero;
use rand::Rng;

/// Samples a uniform integer in `[0, bound)` by rejection from random bytes.
///
/// Returns zero for a zero bound.
pub fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    if bound.is_zero() {
        return BigUint::zero();
    }
    let bits = bound.bits();
    let len = bits.div_ceil(8) as usize;
    let excess = (len as u64 * 8 - bits) as u32;
    let mut buf = vec![0u8; len];

    loop {
        rng.fill(&mut buf[..]);
        // big-endian, so the excess bits live in the first byte
        buf[0] &= 0xffu8 >> excess;
        let candidate = BigUint::from_bytes_be(&buf);
        if candidate < *bound {
            return candidate;
        }
    }
}

/// Samples a uniform integer in `[1, bound)`.
pub fn random_nonzero_below<R: Rng + ?Sized>(rng: &mut R, bound: &BigUint) -> BigUint {
    loop {
        let candidate = random_below(rng, bound);
        if !candidate.is_zero() || *bound <= BigUint::from(1u32) {
            return candidate;
        }
    }
}
