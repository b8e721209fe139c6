//! Square roots of integers modulo `m`.
//!
//! Prime moduli go through the Legendre gate, then either the `p ≡ 3 (mod 4)`
//! exponentiation or Tonelli-Shanks. Odd prime powers lift the root modulo `p`.
//! Other odd moduli use closed forms selected by `m mod 8`, and a candidate that
//! does not verify is reported as unsupported rather than as "no root".

use num_bigint::BigUint;
use num_integer::{Integer, Roots};
use num_traits::{One, ToPrimitive, Zero};
use pairing_field::{is_prime, modinv, random_below, FieldError};
use rand::Rng;
use tracing::{debug, trace};

use super::RootError;
use crate::SearchBounds;

#[inline]
fn small(n: u32) -> BigUint {
    BigUint::from(n)
}

/// Legendre symbol `(a / p)` for a prime `p`: 1, -1, or 0 when `p | a`.
pub fn legendre_symbol(a: &BigUint, p: &BigUint) -> i8 {
    let a = a % p;
    if a.is_zero() {
        return 0;
    }
    if *p == small(2) {
        return 1;
    }
    // Euler's criterion
    let exp = (p - 1u32) >> 1u32;
    if a.modpow(&exp, p).is_one() {
        1
    } else {
        -1
    }
}

/// Smallest `k` in `1..=limit` with `x^(2^k) ≡ 1 (mod m)`.
fn two_power_order(x: &BigUint, m: &BigUint, limit: u64) -> Option<u64> {
    let mut y = (x * x) % m;
    let mut k = 1;
    while !y.is_one() {
        if k >= limit {
            return None;
        }
        y = (&y * &y) % m;
        k += 1;
    }
    Some(k)
}

/// `{r, m - r}` without duplicates.
fn root_pair(r: BigUint, m: &BigUint) -> Vec<BigUint> {
    let other = (m - &r) % m;
    if other == r {
        vec![r]
    } else {
        vec![r, other]
    }
}

/// All `x` with `x^2 ≡ a (mod m)` that the engine can find.
///
/// For a prime `m` the result is exact: empty when `a` is a non-residue, `[0]`
/// when `m | a`, and two roots summing to `m` otherwise. For a composite `m`
/// only candidates that verify are returned; a closed form that does not
/// converge is reported as [`RootError::Unsupported`].
pub fn modular_square_root<R: Rng + ?Sized>(
    a: &BigUint,
    m: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<BigUint>, RootError> {
    if m.is_zero() {
        return Err(RootError::InvalidModulus);
    }
    let a = a % m;
    if m.is_one() {
        return Ok(vec![BigUint::zero()]);
    }
    if *m == small(2) {
        return Ok(vec![a]);
    }
    if is_prime(m) {
        prime_square_root(&a, m, rng, bounds)
    } else {
        composite_square_root(&a, m, rng, bounds)
    }
}

fn prime_square_root<R: Rng + ?Sized>(
    a: &BigUint,
    p: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<BigUint>, RootError> {
    match legendre_symbol(a, p) {
        -1 => return Ok(Vec::new()),
        0 => return Ok(vec![BigUint::zero()]),
        _ => {}
    }

    if p % 4u32 == small(3) {
        let r = a.modpow(&((p + 1u32) >> 2u32), p);
        return Ok(root_pair(r, p));
    }

    let r = tonelli_shanks(a, p, rng, bounds)?;
    Ok(root_pair(r, p))
}

fn find_non_residue<R: Rng + ?Sized>(
    p: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<BigUint, RootError> {
    for attempt in 0..bounds.max_attempts {
        let z = random_below(rng, p);
        if legendre_symbol(&z, p) == -1 {
            trace!(attempt, "found quadratic non-residue");
            return Ok(z);
        }
    }
    Err(RootError::SearchExhausted {
        what: "quadratic non-residue search",
        attempts: bounds.max_attempts,
    })
}

/// Tonelli-Shanks for an odd prime `p` and a residue `a`.
fn tonelli_shanks<R: Rng + ?Sized>(
    a: &BigUint,
    p: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<BigUint, RootError> {
    // p - 1 = q * 2^s with q odd
    let p_minus_one = p - 1u32;
    let s = p_minus_one.trailing_zeros().unwrap_or(0);
    let q = &p_minus_one >> s;

    let z = find_non_residue(p, rng, bounds)?;
    let mut c = z.modpow(&q, p);
    let mut r = a.modpow(&((&q + 1u32) >> 1u32), p);
    let mut t = a.modpow(&q, p);
    let mut l = s;

    loop {
        if t.is_one() {
            debug_assert_eq!((&r * &r) % p, *a);
            return Ok(r);
        }
        // the order of t halves every round, so i < l for a true residue
        let i = two_power_order(&t, p, l)
            .filter(|i| *i < l)
            .ok_or(RootError::SearchExhausted {
                what: "Tonelli-Shanks reduction",
                attempts: l,
            })?;
        let b = c.modpow(&(BigUint::one() << (l - i - 1)), p);
        r = (r * &b) % p;
        c = (&b * &b) % p;
        t = (t * &c) % p;
        l = i;
    }
}

fn composite_square_root<R: Rng + ?Sized>(
    a: &BigUint,
    m: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<BigUint>, RootError> {
    debug!(modulus = %m, "square root modulo a composite");

    if m.is_even() {
        return Err(RootError::Unsupported("square root modulo an even composite"));
    }
    if a.is_zero() {
        return Ok(vec![BigUint::zero()]);
    }
    // -1 means a non-residue modulo some prime factor of m
    if jacobi_symbol(a, m) == -1 {
        return Ok(Vec::new());
    }
    if let Some((p, k)) = prime_power(m) {
        return prime_power_square_root(a, &p, k, m, rng, bounds);
    }

    let candidate = if m % 4u32 == small(3) {
        a.modpow(&((m + 1u32) >> 2u32), m)
    } else if m % 8u32 == small(5) {
        // Atkin
        let two_a = (a << 1u32) % m;
        let v = two_a.modpow(&((m - 5u32) >> 3u32), m);
        let i = (&two_a * &v * &v) % m;
        (a * &v * ((i + m - 1u32) % m)) % m
    } else {
        one_mod_eight_root(a, m, rng, bounds)?
    };

    if (&candidate * &candidate) % m == *a {
        Ok(root_pair(candidate, m))
    } else {
        Err(RootError::Unsupported(
            "square root modulo a composite whose closed form does not verify",
        ))
    }
}

/// Jacobi symbol `(a / n)` for an odd `n`.
fn jacobi_symbol(a: &BigUint, n: &BigUint) -> i8 {
    let mut a = a % n;
    let mut n = n.clone();
    let mut sign = 1;
    while !a.is_zero() {
        let twos = a.trailing_zeros().unwrap_or(0);
        a >>= twos;
        let n_mod_8 = (&n % 8u32).to_u32().unwrap_or(0);
        if twos % 2 == 1 && (n_mod_8 == 3 || n_mod_8 == 5) {
            sign = -sign;
        }
        std::mem::swap(&mut a, &mut n);
        if &a % 4u32 == small(3) && &n % 4u32 == small(3) {
            sign = -sign;
        }
        a %= &n;
    }
    if n.is_one() {
        sign
    } else {
        0
    }
}

/// `(p, k)` with `m = p^k`, `p` prime and `k >= 2`.
fn prime_power(m: &BigUint) -> Option<(BigUint, u32)> {
    let max_exponent = u32::try_from(m.bits()).unwrap_or(u32::MAX);
    (2..=max_exponent).find_map(|k| {
        let root = m.nth_root(k);
        (root.pow(k) == *m && is_prime(&root)).then_some((root, k))
    })
}

/// Lifts a root modulo the odd prime `p` to `m = p^k` with Newton steps.
fn prime_power_square_root<R: Rng + ?Sized>(
    a: &BigUint,
    p: &BigUint,
    k: u32,
    m: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<Vec<BigUint>, RootError> {
    let a_mod_p = a % p;
    if a_mod_p.is_zero() {
        return Err(RootError::Unsupported(
            "square root of a non-unit modulo a prime power",
        ));
    }
    let Some(mut r) = prime_square_root(&a_mod_p, p, rng, bounds)?.into_iter().next() else {
        return Ok(Vec::new());
    };

    // each step doubles the number of correct base-p digits
    for _ in 0..k {
        let excess = (&r * &r + m - a) % m;
        if excess.is_zero() {
            break;
        }
        let inverse = modinv(&((&r << 1u32) % m), m).ok_or(FieldError::DivisionByZero)?;
        r = (&r + m - (excess * inverse) % m) % m;
    }
    debug_assert_eq!((&r * &r) % m, *a);
    trace!(prime = %p, exponent = k, "lifted square root to prime power");
    Ok(root_pair(r, m))
}

/// Tonelli-Shanks variant for `m ≡ 1 (mod 8)` built on an element of order
/// `2^e`, where `m - 1 = q * 2^e`.
fn one_mod_eight_root<R: Rng + ?Sized>(
    a: &BigUint,
    m: &BigUint,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<BigUint, RootError> {
    let m_minus_one = m - 1u32;
    let e = m_minus_one.trailing_zeros().unwrap_or(0);
    let q = &m_minus_one >> e;

    let x = a.modpow(&((&q - 1u32) >> 1u32), m);
    let mut v = (a * &x) % m;
    let mut w = (&v * &x) % m;
    // v^2 = a * w
    if w.is_one() {
        return Ok(v);
    }

    let mut y = element_of_order_two_power(m, &q, e, rng, bounds)?;
    let mut r = e;
    loop {
        if w.is_one() {
            return Ok(v);
        }
        let k = two_power_order(&w, m, r)
            .filter(|k| *k < r)
            .ok_or(RootError::Unsupported(
                "square root modulo a composite without a convergent reduction",
            ))?;
        let d = y.modpow(&(BigUint::one() << (r - k - 1)), m);
        y = (&d * &d) % m;
        r = k;
        v = (d * v) % m;
        w = (w * &y) % m;
    }
}

/// Draws `x^q` until one has order exactly `2^e`.
///
/// The unit group of a composite may have no such element at all, so running
/// out of draws is reported as unsupported rather than as an exhausted search.
fn element_of_order_two_power<R: Rng + ?Sized>(
    m: &BigUint,
    q: &BigUint,
    e: u64,
    rng: &mut R,
    bounds: &SearchBounds,
) -> Result<BigUint, RootError> {
    let half_order = BigUint::one() << (e - 1);
    let full_order = &half_order << 1u32;
    for attempt in 0..bounds.max_attempts {
        let candidate = random_below(rng, m).modpow(q, m);
        // non-units never reach 1
        if !candidate.modpow(&half_order, m).is_one() && candidate.modpow(&full_order, m).is_one() {
            trace!(attempt, "found element of maximal 2-power order");
            return Ok(candidate);
        }
    }
    Err(RootError::Unsupported(
        "square root modulo a composite without an element of order 2^e",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn roots(a: u64, m: u64) -> Vec<BigUint> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut roots = modular_square_root(
            &BigUint::from(a),
            &BigUint::from(m),
            &mut rng,
            &SearchBounds::default(),
        )
        .unwrap();
        roots.sort();
        roots
    }

    fn big(values: &[u64]) -> Vec<BigUint> {
        values.iter().map(|v| BigUint::from(*v)).collect()
    }

    #[test]
    fn test_legendre_symbol() {
        let p = small(11);
        // squares mod 11: 1, 3, 4, 5, 9
        let residues: Vec<u32> = (1..11)
            .filter(|a| legendre_symbol(&small(*a), &p) == 1)
            .collect();
        assert_eq!(residues, vec![1, 3, 4, 5, 9]);
        assert_eq!(legendre_symbol(&small(22), &p), 0);
        assert_eq!(legendre_symbol(&small(2), &p), -1);
    }

    #[test]
    fn test_three_mod_four() {
        assert_eq!(roots(9, 11), big(&[3, 8]));
        assert_eq!(roots(2, 11), big(&[]));
    }

    #[test]
    fn test_tonelli_shanks() {
        // 17 ≡ 1 (mod 16), so s = 4
        assert_eq!(roots(2, 17), big(&[6, 11]));
        // 41 ≡ 1 (mod 8)
        assert_eq!(roots(10, 41), big(&[16, 25]));
        assert_eq!(roots(3, 17), big(&[]));
    }

    #[test]
    fn test_every_residue_of_small_primes() {
        for p in [5u64, 13, 17, 29, 37, 41, 73, 97, 113, 257] {
            for a in 1..p {
                let found = roots(a, p);
                let expected_residue = legendre_symbol(&BigUint::from(a), &BigUint::from(p)) == 1;
                if expected_residue {
                    assert_eq!(found.len(), 2, "a = {}, p = {}", a, p);
                    assert_eq!(&found[0] + &found[1], BigUint::from(p));
                    for r in found {
                        assert_eq!((&r * &r) % p, BigUint::from(a));
                    }
                } else {
                    assert!(found.is_empty(), "a = {}, p = {}", a, p);
                }
            }
        }
    }

    #[test]
    fn test_zero_and_trivial_moduli() {
        assert_eq!(roots(0, 13), big(&[0]));
        assert_eq!(roots(26, 13), big(&[0]));
        assert_eq!(roots(5, 1), big(&[0]));
        assert_eq!(roots(3, 2), big(&[1]));
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            modular_square_root(&small(1), &BigUint::zero(), &mut rng, &SearchBounds::default()),
            Err(RootError::InvalidModulus)
        );
    }

    #[test]
    fn test_prime_powers_are_lifted() {
        assert_eq!(roots(4, 9), big(&[2, 7]));
        assert_eq!(roots(4, 25), big(&[2, 23]));
        assert_eq!(roots(4, 27), big(&[2, 25]));
        assert_eq!(roots(4, 289), big(&[2, 287]));
        // 17^3, root of 2 mod 17 is 6
        assert_eq!(roots(2, 4913), big(&[623, 4290]));
        assert_eq!(roots(10, 1681), big(&[517, 1164]));
        // 2 is a non-residue mod 3
        assert_eq!(roots(2, 27), big(&[]));
        assert_eq!(roots(0, 25), big(&[0]));
    }

    #[test]
    fn test_prime_power_non_unit_is_unsupported() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            modular_square_root(&small(5), &small(25), &mut rng, &SearchBounds::default()),
            Err(RootError::Unsupported("square root of a non-unit modulo a prime power"))
        );
    }

    #[test]
    fn test_composite_closed_forms() {
        // 91 = 7 * 13 ≡ 3 (mod 4)
        assert_eq!(roots(9, 91), big(&[10, 81]));
        // 45 = 9 * 5 ≡ 5 (mod 8), Atkin
        assert_eq!(roots(16, 45), big(&[14, 31]));
        // 2761 = 11 * 251 ≡ 1 (mod 8) with a^q = 1
        assert_eq!(roots(20, 2761), big(&[283, 2478]));
        assert_eq!(roots(1, 33), big(&[1, 32]));
    }

    #[test]
    fn test_composite_jacobi_non_residue_is_empty() {
        assert_eq!(jacobi_symbol(&small(7), &small(15)), -1);
        assert_eq!(roots(7, 15), big(&[]));
        assert_eq!(jacobi_symbol(&small(4), &small(33)), 1);
        assert_eq!(jacobi_symbol(&small(6), &small(15)), 0);
    }

    #[test]
    fn test_composite_without_root_of_unity_is_unsupported() {
        // 33 - 1 = 2^5 but the units mod 33 have exponent 10
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            modular_square_root(&small(4), &small(33), &mut rng, &SearchBounds::default()),
            Err(RootError::Unsupported(
                "square root modulo a composite without an element of order 2^e"
            ))
        );
    }

    #[test]
    fn test_unverified_closed_form_is_unsupported() {
        // 2^2 = 4 mod 35, but 4^9 = 29 mod 35
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(
            modular_square_root(&small(4), &small(35), &mut rng, &SearchBounds::default()),
            Err(RootError::Unsupported(
                "square root modulo a composite whose closed form does not verify"
            ))
        );
    }

    #[test]
    fn test_prime_power_detection() {
        assert_eq!(prime_power(&small(4913)), Some((small(17), 3)));
        assert_eq!(prime_power(&small(64)), Some((small(2), 6)));
        assert_eq!(prime_power(&small(45)), None);
        assert_eq!(prime_power(&small(36)), None);
    }

    #[test]
    fn test_composite_one_is_always_found() {
        let mut rng = StdRng::seed_from_u64(9);
        // 27 = 3^3, lifted from the root 1 mod 3
        let found =
            modular_square_root(&small(1), &small(27), &mut rng, &SearchBounds::default()).unwrap();
        assert_eq!(found, vec![small(1), small(26)]);
    }

    #[test]
    fn test_even_composite_is_unsupported() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            modular_square_root(&small(4), &small(12), &mut rng, &SearchBounds::default()),
            Err(RootError::Unsupported("square root modulo an even composite"))
        );
    }

    #[test]
    fn test_non_residue_search_respects_bound() {
        let mut rng = StdRng::seed_from_u64(0);
        let bounds = SearchBounds::default().with_max_attempts(0);
        assert!(matches!(
            modular_square_root(&small(2), &small(17), &mut rng, &bounds),
            Err(RootError::SearchExhausted { .. })
        ));
    }
}
