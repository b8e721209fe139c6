//! Integer helpers shared by the field providers and the root engine.

use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Zero};

// Deterministic for every n < 3.3 * 10^24.
const WITNESSES: [u32; 12] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37];

/// Miller-Rabin primality test over the fixed witness set.
pub fn is_prime(n: &BigUint) -> bool {
    let two = BigUint::from(2u32);
    if *n < two {
        return false;
    }
    for &w in WITNESSES.iter() {
        let w = BigUint::from(w);
        if *n == w {
            return true;
        }
        if (n % &w).is_zero() {
            return false;
        }
    }

    let n_minus_one = n - 1u32;
    // n is odd and > 37 here, so n - 1 has at least one trailing zero
    let s = n_minus_one.trailing_zeros().unwrap_or(0);
    let d = &n_minus_one >> s;

    'witness: for &w in WITNESSES.iter() {
        let mut x = BigUint::from(w).modpow(&d, n);
        if x.is_one() || x == n_minus_one {
            continue;
        }
        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }
        return false;
    }
    true
}

/// Reduces a signed integer into `[0, m)`.
pub fn reduce(n: &BigInt, m: &BigUint) -> BigUint {
    let m = BigInt::from_biguint(Sign::Plus, m.clone());
    // mod_floor is non-negative for a positive modulus
    n.mod_floor(&m).magnitude().clone()
}

/// Inverse of `a` modulo `m`, if `gcd(a, m) = 1`.
pub fn modinv(a: &BigUint, m: &BigUint) -> Option<BigUint> {
    if m.is_zero() {
        return None;
    }
    let a = BigInt::from_biguint(Sign::Plus, a % m);
    let modulus = BigInt::from_biguint(Sign::Plus, m.clone());
    let egcd = a.extended_gcd(&modulus);
    if !egcd.gcd.is_one() {
        return None;
    }
    Some(reduce(&egcd.x, m))
}
