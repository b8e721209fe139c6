//! Group-law properties checked on randomly drawn points.

use num_bigint::{BigInt, BigUint};
use pairing_field::{Field, FieldElement, Irreducible, PrimeField, QuadraticField};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::root::{cube_root, modular_square_root, SquareRoot};
use crate::{Curve, Point, SearchBounds, WindowedArithmetic};

const SAMPLES: usize = 16;

fn large_prime_curve() -> Curve<PrimeField> {
    // 2^61 - 1, a Mersenne prime ≡ 3 (mod 4)
    let field = PrimeField::new((BigUint::from(1u32) << 61u32) - 1u32).unwrap();
    Curve::new(field.clone(), field.from_i64(-3), field.from_i64(7))
}

fn tonelli_curve() -> Curve<PrimeField> {
    // 1_000_033 ≡ 1 (mod 8), roots go through Tonelli-Shanks
    let field = PrimeField::from_u64(1_000_033).unwrap();
    Curve::new(field.clone(), field.from_i64(5), field.from_i64(11))
}

fn extension_curve() -> Curve<QuadraticField> {
    // 17 ≡ 1 (mod 4) and 17 ≡ 2 (mod 3)
    let field = QuadraticField::from_u64(17, Irreducible::XSquarePlusXPlusOne).unwrap();
    Curve::new(field.clone(), field.from_i64(2), field.from_i64(5))
}

fn check_group_axioms<F: Field>(curve: &Curve<F>, rng: &mut StdRng)
where
    F::Elem: SquareRoot,
{
    let o = curve.identity();
    for _ in 0..SAMPLES {
        let p = curve.random_point(rng).unwrap();
        let q = curve.random_point(rng).unwrap();
        let r = curve.random_point(rng).unwrap();

        assert_eq!(&p + &o, p);
        assert_eq!(&o + &p, p);
        assert!((&p + &(-&p)).is_infinity());
        assert_eq!(&p + &q, &q + &p);
        assert_eq!(&(&p + &q) + &r, &p + &(&q + &r));
        assert_eq!(&(&p - &q) + &q, p);

        assert!(curve.contains(&(&p + &q)));
        assert!(curve.contains(&-&p));
        assert!(curve.contains(&p.double()));
    }
}

#[test]
fn test_group_axioms_large_prime() {
    let mut rng = StdRng::seed_from_u64(42);
    check_group_axioms(&large_prime_curve(), &mut rng);
}

#[test]
fn test_group_axioms_tonelli_shanks_field() {
    let mut rng = StdRng::seed_from_u64(42);
    check_group_axioms(&tonelli_curve(), &mut rng);
}

#[test]
fn test_group_axioms_extension_field() {
    let mut rng = StdRng::seed_from_u64(42);
    check_group_axioms(&extension_curve(), &mut rng);
}

#[test]
fn test_scalar_mul_matches_repeated_addition() {
    let mut rng = StdRng::seed_from_u64(42);
    let curve = tonelli_curve();
    let p = curve.random_point(&mut rng).unwrap();

    let mut expected = curve.identity();
    for k in 0..40i64 {
        assert_eq!(p.mul_i64(k), expected, "k = {k}");
        assert_eq!(p.mul_i64(-k), -&expected, "k = -{k}");
        expected = &expected + &p;
    }
}

#[test]
fn test_scalar_mul_distributes() {
    let mut rng = StdRng::seed_from_u64(7);
    let curve = large_prime_curve();
    let p = curve.random_point(&mut rng).unwrap();

    for _ in 0..SAMPLES {
        let a = BigInt::from(rng.random::<u32>());
        let b = BigInt::from(rng.random::<u32>());
        let lhs = p.scalar_mul(&(&a + &b));
        let rhs = &p.scalar_mul(&a) + &p.scalar_mul(&b);
        assert_eq!(lhs, rhs);
        assert!(curve.contains(&lhs));
    }
}

#[test]
fn test_arithmetic_strategies_agree() {
    let mut rng = StdRng::seed_from_u64(42);
    let projective = extension_curve();
    let windowed = extension_curve().with_arithmetic(WindowedArithmetic::new());

    for _ in 0..SAMPLES {
        let p = projective.random_point(&mut rng).unwrap();
        let q = p.regroup(&windowed).unwrap();
        let k = BigInt::from(rng.random::<u64>()) - BigInt::from(u64::MAX / 2);

        let expected = p.scalar_mul(&k);
        let actual = q.scalar_mul(&k);
        assert_eq!(actual.coordinates(), expected.coordinates());
    }
}

#[test]
fn test_f11_scenario() {
    let field = PrimeField::from_u64(11).unwrap();
    let curve = Curve::new(field.clone(), field.zero(), field.one());
    let p = curve.point(field.from_i64(2), field.from_i64(3)).unwrap();

    // tangent slope 3 * 2^2 / (2 * 3) = 2
    let lambda = p.line_coeff(&p).unwrap();
    let x3 = lambda.square() - &field.from_i64(4);
    let y3 = lambda * &(field.from_i64(2) - &x3) - &field.from_i64(3);
    let doubled = p.mul_i64(2);
    assert_eq!(doubled, curve.point(x3, y3).unwrap());
    assert!(curve.contains(&doubled));

    let order = p.order().unwrap();
    assert_eq!(order, 6);
    let mut acc: Point<'_, PrimeField> = p.clone();
    for _ in 1..order {
        assert!(!acc.is_infinity());
        acc = &acc + &p;
    }
    assert!(acc.is_infinity());
}

#[test]
fn test_order_divides_group_order() {
    // y^2 = x^3 + 1 over F_11 is supersingular with 12 points
    let field = PrimeField::from_u64(11).unwrap();
    let curve = Curve::new(field.clone(), field.zero(), field.one());
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..SAMPLES {
        let p = curve.random_point(&mut rng).unwrap();
        let n = p.order().unwrap();
        assert_eq!(12 % n, 0);
        assert!(p.mul_i64(n as i64).is_infinity());
    }
}

#[test]
fn test_j_invariant_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    let field = PrimeField::from_u64(1_000_003).unwrap();
    for _ in 0..SAMPLES {
        let j0 = field.random_element(&mut rng);
        let curve = Curve::from_j_invariant(field.clone(), &j0, &mut rng).unwrap();
        assert_eq!(curve.j_invariant().unwrap(), j0);
    }
    for j0 in [0, 1728] {
        let j0 = field.from_i64(j0);
        let curve = Curve::from_j_invariant(field.clone(), &j0, &mut rng).unwrap();
        assert_eq!(curve.j_invariant().unwrap(), j0);
    }

    let extension = QuadraticField::from_u64(17, Irreducible::XSquarePlusXPlusOne).unwrap();
    let j0 = extension.from_components(&[BigInt::from(3), BigInt::from(9)]).unwrap();
    let curve = Curve::from_j_invariant(extension, &j0, &mut rng).unwrap();
    assert_eq!(curve.j_invariant().unwrap(), j0);
}

#[test]
fn test_square_roots_modulo_random_primes() {
    let mut rng = StdRng::seed_from_u64(42);
    let bounds = SearchBounds::default();
    let primes = [1_000_003u64, 1_000_033, 998_244_353, 2_147_483_647];

    for &p in &primes {
        let m = BigUint::from(p);
        for _ in 0..SAMPLES {
            let r = BigUint::from(rng.random_range(1..p));
            let a = (&r * &r) % &m;
            let roots = modular_square_root(&a, &m, &mut rng, &bounds).unwrap();
            assert_eq!(roots.len(), 2);
            assert_eq!(&roots[0] + &roots[1], m);
            assert!(roots.contains(&r));
        }
    }
}

#[test]
fn test_cube_roots_round_trip() {
    let mut rng = StdRng::seed_from_u64(42);
    let bounds = SearchBounds::default();
    let field = PrimeField::from_u64(1_000_003).unwrap();
    let three = BigUint::from(3u32);

    for _ in 0..SAMPLES {
        let y = field.random_element(&mut rng);
        let x = y.pow(&three);
        let roots = cube_root(&field, &x, &mut rng, &bounds).unwrap();
        assert!(roots.contains(&y));
        for r in roots {
            assert_eq!(r.pow(&three), x);
        }
    }
}

#[test]
fn test_distortion_map_keeps_points_on_curve() {
    let mut rng = StdRng::seed_from_u64(42);
    // y^2 = x^3 + 1 over F_{17^2} with w^2 + w + 1 = 0
    let field = QuadraticField::from_u64(17, Irreducible::XSquarePlusXPlusOne).unwrap();
    let curve = Curve::new(field.clone(), field.zero(), field.one());

    for _ in 0..SAMPLES {
        let p = curve.random_point(&mut rng).unwrap();
        let image = p.distortion_map().unwrap();
        assert!(curve.contains(&image));
        assert_eq!(image.order(), p.order());
    }
}
