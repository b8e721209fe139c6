use criterion::{black_box, criterion_group, criterion_main, Criterion};
use num_bigint::BigUint;
use pairing_field::{Field, FieldElement, Irreducible, PrimeField, QuadraticField};
use rand::rngs::StdRng;
use rand::SeedableRng;

// 2^127 - 1, prime and ≡ 3 (mod 4)
fn mersenne_127() -> BigUint {
    (BigUint::from(1u32) << 127u32) - 1u32
}

fn bench_fp_mul(c: &mut Criterion) {
    let field = PrimeField::new(mersenne_127()).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let a = field.random_element(&mut rng);
    let b = field.random_element(&mut rng);
    c.bench_function("fp_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a.clone()) * black_box(&b)))
    });
}

fn bench_fp2_mul(c: &mut Criterion) {
    let field = QuadraticField::new(mersenne_127(), Irreducible::XSquarePlusOne).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let a = field.random_element(&mut rng);
    let b = field.random_element(&mut rng);
    c.bench_function("fp2_mul", |bencher| {
        bencher.iter(|| black_box(black_box(a.clone()) * black_box(&b)))
    });
}

fn bench_fp2_inverse(c: &mut Criterion) {
    let field = QuadraticField::new(mersenne_127(), Irreducible::XSquarePlusOne).unwrap();
    let mut rng = StdRng::seed_from_u64(42);
    let a = field.random_element(&mut rng);
    c.bench_function("fp2_inverse", |bencher| {
        bencher.iter(|| black_box(black_box(&a).inverse()))
    });
}

criterion_group!(benches, bench_fp_mul, bench_fp2_mul, bench_fp2_inverse);
criterion_main!(benches);
