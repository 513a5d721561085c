use criterion::{black_box, criterion_group, criterion_main, Criterion};
use modexp::{mod_exp_bytes, BigIntPool};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn rsa_sized_operands() -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    let mut modulus = vec![0u8; 128];
    rng.fill(modulus.as_mut_slice());
    modulus[0] |= 0x80;
    modulus[127] |= 0x01;
    let mut base = vec![0u8; 128];
    rng.fill(base.as_mut_slice());
    let exponent = vec![0x01, 0x00, 0x01];
    (base, exponent, modulus)
}

fn bench_modexp(c: &mut Criterion) {
    let (base, exponent, modulus) = rsa_sized_operands();

    c.bench_function("mod_exp_bytes 1024-bit", |b| {
        b.iter(|| mod_exp_bytes(black_box(&base), black_box(&exponent), black_box(&modulus)))
    });

    let pool = BigIntPool::new();
    c.bench_function("compute_pooled 1024-bit", |b| {
        b.iter(|| pool.compute_pooled(black_box(&base), black_box(&exponent), black_box(&modulus)))
    });
}

criterion_group!(benches, bench_modexp);
criterion_main!(benches);
