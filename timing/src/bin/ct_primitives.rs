//! Constant-time verification for the compare and select helpers.
//!
//! Run with: `cargo run --release -p kyvern-timing --bin ct_primitives`

use dudect_bencher::rand::{Rng, RngCore};
use dudect_bencher::{ctbench_main, BenchRng, Class, CtRunner};
use kyvern_core::ct::{ct_compare, ct_select};
use kyvern_core::subtle::Choice;

const LEN: usize = 1088;
const ITERATIONS: usize = 100_000;

/// Left: equal buffers. Right: buffers differing in the first byte, which
/// a short-circuiting comparison would notice immediately.
fn bench_compare(runner: &mut CtRunner, rng: &mut BenchRng) {
    let mut a = vec![0u8; LEN];
    rng.fill_bytes(&mut a);
    let equal = a.clone();
    let mut differ = a.clone();
    differ[0] ^= 1;

    for _ in 0..ITERATIONS {
        let class = if rng.gen::<bool>() { Class::Left } else { Class::Right };
        let b = match class {
            Class::Left => &equal,
            Class::Right => &differ,
        };
        runner.run_one(class, || {
            let _ = ct_compare(&a, b);
        });
    }
}

/// Left: selection keeps the destination. Right: selection overwrites it.
fn bench_select(runner: &mut CtRunner, rng: &mut BenchRng) {
    let mut src = [0u8; 32];
    rng.fill_bytes(&mut src);

    for _ in 0..ITERATIONS {
        let class = if rng.gen::<bool>() { Class::Left } else { Class::Right };
        let fail = match class {
            Class::Left => Choice::from(0),
            Class::Right => Choice::from(1),
        };
        runner.run_one(class, || {
            let mut dst = [0u8; 32];
            ct_select(&mut dst, &src, fail);
            dst
        });
    }
}

ctbench_main!(bench_compare, bench_select);
