//! Per-particle random kicks that do not depend on work partitioning.
//!
//! Each (particle, step) pair owns a stream built from its indices, so any
//! worker can compute any particle's kick without coordination. The demo
//! computes one step of kicks serially and with several thread counts and
//! checks the results are bit-identical.

use std::thread;

use saru_rng::Saru;

const SEED: u32 = 0x00C0FFEE;
/// Purpose tag keeping kick randomness disjoint from other per-particle use.
const TAG_KICK: u32 = 1;
const N_PARTICLES: usize = 1 << 16;
const STEP: u32 = 1000;

fn kick(particle: u32, step: u32) -> f64 {
    Saru::new(SEED, 0, particle, step, TAG_KICK).normal()
}

fn serial_kicks() -> Vec<f64> {
    (0..N_PARTICLES).map(|p| kick(p as u32, STEP)).collect()
}

fn partitioned_kicks(workers: usize) -> Vec<f64> {
    let chunk = N_PARTICLES.div_ceil(workers);
    let mut kicks = vec![0.0f64; N_PARTICLES];

    thread::scope(|scope| {
        for (w, slice) in kicks.chunks_mut(chunk).enumerate() {
            scope.spawn(move || {
                let base = (w * chunk) as u32;
                for (i, v) in slice.iter_mut().enumerate() {
                    *v = kick(base + i as u32, STEP);
                }
            });
        }
    });

    kicks
}

fn main() {
    let reference = serial_kicks();

    for workers in [2, 3, 7, 16] {
        let kicks = partitioned_kicks(workers);
        assert_eq!(kicks, reference, "{} workers diverged", workers);
        println!("{:2} workers: bit-identical kicks", workers);
    }

    let mean = reference.iter().sum::<f64>() / reference.len() as f64;
    println!(
        "{} particles, step {}: mean kick {:+.6}",
        N_PARTICLES, STEP, mean
    );
}
