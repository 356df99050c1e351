//! Compile-time precision dispatch for draw operations.
//!
//! Generic draws like [`Saru::s`](super::Saru::s) and
//! [`Saru::normal`](super::Saru::normal) pick the single- or double-precision
//! extraction at compile time through this trait. The trait is sealed:
//! instantiating a draw at any type other than `f32` or `f64` is a build
//! error, not a runtime fallback.

use super::saru::Saru;
use super::uniform;

mod private {
    pub trait Sealed {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

/// Floating-point result types a [`Saru`] stream can produce.
///
/// Implemented for `f32` and `f64` only. Each method consumes exactly one
/// counter step of the stream, whatever the precision.
pub trait Variate: private::Sealed + Copy {
    /// Draw a uniform variate in [0, 1).
    fn uniform(rng: &mut Saru) -> Self;

    /// Draw a uniform variate in [a, b).
    fn uniform_range(rng: &mut Saru, a: Self, b: Self) -> Self;

    /// Draw a standard normal variate.
    fn normal(rng: &mut Saru) -> Self;

    /// Draw a pair of standard normal variates from one counter step.
    fn normal_pair(rng: &mut Saru) -> (Self, Self);
}

impl Variate for f32 {
    #[inline]
    fn uniform(rng: &mut Saru) -> f32 {
        rng.f()
    }

    #[inline]
    fn uniform_range(rng: &mut Saru, a: f32, b: f32) -> f32 {
        rng.f_range(a, b)
    }

    #[inline]
    fn normal(rng: &mut Saru) -> f32 {
        Self::normal_pair(rng).0
    }

    // Words 0 and 1 of a single block feed the transform.
    #[inline]
    fn normal_pair(rng: &mut Saru) -> (f32, f32) {
        let u = rng.block();
        uniform::box_muller_f32(u[0], u[1])
    }
}

impl Variate for f64 {
    #[inline]
    fn uniform(rng: &mut Saru) -> f64 {
        rng.d()
    }

    #[inline]
    fn uniform_range(rng: &mut Saru, a: f64, b: f64) -> f64 {
        rng.d_range(a, b)
    }

    #[inline]
    fn normal(rng: &mut Saru) -> f64 {
        Self::normal_pair(rng).0
    }

    // All four words of one block: (0,1) make the angle word, (2,3) the
    // radius word. Still a single counter step.
    #[inline]
    fn normal_pair(rng: &mut Saru) -> (f64, f64) {
        let u = rng.block();
        let angle = ((u[0] as u64) << 32) | u[1] as u64;
        let radius = ((u[2] as u64) << 32) | u[3] as u64;
        uniform::box_muller_f64(angle, radius)
    }
}
