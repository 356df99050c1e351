//! Counter-based random number generation.
//!
//! The pieces compose bottom-up:
//! - [`philox4x32`]: the keyed permutation, a pure (counter, key) bijection
//! - [`u01_f32`]/[`u01_f64`]/[`uneg11_f32`]/[`uneg11_f64`]: raw words to
//!   floating intervals
//! - [`Saru`]: the stream wrapper the simulation actually holds
//! - [`Variate`]: compile-time f32/f64 dispatch for the generic draws

mod philox;
mod saru;
mod traits;
mod uniform;

pub use philox::philox4x32;
pub use saru::Saru;
pub use traits::Variate;
pub use uniform::{box_muller_f32, box_muller_f64, u01_f32, u01_f64, uneg11_f32, uneg11_f64};
