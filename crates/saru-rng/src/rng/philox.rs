//! Philox4x32-10 keyed permutation.
//!
//! Philox is the counter-based generator from Salmon et al., "Parallel Random
//! Numbers: As Easy as 1, 2, 3" (2011). It is a pure keyed bijection: a
//! 128-bit counter and a 64-bit key go in, four pseudorandom 32-bit words come
//! out. There is no internal state, which is what makes random access and
//! parallel generation trivial.
//!
//! Key properties:
//! - Stateless: output depends only on (counter, key)
//! - Statistically excellent: passes all BigCrush tests
//! - Branch-free integer arithmetic, well suited to GPU lanes

// Round multipliers and Weyl key-schedule constants from the Philox paper.
const PHILOX_M4X32_0: u32 = 0xD2511F53;
const PHILOX_M4X32_1: u32 = 0xCD9E8D57;
const PHILOX_W32_0: u32 = 0x9E3779B9;
const PHILOX_W32_1: u32 = 0xBB67AE85;

/// Single round of Philox mixing.
#[inline(always)]
fn philox_round(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let prod0 = (ctr[0] as u64).wrapping_mul(PHILOX_M4X32_0 as u64);
    let prod1 = (ctr[2] as u64).wrapping_mul(PHILOX_M4X32_1 as u64);

    [
        ((prod1 >> 32) as u32) ^ ctr[1] ^ key[0],
        prod1 as u32,
        ((prod0 >> 32) as u32) ^ ctr[3] ^ key[1],
        prod0 as u32,
    ]
}

/// Apply the Philox4x32-10 keyed bijection to a counter.
///
/// Ten mixing rounds with the key bumped by the Weyl constants between
/// rounds. Bit-compatible with the Random123 reference implementation, so
/// outputs can be checked against its published known-answer vectors.
#[inline]
#[must_use]
pub fn philox4x32(ctr: [u32; 4], key: [u32; 2]) -> [u32; 4] {
    let mut c = ctr;
    let mut k = key;

    for _ in 0..10 {
        c = philox_round(c, k);
        k[0] = k[0].wrapping_add(PHILOX_W32_0);
        k[1] = k[1].wrapping_add(PHILOX_W32_1);
    }

    c
}
