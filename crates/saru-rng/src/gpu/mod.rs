//! Device execution of Saru streams.
//!
//! The kernel source below is the device rendition of the exact host
//! algorithm: same Philox rounds, same normalization mappings, same counter
//! packing. Each GPU thread owns one `counter1` lane — thread `i` computes
//! the first draw of `Saru::new(seed1, seed2, i, counter2, counter3)` —
//! which is the same partitioning a host thread pool would use. Keeping one
//! source of truth per operation stops the host and device variants from
//! drifting apart.

#[cfg(feature = "cuda")]
mod cuda;

#[cfg(feature = "cuda")]
pub use cuda::*;

/// CUDA kernel source for Saru stream draws.
///
/// Mirrors the host side word for word: `philox4x32_10` matches
/// [`crate::rng::philox4x32`], `saru_u01f`/`saru_uneg11f` match
/// [`crate::rng::u01_f32`]/[`crate::rng::uneg11_f32`], and the fill kernels
/// pack the counter as `{0, counter3, counter2, lane}`.
pub const SARU_KERNEL_SOURCE: &str = r#"
// Philox4x32-10 constants
#define PHILOX_M0 0xD2511F53u
#define PHILOX_M1 0xCD9E8D57u
#define PHILOX_W0 0x9E3779B9u
#define PHILOX_W1 0xBB67AE85u

// Single Philox round
__device__ void philox_round(unsigned int* ctr, const unsigned int* key) {
    unsigned int lo0 = PHILOX_M0 * ctr[0];
    unsigned int hi0 = __umulhi(PHILOX_M0, ctr[0]);
    unsigned int lo1 = PHILOX_M1 * ctr[2];
    unsigned int hi1 = __umulhi(PHILOX_M1, ctr[2]);

    ctr[0] = hi1 ^ ctr[1] ^ key[0];
    ctr[1] = lo1;
    ctr[2] = hi0 ^ ctr[3] ^ key[1];
    ctr[3] = lo0;
}

// Bump key by the Weyl constants
__device__ void philox_bump_key(unsigned int* key) {
    key[0] += PHILOX_W0;
    key[1] += PHILOX_W1;
}

// Full Philox4x32-10 permutation
__device__ void philox4x32_10(unsigned int* ctr, unsigned int* key) {
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key); philox_bump_key(key);
    philox_round(ctr, key);
}

// Raw word to (0, 1): half-step-centered mantissa mapping, never 0, never 1
__device__ float saru_u01f(unsigned int x) {
    return ((float)(x >> 9) + 0.5f) * (1.0f / 8388608.0f);
}

// Raw word to [-1, 1], signed reading
__device__ float saru_uneg11f(unsigned int x) {
    return (float)(int)x * (1.0f / 2147483648.0f) + (1.0f / 4294967296.0f);
}

// First uniform draw of every counter1 lane in [0, n)
extern "C" __global__ void saru_fill_uniform(
    float* output,
    unsigned int n,
    unsigned int seed1,
    unsigned int seed2,
    unsigned int counter2,
    unsigned int counter3
) {
    unsigned int lane = blockIdx.x * blockDim.x + threadIdx.x;
    if (lane >= n) return;

    unsigned int ctr[4] = {0u, counter3, counter2, lane};
    unsigned int key[2] = {seed1, seed2};

    philox4x32_10(ctr, key);

    output[lane] = saru_u01f(ctr[0]);
}

// First normal draw of every counter1 lane: Box-Muller, cosine component
extern "C" __global__ void saru_fill_normal(
    float* output,
    unsigned int n,
    unsigned int seed1,
    unsigned int seed2,
    unsigned int counter2,
    unsigned int counter3
) {
    unsigned int lane = blockIdx.x * blockDim.x + threadIdx.x;
    if (lane >= n) return;

    unsigned int ctr[4] = {0u, counter3, counter2, lane};
    unsigned int key[2] = {seed1, seed2};

    philox4x32_10(ctr, key);

    // saru_u01f never returns 0, so the log is finite
    float theta = 3.14159265358979f * saru_uneg11f(ctr[0]);
    float r = sqrtf(-2.0f * logf(saru_u01f(ctr[1])));

    output[lane] = r * cosf(theta);
}
"#;
