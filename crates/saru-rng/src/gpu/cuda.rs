//! CUDA implementation of Saru stream fills.

use std::sync::Arc;

use cudarc::driver::{CudaContext, CudaFunction, CudaSlice, CudaStream, PushKernelArg};
use cudarc::nvrtc::compile_ptx;

use super::SARU_KERNEL_SOURCE;

/// Error type for device stream operations.
#[derive(Debug, thiserror::Error)]
pub enum GpuSaruError {
    /// CUDA driver error.
    #[error("CUDA error: {0}")]
    CudaError(String),
    /// Kernel compilation error.
    #[error("Compilation error: {0}")]
    CompilationError(String),
}

type Result<T> = std::result::Result<T, GpuSaruError>;

/// Saru stream draws on GPU lanes.
///
/// Holds the compiled fill kernels together with the key and fixed counter
/// words shared by every lane. A fill of length `n` assigns lane `i` the
/// stream `Saru::new(seed1, seed2, i, counter2, counter3)` and writes that
/// stream's first draw, so device output is reproducible from the same
/// decomposition the host uses.
pub struct GpuSaru {
    context: Arc<CudaContext>,
    stream: Arc<CudaStream>,
    fill_uniform: CudaFunction,
    fill_normal: CudaFunction,
    seeds: (u32, u32),
    counters: (u32, u32),
}

impl GpuSaru {
    /// Create a device stream generator with zero seeds and counters.
    pub fn new(device_ordinal: usize) -> Result<Self> {
        Self::with_seeds(device_ordinal, 0, 0)
    }

    /// Create a device stream generator with specific seed words.
    pub fn with_seeds(device_ordinal: usize, seed1: u32, seed2: u32) -> Result<Self> {
        let context = CudaContext::new(device_ordinal)
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;

        let stream = context.default_stream();

        let ptx = compile_ptx(SARU_KERNEL_SOURCE)
            .map_err(|e| GpuSaruError::CompilationError(e.to_string()))?;

        let module = context
            .load_module(ptx)
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;

        let fill_uniform = module
            .load_function("saru_fill_uniform")
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;

        let fill_normal = module
            .load_function("saru_fill_normal")
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;

        tracing::debug!(device = device_ordinal, "compiled saru device module");

        Ok(Self {
            context,
            stream,
            fill_uniform,
            fill_normal,
            seeds: (seed1, seed2),
            counters: (0, 0),
        })
    }

    /// Set the seed words shared by every lane.
    pub fn set_seeds(&mut self, seed1: u32, seed2: u32) {
        self.seeds = (seed1, seed2);
    }

    /// Set the fixed counter words (counter2, counter3) shared by every lane.
    ///
    /// Typically counter2 carries the time step and counter3 a purpose tag;
    /// the per-lane counter1 word is the lane index.
    pub fn set_counters(&mut self, counter2: u32, counter3: u32) {
        self.counters = (counter2, counter3);
    }

    /// Fill a device buffer with each lane's first uniform draw in [0, 1).
    pub fn fill_uniform(&self, output: &mut CudaSlice<f32>) -> Result<()> {
        self.launch(&self.fill_uniform, output)
    }

    /// Fill a device buffer with each lane's first standard normal draw.
    pub fn fill_normal(&self, output: &mut CudaSlice<f32>) -> Result<()> {
        self.launch(&self.fill_normal, output)
    }

    fn launch(&self, func: &CudaFunction, output: &mut CudaSlice<f32>) -> Result<()> {
        let n = output.len() as u32;
        let block_size = 256u32;
        let grid_size = n.div_ceil(block_size);

        tracing::trace!(n, grid_size, "launching saru fill kernel");

        // SAFETY: Kernel arguments match the compiled PTX signature. Device
        // pointers are valid and allocated with sufficient size.
        unsafe {
            self.stream
                .launch_builder(func)
                .arg(output)
                .arg(&n)
                .arg(&self.seeds.0)
                .arg(&self.seeds.1)
                .arg(&self.counters.0)
                .arg(&self.counters.1)
                .launch(cudarc::driver::LaunchConfig {
                    grid_dim: (grid_size, 1, 1),
                    block_dim: (block_size, 1, 1),
                    shared_mem_bytes: 0,
                })
                .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;
        }

        Ok(())
    }

    /// Generate each lane's first uniform draw and copy to host.
    pub fn generate_uniform(&self, n: usize) -> Result<Vec<f32>> {
        let mut output = self.alloc(n)?;
        self.fill_uniform(&mut output)?;
        self.dtoh(&output)
    }

    /// Generate each lane's first normal draw and copy to host.
    pub fn generate_normal(&self, n: usize) -> Result<Vec<f32>> {
        let mut output = self.alloc(n)?;
        self.fill_normal(&mut output)?;
        self.dtoh(&output)
    }

    fn alloc(&self, n: usize) -> Result<CudaSlice<f32>> {
        // SAFETY: cudarc's alloc returns properly aligned device memory of
        // the requested length.
        unsafe {
            self.stream
                .alloc::<f32>(n)
                .map_err(|e| GpuSaruError::CudaError(e.to_string()))
        }
    }

    fn dtoh(&self, slice: &CudaSlice<f32>) -> Result<Vec<f32>> {
        let mut host = vec![0.0f32; slice.len()];
        self.stream
            .memcpy_dtoh(slice, &mut host)
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))?;
        Ok(host)
    }

    /// Synchronize the stream.
    pub fn synchronize(&self) -> Result<()> {
        self.context
            .synchronize()
            .map_err(|e| GpuSaruError::CudaError(e.to_string()))
    }
}

/// Check if a CUDA device is available.
pub fn is_cuda_available() -> bool {
    std::panic::catch_unwind(|| {
        cudarc::driver::CudaContext::device_count()
            .map(|c| c > 0)
            .unwrap_or(false)
    })
    .unwrap_or(false)
}
