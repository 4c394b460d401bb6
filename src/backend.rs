//! Backend abstraction - Multi-backend support
//!
//! The NdArray (CPU) backend is the portable default and is what the test
//! suite runs on. GPU execution is opt-in through the `cuda` or `wgpu`
//! features.

use burn::backend::Autodiff;

#[cfg(feature = "cuda")]
pub type DefaultBackend = burn_cuda::Cuda;

#[cfg(all(feature = "wgpu", not(feature = "cuda")))]
pub type DefaultBackend = burn::backend::Wgpu;

#[cfg(all(feature = "ndarray", not(any(feature = "cuda", feature = "wgpu"))))]
pub type DefaultBackend = burn_ndarray::NdArray;

#[cfg(not(any(feature = "cuda", feature = "wgpu", feature = "ndarray")))]
compile_error!("At least one backend (cuda, wgpu, or ndarray) must be enabled!");

/// Autodiff wrapper over the default backend.
///
/// This is the backend an external training loop drives. It is also the
/// backend on which dropout is live: on plain inference backends dropout is
/// the identity, so the train/eval mode switch is the choice of backend.
pub type TrainingBackend = Autodiff<DefaultBackend>;

/// Get the default device
pub fn default_device() -> <DefaultBackend as burn::tensor::backend::Backend>::Device {
    <DefaultBackend as burn::tensor::backend::Backend>::Device::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    #[cfg(feature = "cuda")]
    {
        "CUDA (GPU)"
    }

    #[cfg(all(feature = "wgpu", not(feature = "cuda")))]
    {
        "wgpu (GPU)"
    }

    #[cfg(all(feature = "ndarray", not(any(feature = "cuda", feature = "wgpu"))))]
    {
        "NdArray (CPU)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_name() {
        assert!(!backend_name().is_empty());
    }

    #[test]
    fn test_default_device() {
        // Device construction must not panic
        let _ = default_device();
    }
}
