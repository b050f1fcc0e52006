//! Acquires a WebGPU adapter and device from the host and publishes them to
//! the rest of the application.
//!
//! ```no_run
//! use gpu_bootstrap::{GpuOptions, WgpuHost, WgpuPublisher};
//!
//! # async fn run() -> Result<(), gpu_bootstrap::InitError> {
//! let mut publisher = WgpuPublisher::new();
//! let mut subscriber = publisher.subscribe();
//!
//! if publisher.initialize(&WgpuHost::from_env(), &GpuOptions::default()).await? {
//!     let gpu = subscriber.wait_for_device().await.unwrap();
//!     let _encoder = gpu.device.create_command_encoder(&Default::default());
//! }
//! # Ok(())
//! # }
//! ```

mod error;
mod wgpual;

pub use error::*;
pub use wgpual::*;

// wgpu re-exports
pub use wgpu::{Backends, PowerPreference};
