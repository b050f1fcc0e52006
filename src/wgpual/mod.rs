//! WebGPU Abstraction Layer (WGPUAL).
//!
//! This layer hides how the host is asked for GPU objects, so the rest of the
//! application only deals with the adapter and device it is handed, either
//! directly through [`GpuContext`] or by subscribing to a [`GpuPublisher`].

mod gpu;
mod host;
mod init;
mod store;

pub use gpu::*;
pub use host::*;
pub use init::*;
pub use store::*;
