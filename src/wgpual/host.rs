use std::{error::Error, future::Future};

use super::GpuOptions;

/// The hosting environment's top-level capability object.
///
/// A host may or may not expose GPU capability. When it does, [`gpu`] returns
/// the object through which adapters are requested.
///
/// [`gpu`]: GpuHost::gpu
pub trait GpuHost {
    /// The GPU sub-capability of this host.
    type Gpu: GpuCapability;

    /// Returns the GPU sub-capability, or `None` if the host does not support
    /// WebGPU.
    fn gpu(&self) -> Option<&Self::Gpu>;
}

/// GPU capability of a host, i.e. the thing adapters are requested from.
pub trait GpuCapability {
    /// The adapter handle produced by this capability.
    type Adapter: GpuAdapter;

    /// Requests an adapter matching `options`.
    ///
    /// Resolves to `None` when no adapter matches. Absence is not an error.
    fn request_adapter(&self, options: &GpuOptions) -> impl Future<Output = Option<Self::Adapter>>;
}

/// A GPU adapter, from which a device is requested.
pub trait GpuAdapter {
    /// The device handle produced by this adapter.
    type Device;
    /// The failure reported by [`request_device`](GpuAdapter::request_device).
    type Error: Error + Send + Sync + 'static;

    /// A human readable description of the adapter, used in diagnostics.
    fn describe(&self) -> String;

    /// Requests a device from this adapter.
    fn request_device(
        &self,
        options: &GpuOptions,
    ) -> impl Future<Output = Result<Self::Device, Self::Error>>;
}
