use std::{fmt, sync::Arc};

use super::{GpuAdapter, GpuCapability, GpuHost, GpuOptions, GpuPublisher, PublishPolicy};
use crate::InitError;

/// The adapter and device acquired by a successful initialization.
pub struct GpuContext<A, D> {
    /// The adapter the device was created from.
    pub adapter: Arc<A>,
    /// The device.
    pub device: Arc<D>,
}

impl<A, D> Clone for GpuContext<A, D> {
    fn clone(&self) -> Self {
        Self {
            adapter: Arc::clone(&self.adapter),
            device: Arc::clone(&self.device),
        }
    }
}

impl<A: fmt::Debug, D: fmt::Debug> fmt::Debug for GpuContext<A, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GpuContext")
            .field("adapter", &self.adapter)
            .field("device", &self.device)
            .finish()
    }
}

impl<A, D> GpuPublisher<A, D>
where
    A: GpuAdapter<Device = D>,
{
    /// Probes `host` for GPU support, requests an adapter and then a device,
    /// and publishes both.
    ///
    /// Returns `Ok(true)` once both are published. When the host has no GPU
    /// capability or no adapter is found, the failure is logged, nothing is
    /// published and `Ok(false)` is returned. A failed device request is
    /// returned as [`InitError::DeviceRequest`]; what is left published in
    /// that case depends on [`GpuOptions::publish`].
    pub async fn initialize<H>(&mut self, host: &H, options: &GpuOptions) -> Result<bool, InitError>
    where
        H: GpuHost,
        H::Gpu: GpuCapability<Adapter = A>,
    {
        match self.try_initialize(host, options).await {
            Ok(_) => Ok(true),
            Err(error) if error.is_unavailable() => {
                log::error!("{error}");
                Ok(false)
            }
            Err(error) => Err(error),
        }
    }

    /// Like [`initialize`](Self::initialize), but reports every failure as an
    /// error and returns the acquired handles.
    pub async fn try_initialize<H>(
        &mut self,
        host: &H,
        options: &GpuOptions,
    ) -> Result<GpuContext<A, D>, InitError>
    where
        H: GpuHost,
        H::Gpu: GpuCapability<Adapter = A>,
    {
        let gpu = host.gpu().ok_or(InitError::CapabilityUnavailable)?;

        log::debug!(
            "Requesting GPU adapter (power preference: {:?}, fallback: {})",
            options.power_preference,
            options.force_fallback_adapter
        );
        let adapter = gpu
            .request_adapter(options)
            .await
            .map(Arc::new)
            .ok_or(InitError::AdapterUnavailable)?;

        if options.publish == PublishPolicy::Eager {
            self.publish_adapter(Arc::clone(&adapter));
        }

        log::debug!("Requesting GPU device from {}", adapter.describe());
        let device = adapter
            .request_device(options)
            .await
            .map(Arc::new)
            .map_err(|error| InitError::DeviceRequest(Box::new(error)))?;

        match options.publish {
            PublishPolicy::Eager => self.publish_device(Arc::clone(&device)),
            PublishPolicy::Atomic => self.publish(Arc::clone(&adapter), Arc::clone(&device)),
        }

        log::info!("Acquired GPU device from {}", adapter.describe());

        Ok(GpuContext { adapter, device })
    }
}
