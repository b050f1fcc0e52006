#![allow(dead_code)]

use std::cell::Cell;

use gpu_bootstrap::{GpuAdapter, GpuCapability, GpuHost, GpuOptions};

#[derive(Debug, PartialEq, Eq)]
pub struct FakeDevice(pub &'static str);

#[derive(Debug, thiserror::Error)]
#[error("device request rejected: {0}")]
pub struct DeviceRejected(pub &'static str);

#[derive(Debug)]
pub struct FakeAdapter {
    pub name: &'static str,
    device: Result<&'static str, &'static str>,
}

impl GpuAdapter for FakeAdapter {
    type Device = FakeDevice;
    type Error = DeviceRejected;

    fn describe(&self) -> String {
        self.name.to_string()
    }

    async fn request_device(&self, _options: &GpuOptions) -> Result<FakeDevice, DeviceRejected> {
        self.device.map(FakeDevice).map_err(DeviceRejected)
    }
}

/// Hands out at most one adapter.
pub struct FakeGpu {
    adapter: Cell<Option<FakeAdapter>>,
}

impl GpuCapability for FakeGpu {
    type Adapter = FakeAdapter;

    async fn request_adapter(&self, _options: &GpuOptions) -> Option<FakeAdapter> {
        self.adapter.take()
    }
}

pub struct FakeHost {
    gpu: Option<FakeGpu>,
}

impl GpuHost for FakeHost {
    type Gpu = FakeGpu;

    fn gpu(&self) -> Option<&FakeGpu> {
        self.gpu.as_ref()
    }
}

/// A host without GPU capability.
pub fn unsupported() -> FakeHost {
    FakeHost { gpu: None }
}

/// A host with GPU capability but no adapter.
pub fn no_adapter() -> FakeHost {
    FakeHost {
        gpu: Some(FakeGpu {
            adapter: Cell::new(None),
        }),
    }
}

/// A host whose adapter `adapter` creates device `device`.
pub fn working(adapter: &'static str, device: &'static str) -> FakeHost {
    with_adapter(adapter, Ok(device))
}

/// A host whose adapter `adapter` rejects the device request.
pub fn rejecting(adapter: &'static str, reason: &'static str) -> FakeHost {
    with_adapter(adapter, Err(reason))
}

fn with_adapter(name: &'static str, device: Result<&'static str, &'static str>) -> FakeHost {
    FakeHost {
        gpu: Some(FakeGpu {
            adapter: Cell::new(Some(FakeAdapter { name, device })),
        }),
    }
}
