use std::error::Error;

/// Reasons a GPU initialization attempt can fail.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// The host does not expose GPU capability at all.
    #[error("WebGPU is not supported by this host")]
    CapabilityUnavailable,

    /// The host supports WebGPU, but no adapter matched the request.
    #[error("No GPU adapter found")]
    AdapterUnavailable,

    /// The adapter refused to create a device.
    #[error("Failed to request GPU device: {0}")]
    DeviceRequest(#[source] Box<dyn Error + Send + Sync>),
}

impl InitError {
    /// Whether this is one of the "unsupported/unavailable" outcomes, as
    /// opposed to a failure raised by the host while creating the device.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::CapabilityUnavailable | Self::AdapterUnavailable)
    }
}

/// Returned when waiting on a GPU state slot whose publisher is gone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("GPU state publisher has been dropped")]
pub struct SlotClosed;
