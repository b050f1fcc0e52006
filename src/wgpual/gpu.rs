use super::{GpuAdapter, GpuCapability, GpuHost, GpuPublisher};

/// Container for the GPU objects created from an adapter.
#[derive(Debug)]
pub struct GpuDevice {
    /// The WGPU device.
    pub device: wgpu::Device,
    /// The WGPU queue.
    pub queue: wgpu::Queue,
}

/// Publisher of the adapter and device acquired through a [`WgpuHost`].
pub type WgpuPublisher = GpuPublisher<wgpu::Adapter, GpuDevice>;

/// Controls when a newly acquired adapter becomes visible to subscribers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PublishPolicy {
    /// Publish the adapter as soon as it is acquired, before the device is
    /// requested. If the device request then fails, the adapter stays
    /// published while the device slot keeps its previous value.
    Eager,
    /// Publish the adapter and the device in a single update, only once both
    /// have been acquired. Subscribers never see the new adapter next to the
    /// previous device. A failed device request leaves both slots untouched.
    #[default]
    Atomic,
}

/// Parameters for when requesting a new GPU adapter and device.
#[derive(Clone, Debug)]
pub struct GpuOptions {
    /// Provides a **hint** to indicate which GPU to use. `LowPower` means to
    /// use an integrated GPU, while `HighPower` means to use a dedicated GPU.
    /// Default is `None` (provides no hint).
    pub power_preference: wgpu::PowerPreference,
    /// Only accept a fallback (software) adapter. Default is `false`.
    pub force_fallback_adapter: bool,
    /// Debug label of the device.
    pub label: Option<String>,
    /// Features the device must support. Default is none.
    pub required_features: wgpu::Features,
    /// Limits the device must support. Default is [`wgpu::Limits::default`].
    pub required_limits: wgpu::Limits,
    /// See [`PublishPolicy`]. Default is [`PublishPolicy::Atomic`].
    pub publish: PublishPolicy,
}

impl Default for GpuOptions {
    /// Returns the default GPU request parameters.
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::None,
            force_fallback_adapter: false,
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            publish: PublishPolicy::default(),
        }
    }
}

impl GpuOptions {
    /// Returns the default options, with the power preference taken from the
    /// `WGPU_POWER_PREF` environment variable when it is set.
    pub fn from_env() -> Self {
        Self {
            power_preference: wgpu::util::power_preference_from_env()
                .unwrap_or(wgpu::PowerPreference::None),
            ..Default::default()
        }
    }
}

/// A host backed by a WGPU instance.
///
/// The host exposes GPU capability only if at least one requested backend is
/// compiled into WGPU and, for the browser backend, the page exposes
/// `navigator.gpu`.
pub struct WgpuHost {
    instance: Option<wgpu::Instance>,
}

impl WgpuHost {
    /// Creates a new host using the specified backends.
    pub fn new(backends: wgpu::Backends) -> Self {
        let backends = backends & wgpu::Instance::enabled_backend_features();

        #[cfg(target_arch = "wasm32")]
        let backends = if backends.contains(wgpu::Backends::BROWSER_WEBGPU)
            && !browser_exposes_webgpu()
        {
            backends.difference(wgpu::Backends::BROWSER_WEBGPU)
        } else {
            backends
        };

        if backends.is_empty() {
            log::debug!("No usable WGPU backend among the requested ones");
            return Self { instance: None };
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends,
            ..Default::default()
        });

        Self {
            instance: Some(instance),
        }
    }

    /// Creates a new host using the backends named by the `WGPU_BACKEND`
    /// environment variable, or all backends when it is not set.
    pub fn from_env() -> Self {
        Self::new(wgpu::util::backend_bits_from_env().unwrap_or(wgpu::Backends::all()))
    }
}

/// Whether the global `navigator` object has a `gpu` property. Works in both
/// window and worker contexts.
#[cfg(target_arch = "wasm32")]
fn browser_exposes_webgpu() -> bool {
    let property = |target: &wasm_bindgen::JsValue, key: &str| {
        js_sys::Reflect::get(target, &key.into()).unwrap_or(wasm_bindgen::JsValue::UNDEFINED)
    };

    let navigator = property(&wasm_bindgen::JsValue::from(js_sys::global()), "navigator");
    if navigator.is_undefined() || navigator.is_null() {
        return false;
    }

    let gpu = property(&navigator, "gpu");
    !gpu.is_undefined() && !gpu.is_null()
}

impl Default for WgpuHost {
    fn default() -> Self {
        Self::new(wgpu::Backends::all())
    }
}

impl GpuHost for WgpuHost {
    type Gpu = wgpu::Instance;

    fn gpu(&self) -> Option<&wgpu::Instance> {
        self.instance.as_ref()
    }
}

impl GpuCapability for wgpu::Instance {
    type Adapter = wgpu::Adapter;

    async fn request_adapter(&self, options: &GpuOptions) -> Option<wgpu::Adapter> {
        let request = wgpu::RequestAdapterOptions {
            power_preference: options.power_preference,
            force_fallback_adapter: options.force_fallback_adapter,
            compatible_surface: None,
        };

        wgpu::Instance::request_adapter(self, &request).await
    }
}

impl GpuAdapter for wgpu::Adapter {
    type Device = GpuDevice;
    type Error = wgpu::RequestDeviceError;

    fn describe(&self) -> String {
        let info = self.get_info();
        format!("{} ({:?}, {:?})", info.name, info.backend, info.device_type)
    }

    async fn request_device(&self, options: &GpuOptions) -> Result<GpuDevice, Self::Error> {
        let descriptor = wgpu::DeviceDescriptor {
            label: options.label.as_deref(),
            required_features: options.required_features,
            required_limits: options.required_limits.clone(),
            memory_hints: Default::default(),
        };

        let (device, queue) = wgpu::Adapter::request_device(self, &descriptor, None).await?;

        Ok(GpuDevice { device, queue })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_without_backends_has_no_gpu() {
        let host = WgpuHost::new(wgpu::Backends::empty());

        assert!(host.gpu().is_none());
    }

    #[test]
    fn host_without_compiled_backends_has_no_gpu() {
        // Never compiled in outside wasm32.
        #[cfg(not(target_arch = "wasm32"))]
        assert!(WgpuHost::new(wgpu::Backends::BROWSER_WEBGPU).gpu().is_none());

        #[cfg(target_os = "linux")]
        assert!(WgpuHost::new(wgpu::Backends::DX12 | wgpu::Backends::METAL).gpu().is_none());
    }

    // Both variables are read in one test so no other test sees them half set.
    #[test]
    fn from_env_reads_backend_and_power_preference() {
        std::env::set_var("WGPU_BACKEND", "no-such-backend");
        std::env::set_var("WGPU_POWER_PREF", "high");

        let host = WgpuHost::from_env();
        let high = GpuOptions::from_env();

        std::env::set_var("WGPU_POWER_PREF", "low");
        let low = GpuOptions::from_env();

        std::env::remove_var("WGPU_BACKEND");
        std::env::remove_var("WGPU_POWER_PREF");
        let unset = GpuOptions::from_env();

        assert!(host.gpu().is_none());
        assert_eq!(high.power_preference, wgpu::PowerPreference::HighPerformance);
        assert_eq!(high.publish, PublishPolicy::Atomic);
        assert_eq!(low.power_preference, wgpu::PowerPreference::LowPower);
        assert_eq!(unset.power_preference, wgpu::PowerPreference::None);
    }

    #[test]
    fn default_options_publish_atomically() {
        let options = GpuOptions::default();

        assert_eq!(options.publish, PublishPolicy::Atomic);
        assert_eq!(options.power_preference, wgpu::PowerPreference::None);
        assert!(!options.force_fallback_adapter);
        assert!(options.required_features.is_empty());
    }
}
