//! Looks for a GPU through WGPU and reports what was acquired.
//!
//! Honors `WGPU_BACKEND` and `WGPU_POWER_PREF`. Run with `RUST_LOG=debug` to
//! see each request.

use gpu_bootstrap::{GpuOptions, InitError, WgpuHost, WgpuPublisher};

fn main() -> Result<(), InitError> {
    env_logger::init();

    let host = WgpuHost::from_env();
    let options = GpuOptions::from_env();
    let mut publisher = WgpuPublisher::new();
    let subscriber = publisher.subscribe();

    if !pollster::block_on(publisher.initialize(&host, &options))? {
        std::process::exit(1);
    }

    if let (Some(adapter), Some(gpu)) = (subscriber.adapter(), subscriber.device()) {
        let info = adapter.get_info();
        println!("Adapter: {} ({:?}, {:?})", info.name, info.backend, info.device_type);
        println!("Driver: {} {}", info.driver, info.driver_info);
        println!("Max texture size: {}", gpu.device.limits().max_texture_dimension_2d);
    }

    Ok(())
}
