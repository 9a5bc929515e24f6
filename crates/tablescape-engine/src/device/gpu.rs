use super::{BackendError, GpuInit};

/// Owns the wgpu core objects for headless work.
///
/// There is no surface: the scene prepares GPU resources and packs per-draw
/// state, while presentation belongs to whoever owns the window.
pub struct Gpu {
    /// Selected adapter.
    adapter: wgpu::Adapter,

    /// Logical device.
    device: wgpu::Device,

    /// Command queue.
    queue: wgpu::Queue,
}

impl Gpu {
    /// Creates a headless GPU context.
    ///
    /// Adapter/device acquisition is asynchronous under wgpu.
    pub async fn new(init: GpuInit) -> Result<Self, BackendError> {
        let GpuInit {
            power_preference,
            required_features,
            required_limits,
            memory_hints,
        } = init;

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference,
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .map_err(|err| BackendError::NoAdapter(err.to_string()))?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tablescape device"),
                required_features,
                required_limits,
                experimental_features: wgpu::ExperimentalFeatures::disabled(),
                memory_hints,
                trace: wgpu::Trace::Off,
            })
            .await
            .map_err(|err| BackendError::DeviceRequest(err.to_string()))?;

        Ok(Gpu {
            adapter,
            device,
            queue,
        })
    }

    /// Blocking wrapper around [`Gpu::new`].
    pub fn new_blocking(init: GpuInit) -> Result<Self, BackendError> {
        pollster::block_on(Self::new(init))
    }

    #[inline]
    pub fn adapter(&self) -> &wgpu::Adapter {
        &self.adapter
    }

    #[inline]
    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    #[inline]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.queue
    }
}
