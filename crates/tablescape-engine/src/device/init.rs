/// Initialization parameters for the headless GPU device.
///
/// Keep this structure minimal. Texture upload is the only GPU work done here,
/// so no surface or present configuration is needed.
#[derive(Debug, Clone)]
pub struct GpuInit {
    /// Adapter preference.
    pub power_preference: wgpu::PowerPreference,

    /// Required wgpu features. Texture upload needs none.
    pub required_features: wgpu::Features,

    /// Limits requested from the adapter/device.
    ///
    /// Downlevel defaults keep the device creatable on GL-class adapters.
    pub required_limits: wgpu::Limits,

    /// Allocation strategy hint.
    pub memory_hints: wgpu::MemoryHints,
}

impl Default for GpuInit {
    fn default() -> Self {
        Self {
            power_preference: wgpu::PowerPreference::HighPerformance,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::downlevel_defaults(),
            memory_hints: wgpu::MemoryHints::Performance,
        }
    }
}
