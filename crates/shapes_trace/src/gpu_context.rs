//! Device/queue/output-texture bundle for the path-trace backend. Kept
//! separate from the backend's logical state (sort core, sample
//! accumulator, mesh residency) so that state stays constructible without
//! a `wgpu::Device` in tests.

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub output: wgpu::Texture,
}

impl GpuContext {
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, width: u32, height: u32) -> Self {
        let output = Self::make_output(&device, width, height);
        GpuContext { device, queue, output }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.output = Self::make_output(&self.device, width, height);
    }

    fn make_output(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
        device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shapes Trace Output"),
            size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::STORAGE_BINDING
                | wgpu::TextureUsages::TEXTURE_BINDING
                | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        })
    }
}
