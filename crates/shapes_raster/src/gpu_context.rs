//! The thin wgpu device/queue/output-texture bundle a [`crate::backend::RasterBackend`]
//! draws into. Kept separate from the backend's logical state (sort core,
//! resource pools, CSM) so that state stays constructible and testable
//! without an actual `wgpu::Device`.

pub struct GpuContext {
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub output: wgpu::Texture,
    pub msaa_samples: u32,
    /// The multisampled color target drawn into each frame when
    /// `msaa_samples > 1`. `None` for a single-sample context. Resolved
    /// into `output` via `resolve_target` on the color attachment, the
    /// same mechanism the teacher's forward pass uses (spec §4.9:
    /// "blit the multisampled FBO into a standard texture").
    msaa_color: Option<wgpu::Texture>,
}

fn make_output_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Shapes Output Color"),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT
            | wgpu::TextureUsages::TEXTURE_BINDING
            | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

fn make_msaa_color_texture(device: &wgpu::Device, width: u32, height: u32, samples: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Shapes MSAA Color"),
        size: wgpu::Extent3d { width, height, depth_or_array_layers: 1 },
        mip_level_count: 1,
        sample_count: samples,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    })
}

impl GpuContext {
    #[must_use]
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, width: u32, height: u32, msaa_samples: u32) -> Self {
        let output = make_output_texture(&device, width, height);
        let msaa_color = (msaa_samples > 1).then(|| make_msaa_color_texture(&device, width, height, msaa_samples));
        GpuContext { device, queue, output, msaa_samples, msaa_color }
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.output = make_output_texture(&self.device, width, height);
        if self.msaa_samples > 1 {
            self.msaa_color = Some(make_msaa_color_texture(&self.device, width, height, self.msaa_samples));
        }
    }

    /// The color attachment / resolve-target pair the beauty pass should
    /// bind (spec §4.9 MSAA resolve). When multisampling is off, this
    /// draws straight into `output` and there is no resolve target.
    #[must_use]
    pub fn color_attachment_views(&self) -> (wgpu::TextureView, Option<wgpu::TextureView>) {
        let output_view = self.output.create_view(&wgpu::TextureViewDescriptor::default());
        match &self.msaa_color {
            Some(msaa) => (msaa.create_view(&wgpu::TextureViewDescriptor::default()), Some(output_view)),
            None => (output_view, None),
        }
    }
}
