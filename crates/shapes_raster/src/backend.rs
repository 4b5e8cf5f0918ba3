//! The wgpu rasterizer backend (spec §4.7, component G) — composes the
//! state-sort core, the three resource pools, the instance stream, and
//! CSM shadow state into one [`shapes_render::Backend`] implementation
//! the coordinator (§4.9) can drive without knowing it's a rasterizer.

use std::io;
use std::path::Path;

use glam::Mat4;
use shapes_render::{AssetResolver, Backend, RenderBase, ShapeSource, SortCore};
use shapes_resources::ShapeBuffer;

use crate::beauty_pass::{build_draw_list, DrawCommand};
use crate::csm;
use crate::gpu_context::GpuContext;
use crate::instance_stream::InstanceStream;
use crate::particle::ParticleStream;
use crate::resource_pools::{LightPool, MaterialPool, TexturePool};

/// Cascade-split configuration (spec §4.7 step 1's `lambda`, plus cascade
/// count and the far-plane override used for the shadow frustum).
#[derive(Clone, Copy, Debug)]
pub struct CsmConfig {
    pub cascade_count: usize,
    pub lambda: f32,
    pub shadow_far: f32,
}

impl Default for CsmConfig {
    fn default() -> Self {
        CsmConfig { cascade_count: 4, lambda: 0.5, shadow_far: 200.0 }
    }
}

/// Borrows a backend's own pools as the [`AssetResolver`] `RenderBase`
/// needs, so resolution reads straight out of whatever is already
/// resident rather than duplicating pool state.
struct PoolResolver<'a> {
    materials: &'a MaterialPool,
    textures: &'a TexturePool,
}

impl AssetResolver for PoolResolver<'_> {
    fn material_backend_index(&self, material_asset_id: i32) -> Option<u16> {
        self.materials.slot_of(material_asset_id)
    }

    fn shader_for_material(&self, material_asset_id: i32) -> Option<i32> {
        self.materials.shader_of(material_asset_id)
    }

    fn texture_backend_index(&self, texture_asset_id: i32) -> Option<u16> {
        self.textures.slot_of(texture_asset_id)
    }
}

pub struct RasterBackend {
    output_id: i32,
    gpu: Option<GpuContext>,
    sort: SortCore,
    render_base: RenderBase,
    resolved_root: ShapeBuffer,
    textures: TexturePool,
    materials: MaterialPool,
    lights: LightPool,
    instances: InstanceStream,
    particles: ParticleStream,
    csm_config: CsmConfig,
    csm_splits: csm::CascadeSplits,
    csm_far_bounds: csm::CascadeSplits,
    dirty_all: bool,
}

impl RasterBackend {
    #[must_use]
    pub fn new(output_id: i32) -> Self {
        RasterBackend {
            output_id,
            gpu: None,
            sort: SortCore::new(),
            render_base: RenderBase::new(),
            resolved_root: ShapeBuffer::new(),
            textures: TexturePool::new(),
            materials: MaterialPool::new(),
            lights: LightPool::new(),
            instances: InstanceStream::new(),
            particles: ParticleStream::new(),
            csm_config: CsmConfig::default(),
            csm_splits: csm::CascadeSplits::new(),
            csm_far_bounds: csm::CascadeSplits::new(),
            dirty_all: true,
        }
    }

    pub fn attach_gpu(&mut self, gpu: GpuContext) {
        self.gpu = Some(gpu);
    }

    #[must_use]
    pub fn output_id(&self) -> i32 {
        self.output_id
    }

    #[must_use]
    pub fn textures_mut(&mut self) -> &mut TexturePool {
        &mut self.textures
    }

    #[must_use]
    pub fn materials_mut(&mut self) -> &mut MaterialPool {
        &mut self.materials
    }

    #[must_use]
    pub fn lights_mut(&mut self) -> &mut LightPool {
        &mut self.lights
    }

    #[must_use]
    pub fn particles_mut(&mut self) -> &mut ParticleStream {
        &mut self.particles
    }

    /// Runs the shared Phases 1-4 (spec §4.5) against `root`, then mirrors
    /// the sorted output into this backend's instance stream (spec §4.7
    /// "a vertex-attribute-stream pair ... that mirrors the sort output
    /// every frame"). Returns whether the instance buffers must be
    /// re-uploaded.
    ///
    /// Phase 1 step 2 (spec §4.5: "resolve the shape's material handle,
    /// which yields its shader id") runs first, against a scratch copy of
    /// `root` resolved through this backend's own material/texture pools —
    /// the sort's state-sort key is only meaningful once `shader_id` is a
    /// real resolved value rather than whatever the producing node left it
    /// at. Shapes inside nested `SHAPEGRP` containers are resolved lazily
    /// wherever their own backend last synced them, not here.
    pub fn sync_shapes(&mut self, root: &ShapeBuffer, object_xform: Mat4, source: &impl ShapeSource) -> bool {
        self.resolved_root.copy_from(root);
        let resolver = PoolResolver { materials: &self.materials, textures: &self.textures };
        for shape in self.resolved_root.as_mut_slice() {
            let shader_id = self.render_base.resolve_material(shape, &resolver);
            let material_asset_id = i32::from(shape.material_asset_id(0));
            if shader_id >= 0 {
                if let Some(material) = self.materials.record_for_asset(material_asset_id) {
                    self.render_base.resolve_texture(material_asset_id, material, &resolver);
                }
            }
        }
        let content_changed = self.sort.insert_and_sort_shapes(&self.resolved_root, object_xform, source);
        let needs_recreate = self.instances.mirror(self.sort.sorted_shapes(), self.sort.sorted_xforms());
        content_changed || needs_recreate
    }

    /// The beauty-pass draw list for the last synced frame (spec §4.7
    /// "Beauty pass").
    #[must_use]
    pub fn draw_list(&self) -> Vec<DrawCommand> {
        let groups: Vec<_> = self.sort.pool.iter().cloned().collect();
        build_draw_list(&groups)
    }

    /// Recomputes the CSM split distances for the current camera near/far
    /// (spec §4.7 step 1), plus each split's `farBound` normalized device
    /// depth (step 6) under `camera_proj` so a fragment shader can select
    /// the correct cascade per pixel. The per-cascade crop matrices are
    /// derived per-light from [`csm::frustum_corners_world`] /
    /// [`csm::crop_cascade`] once a light and camera view are known.
    pub fn update_csm_splits(&mut self, near: f32, far: f32, camera_proj: Mat4) {
        let far = far.min(self.csm_config.shadow_far);
        self.csm_splits = csm::compute_splits(self.csm_config.cascade_count, near, far, self.csm_config.lambda);
        self.csm_far_bounds = csm::normalized_depths(&self.csm_splits, camera_proj);
    }

    #[must_use]
    pub fn csm_splits(&self) -> &[f32] {
        &self.csm_splits
    }

    /// Per-cascade `farBound[i]` normalized device depth (spec §4.7 step 6),
    /// parallel to [`Self::csm_splits`].
    #[must_use]
    pub fn csm_far_bounds(&self) -> &[f32] {
        &self.csm_far_bounds
    }

    /// Composites an already-produced volume texture over the resolved
    /// beauty-pass color (spec §4.9: "Volumes are composited after MSAA
    /// resolve ... since they need the resolved depth buffer"). The
    /// compositing pipeline and the volume texture's bind group are
    /// supplied by the caller: volume-rendering internals and GPU shader
    /// source are out of scope here, so this backend treats both as
    /// externally produced collaborators and only drives the full-screen
    /// draw that blends them into `output`.
    pub fn composite_volume_over(&mut self, pipeline: &wgpu::RenderPipeline, volume_bind_group: &wgpu::BindGroup) {
        let Some(gpu) = &self.gpu else { return };
        let output_view = gpu.output.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder =
            gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Shapes Volume Composite") });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Shapes Volume Composite Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            pass.set_pipeline(pipeline);
            pass.set_bind_group(0, volume_bind_group, &[]);
            pass.draw(0..3, 0..1);
        }
        gpu.queue.submit(Some(encoder.finish()));
    }
}

impl Backend for RasterBackend {
    fn start_render(&mut self) {}

    fn render(&mut self, width: u32, height: u32, _pick: bool) -> bool {
        if let Some(gpu) = &mut self.gpu {
            let size = gpu.output.size();
            if size.width != width || size.height != height {
                gpu.resize(width, height);
            }
        }
        // Pool uploads precede any draw that reads them (spec §5).
        let _ = self.materials.take_upload();
        let _ = self.lights.take_upload();
        self.dirty_all = false;
        // Single-pass backend: always complete after one `render` call.
        true
    }

    fn end_render(&mut self) {}

    fn is_progressive(&self) -> bool {
        false
    }

    fn start_new_frame(&mut self) {}

    fn mark_all_dirty(&mut self) {
        self.dirty_all = true;
    }

    fn save_frame(&mut self, path: &Path) -> io::Result<()> {
        let gpu = self.gpu.as_ref().ok_or_else(|| io::Error::other("no gpu context attached"))?;
        let size = gpu.output.size();
        let bytes_per_pixel = 4u32;
        let unpadded_bytes_per_row = size.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let readback = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shapes SaveFrame Readback"),
            size: u64::from(padded_bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = gpu.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Shapes SaveFrame Copy"),
        });
        encoder.copy_texture_to_buffer(
            gpu.output.as_image_copy(),
            wgpu::TexelCopyBufferInfo {
                buffer: &readback,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_bytes_per_row),
                    rows_per_image: Some(size.height),
                },
            },
            wgpu::Extent3d { width: size.width, height: size.height, depth_or_array_layers: 1 },
        );
        gpu.queue.submit(Some(encoder.finish()));

        let slice = readback.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        gpu.device.poll(wgpu::PollType::Wait).map_err(io::Error::other)?;
        rx.recv().map_err(io::Error::other)?.map_err(io::Error::other)?;

        let padded = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity((unpadded_bytes_per_row * size.height) as usize);
        for row in padded.chunks(padded_bytes_per_row as usize) {
            pixels.extend_from_slice(&row[..unpadded_bytes_per_row as usize]);
        }
        drop(padded);
        readback.unmap();

        let image = image::RgbaImage::from_raw(size.width, size.height, pixels)
            .ok_or_else(|| io::Error::other("readback buffer size mismatch"))?;
        image.save(path).map_err(io::Error::other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shapes_render::ShapeSource;

    struct NoGroups;
    impl ShapeSource for NoGroups {
        fn container(&self, _asset_id: i32) -> Option<&ShapeBuffer> {
            None
        }
    }

    #[test]
    fn sync_shapes_populates_draw_list() {
        let mut backend = RasterBackend::new(0);
        let mut root = ShapeBuffer::new();
        let (_, s) = root.add();
        s.set_kind(shapes_resources::ShapeKind::Mesh);
        s.set_mesh_id(1);
        backend.sync_shapes(&root, Mat4::IDENTITY, &NoGroups);
        assert_eq!(backend.draw_list().len(), 1);
    }

    #[test]
    fn render_without_gpu_still_completes() {
        let mut backend = RasterBackend::new(0);
        assert!(backend.render(64, 64, false));
    }

    #[test]
    fn update_csm_splits_respects_configured_far() {
        let mut backend = RasterBackend::new(0);
        backend.update_csm_splits(0.1, 10_000.0, Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 10_000.0));
        assert_eq!(*backend.csm_splits().last().unwrap(), backend.csm_config.shadow_far);
    }

    #[test]
    fn update_csm_splits_computes_far_bounds_alongside_splits() {
        let mut backend = RasterBackend::new(0);
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 200.0);
        backend.update_csm_splits(0.1, 200.0, proj);
        assert_eq!(backend.csm_far_bounds().len(), backend.csm_splits().len());
        assert!((*backend.csm_far_bounds().last().unwrap() - 1.0).abs() < 1e-3);
    }
}
