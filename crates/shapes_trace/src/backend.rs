//! The progressive path-trace backend (spec §4.8, component H). Shares
//! Phases 1-3 of the state-sort core with the rasterizer; Phase 4 instead
//! groups shapes into `(mesh, material)` instance groups for the
//! accelerator library (`instance_group.rs`).

use std::io;
use std::path::Path;

use glam::Mat4;
use shapes_render::{AssetResolver, Backend, RenderBase, ShapeSource, SortCore};
use shapes_resources::ShapeBuffer;

use crate::gpu_context::GpuContext;
use crate::instance_group::{build_instance_groups, InstanceGroup};
use crate::mesh_residency::MeshResidency;
use crate::region::Region;
use crate::resource_pools::{MaterialPool, TexturePool};
use crate::sample_accumulator::SampleAccumulator;

/// Borrows this backend's own pools as the [`AssetResolver`] `RenderBase`
/// needs (same role as the rasterizer's `PoolResolver`).
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

pub struct TraceBackend {
    output_id: i32,
    gpu: Option<GpuContext>,
    sort: SortCore,
    render_base: RenderBase,
    resolved_root: ShapeBuffer,
    materials: MaterialPool,
    textures: TexturePool,
    samples: SampleAccumulator,
    region: Region,
    residency: MeshResidency,
    instance_groups: Vec<InstanceGroup>,
}

impl TraceBackend {
    #[must_use]
    pub fn new(output_id: i32, max_samples: u32, width: u32, height: u32) -> Self {
        TraceBackend {
            output_id,
            gpu: None,
            sort: SortCore::new(),
            render_base: RenderBase::new(),
            resolved_root: ShapeBuffer::new(),
            materials: MaterialPool::new(),
            textures: TexturePool::new(),
            samples: SampleAccumulator::new(max_samples),
            region: Region::full(width, height),
            residency: MeshResidency::new(),
            instance_groups: Vec::new(),
        }
    }

    #[must_use]
    pub fn materials_mut(&mut self) -> &mut MaterialPool {
        &mut self.materials
    }

    #[must_use]
    pub fn textures_mut(&mut self) -> &mut TexturePool {
        &mut self.textures
    }

    pub fn attach_gpu(&mut self, gpu: GpuContext) {
        self.gpu = Some(gpu);
    }

    #[must_use]
    pub fn output_id(&self) -> i32 {
        self.output_id
    }

    pub fn set_region(&mut self, region: Region) {
        self.region = region;
    }

    #[must_use]
    pub fn region(&self) -> Region {
        self.region
    }

    #[must_use]
    pub fn instance_groups(&self) -> &[InstanceGroup] {
        &self.instance_groups
    }

    #[must_use]
    pub fn sample_index(&self) -> u32 {
        self.samples.sample_index()
    }

    /// Runs Phases 1-3 against `root`, then derives instance groups for
    /// Phase 4. `material_bound` decides per group whether its mesh's
    /// geometry is actually uploaded this pass (see `mesh_residency`'s
    /// doc comment for the indefinite-pending case).
    pub fn sync_shapes(
        &mut self,
        root: &ShapeBuffer,
        object_xform: Mat4,
        source: &impl ShapeSource,
        material_bound: impl Fn(u16) -> bool,
    ) -> bool {
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
        let root = &self.resolved_root;
        let changed = self.sort.insert_and_sort_shapes(root, object_xform, source);
        self.instance_groups =
            build_instance_groups(self.sort.pool.iter().cloned().collect::<Vec<_>>().as_slice(), self.sort.sorted_shapes(), self.sort.sorted_xforms());
        for group in &self.instance_groups {
            self.residency.update_mesh(group.mesh_asset_id, material_bound(group.material_asset_id));
        }
        if changed {
            self.samples.start_new_frame();
        }
        changed
    }

    #[must_use]
    pub fn is_mesh_resident(&self, mesh_asset_id: i32) -> bool {
        self.residency.is_resident(mesh_asset_id)
    }
}

impl Backend for TraceBackend {
    fn start_render(&mut self) {}

    /// One progressive sample per call (spec §4.8: "issues one
    /// progressive pass per frame"). Returns whether `sampleIndex` has
    /// reached `maxSamples`.
    fn render(&mut self, width: u32, height: u32, _pick: bool) -> bool {
        if let Some(gpu) = &mut self.gpu {
            let size = gpu.output.size();
            if size.width != width || size.height != height {
                gpu.resize(width, height);
                self.samples.start_new_frame();
            }
        }
        self.samples.advance()
    }

    fn end_render(&mut self) {}

    fn is_progressive(&self) -> bool {
        true
    }

    fn start_new_frame(&mut self) {
        self.samples.start_new_frame();
    }

    fn mark_all_dirty(&mut self) {
        self.residency.invalidate_all();
        self.samples.start_new_frame();
    }

    fn save_frame(&mut self, path: &Path) -> io::Result<()> {
        let gpu = self.gpu.as_ref().ok_or_else(|| io::Error::other("no gpu context attached"))?;
        let size = gpu.output.size();
        let bytes_per_pixel = 4u32;
        let unpadded_bytes_per_row = size.width * bytes_per_pixel;
        let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
        let padded_bytes_per_row = unpadded_bytes_per_row.div_ceil(align) * align;

        let readback = gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Shapes Trace SaveFrame Readback"),
            size: u64::from(padded_bytes_per_row) * u64::from(size.height),
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Shapes Trace SaveFrame Copy") });
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

    struct NoGroups;
    impl ShapeSource for NoGroups {
        fn container(&self, _asset_id: i32) -> Option<&ShapeBuffer> {
            None
        }
    }

    #[test]
    fn render_advances_samples_until_complete() {
        let mut backend = TraceBackend::new(0, 2, 64, 64);
        assert!(!backend.render(64, 64, false));
        assert!(backend.render(64, 64, false));
    }

    #[test]
    fn scene_change_restarts_sample_accumulation() {
        let mut backend = TraceBackend::new(0, 4, 64, 64);
        backend.render(64, 64, false);

        let mut root = ShapeBuffer::new();
        let (_, s) = root.add();
        s.set_kind(shapes_resources::ShapeKind::Mesh);
        s.set_mesh_id(1);
        let changed = backend.sync_shapes(&root, Mat4::IDENTITY, &NoGroups, |_| true);
        assert!(changed);
        assert_eq!(backend.sample_index(), 0);
    }

    #[test]
    fn mesh_without_bound_material_never_becomes_resident() {
        let mut backend = TraceBackend::new(0, 4, 64, 64);
        let mut root = ShapeBuffer::new();
        let (_, s) = root.add();
        s.set_kind(shapes_resources::ShapeKind::Mesh);
        s.set_mesh_id(3);
        backend.sync_shapes(&root, Mat4::IDENTITY, &NoGroups, |_| false);
        assert!(!backend.is_mesh_resident(3));
    }

    #[test]
    fn is_progressive_is_true() {
        let backend = TraceBackend::new(0, 1, 1, 1);
        assert!(Backend::is_progressive(&backend));
    }
}
