//! Cascade shadow map math — spec §4.7 "Cascade Shadow Maps (CSM)".
//!
//! Pure, GPU-free functions so the split/crop math is testable without a
//! device. Grounded on the teacher's
//! `renderer/graph/passes/shadow.rs::ShadowPass` (`compute_cascade_splits`,
//! `compute_frustum_corners_world`, `build_cascade_vp`); the crop-matrix
//! derivation here is generalized into explicit `(scaleX, scaleY, offsetX,
//! offsetY)` outputs per spec step 4, rather than folding straight into an
//! orthographic projection as the teacher does.

use glam::{Mat4, Vec3};
use smallvec::SmallVec;

pub const MAX_CASCADES: usize = 4;

/// A per-cascade value inlined on the stack — at most [`MAX_CASCADES`]
/// entries, so this never allocates. Mirrors the teacher's
/// `light_layer_assignments: SmallVec<[(u32, u32); 8]>` in
/// `renderer/graph/passes/shadow.rs`, sized to this crate's own fixed
/// cascade bound.
pub type CascadeSplits = SmallVec<[f32; MAX_CASCADES]>;

/// Step 1 — blends a logarithmic practical-split partition with a linear
/// one using `lambda` (spec default ≈ 0.5), returning each split's far
/// distance. Adjacent slices are extended by 0.5% so they overlap.
#[must_use]
pub fn compute_splits(count: usize, near: f32, far: f32, lambda: f32) -> CascadeSplits {
    let n = count.min(MAX_CASCADES).max(1);
    let mut splits = CascadeSplits::with_capacity(n);
    for i in 1..=n {
        let p = i as f32 / n as f32;
        let log_split = near * (far / near).powf(p);
        let lin_split = near + (far - near) * p;
        let z = lambda * log_split + (1.0 - lambda) * lin_split;
        splits.push(z * 1.005);
    }
    if let Some(last) = splits.last_mut() {
        *last = far;
    }
    splits
}

/// Step 2 — the eight world-space corners of the camera's sub-frustum
/// between `slice_near` and `slice_far`.
#[must_use]
pub fn frustum_corners_world(
    view: Mat4,
    tan_half_fov: f32,
    aspect: f32,
    slice_near: f32,
    slice_far: f32,
) -> [Vec3; 8] {
    let h_near = tan_half_fov * slice_near;
    let w_near = h_near * aspect;
    let h_far = tan_half_fov * slice_far;
    let w_far = h_far * aspect;

    let corners_view = [
        Vec3::new(-w_near, -h_near, -slice_near),
        Vec3::new(w_near, -h_near, -slice_near),
        Vec3::new(w_near, h_near, -slice_near),
        Vec3::new(-w_near, h_near, -slice_near),
        Vec3::new(-w_far, -h_far, -slice_far),
        Vec3::new(w_far, -h_far, -slice_far),
        Vec3::new(w_far, h_far, -slice_far),
        Vec3::new(-w_far, h_far, -slice_far),
    ];

    let inv_view = view.inverse();
    corners_view.map(|c| inv_view.transform_point3(c))
}

/// Step 3 — the light's orthogonal `lookAt` view matrix, built once per
/// frame from the first shadow-casting light's position and target.
#[must_use]
pub fn light_view_matrix(light_pos: Vec3, light_target: Vec3) -> Mat4 {
    let dir = (light_target - light_pos).normalize_or_zero();
    let safe_dir = if dir.length_squared() > 1e-6 { dir } else { -Vec3::Z };
    let up = if safe_dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };
    Mat4::look_at_rh(light_pos, light_target, up)
}

/// A 2D crop fit to one cascade's footprint in the shared shadow map,
/// spec step 4's `(scaleX, scaleY, offsetX, offsetY)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CascadeCrop {
    pub scale_x: f32,
    pub scale_y: f32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub light_proj: Mat4,
}

/// Step 4 — projects `corners` into light space under `shad_mv`, derives
/// an orthographic projection from their extent, and returns the crop that
/// fits this cascade's slice within the shared shadow map.
#[must_use]
pub fn crop_cascade(shad_mv: Mat4, corners: &[Vec3; 8]) -> CascadeCrop {
    let mut min = Vec3::splat(f32::MAX);
    let mut max = Vec3::splat(f32::MIN);
    for c in corners {
        let ls = shad_mv.transform_point3(*c);
        min = min.min(ls);
        max = max.max(ls);
    }

    let light_proj = Mat4::orthographic_rh(min.x, max.x, min.y, max.y, -max.z, -min.z);

    let extent_x = (max.x - min.x).max(f32::EPSILON);
    let extent_y = (max.y - min.y).max(f32::EPSILON);
    let scale_x = 2.0 / extent_x;
    let scale_y = 2.0 / extent_y;
    let offset_x = -0.5 * (max.x + min.x) * scale_x;
    let offset_y = -0.5 * (max.y + min.y) * scale_y;

    CascadeCrop { scale_x, scale_y, offset_x, offset_y, light_proj }
}

/// Maps clip space `[-1,1]` to texture space `[0,1]` — the `Tbias` used by
/// step 6 to build the camera-pass sampling matrix.
#[must_use]
pub fn bias_matrix() -> Mat4 {
    Mat4::from_cols_array(&[
        0.5, 0.0, 0.0, 0.0, //
        0.0, 0.5, 0.0, 0.0, //
        0.0, 0.0, 1.0, 0.0, //
        0.5, 0.5, 0.0, 1.0,
    ])
}

/// Step 6 — `shadViewMatrix[i] = Tbias * lightProj * shadMV * cameraViewInverse`.
#[must_use]
pub fn shadow_view_matrix(light_proj: Mat4, shad_mv: Mat4, camera_view_inverse: Mat4) -> Mat4 {
    bias_matrix() * light_proj * shad_mv * camera_view_inverse
}

/// Step 6 — `farBound[i]`: projects a cascade's view-space split-far
/// distance through the camera's projection to normalized device depth, so
/// the fragment shader can pick a pixel's cascade by comparing its own NDC
/// depth against this value rather than against a raw view-space distance.
#[must_use]
pub fn normalized_depth(split_far: f32, camera_proj: Mat4) -> f32 {
    let clip = camera_proj * glam::Vec4::new(0.0, 0.0, -split_far, 1.0);
    if clip.w.abs() > f32::EPSILON {
        clip.z / clip.w
    } else {
        0.0
    }
}

/// Projects every entry of `splits` (camera-space split-far distances) to
/// its `farBound` NDC depth, in the same order.
#[must_use]
pub fn normalized_depths(splits: &CascadeSplits, camera_proj: Mat4) -> CascadeSplits {
    splits.iter().map(|&split_far| normalized_depth(split_far, camera_proj)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_last_entry_reaches_far_plane() {
        let splits = compute_splits(4, 0.1, 100.0, 0.5);
        assert_eq!(splits.len(), 4);
        assert_eq!(*splits.last().unwrap(), 100.0);
    }

    #[test]
    fn splits_are_monotonically_increasing() {
        let splits = compute_splits(4, 0.1, 100.0, 0.5);
        for w in splits.windows(2) {
            assert!(w[1] > w[0]);
        }
    }

    #[test]
    fn splits_clamp_count_to_max_cascades() {
        let splits = compute_splits(9, 0.1, 100.0, 0.5);
        assert_eq!(splits.len(), MAX_CASCADES);
    }

    #[test]
    fn light_view_matrix_looks_toward_target() {
        let m = light_view_matrix(Vec3::new(0.0, 5.0, 5.0), Vec3::ZERO);
        let forward = m.transform_vector3(Vec3::new(0.0, 5.0, 5.0)).normalize();
        assert!(forward.z < 0.0);
    }

    #[test]
    fn crop_matches_unit_cube_for_unit_corners() {
        let corners = [
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
        ];
        let crop = crop_cascade(Mat4::IDENTITY, &corners);
        assert!((crop.scale_x - 1.0).abs() < 1e-5);
        assert!((crop.scale_y - 1.0).abs() < 1e-5);
        assert!(crop.offset_x.abs() < 1e-5);
    }

    #[test]
    fn normalized_depth_reaches_near_unity_at_far_plane() {
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let d = normalized_depth(100.0, proj);
        assert!((d - 1.0).abs() < 1e-3);
    }

    #[test]
    fn normalized_depth_increases_with_split_distance() {
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let near_split = normalized_depth(5.0, proj);
        let far_split = normalized_depth(50.0, proj);
        assert!(far_split > near_split);
    }

    #[test]
    fn normalized_depths_matches_splits_len() {
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_4, 1.0, 0.1, 100.0);
        let splits = compute_splits(4, 0.1, 100.0, 0.5);
        let bounds = normalized_depths(&splits, proj);
        assert_eq!(bounds.len(), splits.len());
    }

    #[test]
    fn bias_matrix_maps_clip_range_to_unit_range() {
        let t = bias_matrix();
        let p = t.transform_point3(Vec3::new(-1.0, -1.0, 0.0));
        assert!((p.x - 0.0).abs() < 1e-5);
        assert!((p.y - 0.0).abs() < 1e-5);
        let p2 = t.transform_point3(Vec3::new(1.0, 1.0, 0.0));
        assert!((p2.x - 1.0).abs() < 1e-5);
        assert!((p2.y - 1.0).abs() < 1e-5);
    }
}
