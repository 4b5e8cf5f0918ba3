//! The `(instanceBuffer, instanceXformBuffer)` pair that mirrors the sort
//! core's output every frame (spec §4.7 "Resource caches").
//!
//! Host-side staging only; the backend maps this into its `wgpu::Buffer`
//! pair. Growth mirrors the teacher's `ModelBufferAllocator` — power-of-two
//! capacity, rebuilt (not just grown) on overflow.

use glam::Mat4;
use shapes_resources::Shape;

pub struct InstanceStream {
    shapes: Vec<Shape>,
    xforms: Vec<Mat4>,
    capacity: usize,
    needs_recreate: bool,
}

impl Default for InstanceStream {
    fn default() -> Self {
        InstanceStream { shapes: Vec::new(), xforms: Vec::new(), capacity: 0, needs_recreate: false }
    }
}

impl InstanceStream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the sort core's output in, growing the backing capacity by
    /// doubling if it no longer fits. Returns whether the backend must
    /// recreate its GPU buffers before the next upload.
    pub fn mirror(&mut self, shapes: &[Shape], xforms: &[Mat4]) -> bool {
        self.needs_recreate = false;
        if shapes.len() > self.capacity {
            let mut new_capacity = self.capacity.max(1);
            while new_capacity < shapes.len() {
                new_capacity *= 2;
            }
            self.capacity = new_capacity;
            self.needs_recreate = true;
        }
        self.shapes.clear();
        self.shapes.extend_from_slice(shapes);
        self.xforms.clear();
        self.xforms.extend_from_slice(xforms);
        self.needs_recreate
    }

    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn xforms(&self) -> &[Mat4] {
        &self.xforms
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mirror_grows_capacity_by_doubling() {
        let mut stream = InstanceStream::new();
        let shapes = vec![Shape::default(); 5];
        let xforms = vec![Mat4::IDENTITY; 5];
        assert!(stream.mirror(&shapes, &xforms));
        assert_eq!(stream.capacity(), 8);
        assert!(!stream.mirror(&shapes, &xforms));
        assert_eq!(stream.capacity(), 8);
    }

    #[test]
    fn mirror_replaces_previous_contents() {
        let mut stream = InstanceStream::new();
        stream.mirror(&vec![Shape::default(); 3], &vec![Mat4::IDENTITY; 3]);
        stream.mirror(&vec![Shape::default(); 1], &vec![Mat4::IDENTITY; 1]);
        assert_eq!(stream.len(), 1);
    }
}
