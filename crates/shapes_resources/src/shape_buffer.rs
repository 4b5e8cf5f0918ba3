//! Columnar shape container — spec §4.3.
//!
//! Grounded on `original_source/src/prims/shapes.h`'s `Shapes : DataX`: a
//! primary `Shape[]` buffer plus named, on-demand side buffers (level,
//! parent, next-sibling, variant, velocity, direction, age, growth). The
//! reference indexes buffers by small integer (`BLEV`, `BCHILD`, …); here
//! each side buffer is keyed by [`SideBuffer`] for type safety, backed by a
//! `Vec<f32>` (or `Vec<i32>` via bit-cast) the caller interprets.

use crate::shape::Shape;
use std::collections::HashMap;

/// Named side buffers a shape container may grow on demand — the
/// reference's `BLEV..BGROW` integer buffer ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum SideBuffer {
    Level,
    Parent,
    NextSibling,
    Variant,
    Velocity,
    Direction,
    Age,
    Growth,
}

/// A growable columnar buffer of [`Shape`] records plus optional
/// per-instance side buffers, used both as a scene object's output and as
/// the sort core's working buffers. Growth is amortized doubling, never
/// shrinking (spec glossary: "Pool-doubling").
#[derive(Clone, Debug, Default)]
pub struct ShapeBuffer {
    shapes: Vec<Shape>,
    side: HashMap<SideBuffer, Vec<f32>>,
}

impl ShapeBuffer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn as_mut_slice(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    /// Appends a default-initialized shape and returns its index plus a
    /// mutable reference — the reference's `Add(out_index) -> &Shape`.
    pub fn add(&mut self) -> (usize, &mut Shape) {
        let idx = self.shapes.len();
        self.shapes.push(Shape::default());
        (idx, &mut self.shapes[idx])
    }

    /// Appends a deep copy of `shape` — `AddShapeByCopy`.
    pub fn add_shape_by_copy(&mut self, shape: &Shape) -> usize {
        let idx = self.shapes.len();
        self.shapes.push(*shape);
        idx
    }

    /// Removes the shape at `i` by swap-remove (the reference's `Delete`
    /// does not preserve order across deletions either, since shape order
    /// within a frame is re-established by the sort core, not by storage
    /// order).
    pub fn delete(&mut self, i: usize) {
        if i < self.shapes.len() {
            self.shapes.swap_remove(i);
            for buf in self.side.values_mut() {
                if i < buf.len() {
                    buf.swap_remove(i);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        for buf in self.side.values_mut() {
            buf.clear();
        }
    }

    /// Copies every shape from `src` whose `lod` is `<= max_lod`, the
    /// reference's `AddFrom(src, lod, max_lod)`.
    pub fn add_from(&mut self, src: &ShapeBuffer, max_lod: u8) {
        for shape in &src.shapes {
            if shape.lod <= max_lod {
                self.shapes.push(*shape);
            }
        }
    }

    /// Deep-copies the entire shape buffer from `src`, replacing this
    /// buffer's contents — `CopyFrom`.
    pub fn copy_from(&mut self, src: &ShapeBuffer) {
        self.shapes.clear();
        self.shapes.extend_from_slice(&src.shapes);
        self.side.clear();
        for (k, v) in &src.side {
            self.side.insert(*k, v.clone());
        }
    }

    /// Returns the named side buffer, creating it (zero-filled to the
    /// current shape count) on first access — side buffers are "created on
    /// demand by their consumer" per spec §4.3.
    pub fn side_buffer_mut(&mut self, which: SideBuffer) -> &mut Vec<f32> {
        self.side.entry(which).or_insert_with(|| vec![0.0; self.shapes.len()])
    }

    #[must_use]
    pub fn side_buffer(&self, which: SideBuffer) -> Option<&Vec<f32>> {
        self.side.get(&which)
    }
}
