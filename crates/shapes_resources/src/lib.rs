//! GPU-facing data definitions for the Shapes engine.
//!
//! - [`shape`] / [`shape_buffer`] — the per-instance [`shape::Shape`] record
//!   (spec §3.2) and its columnar [`shape_buffer::ShapeBuffer`] container
//!   (spec §4.3).
//! - [`material`], [`light`], [`texture`] — compact GPU-facing records for
//!   uniform-buffer upload (spec §3.5).

pub mod light;
pub mod material;
pub mod shape;
pub mod shape_buffer;
pub mod texture;

pub use light::LightRecord;
pub use material::MaterialRecord;
pub use shape::{pack_rgba, Shape, ShapeKind, NULL_NDX};
pub use shape_buffer::{ShapeBuffer, SideBuffer};
pub use texture::{BindTarget, FilterMode, TextureRecord};
