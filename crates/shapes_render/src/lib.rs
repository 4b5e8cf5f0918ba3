//! Backend-agnostic rendering support for the Shapes engine: the
//! state-sort core (spec §4.5) and the asset-resolution layer a concrete
//! backend (§4.7 rasterizer, §4.8 path tracer) builds its draw pass on
//! (§4.6).

pub mod backend;
pub mod error;
pub mod render_base;
pub mod shape_group;
pub mod sort_core;

pub use backend::Backend;
pub use error::{RenderError, Result};
pub use render_base::{AssetResolver, RenderBase};
pub use shape_group::{shape_key, ShapeGroup, ShapeGroupPool, KEY_NULL, NODE_NULL};
pub use sort_core::{ShapeSource, SortCore};
