//! Multi-backend render coordinator (spec §4.9, component I) — selects
//! between the rasterizer (§4.7) and path tracer (§4.8) backends, paces
//! progressive accumulation, and drives output-frame recording (§6.4).

pub mod coordinator;
pub mod error;
pub mod recording;
pub mod registry;

pub use coordinator::RenderCoordinator;
pub use error::{CoordinatorError, Result};
pub use recording::{OutputFormat, RecordingConfig};
pub use registry::BackendRegistry;
