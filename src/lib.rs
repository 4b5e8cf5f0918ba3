#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::too_many_lines)]

//! Shapes — a state-sorted instanced rendering engine.
//!
//! The workspace is layered leaves-first:
//!
//! - [`shapes_core`] — object ids, dirty marks, the typed parameter store.
//! - [`shapes_resources`] — GPU-facing shape/material/light/texture records.
//! - [`shapes_assets`] — the generic object-id registry.
//! - [`shapes_scene`] — the object graph and its evaluation kernel.
//! - [`shapes_render`] — the backend-agnostic state-sort core and the
//!   [`Backend`] trait both concrete backends implement.
//! - [`shapes_raster`] (feature `raster`, default) — the wgpu rasterizer.
//! - [`shapes_trace`] (feature `trace`) — the progressive path tracer.
//! - [`shapes_coordinator`] — selects between backends and paces frames.
//!
//! This crate re-exports the pieces an embedder typically needs without
//! depending on every layer by name.

pub use shapes_assets::Registry;
pub use shapes_core::{Mark, ObjectId, Param, ParamStore};
pub use shapes_coordinator::{BackendRegistry, CoordinatorError, OutputFormat, RecordingConfig, RenderCoordinator};
pub use shapes_render::{AssetResolver, Backend, RenderBase, ShapeGroup, ShapeSource, SortCore};
pub use shapes_resources::{LightRecord, MaterialRecord, Shape, ShapeBuffer, ShapeKind};
pub use shapes_scene::{behavior_for, DefaultBehavior, MeshBehavior, ObjectBehavior, ObjectKind, Scene, Transform};

#[cfg(feature = "raster")]
pub use shapes_raster::{CsmConfig, RasterBackend};

#[cfg(feature = "trace")]
pub use shapes_trace::{InstanceGroup, Region, SampleAccumulator, TraceBackend};
