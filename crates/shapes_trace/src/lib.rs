//! Progressive path-trace backend for the Shapes engine (spec §4.8,
//! component H).

pub mod backend;
pub mod error;
pub mod gpu_context;
pub mod instance_group;
pub mod mesh_residency;
pub mod region;
pub mod resource_pools;
pub mod sample_accumulator;

pub use backend::TraceBackend;
pub use error::{Result, TraceError};
pub use gpu_context::GpuContext;
pub use instance_group::InstanceGroup;
pub use region::Region;
pub use sample_accumulator::SampleAccumulator;
