//! wgpu rasterizer backend for the Shapes engine (spec §4.7, component G).

pub mod backend;
pub mod beauty_pass;
pub mod csm;
pub mod error;
pub mod gpu_context;
pub mod instance_stream;
pub mod particle;
pub mod resource_pools;
pub mod shader_params;
pub mod wireframe;

pub use backend::{CsmConfig, RasterBackend};
pub use error::{RasterError, Result};
pub use gpu_context::GpuContext;
