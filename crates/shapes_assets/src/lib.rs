//! Asset registry — spec §4.1.
//!
//! The single source of object ids for the engine: [`registry::Registry<T>`]
//! is generic over its payload so `shapes_scene` can instantiate it with the
//! concrete object-graph node type without this crate depending back on
//! `shapes_scene` (spec §2's leaves-first dependency order: this crate sits
//! below the object graph, not beside it).

pub mod asset_path;
pub mod error;
pub mod registry;
pub mod type_map;

pub use asset_path::{AssetFileEntry, AssetLoader, AssetPathIndex};
pub use error::{AssetError, Result};
pub use registry::Registry;
pub use type_map::{extension_of, type_from_extension, type_from_name};
