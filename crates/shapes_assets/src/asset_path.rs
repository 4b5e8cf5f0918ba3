//! Directory-backed lazy asset materialization — spec §4.1.
//!
//! `AddAssetPath`/`FindOrLoadObject` let a scene reference an asset by base
//! name without eagerly loading every file in a directory; the actual
//! decode (image/mesh codecs) is an external collaborator supplied as an
//! [`AssetLoader`] — this crate only tracks *which* file backs *which*
//! name and *what type tag* to create for it.
//!
//! Grounded on `original_source/src/core/object_list.cpp`'s directory-scan
//! and lazy-lookup behavior described in spec §4.1.

use crate::registry::Registry;
use crate::type_map::{extension_of, type_from_extension};
use shapes_core::{ObjectId, TypeTag};
use std::path::{Path, PathBuf};

/// One file discovered by [`AssetPathIndex::add_path`]: its full path, the
/// base name a scene would reference it by, and the type tag that should
/// be used to create its backing object.
#[derive(Clone, Debug)]
pub struct AssetFileEntry {
    pub path: PathBuf,
    pub name: String,
    pub type_tag: TypeTag,
}

/// Recorded `(path, name, extension)` tuples from scanned directories,
/// not yet loaded.
#[derive(Default)]
pub struct AssetPathIndex {
    entries: Vec<AssetFileEntry>,
}

impl AssetPathIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans `dir` non-recursively, recording every file whose extension
    /// resolves to a known type tag. Unrecognized extensions are skipped
    /// silently, matching the registry's "asset-not-found is non-fatal"
    /// policy (spec §7).
    pub fn add_path(&mut self, dir: &Path) -> crate::error::Result<()> {
        let read = std::fs::read_dir(dir)
            .map_err(|e| crate::error::AssetError::DirectoryScan(dir.to_path_buf(), e))?;
        for entry in read.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let Some(ext) = extension_of(&path) else { continue };
            let Some(type_tag) = type_from_extension(&ext) else { continue };
            let Some(stem) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
                continue;
            };
            self.entries.push(AssetFileEntry { path, name: stem, type_tag });
        }
        Ok(())
    }

    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<&AssetFileEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

/// Decodes the bytes at an [`AssetFileEntry`]'s path into a registry
/// payload. Image/mesh codecs are external collaborators (spec Non-goals);
/// this crate depends only on the trait boundary.
pub trait AssetLoader<T> {
    fn load(&self, type_tag: TypeTag, path: &Path) -> T;
}

/// `LoadObjectFromFile(type, name, path)` — unconditionally loads and
/// registers, even if `name` already exists (callers that want
/// lazy-only semantics should use [`find_or_load_object`] instead).
pub fn load_object_from_file<T>(
    registry: &mut Registry<T>,
    loader: &impl AssetLoader<T>,
    type_tag: TypeTag,
    name: &str,
    path: &Path,
) -> ObjectId {
    let payload = loader.load(type_tag, path);
    registry.add(name, payload)
}

/// `FindOrLoadObject(name)`: a name lookup first, then a scan of recorded
/// asset files matching by base name. Returns `None` ("still-null") if
/// neither resolves (spec §7).
pub fn find_or_load_object<T>(
    registry: &mut Registry<T>,
    paths: &AssetPathIndex,
    loader: &impl AssetLoader<T>,
    name: &str,
) -> Option<ObjectId> {
    if let Some(id) = registry.find(name) {
        return Some(id);
    }
    let entry = paths.find_by_name(name)?;
    Some(load_object_from_file(registry, loader, entry.type_tag, name, &entry.path))
}
