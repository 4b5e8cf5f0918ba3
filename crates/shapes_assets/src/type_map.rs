//! Extension/name → object-type-tag dispatch — spec §4.1.
//!
//! Grounded on `original_source/src/core/object_list.cpp`'s
//! `getObjTypeFromExtension` and `getObjTypeFromName` / `RegisterTypes`.

use shapes_core::{type_tag, TypeTag};
use std::path::Path;

/// Maps a file extension to the type tag used to create the object that
/// will load it. Returns `None` for an unrecognized extension (spec §7:
/// unknown-asset-extension is a silent miss, not a hard error, so callers
/// can skip unrecognized files while scanning an asset directory).
#[must_use]
pub fn type_from_extension(ext: &str) -> Option<TypeTag> {
    let lower = ext.to_ascii_lowercase();
    Some(match lower.as_str() {
        "jpg" | "jpeg" | "png" | "tga" | "tif" | "tiff" | "bmp" | "hdr" | "exr" => {
            type_tag!("Aimg")
        }
        "wav" | "mp3" | "ogg" => type_tag!("Asnd"),
        "obj" | "ply" | "fbx" | "gltf" | "glb" => type_tag!("Amsh"),
        "frag" | "vert" | "glsl" | "wgsl" => type_tag!("Ashd"),
        _ => return None,
    })
}

/// Extension of `path`, lower-cased, with the leading dot stripped.
#[must_use]
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}

/// The full behavior/asset type-name → tag map (spec §4.1's `[MODULE]`
/// list), matching `ObjectList::RegisterTypes`.
#[must_use]
pub fn type_from_name(name: &str) -> Option<TypeTag> {
    Some(match name {
        "GLOBALS" => type_tag!("glbs"),
        "MODULE" => type_tag!("modl"),
        "SCATTER" => type_tag!("scat"),
        "INSTANCE" => type_tag!("inst"),
        "LIGHTS" => type_tag!("lite"),
        "CAMERA" => type_tag!("cam "),
        "CURVEGEN" => type_tag!("curv"),
        "DEFORM" => type_tag!("defm"),
        "BAKE" => type_tag!("bake"),
        // A MESH object is a transform wrapper around a loaded mesh asset.
        "MESH" => type_tag!("tfrm"),
        "LOFT" => type_tag!("loft"),
        "HEIGHTFIELD" => type_tag!("hfld"),
        "DISPLACE" => type_tag!("dspl"),
        "POINTCLOUD" => type_tag!("ptcl"),
        "POINTSYS" => type_tag!("ptsy"),
        "POINTCELLS" => type_tag!("ptcs"),
        "TREESYS" => type_tag!("trsy"),
        "TREEPARTS" => type_tag!("trpt"),
        "VOLUME" => type_tag!("volm"),
        "HEAT" => type_tag!("heat"),
        "PARTS" => type_tag!("part"),
        "MUSCLES" => type_tag!("musc"),
        "MOTION" => type_tag!("motn"),
        "CHARACTER" => type_tag!("char"),
        "TILEGRID" => type_tag!("tilg"),
        "EARTH" => type_tag!("erth"),
        "TILE" => type_tag!("tile"),
        "PAINT" => type_tag!("pant"),
        "IMAGE" => type_tag!("Aimg"),
        "SHAPES" => type_tag!("Ashp"),
        "SHADER" => type_tag!("Ashd"),
        "PARAMS" => type_tag!("Aprm"),
        "POINTS" => type_tag!("Apts"),
        "MATERIAL" => type_tag!("Amtl"),
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_dispatch() {
        assert_eq!(type_from_extension("PNG"), Some(type_tag!("Aimg")));
        assert_eq!(type_from_extension("obj"), Some(type_tag!("Amsh")));
        assert_eq!(type_from_extension("xyz"), None);
    }

    #[test]
    fn name_dispatch_covers_behavior_and_asset_types() {
        assert_eq!(type_from_name("SCATTER"), Some(type_tag!("scat")));
        assert_eq!(type_from_name("MESH"), Some(type_tag!("tfrm")));
        assert_eq!(type_from_name("MATERIAL"), Some(type_tag!("Amtl")));
        assert_eq!(type_from_name("NOPE"), None);
    }
}
