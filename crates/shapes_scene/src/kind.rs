//! `ObjectKind` — the tagged variant standing in for the reference's
//! `Object` inheritance hierarchy (spec §9 Design Notes: "prefer a tagged
//! variant with a fixed method table — 20-25 kinds total").
//!
//! Grounded on `original_source/src/core/object_list.cpp`'s `RegisterTypes`
//! type-tag table (also consulted by `shapes_assets::type_map`, which this
//! module mirrors for the subset of tags that denote scene-graph nodes
//! rather than bare asset leaves).

use shapes_core::{type_tag, TypeTag};

/// Every registered object kind. Leaf asset kinds (`Image`, `Shapes`,
/// `Shader`, `Params`, `Points`, `Material`) carry no per-frame behavior of
/// their own beyond "loaded or not"; behavior kinds implement the
/// `Define/Generate/Run` protocol via [`crate::behavior::ObjectBehavior`].
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ObjectKind {
    Globals,
    Module,
    Scatter,
    Instance,
    Lights,
    Camera,
    Curvegen,
    Deform,
    Bake,
    Mesh,
    Loft,
    Heightfield,
    Displace,
    Pointcloud,
    Pointsys,
    Pointcells,
    Treesys,
    Treeparts,
    Volume,
    Heat,
    Parts,
    Muscles,
    Motion,
    Character,
    Tilegrid,
    Earth,
    Tile,
    Paint,
    Image,
    Shapes,
    Shader,
    Params,
    Points,
    Material,
}

impl ObjectKind {
    #[must_use]
    pub fn type_tag(self) -> TypeTag {
        match self {
            ObjectKind::Globals => type_tag!("glbs"),
            ObjectKind::Module => type_tag!("modl"),
            ObjectKind::Scatter => type_tag!("scat"),
            ObjectKind::Instance => type_tag!("inst"),
            ObjectKind::Lights => type_tag!("lite"),
            ObjectKind::Camera => type_tag!("cam "),
            ObjectKind::Curvegen => type_tag!("curv"),
            ObjectKind::Deform => type_tag!("defm"),
            ObjectKind::Bake => type_tag!("bake"),
            ObjectKind::Mesh => type_tag!("tfrm"),
            ObjectKind::Loft => type_tag!("loft"),
            ObjectKind::Heightfield => type_tag!("hfld"),
            ObjectKind::Displace => type_tag!("dspl"),
            ObjectKind::Pointcloud => type_tag!("ptcl"),
            ObjectKind::Pointsys => type_tag!("ptsy"),
            ObjectKind::Pointcells => type_tag!("ptcs"),
            ObjectKind::Treesys => type_tag!("trsy"),
            ObjectKind::Treeparts => type_tag!("trpt"),
            ObjectKind::Volume => type_tag!("volm"),
            ObjectKind::Heat => type_tag!("heat"),
            ObjectKind::Parts => type_tag!("part"),
            ObjectKind::Muscles => type_tag!("musc"),
            ObjectKind::Motion => type_tag!("motn"),
            ObjectKind::Character => type_tag!("char"),
            ObjectKind::Tilegrid => type_tag!("tilg"),
            ObjectKind::Earth => type_tag!("erth"),
            ObjectKind::Tile => type_tag!("tile"),
            ObjectKind::Paint => type_tag!("pant"),
            ObjectKind::Image => type_tag!("Aimg"),
            ObjectKind::Shapes => type_tag!("Ashp"),
            ObjectKind::Shader => type_tag!("Ashd"),
            ObjectKind::Params => type_tag!("Aprm"),
            ObjectKind::Points => type_tag!("Apts"),
            ObjectKind::Material => type_tag!("Amtl"),
        }
    }

    /// Asset leaf kinds hold data but run no per-frame evaluation.
    #[must_use]
    pub fn is_asset_leaf(self) -> bool {
        matches!(
            self,
            ObjectKind::Image
                | ObjectKind::Shapes
                | ObjectKind::Shader
                | ObjectKind::Params
                | ObjectKind::Points
                | ObjectKind::Material
        )
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "GLOBALS" => ObjectKind::Globals,
            "MODULE" => ObjectKind::Module,
            "SCATTER" => ObjectKind::Scatter,
            "INSTANCE" => ObjectKind::Instance,
            "LIGHTS" => ObjectKind::Lights,
            "CAMERA" => ObjectKind::Camera,
            "CURVEGEN" => ObjectKind::Curvegen,
            "DEFORM" => ObjectKind::Deform,
            "BAKE" => ObjectKind::Bake,
            "MESH" => ObjectKind::Mesh,
            "LOFT" => ObjectKind::Loft,
            "HEIGHTFIELD" => ObjectKind::Heightfield,
            "DISPLACE" => ObjectKind::Displace,
            "POINTCLOUD" => ObjectKind::Pointcloud,
            "POINTSYS" => ObjectKind::Pointsys,
            "POINTCELLS" => ObjectKind::Pointcells,
            "TREESYS" => ObjectKind::Treesys,
            "TREEPARTS" => ObjectKind::Treeparts,
            "VOLUME" => ObjectKind::Volume,
            "HEAT" => ObjectKind::Heat,
            "PARTS" => ObjectKind::Parts,
            "MUSCLES" => ObjectKind::Muscles,
            "MOTION" => ObjectKind::Motion,
            "CHARACTER" => ObjectKind::Character,
            "TILEGRID" => ObjectKind::Tilegrid,
            "EARTH" => ObjectKind::Earth,
            "TILE" => ObjectKind::Tile,
            "PAINT" => ObjectKind::Paint,
            "IMAGE" => ObjectKind::Image,
            "SHAPES" => ObjectKind::Shapes,
            "SHADER" => ObjectKind::Shader,
            "PARAMS" => ObjectKind::Params,
            "POINTS" => ObjectKind::Points,
            "MATERIAL" => ObjectKind::Material,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_kinds_are_exactly_the_asset_types() {
        assert!(ObjectKind::Image.is_asset_leaf());
        assert!(ObjectKind::Material.is_asset_leaf());
        assert!(!ObjectKind::Scatter.is_asset_leaf());
        assert!(!ObjectKind::Camera.is_asset_leaf());
    }

    #[test]
    fn name_roundtrips_to_tag() {
        let k = ObjectKind::from_name("MESH").unwrap();
        assert_eq!(k.type_tag(), type_tag!("tfrm"));
    }
}
