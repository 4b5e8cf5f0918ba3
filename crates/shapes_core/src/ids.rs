//! Stable object and asset identifiers.
//!
//! Unlike a `SlotMap`-style generational handle, an [`ObjectId`] is a plain
//! dense small integer assigned once at creation. Deleting an object nulls
//! its registry slot but never reuses or compacts it — callers that hold a
//! stale id must re-resolve through the registry rather than trust the id's
//! shape, matching the spec's "Registry exclusively owns all Objects; every
//! other handle is a back-reference by id" ownership model.

use std::fmt;

/// Sentinel meaning "no object" / "unbound input".
pub const OBJ_NULL: i32 = -1;
/// Sentinel meaning "this shape's `meshids.x` is itself a shape-group id".
pub const OBJ_SHAPEGRP: i32 = -2;

/// A stable integer id into the asset registry.
///
/// `ObjectId::NULL` compares equal to [`OBJ_NULL`]; arithmetic on the raw
/// value is intentionally not exposed so that sentinel comparisons stay
/// explicit at call sites.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub i32);

impl ObjectId {
    /// The null/unbound object id.
    pub const NULL: ObjectId = ObjectId(OBJ_NULL);
    /// The shape-group sentinel id.
    pub const SHAPEGRP: ObjectId = ObjectId(OBJ_SHAPEGRP);

    #[must_use]
    pub const fn new(raw: i32) -> Self {
        ObjectId(raw)
    }

    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == OBJ_NULL
    }

    #[must_use]
    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Usable as a dense array index, or `None` if null/negative.
    #[must_use]
    pub fn index(self) -> Option<usize> {
        if self.0 >= 0 { Some(self.0 as usize) } else { None }
    }
}

impl Default for ObjectId {
    fn default() -> Self {
        ObjectId::NULL
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_null() {
            write!(f, "ObjectId(NULL)")
        } else {
            write!(f, "ObjectId({})", self.0)
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for ObjectId {
    fn from(raw: i32) -> Self {
        ObjectId(raw)
    }
}

/// A four-character type tag (`glbs`, `modl`, `mesh`, …), packed the way
/// the reference packs `objType` as a big-endian four-byte word so it prints
/// back out as the original ASCII tag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeTag(pub [u8; 4]);

impl TypeTag {
    #[must_use]
    pub const fn new(tag: &[u8; 4]) -> Self {
        TypeTag(*tag)
    }

    #[must_use]
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.0)
    }
}

impl fmt::Debug for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeTag({})", self.as_str())
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Declares a [`TypeTag`] constant from a 4-byte ASCII literal.
#[macro_export]
macro_rules! type_tag {
    ($lit:literal) => {{
        const BYTES: &[u8] = $lit.as_bytes();
        const _: () = assert!(BYTES.len() == 4, "type tags must be exactly 4 bytes");
        $crate::ids::TypeTag::new(&[BYTES[0], BYTES[1], BYTES[2], BYTES[3]])
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_sentinel_roundtrips() {
        assert!(ObjectId::NULL.is_null());
        assert_eq!(ObjectId::NULL.raw(), OBJ_NULL);
        assert_eq!(ObjectId::from(-1), ObjectId::NULL);
    }

    #[test]
    fn shapegrp_sentinel_is_distinct() {
        assert_ne!(ObjectId::SHAPEGRP, ObjectId::NULL);
        assert_eq!(ObjectId::SHAPEGRP.raw(), OBJ_SHAPEGRP);
    }

    #[test]
    fn index_rejects_negative() {
        assert_eq!(ObjectId::new(5).index(), Some(5));
        assert_eq!(ObjectId::NULL.index(), None);
    }

    #[test]
    fn type_tag_prints_ascii() {
        let t = type_tag!("mesh");
        assert_eq!(t.as_str(), "mesh");
    }
}
