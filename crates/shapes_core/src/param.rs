//! Typed parameter store.
//!
//! Each object carries a flat vector of [`Param`] records, each holding one
//! or more typed sub-parameters. This replaces the reference's hand-packed
//! byte layout (`key[64] | sz | cnt | val*`, see
//! `original_source/src/assets/params.cpp`) with a variant-of-union value
//! per spec Design Notes — the invariant the reference encodes in raw bytes
//! (total size = `2*cnt + sum(sizeof(type))`) is preserved as
//! [`Param::byte_size`] for testability, it just isn't how the values are
//! physically stored anymore.

use crate::error::{CoreError, Result};
use glam::{IVec3, Vec3, Vec4};
use rustc_hash::FxHashMap;

/// One sub-parameter's type tag, matching the reference's single-character
/// type codes (`i`, `f`, `3`, `4`, `I`, `s`).
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum SubParamType {
    I,
    F,
    Vec3,
    Vec4,
    IVec3,
    Str,
}

impl SubParamType {
    #[must_use]
    pub fn code(self) -> char {
        match self {
            SubParamType::I => 'i',
            SubParamType::F => 'f',
            SubParamType::Vec3 => '3',
            SubParamType::Vec4 => '4',
            SubParamType::IVec3 => 'I',
            SubParamType::Str => 's',
        }
    }

    #[must_use]
    pub fn from_code(c: char) -> Option<Self> {
        Some(match c {
            'i' => SubParamType::I,
            'f' => SubParamType::F,
            '3' => SubParamType::Vec3,
            '4' => SubParamType::Vec4,
            'I' => SubParamType::IVec3,
            's' => SubParamType::Str,
            _ => return None,
        })
    }
}

/// A single typed sub-parameter value.
#[derive(Clone, Debug, PartialEq)]
pub enum SubParamValue {
    I(i32),
    F(f32),
    Vec3(Vec3),
    Vec4(Vec4),
    IVec3(IVec3),
    Str(String),
}

impl SubParamValue {
    #[must_use]
    pub fn ty(&self) -> SubParamType {
        match self {
            SubParamValue::I(_) => SubParamType::I,
            SubParamValue::F(_) => SubParamType::F,
            SubParamValue::Vec3(_) => SubParamType::Vec3,
            SubParamValue::Vec4(_) => SubParamType::Vec4,
            SubParamValue::IVec3(_) => SubParamType::IVec3,
            SubParamValue::Str(_) => SubParamType::Str,
        }
    }

    /// Byte footprint this value would occupy in the reference's packed
    /// layout — `sizeof(float)`/`sizeof(int)`/`sizeof(Vec3F)`/… for fixed
    /// types, and the UTF-8 byte length for the variable-length string.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        match self {
            SubParamValue::I(_) => 4,
            SubParamValue::F(_) => 4,
            SubParamValue::Vec3(_) => 12,
            SubParamValue::Vec4(_) => 16,
            SubParamValue::IVec3(_) => 12,
            SubParamValue::Str(s) => s.len(),
        }
    }

    fn default_for(ty: SubParamType) -> Self {
        match ty {
            SubParamType::I => SubParamValue::I(0),
            SubParamType::F => SubParamValue::F(0.0),
            SubParamType::Vec3 => SubParamValue::Vec3(Vec3::ZERO),
            SubParamType::Vec4 => SubParamValue::Vec4(Vec4::ZERO),
            SubParamType::IVec3 => SubParamValue::IVec3(IVec3::ZERO),
            SubParamType::Str => SubParamValue::Str(String::new()),
        }
    }
}

/// One named parameter: a 64-byte-name budget (enforced at construction, not
/// stored as a fixed array — see module docs) holding `cnt` typed values.
#[derive(Clone, Debug)]
pub struct Param {
    pub name: String,
    pub values: Vec<SubParamValue>,
}

impl Param {
    const MAX_NAME_LEN: usize = 64;

    fn new(name: impl Into<String>, types: &str) -> Self {
        let name = name.into();
        debug_assert!(
            name.len() <= Self::MAX_NAME_LEN,
            "parameter name '{name}' exceeds the reference's 64-byte key budget"
        );
        let values = types
            .chars()
            .filter_map(SubParamType::from_code)
            .map(SubParamValue::default_for)
            .collect();
        Param { name, values }
    }

    #[must_use]
    pub fn cnt(&self) -> usize {
        self.values.len()
    }

    /// Total byte footprint under the reference's packed layout: the
    /// `cnt`-length offset table plus the `cnt`-length type table
    /// (`2 * cnt`), plus the sum of each value's footprint — spec
    /// invariant #7.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        2 * self.cnt() + self.values.iter().map(SubParamValue::byte_size).sum::<usize>()
    }

    fn type_schema(&self) -> String {
        self.values.iter().map(|v| v.ty().code()).collect()
    }
}

/// Splits an array-style parameter name (`light[07]`) into its base key and
/// numeric index, if present.
fn split_array_name(name: &str) -> Option<(&str, usize)> {
    let open = name.find('[')?;
    let close = name.rfind(']')?;
    if close <= open {
        return None;
    }
    let idx: usize = name[open + 1..close].parse().ok()?;
    Some((&name[..open], idx))
}

/// Flat parameter store, one per object.
#[derive(Clone, Debug, Default)]
pub struct ParamStore {
    params: Vec<Param>,
    index: FxHashMap<String, usize>,
}

impl ParamStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Declares a new parameter with the given name and type schema string
    /// (e.g. `"3"` for one vec3, `"if"` for an int then a float). Returns
    /// its slot index. If `name` is an array-style name (`light[07]`) whose
    /// base key (`light`) already exists, the new parameter copies the
    /// base's type schema instead of `types`, matching the reference's
    /// `AddParamByCopy` inheritance rule.
    pub fn add_param(&mut self, name: impl Into<String>, types: &str) -> usize {
        let name = name.into();
        if let Some((base, _)) = split_array_name(&name) {
            if let Some(&base_slot) = self.index.get(base) {
                let schema = self.params[base_slot].type_schema();
                return self.add_param_raw(name, &schema);
            }
        }
        self.add_param_raw(name, types)
    }

    fn add_param_raw(&mut self, name: String, types: &str) -> usize {
        let slot = self.params.len();
        self.index.insert(name.clone(), slot);
        self.params.push(Param::new(name, types));
        slot
    }

    #[must_use]
    pub fn slot_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&Param> {
        self.params.get(slot)
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Param> {
        self.slot_of(name).and_then(|s| self.get(s))
    }

    /// Every slot whose base name matches `base` (`light`, `light[0]`,
    /// `light[1]`, …) in declaration order — the reference's
    /// `GetParamArray`.
    pub fn array_slots(&self, base: &str) -> Vec<usize> {
        let mut out: Vec<usize> = self
            .params
            .iter()
            .enumerate()
            .filter(|(_, p)| match split_array_name(&p.name) {
                Some((b, _)) => b == base,
                None => p.name == base,
            })
            .map(|(i, _)| i)
            .collect();
        out.sort_unstable();
        out
    }

    fn sub_mut(&mut self, name: &str, index: usize) -> Result<&mut SubParamValue> {
        let slot = self
            .slot_of(name)
            .ok_or_else(|| CoreError::UnknownParam(name.to_string()))?;
        let param = &mut self.params[slot];
        let cnt = param.cnt();
        param
            .values
            .get_mut(index)
            .ok_or(CoreError::ParamIndexOutOfBounds { name: name.to_string(), index, cnt })
    }

    fn sub(&self, name: &str, index: usize) -> Result<&SubParamValue> {
        let slot = self
            .slot_of(name)
            .ok_or_else(|| CoreError::UnknownParam(name.to_string()))?;
        let param = &self.params[slot];
        param.values.get(index).ok_or(CoreError::ParamIndexOutOfBounds {
            name: name.to_string(),
            index,
            cnt: param.cnt(),
        })
    }

    fn check_ty(name: &str, index: usize, slot: &SubParamValue, expected: SubParamType) -> Result<()> {
        if slot.ty() == expected {
            Ok(())
        } else {
            Err(CoreError::ParamTypeMismatch {
                name: name.to_string(),
                index,
                expected,
                found: slot.ty(),
            })
        }
    }

    pub fn set_i(&mut self, name: &str, index: usize, v: i32) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::I)?;
        *slot = SubParamValue::I(v);
        Ok(())
    }

    pub fn get_i(&self, name: &str, index: usize) -> Result<i32> {
        let slot = self.sub(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::I)?;
        match slot {
            SubParamValue::I(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn set_f(&mut self, name: &str, index: usize, v: f32) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::F)?;
        *slot = SubParamValue::F(v);
        Ok(())
    }

    pub fn get_f(&self, name: &str, index: usize) -> Result<f32> {
        let slot = self.sub(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::F)?;
        match slot {
            SubParamValue::F(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn set_v3(&mut self, name: &str, index: usize, v: Vec3) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Vec3)?;
        *slot = SubParamValue::Vec3(v);
        Ok(())
    }

    pub fn get_v3(&self, name: &str, index: usize) -> Result<Vec3> {
        let slot = self.sub(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Vec3)?;
        match slot {
            SubParamValue::Vec3(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn set_v4(&mut self, name: &str, index: usize, v: Vec4) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Vec4)?;
        *slot = SubParamValue::Vec4(v);
        Ok(())
    }

    pub fn get_v4(&self, name: &str, index: usize) -> Result<Vec4> {
        let slot = self.sub(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Vec4)?;
        match slot {
            SubParamValue::Vec4(v) => Ok(*v),
            _ => unreachable!(),
        }
    }

    pub fn set_str(&mut self, name: &str, index: usize, v: impl Into<String>) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Str)?;
        *slot = SubParamValue::Str(v.into());
        Ok(())
    }

    pub fn get_str(&self, name: &str, index: usize) -> Result<&str> {
        let slot = self.sub(name, index)?;
        Self::check_ty(name, index, slot, SubParamType::Str)?;
        match slot {
            SubParamValue::Str(v) => Ok(v.as_str()),
            _ => unreachable!(),
        }
    }

    /// Textual setter used by the scene-text loader (`param: name, value`).
    /// Infers the sub-parameter type from value syntax: `<a,b,c>` is a
    /// vec3/vec4, a token parsing as a signed number is `i`/`f`, anything
    /// else is a string. Declares the parameter on first use.
    pub fn set_param_text(&mut self, name: &str, values: &[&str]) {
        if self.slot_of(name).is_none() {
            let schema: String = values.iter().map(|v| infer_type(v).code()).collect();
            self.add_param(name.to_string(), &schema);
        }
        for (i, raw) in values.iter().enumerate() {
            let parsed = parse_value(raw);
            // Silently ignore type-mismatched textual assignment past the
            // declared schema; this path is used by the loader and the
            // spec treats loader-level mismatches as non-fatal (§7).
            let _ = self.try_set_parsed(name, i, parsed);
        }
    }

    fn try_set_parsed(&mut self, name: &str, index: usize, value: SubParamValue) -> Result<()> {
        let slot = self.sub_mut(name, index)?;
        if slot.ty() == value.ty() {
            *slot = value;
        }
        Ok(())
    }
}

fn infer_type(raw: &str) -> SubParamType {
    let raw = raw.trim();
    if raw.starts_with('<') && raw.ends_with('>') {
        let inner = &raw[1..raw.len() - 1];
        let n = inner.split([',', ';']).filter(|s| !s.trim().is_empty()).count();
        if n >= 4 { SubParamType::Vec4 } else { SubParamType::Vec3 }
    } else if raw.parse::<i32>().is_ok() {
        SubParamType::I
    } else if raw.parse::<f32>().is_ok() {
        SubParamType::F
    } else {
        SubParamType::Str
    }
}

fn parse_value(raw: &str) -> SubParamValue {
    let raw = raw.trim();
    match infer_type(raw) {
        SubParamType::Vec3 => {
            let nums = parse_vec_components(raw);
            SubParamValue::Vec3(Vec3::new(
                nums.first().copied().unwrap_or(0.0),
                nums.get(1).copied().unwrap_or(0.0),
                nums.get(2).copied().unwrap_or(0.0),
            ))
        }
        SubParamType::Vec4 => {
            let nums = parse_vec_components(raw);
            SubParamValue::Vec4(Vec4::new(
                nums.first().copied().unwrap_or(0.0),
                nums.get(1).copied().unwrap_or(0.0),
                nums.get(2).copied().unwrap_or(0.0),
                nums.get(3).copied().unwrap_or(0.0),
            ))
        }
        SubParamType::I => SubParamValue::I(raw.parse().unwrap_or(0)),
        SubParamType::F => SubParamValue::F(raw.parse().unwrap_or(0.0)),
        SubParamType::Str | SubParamType::IVec3 => SubParamValue::Str(raw.to_string()),
    }
}

fn parse_vec_components(raw: &str) -> Vec<f32> {
    let inner = raw.trim_start_matches('<').trim_end_matches('>');
    inner
        .split([',', ';'])
        .filter_map(|s| s.trim().parse::<f32>().ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_size_matches_invariant_seven() {
        let mut store = ParamStore::new();
        store.add_param("pos", "3");
        store.add_param("combo", "if");
        let pos = store.find("pos").unwrap();
        assert_eq!(pos.cnt(), 1);
        assert_eq!(pos.byte_size(), 2 * 1 + 12);
        let combo = store.find("combo").unwrap();
        assert_eq!(combo.byte_size(), 2 * 2 + 4 + 4);
    }

    #[test]
    fn typed_accessor_fails_on_mismatch() {
        let mut store = ParamStore::new();
        store.add_param("fov", "f");
        let err = store.get_i("fov", 0).unwrap_err();
        assert!(matches!(err, CoreError::ParamTypeMismatch { .. }));
    }

    #[test]
    fn array_name_inherits_base_schema() {
        let mut store = ParamStore::new();
        store.add_param("light", "3f");
        let slot = store.add_param("light[07]", "ignored");
        let p = store.get(slot).unwrap();
        assert_eq!(p.type_schema(), "3f");
    }

    #[test]
    fn array_slots_collects_in_order() {
        let mut store = ParamStore::new();
        store.add_param("light", "f");
        store.add_param("light[0]", "f");
        store.add_param("light[1]", "f");
        let slots = store.array_slots("light");
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn textual_set_infers_vec3() {
        let mut store = ParamStore::new();
        store.set_param_text("pos", &["<1,2,3>"]);
        assert_eq!(store.get_v3("pos", 0).unwrap(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn textual_set_infers_number_and_string() {
        let mut store = ParamStore::new();
        store.set_param_text("fov", &["42.5"]);
        assert_eq!(store.get_f("fov", 0).unwrap(), 42.5);

        let mut store2 = ParamStore::new();
        store2.set_param_text("name", &["hello"]);
        assert_eq!(store2.get_str("name", 0).unwrap(), "hello");
    }
}
