//! Fixed uniform-role shader parameter map — spec §4.7 "Shader parameter
//! map". Every shader exposes the same small set of roles; the loader
//! reflects over the compiled program once and records each role's
//! location, with `-1` meaning absent (spec: "`-1` denotes absent").

/// Uniform roles a compiled shader program may expose. `SMtx` and `no`
/// roles are arrayed (one location per cascade / light); the rest are
/// scalar.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ParamRole {
    ViewMatrix,
    ProjMatrix,
    CameraPos,
    EnvMap,
    LightCount,
    ShadowFar1,
    ShadowFar2,
    ShadowMatrix(usize),
    ShadowTex,
    ShadowSize,
}

/// Resolved uniform locations for one compiled shader program. Absent
/// roles read back `-1`.
#[derive(Clone, Debug)]
pub struct ShaderParamMap {
    view_matrix: i32,
    proj_matrix: i32,
    camera_pos: i32,
    env_map: i32,
    light_count: i32,
    shadow_far1: i32,
    shadow_far2: i32,
    shadow_matrix: [i32; crate::csm::MAX_CASCADES],
    shadow_tex: i32,
    shadow_size: i32,
}

impl Default for ShaderParamMap {
    fn default() -> Self {
        ShaderParamMap {
            view_matrix: -1,
            proj_matrix: -1,
            camera_pos: -1,
            env_map: -1,
            light_count: -1,
            shadow_far1: -1,
            shadow_far2: -1,
            shadow_matrix: [-1; crate::csm::MAX_CASCADES],
            shadow_tex: -1,
            shadow_size: -1,
        }
    }
}

impl ShaderParamMap {
    /// Reflects over a compiled program by asking `lookup` for each role's
    /// location in turn. `lookup` returns `None` for a role the shader
    /// doesn't declare, which this records as `-1`.
    pub fn reflect(lookup: impl Fn(ParamRole) -> Option<i32>) -> Self {
        let mut map = ShaderParamMap::default();
        map.view_matrix = lookup(ParamRole::ViewMatrix).unwrap_or(-1);
        map.proj_matrix = lookup(ParamRole::ProjMatrix).unwrap_or(-1);
        map.camera_pos = lookup(ParamRole::CameraPos).unwrap_or(-1);
        map.env_map = lookup(ParamRole::EnvMap).unwrap_or(-1);
        map.light_count = lookup(ParamRole::LightCount).unwrap_or(-1);
        map.shadow_far1 = lookup(ParamRole::ShadowFar1).unwrap_or(-1);
        map.shadow_far2 = lookup(ParamRole::ShadowFar2).unwrap_or(-1);
        for (i, slot) in map.shadow_matrix.iter_mut().enumerate() {
            *slot = lookup(ParamRole::ShadowMatrix(i)).unwrap_or(-1);
        }
        map.shadow_tex = lookup(ParamRole::ShadowTex).unwrap_or(-1);
        map.shadow_size = lookup(ParamRole::ShadowSize).unwrap_or(-1);
        map
    }

    #[must_use]
    pub fn location(&self, role: ParamRole) -> i32 {
        match role {
            ParamRole::ViewMatrix => self.view_matrix,
            ParamRole::ProjMatrix => self.proj_matrix,
            ParamRole::CameraPos => self.camera_pos,
            ParamRole::EnvMap => self.env_map,
            ParamRole::LightCount => self.light_count,
            ParamRole::ShadowFar1 => self.shadow_far1,
            ParamRole::ShadowFar2 => self.shadow_far2,
            ParamRole::ShadowMatrix(i) => self.shadow_matrix.get(i).copied().unwrap_or(-1),
            ParamRole::ShadowTex => self.shadow_tex,
            ParamRole::ShadowSize => self.shadow_size,
        }
    }

    #[must_use]
    pub fn has(&self, role: ParamRole) -> bool {
        self.location(role) >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_role_resolves_to_negative_one() {
        let map = ShaderParamMap::reflect(|_| None);
        assert_eq!(map.location(ParamRole::ViewMatrix), -1);
        assert!(!map.has(ParamRole::ViewMatrix));
    }

    #[test]
    fn present_role_is_recorded() {
        let map = ShaderParamMap::reflect(|role| match role {
            ParamRole::ViewMatrix => Some(3),
            ParamRole::ShadowMatrix(2) => Some(9),
            _ => None,
        });
        assert_eq!(map.location(ParamRole::ViewMatrix), 3);
        assert!(map.has(ParamRole::ViewMatrix));
        assert_eq!(map.location(ParamRole::ShadowMatrix(2)), 9);
        assert_eq!(map.location(ParamRole::ShadowMatrix(0)), -1);
    }

    #[test]
    fn out_of_range_cascade_index_is_absent() {
        let map = ShaderParamMap::default();
        assert_eq!(map.location(ParamRole::ShadowMatrix(99)), -1);
    }
}
