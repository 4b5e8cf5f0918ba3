//! Wireframe mode — spec §4.7: "temporarily substitutes ambient/diffuse
//! light colors, sets polygon mode to line, redraws, then restores."

use shapes_resources::LightRecord;

/// The light-color state saved before entering wireframe mode so
/// [`restore`] can put it back exactly.
pub struct WireframeOverride {
    saved: Vec<(usize, [f32; 4], [f32; 4])>,
}

const WIREFRAME_AMBIENT: [f32; 4] = [0.0, 0.0, 0.0, 1.0];
const WIREFRAME_DIFFUSE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Substitutes every light's ambient/diffuse with the flat wireframe
/// palette, returning the saved originals.
pub fn enter(lights: &mut [LightRecord]) -> WireframeOverride {
    let mut saved = Vec::with_capacity(lights.len());
    for (i, light) in lights.iter_mut().enumerate() {
        saved.push((i, light.ambient, light.diffuse));
        light.ambient = WIREFRAME_AMBIENT;
        light.diffuse = WIREFRAME_DIFFUSE;
    }
    WireframeOverride { saved }
}

/// Restores the light colors saved by [`enter`].
pub fn restore(lights: &mut [LightRecord], overrides: WireframeOverride) {
    for (i, ambient, diffuse) in overrides.saved {
        if let Some(light) = lights.get_mut(i) {
            light.ambient = ambient;
            light.diffuse = diffuse;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_then_restore_round_trips_colors() {
        let mut lights = vec![LightRecord::default()];
        let original = lights[0].ambient;
        let saved = enter(&mut lights);
        assert_eq!(lights[0].ambient, WIREFRAME_AMBIENT);
        restore(&mut lights, saved);
        assert_eq!(lights[0].ambient, original);
    }
}
