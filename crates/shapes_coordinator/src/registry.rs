//! Backend registry — spec §4.9: "Owns the list of backends... each
//! backend is registered with its output texture id."

use shapes_render::Backend;

struct BackendEntry {
    output_id: i32,
    backend: Box<dyn Backend>,
}

#[derive(Default)]
pub struct BackendRegistry {
    entries: Vec<BackendEntry>,
}

impl BackendRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `backend` under `output_id`. Re-registering an id already
    /// present replaces the prior backend.
    pub fn register(&mut self, output_id: i32, backend: Box<dyn Backend>) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.output_id == output_id) {
            entry.backend = backend;
        } else {
            self.entries.push(BackendEntry { output_id, backend });
        }
    }

    #[must_use]
    pub fn get(&self, output_id: i32) -> Option<&dyn Backend> {
        self.entries.iter().find(|e| e.output_id == output_id).map(|e| e.backend.as_ref())
    }

    pub fn get_mut(&mut self, output_id: i32) -> Option<&mut dyn Backend> {
        self.entries.iter_mut().find(|e| e.output_id == output_id).map(|e| e.backend.as_mut())
    }

    #[must_use]
    pub fn contains(&self, output_id: i32) -> bool {
        self.entries.iter().any(|e| e.output_id == output_id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
