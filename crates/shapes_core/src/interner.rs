//! Name interning for asset/parameter keys.
//!
//! Grounded on `myth_core`'s `lasso` dependency: object and parameter names
//! are short, repeated across frames (every `getInput`/`SetParam` call
//! re-specifies a name), and comparing interned `Spur`s is a single integer
//! compare instead of a string compare.

use lasso::{Rodeo, Spur};

/// A thread-confined string interner. Not `Sync` — matches the single-thread
/// concurrency model in spec §5.
#[derive(Default)]
pub struct NameInterner {
    rodeo: Rodeo,
}

impl NameInterner {
    #[must_use]
    pub fn new() -> Self {
        Self { rodeo: Rodeo::new() }
    }

    pub fn intern(&mut self, name: &str) -> Spur {
        self.rodeo.get_or_intern(name)
    }

    #[must_use]
    pub fn resolve(&self, key: Spur) -> &str {
        self.rodeo.resolve(&key)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<Spur> {
        self.rodeo.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_is_stable() {
        let mut interner = NameInterner::new();
        let a = interner.intern("camera_main");
        let b = interner.intern("camera_main");
        assert_eq!(a, b);
        assert_eq!(interner.resolve(a), "camera_main");
    }
}
