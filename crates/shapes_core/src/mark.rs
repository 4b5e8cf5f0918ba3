//! Dirty / clean / complete bit flags for object graph nodes.

use bitflags::bitflags;

bitflags! {
    /// An object's evaluation state. `DIRTY` and `CLEAN` are mutually
    /// exclusive in practice (setting one clears the other via [`Mark::set_dirty`]);
    /// `COMPLETE` is tracked independently.
    #[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
    pub struct Mark: u8 {
        const DIRTY    = 1;
        const CLEAN    = 2;
        const COMPLETE = 4;
    }
}

impl Mark {
    #[must_use]
    pub fn fresh() -> Self {
        Mark::DIRTY
    }

    #[must_use]
    pub fn is_dirty(self) -> bool {
        self.contains(Mark::DIRTY)
    }

    #[must_use]
    pub fn is_complete(self) -> bool {
        self.contains(Mark::COMPLETE)
    }

    pub fn set_dirty(&mut self, dirty: bool) {
        self.set(Mark::DIRTY, dirty);
        self.set(Mark::CLEAN, !dirty);
    }

    pub fn set_complete(&mut self, complete: bool) {
        self.set(Mark::COMPLETE, complete);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dirty_and_clean_are_exclusive() {
        let mut m = Mark::fresh();
        assert!(m.is_dirty());
        m.set_dirty(false);
        assert!(!m.is_dirty());
        assert!(m.contains(Mark::CLEAN));
    }

    #[test]
    fn complete_is_independent() {
        let mut m = Mark::fresh();
        m.set_complete(true);
        assert!(m.is_dirty());
        assert!(m.is_complete());
    }
}
