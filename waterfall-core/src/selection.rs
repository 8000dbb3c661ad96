/// Selected and hovered slice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    current: usize,
    hovered: Option<usize>,
}

impl SelectionState {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Select `index`, clamped to `[0, total - 1]`. Returns whether it changed.
    pub fn set_current(&mut self, index: usize, total: usize) -> bool {
        let index = index.min(total.saturating_sub(1));
        let changed = index != self.current;
        self.current = index;
        changed
    }

    /// Move the selection by `delta`, clamped to the store.
    pub fn step(&mut self, delta: i64, total: usize) -> bool {
        let target = if delta < 0 {
            self.current.saturating_sub(delta.unsigned_abs() as usize)
        } else {
            self.current.saturating_add(delta as usize)
        };
        self.set_current(target, total)
    }

    pub fn set_hovered(&mut self, hovered: Option<usize>) -> bool {
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Hover highlight to draw: only when it differs from the selection.
    pub fn distinct_hover(&self) -> Option<usize> {
        self.hovered.filter(|&h| h != self.current)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_current_clamps() {
        let mut s = SelectionState::default();
        assert!(s.set_current(500, 250));
        assert_eq!(s.current(), 249);
        assert!(!s.set_current(249, 250));
        assert!(s.set_current(3, 0));
        assert_eq!(s.current(), 0);
    }

    #[test]
    fn test_step() {
        let mut s = SelectionState::default();
        assert!(!s.step(-1, 10));
        assert!(s.step(1, 10));
        assert_eq!(s.current(), 1);
        s.set_current(9, 10);
        assert!(!s.step(1, 10));
    }

    #[test]
    fn test_distinct_hover() {
        let mut s = SelectionState::default();
        s.set_current(4, 10);
        s.set_hovered(Some(4));
        assert_eq!(s.distinct_hover(), None);
        s.set_hovered(Some(5));
        assert_eq!(s.distinct_hover(), Some(5));
    }
}
