/// Linear undo/redo over committed image states.
///
/// Pushing after an undo truncates: the redoable tail is dropped for good.
#[derive(Clone, Debug, PartialEq)]
pub struct EditHistory<E> {
    entries: Vec<E>,
    index: Option<usize>,
}

impl<E> Default for EditHistory<E> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: None }
    }
}

impl<E> EditHistory<E> {
    pub fn push(&mut self, entry: E) {
        if let Some(i) = self.index {
            self.entries.truncate(i + 1);
        } else {
            self.entries.clear();
        }
        self.entries.push(entry);
        self.index = Some(self.entries.len() - 1);
    }

    pub fn undo(&mut self) -> Option<&E> {
        match self.index {
            Some(i) if i > 0 => {
                self.index = Some(i - 1);
                self.entries.get(i - 1)
            }
            _ => None,
        }
    }

    pub fn redo(&mut self) -> Option<&E> {
        match self.index {
            Some(i) if i + 1 < self.entries.len() => {
                self.index = Some(i + 1);
                self.entries.get(i + 1)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self, base: E) {
        self.entries.clear();
        self.entries.push(base);
        self.index = Some(0);
    }

    pub fn current(&self) -> Option<&E> {
        self.index.and_then(|i| self.entries.get(i))
    }

    pub fn position(&self) -> Option<usize> {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn can_undo(&self) -> bool {
        matches!(self.index, Some(i) if i > 0)
    }

    pub fn can_redo(&self) -> bool {
        matches!(self.index, Some(i) if i + 1 < self.entries.len())
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_after_undo_truncates() {
        let mut h = EditHistory::default();
        h.push("a");
        h.push("b");
        assert_eq!(h.undo(), Some(&"a"));
        h.push("c");
        assert_eq!(h.entries(), &["a", "c"]);
        assert_eq!(h.position(), Some(1));
        assert_eq!(h.redo(), None);
        assert_eq!(h.current(), Some(&"c"));
    }

    #[test]
    fn bounds_are_silent_noops() {
        let mut h: EditHistory<u32> = EditHistory::default();
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
        assert_eq!(h.position(), None);
        h.reset(1);
        assert_eq!(h.undo(), None);
        assert_eq!(h.redo(), None);
        assert_eq!(h.position(), Some(0));
    }

    #[test]
    fn undo_redo_walk() {
        let mut h = EditHistory::default();
        h.reset(0);
        h.push(1);
        h.push(2);
        assert!(h.can_undo() && !h.can_redo());
        assert_eq!(h.undo(), Some(&1));
        assert_eq!(h.undo(), Some(&0));
        assert!(!h.can_undo() && h.can_redo());
        assert_eq!(h.redo(), Some(&1));
        assert_eq!(h.len(), 3);
    }

    #[test]
    fn reset_replaces_everything() {
        let mut h = EditHistory::default();
        h.push('a');
        h.push('b');
        h.reset('z');
        assert_eq!(h.entries(), &['z']);
        assert_eq!(h.current(), Some(&'z'));
        assert_eq!(h.len(), 1);
        assert!(!h.is_empty());
    }
}
