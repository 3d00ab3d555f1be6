use crate::section::Section;

/// Linear undo/redo history over full section-state snapshots.
///
/// Entries are immutable once recorded. Committing while the cursor sits
/// before the tail discards the "future" entries first, so the cursor always
/// points at the last applied entry.
#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Vec<Section>>,
    cursor: usize,
}

impl History {
    /// A fresh history containing the initial state as its only entry.
    pub fn new(initial: Vec<Section>) -> Self {
        Self {
            entries: vec![initial],
            cursor: 0,
        }
    }

    /// Record a committed edit: drop all entries after the cursor, append the
    /// snapshot, and advance the cursor to the new tail.
    pub fn commit(&mut self, snapshot: Vec<Section>) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push(snapshot);
        self.cursor = self.entries.len() - 1;
    }

    /// Step back one entry and return the snapshot to restore. No-op at the
    /// first entry.
    pub fn undo(&mut self) -> Option<Vec<Section>> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Step forward one entry and return the snapshot to restore. No-op at
    /// the tail.
    pub fn redo(&mut self) -> Option<Vec<Section>> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.entries[self.cursor].clone())
    }

    /// Collapse the history to a single entry (template switch, project
    /// load).
    pub fn reset(&mut self, initial: Vec<Section>) {
        self.entries = vec![initial];
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SectionRect;

    fn snap(tag: &str) -> Vec<Section> {
        vec![Section::new(
            "a",
            tag,
            "",
            SectionRect::new(0.0, 160.0, 100.0, 100.0),
        )]
    }

    #[test]
    fn undo_redo_walk_the_cursor() {
        let mut h = History::new(snap("v0"));
        h.commit(snap("v1"));
        h.commit(snap("v2"));
        assert_eq!(h.undo().unwrap()[0].title, "v1");
        assert_eq!(h.undo().unwrap()[0].title, "v0");
        assert!(h.undo().is_none());
        assert_eq!(h.redo().unwrap()[0].title, "v1");
        assert_eq!(h.redo().unwrap()[0].title, "v2");
        assert!(h.redo().is_none());
    }

    #[test]
    fn commit_after_undo_discards_the_future() {
        let mut h = History::new(snap("v0"));
        h.commit(snap("v1"));
        h.commit(snap("v2"));
        h.undo();
        h.commit(snap("v1b"));
        assert_eq!(h.len(), 3);
        assert!(!h.can_redo());
        assert_eq!(h.undo().unwrap()[0].title, "v1");
    }

    #[test]
    fn reset_collapses_to_one_entry() {
        let mut h = History::new(snap("v0"));
        h.commit(snap("v1"));
        h.reset(snap("fresh"));
        assert_eq!(h.len(), 1);
        assert!(!h.can_undo());
        assert!(!h.can_redo());
    }
}
