//! Undo/redo history over whole-document snapshots.
//!
//! Every entry is an independent deep copy of the document (all sprites, all
//! frames, all pixel data). Whole-document snapshotting trades memory for
//! correctness: restoring always lands on an exact prior state, with no diff
//! application to drift. Sprite buffers are at most a few hundred bytes per
//! frame, so the 200-entry cap stays small.

use crate::document::Document;

/// Maximum number of undo entries retained. Oldest entries are evicted
/// first once the cap is reached.
pub const UNDO_CAPACITY: usize = 200;

/// Linear undo/redo stacks. Any new edit after an undo clears the redo
/// stack (no history branching).
#[derive(Debug, Default)]
pub struct History {
    undo_stack: Vec<Document>,
    redo_stack: Vec<Document>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the document onto the undo stack. Called before a mutation.
    ///
    /// Evicts the oldest entry beyond [`UNDO_CAPACITY`] and unconditionally
    /// clears the redo stack.
    pub fn push_undo_state(&mut self, document: &Document) {
        self.undo_stack.push(document.clone());
        if self.undo_stack.len() > UNDO_CAPACITY {
            self.undo_stack.remove(0);
        }
        self.redo_stack.clear();
    }

    /// Restore the most recent undo entry into `document`, saving the
    /// current state onto the redo stack. No-op when the stack is empty.
    pub fn undo(&mut self, document: &mut Document) {
        if let Some(snapshot) = self.undo_stack.pop() {
            self.redo_stack.push(document.clone());
            *document = snapshot;
        }
    }

    /// Inverse of [`undo`](Self::undo). No-op when the redo stack is empty.
    pub fn redo(&mut self, document: &mut Document) {
        if let Some(snapshot) = self.redo_stack.pop() {
            self.undo_stack.push(document.clone());
            *document = snapshot;
        }
    }

    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edit(doc: &mut Document, history: &mut History, x: i32, y: i32) {
        history.push_undo_state(doc);
        doc.frame_mut().set(x, y, 1);
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut doc = Document::new();
        let mut history = History::new();
        let before = doc.clone();
        history.undo(&mut doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_undo_redo_symmetry() {
        let mut doc = Document::new();
        let mut history = History::new();
        let initial = doc.clone();

        for i in 0..5 {
            edit(&mut doc, &mut history, i, 0);
        }
        let edited = doc.clone();

        for _ in 0..5 {
            history.undo(&mut doc);
        }
        assert_eq!(doc, initial);

        for _ in 0..5 {
            history.redo(&mut doc);
        }
        assert_eq!(doc, edited);
    }

    #[test]
    fn test_new_edit_clears_redo() {
        let mut doc = Document::new();
        let mut history = History::new();
        edit(&mut doc, &mut history, 0, 0);
        history.undo(&mut doc);
        assert_eq!(history.redo_len(), 1);
        edit(&mut doc, &mut history, 1, 1);
        assert_eq!(history.redo_len(), 0);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut doc = Document::new();
        let mut history = History::new();
        for i in 0..250 {
            history.push_undo_state(&doc);
            doc.sprite_mut().file_name = format!("edit_{}", i);
        }
        assert_eq!(history.undo_len(), UNDO_CAPACITY);

        // Unwinding the whole stack lands on the state before edit 50, the
        // oldest retained entry.
        for _ in 0..UNDO_CAPACITY {
            history.undo(&mut doc);
        }
        assert_eq!(doc.sprite().file_name, "edit_49");
        history.undo(&mut doc);
        assert_eq!(doc.sprite().file_name, "edit_49");
    }

    #[test]
    fn test_snapshots_do_not_alias_live_buffers() {
        let mut doc = Document::new();
        let mut history = History::new();
        history.push_undo_state(&doc);
        doc.frame_mut().set(0, 0, 1);
        // Mutating after the snapshot must not leak into the stored entry.
        history.undo(&mut doc);
        assert_eq!(doc.frame().get(0, 0), Some(0));
    }
}
