//! The editable document: a collection of sprites with one current sprite.

use crate::frame::PixelFrame;
use crate::sprite::Sprite;
use serde::{Deserialize, Serialize};

/// All sprites in the editing session plus the current-sprite index.
///
/// Invariants: at least one sprite; `current_sprite` in bounds. Operations
/// that would break either (deleting the last sprite) are silent no-ops.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sprites: Vec<Sprite>,
    pub current_sprite: usize,
}

impl Document {
    /// A document with a single blank sprite.
    pub fn new() -> Self {
        Self {
            sprites: vec![Sprite::new()],
            current_sprite: 0,
        }
    }

    /// The current sprite.
    pub fn sprite(&self) -> &Sprite {
        &self.sprites[self.current_sprite]
    }

    /// Mutable handle to the current sprite, scoped to one edit operation.
    pub fn sprite_mut(&mut self) -> &mut Sprite {
        &mut self.sprites[self.current_sprite]
    }

    /// The current frame of the current sprite.
    pub fn frame(&self) -> &PixelFrame {
        self.sprite().frame()
    }

    /// Mutable handle to the current frame of the current sprite.
    pub fn frame_mut(&mut self) -> &mut PixelFrame {
        self.sprite_mut().frame_mut()
    }

    /// Append a blank sprite and select it.
    pub fn add_sprite(&mut self) {
        self.sprites.push(Sprite::new());
        self.current_sprite = self.sprites.len() - 1;
    }

    /// Select a sprite by index. Out-of-range indices are ignored.
    pub fn select_sprite(&mut self, index: usize) {
        if index < self.sprites.len() {
            self.current_sprite = index;
        }
    }

    /// Remove a sprite. Refuses to remove the last remaining sprite;
    /// clamps the current index into bounds afterwards.
    pub fn delete_sprite(&mut self, index: usize) {
        if self.sprites.len() <= 1 || index >= self.sprites.len() {
            return;
        }
        self.sprites.remove(index);
        self.current_sprite = self.current_sprite.min(self.sprites.len() - 1);
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_document_has_one_sprite() {
        let doc = Document::new();
        assert_eq!(doc.sprites.len(), 1);
        assert_eq!(doc.current_sprite, 0);
    }

    #[test]
    fn test_add_sprite_selects_it() {
        let mut doc = Document::new();
        doc.add_sprite();
        assert_eq!(doc.sprites.len(), 2);
        assert_eq!(doc.current_sprite, 1);
    }

    #[test]
    fn test_delete_last_sprite_refused() {
        let mut doc = Document::new();
        doc.delete_sprite(0);
        assert_eq!(doc.sprites.len(), 1);
    }

    #[test]
    fn test_delete_sprite_clamps_current() {
        let mut doc = Document::new();
        doc.add_sprite();
        doc.add_sprite();
        assert_eq!(doc.current_sprite, 2);
        doc.delete_sprite(2);
        assert_eq!(doc.sprites.len(), 2);
        assert_eq!(doc.current_sprite, 1);
    }

    #[test]
    fn test_delete_out_of_range_is_noop() {
        let mut doc = Document::new();
        doc.add_sprite();
        doc.delete_sprite(5);
        assert_eq!(doc.sprites.len(), 2);
    }

    #[test]
    fn test_frame_accessor_follows_cursors() {
        let mut doc = Document::new();
        doc.frame_mut().set(1, 1, 1);
        doc.add_sprite();
        assert_eq!(doc.frame().get(1, 1), Some(0));
        doc.select_sprite(0);
        assert_eq!(doc.frame().get(1, 1), Some(1));
    }
}
