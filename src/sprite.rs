//! Sprite: an ordered sequence of same-sized frames plus metadata.

use crate::frame::PixelFrame;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Default canvas width for a new sprite.
pub const DEFAULT_WIDTH: u32 = 16;
/// Default canvas height for a new sprite.
pub const DEFAULT_HEIGHT: u32 = 16;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

fn next_id() -> u64 {
    NEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// A named animated raster document: at least one frame, all sharing the
/// sprite's dimensions, with a circular current-frame cursor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Opaque stable identity, process-unique. Survives frame edits so UI
    /// layers can key on it.
    #[serde(default = "next_id")]
    pub id: u64,
    pub frames: Vec<PixelFrame>,
    pub width: u32,
    pub height: u32,
    pub current_frame: usize,
    /// Export basename, e.g. `{file_name}_{n}.bmp`.
    pub file_name: String,
}

impl Sprite {
    /// Create a sprite with one blank frame at the default 16x16 size.
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a sprite with one blank frame at the given size.
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            id: next_id(),
            frames: vec![PixelFrame::new(width, height, 0)],
            width,
            height,
            current_frame: 0,
            file_name: "new_sprite".to_string(),
        }
    }

    /// Advance the frame cursor, wrapping past the last frame.
    pub fn next_frame(&mut self) {
        self.current_frame = (self.current_frame + 1) % self.frames.len();
    }

    /// Step the frame cursor back, wrapping before the first frame.
    pub fn previous_frame(&mut self) {
        let n = self.frames.len();
        self.current_frame = (self.current_frame + n - 1) % n;
    }

    /// Jump directly to a frame. Out-of-range indices are ignored
    /// (numeric shortcut keys map 1-9 to indices 0-8 whether or not the
    /// sprite has that many frames).
    pub fn select_frame(&mut self, index: usize) {
        if index < self.frames.len() {
            self.current_frame = index;
        }
    }

    /// The frame the cursor points at.
    pub fn frame(&self) -> &PixelFrame {
        &self.frames[self.current_frame]
    }

    /// Mutable handle to the frame the cursor points at. Scoped to one edit
    /// operation; structural edits invalidate it.
    pub fn frame_mut(&mut self) -> &mut PixelFrame {
        &mut self.frames[self.current_frame]
    }

    /// Resize the sprite and every owned frame, anchored at the origin.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        for frame in &mut self.frames {
            frame.resize(width, height);
        }
    }
}

impl Default for Sprite {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_sprite_defaults() {
        let sprite = Sprite::new();
        assert_eq!(sprite.frames.len(), 1);
        assert_eq!(sprite.width, 16);
        assert_eq!(sprite.height, 16);
        assert_eq!(sprite.current_frame, 0);
        assert_eq!(sprite.file_name, "new_sprite");
    }

    #[test]
    fn test_ids_are_unique() {
        let a = Sprite::new();
        let b = Sprite::new();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_frame_navigation_wraps() {
        let mut sprite = Sprite::new();
        sprite.frames.push(PixelFrame::new(16, 16, 0));
        sprite.frames.push(PixelFrame::new(16, 16, 0));

        sprite.next_frame();
        assert_eq!(sprite.current_frame, 1);
        sprite.next_frame();
        assert_eq!(sprite.current_frame, 2);
        sprite.next_frame();
        assert_eq!(sprite.current_frame, 0);

        sprite.previous_frame();
        assert_eq!(sprite.current_frame, 2);
    }

    #[test]
    fn test_select_frame_ignores_out_of_range() {
        let mut sprite = Sprite::new();
        sprite.frames.push(PixelFrame::new(16, 16, 0));
        sprite.select_frame(1);
        assert_eq!(sprite.current_frame, 1);
        sprite.select_frame(5);
        assert_eq!(sprite.current_frame, 1);
    }

    #[test]
    fn test_resize_applies_to_all_frames() {
        let mut sprite = Sprite::new();
        sprite.frames.push(PixelFrame::new(16, 16, 1));
        sprite.resize(8, 4);
        assert_eq!(sprite.width, 8);
        assert_eq!(sprite.height, 4);
        for frame in &sprite.frames {
            assert_eq!(frame.width(), 8);
            assert_eq!(frame.height(), 4);
        }
        assert_eq!(sprite.frames[1].get(0, 0), Some(1));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut sprite = Sprite::new();
        sprite.frame_mut().set(3, 3, 1);
        let json = serde_json::to_string(&sprite).unwrap();
        let parsed: Sprite = serde_json::from_str(&json).unwrap();
        assert_eq!(sprite, parsed);
    }
}
