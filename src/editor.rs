//! Tool dispatch and interactive mutation.
//!
//! The [`Editor`] owns the document, the undo history, the selection and all
//! in-progress drag state. UI layers feed it pointer events carrying integer
//! sprite-space coordinates (already scaled down from screen pixels) and
//! redraw after each call; the editor itself never renders.
//!
//! Undo granularity is per gesture: one snapshot at pointer-down covers the
//! whole drag. Line and move previews work by restoring a backup copy of the
//! frame on every move and redrawing from scratch, so no stray pixels from
//! earlier pointer positions accumulate.

use crate::document::Document;
use crate::frame::{Axis, PixelFrame};
use crate::history::History;
use crate::selection::{Point, SelectionBox};
use crate::settings::Settings;
use serde::{Deserialize, Serialize};

/// The active drawing tool. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    #[default]
    Pixel,
    Line,
    Fill,
    Move,
    Select,
}

/// The pixel editing engine.
#[derive(Debug, Default)]
pub struct Editor {
    pub document: Document,
    pub history: History,
    pub selection: SelectionBox,
    tool: Tool,
    /// Active drawing bit: 1 foreground, 0 background.
    color: u8,
    /// When moving a selection, whether its background cells overwrite
    /// destination pixels (true) or act as transparent (false).
    pub overwrite_with_background: bool,
    /// Anchor coordinate of the in-progress drag.
    drag_anchor: Option<Point>,
    /// Frame backup taken at drag start for preview-and-revert tools.
    backup: Option<PixelFrame>,
    /// Selection content lifted out of the backup for a selection move.
    lifted: Option<LiftedSelection>,
    /// Last known pointer position, the paste anchor.
    last_pointer: Option<Point>,
    clipboard: Option<PixelFrame>,
}

/// Selected pixels lifted out of the frame during a move drag, plus the
/// region they came from.
#[derive(Debug, Clone)]
struct LiftedSelection {
    content: PixelFrame,
    left: i32,
    top: i32,
}

impl Editor {
    pub fn new() -> Self {
        Self {
            color: 1,
            ..Self::default()
        }
    }

    /// An editor with its behavior toggles taken from settings.
    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            overwrite_with_background: settings.overwrite_with_background,
            ..Self::new()
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Switch tools. Any in-progress drag state and the selection are reset.
    pub fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        self.clear_drag_state();
        self.selection.reset();
    }

    pub fn color(&self) -> u8 {
        self.color
    }

    pub fn set_color(&mut self, bit: u8) {
        self.color = bit & 1;
    }

    /// Swap foreground and background drawing color.
    pub fn toggle_color(&mut self) {
        self.color = 1 - self.color;
    }

    fn clear_drag_state(&mut self) {
        self.drag_anchor = None;
        self.backup = None;
        self.lifted = None;
    }

    // ------------------------------------------------------------------
    // Pointer protocol
    // ------------------------------------------------------------------

    /// Pointer pressed at a sprite-space coordinate.
    pub fn pointer_down(&mut self, p: Point) {
        self.last_pointer = Some(p);
        self.drag_anchor = Some(p);
        match self.tool {
            Tool::Pixel => {
                self.history.push_undo_state(&self.document);
                let color = self.color;
                self.document.frame_mut().set(p.x, p.y, color);
            }
            Tool::Fill => {
                self.history.push_undo_state(&self.document);
                let color = self.color;
                self.document.frame_mut().fill(p.x, p.y, color);
            }
            Tool::Line => {
                self.history.push_undo_state(&self.document);
                self.backup = Some(self.document.frame().clone());
                // Provisional endpoint at the anchor so a click shows a dot.
                let color = self.color;
                self.document.frame_mut().draw_line(p.x, p.y, p.x, p.y, color);
            }
            Tool::Move => {
                self.history.push_undo_state(&self.document);
                let mut backup = self.document.frame().clone();
                if self.selection.active {
                    let (left, top) = (self.selection.offset_left(), self.selection.offset_top());
                    let (w, h) = (self.selection.width(), self.selection.height());
                    let content = extract_region(&backup, left, top, w, h);
                    clear_region(&mut backup, left, top, w, h);
                    self.lifted = Some(LiftedSelection { content, left, top });
                }
                self.backup = Some(backup);
            }
            Tool::Select => {
                self.selection.begin(p);
            }
        }
    }

    /// Pointer moved. `held` is true while the button is down; hover moves
    /// still update the paste anchor but mutate nothing.
    pub fn pointer_move(&mut self, p: Point, held: bool) {
        self.last_pointer = Some(p);
        if !held {
            return;
        }
        match self.tool {
            Tool::Pixel => {
                let color = self.color;
                self.document.frame_mut().set(p.x, p.y, color);
            }
            Tool::Fill => {
                // Deliberate: each held move is an independent fill, so a
                // drag across regions fills each one it crosses.
                let color = self.color;
                self.document.frame_mut().fill(p.x, p.y, color);
            }
            Tool::Line => {
                if let (Some(anchor), Some(backup)) = (self.drag_anchor, self.backup.as_ref()) {
                    let color = self.color;
                    let mut frame = backup.clone();
                    frame.draw_line(anchor.x, anchor.y, p.x, p.y, color);
                    *self.document.frame_mut() = frame;
                }
            }
            Tool::Move => {
                if let (Some(anchor), Some(backup)) = (self.drag_anchor, self.backup.as_ref()) {
                    let dx = p.x - anchor.x;
                    let dy = p.y - anchor.y;
                    let frame = match &self.lifted {
                        Some(lifted) => {
                            let mut composed = backup.clone();
                            composite(
                                &mut composed,
                                &lifted.content,
                                lifted.left + dx,
                                lifted.top + dy,
                                self.overwrite_with_background,
                            );
                            composed
                        }
                        None => shifted(backup, dx, dy),
                    };
                    *self.document.frame_mut() = frame;
                }
            }
            Tool::Select => {
                if self.selection.has_started {
                    self.selection.update(p);
                }
            }
        }
    }

    /// Pointer released.
    pub fn pointer_up(&mut self, p: Point) {
        match self.tool {
            Tool::Select => {
                if self.selection.has_started {
                    self.selection.update(p);
                    self.selection.finish();
                }
            }
            Tool::Move => {
                // A completed selection move leaves the pixels where they
                // landed and drops the marquee.
                if self.lifted.is_some() {
                    self.selection.reset();
                }
            }
            // Line preview is already final in the buffer.
            _ => {}
        }
        self.clear_drag_state();
    }

    /// Pointer left the canvas; the paste anchor is no longer known.
    pub fn pointer_leave(&mut self) {
        self.last_pointer = None;
    }

    // ------------------------------------------------------------------
    // Clipboard
    // ------------------------------------------------------------------

    /// Copy the active selection into the clipboard. Non-mutating; no-op
    /// without an active selection.
    pub fn copy(&mut self) {
        if !self.selection.active {
            return;
        }
        self.clipboard = Some(extract_region(
            self.document.frame(),
            self.selection.offset_left(),
            self.selection.offset_top(),
            self.selection.width(),
            self.selection.height(),
        ));
    }

    /// Copy the active selection, then zero its source region.
    pub fn cut(&mut self) {
        if !self.selection.active {
            return;
        }
        self.copy();
        self.history.push_undo_state(&self.document);
        let (left, top) = (self.selection.offset_left(), self.selection.offset_top());
        let (w, h) = (self.selection.width(), self.selection.height());
        clear_region(self.document.frame_mut(), left, top, w, h);
    }

    /// Write the clipboard into the frame anchored at the last known
    /// pointer position. No-op without clipboard content or a position.
    pub fn paste(&mut self) {
        let (clip, at) = match (self.clipboard.as_ref(), self.last_pointer) {
            (Some(c), Some(p)) => (c.clone(), p),
            _ => return,
        };
        self.history.push_undo_state(&self.document);
        composite(self.document.frame_mut(), &clip, at.x, at.y, true);
    }

    pub fn has_clipboard(&self) -> bool {
        self.clipboard.is_some()
    }

    // ------------------------------------------------------------------
    // Global edit actions (each snapshotted before mutating)
    // ------------------------------------------------------------------

    /// Zero-fill the current frame.
    pub fn clear_frame(&mut self) {
        self.history.push_undo_state(&self.document);
        let sprite = self.document.sprite_mut();
        let blank = PixelFrame::new(sprite.width, sprite.height, 0);
        *sprite.frame_mut() = blank;
    }

    /// Invert every pixel of the current frame.
    pub fn invert_frame(&mut self) {
        self.history.push_undo_state(&self.document);
        self.document.frame_mut().invert();
    }

    /// Mirror the current frame across an axis.
    pub fn mirror_frame(&mut self, axis: Axis) {
        self.history.push_undo_state(&self.document);
        self.document.frame_mut().mirror(axis);
    }

    /// Append a blank frame and select it.
    pub fn add_frame(&mut self) {
        self.history.push_undo_state(&self.document);
        let sprite = self.document.sprite_mut();
        sprite.frames.push(PixelFrame::new(sprite.width, sprite.height, 0));
        sprite.current_frame = sprite.frames.len() - 1;
    }

    /// Deep-copy the current frame, insert the copy right after it, and
    /// select the copy.
    pub fn duplicate_frame(&mut self) {
        self.history.push_undo_state(&self.document);
        let sprite = self.document.sprite_mut();
        let copy = sprite.frame().clone();
        sprite.frames.insert(sprite.current_frame + 1, copy);
        sprite.current_frame += 1;
    }

    /// Remove the current frame. Refuses when it is the last one.
    pub fn delete_frame(&mut self) {
        if self.document.sprite().frames.len() <= 1 {
            return;
        }
        self.history.push_undo_state(&self.document);
        let sprite = self.document.sprite_mut();
        sprite.frames.remove(sprite.current_frame);
        sprite.current_frame = sprite.current_frame.min(sprite.frames.len() - 1);
    }

    /// Reverse the frame order in place.
    pub fn reverse_frames(&mut self) {
        self.history.push_undo_state(&self.document);
        self.document.sprite_mut().frames.reverse();
    }

    /// Resize the current sprite and all of its frames.
    pub fn resize_sprite(&mut self, width: u32, height: u32) {
        self.history.push_undo_state(&self.document);
        self.document.sprite_mut().resize(width, height);
    }

    /// Translate the whole current frame by a delta, dropping pixels that
    /// land outside the canvas.
    pub fn shift_pixels(&mut self, dx: i32, dy: i32) {
        self.history.push_undo_state(&self.document);
        let moved = shifted(self.document.frame(), dx, dy);
        *self.document.frame_mut() = moved;
    }

    /// Append a blank sprite and select it.
    pub fn add_sprite(&mut self) {
        self.history.push_undo_state(&self.document);
        self.document.add_sprite();
    }

    /// Remove a sprite. Refuses to remove the last remaining one.
    pub fn delete_sprite(&mut self, index: usize) {
        if self.document.sprites.len() <= 1 || index >= self.document.sprites.len() {
            return;
        }
        self.history.push_undo_state(&self.document);
        self.document.delete_sprite(index);
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    pub fn undo(&mut self) {
        self.clear_drag_state();
        self.history.undo(&mut self.document);
    }

    pub fn redo(&mut self) {
        self.clear_drag_state();
        self.history.redo(&mut self.document);
    }
}

/// Copy a rectangular region out of a frame. Cells outside the frame read
/// as background.
fn extract_region(frame: &PixelFrame, left: i32, top: i32, w: i32, h: i32) -> PixelFrame {
    let mut region = PixelFrame::new(w.max(0) as u32, h.max(0) as u32, 0);
    for y in 0..h {
        for x in 0..w {
            let bit = frame.get(left + x, top + y).unwrap_or(0);
            region.set(x, y, bit);
        }
    }
    region
}

/// Zero-fill a rectangular region of a frame.
fn clear_region(frame: &mut PixelFrame, left: i32, top: i32, w: i32, h: i32) {
    for y in 0..h {
        for x in 0..w {
            frame.set(left + x, top + y, 0);
        }
    }
}

/// Paste `content` into `frame` with its top-left corner at (left, top).
///
/// With `overwrite_background`, background cells of the content overwrite
/// whatever is at the destination; otherwise only foreground cells are
/// written and the destination shows through background cells.
fn composite(
    frame: &mut PixelFrame,
    content: &PixelFrame,
    left: i32,
    top: i32,
    overwrite_background: bool,
) {
    for y in 0..content.height() as i32 {
        for x in 0..content.width() as i32 {
            let bit = content.get(x, y).unwrap_or(0);
            if bit == 1 || overwrite_background {
                frame.set(left + x, top + y, bit);
            }
        }
    }
}

/// A copy of `frame` translated by (dx, dy), destination-clipped.
fn shifted(frame: &PixelFrame, dx: i32, dy: i32) -> PixelFrame {
    let mut moved = PixelFrame::new(frame.width(), frame.height(), 0);
    for y in 0..frame.height() as i32 {
        for x in 0..frame.width() as i32 {
            if let Some(bit) = frame.get(x, y) {
                moved.set(x + dx, y + dy, bit);
            }
        }
    }
    moved
}
