//! Rectangular selection over sprite-space coordinates.

use serde::{Deserialize, Serialize};

/// A point in sprite-space coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned selection rectangle defined by two unordered corners.
///
/// `start` is the drag anchor and `end` tracks the pointer; neither corner
/// is required to be top-left. Consumers use the derived accessors, which
/// normalize the corner order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SelectionBox {
    pub start: Point,
    pub end: Point,
    /// A drag is in progress.
    pub has_started: bool,
    /// The selection is finalized and usable by move/copy/cut.
    pub active: bool,
}

impl SelectionBox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selection width, |start.x - end.x|.
    pub fn width(&self) -> i32 {
        (self.start.x - self.end.x).abs()
    }

    /// Selection height, |start.y - end.y|.
    pub fn height(&self) -> i32 {
        (self.start.y - self.end.y).abs()
    }

    /// Leftmost column of the selection.
    pub fn offset_left(&self) -> i32 {
        self.start.x.min(self.end.x)
    }

    /// Topmost row of the selection.
    pub fn offset_top(&self) -> i32 {
        self.start.y.min(self.end.y)
    }

    /// Begin a drag at the anchor corner.
    pub fn begin(&mut self, anchor: Point) {
        self.start = anchor;
        self.end = anchor;
        self.has_started = true;
        self.active = false;
    }

    /// Update the tracking corner during a drag.
    pub fn update(&mut self, corner: Point) {
        self.end = corner;
    }

    /// Finish the drag. A zero-area box (either axis < 1) self-cancels.
    pub fn finish(&mut self) {
        self.has_started = false;
        self.active = self.width() >= 1 && self.height() >= 1;
    }

    /// Drop the selection entirely (tool switch, completed move).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
