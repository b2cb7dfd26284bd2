//! 1-bit raster frame buffer and its drawing primitives.
//!
//! A [`PixelFrame`] stores one bit per pixel in row-major order
//! (`index = x + width * y`). All coordinate-taking operations accept
//! signed coordinates and silently ignore anything outside the canvas:
//! drag gestures routinely leave the canvas mid-stroke, and the drawing
//! tools rely on being able to pass those coordinates through unchecked.

use serde::{Deserialize, Serialize};

/// Mirror axis for [`PixelFrame::mirror`].
///
/// Naming follows "mirror across this axis": `Horizontal` reverses column
/// order (x -> width-1-x), `Vertical` reverses row order (y -> height-1-y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A single 1-bit raster frame.
///
/// Invariant: `data.len() == width * height` and every element is 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelFrame {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelFrame {
    /// Create a frame filled with a single bit value.
    pub fn new(width: u32, height: u32, fill: u8) -> Self {
        Self {
            width,
            height,
            data: vec![fill & 1; (width * height) as usize],
        }
    }

    /// Create a frame from an existing bit buffer.
    ///
    /// The buffer length must equal `width * height`; every element is
    /// normalized to 0/1.
    pub fn from_bits(width: u32, height: u32, bits: &[u8]) -> Option<Self> {
        if bits.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data: bits.iter().map(|b| u8::from(*b != 0)).collect(),
        })
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw bit buffer, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some((x as u32 + self.width * y as u32) as usize)
    }

    /// Get the bit at (x, y). Returns `None` if out of bounds.
    pub fn get(&self, x: i32, y: i32) -> Option<u8> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Set the bit at (x, y). Out-of-bounds coordinates are ignored.
    pub fn set(&mut self, x: i32, y: i32, bit: u8) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = bit & 1;
        }
    }

    /// Draw a line between two points using Bresenham's algorithm.
    ///
    /// Uses the axis-swapped ("steep") variant for slopes steeper than 1 so
    /// the painted path is always a connected 1-pixel-wide run regardless of
    /// octant. Both endpoints are painted when in bounds; segments that leave
    /// the canvas are clipped by [`set`](Self::set).
    pub fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, bit: u8) {
        let steep = (y1 - y0).abs() > (x1 - x0).abs();

        let (mut x0, mut y0, mut x1, mut y1) = if steep {
            (y0, x0, y1, x1)
        } else {
            (x0, y0, x1, y1)
        };
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }

        let dx = x1 - x0;
        let dy = (y1 - y0).abs();
        let ystep = if y0 < y1 { 1 } else { -1 };

        let mut err = dx / 2;
        let mut y = y0;
        for x in x0..=x1 {
            if steep {
                self.set(y, x, bit);
            } else {
                self.set(x, y, bit);
            }
            err -= dy;
            if err < 0 {
                y += ystep;
                err += dx;
            }
        }
    }

    /// Flood fill the 4-connected region containing (x, y).
    ///
    /// Scanline-stack algorithm rather than naive 4-way recursion, so large
    /// regions cannot blow the call stack. Each popped seed is expanded left
    /// and right along its row while the seed color matches, painting as it
    /// goes; new seeds are then pushed one row above and below the painted
    /// span. No-op when the seed is out of bounds or already the fill color.
    pub fn fill(&mut self, x: i32, y: i32, bit: u8) {
        let bit = bit & 1;
        let seed_color = match self.get(x, y) {
            Some(c) => c,
            None => return,
        };
        if seed_color == bit {
            return;
        }

        let mut stack = vec![(x, y)];
        while let Some((sx, sy)) = stack.pop() {
            // Expand left from the seed, inclusive.
            let mut lx = sx;
            while self.get(lx, sy) == Some(seed_color) {
                self.set(lx, sy, bit);
                lx -= 1;
            }
            // Expand right from the cell after the seed.
            let mut rx = sx + 1;
            while self.get(rx, sy) == Some(seed_color) {
                self.set(rx, sy, bit);
                rx += 1;
            }
            // Seed the rows above and below the painted span.
            for nx in (lx + 1)..rx {
                if self.get(nx, sy + 1) == Some(seed_color) {
                    stack.push((nx, sy + 1));
                }
                if self.get(nx, sy - 1) == Some(seed_color) {
                    stack.push((nx, sy - 1));
                }
            }
        }
    }

    /// Flip every bit in place.
    pub fn invert(&mut self) {
        for bit in &mut self.data {
            *bit = 1 - *bit;
        }
    }

    /// Reflect the buffer across the given axis.
    pub fn mirror(&mut self, axis: Axis) {
        let mut mirrored = vec![0u8; self.data.len()];
        for y in 0..self.height {
            for x in 0..self.width {
                let (sx, sy) = match axis {
                    Axis::Horizontal => (self.width - 1 - x, y),
                    Axis::Vertical => (x, self.height - 1 - y),
                };
                mirrored[(x + self.width * y) as usize] =
                    self.data[(sx + self.width * sy) as usize];
            }
        }
        self.data = mirrored;
    }

    /// Resize the frame, anchored at the top-left origin.
    ///
    /// Pixels in the overlapping region are preserved; new area is
    /// zero-filled; shrinking truncates on the right/bottom. No-op when the
    /// dimensions are unchanged.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == self.width && new_height == self.height {
            return;
        }
        let mut resized = PixelFrame::new(new_width, new_height, 0);
        for y in 0..new_height.min(self.height) {
            for x in 0..new_width.min(self.width) {
                resized.data[(x + new_width * y) as usize] =
                    self.data[(x + self.width * y) as usize];
            }
        }
        *self = resized;
    }

    /// Import pixels from a same-sized RGBA byte buffer.
    ///
    /// With `use_alpha`, a pixel is foreground when its alpha is nonzero.
    /// Otherwise the RGB channel average is compared against the midpoint
    /// threshold (122.5). Buffers of the wrong length are ignored.
    pub fn from_rgba(&mut self, rgba: &[u8], use_alpha: bool) {
        if rgba.len() != self.data.len() * 4 {
            return;
        }
        for (i, px) in rgba.chunks_exact(4).enumerate() {
            let lit = if use_alpha {
                px[3] > 0
            } else {
                (px[0] as f32 + px[1] as f32 + px[2] as f32) / 3.0 > 122.5
            };
            self.data[i] = lit as u8;
        }
    }
}
