//! Packing 1-bit frames into byte arrays for microcontroller displays.
//!
//! Two layouts are produced. Vertical (paged) order matches SSD1306-style
//! OLED controllers: the canvas is cut into 8-row pages and each byte holds
//! one column of a page, least significant bit topmost. Horizontal order is
//! plain row-major: each byte holds 8 consecutive pixels of one row, most
//! significant bit leftmost. Partial pages and partial bytes pad with zeros.

use crate::frame::PixelFrame;
use crate::sprite::Sprite;
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Byte layout for packed output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackOrder {
    /// 8-row pages, one byte per column per page, bit 0 topmost.
    #[default]
    Vertical,
    /// Row-major, 8 columns per byte, bit 7 leftmost.
    Horizontal,
}

/// Pack a single frame into bytes.
pub fn pack_frame(frame: &PixelFrame, order: PackOrder) -> Vec<u8> {
    match order {
        PackOrder::Vertical => pack_vertical(frame),
        PackOrder::Horizontal => pack_horizontal(frame),
    }
}

/// Pack every frame of a sprite, concatenated in frame order.
pub fn pack_sprite(sprite: &Sprite, order: PackOrder) -> Vec<u8> {
    let mut out = Vec::new();
    for frame in &sprite.frames {
        out.extend(pack_frame(frame, order));
    }
    out
}

fn pack_vertical(frame: &PixelFrame) -> Vec<u8> {
    let pages = frame.height().div_ceil(8);
    let mut out = Vec::with_capacity((pages * frame.width()) as usize);
    for page in 0..pages {
        for x in 0..frame.width() {
            let mut byte = 0u8;
            for bit in 0..8 {
                let y = page * 8 + bit;
                if frame.get(x as i32, y as i32) == Some(1) {
                    byte |= 1 << bit;
                }
            }
            out.push(byte);
        }
    }
    out
}

fn pack_horizontal(frame: &PixelFrame) -> Vec<u8> {
    let row_bytes = frame.width().div_ceil(8);
    let mut out = Vec::with_capacity((row_bytes * frame.height()) as usize);
    for y in 0..frame.height() {
        for chunk in 0..row_bytes {
            let mut byte = 0u8;
            for bit in 0..8 {
                let x = chunk * 8 + bit;
                if frame.get(x as i32, y as i32) == Some(1) {
                    byte |= 0x80 >> bit;
                }
            }
            out.push(byte);
        }
    }
    out
}

/// Format a sprite as a C byte-array listing, one commented block per
/// frame, twelve bytes per line.
pub fn code_listing(sprite: &Sprite, order: PackOrder) -> String {
    let order_name = match order {
        PackOrder::Vertical => "vertical",
        PackOrder::Horizontal => "horizontal",
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "// {}: {}x{}, {} frame(s), {} byte order",
        sprite.file_name,
        sprite.width,
        sprite.height,
        sprite.frames.len(),
        order_name,
    );
    let _ = writeln!(out, "const unsigned char {}[] = {{", sprite.file_name);
    for (n, frame) in sprite.frames.iter().enumerate() {
        let _ = writeln!(out, "  // frame {}", n);
        let packed = pack_frame(frame, order);
        for line in packed.chunks(12) {
            let rendered: Vec<String> = line.iter().map(|b| format!("0x{:02X}", b)).collect();
            let _ = writeln!(out, "  {},", rendered.join(", "));
        }
    }
    out.push_str("};\n");
    out
}
