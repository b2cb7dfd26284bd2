//! spritemaker - Library for editing and exporting 1-bit sprite animations
//!
//! This library provides functionality to:
//! - Edit 1-bit pixel frames with pixel, line, fill, move, and select tools
//! - Manage multi-frame, multi-sprite documents with undo/redo
//! - Import raster images and animated GIFs as 1-bit frames
//! - Export frames as BMP files, packed byte arrays, and animated GIFs

pub mod cli;
pub mod color;
pub mod document;
pub mod editor;
pub mod export;
pub mod frame;
pub mod gif;
pub mod history;
pub mod import;
pub mod render;
pub mod selection;
pub mod settings;
pub mod sprite;
