//! Export backends: BMP images and packed byte listings.

use crate::render::render_frame;
use crate::settings::Palette;
use crate::sprite::Sprite;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod bmp;
pub mod bytes;

/// Error type for export operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ExportError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Write raw bytes to a path, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &[u8]) -> Result<(), ExportError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Export every frame of a sprite as a BMP file in `dir`, named
/// `{file_name}_{n}.bmp` with `n` counting from one. Returns the written
/// paths in frame order.
pub fn export_sprite_bmps(
    sprite: &Sprite,
    palette: &Palette,
    header: bmp::BmpHeader,
    dir: &Path,
) -> Result<Vec<PathBuf>, ExportError> {
    let mut paths = Vec::with_capacity(sprite.frames.len());
    for (n, frame) in sprite.frames.iter().enumerate() {
        let image = render_frame(frame, palette);
        let encoded = bmp::encode(&image, header);
        let path = dir.join(format!("{}_{}.bmp", sprite.file_name, n + 1));
        write_file(&path, &encoded)?;
        paths.push(path);
    }
    Ok(paths)
}
