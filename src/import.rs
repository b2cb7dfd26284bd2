//! Importing raster images and animated GIFs as 1-bit frames.
//!
//! Color images collapse to bits by thresholding. The default maps any
//! pixel with nonzero alpha to a lit pixel, which suits transparent-background
//! pixel art. Luminance mode instead lights pixels whose RGB mean exceeds
//! the midpoint, for opaque images. Oversized inputs are scaled down to fit
//! a maximum dimension with nearest-neighbor sampling so edges stay hard.

use crate::frame::PixelFrame;
use crate::sprite::Sprite;
use image::codecs::gif::GifDecoder;
use image::imageops::FilterType;
use image::{AnimationDecoder, DynamicImage, ImageDecoder, RgbaImage};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

/// Error type for import operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ImportError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Image decoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    /// No input files were given
    #[error("no input files")]
    NoInput,
}

/// How color pixels collapse to bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Threshold {
    /// Lit where alpha is nonzero.
    #[default]
    Alpha,
    /// Lit where the RGB mean exceeds the midpoint.
    Luminance,
}

/// Convert a decoded image to a 1-bit frame, downscaling to fit
/// `max_size` first when given.
pub fn frame_from_image(
    image: &DynamicImage,
    threshold: Threshold,
    max_size: Option<u32>,
) -> PixelFrame {
    let rgba = fit_to_max(image.to_rgba8(), max_size);
    let (width, height) = rgba.dimensions();
    let mut frame = PixelFrame::new(width, height, 0);
    frame.from_rgba(rgba.as_raw(), threshold == Threshold::Alpha);
    frame
}

/// Load one image file as a 1-bit frame.
pub fn load_frame(
    path: &Path,
    threshold: Threshold,
    max_size: Option<u32>,
) -> Result<PixelFrame, ImportError> {
    let image = image::open(path)?;
    Ok(frame_from_image(&image, threshold, max_size))
}

/// Build a sprite from image files, one frame per file in argument order.
///
/// The first file fixes the sprite dimensions; later frames are resized to
/// match. The sprite takes its name from the first file's stem.
pub fn sprite_from_images(
    paths: &[impl AsRef<Path>],
    threshold: Threshold,
    max_size: Option<u32>,
) -> Result<Sprite, ImportError> {
    let first = paths.first().ok_or(ImportError::NoInput)?;
    let first_frame = load_frame(first.as_ref(), threshold, max_size)?;

    let mut sprite = Sprite::with_size(first_frame.width(), first_frame.height());
    sprite.file_name = file_stem(first.as_ref());
    *sprite.frame_mut() = first_frame;

    for path in &paths[1..] {
        let mut frame = load_frame(path.as_ref(), threshold, max_size)?;
        frame.resize(sprite.width, sprite.height);
        sprite.frames.push(frame);
    }
    Ok(sprite)
}

/// Build one sprite per image file, each named after its file stem.
pub fn sprites_from_images(
    paths: &[impl AsRef<Path>],
    threshold: Threshold,
    max_size: Option<u32>,
) -> Result<Vec<Sprite>, ImportError> {
    if paths.is_empty() {
        return Err(ImportError::NoInput);
    }
    let mut sprites = Vec::with_capacity(paths.len());
    for path in paths {
        let frame = load_frame(path.as_ref(), threshold, max_size)?;
        let mut sprite = Sprite::with_size(frame.width(), frame.height());
        sprite.file_name = file_stem(path.as_ref());
        *sprite.frame_mut() = frame;
        sprites.push(sprite);
    }
    Ok(sprites)
}

/// Build a sprite from an animated GIF, one frame per GIF frame.
///
/// Frame patches smaller than the logical screen composite at their
/// declared offsets onto a transparent canvas before thresholding.
pub fn sprite_from_gif(path: &Path, threshold: Threshold) -> Result<Sprite, ImportError> {
    let file = File::open(path)?;
    let decoder = GifDecoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions();

    let mut sprite = Sprite::with_size(width, height);
    sprite.file_name = file_stem(path);

    let mut frames = Vec::new();
    for frame in decoder.into_frames() {
        let frame = frame?;
        let mut canvas = RgbaImage::new(width, height);
        let (left, top) = (frame.left(), frame.top());
        for (x, y, pixel) in frame.buffer().enumerate_pixels() {
            let (cx, cy) = (left + x, top + y);
            if cx < width && cy < height {
                canvas.put_pixel(cx, cy, *pixel);
            }
        }
        let mut bits = PixelFrame::new(width, height, 0);
        bits.from_rgba(canvas.as_raw(), threshold == Threshold::Alpha);
        frames.push(bits);
    }

    if !frames.is_empty() {
        sprite.frames = frames;
    }
    Ok(sprite)
}

fn fit_to_max(image: RgbaImage, max_size: Option<u32>) -> RgbaImage {
    let Some(max) = max_size else {
        return image;
    };
    let (w, h) = image.dimensions();
    let largest = w.max(h);
    if max == 0 || largest <= max {
        return image;
    }
    let new_w = (w * max / largest).max(1);
    let new_h = (h * max / largest).max(1);
    image::imageops::resize(&image, new_w, new_h, FilterType::Nearest)
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("new_sprite")
        .to_string()
}
