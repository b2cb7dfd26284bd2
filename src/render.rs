//! Rasterizing frames to RGBA images
//!
//! A frame stores bits; everything that leaves the editor as an image goes
//! through here. The palette maps bit 1 to the foreground color and bit 0 to
//! the background color. Onion skinning composites the previous frame in the
//! ghost color underneath the current frame's lit pixels.

use crate::frame::PixelFrame;
use crate::settings::Palette;
use image::imageops::FilterType;
use image::RgbaImage;

/// Render a frame to an RGBA image at 1:1 scale.
pub fn render_frame(frame: &PixelFrame, palette: &Palette) -> RgbaImage {
    let mut image = RgbaImage::new(frame.width(), frame.height());
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let bit = frame.get(x as i32, y as i32).unwrap_or(0);
            let color = if bit == 1 {
                palette.foreground
            } else {
                palette.background
            };
            image.put_pixel(x, y, color);
        }
    }
    image
}

/// Render a frame with the previous frame ghosted underneath.
///
/// Ghost pixels appear only where the previous frame is lit and the current
/// frame is not. Dimension mismatches between the two frames fall back to a
/// plain render.
pub fn render_frame_with_ghost(
    frame: &PixelFrame,
    previous: &PixelFrame,
    palette: &Palette,
) -> RgbaImage {
    if previous.width() != frame.width() || previous.height() != frame.height() {
        return render_frame(frame, palette);
    }

    let mut image = render_frame(frame, palette);
    for y in 0..frame.height() {
        for x in 0..frame.width() {
            let current = frame.get(x as i32, y as i32).unwrap_or(0);
            let behind = previous.get(x as i32, y as i32).unwrap_or(0);
            if current == 0 && behind == 1 {
                image.put_pixel(x, y, palette.ghost);
            }
        }
    }
    image
}

/// Scale an image by an integer factor using nearest-neighbor
/// interpolation, preserving crisp pixel edges.
pub fn scale_image(image: RgbaImage, factor: u32) -> RgbaImage {
    if factor <= 1 {
        return image;
    }
    let (w, h) = image.dimensions();
    image::imageops::resize(&image, w * factor, h * factor, FilterType::Nearest)
}
