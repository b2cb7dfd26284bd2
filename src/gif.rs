//! Animated GIF rendering

use crate::export::ExportError;
use crate::render::{render_frame, scale_image};
use crate::settings::Palette;
use crate::sprite::Sprite;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame, RgbaImage};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Encode a sequence of RGBA frames as an animated GIF.
///
/// GIF delays have centisecond resolution, so `delay_ms` is rounded down
/// to the nearest 10ms with a 10ms floor. An empty frame list writes
/// nothing and succeeds.
pub fn render_gif(
    frames: &[RgbaImage],
    delay_ms: u32,
    loop_anim: bool,
    path: &Path,
) -> Result<(), ExportError> {
    if frames.is_empty() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let mut encoder = GifEncoder::new(writer);

    let repeat = if loop_anim {
        Repeat::Infinite
    } else {
        Repeat::Finite(0)
    };
    encoder.set_repeat(repeat)?;

    let delay_cs = (delay_ms / 10).max(1);
    for rgba_image in frames {
        let delay = Delay::from_numer_denom_ms(delay_cs * 10, 1);
        let frame = Frame::from_parts(rgba_image.clone(), 0, 0, delay);
        encoder.encode_frame(frame)?;
    }

    Ok(())
}

/// Render every frame of a sprite through the palette at the given scale
/// and encode the result as an animated GIF.
pub fn export_sprite_gif(
    sprite: &Sprite,
    palette: &Palette,
    scale: u32,
    delay_ms: u32,
    loop_anim: bool,
    path: &Path,
) -> Result<(), ExportError> {
    let frames: Vec<RgbaImage> = sprite
        .frames
        .iter()
        .map(|frame| scale_image(render_frame(frame, palette), scale))
        .collect();
    render_gif(&frames, delay_ms, loop_anim, path)
}
