//! Hand-rolled BMP encoding for 32-bit RGBA images.
//!
//! Two header flavors are supported. The classic BITMAPINFOHEADER form is
//! readable by effectively every BMP consumer but carries no alpha
//! semantics. The BITMAPV4HEADER form declares explicit BGRA channel masks
//! and an sRGB colorspace so alpha survives in readers that honor it.
//!
//! Both forms write the height as a negative value, which flips the file to
//! top-down row order and lets pixel rows stream out in memory order with no
//! vertical flip.

use image::RgbaImage;

/// Pixels-per-meter resolution recorded in the header, 72 DPI.
const PPM_72DPI: u32 = 2835;

/// Which DIB header to emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BmpHeader {
    /// BITMAPINFOHEADER: 40-byte DIB header, pixel data at offset 54,
    /// BI_RGB compression. Maximum compatibility, no declared alpha.
    #[default]
    Info,
    /// BITMAPV4HEADER: 108-byte DIB header, pixel data at offset 122,
    /// BI_BITFIELDS with explicit BGRA masks and the sRGB colorspace tag.
    V4,
}

impl BmpHeader {
    /// Offset from the start of the file to the pixel array.
    fn data_offset(self) -> u32 {
        match self {
            BmpHeader::Info => 54,
            BmpHeader::V4 => 122,
        }
    }

    fn dib_size(self) -> u32 {
        match self {
            BmpHeader::Info => 40,
            BmpHeader::V4 => 108,
        }
    }
}

/// Encode an RGBA image as a 32-bit uncompressed BMP.
pub fn encode(image: &RgbaImage, header: BmpHeader) -> Vec<u8> {
    let (width, height) = image.dimensions();
    let pixel_bytes = width * height * 4;
    let file_size = header.data_offset() + pixel_bytes;

    let mut out = Vec::with_capacity(file_size as usize);

    // BITMAPFILEHEADER, 14 bytes.
    out.extend_from_slice(b"BM");
    put_u32(&mut out, file_size);
    put_u32(&mut out, 0); // reserved
    put_u32(&mut out, header.data_offset());

    // DIB header.
    put_u32(&mut out, header.dib_size());
    put_i32(&mut out, width as i32);
    put_i32(&mut out, -(height as i32)); // negative height: top-down rows
    put_u16(&mut out, 1); // planes
    put_u16(&mut out, 32); // bits per pixel
    let compression = match header {
        BmpHeader::Info => 0, // BI_RGB
        BmpHeader::V4 => 3,   // BI_BITFIELDS
    };
    put_u32(&mut out, compression);
    put_u32(&mut out, pixel_bytes);
    put_u32(&mut out, PPM_72DPI); // horizontal resolution
    put_u32(&mut out, PPM_72DPI); // vertical resolution
    put_u32(&mut out, 0); // palette colors
    put_u32(&mut out, 0); // important colors

    if header == BmpHeader::V4 {
        // Channel masks over the little-endian pixel dword, matching the
        // BGRA byte order written below.
        put_u32(&mut out, 0x00FF_0000); // red
        put_u32(&mut out, 0x0000_FF00); // green
        put_u32(&mut out, 0x0000_00FF); // blue
        put_u32(&mut out, 0xFF00_0000); // alpha
        put_u32(&mut out, 0x5769_6E20); // LCS_WINDOWS_COLOR_SPACE, 'Win '
        // CIEXYZTRIPLE endpoints and gamma, unused for this colorspace.
        for _ in 0..12 {
            put_u32(&mut out, 0);
        }
    }

    // Pixel array: BGRA, rows top to bottom, no row padding at 32 bpp.
    for pixel in image.pixels() {
        let [r, g, b, a] = pixel.0;
        out.extend_from_slice(&[b, g, r, a]);
    }

    out
}

fn put_u16(out: &mut Vec<u8>, v: u16) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn put_i32(out: &mut Vec<u8>, v: i32) {
    out.extend_from_slice(&v.to_le_bytes());
}
