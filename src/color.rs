//! Hex color string parsing
//!
//! Supports `#RGB`, `#RGBA`, `#RRGGBB`, and `#RRGGBBAA`. Settings files use
//! these for the render palette (foreground, background, ghost overlay).

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a hex color string into an RGBA color.
///
/// - `#RGB` - 3-digit hex, each digit is doubled (e.g., `#F00` -> red)
/// - `#RGBA` - 4-digit hex, each digit is doubled
/// - `#RRGGBB` - 6-digit hex, alpha defaults to 255 (opaque)
/// - `#RRGGBBAA` - 8-digit hex, explicit alpha channel
///
/// # Examples
///
/// ```
/// use spritemaker::color::parse_color;
///
/// let red = parse_color("#F00").unwrap();
/// assert_eq!(red, image::Rgba([255, 0, 0, 255]));
///
/// let ghost = parse_color("#555555ff").unwrap();
/// assert_eq!(ghost, image::Rgba([85, 85, 85, 255]));
/// ```
///
/// # Errors
///
/// Returns `ColorError` if the input is invalid or unparseable.
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    let mut digits = Vec::with_capacity(hex.len());
    for c in hex.chars() {
        let d = c.to_digit(16).ok_or(ColorError::InvalidHex(c))?;
        digits.push(d as u8);
    }

    // Short forms double each digit (0xF -> 0xFF); long forms pair them.
    match *digits.as_slice() {
        [r, g, b] => Ok(Rgba([r * 17, g * 17, b * 17, 255])),
        [r, g, b, a] => Ok(Rgba([r * 17, g * 17, b * 17, a * 17])),
        [r1, r0, g1, g0, b1, b0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, 255]))
        }
        [r1, r0, g1, g0, b1, b0, a1, a0] => {
            Ok(Rgba([r1 * 16 + r0, g1 * 16 + g0, b1 * 16 + b0, a1 * 16 + a0]))
        }
        _ => Err(ColorError::InvalidLength(hex.len())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#fff").unwrap(), Rgba([255, 255, 255, 255]));
        assert_eq!(parse_color("#f00a").unwrap(), Rgba([255, 0, 0, 170]));
        assert_eq!(parse_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("#55555580").unwrap(), Rgba([85, 85, 85, 128]));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("red"), Err(ColorError::MissingHash));
        assert_eq!(parse_color("#"), Err(ColorError::InvalidLength(0)));
        assert_eq!(parse_color("#ff"), Err(ColorError::InvalidLength(2)));
        assert_eq!(parse_color("#fffffffff"), Err(ColorError::InvalidLength(9)));
        assert_eq!(parse_color("#ggg"), Err(ColorError::InvalidHex('g')));
    }

    #[test]
    fn test_short_digits_double() {
        assert_eq!(parse_color("#abc").unwrap(), parse_color("#aabbcc").unwrap());
        assert_eq!(parse_color("#abcd").unwrap(), parse_color("#aabbccdd").unwrap());
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(parse_color("#AbCdEf").unwrap(), parse_color("#abcdef").unwrap());
    }
}
