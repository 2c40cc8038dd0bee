//! Colors for ideograms and region overlays.
//!
//! Colors are plain [`RGBColor`] values from `plotters`. Region sets are
//! colored by their position in the overlay list, cycling through
//! [`PALETTE`].

use plotters::style::RGBColor;

use crate::error::KaryopypeError;

/// Default ideogram fill.
pub const WHITESMOKE: RGBColor = RGBColor(245, 245, 245);

/// Default ideogram outline.
pub const OUTLINE: RGBColor = RGBColor(0, 0, 0);

/// The overlay palette; the first entry is the red used for a single region set.
pub const PALETTE: [RGBColor; 8] = [
    RGBColor(255, 0, 0),     // red
    RGBColor(0, 0, 255),     // blue
    RGBColor(0, 128, 0),     // green
    RGBColor(255, 165, 0),   // orange
    RGBColor(128, 0, 128),   // purple
    RGBColor(0, 206, 209),   // darkturquoise
    RGBColor(165, 42, 42),   // brown
    RGBColor(255, 20, 147),  // deeppink
];

/// The palette color for the region set at `index` in the overlay list.
pub fn palette_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// Parse a color given by name (`red`, `whitesmoke`, `k`, ...) or as `#rrggbb`.
pub fn parse_color(color: &str) -> Result<RGBColor, KaryopypeError> {
    let invalid = || KaryopypeError::InvalidColor(color.to_string());
    let name = color.trim().to_ascii_lowercase();

    if let Some(hex) = name.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        return Ok(RGBColor(channel(0)?, channel(2)?, channel(4)?));
    }

    let rgb = match name.as_str() {
        "k" | "black" => RGBColor(0, 0, 0),
        "w" | "white" => RGBColor(255, 255, 255),
        "whitesmoke" => WHITESMOKE,
        "r" | "red" => PALETTE[0],
        "b" | "blue" => PALETTE[1],
        "g" | "green" => PALETTE[2],
        "orange" => PALETTE[3],
        "purple" => PALETTE[4],
        "darkturquoise" => PALETTE[5],
        "brown" => PALETTE[6],
        "deeppink" => PALETTE[7],
        "grey" | "gray" => RGBColor(128, 128, 128),
        "lightgrey" | "lightgray" => RGBColor(211, 211, 211),
        _ => return Err(invalid()),
    };
    Ok(rgb)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), RGBColor(255, 0, 0));
        assert_eq!(palette_color(1), RGBColor(0, 0, 255));
        assert_eq!(palette_color(PALETTE.len()), palette_color(0));
    }

    #[test]
    fn test_parse_named_and_hex() {
        assert_eq!(parse_color("red").unwrap(), RGBColor(255, 0, 0));
        assert_eq!(parse_color("k").unwrap(), RGBColor(0, 0, 0));
        assert_eq!(parse_color("WhiteSmoke").unwrap(), WHITESMOKE);
        assert_eq!(parse_color("#1a2B3c").unwrap(), RGBColor(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            parse_color("chartreuse-ish"),
            Err(KaryopypeError::InvalidColor(_))
        ));
        assert!(parse_color("#12345").is_err());
        assert!(parse_color("#zz0000").is_err());
    }
}
