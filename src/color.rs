//! RGB colours: parsing user input, scoring guesses, CSS output

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB colour
///
/// Deserializes from `{ "r", "g", "b" }` or from any string [`parse_color`]
/// accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RgbInput")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lower-case `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// CSS `rgba(..)` string with the given opacity
    pub fn to_css_rgba(&self, alpha: f32) -> String {
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha.clamp(0.0, 1.0))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RgbInput {
    Fields { r: u8, g: u8, b: u8 },
    Text(String),
}

impl TryFrom<RgbInput> for Rgb {
    type Error = String;

    fn try_from(input: RgbInput) -> Result<Self, Self::Error> {
        match input {
            RgbInput::Fields { r, g, b } => Ok(Rgb::new(r, g, b)),
            RgbInput::Text(text) => {
                parse_color(&text).ok_or_else(|| format!("invalid colour {:?}", text))
            }
        }
    }
}

/// Parse `"R G B"`, `"R,G,B"`, `#RGB` or `#RRGGBB` (the `#` is optional)
///
/// Returns `None` for anything malformed or out of range, so callers can show
/// a message instead of failing.
pub fn parse_color(input: &str) -> Option<Rgb> {
    let s = input.trim();

    let spaced: Vec<&str> = s.split_whitespace().collect();
    if spaced.len() == 3 && spaced.iter().all(|p| is_decimal(p)) {
        return components(&spaced);
    }

    let commas: Vec<&str> = s.split(',').collect();
    if commas.len() == 3 && commas.iter().all(|p| is_decimal(p)) {
        return components(&commas);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let digit = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
            Some(Rgb::new(digit(0)?, digit(1)?, digit(2)?))
        }
        6 => {
            let pair = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Rgb::new(pair(0)?, pair(2)?, pair(4)?))
        }
        _ => None,
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn components(parts: &[&str]) -> Option<Rgb> {
    let c = |i: usize| parts[i].parse::<u8>().ok();
    Some(Rgb::new(c(0)?, c(1)?, c(2)?))
}

/// Guess score from the euclidean RGB distance
///
/// `floor(100 * (0.5 - distance / max_distance))`: 50 for an exact match,
/// -50 for opposite corners of the colour cube.
pub fn color_score(target: Rgb, guess: Rgb) -> i32 {
    let dr = f64::from(target.r) - f64::from(guess.r);
    let dg = f64::from(target.g) - f64::from(guess.g);
    let db = f64::from(target.b) - f64::from(guess.b);
    let distance = (dr * dr + dg * dg + db * db).sqrt();
    let max_distance = (3.0 * 255.0 * 255.0_f64).sqrt();

    (100.0 * (0.5 - distance / max_distance)).floor() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_space_and_comma() {
        assert_eq!(parse_color("255 128 0"), Some(Rgb::new(255, 128, 0)));
        assert_eq!(parse_color("  56,69,112 "), Some(Rgb::new(56, 69, 112)));
        assert_eq!(parse_color("1   2 3"), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_color("#F80"), Some(Rgb::new(0xff, 0x88, 0x00)));
        assert_eq!(parse_color("ff8800"), Some(Rgb::new(0xff, 0x88, 0x00)));
        assert_eq!(parse_color("#5d73b0"), Some(Rgb::new(0x5d, 0x73, 0xb0)));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_color("256 0 0"), None);
        assert_eq!(parse_color("1, 2, 3"), None);
        assert_eq!(parse_color("#12"), None);
        assert_eq!(parse_color("#zzzzzz"), None);
        assert_eq!(parse_color(""), None);
        assert_eq!(parse_color("99999999999 1 1"), None);
    }

    #[test]
    fn test_hex_round_trip_format() {
        assert_eq!(Rgb::new(0x0a, 0xff, 0x00).to_hex(), "#0aff00");
        assert_eq!(Rgb::BLACK.to_css_rgba(0.7), "rgba(0, 0, 0, 0.7)");
    }

    #[test]
    fn test_color_score_extremes() {
        let c = Rgb::new(12, 200, 99);
        assert_eq!(color_score(c, c), 50);
        assert_eq!(color_score(Rgb::BLACK, Rgb::WHITE), -50);
        assert!(color_score(c, Rgb::new(20, 190, 100)) > 45);
    }
}
