//! Color value resolution.
//!
//! A variant maps color tokens to raw values that come in exactly two
//! shapes: a hex literal (`#fff`, `#AA5500`) used as-is, or the name of a
//! terminal-scheme key (`background`, `color12`) resolved through the
//! [`Palette`]. Anything that does not look like a hex color is treated
//! as a scheme key; an unknown key is a hard error, never a silent skip.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};
use crate::xresources::Palette;

/// `#RGB` or `#RRGGBB`, digits case-insensitive.
static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6})$").expect("hex color pattern")
});

/// Whether `value` is a hex color literal.
pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Resolves a raw variant value to a concrete hex color.
///
/// Hex literals pass through unchanged; everything else is looked up as a
/// terminal-scheme key.
pub fn resolve<'a>(raw: &'a str, palette: &'a Palette) -> Result<&'a str> {
    if is_hex_color(raw) {
        return Ok(raw);
    }
    palette
        .get(raw)
        .ok_or_else(|| Error::UnknownPaletteKey(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_hex_literals_pass_through() {
        let palette = Palette::default();
        assert_eq!(resolve("#123456", &palette).unwrap(), "#123456");
        assert_eq!(resolve("#abc", &palette).unwrap(), "#abc");
        assert_eq!(resolve("#AbCdEf", &palette).unwrap(), "#AbCdEf");
    }

    #[test]
    fn test_scheme_keys_resolve_through_palette() {
        let palette = Palette::default();
        assert_eq!(resolve("background", &palette).unwrap(), "#000000");
        assert_eq!(resolve("color9", &palette).unwrap(), "#FF5555");
    }

    #[test]
    fn test_unknown_key_fails() {
        let palette = Palette::default();
        let err = resolve("color99", &palette).unwrap_err();
        assert!(matches!(err, Error::UnknownPaletteKey(key) if key == "color99"));
    }

    #[test]
    fn test_malformed_hex_is_treated_as_a_key() {
        let palette = Palette::default();
        // Wrong digit counts fall through to (failing) key lookup.
        assert!(resolve("#12345", &palette).is_err());
        assert!(resolve("#1234567", &palette).is_err());
        assert!(resolve("#12g456", &palette).is_err());
    }

    proptest! {
        #[test]
        fn hex_resolution_is_identity(hex in "#([0-9a-fA-F]{3}|[0-9a-fA-F]{6})") {
            let palette = Palette::default();
            prop_assert_eq!(resolve(&hex, &palette).unwrap(), hex.as_str());
        }

        #[test]
        fn resolution_never_invents_colors(key in "[a-z][a-zA-Z0-9]{0,11}") {
            let palette = Palette::default();
            match resolve(&key, &palette) {
                Ok(color) => prop_assert_eq!(Some(color), palette.get(&key)),
                Err(_) => prop_assert!(palette.get(&key).is_none()),
            }
        }
    }
}
