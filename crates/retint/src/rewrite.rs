//! In-place theme file patching.
//!
//! Theme resources are treated as opaque text, never parsed: the
//! descriptor patch and the color rewrite are both targeted text
//! substitutions. Two independent operations live here:
//!
//! - [`patch_descriptor`] rewrites the display-name lines of a theme's
//!   `index.theme` to carry the variant label.
//! - [`rewrite_colors`] replaces every whole-word occurrence of each
//!   variant color token with its resolved hex color.
//!
//! Word-boundary matching is what keeps token replacement safe: a token
//! must never match inside a longer identifier, including another token
//! it is a prefix or suffix of. Replacements run in the variant's
//! declaration order, each over the already-substituted text; resolved
//! hex output never re-matches a token because `#` sits outside the word
//! and no recognized scheme key spells a bare hex string.

use std::fs;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};
use tracing::debug;

use crate::config::Variant;
use crate::error::{Error, Result};
use crate::label;
use crate::resolve::{is_hex_color, resolve};
use crate::xresources::Palette;

/// Mandatory descriptor file at the top of every theme directory.
pub const DESCRIPTOR_FILE: &str = "index.theme";

/// The descriptor lines that carry the theme's display identity.
static DESCRIPTOR_NAME_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^(Name|GtkTheme|MetacityTheme)=(.*)$").expect("descriptor line pattern")
});

/// Rewrites the `Name`, `GtkTheme`, and `MetacityTheme` lines of
/// `theme_dir/index.theme` with the rendered variant label.
///
/// The label template sees `{variant}` and `{original}` (the previous
/// right-hand side of the line). A missing descriptor is fatal for the
/// theme/variant pair: metadata is mandatory.
pub fn patch_descriptor(theme_dir: &Path, variant: &str, readable_name_format: &str) -> Result<()> {
    let path = theme_dir.join(DESCRIPTOR_FILE);
    if !path.is_file() {
        return Err(Error::DescriptorMissing(path));
    }
    let text = fs::read_to_string(&path).map_err(Error::io(&path))?;
    let patched = relabel_descriptor(&text, variant, readable_name_format);
    fs::write(&path, patched).map_err(Error::io(&path))?;
    Ok(())
}

/// Pure descriptor relabeling, separated from the I/O for testability.
pub(crate) fn relabel_descriptor(text: &str, variant: &str, readable_name_format: &str) -> String {
    DESCRIPTOR_NAME_LINE
        .replace_all(text, |caps: &Captures| {
            let label = label::render(
                readable_name_format,
                &[("variant", variant), ("original", &caps[2])],
            );
            format!("{}={}", &caps[1], label)
        })
        .into_owned()
}

/// Rewrites one color-bearing file in place with the variant's tokens.
///
/// Tokens are processed in declaration order; each resolved color
/// replaces every whole-word occurrence of its token in the current
/// text. A resolution failure aborts the file before anything is
/// written back.
pub fn rewrite_colors(path: &Path, variant: &Variant, palette: &Palette) -> Result<()> {
    let text = fs::read_to_string(path).map_err(Error::io(path))?;
    let substituted = substitute_tokens(&text, variant, palette)?;
    fs::write(path, substituted).map_err(Error::io(path))?;
    Ok(())
}

/// Pure token substitution, separated from the I/O for testability.
pub(crate) fn substitute_tokens(text: &str, variant: &Variant, palette: &Palette) -> Result<String> {
    let mut text = text.to_string();
    for (token, raw) in &variant.colors {
        let color = resolve(raw, palette)?;
        let pattern = token_pattern(token)?;
        if is_hex_color(raw) {
            debug!(variant = %variant.name, %token, %color, "substituting color token");
        } else {
            debug!(variant = %variant.name, %token, %color, alias = %raw, "substituting color token");
        }
        text = pattern.replace_all(&text, NoExpand(color)).into_owned();
    }
    Ok(text)
}

/// Whole-word pattern for a color token.
fn token_pattern(token: &str) -> Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(token))).map_err(|source| Error::TokenPattern {
        token: token.to_string(),
        source,
    })
}
