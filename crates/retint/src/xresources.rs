//! Terminal color scheme loading.
//!
//! A [`Palette`] is the resolved terminal color scheme: 19 named slots
//! (`foreground`, `background`, `cursorColor`, `color0`..`color15`), each
//! holding a hex color string. Variants reference these slots by name to
//! borrow colors from the user's terminal setup.
//!
//! Palettes are built from an Xresources-style file when one is available
//! and fall back to a built-in default scheme otherwise. Loading never
//! fails: a missing or unreadable source simply yields the defaults.
//!
//! # Example
//!
//! ```rust
//! use retint::xresources::Palette;
//!
//! let palette = Palette::default();
//! assert_eq!(palette.get("background"), Some("#000000"));
//! assert_eq!(palette.get("color12"), Some("#5555FF"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

/// `*.<key>: <value>` lines recognized in an Xresources file.
static XRESOURCE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^\*\.(foreground|background|cursorColor|color\d+):\s*(\S+)")
        .expect("xresources line pattern")
});

/// Default terminal scheme used when no Xresources source is available.
/// These are the classic VGA console colors.
const DEFAULT_TERMINAL: [(&str, &str); 19] = [
    ("foreground", "#ffffff"),
    ("background", "#000000"),
    ("cursorColor", "#ffffff"),
    ("color0", "#000000"),
    ("color1", "#AA0000"),
    ("color2", "#00AA00"),
    ("color3", "#AA5500"),
    ("color4", "#0000AA"),
    ("color5", "#AA00AA"),
    ("color6", "#00AAAA"),
    ("color7", "#AAAAAA"),
    ("color8", "#555555"),
    ("color9", "#FF5555"),
    ("color10", "#55FF55"),
    ("color11", "#FFFF55"),
    ("color12", "#5555FF"),
    ("color13", "#FF55FF"),
    ("color14", "#55FFFF"),
    ("color15", "#FFFFFF"),
];

/// A resolved terminal color scheme.
///
/// Always holds exactly the 19 recognized keys: construction starts from
/// the built-in default scheme and parsing can only overwrite existing
/// slots, never add or remove them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: IndexMap<String, String>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: DEFAULT_TERMINAL
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// Looks up a scheme key (`background`, `color4`, ...).
    pub fn get(&self, key: &str) -> Option<&str> {
        self.colors.get(key).map(String::as_str)
    }

    /// Overwrites `key` if it is one of the recognized slots; returns
    /// whether the value was applied.
    fn set(&mut self, key: &str, value: &str) -> bool {
        match self.colors.get_mut(key) {
            Some(slot) => {
                *slot = value.to_string();
                true
            }
            None => false,
        }
    }

    /// The recognized scheme keys, in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.colors.keys().map(String::as_str)
    }

    /// Number of slots. Always 19.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Never true; present for API completeness.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// Loads the terminal color scheme.
///
/// With an explicit source path, the file is parsed when it exists and the
/// defaults are returned unmodified when it does not. Without one, the
/// conventional user-level locations `~/.Xresources` then `~/.Xdefaults`
/// are probed and the first existing file wins.
///
/// No failure here is fatal: unreadable sources degrade to the default
/// scheme.
pub fn load_scheme(explicit: Option<&Path>) -> Palette {
    let source = match explicit {
        Some(path) => path.is_file().then(|| path.to_path_buf()),
        None => probe_candidates().into_iter().find(|p| p.is_file()),
    };

    let Some(path) = source else {
        debug!("no xresources source, using default terminal scheme");
        return Palette::default();
    };

    match fs::read_to_string(&path) {
        Ok(text) => {
            debug!(path = %path.display(), "loaded terminal scheme");
            parse_scheme(&text)
        }
        Err(err) => {
            debug!(path = %path.display(), error = %err, "unreadable xresources source, using defaults");
            Palette::default()
        }
    }
}

/// Conventional user-level Xresources locations, in priority order.
fn probe_candidates() -> Vec<PathBuf> {
    dirs::home_dir()
        .map(|home| vec![home.join(".Xresources"), home.join(".Xdefaults")])
        .unwrap_or_default()
}

/// Parses Xresources text into a palette.
///
/// Matches overwrite a copy of the defaults; the last match for a key
/// wins. Keys outside the 19 recognized slots are ignored.
pub(crate) fn parse_scheme(text: &str) -> Palette {
    let mut palette = Palette::default();
    for caps in XRESOURCE_LINE.captures_iter(text) {
        palette.set(&caps[1], &caps[2]);
    }
    palette
}
