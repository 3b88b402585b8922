//! Variant configuration loading.
//!
//! The config file is sectioned key-value text. Two reserved sections are
//! *format hints* telling the generator where colors live inside each
//! theme; every other section defines a *variant*: a named set of color
//! tokens to rewrite:
//!
//! ```ini
//! [gtk3]
//! Adwaita = gtk-3.0/gtk.css
//!
//! [gtk2]
//! Adwaita = gtk-2.0/gtkrc
//!
//! [DEFAULT]
//! accent = color4
//!
//! [Night]
//! S_base_color = background
//! S_selected_bg = %(accent)s
//! S_warning = #AA5500
//! ```
//!
//! # Parsing rules
//!
//! - Section headers are `[name]`; option lines are `key = value` or
//!   `key: value`; `#` and `;` start full-line comments.
//! - Option names are **case-sensitive and kept byte-for-byte**. Color
//!   tokens are identifiers that must match theme file content literally,
//!   so the usual config-parser normalization would corrupt them.
//! - Duplicate sections or options are parse errors.
//! - Values support `%(name)s` interpolation: the reference is resolved
//!   against the same section first, then `[DEFAULT]`. `%%` is a literal
//!   percent. Variants commonly share a palette through `[DEFAULT]`.
//! - `[DEFAULT]` feeds interpolation only; it is neither a variant nor
//!   part of any variant's token list.
//!
//! Option declaration order is preserved: it is the substitution order
//! used when rewriting theme files.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// Reserved section mapping theme names to their GTK3 color file.
pub const GTK3_SECTION: &str = "gtk3";

/// Reserved section mapping theme names to their GTK2 color file.
pub const GTK2_SECTION: &str = "gtk2";

/// Section whose options are visible to `%(name)s` references everywhere.
const DEFAULT_SECTION: &str = "DEFAULT";

/// Cap on chained `%(name)s` references.
const MAX_INTERPOLATION_DEPTH: usize = 10;

/// A named recoloring: color token -> raw value, in declaration order.
///
/// A raw value is either a hex literal (`#AA5500`) or the name of a
/// terminal-scheme key (`background`); see [`crate::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub colors: IndexMap<String, String>,
}

/// The loaded variant configuration: two format-hint tables plus the
/// variant definitions, reserved sections already split out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantConfig {
    /// Theme name -> relative path of the GTK3 color file.
    pub gtk3: IndexMap<String, String>,
    /// Theme name -> relative path of the GTK2 color file.
    pub gtk2: IndexMap<String, String>,
    /// Variant name -> definition, in declaration order.
    pub variants: IndexMap<String, Variant>,
}

impl VariantConfig {
    /// Reads and parses a config file.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigMissing(path.to_path_buf()));
        }
        let text = fs::read_to_string(path).map_err(Error::io(path))?;
        Self::parse(&text, path)
    }

    /// Parses config text. `path` is used for diagnostics only.
    pub(crate) fn parse(text: &str, path: &Path) -> Result<Self> {
        let mut sections = parse_sections(text, path)?;
        interpolate(&mut sections)?;

        sections.shift_remove(DEFAULT_SECTION);
        let gtk3 = sections.shift_remove(GTK3_SECTION);
        let gtk2 = sections.shift_remove(GTK2_SECTION);
        if gtk3.is_none() && gtk2.is_none() {
            return Err(Error::MissingHints(path.to_path_buf()));
        }

        let variants = sections
            .into_iter()
            .map(|(name, colors)| {
                let variant = Variant {
                    name: name.clone(),
                    colors,
                };
                (name, variant)
            })
            .collect();

        Ok(Self {
            gtk3: gtk3.unwrap_or_default(),
            gtk2: gtk2.unwrap_or_default(),
            variants,
        })
    }

    /// All theme names mentioned by either hint section, sorted.
    pub fn themes(&self) -> Vec<&str> {
        let union: BTreeSet<&str> = self
            .gtk3
            .keys()
            .chain(self.gtk2.keys())
            .map(String::as_str)
            .collect();
        union.into_iter().collect()
    }
}

type Sections = IndexMap<String, IndexMap<String, String>>;

/// Splits config text into ordered sections of ordered raw options.
fn parse_sections(text: &str, path: &Path) -> Result<Sections> {
    let mut sections: Vec<(String, IndexMap<String, String>)> = Vec::new();

    let fail = |line: usize, message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        line,
        message,
    };

    for (idx, raw_line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(header) = line.strip_prefix('[') {
            let Some(name) = header.strip_suffix(']') else {
                return Err(fail(lineno, "unterminated section header".into()));
            };
            let name = name.trim();
            if name.is_empty() {
                return Err(fail(lineno, "empty section name".into()));
            }
            if sections.iter().any(|(existing, _)| existing == name) {
                return Err(fail(lineno, format!("duplicate section [{}]", name)));
            }
            sections.push((name.to_string(), IndexMap::new()));
            continue;
        }

        let Some((section, options)) = sections.last_mut() else {
            return Err(fail(lineno, "option found before any section header".into()));
        };

        let Some(sep) = line.find(['=', ':']) else {
            return Err(fail(lineno, "expected 'key = value'".into()));
        };
        let key = line[..sep].trim_end();
        if key.is_empty() {
            return Err(fail(lineno, "option with empty name".into()));
        }
        let value = line[sep + 1..].trim();

        if options.contains_key(key) {
            return Err(fail(
                lineno,
                format!("duplicate option '{}' in [{}]", key, section),
            ));
        }
        options.insert(key.to_string(), value.to_string());
    }

    Ok(sections.into_iter().collect())
}

/// Expands `%(name)s` references in every value, in place.
fn interpolate(sections: &mut Sections) -> Result<()> {
    let snapshot = sections.clone();
    let defaults = snapshot.get(DEFAULT_SECTION);

    for (section_name, options) in sections.iter_mut() {
        let Some(raw_section) = snapshot.get(section_name) else {
            continue;
        };
        for (option, value) in options.iter_mut() {
            if value.contains('%') {
                *value = expand(section_name, option, value, raw_section, defaults, 0)?;
            }
        }
    }
    Ok(())
}

/// Expands one value. References recurse through their own raw values,
/// capped at [`MAX_INTERPOLATION_DEPTH`].
fn expand(
    section: &str,
    option: &str,
    value: &str,
    raw_section: &IndexMap<String, String>,
    defaults: Option<&IndexMap<String, String>>,
    depth: usize,
) -> Result<String> {
    let fail = |message: String| Error::Interpolation {
        section: section.to_string(),
        option: option.to_string(),
        message,
    };

    if depth > MAX_INTERPOLATION_DEPTH {
        return Err(fail("interpolation depth exceeded".into()));
    }

    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('%') => out.push('%'),
            Some('(') => {
                let rest = chars.as_str();
                let Some(close) = rest.find(')') else {
                    return Err(fail("unterminated %( reference".into()));
                };
                let name = &rest[..close];
                chars = rest[close + 1..].chars();
                if chars.next() != Some('s') {
                    return Err(fail(format!("expected 's' after %({})", name)));
                }
                let referenced = raw_section
                    .get(name)
                    .or_else(|| defaults.and_then(|d| d.get(name)))
                    .ok_or_else(|| fail(format!("no such option '{}'", name)))?;
                out.push_str(&expand(
                    section,
                    option,
                    referenced,
                    raw_section,
                    defaults,
                    depth + 1,
                )?);
            }
            _ => return Err(fail("'%' must be followed by '%' or '(name)s'".into())),
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> Result<VariantConfig> {
        VariantConfig::parse(text, Path::new("variants.conf"))
    }

    const MINIMAL: &str = "[gtk3]\nAdwaita = gtk-3.0/gtk.css\n";

    #[test]
    fn test_hint_sections_split_from_variants() {
        let config = parse(
            "[gtk3]\nAdwaita = gtk-3.0/gtk.css\n\
             [gtk2]\nAdwaita = gtk-2.0/gtkrc\n\
             [Night]\nS_base = background\n",
        )
        .unwrap();
        assert_eq!(config.gtk3.get("Adwaita").unwrap(), "gtk-3.0/gtk.css");
        assert_eq!(config.gtk2.get("Adwaita").unwrap(), "gtk-2.0/gtkrc");
        assert_eq!(config.variants.len(), 1);
        assert!(config.variants.contains_key("Night"));
    }

    #[test]
    fn test_missing_hints_is_an_error() {
        let err = parse("[Night]\nS_base = background\n").unwrap_err();
        assert!(matches!(err, Error::MissingHints(_)));
    }

    #[test]
    fn test_one_hint_section_is_enough() {
        let config = parse("[gtk2]\nAdwaita = gtk-2.0/gtkrc\n").unwrap();
        assert!(config.gtk3.is_empty());
        assert_eq!(config.variants.len(), 0);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = VariantConfig::load(&dir.path().join("nope.conf")).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing(_)));
    }

    #[test]
    fn test_option_names_keep_case() {
        let config = parse(&format!("{}[V]\nS_Base_Color = #112233\n", MINIMAL)).unwrap();
        let variant = &config.variants["V"];
        assert_eq!(variant.colors.get("S_Base_Color").unwrap(), "#112233");
        assert!(!variant.colors.contains_key("s_base_color"));
    }

    #[test]
    fn test_conflicting_case_spellings_are_distinct_tokens() {
        let config = parse(&format!("{}[V]\ntoken = #111111\nToken = #222222\n", MINIMAL)).unwrap();
        let colors = &config.variants["V"].colors;
        assert_eq!(colors.get("token").unwrap(), "#111111");
        assert_eq!(colors.get("Token").unwrap(), "#222222");
    }

    #[test]
    fn test_declaration_order_is_preserved() {
        let config = parse(&format!("{}[V]\nzeta = #111111\nalpha = #222222\n", MINIMAL)).unwrap();
        let order: Vec<&str> = config.variants["V"].colors.keys().map(String::as_str).collect();
        assert_eq!(order, vec!["zeta", "alpha"]);
    }

    #[test]
    fn test_colon_separator_and_comments() {
        let config = parse("# header comment\n[gtk3]\nAdwaita: gtk-3.0/gtk.css\n; tail\n").unwrap();
        assert_eq!(config.gtk3.get("Adwaita").unwrap(), "gtk-3.0/gtk.css");
    }

    #[test]
    fn test_hash_values_are_not_comments() {
        let config = parse(&format!("{}[V]\ncolor = #123456\n", MINIMAL)).unwrap();
        assert_eq!(config.variants["V"].colors.get("color").unwrap(), "#123456");
    }

    #[test]
    fn test_interpolation_same_section() {
        let config = parse(&format!("{}[V]\nbase = #112233\nedge = %(base)s\n", MINIMAL)).unwrap();
        assert_eq!(config.variants["V"].colors.get("edge").unwrap(), "#112233");
    }

    #[test]
    fn test_interpolation_falls_back_to_default_section() {
        let config = parse(&format!(
            "[DEFAULT]\naccent = color4\n{}[V]\nS_selected = %(accent)s\n",
            MINIMAL
        ))
        .unwrap();
        assert_eq!(config.variants["V"].colors.get("S_selected").unwrap(), "color4");
        // DEFAULT itself never becomes a variant.
        assert!(!config.variants.contains_key("DEFAULT"));
    }

    #[test]
    fn test_interpolation_is_recursive() {
        let config = parse(&format!(
            "{}[V]\na = #111111\nb = %(a)s\nc = %(b)s\n",
            MINIMAL
        ))
        .unwrap();
        assert_eq!(config.variants["V"].colors.get("c").unwrap(), "#111111");
    }

    #[test]
    fn test_percent_escape() {
        let config = parse(&format!("{}[V]\nnote = 50%% gray\n", MINIMAL)).unwrap();
        assert_eq!(config.variants["V"].colors.get("note").unwrap(), "50% gray");
    }

    #[test]
    fn test_unknown_reference_fails() {
        let err = parse(&format!("{}[V]\nedge = %(missing)s\n", MINIMAL)).unwrap_err();
        assert!(matches!(err, Error::Interpolation { .. }));
    }

    #[test]
    fn test_reference_cycle_fails() {
        let err = parse(&format!("{}[V]\na = %(b)s\nb = %(a)s\n", MINIMAL)).unwrap_err();
        assert!(matches!(err, Error::Interpolation { .. }));
    }

    #[test]
    fn test_bare_percent_fails() {
        let err = parse(&format!("{}[V]\nbad = 50% gray\n", MINIMAL)).unwrap_err();
        assert!(matches!(err, Error::Interpolation { .. }));
    }

    #[test]
    fn test_duplicate_option_fails() {
        let err = parse(&format!("{}[V]\na = #111111\na = #222222\n", MINIMAL)).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 5, .. }));
    }

    #[test]
    fn test_duplicate_section_fails() {
        let err = parse("[gtk3]\nA = a.css\n[gtk3]\nB = b.css\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_option_before_section_fails() {
        let err = parse("orphan = value\n").unwrap_err();
        assert!(matches!(err, Error::ConfigParse { line: 1, .. }));
    }

    #[test]
    fn test_garbage_line_fails() {
        let err = parse(&format!("{}[V]\nnot an option line\n", MINIMAL)).unwrap_err();
        assert!(matches!(err, Error::ConfigParse { .. }));
    }

    #[test]
    fn test_themes_is_sorted_union_of_hints() {
        let config = parse(
            "[gtk3]\nNumix = gtk-3.0/gtk.css\nAdwaita = gtk-3.0/gtk.css\n\
             [gtk2]\nZuki = gtk-2.0/gtkrc\nNumix = gtk-2.0/gtkrc\n",
        )
        .unwrap();
        assert_eq!(config.themes(), vec!["Adwaita", "Numix", "Zuki"]);
    }
}
