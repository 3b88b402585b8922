//! The variant generator.
//!
//! Drives the whole pipeline: for every theme the format hints mention,
//! crossed with every variant the config defines, duplicate the template
//! theme, patch its descriptor, and rewrite the hinted color files.
//!
//! The run refuses to start if the output root already exists, so a
//! previous run's output is never clobbered. There is no rollback: a
//! failure partway through leaves earlier pairs complete, the current
//! pair partial, and later pairs untouched.

use std::fs;
use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::info;

use crate::config::VariantConfig;
use crate::copy::copy_tree;
use crate::error::{Error, Result};
use crate::label;
use crate::rewrite::{patch_descriptor, rewrite_colors};
use crate::xresources::Palette;

/// Subdirectory a theme must carry for its GTK3 colors to apply.
const GTK3_DIR: &str = "gtk-3.0";

/// Subdirectory a theme must carry for its GTK2 colors to apply.
const GTK2_DIR: &str = "gtk-2.0";

/// Where to read templates, where to write variants, and how to name
/// the results.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root containing one template directory per theme.
    pub input_dir: PathBuf,
    /// Destination root. Must not exist yet.
    pub output_dir: PathBuf,
    /// Template for output directory names; sees `{variant}`/`{theme}`.
    pub dir_name_format: String,
    /// Template for descriptor labels; sees `{variant}`/`{original}`.
    pub readable_name_format: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("templates"),
            output_dir: PathBuf::from("output"),
            dir_name_format: label::DEFAULT_DIR_NAME_FORMAT.to_string(),
            readable_name_format: label::DEFAULT_READABLE_NAME_FORMAT.to_string(),
        }
    }
}

/// What a completed run produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    /// Variants defined by the config.
    pub variants: usize,
    /// Themes mentioned by the format hints.
    pub themes: usize,
    /// Theme directories written.
    pub directories: usize,
}

/// Generates every (theme, variant) combination.
///
/// Themes iterate in sorted name order and variants in config
/// declaration order, so repeated runs process pairs identically.
pub fn generate(config: &VariantConfig, palette: &Palette, options: &GenerateOptions) -> Result<Summary> {
    if options.output_dir.exists() {
        return Err(Error::OutputExists(options.output_dir.clone()));
    }
    fs::create_dir_all(&options.output_dir).map_err(Error::io(&options.output_dir))?;

    let themes = config.themes();
    let mut directories = 0;

    for theme in &themes {
        for variant in config.variants.values() {
            let dir_name = label::render(
                &options.dir_name_format,
                &[("variant", &variant.name), ("theme", theme)],
            );
            let dest = options.output_dir.join(&dir_name);
            info!(theme = %theme, variant = %variant.name, dest = %dest.display(), "generating variant theme");

            copy_tree(&options.input_dir.join(theme), &dest)?;
            patch_descriptor(&dest, &variant.name, &options.readable_name_format)?;

            for (hints, family_dir) in family_passes(config) {
                let Some(color_file) = hints.get(*theme) else {
                    continue;
                };
                if !dest.join(family_dir).is_dir() {
                    continue;
                }
                rewrite_colors(&dest.join(color_file), variant, palette)?;
            }

            directories += 1;
        }
    }

    Ok(Summary {
        variants: config.variants.len(),
        themes: themes.len(),
        directories,
    })
}

/// The format families to try, GTK3 first.
fn family_passes(config: &VariantConfig) -> [(&IndexMap<String, String>, &'static str); 2] {
    [(&config.gtk3, GTK3_DIR), (&config.gtk2, GTK2_DIR)]
}
