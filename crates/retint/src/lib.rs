//! # Retint - GTK Theme Color-Variant Generator
//!
//! `retint` turns a set of template GTK theme directories into recolored
//! copies, one per (variant, theme) pair. A *variant* is a named mapping
//! of color tokens to values; a value is either a hex literal or the name
//! of a slot in the user's terminal color scheme (Xresources). Tokens
//! embedded in a theme's color files are replaced whole-word with the
//! resolved hex colors, and the theme descriptor is relabeled so the
//! variant shows up under its own name.
//!
//! ## Core Concepts
//!
//! - [`Palette`]: the resolved terminal scheme of 19 named color slots,
//!   loaded from Xresources or built-in defaults
//! - [`VariantConfig`]: the parsed config: format hints plus variant
//!   definitions, case-sensitive and order-preserving
//! - [`resolve`](resolve::resolve): raw value → concrete hex color
//! - [`generate`]: the orchestrator crossing themes with variants
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use retint::{generate, load_scheme, GenerateOptions, VariantConfig};
//!
//! let palette = load_scheme(None);
//! let config = VariantConfig::load(Path::new("variants.conf"))?;
//! let summary = generate(&config, &palette, &GenerateOptions::default())?;
//! println!("{} theme directories written", summary.directories);
//! # Ok::<(), retint::Error>(())
//! ```

pub mod config;
pub mod copy;
pub mod error;
pub mod generate;
pub mod label;
pub mod resolve;
pub mod rewrite;
pub mod xresources;

pub use config::{Variant, VariantConfig};
pub use error::{Error, Result};
pub use generate::{generate, GenerateOptions, Summary};
pub use xresources::{load_scheme, Palette};
