//! Error types for variant generation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration or generating
/// variant themes.
///
/// Every variant is unrecoverable for the run: failures are structural
/// (bad configuration, unsafe output location, broken template tree),
/// not transient, so there is no retry path anywhere.
#[derive(Debug, Error)]
pub enum Error {
    /// The variant config file does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigMissing(PathBuf),

    /// The variant config file exists but could not be parsed.
    #[error("{}:{line}: {message}", path.display())]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A `%(name)s` reference in a config value could not be expanded.
    #[error("bad interpolation in [{section}] {option}: {message}")]
    Interpolation {
        section: String,
        option: String,
        message: String,
    },

    /// Neither `[gtk3]` nor `[gtk2]` is present, so nothing says where
    /// colors live inside the themes.
    #[error("{}: no [gtk3] or [gtk2] hint section found", .0.display())]
    MissingHints(PathBuf),

    /// The output root already exists; refusing to clobber a previous run.
    #[error("output directory already exists: {}", .0.display())]
    OutputExists(PathBuf),

    /// A variant referenced a terminal-scheme key that does not exist.
    #[error("unknown palette key '{0}'")]
    UnknownPaletteKey(String),

    /// A theme is missing its mandatory `index.theme` descriptor.
    #[error("theme descriptor not found: {}", .0.display())]
    DescriptorMissing(PathBuf),

    /// A color token could not be compiled into a substitution pattern.
    #[error("invalid substitution pattern for token '{token}': {source}")]
    TokenPattern {
        token: String,
        source: regex::Error,
    },

    /// Underlying filesystem failure, annotated with the path involved.
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Error {
    /// Builds a `map_err` closure that attaches `path` to an I/O error.
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Error {
        let path = path.into();
        move |source| Error::Io { path, source }
    }
}

/// Result type for variant generation operations.
pub type Result<T> = std::result::Result<T, Error>;
