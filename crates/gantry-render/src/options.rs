//! Compilation options.

use std::path::PathBuf;

/// Directory scanned for templates when none is configured.
pub const DEFAULT_DIRECTORY: &str = "templates";

/// Options for a template compilation pass.
///
/// Currently a single option: the directory to scan for `.tmpl` files.
/// Prepared once and treated as immutable by the factory.
///
/// # Example
///
/// ```rust
/// use gantry_render::Options;
///
/// let opt = Options::default();
/// assert_eq!(opt.directory.to_str(), Some("templates"));
///
/// let opt = Options::new("web/views");
/// assert_eq!(opt.directory.to_str(), Some("web/views"));
/// ```
#[derive(Debug, Clone)]
pub struct Options {
    /// Root path scanned recursively for template files.
    pub directory: PathBuf,
}

impl Options {
    /// Creates options with an explicit template directory.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(DEFAULT_DIRECTORY)
    }
}
