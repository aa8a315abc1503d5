//! Error types for template compilation and response rendering.
//!
//! This module provides [`RenderError`], the primary error type for all
//! compilation and rendering operations. It abstracts over the underlying
//! template engine's errors, providing a stable public API.

use std::fmt;
use std::path::PathBuf;

/// Error type for template compilation and rendering operations.
///
/// The first two variants ([`Parse`](RenderError::Parse) and
/// [`Walk`](RenderError::Walk)) can only be produced by a compilation pass and
/// are intended to be treated as unrecoverable: a server must not start (or
/// keep serving a development reload) with a partial template set. The
/// decision to abort belongs to startup code, which is why they are returned
/// rather than panicking inside the compiler.
#[derive(Debug)]
pub enum RenderError {
    /// Template syntax error during compilation.
    Parse {
        /// Registered name of the template that failed to parse.
        name: String,
        /// Error message from the template engine.
        message: String,
    },

    /// Directory traversal or file read failure during compilation.
    Walk {
        /// Path that could not be visited or read.
        path: PathBuf,
        /// Underlying error message.
        message: String,
    },

    /// Template not found in the compiled set.
    TemplateNotFound(String),

    /// Data serialization error.
    Serialization(String),

    /// Template execution error.
    Render(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Parse { name, message } => {
                write!(f, "parse error in template {}: {}", name, message)
            }
            RenderError::Walk { path, message } => {
                write!(f, "walk error at {}: {}", path.display(), message)
            }
            RenderError::TemplateNotFound(name) => write!(f, "template not found: {}", name),
            RenderError::Serialization(msg) => write!(f, "serialization error: {}", msg),
            RenderError::Render(msg) => write!(f, "render error: {}", msg),
        }
    }
}

impl std::error::Error for RenderError {}

impl RenderError {
    /// Whether this error came out of a compilation pass.
    ///
    /// Compilation errors are the fatal kind: callers holding the result of
    /// [`compile`](crate::compile) (or of a development-mode recompile) are
    /// expected to abort rather than continue with a broken set.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RenderError::Parse { .. } | RenderError::Walk { .. }
        )
    }
}

impl From<std::io::Error> for RenderError {
    fn from(err: std::io::Error) -> Self {
        RenderError::Walk {
            path: PathBuf::new(),
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for RenderError {
    fn from(err: walkdir::Error) -> Self {
        RenderError::Walk {
            path: err.path().map(PathBuf::from).unwrap_or_default(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for RenderError {
    fn from(err: serde_json::Error) -> Self {
        RenderError::Serialization(err.to_string())
    }
}

// Conversion from minijinja::Error covers the render-time paths; compile-time
// parse failures are mapped to RenderError::Parse at the call site, where the
// template name is known.
impl From<minijinja::Error> for RenderError {
    fn from(err: minijinja::Error) -> Self {
        use minijinja::ErrorKind;

        match err.kind() {
            ErrorKind::TemplateNotFound => RenderError::TemplateNotFound(err.to_string()),
            ErrorKind::BadSerialization => RenderError::Serialization(err.to_string()),
            _ => RenderError::Render(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = RenderError::TemplateNotFound("foo".to_string());
        assert!(err.to_string().contains("template not found"));
        assert!(err.to_string().contains("foo"));
    }

    #[test]
    fn test_parse_error_display_names_template() {
        let err = RenderError::Parse {
            name: "sub/page".to_string(),
            message: "unexpected end of input".to_string(),
        };
        assert!(err.to_string().contains("sub/page"));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let render_err: RenderError = io_err.into();
        assert!(matches!(render_err, RenderError::Walk { .. }));
        assert!(render_err.is_fatal());
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let render_err: RenderError = json_err.into();
        assert!(matches!(render_err, RenderError::Serialization(_)));
        assert!(!render_err.is_fatal());
    }

    #[test]
    fn test_from_minijinja_template_not_found() {
        let mj_err = minijinja::Error::new(
            minijinja::ErrorKind::TemplateNotFound,
            "template 'foo' not found",
        );
        let render_err: RenderError = mj_err.into();
        assert!(matches!(render_err, RenderError::TemplateNotFound(_)));
        assert!(!render_err.is_fatal());
    }
}
