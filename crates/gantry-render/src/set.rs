//! Template compilation and the compiled template set.
//!
//! [`compile`] performs one full walk over the configured directory and parses
//! every `.tmpl` file into a [`TemplateSet`]. Compilation is all-or-nothing:
//! the first parse or walk failure aborts the pass with a fatal error (see
//! [`RenderError::is_fatal`]), because a server must never start silently with
//! a partial template set.
//!
//! # Template Names
//!
//! Templates are registered under their path relative to the configured
//! directory, with the extension stripped and separators normalized to
//! forward slashes:
//!
//! - `templates/index.tmpl` → `"index"`
//! - `templates/todos/list.tmpl` → `"todos/list"` (on every platform)
//!
//! Files with any other extension are skipped without being read.

use std::fs;
use std::path::Path;

use minijinja::{Environment, Value};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::RenderError;
use crate::options::Options;

/// File extension (without the dot) recognized by the compiler.
pub const TEMPLATE_EXTENSION: &str = "tmpl";

/// Text produced by the `yield()` template function when no content template
/// has been bound yet, or when the bound content template fails to render.
pub const YIELD_PLACEHOLDER: &str = "nope";

/// A compiled set of named templates.
///
/// Produced by one [`compile`] pass and immutable thereafter, except for the
/// per-request `yield` rebinding that [`Renderer::html`](crate::Renderer::html)
/// performs on its own clone. Cloning is cheap enough to do once per request
/// and is the isolation mechanism that keeps one request's `yield` binding
/// invisible to every other request.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    root: String,
    names: Vec<String>,
    env: Environment<'static>,
}

impl TemplateSet {
    /// The directory this set was compiled from.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Registered template names, sorted.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a template with the given name was registered.
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Executes the named template against the given value.
    pub fn render(&self, name: &str, binding: &Value) -> Result<String, RenderError> {
        let template = self.env.get_template(name)?;
        Ok(template.render(binding)?)
    }

    /// Returns a mutable reference to the underlying engine environment.
    ///
    /// Used by the renderer to rebind the `yield` function on its private
    /// clone. Rebinding on a set that is shared across requests would leak
    /// one request's content into another; only ever mutate a clone.
    pub(crate) fn environment_mut(&mut self) -> &mut Environment<'static> {
        &mut self.env
    }
}

/// Compiles every `.tmpl` file under `options.directory` into a [`TemplateSet`].
///
/// Each template body may call the zero-argument `yield()` function; at
/// compile time it is a stub returning [`YIELD_PLACEHOLDER`], and
/// [`Renderer::html`](crate::Renderer::html) rebinds it per request to embed a
/// content template (see the crate docs for the layout convention).
///
/// An empty directory compiles to an empty set; rendering by name then fails
/// at render time, not here.
///
/// # Errors
///
/// Returns [`RenderError::Parse`] on the first malformed template and
/// [`RenderError::Walk`] on the first unreadable file or directory. Both are
/// fatal: the caller is expected to abort startup (or fail the request that
/// triggered a development-mode recompile) rather than continue.
pub fn compile(options: &Options) -> Result<TemplateSet, RenderError> {
    let dir = &options.directory;
    let mut env = Environment::new();
    env.add_function("yield", || YIELD_PLACEHOLDER.to_string());

    let mut names = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let rel = entry.path().strip_prefix(dir).map_err(|err| RenderError::Walk {
            path: entry.path().to_path_buf(),
            message: err.to_string(),
        })?;
        if rel.extension().and_then(|e| e.to_str()) != Some(TEMPLATE_EXTENSION) {
            continue;
        }

        let source = fs::read_to_string(entry.path()).map_err(|err| RenderError::Walk {
            path: entry.path().to_path_buf(),
            message: err.to_string(),
        })?;
        let name = template_name(rel);
        env.add_template_owned(name.clone(), source)
            .map_err(|err| RenderError::Parse {
                name: name.clone(),
                message: err.to_string(),
            })?;
        debug!("Compiled template: {}", name);
        names.push(name);
    }

    names.sort();
    info!("Compiled {} templates from {:?}", names.len(), dir);

    Ok(TemplateSet {
        root: dir.to_string_lossy().into_owned(),
        names,
        env,
    })
}

/// Converts a relative template path into its registered name: extension
/// stripped, components joined with forward slashes.
fn template_name(rel: &Path) -> String {
    let stripped = rel.with_extension("");
    stripped
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
