//! The per-request renderer factory and its compilation policy.
//!
//! [`RendererFactory`] is constructed once per process and compiles the
//! template directory immediately; the host's middleware chain then calls
//! [`RendererFactory::renderer`] before dispatching each request to handler
//! code, and injects the returned [`Renderer`] however its DI mechanism works.
//!
//! # Compilation Policy
//!
//! The policy is gated on the process-wide [`Mode`](crate::Mode) alone:
//!
//! - [`Development`](crate::Mode::Development): recompile synchronously on
//!   every request, trading latency for an edit-reload loop.
//! - [`Production`](crate::Mode::Production): compile exactly once at
//!   construction and reuse the set unconditionally.
//!
//! A development-mode recompile failure propagates the fatal compile error
//! rather than serving from the stale set; letting it crash the request is
//! the intended fail-fast behavior for a development loop.

use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::RenderError;
use crate::mode::{current_mode, Mode};
use crate::options::Options;
use crate::renderer::{Renderer, ResponseSink};
use crate::set::{compile, TemplateSet};

/// Owner of the current compiled [`TemplateSet`], producing one
/// [`Renderer`] per request.
///
/// The held set sits behind an atomically replaceable reference: a recompile
/// builds a whole new set and swaps the reference, never editing the shared
/// instance in place. Requests still in flight keep rendering against the
/// clone they already took.
///
/// # Example
///
/// ```rust,ignore
/// use gantry_render::{Options, RendererFactory};
///
/// // At startup; an Err here means a broken template and the process
/// // should not come up.
/// let factory = RendererFactory::new(Options::default())?;
///
/// // Per request, before dispatch to the handler:
/// let mut render = factory.renderer(response)?;
/// render.html(200, "todos/list", &data);
/// ```
#[derive(Debug)]
pub struct RendererFactory {
    options: Options,
    current: RwLock<Arc<TemplateSet>>,
}

impl RendererFactory {
    /// Compiles the configured directory and builds the factory.
    ///
    /// # Errors
    ///
    /// Propagates the fatal compile error ([`RenderError::Parse`] or
    /// [`RenderError::Walk`]); callers should treat it as a startup failure
    /// and abort rather than start serving with a broken set.
    pub fn new(options: Options) -> Result<Self, RenderError> {
        let set = compile(&options)?;
        Ok(Self {
            options,
            current: RwLock::new(Arc::new(set)),
        })
    }

    /// The per-request hook: applies the compilation policy and wraps the
    /// sink in a fresh [`Renderer`].
    ///
    /// Reads the current [`Mode`](crate::Mode) once; in development mode the
    /// directory is recompiled and the held set replaced before the clone is
    /// taken. The renderer gets its own clone of the set so its `yield`
    /// binding never leaks into other in-flight requests.
    ///
    /// # Errors
    ///
    /// Only a development-mode recompile can fail, with the same fatal error
    /// kinds as [`RendererFactory::new`].
    pub fn renderer<S: ResponseSink>(&self, sink: S) -> Result<Renderer<S>, RenderError> {
        if current_mode() == Mode::Development {
            debug!("Recompiling templates from {:?}", self.options.directory);
            let set = compile(&self.options)?;
            *self.current.write().unwrap() = Arc::new(set);
        }

        let snapshot = Arc::clone(&self.current.read().unwrap());
        Ok(Renderer::new(sink, (*snapshot).clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::set_mode_detector;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[derive(Debug, Default)]
    struct MockSink {
        body: Vec<u8>,
    }

    impl ResponseSink for MockSink {
        fn set_header(&mut self, _name: &str, _value: &str) {}

        fn write_status(&mut self, _status: u16) {}

        fn write_body(&mut self, body: &[u8]) {
            self.body.extend_from_slice(body);
        }
    }

    fn fixture() -> (TempDir, RendererFactory) {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("layout.tmpl"), "{{ yield() }}").unwrap();
        fs::write(dir.path().join("page.tmpl"), "first").unwrap();
        let factory = RendererFactory::new(Options::new(dir.path())).unwrap();
        (dir, factory)
    }

    fn render_page(factory: &RendererFactory) -> Result<String, RenderError> {
        let mut r = factory.renderer(MockSink::default())?;
        r.html(200, "page", &serde_json::json!({}));
        Ok(String::from_utf8(r.into_inner().body).unwrap())
    }

    #[test]
    #[serial]
    fn test_production_reuses_compiled_set() {
        set_mode_detector(|| Mode::Production);
        let (dir, factory) = fixture();

        assert_eq!(render_page(&factory).unwrap(), "first");

        // Edits after startup are invisible in production.
        fs::write(dir.path().join("page.tmpl"), "second").unwrap();
        assert_eq!(render_page(&factory).unwrap(), "first");
    }

    #[test]
    #[serial]
    fn test_development_recompiles_per_request() {
        set_mode_detector(|| Mode::Development);
        let (dir, factory) = fixture();

        assert_eq!(render_page(&factory).unwrap(), "first");

        fs::write(dir.path().join("page.tmpl"), "second").unwrap();
        assert_eq!(render_page(&factory).unwrap(), "second");

        set_mode_detector(|| Mode::Production);
    }

    #[test]
    #[serial]
    fn test_development_recompile_failure_propagates() {
        set_mode_detector(|| Mode::Development);
        let (dir, factory) = fixture();

        fs::write(dir.path().join("page.tmpl"), "{{ unclosed").unwrap();
        let err = factory.renderer(MockSink::default()).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, RenderError::Parse { .. }));

        set_mode_detector(|| Mode::Production);
    }

    #[test]
    #[serial]
    fn test_construction_fails_on_broken_template() {
        set_mode_detector(|| Mode::Production);
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.tmpl"), "{% for %}").unwrap();

        let err = RendererFactory::new(Options::new(dir.path())).unwrap_err();
        assert!(err.is_fatal());
    }
}
