//! # Gantry Render - JSON and HTML Response Rendering Middleware
//!
//! `gantry-render` compiles a directory of template files once and gives each
//! web request a small renderer with two output paths: JSON serialization and
//! HTML template execution. It is the rendering middleware for the Gantry
//! handler chain, but only touches the host through two seams — a
//! [`ResponseSink`] it writes to and a process-wide [`Mode`] it reads — so it
//! can sit in front of any router that supplies a response writer.
//!
//! ## Core Concepts
//!
//! - [`Options`]: where to find templates (default directory `templates/`)
//! - [`compile`] / [`TemplateSet`]: one walk+parse pass over every `.tmpl`
//!   file, all-or-nothing
//! - [`RendererFactory`]: owns the current set, recompiles per request in
//!   development mode, and hands each request a fresh [`Renderer`]
//! - [`Renderer`]: the per-request object with
//!   [`json`](Renderer::json) / [`html`](Renderer::html) /
//!   [`error`](Renderer::error)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gantry_render::{Options, RendererFactory};
//!
//! // At startup. A broken template is a startup failure: abort, never
//! // serve with a partial set.
//! let factory = RendererFactory::new(Options::new("templates"))?;
//!
//! // In the middleware hook, once per request:
//! let mut render = factory.renderer(response)?;
//!
//! // In handler code, exactly one of:
//! render.json(200, &payload);
//! render.html(200, "todos/list", &payload);
//! render.error(404);
//! ```
//!
//! ## Template Names
//!
//! Templates must have the `.tmpl` extension to be compiled; everything else
//! in the directory is ignored. Names are relative paths with the extension
//! stripped and separators normalized, so `templates/todos/list.tmpl` renders
//! as `"todos/list"` on every platform. Template syntax is
//! [`minijinja`](https://docs.rs/minijinja)'s.
//!
//! ## Layout Composition
//!
//! Every [`Renderer::html`] call executes the template named `layout`, which
//! embeds the requested content template by calling `yield()`:
//!
//! ```jinja
//! {# templates/layout.tmpl #}
//! <html><body>{{ yield() }}</body></html>
//!
//! {# templates/todos/list.tmpl #}
//! <ul>{% for todo in todos %}<li>{{ todo }}</li>{% endfor %}</ul>
//! ```
//!
//! Composition is one level deep: the content template still sees the stub
//! `yield()` (which returns the fixed placeholder text) if it calls it.
//!
//! ## Development vs Production
//!
//! The factory reads the process-wide [`Mode`] on every request. In
//! [`Mode::Development`] the template directory is recompiled synchronously
//! per request, so template edits show up on the next reload; in
//! [`Mode::Production`] (the default) compilation happens exactly once at
//! startup. Wire the switch up with [`set_mode_detector`]:
//!
//! ```rust
//! use gantry_render::{set_mode_detector, Mode};
//!
//! set_mode_detector(|| Mode::from_signal("development"));
//! ```
//!
//! ## Concurrency
//!
//! The compiled [`TemplateSet`] is the only state shared across requests and
//! is never mutated in place: each request renders against its own clone
//! (which is where its `yield` binding lives), and a development-mode
//! recompile swaps in a whole new set, leaving in-flight clones untouched.

mod error;
mod middleware;
mod mode;
mod options;
mod renderer;
mod set;

pub use error::RenderError;
pub use middleware::RendererFactory;
pub use mode::{current_mode, set_mode_detector, Mode, DEV_SIGNAL};
pub use options::{Options, DEFAULT_DIRECTORY};
pub use renderer::{
    error_response, Renderer, ResponseSink, CONTENT_HTML, CONTENT_JSON, CONTENT_TEXT, CONTENT_TYPE,
    LAYOUT_NAME,
};
pub use set::{compile, TemplateSet, TEMPLATE_EXTENSION, YIELD_PLACEHOLDER};
