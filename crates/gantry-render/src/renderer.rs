//! Per-request response rendering.
//!
//! [`Renderer`] is the object handed to handler code for one request. It owns
//! the response sink exclusively for the request's lifetime and a private
//! clone of the compiled [`TemplateSet`], and exposes exactly three
//! operations: [`json`](Renderer::json), [`html`](Renderer::html) and
//! [`error`](Renderer::error). Handlers call one of them once per request.
//!
//! # Layout Composition
//!
//! [`Renderer::html`] always executes the template named `layout`; the layout
//! embeds the named content template wherever it calls `yield()`:
//!
//! ```jinja
//! <html><body>{{ yield() }}</body></html>
//! ```
//!
//! The failure modes are deliberately asymmetric. The layout is mandatory
//! scaffolding the operator controls, so a layout failure surfaces as a 500
//! with the error text as body. The yielded content is page-specific, so a
//! content failure degrades to the literal placeholder text in the page,
//! preserving partial delivery. The placeholder is the only signal the
//! operator gets for an inner failure.

use minijinja::Value;
use serde::Serialize;

use crate::set::{TemplateSet, YIELD_PLACEHOLDER};

/// Header name for the response content type.
pub const CONTENT_TYPE: &str = "Content-Type";
/// MIME type written by the JSON success path.
pub const CONTENT_JSON: &str = "application/json";
/// MIME type written by the HTML success path.
pub const CONTENT_HTML: &str = "text/html";
/// MIME type written by [`error_response`] for plain-text failure bodies.
pub const CONTENT_TEXT: &str = "text/plain; charset=utf-8";

/// Name of the outer template executed by every [`Renderer::html`] call.
pub const LAYOUT_NAME: &str = "layout";

const SERVER_ERROR: u16 = 500;

/// The response writer supplied by the host server.
///
/// One sink is owned exclusively by one request's [`Renderer`], so the
/// header / status / body ordering below is never interleaved with another
/// request's writes. Implementations are expected to behave like an HTTP
/// response: headers before status, status before body.
pub trait ResponseSink {
    /// Sets a response header.
    fn set_header(&mut self, name: &str, value: &str);

    /// Writes the response status code.
    fn write_status(&mut self, status: u16);

    /// Writes response body bytes.
    fn write_body(&mut self, body: &[u8]);
}

/// Writes a plain-text error response: content type, status, message body.
///
/// This is the single helper used by every local failure path, so a failure
/// is always one status plus the raw error message and nothing else.
pub fn error_response<S: ResponseSink>(sink: &mut S, status: u16, message: &str) {
    sink.set_header(CONTENT_TYPE, CONTENT_TEXT);
    sink.write_status(status);
    sink.write_body(message.as_bytes());
}

/// Per-request renderer over a response sink and a cloned template set.
///
/// Created by [`RendererFactory::renderer`](crate::RendererFactory::renderer)
/// once per request and discarded when the request completes.
#[derive(Debug)]
pub struct Renderer<S: ResponseSink> {
    sink: S,
    set: TemplateSet,
}

impl<S: ResponseSink> Renderer<S> {
    /// Wraps a response sink and a template set clone for one request.
    ///
    /// The set must be a clone private to this request; `html` mutates its
    /// `yield` binding.
    pub fn new(sink: S, set: TemplateSet) -> Self {
        Self { sink, set }
    }

    /// Serializes `value` as JSON and writes it with the given status.
    ///
    /// On serialization failure this writes a 500 with the error message as
    /// plain-text body and returns; the JSON content type is only set on the
    /// success path. Success writes header, status, body, in that order.
    pub fn json<T: Serialize>(&mut self, status: u16, value: &T) {
        let body = match serde_json::to_vec(value) {
            Ok(body) => body,
            Err(err) => {
                error_response(&mut self.sink, SERVER_ERROR, &err.to_string());
                return;
            }
        };

        self.sink.set_header(CONTENT_TYPE, CONTENT_JSON);
        self.sink.write_status(status);
        self.sink.write_body(&body);
    }

    /// Executes the `layout` template with `yield()` bound to the named
    /// content template, and writes the result with the given status.
    ///
    /// Both templates are executed against `binding`. A content-template
    /// failure (unknown name, execution error) is swallowed: `yield()`
    /// returns [`YIELD_PLACEHOLDER`] and the response still succeeds. A
    /// layout failure (not registered, execution error) writes a 500 with
    /// the error message as plain-text body and nothing else.
    pub fn html<T: Serialize>(&mut self, status: u16, name: &str, binding: &T) {
        let binding = Value::from_serialize(binding);

        // The closure captures a clone taken before the rebind, so the
        // content template still sees the compile-time stub if it calls
        // yield() itself: composition is a single level deep.
        let content_set = self.set.clone();
        let content_name = name.to_string();
        let content_binding = binding.clone();
        self.set
            .environment_mut()
            .add_function("yield", move || -> String {
                content_set
                    .render(&content_name, &content_binding)
                    .unwrap_or_else(|_| YIELD_PLACEHOLDER.to_string())
            });

        let body = match self.set.render(LAYOUT_NAME, &binding) {
            Ok(body) => body,
            Err(err) => {
                error_response(&mut self.sink, SERVER_ERROR, &err.to_string());
                return;
            }
        };

        self.sink.set_header(CONTENT_TYPE, CONTENT_HTML);
        self.sink.write_status(status);
        self.sink.write_body(body.as_bytes());
    }

    /// Writes only the given status code: no headers, no body.
    pub fn error(&mut self, status: u16) {
        self.sink.write_status(status);
    }

    /// Consumes the renderer and returns the response sink.
    ///
    /// Hosts that need the sink back after the handler ran (to flush it, or
    /// to hand it to the next stage of their chain) use this at the end of
    /// the request.
    pub fn into_inner(self) -> S {
        self.sink
    }
}
