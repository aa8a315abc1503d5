//! Development / production mode detection.
//!
//! The compilation policy (see [`RendererFactory`](crate::RendererFactory))
//! reads the process-wide mode on every request: in development mode templates
//! are recompiled per request for an edit-reload loop, in production they are
//! compiled exactly once at startup.
//!
//! The mode itself is owned by the host process. It is exposed here through a
//! detector function so the host can wire it to whatever signal it uses
//! (an environment variable, a CLI flag). Override it with
//! [`set_mode_detector`]:
//!
//! ```rust
//! use gantry_render::{set_mode_detector, Mode};
//!
//! set_mode_detector(|| Mode::Development);
//! ```

use once_cell::sync::Lazy;
use std::sync::Mutex;

/// The indicator value that [`Mode::from_signal`] maps to development mode.
pub const DEV_SIGNAL: &str = "development";

/// The process-wide compilation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Recompile templates on every request.
    Development,
    /// Compile templates once at startup and reuse them.
    Production,
}

impl Mode {
    /// Maps a host-supplied signal string to a mode.
    ///
    /// Exactly `"development"` selects [`Mode::Development`]; any other value
    /// (including the empty string once the host has resolved its own
    /// defaulting) is treated as production.
    pub fn from_signal(signal: &str) -> Mode {
        if signal == DEV_SIGNAL {
            Mode::Development
        } else {
            Mode::Production
        }
    }
}

type ModeDetector = fn() -> Mode;

static MODE_DETECTOR: Lazy<Mutex<ModeDetector>> = Lazy::new(|| Mutex::new(default_mode));

/// Overrides the detector used to determine the current compilation mode.
///
/// Hosts call this once at startup; tests use it to force a mode. There is no
/// reset; tests should restore the mode they found (a detector returning
/// [`Mode::Production`] matches the built-in default).
pub fn set_mode_detector(detector: ModeDetector) {
    let mut guard = MODE_DETECTOR.lock().unwrap();
    *guard = detector;
}

/// Returns the current compilation mode.
///
/// Called by the factory once per request. Defaults to [`Mode::Production`]
/// until a detector is installed via [`set_mode_detector`].
pub fn current_mode() -> Mode {
    let detector = MODE_DETECTOR.lock().unwrap();
    (*detector)()
}

fn default_mode() -> Mode {
    Mode::Production
}
