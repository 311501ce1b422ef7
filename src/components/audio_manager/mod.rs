//! Ambient Audio - the one background-music session of the application.
//! Keeps the playback controller outside the component render cycle and mirrors
//! its status into a signal that presentation units read.

// Shared imports and the session type.
include!("shared_types_and_web_helpers.rs");
// HtmlAudioElement-backed media output (wasm only).
include!("web_output.rs");
// Document listeners for the first-gesture retry (wasm only).
include!("first_gesture.rs");
// Web (wasm) platform hooks.
include!("controller_web.rs");
// Native (non-wasm) platform hooks.
include!("controller_native.rs");
