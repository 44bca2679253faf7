//! qrgen - frameless desktop QR code generator
//!
//! Type some text, press *Generate QR*, and the code is rendered, cached to a
//! temp file and shown in the window. *Save QR* writes the displayed image to
//! a PNG of your choosing.
//!
//! # Features
//!
//! - **Memoized encoding**: identical `(text, theme)` requests reuse the temp file
//! - **Animated theme switch**: custom toggle widget with a stepping knob
//! - **Light/dark palettes** applied to every widget at once
//! - **Frameless window** moved by dragging its background
//!
//! # Example
//!
//! ```no_run
//! use qrgen::{QrEncoder, QrStore, RenderOutcome};
//!
//! fn main() -> qrgen::Result<()> {
//!     let mut store = QrStore::new(QrEncoder::new(), "qr_code_temp.png");
//!
//!     assert_eq!(store.render("https://example.com", false)?, RenderOutcome::Miss);
//!     // Same text and theme: nothing is re-encoded
//!     assert_eq!(store.render("https://example.com", false)?, RenderOutcome::Hit);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs, rust_2024_compatibility)]

pub mod app;
pub mod cache;
pub mod config;
pub mod drag;
pub mod error;
pub mod generator;
pub mod logging;
pub mod qr;
pub mod theme;
pub mod toggle;

// Re-exports for convenience
pub use error::{Error, Result};

pub use app::QrGeneratorApp;
pub use cache::{CacheKey, QrStore, RenderOutcome};
pub use config::{
    CacheOptions, EncoderOptions, ErrorCorrection, LogRotation, LoggingOptions, QrgenConfig,
    WindowOptions,
};
pub use drag::WindowDrag;
pub use generator::QrGenerator;
pub use qr::{QrDecoder, QrEncoder, QrPayload};
pub use theme::{Palette, Theme};
pub use toggle::{KnobAnimation, TickClock, ToggleSwitch};
