//! Memoized QR rendering backed by a single temp file
//!
//! [`QrStore::render`] only re-encodes when the `(text, dark_mode)` pair
//! differs from the last successful render. The image always lands at the
//! same path, so callers read it back from disk after every call.

use crate::error::Result;
use crate::qr::{QrDecoder, QrEncoder};
use image::{DynamicImage, ImageFormat, ImageReader};
use std::path::{Path, PathBuf};

/// Key of the last successful render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheKey {
    /// Encoded text
    pub text: String,
    /// Theme flag at the time of encoding
    pub dark_mode: bool,
}

/// Result of a [`QrStore::render`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// Temp file already held this key; nothing was encoded
    Hit,
    /// Text was encoded and the temp file rewritten
    Miss,
}

/// Temp-file QR cache
#[derive(Debug)]
pub struct QrStore {
    encoder: QrEncoder,
    path: PathBuf,
    last: Option<CacheKey>,
    encodes: u64,
    verify: bool,
}

impl QrStore {
    /// Create a store writing to `path`
    pub fn new(encoder: QrEncoder, path: impl Into<PathBuf>) -> Self {
        Self {
            encoder,
            path: path.into(),
            last: None,
            encodes: 0,
            verify: false,
        }
    }

    /// Decode each freshly written image and warn if it does not read back as the input
    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Location of the generated image
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Key of the last successful render, if any
    pub fn cached(&self) -> Option<&CacheKey> {
        self.last.as_ref()
    }

    /// Number of times the encoder actually ran
    pub fn encode_count(&self) -> u64 {
        self.encodes
    }

    /// Make sure the temp file holds the code for `(text, dark_mode)`.
    ///
    /// On failure the previous key is kept, so a later call with the same
    /// inputs as before still hits.
    pub fn render(&mut self, text: &str, dark_mode: bool) -> Result<RenderOutcome> {
        let key = CacheKey {
            text: text.to_owned(),
            dark_mode,
        };
        if self.last.as_ref() == Some(&key) {
            tracing::debug!(path = %self.path.display(), "QR cache hit");
            return Ok(RenderOutcome::Hit);
        }

        let image = self.encoder.encode(text)?;
        self.encodes += 1;
        image.save_with_format(&self.path, ImageFormat::Png)?;
        tracing::info!(
            path = %self.path.display(),
            chars = text.chars().count(),
            dark_mode,
            "Wrote QR code"
        );

        if self.verify {
            self.verify_written(text);
        }

        self.last = Some(key);
        Ok(RenderOutcome::Miss)
    }

    /// Read the temp file back. Always decoded as PNG, whatever the path's extension.
    pub fn load(&self) -> Result<DynamicImage> {
        let mut reader = ImageReader::open(&self.path)?;
        reader.set_format(ImageFormat::Png);
        Ok(reader.decode()?)
    }

    fn verify_written(&self, text: &str) {
        let decoded = self.load().and_then(|img| QrDecoder::new().decode(&img));
        match decoded {
            Ok(payload) if payload.as_bytes() == text.as_bytes() => {
                tracing::debug!("Verified generated QR code");
            }
            Ok(payload) => tracing::warn!(
                expected = text,
                decoded = ?payload.as_str(),
                "Generated QR code reads back differently"
            ),
            Err(err) => tracing::warn!("Could not verify generated QR code: {err}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn store(dir: &tempfile::TempDir) -> QrStore {
        QrStore::new(QrEncoder::new(), dir.path().join("qr_code_temp.png"))
    }

    #[test]
    fn test_repeat_render_hits() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        assert_eq!(store.render("abc", false).unwrap(), RenderOutcome::Miss);
        assert_eq!(store.render("abc", false).unwrap(), RenderOutcome::Hit);
        assert_eq!(store.encode_count(), 1);
        assert!(store.path().exists());
    }

    #[test]
    fn test_text_change_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        store.render("abc", false).unwrap();
        assert_eq!(store.render("abd", false).unwrap(), RenderOutcome::Miss);
        assert_eq!(store.encode_count(), 2);
        assert_eq!(store.cached().map(|k| k.text.as_str()), Some("abd"));
    }

    #[test]
    fn test_theme_change_misses() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        store.render("abc", false).unwrap();
        assert_eq!(store.render("abc", true).unwrap(), RenderOutcome::Miss);
        assert_eq!(
            store.cached(),
            Some(&CacheKey {
                text: "abc".into(),
                dark_mode: true
            })
        );
    }

    #[test]
    fn test_failed_encode_keeps_previous_key() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir);

        store.render("abc", false).unwrap();
        let too_long = "x".repeat(8000);
        assert!(matches!(
            store.render(&too_long, false),
            Err(Error::QrEncode(_))
        ));
        assert_eq!(store.render("abc", false).unwrap(), RenderOutcome::Hit);
    }

    #[test]
    fn test_load_ignores_extension() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = QrStore::new(QrEncoder::new(), dir.path().join("qrgen-cache.tmp"));

        store.render("https://example.com", false).unwrap();
        let image = store.load().unwrap();
        assert_eq!((image.width(), image.height()), (290, 290));
        let payload = QrDecoder::new().decode(&image).unwrap();
        assert_eq!(payload.as_str(), Some("https://example.com"));
    }

    #[test]
    fn test_verify_mode_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store(&dir).with_verify(true);
        assert_eq!(
            store.render("https://example.com", false).unwrap(),
            RenderOutcome::Miss
        );
    }
}
