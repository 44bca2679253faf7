//! Generate and save actions behind the main window

use crate::cache::QrStore;
use crate::config::QrgenConfig;
use crate::error::{Error, Result};
use crate::qr::QrEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat};
use std::path::Path;

/// Holds the cache and the image currently on display
#[derive(Debug)]
pub struct QrGenerator {
    store: QrStore,
    preview_size: u32,
    displayed: Option<DynamicImage>,
}

impl QrGenerator {
    /// Generator writing to `store`, scaling output into a `preview_size` square
    pub fn new(store: QrStore, preview_size: u32) -> Self {
        Self {
            store,
            preview_size: preview_size.max(1),
            displayed: None,
        }
    }

    /// Generator configured from the loaded settings
    pub fn from_config(config: &QrgenConfig) -> Self {
        let encoder = QrEncoder::from_options(&config.encoder);
        let store = QrStore::new(encoder, &config.cache.temp_path).with_verify(config.encoder.verify);
        Self::new(store, config.window.preview_size)
    }

    /// Underlying cache
    pub fn store(&self) -> &QrStore {
        &self.store
    }

    /// Image on display, if anything was generated
    pub fn displayed(&self) -> Option<&DynamicImage> {
        self.displayed.as_ref()
    }

    /// Encode `text` (unless cached), then reload the temp file and scale it for display.
    ///
    /// Empty text goes to the encoder unchanged. On error the previous image stays on display.
    pub fn generate(&mut self, text: &str, dark_mode: bool) -> Result<&DynamicImage> {
        let outcome = self.store.render(text, dark_mode)?;
        let image = self.store.load()?;
        let scaled = image.resize(self.preview_size, self.preview_size, FilterType::CatmullRom);
        tracing::debug!(
            ?outcome,
            width = scaled.width(),
            height = scaled.height(),
            "Displaying QR code"
        );
        Ok(&*self.displayed.insert(scaled))
    }

    /// Write the displayed image to `path` as PNG.
    ///
    /// Fails with [`Error::NothingToSave`] before the first generation, without touching `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let image = self.displayed.as_ref().ok_or(Error::NothingToSave)?;
        image.save_with_format(path, ImageFormat::Png)?;
        tracing::info!(path = %path.display(), "Saved QR code");
        Ok(())
    }
}
