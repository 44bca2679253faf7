//! QR code encoder

use crate::config::EncoderOptions;
use crate::error::{Error, Result};
use image::{GrayImage, Luma, imageops};
use qrcode::{EcLevel, QrCode, Version};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

/// QR code encoder
#[derive(Debug, Clone)]
pub struct QrEncoder {
    ecc_level: EcLevel,
    min_version: i16,
    box_size: u32,
    border: u32,
}

impl QrEncoder {
    /// Encoder with the generator's defaults: version 1 upwards, low ECC, 10px modules, 4-module border
    pub fn new() -> Self {
        Self::from_options(&EncoderOptions::default())
    }

    /// Build an encoder from configuration
    pub fn from_options(options: &EncoderOptions) -> Self {
        Self {
            ecc_level: options.error_correction.into(),
            min_version: options.min_version.clamp(1, 40),
            box_size: options.box_size.max(1),
            border: options.border,
        }
    }

    /// Error-correction level in use
    pub fn ecc_level(&self) -> EcLevel {
        self.ecc_level
    }

    /// Encode text into a black-on-white image.
    ///
    /// The smallest version that fits the text is used, but never one below
    /// the configured minimum. Text that exceeds version 40 is an error.
    /// Empty text is encoded as-is.
    pub fn encode(&self, text: &str) -> Result<GrayImage> {
        let code = self.build_code(text.as_bytes())?;

        let modules = code
            .render::<Luma<u8>>()
            .dark_color(DARK)
            .light_color(LIGHT)
            .quiet_zone(false)
            .module_dimensions(self.box_size, self.box_size)
            .build();

        let pad = self.border * self.box_size;
        let side = modules.width() + 2 * pad;
        let mut image = GrayImage::from_pixel(side, side, LIGHT);
        imageops::replace(&mut image, &modules, i64::from(pad), i64::from(pad));

        tracing::debug!(
            version = ?code.version(),
            width = code.width(),
            pixels = side,
            "Encoded QR code"
        );

        Ok(image)
    }

    fn build_code(&self, data: &[u8]) -> Result<QrCode> {
        let code = QrCode::with_error_correction_level(data, self.ecc_level)?;
        match code.version() {
            Version::Normal(v) if v < self.min_version => Ok(QrCode::with_version(
                data,
                Version::Normal(self.min_version),
                self.ecc_level,
            )?),
            Version::Normal(_) => Ok(code),
            Version::Micro(_) => Err(Error::QrEncode(
                "Encoder unexpectedly produced a Micro QR code".to_string(),
            )),
        }
    }
}

impl Default for QrEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ErrorCorrection;
    use crate::qr::QrDecoder;

    #[test]
    fn test_version_one_dimensions() {
        // 21 modules + 2 * 4 border, 10px each
        let image = QrEncoder::new().encode("hello").unwrap();
        assert_eq!(image.dimensions(), (290, 290));
    }

    #[test]
    fn test_border_is_white() {
        let image = QrEncoder::new().encode("hello").unwrap();
        for x in 0..40 {
            assert_eq!(image.get_pixel(x, 0), &LIGHT);
            assert_eq!(image.get_pixel(0, x), &LIGHT);
        }
        // Top-left finder pattern starts right after the quiet zone.
        assert_eq!(image.get_pixel(40, 40), &DARK);
    }

    #[test]
    fn test_only_black_and_white() {
        let image = QrEncoder::new().encode("colors").unwrap();
        assert!(image.pixels().all(|p| *p == DARK || *p == LIGHT));
    }

    #[test]
    fn test_empty_text_is_encoded() {
        let image = QrEncoder::new().encode("").unwrap();
        assert_eq!(image.dimensions(), (290, 290));
    }

    #[test]
    fn test_grows_past_minimum_version() {
        let text = "a".repeat(100);
        let image = QrEncoder::new().encode(&text).unwrap();
        assert!(image.width() > 290);
    }

    #[test]
    fn test_minimum_version_respected() {
        let options = EncoderOptions {
            min_version: 3,
            box_size: 1,
            border: 0,
            ..EncoderOptions::default()
        };
        let image = QrEncoder::from_options(&options).encode("x").unwrap();
        assert_eq!(image.width(), 29);
    }

    #[test]
    fn test_over_capacity_fails() {
        let options = EncoderOptions {
            error_correction: ErrorCorrection::High,
            ..EncoderOptions::default()
        };
        let text = "x".repeat(4000);
        match QrEncoder::from_options(&options).encode(&text) {
            Err(Error::QrEncode(_)) => {}
            other => panic!("expected encode error, got {other:?}"),
        }
    }

    #[test]
    fn test_round_trip() {
        let original = "https://example.com";
        let image = QrEncoder::new().encode(original).unwrap();
        let decoded = QrDecoder::new().decode_gray(&image).unwrap();
        assert_eq!(decoded.as_str(), Some(original));
    }
}
