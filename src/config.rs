//! qrgen runtime configuration handling

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QrgenConfig {
    /// QR encoder parameters
    pub encoder: EncoderOptions,
    /// Main window settings
    pub window: WindowOptions,
    /// Temp-file cache settings
    pub cache: CacheOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
}

impl QrgenConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::info!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            tracing::debug!("No qrgen.toml / qrgen.yaml found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["qrgen.toml", "qrgen.yaml", "qrgen.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("qrgen");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply environment variable overrides after file/default loading.
    fn apply_env_overrides(&mut self) {
        self.encoder.apply_env_overrides();
        self.window.apply_env_overrides();
        self.cache.apply_env_overrides();
        self.logging.apply_env_overrides();
    }
}

/// QR error-correction level, serialised in lowercase
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    /// ~7% recovery
    #[serde(alias = "l")]
    Low,
    /// ~15% recovery
    #[serde(alias = "m")]
    Medium,
    /// ~25% recovery
    #[serde(alias = "q")]
    Quartile,
    /// ~30% recovery
    #[serde(alias = "h")]
    High,
}

impl ErrorCorrection {
    fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "l" | "low" => Some(Self::Low),
            "m" | "medium" => Some(Self::Medium),
            "q" | "quartile" => Some(Self::Quartile),
            "h" | "high" => Some(Self::High),
            _ => None,
        }
    }
}

impl From<ErrorCorrection> for qrcode::EcLevel {
    fn from(level: ErrorCorrection) -> Self {
        match level {
            ErrorCorrection::Low => qrcode::EcLevel::L,
            ErrorCorrection::Medium => qrcode::EcLevel::M,
            ErrorCorrection::Quartile => qrcode::EcLevel::Q,
            ErrorCorrection::High => qrcode::EcLevel::H,
        }
    }
}

/// Parameters handed to the QR encoder
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderOptions {
    /// Smallest QR version to emit; larger versions are picked when the text does not fit
    pub min_version: i16,
    /// Error-correction level
    pub error_correction: ErrorCorrection,
    /// Pixels per module
    pub box_size: u32,
    /// Quiet-zone width in modules
    pub border: u32,
    /// Decode every freshly written image and warn when it does not read back
    pub verify: bool,
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            min_version: 1,
            error_correction: ErrorCorrection::Low,
            box_size: 10,
            border: 4,
            verify: false,
        }
    }
}

impl EncoderOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_ECC") {
            if let Some(parsed) = ErrorCorrection::parse(&level) {
                self.error_correction = parsed;
            }
        }
        if let Ok(verify) = env::var("QRGEN_VERIFY") {
            if let Some(flag) = parse_flag(&verify) {
                self.verify = flag;
            }
        }
    }
}

/// Main window settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowOptions {
    /// Initial inner width in points
    pub width: f32,
    /// Initial inner height in points
    pub height: f32,
    /// Edge length of the square QR preview area
    pub preview_size: u32,
    /// Start with the dark palette
    pub dark_mode: bool,
}

impl Default for WindowOptions {
    fn default() -> Self {
        Self {
            width: 400.0,
            height: 350.0,
            preview_size: 300,
            dark_mode: false,
        }
    }
}

impl WindowOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(dark) = env::var("QRGEN_DARK_MODE") {
            if let Some(flag) = parse_flag(&dark) {
                self.dark_mode = flag;
            }
        }
    }
}

/// Temp-file cache settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheOptions {
    /// Location of the generated image, overwritten on every cache miss
    pub temp_path: PathBuf,
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            temp_path: env::temp_dir().join("qr_code_temp.png"),
        }
    }
}

impl CacheOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(path) = env::var("QRGEN_TEMP_PATH") {
            if !path.trim().is_empty() {
                self.temp_path = PathBuf::from(path);
            }
        }
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `QRGEN_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stdout logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(level) = env::var("QRGEN_LOG_LEVEL") {
            self.level = level;
        }
        if let Ok(file) = env::var("QRGEN_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Ok(color) = env::var("QRGEN_LOG_COLOR") {
            if let Some(flag) = parse_flag(&color) {
                self.color = flag;
            }
        }
        if let Ok(rotation) = env::var("QRGEN_LOG_ROTATION") {
            if let Some(parsed) = LogRotation::from_str(&rotation) {
                self.rotation = Some(parsed);
            }
        }
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl LogRotation {
    fn from_str(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "hourly" => Some(Self::Hourly),
            "daily" => Some(Self::Daily),
            _ => None,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" => Some(true),
        "0" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_generator_parameters() {
        let config = QrgenConfig::default();
        assert_eq!(config.encoder.min_version, 1);
        assert_eq!(config.encoder.error_correction, ErrorCorrection::Low);
        assert_eq!(config.encoder.box_size, 10);
        assert_eq!(config.encoder.border, 4);
        assert_eq!(config.window.preview_size, 300);
        assert!(!config.window.dark_mode);
        assert!(config.cache.temp_path.ends_with("qr_code_temp.png"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrgen.toml");
        fs::write(
            &path,
            r#"
[encoder]
error_correction = "high"
box_size = 6

[window]
dark_mode = true

[cache]
temp_path = "/tmp/custom_qr.png"

[logging]
level = "debug"
rotation = "daily"
"#,
        )
        .unwrap();

        let config = QrgenConfig::from_file(&path).unwrap();
        assert_eq!(config.encoder.error_correction, ErrorCorrection::High);
        assert_eq!(config.encoder.box_size, 6);
        assert_eq!(config.encoder.border, 4);
        assert!(config.window.dark_mode);
        assert_eq!(config.cache.temp_path, PathBuf::from("/tmp/custom_qr.png"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.rotation, Some(LogRotation::Daily));
    }

    #[test]
    fn test_from_yaml_file_with_short_ecc() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "encoder:\n  error_correction: q\n  border: 2\n").unwrap();

        let config = QrgenConfig::from_file(&path).unwrap();
        assert_eq!(config.encoder.error_correction, ErrorCorrection::Quartile);
        assert_eq!(config.encoder.border, 2);
    }

    #[test]
    fn test_unsupported_extension_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qrgen.ini");
        fs::write(&path, "level=debug").unwrap();

        match QrgenConfig::from_file(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("ini")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn test_ecc_parse() {
        assert_eq!(ErrorCorrection::parse("L"), Some(ErrorCorrection::Low));
        assert_eq!(ErrorCorrection::parse("medium"), Some(ErrorCorrection::Medium));
        assert_eq!(ErrorCorrection::parse("x"), None);
        assert_eq!(qrcode::EcLevel::from(ErrorCorrection::High), qrcode::EcLevel::H);
    }
}
