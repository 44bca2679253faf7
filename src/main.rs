//! qrgen desktop entrypoint

use anyhow::Context;
use clap::Parser;
use eframe::egui;
use qrgen::app::WINDOW_TITLE;
use qrgen::{QrGeneratorApp, QrgenConfig, logging};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "qrgen", version, about = "Frameless desktop QR code generator")]
struct Cli {
    /// Optional configuration file (toml/yaml). Defaults to qrgen.{toml,yaml} in cwd/XDG config.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with the dark theme
    #[arg(long)]
    dark: bool,

    /// Where generated images are cached (overwritten on every new code)
    #[arg(long, value_name = "PATH")]
    temp_path: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = QrgenConfig::load(cli.config.as_deref())?;

    if cli.dark {
        config.window.dark_mode = true;
    }

    if let Some(path) = cli.temp_path {
        config.cache.temp_path = path;
    }

    logging::init(&config.logging)?;
    info!(
        temp_path = %config.cache.temp_path.display(),
        dark_mode = config.window.dark_mode,
        "Starting qrgen"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([config.window.width, config.window.height])
            .with_decorations(false)
            .with_resizable(false),
        ..Default::default()
    };

    eframe::run_native(
        WINDOW_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(QrGeneratorApp::new(cc, &config)))),
    )
    .map_err(qrgen::Error::from)
    .context("GUI event loop failed")?;

    Ok(())
}
