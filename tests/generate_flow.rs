use std::fs;
use std::time::Duration;

use qrgen::{QrDecoder, QrEncoder, QrGenerator, QrStore, QrgenConfig, RenderOutcome};

fn generator_in(dir: &tempfile::TempDir) -> QrGenerator {
    let mut config = QrgenConfig::default();
    config.cache.temp_path = dir.path().join("qr_code_temp.png");
    QrGenerator::from_config(&config)
}

#[test]
fn generated_temp_file_decodes_to_input() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = generator_in(&dir);

    generator
        .generate("https://example.com", false)
        .expect("generate");

    let written = image::open(generator.store().path()).expect("open temp file");
    let payload = QrDecoder::new().decode(&written).expect("decode temp file");
    assert_eq!(payload.as_str(), Some("https://example.com"));
}

#[test]
fn unchanged_input_does_not_rewrite_temp_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = generator_in(&dir);
    let path = generator.store().path().to_path_buf();

    generator.generate("same text", true).expect("first generate");
    let first_bytes = fs::read(&path).expect("read temp");
    let first_modified = fs::metadata(&path).and_then(|m| m.modified()).expect("mtime");

    std::thread::sleep(Duration::from_millis(20));
    generator.generate("same text", true).expect("second generate");

    assert_eq!(generator.store().encode_count(), 1);
    assert_eq!(fs::read(&path).expect("read temp"), first_bytes);
    assert_eq!(
        fs::metadata(&path).and_then(|m| m.modified()).expect("mtime"),
        first_modified
    );
}

#[test]
fn changed_text_rewrites_temp_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = generator_in(&dir);
    let path = generator.store().path().to_path_buf();

    generator.generate("first text", false).expect("generate");
    let before = fs::read(&path).expect("read temp");

    generator.generate("second text", false).expect("generate");
    let after = fs::read(&path).expect("read temp");

    assert_eq!(generator.store().encode_count(), 2);
    assert_ne!(before, after);
}

#[test]
fn empty_text_still_produces_a_code() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = generator_in(&dir);

    let shown = generator.generate("", false).expect("empty text encodes");
    assert_eq!(shown.width(), 300);
    assert_eq!(generator.store().cached().map(|k| k.text.as_str()), Some(""));
}

#[test]
fn saved_image_is_readable_qr() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut generator = generator_in(&dir);
    generator
        .generate("https://example.com", false)
        .expect("generate");

    let target = dir.path().join("saved.png");
    generator.save(&target).expect("save");

    let saved = image::open(&target).expect("open saved");
    assert_eq!((saved.width(), saved.height()), (300, 300));
    let payload = QrDecoder::new().decode(&saved).expect("decode saved");
    assert_eq!(payload.as_str(), Some("https://example.com"));
}

#[test]
fn theme_flag_is_part_of_the_cache_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut store = QrStore::new(QrEncoder::new(), dir.path().join("qr.png"));

    assert_eq!(store.render("theme", false).unwrap(), RenderOutcome::Miss);
    let light = fs::read(store.path()).unwrap();
    assert_eq!(store.render("theme", true).unwrap(), RenderOutcome::Miss);
    let dark = fs::read(store.path()).unwrap();

    // The raster never depends on the theme.
    assert_eq!(light, dark);
}

#[test]
fn temp_path_extension_does_not_matter() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut config = QrgenConfig::default();
    config.cache.temp_path = dir.path().join("qrgen-cache.tmp");
    let mut generator = QrGenerator::from_config(&config);

    generator
        .generate("https://example.com", false)
        .expect("generate with .tmp temp path");

    let reloaded = generator.store().load().expect("reload temp file");
    let payload = QrDecoder::new().decode(&reloaded).expect("decode temp file");
    assert_eq!(payload.as_str(), Some("https://example.com"));
}
