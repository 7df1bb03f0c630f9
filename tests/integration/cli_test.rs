//! Integration tests for command-line handling

use image::{Rgb, RgbImage};
use std::fs;
use std::process::Command;
use tempfile::tempdir;

fn webpconv() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_webpconv"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_options() {
    let output = webpconv().arg("--help").output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    for flag in ["--quality", "--skip-existing", "--jobs", "--no-auto-orient"] {
        assert!(stdout.contains(flag), "missing {} in help", flag);
    }
}

#[test]
fn test_invalid_quality_rejected() {
    let output = webpconv().args(["--quality", "150"]).output().unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_same_extensions_rejected() {
    let root = tempdir().unwrap();
    let output = webpconv()
        .args([root.path().to_str().unwrap(), "--target-ext", "JPG"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must differ"));

    let output = webpconv()
        .args([root.path().to_str().unwrap(), "--target-ext", ".out.jpg"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("must differ"));
}

#[test]
fn test_quiet_prints_nothing_on_success() {
    let root = tempdir().unwrap();
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]))
        .save_with_format(root.path().join("a.jpg"), image::ImageFormat::Jpeg)
        .unwrap();

    let output = webpconv()
        .args([root.path().to_str().unwrap(), "--quiet"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(root.path().join("a.webp").exists());
}

#[test]
fn test_custom_source_extension() {
    let root = tempdir().unwrap();
    RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]))
        .save_with_format(root.path().join("a.jpeg"), image::ImageFormat::Jpeg)
        .unwrap();
    fs::write(root.path().join("b.jpg"), b"ignored because of the extension").unwrap();

    let output = webpconv()
        .args([root.path().to_str().unwrap(), "--source-ext", "jpeg"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(output.stderr.is_empty());
    assert!(root.path().join("a.webp").exists());
    assert!(!root.path().join("b.webp").exists());
}
