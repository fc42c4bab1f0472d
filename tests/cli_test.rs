#![cfg(feature = "cli")]

use std::process::{Command, Output};

fn crop_care(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_crop-care"))
        .args(args)
        .env_remove("CROPCARE_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to run crop-care binary")
}

#[test]
fn test_no_image_reports_notice_before_config() {
    let output = crop_care(&[]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("No Image Selected"), "stderr was: {}", stderr);
    assert!(!stderr.contains("Configuration problem"));
    assert!(output.stdout.is_empty());
}

#[test]
fn test_no_image_wins_over_missing_config_file() {
    let output = crop_care(&["--config", "does/not/exist.toml"]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("No Image Selected"), "stderr was: {}", stderr);
}

#[test]
fn test_missing_api_key_is_config_error() {
    let dir = tempfile::TempDir::new().expect("tempdir");
    let image = dir.path().join("leaf.jpg");
    std::fs::write(&image, b"\xFF\xD8\xFF\xE0fake-jpeg").expect("write image");

    let output = crop_care(&["--image", image.to_str().expect("utf-8 path")]);
    let stderr = String::from_utf8_lossy(&output.stderr);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr.contains("Configuration problem"), "stderr was: {}", stderr);
}
