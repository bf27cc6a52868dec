use std::path::Path;
use std::process::{Command, Output};

use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use serde_json::Value;

fn receipt_processor(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_receipt-processor"))
        .args(args)
        .env_remove("RECEIPT_OCR_CONFIG")
        .env("RUST_LOG", "info")
        .output()
        .expect("failed to launch receipt-processor")
}

fn stdout_json(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not JSON ({e}): {}",
            String::from_utf8_lossy(&output.stdout)
        )
    })
}

fn write_receipt_png(dir: &Path) -> String {
    let img: GrayImage = ImageBuffer::from_fn(16, 16, |x, _| Luma([if x % 3 == 0 { 10 } else { 240 }]));
    let path = dir.join("receipt.png");
    DynamicImage::ImageLuma8(img).save(&path).unwrap();
    path.to_str().unwrap().to_string()
}

#[test]
fn no_arguments_prints_usage_and_fails() {
    let out = receipt_processor(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout_json(&out),
        serde_json::json!({"error": "Usage: receipt-processor <image_path>"})
    );
}

#[test]
fn extra_arguments_print_usage_and_fail() {
    let out = receipt_processor(&["a.png", "b.png"]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout_json(&out)["error"],
        "Usage: receipt-processor <image_path>"
    );
}

#[test]
fn double_dash_is_not_swallowed() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_receipt_png(dir.path());

    let out = receipt_processor(&["--", &image]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout_json(&out)["error"],
        "Usage: receipt-processor <image_path>"
    );
}

#[test]
fn odd_single_arguments_are_treated_as_paths() {
    for (arg, expected) in [("--", "Image file not found: --"), ("", "Image file not found: ")] {
        let out = receipt_processor(&[arg]);
        assert_eq!(out.status.code(), Some(1), "arg {arg:?}");
        assert_eq!(stdout_json(&out)["error"], expected, "arg {arg:?}");
    }
}

#[test]
fn missing_image_fails_with_path_in_message() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.jpg");
    let missing = missing.to_str().unwrap();

    let out = receipt_processor(&[missing]);
    assert_eq!(out.status.code(), Some(1));
    assert_eq!(
        stdout_json(&out),
        serde_json::json!({"error": format!("Image file not found: {missing}")})
    );
}

#[test]
fn output_is_pretty_printed_with_two_spaces() {
    let out = receipt_processor(&[]);
    let stdout = String::from_utf8(out.stdout).unwrap();
    assert_eq!(stdout, "{\n  \"error\": \"Usage: receipt-processor <image_path>\"\n}\n");
}

#[test]
fn diagnostics_go_to_stderr() {
    let out = receipt_processor(&["/definitely/not/here.png"]);
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Image file not found"), "stderr: {stderr}");
    // stdout holds exactly one JSON document.
    stdout_json(&out);
}

#[cfg(not(feature = "tesseract"))]
#[test]
fn build_without_engine_reports_missing_engine() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_receipt_png(dir.path());

    let out = receipt_processor(&[&image]);
    assert_eq!(out.status.code(), Some(1));
    let error = stdout_json(&out)["error"].as_str().unwrap().to_string();
    assert!(error.starts_with("Missing OCR engine: "), "{error}");
}

#[cfg(feature = "tesseract")]
#[test]
fn recognized_image_exits_zero_whatever_the_body() {
    let dir = tempfile::tempdir().unwrap();
    let image = write_receipt_png(dir.path());

    let out = receipt_processor(&[&image]);
    assert_eq!(out.status.code(), Some(0));
    let body = stdout_json(&out);
    assert!(body.get("error").is_some() || body["success"] == true, "{body}");
}
