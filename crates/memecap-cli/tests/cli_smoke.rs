//! CLI Smoke Tests
//!
//! Integration tests for the memecap CLI commands:
//! - `info`: Display formats and fonts
//! - `shapes`: Draw the shapes demo
//! - `lines`: Print wrapped lines
//! - `render`: Caption an image
//! - `live`: Caption from stdin events
//!
//! Widths come from `--monospace` so the tests do not depend on which fonts
//! the host has installed.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::{Command, Stdio};

use serde_json::Value;

fn memecap() -> Command {
    Command::new(env!("CARGO_BIN_EXE_memecap"))
}

/// Create a temporary file path
fn temp_output(ext: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let id = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("memecap_test_{}.{}", id, ext));
    path
}

/// A PNG background made by the shapes demo
fn background() -> PathBuf {
    let path = temp_output("png");
    let output = memecap()
        .args(["shapes", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to execute memecap shapes");
    assert!(output.status.success(), "shapes should succeed: {:?}", output);
    path
}

fn ops(json: &Value, op: &str) -> Vec<Value> {
    json["commands"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|command| command["op"] == op)
        .cloned()
        .collect()
}

// ============================================================================
// Info Command Tests
// ============================================================================

#[test]
fn test_info_formats() {
    let output = memecap()
        .args(["info", "--formats"])
        .output()
        .expect("Failed to execute memecap info");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("png"));
    assert!(stdout.contains("ppm"));
    assert!(stdout.contains("json"));
}

#[test]
fn test_no_subcommand_fails() {
    let output = memecap().output().expect("Failed to execute memecap");
    assert!(!output.status.success());
}

// ============================================================================
// Shapes Command Tests
// ============================================================================

#[test]
fn test_shapes_png() {
    let path = background();
    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
    let _ = fs::remove_file(&path);
}

#[test]
fn test_shapes_json_records_three_fills() {
    let path = temp_output("json");
    let output = memecap()
        .args(["shapes", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to execute memecap shapes");
    assert!(output.status.success());

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["width"], 1000);
    assert_eq!(json["height"], 2000);
    assert_eq!(ops(&json, "fill_circle").len(), 2);
    assert_eq!(ops(&json, "fill_rect").len(), 1);
    let _ = fs::remove_file(&path);
}

// ============================================================================
// Lines Command Tests
// ============================================================================

#[test]
fn test_lines_wraps_greedily() {
    let output = memecap()
        .args([
            "lines",
            "The quick brown fox jumps",
            "--width",
            "50",
            "--size",
            "10",
            "--monospace",
            "0.5",
        ])
        .output()
        .expect("Failed to execute memecap lines");

    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        rows,
        ["1\t45.0\tThe quick", "2\t45.0\tbrown fox", "3\t25.0\tjumps"]
    );
}

#[test]
fn test_lines_rejects_nan_width() {
    let output = memecap()
        .args(["lines", "a b", "--width", "NaN", "--monospace", "0.5"])
        .output()
        .expect("Failed to execute memecap lines");
    assert!(!output.status.success());
}

// ============================================================================
// Render Command Tests
// ============================================================================

#[test]
fn test_render_json_layout() {
    let image = background();
    let path = temp_output("json");
    let output = memecap()
        .args(["render", "-i"])
        .arg(&image)
        .args(["-t", "one does not simply", "-b", "hello", "--size", "400x400"])
        .args(["--monospace", "0.5", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to execute memecap render");
    assert!(output.status.success(), "{:?}", output);

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(json["commands"][0]["op"], "clear");
    assert_eq!(json["commands"][1]["op"], "draw_image");
    assert_eq!(json["commands"][1]["width"], 400.0);

    let fills = ops(&json, "fill_text");
    let texts: Vec<&str> = fills.iter().map(|fill| fill["text"].as_str().unwrap()).collect();
    assert_eq!(texts, ["one does not", "simply", "hello"]);
    assert_eq!(fills[0]["y"], 30.0);
    assert_eq!(fills[1]["y"], 70.0);
    assert_eq!(fills[2]["y"], 370.0);
    assert_eq!(fills[0]["x"], 200.0);
    assert_eq!(ops(&json, "stroke_text").len(), 3);

    let _ = fs::remove_file(&image);
    let _ = fs::remove_file(&path);
}

#[test]
fn test_render_config_file() {
    let image = background();
    let config = temp_output("toml");
    fs::write(&config, "[bottom]\nanchor = \"top\"\nmargin = 0\n").unwrap();
    let path = temp_output("json");

    let output = memecap()
        .args(["render", "-i"])
        .arg(&image)
        .args(["-b", "hi", "--size", "400x400", "--monospace", "0.5", "-c"])
        .arg(&config)
        .arg("-o")
        .arg(&path)
        .output()
        .expect("Failed to execute memecap render");
    assert!(output.status.success(), "{:?}", output);

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let fills = ops(&json, "fill_text");
    let bottom = fills.last().unwrap();
    assert_eq!(bottom["text"], "hi");
    assert_eq!(bottom["y"], 0.0);

    for file in [&image, &config, &path] {
        let _ = fs::remove_file(file);
    }
}

#[test]
fn test_render_missing_image_fails() {
    let path = temp_output("json");
    let output = memecap()
        .args(["render", "-i", "/no/such/image.png", "--monospace", "0.5", "-o"])
        .arg(&path)
        .output()
        .expect("Failed to execute memecap render");

    assert!(!output.status.success());
    assert!(!path.exists());
}

#[test]
fn test_render_bad_color_fails() {
    let output = memecap()
        .args(["render", "-i", "x.png", "-o", "y.png", "--fill", "#12"])
        .output()
        .expect("Failed to execute memecap render");
    assert!(!output.status.success());
}

// ============================================================================
// Live Command Tests
// ============================================================================

#[test]
fn test_live_final_frame_has_latest_text() {
    let image = background();
    let path = temp_output("json");
    let mut child = memecap()
        .args(["live", "-i"])
        .arg(&image)
        .args(["--monospace", "0.5", "-o"])
        .arg(&path)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .spawn()
        .expect("Failed to spawn memecap live");

    {
        let stdin = child.stdin.as_mut().unwrap();
        stdin
            .write_all(b"top: o\ntop: one\n# comment\nbottom: two\n")
            .unwrap();
    }
    drop(child.stdin.take());
    let status = child.wait().unwrap();
    assert!(status.success());

    let json: Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let texts: Vec<String> = ops(&json, "fill_text")
        .iter()
        .map(|fill| fill["text"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(texts, ["one", "two"]);

    let _ = fs::remove_file(&image);
    let _ = fs::remove_file(&path);
}
