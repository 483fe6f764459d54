use serde_json::Value;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

// Point the central config lookup at an empty directory so a developer's
// own config cannot leak into the run.
fn run_chromepdf(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_chromepdf"))
        .args(args)
        .env("XDG_CONFIG_HOME", home)
        .env("HOME", home)
        .env_remove("RUST_LOG")
        .output()
        .expect("run chromepdf")
}

fn error_report(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout.lines().last().expect("status line");
    let report: Value = serde_json::from_str(line).expect("json report");
    assert_eq!(report["mode"], "error", "report: {report}");
    report
}

fn write_html(dir: &TempDir) -> String {
    let path = dir.path().join("page.html");
    std::fs::write(&path, "<html><body><h1>Hello</h1></body></html>").expect("write html");
    path.to_str().unwrap().to_string()
}

#[test]
fn help_exits_zero() {
    let dir = TempDir::new().expect("tempdir");
    let output = run_chromepdf(dir.path(), &["--help"]);

    assert_eq!(output.status.code(), Some(0));
    let text = String::from_utf8_lossy(&output.stdout);
    assert!(text.contains("html"));
    assert!(text.contains("url"));
}

#[test]
fn out_of_range_scale_fails_before_launch() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_html(&dir);
    let out = dir.path().join("out.pdf");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "--input",
            &input,
            "--output",
            out.to_str().unwrap(),
            "--scale",
            "5",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "options");
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("scale"));
    assert!(!out.exists());
}

#[test]
fn oversized_margins_fail_validation() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_html(&dir);

    let output = run_chromepdf(
        dir.path(),
        &[
            "html", "-i", &input, "-o", "-", "--paper", "letter", "--margin", "6",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "options");
}

#[test]
fn missing_input_file_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("nope.html");

    let output = run_chromepdf(
        dir.path(),
        &["html", "-i", missing.to_str().unwrap(), "-o", "out.pdf"],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "config");
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("HTML file not found"));
}

#[test]
fn malformed_url_exits_two() {
    let dir = TempDir::new().expect("tempdir");

    let output = run_chromepdf(dir.path(), &["url", "--url", "not a url", "-o", "out.pdf"]);

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "config");
}

#[test]
fn unsupported_scheme_exits_two() {
    let dir = TempDir::new().expect("tempdir");

    let output = run_chromepdf(
        dir.path(),
        &["url", "--url", "ftp://example.com/file", "-o", "out.pdf"],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Unsupported URL scheme"));
}

#[test]
fn invalid_config_file_exits_two() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_html(&dir);
    let cfg_path = dir.path().join("chromepdf.toml");
    std::fs::write(&cfg_path, "[page]\nunknown_key = 1\n").expect("write config");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            &input,
            "-o",
            "out.pdf",
            "--config",
            cfg_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "config");
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("chromepdf.toml"));
}

#[test]
fn config_values_are_validated() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_html(&dir);
    let cfg_path = dir.path().join("chromepdf.toml");
    std::fs::write(&cfg_path, "[page]\npaper = \"A4\"\npaper_size = \"5x7\"\n")
        .expect("write config");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            &input,
            "-o",
            "out.pdf",
            "--config",
            cfg_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("Invalid config"));
}

#[test]
fn conflicting_paper_flags_are_rejected_by_parser() {
    let dir = TempDir::new().expect("tempdir");
    let input = write_html(&dir);

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            &input,
            "-o",
            "out.pdf",
            "--paper",
            "A4",
            "--paper-size",
            "5x7",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("cannot be used with"));
}

fn write_wide_margin_config(dir: &TempDir) -> String {
    let cfg_path = dir.path().join("wide.toml");
    std::fs::write(&cfg_path, "[page]\nmargins = { left = 4.5, right = 4.5 }\n")
        .expect("write config");
    cfg_path.to_str().unwrap().to_string()
}

#[test]
fn cli_flag_overrides_config_before_validation() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = write_wide_margin_config(&dir);
    // The input is missing so the run stops right after option validation.
    let missing = dir.path().join("absent.html");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            "out.pdf",
            "--config",
            &cfg_path,
            "--paper",
            "tabloid",
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    let message = report["error"]["message"].as_str().unwrap();
    assert!(message.contains("HTML file not found"), "got {message}");
    assert!(!message.contains("Invalid config"), "got {message}");
}

#[test]
fn config_values_without_override_fail_merged_validation() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = write_wide_margin_config(&dir);
    let missing = dir.path().join("absent.html");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            "out.pdf",
            "--config",
            &cfg_path,
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert_eq!(report["error"]["category"], "options");
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("printable area"));
}

#[test]
fn lowercase_paper_name_in_config_is_accepted() {
    let dir = TempDir::new().expect("tempdir");
    let cfg_path = dir.path().join("letter.toml");
    std::fs::write(&cfg_path, "[page]\npaper = \"letter\"\n").expect("write config");
    let missing = dir.path().join("absent.html");

    let output = run_chromepdf(
        dir.path(),
        &[
            "html",
            "-i",
            missing.to_str().unwrap(),
            "-o",
            "out.pdf",
            "--config",
            cfg_path.to_str().unwrap(),
        ],
    );

    assert_eq!(output.status.code(), Some(2));
    let report = error_report(&output);
    assert!(report["error"]["message"]
        .as_str()
        .unwrap()
        .contains("HTML file not found"));
}
