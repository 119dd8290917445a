use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

const DOC: &str = "segments: [Hello, world]\ninsert_separator: true\nannotations:\n  - indices: [0]\n    annotation: { type: underline }\n";

#[test]
fn renders_document_to_stdout() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("hello.yaml");
    fs::write(&doc_path, DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.arg(&doc_path);

    // println! adds a trailing newline.
    cmd.assert()
        .success()
        .stdout(predicate::eq("<p><u>Hello </u>world</p>\n"));
}

#[test]
fn json_flag_writes_envelope_to_out_file() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("hello.yaml");
    fs::write(&doc_path, DOC).unwrap();
    let out_path = dir.path().join("out").join("hello.json");

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.arg(&doc_path).arg("--json").arg("--out").arg(&out_path);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let json = fs::read_to_string(&out_path).unwrap();
    assert!(json.contains("\"schema_version\": 1"), "{json}");
    assert!(json.contains("\"text\": \"Hello world\""), "{json}");
    assert!(json.contains("\"type\": \"underline\""), "{json}");
}

#[test]
fn out_of_range_index_fails() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("bad.yaml");
    fs::write(
        &doc_path,
        "segments: [a]\nannotations:\n  - indices: [2]\n    annotation: { type: underline }\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.arg(&doc_path);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("segment index 2 is out of range"));
}

#[test]
fn render_all_writes_sibling_html_and_skips_broken_documents() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("docs").join("nested");
    fs::create_dir_all(&nested).unwrap();
    fs::write(nested.join("hello.yaml"), DOC).unwrap();
    fs::write(
        dir.path().join("docs").join("plain.json"),
        r#"{ "segments": ["x"] }"#,
    )
    .unwrap();
    fs::write(
        dir.path().join("docs").join("broken.yaml"),
        "segments: []\n",
    )
    .unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.arg("--render-all").arg(dir.path().join("docs"));
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Done. Rendered 2 files"));

    let html = fs::read_to_string(nested.join("hello.html")).unwrap();
    assert_eq!(html, "<p><u>Hello </u>world</p>");
    let plain = fs::read_to_string(dir.path().join("docs").join("plain.html")).unwrap();
    assert_eq!(plain, "<p>x</p>");
    assert!(!dir.path().join("docs").join("broken.html").exists());
}

#[test]
fn missing_document_argument_is_a_usage_error() {
    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.assert().failure();
}

#[test]
fn render_all_skips_documents_sharing_an_output_file() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("foo.json"), r#"{ "segments": ["from json"] }"#).unwrap();
    fs::write(dir.path().join("foo.yaml"), "segments: [from yaml]\n").unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.arg("--render-all").arg(dir.path());
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Done. Rendered 1 files"))
        .stderr(predicate::str::contains("(1 skipped)"));

    // documents are visited in path order, so the json file claims foo.html.
    let html = fs::read_to_string(dir.path().join("foo.html")).unwrap();
    assert_eq!(html, "<p>from json</p>");
}

#[test]
fn verbose_flag_logs_debug_output_to_stderr() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("hello.yaml");
    fs::write(&doc_path, DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.env_remove("SEGSPAN_LOG").env("NO_COLOR", "1");
    cmd.arg("-v").arg(&doc_path);
    cmd.assert()
        .success()
        .stdout(predicate::eq("<p><u>Hello </u>world</p>\n"))
        .stderr(predicate::str::contains("built rich text"));

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.env_remove("SEGSPAN_LOG").env("NO_COLOR", "1");
    cmd.arg(&doc_path);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("built rich text").not());
}

#[test]
fn log_env_var_overrides_default_level() {
    let dir = tempdir().unwrap();
    let doc_path = dir.path().join("hello.yaml");
    fs::write(&doc_path, DOC).unwrap();

    let mut cmd = cargo_bin_cmd!("segspan");
    cmd.env("SEGSPAN_LOG", "segspan=debug").env("NO_COLOR", "1");
    cmd.arg(&doc_path);
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("built rich text"));
}
