use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

fn locsheet() -> Command {
    Command::cargo_bin("locsheet").unwrap()
}

/// Runs a command expected to fail and returns its stderr.
fn failure_stderr(cmd: &mut Command) -> String {
    let output = cmd.output().unwrap();
    assert!(!output.status.success(), "command unexpectedly succeeded");
    String::from_utf8_lossy(&output.stderr).into_owned()
}

const RECORDS: &str = r#"[
  {
    "name": "Main",
    "path": "ios/Localizable",
    "format": "ios",
    "language_names": ["en", "fr"],
    "translations": [
      ["greeting", "Hello", ""],
      ["hello world", "Hi \"there\"", "Salut"]
    ]
  },
  {
    "name": "Flutter",
    "path": "lib/l10n/app",
    "format": "arb",
    "language_names": ["en"],
    "translations": [["title", "Home"]]
  }
]"#;

#[test]
fn test_export_from_json_records() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("docs.json");
    let out = temp_dir.path().join("out");
    fs::write(&input, RECORDS).unwrap();

    locsheet()
        .args(["export", input.to_str().unwrap(), out.to_str().unwrap()])
        .assert()
        .success();

    let en = fs::read_to_string(out.join("ios/en.lproj/Localizable.strings")).unwrap();
    assert_eq!(en, "greeting=\"Hello\";\n\"hello world\"=\"Hi \\\"there\\\"\";\n");

    let fr = fs::read_to_string(out.join("ios/fr.lproj/Localizable.strings")).unwrap();
    assert_eq!(fr, "greeting=\"\";\n\"hello world\"=\"Salut\";\n");

    assert!(out.join("lib/l10n/app_en.arb").exists());
    assert!(out.join("lib/l10n/app.arb").exists());
}

#[test]
fn test_new_convert_export_pipeline() {
    let temp_dir = TempDir::new().unwrap();
    let xlsx = temp_dir.path().join("Localizable.xlsx");
    let yaml = temp_dir.path().join("Localizable.yaml");

    locsheet()
        .args(["new", "en,fr", "Main,Settings", xlsx.to_str().unwrap()])
        .assert()
        .success();
    assert!(xlsx.exists());

    locsheet()
        .args(["new", "en", "Extra", xlsx.to_str().unwrap()])
        .assert()
        .success();

    locsheet()
        .args(["convert", xlsx.to_str().unwrap(), yaml.to_str().unwrap()])
        .assert()
        .success();
    let content = fs::read_to_string(&yaml).unwrap();
    assert!(content.contains("name: Main"));
    assert!(content.contains("name: Settings"));
    assert!(content.contains("name: Extra"));
    assert!(content.contains("first_key"));

    // Scaffolded documents carry no format until edited.
    let stderr = failure_stderr(locsheet().args([
        "export",
        yaml.to_str().unwrap(),
        temp_dir.path().join("out").to_str().unwrap(),
    ]));
    assert!(stderr.contains("export document(0) failure: invalid format ``"));
}

#[test]
fn test_convert_json_to_yaml_and_back() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("docs.json");
    let yaml = temp_dir.path().join("docs.yml");
    let back = temp_dir.path().join("back.json");
    fs::write(&input, RECORDS).unwrap();

    locsheet()
        .args(["convert", input.to_str().unwrap(), yaml.to_str().unwrap()])
        .assert()
        .success();
    locsheet()
        .args(["convert", yaml.to_str().unwrap(), back.to_str().unwrap()])
        .assert()
        .success();

    let original: serde_json::Value = serde_json::from_str(RECORDS).unwrap();
    let round_tripped: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&back).unwrap()).unwrap();
    assert_eq!(original, round_tripped);
}

#[test]
fn test_unknown_extension_fails() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("docs.csv");
    fs::write(&input, "key,en\n").unwrap();

    let stderr = failure_stderr(locsheet().args([
        "export",
        input.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]));
    assert!(stderr.contains("Error: unsupported file extension `csv`"));
}

#[test]
fn test_malformed_row_fails_with_record_index() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("docs.json");
    fs::write(
        &input,
        r#"[{"name": "A", "path": "a", "format": "json", "language_names": ["en", "fr"], "translations": [["k", "v"]]}]"#,
    )
    .unwrap();

    let stderr = failure_stderr(locsheet().args([
        "export",
        input.to_str().unwrap(),
        temp_dir.path().to_str().unwrap(),
    ]));
    assert!(stderr.contains("record(0) row 0 has 2 cells, expected 3"));
}

#[test]
fn test_missing_subcommand_args() {
    locsheet().args(["export"]).assert().failure();
}
