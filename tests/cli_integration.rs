/*!
 * Integration tests for the export-code binary
 */

use std::fs;
use std::process::Command;

use tempfile::tempdir;

fn export_code() -> Command {
    Command::new(env!("CARGO_BIN_EXE_export-code"))
}

#[test]
fn test_export_reports_output_and_size() {
    let temp_dir = tempdir().unwrap();
    let root = fs::canonicalize(temp_dir.path()).unwrap();
    fs::write(root.join("a.txt"), "hello").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("c.txt"), "world").unwrap();

    let output = export_code().arg(&root).output().unwrap();
    assert!(output.status.success());

    let export_file = root.join("docs").join("export_code.txt");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with(&format!(
        "Scan complete. Output written to {} (Size: ",
        export_file.display()
    )));
    assert!(stdout.trim_end().ends_with(" B)"));

    let content = fs::read_to_string(&export_file).unwrap();
    assert!(content.starts_with("PROJECT CODE EXPORT\n"));
    assert!(content.contains("File: a.txt\n===========\n\nhello"));
    assert!(content.contains("File: sub/c.txt\n"));
}

#[test]
fn test_custom_output_path() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    fs::write(root.join("main.rs"), "fn main() {}\n").unwrap();

    let status = export_code()
        .arg(root)
        .args(["--output", "out/snapshot.txt", "--quiet"])
        .status()
        .unwrap();
    assert!(status.success());

    let content = fs::read_to_string(root.join("out").join("snapshot.txt")).unwrap();
    assert!(content.contains("├── out\n│   └── snapshot.txt\n└── main.rs\n"));
    assert!(content.contains("File: main.rs\n"));
    assert!(content.contains("File: out/snapshot.txt\n"));
}

#[test]
fn test_missing_root_fails() {
    let temp_dir = tempdir().unwrap();

    let output = export_code()
        .arg(temp_dir.path().join("missing"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Path not found"));
}

#[test]
fn test_generate_completions() {
    let output = export_code().args(["--generate", "bash"]).output().unwrap();

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("export-code"));
}
