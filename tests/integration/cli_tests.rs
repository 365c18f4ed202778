use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

fn namedupe(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_namedupe"))
        .arg("--no-config")
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    // The child may exit before reading its input.
    let _ = child.stdin.take().unwrap().write_all(stdin.as_bytes());
    child.wait_with_output().unwrap()
}

#[test]
fn test_root_is_a_file_aborts() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("song.mp3");
    fs::write(&file, b"x").unwrap();

    let output = namedupe(&[file.to_str().unwrap()], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains(&format!("{} is not a directory", file.display())));
}

#[test]
fn test_missing_root_aborts() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");

    let output = namedupe(&[missing.to_str().unwrap()], "");

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("is not a directory"));
}

#[test]
fn test_no_root_given_aborts() {
    let output = namedupe(&[], "");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("no directory to scan"));
}

#[test]
fn test_force_pretend_run() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("x.mp3"), b"a").unwrap();
    fs::write(dir.path().join("x.wav"), b"b").unwrap();

    let output = namedupe(
        &[dir.path().to_str().unwrap(), "-e", ".mp3", "--force", "--pretend"],
        "",
    );

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        format!(
            "{}\n==========\nFound duplicate x\nDeleting file: {}\n\n",
            dir.path().display(),
            dir.path().join("x.mp3").display()
        )
    );
    assert!(dir.path().join("x.mp3").exists());
}

#[test]
fn test_interactive_yes_deletes() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"a").unwrap();
    fs::write(dir.path().join("a.flac"), b"b").unwrap();

    let output = namedupe(&[dir.path().to_str().unwrap()], "y\n");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("[y|N]"));
    assert!(!dir.path().join("a.mp3").exists());
    assert!(dir.path().join("a.flac").exists());
}

#[test]
fn test_quiet_run_prints_prompts_only() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.mp3"), b"a").unwrap();
    fs::write(dir.path().join("a.flac"), b"b").unwrap();

    let output = namedupe(&[dir.path().to_str().unwrap(), "--quiet"], "n\n");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        stdout,
        format!("Delete {}? [y|N] ", dir.path().join("a.mp3").display())
    );
    assert!(dir.path().join("a.mp3").exists());
}

#[test]
fn test_print_config() {
    let output = namedupe(&["--print-config", "-e", "wav", "--pretend"], "");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pretend = true"));
    assert!(stdout.contains("\"wav\""));
}
