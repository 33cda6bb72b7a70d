//! Command-line behaviour of the regen-atoms binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

fn regen_atoms(cwd: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_regen-atoms"))
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run regen-atoms")
}

#[test]
fn test_no_arguments_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = regen_atoms(dir.path(), &[]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: regen-atoms"), "stdout: {}", stdout);
    assert!(!dir.path().join("atom_macro.rs").exists());
}

#[test]
fn test_extra_argument_prints_usage() {
    let dir = tempfile::tempdir().unwrap();
    let output = regen_atoms(dir.path(), &["a", "b"]);

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("Usage: regen-atoms"), "stdout: {}", stdout);
    assert!(!dir.path().join("atom_macro.rs").exists());
}

#[test]
fn test_missing_objdir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let output = regen_atoms(dir.path(), &["no-such-objdir"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Error:"), "stderr: {}", stderr);
    assert!(!dir.path().join("atom_macro.rs").exists());
}

#[test]
fn test_generates_into_output_path() {
    let dir = tempfile::tempdir().unwrap();
    let include = dir.path().join("obj/dist/include");
    fs::create_dir_all(&include).unwrap();
    fs::write(include.join("nsGkAtomList.h"), "GK_ATOM(body, \"body\")\n").unwrap();
    fs::write(include.join("nsCSSPseudoElementList.h"), "").unwrap();
    fs::write(include.join("nsCSSAnonBoxList.h"), "").unwrap();

    let output = regen_atoms(dir.path(), &["obj", "--output", "out.rs"]);

    assert_eq!(output.status.code(), Some(0));
    let generated = fs::read_to_string(dir.path().join("out.rs")).unwrap();
    assert!(generated.contains("pub static nsGkAtoms_body: *mut nsIAtom;"));
}
