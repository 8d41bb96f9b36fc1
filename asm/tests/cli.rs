use std::process::Command;

fn lc2kasm() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lc2kasm"))
}

#[test]
fn missing_output_argument() {
    let status = lc2kasm().arg("onlyone.as").status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn too_many_arguments() {
    let status = lc2kasm().args(["a.as", "a.mc", "extra"]).status().unwrap();
    assert_eq!(status.code(), Some(1));
}

#[test]
fn assembly_error_writes_nothing() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = dir.path().join("bad.as");
    let output = dir.path().join("bad.mc");
    std::fs::write(&input, "\tnoop\n\tbeq 0 0 nowhere\n").unwrap();

    let status = lc2kasm().arg(&input).arg(&output).status().unwrap();
    assert_eq!(status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn success() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let input = dir.path().join("ok.as");
    let output = dir.path().join("ok.mc");
    std::fs::write(&input, "\tnoop\n\thalt\n").unwrap();

    let status = lc2kasm().arg(&input).arg(&output).status().unwrap();
    assert_eq!(status.code(), Some(0));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "29360128\n25165824\n"
    );
}

#[test]
fn help_exits_zero() {
    let status = lc2kasm().arg("--help").output().unwrap().status;
    assert_eq!(status.code(), Some(0));
}
