use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_session(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_raumschach"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start binary");

    let stdin = child.stdin.as_mut().expect("Failed to open stdin");
    stdin.write_all(input.as_bytes()).expect("Failed to write to stdin");
    stdin.flush().expect("Failed to flush stdin");

    child.wait_with_output().expect("Failed to read output")
}

#[test]
fn test_human_session() {
    let output = run_session(
        &["--white", "human", "--black", "human", "--seed", "1"],
        "move Ab2Ab3\nmove nonsense\nmove Ab3Ab4\nstate\nmoves Eb4\nperft 1\nquit\n",
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("White to move"));
    assert!(stdout.contains("Black to move"));
    assert!(stdout.contains("InvalidNotation"));
    assert!(stdout.contains("WrongSource"));
    assert!(stdout.contains("Normal"));
    assert!(stdout.contains("Eb4: "));
    assert!(stdout.contains("Nodes: "));
}

#[test]
fn test_ai_replies_to_human_move() {
    let output = run_session(
        &["--black", "ai", "--depth", "1", "--seed", "2"],
        "move Ac2Ac3\nquit\n",
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Black plays "));
}

#[test]
fn test_end_of_input_quits() {
    let output = run_session(&["--white", "human", "--black", "human"], "show\n");

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Level E"));
}

#[test]
fn test_save_and_load_session() {
    let path = std::env::temp_dir().join(format!("raumschach-cli-{}.sav", std::process::id()));
    let path = path.to_string_lossy();

    let output = run_session(
        &["--white", "human", "--black", "human", "--seed", "3"],
        &format!("move Ab2Ab3\nsave {path}\nnew\nload {path}\nload {path}.missing\nquit\n"),
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let _ = std::fs::remove_file(&*path);

    assert!(output.status.success());
    assert!(stdout.contains("Saved to"));
    assert!(stdout.contains("Error: I/O error"));
}
