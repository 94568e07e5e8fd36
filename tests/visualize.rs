//! End-to-end tests for the visualize wrapper, using a stub interpreter
//! that records the argv it was handed.

use assert_fs::prelude::*;
use predicates::str::contains;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

mod common;

/// Write a stub interpreter that dumps its argv to $ARGS_OUT, one per line
fn write_stub(dir: &assert_fs::TempDir, exit_code: i32) -> std::path::PathBuf {
    let stub = dir.child("fake-python.sh");
    stub.write_str(&format!(
        "#!/bin/sh\nprintf '%s\\n' \"$@\" > \"$ARGS_OUT\"\nexit {}\n",
        exit_code
    ))
    .unwrap();
    let mut perms = std::fs::metadata(stub.path()).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(stub.path(), perms).unwrap();
    stub.path().to_path_buf()
}

fn write_model(dir: &assert_fs::TempDir) -> std::path::PathBuf {
    let model = dir.child("model.py");
    model.write_str("class Net:\n    pass\n").unwrap();
    model.path().to_path_buf()
}

fn write_script(dir: &assert_fs::TempDir) -> std::path::PathBuf {
    let script = dir.child("viz.py");
    script.write_str("# stub visualization tool\n").unwrap();
    script.path().to_path_buf()
}

fn jsonl_files(dir: &Path) -> Vec<std::path::PathBuf> {
    match std::fs::read_dir(dir) {
        Ok(entries) => entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "jsonl"))
            .collect(),
        Err(_) => Vec::new(),
    }
}

#[test]
fn visualize_invokes_the_configured_command_line() {
    let temp = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&temp, 0);
    let model = write_model(&temp);
    let script = write_script(&temp);
    let args_out = temp.child("argv.txt");
    let logs = temp.child("logs");

    common::labkit()
        .current_dir(temp.path())
        .env("LABKIT_PYTHON__INTERPRETER", &stub)
        .env("LABKIT_PYTHON__SCRIPT", &script)
        .env("LABKIT_LOG__DIRECTORY", logs.path())
        .env("ARGS_OUT", args_out.path())
        .args([
            "visualize",
            "--model-file",
            model.to_str().unwrap(),
            "--model-class",
            "Net",
            "--input-shapes",
            "1,80,10",
            "2,3",
            "--device",
            "cpu",
            "--output-name",
            "net",
            "--output-dir",
            "out",
            "--output-format",
            "svg",
            "--rankdir",
            "LR",
            "--node-color",
            "tomato",
        ])
        .assert()
        .success();

    let recorded = std::fs::read_to_string(args_out.path()).unwrap();
    let lines: Vec<&str> = recorded.lines().collect();
    let expected = vec![
        script.to_str().unwrap(),
        "--model-file",
        model.to_str().unwrap(),
        "--model-class",
        "Net",
        "--model-init-args",
        "{}",
        "--input-shapes",
        "1,80,10",
        "2,3",
        "--device",
        "cpu",
        "--output-name",
        "net",
        "--output-dir",
        "out",
        "--output-format",
        "svg",
        "--rankdir",
        "LR",
        "--node-color",
        "tomato",
    ];
    assert_eq!(lines, expected);

    // the run was recorded: one process log and one jsonl run file
    let runs = jsonl_files(logs.path());
    assert_eq!(runs.len(), 1);
    let run_contents = std::fs::read_to_string(&runs[0]).unwrap();
    assert_eq!(run_contents.lines().count(), 3);
    assert!(run_contents.contains("\"event\":\"start\""));
    assert!(run_contents.contains("\"exit_code\":0"));
}

#[test]
fn visualize_with_missing_script_exits_one_without_spawning() {
    let temp = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&temp, 0);
    let model = write_model(&temp);
    let args_out = temp.child("argv.txt");

    common::labkit()
        .current_dir(temp.path())
        .env("LABKIT_PYTHON__INTERPRETER", &stub)
        .env("LABKIT_PYTHON__SCRIPT", temp.path().join("missing.py"))
        .env("LABKIT_LOG__DIRECTORY", temp.child("logs").path())
        .env("ARGS_OUT", args_out.path())
        .args([
            "visualize",
            "--model-file",
            model.to_str().unwrap(),
            "--model-class",
            "Net",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("not found"));

    // the stub was never invoked
    args_out.assert(predicates::path::missing());
}

#[test]
fn visualize_propagates_the_tool_exit_code() {
    let temp = assert_fs::TempDir::new().unwrap();
    let stub = write_stub(&temp, 7);
    let model = write_model(&temp);
    let script = write_script(&temp);

    common::labkit()
        .current_dir(temp.path())
        .env("LABKIT_PYTHON__INTERPRETER", &stub)
        .env("LABKIT_PYTHON__SCRIPT", &script)
        .env("LABKIT_LOG__DIRECTORY", temp.child("logs").path())
        .env("ARGS_OUT", temp.child("argv.txt").path())
        .args([
            "visualize",
            "--model-file",
            model.to_str().unwrap(),
            "--model-class",
            "Net",
        ])
        .assert()
        .failure()
        .code(7)
        .stderr(contains("exited with code 7"));
}

#[test]
fn visualize_rejects_a_malformed_input_shape() {
    let temp = assert_fs::TempDir::new().unwrap();
    let model = write_model(&temp);

    common::labkit()
        .current_dir(temp.path())
        .args([
            "visualize",
            "--model-file",
            model.to_str().unwrap(),
            "--model-class",
            "Net",
            "--input-shapes",
            "1,x",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(contains("invalid value"));
}
