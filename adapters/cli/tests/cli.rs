use std::{fs, process::Command};

fn robot_grid() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_robot-grid"));
    let _ = command.env("RUST_LOG", "off");
    command
}

#[test]
fn load_prints_glyph_rows() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("preset.txt");
    fs::write(&path, "2 2\n4 1\n2 3\n").expect("write preset");

    let output = robot_grid()
        .arg("load")
        .arg(&path)
        .output()
        .expect("failed to run robot-grid");

    assert!(output.status.success(), "load should succeed");
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "Robot Grid (2x2)\nR$\nO.\n"
    );
}

#[test]
fn load_rejects_preset_without_robot() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("preset.txt");
    fs::write(&path, "2 2\n1 1\n2 3\n").expect("write preset");

    let output = robot_grid()
        .arg("load")
        .arg(&path)
        .output()
        .expect("failed to run robot-grid");

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "ERROR: Bad format for preset\n"
    );
}

#[test]
fn select_rejects_out_of_range_size() {
    let output = robot_grid()
        .args(["select", "--rows", "0", "--columns", "2", "ROBOT", "NONE"])
        .output()
        .expect("failed to run robot-grid");

    assert!(!output.status.success());
    assert_eq!(
        String::from_utf8_lossy(&output.stderr),
        "ERROR: Incorrect input size\n 0 < Size < 21\n"
    );
}

#[test]
fn select_exports_preset_that_loads_back() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("exported.txt");

    let output = robot_grid()
        .args(["select", "--rows", "1", "--columns", "3", "-o"])
        .arg(&path)
        .args(["WALL", "ROBOT", "PIT"])
        .output()
        .expect("failed to run robot-grid");

    assert!(output.status.success(), "select should succeed");
    assert_eq!(fs::read_to_string(&path).expect("exported"), "3 1\n0 4 2\n");

    let reload = robot_grid()
        .arg("load")
        .arg(&path)
        .output()
        .expect("failed to run robot-grid");
    assert_eq!(reload.stdout, output.stdout);
}

#[test]
fn select_skips_export_when_layout_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("exported.txt");

    let output = robot_grid()
        .args(["--tile-length", "0", "select", "--rows", "1", "--columns", "1", "-o"])
        .arg(&path)
        .arg("ROBOT")
        .output()
        .expect("failed to run robot-grid");

    assert!(!output.status.success(), "zero tile length must be rejected");
    assert!(!path.exists(), "no preset is written for a rejected layout");
}
