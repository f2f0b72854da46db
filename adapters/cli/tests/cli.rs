use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn tile_twister(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_tile-twister"))
        .args(args)
        .output()
        .expect("failed to launch tile-twister")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn config_file(name: &str, contents: &str) -> PathBuf {
    let file = format!("tile-twister-{}-{name}.toml", std::process::id());
    let path = std::env::temp_dir().join(file);
    fs::write(&path, contents).expect("failed to write config fixture");
    path
}

#[test]
fn diagonal_run_reports_the_player_cell() {
    let output = tile_twister(&["--transform", "X", "--seed", "0"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let printed = stdout(&output);
    assert!(printed.contains("before (floor 0):"));
    assert!(printed.contains("after (floor 0):"));
    assert!(printed.contains("player on cell"));
}

#[test]
fn frames_flag_prints_each_moving_step() {
    let output = tile_twister(&["--transform", "X", "--seed", "3", "--frames"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output).matches("frame ").count(), 2);
}

#[test]
fn stairs_on_the_top_floor_are_refused() {
    let output = tile_twister(&["--transform", ">", "--floors", "3", "--floor", "2"]);

    assert!(!output.status.success());
    let message = stderr(&output);
    assert!(message.contains("would leave the level from floor 2"));
}

#[test]
fn floor_count_outside_the_level_limits_is_refused() {
    for floors in ["0", "11"] {
        let output = tile_twister(&["--floors", floors]);
        assert!(!output.status.success(), "--floors {floors}");
        assert!(stderr(&output).contains("--floors must lie in 1..=10"));
    }
}

#[test]
fn start_floor_past_the_last_floor_is_refused() {
    let output = tile_twister(&["--floors", "2", "--floor", "2"]);

    assert!(!output.status.success());
    let message = stderr(&output);
    assert!(message.contains("--floor 2 is outside a level of 2 floors"));
}

#[test]
fn unknown_cell_codes_are_refused() {
    let output = tile_twister(&["--transform", "z"]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("unknown cell code `z`"));
}

#[test]
fn zero_step_interval_in_config_is_refused() {
    let path = config_file("zero", "floor_rotate_ms = 0\n");

    let config = path.to_str().expect("utf-8 path");
    let output = tile_twister(&["--transform", "R", "--config", config]);
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let message = stderr(&output);
    assert!(message.contains("invalid config"));
    assert!(message.contains("floor_rotate_ms"));
}

#[test]
fn missing_config_file_is_refused() {
    let path = std::env::temp_dir().join("tile-twister-does-not-exist.toml");

    let output = tile_twister(&["--config", path.to_str().expect("utf-8 path")]);

    assert!(!output.status.success());
    assert!(stderr(&output).contains("failed to read config"));
}

#[test]
fn config_overrides_are_applied() {
    let path = config_file("slow", "floor_rotate_ms = 160\n");

    let output = tile_twister(&[
        "--transform",
        "L",
        "--tick-ms",
        "16",
        "--config",
        path.to_str().expect("utf-8 path"),
    ]);
    let _ = fs::remove_file(&path);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("took 190 frames"));
}
