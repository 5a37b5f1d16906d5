use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hero-battle"))
        .env("RUST_LOG", "off")
        .args(args)
        .output()
        .expect("run hero-battle")
}

#[test]
fn help_lists_every_session_flag() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let help = String::from_utf8(output.stdout).expect("utf-8 help");
    for flag in ["--config", "--seed", "--frames", "--hud-every", "--sprites"] {
        assert!(help.contains(flag), "help is missing {flag}");
    }
}

#[test]
fn non_numeric_seed_is_refused_before_the_session_starts() {
    let output = run(&["--seed", "fireball"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(!stdout.contains("Welcome to Hero Battle."));
    assert!(String::from_utf8_lossy(&output.stderr).contains("--seed"));
}

#[test]
fn frame_flag_overrides_the_default_budget() {
    let output = run(&["--frames", "30", "--hud-every", "0"]);

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.contains("frames = 30"));
    assert!(!stdout.contains("outcome"), "30 frames cannot finish a session");
}
