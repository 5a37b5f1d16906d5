use std::{fs, process::Command};

fn hero_battle() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_hero-battle"));
    let _ = command.env("RUST_LOG", "off");
    command
}

#[test]
fn short_session_prints_banner_and_summary() {
    let output = hero_battle()
        .args(["--frames", "120", "--seed", "9", "--hud-every", "0"])
        .output()
        .expect("run hero-battle");

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("Welcome to Hero Battle.\n"));
    assert!(stdout.contains("sessions = 1"));
    assert!(stdout.contains("[session]"));
    assert!(stdout.contains("frames = 120"));
}

#[test]
fn same_seed_prints_the_same_summary() {
    let run = || {
        hero_battle()
            .args(["--frames", "600", "--seed", "21", "--hud-every", "0"])
            .output()
            .expect("run hero-battle")
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn invalid_configuration_fails_at_startup() {
    let path = std::env::temp_dir().join(format!(
        "hero-battle-invalid-{}.toml",
        std::process::id()
    ));
    fs::write(&path, "[waves]\ntable = []\n").expect("write configuration");

    let output = hero_battle()
        .arg("--config")
        .arg(&path)
        .output()
        .expect("run hero-battle");
    let _ = fs::remove_file(&path);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("could not load configuration"));
}

#[test]
fn bundled_demo_configuration_is_valid() {
    let root = concat!(env!("CARGO_MANIFEST_DIR"), "/../../demos");
    let output = hero_battle()
        .args(["--frames", "60", "--hud-every", "0"])
        .arg("--config")
        .arg(format!("{root}/session.toml"))
        .arg("--sprites")
        .arg(format!("{root}/sprites.toml"))
        .output()
        .expect("run hero-battle");

    assert!(output.status.success());
}
