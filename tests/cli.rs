use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sketch_cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("incident-sketch").expect("binary exists");
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env("HOME", config_home.path());
    cmd
}

fn write_photo(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("site.png");
    image::RgbaImage::from_pixel(80, 60, image::Rgba([40, 90, 160, 255]))
        .save(&path)
        .unwrap();
    path
}

#[test]
fn help_prints_usage() {
    let home = TempDir::new().unwrap();
    sketch_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Annotate incident photos"));
}

#[test]
fn export_writes_png_and_state() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let photo = write_photo(&out);

    sketch_cmd(&home)
        .arg("--image")
        .arg(&photo)
        .arg("--output-dir")
        .arg(out.path())
        .args(["--name", "report"])
        .args(["-a", "arm:crash", "-a", "click:960,540", "-a", "rotate"])
        .assert()
        .success()
        .stdout(predicate::str::contains("report.png").and(predicate::str::contains("report.json")));

    let png = std::fs::read(out.path().join("report.png")).unwrap();
    let decoded = image::load_from_memory(&png).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1920, 1080));

    let json = std::fs::read_to_string(out.path().join("report.json")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["version"], 1);
    let annotations = value["annotations"].as_array().unwrap();
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0]["tool"], "crash");
    assert_eq!(annotations[0]["rotation"], 45.0);
}

#[test]
fn saved_state_can_be_continued() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();

    sketch_cmd(&home)
        .arg("--output-dir")
        .arg(out.path())
        .args(["--name", "first", "-a", "arm:text", "-a", "click:100,100", "-a", "type:Wet floor"])
        .assert()
        .success();

    sketch_cmd(&home)
        .arg("--state")
        .arg(out.path().join("first.json"))
        .arg("--output-dir")
        .arg(out.path())
        .args(["--name", "second", "--print-state"])
        .args(["-a", "arm:warning", "-a", "click:1500,800"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wet floor").and(predicate::str::contains("\"warning\"")));
}

#[test]
fn existing_outputs_are_not_overwritten() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    for _ in 0..2 {
        sketch_cmd(&home)
            .arg("--output-dir")
            .arg(out.path())
            .args(["--name", "same"])
            .assert()
            .success();
    }
    assert!(out.path().join("same.png").exists());
    assert!(out.path().join("same-1.png").exists());
    assert!(out.path().join("same-1.json").exists());
}

#[test]
fn unknown_action_is_rejected() {
    let home = TempDir::new().unwrap();
    sketch_cmd(&home)
        .args(["-a", "explode"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("explode"));
}

#[test]
fn missing_image_falls_back_to_blank_canvas() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sketch_cmd(&home)
        .args(["--image", "/nonexistent/photo.jpg", "--name", "blank"])
        .arg("--output-dir")
        .arg(out.path())
        .assert()
        .success();
    assert!(out.path().join("blank.png").exists());
}

#[test]
fn preview_writes_single_file() {
    let home = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    sketch_cmd(&home)
        .arg("--output-dir")
        .arg(out.path())
        .args(["--name", "draft", "--preview"])
        .assert()
        .success()
        .stdout(predicate::str::contains("draft-preview.png"));
    assert!(out.path().join("draft-preview.png").exists());
    assert!(!out.path().join("draft.json").exists());
}

#[test]
fn invalid_display_size_is_rejected() {
    let home = TempDir::new().unwrap();
    sketch_cmd(&home)
        .args(["--display-size", "wide"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WIDTHxHEIGHT"));
}

#[test]
fn init_config_writes_default_file() {
    let home = TempDir::new().unwrap();
    sketch_cmd(&home)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
    let written = home.path().join("incident-sketch").join("config.toml");
    let contents = std::fs::read_to_string(written).unwrap();
    assert!(contents.contains("[canvas]"));
}

#[test]
fn schema_dump_describes_config() {
    let mut cmd = Command::cargo_bin("dump_config_schema").expect("binary exists");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"canvas\"").and(predicate::str::contains("\"export\"")));
}
