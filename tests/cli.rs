use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn cosketch_cmd() -> Command {
    Command::cargo_bin("cosketch").expect("binary exists")
}

#[test]
fn cosketch_help_prints_usage() {
    cosketch_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Co-create a figure with an AI collaborator",
        ))
        .stdout(predicate::str::contains("parse"))
        .stdout(predicate::str::contains("draw"))
        .stdout(predicate::str::contains("collab"));
}

#[test]
fn subcommand_is_required() {
    cosketch_cmd().assert().failure();
}

#[test]
fn parse_prints_structured_sections() {
    let temp = TempDir::new().unwrap();
    let reply = temp.path().join("reply.txt");
    std::fs::write(
        &reply,
        "Here you go!\nHEAD_INSTRUCTIONS:\nfoo\nSVG_BODY:\n<svg>bar</svg>\nLEG_INSTRUCTIONS:\nbaz\n",
    )
    .unwrap();

    cosketch_cmd()
        .arg("parse")
        .arg(&reply)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""is_structured": true"#))
        .stdout(predicate::str::contains(r#""head_text": "foo""#))
        .stdout(predicate::str::contains(r#""body_markup": "<svg>bar</svg>""#))
        .stdout(predicate::str::contains(r#""legs_text": "baz""#));
}

#[test]
fn parse_falls_back_to_raw_text() {
    let temp = TempDir::new().unwrap();
    let reply = temp.path().join("reply.txt");
    std::fs::write(&reply, "SVG_BODY: first\nHEAD_INSTRUCTIONS: second").unwrap();

    cosketch_cmd()
        .arg("parse")
        .arg(&reply)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""is_structured": false"#))
        .stdout(predicate::str::contains(r#""head_text": """#));
}

#[test]
fn parse_vision_extracts_markup() {
    let temp = TempDir::new().unwrap();
    let reply = temp.path().join("vision.txt");
    std::fs::write(&reply, "Sure:\n<svg width=\"4\"></svg>\nThanks").unwrap();

    cosketch_cmd()
        .args(["parse", "--vision"])
        .arg(&reply)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""is_markup_found": true"#))
        .stdout(predicate::str::contains(r#""markup": "<svg width=\"4\"></svg>""#));
}

#[test]
fn parse_missing_file_fails() {
    cosketch_cmd()
        .args(["parse", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read reply"));
}

#[test]
fn draw_replays_script_into_png() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "[canvas]\nwidth = 600\nheight = 400\n").unwrap();
    let script = temp.path().join("script.json");
    std::fs::write(
        &script,
        r##"{
            "commands": [
                { "action": "set_color", "color": "#ff0000" },
                { "action": "pointer_press", "x": 250, "y": 100 },
                { "action": "pointer_move", "x": 300, "y": 150 },
                { "action": "pointer_release" },
                { "action": "select_tool", "tool": "circle" },
                { "action": "pointer_press", "x": 300, "y": 300 },
                { "action": "pointer_press", "x": 50, "y": 300 }
            ]
        }"##,
    )
    .unwrap();
    let out = temp.path().join("canvas.png");

    cosketch_cmd()
        .arg("--config")
        .arg(&config)
        .args(["draw", "--script"])
        .arg(&script)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote 2 marks"))
        .stdout(predicate::str::contains("Circle | Size: 50px | #ff0000"));

    let png = std::fs::read(&out).unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}

#[test]
fn draw_rejects_malformed_script() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").unwrap();
    let script = temp.path().join("script.json");
    std::fs::write(&script, r#"{ "commands": [ { "action": "wave" } ] }"#).unwrap();

    cosketch_cmd()
        .arg("--config")
        .arg(&config)
        .args(["draw", "--script"])
        .arg(&script)
        .arg("--out")
        .arg(temp.path().join("out.png"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse script"));
}

#[test]
fn collab_with_empty_artwork_directory_fails() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("config.toml");
    std::fs::write(&config, "").unwrap();

    cosketch_cmd()
        .arg("--config")
        .arg(&config)
        .arg("collab")
        .arg("--artwork-dir")
        .arg(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No artworks found"));
}
