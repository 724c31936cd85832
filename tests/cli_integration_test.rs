//! CLI integration tests for command-line behavior.
//!
//! Runs the compiled `punc` binary and checks its output and exit status.

mod common;

use anyhow::Result;
use assert_cmd::Command;
use common::*;
use predicates::prelude::*;

fn punc() -> Command {
    Command::cargo_bin("punc").expect("punc binary should be built")
}

#[test]
fn test_help_message() {
    punc()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("analyze"))
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("--verbose"));
}

#[test]
fn test_analyze_prints_report() -> Result<()> {
    let file = text_file("Hello there, friend.\nBye!")?;

    punc()
        .arg("analyze")
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("Words per sentence: 1.50"))
        .stdout(predicate::str::contains("Body:\n,.!"))
        .stdout(predicate::str::contains("Spaced:\n   ,  . !"));
    Ok(())
}

#[test]
fn test_analyze_without_terminators() -> Result<()> {
    let file = text_file("no end in sight")?;

    punc()
        .args(["analyze"])
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("∞"));
    Ok(())
}

#[test]
fn test_analyze_all_lists_zero_counts() -> Result<()> {
    let file = text_file("Hi.")?;

    punc()
        .arg("analyze")
        .arg(&file.path)
        .args(["--catalogue", "basic", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("???"));
    Ok(())
}

#[test]
fn test_analyze_with_options_file() -> Result<()> {
    let file = text_file("a!b")?;
    let options = file.dir.path().join("options.json");
    std::fs::write(&options, r#"{"mapping": {"!": 41}}"#)?;

    punc()
        .arg("analyze")
        .arg(&file.path)
        .arg("--options")
        .arg(&options)
        .assert()
        .success()
        .stdout(predicate::str::contains("42"));
    Ok(())
}

#[test]
fn test_missing_input_fails() {
    punc()
        .args(["analyze", "/no/such/file.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source unavailable"));
}

#[test]
fn test_unknown_encoding_fails() -> Result<()> {
    let file = text_file("x")?;

    punc()
        .arg("analyze")
        .arg(&file.path)
        .args(["--encoding", "klingon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("klingon"));
    Ok(())
}

#[test]
fn test_render_creates_pdf() -> Result<()> {
    let file = TextFileBuilder::new().named("speech").with_text("Yes, we can!").build()?;

    punc()
        .arg("render")
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("speech-visual.pdf"));

    assert_valid_pdf(&file.dir.path().join("speech-visual.pdf"), 1);
    Ok(())
}

#[test]
fn test_render_names_characters_without_glyph() -> Result<()> {
    let file = text_file("Love 💙 wins!")?;

    punc()
        .arg("render")
        .arg(&file.path)
        .assert()
        .success()
        .stdout(predicate::str::contains("No glyph in font for: 💙"));
    Ok(())
}
