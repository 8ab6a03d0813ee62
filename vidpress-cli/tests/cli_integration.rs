use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use tempfile::tempdir;

// Helper function to get the path to the compiled binary
fn vidpress_cmd() -> Command {
    Command::cargo_bin("vidpress").expect("Failed to find vidpress binary")
}

#[test]
fn test_convert_non_existent_input() -> Result<(), Box<dyn Error>> {
    let mut cmd = vidpress_cmd();
    cmd.arg("convert").arg("surely/this/does/not/exist/input.mkv");

    cmd.assert()
        .failure()
        .stderr(contains("Failed to access input path"));

    Ok(())
}

#[test]
fn test_convert_unsupported_file() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let notes = dir.path().join("notes.txt");
    std::fs::write(&notes, "not a video")?;

    let mut cmd = vidpress_cmd();
    cmd.arg("convert").arg(notes.to_str().unwrap());

    cmd.assert()
        .failure()
        .stderr(contains("not a supported video file"));

    Ok(())
}

#[test]
fn test_convert_empty_directory_is_a_no_op() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;

    let mut cmd = vidpress_cmd();
    cmd.arg("convert").arg(dir.path().to_str().unwrap());

    cmd.assert()
        .success()
        .stdout(contains("No processable video files found"));

    Ok(())
}

#[test]
fn test_convert_invalid_crf() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("movie.mkv");
    std::fs::write(&input, "dummy content")?;

    let mut cmd = vidpress_cmd();
    cmd.arg("convert")
        .arg(input.to_str().unwrap())
        .arg("--crf")
        .arg("300"); // Outside the 0-51 range enforced by clap

    cmd.assert().failure().stderr(contains("invalid value '300'"));

    Ok(())
}

#[test]
fn test_convert_scale_width_without_height() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("movie.mkv");
    std::fs::write(&input, "dummy content")?;

    let mut cmd = vidpress_cmd();
    cmd.arg("convert")
        .arg(input.to_str().unwrap())
        .arg("--scale-width")
        .arg("0.5");

    // The scale factors only make sense as a pair
    cmd.assert().failure();

    Ok(())
}

#[test]
fn test_convert_rejects_invalid_trim_window() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let input = dir.path().join("movie.mkv");
    std::fs::write(&input, "dummy content")?;

    let mut cmd = vidpress_cmd();
    cmd.arg("convert")
        .arg(input.to_str().unwrap())
        .arg("--trim-start")
        .arg("10")
        .arg("--trim-end")
        .arg("5");

    cmd.assert()
        .failure()
        .stderr(contains("Invalid configuration"));

    Ok(())
}

#[test]
fn test_history_empty() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let log_file = dir.path().join("conversion_log.json");

    let mut cmd = vidpress_cmd();
    cmd.arg("history")
        .arg("--log-file")
        .arg(log_file.to_str().unwrap());

    cmd.assert()
        .success()
        .stdout(contains("No conversion history"));

    Ok(())
}

#[test]
fn test_history_shows_recorded_entries() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let log_file = dir.path().join("conversion_log.json");
    std::fs::write(
        &log_file,
        r#"[{
            "Directory": "/videos",
            "File Name": "movie.mkv",
            "Input Codec": "h264",
            "Output Codec": "h265",
            "Input Size": 1000000,
            "Output Size": 437000,
            "Relative Size": 0.437
        }]"#,
    )?;

    let mut cmd = vidpress_cmd();
    cmd.arg("history")
        .arg("--log-file")
        .arg(log_file.to_str().unwrap());

    cmd.assert()
        .success()
        .stdout(contains("movie.mkv"))
        .stdout(contains("h264"))
        .stdout(contains("0.437"));

    Ok(())
}

#[test]
fn test_history_clear() -> Result<(), Box<dyn Error>> {
    let dir = tempdir()?;
    let log_file = dir.path().join("conversion_log.json");
    std::fs::write(&log_file, r#"[{"Directory": "/v", "File Name": "a.mkv", "Input Codec": "h264", "Output Codec": "h265", "Input Size": 1, "Output Size": 1, "Relative Size": 1.0}]"#)?;

    let mut cmd = vidpress_cmd();
    cmd.arg("history")
        .arg("--clear")
        .arg("--log-file")
        .arg(log_file.to_str().unwrap());

    cmd.assert().success().stdout(contains("cleared"));

    let contents = std::fs::read_to_string(&log_file)?;
    assert_eq!(contents.trim(), "[]");

    Ok(())
}
