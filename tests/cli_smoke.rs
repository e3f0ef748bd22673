use serde_json::Value;
use std::ffi::OsStr;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures").join(rel)
}

fn run_lightdeck<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let bin = env!("CARGO_BIN_EXE_lightdeck");
    Command::new(bin)
        .args(args)
        .output()
        .expect("lightdeck command should execute")
}

fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "command failed with status {:?}\nstdout:\n{}\nstderr:\n{}",
            output.status.code(),
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn assert_failure(output: &Output) {
    if output.status.success() {
        panic!(
            "command unexpectedly succeeded\nstdout:\n{}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr),
        );
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn gen_config_prints_parseable_defaults() {
    let output = run_lightdeck(["gen-config"]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert!(text.contains("[slider]"));
    let config: lightdeck::config::SiteConfig = toml::from_str(&text).expect("stock config parses");
    assert_eq!(config.slider.interval_ms, 5000);
    assert_eq!(config.form.submit_delay_ms, 1500);
}

#[test]
fn scan_writes_manifest_and_inventory() {
    let tmp = TempDir::new().unwrap();
    let output = run_lightdeck([
        OsStr::new("scan"),
        OsStr::new("--source"),
        fixture("content").as_os_str(),
        OsStr::new("--temp-dir"),
        tmp.path().as_os_str(),
    ]);
    assert_success(&output);

    let text = stdout_text(&output);
    assert!(text.contains("001 Wedding (3 photos)"));
    assert!(text.contains("Filter: engagement-sessions"));
    assert!(text.contains("001 Every love story is beautiful"));

    let manifest: Value =
        serde_json::from_str(&fs::read_to_string(tmp.path().join("manifest.json")).unwrap()).unwrap();
    assert_eq!(manifest["images"].as_array().unwrap().len(), 7);
    assert_eq!(manifest["slides"].as_array().unwrap().len(), 3);
    assert_eq!(manifest["categories"][1]["key"], "portrait");
}

#[test]
fn render_writes_page_and_images() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist");
    let output = run_lightdeck([
        OsStr::new("render"),
        OsStr::new("--source"),
        fixture("content").as_os_str(),
        OsStr::new("--output"),
        out.as_os_str(),
    ]);
    assert_success(&output);
    assert!(stdout_text(&output).contains("(10 files copied)"));

    let page = fs::read_to_string(out.join("index.html")).unwrap();
    assert!(page.contains("<title>Janet Wedding Photography</title>"));
    assert!(page.contains("data-filter=\"engagement-sessions\""));
    assert!(out.join("gallery/020-Portrait/002-Groom.jpg").is_file());
    assert!(out.join("hero/003-Ceremony.jpg").is_file());
}

#[test]
fn render_fails_on_uncategorized_image() {
    let tmp = TempDir::new().unwrap();
    let content = tmp.path().join("content");
    fs::create_dir_all(content.join("gallery")).unwrap();
    fs::write(content.join("gallery/001-Loose.jpg"), b"x").unwrap();
    let output = run_lightdeck([
        OsStr::new("render"),
        OsStr::new("--source"),
        content.as_os_str(),
        OsStr::new("--output"),
        tmp.path().join("dist").as_os_str(),
    ]);
    assert_failure(&output);
    assert!(String::from_utf8_lossy(&output.stderr).contains("Uncategorized"));
}

#[test]
fn replay_prints_transcript() {
    let output = run_lightdeck([
        OsStr::new("replay"),
        fixture("session.toml").as_os_str(),
        OsStr::new("--source"),
        fixture("content").as_os_str(),
    ]);
    assert_success(&output);
    let text = stdout_text(&output);
    assert!(text.contains("[   500ms] filter wedding"));
    assert!(text.contains("Gallery: wedding (3 of 7 visible)"));
    assert!(text.contains("Lightbox: 2 gallery/010-Wedding/002-Vows.jpg"));
    assert!(text.contains("[ 12000ms] end"));
}

#[test]
fn replay_json_follows_the_visit() {
    let output = run_lightdeck([
        OsStr::new("replay"),
        fixture("session.toml").as_os_str(),
        OsStr::new("--json"),
        OsStr::new("--source"),
        fixture("content").as_os_str(),
    ]);
    assert_success(&output);
    let transcript: Value = serde_json::from_slice(&output.stdout).unwrap();
    let records = transcript["records"].as_array().unwrap();
    assert_eq!(records.len(), 8);

    // scrolled past both thresholds
    assert_eq!(records[0]["state"]["chrome"]["navbar_scrolled"], true);
    assert_eq!(records[0]["state"]["chrome"]["back_to_top_visible"], true);

    // the swipe moved both the lightbox and the slider
    assert_eq!(
        records[4]["state"]["lightbox"]["location"],
        "gallery/010-Wedding/003-Cake.jpg"
    );
    assert_eq!(records[4]["state"]["slide"], 1);

    // escape closed it, the section jump scrolled
    assert!(records[5]["state"]["lightbox"].is_null());
    assert_eq!(records[6]["state"]["scroll_y"], 2400.0);

    assert_eq!(records[7]["state"]["submitting"], true);

    // by the end the submission settled and its banner expired
    let end = &transcript["end"];
    assert_eq!(end["submitting"], false);
    assert!(end["banners"].as_array().unwrap().is_empty());
    assert_eq!(end["slide"], 0);
}

#[test]
fn check_form_accepts_valid_payload() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fields.json");
    fs::write(
        &path,
        r#"{"firstName":"Jane","lastName":"Doe","email":"jane@example.com"}"#,
    )
    .unwrap();
    let output = run_lightdeck([OsStr::new("check-form"), path.as_os_str()]);
    assert_success(&output);
    assert_eq!(stdout_text(&output).trim(), "Form is valid");
}

#[test]
fn check_form_rejects_invalid_payload() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("fields.json");
    fs::write(&path, r#"{"lastName":"Doe","email":"not-an-email"}"#).unwrap();
    let output = run_lightdeck([OsStr::new("check-form"), path.as_os_str()]);
    assert_failure(&output);
    let text = stdout_text(&output);
    assert!(text.contains("2 problems"));
    assert!(text.contains("firstName: This field is required"));
    assert!(text.contains("email: Please enter a valid email address"));
}
