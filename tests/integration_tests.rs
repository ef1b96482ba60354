//! Integration tests for slotboard
//!
//! These drive the CLI end to end against JSON exports written to a temp dir.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a slotboard Command isolated from the caller's env
fn slotboard(dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("slotboard");
    cmd.current_dir(dir.path())
        .env_remove("SLOTBOARD_TIMEZONE")
        .env_remove("SLOTBOARD_LOOKAHEAD_MINUTES")
        .env_remove("RUST_LOG");
    cmd
}

/// Helper to write brand and post exports, returning their paths
fn write_exports(dir: &TempDir) -> (PathBuf, PathBuf) {
    let brands = dir.path().join("brands.json");
    let posts = dir.path().join("posts.json");
    fs::write(
        &brands,
        r##"[
            {"id": "healthycollege", "displayName": "Healthy College", "shortName": "HC", "scheduleOffset": 0},
            {"id": "vitality", "displayName": "Vitality", "color": "#ff8800", "scheduleOffset": 2},
            {"id": "dormant", "displayName": "Dormant", "scheduleOffset": 5, "active": false}
        ]"##,
    )
    .unwrap();
    fs::write(
        &posts,
        r#"{"posts": [
            {"id": "v10", "brand_id": "vitality", "scheduled_time": "2026-10-16T10:00:00Z",
             "status": "scheduled", "metadata": {"variant": "dark"}},
            {"id": "v14", "brand_id": "vitality", "scheduled_time": "2026-10-16T14:00:00Z",
             "status": "scheduled", "metadata": {"variant": "post"}},
            {"id": 77, "brand_id": "healthycollege", "scheduled_time": "2026-10-16T00:00:00Z",
             "status": "published", "metadata": {"variant": "light"}},
            {"id": "bad", "brand_id": "healthycollege", "scheduled_time": "yesterday-ish",
             "metadata": {"variant": "dark"}},
            {"id": "lost", "brand_id": "retired", "scheduled_time": "2026-10-16T08:00:00Z",
             "metadata": {"variant": "dark"}}
        ]}"#,
    )
    .unwrap();
    (brands, posts)
}

fn coverage_json(dir: &TempDir, extra: &[&str]) -> Value {
    let (brands, posts) = write_exports(dir);
    let mut cmd = slotboard(dir);
    cmd.arg("coverage")
        .arg("--brands")
        .arg(&brands)
        .arg("--posts")
        .arg(&posts)
        .args(["--date", "2026-10-16", "--json"])
        .args(extra);
    if !extra.contains(&"--utc-offset") && !extra.contains(&"--timezone") {
        cmd.args(["--utc-offset", "+00:00"]);
    }
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

fn slot_state(report: &Value, brand: &str, kind: &str, hour: u64) -> String {
    let day = report["brands"]
        .as_array()
        .unwrap()
        .iter()
        .find(|d| d["brand_id"] == brand)
        .unwrap();
    let slot = day["slots"]
        .as_array()
        .unwrap()
        .iter()
        .find(|s| s["slot"]["kind"] == kind && s["slot"]["hour"] == hour)
        .unwrap();
    slot["state"].as_str().unwrap().to_string()
}

// =============================================================================
// Basic CLI Tests
// =============================================================================

mod cli_basics {
    use super::*;

    #[test]
    fn test_slotboard_help() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir).arg("--help").assert().success();
    }

    #[test]
    fn test_slotboard_version() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("slotboard"));
    }

    #[test]
    fn test_unknown_subcommand_fails() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir).arg("publish").assert().failure();
    }
}

// =============================================================================
// Plan Tests
// =============================================================================

mod plan {
    use super::*;

    #[test]
    fn test_plan_for_offset() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .args(["plan", "--offset", "2"])
            .assert()
            .success()
            .stdout(predicate::str::contains("offset +2h"))
            .stdout(predicate::str::contains("02:00"))
            .stdout(predicate::str::contains("22:00"))
            .stdout(predicate::str::contains("shared reel/post hours: 02:00, 14:00"));
    }

    #[test]
    fn test_plan_negative_offset_wraps() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .args(["plan", "--offset", "-1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("offset +23h"));
    }

    #[test]
    fn test_plan_json() {
        let dir = TempDir::new().unwrap();
        let output = slotboard(&dir)
            .args(["plan", "--offset", "0", "--json"])
            .output()
            .unwrap();
        assert!(output.status.success());
        let plan: Value = serde_json::from_slice(&output.stdout).unwrap();
        let slots = plan["slots"].as_array().unwrap();
        assert_eq!(slots.len(), 8);
        assert_eq!(slots[0]["hour"], 0);
        assert_eq!(slots[0]["expected_variant"], "light");
        assert_eq!(slots[1]["expected_variant"], "dark");
        assert_eq!(slots[6]["kind"], "post");
    }

    #[test]
    fn test_plan_for_brand_uses_export_and_config_override() {
        let dir = TempDir::new().unwrap();
        let (brands, _) = write_exports(&dir);

        slotboard(&dir)
            .args(["plan", "--brand", "vitality", "--brands"])
            .arg(&brands)
            .assert()
            .success()
            .stdout(predicate::str::contains("offset +2h"));

        fs::create_dir_all(dir.path().join(".slotboard")).unwrap();
        fs::write(
            dir.path().join(".slotboard/slotboard.toml"),
            "[brands.vitality]\noffset = 9\n",
        )
        .unwrap();

        slotboard(&dir)
            .args(["plan", "--brand", "vitality", "--brands"])
            .arg(&brands)
            .assert()
            .success()
            .stdout(predicate::str::contains("offset +9h"));
    }

    #[test]
    fn test_plan_brands_file_needs_brand() {
        let dir = TempDir::new().unwrap();
        let (brands, _) = write_exports(&dir);
        slotboard(&dir)
            .args(["plan", "--brands"])
            .arg(&brands)
            .assert()
            .failure()
            .stderr(predicate::str::contains("--brand"));
    }

    #[test]
    fn test_plan_unknown_brand_fails() {
        let dir = TempDir::new().unwrap();
        let (brands, _) = write_exports(&dir);
        slotboard(&dir)
            .args(["plan", "--brand", "nobody", "--brands"])
            .arg(&brands)
            .assert()
            .failure()
            .stderr(predicate::str::contains("not found"));
    }
}

// =============================================================================
// Coverage Tests
// =============================================================================

mod coverage {
    use super::*;

    #[test]
    fn test_coverage_classifies_example_day() {
        let dir = TempDir::new().unwrap();
        let report = coverage_json(&dir, &["--now", "2026-10-16T08:30:00Z"]);

        assert_eq!(slot_state(&report, "vitality", "reel", 10), "filled");
        assert_eq!(slot_state(&report, "vitality", "reel", 2), "missed");
        assert_eq!(slot_state(&report, "vitality", "reel", 6), "missed");
        assert_eq!(slot_state(&report, "vitality", "reel", 14), "open");
        assert_eq!(slot_state(&report, "vitality", "post", 14), "filled");
        assert_eq!(slot_state(&report, "healthycollege", "reel", 0), "filled");

        let brands: Vec<&str> = report["brands"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["brand_id"].as_str().unwrap())
            .collect();
        assert_eq!(brands, vec!["healthycollege", "vitality"]);
        assert_eq!(report["orphaned_posts"], serde_json::json!(["lost"]));
    }

    #[test]
    fn test_coverage_lookahead_marks_upcoming() {
        let dir = TempDir::new().unwrap();
        let report = coverage_json(&dir, &["--now", "2026-10-16T12:00:00Z"]);
        assert_eq!(slot_state(&report, "vitality", "reel", 14), "upcoming");

        let report = coverage_json(
            &dir,
            &["--now", "2026-10-16T12:00:00Z", "--lookahead", "60"],
        );
        assert_eq!(slot_state(&report, "vitality", "reel", 14), "open");
    }

    #[test]
    fn test_coverage_multiple_days_and_inactive() {
        let dir = TempDir::new().unwrap();
        let report = coverage_json(
            &dir,
            &["--now", "2026-10-16T08:30:00Z", "--days", "3", "--include-inactive"],
        );
        assert_eq!(report["brands"].as_array().unwrap().len(), 9);
        assert_eq!(report["summary"]["filled"], 3);
        assert_eq!(report["days"], 3);
    }

    #[test]
    fn test_coverage_brand_filter() {
        let dir = TempDir::new().unwrap();
        let report = coverage_json(
            &dir,
            &["--now", "2026-10-16T08:30:00Z", "--brand", "vitality"],
        );
        let days = report["brands"].as_array().unwrap();
        assert_eq!(days.len(), 1);
        assert_eq!(days[0]["brand_id"], "vitality");
    }

    #[test]
    fn test_coverage_text_output() {
        let dir = TempDir::new().unwrap();
        let (brands, posts) = write_exports(&dir);
        slotboard(&dir)
            .arg("coverage")
            .arg("--brands")
            .arg(&brands)
            .arg("--posts")
            .arg(&posts)
            .args([
                "--utc-offset",
                "+00:00",
                "--date",
                "2026-10-16",
                "--now",
                "2026-10-16T08:30:00Z",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("Coverage from 2026-10-16"))
            .stdout(predicate::str::contains("#v10 (scheduled)"))
            .stdout(predicate::str::contains("Total:"))
            .stdout(predicate::str::contains("reference unknown brands: lost"));
    }

    #[test]
    fn test_coverage_respects_utc_offset() {
        let dir = TempDir::new().unwrap();
        // At +02:00 both vitality posts shift two hours off their slots.
        let report = coverage_json(
            &dir,
            &["--now", "2026-10-16T08:30:00Z", "--utc-offset", "+02:00"],
        );
        let vitality = report["brands"]
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["brand_id"] == "vitality")
            .unwrap();
        assert_eq!(vitality["unplanned"], serde_json::json!(["v10", "v14"]));
    }

    #[test]
    fn test_coverage_missing_export_fails() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .args([
                "coverage",
                "--brands",
                "missing.json",
                "--posts",
                "missing.json",
                "--utc-offset",
                "UTC",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to load brands"));
    }

    #[test]
    fn test_coverage_invalid_now_fails() {
        let dir = TempDir::new().unwrap();
        let (brands, posts) = write_exports(&dir);
        slotboard(&dir)
            .arg("coverage")
            .arg("--brands")
            .arg(&brands)
            .arg("--posts")
            .arg(&posts)
            .args(["--utc-offset", "UTC", "--now", "lunchtime"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid --now"));
    }

    #[test]
    fn test_coverage_invalid_timezone_fails() {
        let dir = TempDir::new().unwrap();
        let (brands, posts) = write_exports(&dir);
        slotboard(&dir)
            .arg("coverage")
            .arg("--brands")
            .arg(&brands)
            .arg("--posts")
            .arg(&posts)
            .args(["--timezone", "Mars/Olympus"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid timezone"));
    }

    #[test]
    fn test_coverage_named_zone_across_daylight_saving_change() {
        let dir = TempDir::new().unwrap();
        let (brands, _) = write_exports(&dir);
        let posts = dir.path().join("dst_posts.json");
        fs::write(
            &posts,
            r#"[
                {"id": "summer", "brand_id": "vitality", "scheduled_time": "2026-10-16T09:00:00Z",
                 "metadata": {"variant": "dark"}},
                {"id": "winter", "brand_id": "vitality", "scheduled_time": "2026-10-26T10:00:00Z",
                 "metadata": {"variant": "dark"}}
            ]"#,
        )
        .unwrap();

        let output = slotboard(&dir)
            .arg("coverage")
            .arg("--brands")
            .arg(&brands)
            .arg("--posts")
            .arg(&posts)
            .args([
                "--timezone",
                "Europe/Lisbon",
                "--date",
                "2026-10-16",
                "--days",
                "11",
                "--brand",
                "vitality",
                "--now",
                "2026-10-16T00:00:00Z",
                "--json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(report["summary"]["filled"], 2);
        assert_eq!(report["summary"]["unplanned"], 0);
    }

    #[test]
    fn test_coverage_survives_null_and_numeric_timestamps() {
        let dir = TempDir::new().unwrap();
        let (brands, _) = write_exports(&dir);
        let posts = dir.path().join("odd_posts.json");
        fs::write(
            &posts,
            r#"[
                {"id": "v10", "brand_id": "vitality", "scheduled_time": "2026-10-16T10:00:00Z",
                 "metadata": {"variant": "dark"}},
                {"id": "nulled", "brand_id": "vitality", "scheduled_time": null,
                 "metadata": {"variant": "light"}},
                {"id": "epoch", "brand_id": "vitality", "scheduled_time": 1760608800,
                 "metadata": {"variant": "light"}},
                {"id": "headless", "scheduled_time": "2026-10-16T06:00:00Z"}
            ]"#,
        )
        .unwrap();

        let output = slotboard(&dir)
            .arg("coverage")
            .arg("--brands")
            .arg(&brands)
            .arg("--posts")
            .arg(&posts)
            .args([
                "--utc-offset",
                "+00:00",
                "--date",
                "2026-10-16",
                "--now",
                "2026-10-16T08:30:00Z",
                "--json",
            ])
            .output()
            .unwrap();
        assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
        let report: Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(slot_state(&report, "vitality", "reel", 10), "filled");
        assert_eq!(report["summary"]["filled"], 1);
        assert_eq!(report["summary"]["unplanned"], 0);
    }
}

// =============================================================================
// Config Tests
// =============================================================================

mod config {
    use super::*;

    #[test]
    fn test_config_init_creates_file() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Created slotboard.toml"));
        assert!(dir.path().join(".slotboard/slotboard.toml").exists());

        slotboard(&dir)
            .args(["config", "init"])
            .assert()
            .success()
            .stdout(predicate::str::contains("already exists"));
    }

    #[test]
    fn test_config_show_defaults() {
        let dir = TempDir::new().unwrap();
        slotboard(&dir)
            .args(["config", "show", "--utc-offset", "+01:00"])
            .assert()
            .success()
            .stdout(predicate::str::contains("lookahead_minutes = 120"))
            .stdout(predicate::str::contains("timezone = \"+01:00\""));
    }

    #[test]
    fn test_config_validate_reports_warnings() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join(".slotboard")).unwrap();
        fs::write(
            dir.path().join(".slotboard/slotboard.toml"),
            "[schedule]\nlookahead_minutes = 0\n\n[brands.vitality]\noffset = 30\n",
        )
        .unwrap();

        slotboard(&dir)
            .args(["config", "validate"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Configuration warnings:"))
            .stdout(predicate::str::contains("normalized to 6"));
    }
}
