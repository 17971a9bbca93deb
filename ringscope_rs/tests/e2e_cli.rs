//! End-to-end CLI tests for ringscope.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Binary running in an empty directory with its own preference file.
fn ringscope(temp: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("ringscope");
    cmd.current_dir(temp.path())
        .env_remove("RUST_LOG")
        .arg("--color")
        .arg("never")
        .arg("--prefs")
        .arg(temp.path().join("prefs.json"));
    cmd
}

fn temp() -> TempDir {
    TempDir::new().expect("temp dir")
}

// ============================================
// Basic CLI Tests
// ============================================

mod cli_basics {
    use super::*;

    #[test]
    fn shows_help() {
        cargo_bin_cmd!("ringscope")
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("ringscope"))
            .stdout(predicate::str::contains("inspect"))
            .stdout(predicate::str::contains("rings"));
    }

    #[test]
    fn shows_version() {
        cargo_bin_cmd!("ringscope")
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn unknown_subcommand_fails() {
        cargo_bin_cmd!("ringscope").arg("explode").assert().failure();
    }
}

// ============================================
// Selection / detail panel
// ============================================

mod inspect {
    use super::*;

    #[test]
    fn flagged_account_shows_score_ring_and_patterns() {
        let temp = temp();
        ringscope(&temp)
            .arg("inspect")
            .arg(fixture("example_payload.json"))
            .arg("B")
            .assert()
            .success()
            .stdout(predicate::str::contains("Account B"))
            .stdout(predicate::str::contains("Suspicion Score: 0.9"))
            .stdout(predicate::str::contains("Ring: R1"))
            .stdout(predicate::str::contains("Patterns: fan-out"));
    }

    #[test]
    fn unflagged_account_is_clean() {
        let temp = temp();
        ringscope(&temp)
            .arg("inspect")
            .arg(fixture("example_payload.json"))
            .arg("A")
            .assert()
            .success()
            .stdout(predicate::str::contains("Clean Account"))
            .stdout(predicate::str::contains("Suspicion Score").not());
    }

    #[test]
    fn unknown_account_falls_back_to_clean() {
        let temp = temp();
        ringscope(&temp)
            .arg("inspect")
            .arg(fixture("example_payload.json"))
            .arg("NOBODY")
            .assert()
            .success()
            .stdout(predicate::str::contains("Clean Account"));
    }

    #[test]
    fn multiple_patterns_are_comma_joined() {
        let temp = temp();
        ringscope(&temp)
            .args(["inspect", "--json"])
            .arg(fixture("cycle_payload.json"))
            .arg("ACC_3")
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""kind": "flagged""#))
            .stdout(predicate::str::contains("cycle_length_3, fan_in_high"));
    }
}

// ============================================
// Ring list
// ============================================

mod rings {
    use super::*;

    #[test]
    fn lists_example_ring() {
        let temp = temp();
        ringscope(&temp)
            .arg("rings")
            .arg(fixture("example_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("R1"))
            .stdout(predicate::str::contains("LAYERING"))
            .stdout(predicate::str::contains("Risk: 0.8"));
    }

    #[test]
    fn keeps_payload_order_and_arrow_path() {
        let temp = temp();
        let output = ringscope(&temp)
            .arg("rings")
            .arg(fixture("cycle_payload.json"))
            .output()
            .expect("run");
        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);

        let second = stdout.find("RING_002").expect("RING_002 listed");
        let first = stdout.find("RING_001").expect("RING_001 listed");
        assert!(second < first, "rings must not be re-sorted:\n{stdout}");
        assert!(stdout.contains("ACC_1 → ACC_2 → ACC_3"));
    }

    #[test]
    fn json_cards_follow_theme() {
        let temp = temp();
        ringscope(&temp)
            .args(["rings", "--json", "--theme", "light"])
            .arg(fixture("example_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("#e5e7eb"))
            .stdout(predicate::str::contains("1px solid #ccc"));
    }
}

// ============================================
// Rendering
// ============================================

mod render {
    use super::*;

    #[test]
    fn writes_html_dashboard() {
        let temp = temp();
        let out = temp.path().join("dash/index.html");
        ringscope(&temp)
            .arg("render")
            .arg(fixture("example_payload.json"))
            .arg("--out")
            .arg(&out)
            .assert()
            .success();

        let html = std::fs::read_to_string(&out).expect("html written");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("window.__RINGSCOPE"));
        assert!(html.contains("#ef4444"));
        assert!(html.contains("LAYERING"));
        assert!(html.contains("vis-network"));
    }

    #[test]
    fn dot_output_uses_flag_colors() {
        let temp = temp();
        ringscope(&temp)
            .args(["render", "--format", "dot"])
            .arg(fixture("example_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::starts_with("digraph ringscope"))
            .stdout(predicate::str::contains(r##""B" [label="B", fillcolor="#ef4444""##))
            .stdout(predicate::str::contains(r##""A" [label="A", fillcolor="#3b82f6""##))
            .stdout(predicate::str::contains(r#""A" -> "B""#));
    }

    #[test]
    fn json_output_has_theme_label_color() {
        let temp = temp();
        ringscope(&temp)
            .args(["render", "--format", "json", "--theme", "light"])
            .arg(fixture("example_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""theme": "light""#))
            .stdout(predicate::str::contains("#000000"))
            .stdout(predicate::str::contains("forceAtlas2Based"));
    }

    #[test]
    fn render_uses_saved_theme() {
        let temp = temp();
        ringscope(&temp).args(["theme", "set", "light"]).assert().success();
        ringscope(&temp)
            .args(["render", "--format", "json"])
            .arg(fixture("example_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""theme": "light""#));
    }

    #[test]
    fn malformed_payload_fails() {
        let temp = temp();
        ringscope(&temp)
            .arg("render")
            .arg(fixture("malformed.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("is not an analysis"));
    }

    #[test]
    fn missing_payload_fails() {
        let temp = temp();
        ringscope(&temp)
            .arg("render")
            .arg(temp.path().join("nope.json"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("Failed to read payload"));
    }
}

// ============================================
// Integrity check
// ============================================

mod check {
    use super::*;

    #[test]
    fn consistent_payload_passes() {
        let temp = temp();
        ringscope(&temp)
            .arg("check")
            .arg(fixture("cycle_payload.json"))
            .assert()
            .success()
            .stdout(predicate::str::contains("No broken references"));
    }

    #[test]
    fn broken_references_fail() {
        let temp = temp();
        ringscope(&temp)
            .arg("check")
            .arg(fixture("broken_refs.json"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("GHOST is not a graph node"))
            .stdout(predicate::str::contains("ring R1 lists A"));
    }

    #[test]
    fn broken_references_still_render() {
        let temp = temp();
        ringscope(&temp)
            .arg("inspect")
            .arg(fixture("broken_refs.json"))
            .arg("A")
            .assert()
            .success()
            .stdout(predicate::str::contains("Clean Account"));
    }
}

// ============================================
// Theme preference
// ============================================

mod theme {
    use super::*;

    #[test]
    fn defaults_to_dark_and_toggles() {
        let temp = temp();
        ringscope(&temp)
            .arg("theme")
            .assert()
            .success()
            .stdout(predicate::str::diff("dark\n"));
        ringscope(&temp)
            .args(["theme", "toggle"])
            .assert()
            .success()
            .stdout(predicate::str::diff("light\n"));
        ringscope(&temp)
            .args(["theme", "show"])
            .assert()
            .success()
            .stdout(predicate::str::diff("light\n"));

        let prefs = std::fs::read_to_string(temp.path().join("prefs.json")).expect("prefs");
        assert!(prefs.contains(r#""theme": "light""#));
    }

    #[test]
    fn set_is_idempotent() {
        let temp = temp();
        for _ in 0..2 {
            ringscope(&temp)
                .args(["theme", "set", "light"])
                .assert()
                .success()
                .stdout(predicate::str::diff("light\n"));
        }
        ringscope(&temp)
            .args(["theme", "set", "dark"])
            .assert()
            .success()
            .stdout(predicate::str::diff("dark\n"));
    }

    #[test]
    fn rejects_unknown_theme() {
        let temp = temp();
        ringscope(&temp)
            .args(["theme", "set", "solarized"])
            .assert()
            .failure();
    }
}

// ============================================
// Network commands (no server running)
// ============================================

mod network {
    use super::*;

    #[test]
    fn upload_without_server_reports_failure() {
        let temp = temp();
        let csv = temp.path().join("transactions.csv");
        std::fs::write(
            &csv,
            "transaction_id,sender_id,receiver_id,amount,timestamp\nT1,A,B,100,2024-01-01 00:00:00\n",
        )
        .expect("write csv");

        ringscope(&temp)
            .arg("upload")
            .arg(&csv)
            .args(["--server", "http://127.0.0.1:9"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Upload failed"));
    }

    #[test]
    fn upload_missing_file_fails() {
        let temp = temp();
        ringscope(&temp)
            .arg("upload")
            .arg(temp.path().join("missing.csv"))
            .assert()
            .failure()
            .stderr(predicate::str::contains("cannot read"));
    }

    #[test]
    fn download_without_server_fails() {
        let temp = temp();
        ringscope(&temp)
            .args(["download", "--server", "http://127.0.0.1:9"])
            .assert()
            .failure();
        assert!(!temp.path().join("fraud_detection_output.json").exists());
    }
}
