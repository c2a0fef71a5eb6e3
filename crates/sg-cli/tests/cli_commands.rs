//! End-to-end tests for the `sg` binary.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use sg_core::{KdfConfig, OracleConfig};
use sg_oracle::AnthroOracle;

/// Log line emitted once the master key has been stretched.
const DERIVED: &str = "master key derived";

const AT: &str = "2026-10-17T09:30:00Z";

/// `sg` with cheap key stretching and no colors.
fn sg() -> Command {
    let mut cmd = Command::cargo_bin("sg").unwrap();
    cmd.args(["--iterations", "16", "--plain"]);
    cmd
}

/// `sg` logging at debug level to stderr.
fn sg_debug() -> Command {
    let mut cmd = sg();
    cmd.env_remove("RUST_LOG").arg("-vv");
    cmd
}

fn stdout_of(args: &[&str]) -> String {
    let output = sg().args(args).output().unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

fn auth_line(stdout: &str) -> &str {
    stdout.lines().find(|l| l.contains("Auth:")).unwrap()
}

/// Tokens the CLI will show for an anthro pool of `size` under `query`.
fn pool_tokens(query: &str, size: usize) -> Vec<String> {
    let config = OracleConfig::default().with_kdf(KdfConfig::default().with_iterations(16));
    AnthroOracle::new(config)
        .with_pool_size(size)
        .build_pool(query)
        .unwrap()
        .tokens()
        .into_iter()
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// runes
// ---------------------------------------------------------------------------

#[test]
fn runes_cast_three_positions() {
    sg().args(["runes", "-q", "Will I succeed?"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Past")
                .and(predicate::str::contains("Present"))
                .and(predicate::str::contains("Future"))
                .and(predicate::str::contains("Auth:")),
        );
}

#[test]
fn runes_same_query_same_output() {
    let args = ["runes", "-q", "Will I succeed?", "-n", "5", "--at", AT];
    assert_eq!(stdout_of(&args), stdout_of(&args));
}

#[test]
fn runes_timestamp_seeding_changes_reading() {
    let a = stdout_of(&["runes", "-q", "q", "--timestamped", "--at", AT]);
    let b = stdout_of(&[
        "runes",
        "-q",
        "q",
        "--timestamped",
        "--at",
        "2026-10-17T09:30:01Z",
    ]);
    assert!(a.contains("(seeded)"));
    assert_ne!(auth_line(&a), auth_line(&b));
}

#[test]
fn runes_fallback_kdf_differs() {
    let pbkdf2 = stdout_of(&["runes", "-q", "q", "--at", AT]);
    let fallback = stdout_of(&["runes", "-q", "q", "--at", AT, "--fallback-kdf"]);
    assert_ne!(auth_line(&pbkdf2), auth_line(&fallback));
}

#[test]
fn runes_reject_unoffered_count() {
    sg().args(["runes", "-q", "q", "-n", "4"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("rune count must be 1, 3, or 5"));
}

#[test]
fn runes_reject_blank_query() {
    sg().args(["runes", "-q", "   "])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("a question is required"));
}

#[test]
fn runes_reject_zero_iterations() {
    Command::cargo_bin("sg")
        .unwrap()
        .env("SG_ITERATIONS", "0")
        .args(["runes", "-q", "q"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("iteration count"));
}

#[test]
fn runes_save_jsonl_appends() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("readings.jsonl");
    let path_str = path.to_str().unwrap();

    for _ in 0..2 {
        sg().args(["runes", "-q", "q", "--save", path_str])
            .assert()
            .success()
            .stdout(predicate::str::contains("Appended"));
    }

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    for line in lines {
        let value: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(value["drawn_runes"].as_array().unwrap().len(), 3);
    }
}

#[test]
fn runes_save_json_overwrites() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("reading.json");
    let path_str = path.to_str().unwrap();

    sg().args(["runes", "-q", "first", "--save", path_str])
        .assert()
        .success();
    sg().args(["runes", "-q", "second", "-n", "1", "--save", path_str])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved"));

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["query"], "second");
    assert_eq!(value["drawn_runes"].as_array().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// kabbalah
// ---------------------------------------------------------------------------

#[test]
fn kabbalah_pillars_reading() {
    sg().args(["kabbalah", "-q", "What guides me?", "-p", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Mind/Heart/Body")
                .and(predicate::str::contains("Mind"))
                .and(predicate::str::contains("Body"))
                .and(predicate::str::contains("Paths: 2")),
        );
}

#[test]
fn kabbalah_four_worlds_groups() {
    sg().args(["kabbalah", "-q", "worlds", "-r", "4", "-p", "0"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Archetypal World")
                .and(predicate::str::contains("Material World"))
                .and(predicate::str::contains("Malkuth (Kingdom)"))
                .and(predicate::str::contains("Paths: 0")),
        );
}

#[test]
fn kabbalah_derived_path_count_is_noted() {
    sg().args(["kabbalah", "-q", "q", "-r", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("count drawn from the query"));
}

#[test]
fn kabbalah_rejects_too_many_paths() {
    sg().args(["kabbalah", "-q", "q", "-p", "23"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("between 0 and 22"));
}

#[test]
fn kabbalah_rejects_unknown_reading_type() {
    sg().args(["kabbalah", "-q", "q", "-r", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported spread"));
}

#[test]
fn kabbalah_save_json() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tree.json");

    sg().args([
        "kabbalah",
        "-q",
        "q",
        "-r",
        "10",
        "-p",
        "3",
        "--save",
        path.to_str().unwrap(),
    ])
    .assert()
    .success();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(value["reading_type"], "FullTree");
    assert_eq!(value["sephirot"].as_array().unwrap().len(), 10);
    assert_eq!(value["paths"].as_array().unwrap().len(), 3);
}

// ---------------------------------------------------------------------------
// anthro
// ---------------------------------------------------------------------------

#[test]
fn anthro_reveals_picked_tokens() {
    let tokens = pool_tokens("guide me", 24);
    let picks = format!("{},{},{}", tokens[0].to_uppercase(), tokens[5], tokens[9]);

    sg().args(["anthro", "-q", "guide me", "-n", "3", "-s", "24", "--pick", &picks])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Path")
                .and(predicate::str::contains("Obstacle"))
                .and(predicate::str::contains("Ally"))
                .and(predicate::str::contains(tokens[5].as_str())),
        );
}

#[test]
fn anthro_prompts_when_flags_missing() {
    let tokens = pool_tokens("guide me", 12);

    sg().args(["anthro", "-s", "12"])
        .write_stdin(format!("guide me\n1\n{}\n", tokens[3]))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Your question:")
                .and(predicate::str::contains("Heart of the Matter")),
        );
}

#[test]
fn anthro_reprompts_on_wrong_pick_count() {
    let tokens = pool_tokens("guide me", 12);

    sg().args(["anthro", "-q", "guide me", "-n", "1", "-s", "12"])
        .write_stdin(format!("{},{}\n{}\n", tokens[0], tokens[1], tokens[2]))
        .assert()
        .success()
        .stdout(
            predicate::str::contains("expected 1 token prefixes, got 2")
                .and(predicate::str::contains(tokens[2].as_str())),
        );
}

#[test]
fn anthro_unmatched_prefix_aborts_without_saving() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("totems.jsonl");
    let tokens = pool_tokens("guide me", 12);
    let missing = (0..4096u32)
        .map(|n| format!("{n:03x}"))
        .find(|p| !tokens.iter().any(|t| t.starts_with(p.as_str())))
        .unwrap();

    sg().args([
        "anthro",
        "-q",
        "guide me",
        "-n",
        "1",
        "-s",
        "12",
        "--pick",
        &missing,
        "--save",
        path.to_str().unwrap(),
    ])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("reading aborted"));

    assert!(!path.exists());
}

#[test]
fn anthro_rejects_pick_count_mismatch() {
    sg().args(["anthro", "-q", "q", "-n", "3", "--pick", "abc"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("expected 3 token prefixes, got 1"));
}

#[test]
fn anthro_rejects_oversized_pool() {
    sg().args(["anthro", "-q", "q", "-n", "1", "-s", "5000", "--pick", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 4096"));
}

#[test]
fn anthro_shows_each_totem_auth() {
    let config = OracleConfig::default().with_kdf(KdfConfig::default().with_iterations(16));
    let pool = AnthroOracle::new(config)
        .with_pool_size(12)
        .build_pool("guide me")
        .unwrap();
    let pick = [pool.tokens()[4].to_string()];
    let auth = pool.reveal(1, &pick).unwrap().totems[0].totem.auth();

    sg().args(["anthro", "-q", "guide me", "-n", "1", "-s", "12", "--pick", pick[0].as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Auth").and(predicate::str::contains(auth.as_str())));
}

// ---------------------------------------------------------------------------
// input checks run before key stretching
// ---------------------------------------------------------------------------

#[test]
fn debug_log_reports_key_derivation() {
    sg_debug()
        .args(["runes", "-q", "q", "-n", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains(DERIVED));
}

#[test]
fn anthro_short_prefix_rejected_before_hashing() {
    sg_debug()
        .args(["anthro", "-q", "q", "-n", "1", "--pick", "ab"])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("too short")
                .and(predicate::str::contains(DERIVED).not()),
        );
}

#[test]
fn anthro_count_beyond_pool_rejected_before_hashing() {
    sg_debug()
        .args([
            "anthro",
            "-q",
            "q",
            "-n",
            "5",
            "-s",
            "3",
            "--pick",
            "abc,def,012,345,678",
        ])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("between 1 and 3")
                .and(predicate::str::contains(DERIVED).not()),
        );
}

#[test]
fn blank_query_rejected_before_hashing() {
    sg_debug()
        .args(["kabbalah", "-q", " \t "])
        .assert()
        .code(2)
        .stderr(
            predicate::str::contains("a question is required")
                .and(predicate::str::contains(DERIVED).not()),
        );
}
