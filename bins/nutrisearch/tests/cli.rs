//! Command-line behavior that needs no provider

use assert_cmd::Command;
use predicates::prelude::*;

/// Binary with provider credentials removed and an unreachable proxy
fn nutrisearch() -> Command {
    let mut cmd = Command::cargo_bin("nutrisearch").unwrap();
    cmd.env_remove("FDC_API_KEY")
        .env_remove("FDC_BASE_URL")
        .env_remove("SUPABASE_ANON_KEY")
        .env_remove("NUTRISEARCH_PROXY_FUNCTION")
        .env_remove("NUTRISEARCH_TIMEOUT_SECS")
        .env_remove("RUST_LOG")
        .env("SUPABASE_URL", "http://127.0.0.1:9");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    nutrisearch()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("details"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_search_requires_query() {
    nutrisearch().arg("search").assert().failure().code(2);
}

#[test]
fn test_short_query_prints_empty_page() {
    nutrisearch()
        .args(["search", "a", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"totalHits\": 0"))
        .stdout(predicate::str::contains("\"currentPage\": 1"))
        .stdout(predicate::str::contains("error").not());
}

#[test]
fn test_unreachable_provider_is_soft_failure() {
    nutrisearch()
        .args(["search", "banana", "--format", "json"])
        .assert()
        .code(1)
        .stdout(predicate::str::contains("\"error\""))
        .stdout(predicate::str::contains("\"foods\": []"));
}

#[test]
fn test_details_rejects_non_numeric_id() {
    nutrisearch()
        .args(["details", "banana"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("FDC id must be numeric"));
}

#[test]
fn test_missing_config_file_is_config_error() {
    nutrisearch()
        .args(["--config", "does-not-exist.toml", "config"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("[E3001]"))
        .stderr(predicate::str::contains("Suggestion:"));
}

#[test]
fn test_config_redacts_secrets() {
    nutrisearch()
        .env("SUPABASE_ANON_KEY", "super-secret-anon")
        .args(["config", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"mode\": \"proxy\""))
        .stdout(predicate::str::contains("http://127.0.0.1:9/functions/v1"))
        .stdout(predicate::str::contains("super-secret-anon").not());
}

#[test]
fn test_invalid_timeout_env_is_config_error() {
    nutrisearch()
        .env("NUTRISEARCH_TIMEOUT_SECS", "later")
        .arg("config")
        .assert()
        .code(3)
        .stderr(predicate::str::contains("NUTRISEARCH_TIMEOUT_SECS"));
}
