use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::{TempDir, tempdir};

const FIXTURE: &str = include_str!("fixtures/dashboard.toml");

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// The binary with a clean environment, pointed at `config`.
fn novis(config: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("novis"));
    cmd.env_clear().arg("--config").arg(config);
    cmd
}

fn with_fixture() -> std::io::Result<TempDir> {
    let dir = tempdir()?;
    fs::write(dir.path().join("dashboard.toml"), FIXTURE)?;
    Ok(dir)
}

#[test]
fn missing_config_warns_and_shows_defaults() -> TestResult {
    let dir = tempdir()?;

    novis(&dir.path().join("dashboard"))
        .assert()
        .success()
        .stderr(predicate::str::contains("[Dashboard] Config not loaded, using defaults"))
        .stdout(predicate::str::contains("http://localhost:5678"))
        .stdout(predicate::str::contains("\"fallback\": true"))
        .stdout(predicate::str::contains("demo_key_12345").not());
    Ok(())
}

#[test]
fn primary_file_is_shown_with_masked_key() -> TestResult {
    let dir = with_fixture()?;

    novis(&dir.path().join("dashboard"))
        .args(["show", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("https://n8n.your-domain.com"))
        .stdout(predicate::str::contains("\"fallback\": false"))
        .stdout(predicate::str::contains("sk_p***"))
        .stdout(predicate::str::contains("sk_prod_your_api_key_here").not())
        .stderr(predicate::str::contains("Config not loaded").not());
    Ok(())
}

#[test]
fn strict_check_fails_without_primary_file() -> TestResult {
    let dir = tempdir()?;
    let missing = dir.path().join("dashboard");

    novis(&missing).arg("check").assert().success().stdout(predicate::str::starts_with("ok: "));
    novis(&missing)
        .args(["check", "--strict"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No primary configuration"));
    Ok(())
}

#[test]
fn malformed_file_is_fatal() -> TestResult {
    let dir = tempdir()?;
    fs::write(dir.path().join("dashboard.toml"), "[api\nbase_url = ")?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Critical: Configuration is malformed or invalid"));
    Ok(())
}

#[test]
fn rule_violations_are_reported_as_invalid() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("endpoint = \"/webhook/executive-metrics\"", "endpoint = \"webhook\""),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed or invalid"))
        .stderr(predicate::str::contains("api.endpoint"));
    Ok(())
}

#[test]
fn invalid_values_are_rejected() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("base_url = \"https://n8n.your-domain.com\"", "base_url = \"ftp://host\""),
    )?;

    novis(&dir.path().join("dashboard")).arg("check").assert().failure();
    Ok(())
}

#[test]
fn environment_overrides_the_file() -> TestResult {
    let dir = with_fixture()?;

    novis(&dir.path().join("dashboard"))
        .arg("endpoint")
        .env("NOVIS__API__BASE_URL", "https://metrics.example.org")
        .env("NOVIS__API__TIMEOUT_MS", "2500")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://metrics.example.org/webhook/executive-metrics",
        ))
        .stdout(predicate::str::contains("timeout:  2500 ms"));
    Ok(())
}

#[test]
fn endpoint_reports_auth_header() -> TestResult {
    let dir = with_fixture()?;

    novis(&dir.path().join("dashboard"))
        .arg("endpoint")
        .assert()
        .success()
        .stdout(predicate::str::contains("auth:     header x-api-key: sk_p***"))
        .stdout(predicate::str::contains("retries:  3 (every 2000 ms)"));
    Ok(())
}

#[test]
fn silent_logging_keeps_stderr_empty() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("enable_console = true", "enable_console = false"),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
    Ok(())
}

#[test]
fn log_level_flag_filters_announcement() -> TestResult {
    let dir = with_fixture()?;

    novis(&dir.path().join("dashboard"))
        .args(["check", "--log-level", "error"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Dashboard config loaded").not());
    Ok(())
}

#[test]
fn fallback_prints_the_builtin_record() -> TestResult {
    let dir = with_fixture()?;

    novis(&dir.path().join("dashboard"))
        .arg("fallback")
        .assert()
        .success()
        .stdout(predicate::str::contains("base_url = \"http://localhost:5678\""))
        .stdout(predicate::str::contains("api_key = \"demo_key_12345\""))
        .stdout(predicate::str::contains("demo_mode = true"));
    Ok(())
}

#[test]
fn demo_key_on_production_client_is_flagged() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("sk_prod_your_api_key_here", "demo_key_12345"),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Production client is using the demo API key"));
    Ok(())
}

#[test]
fn demo_key_outside_production_is_not_flagged() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE
            .replace("sk_prod_your_api_key_here", "demo_key_12345")
            .replace("environment = \"production\"", "environment = \"staging\""),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("Dashboard config loaded"))
        .stderr(predicate::str::contains("demo API key").not());
    Ok(())
}

#[test]
fn log_dir_writes_announcement_to_file() -> TestResult {
    let dir = with_fixture()?;
    let logs = dir.path().join("logs");

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .arg("--log-dir")
        .arg(&logs)
        .arg("--log-json")
        .assert()
        .success();

    let contents = fs::read_dir(&logs)?
        .flatten()
        .map(|entry| fs::read_to_string(entry.path()))
        .collect::<Result<String, _>>()?;
    assert!(contents.contains("Dashboard config loaded"));
    assert!(contents.contains("\"client\":\"client_abc123\""), "span fields are logged: {contents}");
    Ok(())
}

#[cfg(not(feature = "remote"))]
#[test]
fn remote_logging_without_support_is_reported() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("enable_remote = false", "enable_remote = true"),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .assert()
        .success()
        .stderr(predicate::str::contains("remote logging disabled"));
    Ok(())
}

#[cfg(feature = "remote")]
#[test]
fn remote_logging_starts_and_exits_cleanly() -> TestResult {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("dashboard.toml"),
        FIXTURE.replace("enable_remote = false", "enable_remote = true"),
    )?;

    novis(&dir.path().join("dashboard"))
        .arg("check")
        .env("OTEL_EXPORTER_OTLP_ENDPOINT", "http://127.0.0.1:9")
        .env("OTEL_EXPORTER_OTLP_TIMEOUT", "500")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ok: "))
        .stderr(predicate::str::contains("remote logging disabled").not());
    Ok(())
}
