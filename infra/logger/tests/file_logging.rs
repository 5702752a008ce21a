use novis_domain::config::{LogLevel, LoggingConfig};
use novis_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn file_logging_respects_configured_level() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let logging = LoggingConfig { level: LogLevel::Warn, enable_console: false, enable_remote: false };

    let logger =
        Logger::builder().name("novis-file-logging").from_config(&logging).path(&log_dir).init()?;

    tracing::info!("refresh scheduled");
    tracing::warn!("health check failed");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    assert!(contents.contains("health check failed"));
    assert!(!contents.contains("refresh scheduled"), "info lines are below the warn threshold");

    Ok(())
}
