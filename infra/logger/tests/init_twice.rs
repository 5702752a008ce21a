use novis_domain::config::{LogLevel, LoggingConfig};
use novis_logger::{Logger, LoggerError};
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn second_init_fails_and_first_sink_keeps_working() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let logging = LoggingConfig { level: LogLevel::Info, enable_console: false, enable_remote: false };

    let first = Logger::builder().name("novis-first").from_config(&logging).path(&log_dir).init()?;
    assert!(first.writes_to_file());

    let second = Logger::builder().name("novis-second").from_config(&LoggingConfig::default()).init();
    assert!(
        matches!(second, Err(LoggerError::Subscriber { .. })),
        "a second global subscriber must be refused"
    );

    tracing::info!("dashboard refresh after rejected init");
    std::thread::sleep(Duration::from_millis(30));
    drop(first);

    let names: Vec<String> = fs::read_dir(&log_dir)?
        .flatten()
        .filter_map(|entry| entry.file_name().to_str().map(str::to_owned))
        .collect();
    assert!(names.iter().all(|name| name.starts_with("novis-first")), "unexpected files: {names:?}");

    let contents = names
        .iter()
        .map(|name| fs::read_to_string(log_dir.join(name)))
        .collect::<Result<String, _>>()?;
    assert!(contents.contains("dashboard refresh after rejected init"));
    Ok(())
}
