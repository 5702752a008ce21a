use novis_domain::config::LoggingConfig;
use novis_logger::Logger;

#[test]
fn default_logging_section_is_console_only() {
    let logger = Logger::builder()
        .name("novis-console-only")
        .from_config(&LoggingConfig::default())
        .init()
        .expect("logger should initialize from the fallback logging section");

    tracing::warn!("[Dashboard] Config not loaded, using defaults");
    assert!(!logger.writes_to_file(), "console-only logger should not attach a file sink");
}
