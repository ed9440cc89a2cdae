// src/logging.rs
//! log4rs setup: a console appender at the chosen level and a debug-level
//! file appender in the temp dir.

use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Logger, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the log file written into the temp dir.
pub const LOG_FILE_NAME: &str = "feishu_backup.log";

/// Where the debug log goes.
pub fn log_file_path() -> PathBuf {
    std::env::temp_dir().join(LOG_FILE_NAME)
}

/// Builds the logging configuration.
///
/// The console shows `info` (`debug` when verbose). The file always gets
/// this crate's `debug` records; other crates only reach it from `warn` up.
pub fn logging_config(
    verbose: bool,
    log_file_path: &Path,
) -> Result<Config, Box<dyn std::error::Error>> {
    let console_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stdout_appender = ConsoleAppender::builder()
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(console_level)))
                .build("stdout", Box::new(stdout_appender)),
        )
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .logger(Logger::builder().build("feishu_backup", LevelFilter::Debug))
        .build(
            Root::builder()
                .appender("stdout")
                .appender("file")
                .build(LevelFilter::Warn),
        )?;

    Ok(config)
}

/// Sets up logging configuration.
pub fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let path = log_file_path();
    log4rs::init_config(logging_config(verbose, &path)?)?;
    log::debug!("Logging initialized. Log file: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::{Level, Log, Metadata, Record};

    fn enabled(logger: &log4rs::Logger, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn file_gets_debug_records_without_verbose() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let logger = log4rs::Logger::new(logging_config(false, &path).unwrap());

        assert!(enabled(&logger, Level::Debug, "feishu_backup::crawl::drive"));
        logger.log(
            &Record::builder()
                .args(format_args!("Folder /Notes has 3 item(s)"))
                .level(Level::Debug)
                .target("feishu_backup::crawl::drive")
                .build(),
        );
        logger.flush();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.contains("[DEBUG] - Folder /Notes has 3 item(s)"));
    }

    #[test]
    fn dependencies_stay_quiet_below_warn() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(LOG_FILE_NAME);
        let logger = log4rs::Logger::new(logging_config(true, &path).unwrap());

        assert!(!enabled(&logger, Level::Debug, "hyper::proto"));
        assert!(enabled(&logger, Level::Warn, "hyper::proto"));
    }
}
