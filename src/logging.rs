use flexi_logger::{
    colored_default_format, opt_format, Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming,
};
use std::path::Path;

/// Starts logging at `default_level` unless `RUST_LOG` overrides it.
///
/// With a directory, output goes to rotating files there (10 MB each, one
/// old file kept); otherwise to stderr in color. Keep the handle alive for
/// as long as logging is needed.
pub fn setup_logging(default_level: &str, log_dir: Option<&Path>) -> crate::Result<LoggerHandle> {
    let logger = Logger::try_with_env_or_str(default_level).map_err(config_error)?;

    let logger = match log_dir {
        Some(dir) => logger
            .log_to_file(FileSpec::default().directory(dir))
            .format(opt_format)
            .rotate(
                Criterion::Size(10 * 1024 * 1024),
                Naming::Numbers,
                Cleanup::KeepLogFiles(1),
            ),
        None => logger.format(colored_default_format),
    };

    logger.start().map_err(config_error)
}

fn config_error(e: flexi_logger::FlexiLoggerError) -> crate::QwirkleError {
    crate::QwirkleError::Config(format!("logger: {}", e))
}
