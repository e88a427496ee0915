use flexi_logger::{opt_format, Cleanup, Criterion, FileSpec, Logger, Naming};

/// Sets up rotating file logging. Mirrors the teacher's logging setup, pointed
/// at this crate's own log directory.
pub fn setup_logging() -> Result<(), flexi_logger::FlexiLoggerError> {
    Logger::try_with_env_or_str("info")?
        .log_to_file(FileSpec::default().directory("/var/log/einstein_pmcts/"))
        .format(opt_format)
        .rotate(
            Criterion::Size(10 * 1024 * 1024),
            Naming::Numbers,
            Cleanup::KeepLogFiles(5),
        )
        .start()?;
    Ok(())
}
