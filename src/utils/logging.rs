use anyhow::{Context, Result};
use simplelog::{
    ColorChoice, CombinedLogger, Config, LevelFilter, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::OpenOptions;
use std::path::Path;
use std::str::FromStr;

/// Installs the global logger: warnings and errors on stderr, everything at
/// `level` and above appended to `log_file`.
pub fn init_logging(level: &str, log_file: &Path) -> Result<()> {
    let file_level = parse_level(level);

    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent).context("Failed to create log directory")?;
    }

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)
        .with_context(|| format!("Failed to open log file {}", log_file.display()))?;

    CombinedLogger::init(vec![
        TermLogger::new(
            LevelFilter::Warn,
            Config::default(),
            TerminalMode::Stderr,
            ColorChoice::Auto,
        ),
        WriteLogger::new(file_level, Config::default(), file),
    ])
    .context("Failed to initialize logger")?;

    Ok(())
}

/// Unknown level names fall back to `info`.
pub fn parse_level(level: &str) -> LevelFilter {
    LevelFilter::from_str(level.trim()).unwrap_or(LevelFilter::Info)
}
