//! File logging
//!
//! The terminal belongs to the game screen, so log lines go to a file.

use anyhow::{Context, Result};
use clap::ValueEnum;
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Install the global logger writing to `path`, truncating it
pub fn init(path: &Path, level: LogLevel) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    WriteLogger::init(level.into(), Config::default(), file)
        .context("Failed to initialize logger")?;
    Ok(())
}
