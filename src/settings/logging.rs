use anyhow::{anyhow, Result};
use directories::ProjectDirs;
use std::{
    fs,
    io::{stderr, IsTerminal},
    path::PathBuf,
};
use tracing_appender::rolling;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    fmt::{self, format::debug_fn},
    prelude::*,
    registry, EnvFilter,
};

use crate::settings::consts::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_LOG_LEVEL, LOG_FILE,
};

/// Platform data directory holding the log file
fn log_directory() -> Result<PathBuf> {
    let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
        .ok_or_else(|| anyhow!("Could not determine project directories"))?;
    let directory = project_dirs.data_dir().to_path_buf();
    fs::create_dir_all(&directory)?;
    Ok(directory)
}

/// Console output for the user (`RUST_LOG` aware) plus a JSON trace of
/// the banque crates in the data directory.
pub fn init_logger() -> Result<()> {
    let directory = log_directory()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));

    let console_layer = fmt::layer()
        .with_writer(stderr)
        .with_ansi(stderr().is_terminal())
        .with_target(false)
        .without_time()
        .compact()
        .fmt_fields(debug_fn(|writer, field, value| {
            if field.name() == "message" {
                write!(writer, "{:?}", value)?;
            }
            Ok(())
        }))
        .with_filter(env_filter);

    let file_targets = Targets::new()
        .with_target("banque_api", LevelFilter::DEBUG)
        .with_target("banque_cli", LevelFilter::DEBUG)
        .with_default(LevelFilter::WARN);

    let json_layer = fmt::layer()
        .json()
        .with_writer(rolling::never(&directory, LOG_FILE))
        .with_target(true)
        .flatten_event(true)
        .with_filter(file_targets);

    registry().with(console_layer).with(json_layer).init();

    Ok(())
}
