pub mod cli;
pub mod commands;
pub mod services;
pub mod settings;
pub mod ux;

use anyhow::Result;
use std::path::PathBuf;
use tracing::debug;

use cli::{Cli, Commands};
use settings::{FileSettingsStore, JsonFileSettingsStore, SettingsStore};

pub struct AppCtx {
    pub settings_store: Box<dyn SettingsStore>,
    /// Ignore the configured API and work on the bundled sample data
    pub offline: bool,
}

pub async fn run(cli: Cli) -> Result<()> {
    let settings_store: Box<dyn SettingsStore> = match cli.settings {
        Some(path) => Box::new(JsonFileSettingsStore::new(PathBuf::from(path))),
        None => Box::new(FileSettingsStore::new()?),
    };
    let ctx = AppCtx {
        settings_store,
        offline: cli.offline,
    };
    debug!("banque-cli {}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Config(args) => commands::config::handle(args, &ctx).await,
        Commands::Login(args) => commands::login::handle(args, &ctx).await,
        Commands::Accounts(args) => commands::accounts::handle(args, &ctx).await,
        Commands::Transactions(args) => commands::transactions::handle(args, &ctx).await,
        Commands::Profile => commands::profile::handle(&ctx).await,
        Commands::Transfer(args) => commands::transfer::handle(args, &ctx).await,
        Commands::Open(args) => commands::open::handle(args, &ctx).await,
        Commands::Close(args) => commands::close::handle(args, &ctx).await,
        Commands::DeleteTransaction(args) => {
            commands::delete_transaction::handle(args, &ctx).await
        }
    }
}
