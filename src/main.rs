use anyhow::Result;
use clap::Parser;

use banque_cli::settings::init_logger;

#[tokio::main]
async fn main() -> Result<()> {
    init_logger()?;
    let cli = banque_cli::cli::Cli::parse();
    banque_cli::run(cli).await?;
    Ok(())
}
