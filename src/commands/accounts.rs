use anyhow::Result;
use tracing::info;

use crate::{
    cli::AccountsArgs,
    commands::connect,
    ux::format::{account_line, money},
    AppCtx,
};
use banque_api::account::BankAccount;

pub async fn handle(args: AccountsArgs, ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;

    let accounts: Vec<BankAccount> = engine
        .state()
        .accounts()
        .into_iter()
        .filter(|a| !args.savings || a.kind.is_savings())
        .collect();
    info!("Found {} accounts", accounts.len());
    for account in &accounts {
        println!("{}", account_line(account));
    }
    let total: f64 = accounts.iter().map(|a| a.balance).sum();
    println!("Total: {}", money(total));
    Ok(())
}
