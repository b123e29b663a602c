use anyhow::Result;
use tracing::info;

use crate::{cli::TransactionsArgs, commands::connect, ux::format::transaction_line, AppCtx};
use banque_api::types::AccountId;

pub async fn handle(args: TransactionsArgs, ctx: &AppCtx) -> Result<()> {
    let account_id = args.account.as_deref().map(AccountId::new).transpose()?;
    let engine = connect(ctx).await?;

    let transactions = engine.state().transactions();
    let shown: Vec<_> = transactions
        .iter()
        .filter(|t| account_id.as_ref().map_or(true, |id| t.belongs_to(id)))
        .collect();
    info!("Found {} transactions", shown.len());
    for transaction in shown {
        println!("{}", transaction_line(transaction));
    }
    Ok(())
}
