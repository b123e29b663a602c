use anyhow::Result;
use tracing::info;

use crate::{
    cli::CloseArgs,
    commands::{account_of_kind, connect, report},
    ux::format::money,
    AppCtx,
};

pub async fn handle(args: CloseArgs, ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;
    let account = account_of_kind(&engine, args.kind)?;
    if account.balance > 0.0 {
        info!(
            "{} will be moved to your current account",
            money(account.balance)
        );
    }
    let result = engine.close_account(&account).await;
    report(&engine);
    result
}
