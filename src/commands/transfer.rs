use anyhow::Result;
use tracing::info;

use crate::{
    cli::TransferArgs,
    commands::{account_of_kind, connect, report},
    ux::{format::money, progress::TextProgressBar},
    AppCtx,
};

pub async fn handle(args: TransferArgs, ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;

    let state = engine.state();
    state.set_source_account(Some(account_of_kind(&engine, args.from_account)?));
    state.set_target_account(Some(account_of_kind(&engine, args.to_account)?));
    state.update_transaction_amount(&args.amount);

    let progress_bar = TextProgressBar::new(30);
    let result = engine.make_transfer(|p| progress_bar.render(p)).await;
    progress_bar.finish();
    report(&engine);
    let receipt = result?;

    info!(
        "{}: {}, {}: {}",
        receipt.source.account_name,
        money(receipt.source.balance),
        receipt.destination.account_name,
        money(receipt.destination.balance)
    );
    Ok(())
}
