use anyhow::Result;

use crate::{
    cli::DeleteTransactionArgs,
    commands::{connect, report},
    AppCtx,
};

pub async fn handle(args: DeleteTransactionArgs, ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;
    let result = engine.delete_transaction(args.id.trim()).await;
    report(&engine);
    result
}
