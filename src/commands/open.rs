use anyhow::Result;

use crate::{
    cli::OpenArgs,
    commands::{connect, report},
    ux::format::account_line,
    AppCtx,
};

pub async fn handle(args: OpenArgs, ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;
    let result = engine.create_account(args.kind, args.deposit).await;
    report(&engine);
    println!("{}", account_line(&result?));
    Ok(())
}
