use anyhow::Result;

use crate::{cli::LoginArgs, services::SessionService, AppCtx};

pub async fn handle(args: LoginArgs, ctx: &AppCtx) -> Result<()> {
    let session_service = SessionService::with_defaults(ctx.settings_store.as_ref())?;
    session_service.login(args.email).await?;
    Ok(())
}
