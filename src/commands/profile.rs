use anyhow::{Context, Result};
use banque_api::user::User;

use crate::{commands::connect, ux::format::profile_lines, AppCtx};

pub async fn handle(ctx: &AppCtx) -> Result<()> {
    let engine = connect(ctx).await?;
    let user = engine.state().user().context("No profile available")?;
    let accounts = engine.state().accounts();
    let user = if accounts.is_empty() {
        user
    } else {
        User { accounts, ..user }
    };
    for line in profile_lines(&user) {
        println!("{}", line);
    }
    Ok(())
}
