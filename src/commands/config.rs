use anyhow::{bail, Context, Result};
use tracing::info;

use crate::{cli::ConfigArgs, settings::Settings, AppCtx};
use banque_api::types::Email;

pub async fn handle(args: ConfigArgs, ctx: &AppCtx) -> Result<()> {
    if let Some(email) = args.email.as_deref() {
        Email::new(email)?;
    }
    if let Some(url) = args.api_url.as_deref() {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            bail!("The API URL must start with http:// or https://");
        }
    }

    let saved = ctx
        .settings_store
        .load()
        .context("Fix or remove the settings file before changing the configuration")?;
    let settings = saved.merge(Settings {
        api_url: args.api_url,
        email: args.email,
        timeout_secs: args.timeout,
    });
    ctx.settings_store.save(&settings)?;
    info!("Configuration saved successfully ✅");
    Ok(())
}
