pub mod accounts;
pub mod close;
pub mod config;
pub mod delete_transaction;
pub mod login;
pub mod open;
pub mod profile;
pub mod transactions;
pub mod transfer;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{services::BankService, AppCtx};
use banque_api::{
    account::{AccountType, BankAccount},
    engine::MutationEngine,
    state::Notification,
};

async fn connect(ctx: &AppCtx) -> Result<MutationEngine> {
    BankService::with_defaults(ctx.settings_store.as_ref(), ctx.offline)
        .connect()
        .await
}

fn account_of_kind(engine: &MutationEngine, kind: AccountType) -> Result<BankAccount> {
    engine
        .state()
        .accounts()
        .into_iter()
        .find(|a| a.kind == kind)
        .with_context(|| {
            format!(
                "You have no {}. Run `banque accounts` to list your accounts",
                kind
            )
        })
}

/// Log what the engine told the user. Errors are also returned by the
/// operation, so they only go to the debug log here.
fn report(engine: &MutationEngine) {
    let Some(mut notifications) = engine.state().take_notifications() else {
        return;
    };
    while let Ok(notification) = notifications.try_recv() {
        match notification {
            Notification::Success(message) => info!("{} ✅", message),
            Notification::Error(message) => debug!("{}", message),
        }
    }
}
