pub mod account;
pub mod error;
pub mod transfer;

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::{
    repository::BankRepository,
    state::{BankState, Notification},
};

pub use error::{AccountError, TransferError};
pub use account::validate_creation;
pub use transfer::{validate_transfer, TransferMode, TransferProgress, TransferReceipt};

/// Validates and applies every change to the user's money.
///
/// Operations are independent: nothing serializes two of them, so two
/// transfers touching the same account may interleave. A failing step stops
/// the operation but does not undo the steps already persisted.
pub struct MutationEngine {
    repository: Arc<BankRepository>,
    state: Arc<BankState>,
}

impl MutationEngine {
    pub fn new(repository: Arc<BankRepository>, state: Arc<BankState>) -> Self {
        Self { repository, state }
    }

    pub fn state(&self) -> &Arc<BankState> {
        &self.state
    }

    pub fn repository(&self) -> &Arc<BankRepository> {
        &self.repository
    }

    /// Fetch user, accounts and transactions into the state holder.
    ///
    /// When the backend lists no account, the accounts of the profile are shown instead.
    pub async fn load(&self) {
        self.state.set_loading(true);
        let user = self.repository.get_user_profile().await;
        let mut accounts = self.repository.get_accounts().await;
        if accounts.is_empty() {
            debug!("No account returned, using the accounts of the profile");
            accounts = user.accounts.clone();
        }
        info!("Loaded {} accounts for {}", accounts.len(), user.name);
        self.state.set_user(Some(user));
        self.state.set_accounts(accounts);
        self.load_transactions().await;
        self.state.set_error(None);
        self.state.set_loading(false);
    }

    pub async fn load_transactions(&self) {
        let transactions = self.repository.get_transactions().await;
        debug!("Loaded {} transactions", transactions.len());
        self.state.set_transactions(transactions);
    }

    /// Delete a transaction remotely, then from the projection.
    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        let result = async {
            self.repository.delete_transaction(id).await?;
            self.state.remove_transaction(id);
            Ok::<_, anyhow::Error>(())
        }
        .await;
        self.conclude(result, |_| "Transaction supprimée".to_string())
    }

    /// Report the outcome of an operation to the user and hand it back.
    fn conclude<T>(&self, result: Result<T>, success: impl FnOnce(&T) -> String) -> Result<T> {
        match &result {
            Ok(value) => {
                self.state.set_error(None);
                self.state.notify(Notification::Success(success(value)));
            }
            Err(e) => {
                debug!("{:#?}", e);
                self.state.set_error(Some(e.to_string()));
                self.state.notify(Notification::Error(e.to_string()));
            }
        }
        result
    }
}
