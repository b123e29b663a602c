pub mod error;
pub mod memory;
pub mod models;
pub mod rest;

use async_trait::async_trait;

use crate::types::{AccountId, Email};

use self::{
    error::ClientError,
    models::{AccountDraft, AccountRecord, ProfileRecord, TransactionDraft, TransactionRecord},
};

/// CRUD access to the bank backend.
///
/// Every call reports its own success or failure, implementations do not
/// retry or batch.
#[async_trait]
pub trait Gateway: Send + Sync {
    async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>, ClientError>;

    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, ClientError>;

    /// Profiles, optionally filtered on the email address
    async fn fetch_profiles(&self, email: Option<&Email>)
        -> Result<Vec<ProfileRecord>, ClientError>;

    async fn create_account(&self, draft: &AccountDraft) -> Result<AccountRecord, ClientError>;

    async fn update_account_balance(&self, id: &AccountId, balance: f64)
        -> Result<(), ClientError>;

    async fn delete_account(&self, id: &AccountId) -> Result<(), ClientError>;

    async fn add_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<TransactionRecord, ClientError>;

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError>;
}
