use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    account::{find_current, BankAccount},
    auth::Session,
    client::{
        error::ClientError,
        models::{AccountDraft, TransactionDraft},
        Gateway,
    },
    sample::{dummy_user, SampleData},
    transaction::Transaction,
    types::AccountId,
    user::User,
};

/// Translates gateway answers into domain records.
///
/// Reads are best effort: a failing fetch degrades to an empty result (or
/// bundled sample data for the profile). Writes report their failure.
pub struct BankRepository {
    gateway: Arc<dyn Gateway>,
    session: Session,
    sample: SampleData,
}

impl BankRepository {
    pub fn new(gateway: Arc<dyn Gateway>, session: Session) -> Self {
        let sample = SampleData::bundled().unwrap_or_else(|e| {
            warn!("Bundled sample data unavailable: {:#}", e);
            SampleData::default()
        });
        Self::with_sample(gateway, session, sample)
    }

    pub fn with_sample(gateway: Arc<dyn Gateway>, session: Session, sample: SampleData) -> Self {
        Self {
            gateway,
            session,
            sample,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub async fn get_accounts(&self) -> Vec<BankAccount> {
        match self.gateway.fetch_accounts().await {
            Ok(records) => records
                .into_iter()
                .filter_map(|r| match r.into_account() {
                    Ok(account) => Some(account),
                    Err(e) => {
                        debug!("Skipping account: {}", e);
                        None
                    }
                })
                .collect(),
            Err(e) => {
                warn!("Could not fetch accounts: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn get_current_account(&self) -> Option<BankAccount> {
        find_current(&self.get_accounts().await)
    }

    pub async fn get_transactions(&self) -> Vec<Transaction> {
        match self.gateway.fetch_transactions().await {
            Ok(records) => records.into_iter().map(|r| r.into_transaction()).collect(),
            Err(e) => {
                warn!("Could not fetch transactions: {}", e);
                Vec::new()
            }
        }
    }

    /// Profile of the logged-in user.
    ///
    /// Falls back to the bundled profile of the session email when the
    /// backend errors or knows nobody, then to a built-in dummy user.
    pub async fn get_user_profile(&self) -> User {
        let email = self.session.email.as_ref();
        match self.gateway.fetch_profiles(email).await {
            Ok(profiles) => {
                if let Some(profile) = profiles.into_iter().next() {
                    return profile.into_user();
                }
                debug!("No profile returned by the bank API, using sample data");
            }
            Err(e) => warn!("Could not fetch profile, using sample data: {}", e),
        }
        self.sample.profile_for(email).unwrap_or_else(dummy_user)
    }

    pub async fn add_transaction(&self, transaction: &Transaction) -> Result<Transaction, ClientError> {
        let record = self
            .gateway
            .add_transaction(&TransactionDraft::from(transaction))
            .await?;
        Ok(record.into_transaction())
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        self.gateway.delete_transaction(id).await
    }

    /// Persist the balances of several accounts, stopping at the first failure.
    pub async fn update_accounts(&self, accounts: &[BankAccount]) -> Result<(), ClientError> {
        for account in accounts {
            let id = account.id.as_ref().ok_or(ClientError::MissingId)?;
            self.gateway.update_account_balance(id, account.balance).await?;
        }
        Ok(())
    }

    pub async fn create_account(&self, account: &BankAccount) -> Result<BankAccount, ClientError> {
        let record = self
            .gateway
            .create_account(&AccountDraft::from(account))
            .await?;
        record
            .into_account()
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    pub async fn delete_account(&self, id: &AccountId) -> Result<(), ClientError> {
        self.gateway.delete_account(id).await
    }
}
