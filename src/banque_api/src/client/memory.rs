use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use super::{
    error::ClientError,
    models::{
        AccountDraft, AccountRecord, ProfileRecord, TransactionDraft, TransactionRecord, WireId,
    },
    Gateway,
};
use crate::{
    sample::SampleData,
    types::{AccountId, Email},
};

#[derive(Default)]
struct Store {
    accounts: Vec<AccountRecord>,
    transactions: Vec<TransactionRecord>,
    profiles: Vec<ProfileRecord>,
    next_id: i64,
}

impl Store {
    fn next_id(&mut self) -> WireId {
        self.next_id += 1;
        WireId::Number(self.next_id)
    }
}

/// In-process backend used offline and in tests.
///
/// Ids are handed out incrementally, above the highest numeric id of the seed.
#[derive(Default)]
pub struct MemoryGateway {
    store: Mutex<Store>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_sample(sample: &SampleData) -> Self {
        let highest = sample
            .accounts
            .iter()
            .map(|a| &a.id)
            .chain(sample.transactions.iter().map(|t| &t.id))
            .filter_map(|id| match id {
                WireId::Number(n) => Some(*n),
                WireId::Text(_) => None,
            })
            .max()
            .unwrap_or(0);
        Self {
            store: Mutex::new(Store {
                accounts: sample.accounts.clone(),
                transactions: sample.transactions.clone(),
                profiles: sample.profiles.clone(),
                next_id: highest,
            }),
        }
    }

    pub fn with_accounts(accounts: Vec<AccountRecord>) -> Self {
        Self::from_sample(&SampleData {
            accounts,
            ..SampleData::default()
        })
    }
}

#[async_trait]
impl Gateway for MemoryGateway {
    async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>, ClientError> {
        Ok(self.store.lock().await.accounts.clone())
    }

    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, ClientError> {
        Ok(self.store.lock().await.transactions.clone())
    }

    async fn fetch_profiles(
        &self,
        email: Option<&Email>,
    ) -> Result<Vec<ProfileRecord>, ClientError> {
        let store = self.store.lock().await;
        Ok(store
            .profiles
            .iter()
            .filter(|p| email.map_or(true, |e| e.matches(&p.email)))
            .cloned()
            .collect())
    }

    async fn create_account(&self, draft: &AccountDraft) -> Result<AccountRecord, ClientError> {
        let mut store = self.store.lock().await;
        let id = store.next_id();
        let record = draft.clone().into_record(id);
        debug!("Memory gateway created account {}", record.id);
        store.accounts.push(record.clone());
        Ok(record)
    }

    async fn update_account_balance(
        &self,
        id: &AccountId,
        balance: f64,
    ) -> Result<(), ClientError> {
        let mut store = self.store.lock().await;
        let account = store
            .accounts
            .iter_mut()
            .find(|a| a.id.matches(id.as_str()))
            .ok_or_else(|| ClientError::NotFound(format!("Account {}", id)))?;
        account.balance = balance;
        Ok(())
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), ClientError> {
        let mut store = self.store.lock().await;
        let before = store.accounts.len();
        store.accounts.retain(|a| !a.id.matches(id.as_str()));
        if store.accounts.len() == before {
            return Err(ClientError::NotFound(format!("Account {}", id)));
        }
        Ok(())
    }

    async fn add_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<TransactionRecord, ClientError> {
        let mut store = self.store.lock().await;
        let id = store.next_id();
        let record = draft.clone().into_record(id);
        store.transactions.push(record.clone());
        Ok(record)
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        let mut store = self.store.lock().await;
        let before = store.transactions.len();
        store.transactions.retain(|t| !t.id.matches(id));
        if store.transactions.len() == before {
            return Err(ClientError::NotFound(format!("Transaction {}", id)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::{AccountType, BankAccount};

    #[tokio::test]
    async fn test_ids_continue_after_seed() {
        let sample = SampleData::bundled().unwrap();
        let gateway = MemoryGateway::from_sample(&sample);
        let draft = AccountDraft::from(&BankAccount::draft(AccountType::Pel, 0.0));
        let created = gateway.create_account(&draft).await.unwrap();
        let existing = gateway.fetch_accounts().await.unwrap();
        assert_eq!(
            existing.iter().filter(|a| a.id == created.id).count(),
            1,
            "created id must not collide with a seeded one"
        );
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_account() {
        let gateway = MemoryGateway::new();
        let id = AccountId::new("404").unwrap();
        assert_eq!(
            gateway.update_account_balance(&id, 1.0).await,
            Err(ClientError::NotFound("Account 404".to_string()))
        );
        assert!(gateway.delete_account(&id).await.is_err());
        assert!(gateway.delete_transaction("404").await.is_err());
    }

    #[tokio::test]
    async fn test_profiles_filtered_by_email() {
        let gateway = MemoryGateway::from_sample(&SampleData::bundled().unwrap());
        let email = Email::new("JANE.SMITH@example.com").unwrap();
        let profiles = gateway.fetch_profiles(Some(&email)).await.unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].name, "Jane Smith");
        assert!(gateway.fetch_profiles(None).await.unwrap().len() >= 2);
    }
}
