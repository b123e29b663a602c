//! Test doubles shared by the unit tests.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    account::AccountType,
    client::{
        error::ClientError,
        memory::MemoryGateway,
        models::{
            AccountDraft, AccountRecord, ProfileRecord, TransactionDraft, TransactionRecord,
            WireId,
        },
        Gateway,
    },
    sample::SampleData,
    types::{AccountId, Email},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Call {
    FetchAccounts,
    FetchTransactions,
    FetchProfiles,
    CreateAccount,
    UpdateAccountBalance,
    DeleteAccount,
    AddTransaction,
    DeleteTransaction,
}

/// Writes remote calls to a log and fails on demand, delegating to a [`MemoryGateway`].
pub struct RecordingGateway {
    inner: MemoryGateway,
    calls: Mutex<Vec<Call>>,
    /// Call to fail and on which occurrence (1-based), `0` fails every time
    fail_on: Option<(Call, usize)>,
}

impl RecordingGateway {
    pub fn new(inner: MemoryGateway) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
            fail_on: None,
        }
    }

    pub fn seeded() -> Self {
        Self::new(MemoryGateway::from_sample(&SampleData::bundled().unwrap()))
    }

    pub fn with_accounts(accounts: Vec<AccountRecord>) -> Self {
        Self::new(MemoryGateway::with_accounts(accounts))
    }

    pub fn failing_on(self, call: Call) -> Self {
        self.failing_on_nth(call, 0)
    }

    pub fn failing_on_nth(mut self, call: Call, occurrence: usize) -> Self {
        self.fail_on = Some((call, occurrence));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change the remote store
    pub fn writes(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| {
                !matches!(
                    c,
                    Call::FetchAccounts | Call::FetchTransactions | Call::FetchProfiles
                )
            })
            .collect()
    }

    pub fn count(&self, call: Call) -> usize {
        self.calls().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: Call) -> Result<(), ClientError> {
        let mut calls = self.calls.lock().unwrap();
        calls.push(call);
        let occurrence = calls.iter().filter(|c| **c == call).count();
        match self.fail_on {
            Some((failing, nth)) if failing == call && (nth == 0 || nth == occurrence) => {
                Err(ClientError::Status {
                    status: 500,
                    body: format!("{:?} failed", call),
                })
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl Gateway for RecordingGateway {
    async fn fetch_accounts(&self) -> Result<Vec<AccountRecord>, ClientError> {
        self.record(Call::FetchAccounts)?;
        self.inner.fetch_accounts().await
    }

    async fn fetch_transactions(&self) -> Result<Vec<TransactionRecord>, ClientError> {
        self.record(Call::FetchTransactions)?;
        self.inner.fetch_transactions().await
    }

    async fn fetch_profiles(
        &self,
        email: Option<&Email>,
    ) -> Result<Vec<ProfileRecord>, ClientError> {
        self.record(Call::FetchProfiles)?;
        self.inner.fetch_profiles(email).await
    }

    async fn create_account(&self, draft: &AccountDraft) -> Result<AccountRecord, ClientError> {
        self.record(Call::CreateAccount)?;
        self.inner.create_account(draft).await
    }

    async fn update_account_balance(
        &self,
        id: &AccountId,
        balance: f64,
    ) -> Result<(), ClientError> {
        self.record(Call::UpdateAccountBalance)?;
        self.inner.update_account_balance(id, balance).await
    }

    async fn delete_account(&self, id: &AccountId) -> Result<(), ClientError> {
        self.record(Call::DeleteAccount)?;
        self.inner.delete_account(id).await
    }

    async fn add_transaction(
        &self,
        draft: &TransactionDraft,
    ) -> Result<TransactionRecord, ClientError> {
        self.record(Call::AddTransaction)?;
        self.inner.add_transaction(draft).await
    }

    async fn delete_transaction(&self, id: &str) -> Result<(), ClientError> {
        self.record(Call::DeleteTransaction)?;
        self.inner.delete_transaction(id).await
    }
}

pub fn account_record(id: i64, kind: AccountType, balance: f64) -> AccountRecord {
    AccountRecord {
        id: WireId::Number(id),
        account_number: format!("FR76 0000 {:04}", id),
        account_name: kind.label().to_string(),
        balance,
        kind: kind.wire_name().to_string(),
        currency: Some("EUR".to_string()),
        color: Some(kind.color().to_string()),
    }
}
