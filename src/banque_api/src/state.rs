use std::{fmt, sync::Mutex};

use tokio::sync::{mpsc, watch};
use tracing::debug;

use crate::{
    account::{find_current, BankAccount},
    transaction::Transaction,
    types::AccountId,
    user::User,
};

/// One-shot message for the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn message(&self) -> &str {
        match self {
            Notification::Success(m) | Notification::Error(m) => m,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Notification::Error(_))
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// What the user is typing on the transfer form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferInput {
    pub source: Option<BankAccount>,
    pub target: Option<BankAccount>,
    /// Raw amount text, parsed when the transfer is submitted
    pub amount: String,
}

/// Copy of everything the state holder knows at a given time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Projection {
    pub user: Option<User>,
    pub accounts: Vec<BankAccount>,
    pub current_account: Option<BankAccount>,
    pub transactions: Vec<Transaction>,
    pub loading: bool,
    pub error: Option<String>,
}

/// Latest known view of the user, accounts and transactions.
///
/// Each piece lives in its own `watch` channel so consumers can observe the
/// one they care about. Notifications go through a queue with a single
/// consumer: the receiver can be taken once.
pub struct BankState {
    user: watch::Sender<Option<User>>,
    accounts: watch::Sender<Vec<BankAccount>>,
    current_account: watch::Sender<Option<BankAccount>>,
    transactions: watch::Sender<Vec<Transaction>>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    transfer_input: watch::Sender<TransferInput>,
    notifications: mpsc::UnboundedSender<Notification>,
    notifications_rx: Mutex<Option<mpsc::UnboundedReceiver<Notification>>>,
}

impl Default for BankState {
    fn default() -> Self {
        Self::new()
    }
}

impl BankState {
    pub fn new() -> Self {
        let (notifications, rx) = mpsc::unbounded_channel();
        Self {
            user: watch::channel(None).0,
            accounts: watch::channel(Vec::new()).0,
            current_account: watch::channel(None).0,
            transactions: watch::channel(Vec::new()).0,
            loading: watch::channel(false).0,
            error: watch::channel(None).0,
            transfer_input: watch::channel(TransferInput::default()).0,
            notifications,
            notifications_rx: Mutex::new(Some(rx)),
        }
    }

    pub fn snapshot(&self) -> Projection {
        Projection {
            user: self.user(),
            accounts: self.accounts(),
            current_account: self.current_account(),
            transactions: self.transactions(),
            loading: *self.loading.borrow(),
            error: self.error.borrow().clone(),
        }
    }

    pub fn user(&self) -> Option<User> {
        self.user.borrow().clone()
    }

    pub fn accounts(&self) -> Vec<BankAccount> {
        self.accounts.borrow().clone()
    }

    pub fn current_account(&self) -> Option<BankAccount> {
        self.current_account.borrow().clone()
    }

    pub fn transactions(&self) -> Vec<Transaction> {
        self.transactions.borrow().clone()
    }

    pub fn find_account(&self, id: &AccountId) -> Option<BankAccount> {
        self.accounts
            .borrow()
            .iter()
            .find(|a| a.id.as_ref() == Some(id))
            .cloned()
    }

    pub fn subscribe_user(&self) -> watch::Receiver<Option<User>> {
        self.user.subscribe()
    }

    pub fn subscribe_accounts(&self) -> watch::Receiver<Vec<BankAccount>> {
        self.accounts.subscribe()
    }

    pub fn subscribe_current_account(&self) -> watch::Receiver<Option<BankAccount>> {
        self.current_account.subscribe()
    }

    pub fn subscribe_transactions(&self) -> watch::Receiver<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn set_user(&self, user: Option<User>) {
        self.user.send_replace(user);
    }

    /// Replace the account list and recompute the current-account pointer.
    pub fn set_accounts(&self, accounts: Vec<BankAccount>) {
        let current = find_current(&accounts);
        self.accounts.send_replace(accounts);
        self.current_account.send_replace(current);
    }

    /// Insert or replace accounts, matched on their id.
    pub fn upsert_accounts(&self, updated: &[BankAccount]) {
        let mut accounts = self.accounts();
        for account in updated {
            match accounts.iter_mut().find(|a| a.same_as(account)) {
                Some(existing) => *existing = account.clone(),
                None => accounts.push(account.clone()),
            }
        }
        self.set_accounts(accounts);
    }

    pub fn remove_account(&self, id: &AccountId) {
        let mut accounts = self.accounts();
        accounts.retain(|a| a.id.as_ref() != Some(id));
        self.set_accounts(accounts);
    }

    pub fn set_transactions(&self, transactions: Vec<Transaction>) {
        self.transactions.send_replace(transactions);
    }

    pub fn push_transactions(&self, added: Vec<Transaction>) {
        self.transactions.send_modify(|t| t.extend(added));
    }

    pub fn remove_transaction(&self, id: &str) {
        self.transactions.send_modify(|t| t.retain(|t| t.id != id));
    }

    pub fn set_loading(&self, loading: bool) {
        self.loading.send_replace(loading);
    }

    pub fn set_error(&self, error: Option<String>) {
        self.error.send_replace(error);
    }

    pub fn transfer_input(&self) -> TransferInput {
        self.transfer_input.borrow().clone()
    }

    pub fn subscribe_transfer_input(&self) -> watch::Receiver<TransferInput> {
        self.transfer_input.subscribe()
    }

    pub fn set_source_account(&self, account: Option<BankAccount>) {
        self.transfer_input.send_modify(|i| i.source = account);
    }

    pub fn set_target_account(&self, account: Option<BankAccount>) {
        self.transfer_input.send_modify(|i| i.target = account);
    }

    pub fn update_transaction_amount(&self, amount: &str) {
        self.transfer_input
            .send_modify(|i| i.amount = amount.to_string());
    }

    pub fn reset_transfer_input(&self) {
        self.transfer_input.send_replace(TransferInput::default());
    }

    pub fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("Notification dropped, nobody is listening anymore");
        }
    }

    /// Hand out the notification queue, `None` once it has been taken.
    pub fn take_notifications(&self) -> Option<mpsc::UnboundedReceiver<Notification>> {
        self.notifications_rx.lock().ok()?.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::AccountType;

    fn persisted(id: &str, kind: AccountType, balance: f64) -> BankAccount {
        BankAccount {
            id: Some(AccountId::new(id).unwrap()),
            ..BankAccount::draft(kind, balance)
        }
    }

    #[test]
    fn test_current_account_follows_accounts() {
        let state = BankState::new();
        assert!(state.current_account().is_none());
        state.set_accounts(vec![
            persisted("2", AccountType::LivretA, 10.0),
            persisted("1", AccountType::Current, 100.0),
        ]);
        assert_eq!(state.current_account().unwrap().balance, 100.0);

        state.upsert_accounts(&[persisted("1", AccountType::Current, 50.0)]);
        assert_eq!(state.accounts().len(), 2);
        assert_eq!(state.current_account().unwrap().balance, 50.0);

        state.remove_account(&AccountId::new("1").unwrap());
        assert!(state.current_account().is_none());
        assert_eq!(state.accounts().len(), 1);
    }

    #[tokio::test]
    async fn test_observers_see_changes() {
        let state = BankState::new();
        let mut accounts = state.subscribe_accounts();
        let mut current = state.subscribe_current_account();
        state.set_accounts(vec![persisted("1", AccountType::Current, 100.0)]);
        accounts.changed().await.unwrap();
        current.changed().await.unwrap();
        assert_eq!(accounts.borrow().len(), 1);
        assert_eq!(current.borrow().as_ref().unwrap().balance, 100.0);
    }

    #[tokio::test]
    async fn test_notifications_consumed_once() {
        let state = BankState::new();
        state.notify(Notification::Success("ok".to_string()));
        state.notify(Notification::Error("ko".to_string()));
        let mut rx = state.take_notifications().unwrap();
        assert!(state.take_notifications().is_none());
        assert_eq!(rx.recv().await.unwrap(), Notification::Success("ok".to_string()));
        let error = rx.recv().await.unwrap();
        assert!(error.is_error());
        assert_eq!(error.message(), "ko");
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_transfer_input() {
        let state = BankState::new();
        state.set_source_account(Some(persisted("1", AccountType::Current, 100.0)));
        state.update_transaction_amount("12,50");
        let input = state.transfer_input();
        assert_eq!(input.amount, "12,50");
        assert!(input.source.is_some());
        assert!(input.target.is_none());
        state.reset_transfer_input();
        assert_eq!(state.transfer_input(), TransferInput::default());
    }

    #[test]
    fn test_transactions() {
        let state = BankState::new();
        let t = Transaction::debit("Virement", 5.0, None);
        let id = t.id.clone();
        state.push_transactions(vec![t, Transaction::credit("Virement", 5.0, None)]);
        assert_eq!(state.transactions().len(), 2);
        state.remove_transaction(&id);
        assert_eq!(state.transactions().len(), 1);
        assert!(!state.snapshot().loading);
    }
}
