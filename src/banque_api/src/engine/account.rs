use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    account::{AccountType, BankAccount},
    engine::{error::AccountError, transfer::TransferMode, MutationEngine, TransferProgress},
};

/// Check that a `kind` account holding `initial_balance` can be opened next to `existing`.
pub fn validate_creation(
    existing: &[BankAccount],
    kind: AccountType,
    initial_balance: f64,
) -> Result<(), AccountError> {
    if initial_balance.is_nan() || initial_balance < 0.0 {
        return Err(AccountError::NegativeInitialBalance);
    }
    if existing.iter().any(|a| a.kind == kind) {
        return Err(AccountError::AlreadyExists(kind));
    }
    if initial_balance > kind.max_deposit() {
        return Err(AccountError::CeilingExceeded {
            kind,
            ceiling: kind.max_deposit(),
        });
    }
    Ok(())
}

fn validate_closure(account: &BankAccount) -> Result<(), AccountError> {
    if account.is_current() {
        return Err(AccountError::CurrentAccountNotClosable);
    }
    if account.id.is_none() {
        return Err(AccountError::MissingAccountId(account.account_name.clone()));
    }
    if account.balance < 0.0 {
        return Err(AccountError::NegativeBalance);
    }
    Ok(())
}

impl MutationEngine {
    /// Open a savings account holding `initial_balance`.
    ///
    /// The user may hold one account of each type.
    pub async fn create_account(&self, kind: AccountType, initial_balance: f64) -> Result<BankAccount> {
        let result = async {
            validate_creation(&self.state.accounts(), kind, initial_balance)?;
            let created = self
                .repository
                .create_account(&BankAccount::draft(kind, initial_balance))
                .await
                .map_err(|e| AccountError::CreateFailed(e.to_string()))?;
            info!("Opened {} with {:.2} EUR", created.account_name, created.balance);
            self.state.upsert_accounts(std::slice::from_ref(&created));
            Ok::<_, anyhow::Error>(created)
        }
        .await;
        self.conclude(result, |a| format!("{} ouvert", a.account_name))
    }

    /// Close a savings account.
    ///
    /// A remaining balance is first sent to the current account, then the
    /// account is deleted. When the deletion fails the money stays on the
    /// current account.
    pub async fn close_account(&self, account: &BankAccount) -> Result<()> {
        let result = async {
            let account = account
                .id
                .as_ref()
                .and_then(|id| self.state.find_account(id))
                .unwrap_or_else(|| account.clone());
            validate_closure(&account)?;
            let id = account.id.clone().context("Account has no id")?;

            if account.balance > 0.0 {
                let current = self
                    .state
                    .current_account()
                    .ok_or(AccountError::NoCurrentAccount)?;
                debug!(
                    "Moving {:.2} EUR from {} to {} before closing",
                    account.balance, account.account_name, current.account_name
                );
                self.run_transfer(
                    account.clone(),
                    current,
                    account.balance,
                    TransferMode::Closure,
                    &mut |_: &TransferProgress| {},
                )
                .await?;
            }

            self.repository
                .delete_account(&id)
                .await
                .map_err(|e| AccountError::DeleteFailed(e.to_string()))?;
            self.state.remove_account(&id);
            info!("Closed {}", account.account_name);
            Ok::<_, anyhow::Error>(account)
        }
        .await;
        self.conclude(result, |a| format!("{} clôturé", a.account_name))
            .map(|_| ())
    }
}
