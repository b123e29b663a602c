use anyhow::{bail, Context, Result};
use futures_util::{pin_mut, stream::Stream, StreamExt};
use tracing::{debug, info};

use crate::{
    account::BankAccount,
    engine::{error::TransferError, MutationEngine},
    transaction::Transaction,
    types::Amount,
};

/// Which rules a transfer goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferMode {
    /// A transfer asked for by the user
    Standard,
    /// Emptying a savings account before closing it, savings-to-savings is not checked
    Closure,
}

/// Everything a completed transfer persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferReceipt {
    pub source: BankAccount,
    pub destination: BankAccount,
    pub debit: Transaction,
    pub credit: Transaction,
    pub amount: f64,
}

#[derive(Debug, Clone)]
pub enum TransferProgress {
    Validating,
    UpdatingBalances,
    RecordingDebit,
    RecordingCredit,
    Completed(TransferReceipt),
}

impl TransferProgress {
    pub fn step_number(&self) -> u8 {
        match self {
            TransferProgress::Validating => 1,
            TransferProgress::UpdatingBalances => 2,
            TransferProgress::RecordingDebit => 3,
            TransferProgress::RecordingCredit => 4,
            TransferProgress::Completed(_) => 5,
        }
    }

    pub fn total_steps() -> u8 {
        5
    }

    pub fn description(&self) -> &str {
        match self {
            TransferProgress::Validating => "Validating transfer",
            TransferProgress::UpdatingBalances => "Updating balances",
            TransferProgress::RecordingDebit => "Recording debit",
            TransferProgress::RecordingCredit => "Recording credit",
            TransferProgress::Completed(_) => "Transfer completed",
        }
    }
}

/// Check a transfer against the account rules, the first broken rule wins.
pub fn validate_transfer(
    source: &BankAccount,
    destination: &BankAccount,
    amount: f64,
    mode: TransferMode,
) -> Result<(), TransferError> {
    if source.same_as(destination) {
        return Err(TransferError::SameAccount);
    }
    if amount.is_nan() || amount <= 0.0 {
        return Err(TransferError::NonPositiveAmount);
    }
    if source.balance < amount {
        return Err(TransferError::InsufficientFunds {
            available: source.balance,
        });
    }
    if destination.kind.is_savings() && destination.balance + amount > destination.max_deposit() {
        return Err(TransferError::CeilingExceeded {
            kind: destination.kind,
            ceiling: destination.max_deposit(),
        });
    }
    if mode == TransferMode::Standard && !source.is_current() && !destination.is_current() {
        return Err(TransferError::SavingsToSavings);
    }
    if !source.kind.allows_partial_withdrawal() && amount < source.balance {
        return Err(TransferError::PartialPelWithdrawal);
    }
    for account in [source, destination] {
        if account.id.is_none() {
            return Err(TransferError::MissingAccountId(account.account_name.clone()));
        }
    }
    Ok(())
}

impl MutationEngine {
    /// Move `amount` from `source` to `destination`, yielding progress updates
    ///
    /// Balances are persisted first, then the debit and the credit
    /// transactions. The first failing step ends the stream with an error;
    /// what was persisted before it stays as is.
    ///
    /// The stream does not touch the state holder, see [`MutationEngine::make_transfer`].
    pub fn transfer_funds(
        &self,
        source: BankAccount,
        destination: BankAccount,
        amount: f64,
        mode: TransferMode,
    ) -> impl Stream<Item = Result<TransferProgress>> + '_ {
        async_stream::stream! {
            yield Ok(TransferProgress::Validating);
            if let Err(e) = validate_transfer(&source, &destination, amount, mode) {
                debug!("Transfer rejected: {}", e);
                yield Err(e.into());
                return;
            }

            debug!(
                "Transferring {:.2} EUR from {} to {}",
                amount, source.account_name, destination.account_name
            );
            let source = source.with_balance(source.balance - amount);
            let destination = destination.with_balance(destination.balance + amount);

            yield Ok(TransferProgress::UpdatingBalances);
            if let Err(e) = self
                .repository
                .update_accounts(&[source.clone(), destination.clone()])
                .await
            {
                yield Err(TransferError::UpdateBalancesFailed(e.to_string()).into());
                return;
            }

            yield Ok(TransferProgress::RecordingDebit);
            let debit = Transaction::debit(
                &format!("Virement vers {}", destination.account_name),
                amount,
                source.id.clone(),
            );
            let debit = match self.repository.add_transaction(&debit).await {
                Ok(t) => t,
                Err(e) => {
                    yield Err(TransferError::RecordDebitFailed(e.to_string()).into());
                    return;
                }
            };

            yield Ok(TransferProgress::RecordingCredit);
            let credit = Transaction::credit(
                &format!("Virement de {}", source.account_name),
                amount,
                destination.id.clone(),
            );
            let credit = match self.repository.add_transaction(&credit).await {
                Ok(t) => t,
                Err(e) => {
                    yield Err(TransferError::RecordCreditFailed(e.to_string()).into());
                    return;
                }
            };

            info!(
                "Transferred {:.2} EUR from {} to {}",
                amount, source.account_name, destination.account_name
            );
            yield Ok(TransferProgress::Completed(TransferReceipt {
                source,
                destination,
                debit,
                credit,
                amount,
            }));
        }
    }

    /// Submit the transfer form held by the state holder.
    ///
    /// Selected accounts are refreshed from the projection so the rules see
    /// the latest balances. The form is cleared once the transfer went through.
    pub async fn make_transfer(
        &self,
        mut on_progress: impl FnMut(&TransferProgress),
    ) -> Result<TransferReceipt> {
        let result = async {
            let input = self.state.transfer_input();
            let (Some(source), Some(target)) = (input.source, input.target) else {
                bail!(TransferError::NoAccountSelected);
            };
            let amount: Amount = input
                .amount
                .parse()
                .map_err(|_| TransferError::InvalidAmount(input.amount.clone()))?;
            let source = self.latest(source);
            let target = self.latest(target);
            self.run_transfer(source, target, amount.get(), TransferMode::Standard, &mut on_progress)
                .await
        }
        .await;
        if result.is_ok() {
            self.state.reset_transfer_input();
        }
        self.conclude(result, |r| format!("Virement de {:.2} € effectué", r.amount))
    }

    /// Drive [`MutationEngine::transfer_funds`] to its end and apply the
    /// receipt to the projection.
    pub(crate) async fn run_transfer(
        &self,
        source: BankAccount,
        destination: BankAccount,
        amount: f64,
        mode: TransferMode,
        on_progress: &mut dyn FnMut(&TransferProgress),
    ) -> Result<TransferReceipt> {
        let stream = self.transfer_funds(source, destination, amount, mode);
        pin_mut!(stream);

        let mut receipt = None;
        while let Some(progress) = stream.next().await {
            let progress = progress?;
            on_progress(&progress);
            if let TransferProgress::Completed(r) = progress {
                receipt = Some(r);
            }
        }
        let receipt = receipt.context("Transfer stream ended before completing")?;

        self.state
            .upsert_accounts(&[receipt.source.clone(), receipt.destination.clone()]);
        self.state
            .push_transactions(vec![receipt.debit.clone(), receipt.credit.clone()]);
        Ok(receipt)
    }

    fn latest(&self, account: BankAccount) -> BankAccount {
        account
            .id
            .as_ref()
            .and_then(|id| self.state.find_account(id))
            .unwrap_or(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{account::AccountType, types::AccountId};

    fn account(id: &str, kind: AccountType, balance: f64) -> BankAccount {
        BankAccount {
            id: Some(AccountId::new(id).unwrap()),
            ..BankAccount::draft(kind, balance)
        }
    }

    fn check(source: &BankAccount, destination: &BankAccount, amount: f64) -> Result<(), TransferError> {
        validate_transfer(source, destination, amount, TransferMode::Standard)
    }

    #[test]
    fn test_amount_must_be_positive() {
        let current = account("1", AccountType::Current, 100.0);
        let livret = account("2", AccountType::LivretA, 0.0);
        assert_eq!(check(&current, &livret, 0.0), Err(TransferError::NonPositiveAmount));
        assert_eq!(check(&current, &livret, -5.0), Err(TransferError::NonPositiveAmount));
        assert_eq!(check(&current, &livret, f64::NAN), Err(TransferError::NonPositiveAmount));
    }

    #[test]
    fn test_insufficient_funds() {
        let current = account("1", AccountType::Current, 100.0);
        let livret = account("2", AccountType::LivretA, 0.0);
        assert_eq!(
            check(&current, &livret, 100.01),
            Err(TransferError::InsufficientFunds { available: 100.0 })
        );
        assert!(check(&current, &livret, 100.0).is_ok());
    }

    #[test]
    fn test_savings_ceiling() {
        let current = account("1", AccountType::Current, 5000.0);
        let jeune = account("2", AccountType::LivretJeune, 1500.0);
        assert!(check(&current, &jeune, 100.0).is_ok());
        assert_eq!(
            check(&current, &jeune, 100.01),
            Err(TransferError::CeilingExceeded {
                kind: AccountType::LivretJeune,
                ceiling: 1600.0
            })
        );
        // the current account has no ceiling
        let livret = account("3", AccountType::LivretA, 3000.0);
        assert!(check(&livret, &account("4", AccountType::Current, 1e12), 10.0).is_ok());
    }

    #[test]
    fn test_savings_to_savings() {
        let livret = account("1", AccountType::LivretA, 300.0);
        let jeune = account("2", AccountType::LivretJeune, 0.0);
        assert_eq!(check(&livret, &jeune, 100.0), Err(TransferError::SavingsToSavings));
        assert!(validate_transfer(&livret, &jeune, 100.0, TransferMode::Closure).is_ok());
    }

    #[test]
    fn test_savings_to_savings_is_never_allowed() {
        for from in AccountType::SAVINGS {
            for to in AccountType::SAVINGS {
                if from == to {
                    continue;
                }
                for amount in [10.0, 500.0, 5000.0, 100_000.0] {
                    let source = account("1", from, 1000.0);
                    let destination = account("2", to, 0.0);
                    let result = check(&source, &destination, amount);
                    assert!(
                        matches!(
                            result,
                            Err(TransferError::SavingsToSavings
                                | TransferError::InsufficientFunds { .. }
                                | TransferError::CeilingExceeded { .. })
                        ),
                        "{from:?} -> {to:?} for {amount}: {result:?}"
                    );
                    if amount <= 1000.0 && amount <= to.max_deposit() {
                        assert_eq!(result, Err(TransferError::SavingsToSavings));
                    }
                }
            }
        }
    }

    #[test]
    fn test_pel_only_full_withdrawal() {
        let pel = account("1", AccountType::Pel, 500.0);
        let current = account("2", AccountType::Current, 0.0);
        assert_eq!(check(&pel, &current, 200.0), Err(TransferError::PartialPelWithdrawal));
        assert!(check(&pel, &current, 500.0).is_ok());
    }

    #[test]
    fn test_first_failing_rule_wins() {
        // both insufficient funds and savings to savings
        let livret = account("1", AccountType::LivretA, 10.0);
        let pel = account("2", AccountType::Pel, 0.0);
        assert_eq!(
            check(&livret, &pel, 20.0),
            Err(TransferError::InsufficientFunds { available: 10.0 })
        );
    }

    #[test]
    fn test_same_account_and_missing_ids() {
        let current = account("1", AccountType::Current, 100.0);
        assert_eq!(check(&current, &current, 10.0), Err(TransferError::SameAccount));

        let unsaved = BankAccount::draft(AccountType::LivretA, 0.0);
        assert_eq!(
            check(&current, &unsaved, 10.0),
            Err(TransferError::MissingAccountId("Livret A".to_string()))
        );
    }

    #[test]
    fn test_progress_steps() {
        assert_eq!(TransferProgress::Validating.step_number(), 1);
        assert_eq!(TransferProgress::RecordingCredit.step_number(), 4);
        assert_eq!(TransferProgress::total_steps(), 5);
        assert_eq!(TransferProgress::UpdatingBalances.description(), "Updating balances");
    }
}
