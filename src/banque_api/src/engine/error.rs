use thiserror::Error;

use crate::account::AccountType;

/// Rejection or failure of a transfer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TransferError {
    #[error("Please select a source and a destination account")]
    NoAccountSelected,
    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),
    #[error("The amount must be greater than zero")]
    NonPositiveAmount,
    #[error("Insufficient funds: {available:.2} € available")]
    InsufficientFunds { available: f64 },
    #[error("{kind} ceiling exceeded: the balance cannot go above {ceiling:.2} €")]
    CeilingExceeded { kind: AccountType, ceiling: f64 },
    #[error("Transfers between two savings accounts are not allowed, go through the current account")]
    SavingsToSavings,
    #[error("Partial withdrawals from a PEL are not allowed, the full balance must be withdrawn")]
    PartialPelWithdrawal,
    #[error("Source and destination must be different accounts")]
    SameAccount,
    #[error("Account {0} has not been saved yet")]
    MissingAccountId(String),
    #[error("Updating the account balances failed: {0}")]
    UpdateBalancesFailed(String),
    #[error("Recording the debit transaction failed: {0}")]
    RecordDebitFailed(String),
    #[error("Recording the credit transaction failed: {0}")]
    RecordCreditFailed(String),
}

/// Rejection or failure of an account creation or closure.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AccountError {
    #[error("The initial balance cannot be negative")]
    NegativeInitialBalance,
    #[error("You already have a {0}")]
    AlreadyExists(AccountType),
    #[error("The initial balance exceeds the {kind} ceiling of {ceiling:.2} €")]
    CeilingExceeded { kind: AccountType, ceiling: f64 },
    #[error("The current account cannot be closed")]
    CurrentAccountNotClosable,
    #[error("Account {0} has not been saved yet")]
    MissingAccountId(String),
    #[error("An overdrawn account cannot be closed")]
    NegativeBalance,
    #[error("No current account to receive the remaining balance")]
    NoCurrentAccount,
    #[error("Account {0} is no longer known")]
    UnknownAccount(String),
    #[error("Creating the account failed: {0}")]
    CreateFailed(String),
    #[error("Closing the account failed: {0}")]
    DeleteFailed(String),
}
