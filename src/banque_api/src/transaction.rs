use std::fmt;

use crate::{
    constants::{TRANSACTION_DATE_FORMAT, TRANSFER_CATEGORY_ID},
    types::{AccountId, HexColor},
};

/// Direction of a transaction.
///
/// The flag is authoritative. When none is stored it is derived from the
/// amount sign, so for every transaction the engine writes both agree:
/// `Expense` goes with a negative amount and `Income` with a positive one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn from_amount(amount: f64) -> Self {
        if amount >= 0.0 {
            TransactionType::Income
        } else {
            TransactionType::Expense
        }
    }

    pub fn wire_name(&self) -> &'static str {
        match self {
            TransactionType::Income => "INCOME",
            TransactionType::Expense => "EXPENSE",
        }
    }

    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "INCOME" => Some(TransactionType::Income),
            "EXPENSE" => Some(TransactionType::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionCategory {
    pub id: i32,
    pub name: String,
    /// Material icon name
    pub icon: String,
    pub color: HexColor,
}

impl TransactionCategory {
    fn new(id: i32, name: &str, icon: &str, color: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            icon: icon.to_string(),
            color: HexColor::parse_or_default(Some(color)),
        }
    }
}

/// Built-in categories, free-form ones may still come from the backend.
pub fn categories() -> Vec<TransactionCategory> {
    vec![
        TransactionCategory::new(1, "Nourriture", "restaurant", "#FF6B6B"),
        TransactionCategory::new(2, "Transport", "directions_car", "#4ECDC4"),
        TransactionCategory::new(3, "Shopping", "shopping_bag", "#45B7D1"),
        TransactionCategory::new(4, "Loisirs", "sports_esports", "#96CEB4"),
        TransactionCategory::new(5, "Salaire", "account_balance_wallet", "#FFEEAD"),
        TransactionCategory::new(6, "Autre", "more_horiz", "#FFD166"),
    ]
}

pub fn transfer_category() -> TransactionCategory {
    TransactionCategory::new(TRANSFER_CATEGORY_ID, "Virement", "swap_horiz", "#6200EE")
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Client-generated until the backend assigns its own
    pub id: String,
    pub title: String,
    /// Signed amount in euros
    pub amount: f64,
    /// Free-form date, producers disagree on the format
    pub date: String,
    pub category: TransactionCategory,
    pub kind: TransactionType,
    pub account_id: Option<AccountId>,
}

impl Transaction {
    /// Build a transaction whose direction follows the amount sign.
    pub fn new(
        title: &str,
        amount: f64,
        date: &str,
        category: TransactionCategory,
        account_id: Option<AccountId>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            amount,
            date: date.to_string(),
            category,
            kind: TransactionType::from_amount(amount),
            account_id,
        }
    }

    /// Outgoing leg of a transfer, dated today.
    pub fn debit(title: &str, amount: f64, account_id: Option<AccountId>) -> Self {
        Self::new(title, -amount.abs(), &today(), transfer_category(), account_id)
    }

    /// Incoming leg of a transfer, dated today.
    pub fn credit(title: &str, amount: f64, account_id: Option<AccountId>) -> Self {
        Self::new(title, amount.abs(), &today(), transfer_category(), account_id)
    }

    /// Amount signed according to the type flag, whatever sign was stored.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionType::Income => self.amount.abs(),
            TransactionType::Expense => -self.amount.abs(),
        }
    }

    pub fn belongs_to(&self, account_id: &AccountId) -> bool {
        self.account_id.as_ref() == Some(account_id)
    }
}

fn today() -> String {
    chrono::Local::now()
        .format(TRANSACTION_DATE_FORMAT)
        .to_string()
}
