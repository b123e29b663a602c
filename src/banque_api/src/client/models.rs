use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    account::{AccountType, BankAccount},
    constants::DEFAULT_CURRENCY,
    transaction::{Transaction, TransactionCategory, TransactionType},
    types::{AccountId, HexColor, ValueError},
    user::User,
};

/// Identifier as found on the wire, json-server style backends use numbers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireId {
    Number(i64),
    Text(String),
}

impl fmt::Display for WireId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireId::Number(n) => write!(f, "{}", n),
            WireId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl WireId {
    pub fn to_account_id(&self) -> Option<AccountId> {
        AccountId::new(&self.to_string()).ok()
    }

    pub fn matches(&self, id: &str) -> bool {
        self.to_string() == id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
    pub id: WireId,
    pub account_number: String,
    pub account_name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: Option<String>,
    pub color: Option<String>,
}

impl AccountRecord {
    /// Convert into a domain account, unknown account types are rejected.
    pub fn into_account(self) -> Result<BankAccount, ValueError> {
        let kind = AccountType::from_wire(&self.kind)?;
        Ok(BankAccount {
            id: self.id.to_account_id(),
            account_number: self.account_number,
            account_name: self.account_name,
            balance: self.balance,
            kind,
            currency: self.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            color: HexColor::parse_or_default(self.color.as_deref()),
        })
    }
}

/// Body of `POST /accounts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDraft {
    pub account_number: String,
    pub account_name: String,
    pub balance: f64,
    #[serde(rename = "type")]
    pub kind: String,
    pub currency: Option<String>,
    pub color: Option<String>,
}

impl AccountDraft {
    pub fn into_record(self, id: WireId) -> AccountRecord {
        AccountRecord {
            id,
            account_number: self.account_number,
            account_name: self.account_name,
            balance: self.balance,
            kind: self.kind,
            currency: self.currency,
            color: self.color,
        }
    }
}

impl From<&BankAccount> for AccountDraft {
    fn from(account: &BankAccount) -> Self {
        Self {
            account_number: account.account_number.clone(),
            account_name: account.account_name.clone(),
            balance: account.balance,
            kind: account.kind.wire_name().to_string(),
            currency: Some(account.currency.clone()),
            color: Some(account.color.to_string()),
        }
    }
}

/// Body of `PATCH /accounts/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceUpdate {
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: i32,
    pub name: String,
    pub icon: String,
    pub color: String,
}

impl From<CategoryRecord> for TransactionCategory {
    fn from(record: CategoryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            icon: record.icon,
            color: HexColor::parse_or_default(Some(&record.color)),
        }
    }
}

impl From<&TransactionCategory> for CategoryRecord {
    fn from(category: &TransactionCategory) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            icon: category.icon.clone(),
            color: category.color.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub id: WireId,
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category: CategoryRecord,
    #[serde(rename = "type")]
    pub kind: String,
    pub account_id: Option<WireId>,
}

impl TransactionRecord {
    pub fn into_transaction(self) -> Transaction {
        let kind = TransactionType::from_wire(&self.kind)
            .unwrap_or_else(|| TransactionType::from_amount(self.amount));
        Transaction {
            id: self.id.to_string(),
            title: self.title,
            amount: self.amount,
            date: self.date,
            category: self.category.into(),
            kind,
            account_id: self.account_id.and_then(|id| id.to_account_id()),
        }
    }
}

/// Body of `POST /transactions`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDraft {
    pub title: String,
    pub amount: f64,
    pub date: String,
    pub category: CategoryRecord,
    #[serde(rename = "type")]
    pub kind: String,
    pub account_id: Option<String>,
}

impl TransactionDraft {
    pub fn into_record(self, id: WireId) -> TransactionRecord {
        TransactionRecord {
            id,
            title: self.title,
            amount: self.amount,
            date: self.date,
            category: self.category,
            kind: self.kind,
            account_id: self.account_id.map(WireId::Text),
        }
    }
}

impl From<&Transaction> for TransactionDraft {
    fn from(transaction: &Transaction) -> Self {
        Self {
            title: transaction.title.clone(),
            amount: transaction.amount,
            date: transaction.date.clone(),
            category: (&transaction.category).into(),
            kind: transaction.kind.wire_name().to_string(),
            account_id: transaction.account_id.as_ref().map(|id| id.to_string()),
        }
    }
}

/// A profile as served by `GET /profiles`, it only knows the current account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileRecord {
    pub id: WireId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub balance: f64,
    pub account_number: String,
}

impl ProfileRecord {
    pub fn into_user(self) -> User {
        let current = BankAccount {
            id: None,
            account_number: self.account_number,
            account_name: AccountType::Current.label().to_string(),
            balance: self.balance,
            kind: AccountType::Current,
            currency: DEFAULT_CURRENCY.to_string(),
            color: AccountType::Current.color(),
        };
        User {
            id: self.id.to_string(),
            name: self.name,
            email: self.email,
            phone: self.phone,
            accounts: vec![current],
            profile_picture: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_record_from_json() {
        let json = r##"[
            {"id": 1, "accountNumber": "FR76 0001", "accountName": "Compte Courant", "balance": 1250.5, "type": "CURRENT_ACCOUNT", "currency": "EUR", "color": "#6200ee"},
            {"id": "a2", "accountNumber": "FR76 0002", "accountName": "Livret A", "balance": 300, "type": "LIVRET_A"},
            {"id": 3, "accountNumber": "FR76 0003", "accountName": "PEA", "balance": 10, "type": "PEA"}
        ]"##;
        let records: Vec<AccountRecord> = serde_json::from_str(json).unwrap();
        let accounts: Vec<_> = records
            .into_iter()
            .filter_map(|r| r.into_account().ok())
            .collect();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0].id.as_ref().unwrap().as_str(), "1");
        assert_eq!(accounts[0].kind, AccountType::Current);
        assert_eq!(accounts[0].color.as_str(), "#6200EE");
        assert_eq!(accounts[1].id.as_ref().unwrap().as_str(), "a2");
        assert_eq!(accounts[1].currency, "EUR");
        assert_eq!(accounts[1].balance, 300.0);
    }

    #[test]
    fn test_transaction_record_direction() {
        let json = r##"{"id": 9, "title": "Remboursement", "amount": 20, "date": "12/03/2024",
            "category": {"id": 6, "name": "Autre", "icon": "more_horiz", "color": "#FFD166"},
            "type": "EXPENSE", "accountId": 1}"##;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        let transaction = record.into_transaction();
        assert_eq!(transaction.id, "9");
        assert_eq!(transaction.kind, TransactionType::Expense);
        assert_eq!(transaction.signed_amount(), -20.0);
        assert_eq!(transaction.account_id.unwrap().as_str(), "1");

        let json = r##"{"id": "x", "title": "Cadeau", "amount": -5, "date": "2024-03-12",
            "category": {"id": 12, "name": "Cadeaux", "icon": "gift", "color": "bad"},
            "type": "?"}"##;
        let transaction = serde_json::from_str::<TransactionRecord>(json)
            .unwrap()
            .into_transaction();
        assert_eq!(transaction.kind, TransactionType::Expense);
        assert_eq!(transaction.category.name, "Cadeaux");
        assert_eq!(transaction.category.color, HexColor::default());
        assert!(transaction.account_id.is_none());
    }

    #[test]
    fn test_drafts_serialize_camel_case() {
        let account = BankAccount::draft(AccountType::LivretJeune, 100.0);
        let body = serde_json::to_value(AccountDraft::from(&account)).unwrap();
        assert_eq!(body["type"], "LIVRET_JEUNE");
        assert_eq!(body["accountName"], "Livret Jeune");
        assert_eq!(body["color"], "#43A047");

        let id = AccountId::new("7").unwrap();
        let debit = Transaction::debit("Virement", 10.0, Some(id));
        let body = serde_json::to_value(TransactionDraft::from(&debit)).unwrap();
        assert_eq!(body["type"], "EXPENSE");
        assert_eq!(body["accountId"], "7");
        assert_eq!(body["amount"], -10.0);
    }

    #[test]
    fn test_profile_into_user() {
        let json = r#"{"id": 1, "name": "Jane", "email": "jane@example.com", "phone": "+33600000000", "balance": 42.0, "accountNumber": "FR76 9"}"#;
        let user = serde_json::from_str::<ProfileRecord>(json).unwrap().into_user();
        assert_eq!(user.accounts.len(), 1);
        let current = user.current_account().unwrap();
        assert_eq!(current.balance, 42.0);
        assert!(current.id.is_none());
    }
}
