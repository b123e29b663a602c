use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    constants::{DEFAULT_CURRENCY, LIVRET_A_CEILING, LIVRET_JEUNE_CEILING, PEL_CEILING},
    types::{AccountId, HexColor, ValueError},
};

/// Type of account
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum AccountType {
    /// Checking account, no deposit ceiling
    Current,
    LivretA,
    LivretJeune,
    /// Plan d'épargne logement, no partial withdrawal
    Pel,
}

impl AccountType {
    pub const SAVINGS: [AccountType; 3] = [
        AccountType::LivretA,
        AccountType::LivretJeune,
        AccountType::Pel,
    ];

    /// Maximum balance allowed for this type of account.
    pub fn max_deposit(&self) -> f64 {
        match self {
            AccountType::Current => f64::MAX,
            AccountType::LivretA => LIVRET_A_CEILING,
            AccountType::LivretJeune => LIVRET_JEUNE_CEILING,
            AccountType::Pel => PEL_CEILING,
        }
    }

    pub fn is_savings(&self) -> bool {
        *self != AccountType::Current
    }

    pub fn allows_partial_withdrawal(&self) -> bool {
        *self != AccountType::Pel
    }

    pub fn label(&self) -> &'static str {
        match self {
            AccountType::Current => "Compte Courant",
            AccountType::LivretA => "Livret A",
            AccountType::LivretJeune => "Livret Jeune",
            AccountType::Pel => "PEL",
        }
    }

    /// Name used by the REST backend.
    pub fn wire_name(&self) -> &'static str {
        match self {
            AccountType::Current => "CURRENT_ACCOUNT",
            AccountType::LivretA => "LIVRET_A",
            AccountType::LivretJeune => "LIVRET_JEUNE",
            AccountType::Pel => "PEL",
        }
    }

    pub fn from_wire(raw: &str) -> Result<Self, ValueError> {
        match raw.trim().to_uppercase().as_str() {
            "CURRENT" | "CURRENT_ACCOUNT" => Ok(AccountType::Current),
            "LIVRET_A" => Ok(AccountType::LivretA),
            "LIVRET_JEUNE" => Ok(AccountType::LivretJeune),
            "PEL" => Ok(AccountType::Pel),
            _ => Err(ValueError::AccountType(raw.to_string())),
        }
    }

    pub fn color(&self) -> HexColor {
        let hex = match self {
            AccountType::Current => "#6200EE",
            AccountType::LivretA => "#1E88E5",
            AccountType::LivretJeune => "#43A047",
            AccountType::Pel => "#FB8C00",
        };
        HexColor::new(hex).unwrap_or_default()
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A bank account
#[derive(Debug, Clone, PartialEq)]
pub struct BankAccount {
    /// Server-assigned id, `None` until the account is persisted
    pub id: Option<AccountId>,
    pub account_number: String,
    pub account_name: String,
    /// Balance in euros
    pub balance: f64,
    pub kind: AccountType,
    pub currency: String,
    pub color: HexColor,
}

impl BankAccount {
    /// A not-yet-persisted account with the defaults of its type.
    pub fn draft(kind: AccountType, balance: f64) -> Self {
        Self {
            id: None,
            account_number: generate_account_number(),
            account_name: kind.label().to_string(),
            balance,
            kind,
            currency: DEFAULT_CURRENCY.to_string(),
            color: kind.color(),
        }
    }

    pub fn max_deposit(&self) -> f64 {
        self.kind.max_deposit()
    }

    pub fn is_current(&self) -> bool {
        self.kind == AccountType::Current
    }

    pub fn with_balance(&self, balance: f64) -> Self {
        Self {
            balance,
            ..self.clone()
        }
    }

    /// Two projections of the same persisted account
    pub fn same_as(&self, other: &BankAccount) -> bool {
        matches!((&self.id, &other.id), (Some(a), Some(b)) if a == b)
    }
}

/// Accounts of a user, one slot per type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserAccounts {
    pub current_account: Option<BankAccount>,
    pub livret_a: Option<BankAccount>,
    pub livret_jeune: Option<BankAccount>,
    pub pel: Option<BankAccount>,
}

impl From<&[BankAccount]> for UserAccounts {
    fn from(accounts: &[BankAccount]) -> Self {
        let find = |kind: AccountType| accounts.iter().find(|a| a.kind == kind).cloned();
        Self {
            current_account: find(AccountType::Current),
            livret_a: find(AccountType::LivretA),
            livret_jeune: find(AccountType::LivretJeune),
            pel: find(AccountType::Pel),
        }
    }
}

pub fn find_current(accounts: &[BankAccount]) -> Option<BankAccount> {
    accounts.iter().find(|a| a.is_current()).cloned()
}

/// Pseudo IBAN-looking number, e.g. `FR76 1234 5678 9012 3456 7890 123`.
pub fn generate_account_number() -> String {
    let digits = format!("{:023}", uuid::Uuid::new_v4().as_u128() % 10u128.pow(23));
    let groups = digits
        .as_bytes()
        .chunks(4)
        .map(|c| String::from_utf8_lossy(c).into_owned())
        .collect::<Vec<_>>();
    format!("FR76 {}", groups.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ceilings() {
        assert_eq!(AccountType::Current.max_deposit(), f64::MAX);
        assert_eq!(AccountType::LivretA.max_deposit(), 22_950.0);
        assert_eq!(AccountType::LivretJeune.max_deposit(), 1_600.0);
        assert_eq!(AccountType::Pel.max_deposit(), 61_200.0);
        assert!(!AccountType::Pel.allows_partial_withdrawal());
        assert!(AccountType::LivretA.allows_partial_withdrawal());
    }

    #[test]
    fn test_wire_names() {
        assert_eq!(AccountType::from_wire("current").unwrap(), AccountType::Current);
        assert_eq!(
            AccountType::from_wire("CURRENT_ACCOUNT").unwrap(),
            AccountType::Current
        );
        assert_eq!(AccountType::from_wire("livret_a").unwrap(), AccountType::LivretA);
        assert!(AccountType::from_wire("PEA").is_err());
        for kind in AccountType::SAVINGS {
            assert_eq!(AccountType::from_wire(kind.wire_name()).unwrap(), kind);
        }
    }

    #[test]
    fn test_generate_account_number() {
        let number = generate_account_number();
        assert!(number.starts_with("FR76 "));
        assert_eq!(number.len(), "FR76 1234 5678 9012 3456 7890 123".len());
        assert!(number[5..].chars().all(|c| c.is_ascii_digit() || c == ' '));
    }

    #[test]
    fn test_user_accounts() {
        let accounts = vec![
            BankAccount::draft(AccountType::Current, 10.0),
            BankAccount::draft(AccountType::Pel, 20.0),
        ];
        let grouped = UserAccounts::from(accounts.as_slice());
        assert_eq!(grouped.current_account.unwrap().balance, 10.0);
        assert_eq!(grouped.pel.unwrap().balance, 20.0);
        assert!(grouped.livret_a.is_none());
        assert!(grouped.livret_jeune.is_none());
    }
}
