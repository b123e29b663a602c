use anyhow::{Context, Result};
use serde::Deserialize;

use crate::{
    account::{AccountType, BankAccount},
    client::models::{AccountRecord, ProfileRecord, TransactionRecord},
    constants::{DEFAULT_CURRENCY, SAMPLE_DATA},
    types::Email,
    user::User,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Credential {
    pub email: String,
    pub password: String,
}

/// Data bundled with the app, used when the backend is unreachable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SampleData {
    #[serde(default)]
    pub users: Vec<Credential>,
    #[serde(default)]
    pub profiles: Vec<ProfileRecord>,
    #[serde(default)]
    pub accounts: Vec<AccountRecord>,
    #[serde(default)]
    pub transactions: Vec<TransactionRecord>,
}

impl SampleData {
    pub fn bundled() -> Result<Self> {
        Self::from_json(SAMPLE_DATA)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize sample data")
    }

    /// Profile of the given email, or the first one when nobody is logged in.
    pub fn profile_for(&self, email: Option<&Email>) -> Option<User> {
        let profile = match email {
            Some(email) => self.profiles.iter().find(|p| email.matches(&p.email)),
            None => self.profiles.first(),
        };
        profile.cloned().map(ProfileRecord::into_user)
    }
}

/// Last resort profile when neither the backend nor the sample data know the user.
pub fn dummy_user() -> User {
    User {
        id: "1".to_string(),
        name: "John Doe".to_string(),
        email: "john.doe@example.com".to_string(),
        phone: "+33612345678".to_string(),
        accounts: vec![BankAccount {
            id: None,
            account_number: "FR76 3000 1007 1600 0000 0000 123".to_string(),
            account_name: AccountType::Current.label().to_string(),
            balance: 1250.50,
            kind: AccountType::Current,
            currency: DEFAULT_CURRENCY.to_string(),
            color: AccountType::Current.color(),
        }],
        profile_picture: None,
    }
}
