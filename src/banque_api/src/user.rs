use crate::account::{find_current, BankAccount, UserAccounts};

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub accounts: Vec<BankAccount>,
    pub profile_picture: Option<String>,
}

impl User {
    pub fn current_account(&self) -> Option<BankAccount> {
        find_current(&self.accounts)
    }

    pub fn grouped_accounts(&self) -> UserAccounts {
        UserAccounts::from(self.accounts.as_slice())
    }
}
