use banque_api::account::AccountType;
use clap::{value_parser, Args, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Optional path to a settings JSON file
    #[arg(short, long, value_name = "FILE")]
    pub settings: Option<String>,

    /// Work on the bundled sample data instead of the bank API, changes are not kept between runs
    #[arg(long)]
    pub offline: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure the CLI
    Config(ConfigArgs),

    /// Log in with your email and password
    Login(LoginArgs),

    /// List your accounts
    Accounts(AccountsArgs),

    /// List your transactions
    Transactions(TransactionsArgs),

    /// Show your profile
    Profile,

    /// Transfer funds between your accounts
    Transfer(TransferArgs),

    /// Open a savings account
    Open(OpenArgs),

    /// Close a savings account, its balance goes back to the current account
    Close(CloseArgs),

    /// Delete a transaction from your history
    DeleteTransaction(DeleteTransactionArgs),
}

#[derive(Args)]
pub struct ConfigArgs {
    /// Base URL of the bank API (e.g: "http://localhost:3000")
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Email used to log in
    #[arg(long)]
    pub email: Option<String>,

    /// Timeout of the requests to the bank API, in seconds
    #[arg(long, value_name = "SECONDS", value_parser = value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,
}

#[derive(Args)]
pub struct LoginArgs {
    /// Email to log in with, defaults to the configured one
    #[arg(long)]
    pub email: Option<String>,
}

#[derive(Args)]
pub struct AccountsArgs {
    /// Only list your savings accounts
    #[arg(long)]
    pub savings: bool,
}

#[derive(Args)]
pub struct TransactionsArgs {
    /// Only list the transactions of this account, you can get its ID with the `banque accounts` command
    #[arg(long, value_name = "ID")]
    pub account: Option<String>,
}

#[derive(Args)]
pub struct TransferArgs {
    /// Source account type
    #[arg(long = "from", value_enum)]
    pub from_account: AccountType,

    /// Destination account type
    #[arg(long = "to", value_enum)]
    pub to_account: AccountType,

    /// Amount to transfer (e.g: "150", "1 250,40")
    #[arg(long, allow_hyphen_values = true)]
    pub amount: String,
}

#[derive(Args)]
pub struct OpenArgs {
    /// Type of the account to open
    #[arg(long = "type", value_enum)]
    pub kind: AccountType,

    /// Initial balance of the account
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub deposit: f64,
}

#[derive(Args)]
pub struct CloseArgs {
    /// Type of the account to close
    #[arg(long = "type", value_enum)]
    pub kind: AccountType,
}

#[derive(Args)]
pub struct DeleteTransactionArgs {
    /// ID of the transaction, you can get it with the `banque transactions` command
    #[arg(long)]
    pub id: String,
}
