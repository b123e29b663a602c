pub mod bank;
pub mod session;

pub use bank::{BankService, DefaultGatewayFactory, GatewayFactory};
pub use session::{CredentialsProvider, SessionService, StdinCredentialsProvider};
