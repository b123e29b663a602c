use thiserror::Error;
use tracing::{debug, info};

use crate::{sample::SampleData, types::Email};

#[derive(Debug, Error, PartialEq)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Who is logged in, passed explicitly to whatever needs it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub email: Option<Email>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn for_email(email: Email) -> Self {
        Self { email: Some(email) }
    }
}

/// Check credentials against the bundled users.
///
/// # Arguments
///
/// * `sample` - Bundled data holding the known users.
/// * `email` - Matched case-insensitively.
/// * `password` - Matched exactly.
///
/// # Returns
///
/// A session for the user if the credentials match.
pub fn authenticate(sample: &SampleData, email: &Email, password: &str) -> Result<Session, AuthError> {
    let known = sample
        .users
        .iter()
        .any(|u| email.matches(&u.email) && u.password == password);
    if known {
        info!("🔓 Logged in as {}", email);
        Ok(Session::for_email(email.clone()))
    } else {
        debug!("Rejected credentials for {}", email);
        Err(AuthError::InvalidCredentials)
    }
}
