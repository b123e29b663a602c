use anyhow::Result;
use std::io::{stdout, Write};
use tracing::{info, warn};

use crate::settings::{Settings, SettingsStore};
use banque_api::{
    auth::{authenticate, Session},
    sample::SampleData,
    types::Email,
};

pub trait CredentialsProvider {
    fn read_password(&self) -> Result<String>;
}
pub struct StdinCredentialsProvider;
impl CredentialsProvider for StdinCredentialsProvider {
    fn read_password(&self) -> Result<String> {
        print!("\nEnter your password (hidden): ");
        let _ = stdout().flush();
        let password = rpassword::read_password()?;
        println!();
        Ok(password)
    }
}

/// Session of the email saved in the settings, anonymous without one.
pub fn session_from(settings: &Settings) -> Session {
    match settings.email.as_deref().map(Email::new) {
        Some(Ok(email)) => Session::for_email(email),
        Some(Err(e)) => {
            warn!("Ignoring the saved email: {}", e);
            Session::anonymous()
        }
        None => Session::anonymous(),
    }
}

pub struct SessionService<'a> {
    settings_store: &'a dyn SettingsStore,
    credentials_provider: Box<dyn CredentialsProvider>,
    sample: SampleData,
}

impl<'a> SessionService<'a> {
    pub fn new(
        settings_store: &'a dyn SettingsStore,
        credentials_provider: Box<dyn CredentialsProvider>,
        sample: SampleData,
    ) -> Self {
        Self {
            settings_store,
            credentials_provider,
            sample,
        }
    }

    pub fn with_defaults(settings_store: &'a dyn SettingsStore) -> Result<Self> {
        Ok(Self::new(
            settings_store,
            Box::new(StdinCredentialsProvider),
            SampleData::bundled()?,
        ))
    }

    /// Check the password of `email` (or of the saved email) and remember who logged in.
    pub async fn login(&self, email: Option<String>) -> Result<Option<Session>> {
        let settings = self.settings_store.load()?;
        let Some(raw_email) = email.or_else(|| settings.email.clone()) else {
            warn!("No email given, please run `banque login --email <email>`");
            return Ok(None);
        };
        let email = Email::new(&raw_email)?;

        info!("We'll try to log you in as {}", email);
        let password = self.credentials_provider.read_password()?;
        let session = authenticate(&self.sample, &email, &password)?;

        self.settings_store.save(&Settings {
            email: Some(email.to_string()),
            ..settings
        })?;
        info!("Login successful ✅");
        Ok(Some(session))
    }
}
