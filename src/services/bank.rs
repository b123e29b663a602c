use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

use crate::{
    services::session::session_from,
    settings::{Settings, SettingsStore},
};
use banque_api::{
    client::{memory::MemoryGateway, rest::RestGateway, Gateway},
    engine::MutationEngine,
    get_engine,
    sample::SampleData,
};

pub trait GatewayFactory {
    fn new_gateway(&self, settings: &Settings) -> Result<Arc<dyn Gateway>>;
}

/// REST gateway when an API URL is configured, bundled sample data otherwise.
pub struct DefaultGatewayFactory {
    pub offline: bool,
}
impl GatewayFactory for DefaultGatewayFactory {
    fn new_gateway(&self, settings: &Settings) -> Result<Arc<dyn Gateway>> {
        match settings.api_url.as_deref() {
            Some(url) if !self.offline => {
                debug!("Using the bank API at {}", url);
                Ok(Arc::new(RestGateway::new(url, settings.timeout())?))
            }
            _ => {
                info!(
                    "Working offline on the bundled sample data, changes are lost when the command ends"
                );
                Ok(Arc::new(MemoryGateway::from_sample(&SampleData::bundled()?)))
            }
        }
    }
}

pub struct BankService<'a> {
    settings_store: &'a dyn SettingsStore,
    gateway_factory: Box<dyn GatewayFactory>,
}

impl<'a> BankService<'a> {
    pub fn new(settings_store: &'a dyn SettingsStore, gateway_factory: Box<dyn GatewayFactory>) -> Self {
        Self {
            settings_store,
            gateway_factory,
        }
    }

    pub fn with_defaults(settings_store: &'a dyn SettingsStore, offline: bool) -> Self {
        Self::new(settings_store, Box::new(DefaultGatewayFactory { offline }))
    }

    /// Engine for the saved session, with user, accounts and transactions loaded.
    pub async fn connect(&self) -> Result<MutationEngine> {
        let settings = self.settings_store.load()?;
        let gateway = self.gateway_factory.new_gateway(&settings)?;
        let engine = get_engine(gateway, session_from(&settings));
        engine.load().await;
        Ok(engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct SavedSettings;

    impl SettingsStore for SavedSettings {
        fn load(&self) -> Result<Settings> {
            Ok(Settings {
                api_url: Some("http://localhost:3000".to_string()),
                email: Some("jane.smith@example.com".to_string()),
                timeout_secs: None,
            })
        }

        fn save(&self, _settings: &Settings) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_offline_connects_to_sample_data() {
        let store = SavedSettings;
        let engine = BankService::with_defaults(&store, true)
            .connect()
            .await
            .unwrap();
        let projection = engine.state().snapshot();
        assert_eq!(projection.accounts.len(), 2);
        assert_eq!(projection.user.unwrap().name, "Jane Smith");
        assert_eq!(projection.transactions.len(), 3);
    }
}
