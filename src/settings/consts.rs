pub const APP_QUALIFIER: &str = "com";
pub const APP_ORGANIZATION: &str = "banque";
pub const APP_NAME: &str = "banque-cli";
pub const SETTINGS_FILE: &str = "settings.json";
pub const LOG_FILE: &str = "banque.log";
pub const DEFAULT_LOG_LEVEL: &str = "info";
