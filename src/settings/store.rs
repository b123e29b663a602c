use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use serde_json::{from_str, to_string_pretty};
use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::settings::consts::{APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, SETTINGS_FILE};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Base URL of the bank API, the bundled sample data is used without it
    pub api_url: Option<String>,
    /// Email of the logged-in user
    pub email: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl Settings {
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Overwrite the fields that are set in `other`.
    pub fn merge(self, other: Settings) -> Settings {
        Settings {
            api_url: other.api_url.or(self.api_url),
            email: other.email.or(self.email),
            timeout_secs: other.timeout_secs.or(self.timeout_secs),
        }
    }
}

pub trait SettingsStore {
    fn load(&self) -> Result<Settings>;
    fn save(&self, settings: &Settings) -> Result<()>;
}

fn write_settings(path: &Path, settings: &Settings) -> Result<()> {
    fs::write(path, to_string_pretty(settings)?)
        .with_context(|| format!("Failed to persist settings file: {}", path.display()))
}

pub struct FileSettingsStore {
    directory: PathBuf, // platform config directory (from ProjectDirs)
    file: &'static str,
}

impl FileSettingsStore {
    /// Linux: `~/.config/banque-cli/settings.json`, the platform equivalent elsewhere.
    pub fn new() -> Result<Self> {
        let project_dirs = ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .ok_or_else(|| anyhow!("Could not determine project directories"))?;

        Ok(Self {
            directory: project_dirs.config_dir().to_path_buf(),
            file: SETTINGS_FILE,
        })
    }

    fn path(&self) -> PathBuf {
        self.directory.join(self.file)
    }

    fn ensure_directory(&self) -> Result<()> {
        fs::create_dir_all(&self.directory).with_context(|| {
            format!(
                "Failed to create settings directory: {}",
                self.directory.display()
            )
        })
    }
}

impl SettingsStore for FileSettingsStore {
    fn load(&self) -> Result<Settings> {
        self.ensure_directory()?;
        let content = match fs::read_to_string(self.path()) {
            Ok(content) => content,
            Err(_) => {
                let defaults = Settings::default();
                self.save(&defaults)?;
                return Ok(defaults);
            }
        };
        from_str(&content).context("Failed to deserialize settings")
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        self.ensure_directory()?;
        write_settings(&self.path(), settings)
    }
}

/// Settings file given on the command line, a missing file reads as defaults.
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Settings::default()),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read settings file: {}", self.path.display())
                })
            }
        };
        from_str(&content)
            .with_context(|| format!("Failed to deserialize settings: {}", self.path.display()))
    }

    fn save(&self, settings: &Settings) -> Result<()> {
        write_settings(&self.path, settings)
    }
}
