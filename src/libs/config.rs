//! Application configuration.
//!
//! Settings live in `config.json` inside the application data directory and
//! are grouped into optional modules, each configured through the `init`
//! wizard. A missing file or module means built-in defaults.
//!
//! ```rust,no_run
//! use lazgo::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("School starts at {}", config.school().start_time);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::tardiness::{parse_time, OnTimePolicy};
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::Theme as PromptTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const DEFAULT_START_TIME: &str = "07:30";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A module offered by the configuration wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// School day settings used when classifying arrivals.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SchoolConfig {
    /// Official start of the school day, `HH:MM`.
    pub start_time: String,
    #[serde(default)]
    pub on_time_policy: OnTimePolicy,
}

impl Default for SchoolConfig {
    fn default() -> Self {
        SchoolConfig {
            start_time: DEFAULT_START_TIME.to_string(),
            on_time_policy: OnTimePolicy::default(),
        }
    }
}

impl SchoolConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "school".to_string(),
            name: "School".to_string(),
        }
    }

    pub fn init(config: &Option<SchoolConfig>, theme: &dyn PromptTheme) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleSchool);

        let start_time: String = Input::with_theme(theme)
            .with_prompt(Message::PromptSchoolStartTime.to_string())
            .default(default.start_time)
            .validate_with(|input: &String| parse_time(input).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?;

        let policies = OnTimePolicy::ALL;
        let current = policies.iter().position(|p| *p == default.on_time_policy).unwrap_or(0);
        let selected = Select::with_theme(theme)
            .with_prompt(Message::PromptOnTimePolicy.to_string())
            .items(&policies.iter().map(|p| p.describe()).collect::<Vec<_>>())
            .default(current)
            .interact()?;

        Ok(SchoolConfig {
            start_time: start_time.trim().to_string(),
            on_time_policy: policies[selected],
        })
    }
}

/// Generative-language service settings. The API key is not stored here.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct AiConfig {
    pub model: String,
    pub api_url: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl AiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "ai".to_string(),
            name: "AI".to_string(),
        }
    }

    pub fn init(config: &Option<AiConfig>, theme: &dyn PromptTheme) -> Result<Self> {
        let default = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleAi);

        Ok(AiConfig {
            model: Input::with_theme(theme)
                .with_prompt(Message::PromptAiModel.to_string())
                .default(default.model)
                .interact_text()?,
            api_url: Input::with_theme(theme)
                .with_prompt(Message::PromptAiApiUrl.to_string())
                .default(default.api_url)
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school: Option<SchoolConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai: Option<AiConfig>,
}

impl Config {
    /// Stored configuration, or defaults when no file exists yet.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the stored configuration file, if any.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Interactive wizard; existing values are offered as defaults.
    pub fn init(theme: &dyn PromptTheme) -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = [SchoolConfig::module(), AiConfig::module()];
        let selected = MultiSelect::with_theme(theme)
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "school" => config.school = Some(SchoolConfig::init(&config.school, theme)?),
                "ai" => config.ai = Some(AiConfig::init(&config.ai, theme)?),
                _ => {}
            }
        }

        Ok(config)
    }

    pub fn school(&self) -> SchoolConfig {
        self.school.clone().unwrap_or_default()
    }

    pub fn ai(&self) -> AiConfig {
        self.ai.clone().unwrap_or_default()
    }
}
