use crate::db::storage::Storage;
use crate::libs::messages::Message;
use crate::libs::store::THEME_KEY;
use anyhow::Result;
use dialoguer::theme::{ColorfulTheme, SimpleTheme, Theme as PromptTheme};
use prettytable::format::{self, TableFormat};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored preference; absent or unreadable values fall back to light.
    pub fn load(storage: &Storage) -> Result<Self> {
        let Some(raw) = storage.get(THEME_KEY)? else {
            return Ok(Theme::default());
        };
        match serde_json::from_str::<Theme>(&raw) {
            Ok(theme) => Ok(theme),
            Err(e) => {
                tracing::warn!("{}", Message::ThemeLoadFailed(e.to_string()));
                Ok(Theme::default())
            }
        }
    }

    pub fn save(&self, storage: &mut Storage) -> Result<()> {
        storage.set(THEME_KEY, &serde_json::to_string(self)?)
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn table_format(&self) -> TableFormat {
        match self {
            Theme::Light => *format::consts::FORMAT_DEFAULT,
            Theme::Dark => *format::consts::FORMAT_BOX_CHARS,
        }
    }

    pub fn prompt_theme(&self) -> Box<dyn PromptTheme> {
        match self {
            Theme::Light => Box::new(SimpleTheme),
            Theme::Dark => Box::new(ColorfulTheme::default()),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => f.write_str("light"),
            Theme::Dark => f.write_str("dark"),
        }
    }
}
