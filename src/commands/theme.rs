use crate::{
    db::storage::Storage,
    libs::{messages::Message, theme::Theme},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, ValueEnum};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThemeAction {
    Light,
    Dark,
    Toggle,
}

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// New theme; omit to show the current one
    #[arg(value_enum)]
    action: Option<ThemeAction>,
}

pub fn cmd(args: ThemeArgs) -> Result<()> {
    let mut storage = Storage::new()?;
    let current = Theme::load(&storage)?;

    let next = match args.action {
        None => {
            msg_info!(Message::ThemeCurrent(current.to_string()));
            return Ok(());
        }
        Some(ThemeAction::Light) => Theme::Light,
        Some(ThemeAction::Dark) => Theme::Dark,
        Some(ThemeAction::Toggle) => current.toggled(),
    };

    next.save(&mut storage)?;
    msg_success!(Message::ThemeChanged(next.to_string()));
    Ok(())
}
