//! Interactive configuration wizard.
//!
//! Asks for the school start time, how on-time arrivals are handled, and
//! which generative model and endpoint to use. Existing values are offered
//! as defaults, so re-running the wizard only changes what is edited.

use crate::{
    db::storage::Storage,
    libs::{config::Config, messages::Message, theme::Theme},
    msg_success,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Remove the existing configuration instead of creating a new one
    #[arg(short, long)]
    delete: bool,
}

pub fn cmd(init_args: InitArgs) -> Result<()> {
    if init_args.delete {
        return Config::delete();
    }

    let theme = Theme::load(&Storage::new()?)?;
    Config::init(&*theme.prompt_theme())?.save()?;

    msg_success!(Message::ConfigSaved);
    Ok(())
}
