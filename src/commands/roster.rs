use crate::{
    db::storage::Storage,
    libs::{messages::Message, roster::Roster, theme::Theme, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Subcommand)]
pub enum RosterCommand {
    /// Replace the roster with students from a CSV file (name and class columns)
    Import { path: PathBuf },
    /// List students, optionally only those whose name contains QUERY
    List { query: Option<String> },
}

#[derive(Debug, Args)]
pub struct RosterArgs {
    #[command(subcommand)]
    command: RosterCommand,
}

pub fn cmd(args: RosterArgs) -> Result<()> {
    let mut storage = Storage::new()?;

    match args.command {
        RosterCommand::Import { path } => {
            let roster = Roster::import_csv(path)?;
            roster.save(&mut storage)?;
            msg_success!(Message::RosterImported(roster.students().len()));
        }
        RosterCommand::List { query } => {
            let roster = Roster::load(&storage)?;
            if roster.is_empty() {
                msg_info!(Message::RosterEmpty);
                return Ok(());
            }
            let query = query.unwrap_or_default().to_lowercase();
            let students: Vec<_> = roster.students().iter().filter(|s| s.name.to_lowercase().contains(&query)).cloned().collect();
            View::students(&students, Theme::load(&storage)?);
        }
    }
    Ok(())
}
