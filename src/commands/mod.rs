pub mod export;
pub mod init;
pub mod log;
pub mod month;
pub mod roster;
pub mod theme;
pub mod today;

use crate::api::GeminiClient;
use crate::db::storage::Storage;
use crate::libs::config::Config;
use crate::libs::secret::ApiKey;
use crate::libs::tracker::Tracker;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Record a late student and generate the AI report")]
    Log(log::LogArgs),
    #[command(about = "Show today's late arrivals")]
    Today,
    #[command(about = "Show a month of late arrivals and its AI analysis")]
    Month(month::MonthArgs),
    #[command(about = "Export records to CSV, Excel or PDF")]
    Export(export::ExportArgs),
    #[command(about = "Show or change the theme")]
    Theme(theme::ThemeArgs),
    #[command(about = "Manage the student roster", arg_required_else_help = true)]
    Roster(roster::RosterArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let api_key = ApiKey::resolve()?;

        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Log(args) => log::cmd(args, &api_key).await,
            Commands::Today => today::cmd(&api_key),
            Commands::Month(args) => month::cmd(args, &api_key).await,
            Commands::Export(args) => export::cmd(args, &api_key).await,
            Commands::Theme(args) => theme::cmd(args),
            Commands::Roster(args) => roster::cmd(args),
        }
    }
}

/// Controller over the application database and the configured AI service.
fn tracker(api_key: &ApiKey) -> Result<Tracker<GeminiClient>> {
    let config = Config::read()?;
    let client = GeminiClient::new(&config.ai(), api_key.expose())?;
    Tracker::new(Storage::new()?, config, client)
}
