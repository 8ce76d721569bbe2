//! Export of daily or monthly records.
//!
//! ```bash
//! # Today's records as CSV
//! lazgo export daily
//!
//! # Today's PDF report (needs today's AI recap)
//! lazgo export daily --format pdf
//!
//! # January 2025 as Excel, to a chosen file
//! lazgo export monthly --year 2025 --month 1 --format excel --output januari.xlsx
//!
//! # Monthly PDF with a fresh AI analysis
//! lazgo export monthly --format pdf --analysis
//! ```

use super::tracker;
use crate::{
    libs::{
        export::{ExportFormat, ExportJob, ExportScope, Exporter},
        messages::Message,
        secret::ApiKey,
        store::{filter_by_day, load_daily_output},
    },
    msg_info, msg_warning,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Which records to export
    #[arg(value_enum)]
    scope: ExportScope,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,

    /// Output file; defaults to a dated name in the working directory
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Year of a monthly export
    #[arg(short, long)]
    year: Option<i32>,

    /// Month of a monthly export, 1-12
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Include a freshly generated AI analysis in a monthly PDF
    #[arg(long)]
    analysis: bool,
}

pub async fn cmd(args: ExportArgs, api_key: &ApiKey) -> Result<()> {
    let mut tracker = tracker(api_key)?;
    msg_info!(Message::ExportingData(format!("{:?}", args.scope), format!("{:?}", args.format)));

    let job = match args.scope {
        ExportScope::Daily => {
            let today = Local::now().date_naive();
            let records = filter_by_day(tracker.records(), today);
            let recap = load_daily_output(tracker.storage(), today)?.map(|output| output.daily_recap);
            ExportJob::daily(today, records, recap)
        }
        ExportScope::Monthly => {
            let (default_year, default_month) = tracker.selected_period();
            let (year, month) = (args.year.unwrap_or(default_year), args.month.unwrap_or(default_month));
            tracker.select_month(year, month);

            let analysis = if args.analysis && args.format == ExportFormat::Pdf {
                msg_info!(Message::AiGeneratingMonthly);
                let slot = tracker.generate_monthly().await;
                if let Some(message) = slot.error() {
                    msg_warning!(message);
                }
                slot.ready().map(|result| result.report.clone())
            } else {
                None
            };
            ExportJob::monthly(year, month, tracker.month_records(), analysis)
        }
    };

    Exporter::new(args.format, args.output).export(&job)?;
    Ok(())
}
