//! Monthly overview.
//!
//! Without `--year`/`--month` the current month is shown when it has data,
//! otherwise the latest month that does. `--generate` asks the AI service for
//! an analysis of the month and, for a student late three times or more, a
//! message for their parents.

use super::tracker;
use crate::{
    libs::{
        formatter::period_label, insight::Insight, messages::Message, report::ReportSlot, secret::ApiKey, store::available_periods, theme::Theme,
        view::View,
    },
    msg_error, msg_info, msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct MonthArgs {
    /// Year to show
    #[arg(short, long)]
    year: Option<i32>,

    /// Month to show, 1-12
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    month: Option<u32>,

    /// Generate the AI analysis for the month
    #[arg(short, long)]
    generate: bool,
}

pub async fn cmd(args: MonthArgs, api_key: &ApiKey) -> Result<()> {
    let mut tracker = tracker(api_key)?;
    let theme = Theme::load(tracker.storage())?;

    let (default_year, default_month) = tracker.selected_period();
    let (year, month) = (args.year.unwrap_or(default_year), args.month.unwrap_or(default_month));
    tracker.select_month(year, month);

    let period = period_label(year, month);
    msg_print!(Message::MonthHeader(period.clone()), true);

    let records = tracker.month_records();
    if records.is_empty() {
        msg_info!(Message::NoDataForMonth(period));
        let periods = available_periods(tracker.records());
        if !periods.is_empty() {
            msg_info!(Message::AvailablePeriods(View::periods(&periods)));
        }
        return Ok(());
    }

    View::records(&records, theme, true);
    View::insight(Insight::from_records(&records).as_ref(), theme);

    if args.generate {
        msg_info!(Message::AiGeneratingMonthly);
        match tracker.generate_monthly().await {
            ReportSlot::Ready(result) => View::monthly_report(result),
            ReportSlot::Errored(message) => msg_error!(message),
            ReportSlot::Empty | ReportSlot::Loading => {}
        }
    }
    Ok(())
}
