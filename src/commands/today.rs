use super::tracker;
use crate::{
    libs::{formatter::long_date, insight::Insight, messages::Message, secret::ApiKey, theme::Theme, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Local;

/// Today's records (most recent first), insight and the cached AI report.
pub fn cmd(api_key: &ApiKey) -> Result<()> {
    let tracker = tracker(api_key)?;
    let theme = Theme::load(tracker.storage())?;
    let today = Local::now().date_naive();

    msg_print!(Message::TodayHeader(long_date(today)), true);
    let records = tracker.records_on(today);
    if records.is_empty() {
        msg_info!(Message::NoRecordsToday);
        return Ok(());
    }

    View::records(&records, theme, false);
    View::insight(Insight::from_records(&records).as_ref(), theme);

    match tracker.daily_slot().ready() {
        Some(output) => View::daily_output(output),
        None => msg_info!(Message::NoAiOutputToday),
    }
    Ok(())
}
