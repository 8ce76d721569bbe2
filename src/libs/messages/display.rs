//! Display implementation for lazgo application messages.
//!
//! All user-facing CLI text lives here, keeping message wording in one place
//! and away from the code that decides *when* a message is shown. Content
//! that is produced for students' parents or for the AI service (prompts,
//! export headers, generated sections) is Indonesian and lives with the
//! modules that build it; the CLI chrome below is English. The two AI failure
//! notices are Indonesian too, since they take the place of a generated report.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleSchool => "School settings".to_string(),
            Message::ConfigModuleAi => "AI service settings".to_string(),
            Message::ApiKeyNotSet => "GEMINI_API_KEY environment variable not set. Add it to your environment or a .env file.".to_string(),

            // === FORM MESSAGES ===
            Message::RequiredFieldsMissing => "Name, class and arrival time are required.".to_string(),
            Message::InvalidTimeFormat(raw) => format!("Invalid time '{}': expected HH:MM.", raw),
            Message::OnTimeNotRecorded(name) => format!("{} arrived on time; nothing was recorded.", name),
            Message::KeepTypedName(name) => format!("Keep \"{}\"", name),

            // === RECORD MESSAGES ===
            Message::RecordSaved { name, duration, category } => {
                format!("Saved: {} was {} minute(s) late ({}).", name, duration, category)
            }
            Message::RecordsLoadFailed(error) => format!("Could not parse stored records, starting with an empty list: {}", error),
            Message::NoRecordsToday => "No students have been recorded as late today.".to_string(),
            Message::TodayHeader(date) => format!("Late arrivals for {}", date),
            Message::MonthHeader(period) => format!("Late arrivals for {}", period),
            Message::NoDataForMonth(period) => format!("No data for {}.", period),
            Message::AvailablePeriods(periods) => format!("Months with data: {}", periods),
            Message::RecordIdAdjusted(id) => format!("Record id collided with the previous one, adjusted to {}", id),

            // === AI MESSAGES ===
            Message::AiGeneratingDaily => "Generating the AI report...".to_string(),
            Message::AiGeneratingMonthly => "Generating the monthly AI report...".to_string(),
            Message::AiDailyFailed => "Tidak dapat terhubung ke AI. Mohon coba lagi.".to_string(),
            Message::AiMonthlyFailed => "Tidak dapat menghasilkan laporan bulanan dari AI. Mohon coba lagi.".to_string(),
            Message::AiRequestFailed(error) => format!("AI request failed: {}", error),
            Message::AiResponseUnparsable(reason) => format!("AI response could not be parsed: {}", reason),
            Message::AiSummaryHeader => "📝 Tardiness summary".to_string(),
            Message::AiWhatsappHeader => "💬 WhatsApp message for parents".to_string(),
            Message::AiDailyRecapHeader => "📋 Daily recap".to_string(),
            Message::AiMonthlyReportHeader => "📊 Monthly analysis".to_string(),
            Message::ParentNotificationHeader => "🔔 Parent notification".to_string(),
            Message::ParentNotificationFor { name, class_name, count } => {
                format!("Suggested message for the parents of {} ({}), late {} times this month:", name, class_name, count)
            }
            Message::NoAiOutputToday => "No AI report has been generated today. Run `lazgo log` first.".to_string(),
            Message::DailyCacheLoadFailed(error) => format!("Could not parse the cached daily report: {}", error),
            Message::RecordKeptAfterAiFailure => "The student's record is saved; only the AI report failed.".to_string(),

            // === INSIGHT MESSAGES ===
            Message::InsightHeader => "💡 Insight".to_string(),
            Message::InsightNoData => "Not enough data for insight yet.".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingData(scope, format) => format!("Exporting {} records in {} format...", scope, format),
            Message::ExportCompleted(path) => format!("Export completed successfully: {}", path),
            Message::NothingToExport => "No data to export.".to_string(),
            Message::MissingAiSummary => "The AI report has not been generated yet. Process a record first.".to_string(),

            // === THEME MESSAGES ===
            Message::ThemeCurrent(theme) => format!("Current theme: {}", theme),
            Message::ThemeChanged(theme) => format!("Theme switched to {}", theme),
            Message::ThemeLoadFailed(error) => format!("Could not parse stored theme: {}", error),

            // === ROSTER MESSAGES ===
            Message::RosterImported(count) => format!("Imported {} student(s) into the roster.", count),
            Message::RosterEmpty => "The roster is empty. Import one with `lazgo roster import <file.csv>`.".to_string(),
            Message::RosterLoadFailed(error) => format!("Could not parse stored roster: {}", error),

            // === PROMPTS ===
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptSchoolStartTime => "School start time (HH:MM)".to_string(),
            Message::PromptOnTimePolicy => "How should on-time arrivals be handled".to_string(),
            Message::PromptAiModel => "Generative model".to_string(),
            Message::PromptAiApiUrl => "Generative API base URL".to_string(),
            Message::PromptStudentName => "Student name".to_string(),
            Message::PromptStudentClass => "Class".to_string(),
            Message::PromptArrivalTime => "Arrival time (HH:MM)".to_string(),
            Message::PromptReason => "Reason for being late".to_string(),
            Message::PromptCustomReason => "Other reason".to_string(),
            Message::PromptPickStudent => "Did you mean".to_string(),
            Message::PromptPickClass => "Pick a class".to_string(),
        };
        write!(f, "{}", text)
    }
}
