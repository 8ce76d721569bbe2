use super::formatter::{period_label, record_date};
use super::insight::Insight;
use super::messages::Message;
use super::reason::NO_REASON;
use super::record::TardinessRecord;
use super::report::{GeneratedOutput, MonthlyReportResult};
use super::roster::Student;
use super::theme::Theme;
use crate::msg_print;
use prettytable::{row, Table};
use std::collections::{BTreeMap, BTreeSet};

pub struct View {}

impl View {
    /// Records table; the date column is shown for multi-day listings.
    pub fn records(records: &[TardinessRecord], theme: Theme, with_date: bool) {
        let mut table = Table::new();
        table.set_format(theme.table_format());

        if with_date {
            table.set_titles(row!["DATE", "NAME", "CLASS", "ARRIVAL", "LATE (MIN)", "CATEGORY", "REASON"]);
        } else {
            table.set_titles(row!["NAME", "CLASS", "ARRIVAL", "LATE (MIN)", "CATEGORY", "REASON"]);
        }

        for record in records {
            let reason = record.reason().unwrap_or(NO_REASON);
            if with_date {
                table.add_row(row![
                    record_date(record),
                    record.name(),
                    record.class_name(),
                    record.arrival_time(),
                    record.duration_minutes,
                    record.category,
                    reason
                ]);
            } else {
                table.add_row(row![record.name(), record.class_name(), record.arrival_time(), record.duration_minutes, record.category, reason]);
            }
        }
        table.printstd();
    }

    pub fn insight(insight: Option<&Insight>, theme: Theme) {
        msg_print!(Message::InsightHeader, true);
        let Some(insight) = insight else {
            msg_print!(Message::InsightNoData);
            return;
        };

        let mut table = Table::new();
        table.set_format(theme.table_format());
        table.add_row(row!["Most common reason", insight.most_common_reason]);
        table.add_row(row!["Class with most late arrivals", insight.top_class]);
        table.add_row(row!["Average delay (min)", insight.average_minutes]);
        table.add_row(row!["Ringan / Sedang / Berat", format!("{} / {} / {}", insight.ringan, insight.sedang, insight.berat)]);
        table.printstd();
    }

    pub fn daily_output(output: &GeneratedOutput) {
        msg_print!(Message::AiSummaryHeader, true);
        println!("{}", output.summary);
        msg_print!(Message::AiWhatsappHeader, true);
        println!("{}", output.whatsapp);
        msg_print!(Message::AiDailyRecapHeader, true);
        println!("{}", output.daily_recap);
    }

    pub fn monthly_report(result: &MonthlyReportResult) {
        msg_print!(Message::AiMonthlyReportHeader, true);
        println!("{}", result.report);

        if let (Some(top), Some(message)) = (&result.top_offender, &result.parent_message) {
            msg_print!(Message::ParentNotificationHeader, true);
            msg_print!(Message::ParentNotificationFor {
                name: top.name.clone(),
                class_name: top.class_name.clone(),
                count: top.count,
            });
            println!("\n{}", message);
        }
    }

    pub fn students(students: &[Student], theme: Theme) {
        let mut table = Table::new();
        table.set_format(theme.table_format());
        table.set_titles(row!["NAME", "CLASS"]);
        for student in students {
            table.add_row(row![student.name, student.class_name]);
        }
        table.printstd();
    }

    /// `Januari 2025, Februari 2025`
    pub fn periods(periods: &BTreeMap<i32, BTreeSet<u32>>) -> String {
        periods
            .iter()
            .flat_map(|(year, months)| months.iter().map(move |month| period_label(*year, *month)))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
