//! The tardiness form.
//!
//! Every field can be passed as a flag; missing ones are asked for
//! interactively. While typing, known students and classes from the roster
//! are offered, and choosing a student fills in their class. Once the record
//! is stored the daily AI report is requested; if that fails the record
//! stays saved.

use super::tracker;
use crate::{
    libs::{
        messages::Message,
        reason::{self, OTHER_REASON},
        record::StudentData,
        report::ReportSlot,
        roster::Roster,
        secret::ApiKey,
        tardiness::{parse_time, TIME_FORMAT},
        theme::Theme,
        view::View,
    },
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use chrono::{Local, Utc};
use clap::Args;
use dialoguer::{theme::Theme as PromptTheme, Input, Select};

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Student name
    #[arg(short, long)]
    name: Option<String>,

    /// Student class, e.g. "X IPA 1"
    #[arg(short, long)]
    class: Option<String>,

    /// Arrival time as HH:MM
    #[arg(short, long)]
    arrival: Option<String>,

    /// Reason for being late
    #[arg(short, long)]
    reason: Option<String>,
}

pub async fn cmd(args: LogArgs, api_key: &ApiKey) -> Result<()> {
    let mut tracker = tracker(api_key)?;
    let theme = Theme::load(tracker.storage())?;
    let roster = Roster::load(tracker.storage())?;
    let prompt_theme = theme.prompt_theme();

    let student = fill_form(args, &roster, &*prompt_theme)?;
    let submission = tracker.submit(student, Utc::now())?;
    msg_success!(Message::RecordSaved {
        name: submission.record.name().to_string(),
        duration: submission.record.duration_minutes,
        category: submission.record.category.to_string(),
    });

    msg_info!(Message::AiGeneratingDaily);
    match tracker.generate_daily(&submission).await {
        ReportSlot::Ready(output) => View::daily_output(output),
        ReportSlot::Errored(message) => {
            msg_error!(message);
            msg_info!(Message::RecordKeptAfterAiFailure);
        }
        ReportSlot::Empty | ReportSlot::Loading => {}
    }

    Ok(())
}

fn fill_form(args: LogArgs, roster: &Roster, theme: &dyn PromptTheme) -> Result<StudentData> {
    let mut class = args.class;

    let name = match args.name {
        Some(name) => name,
        None => {
            let typed: String = Input::with_theme(theme).with_prompt(Message::PromptStudentName.to_string()).interact_text()?;
            match pick_student(&typed, roster, theme)? {
                Some((name, class_name)) => {
                    class.get_or_insert(class_name);
                    name
                }
                None => typed,
            }
        }
    };

    let class = match class {
        Some(class) => class,
        None => {
            let typed: String = Input::with_theme(theme).with_prompt(Message::PromptStudentClass.to_string()).interact_text()?;
            pick_class(&typed, roster, theme)?
        }
    };

    let arrival = match args.arrival {
        Some(arrival) => arrival,
        None => Input::<String>::with_theme(theme)
            .with_prompt(Message::PromptArrivalTime.to_string())
            .default(Local::now().format(TIME_FORMAT).to_string())
            .validate_with(|input: &String| parse_time(input).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?,
    };

    let reason = match args.reason {
        Some(reason) => reason,
        None => {
            let choices = reason::choices();
            let selected = Select::with_theme(theme).with_prompt(Message::PromptReason.to_string()).items(&choices).default(0).interact()?;
            let custom = if choices[selected] == OTHER_REASON {
                Input::<String>::with_theme(theme)
                    .with_prompt(Message::PromptCustomReason.to_string())
                    .allow_empty(true)
                    .interact_text()?
            } else {
                String::new()
            };
            reason::resolve(choices[selected], &custom)
        }
    };

    Ok(StudentData::new(&name, &class, &arrival, Some(&reason)))
}

/// Offers roster matches for a typed name; `None` keeps the typed text.
fn pick_student(typed: &str, roster: &Roster, theme: &dyn PromptTheme) -> Result<Option<(String, String)>> {
    let typed = typed.trim();
    let suggestions = roster.suggest_students(typed);
    match suggestions.as_slice() {
        [] => return Ok(None),
        [only] if only.name == typed => return Ok(Some((only.name.clone(), only.class_name.clone()))),
        _ => {}
    }

    let mut items: Vec<String> = suggestions.iter().map(|s| format!("{} ({})", s.name, s.class_name)).collect();
    items.push(Message::KeepTypedName(typed.to_string()).to_string());
    let selected = Select::with_theme(theme).with_prompt(Message::PromptPickStudent.to_string()).items(&items).default(0).interact()?;

    Ok(suggestions.into_iter().nth(selected).map(|s| (s.name, s.class_name)))
}

fn pick_class(typed: &str, roster: &Roster, theme: &dyn PromptTheme) -> Result<String> {
    let suggestions = roster.suggest_classes(typed);
    if suggestions.is_empty() || suggestions.iter().any(|c| c == typed.trim()) {
        return Ok(typed.to_string());
    }

    let mut items = suggestions.clone();
    items.push(Message::KeepTypedName(typed.trim().to_string()).to_string());
    let selected = Select::with_theme(theme).with_prompt(Message::PromptPickClass.to_string()).items(&items).default(0).interact()?;

    Ok(suggestions.into_iter().nth(selected).unwrap_or_else(|| typed.to_string()))
}
