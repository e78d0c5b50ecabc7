//! Output formatting: dates, relative times, and task lists.

use crate::types::{Task, TaskStats};
use chrono::{DateTime, TimeZone};
use serde_json::{Value, json};
use std::fmt::Display;

/// Output format for task listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "markdown" | "md" => Some(OutputFormat::Markdown),
            _ => None,
        }
    }
}

/// "October 16, 2026 at 9:30 AM"
pub fn format_date_time<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y at %-I:%M %p").to_string()
}

/// "October 16, 2026"
pub fn format_date<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y").to_string()
}

/// "9:30 AM"
pub fn format_time<Tz>(date: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    date.format("%-I:%M %p").to_string()
}

/// Human-friendly age of `date` as seen from `now`. Anything a week or
/// older is shown as a plain date.
pub fn relative_time<Tz>(date: &DateTime<Tz>, now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let diff = now.clone().signed_duration_since(date.clone());
    let minutes = diff.num_minutes();
    let hours = diff.num_hours();
    let days = diff.num_days();

    if hours < 1 {
        if minutes <= 1 {
            "Just now".to_string()
        } else {
            format!("{} minutes ago", minutes)
        }
    } else if hours < 24 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if days < 7 {
        if days == 1 {
            "1 day ago".to_string()
        } else {
            format!("{} days ago", days)
        }
    } else {
        format_date(date)
    }
}

/// Format a task list as markdown, newest first as given.
pub fn format_tasks_markdown<Tz>(tasks: &[Task], now: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut md = String::new();
    let stats = TaskStats::from_tasks(tasks);

    md.push_str(&format!(
        "# Tasks ({} total, {} completed, {} pending)\n\n",
        stats.total, stats.completed, stats.pending
    ));

    if tasks.is_empty() {
        md.push_str("_No tasks yet._\n");
        return md;
    }

    let tz = now.timezone();
    for task in tasks {
        let created = task.created_at.with_timezone(&tz);
        let check = if task.is_completed { "x" } else { " " };
        md.push_str(&format!(
            "- [{}] {} `{}` - {}\n",
            check,
            task.title,
            task.id,
            relative_time(&created, now),
        ));
        if !task.description.is_empty() {
            md.push_str(&format!("  {}\n", task.description));
        }
    }

    md
}

/// Task list as a JSON document with stats.
pub fn format_tasks_json(tasks: &[Task]) -> Value {
    json!({
        "stats": TaskStats::from_tasks(tasks),
        "tasks": tasks,
    })
}
