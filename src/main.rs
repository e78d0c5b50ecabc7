//! taskpad
//!
//! Command-line front end for the local task list. Each invocation mounts the
//! task list, performs one action through it, and prints the refreshed view.

use anyhow::{Result, anyhow, bail};
use clap::Parser;
use std::sync::Arc;
use taskpad::cli::{Cli, Command, FormatArg, ThemeAction};
use taskpad::config::Config;
use taskpad::format::{OutputFormat, format_tasks_json, format_tasks_markdown};
use taskpad::hooks::{TaskList, ThemeState};
use taskpad::logging::{LogTarget, init_logging};
use taskpad::services::Services;
use taskpad::store::{MemoryStore, SharedStore, SqliteStore};
use taskpad::types::{CreateTaskRequest, ThemeMode, UpdateTaskRequest};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&LogTarget::parse(&cli.log), cli.verbose)?;

    let mut config = Config::resolve(cli.config.as_deref())?;
    if let Some(db_path) = &cli.database {
        config.storage.db_path = db_path.clone();
    }

    let store: SharedStore = if cli.memory {
        debug!("Using in-memory store");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::open(&config.storage.db_path)?)
    };

    let services = Services::new(store);
    let default_format = config.ui.output_format();

    match cli.command.unwrap_or(Command::List { format: None }) {
        Command::Theme { action } => run_theme(ThemeState::new(services.theme), action),
        command => run_tasks(services, command, default_format).await,
    }
}

async fn run_tasks(
    services: Services,
    command: Command,
    default_format: OutputFormat,
) -> Result<()> {
    let mut list = TaskList::mount(services.tasks).await;
    let mut format = default_format;

    match command {
        Command::List { format: requested } => {
            if let Some(requested) = requested {
                format = match requested {
                    FormatArg::Json => OutputFormat::Json,
                    FormatArg::Markdown => OutputFormat::Markdown,
                };
            }
        }
        Command::Add { title, description } => {
            list.create_task(CreateTaskRequest::new(title, description)).await;
        }
        Command::Toggle { id } => {
            if !list.tasks().iter().any(|t| t.id == id) {
                bail!("No task with id {}", id);
            }
            list.toggle_task_completion(&id).await;
        }
        Command::Edit {
            id,
            title,
            description,
            completed,
        } => {
            list.update_task(UpdateTaskRequest {
                id,
                is_completed: completed,
                title,
                description,
            })
            .await;
        }
        Command::Delete { id } => {
            list.delete_task(&id).await;
        }
        Command::Clear => {
            list.clear_all_tasks().await;
            if list.error().is_none() {
                info!("All tasks removed");
            }
        }
        // Handled in main before the task list is mounted.
        Command::Theme { .. } => {}
    }

    if let Some(message) = list.error() {
        return Err(anyhow!("{}", message));
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&format_tasks_json(list.tasks()))?);
        }
        OutputFormat::Markdown => {
            print!("{}", format_tasks_markdown(list.tasks(), &chrono::Local::now()));
        }
    }

    Ok(())
}

fn run_theme(mut theme: ThemeState, action: ThemeAction) -> Result<()> {
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => theme.toggle_theme(),
        ThemeAction::Light => theme.set_theme_mode(ThemeMode::Light),
        ThemeAction::Dark => theme.set_theme_mode(ThemeMode::Dark),
    }

    println!("{}", serde_json::to_string_pretty(theme.theme())?);
    Ok(())
}
