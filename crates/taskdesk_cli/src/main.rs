//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `taskdesk_core` wiring.
//! - Print the derived views (tasks, overdue flags, notifications) for a
//!   config-driven store.
//!
//! Usage: `taskdesk_cli [--config PATH] [--search TERM]` (see `--help`).

use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use taskdesk_core::{
    default_log_level, init_logging, Clock, StoreConfig, SystemClock, TaskFilter, TaskStore,
};

/// Print the tasks and notifications of a taskdesk store.
#[derive(Debug, Parser)]
#[command(name = "taskdesk_cli", version, about)]
struct Args {
    /// JSON store config; without it the sample tasks are seeded.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Only list tasks whose title or description contains TERM.
    #[arg(long, value_name = "TERM")]
    search: Option<String>,
}

fn run() -> Result<(), String> {
    let args = Args::parse();
    let config = match args.config.as_deref() {
        Some(path) => StoreConfig::load(path).map_err(|err| err.to_string())?,
        None => StoreConfig {
            seed_sample_tasks: true,
            ..StoreConfig::default()
        },
    };

    if let Some(log_dir) = &config.log_dir {
        let level = config.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir)?;
    }

    let clock = SystemClock;
    let now = clock.now_local();
    let store = TaskStore::from_config(&config, clock).map_err(|err| err.to_string())?;
    info!(
        "event=cli_start module=cli status=ok tasks={}",
        store.tasks().len()
    );

    println!("taskdesk_core version={}", taskdesk_core::core_version());

    let filter = args
        .search
        .map(|term| TaskFilter::new().with_search(term))
        .unwrap_or_default();
    for task in store.filter_tasks(&filter) {
        let due = task
            .due_date
            .map(|due| due.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let overdue = if task.is_overdue(now) { " OVERDUE" } else { "" };
        println!(
            "[{}] {} ({} / {} / {}) due {}{}",
            task.id,
            task.title,
            task.status.label(),
            task.priority.label(),
            task.category,
            due,
            overdue
        );
    }

    println!("unread notifications={}", store.unread_count());
    for notification in store.notifications() {
        println!("- {} {}", notification.id, notification.message);
    }
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("taskdesk_cli: {err}");
            ExitCode::FAILURE
        }
    }
}
