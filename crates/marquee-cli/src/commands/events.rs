//! The `marquee event` command family.

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};

use marquee_core::catalog::Catalog;
use marquee_core::event::{validate_event, EventList, EventRow};

use crate::config::Config;
use crate::files;
use crate::prompt;

#[derive(Debug, Subcommand)]
pub enum EventCommand {
    /// List all events, future first
    List,
    /// Add a new event (every field error is reported in one pass)
    Add(AddArgs),
    /// Edit an event in place by its list index
    Edit(EditArgs),
    /// Remove an event by its list index
    Remove {
        /// Index as shown by `event list`
        index: usize,
    },
    /// Re-validate every stored event and report all issues
    Validate,
    /// Remove events dated before today
    Cleanup,
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Event date (YYYY-MM-DD, today or later)
    #[arg(long)]
    pub date: String,
    /// Top display line (max 12 chars)
    #[arg(long)]
    pub top: String,
    /// Bottom display line (max 12 chars)
    #[arg(long)]
    pub bottom: String,
    /// Image filename from the events folder
    #[arg(long)]
    pub image: String,
    /// Banner color
    #[arg(long, default_value = "MINT")]
    pub color: String,
    /// First hour the banner shows (0-23); omit both hours for all-day
    #[arg(long, requires = "end")]
    pub start: Option<String>,
    /// Hour the banner stops showing (0-23)
    #[arg(long, requires = "start")]
    pub end: Option<String>,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// Index as shown by `event list`
    pub index: usize,
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub top: Option<String>,
    #[arg(long)]
    pub bottom: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long)]
    pub color: Option<String>,
    #[arg(long, requires = "end")]
    pub start: Option<String>,
    #[arg(long, requires = "start")]
    pub end: Option<String>,
    /// Drop the hour window, making the event all-day
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub all_day: bool,
}

pub fn run(command: EventCommand, config: &Config, assume_yes: bool) -> Result<()> {
    match command {
        EventCommand::List => list(config),
        EventCommand::Add(args) => add(config, &args),
        EventCommand::Edit(args) => edit(config, &args),
        EventCommand::Remove { index } => remove(config, index, assume_yes),
        EventCommand::Validate => validate(config),
        EventCommand::Cleanup => cleanup(config),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn format_row(row: &EventRow) -> String {
    let time = match &row.hours {
        Some((start, end)) => format!("[{}:00-{}:00]", start, end),
        None => "[all day]".to_string(),
    };
    format!(
        "{} | {:12} / {:12} | {:20} | {:10} {}",
        row.date, row.top_line, row.bottom_line, row.image, row.color, time
    )
}

fn list(config: &Config) -> Result<()> {
    let list = files::load_events(&config.events_csv_path())?;
    if list.is_empty() {
        println!("No events found.");
        return Ok(());
    }

    let (future, past) = list.split_by_date(today());

    if !future.is_empty() {
        println!("FUTURE EVENTS ({} will be imported):", future.len());
        for i in &future {
            println!("{:3}. {}", i, format_row(&list.rows()[*i]));
        }
    }
    if !past.is_empty() {
        println!("PAST EVENTS ({} will be skipped):", past.len());
        for i in &past {
            println!("{:3}. {}", i, format_row(&list.rows()[*i]));
        }
    }
    println!(
        "Total: {} event(s) ({} future, {} past)",
        list.len(),
        future.len(),
        past.len()
    );
    Ok(())
}

fn add(config: &Config, args: &AddArgs) -> Result<()> {
    let catalog = config.catalog();
    let hours = args
        .start
        .as_deref()
        .zip(args.end.as_deref());

    let record = match validate_event(
        &args.date,
        &args.top,
        &args.bottom,
        &args.image,
        &args.color,
        hours,
        &catalog,
        today(),
    ) {
        Ok(record) => record,
        Err(errors) => {
            eprintln!("Validation failed:");
            for error in &errors {
                eprintln!("  - {}", error);
            }
            bail!("event not added");
        }
    };

    let mut list = files::load_events(&config.events_csv_path())?;
    let row = record.to_row();
    println!("Added: {}", format_row(&row));
    list.push(row);
    files::save_events(&config.events_csv_path(), &mut list)
}

fn edit(config: &Config, args: &EditArgs) -> Result<()> {
    let mut list = files::load_events(&config.events_csv_path())?;
    let Some(current) = list.rows().get(args.index) else {
        bail!("no event at index {}", args.index);
    };

    let mut row = current.clone();
    if let Some(date) = &args.date {
        row.date = date.clone();
    }
    if let Some(top) = &args.top {
        row.top_line = top.clone();
    }
    if let Some(bottom) = &args.bottom {
        row.bottom_line = bottom.clone();
    }
    if let Some(image) = &args.image {
        row.image = image.clone();
    }
    if let Some(color) = &args.color {
        row.color = color.to_uppercase();
    }
    if args.all_day {
        row.hours = None;
    } else if let (Some(start), Some(end)) = (&args.start, &args.end) {
        row.hours = Some((start.clone(), end.clone()));
    }

    // Advisory re-check: edits may legitimately touch past or legacy rows,
    // so problems warn instead of blocking.
    let catalog = config.catalog();
    let hours = row.hours.as_ref().map(|(s, e)| (s.as_str(), e.as_str()));
    if let Err(errors) = validate_event(
        &row.date,
        &row.top_line,
        &row.bottom_line,
        &row.image,
        &row.color,
        hours,
        &catalog,
        today(),
    ) {
        for error in &errors {
            eprintln!("warning: {}", error);
        }
    }

    println!("Updated: {}", format_row(&row));
    list.replace(args.index, row)
        .context("event vanished mid-edit")?;
    files::save_events(&config.events_csv_path(), &mut list)
}

fn remove(config: &Config, index: usize, assume_yes: bool) -> Result<()> {
    let mut list = files::load_events(&config.events_csv_path())?;
    let Some(row) = list.rows().get(index) else {
        bail!("no event at index {}", index);
    };

    let question = format!(
        "Delete event '{} / {}' on {}?",
        row.top_line, row.bottom_line, row.date
    );
    if !prompt::confirm(&question, assume_yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let removed = list.remove(index)?;
    println!("Removed: {}", format_row(&removed));
    files::save_events(&config.events_csv_path(), &mut list)
}

/// Validation issues across the whole list, one line per bad row.
pub fn collect_issues(list: &EventList, catalog: &Catalog, today: NaiveDate) -> Vec<String> {
    let mut issues = Vec::new();
    for (i, row) in list.rows().iter().enumerate() {
        let hours = row.hours.as_ref().map(|(s, e)| (s.as_str(), e.as_str()));
        if let Err(errors) = validate_event(
            &row.date,
            &row.top_line,
            &row.bottom_line,
            &row.image,
            &row.color,
            hours,
            catalog,
            today,
        ) {
            let detail = errors
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            issues.push(format!("event {} ({}): {}", i, row.date, detail));
        }
    }
    issues
}

fn validate(config: &Config) -> Result<()> {
    let list = files::load_events(&config.events_csv_path())?;
    let issues = collect_issues(&list, &config.catalog(), today());

    if issues.is_empty() {
        println!("All events valid.");
    } else {
        println!("Found issues (some may be past events):");
        for issue in &issues {
            println!("  - {}", issue);
        }
    }
    Ok(())
}

fn cleanup(config: &Config) -> Result<()> {
    let mut list = files::load_events(&config.events_csv_path())?;
    let removed = list.cleanup_past(today());

    if removed == 0 {
        println!("No past events to remove.");
        return Ok(());
    }
    println!("Removed {} past event(s)", removed);
    files::save_events(&config.events_csv_path(), &mut list)
}
