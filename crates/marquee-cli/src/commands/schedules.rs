//! The `marquee schedule` command family.

use std::collections::BTreeMap;

use anyhow::{bail, Result};
use chrono::{Datelike, Duration, Local, NaiveDate};
use clap::{Args, Subcommand};

use marquee_core::catalog::Catalog;
use marquee_core::dayset::DaySet;
use marquee_core::overlap::find_overlaps;
use marquee_core::schedule::{validate_schedule, ScheduleRecord, ScheduleRow};
use marquee_core::store::{ScheduleKey, ScheduleStore};
use marquee_core::template::{derive_for_date, Adjustment};
use marquee_core::window::parse_clock;

use crate::config::Config;
use crate::files;
use crate::prompt;

#[derive(Debug, Subcommand)]
pub enum ScheduleCommand {
    /// List every schedule collection, default first
    List,
    /// Add a schedule entry to a calendar key
    Add(AddArgs),
    /// Derive a date's collection from an existing one
    Derive(DeriveArgs),
    /// Edit one entry of a collection in place
    Edit(EditArgs),
    /// Delete a calendar key's entire collection
    Delete {
        /// `default` or a date (YYYY-MM-DD)
        key: ScheduleKey,
    },
    /// Validate every entry of every collection and report all issues
    Validate,
    /// Delete date collections older than a threshold
    Cleanup {
        /// Age threshold in days
        #[arg(long, default_value_t = 30)]
        older_than: u32,
    },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    /// `default` or a date (YYYY-MM-DD)
    pub key: ScheduleKey,
    /// Entry name (max 30 chars)
    #[arg(long)]
    pub name: String,
    /// Active days, e.g. `12345` for Mon-Fri (1=Monday). Required for the
    /// default collection; defaults to the date's weekday for date keys.
    #[arg(long)]
    pub days: Option<String>,
    /// Start time (H:MM or HH:MM)
    #[arg(long)]
    pub start: String,
    /// End time (H:MM or HH:MM)
    #[arg(long)]
    pub end: String,
    /// Image filename from the schedules folder
    #[arg(long)]
    pub image: String,
    /// Hide the progress bar on this entry
    #[arg(long)]
    pub no_progress: bool,
    /// Create the entry disabled
    #[arg(long)]
    pub disabled: bool,
}

#[derive(Debug, Args)]
pub struct DeriveArgs {
    /// Source collection: `default` or a date
    #[arg(long)]
    pub from: ScheduleKey,
    /// Target date (YYYY-MM-DD; `default` cannot be a target)
    #[arg(long)]
    pub to: NaiveDate,
    /// Shift every copied window by this many minutes (negative = earlier)
    #[arg(long, allow_hyphen_values = true, conflicts_with = "select")]
    pub shift: Option<i32>,
    /// Copy only these entries, 1-based, comma-separated (e.g. `1,3`)
    #[arg(long)]
    pub select: Option<String>,
    /// Discard the target's existing collection
    #[arg(long, conflicts_with = "merge")]
    pub replace: bool,
    /// Append to the target's existing collection (no dedup)
    #[arg(long)]
    pub merge: bool,
}

#[derive(Debug, Args)]
pub struct EditArgs {
    /// `default` or a date (YYYY-MM-DD)
    #[arg(long)]
    pub key: ScheduleKey,
    /// Index as shown by `schedule list`
    pub index: usize,
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub days: Option<String>,
    /// New start time (H:MM)
    #[arg(long)]
    pub start: Option<String>,
    /// New end time (H:MM)
    #[arg(long)]
    pub end: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(long, conflicts_with = "disable")]
    pub enable: bool,
    #[arg(long)]
    pub disable: bool,
    #[arg(long, conflicts_with = "no_progress")]
    pub progress: bool,
    #[arg(long)]
    pub no_progress: bool,
}

pub fn run(command: ScheduleCommand, config: &Config, assume_yes: bool) -> Result<()> {
    match command {
        ScheduleCommand::List => list(config),
        ScheduleCommand::Add(args) => add(config, &args, assume_yes),
        ScheduleCommand::Derive(args) => derive(config, &args, assume_yes),
        ScheduleCommand::Edit(args) => edit(config, &args, assume_yes),
        ScheduleCommand::Delete { key } => delete(config, key, assume_yes),
        ScheduleCommand::Validate => validate(config),
        ScheduleCommand::Cleanup { older_than } => cleanup(config, older_than, assume_yes),
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn format_row(row: &ScheduleRow) -> String {
    match ScheduleRecord::try_from(row) {
        Ok(record) => {
            let enabled = if record.enabled { "[x]" } else { "[ ]" };
            let bar = if record.show_progress { " [bar]" } else { "" };
            format!(
                "{} {:25} | {:20} | {:11} | {}{}",
                enabled,
                record.name,
                record.days.day_names(),
                record.window.to_string(),
                record.image,
                bar
            )
        }
        Err(e) => format!("    {:25} | (unparseable: {})", row.name, e),
    }
}

fn list(config: &Config) -> Result<()> {
    let store = files::load_store(&config.schedules_dir_path())?;
    if store.is_empty() {
        println!("No schedules found.");
        return Ok(());
    }

    let default_rows = store.get(ScheduleKey::Default);
    if !default_rows.is_empty() {
        println!("DEFAULT SCHEDULE ({} item(s)):", default_rows.len());
        for (i, row) in default_rows.iter().enumerate() {
            println!("{:3}. {}", i, format_row(row));
        }
    }

    // Date collections grouped by month, ascending.
    let mut by_month: BTreeMap<(i32, u32), Vec<NaiveDate>> = BTreeMap::new();
    for key in store.keys() {
        if let Some(date) = key.date() {
            by_month.entry((date.year(), date.month())).or_default().push(date);
        }
    }

    let today = today();
    for ((_, _), dates) in &by_month {
        let month_name = dates[0].format("%B %Y").to_string().to_uppercase();
        println!("\n{}:", month_name);
        for date in dates {
            let marker = if *date == today {
                "  <- TODAY"
            } else if *date < today {
                "  (past)"
            } else {
                ""
            };
            let rows = store.get(ScheduleKey::Date(*date));
            println!(
                "  {} ({}){} - {} schedule(s):",
                date,
                date.format("%a"),
                marker,
                rows.len()
            );
            for (i, row) in rows.iter().enumerate() {
                println!("  {:3}. {}", i, format_row(row));
            }
        }
    }

    println!(
        "\nTotal: {} schedule(s) across {} key(s)",
        store.total_rows(),
        store.key_count()
    );
    Ok(())
}

fn add(config: &Config, args: &AddArgs, assume_yes: bool) -> Result<()> {
    // Date collections run on one concrete day, so the day set can be
    // derived from the date itself; the default collection has no date to
    // derive from.
    let days = match (&args.days, args.key) {
        (Some(days), _) => days.clone(),
        (None, ScheduleKey::Date(date)) => {
            let token = DaySet::token(date.weekday()).to_string();
            println!(
                "Days defaulted to {} (day {}) from {}",
                DaySet::single(date.weekday()).day_names(),
                token,
                date
            );
            token
        }
        (None, ScheduleKey::Default) => {
            bail!("--days is required when adding to the default collection")
        }
    };

    let catalog = config.catalog();
    let record = match validate_schedule(
        &args.name,
        &days,
        &args.start,
        &args.end,
        &args.image,
        !args.disabled,
        !args.no_progress,
        &catalog,
    ) {
        Ok(record) => record,
        Err(errors) => {
            eprintln!("Validation failed:");
            for error in &errors {
                eprintln!("  - {}", error);
            }
            bail!("schedule not added");
        }
    };

    let mut store = files::load_store(&config.schedules_dir_path())?;

    let conflicts = find_overlaps(&store, args.key, record.days, record.window, None);
    if !conflicts.is_empty() {
        println!(
            "WARNING: this schedule overlaps {} existing schedule(s):",
            conflicts.len()
        );
        for conflict in &conflicts {
            println!("  - {}", conflict);
        }
        println!("Overlapping schedules may fight over the display.");
    }

    if !prompt::confirm("Save schedule?", assume_yes)? {
        println!("Cancelled");
        return Ok(());
    }

    println!("Added to {}: {} ({})", args.key, record.name, record.window);
    store.add(args.key, record.to_row());
    files::save_key(&config.schedules_dir_path(), args.key, store.get(args.key))
}

/// Parse a 1-based `--select` list into 0-based indices.
fn parse_selection(text: &str) -> Result<Vec<usize>> {
    let mut indices = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let number: usize = part
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid selection entry '{}'", part))?;
        if number == 0 {
            bail!("selection entries are 1-based");
        }
        indices.push(number - 1);
    }
    if indices.is_empty() {
        bail!("empty selection");
    }
    Ok(indices)
}

fn derive(config: &Config, args: &DeriveArgs, assume_yes: bool) -> Result<()> {
    let mut store = files::load_store(&config.schedules_dir_path())?;

    if !store.contains_key(args.from) {
        bail!("no schedule collection for '{}'", args.from);
    }

    let adjustment = match (&args.shift, &args.select) {
        (Some(minutes), _) => Adjustment::Shift(*minutes),
        (None, Some(selection)) => Adjustment::Select(parse_selection(selection)?),
        (None, None) => Adjustment::Copy,
    };

    let target_key = ScheduleKey::Date(args.to);
    let derived = derive_for_date(store.get(args.from), args.to, &adjustment)?;
    if derived.is_empty() {
        println!(
            "No schedules in '{}' apply to {} ({})",
            args.from,
            args.to,
            args.to.format("%A")
        );
        return Ok(());
    }

    println!(
        "{} schedule(s) for {} ({}):",
        derived.len(),
        args.to,
        args.to.format("%A")
    );
    for row in &derived {
        println!("  {}", format_row(row));
    }

    let existing = store.get(target_key).len();
    if existing > 0 {
        let action = if args.replace {
            'r'
        } else if args.merge {
            'm'
        } else if assume_yes {
            bail!(
                "{} already has {} schedule(s); pass --replace or --merge",
                args.to,
                existing
            );
        } else {
            println!("{} already has {} schedule(s).", args.to, existing);
            prompt::choose("Replace existing, merge, or cancel?", &['r', 'm', 'c'])?
        };

        match action {
            'r' => {
                store.replace(target_key, derived);
                println!("Replaced schedules for {}", args.to);
            }
            'm' => {
                store.merge(target_key, derived);
                println!("Merged schedules for {}", args.to);
            }
            _ => {
                println!("Cancelled");
                return Ok(());
            }
        }
    } else {
        store.replace(target_key, derived);
        println!("Created schedules for {}", args.to);
    }

    files::save_key(
        &config.schedules_dir_path(),
        target_key,
        store.get(target_key),
    )
}

fn edit(config: &Config, args: &EditArgs, assume_yes: bool) -> Result<()> {
    let mut store = files::load_store(&config.schedules_dir_path())?;
    let Some(rows) = store.rows_mut(args.key) else {
        bail!("no schedule collection for '{}'", args.key);
    };
    let Some(row) = rows.get_mut(args.index) else {
        bail!("no schedule at index {} under '{}'", args.index, args.key);
    };

    let original_name = row.name.clone();

    if let Some(name) = &args.name {
        row.name = name.clone();
    }
    if let Some(days) = &args.days {
        DaySet::parse(days)?;
        row.days = days.clone();
    }
    if let Some(start) = &args.start {
        let minute = parse_clock(start)?;
        row.start_hour = (minute / 60).to_string();
        row.start_min = (minute % 60).to_string();
    }
    if let Some(end) = &args.end {
        let minute = parse_clock(end)?;
        row.end_hour = (minute / 60).to_string();
        row.end_min = (minute % 60).to_string();
    }
    if let Some(image) = &args.image {
        row.image = image.clone();
    }
    if args.enable {
        row.enabled = "1".to_string();
    } else if args.disable {
        row.enabled = "0".to_string();
    }
    if args.progress {
        row.progressbar = "1".to_string();
    } else if args.no_progress {
        row.progressbar = "0".to_string();
    }

    let edited = row.clone();
    println!("Updated: {}", format_row(&edited));

    // Overlap re-check, excluding every row still carrying the pre-edit name.
    match ScheduleRecord::try_from(&edited) {
        Ok(record) => {
            let conflicts = find_overlaps(
                &store,
                args.key,
                record.days,
                record.window,
                Some(original_name.as_str()),
            );
            if !conflicts.is_empty() {
                println!(
                    "WARNING: this schedule now overlaps {} other schedule(s):",
                    conflicts.len()
                );
                for conflict in &conflicts {
                    println!("  - {}", conflict);
                }
                if !prompt::confirm("Save anyway?", assume_yes)? {
                    println!("Edit discarded");
                    return Ok(());
                }
            }
        }
        Err(e) => eprintln!("warning: edited schedule does not validate: {}", e),
    }

    files::save_key(&config.schedules_dir_path(), args.key, store.get(args.key))
}

fn delete(config: &Config, key: ScheduleKey, assume_yes: bool) -> Result<()> {
    let mut store = files::load_store(&config.schedules_dir_path())?;
    if !store.contains_key(key) {
        bail!("no schedule collection for '{}'", key);
    }

    let count = store.get(key).len();
    let question = format!("Delete {} schedule(s) for '{}'?", count, key);
    if !prompt::confirm(&question, assume_yes)? {
        println!("Cancelled");
        return Ok(());
    }

    store.remove_key(key)?;
    files::delete_key_file(&config.schedules_dir_path(), key)
}

/// Validation issues across the whole store, one line per bad row.
pub fn collect_issues(store: &ScheduleStore, catalog: &Catalog) -> Vec<String> {
    let mut issues = Vec::new();
    for key in store.keys() {
        for (i, row) in store.get(key).iter().enumerate() {
            let start = format!("{}:{:0>2}", row.start_hour.trim(), row.start_min.trim());
            let end = format!("{}:{:0>2}", row.end_hour.trim(), row.end_min.trim());
            if let Err(errors) = validate_schedule(
                &row.name,
                &row.days,
                &start,
                &end,
                &row.image,
                row.enabled.trim() == "1",
                row.progressbar.trim() == "1",
                catalog,
            ) {
                let detail = errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                issues.push(format!("{} entry {} ({}): {}", key, i, row.name, detail));
            }
        }
    }
    issues
}

fn validate(config: &Config) -> Result<()> {
    let store = files::load_store(&config.schedules_dir_path())?;
    let issues = collect_issues(&store, &config.catalog());

    if issues.is_empty() {
        println!("All schedules valid.");
    } else {
        println!("Found issues:");
        for issue in &issues {
            println!("  - {}", issue);
        }
    }
    Ok(())
}

fn cleanup(config: &Config, older_than: u32, assume_yes: bool) -> Result<()> {
    let mut store = files::load_store(&config.schedules_dir_path())?;
    let cutoff = today() - Duration::days(older_than as i64);

    let stale: Vec<NaiveDate> = store
        .keys()
        .filter_map(ScheduleKey::date)
        .filter(|date| *date < cutoff)
        .collect();

    if stale.is_empty() {
        println!("No schedules older than {} days.", older_than);
        return Ok(());
    }

    println!(
        "Found {} schedule collection(s) older than {} days:",
        stale.len(),
        older_than
    );
    for date in &stale {
        println!("  - {} ({} days ago)", date, (today() - *date).num_days());
    }

    let question = format!("Delete these {} old collection(s)?", stale.len());
    if !prompt::confirm(&question, assume_yes)? {
        println!("Cancelled");
        return Ok(());
    }

    for date in stale {
        let key = ScheduleKey::Date(date);
        store.remove_key(key)?;
        files::delete_key_file(&config.schedules_dir_path(), key)?;
    }
    Ok(())
}
