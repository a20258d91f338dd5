//! Repository sync: `marquee pull` and `marquee push`.

use anyhow::{bail, Result};
use chrono::Local;

use crate::commands::{events, schedules};
use crate::config::Config;
use crate::files;
use crate::git::{self, PullOutcome, PushOutcome};
use crate::prompt;

pub fn pull() -> Result<()> {
    println!("Pulling latest content...");
    match git::pull()? {
        PullOutcome::AlreadyUpToDate => println!("Already up to date."),
        PullOutcome::Updated => println!("Pulled latest content."),
        PullOutcome::Conflict => {
            bail!("merge conflict detected - resolve it manually before continuing")
        }
    }
    Ok(())
}

pub fn push(config: &Config, message: Option<String>, assume_yes: bool) -> Result<()> {
    // Never publish content the devices would choke on: a dirty validation
    // report blocks the push outright.
    let catalog = config.catalog();
    let today = Local::now().date_naive();

    let event_list = files::load_events(&config.events_csv_path())?;
    let store = files::load_store(&config.schedules_dir_path())?;

    let mut issues = events::collect_issues(&event_list, &catalog, today);
    issues.extend(schedules::collect_issues(&store, &catalog));
    if !issues.is_empty() {
        eprintln!("Validation issues:");
        for issue in &issues {
            eprintln!("  - {}", issue);
        }
        bail!("fix validation errors before pushing");
    }

    println!(
        "Ready to push: {} event(s), {} schedule(s) across {} key(s)",
        event_list.len(),
        store.total_rows(),
        store.key_count()
    );
    if !prompt::confirm("Push to the shared repository?", assume_yes)? {
        println!("Push cancelled");
        return Ok(());
    }

    let message = message
        .unwrap_or_else(|| format!("Update marquee content - {}", Local::now().format("%Y-%m-%d %H:%M")));

    let paths = [config.events_csv.as_str(), config.schedules_dir.as_str()];
    match git::push(&paths, &message)? {
        PushOutcome::NothingToPush => println!("No changes to push."),
        PushOutcome::Pushed => {
            println!("Pushed to the shared repository.");
            println!("Devices pick the update up at their next daily restart.");
        }
    }
    Ok(())
}
