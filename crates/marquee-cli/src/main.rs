//! `marquee` CLI -- manage signage content and sync it to the device repo.
//!
//! ## Usage
//!
//! ```sh
//! # See what the devices will show
//! marquee event list
//! marquee schedule list
//!
//! # Add an event banner for one date
//! marquee event add --date 2025-12-25 --top "Feliz" --bottom "Navidad" \
//!     --image star.bmp --color RED
//!
//! # Add a recurring entry to the default schedule
//! marquee schedule add default --name "Morning Routine" --days 12345 \
//!     --start 7:00 --end 7:30 --image clock.bmp
//!
//! # Build Christmas day from the default schedule, an hour later
//! marquee schedule derive --from default --to 2025-12-25 --shift 60
//!
//! # Publish everything to the devices
//! marquee push
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use marquee_core::catalog::ImageKind;

mod commands;
mod config;
mod files;
mod git;
mod images;
mod prompt;

use commands::events::EventCommand;
use commands::schedules::ScheduleCommand;
use config::Config;

#[derive(Parser)]
#[command(
    name = "marquee",
    version,
    about = "Content manager for marquee signage devices"
)]
struct Cli {
    /// Path to the config file
    #[arg(long, global = true, default_value = "marquee.toml")]
    config: String,

    /// Answer yes to every confirmation prompt
    #[arg(long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage ephemeral event banners
    #[command(subcommand)]
    Event(EventCommand),
    /// Manage recurring schedules
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// List the images available to a content kind
    Images {
        #[arg(value_enum)]
        kind: ImageKindArg,
    },
    /// Pull the latest content from the shared repository
    Pull,
    /// Validate everything, then commit and push the content files
    Push {
        /// Commit message (defaults to a timestamped one)
        #[arg(short, long)]
        message: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ImageKindArg {
    Events,
    Schedules,
}

impl From<ImageKindArg> for ImageKind {
    fn from(kind: ImageKindArg) -> ImageKind {
        match kind {
            ImageKindArg::Events => ImageKind::Events,
            ImageKindArg::Schedules => ImageKind::Schedules,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Event(command) => commands::events::run(command, &config, cli.yes),
        Commands::Schedule(command) => commands::schedules::run(command, &config, cli.yes),
        Commands::Images { kind } => {
            let dir = match ImageKind::from(kind) {
                ImageKind::Events => config.event_images_path(),
                ImageKind::Schedules => config.schedule_images_path(),
            };
            images::print_listing(&dir, &images::list_bmp(&dir));
            Ok(())
        }
        Commands::Pull => commands::sync::pull(),
        Commands::Push { message } => commands::sync::push(&config, message, cli.yes),
    }
}
