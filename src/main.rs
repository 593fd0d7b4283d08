use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use activity_ledger::calculate::{count_clears_in_range, count_daily_clears};
use activity_ledger::catalog::{catalog, ActivityNames};
use activity_ledger::classify::{classify, classify_activity};
use activity_ledger::config::{check_duration_bounds, AppConfig};
use activity_ledger::filter::filter_activities;
use activity_ledger::history;
use activity_ledger::models::{
    ActivityHash, ActivityType, CompletedActivity, ModeTag, SortConfiguration, SortKey,
    SortOrder, TimeRange,
};
use activity_ledger::parse_duration_seconds;
use activity_ledger::reset::ResetTimes;
use activity_ledger::sort::sort_activities;
use activity_ledger::storage::{read_history, read_name_table, write_history};

#[derive(Parser)]
#[command(name = "activity-ledger")]
#[command(about = "Destiny 2 activity history filtering and daily clear tracking")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Activity history file (JSON Lines), overrides the config
    #[arg(long)]
    history: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error), overrides the config
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered and sorted activity history
    List {
        /// Sort key: time, duration or name
        #[arg(long)]
        sort_by: Option<SortKey>,

        /// Sort order: asc or desc
        #[arg(long)]
        order: Option<SortOrder>,

        /// Time range: all, today, week or month
        #[arg(long)]
        range: Option<TimeRange>,

        /// Minimum duration (e.g., "20m", "90s")
        #[arg(long)]
        min_duration: Option<String>,

        /// Maximum duration (e.g., "2h")
        #[arg(long)]
        max_duration: Option<String>,

        #[arg(long)]
        no_raids: bool,

        #[arg(long)]
        no_dungeons: bool,

        #[arg(long)]
        no_strikes: bool,

        #[arg(long)]
        no_lost_sectors: bool,

        #[arg(long)]
        hide_completed: bool,

        #[arg(long)]
        hide_incomplete: bool,

        /// Hide runs started from the beginning
        #[arg(long)]
        hide_fresh: bool,

        /// Hide runs started from a checkpoint
        #[arg(long)]
        hide_checkpoint: bool,

        /// Only show this raid (any hash sharing its name); repeatable
        #[arg(long = "raid")]
        raids: Vec<ActivityHash>,

        /// Only show this dungeon; repeatable
        #[arg(long = "dungeon")]
        dungeons: Vec<ActivityHash>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Count completed activities since the last daily reset
    Daily,

    /// Count completed activities per time range
    Clears {
        /// Only this range: all, today, week or month
        #[arg(long)]
        range: Option<TimeRange>,
    },

    /// Merge another history export into the history file
    Import {
        /// JSON Lines file of fetched activities
        file: PathBuf,

        /// Also drop old strikes, old lost sectors and unclassified records
        #[arg(long)]
        prune: bool,
    },

    /// Show the current reset times
    Reset,

    /// Classify a list of game-mode tags
    Classify {
        modes: Vec<ModeTag>,
    },

    /// List known raids and dungeons
    Catalog,
}

fn init_tracing(level: &str, json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // The config may set the log level, so it loads before tracing starts
    let (mut config, source) = AppConfig::load_with_source(&cli.config)
        .with_context(|| format!("Failed to load config from {:?}", cli.config))?;
    if let Some(history) = cli.history.clone() {
        config.history_path = history;
    }

    let level = cli.log_level.clone().unwrap_or_else(|| config.log_level.clone());
    init_tracing(&level, cli.json_logs);

    tracing::debug!("Starting activity-ledger v{}", env!("CARGO_PKG_VERSION"));
    tracing::debug!("Configuration from {}", source);

    let now = Utc::now();

    match cli.command {
        Commands::List {
            sort_by,
            order,
            range,
            min_duration,
            max_duration,
            no_raids,
            no_dungeons,
            no_strikes,
            no_lost_sectors,
            hide_completed,
            hide_incomplete,
            hide_fresh,
            hide_checkpoint,
            raids,
            dungeons,
            json,
        } => {
            let mut filter = config
                .preferences
                .filters
                .to_filter()
                .context("Invalid filter preferences")?;
            let stored_sort = config
                .preferences
                .sorting
                .to_sort()
                .context("Invalid sort preferences")?;

            for (activity_type, hide) in [
                (ActivityType::Raid, no_raids),
                (ActivityType::Dungeon, no_dungeons),
                (ActivityType::Strike, no_strikes),
                (ActivityType::LostSector, no_lost_sectors),
            ] {
                if hide {
                    filter = filter.with_type(activity_type, false);
                }
            }
            filter.show_completed &= !hide_completed;
            filter.show_incomplete &= !hide_incomplete;
            filter.show_fresh_start &= !hide_fresh;
            filter.show_checkpoint &= !hide_checkpoint;

            if let Some(min) = min_duration {
                filter.min_duration_seconds = Some(
                    parse_duration_seconds(&min)
                        .with_context(|| format!("Invalid --min-duration: {}", min))?,
                );
            }
            if let Some(max) = max_duration {
                filter.max_duration_seconds = Some(
                    parse_duration_seconds(&max)
                        .with_context(|| format!("Invalid --max-duration: {}", max))?,
                );
            }
            check_duration_bounds(filter.min_duration_seconds, filter.max_duration_seconds)
                .context("Invalid duration overrides")?;

            for hash in raids {
                filter.specific_raids.insert(hash, true);
            }
            for hash in dungeons {
                filter.specific_dungeons.insert(hash, true);
            }

            let sort = SortConfiguration {
                sort_by: sort_by.unwrap_or(stored_sort.sort_by),
                order: order.unwrap_or(stored_sort.order),
                time_range: range.unwrap_or(stored_sort.time_range),
            };

            let activities = load_history(&config)?;
            let extra_names = load_names(&config)?;
            let names = (catalog(), &extra_names);

            let filtered = filter_activities(&activities, &filter, catalog());
            let sorted = sort_activities(filtered, &sort, &names, now);

            if json {
                println!("{}", serde_json::to_string_pretty(&sorted)?);
            } else {
                for activity in &sorted {
                    println!("{}", format_row(activity, &names));
                }
                println!("\n{} of {} activities shown", sorted.len(), activities.len());
            }

            if config.preferences.display_daily_clears && !json {
                println!("Daily clears: {}", count_daily_clears(&activities, now));
            }
        }

        Commands::Daily => {
            let activities = load_history(&config)?;
            println!("{}", count_daily_clears(&activities, now));
        }

        Commands::Clears { range } => {
            let activities = load_history(&config)?;
            let ranges = match range {
                Some(range) => vec![range],
                None => vec![
                    TimeRange::Today,
                    TimeRange::Week,
                    TimeRange::Month,
                    TimeRange::All,
                ],
            };

            println!("=== Clears ===");
            for range in ranges {
                let count = count_clears_in_range(&activities, range, now);
                println!("{:<7} {}", format!("{:?}:", range), count);
            }
        }

        Commands::Import { file, prune } => {
            let existing = load_history(&config)?;
            let incoming = read_history(&file)
                .with_context(|| format!("Failed to read activities from {:?}", file))?;

            if !history::has_new_activities(&existing, &incoming) {
                tracing::info!("{:?} has nothing newer than the stored history", file);
            }

            let before = existing.len();
            let mut merged = history::merge(existing, incoming);
            let added = merged.len() - before;
            if prune {
                history::retain_relevant(&mut merged, catalog(), now);
            }

            let written = write_history(&config.history_path, &merged).with_context(|| {
                format!("Failed to write history to {:?}", config.history_path)
            })?;
            println!("Added {} activities, {} stored", added, written);
        }

        Commands::Reset => {
            let times = ResetTimes::at(now);
            println!("=== Resets ===");
            println!("Daily:  {}", times.daily);
            println!("Weekly: {}", times.weekly);
            println!("Month:  {}", times.month);
        }

        Commands::Classify { modes } => match classify(&modes) {
            Some(activity_type) => println!("{}", activity_type),
            None => println!("Unclassified"),
        },

        Commands::Catalog => {
            let catalog = catalog();
            println!("=== Raids ===");
            for (name, hashes) in catalog.raids_by_name() {
                let hashes: Vec<_> = hashes.iter().map(|h| h.to_string()).collect();
                println!("{:<24} {}", name, hashes.join(", "));
            }
            println!("\n=== Dungeons ===");
            for (name, hash) in catalog.dungeons_by_name() {
                println!("{:<24} {}", name, hash);
            }
        }
    }

    Ok(())
}

fn load_history(config: &AppConfig) -> Result<Vec<CompletedActivity>> {
    let mut activities = read_history(&config.history_path)
        .with_context(|| format!("Failed to read history from {:?}", config.history_path))?;

    activities = history::dedup(activities);
    history::sort_newest_first(&mut activities);
    Ok(activities)
}

fn load_names(config: &AppConfig) -> Result<HashMap<ActivityHash, String>> {
    match &config.names_path {
        Some(path) => read_name_table(path)
            .with_context(|| format!("Failed to read activity names from {:?}", path)),
        None => Ok(HashMap::new()),
    }
}

fn format_row(activity: &CompletedActivity, names: &impl ActivityNames) -> String {
    let activity_type = classify_activity(activity)
        .map(|t| t.label())
        .unwrap_or("Unknown");
    let name = names
        .activity_name(activity.activity_hash)
        .map(str::to_string)
        .unwrap_or_else(|| activity.activity_hash.to_string());
    let status = if activity.completed { "cleared" } else { "incomplete" };
    let start = match activity.started_fresh() {
        Some(true) => "fresh",
        Some(false) => "checkpoint",
        None => "-",
    };

    format!(
        "{}  {:<11} {:<24} {:>12}  {:<10} {}",
        activity.period.format("%Y-%m-%d %H:%M"),
        activity_type,
        name,
        activity.duration.display,
        status,
        start
    )
}
