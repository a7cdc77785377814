mod menu;

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use fitlog_core::builder::{self, parse_count, parse_date, parse_macro, parse_number, parse_set};
use fitlog_core::*;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "fitlog")]
#[command(about = "Personal fitness log for workouts, cardio, nutrition and bodyweight", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true, env = "FITLOG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Read configuration from this file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive numbered menu (default)
    Menu,

    /// Log a single entry without prompting
    Log {
        #[command(subcommand)]
        entry: LogEntry,
    },

    /// Show the most recent entries of one kind
    History {
        /// workout, cardio, nutrition or bodyweight
        kind: EntryKind,

        /// Number of entries to show (defaults to history.limit from config)
        #[arg(long)]
        limit: Option<usize>,

        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum LogEntry {
    /// One exercise with one or more sets
    Workout {
        #[arg(long)]
        exercise: String,

        /// A set as REPSxWEIGHT, repeat in order (e.g. --set 10x60 --set 8x65)
        #[arg(long = "set", value_name = "REPSxWEIGHT", allow_hyphen_values = true)]
        sets: Vec<String>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// A cardio session
    Cardio {
        /// walk, run, bike, etc.
        #[arg(long)]
        activity: String,

        /// Duration in minutes
        #[arg(long, allow_hyphen_values = true)]
        duration: String,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// A day of eating
    Nutrition {
        #[arg(long, allow_hyphen_values = true)]
        calories: String,

        /// Protein in grams
        #[arg(long, allow_hyphen_values = true)]
        protein: Option<String>,

        /// Carbs in grams
        #[arg(long, allow_hyphen_values = true)]
        carbs: Option<String>,

        /// Fats in grams
        #[arg(long, allow_hyphen_values = true)]
        fats: Option<String>,

        /// Any other nutrient as NAME=GRAMS, repeatable
        #[arg(long = "macro", value_name = "NAME=GRAMS")]
        macros: Vec<String>,

        /// Everything eaten was tracked
        #[arg(long)]
        tracked: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// A bodyweight weigh-in
    Bodyweight {
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(clap::Args)]
struct CommonArgs {
    /// Date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    #[arg(long, default_value = "")]
    notes: String,
}

impl CommonArgs {
    fn date(&self, today: NaiveDate) -> std::result::Result<NaiveDate, ValidationError> {
        parse_date(self.date.as_deref().unwrap_or(""), today)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    fitlog_core::logging::init_with_level(if cli.verbose { "debug" } else { "warn" });

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Determine data directory
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let mut store = CsvStore::new(data_dir);
    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Log { entry }) => cmd_log(&mut store, entry, today),
        Some(Commands::History { kind, limit, json }) => {
            cmd_history(&store, kind, limit.unwrap_or(config.history.limit), json)
        }
        Some(Commands::Menu) | None => {
            let stdin = io::stdin();
            menu::Menu::new(
                &mut store,
                stdin.lock(),
                io::stdout(),
                config.history.limit,
                today,
            )
            .run()
        }
    }
}

fn cmd_log(store: &mut CsvStore, entry: LogEntry, today: NaiveDate) -> Result<()> {
    let record: Record = match entry {
        LogEntry::Workout {
            exercise,
            sets,
            common,
        } => {
            let sets = sets
                .iter()
                .map(|s| parse_set(s))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            builder::build_workout(common.date(today)?, &exercise, &sets, &common.notes)?.into()
        }

        LogEntry::Cardio {
            activity,
            duration,
            common,
        } => {
            let duration = parse_number("duration", &duration)?;
            builder::build_cardio(common.date(today)?, &activity, duration, &common.notes)?.into()
        }

        LogEntry::Nutrition {
            calories,
            protein,
            carbs,
            fats,
            macros,
            tracked,
            common,
        } => {
            let calories = parse_count("calories", &calories)?;

            let mut grams = Vec::new();
            for (name, value) in [("protein", protein), ("carbs", carbs), ("fats", fats)] {
                if let Some(value) = value {
                    grams.push((name.to_string(), parse_number(name, &value)?));
                }
            }
            for m in &macros {
                grams.push(parse_macro(m)?);
            }

            builder::build_nutrition(
                common.date(today)?,
                i64::from(calories),
                grams,
                tracked,
                &common.notes,
            )?
            .into()
        }

        LogEntry::Bodyweight { weight, common } => {
            let weight = parse_number("bodyweight", &weight)?;
            builder::build_bodyweight(common.date(today)?, weight, &common.notes)?.into()
        }
    };

    store.append(&record)?;

    println!("✓ Saved {} entry", record.kind());
    println!("  {}", record);
    Ok(())
}

fn cmd_history(store: &CsvStore, kind: EntryKind, limit: usize, json: bool) -> Result<()> {
    let table = store.load()?;
    let recent = recent_entries(&table, kind, limit);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if json {
        let rendered = serde_json::to_string_pretty(&recent)?;
        writeln!(out, "{}", rendered)?;
        return Ok(());
    }

    menu::print_history(&mut out, kind, &recent)
}
