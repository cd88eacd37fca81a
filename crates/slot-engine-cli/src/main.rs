//! `slots` CLI — compute availability and book tables against a restaurant
//! snapshot from the command line.
//!
//! ## Usage
//!
//! ```sh
//! # Bookable slots for a party of 4 (snapshot on stdin)
//! cat restaurant.json | slots available --date 2026-03-16 --party 4
//!
//! # Same, as JSON for scripting
//! slots available -i restaurant.json --date 2026-03-16 --party 4 --format json
//!
//! # Effective opening hours, including special-date overrides
//! slots hours -i restaurant.json --date 2026-12-24
//!
//! # Book the first free table at 19:00 and write the updated snapshot
//! slots book -i restaurant.json -o restaurant.json \
//!   --date 2026-03-16 --time 19:00 --party 4 --guest "Ada Lovelace"
//!
//! # Reservation counts and covers for the dashboard
//! slots summary -i restaurant.json --date 2026-03-16
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use slot_engine::model::hhmm;
use slot_engine::{
    DaySchedule, HoursSource, InMemoryStore, NewReservation, ReservationStatus,
    RestaurantSnapshot, Slot,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    version,
    about = "Restaurant table-slot availability CLI"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log engine decisions to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// List bookable slots and their free tables
    Available {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Number of guests
        #[arg(long)]
        party: u32,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
    /// Show the effective opening hours for a date
    Hours {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
    },
    /// Book a table and emit the updated snapshot
    Book {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file for the updated snapshot (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        /// Slot start time, HH:MM
        #[arg(long, value_parser = parse_time)]
        time: NaiveTime,
        /// Number of guests
        #[arg(long)]
        party: u32,
        /// Guest name
        #[arg(long)]
        guest: String,
        /// Table id (first free table at the slot if omitted)
        #[arg(long)]
        table: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Reservation counts and covers for a date
    Summary {
        /// Snapshot file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Calendar date, YYYY-MM-DD
        #[arg(long, value_parser = parse_date)]
        date: NaiveDate,
        #[arg(long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Available {
            input,
            date,
            party,
            format,
        } => {
            let store = load_store(input.as_deref())?;
            let slots = store.available_slots(date, party);
            let rendered = match format {
                Format::Json => serde_json::to_string_pretty(&slots)?,
                Format::Text => render_slots(&slots, date, party),
            };
            println!("{}", rendered);
        }
        Commands::Hours { input, date } => {
            let store = load_store(input.as_deref())?;
            let special: Vec<_> = store.special_hours_for(date).cloned().into_iter().collect();
            let schedule = slot_engine::day_schedule(date, store.settings(), &special);
            println!("{}", render_schedule(date, &schedule));
        }
        Commands::Book {
            input,
            output,
            date,
            time,
            party,
            guest,
            table,
            phone,
            email,
            notes,
        } => {
            let mut store = load_store(input.as_deref())?;
            let table_id = pick_table(&store.available_slots(date, party), time, table)
                .with_context(|| {
                    format!(
                        "Cannot book {} for a party of {} on {}",
                        hhmm::format(time),
                        party,
                        date
                    )
                })?;

            let reservation = store
                .create_reservation(NewReservation {
                    table_id,
                    date,
                    time,
                    covers: party,
                    guest_name: guest,
                    phone,
                    email,
                    notes,
                    status: ReservationStatus::Confirmed,
                })
                .context("Failed to store reservation")?;
            info!(id = %reservation.id, "booked");
            eprintln!(
                "Booked {} on table {} at {} {}",
                reservation.id,
                reservation.table_id,
                reservation.date,
                hhmm::format(reservation.time)
            );

            let json = store
                .snapshot()
                .to_json_pretty()
                .context("Failed to serialize snapshot")?;
            write_output(output.as_deref(), &json)?;
        }
        Commands::Summary {
            input,
            date,
            format,
        } => {
            let store = load_store(input.as_deref())?;
            let summary = store.day_summary(date);
            match format {
                Format::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
                Format::Text => {
                    println!("Date:          {}", summary.date);
                    println!("Reservations:  {}", summary.reservations);
                    println!("Active covers: {}", summary.active_covers);
                    for (status, count) in &summary.by_status {
                        println!("  {:<12} {}", status.as_str(), count);
                    }
                }
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn parse_date(raw: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD, got '{}': {}", raw, e))
}

fn parse_time(raw: &str) -> std::result::Result<NaiveTime, String> {
    hhmm::parse(raw).map_err(|e| format!("expected HH:MM, got '{}': {}", raw, e))
}

/// Choose the requested table if it is free at `time`, else the first free one.
fn pick_table(slots: &[Slot], time: NaiveTime, requested: Option<String>) -> Result<String> {
    let slot = slots
        .iter()
        .find(|s| s.time == time)
        .with_context(|| format!("No table is free at {}", hhmm::format(time)))?;

    match requested {
        Some(id) => {
            if slot.available_tables.iter().any(|t| t.id == id) {
                Ok(id)
            } else {
                anyhow::bail!("Table '{}' is not free at {}", id, hhmm::format(time))
            }
        }
        None => {
            let first = slot
                .available_tables
                .first()
                .context("Slot lists no free tables")?;
            debug!(table = %first.id, "picked first free table");
            Ok(first.id.clone())
        }
    }
}

fn render_slots(slots: &[Slot], date: NaiveDate, party: u32) -> String {
    if slots.is_empty() {
        return format!("No available slots for a party of {} on {}", party, date);
    }
    slots
        .iter()
        .map(|slot| {
            let tables: Vec<String> = slot
                .available_tables
                .iter()
                .map(|t| format!("{} ({})", t.name, t.capacity))
                .collect();
            format!("{}  {}", hhmm::format(slot.time), tables.join(", "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_schedule(date: NaiveDate, schedule: &DaySchedule) -> String {
    let weekday = slot_engine::weekday_name(date);
    let (state, note) = match schedule {
        DaySchedule::Open {
            open, close, note, ..
        } => (
            format!("open {}-{}", hhmm::format(*open), hhmm::format(*close)),
            note,
        ),
        DaySchedule::Closed { note, .. } => ("closed".to_string(), note),
    };
    let source = match schedule.source() {
        HoursSource::Special => "special hours",
        HoursSource::Weekly => "weekly hours",
        HoursSource::Unconfigured => "no hours configured",
    };
    match note {
        Some(note) => format!("{} {}: {} ({}: {})", date, weekday, state, source, note),
        None => format!("{} {}: {} ({})", date, weekday, state, source),
    }
}

fn load_store(path: Option<&str>) -> Result<InMemoryStore> {
    let json = read_input(path)?;
    let snapshot = RestaurantSnapshot::from_json(&json).context("Failed to parse snapshot")?;
    InMemoryStore::from_snapshot(snapshot).context("Snapshot failed validation")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
