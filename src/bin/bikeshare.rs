//! `bikeshare`: explore bike-share trip statistics from the terminal.
//!
//! With `--city` the tool runs one query cycle and exits. Without it, it asks for a city and
//! filters interactively, offers to page through raw rows, prints the statistics and asks
//! whether to start over.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Parser;

use bikeshare_stats::config::{BikeshareConfig, City};
use bikeshare_stats::ingestion::{CompositeObserver, FileObserver, LoadOptions, LogObserver};
use bikeshare_stats::loader::load;
use bikeshare_stats::processing::filter::ALL;
use bikeshare_stats::processing::FilterCriteria;
use bikeshare_stats::stats::{DurationBreakdown, StatsReport};
use bikeshare_stats::types::{TripDataset, TripRecord, DAY_NAMES};

/// Raw-row page sizes the interactive mode accepts.
const PAGE_SIZE_RANGE: std::ops::RangeInclusive<usize> = 1..=10;

const RULE: &str = "----------------------------------------";

#[derive(Parser, Debug)]
#[command(name = "bikeshare", version, about = "Explore US bike-share trip statistics")]
struct Cli {
    /// City to analyze (chicago, new york city, washington). Omit for interactive mode.
    #[arg(long)]
    city: Option<String>,

    /// Month filter (january ... june, or all)
    #[arg(long, default_value = ALL)]
    month: String,

    /// Day-of-week filter (monday ... sunday, or all)
    #[arg(long, default_value = ALL)]
    day: String,

    /// JSON configuration file (data directory, per-city sources, month names)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory holding the trip logs; overrides the configuration's data_dir
    #[arg(long, env = "BIKESHARE_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Print the first N raw rows before the statistics (non-interactive mode)
    #[arg(long)]
    rows: Option<usize>,

    /// Print statistics as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Append load outcomes to this file
    #[arg(long)]
    load_log: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = match &cli.config {
        Some(path) => BikeshareConfig::from_json_path(path)
            .with_context(|| format!("reading configuration {}", path.display()))?,
        None => BikeshareConfig::default(),
    };
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }

    let mut observers = CompositeObserver::default();
    observers.push(Arc::new(LogObserver));
    if let Some(path) = &cli.load_log {
        observers.push(Arc::new(FileObserver::new(path)));
    }
    let options = LoadOptions {
        observer: Some(Arc::new(observers)),
        ..Default::default()
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.city {
        Some(city) => {
            let city: City = city.parse()?;
            let criteria = FilterCriteria::from_names(&config, &cli.month, &cli.day)?;
            let ds = load(&config, city, &criteria, &options)
                .with_context(|| format!("loading {city} trips"))?;
            if let Some(n) = cli.rows {
                write_rows(&mut out, ds.cursor().next_page(n))?;
            }
            let report = StatsReport::compute(&ds, &config);
            if cli.json {
                serde_json::to_writer_pretty(&mut out, &report)?;
                writeln!(out)?;
            } else {
                write_report(&mut out, &report)?;
            }
            Ok(())
        }
        None => {
            let stdin = io::stdin();
            let mut session = Session {
                input: stdin.lock(),
                out,
                config: &config,
            };
            session.run(&options, cli.json)
        }
    }
}

/// Raised when stdin closes in the middle of a prompt.
#[derive(Debug, thiserror::Error)]
#[error("input closed")]
struct InputClosed;

/// Interactive prompt loop.
struct Session<'c, R, W> {
    input: R,
    out: W,
    config: &'c BikeshareConfig,
}

impl<R: BufRead, W: Write> Session<'_, R, W> {
    fn run(&mut self, options: &LoadOptions, json: bool) -> Result<()> {
        match self.cycles(options, json) {
            Err(e) if e.is::<InputClosed>() => {
                writeln!(self.out, "\nInput closed: exit program!")?;
                Ok(())
            }
            other => other,
        }
    }

    fn cycles(&mut self, options: &LoadOptions, json: bool) -> Result<()> {
        loop {
            writeln!(self.out, "Hello! Let's explore some US bikeshare data!")?;
            let (city, criteria) = self.ask_filters()?;
            let ds = load(self.config, city, &criteria, options)
                .with_context(|| format!("loading {city} trips"))?;
            writeln!(
                self.out,
                "{} trips in {city} match {}.",
                ds.row_count(),
                criteria.describe(self.config)
            )?;

            self.page_raw_rows(&ds)?;

            let report = StatsReport::compute(&ds, self.config);
            if json {
                serde_json::to_writer_pretty(&mut self.out, &report)?;
                writeln!(self.out)?;
            } else {
                write_report(&mut self.out, &report)?;
            }

            let restart = self.ask_line("\nWould you like to restart? Enter yes or no.")?;
            if !restart.eq_ignore_ascii_case("yes") {
                return Ok(());
            }
        }
    }

    fn ask_line(&mut self, prompt: &str) -> Result<String> {
        writeln!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(InputClosed.into());
        }
        Ok(line.trim().to_owned())
    }

    /// Ask until `parse` accepts the answer, printing its rejection message otherwise.
    fn ask_until<T>(&mut self, prompt: &str, mut parse: impl FnMut(&str) -> Result<T, String>) -> Result<T> {
        loop {
            let answer = self.ask_line(prompt)?;
            match parse(&answer) {
                Ok(v) => return Ok(v),
                Err(message) => writeln!(self.out, "{message}")?,
            }
        }
    }

    fn ask_filters(&mut self) -> Result<(City, FilterCriteria)> {
        let city = self.ask_until(
            "Which city (chicago, new york city, washington) would you like to explore?",
            |answer| {
                if answer.eq_ignore_ascii_case(ALL) {
                    return Err("You can only explore one city at a time.".to_string());
                }
                answer.parse::<City>().map_err(|_| "Invalid city!".to_string())
            },
        )?;

        let (by_month, by_day) = self.ask_until(
            "Would you like to filter the data by month, day, both, or none? Type none if you don't want to filter.",
            |answer| match answer.to_ascii_lowercase().as_str() {
                "month" => Ok((true, false)),
                "day" => Ok((false, true)),
                "both" => Ok((true, true)),
                "none" => Ok((false, false)),
                _ => Err("Invalid filter. Please choose among: month, day, both, none".to_string()),
            },
        )?;

        let config = self.config;
        let mut criteria = FilterCriteria::all();
        if by_month {
            let prompt = format!(
                "Which month ({ALL}, {}) would you like to explore?",
                config.months.join(", ")
            );
            criteria.month = self.ask_until(&prompt, |answer| {
                FilterCriteria::from_names(config, answer, ALL)
                    .map(|c| c.month)
                    .map_err(|_| "Invalid month!".to_string())
            })?;
        }
        if by_day {
            let prompt = format!(
                "Which day of the week ({ALL}, {}) would you like to explore?",
                DAY_NAMES.join(", ").to_lowercase()
            );
            criteria.day = self.ask_until(&prompt, |answer| {
                FilterCriteria::from_names(config, ALL, answer)
                    .map(|c| c.day)
                    .map_err(|_| "Invalid day!".to_string())
            })?;
        }
        Ok((city, criteria))
    }

    fn page_raw_rows(&mut self, ds: &TripDataset) -> Result<()> {
        let show = self.ask_until("Would you like to explore the raw data? Enter yes or no", yes_no)?;
        if !show {
            return Ok(());
        }

        let prompt = format!(
            "How many rows would you like to display at a time? (an integer in [{}, {}])",
            PAGE_SIZE_RANGE.start(),
            PAGE_SIZE_RANGE.end()
        );
        let step = self.ask_until(&prompt, |answer| {
            let n: usize = answer.parse().map_err(|e| format!("Error: {e}"))?;
            if PAGE_SIZE_RANGE.contains(&n) {
                Ok(n)
            } else {
                Err(format!(
                    "Input value {n} is not in range [{}, {}]",
                    PAGE_SIZE_RANGE.start(),
                    PAGE_SIZE_RANGE.end()
                ))
            }
        })?;

        let mut cursor = ds.cursor();
        write_rows(&mut self.out, cursor.next_page(step))?;
        while !cursor.is_exhausted() {
            let prompt = format!("Show {step} more rows? Enter y or n");
            let more = self.ask_until(&prompt, |answer| match answer {
                "y" => Ok(true),
                "n" => Ok(false),
                _ => Err("Invalid input!".to_string()),
            })?;
            if !more {
                break;
            }
            write_rows(&mut self.out, cursor.next_page(step))?;
        }
        writeln!(self.out, "{RULE}")?;
        Ok(())
    }
}

fn yes_no(answer: &str) -> Result<bool, String> {
    match answer.to_ascii_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        _ => Err("Invalid input! Enter yes or no.".to_string()),
    }
}

fn write_rows(out: &mut impl Write, rows: &[TripRecord]) -> io::Result<()> {
    for r in rows {
        writeln!(
            out,
            "{} | {} | {} -> {} | {}s | {} | {} | {}",
            r.start_time,
            r.end_time.map(|t| t.to_string()).unwrap_or_default(),
            r.start_station,
            r.end_station,
            r.duration_secs,
            r.user_type.as_ref().map(|u| u.as_str()).unwrap_or(""),
            r.gender.as_ref().map(|g| g.as_str()).unwrap_or(""),
            r.birth_year.map(|y| y.to_string()).unwrap_or_default(),
        )?;
    }
    Ok(())
}

fn list<T: ToString>(values: &[T]) -> String {
    if values.is_empty() {
        "(no data)".to_string()
    } else {
        values.iter().map(T::to_string).collect::<Vec<_>>().join(", ")
    }
}

fn hms(d: &DurationBreakdown) -> String {
    format!("{} [hours], {} [minutes], {} [seconds]", d.hours, d.minutes, d.seconds)
}

fn write_report(out: &mut impl Write, report: &StatsReport) -> io::Result<()> {
    let t = &report.travel_time;
    writeln!(out, "\nThe Most Frequent Times of Travel\n")?;
    writeln!(out, "The most common month(s): {}", list(&t.common_months))?;
    writeln!(out, "The most common day(s) of week: {}", list(&t.common_days))?;
    writeln!(out, "The most common start hour(s): {}", list(&t.common_start_hours))?;
    writeln!(out, "{RULE}")?;

    let s = &report.stations;
    writeln!(out, "\nThe Most Popular Stations and Trip\n")?;
    writeln!(out, "The most commonly used start station(s): {}", list(&s.common_start_stations))?;
    writeln!(out, "The most commonly used end station(s): {}", list(&s.common_end_stations))?;
    writeln!(out, "The most frequent combination of start and end station(s):")?;
    if s.common_trips.is_empty() {
        writeln!(out, "(no data)")?;
    }
    for pair in &s.common_trips {
        writeln!(out, "From '{}' To '{}'", pair.start, pair.end)?;
    }
    writeln!(out, "{RULE}")?;

    let d = &report.trip_duration;
    writeln!(out, "\nTrip Duration\n")?;
    writeln!(out, "Total travel time: {}.", hms(&d.total))?;
    match (&d.mean, d.mean_seconds) {
        (Some(mean), Some(exact)) => writeln!(out, "Mean travel time: {} ({exact:.3} s).", hms(mean))?,
        _ => writeln!(out, "Mean travel time: (no data)")?,
    }
    writeln!(out, "{RULE}")?;

    let u = &report.users;
    writeln!(out, "\nUser Stats\n")?;
    writeln!(out, "User type statistics:")?;
    writeln!(out, "Count of Subscriber users: {}", u.user_types.subscriber)?;
    writeln!(out, "Count of Customer users: {}", u.user_types.customer)?;
    writeln!(out, "Count of Unknown users: {}", u.user_types.unknown)?;
    if let Some(demo) = &u.demographics {
        writeln!(out, "User gender statistics:")?;
        writeln!(out, "Count of Female users: {}", demo.gender.female)?;
        writeln!(out, "Count of Male users: {}", demo.gender.male)?;
        writeln!(out, "Count of Unknown users: {}", demo.gender.unknown)?;
        let year = |y: Option<i32>| y.map(|y| y.to_string()).unwrap_or_else(|| "(no data)".to_string());
        writeln!(out, "Birth Year statistics:")?;
        writeln!(out, "The earliest year of birth: {}", year(demo.earliest_birth_year))?;
        writeln!(out, "The most recent year of birth: {}", year(demo.most_recent_birth_year))?;
        writeln!(out, "The most common year(s) of birth: {}", list(&demo.common_birth_years))?;
    }
    writeln!(out, "{RULE}")
}
