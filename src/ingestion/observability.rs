//! Load outcome reporting.
//!
//! [`super::read_trips_from_path`] tells the configured [`LoadObserver`] whether a city's trip
//! log loaded, how many trips it held, and how bad a failure was. Failures at or above
//! [`super::LoadOptions::alert_at_or_above`] are also raised as alerts.
//!
//! Provided observers: [`LogObserver`] (the `log` facade), [`FileObserver`] (an append-only
//! load log, as written by `bikeshare --load-log`) and [`CompositeObserver`] (fan-out).

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::{SecondsFormat, Utc};

use crate::config::City;
use crate::error::BikeshareError;

use super::unified::SourceFormat;

/// How bad a load failure is. Ordered, so thresholds compare with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LoadSeverity {
    Info,
    Warning,
    /// The trip log is malformed (missing column, unparsable cell).
    Error,
    /// The trip log could not be read at all.
    Critical,
}

/// Which trip log a load event is about.
#[derive(Debug, Clone)]
pub struct LoadContext {
    pub city: City,
    pub path: PathBuf,
    pub format: SourceFormat,
}

impl fmt::Display for LoadContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "city={} format={:?} path={}",
            self.city,
            self.format,
            self.path.display()
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadStats {
    /// Trips read, before any month/day filter.
    pub rows: usize,
}

/// Receives load outcomes. Every callback defaults to a no-op except `on_alert`, which
/// falls back to `on_failure`.
pub trait LoadObserver: Send + Sync {
    fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {}

    fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &BikeshareError) {}

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.on_failure(ctx, severity, error)
    }
}

/// Forwards every event to each inner observer, in insertion order.
#[derive(Default)]
pub struct CompositeObserver {
    observers: Vec<Arc<dyn LoadObserver>>,
}

impl CompositeObserver {
    pub fn new(observers: Vec<Arc<dyn LoadObserver>>) -> Self {
        Self { observers }
    }

    pub fn push(&mut self, observer: Arc<dyn LoadObserver>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

impl fmt::Debug for CompositeObserver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeObserver")
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl LoadObserver for CompositeObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.observers.iter().for_each(|o| o.on_success(ctx, stats));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.observers
            .iter()
            .for_each(|o| o.on_failure(ctx, severity, error));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.observers
            .iter()
            .for_each(|o| o.on_alert(ctx, severity, error));
    }
}

/// Reports load events through the `log` facade (target `bikeshare::load`).
#[derive(Debug, Default)]
pub struct LogObserver;

const LOG_TARGET: &str = "bikeshare::load";

impl LoadObserver for LogObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        log::info!(target: LOG_TARGET, "loaded {ctx} rows={}", stats.rows);
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        let level = match severity {
            LoadSeverity::Info => log::Level::Info,
            LoadSeverity::Warning => log::Level::Warn,
            LoadSeverity::Error | LoadSeverity::Critical => log::Level::Error,
        };
        log::log!(target: LOG_TARGET, level, "load failed severity={severity:?} {ctx} err={error}");
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        log::error!(target: LOG_TARGET, "[ALERT] severity={severity:?} {ctx} err={error}");
    }
}

/// Appends one line per load event to a file:
///
/// ```text
/// 2017-06-01T10:00:00Z ok city=chicago format=Csv path=data/chicago.csv rows=300000
/// 2017-06-01T10:00:05Z fail severity=Critical city=washington format=Csv path=... err=...
/// ```
///
/// The file is opened per event. Open and write failures are dropped so a broken load log
/// never fails a query.
#[derive(Debug)]
pub struct FileObserver {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileObserver {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            lock: Mutex::new(()),
        }
    }

    fn append(&self, event: fmt::Arguments<'_>) {
        let line = format!("{} {event}\n", Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
        let _guard = self.lock.lock().ok();
        if let Ok(mut f) = OpenOptions::new().create(true).append(true).open(&self.path) {
            let _ = f.write_all(line.as_bytes());
        }
    }
}

impl LoadObserver for FileObserver {
    fn on_success(&self, ctx: &LoadContext, stats: LoadStats) {
        self.append(format_args!("ok {ctx} rows={}", stats.rows));
    }

    fn on_failure(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.append(format_args!("fail severity={severity:?} {ctx} err={error}"));
    }

    fn on_alert(&self, ctx: &LoadContext, severity: LoadSeverity, error: &BikeshareError) {
        self.append(format_args!("ALERT severity={severity:?} {ctx} err={error}"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Counting {
        events: Mutex<Vec<&'static str>>,
    }

    impl LoadObserver for Counting {
        fn on_success(&self, _ctx: &LoadContext, _stats: LoadStats) {
            self.events.lock().unwrap().push("ok");
        }

        fn on_failure(&self, _ctx: &LoadContext, _severity: LoadSeverity, _error: &BikeshareError) {
            self.events.lock().unwrap().push("fail");
        }
    }

    fn ctx() -> LoadContext {
        LoadContext {
            city: City::NewYorkCity,
            path: PathBuf::from("data/new_york_city.csv"),
            format: SourceFormat::Csv,
        }
    }

    #[test]
    fn context_display_names_city_format_and_path() {
        assert_eq!(
            ctx().to_string(),
            "city=new york city format=Csv path=data/new_york_city.csv"
        );
    }

    #[test]
    fn composite_forwards_to_every_observer() {
        let a = Arc::new(Counting::default());
        let b = Arc::new(Counting::default());
        let mut composite = CompositeObserver::default();
        composite.push(a.clone());
        composite.push(b.clone());
        assert_eq!(composite.len(), 2);

        let err = BikeshareError::UnknownCity("boston".to_string());
        composite.on_success(&ctx(), LoadStats { rows: 3 });
        // Default on_alert falls back to on_failure.
        composite.on_alert(&ctx(), LoadSeverity::Critical, &err);

        assert_eq!(*a.events.lock().unwrap(), vec!["ok", "fail"]);
        assert_eq!(*b.events.lock().unwrap(), vec!["ok", "fail"]);
    }

    #[test]
    fn severities_order_for_thresholds() {
        assert!(LoadSeverity::Critical > LoadSeverity::Error);
        assert!(LoadSeverity::Error > LoadSeverity::Warning);
        assert!(LoadSeverity::Warning > LoadSeverity::Info);
    }
}
