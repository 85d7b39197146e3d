//! Vakit CLI - iftar and sahur countdown on stdout.
//!
//! ```text
//! config.toml -> VAKIT_* env -> flags -> Settings
//!                                          |
//!       TableSnapshot::load -> TimeTable --+--> --once   next_boundary_from_source
//!                                          +--> --today  PrayerSchedule
//!                                          +--> live     CountdownPump -> render
//!                                                          ^ watch   |
//!                                                          +-- TableReloader (on Unavailable)
//! ```
//!
//! Logs go to `~/.vakit/logs/vakit.log`; stdout carries only the countdown.

mod reload;
mod render;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{Local, TimeZone};
use clap::Parser;
use tokio::sync::watch;
use tokio::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use vakit_config::{LocationConfig, VakitConfig};
use vakit_core::{
    Clock, CountdownEvent, CountdownPump, DailyTimesSource, INTERACTIVE_TICK, PrayerSchedule,
    SystemClock, WIDGET_TICK, next_boundary_from_source, remaining_duration,
};
use vakit_source::TimeTable;
use vakit_types::{BoundaryError, Language};

use crate::reload::{MIN_RELOAD_INTERVAL, TableReloader, load_table};
use crate::render::Style;

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info"))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let (log_file, init_warnings) = open_vakit_log_file();

    if let Some((log_path, file)) = log_file {
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
            .with(env_filter)
            .init();

        tracing::info!(path = %log_path.display(), "Logging initialized");
        for warning in init_warnings {
            tracing::warn!("{warning}");
        }
        return;
    }

    // Without a log file, stay silent rather than interleave logs with the countdown.
    tracing_subscriber::registry().with(env_filter).init();
}

fn open_vakit_log_file() -> (Option<(PathBuf, fs::File)>, Vec<String>) {
    let mut warnings = Vec::new();

    for candidate in vakit_log_file_candidates() {
        if let Some(parent) = candidate.parent()
            && let Err(e) = fs::create_dir_all(parent)
        {
            warnings.push(format!(
                "Failed to create log dir {}: {e}",
                parent.display()
            ));
            continue;
        }

        match OpenOptions::new()
            .create(true)
            .append(true)
            .open(&candidate)
        {
            Ok(file) => return (Some((candidate, file)), warnings),
            Err(e) => {
                warnings.push(format!(
                    "Failed to open log file {}: {e}",
                    candidate.display()
                ));
            }
        }
    }

    (None, warnings)
}

fn vakit_log_file_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    // Primary: ~/.vakit/logs/vakit.log
    if let Some(dir) = vakit_config::vakit_dir() {
        candidates.push(dir.join("logs").join("vakit.log"));
    }

    // Fallback: ./.vakit/logs/vakit.log
    candidates.push(PathBuf::from(".vakit").join("logs").join("vakit.log"));

    candidates
}

#[derive(Debug, Parser)]
#[command(name = "vakit", version, about = "Countdown to the next iftar or sahur")]
struct Args {
    /// Prayer-times snapshot (JSON). Defaults to `~/.vakit/times.json`.
    #[arg(long, value_name = "PATH")]
    table: Option<PathBuf>,

    /// IANA time zone, e.g. `Europe/Istanbul`. Defaults to the system zone.
    #[arg(long, value_name = "NAME")]
    tz: Option<String>,

    /// Display language: `tr` or `en`.
    #[arg(long, value_name = "LANG")]
    lang: Option<Language>,

    /// Print the next boundary once and exit.
    #[arg(long, conflicts_with_all = ["widget", "today"])]
    once: bool,

    /// Coarse countdown with the short label, refreshed every 30 seconds.
    #[arg(long, conflicts_with = "today")]
    widget: bool,

    /// List today's six prayer times.
    #[arg(long)]
    today: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Once,
    Today,
    Live(Style),
}

impl Mode {
    fn from_args(args: &Args) -> Self {
        if args.once {
            Mode::Once
        } else if args.today {
            Mode::Today
        } else if args.widget {
            Mode::Live(Style::Widget)
        } else {
            Mode::Live(Style::Interactive)
        }
    }
}

/// Everything a run needs, after config, env and flags are layered.
#[derive(Debug)]
struct Settings {
    language: Language,
    timezone: Option<chrono_tz::Tz>,
    table: PathBuf,
    tick: Duration,
    location: Option<LocationConfig>,
    mode: Mode,
}

impl Settings {
    fn resolve(args: Args) -> Result<Self> {
        let mut config = match VakitConfig::load() {
            Ok(config) => config.unwrap_or_default(),
            Err(err) => {
                eprintln!("Ignoring config: {err}");
                VakitConfig::default()
            }
        };
        config.apply_env()?;

        let mode = Mode::from_args(&args);
        let language = args.lang.unwrap_or_else(|| config.language());
        let timezone = match args.tz.as_deref() {
            Some(name) => Some(vakit_config::parse_timezone(name)?),
            None => config.timezone()?,
        };
        let table = match args.table {
            Some(path) => vakit_config::expand_home(&path),
            None => config
                .table_path()
                .context("no table path configured and no home directory")?,
        };
        let tick = match mode {
            Mode::Live(Style::Widget) => config.widget_tick().unwrap_or(WIDGET_TICK),
            _ => config.tick().unwrap_or(INTERACTIVE_TICK),
        };

        Ok(Self {
            language,
            timezone,
            table,
            tick,
            location: config.location,
            mode,
        })
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();

    let settings = Settings::resolve(Args::parse())?;
    tracing::debug!(?settings, "Resolved settings");
    let table = match load_table(&settings.table) {
        Ok(table) => table,
        // Live mode waits for the snapshot to appear instead of exiting.
        Err(err) if matches!(settings.mode, Mode::Live(_)) => {
            tracing::warn!("Starting without prayer times: {err:#}");
            eprintln!("{err:#}");
            TimeTable::default()
        }
        Err(err) => return Err(err),
    };

    match settings.timezone {
        Some(tz) => run(SystemClock::new(tz), table, &settings).await,
        None => run(SystemClock::new(Local), table, &settings).await,
    }
}

async fn run<Tz>(clock: SystemClock<Tz>, table: TimeTable, settings: &Settings) -> Result<ExitCode>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    match settings.mode {
        Mode::Once => Ok(print_once(&clock, &table, settings.language)),
        Mode::Today => Ok(print_today(&clock, &table, settings)),
        Mode::Live(style) => {
            let reloader = TableReloader::new(&settings.table, settings.tick.max(MIN_RELOAD_INTERVAL))
                .attempted_at(Instant::now());
            let shutdown = tokio::signal::ctrl_c();
            run_live(clock, table, reloader, settings.tick, settings.language, style, shutdown)
                .await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn print_once<C, S>(clock: &C, source: &S, lang: Language) -> ExitCode
where
    C: Clock,
    S: DailyTimesSource + ?Sized,
{
    let now = clock.now();
    match next_boundary_from_source(&now, source) {
        Ok(boundary) => {
            let remaining = remaining_duration(&now, &boundary.target_instant);
            println!(
                "{}",
                render::boundary_line(&boundary, remaining, lang, Style::Interactive)
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::warn!(%err, "No boundary available");
            println!("{}", render::unavailable_line(&err, lang));
            ExitCode::FAILURE
        }
    }
}

fn print_today<C: Clock>(clock: &C, table: &TimeTable, settings: &Settings) -> ExitCode {
    let lang = settings.language;
    let now = clock.now();
    let date = now.date_naive();
    let Some(day) = table.daily_times(date) else {
        let err = BoundaryError::MissingData { date };
        tracing::warn!(%err, "No prayer times for today");
        println!("{}", render::unavailable_line(&err, lang));
        return ExitCode::FAILURE;
    };

    if let Some(location) = settings.location.as_ref().and_then(render::location_line) {
        println!("{location}");
    }
    if let Some(dates) = table.labels(date).and_then(render::date_line) {
        println!("{dates}");
    }
    match PrayerSchedule::resolve(&now.timezone(), day) {
        Ok(schedule) => {
            for line in render::today_lines(&schedule, &now, lang) {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::warn!(%err, "Today's prayer times are unusable");
            println!("{}", render::unavailable_line(&err, lang));
            ExitCode::FAILURE
        }
    }
}

/// Prints countdown events until `shutdown` resolves or the pump stops.
async fn run_live<C, F>(
    clock: C,
    table: TimeTable,
    mut reloader: TableReloader,
    tick: Duration,
    lang: Language,
    style: Style,
    shutdown: F,
) -> Result<()>
where
    C: Clock + 'static,
    C::Tz: Send + Sync + 'static,
    <C::Tz as TimeZone>::Offset: Send + Sync,
    F: Future<Output = io::Result<()>>,
{
    tracing::info!(?tick, ?style, "Starting countdown");
    let (table_tx, table_rx) = watch::channel(Arc::new(table));
    let mut pump = CountdownPump::spawn_watched(clock, table_rx, tick);

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            event = pump.recv() => {
                let Some(event) = event else {
                    tracing::warn!("Countdown task stopped");
                    break;
                };
                println!("{}", render::event_line(&event, lang, style));
                if matches!(event, CountdownEvent::Unavailable(_))
                    && let Some(table) = reloader.reload_due(Instant::now())
                {
                    tracing::info!("Reloaded prayer times");
                    // The pump holds the receiver until shutdown.
                    let _ = table_tx.send(Arc::new(table));
                }
            }
            signal = &mut shutdown => {
                signal.context("failed to listen for Ctrl-C")?;
                tracing::info!("Interrupted; shutting down");
                break;
            }
        }
    }

    pump.shutdown().await;
    Ok(())
}
