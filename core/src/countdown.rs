//! Tick-driven countdown over the next-boundary calculator.
//!
//! The calculator is stateless; this module is the caller that keeps the
//! implicit two-state cycle (counting to iftar, counting to sahur) going.
//! Each tick measures the remaining time and, once it reaches zero or no
//! boundary is known yet, asks the calculator for the next one.
//!
//! ```text
//! interval tick -> clock.now() -> CountdownState::advance -> mpsc -> consumer
//!                                        ^
//!                   watch::Receiver<Arc<S>> (replaced table)
//! ```

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, TimeZone};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use vakit_types::{BoundaryError, BoundaryResult};

use crate::calculator::remaining_duration;
use crate::clock::Clock;
use crate::source::{DailyTimesSource, next_boundary_from_source};

/// Refresh cadence for an interactive, on-screen countdown.
pub const INTERACTIVE_TICK: Duration = Duration::from_secs(1);
/// Refresh cadence for a background widget timeline.
pub const WIDGET_TICK: Duration = Duration::from_secs(30);

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq)]
pub enum CountdownEvent<Tz: TimeZone> {
    /// Still counting towards `boundary`.
    Tick {
        boundary: BoundaryResult<Tz>,
        remaining: TimeDelta,
    },
    /// `from` was reached and the countdown moved on to `to`.
    Rollover {
        from: BoundaryResult<Tz>,
        to: BoundaryResult<Tz>,
        remaining: TimeDelta,
    },
    /// No boundary could be computed. Retried on the next tick.
    Unavailable(BoundaryError),
}

impl<Tz: TimeZone> CountdownEvent<Tz> {
    /// The boundary being counted to, if any.
    #[must_use]
    pub fn boundary(&self) -> Option<&BoundaryResult<Tz>> {
        match self {
            Self::Tick { boundary, .. } => Some(boundary),
            Self::Rollover { to, .. } => Some(to),
            Self::Unavailable(_) => None,
        }
    }

    #[must_use]
    pub fn remaining(&self) -> Option<TimeDelta> {
        match self {
            Self::Tick { remaining, .. } | Self::Rollover { remaining, .. } => Some(*remaining),
            Self::Unavailable(_) => None,
        }
    }
}

/// Synchronous countdown state; one `advance` per tick.
#[derive(Debug, Clone)]
pub struct CountdownState<Tz: TimeZone> {
    current: Option<BoundaryResult<Tz>>,
}

impl<Tz: TimeZone> Default for CountdownState<Tz> {
    fn default() -> Self {
        Self { current: None }
    }
}

impl<Tz: TimeZone> CountdownState<Tz> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn current(&self) -> Option<&BoundaryResult<Tz>> {
        self.current.as_ref()
    }

    /// Forget the current boundary so the next `advance` recomputes it.
    pub fn reset(&mut self) {
        self.current = None;
    }

    pub fn advance<S>(&mut self, now: &DateTime<Tz>, source: &S) -> CountdownEvent<Tz>
    where
        S: DailyTimesSource + ?Sized,
    {
        if let Some(current) = &self.current {
            let remaining = remaining_duration(now, &current.target_instant);
            if remaining > TimeDelta::zero() {
                return CountdownEvent::Tick {
                    boundary: current.clone(),
                    remaining,
                };
            }
        }

        match next_boundary_from_source(now, source) {
            Ok(next) => {
                let remaining = remaining_duration(now, &next.target_instant);
                match self.current.replace(next.clone()) {
                    Some(previous) => {
                        tracing::debug!(
                            from = %previous.kind,
                            to = %next.kind,
                            target = %next.source_time,
                            "Countdown rolled over"
                        );
                        CountdownEvent::Rollover {
                            from: previous,
                            to: next,
                            remaining,
                        }
                    }
                    None => {
                        tracing::debug!(
                            kind = %next.kind,
                            target = %next.source_time,
                            "Countdown started"
                        );
                        CountdownEvent::Tick {
                            boundary: next,
                            remaining,
                        }
                    }
                }
            }
            Err(err) => {
                tracing::warn!("Next boundary unavailable: {err}");
                self.current = None;
                CountdownEvent::Unavailable(err)
            }
        }
    }
}

/// Background countdown task with an event channel.
///
/// Dropping the pump aborts the task; [`CountdownPump::shutdown`] does the
/// same but also waits for it to finish.
pub struct CountdownPump<Tz: TimeZone> {
    rx: mpsc::Receiver<CountdownEvent<Tz>>,
    join: Option<JoinHandle<()>>,
}

impl<Tz> CountdownPump<Tz>
where
    Tz: TimeZone + Send + Sync + 'static,
    Tz::Offset: Send + Sync,
{
    /// Start ticking every `tick` over a table that never changes.
    /// The first tick fires immediately.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn<C, S>(clock: C, source: Arc<S>, tick: Duration) -> Self
    where
        C: Clock<Tz = Tz> + 'static,
        S: DailyTimesSource + Send + Sync + ?Sized + 'static,
    {
        let (_tx, rx) = watch::channel(source);
        Self::spawn_watched(clock, rx, tick)
    }

    /// Like [`CountdownPump::spawn`], but the table can be replaced through
    /// the matching `watch::Sender`. A replacement resets the countdown, so
    /// the next tick recomputes against the new table.
    pub fn spawn_watched<C, S>(clock: C, source: watch::Receiver<Arc<S>>, tick: Duration) -> Self
    where
        C: Clock<Tz = Tz> + 'static,
        S: DailyTimesSource + Send + Sync + ?Sized + 'static,
    {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let join = tokio::spawn(countdown_loop(clock, source, tick, tx));
        Self {
            rx,
            join: Some(join),
        }
    }

    /// Next event, or `None` once the task has stopped.
    pub async fn recv(&mut self) -> Option<CountdownEvent<Tz>> {
        self.rx.recv().await
    }

    pub async fn shutdown(&mut self) {
        self.rx.close();
        if let Some(join) = self.join.take() {
            join.abort();
            let _ = join.await;
        }
    }
}

impl<Tz: TimeZone> Drop for CountdownPump<Tz> {
    fn drop(&mut self) {
        self.rx.close();
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }
}

async fn countdown_loop<C, S>(
    clock: C,
    mut source: watch::Receiver<Arc<S>>,
    tick: Duration,
    tx: mpsc::Sender<CountdownEvent<C::Tz>>,
) where
    C: Clock,
    S: DailyTimesSource + ?Sized,
{
    let mut interval = tokio::time::interval(tick);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut state = CountdownState::new();

    loop {
        interval.tick().await;
        // A closed sender leaves the last table in place.
        if source.has_changed().unwrap_or(false) {
            tracing::debug!("Prayer time table replaced; recomputing");
            state.reset();
        }
        let table = Arc::clone(&source.borrow_and_update());
        let now = clock.now();
        let event = state.advance(&now, table.as_ref());
        if tx.send(event).await.is_err() {
            tracing::debug!("Countdown receiver closed; stopping");
            return;
        }
    }
}
