//! The countdown pump driven by tokio's paused clock over a real table.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use tokio::sync::watch;

use vakit_core::{Clock, CountdownEvent, CountdownPump, INTERACTIVE_TICK, WIDGET_TICK};
use vakit_types::{BoundaryError, BoundaryKind};

use crate::common::{istanbul, march_table, table_of};

/// Wall clock anchored at `base` that moves with tokio time.
struct PausedClock {
    base: DateTime<Tz>,
    started: tokio::time::Instant,
}

impl PausedClock {
    fn at(base: DateTime<Tz>) -> Self {
        Self {
            base,
            started: tokio::time::Instant::now(),
        }
    }
}

impl Clock for PausedClock {
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.base + TimeDelta::from_std(self.started.elapsed()).unwrap()
    }
}

#[tokio::test(start_paused = true)]
async fn interactive_countdown_rolls_over_at_iftar() {
    let table = Arc::new(march_table());
    let clock = PausedClock::at(istanbul(10, 18, 38, 58));
    let mut pump = CountdownPump::spawn(clock, table, INTERACTIVE_TICK);

    let first = pump.recv().await.unwrap();
    assert!(matches!(first, CountdownEvent::Tick { .. }));
    assert_eq!(first.remaining(), Some(TimeDelta::seconds(2)));

    let second = pump.recv().await.unwrap();
    assert_eq!(second.remaining(), Some(TimeDelta::seconds(1)));

    match pump.recv().await.unwrap() {
        CountdownEvent::Rollover {
            from,
            to,
            remaining,
        } => {
            assert_eq!(from.kind, BoundaryKind::ToIftar);
            assert_eq!(to.kind, BoundaryKind::ToSahur);
            assert_eq!(to.target_instant, istanbul(11, 5, 20, 0));
            assert_eq!(remaining, TimeDelta::hours(10) + TimeDelta::minutes(41));
        }
        other => panic!("expected rollover, got {other:?}"),
    }

    let after = pump.recv().await.unwrap();
    assert!(matches!(after, CountdownEvent::Tick { .. }));
    assert_eq!(after.boundary().map(|b| b.kind), Some(BoundaryKind::ToSahur));

    pump.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn widget_ticks_every_thirty_seconds() {
    let table = Arc::new(march_table());
    let clock = PausedClock::at(istanbul(10, 17, 0, 0));
    let mut pump = CountdownPump::spawn(clock, table, WIDGET_TICK);

    let mut remaining = Vec::new();
    for _ in 0..3 {
        remaining.push(pump.recv().await.unwrap().remaining().unwrap());
    }
    assert_eq!(
        remaining,
        [
            TimeDelta::minutes(99),
            TimeDelta::minutes(99) - TimeDelta::seconds(30),
            TimeDelta::minutes(98),
        ]
    );

    pump.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn end_of_table_reports_unavailable_on_every_tick() {
    let table = Arc::new(march_table());
    let clock = PausedClock::at(istanbul(31, 21, 0, 0));
    let mut pump = CountdownPump::spawn(clock, table, Duration::from_secs(5));

    for _ in 0..2 {
        match pump.recv().await.unwrap() {
            CountdownEvent::Unavailable(err) => {
                assert!(matches!(err, BoundaryError::MissingData { .. }));
            }
            other => panic!("expected unavailable, got {other:?}"),
        }
    }

    pump.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn swapping_in_a_longer_table_recovers_the_countdown() {
    let (tx, rx) = watch::channel(Arc::new(table_of(10)));
    let clock = PausedClock::at(istanbul(10, 21, 0, 0));
    let mut pump = CountdownPump::spawn_watched(clock, rx, Duration::from_secs(5));

    let event = pump.recv().await.unwrap();
    assert!(matches!(
        event,
        CountdownEvent::Unavailable(BoundaryError::MissingData { date }) if date == crate::common::date(11)
    ));

    tx.send(Arc::new(march_table())).unwrap();

    let event = pump.recv().await.unwrap();
    assert!(matches!(event, CountdownEvent::Tick { .. }));
    let boundary = event.boundary().unwrap();
    assert_eq!(boundary.kind, BoundaryKind::ToSahur);
    assert_eq!(boundary.target_instant, istanbul(11, 5, 20, 0));
    assert_eq!(
        event.remaining(),
        Some(TimeDelta::hours(8) + TimeDelta::minutes(19) + TimeDelta::seconds(55))
    );

    pump.shutdown().await;
}

#[tokio::test(start_paused = true)]
async fn dropping_the_pump_stops_the_task() {
    let table = Arc::new(march_table());
    let clock = PausedClock::at(istanbul(10, 12, 0, 0));
    let pump = CountdownPump::spawn(clock, Arc::clone(&table), INTERACTIVE_TICK);
    drop(pump);

    // The aborted task held the only other reference.
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(Arc::strong_count(&table), 1);
}
