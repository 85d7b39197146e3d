//! Core domain logic for Vakit.
//!
//! This crate holds the single next-boundary calculator that every surface
//! (interactive countdown, widget timeline, prayer list) consumes, plus the
//! pieces those surfaces share:
//!
//! - **`calculator`**: [`compute_next_boundary`] and [`remaining_duration`]
//! - **`source`**: the [`DailyTimesSource`] seam over whoever owns the table
//! - **`schedule`**: all six slots of a day resolved to instants
//! - **`countdown`**: the tick-driven [`CountdownPump`] and its state machine
//! - **`display`**: localised labels and duration formatting

pub mod calculator;
mod clock;
pub mod countdown;
pub mod display;
mod schedule;
mod source;

pub use calculator::{combine, compute_next_boundary, next_day, remaining_duration};
pub use clock::{Clock, FixedClock, SystemClock};
pub use countdown::{
    CountdownEvent, CountdownPump, CountdownState, INTERACTIVE_TICK, WIDGET_TICK,
};
pub use schedule::{PrayerSchedule, PrayerSlot};
pub use source::{DailyTimesSource, next_boundary_from_source};

pub use vakit_types;
