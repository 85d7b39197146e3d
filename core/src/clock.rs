//! Source of "now" for countdown drivers.

use chrono::{DateTime, TimeZone, Utc};

/// Provides the current instant in a particular time zone.
///
/// Injected into [`crate::CountdownPump`] so tests can run against a
/// controlled clock instead of the system time.
pub trait Clock: Send + Sync {
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Wall clock in the given zone.
#[derive(Debug, Clone)]
pub struct SystemClock<Tz> {
    tz: Tz,
}

impl<Tz: TimeZone> SystemClock<Tz> {
    #[must_use]
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }
}

impl<Tz> Clock for SystemClock<Tz>
where
    Tz: TimeZone + Send + Sync,
{
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.tz)
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock<Tz: TimeZone>(pub DateTime<Tz>);

impl<Tz> Clock for FixedClock<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Send + Sync,
{
    type Tz = Tz;

    fn now(&self) -> DateTime<Tz> {
        self.0.clone()
    }
}
