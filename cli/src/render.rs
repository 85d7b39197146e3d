//! Text lines printed by the binary. No IO here.

use chrono::{DateTime, Datelike, TimeDelta, TimeZone};

use vakit_config::LocationConfig;
use vakit_core::display::{
    countdown_label, format_clock, format_verbose, prayer_label, short_label, unavailable_message,
};
use vakit_core::{CountdownEvent, PrayerSchedule};
use vakit_source::DateLabels;
use vakit_types::{BoundaryError, BoundaryResult, Language};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    /// `<label>  HH:MM:SS  (HH:mm)`
    Interactive,
    /// `<short label>  <coarse remaining>  (HH:mm)`
    Widget,
}

pub fn boundary_line<Tz: TimeZone>(
    boundary: &BoundaryResult<Tz>,
    remaining: TimeDelta,
    lang: Language,
    style: Style,
) -> String {
    match style {
        Style::Interactive => format!(
            "{}  {}  ({})",
            countdown_label(boundary.kind, lang),
            format_clock(remaining),
            boundary.source_time
        ),
        Style::Widget => format!(
            "{}  {}  ({})",
            short_label(boundary.kind),
            format_verbose(remaining, lang),
            boundary.source_time
        ),
    }
}

/// What to show when no boundary is available.
///
/// Missing data gets the localised message; a malformed table is reported as is.
pub fn unavailable_line(err: &BoundaryError, lang: Language) -> String {
    if err.is_missing_data() {
        unavailable_message(lang).to_string()
    } else {
        format!("{}: {err}", unavailable_message(lang))
    }
}

pub fn event_line<Tz: TimeZone>(event: &CountdownEvent<Tz>, lang: Language, style: Style) -> String {
    match event {
        CountdownEvent::Tick {
            boundary,
            remaining,
        }
        | CountdownEvent::Rollover {
            to: boundary,
            remaining,
            ..
        } => boundary_line(boundary, *remaining, lang, style),
        CountdownEvent::Unavailable(err) => unavailable_line(err, lang),
    }
}

/// One line per slot, the slot in progress marked with `>`.
pub fn today_lines<Tz: TimeZone>(
    schedule: &PrayerSchedule<Tz>,
    now: &DateTime<Tz>,
    lang: Language,
) -> Vec<String> {
    let current = schedule.current(now).map(|slot| slot.prayer);
    schedule
        .slots()
        .iter()
        .map(|slot| {
            let marker = if Some(slot.prayer) == current { '>' } else { ' ' };
            let label = prayer_label(slot.prayer, lang, slot.instant.weekday());
            format!("{marker} {label:<10} {}", slot.time)
        })
        .collect()
}

/// `10 Mart 2025 Pazartesi / 10 Ramazan 1446`, or whichever half is known.
pub fn date_line(labels: &DateLabels) -> Option<String> {
    let parts: Vec<&str> = [&labels.gregorian, &labels.hijri]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .collect();
    (!parts.is_empty()).then(|| parts.join(" / "))
}

/// `district, city, country`, skipping blanks. `None` when nothing is set.
pub fn location_line(location: &LocationConfig) -> Option<String> {
    let parts: Vec<&str> = [&location.district, &location.city, &location.country]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect();
    (!parts.is_empty()).then(|| parts.join(", "))
}
