//! Localised labels and duration formatting for countdown surfaces.
//!
//! Pure presentation: nothing here feeds back into the calculator. The Friday
//! dhuhr annotation lives here for that reason.

use std::borrow::Cow;

use chrono::{TimeDelta, Weekday};

use vakit_types::{BoundaryKind, Language, PrayerName};

const FRIDAY_MARK: &str = " 🕌";

#[must_use]
pub fn countdown_label(kind: BoundaryKind, lang: Language) -> &'static str {
    match (kind, lang) {
        (BoundaryKind::ToIftar, Language::Turkish) => "İftara Kalan Süre",
        (BoundaryKind::ToSahur, Language::Turkish) => "Sahura Kalan Süre",
        (BoundaryKind::ToIftar, Language::English) => "Time to Iftar",
        (BoundaryKind::ToSahur, Language::English) => "Time to Sahur",
    }
}

/// Compact label for small widget surfaces.
#[must_use]
pub fn short_label(kind: BoundaryKind) -> &'static str {
    match kind {
        BoundaryKind::ToIftar => "İftar",
        BoundaryKind::ToSahur => "Sahur",
    }
}

#[must_use]
pub fn prayer_name(prayer: PrayerName, lang: Language) -> &'static str {
    match lang {
        Language::Turkish => match prayer {
            PrayerName::Fajr => "İmsak",
            PrayerName::Sunrise => "Güneş",
            PrayerName::Dhuhr => "Öğle",
            PrayerName::Asr => "İkindi",
            PrayerName::Maghrib => "Akşam",
            PrayerName::Isha => "Yatsı",
        },
        Language::English => match prayer {
            PrayerName::Fajr => "Fajr",
            PrayerName::Sunrise => "Sunrise",
            PrayerName::Dhuhr => "Dhuhr",
            PrayerName::Asr => "Asr",
            PrayerName::Maghrib => "Maghrib",
            PrayerName::Isha => "Isha",
        },
    }
}

/// Row label for a prayer list; Friday's dhuhr carries the mosque mark.
#[must_use]
pub fn prayer_label(prayer: PrayerName, lang: Language, weekday: Weekday) -> Cow<'static, str> {
    let name = prayer_name(prayer, lang);
    if prayer == PrayerName::Dhuhr && weekday == Weekday::Fri {
        Cow::Owned(format!("{name}{FRIDAY_MARK}"))
    } else {
        Cow::Borrowed(name)
    }
}

#[must_use]
pub fn unavailable_message(lang: Language) -> &'static str {
    match lang {
        Language::Turkish => "Vakit verisi bulunamadı",
        Language::English => "Prayer times unavailable",
    }
}

fn split(delta: TimeDelta) -> (i64, i64, i64) {
    let total = delta.num_seconds().max(0);
    (total / 3600, (total % 3600) / 60, total % 60)
}

/// `HH:MM:SS`, zero padded. Negative durations render as zero.
#[must_use]
pub fn format_clock(delta: TimeDelta) -> String {
    let (h, m, s) = split(delta);
    format!("{h:02}:{m:02}:{s:02}")
}

/// Coarse human form: hours and minutes, minutes alone, or seconds alone.
#[must_use]
pub fn format_verbose(delta: TimeDelta, lang: Language) -> String {
    let (h, m, s) = split(delta);
    match lang {
        Language::Turkish if h > 0 => format!("{h} saat {m} dakika"),
        Language::Turkish if m > 0 => format!("{m} dakika"),
        Language::Turkish => format!("{s} saniye"),
        Language::English if h > 0 => format!("{h} h {m} min"),
        Language::English if m > 0 => format!("{m} min"),
        Language::English => format!("{s} s"),
    }
}
