//! Meal-time resolution.
//!
//! Resolution order: an explicitly extracted time phrase, then the first
//! date/time expression embedded anywhere in the source text, then a default
//! derived from the urgency bucket. Nothing in here returns an error; an
//! unreadable phrase simply falls through to the next step.
//!
//! The phrase grammar covers relative day words (today, tonight, tomorrow),
//! full weekday names, clock times (`7pm`, `7:30 pm`, `19:00`, `at 7`), ISO
//! dates, `month/day` dates, and month-name dates. Ambiguous expressions are
//! biased toward the future: a relative expression that already passed rolls
//! to tomorrow, a weekday resolves to its next occurrence, and a year-less
//! date that already passed rolls to next year. A date and a clock time only
//! combine when separated by nothing more than a daypart word and `at`/`on`;
//! with a wordier gap the earlier expression wins on its own.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Weekday};
use chrono_tz::Tz;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

/// Hour of the default `tonight` slot.
const DINNER_HOUR: u32 = 18;

static RELDAY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(today|tonight|tomorrow)\b").expect("relday pattern"));

static WEEKDAY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:next\s+)?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b")
        .expect("weekday pattern")
});

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})-(\d{2})-(\d{2})\b").expect("iso date pattern"));

static SLASH_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{1,2})/(\d{1,2})(?:/(\d{2,4}))?\b").expect("slash date pattern"));

static MONTH_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(january|february|march|april|may|june|july|august|september|october|november|december)\s+(\d{1,2})(?:st|nd|rd|th)?(?:,?\s+(\d{4}))?\b",
    )
    .expect("month date pattern")
});

/// One clock-time shape; a match only counts as a time when it is anchored by
/// an `at` prefix, minutes, or a meridiem, so bare quantities stay quantities.
static TIME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?P<at>at\s+)?(?P<h>\d{1,2})(?::(?P<mi>\d{2}))?\s*(?P<ap>am|pm)?\b")
        .expect("time pattern")
});

/// Connector between a date and a time expression (`tomorrow at 7pm`,
/// `7pm on friday`, `tomorrow evening at 7`). Anything wordier than a daypart
/// plus `at`/`on` keeps the two unconnected and only the earlier one counts.
static GAP_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[\s,]*(?:(?:in\s+the\s+)?(?:morning|afternoon|evening|night)[\s,]*)?(?:at|on)?[\s,]*$")
        .expect("gap pattern")
});

#[derive(Debug, Clone, Copy)]
struct DateHit {
    start: usize,
    end: usize,
    date: NaiveDate,
    /// Clock implied by the expression itself (`tonight` -> 18:00).
    time_hint: Option<NaiveTime>,
    /// Relative expressions (`today`, weekdays) default to the current clock
    /// time and may roll forward; absolute dates default to midnight.
    relative: bool,
}

#[derive(Debug, Clone, Copy)]
struct TimeHit {
    start: usize,
    end: usize,
    time: NaiveTime,
}

/// Resolve a meal time from the urgency label and the source text.
///
/// `time_phrase` is an optional pre-extracted temporal phrase; when absent or
/// unreadable the whole text is scanned for the first date/time expression.
/// Resolved instants are constructed directly in `tz` and formatted RFC 3339;
/// the `this_week` bucket yields a date-only `YYYY-MM-DD` string.
pub fn resolve_meal_time(
    urgency: &str,
    text: &str,
    tz: Tz,
    time_phrase: Option<&str>,
) -> Option<String> {
    resolve_meal_time_at(chrono::Utc::now().with_timezone(&tz), urgency, text, time_phrase)
}

/// Clock-injected variant of [`resolve_meal_time`] for deterministic callers.
pub fn resolve_meal_time_at(
    now: DateTime<Tz>,
    urgency: &str,
    text: &str,
    time_phrase: Option<&str>,
) -> Option<String> {
    let mut resolved = time_phrase.and_then(|phrase| search_datetime(phrase, now));
    if resolved.is_none() {
        resolved = search_datetime(text, now);
    }
    if let Some(instant) = resolved {
        debug!("resolved meal time {instant} from text");
        return Some(instant.to_rfc3339());
    }

    match urgency {
        "tonight" => {
            let mut target = now
                .date_naive()
                .and_hms_opt(DINNER_HOUR, 0, 0)
                .and_then(|naive| now.timezone().from_local_datetime(&naive).earliest())?;
            if target < now {
                target += Duration::days(1);
            }
            Some(target.to_rfc3339())
        }
        "this_week" => {
            let date = (now + Duration::days(7)).date_naive();
            Some(date.format("%Y-%m-%d").to_string())
        }
        _ => None,
    }
}

/// Find the first date/time expression in `text` and resolve it, future-biased.
fn search_datetime(text: &str, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    let date_hit = find_date(text, now.date_naive());
    let time_hit = find_time(text);

    match (date_hit, time_hit) {
        (Some(date), Some(time)) => {
            let connected = (date.end <= time.start
                && GAP_RE.is_match(&text[date.end..time.start]))
                || (time.end <= date.start && GAP_RE.is_match(&text[time.end..date.start]));
            if connected {
                combine(now, date, Some(time.time))
            } else if date.start <= time.start {
                combine(now, date, None)
            } else {
                time_only(now, time.time)
            }
        }
        (Some(date), None) => combine(now, date, None),
        (None, Some(time)) => time_only(now, time.time),
        (None, None) => None,
    }
}

fn combine(now: DateTime<Tz>, date: DateHit, explicit_time: Option<NaiveTime>) -> Option<DateTime<Tz>> {
    let time = explicit_time
        .or(date.time_hint)
        .unwrap_or_else(|| if date.relative { now.time() } else { NaiveTime::MIN });
    let mut target = now
        .timezone()
        .from_local_datetime(&date.date.and_time(time))
        .earliest()?;
    // without a time the relative branch sits at the current clock and can
    // never be in the past
    if date.relative && target < now {
        target += Duration::days(1);
    }
    Some(target)
}

fn time_only(now: DateTime<Tz>, time: NaiveTime) -> Option<DateTime<Tz>> {
    let mut target = now
        .timezone()
        .from_local_datetime(&now.date_naive().and_time(time))
        .earliest()?;
    if target < now {
        target += Duration::days(1);
    }
    Some(target)
}

fn find_date(text: &str, today: NaiveDate) -> Option<DateHit> {
    let mut best: Option<DateHit> = None;
    let mut consider = |hit: DateHit| {
        if best.map_or(true, |b| hit.start < b.start) {
            best = Some(hit);
        }
    };

    for caps in RELDAY_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let word = caps[1].to_lowercase();
        let (date, time_hint) = match word.as_str() {
            "tomorrow" => (today + Duration::days(1), None),
            "tonight" => (today, NaiveTime::from_hms_opt(DINNER_HOUR, 0, 0)),
            _ => (today, None),
        };
        consider(DateHit {
            start: m.start(),
            end: m.end(),
            date,
            time_hint,
            relative: true,
        });
    }

    for caps in WEEKDAY_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        if let Some(weekday) = weekday_from_name(&caps[1]) {
            consider(DateHit {
                start: m.start(),
                end: m.end(),
                date: next_weekday(today, weekday),
                time_hint: None,
                relative: true,
            });
        }
    }

    for caps in ISO_DATE_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let (year, month, day) = (
            caps[1].parse().ok(),
            caps[2].parse().ok(),
            caps[3].parse().ok(),
        );
        if let (Some(y), Some(mo), Some(d)) = (year, month, day) {
            if let Some(date) = NaiveDate::from_ymd_opt(y, mo, d) {
                consider(DateHit {
                    start: m.start(),
                    end: m.end(),
                    date,
                    time_hint: None,
                    relative: false,
                });
            }
        }
    }

    for caps in SLASH_DATE_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let month: Option<u32> = caps[1].parse().ok();
        let day: Option<u32> = caps[2].parse().ok();
        let year: Option<i32> = caps.get(3).and_then(|y| y.as_str().parse().ok());
        let (Some(month), Some(day)) = (month, day) else {
            continue;
        };
        let date = match year {
            Some(y) => {
                let y = if y < 100 { y + 2000 } else { y };
                NaiveDate::from_ymd_opt(y, month, day)
            }
            None => yearless_date(today, month, day),
        };
        if let Some(date) = date {
            consider(DateHit {
                start: m.start(),
                end: m.end(),
                date,
                time_hint: None,
                relative: false,
            });
        }
    }

    for caps in MONTH_DATE_RE.captures_iter(text) {
        let m = caps.get(0).unwrap();
        let Some(month) = month_from_name(&caps[1]) else {
            continue;
        };
        let Some(day) = caps[2].parse::<u32>().ok() else {
            continue;
        };
        let date = match caps.get(3).and_then(|y| y.as_str().parse::<i32>().ok()) {
            Some(year) => NaiveDate::from_ymd_opt(year, month, day),
            None => yearless_date(today, month, day),
        };
        if let Some(date) = date {
            consider(DateHit {
                start: m.start(),
                end: m.end(),
                date,
                time_hint: None,
                relative: false,
            });
        }
    }

    best
}

fn find_time(text: &str) -> Option<TimeHit> {
    for caps in TIME_RE.captures_iter(text) {
        // a bare number is not a time
        if caps.name("at").is_none() && caps.name("mi").is_none() && caps.name("ap").is_none() {
            continue;
        }
        let Some(hour) = caps["h"].parse::<u32>().ok() else {
            continue;
        };
        let minute = caps
            .name("mi")
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0);
        let Some(time) = clock(hour, minute, caps.name("ap").map(|ap| ap.as_str())) else {
            continue;
        };
        let m = caps.get(0).unwrap();
        return Some(TimeHit {
            start: m.start(),
            end: m.end(),
            time,
        });
    }
    None
}

fn clock(hour: u32, minute: u32, meridiem: Option<&str>) -> Option<NaiveTime> {
    let hour = match meridiem.map(str::to_lowercase).as_deref() {
        Some("pm") if hour < 12 => hour.checked_add(12)?,
        Some("am") if hour == 12 => 0,
        Some(_) if hour > 12 => return None,
        _ => hour,
    };
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Year-less month/day: this year, or next year when already past.
fn yearless_date(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    let this_year = NaiveDate::from_ymd_opt(today.year(), month, day)?;
    if this_year < today {
        NaiveDate::from_ymd_opt(today.year() + 1, month, day)
    } else {
        Some(this_year)
    }
}

fn next_weekday(today: NaiveDate, target: Weekday) -> NaiveDate {
    let ahead = (target.num_days_from_monday() as i64
        - today.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let ahead = if ahead == 0 { 7 } else { ahead };
    today + Duration::days(ahead)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    match name.to_lowercase().as_str() {
        "monday" => Some(Weekday::Mon),
        "tuesday" => Some(Weekday::Tue),
        "wednesday" => Some(Weekday::Wed),
        "thursday" => Some(Weekday::Thu),
        "friday" => Some(Weekday::Fri),
        "saturday" => Some(Weekday::Sat),
        "sunday" => Some(Weekday::Sun),
        _ => None,
    }
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name.to_lowercase().as_str() {
        "january" => 1,
        "february" => 2,
        "march" => 3,
        "april" => 4,
        "may" => 5,
        "june" => 6,
        "july" => 7,
        "august" => 8,
        "september" => 9,
        "october" => 10,
        "november" => 11,
        "december" => 12,
        _ => return None,
    };
    Some(month)
}
