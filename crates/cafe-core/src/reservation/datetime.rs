//! Date/time expression resolution.
//!
//! A phrase such as "friday at 7" is turned into an ordered list of
//! [`Candidate`] resolutions. The evaluator then keeps the first candidate
//! that lands on an evening slot inside the booking window. Ambiguous phrases
//! are not disambiguated: candidate order decides.

use std::sync::OnceLock;

use chrono::{Datelike, Days, Local, NaiveDate, NaiveTime, Weekday};
use regex::{Captures, Regex};

use super::model::ReservationSlot;
use super::validator::Rejection;

/// Reservations are accepted from today up to (excluding) today + 14 days.
pub const BOOKING_WINDOW_DAYS: u64 = 14;

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or_default()
}

fn evening_start() -> NaiveTime {
    hm(16, 0)
}

fn evening_end() -> NaiveTime {
    hm(20, 0)
}

/// Time part of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSpec {
    Point(NaiveTime),
    /// Half-open window `[start, end)`
    Range(NaiveTime, NaiveTime),
    /// The phrase named a day only
    Unspecified,
}

/// One possible reading of a date/time phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// `None` when the phrase named a time only; evaluated as today.
    pub date: Option<NaiveDate>,
    pub time: TimeSpec,
}

/// A rule hit inside the phrase.
#[derive(Debug)]
struct Matched<T> {
    start: usize,
    end: usize,
    values: Vec<T>,
}

/// Picks the earliest hit, preferring the longest one on ties.
fn earliest<T>(hits: Vec<Matched<T>>) -> Option<Matched<T>> {
    hits.into_iter()
        .filter(|hit| !hit.values.is_empty())
        .min_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)))
}

macro_rules! static_regex {
    ($name:ident, $pattern:expr) => {
        fn $name() -> &'static Regex {
            static CELL: OnceLock<Regex> = OnceLock::new();
            CELL.get_or_init(|| Regex::new($pattern).expect("static pattern is valid"))
        }
    };
}

static_regex!(day_after_tomorrow_re, r"\bday after tomorrow\b");
static_regex!(tomorrow_re, r"\btomorrow\b");
static_regex!(today_re, r"\b(?:today|tonight)\b");
static_regex!(in_days_re, r"\bin (\d{1,2}) days?\b");
static_regex!(iso_date_re, r"\b(\d{4})-(\d{1,2})-(\d{1,2})\b");
static_regex!(month_day_re, r"\b(\d{1,2})/(\d{1,2})\b");
static_regex!(
    weekday_re,
    r"\b(next |this )?(monday|tuesday|wednesday|thursday|friday|saturday|sunday)\b"
);
static_regex!(
    meridiem_re,
    r"\b(\d{1,2})(?::(\d{2}))?\s*(am|pm|a\.m\.|p\.m\.)"
);
static_regex!(clock_re, r"\b(\d{1,2}):(\d{2})\b");
static_regex!(noon_re, r"\bnoon\b");
static_regex!(day_part_re, r"\b(morning|afternoon|evening|tonight|night)\b");
static_regex!(at_hour_re, r"\bat (\d{1,2})\b");
static_regex!(bare_hour_re, r"^\s*(\d{1,2})\s*$");

fn capture_u32(caps: &Captures<'_>, index: usize) -> Option<u32> {
    caps.get(index).and_then(|m| m.as_str().parse().ok())
}

fn parse_weekday(name: &str) -> Option<Weekday> {
    match name {
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

/// Candidate times for a time given without am/pm, morning reading first.
fn ambiguous_time(hour: u32, minute: u32) -> Vec<TimeSpec> {
    let readings = match hour {
        1..=11 => vec![hour, hour + 12],
        0 | 12..=23 => vec![hour],
        _ => Vec::new(),
    };
    readings
        .into_iter()
        .filter_map(|h| NaiveTime::from_hms_opt(h, minute, 0))
        .map(TimeSpec::Point)
        .collect()
}

fn ambiguous_hour(hour: u32) -> Vec<TimeSpec> {
    ambiguous_time(hour, 0)
}

/// Whether an am/pm marker or minutes follow the given offset.
pub(crate) fn followed_by_time_suffix(text: &str, offset: usize) -> bool {
    let rest = text[offset..].trim_start();
    rest.starts_with(':')
        || rest.starts_with("am")
        || rest.starts_with("pm")
        || rest.starts_with("a.m")
        || rest.starts_with("p.m")
}

/// Resolves natural-language date/time phrases relative to a reference day.
#[derive(Debug, Clone, Default)]
pub struct DateTimeResolver {
    today: Option<NaiveDate>,
}

impl DateTimeResolver {
    /// Creates a resolver that uses the local calendar date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a resolver pinned to a fixed reference day.
    pub fn with_today(today: NaiveDate) -> Self {
        Self { today: Some(today) }
    }

    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Resolves a phrase to the first evening slot inside the booking window.
    pub fn resolve(&self, text: &str) -> Result<ReservationSlot, Rejection> {
        let candidates = self.candidates(text);
        if candidates.is_empty() {
            return Err(Rejection::Unparseable);
        }
        self.evaluate(&candidates).ok_or(Rejection::OutsideWindow)
    }

    /// Returns every reading of the phrase, most likely first.
    pub fn candidates(&self, text: &str) -> Vec<Candidate> {
        let text = text.to_lowercase();
        let date = self.find_date(&text);
        let time = Self::find_time(&text);
        if date.is_none() && time.is_none() {
            return Vec::new();
        }

        let dates: Vec<Option<NaiveDate>> = match date {
            Some(hit) => hit.values.into_iter().map(Some).collect(),
            None => vec![None],
        };
        let times: Vec<TimeSpec> = match time {
            Some(hit) => hit.values,
            None => vec![TimeSpec::Unspecified],
        };

        dates
            .iter()
            .flat_map(|date| {
                times.iter().map(move |time| Candidate {
                    date: *date,
                    time: *time,
                })
            })
            .collect()
    }

    /// Returns the date/time fragment of a longer utterance, if it has one.
    ///
    /// Used by entity extraction to pull "tomorrow at 7pm" out of
    /// "book a table for 4 tomorrow at 7pm".
    pub fn extract(&self, text: &str) -> Option<String> {
        let text = text.to_lowercase();
        let mut spans: Vec<(usize, usize)> = Vec::new();
        if let Some(hit) = self.find_date(&text) {
            spans.push((hit.start, hit.end));
        }
        if let Some(hit) = Self::find_time(&text) {
            spans.push((hit.start, hit.end));
        }
        if spans.is_empty() {
            return None;
        }
        spans.sort();
        let fragments: Vec<&str> = spans.iter().map(|(s, e)| text[*s..*e].trim()).collect();
        Some(fragments.join(" "))
    }

    /// Returns the first candidate satisfying the evening and window constraints.
    pub fn evaluate(&self, candidates: &[Candidate]) -> Option<ReservationSlot> {
        let (start, end) = (evening_start(), evening_end());
        candidates.iter().find_map(|candidate| {
            let date = candidate.date.unwrap_or_else(|| self.today());
            if !self.in_window(date) {
                return None;
            }
            match candidate.time {
                TimeSpec::Unspecified => Some(ReservationSlot::window(date, start, end)),
                TimeSpec::Point(time) if time >= start && time < end => {
                    Some(ReservationSlot::at(date, time))
                }
                TimeSpec::Point(_) => None,
                TimeSpec::Range(from, to) => {
                    let from = from.max(start);
                    let to = to.min(end);
                    (from < to).then(|| ReservationSlot::window(date, from, to))
                }
            }
        })
    }

    /// Whether an already-resolved slot still satisfies the constraints.
    pub fn accepts(&self, slot: &ReservationSlot) -> bool {
        let within_evening = slot.start >= evening_start()
            && slot.start < evening_end()
            && slot.end.is_none_or(|end| end > slot.start && end <= evening_end());
        self.in_window(slot.date) && within_evening
    }

    fn in_window(&self, date: NaiveDate) -> bool {
        let today = self.today();
        match today.checked_add_days(Days::new(BOOKING_WINDOW_DAYS)) {
            Some(limit) => date >= today && date < limit,
            None => false,
        }
    }

    fn find_date(&self, text: &str) -> Option<Matched<NaiveDate>> {
        let today = self.today();
        let offset = |days: u64| today.checked_add_days(Days::new(days));
        let mut hits = Vec::new();

        for (re, days) in [
            (day_after_tomorrow_re(), 2),
            (tomorrow_re(), 1),
            (today_re(), 0),
        ] {
            if let Some(m) = re.find(text) {
                hits.push(Matched {
                    start: m.start(),
                    end: m.end(),
                    values: offset(days).into_iter().collect(),
                });
            }
        }

        if let Some(caps) = in_days_re().captures(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values: capture_u32(&caps, 1)
                    .and_then(|n| offset(u64::from(n)))
                    .into_iter()
                    .collect(),
            });
        }

        if let Some(caps) = iso_date_re().captures(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let date = caps
                .get(1)
                .and_then(|m| m.as_str().parse::<i32>().ok())
                .zip(capture_u32(&caps, 2).zip(capture_u32(&caps, 3)))
                .and_then(|(y, (m, d))| NaiveDate::from_ymd_opt(y, m, d));
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values: date.into_iter().collect(),
            });
        }

        if let Some(caps) = month_day_re().captures(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let date = capture_u32(&caps, 1)
                .zip(capture_u32(&caps, 2))
                .and_then(|(m, d)| {
                    let this_year = NaiveDate::from_ymd_opt(today.year(), m, d)?;
                    if this_year >= today {
                        Some(this_year)
                    } else {
                        NaiveDate::from_ymd_opt(today.year() + 1, m, d)
                    }
                });
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values: date.into_iter().collect(),
            });
        }

        if let Some(caps) = weekday_re().captures(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let qualifier = caps.get(1).map(|m| m.as_str().trim());
            let values = caps
                .get(2)
                .and_then(|m| parse_weekday(m.as_str()))
                .map(|weekday| Self::weekday_dates(today, weekday, qualifier))
                .unwrap_or_default();
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values,
            });
        }

        earliest(hits)
    }

    /// "next X" is X in the following calendar week; "this X" and a bare X are
    /// the upcoming X (today included). A bare X also yields the week after.
    fn weekday_dates(
        today: NaiveDate,
        weekday: Weekday,
        qualifier: Option<&str>,
    ) -> Vec<NaiveDate> {
        let today_index = u64::from(today.weekday().num_days_from_monday());
        let target_index = u64::from(weekday.num_days_from_monday());

        if qualifier == Some("next") {
            return today
                .checked_sub_days(Days::new(today_index))
                .and_then(|monday| monday.checked_add_days(Days::new(7 + target_index)))
                .into_iter()
                .collect();
        }

        let ahead = (target_index + 7 - today_index) % 7;
        let Some(upcoming) = today.checked_add_days(Days::new(ahead)) else {
            return Vec::new();
        };
        if qualifier == Some("this") {
            return vec![upcoming];
        }
        std::iter::once(upcoming)
            .chain(upcoming.checked_add_days(Days::new(7)))
            .collect()
    }

    fn find_time(text: &str) -> Option<Matched<TimeSpec>> {
        let mut hits = Vec::new();

        for caps in meridiem_re().captures_iter(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let hour = capture_u32(&caps, 1).filter(|h| (1..=12).contains(h));
            let minute = capture_u32(&caps, 2).unwrap_or(0);
            let pm = caps.get(3).is_some_and(|m| m.as_str().starts_with('p'));
            let time = hour.and_then(|h| {
                let h24 = if pm { h % 12 + 12 } else { h % 12 };
                NaiveTime::from_hms_opt(h24, minute, 0)
            });
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values: time.map(TimeSpec::Point).into_iter().collect(),
            });
        }

        for caps in clock_re().captures_iter(text) {
            let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
            let values = capture_u32(&caps, 1)
                .zip(capture_u32(&caps, 2).filter(|m| *m < 60))
                .map(|(h, m)| ambiguous_time(h, m))
                .unwrap_or_default();
            hits.push(Matched {
                start: whole.0,
                end: whole.1,
                values,
            });
        }

        if let Some(m) = noon_re().find(text) {
            hits.push(Matched {
                start: m.start(),
                end: m.end(),
                values: vec![TimeSpec::Point(hm(12, 0))],
            });
        }

        if let Some(m) = day_part_re().find(text) {
            let range = match m.as_str() {
                "morning" => TimeSpec::Range(hm(8, 0), hm(12, 0)),
                "afternoon" => TimeSpec::Range(hm(12, 0), hm(16, 0)),
                "night" => TimeSpec::Range(hm(20, 0), hm(23, 59)),
                _ => TimeSpec::Range(evening_start(), evening_end()),
            };
            hits.push(Matched {
                start: m.start(),
                end: m.end(),
                values: vec![range],
            });
        }

        for caps in at_hour_re().captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            if followed_by_time_suffix(text, whole.end()) {
                continue;
            }
            hits.push(Matched {
                start: whole.start(),
                end: whole.end(),
                values: capture_u32(&caps, 1).map(ambiguous_hour).unwrap_or_default(),
            });
        }

        if let Some(caps) = bare_hour_re().captures(text) {
            hits.push(Matched {
                start: 0,
                end: text.len(),
                values: capture_u32(&caps, 1).map(ambiguous_hour).unwrap_or_default(),
            });
        }

        earliest(hits)
    }
}
