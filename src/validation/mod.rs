//! Declarative form validation.
//!
//! Each form is described by a table of [`FieldRules`]: an ordered chain of
//! sanitizers and validators per field. [`validate`] walks a table against
//! submitted form data and reports every failing validator.

use std::collections::HashMap;

use chrono::{Days, NaiveDate, Weekday};
use serde::Serialize;
use serde_json::Value;

/// Raw `application/x-www-form-urlencoded` fields.
pub type FormData = HashMap<String, String>;

const DEFAULT_MESSAGE: &str = "Invalid value";

/// One link of a field's rule chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Strip surrounding whitespace.
    Trim,
    /// Fail when the value has fewer characters.
    MinLength(usize),
    /// Replace markup-significant characters with HTML entities.
    Escape,
    /// Fail unless the value is an ISO-8601 date or date-time.
    Iso8601,
}

/// When a field's chain runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Always; a missing field counts as empty.
    Required,
    /// Only when the field is present and non-empty.
    OptionalFalsy,
}

/// Rule chain for a single field.
#[derive(Debug, Clone, Copy)]
pub struct FieldRules {
    pub field: &'static str,
    /// Reported for every failing validator of this field.
    pub message: Option<&'static str>,
    pub presence: Presence,
    pub rules: &'static [Rule],
}

/// A failed validator, shaped like the error items the form views expect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    #[serde(rename = "type")]
    kind: &'static str,
    pub value: String,
    #[serde(rename = "msg")]
    pub message: String,
    #[serde(rename = "path")]
    pub field: String,
    location: &'static str,
}

impl FieldError {
    pub fn new(field: &str, value: &str, message: &str) -> Self {
        Self {
            kind: "field",
            value: value.to_string(),
            message: message.to_string(),
            field: field.to_string(),
            location: "body",
        }
    }
}

/// Sanitized form values plus the validators that failed.
#[derive(Debug, Clone, Default)]
pub struct Validated {
    values: FormData,
    errors: Vec<FieldError>,
}

impl Validated {
    /// Sanitized value of `field`, empty when it was not submitted.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map_or("", String::as_str)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|error| error.field == field)
    }

    /// Record a failure found outside the rule table.
    pub fn reject(&mut self, field: &str, message: &str) {
        let error = FieldError::new(field, self.value(field), message);
        self.errors.push(error);
    }

    /// Error list in the form it is handed to views.
    pub fn errors_document(&self) -> Value {
        serde_json::to_value(&self.errors).unwrap_or_default()
    }
}

/// Run every chain of `table` against `form`.
///
/// Sanitizers keep running after a validator fails, so the reported values
/// are always sanitized. Fields outside the table are passed through as
/// submitted.
pub fn validate(table: &[FieldRules], form: &FormData) -> Validated {
    let mut validated = Validated {
        values: form.clone(),
        errors: Vec::new(),
    };

    for spec in table {
        let submitted = form.get(spec.field).map(String::as_str);
        if spec.presence == Presence::OptionalFalsy && submitted.map_or(true, str::is_empty) {
            continue;
        }

        let mut value = submitted.unwrap_or_default().to_string();
        for rule in spec.rules {
            let passed = match *rule {
                Rule::Trim => {
                    value = value.trim().to_string();
                    true
                }
                Rule::Escape => {
                    value = escape(&value);
                    true
                }
                Rule::MinLength(min) => value.chars().count() >= min,
                Rule::Iso8601 => parse_iso_date(&value).is_some(),
            };
            if !passed {
                validated.errors.push(FieldError::new(
                    spec.field,
                    &value,
                    spec.message.unwrap_or(DEFAULT_MESSAGE),
                ));
            }
        }
        validated.values.insert(spec.field.to_string(), value);
    }

    validated
}

/// HTML-escape `& < > " ' / \` and the backtick.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '/' => escaped.push_str("&#x2F;"),
            '\\' => escaped.push_str("&#x5C;"),
            '`' => escaped.push_str("&#96;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Calendar date of an ISO-8601 date or date-time.
///
/// Accepts calendar (`2024-03-01`, `20240301`), reduced (`2024-03`, `2024`),
/// ordinal (`2024-061`) and week (`2024-W09-5`) dates, in extended or basic
/// form, optionally followed by a `T` or space separated time of day with a
/// zone designator. Reduced dates resolve to the first day of the period.
/// The date is taken as written; offsets do not shift it.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    let (date, time) = match value.split_once(|c: char| c == 'T' || c == ' ') {
        Some((date, time)) => (date, Some(time)),
        None => (value, None),
    };
    if !time.map_or(true, is_iso_time) {
        return None;
    }
    parse_iso_calendar(date)
}

fn parse_iso_calendar(value: &str) -> Option<NaiveDate> {
    let (negative, rest) = match value.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, value.strip_prefix('+').unwrap_or(value)),
    };
    let year = i32::try_from(digits(rest.get(..4)?, 4)?).ok()?;
    let year = if negative { -year } else { year };
    let rest = rest.get(4..)?;

    let (extended, rest) = match rest.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, rest),
    };
    if rest.is_empty() {
        return if extended {
            None
        } else {
            NaiveDate::from_ymd_opt(year, 1, 1)
        };
    }

    if let Some(week) = rest.strip_prefix('W') {
        let number = digits(week.get(..2)?, 2)?;
        let day = match (week.get(2..)?, extended) {
            ("", _) => 1,
            (day, true) => digits(day.strip_prefix('-')?, 1)?,
            (day, false) => digits(day, 1)?,
        };
        if !(1..=7).contains(&day) {
            return None;
        }
        let monday = NaiveDate::from_isoywd_opt(year, number, Weekday::Mon)?;
        return monday.checked_add_days(Days::new(u64::from(day - 1)));
    }

    if extended {
        return match rest.split_once('-') {
            Some((month, day)) => NaiveDate::from_ymd_opt(year, digits(month, 2)?, digits(day, 2)?),
            None if rest.len() == 2 => NaiveDate::from_ymd_opt(year, digits(rest, 2)?, 1),
            None => NaiveDate::from_yo_opt(year, digits(rest, 3)?),
        };
    }
    match rest.len() {
        3 => NaiveDate::from_yo_opt(year, digits(rest, 3)?),
        4 => NaiveDate::from_ymd_opt(
            year,
            digits(rest.get(..2)?, 2)?,
            digits(rest.get(2..)?, 2)?,
        ),
        _ => None,
    }
}

/// Time of day with optional fraction and zone: `09`, `0930`, `09:30:15.250`,
/// `24:00`, then `Z`, `+02`, `+0200` or `-02:00`.
fn is_iso_time(value: &str) -> bool {
    let (clock, zone) = match value.find(|c: char| matches!(c, 'Z' | 'z' | '+' | '-')) {
        Some(at) => value.split_at(at),
        None => (value, ""),
    };
    is_iso_clock(clock) && is_iso_zone(zone)
}

fn is_iso_clock(value: &str) -> bool {
    let (clock, fraction) = match value.split_once(|c: char| c == '.' || c == ',') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (value, None),
    };
    let digits_only = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !fraction.map_or(true, digits_only) {
        return false;
    }
    match clock_fields(clock).as_deref() {
        Some([24, 0]) => fraction.is_none(),
        Some([hour, rest @ ..]) => {
            *hour < 24 && rest.len() <= 2 && rest.iter().all(|field| *field < 60)
        }
        _ => false,
    }
}

fn is_iso_zone(value: &str) -> bool {
    if value.is_empty() || value.eq_ignore_ascii_case("z") {
        return true;
    }
    let Some(offset) = value.strip_prefix(|c: char| c == '+' || c == '-') else {
        return false;
    };
    match clock_fields(offset).as_deref() {
        Some([hour]) => *hour < 24,
        Some([hour, minute]) => *hour < 24 && *minute < 60,
        _ => false,
    }
}

/// Two-digit fields of `HH`, `HHMM[SS]` or `HH:MM[:SS]`.
fn clock_fields(value: &str) -> Option<Vec<u32>> {
    if value.contains(':') {
        return value.split(':').map(|field| digits(field, 2)).collect();
    }
    if value.is_empty() || value.len() % 2 != 0 || !value.is_ascii() {
        return None;
    }
    (0..value.len())
        .step_by(2)
        .map(|at| digits(&value[at..at + 2], 2))
        .collect()
}

/// `value` as a number when it is exactly `len` ASCII digits.
fn digits(value: &str, len: usize) -> Option<u32> {
    if value.len() != len || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
