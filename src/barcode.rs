//! Equipment date-code parsing and expiry classification.
//!
//! Serial labels on cylinders and regulators carry an alphanumeric code whose
//! characters [2,4) encode a two-digit manufacture year and [4,6) a two-digit
//! manufacture week; the leading two characters are an opaque product prefix.
//! Parsing derives the production date, the expiry date under the three-year
//! shelf-life policy, and a freshness classification used both to gate scan
//! acceptance and to color the stock list.
//!
//! Parsing never fails: every structural problem resolves to the `Invalid`
//! variant of [`BarcodeData`]. The week fragment is deliberately not bounds
//! checked — a week of 97 silently overflows into a later year, matching how
//! the labels are read in the field.

use chrono::{Datelike, Duration, Local, NaiveDate};

use crate::models::{BarcodeData, BarcodeStatus};

// ═══════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════

/// Shelf life of date-coded equipment, in calendar years.
const SHELF_LIFE_YEARS: i32 = 3;

/// Remaining whole months at or below which a code is flagged as near expiry.
const WARNING_THRESHOLD_MONTHS: i32 = 6;

/// Minimum structural length: 2-char prefix + 2-digit year + 2-digit week.
const MIN_CODE_LEN: usize = 6;

// ═══════════════════════════════════════════════════════════
// Parsing
// ═══════════════════════════════════════════════════════════

/// Parse a scanned date code against the current local date.
pub fn parse(code: &str) -> BarcodeData {
    parse_at(code, Local::now().date_naive())
}

/// Parse a scanned date code against an explicit "today".
///
/// Pure function of `code` and `today`; classification and `months_left` are
/// deterministic in tests that pin the date.
pub fn parse_at(code: &str, today: NaiveDate) -> BarcodeData {
    let trimmed = code.trim();
    if trimmed.len() < MIN_CODE_LEN {
        return BarcodeData::invalid(trimmed.to_string());
    }

    let year_fragment = match trimmed.get(2..4).and_then(two_digit_fragment) {
        Some(frag) => frag,
        None => return BarcodeData::invalid(trimmed.to_string()),
    };
    let week_fragment = match trimmed.get(4..6).and_then(two_digit_fragment) {
        Some(frag) => frag,
        None => return BarcodeData::invalid(trimmed.to_string()),
    };

    // Two-digit years are assumed to be in the 2000s. No plausibility check on
    // the year and no upper bound on the week: week N is a plain 7-day offset
    // from January 1st (week 01 = day 1, week 02 = day 8), not an ISO week.
    let year = 2000 + year_fragment as i32;
    let jan1 = match NaiveDate::from_ymd_opt(year, 1, 1) {
        Some(d) => d,
        None => return BarcodeData::invalid(trimmed.to_string()),
    };
    let production_date = jan1 + Duration::weeks(i64::from(week_fragment) - 1);
    let expiry_date = add_years(production_date, SHELF_LIFE_YEARS);

    let months_left = months_between(today, expiry_date);

    BarcodeData {
        original_code: trimmed.to_string(),
        year,
        week: week_fragment,
        production_date,
        expiry_date,
        status: classify(months_left),
        months_left,
    }
}

/// Exactly two ASCII digits, or nothing. Rejects signs and whitespace that
/// `str::parse` would otherwise accept.
fn two_digit_fragment(s: &str) -> Option<u32> {
    if s.len() == 2 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

// ═══════════════════════════════════════════════════════════
// Classification
// ═══════════════════════════════════════════════════════════

/// Threshold-ordered classification. Exactly 0 months left is already
/// `Expired`, exactly 6 is still `Warning`.
fn classify(months_left: i32) -> BarcodeStatus {
    if months_left <= 0 {
        BarcodeStatus::Expired
    } else if months_left <= WARNING_THRESHOLD_MONTHS {
        BarcodeStatus::Warning
    } else {
        BarcodeStatus::Safe
    }
}

/// Whole calendar months from `from` to `to`; negative when `to` is past.
fn months_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let mut months =
        (to.year() - from.year()) * 12 + (to.month() as i32 - from.month() as i32);
    if to.day() < from.day() {
        months -= 1;
    }
    months
}

/// Same month/day shifted by `years`; Feb 29 rolls to Mar 1 when the target
/// year has no leap day.
fn add_years(date: NaiveDate, years: i32) -> NaiveDate {
    let target_year = date.year() + years;
    match date.with_year(target_year) {
        Some(d) => d,
        None => NaiveDate::from_ymd_opt(target_year, 3, 1).unwrap_or(date),
    }
}

// ═══════════════════════════════════════════════════════════
// Tests
// ═══════════════════════════════════════════════════════════
