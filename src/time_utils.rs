// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time formatting.

use chrono::{DateTime, Datelike, SecondsFormat, Utc};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Full English month name for the UTC month of `date`.
pub fn month_name(date: DateTime<Utc>) -> &'static str {
    MONTHS[date.month0() as usize]
}

/// Last ten decimal digits of the timestamp in milliseconds.
pub fn millis_suffix(date: DateTime<Utc>) -> u64 {
    date.timestamp_millis().unsigned_abs() % 10_000_000_000
}
