//! Parsing of the loosely formatted times the exchange publishes.
//!
//! Quotes carry a bare wall-clock `tradeHour` ("14:32:05") while maturities
//! and filing dates come as full dates in a handful of layouts. All naive
//! values are interpreted in Buenos Aires time.

use time::format_description::well_known::Rfc3339;
use time::macros::{format_description, offset};
use time::{Date, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// Buenos Aires offset. Argentina has not observed daylight saving since 2009.
pub const MARKET_OFFSET: UtcOffset = offset!(-3);

/// Parse a quote's trade time, falling back to the current instant.
pub fn parse_trade_time(raw: &str) -> OffsetDateTime {
    parse_trade_time_at(raw, OffsetDateTime::now_utc())
}

/// Parse a quote's trade time relative to `now`.
///
/// A bare `HH:MM:SS` or `HH:MM` value is placed on today's market date.
/// Empty or unparsable input yields `now`.
pub fn parse_trade_time_at(raw: &str, now: OffsetDateTime) -> OffsetDateTime {
    let raw = raw.trim();
    if raw.is_empty() {
        return now;
    }

    if let Some(time_of_day) = parse_time_of_day(raw) {
        let today = now.to_offset(MARKET_OFFSET).date();
        return PrimitiveDateTime::new(today, time_of_day).assume_offset(MARKET_OFFSET);
    }

    parse_date_time(raw).unwrap_or(now)
}

/// Parse a calendar date or date-time. Returns `None` when no layout matches.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    parse_date_time(raw).or_else(|| {
        Date::parse(raw, format_description!("[year]-[month]-[day]"))
            .ok()
            .map(|date| date.midnight().assume_offset(MARKET_OFFSET))
    })
}

fn parse_time_of_day(raw: &str) -> Option<Time> {
    Time::parse(raw, format_description!("[hour]:[minute]:[second]"))
        .or_else(|_| Time::parse(raw, format_description!("[hour]:[minute]")))
        .ok()
}

fn parse_date_time(raw: &str) -> Option<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(value);
    }

    PrimitiveDateTime::parse(
        raw,
        format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"),
    )
    .or_else(|_| {
        PrimitiveDateTime::parse(
            raw,
            format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
        )
    })
    .ok()
    .map(|value| value.assume_offset(MARKET_OFFSET))
}
