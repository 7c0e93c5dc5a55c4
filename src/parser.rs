//! Normalization of raw monarch records.
//!
//! Every record either becomes exactly one [`Monarch`] or fails the whole batch;
//! there is no best-effort mode that drops bad rows.

use crate::error::{Result, StatsError};
use crate::types::{Monarch, RawMonarch, Reign};
use tracing::{debug, warn};

/// First space-delimited token of a full name.
pub fn first_name(record_id: i64, full_name: &str) -> Result<String> {
    if full_name.is_empty() {
        return Err(StatsError::EmptyName { record_id });
    }
    // split always yields at least one item
    Ok(full_name.split(' ').next().unwrap_or_default().to_string())
}

/// Parse a `yrs` value: `"1066"`, `"1066-1087"` or `"1952-"` (still reigning).
pub fn parse_reign(record_id: i64, years: &str) -> Result<Reign> {
    let format_err = |reason: String| StatsError::Format {
        record_id,
        value: years.to_string(),
        reason,
    };
    let parse_year = |segment: &str| {
        segment
            .parse::<i32>()
            .map_err(|e| format_err(format!("'{}' is not a year: {}", segment, e)))
    };

    let segments: Vec<&str> = years.split('-').collect();
    let reign = match segments.as_slice() {
        // single year reign
        [year] => {
            let year = parse_year(year)?;
            Reign {
                start: year,
                end: Some(year),
            }
        }
        [start, ""] => Reign {
            start: parse_year(start)?,
            end: None,
        },
        [start, end] => Reign {
            start: parse_year(start)?,
            end: Some(parse_year(end)?),
        },
        _ => {
            return Err(format_err(format!(
                "expected at most one '-', found {}",
                segments.len() - 1
            )))
        }
    };

    if let Some(end) = reign.end {
        if end < reign.start {
            return Err(format_err(format!(
                "reign ends ({}) before it starts ({})",
                end, reign.start
            )));
        }
    }

    Ok(reign)
}

pub fn to_monarch(raw: &RawMonarch) -> Result<Monarch> {
    Ok(Monarch {
        id: raw.id,
        first_name: first_name(raw.id, &raw.name)?,
        full_name: raw.name.clone(),
        reign: parse_reign(raw.id, &raw.years)?,
        house: raw.house.clone(),
    })
}

/// Normalize a batch, preserving input order.
pub fn normalize_all(raw: &[RawMonarch]) -> Result<Vec<Monarch>> {
    let monarchs = raw
        .iter()
        .map(|record| {
            to_monarch(record).map_err(|e| {
                warn!("Rejecting record {}: {}", record.id, e);
                e
            })
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Normalized {} monarch records", monarchs.len());
    Ok(monarchs)
}
