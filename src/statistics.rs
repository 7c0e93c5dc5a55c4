use crate::error::{Result, StatsError};
use crate::types::{KingsStatistics, Monarch, RuleRecord};
use chrono::Datelike;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Current UTC calendar year, the default reference year for open reigns.
pub fn current_year() -> i32 {
    chrono::Utc::now().year()
}

/// Years ruled; open reigns are measured up to `reference_year`.
///
/// Widened to `i64` so any pair of `i32` years has a representable difference.
pub fn rule_length(monarch: &Monarch, reference_year: i32) -> i64 {
    i64::from(monarch.reign.end.unwrap_or(reference_year)) - i64::from(monarch.reign.start)
}

/// Pick the item with the highest `metric`, breaking ties by the smallest `key`.
///
/// Equivalent to ordering by metric descending then key ascending and taking
/// the first element, without materializing the sort. Returns `None` for an
/// empty input.
pub fn argmax_by<T, I, V, M, K>(items: I, metric: M, key: K) -> Option<T>
where
    I: IntoIterator<Item = T>,
    V: Ord,
    M: Fn(&T) -> V,
    K: Fn(&T) -> &str,
{
    let mut best: Option<(V, T)> = None;
    for item in items {
        let value = metric(&item);
        let replace = match &best {
            None => true,
            Some((best_value, best_item)) => {
                value > *best_value || (value == *best_value && key(&item) < key(best_item))
            }
        };
        if replace {
            best = Some((value, item));
        }
    }
    best.map(|(_, item)| item)
}

/// Summed rule length per house.
pub fn house_totals(monarchs: &[Monarch], reference_year: i32) -> BTreeMap<String, i64> {
    let mut totals = BTreeMap::new();
    for monarch in monarchs {
        *totals.entry(monarch.house.clone()).or_insert(0) += rule_length(monarch, reference_year);
    }
    totals
}

/// Number of monarchs sharing each first name.
pub fn first_name_counts(monarchs: &[Monarch]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for monarch in monarchs {
        *counts.entry(monarch.first_name.clone()).or_insert(0) += 1;
    }
    counts
}

/// Compute all four aggregates. Fails with [`StatsError::EmptyInput`] when
/// there is nothing to rank.
#[instrument(skip(monarchs), fields(count = monarchs.len()))]
pub fn compute(monarchs: &[Monarch], reference_year: i32) -> Result<KingsStatistics> {
    if monarchs.is_empty() {
        return Err(StatsError::EmptyInput);
    }

    let longest_ruling_monarch = argmax_by(
        monarchs.iter(),
        |m| rule_length(m, reference_year),
        |m| m.full_name.as_str(),
    )
    .map(|m| RuleRecord::new(m.full_name.as_str(), rule_length(m, reference_year)))
    .ok_or(StatsError::EmptyInput)?;

    let longest_ruling_house = argmax_by(
        house_totals(monarchs, reference_year),
        |(_, years)| *years,
        |(house, _)| house.as_str(),
    )
    .map(|(house, years)| RuleRecord::new(house, years))
    .ok_or(StatsError::EmptyInput)?;

    let most_common_first_name = argmax_by(
        first_name_counts(monarchs),
        |(_, count)| *count,
        |(name, _)| name.as_str(),
    )
    .map(|(name, _)| name)
    .ok_or(StatsError::EmptyInput)?;

    debug!(
        "Longest monarch {:?}, longest house {:?}, most common name {}",
        longest_ruling_monarch, longest_ruling_house, most_common_first_name
    );

    Ok(KingsStatistics {
        kings_count: monarchs.len(),
        longest_ruling_monarch,
        longest_ruling_house,
        most_common_first_name,
    })
}
