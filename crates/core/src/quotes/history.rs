//! Helpers over raw price history: window filtering, per-asset selection,
//! close-to-close changes and latest snapshots.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use crate::constants::CHANGE_DECIMAL_PRECISION;
use crate::portfolio::performance::DateWindow;
use crate::utils::decimal_utils::percent_change;

use super::model::{PriceObservation, PriceSnapshot};

/// Stable chronological sort; rows sharing a timestamp keep input order.
pub fn sort_chronologically(observations: &mut [PriceObservation]) {
    observations.sort_by_key(|o| o.timestamp);
}

/// Observations whose timestamp falls inside the window, in input order.
pub fn filter_window(observations: &[PriceObservation], window: &DateWindow) -> Vec<PriceObservation> {
    observations
        .iter()
        .filter(|o| window.contains(o.timestamp))
        .cloned()
        .collect()
}

/// Observations of one asset, sorted chronologically.
pub fn for_asset(observations: &[PriceObservation], asset: &str) -> Vec<PriceObservation> {
    let mut selected: Vec<PriceObservation> = observations
        .iter()
        .filter(|o| o.asset == asset)
        .cloned()
        .collect();
    sort_chronologically(&mut selected);
    selected
}

/// Distinct asset labels, sorted.
pub fn tickers(observations: &[PriceObservation]) -> Vec<String> {
    observations
        .iter()
        .map(|o| o.asset.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Earliest and latest timestamps, or `None` for empty input.
pub fn date_bounds(observations: &[PriceObservation]) -> Option<(NaiveDate, NaiveDate)> {
    let min = observations.iter().map(|o| o.timestamp).min()?;
    let max = observations.iter().map(|o| o.timestamp).max()?;
    Some((min, max))
}

/// Recomputes `daily_change_pct` per asset from consecutive closes.
///
/// The first row of each asset gets `None`. Changes are rounded to four
/// decimal places. Output is grouped by asset (sorted) and chronological
/// within each asset.
pub fn daily_changes(observations: &[PriceObservation]) -> Vec<PriceObservation> {
    let mut by_asset: BTreeMap<&str, Vec<PriceObservation>> = BTreeMap::new();
    for observation in observations {
        by_asset
            .entry(observation.asset.as_str())
            .or_default()
            .push(observation.clone());
    }

    let mut result = Vec::with_capacity(observations.len());
    for (_, mut series) in by_asset {
        sort_chronologically(&mut series);
        let mut previous_close: Option<Decimal> = None;
        for mut observation in series {
            observation.daily_change_pct = previous_close
                .map(|prev| percent_change(prev, observation.close).round_dp(CHANGE_DECIMAL_PRECISION));
            previous_close = Some(observation.close);
            result.push(observation);
        }
    }
    result
}

/// Compounded change since the first observation of one asset.
///
/// Returns one row per observation in chronological order; the first row is
/// `None`. Values are percentages rounded to four decimal places.
pub fn accumulated_changes(
    observations: &[PriceObservation],
    asset: &str,
) -> Vec<(NaiveDate, Option<Decimal>)> {
    let series = for_asset(observations, asset);
    let Some(first) = series.first() else {
        return Vec::new();
    };
    let base = first.close;

    series
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let change = (i > 0)
                .then(|| percent_change(base, o.close).round_dp(CHANGE_DECIMAL_PRECISION));
            (o.timestamp, change)
        })
        .collect()
}

/// Last close of an asset and its change against the previous close.
pub fn latest_snapshot(observations: &[PriceObservation], asset: &str) -> Option<PriceSnapshot> {
    let series = for_asset(observations, asset);
    let last = series.last()?;
    let day_change_pct = series
        .len()
        .checked_sub(2)
        .and_then(|i| series.get(i))
        .map(|prev| percent_change(prev.close, last.close));

    debug!(
        "Latest snapshot for {}: {} on {}",
        asset, last.close, last.timestamp
    );
    Some(PriceSnapshot {
        asset: asset.to_string(),
        timestamp: last.timestamp,
        close: last.close,
        day_change_pct,
    })
}
