//! Return and growth computations over price history and the ledger.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{Datelike, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::ledger::LedgerEntry;
use crate::quotes::{for_asset, PriceObservation};
use crate::utils::decimal_utils::percent_change;

use super::performance_model::*;
use super::resampler::bucketed_cumulative;

/// Calendar-year return of one asset, from the first to the last close
/// observed in each year. Years without observations are absent.
pub fn yearly_return(observations: &[PriceObservation], asset: &str) -> Vec<YearlyReturn> {
    let series = for_asset(observations, asset);

    let mut by_year: BTreeMap<i32, (Decimal, Decimal)> = BTreeMap::new();
    for observation in &series {
        by_year
            .entry(observation.timestamp.year())
            .and_modify(|(_, last)| *last = observation.close)
            .or_insert((observation.close, observation.close));
    }

    by_year
        .into_iter()
        .map(|(year, (first, last))| YearlyReturn {
            year,
            pct_change: percent_change(first, last),
        })
        .collect()
}

/// Outer join of per-asset yearly returns on year.
///
/// Absent cells are zero, values are rounded to 2 dp and the most recent
/// year comes first.
pub fn yearly_return_table<S: AsRef<str>>(
    observations: &[PriceObservation],
    assets: &[S],
) -> YearlyReturnTable {
    let per_asset: Vec<BTreeMap<i32, Decimal>> = assets
        .iter()
        .map(|asset| {
            yearly_return(observations, asset.as_ref())
                .into_iter()
                .map(|r| (r.year, r.pct_change))
                .collect()
        })
        .collect();

    let years: BTreeSet<i32> = per_asset.iter().flat_map(|m| m.keys().copied()).collect();

    let rows = years
        .into_iter()
        .rev()
        .map(|year| YearlyReturnRow {
            year,
            returns: per_asset
                .iter()
                .map(|m| {
                    m.get(&year)
                        .copied()
                        .unwrap_or(Decimal::ZERO)
                        .round_dp(DISPLAY_DECIMAL_PRECISION)
                })
                .collect(),
        })
        .collect();

    YearlyReturnTable {
        assets: assets.iter().map(|a| a.as_ref().to_string()).collect(),
        rows,
    }
}

/// Percentage growth of each close relative to the earliest close in the
/// given observations. Row-preserving: one point per observation of the asset.
pub fn baseline_growth(observations: &[PriceObservation], asset: &str) -> Vec<GrowthPoint> {
    let series = for_asset(observations, asset);
    let Some(base) = series.first().map(|o| o.close) else {
        return Vec::new();
    };

    series
        .iter()
        .map(|o| GrowthPoint {
            timestamp: o.timestamp,
            pct_growth: percent_change(base, o.close),
        })
        .collect()
}

/// Baseline growth for several assets, in the requested order.
pub fn baseline_growth_by_asset<S: AsRef<str>>(
    observations: &[PriceObservation],
    assets: &[S],
) -> Vec<AssetGrowth> {
    assets
        .iter()
        .map(|asset| AssetGrowth {
            asset: asset.as_ref().to_string(),
            points: baseline_growth(observations, asset.as_ref()),
        })
        .collect()
}

/// Buy-and-hold result of investing `investment` in each asset at its first
/// close in the observations and selling at its last close.
pub fn period_return_summary<S: AsRef<str>>(
    observations: &[PriceObservation],
    assets: &[S],
    investment: Decimal,
) -> ReturnSummary {
    let mut returns = Vec::new();
    let mut missing_assets = Vec::new();

    for asset in assets {
        let asset = asset.as_ref();
        let series = for_asset(observations, asset);
        let (Some(first), Some(last)) = (series.first(), series.last()) else {
            missing_assets.push(asset.to_string());
            continue;
        };

        let gain = last
            .close
            .saturating_sub(first.close)
            .checked_div(first.close)
            .map(|ratio| ratio.saturating_mul(investment))
            .unwrap_or(Decimal::ZERO);

        returns.push(AssetReturn {
            asset: asset.to_string(),
            first_date: first.timestamp,
            first_close: first.close,
            last_close: last.close,
            gain: gain.round_dp(DISPLAY_DECIMAL_PRECISION),
            return_pct: percent_change(first.close, last.close)
                .round_dp(DISPLAY_DECIMAL_PRECISION),
        });
    }

    if !missing_assets.is_empty() {
        debug!("No price data in window for: {}", missing_assets.join(", "));
    }

    ReturnSummary {
        investment,
        returns,
        missing_assets,
    }
}

/// Accumulated invested value over time.
///
/// Entries are restricted to the preset window ending at `today` (the `Max`
/// preset starts at the earliest purchase) and their values are bucketed at
/// the given granularity.
pub fn investment_growth(
    entries: &[LedgerEntry],
    granularity: Granularity,
    preset: PeriodPreset,
    today: NaiveDate,
) -> BucketedSeries {
    let earliest = entries.iter().map(|e| e.purchase_date).min();
    let Some(window) = preset.resolve(today, earliest) else {
        return Vec::new();
    };

    let in_window: Vec<LedgerEntry> = entries
        .iter()
        .filter(|e| window.contains(e.purchase_date))
        .cloned()
        .collect();

    debug!(
        "Investment growth over {} to {}: {} of {} entries",
        window.start,
        window.end,
        in_window.len(),
        entries.len()
    );
    bucketed_cumulative(&in_window, granularity)
}
