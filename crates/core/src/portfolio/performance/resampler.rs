//! Period bucketing with gap filling.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;

use super::performance_model::{BucketPoint, BucketedSeries, Granularity, TimedValue};

/// Groups dated amounts into periods and emits a contiguous cumulative series.
///
/// The period axis runs from the first to the last period present in the
/// input with no holes. A period without input gets `period_total = 0` and
/// keeps the previous `cumulative_total`. Totals saturate at the `Decimal`
/// bounds.
pub fn bucketed_cumulative<T: TimedValue>(
    observations: &[T],
    granularity: Granularity,
) -> BucketedSeries {
    let mut totals: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for observation in observations {
        let total = totals
            .entry(granularity.period_start(observation.date()))
            .or_insert(Decimal::ZERO);
        *total = total.saturating_add(observation.amount());
    }

    let (Some(&first), Some(&last)) = (totals.keys().next(), totals.keys().next_back()) else {
        return Vec::new();
    };

    let mut series = Vec::new();
    let mut cumulative = Decimal::ZERO;
    let mut current = Some(first);
    while let Some(period_start) = current.filter(|p| *p <= last) {
        let period_total = totals.get(&period_start).copied().unwrap_or(Decimal::ZERO);
        cumulative = cumulative.saturating_add(period_total);
        series.push(BucketPoint {
            period_start,
            period_total,
            cumulative_total: cumulative,
        });
        current = granularity.next_period(period_start);
    }

    debug!(
        "Bucketed {} observations into {} {} periods ({} to {})",
        observations.len(),
        series.len(),
        granularity,
        first,
        last
    );
    series
}
