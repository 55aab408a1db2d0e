use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerEntry;
use crate::utils::time_utils::{month_start, months_after, months_before, year_start};

/// Step of a bucketed series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Daily,
    Monthly,
    Yearly,
}

impl Granularity {
    /// Start of the period containing `date`.
    pub fn period_start(&self, date: NaiveDate) -> NaiveDate {
        match self {
            Granularity::Daily => date,
            Granularity::Monthly => month_start(date),
            Granularity::Yearly => year_start(date),
        }
    }

    /// Start of the period following the one starting at `period_start`.
    pub fn next_period(&self, period_start: NaiveDate) -> Option<NaiveDate> {
        match self {
            Granularity::Daily => period_start.succ_opt(),
            Granularity::Monthly => months_after(period_start, 1),
            Granularity::Yearly => months_after(period_start, 12),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Granularity::Daily => write!(f, "daily"),
            Granularity::Monthly => write!(f, "monthly"),
            Granularity::Yearly => write!(f, "yearly"),
        }
    }
}

/// A dated amount fed into the bucketing primitive.
pub trait TimedValue {
    fn date(&self) -> NaiveDate;
    fn amount(&self) -> Decimal;
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

impl TimedValue for ValuePoint {
    fn date(&self) -> NaiveDate {
        self.date
    }

    fn amount(&self) -> Decimal {
        self.value
    }
}

impl TimedValue for LedgerEntry {
    fn date(&self) -> NaiveDate {
        self.purchase_date
    }

    fn amount(&self) -> Decimal {
        self.value
    }
}

/// One period of a bucketed series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketPoint {
    pub period_start: NaiveDate,
    pub period_total: Decimal,
    pub cumulative_total: Decimal,
}

/// Contiguous, gap-free sequence of periods in ascending order.
pub type BucketedSeries = Vec<BucketPoint>;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReturn {
    pub year: i32,
    pub pct_change: Decimal,
}

/// Year-by-asset return matrix. `returns[i]` lines up with `assets[i]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReturnRow {
    pub year: i32,
    pub returns: Vec<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearlyReturnTable {
    pub assets: Vec<String>,
    /// Most recent year first.
    pub rows: Vec<YearlyReturnRow>,
}

impl YearlyReturnTable {
    /// Return of `asset` in `year`, if both are present in the table.
    pub fn get(&self, year: i32, asset: &str) -> Option<Decimal> {
        let column = self.assets.iter().position(|a| a == asset)?;
        self.rows
            .iter()
            .find(|r| r.year == year)
            .and_then(|r| r.returns.get(column).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub timestamp: NaiveDate,
    pub pct_growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetGrowth {
    pub asset: String,
    pub points: Vec<GrowthPoint>,
}

/// Buy-and-hold outcome of one asset over a window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetReturn {
    pub asset: String,
    pub first_date: NaiveDate,
    pub first_close: Decimal,
    pub last_close: Decimal,
    /// Gain on the invested amount, rounded to 2 dp.
    pub gain: Decimal,
    /// Rounded to 2 dp.
    pub return_pct: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnSummary {
    pub investment: Decimal,
    pub returns: Vec<AssetReturn>,
    /// Requested assets with no observations in the window.
    pub missing_assets: Vec<String>,
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Look-back period offered by growth charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PeriodPreset {
    /// From the earliest available date.
    Max,
    Last6Months,
    Last12Months,
    Last2Years,
    Last5Years,
}

impl PeriodPreset {
    fn months(&self) -> Option<u32> {
        match self {
            PeriodPreset::Max => None,
            PeriodPreset::Last6Months => Some(6),
            PeriodPreset::Last12Months => Some(12),
            PeriodPreset::Last2Years => Some(24),
            PeriodPreset::Last5Years => Some(60),
        }
    }

    /// Window ending at `today`. `Max` needs the earliest available date and
    /// resolves to `None` without one.
    pub fn resolve(&self, today: NaiveDate, earliest: Option<NaiveDate>) -> Option<DateWindow> {
        let start = match self.months() {
            Some(months) => months_before(today, months),
            None => earliest?,
        };
        Some(DateWindow::new(start, today))
    }
}
