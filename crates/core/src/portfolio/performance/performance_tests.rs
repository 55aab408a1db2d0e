#[cfg(test)]
mod tests {
    use crate::ledger::LedgerEntry;
    use crate::portfolio::performance::*;
    use crate::quotes::PriceObservation;
    use chrono::{Duration, NaiveDate};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn point(d: NaiveDate, value: Decimal) -> ValuePoint {
        ValuePoint { date: d, value }
    }

    fn obs(asset: &str, d: NaiveDate, close: Decimal) -> PriceObservation {
        PriceObservation::new(asset, d, close)
    }

    fn bucket(d: NaiveDate, total: Decimal, cumulative: Decimal) -> BucketPoint {
        BucketPoint {
            period_start: d,
            period_total: total,
            cumulative_total: cumulative,
        }
    }

    // ============================================================================
    // Bucketing
    // ============================================================================

    #[test]
    fn test_bucketed_cumulative_empty_input() {
        let empty: Vec<ValuePoint> = Vec::new();
        assert!(bucketed_cumulative(&empty, Granularity::Daily).is_empty());
        assert!(bucketed_cumulative(&empty, Granularity::Yearly).is_empty());
    }

    #[test]
    fn test_bucketed_cumulative_forward_fills_missing_periods() {
        let input = vec![
            point(date(2024, 3, 20), dec!(50)),
            point(date(2024, 1, 5), dec!(100)),
        ];
        let series = bucketed_cumulative(&input, Granularity::Monthly);
        assert_eq!(
            series,
            vec![
                bucket(date(2024, 1, 1), dec!(100), dec!(100)),
                bucket(date(2024, 2, 1), dec!(0), dec!(100)),
                bucket(date(2024, 3, 1), dec!(50), dec!(150)),
            ]
        );
    }

    #[test]
    fn test_bucketed_cumulative_sums_within_a_period() {
        let input = vec![
            point(date(2023, 2, 1), dec!(10)),
            point(date(2023, 11, 30), dec!(15)),
            point(date(2023, 6, 15), dec!(5)),
        ];
        let series = bucketed_cumulative(&input, Granularity::Yearly);
        assert_eq!(series, vec![bucket(date(2023, 1, 1), dec!(30), dec!(30))]);
    }

    #[test]
    fn test_bucketed_cumulative_single_observation() {
        let input = vec![point(date(2024, 2, 29), dec!(7))];
        let series = bucketed_cumulative(&input, Granularity::Daily);
        assert_eq!(series, vec![bucket(date(2024, 2, 29), dec!(7), dec!(7))]);
    }

    #[test]
    fn test_bucketed_cumulative_daily_spans_year_end() {
        let input = vec![
            point(date(2023, 12, 30), dec!(1)),
            point(date(2024, 1, 2), dec!(2)),
        ];
        let series = bucketed_cumulative(&input, Granularity::Daily);
        assert_eq!(series.len(), 4);
        assert_eq!(series[1], bucket(date(2023, 12, 31), dec!(0), dec!(1)));
        assert_eq!(series[3].cumulative_total, dec!(3));
    }

    #[test]
    fn test_bucketed_cumulative_saturates_instead_of_overflowing() {
        let input = vec![
            point(date(2024, 1, 5), Decimal::MAX),
            point(date(2024, 1, 6), Decimal::MAX),
            point(date(2024, 2, 1), dec!(1)),
        ];
        let series = bucketed_cumulative(&input, Granularity::Monthly);
        assert_eq!(series.len(), 2);
        assert_eq!(series[0].period_total, Decimal::MAX);
        assert_eq!(series[1].cumulative_total, Decimal::MAX);
    }

    #[test]
    fn test_bucketed_cumulative_accepts_ledger_entries() {
        let entries = vec![
            LedgerEntry::new(1, "A", dec!(2), dec!(10), date(2021, 6, 1)).unwrap(),
            LedgerEntry::new(2, "B", dec!(1), dec!(5), date(2023, 1, 1)).unwrap(),
        ];
        let series = bucketed_cumulative(&entries, Granularity::Yearly);
        assert_eq!(
            series,
            vec![
                bucket(date(2021, 1, 1), dec!(20), dec!(20)),
                bucket(date(2022, 1, 1), dec!(0), dec!(20)),
                bucket(date(2023, 1, 1), dec!(5), dec!(25)),
            ]
        );
    }

    // ============================================================================
    // Yearly returns
    // ============================================================================

    #[test]
    fn test_yearly_return_first_and_last_close() {
        let observations = vec![
            obs("X", date(2020, 12, 31), dec!(15)),
            obs("X", date(2020, 1, 1), dec!(10)),
            obs("Y", date(2020, 6, 1), dec!(99)),
        ];
        assert_eq!(
            yearly_return(&observations, "X"),
            vec![YearlyReturn {
                year: 2020,
                pct_change: dec!(50)
            }]
        );
    }

    #[test]
    fn test_yearly_return_edge_cases() {
        assert!(yearly_return(&[], "X").is_empty());
        let single = vec![obs("X", date(2021, 3, 3), dec!(12))];
        assert_eq!(yearly_return(&single, "X")[0].pct_change, Decimal::ZERO);
    }

    #[test]
    fn test_yearly_return_table_outer_join() {
        let observations = vec![
            obs("A", date(2021, 1, 4), dec!(10)),
            obs("A", date(2021, 12, 30), dec!(12)),
            obs("A", date(2022, 1, 3), dec!(12)),
            obs("A", date(2022, 12, 29), dec!(9)),
            obs("B", date(2022, 1, 3), dec!(3)),
            obs("B", date(2022, 12, 29), dec!(4)),
        ];
        let table = yearly_return_table(&observations, &["A", "B"]);

        assert_eq!(table.assets, vec!["A", "B"]);
        let years: Vec<i32> = table.rows.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2022, 2021]);
        assert_eq!(table.get(2021, "A"), Some(dec!(20)));
        assert_eq!(table.get(2021, "B"), Some(Decimal::ZERO));
        assert_eq!(table.get(2022, "A"), Some(dec!(-25)));
        assert_eq!(table.get(2022, "B"), Some(dec!(33.33)));
        assert_eq!(table.get(2019, "A"), None);
    }

    // ============================================================================
    // Baseline growth
    // ============================================================================

    #[test]
    fn test_baseline_growth_example() {
        let observations = vec![
            obs("X", date(2024, 1, 1), dec!(10)),
            obs("X", date(2024, 1, 2), dec!(12)),
            obs("X", date(2024, 1, 3), dec!(9)),
        ];
        let growth: Vec<Decimal> = baseline_growth(&observations, "X")
            .into_iter()
            .map(|g| g.pct_growth)
            .collect();
        assert_eq!(growth, vec![dec!(0), dec!(20), dec!(-10)]);
    }

    #[test]
    fn test_baseline_growth_is_per_window() {
        let observations = vec![
            obs("X", date(2024, 1, 1), dec!(10)),
            obs("X", date(2024, 2, 1), dec!(20)),
            obs("X", date(2024, 3, 1), dec!(30)),
        ];
        let window = DateWindow::new(date(2024, 2, 1), date(2024, 3, 31));
        let filtered = crate::quotes::filter_window(&observations, &window);
        let growth = baseline_growth(&filtered, "X");
        assert_eq!(growth[0].pct_growth, Decimal::ZERO);
        assert_eq!(growth[1].pct_growth, dec!(50));
    }

    #[test]
    fn test_baseline_growth_edge_cases() {
        assert!(baseline_growth(&[], "X").is_empty());
        let single = vec![obs("X", date(2024, 1, 1), dec!(10))];
        assert_eq!(baseline_growth(&single, "X")[0].pct_growth, Decimal::ZERO);
        let zero_base = vec![
            obs("X", date(2024, 1, 1), dec!(0)),
            obs("X", date(2024, 1, 2), dec!(5)),
        ];
        assert_eq!(baseline_growth(&zero_base, "X")[1].pct_growth, Decimal::ZERO);
    }

    #[test]
    fn test_baseline_growth_by_asset_keeps_requested_order() {
        let observations = vec![
            obs("A", date(2024, 1, 1), dec!(1)),
            obs("B", date(2024, 1, 1), dec!(2)),
        ];
        let growth = baseline_growth_by_asset(&observations, &["B", "A", "C"]);
        let assets: Vec<&str> = growth.iter().map(|g| g.asset.as_str()).collect();
        assert_eq!(assets, vec!["B", "A", "C"]);
        assert!(growth[2].points.is_empty());
    }

    // ============================================================================
    // Return summary
    // ============================================================================

    #[test]
    fn test_period_return_summary() {
        let observations = vec![
            obs("A", date(2024, 1, 2), dec!(30)),
            obs("A", date(2024, 6, 28), dec!(40)),
            obs("B", date(2024, 3, 1), dec!(8)),
            obs("B", date(2024, 6, 28), dec!(6)),
        ];
        let summary = period_return_summary(&observations, &["A", "B", "C"], dec!(1000));

        assert_eq!(summary.investment, dec!(1000));
        assert_eq!(summary.missing_assets, vec!["C".to_string()]);
        assert_eq!(summary.returns.len(), 2);

        let a = &summary.returns[0];
        assert_eq!(a.first_date, date(2024, 1, 2));
        assert_eq!(a.first_close, dec!(30));
        assert_eq!(a.last_close, dec!(40));
        assert_eq!(a.gain, dec!(333.33));
        assert_eq!(a.return_pct, dec!(33.33));

        let b = &summary.returns[1];
        assert_eq!(b.gain, dec!(-250));
        assert_eq!(b.return_pct, dec!(-25));
    }

    // ============================================================================
    // Presets and investment growth
    // ============================================================================

    #[test]
    fn test_period_preset_resolution() {
        let today = date(2024, 8, 31);
        assert_eq!(
            PeriodPreset::Last6Months.resolve(today, None),
            Some(DateWindow::new(date(2024, 2, 29), today))
        );
        assert_eq!(
            PeriodPreset::Last5Years.resolve(today, None).unwrap().start,
            date(2019, 8, 31)
        );
        assert_eq!(PeriodPreset::Max.resolve(today, None), None);
        assert_eq!(
            PeriodPreset::Max.resolve(today, Some(date(2010, 1, 1))),
            Some(DateWindow::new(date(2010, 1, 1), today))
        );
    }

    #[test]
    fn test_investment_growth_filters_to_window() {
        let today = date(2024, 6, 15);
        let entries = vec![
            LedgerEntry::new(1, "A", dec!(1), dec!(100), date(2020, 5, 1)).unwrap(),
            LedgerEntry::new(2, "B", dec!(2), dec!(10), date(2024, 1, 20)).unwrap(),
            LedgerEntry::new(3, "A", dec!(1), dec!(30), date(2024, 4, 2)).unwrap(),
            LedgerEntry::new(4, "C", dec!(1), dec!(99), date(2024, 7, 1)).unwrap(),
        ];

        let recent = investment_growth(&entries, Granularity::Monthly, PeriodPreset::Last6Months, today);
        assert_eq!(
            recent,
            vec![
                bucket(date(2024, 1, 1), dec!(20), dec!(20)),
                bucket(date(2024, 2, 1), dec!(0), dec!(20)),
                bucket(date(2024, 3, 1), dec!(0), dec!(20)),
                bucket(date(2024, 4, 1), dec!(30), dec!(50)),
            ]
        );

        let all = investment_growth(&entries, Granularity::Yearly, PeriodPreset::Max, today);
        assert_eq!(all.len(), 5);
        assert_eq!(all[0].period_start, date(2020, 1, 1));
        assert_eq!(all[4].cumulative_total, dec!(150));
    }

    #[test]
    fn test_investment_growth_empty() {
        let today = date(2024, 6, 15);
        assert!(investment_growth(&[], Granularity::Daily, PeriodPreset::Max, today).is_empty());

        let old = vec![LedgerEntry::new(1, "A", dec!(1), dec!(1), date(2001, 1, 1)).unwrap()];
        assert!(
            investment_growth(&old, Granularity::Daily, PeriodPreset::Last2Years, today).is_empty()
        );
    }

    // ============================================================================
    // Properties
    // ============================================================================

    fn points_strategy() -> impl Strategy<Value = Vec<ValuePoint>> {
        prop::collection::vec((0i64..1500, 0i64..100_000), 1..30).prop_map(|rows| {
            rows.into_iter()
                .map(|(offset, cents)| {
                    point(
                        date(2020, 1, 1) + Duration::days(offset),
                        Decimal::new(cents, 2),
                    )
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_bucketed_series_is_contiguous_and_monotonic(
            points in points_strategy(),
            granularity in prop::sample::select(vec![
                Granularity::Daily,
                Granularity::Monthly,
                Granularity::Yearly,
            ]),
        ) {
            let series = bucketed_cumulative(&points, granularity);
            prop_assert!(!series.is_empty());

            let first = points.iter().map(|p| granularity.period_start(p.date)).min().unwrap();
            let last = points.iter().map(|p| granularity.period_start(p.date)).max().unwrap();
            prop_assert_eq!(series[0].period_start, first);
            prop_assert_eq!(series[series.len() - 1].period_start, last);
            prop_assert_eq!(series[0].cumulative_total, series[0].period_total);

            for pair in series.windows(2) {
                prop_assert_eq!(granularity.next_period(pair[0].period_start), Some(pair[1].period_start));
                prop_assert!(pair[1].cumulative_total >= pair[0].cumulative_total);
                prop_assert_eq!(
                    pair[1].cumulative_total,
                    pair[0].cumulative_total + pair[1].period_total
                );
            }

            let total: Decimal = points.iter().map(|p| p.value).sum();
            prop_assert_eq!(series[series.len() - 1].cumulative_total, total);
        }
    }
}
