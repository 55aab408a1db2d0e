#[cfg(test)]
mod tests {
    use crate::portfolio::performance::DateWindow;
    use crate::quotes::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn obs(asset: &str, d: NaiveDate, close: Decimal) -> PriceObservation {
        PriceObservation::new(asset, d, close)
    }

    fn sample() -> Vec<PriceObservation> {
        vec![
            obs("VALE3", date(2024, 1, 3), dec!(70)),
            obs("PETR4", date(2024, 1, 3), dec!(40)),
            obs("PETR4", date(2024, 1, 2), dec!(38)),
            obs("VALE3", date(2024, 1, 2), dec!(72)),
            obs("PETR4", date(2024, 1, 4), dec!(41.9)),
        ]
    }

    #[test]
    fn test_filter_window_is_inclusive() {
        let window = DateWindow::new(date(2024, 1, 3), date(2024, 1, 4));
        let filtered = filter_window(&sample(), &window);
        assert_eq!(filtered.len(), 3);
        assert!(filtered.iter().all(|o| o.timestamp >= date(2024, 1, 3)));
    }

    #[test]
    fn test_for_asset_sorts_chronologically() {
        let petr = for_asset(&sample(), "PETR4");
        let closes: Vec<Decimal> = petr.iter().map(|o| o.close).collect();
        assert_eq!(closes, vec![dec!(38), dec!(40), dec!(41.9)]);
        assert!(for_asset(&sample(), "ITUB4").is_empty());
    }

    #[test]
    fn test_sort_keeps_input_order_for_equal_timestamps() {
        let mut rows = vec![
            obs("A", date(2024, 1, 2), dec!(2)),
            obs("A", date(2024, 1, 1), dec!(1)),
            obs("A", date(2024, 1, 2), dec!(3)),
        ];
        sort_chronologically(&mut rows);
        let closes: Vec<Decimal> = rows.iter().map(|o| o.close).collect();
        assert_eq!(closes, vec![dec!(1), dec!(2), dec!(3)]);
    }

    #[test]
    fn test_tickers_and_bounds() {
        assert_eq!(tickers(&sample()), vec!["PETR4", "VALE3"]);
        assert_eq!(
            date_bounds(&sample()),
            Some((date(2024, 1, 2), date(2024, 1, 4)))
        );
        assert_eq!(date_bounds(&[]), None);
    }

    #[test]
    fn test_daily_changes_per_asset() {
        let changes = daily_changes(&sample());
        assert_eq!(changes.len(), 5);

        let petr: Vec<Option<Decimal>> = changes
            .iter()
            .filter(|o| o.asset == "PETR4")
            .map(|o| o.daily_change_pct)
            .collect();
        assert_eq!(petr, vec![None, Some(dec!(5.2632)), Some(dec!(4.75))]);

        let vale: Vec<Option<Decimal>> = changes
            .iter()
            .filter(|o| o.asset == "VALE3")
            .map(|o| o.daily_change_pct)
            .collect();
        assert_eq!(vale, vec![None, Some(dec!(-2.7778))]);
    }

    #[test]
    fn test_accumulated_changes() {
        let acc = accumulated_changes(&sample(), "PETR4");
        assert_eq!(
            acc,
            vec![
                (date(2024, 1, 2), None),
                (date(2024, 1, 3), Some(dec!(5.2632))),
                (date(2024, 1, 4), Some(dec!(10.2632))),
            ]
        );
        assert!(accumulated_changes(&[], "PETR4").is_empty());
    }

    #[test]
    fn test_latest_snapshot() {
        let snapshot = latest_snapshot(&sample(), "PETR4").unwrap();
        assert_eq!(snapshot.close, dec!(41.9));
        assert_eq!(snapshot.timestamp, date(2024, 1, 4));
        assert_eq!(snapshot.day_change_pct, Some(dec!(4.75)));

        let single = vec![obs("X", date(2024, 1, 1), dec!(5))];
        assert_eq!(latest_snapshot(&single, "X").unwrap().day_change_pct, None);
        assert!(latest_snapshot(&single, "Y").is_none());
    }
}
