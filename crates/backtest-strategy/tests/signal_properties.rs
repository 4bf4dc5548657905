//! Property checks for the built-in signal generators.

use backtest_core::PeriodRecord;
use backtest_strategy::{CrossSectionStrategy, ReverseStrategy, SignalGenerator};
use chrono::NaiveDate;
use proptest::prelude::*;

fn universe(closes: &[Vec<f64>]) -> Vec<PeriodRecord> {
    let days = closes.iter().map(Vec::len).min().unwrap_or(0);
    let mut records = Vec::new();
    for d in 0..days {
        let date = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap() + chrono::Days::new(d as u64);
        for (i, series) in closes.iter().enumerate() {
            records.push(PeriodRecord::new(format!("S{i}"), date, series[d]));
        }
    }
    records
}

proptest! {
    #[test]
    fn reverse_signal_is_finite_and_aligned(
        prices in prop::collection::vec(1.0f64..1000.0, 0..60),
        window in 1usize..10,
    ) {
        let strategy = ReverseStrategy::new(window).unwrap();
        let signal = strategy.signal_from_prices(&prices);
        prop_assert_eq!(signal.len(), prices.len());
        for (i, value) in signal.iter().enumerate() {
            prop_assert!(value.is_finite());
            if i + 1 < window {
                prop_assert_eq!(*value, 0.0);
            }
        }
    }

    #[test]
    fn cross_section_scores_center_on_zero(
        closes in prop::collection::vec(prop::collection::vec(1.0f64..500.0, 8..20), 2..6),
    ) {
        let records = universe(&closes);
        let strategy = CrossSectionStrategy::new(ReverseStrategy::new(3).unwrap());
        let signal = strategy.signal(&records).unwrap();
        prop_assert_eq!(signal.len(), records.len());

        let n = closes.len();
        for (day, scores) in signal.chunks(n).enumerate() {
            let sum: f64 = scores.iter().sum();
            prop_assert!(sum.abs() < 1e-6, "day {} sum {}", day, sum);
        }
    }
}
