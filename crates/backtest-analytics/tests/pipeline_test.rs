//! Dataset → signal → simulation → report, end to end.

use backtest_analytics::{analysis, BacktestError, TradingSimulator};
use backtest_core::{AnalysisConfig, PeriodRecord, StrategyConfig, StrategyKind, TradingConfig};
use backtest_data::{frame_from_records, BacktestDataManager, DataRequest};
use backtest_strategy::{build_strategy, ReverseStrategy, SignalGenerator};
use chrono::NaiveDate;

fn date(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 2, 3).unwrap() + chrono::Days::new(offset)
}

/// 두 종목의 30일치 가격. A는 진동, B는 완만한 상승.
fn dataset() -> BacktestDataManager {
    let mut records = Vec::new();
    for d in 0..30u64 {
        let wave = [0.0, 1.5, -0.5, 2.0, -1.5, 0.5][d as usize % 6];
        records.push(PeriodRecord::new("A", date(d), 20.0 + wave));
        records.push(PeriodRecord::new("B", date(d), 40.0 + d as f64 * 0.2));
    }
    BacktestDataManager::from_frame(frame_from_records(&records).unwrap())
}

#[test]
fn test_single_instrument_pipeline() {
    let manager = dataset();
    let request = DataRequest::new(vec!["A".into()], date(0), date(29));
    let records = manager.request_records(&request).unwrap();
    assert_eq!(records.len(), 30);

    let strategy = ReverseStrategy::new(5).unwrap();
    let signal = strategy.signal(&records).unwrap();

    let config = TradingConfig::new(100_000.0, 0.2, 1e-4);
    let run = TradingSimulator::new(config).unwrap().run(&records, &signal).unwrap();

    assert_eq!(run.curve.len(), 30);
    assert_eq!(run.curve.dates()[0], date(0));
    assert!(run.final_state.position >= 0.0);
    // 워밍업 구간 신호는 0이므로 첫 4일은 거래가 없음
    assert!(run.fills.iter().all(|f| f.date >= date(4)));
    assert!(!run.fills.is_empty());

    let report = run.report(&AnalysisConfig::default()).unwrap();
    let direct = analysis(&run.curve.values(), 0.03).unwrap();
    assert_eq!(report, direct);
    assert!(report.max_drawdown >= 0.0 && report.max_drawdown <= 1.0);
}

#[test]
fn test_cross_section_pipeline_per_instrument() {
    let manager = dataset();
    let request = DataRequest::new(vec!["A".into(), "B".into()], date(0), date(29));
    let records = manager.request_records(&request).unwrap();

    let strategy = build_strategy(&StrategyConfig {
        kind: StrategyKind::CrossSection,
        window: 5,
        epsilon: 1e-6,
    })
    .unwrap();
    let signal = strategy.signal(&records).unwrap();
    assert_eq!(signal.len(), records.len());

    for stk_id in ["A", "B"] {
        let (rows, values): (Vec<PeriodRecord>, Vec<f64>) = records
            .iter()
            .zip(&signal)
            .filter(|(r, _)| r.stk_id == stk_id)
            .map(|(r, v)| (r.clone(), *v))
            .unzip();

        let run = TradingSimulator::new(TradingConfig::default())
            .unwrap()
            .run(&rows, &values)
            .unwrap();
        assert_eq!(run.curve.len(), 30);
        assert!(run.report(&AnalysisConfig::default()).is_ok());
    }
}

#[test]
fn test_universe_signal_rejected_for_date_batches() {
    let manager = dataset();
    let request = DataRequest::new(vec!["A".into(), "B".into()], date(0), date(9));
    let records = manager.request_records(&request).unwrap();

    // 행 단위 신호(20개)는 날짜 배치(10개)와 맞지 않음
    let signal = vec![0.0; records.len()];
    let result = TradingSimulator::new(TradingConfig::default())
        .unwrap()
        .run(&records, &signal);
    assert!(matches!(
        result,
        Err(BacktestError::SignalLengthMismatch {
            date_groups: 10,
            signals: 20
        })
    ));
}
