//! 백테스트 명령어.
//!
//! Feather 데이터셋에서 종목과 기간을 골라 신호를 계산하고, 종목마다 새 시뮬레이터로
//! 백테스트를 실행한 뒤 성과 보고서를 출력합니다.
//!
//! # 사용 예시
//!
//! ```bash
//! # 두 종목을 이동평균 회귀 전략으로 백테스트
//! backtest run -d data/prices.feather -s 000001,000002 -f 2020-01-01 -t 2020-12-31
//!
//! # 횡단면 전략, 결과 저장
//! backtest run -s 000001,000002,000003 -f 2020-01-01 -t 2020-12-31 \
//!     --strategy cross_section --output-dir out
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, bail, Context, Result};
use backtest_analytics::{BacktestRun, PerformanceReport, TradingSimulator};
use backtest_core::{backtest_span, AppConfig, PeriodRecord, StrategyKind};
use backtest_data::{BacktestDataManager, DataRequest};
use backtest_strategy::{build_strategy, SignalGenerator};
use tracing::info;

/// 백테스트 CLI 설정
#[derive(Debug, Clone)]
pub struct BacktestCliConfig {
    /// Feather 데이터셋 경로
    pub data_path: PathBuf,
    /// 종목/기간 요청
    pub request: DataRequest,
    /// 매매, 분석, 전략 설정 (CLI 덮어쓰기 반영 후)
    pub app: AppConfig,
    /// 결과 저장 디렉토리 (옵션)
    pub output_dir: Option<PathBuf>,
}

/// 종목 하나의 백테스트 결과
#[derive(Debug, Clone)]
pub struct InstrumentOutcome {
    /// 종목 식별자
    pub stk_id: String,
    /// 시뮬레이션 결과
    pub run: BacktestRun,
    /// 성과 보고서
    pub report: PerformanceReport,
}

/// 백테스트 실행
pub fn run_backtest(config: &BacktestCliConfig) -> Result<Vec<InstrumentOutcome>> {
    let mut manager = BacktestDataManager::new();
    manager
        .load(&config.data_path)
        .with_context(|| format!("Failed to load dataset: {}", config.data_path.display()))?;

    let records = manager.request_records(&config.request)?;
    if records.is_empty() {
        bail!(
            "No rows for {:?} between {} and {}",
            config.request.stk_ids,
            config.request.date_start,
            config.request.date_end
        );
    }
    info!(rows = records.len(), "Loaded rows for backtest");

    let strategy = build_strategy(&config.app.strategy)
        .map_err(|e| anyhow!("Failed to build strategy: {}", e))?;
    let universe = instrument_signals(strategy.as_ref(), config.app.strategy.kind, &records)?;

    if let Some(dir) = &config.output_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    let mut outcomes = Vec::with_capacity(universe.len());
    for (stk_id, (rows, signal)) in universe {
        let span = backtest_span!("backtest", stk_id, strategy.name());
        let _guard = span.enter();

        let run = TradingSimulator::new(config.app.trading)?
            .run(&rows, &signal)
            .with_context(|| format!("Backtest failed for {}", stk_id))?;
        let report = run
            .report(&config.app.analysis)
            .with_context(|| format!("Analysis failed for {}", stk_id))?;

        println!("\n[{}] {} periods, {} fills", stk_id, run.curve.len(), run.fills.len());
        println!("{}", report);

        if let Some(dir) = &config.output_dir {
            save_outcome(dir, &stk_id, &run, &report)?;
        }

        outcomes.push(InstrumentOutcome { stk_id, run, report });
    }

    Ok(outcomes)
}

/// 종목별 (레코드, 신호)를 날짜순으로 정렬해 반환합니다.
///
/// 횡단면 전략은 요청한 전체 종목에 대해 한 번 계산하고, 단일 종목 전략은
/// 종목별 행에 대해 따로 계산합니다.
fn instrument_signals(
    strategy: &dyn SignalGenerator,
    kind: StrategyKind,
    records: &[PeriodRecord],
) -> Result<BTreeMap<String, (Vec<PeriodRecord>, Vec<f64>)>> {
    let mut by_stk: BTreeMap<String, Vec<PeriodRecord>> = BTreeMap::new();
    for record in records {
        by_stk.entry(record.stk_id.clone()).or_default().push(record.clone());
    }
    for rows in by_stk.values_mut() {
        rows.sort_by_key(|r| r.date);
    }

    let mut out = BTreeMap::new();
    match kind {
        StrategyKind::CrossSection => {
            let signal = strategy.signal(records)?;
            let mut paired: BTreeMap<String, Vec<(PeriodRecord, f64)>> = BTreeMap::new();
            for (record, value) in records.iter().zip(signal) {
                paired
                    .entry(record.stk_id.clone())
                    .or_default()
                    .push((record.clone(), value));
            }
            for (stk_id, mut pairs) in paired {
                pairs.sort_by_key(|(r, _)| r.date);
                out.insert(stk_id, pairs.into_iter().unzip());
            }
        }
        StrategyKind::Reverse => {
            for (stk_id, rows) in by_stk {
                let signal = strategy.signal(&rows)?;
                out.insert(stk_id, (rows, signal));
            }
        }
    }

    Ok(out)
}

/// 자산 곡선(Feather)과 보고서(JSON)를 저장합니다.
fn save_outcome(
    dir: &Path,
    stk_id: &str,
    run: &BacktestRun,
    report: &PerformanceReport,
) -> Result<()> {
    let curve_path = dir.join(format!("{}_curve.feather", stk_id));
    let frame = run.curve.to_dataframe()?;
    BacktestDataManager::from_frame(frame).save(&curve_path)?;

    let report_path = dir.join(format!("{}_report.json", stk_id));
    std::fs::write(&report_path, serde_json::to_string_pretty(report)?)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;

    info!(
        curve = %curve_path.display(),
        report = %report_path.display(),
        "Backtest outputs saved"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use backtest_strategy::ReverseStrategy;
    use chrono::NaiveDate;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_instrument_signals_sorted_per_stk() {
        let records = vec![
            PeriodRecord::new("B", day(2), 5.0),
            PeriodRecord::new("A", day(2), 2.0),
            PeriodRecord::new("A", day(1), 1.0),
            PeriodRecord::new("B", day(1), 4.0),
        ];
        let strategy = ReverseStrategy::new(1).unwrap();
        let out = instrument_signals(&strategy, StrategyKind::Reverse, &records).unwrap();

        assert_eq!(out.keys().collect::<Vec<_>>(), vec!["A", "B"]);
        let (rows, signal) = &out["A"];
        assert_eq!(rows[0].date, day(1));
        assert_eq!(rows[1].date, day(2));
        assert_eq!(signal.len(), 2);
    }
}
