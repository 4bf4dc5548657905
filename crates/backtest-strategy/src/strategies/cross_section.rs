//! 횡단면 정규화 전략.
//!
//! 내부 생성기의 신호를 종목별로 계산한 뒤, 같은 날짜에 존재하는 종목들 사이에서
//! z-score로 정규화합니다.
//!
//! ```text
//! z[stk, date] = (x[stk, date] - mean(x[·, date])) / (std(x[·, date]) + epsilon)
//! ```
//!
//! 평균과 표본 표준편차는 NaN을 건너뜁니다. 한 날짜에 종목이 하나뿐이면
//! 표준편차가 정의되지 않아 결과는 NaN이 되고, 시뮬레이터는 이를 보유로 처리합니다.

use std::collections::{BTreeMap, HashMap};

use backtest_core::{nan_mean, nan_sample_std, PeriodRecord};
use chrono::NaiveDate;
use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::traits::SignalGenerator;

/// 기본 분모 보정값.
pub const DEFAULT_EPSILON: f64 = 1e-6;

/// 내부 생성기를 감싸 날짜별 횡단면 z-score를 계산하는 전략.
#[derive(Debug, Clone)]
pub struct CrossSectionStrategy<G> {
    inner: G,
    epsilon: f64,
    name: String,
}

impl<G: SignalGenerator> CrossSectionStrategy<G> {
    /// 내부 생성기로 전략을 생성합니다.
    pub fn new(inner: G) -> Self {
        let name = format!("cross_section({})", inner.name());
        Self {
            inner,
            epsilon: DEFAULT_EPSILON,
            name,
        }
    }

    /// 분모 보정값을 설정합니다.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// 내부 생성기를 반환합니다.
    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// 종목별로 내부 신호를 계산해 원래 행 위치에 배치합니다.
    fn raw_signal(&self, records: &[PeriodRecord]) -> StrategyResult<Vec<f64>> {
        let mut rows_by_stk: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
        for (row, record) in records.iter().enumerate() {
            rows_by_stk.entry(record.stk_id.as_str()).or_default().push(row);
        }

        let mut raw = vec![f64::NAN; records.len()];
        for rows in rows_by_stk.values() {
            let subset: Vec<PeriodRecord> = rows.iter().map(|&row| records[row].clone()).collect();
            let signal = self.inner.signal(&subset)?;
            if signal.len() != subset.len() {
                return Err(StrategyError::MisalignedSignal {
                    expected: subset.len(),
                    actual: signal.len(),
                });
            }

            for (&row, value) in rows.iter().zip(signal) {
                raw[row] = value;
            }
        }

        Ok(raw)
    }
}

impl<G: SignalGenerator> SignalGenerator for CrossSectionStrategy<G> {
    fn name(&self) -> &str {
        &self.name
    }

    fn signal(&self, records: &[PeriodRecord]) -> StrategyResult<Vec<f64>> {
        let raw = self.raw_signal(records)?;

        let mut rows_by_date: HashMap<NaiveDate, Vec<usize>> = HashMap::new();
        for (row, record) in records.iter().enumerate() {
            rows_by_date.entry(record.date).or_default().push(row);
        }

        let mut normalized = vec![f64::NAN; records.len()];
        for rows in rows_by_date.values() {
            let values: Vec<f64> = rows.iter().map(|&row| raw[row]).collect();
            let mean = nan_mean(&values);
            let std = nan_sample_std(&values);

            for (&row, value) in rows.iter().zip(values) {
                normalized[row] = (value - mean) / (std + self.epsilon);
            }
        }

        debug!(
            rows = records.len(),
            dates = rows_by_date.len(),
            strategy = %self.name,
            "Cross-section signal computed"
        );
        Ok(normalized)
    }
}
