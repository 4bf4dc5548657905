//! 이동평균 회귀 전략.
//!
//! 종가가 이동평균보다 낮으면 매수, 높으면 매도 신호를 냅니다.
//!
//! ```text
//! target = rolling_mean(close, window)
//! signal = ln(target / close)
//! ```
//!
//! 이동평균이 정의되지 않는 초기 `window - 1`개 행과 NaN 결과는 0(보유)입니다.

use backtest_core::{rolling_mean, PeriodRecord};
use tracing::debug;

use crate::error::{StrategyError, StrategyResult};
use crate::traits::SignalGenerator;

/// 이동평균 회귀 전략.
///
/// 입력 레코드는 한 종목의 날짜순 행이라고 가정하며 재정렬하지 않습니다.
#[derive(Debug, Clone)]
pub struct ReverseStrategy {
    window: usize,
}

impl ReverseStrategy {
    /// 이동평균 윈도우 길이로 전략을 생성합니다.
    pub fn new(window: usize) -> StrategyResult<Self> {
        if window == 0 {
            return Err(StrategyError::InvalidParameter(
                "이동평균 윈도우는 0보다 커야 합니다".to_string(),
            ));
        }
        Ok(Self { window })
    }

    /// 이동평균 윈도우 길이.
    pub fn window(&self) -> usize {
        self.window
    }

    /// 종가 시계열에서 신호를 계산합니다.
    pub fn signal_from_prices(&self, prices: &[f64]) -> Vec<f64> {
        rolling_mean(prices, self.window)
            .into_iter()
            .zip(prices)
            .map(|(target, price)| {
                let value = (target / price).ln();
                if value.is_nan() {
                    0.0
                } else {
                    value
                }
            })
            .collect()
    }
}

impl Default for ReverseStrategy {
    fn default() -> Self {
        Self { window: 5 }
    }
}

impl SignalGenerator for ReverseStrategy {
    fn name(&self) -> &str {
        "reverse"
    }

    fn signal(&self, records: &[PeriodRecord]) -> StrategyResult<Vec<f64>> {
        let prices: Vec<f64> = records.iter().map(|r| r.close).collect();
        let signal = self.signal_from_prices(&prices);
        debug!(rows = records.len(), window = self.window, "Reverse signal computed");
        Ok(signal)
    }
}
