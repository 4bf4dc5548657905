//! 매매 시뮬레이터
//!
//! 가격 레코드를 날짜별 배치로 묶고, 배치마다 신호 하나를 소비해 포지션과 현금을
//! 갱신한 뒤 거래 후 총자산 가치를 자산 곡선에 기록합니다.
//!
//! # 배치별 처리
//!
//! 1. 기준 가격 = 배치 첫 레코드의 종가
//! 2. 총자산 = `cash + position * price`
//! 3. 신호 > 0: `delta = min(signal, asset * max_position / price - position)`
//!    만큼 매수 (이미 한도를 넘었다면 delta가 음수가 되어 한도 쪽으로 매도됨)
//! 4. 신호 < 0: `delta = min(position, -signal)` 만큼 매도 (공매도 없음)
//! 5. 신호 = 0 (또는 NaN): 거래 없음
//! 6. 자산 곡선에 `cash + position * price` 기록
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use backtest_analytics::TradingSimulator;
//! use backtest_core::{AnalysisConfig, TradingConfig};
//!
//! let simulator = TradingSimulator::new(TradingConfig::default())?;
//! let run = simulator.run(&records, &signal)?;
//!
//! let report = run.report(&AnalysisConfig::default())?;
//! println!("{}", report);
//! ```

use backtest_core::{group_by_date, AnalysisConfig, PeriodRecord, SignalDirection, TradingConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::performance::metrics::{MetricsResult, PerformanceReport};
use crate::portfolio::equity_curve::EquityCurve;

/// 백테스트 오류
#[derive(Debug, Error)]
pub enum BacktestError {
    /// 가격 데이터 없음
    #[error("가격 데이터가 비어있습니다")]
    EmptyPriceData,

    /// 신호 길이와 날짜 배치 수 불일치
    #[error("신호 길이 불일치: 날짜 배치={date_groups}, 신호={signals}")]
    SignalLengthMismatch { date_groups: usize, signals: usize },

    /// 설정 오류
    #[error("백테스트 설정 오류: {0}")]
    ConfigError(String),
}

/// 백테스트 결과 타입
pub type BacktestResult<T> = Result<T, BacktestError>;

/// 단일 체결 기록.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    /// 체결일
    pub date: NaiveDate,
    /// 체결을 일으킨 신호 분기 (Buy 분기에서도 delta는 음수일 수 있음)
    pub direction: SignalDirection,
    /// 포지션 변화량 (매수 +, 매도 -)
    pub delta: f64,
    /// 체결 가격
    pub price: f64,
    /// 체결 후 현금
    pub cash_after: f64,
    /// 체결 후 포지션
    pub position_after: f64,
}

impl Fill {
    /// 체결 명목금액 `|delta| * price`.
    pub fn notional(&self) -> f64 {
        self.delta.abs() * self.price
    }
}

/// 시뮬레이션 상태 (포지션, 현금, 제약 조건).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradingState {
    /// 보유 수량 (소수 가능)
    pub position: f64,
    /// 가용 현금
    pub cash: f64,
    /// 총자산 대비 최대 포지션 비율
    pub max_position: f64,
    /// 거래 명목금액에 적용되는 비례 비용
    pub margin: f64,
}

impl TradingState {
    /// 초기 현금과 포지션 0으로 상태를 생성합니다.
    pub fn new(config: &TradingConfig) -> Self {
        Self {
            position: 0.0,
            cash: config.cash,
            max_position: config.max_position,
            margin: config.margin,
        }
    }

    /// 주어진 가격에서의 총자산 가치.
    pub fn total_asset(&self, price: f64) -> f64 {
        self.cash + self.position * price
    }

    /// 한 날짜의 신호를 적용합니다. 거래가 없으면 `None`을 반환합니다.
    pub fn apply(&mut self, date: NaiveDate, price: f64, signal: f64) -> Option<Fill> {
        let direction = SignalDirection::from_value(signal);

        let delta = match direction {
            SignalDirection::Buy => {
                let asset = self.total_asset(price);
                // 한도 초과 상태면 음수가 되어 매도로 이어짐
                let delta = signal.min(asset * self.max_position / price - self.position);
                self.position += delta;
                self.cash -= delta * price * (1.0 + self.margin);
                delta
            }
            SignalDirection::Sell => {
                let delta = self.position.min(-signal);
                self.cash += delta * price * (1.0 + self.margin);
                self.position -= delta;
                -delta
            }
            SignalDirection::Hold => return None,
        };

        Some(Fill {
            date,
            direction,
            delta,
            price,
            cash_after: self.cash,
            position_after: self.position,
        })
    }
}

/// 한 번의 백테스트 실행 결과.
#[derive(Debug, Clone, Serialize)]
pub struct BacktestRun {
    /// 실행 ID
    pub id: Uuid,
    /// 날짜별 총자산 가치
    pub curve: EquityCurve,
    /// 마지막 날짜 처리 후 상태
    pub final_state: TradingState,
    /// 체결 기록 (날짜 순)
    pub fills: Vec<Fill>,
}

impl BacktestRun {
    /// 자산 곡선으로 성과 보고서를 계산합니다.
    pub fn report(&self, config: &AnalysisConfig) -> MetricsResult<PerformanceReport> {
        PerformanceReport::from_equity_curve(&self.curve, config)
    }
}

/// 신호 기반 매매 시뮬레이터.
///
/// 상태는 실행 한 번에만 유효합니다. `run`이 시뮬레이터를 소비하므로
/// 새 백테스트마다 새 인스턴스를 만들어야 합니다.
#[derive(Debug, Clone)]
pub struct TradingSimulator {
    state: TradingState,
}

impl TradingSimulator {
    /// 설정을 검증하고 시뮬레이터를 생성합니다.
    pub fn new(config: TradingConfig) -> BacktestResult<Self> {
        config
            .validate()
            .map_err(|e| BacktestError::ConfigError(e.to_string()))?;

        Ok(Self {
            state: TradingState::new(&config),
        })
    }

    /// 현재 (초기) 상태.
    pub fn state(&self) -> &TradingState {
        &self.state
    }

    /// 가격 레코드와 날짜 배치별 신호로 시뮬레이션을 실행합니다.
    ///
    /// 신호는 날짜 오름차순 배치와 위치로 정렬되어야 합니다.
    /// 입력 검증은 상태 변경 전에 끝나므로 실패 시 부분 결과는 없습니다.
    pub fn run(self, records: &[PeriodRecord], signal: &[f64]) -> BacktestResult<BacktestRun> {
        if records.is_empty() {
            return Err(BacktestError::EmptyPriceData);
        }

        let groups = group_by_date(records);
        if groups.len() != signal.len() {
            return Err(BacktestError::SignalLengthMismatch {
                date_groups: groups.len(),
                signals: signal.len(),
            });
        }

        let mut state = self.state;
        let mut curve = EquityCurve::with_capacity(groups.len());
        let mut fills = Vec::new();

        for (group, &value) in groups.iter().zip(signal) {
            let price = group.reference_price();
            if price <= 0.0 || price.is_nan() {
                warn!(date = %group.date, price, "Non-positive reference price");
            }

            if let Some(fill) = state.apply(group.date, price, value) {
                debug!(
                    date = %fill.date,
                    direction = %fill.direction,
                    delta = fill.delta,
                    price = fill.price,
                    cash = fill.cash_after,
                    position = fill.position_after,
                    "Fill"
                );
                fills.push(fill);
            }

            curve.push(group.date, state.total_asset(price));
        }

        let run = BacktestRun {
            id: Uuid::new_v4(),
            curve,
            final_state: state,
            fills,
        };

        info!(
            run_id = %run.id,
            periods = run.curve.len(),
            fills = run.fills.len(),
            final_equity = run.curve.current_equity().unwrap_or(f64::NAN),
            "Backtest completed"
        );

        Ok(run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn records(prices: &[f64]) -> Vec<PeriodRecord> {
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PeriodRecord::new("000001", day(i as u32 + 1), p))
            .collect()
    }

    fn config(cash: f64, max_position: f64, margin: f64) -> TradingConfig {
        TradingConfig::new(cash, max_position, margin)
    }

    #[test]
    fn test_buy_then_hold() {
        let simulator = TradingSimulator::new(config(1000.0, 0.1, 0.0)).unwrap();
        let run = simulator.run(&records(&[10.0, 10.0]), &[5.0, 0.0]).unwrap();

        assert_eq!(run.curve.values(), vec![1000.0, 1000.0]);
        assert_eq!(run.final_state.position, 5.0);
        assert_eq!(run.final_state.cash, 950.0);
        assert_eq!(run.fills.len(), 1);
        assert_eq!(run.fills[0].direction, SignalDirection::Buy);
    }

    #[test]
    fn test_buy_capped_by_max_position() {
        let simulator = TradingSimulator::new(config(1000.0, 0.1, 0.0)).unwrap();
        let run = simulator.run(&records(&[10.0]), &[50.0]).unwrap();

        // 1000 * 0.1 / 10 = 10
        assert_eq!(run.final_state.position, 10.0);
        assert_eq!(run.final_state.cash, 900.0);
    }

    #[test]
    fn test_sell_capped_by_position() {
        let simulator = TradingSimulator::new(config(1000.0, 0.5, 0.0)).unwrap();
        let run = simulator
            .run(&records(&[10.0, 10.0]), &[3.0, -10.0])
            .unwrap();

        assert_eq!(run.final_state.position, 0.0);
        assert_eq!(run.final_state.cash, 1000.0);
        assert_eq!(run.fills[1].delta, -3.0);
        assert_eq!(run.fills[1].direction, SignalDirection::Sell);
    }

    #[test]
    fn test_buy_signal_over_cap_forces_sell() {
        let mut state = TradingState::new(&config(1000.0, 0.1, 0.0));
        state.apply(day(1), 10.0, 10.0);
        assert_eq!(state.position, 10.0);

        // 가격 상승으로 포지션 가치가 한도를 넘음: asset = 900 + 200 = 1100, cap = 5.5
        let fill = state.apply(day(2), 20.0, 1.0).unwrap();
        assert_eq!(fill.direction, SignalDirection::Buy);
        assert!((fill.delta - (-4.5)).abs() < 1e-12);
        assert!((state.position - 5.5).abs() < 1e-12);
        assert!((state.cash - 990.0).abs() < 1e-9);
    }

    #[test]
    fn test_margin_applied_to_both_legs() {
        let mut state = TradingState::new(&config(10_000.0, 1.0, 0.01));

        state.apply(day(1), 100.0, 2.0);
        assert_eq!(state.position, 2.0);
        assert!((state.cash - (10_000.0 - 2.0 * 100.0 * 1.01)).abs() < 1e-9);

        let cash_before = state.cash;
        state.apply(day(2), 100.0, -1.0);
        assert_eq!(state.position, 1.0);
        assert!((state.cash - (cash_before + 100.0 * 1.01)).abs() < 1e-9);
    }

    #[test]
    fn test_nan_signal_is_hold() {
        let mut state = TradingState::new(&TradingConfig::default());
        assert!(state.apply(day(1), 10.0, f64::NAN).is_none());
        assert_eq!(state.position, 0.0);
    }

    #[test]
    fn test_first_record_price_per_date() {
        let rows = vec![
            PeriodRecord::new("A", day(1), 10.0),
            PeriodRecord::new("B", day(1), 99.0),
            PeriodRecord::new("A", day(2), 20.0),
        ];
        let simulator = TradingSimulator::new(config(1000.0, 0.1, 0.0)).unwrap();
        let run = simulator.run(&rows, &[5.0, 0.0]).unwrap();

        assert_eq!(run.curve.len(), 2);
        assert_eq!(run.fills[0].price, 10.0);
        assert_eq!(run.curve.values()[1], 950.0 + 5.0 * 20.0);
    }

    #[test]
    fn test_empty_price_data() {
        let simulator = TradingSimulator::new(TradingConfig::default()).unwrap();
        let result = simulator.run(&[], &[]);
        assert!(matches!(result, Err(BacktestError::EmptyPriceData)));
    }

    #[test]
    fn test_signal_length_mismatch() {
        let simulator = TradingSimulator::new(TradingConfig::default()).unwrap();
        let result = simulator.run(&records(&[10.0, 11.0, 12.0]), &[1.0, 0.0]);
        assert!(matches!(
            result,
            Err(BacktestError::SignalLengthMismatch {
                date_groups: 3,
                signals: 2
            })
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = TradingSimulator::new(TradingConfig::default().with_margin(-1.0));
        assert!(matches!(result, Err(BacktestError::ConfigError(_))));
    }

    #[test]
    fn test_run_report() {
        let simulator = TradingSimulator::new(config(1000.0, 0.5, 0.0)).unwrap();
        let run = simulator
            .run(&records(&[10.0, 12.0, 9.0, 15.0]), &[10.0, 0.0, 0.0, 0.0])
            .unwrap();
        let report = run.report(&AnalysisConfig::default()).unwrap();
        assert!(report.max_drawdown > 0.0);
        assert!(report.sharpe_ratio.is_finite());
    }
}
