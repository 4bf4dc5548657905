//! 매매 시뮬레이션 및 성과 분석.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 신호 기반 매매 시뮬레이터 (포지션/현금 상태 추적)
//! - 자산 곡선
//! - 성과 지표 (연율화 수익률, 변동성, 샤프 비율, 최대 낙폭)
//!
//! # Re-exports
//!
//! - [`backtest`]: 매매 시뮬레이터 (TradingSimulator, TradingState, Fill)
//! - [`portfolio`]: 자산 곡선 (EquityCurve, EquityPoint)
//! - [`performance`]: 성과 지표 (PerformanceReport, analysis)

pub mod backtest;
pub mod performance;
pub mod portfolio;

pub use backtest::{BacktestError, BacktestResult, BacktestRun, Fill, TradingSimulator, TradingState};
pub use performance::metrics::{
    analysis, analysis_with_config, max_drawdown, MetricsError, MetricsResult, PerformanceReport,
    TRADING_DAYS_PER_YEAR,
};
pub use portfolio::equity_curve::{EquityCurve, EquityPoint};
