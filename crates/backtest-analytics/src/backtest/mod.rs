//! 신호 기반 매매 시뮬레이션.

pub mod engine;

pub use engine::{BacktestError, BacktestResult, BacktestRun, Fill, TradingSimulator, TradingState};
