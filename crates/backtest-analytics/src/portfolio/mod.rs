//! 포트폴리오 자산 곡선.

pub mod equity_curve;

pub use equity_curve::{EquityCurve, EquityPoint};
