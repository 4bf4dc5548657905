//! 성과 분석 모듈.

pub mod metrics;

pub use metrics::{analysis, analysis_with_config, MetricsError, PerformanceReport};
