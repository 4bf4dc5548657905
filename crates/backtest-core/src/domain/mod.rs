//! 도메인 모델.
//!
//! - [`record`]: 기간 레코드와 날짜별 배치
//! - [`signal`]: 신호 값의 방향 해석
//! - [`calculations`]: 수치 시계열 공통 계산

pub mod calculations;
pub mod record;
pub mod signal;

pub use calculations::{nan_mean, nan_sample_std, rolling_mean, running_max, simple_returns};
pub use record::{group_by_date, DateGroup, PeriodRecord};
pub use signal::SignalDirection;
