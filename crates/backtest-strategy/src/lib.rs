//! 신호 생성 전략.
//!
//! 이 크레이트가 제공하는 기능:
//! - 신호 생성기 공통 인터페이스 [`SignalGenerator`]
//! - 이동평균 회귀 전략 [`ReverseStrategy`]
//! - 다른 생성기를 감싸 날짜별로 정규화하는 [`CrossSectionStrategy`]
//! - 설정 기반 생성기 팩토리 [`build_strategy`]
//!
//! # 예제
//!
//! ```rust,ignore
//! use backtest_strategy::{CrossSectionStrategy, ReverseStrategy, SignalGenerator};
//!
//! let strategy = CrossSectionStrategy::new(ReverseStrategy::new(5)?);
//! let signal = strategy.signal(&records)?;
//! assert_eq!(signal.len(), records.len());
//! ```

pub mod error;
pub mod registry;
pub mod strategies;
pub mod traits;

pub use error::{StrategyError, StrategyResult};
pub use registry::build_strategy;
pub use strategies::{CrossSectionStrategy, ReverseStrategy};
pub use traits::SignalGenerator;
