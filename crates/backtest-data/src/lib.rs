//! 가격 데이터셋 관리.
//!
//! 이 crate는 다음을 제공합니다:
//! - Feather(Arrow IPC) 파일 저장 및 로드
//! - 종목 목록과 날짜 구간으로 필터링한 데이터 요청
//! - polars `DataFrame` ⇄ [`PeriodRecord`](backtest_core::PeriodRecord) 변환

pub mod error;
pub mod manager;
pub mod records;

pub use error::{DataError, Result};
pub use manager::{BacktestDataManager, DataRequest};
pub use records::{frame_from_records, records_from_frame};
