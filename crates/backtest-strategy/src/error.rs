//! 전략 오류 타입.

use thiserror::Error;

/// 신호 생성 오류.
#[derive(Debug, Error)]
pub enum StrategyError {
    /// 잘못된 매개변수
    #[error("잘못된 전략 매개변수: {0}")]
    InvalidParameter(String),

    /// 내부 생성기 출력 길이가 입력과 다름
    #[error("신호 길이 불일치: 입력 {expected}행, 신호 {actual}개")]
    MisalignedSignal { expected: usize, actual: usize },
}

/// 전략 Result 타입.
pub type StrategyResult<T> = Result<T, StrategyError>;
