//! CLI 명령어 구현 모듈.

pub mod backtest;
pub mod extract;
pub mod inspect;
pub mod request;

// 각 서브모듈 직접 사용 권장 (ambiguous re-export 방지)
