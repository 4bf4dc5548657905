//! # Backtest Core
//!
//! 백테스팅 툴킷의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 시스템 전반에서 사용되는 기본 타입을 제공합니다:
//! - 기간 레코드 (종목, 날짜, 종가) 및 날짜별 그룹화
//! - 신호 방향 해석
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use self::config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
