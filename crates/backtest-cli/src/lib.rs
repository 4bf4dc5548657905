//! 백테스트 CLI 도구 모음.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 종목별 백테스트 실행과 성과 보고서 출력
//! - 데이터셋 부분 추출 (Feather)
//! - 데이터셋 요약 조회

pub mod commands;
