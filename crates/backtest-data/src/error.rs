//! 데이터 모듈 오류 타입.

use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// 데이터 관련 오류.
#[derive(Debug, Error)]
pub enum DataError {
    /// polars 연산 오류
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),

    /// 파일 입출력 오류
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 필수 컬럼 누락
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// 지원하지 않는 컬럼 타입
    #[error("Invalid column type for {column}: {dtype}")]
    InvalidColumnType { column: String, dtype: DataType },

    /// null 값 발견
    #[error("Null value in column {column} at row {row}")]
    NullValue { column: String, row: usize },

    /// 파싱 오류
    #[error("Parse error: {0}")]
    ParseError(String),

    /// 데이터가 로드되지 않음
    #[error("No dataset loaded")]
    NotLoaded,
}

/// 데이터 작업 Result 타입.
pub type Result<T> = std::result::Result<T, DataError>;
