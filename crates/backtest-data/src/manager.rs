//! 백테스트 데이터 관리자.
//!
//! 전체 가격 데이터셋을 메모리에 보관하고 Feather 파일로 저장/로드합니다.
//! 요청은 종목 목록과 날짜 구간(양끝 포함)으로 필터링하며 원래 행 순서를 유지합니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use backtest_data::{BacktestDataManager, DataRequest};
//!
//! let mut manager = BacktestDataManager::new();
//! manager.load("data/prices.feather")?;
//!
//! let request = DataRequest::new(vec!["000001".into()], start, end)
//!     .with_columns(vec!["stk_id".into(), "date".into(), "close".into()]);
//! let frame = manager.request(&request)?;
//! ```

use std::collections::HashSet;
use std::fs::File;
use std::path::Path;

use backtest_core::PeriodRecord;
use chrono::NaiveDate;
use polars::prelude::*;
use tracing::{debug, info};

use crate::error::{DataError, Result};
use crate::records::{
    column_series, date_values, records_from_frame, stk_id_values, DATE, STK_ID,
};

/// 데이터 요청 조건.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRequest {
    /// 포함할 종목 식별자
    pub stk_ids: Vec<String>,
    /// 시작일 (포함)
    pub date_start: NaiveDate,
    /// 종료일 (포함)
    pub date_end: NaiveDate,
    /// 반환할 컬럼 (None = 전체)
    pub columns: Option<Vec<String>>,
}

impl DataRequest {
    /// 새 요청을 생성합니다.
    pub fn new(stk_ids: Vec<String>, date_start: NaiveDate, date_end: NaiveDate) -> Self {
        Self {
            stk_ids,
            date_start,
            date_end,
            columns: None,
        }
    }

    /// 반환할 컬럼을 지정합니다.
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = Some(columns);
        self
    }
}

/// 가격 데이터셋 관리자.
#[derive(Debug, Clone, Default)]
pub struct BacktestDataManager {
    data: Option<DataFrame>,
}

impl BacktestDataManager {
    /// 비어있는 관리자를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 이미 메모리에 있는 데이터셋으로 관리자를 생성합니다.
    pub fn from_frame(data: DataFrame) -> Self {
        Self { data: Some(data) }
    }

    /// 데이터셋이 로드되었는지 확인합니다.
    pub fn is_loaded(&self) -> bool {
        self.data.is_some()
    }

    /// 보관 중인 데이터셋을 반환합니다.
    pub fn data(&self) -> Result<&DataFrame> {
        self.data.as_ref().ok_or(DataError::NotLoaded)
    }

    /// Feather 파일에서 데이터셋을 로드합니다. 기존 데이터셋은 교체됩니다.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let df = IpcReader::new(file).finish()?;
        info!(
            path = %path.display(),
            rows = df.height(),
            columns = df.width(),
            "Dataset loaded"
        );

        self.data = Some(df);
        Ok(())
    }

    /// 데이터셋을 Feather 파일로 저장합니다. 모든 컬럼과 행 순서가 유지됩니다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut df = self.data()?.clone();
        let mut file = File::create(path).map_err(|source| DataError::Io {
            path: path.display().to_string(),
            source,
        })?;

        IpcWriter::new(&mut file).finish(&mut df)?;
        info!(path = %path.display(), rows = df.height(), "Dataset saved");
        Ok(())
    }

    /// 종목 목록과 날짜 구간으로 데이터를 필터링합니다.
    ///
    /// `stk_id`는 문자열로 비교합니다. `date`가 문자열 컬럼이면
    /// `YYYY-MM-DD` 형식 문자열로 사전순 비교합니다.
    pub fn request(&self, request: &DataRequest) -> Result<DataFrame> {
        let df = self.data()?;

        for required in [STK_ID, DATE] {
            column_series(df, required)?;
        }
        if let Some(columns) = &request.columns {
            for name in columns {
                column_series(df, name)?;
            }
        }

        let (date_expr, lower, upper) = match column_series(df, DATE)?.dtype() {
            DataType::Date => (col(DATE), lit(request.date_start), lit(request.date_end)),
            DataType::Datetime(_, _) => (
                col(DATE).cast(DataType::Date),
                lit(request.date_start),
                lit(request.date_end),
            ),
            DataType::String => (
                col(DATE),
                lit(request.date_start.format("%Y-%m-%d").to_string()),
                lit(request.date_end.format("%Y-%m-%d").to_string()),
            ),
            other => {
                return Err(DataError::InvalidColumnType {
                    column: DATE.to_string(),
                    dtype: other.clone(),
                })
            }
        };

        let ids: Vec<&str> = request.stk_ids.iter().map(String::as_str).collect();
        let ids = Series::new(STK_ID.into(), ids);

        let mut lf = df.clone().lazy().filter(
            col(STK_ID)
                .cast(DataType::String)
                .is_in(lit(ids))
                .and(date_expr.clone().gt_eq(lower))
                .and(date_expr.lt_eq(upper)),
        );

        if let Some(columns) = &request.columns {
            let exprs: Vec<Expr> = columns.iter().map(|name| col(name.as_str())).collect();
            lf = lf.select(exprs);
        }

        let out = lf.collect()?;
        debug!(
            stk_ids = request.stk_ids.len(),
            start = %request.date_start,
            end = %request.date_end,
            rows = out.height(),
            "Dataset request"
        );
        Ok(out)
    }

    /// 요청 결과를 레코드 목록으로 반환합니다.
    pub fn request_records(&self, request: &DataRequest) -> Result<Vec<PeriodRecord>> {
        records_from_frame(&self.request(request)?)
    }

    /// 데이터셋에 등장하는 종목을 처음 등장한 순서대로 반환합니다.
    pub fn instruments(&self) -> Result<Vec<String>> {
        let ids = stk_id_values(column_series(self.data()?, STK_ID)?)?;
        let mut seen = HashSet::new();
        Ok(ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect())
    }

    /// 데이터셋의 최소/최대 날짜를 반환합니다. 행이 없으면 None입니다.
    pub fn date_range(&self) -> Result<Option<(NaiveDate, NaiveDate)>> {
        let dates = date_values(column_series(self.data()?, DATE)?)?;
        let min = dates.iter().min().copied();
        let max = dates.iter().max().copied();
        Ok(min.zip(max))
    }
}
