//! polars `DataFrame` ⇄ [`PeriodRecord`] 변환.
//!
//! 필수 컬럼은 `stk_id`, `date`, `close`입니다. 나머지 컬럼은 무시됩니다.
//! `date`는 `Date`, `Datetime`, `YYYY-MM-DD` 문자열 중 하나여야 합니다.

use backtest_core::PeriodRecord;
use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;

use crate::error::{DataError, Result};

/// 종목 식별자 컬럼
pub const STK_ID: &str = "stk_id";
/// 날짜 컬럼
pub const DATE: &str = "date";
/// 종가 컬럼
pub const CLOSE: &str = "close";

/// 이름으로 컬럼을 찾아 Series로 반환합니다.
pub(crate) fn column_series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series> {
    let column = df
        .column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?;
    Ok(column.as_materialized_series())
}

/// 종목 식별자를 문자열로 읽습니다. 정수형 식별자는 문자열로 변환됩니다.
pub(crate) fn stk_id_values(series: &Series) -> Result<Vec<String>> {
    let ids = series.cast(&DataType::String)?;
    ids.str()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.map(str::to_string).ok_or_else(|| DataError::NullValue {
                column: STK_ID.to_string(),
                row,
            })
        })
        .collect()
}

/// 날짜 컬럼을 읽습니다.
pub(crate) fn date_values(series: &Series) -> Result<Vec<NaiveDate>> {
    let dates: Vec<Option<NaiveDate>> = match series.dtype() {
        DataType::Date => series.date()?.as_date_iter().collect(),
        DataType::Datetime(_, _) => {
            let cast = series.cast(&DataType::Date)?;
            let dates = cast.date()?.as_date_iter().collect();
            dates
        }
        DataType::String => series
            .str()?
            .into_iter()
            .map(|value| value.map(parse_date).transpose())
            .collect::<Result<_>>()?,
        other => {
            return Err(DataError::InvalidColumnType {
                column: DATE.to_string(),
                dtype: other.clone(),
            })
        }
    };

    dates
        .into_iter()
        .enumerate()
        .map(|(row, date)| {
            date.ok_or_else(|| DataError::NullValue {
                column: DATE.to_string(),
                row,
            })
        })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .or_else(|_| {
            NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date())
        })
        .map_err(|e| DataError::ParseError(format!("invalid date '{}': {}", value, e)))
}

/// 종가 컬럼을 f64로 읽습니다.
pub(crate) fn close_values(series: &Series) -> Result<Vec<f64>> {
    if !series.dtype().is_numeric() {
        return Err(DataError::InvalidColumnType {
            column: CLOSE.to_string(),
            dtype: series.dtype().clone(),
        });
    }

    let closes = series.cast(&DataType::Float64)?;
    closes
        .f64()?
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            value.ok_or_else(|| DataError::NullValue {
                column: CLOSE.to_string(),
                row,
            })
        })
        .collect()
}

/// `DataFrame`을 행 순서 그대로 레코드 목록으로 변환합니다.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<PeriodRecord>> {
    let stk_ids = stk_id_values(column_series(df, STK_ID)?)?;
    let dates = date_values(column_series(df, DATE)?)?;
    let closes = close_values(column_series(df, CLOSE)?)?;

    Ok(stk_ids
        .into_iter()
        .zip(dates)
        .zip(closes)
        .map(|((stk_id, date), close)| PeriodRecord { stk_id, date, close })
        .collect())
}

/// 레코드 목록으로 `stk_id`, `date`(Date), `close`(f64) 컬럼의 `DataFrame`을 만듭니다.
pub fn frame_from_records(records: &[PeriodRecord]) -> Result<DataFrame> {
    let stk_ids: Vec<&str> = records.iter().map(|r| r.stk_id.as_str()).collect();
    let closes: Vec<f64> = records.iter().map(|r| r.close).collect();
    let dates = DateChunked::from_naive_date(DATE.into(), records.iter().map(|r| r.date));

    let df = DataFrame::new(vec![
        Series::new(STK_ID.into(), stk_ids).into_column(),
        dates.into_series().into_column(),
        Series::new(CLOSE.into(), closes).into_column(),
    ])?;
    Ok(df)
}
