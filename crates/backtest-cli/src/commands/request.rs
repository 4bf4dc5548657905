//! 명령어 공통 인자 해석 (날짜, 종목 목록, 데이터 요청).

use anyhow::{bail, Context, Result};
use backtest_data::DataRequest;
use chrono::NaiveDate;

/// 날짜 문자열 파싱 (YYYY-MM-DD)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date format: {}. Expected YYYY-MM-DD", s))
}

/// 쉼표로 구분된 목록을 파싱합니다. 빈 항목은 무시합니다.
pub fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// CLI 인자로 데이터 요청을 만듭니다.
pub fn build_request(
    stk_ids: &str,
    from: &str,
    to: &str,
    columns: Option<&str>,
) -> Result<DataRequest> {
    let stk_ids = split_list(stk_ids);
    if stk_ids.is_empty() {
        bail!("At least one stk_id is required");
    }

    let start = parse_date(from)?;
    let end = parse_date(to)?;
    if start > end {
        bail!("Start date must be before end date: {} > {}", start, end);
    }

    let request = DataRequest::new(stk_ids, start, end);
    Ok(match columns.map(split_list) {
        Some(columns) if !columns.is_empty() => request.with_columns(columns),
        _ => request,
    })
}
