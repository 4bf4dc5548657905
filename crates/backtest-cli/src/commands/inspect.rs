//! 데이터셋 요약 명령어.

use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use backtest_data::BacktestDataManager;
use chrono::NaiveDate;

/// 데이터셋 요약
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    /// 행 수
    pub rows: usize,
    /// 컬럼 이름
    pub columns: Vec<String>,
    /// 종목 (처음 등장한 순서)
    pub instruments: Vec<String>,
    /// 최소/최대 날짜
    pub date_range: Option<(NaiveDate, NaiveDate)>,
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "행 수: {}", self.rows)?;
        writeln!(f, "컬럼: {}", self.columns.join(", "))?;
        writeln!(f, "종목 수: {}", self.instruments.len())?;
        match self.date_range {
            Some((start, end)) => writeln!(f, "기간: {} ~ {}", start, end),
            None => writeln!(f, "기간: -"),
        }
    }
}

/// Feather 데이터셋을 읽어 요약합니다.
pub fn inspect_dataset(path: &Path) -> Result<DatasetSummary> {
    let mut manager = BacktestDataManager::new();
    manager
        .load(path)
        .with_context(|| format!("Failed to load dataset: {}", path.display()))?;

    let df = manager.data()?;
    Ok(DatasetSummary {
        rows: df.height(),
        columns: df.get_column_names().iter().map(|c| c.to_string()).collect(),
        instruments: manager.instruments()?,
        date_range: manager.date_range()?,
    })
}
