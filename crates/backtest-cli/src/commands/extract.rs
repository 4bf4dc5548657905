//! 데이터셋 부분 추출 명령어.
//!
//! ```bash
//! backtest extract -d data/prices.feather -s 000001 -f 2020-01-01 -t 2020-06-30 \
//!     --columns stk_id,date,close -o data/000001_h1.feather
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use backtest_data::{BacktestDataManager, DataRequest};
use tracing::info;

/// 추출 설정
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// 원본 Feather 데이터셋
    pub data_path: PathBuf,
    /// 종목/기간/컬럼 요청
    pub request: DataRequest,
    /// 저장할 Feather 파일
    pub output: PathBuf,
}

/// 요청 결과를 새 Feather 파일로 저장하고 행 수를 반환합니다.
pub fn run_extract(config: &ExtractConfig) -> Result<usize> {
    let mut manager = BacktestDataManager::new();
    manager
        .load(&config.data_path)
        .with_context(|| format!("Failed to load dataset: {}", config.data_path.display()))?;

    let frame = manager.request(&config.request)?;
    let rows = frame.height();

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    BacktestDataManager::from_frame(frame)
        .save(&config.output)
        .with_context(|| format!("Failed to save: {}", config.output.display()))?;

    info!(rows, output = %config.output.display(), "Extract completed");
    Ok(rows)
}
