//! 백테스트 CLI.
//!
//! # 사용 예시
//!
//! ```bash
//! # 두 종목 백테스트 (기본 설정: reverse 전략, 현금 1e6)
//! backtest run -d data/prices.feather -s 000001,000002 -f 2020-01-01 -t 2020-12-31
//!
//! # 설정 파일 + 덮어쓰기
//! backtest --config config/backtest.toml run -s 000001 -f 2020-01-01 -t 2020-12-31 --margin 0
//!
//! # 부분 데이터 추출
//! backtest extract -s 000001 -f 2020-01-01 -t 2020-03-31 -o data/q1.feather
//!
//! # 데이터셋 요약
//! backtest inspect -d data/prices.feather
//! ```

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use backtest_core::{init_logging, AppConfig, LogConfig, StrategyKind};
use clap::{Parser, Subcommand};
use tracing::{error, info};

use backtest_cli::commands::backtest::{run_backtest, BacktestCliConfig};
use backtest_cli::commands::extract::{run_extract, ExtractConfig};
use backtest_cli::commands::inspect::inspect_dataset;
use backtest_cli::commands::request::build_request;

#[derive(Parser)]
#[command(name = "backtest")]
#[command(about = "Equity backtesting CLI - 신호 기반 매매 시뮬레이션과 성과 분석", long_about = None)]
#[command(version)]
struct Cli {
    /// 설정 파일 (TOML). 환경 변수 BACKTEST__* 가 우선합니다
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 백테스트 실행 (종목별 시뮬레이션 + 성과 보고서)
    Run {
        /// Feather 데이터셋 경로 (기본: 설정의 data.path)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// 종목 코드 목록 (쉼표 구분, 예: 000001,000002)
        #[arg(short, long)]
        stk_id: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        to: String,

        /// 전략 (reverse, cross_section)
        #[arg(long)]
        strategy: Option<StrategyKind>,

        /// 이동평균 윈도우
        #[arg(long)]
        window: Option<usize>,

        /// 초기 현금
        #[arg(long)]
        cash: Option<f64>,

        /// 최대 포지션 비율
        #[arg(long)]
        max_position: Option<f64>,

        /// 거래 비용 비율
        #[arg(long)]
        margin: Option<f64>,

        /// 무위험 이자율
        #[arg(long)]
        riskless: Option<f64>,

        /// 자산 곡선/보고서 저장 디렉토리
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// 종목/기간으로 데이터셋 일부를 Feather 파일로 추출
    Extract {
        /// Feather 데이터셋 경로 (기본: 설정의 data.path)
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// 종목 코드 목록 (쉼표 구분)
        #[arg(short, long)]
        stk_id: String,

        /// 시작 날짜 (YYYY-MM-DD)
        #[arg(short = 'f', long)]
        from: String,

        /// 종료 날짜 (YYYY-MM-DD)
        #[arg(short, long)]
        to: String,

        /// 추출할 컬럼 (쉼표 구분, 기본: 전체)
        #[arg(long)]
        columns: Option<String>,

        /// 출력 파일 경로
        #[arg(short, long)]
        output: PathBuf,
    },

    /// 데이터셋 요약 (행 수, 컬럼, 종목, 기간)
    Inspect {
        /// Feather 데이터셋 경로 (기본: 설정의 data.path)
        #[arg(short, long)]
        data: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut app = AppConfig::load(cli.config.as_deref())?;

    init_logging(LogConfig::from(&app.logging))
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    let default_data = PathBuf::from(&app.data.path);

    match cli.command {
        Commands::Run {
            data,
            stk_id,
            from,
            to,
            strategy,
            window,
            cash,
            max_position,
            margin,
            riskless,
            output_dir,
        } => {
            if let Some(kind) = strategy {
                app.strategy.kind = kind;
            }
            if let Some(window) = window {
                app.strategy.window = window;
            }
            if let Some(cash) = cash {
                app.trading.cash = cash;
            }
            if let Some(max_position) = max_position {
                app.trading.max_position = max_position;
            }
            if let Some(margin) = margin {
                app.trading.margin = margin;
            }
            if let Some(riskless) = riskless {
                app.analysis.riskless_rate = riskless;
            }

            let config = BacktestCliConfig {
                data_path: data.unwrap_or(default_data),
                request: build_request(&stk_id, &from, &to, None)?,
                app,
                output_dir,
            };

            match run_backtest(&config) {
                Ok(outcomes) => {
                    info!(instruments = outcomes.len(), "Backtest finished");
                }
                Err(e) => {
                    error!("Backtest failed: {:#}", e);
                    return Err(e);
                }
            }
        }

        Commands::Extract {
            data,
            stk_id,
            from,
            to,
            columns,
            output,
        } => {
            let config = ExtractConfig {
                data_path: data.unwrap_or(default_data),
                request: build_request(&stk_id, &from, &to, columns.as_deref())?,
                output,
            };

            let rows = run_extract(&config)?;
            println!("\n추출 완료: {} 행", rows);
            println!("저장 위치: {}", config.output.display());
        }

        Commands::Inspect { data } => {
            let path = data.unwrap_or(default_data);
            let summary = inspect_dataset(&path)?;
            println!("{}", summary);
        }
    }

    Ok(())
}
