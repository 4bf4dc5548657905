//! 설정 관리.
//!
//! 기본값 → 설정 파일(TOML) → 환경 변수 순서로 덮어씁니다.
//! 환경 변수는 `BACKTEST` 접두사와 `__` 구분자를 사용합니다
//! (예: `BACKTEST__TRADING__CASH=5000`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{CoreError, CoreResult};

/// 연간 거래일 수 기본값.
pub const DEFAULT_TRADING_DAYS_PER_YEAR: u32 = 252;

/// 기본 무위험 이자율 (연간, 0.03 = 3%).
pub const DEFAULT_RISKLESS_RATE: f64 = 0.03;

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 매매 시뮬레이션 설정
    #[serde(default)]
    pub trading: TradingConfig,
    /// 성과 분석 설정
    #[serde(default)]
    pub analysis: AnalysisConfig,
    /// 신호 전략 설정
    #[serde(default)]
    pub strategy: StrategyConfig,
    /// 데이터 설정
    #[serde(default)]
    pub data: DataConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 매매 시뮬레이션 설정.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct TradingConfig {
    /// 초기 현금
    #[serde(default = "default_cash")]
    pub cash: f64,
    /// 총자산 대비 최대 포지션 비율 (예: 0.1 = 10%)
    #[serde(default = "default_max_position")]
    pub max_position: f64,
    /// 거래 명목금액에 적용되는 비례 비용 (예: 1e-4 = 0.01%)
    #[serde(default = "default_margin")]
    pub margin: f64,
}

fn default_cash() -> f64 {
    1e6
}
fn default_max_position() -> f64 {
    0.1
}
fn default_margin() -> f64 {
    1e-4
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            cash: default_cash(),
            max_position: default_max_position(),
            margin: default_margin(),
        }
    }
}

impl TradingConfig {
    /// 새 설정을 생성합니다.
    pub fn new(cash: f64, max_position: f64, margin: f64) -> Self {
        Self {
            cash,
            max_position,
            margin,
        }
    }

    /// 초기 현금 설정
    pub fn with_cash(mut self, cash: f64) -> Self {
        self.cash = cash;
        self
    }

    /// 최대 포지션 비율 설정
    pub fn with_max_position(mut self, max_position: f64) -> Self {
        self.max_position = max_position;
        self
    }

    /// 거래 비용 비율 설정
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// 설정 검증
    pub fn validate(&self) -> CoreResult<()> {
        if !self.cash.is_finite() {
            return Err(CoreError::Config(format!(
                "초기 현금은 유한한 값이어야 합니다: {}",
                self.cash
            )));
        }
        if !self.max_position.is_finite() || self.max_position < 0.0 {
            return Err(CoreError::Config(format!(
                "최대 포지션 비율은 0 이상이어야 합니다: {}",
                self.max_position
            )));
        }
        if !self.margin.is_finite() || self.margin < 0.0 {
            return Err(CoreError::Config(format!(
                "거래 비용 비율은 0 이상이어야 합니다: {}",
                self.margin
            )));
        }
        Ok(())
    }
}

/// 성과 분석 설정.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// 연간 무위험 이자율
    #[serde(default = "default_riskless_rate")]
    pub riskless_rate: f64,
    /// 연율화에 사용할 연간 거래일 수
    #[serde(default = "default_trading_days")]
    pub trading_days_per_year: u32,
}

fn default_riskless_rate() -> f64 {
    DEFAULT_RISKLESS_RATE
}
fn default_trading_days() -> u32 {
    DEFAULT_TRADING_DAYS_PER_YEAR
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            riskless_rate: default_riskless_rate(),
            trading_days_per_year: default_trading_days(),
        }
    }
}

/// 신호 전략 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    /// 이동평균 회귀 전략 (단일 종목)
    Reverse,
    /// 이동평균 회귀 신호의 날짜별 횡단면 정규화
    CrossSection,
}

impl std::str::FromStr for StrategyKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "reverse" => Ok(Self::Reverse),
            "cross_section" | "crosssection" => Ok(Self::CrossSection),
            _ => Err(CoreError::InvalidInput(format!(
                "알 수 없는 전략: {} (지원: reverse, cross_section)",
                s
            ))),
        }
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Reverse => write!(f, "reverse"),
            StrategyKind::CrossSection => write!(f, "cross_section"),
        }
    }
}

/// 신호 전략 설정.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct StrategyConfig {
    /// 전략 종류
    #[serde(default = "default_strategy_kind")]
    pub kind: StrategyKind,
    /// 이동평균 윈도우 길이
    #[serde(default = "default_window")]
    pub window: usize,
    /// 횡단면 z-score 분모 보정값
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

fn default_strategy_kind() -> StrategyKind {
    StrategyKind::Reverse
}
fn default_window() -> usize {
    5
}
fn default_epsilon() -> f64 {
    1e-6
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            kind: default_strategy_kind(),
            window: default_window(),
            epsilon: default_epsilon(),
        }
    }
}

/// 데이터 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    /// Feather 데이터셋 경로
    #[serde(default = "default_data_path")]
    pub path: String,
}

fn default_data_path() -> String {
    "data/prices.feather".to_string()
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 기본값, 설정 파일(선택), 환경 변수 순으로 설정을 로드합니다.
    pub fn load(path: Option<&Path>) -> CoreResult<Self> {
        let mut builder =
            config::Config::builder().add_source(config::Config::try_from(&AppConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }

        let config = builder
            .add_source(
                config::Environment::with_prefix("BACKTEST")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let app: AppConfig = config.try_deserialize()?;
        app.trading.validate()?;
        Ok(app)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trading_defaults() {
        let config = TradingConfig::default();
        assert_eq!(config.cash, 1e6);
        assert_eq!(config.max_position, 0.1);
        assert_eq!(config.margin, 1e-4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_trading_validate_rejects_negative_margin() {
        let config = TradingConfig::default().with_margin(-0.01);
        assert!(matches!(config.validate(), Err(CoreError::Config(_))));

        let config = TradingConfig::default().with_max_position(f64::NAN);
        assert!(config.validate().is_err());

        let config = TradingConfig::default().with_cash(f64::INFINITY);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_strategy_kind_from_str() {
        assert_eq!("reverse".parse::<StrategyKind>().unwrap(), StrategyKind::Reverse);
        assert_eq!(
            "cross-section".parse::<StrategyKind>().unwrap(),
            StrategyKind::CrossSection
        );
        assert_eq!(
            "CROSS_SECTION".parse::<StrategyKind>().unwrap(),
            StrategyKind::CrossSection
        );
        assert!("momentum".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str(r#"{"trading": {"cash": 5000.0}}"#).unwrap();
        assert_eq!(config.trading.cash, 5000.0);
        assert_eq!(config.trading.max_position, 0.1);
        assert_eq!(config.analysis.riskless_rate, DEFAULT_RISKLESS_RATE);
        assert_eq!(config.strategy.window, 5);
    }
}
