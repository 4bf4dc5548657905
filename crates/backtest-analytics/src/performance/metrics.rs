//! 성과 지표 계산 모듈
//!
//! 자산 곡선 하나에서 다섯 가지 지표를 계산합니다:
//! - 연율화 수익률 (Annual Return): `mean(ret) * 252`
//! - 초과 수익률 (Extra Return): 연율화 수익률 - 무위험 이자율
//! - 연율화 변동성 (Annual Volatility): `std(ret) * √252`, 표본 표준편차
//! - 샤프 비율 (Sharpe Ratio): 초과 수익률 / 연율화 변동성
//! - 최대 낙폭 (Maximum Drawdown): 고점 대비 최대 하락 비율
//!
//! 변동성이 0이면 샤프 비율은 유한하지 않은 값이 됩니다. 이는 오류가 아니라
//! 정상 출력으로 그대로 전달됩니다.
//!
//! # 사용 예시
//!
//! ```rust,ignore
//! use backtest_analytics::analysis;
//!
//! let report = analysis(&[100.0, 110.0, 99.0, 121.0], 0.03)?;
//! println!("{}", report);
//! ```

use backtest_core::{nan_mean, nan_sample_std, running_max, simple_returns, AnalysisConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::portfolio::equity_curve::EquityCurve;

/// 연간 거래일 수 (연율화 계산에 사용)
pub const TRADING_DAYS_PER_YEAR: u32 = 252;

/// 성과 지표 오류
#[derive(Debug, Error)]
pub enum MetricsError {
    /// 수익률 시계열을 만들 수 없을 만큼 데이터가 부족
    #[error("데이터 부족: 최소 {required}개 필요, {provided}개 제공")]
    InsufficientData { required: usize, provided: usize },
}

/// 성과 지표 결과 타입
pub type MetricsResult<T> = Result<T, MetricsError>;

/// 자산 곡선 하나에 대한 성과 보고서.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    /// 연율화 수익률
    pub annual_return: f64,
    /// 무위험 이자율 대비 초과 수익률
    pub extra_return: f64,
    /// 연율화 변동성
    pub annual_volatility: f64,
    /// 샤프 비율 (변동성 0이면 유한하지 않음)
    pub sharpe_ratio: f64,
    /// 최대 낙폭 (0.1 = 10%)
    pub max_drawdown: f64,
}

impl PerformanceReport {
    /// 표시 순서대로의 행 이름.
    pub const LABELS: [&'static str; 5] = [
        "Annual Return",
        "Extra Return",
        "Annual Volatility",
        "Sharpe Ratio",
        "Maximum Drawdown",
    ];

    /// (행 이름, 값) 목록을 표시 순서대로 반환합니다.
    pub fn rows(&self) -> [(&'static str, f64); 5] {
        [
            (Self::LABELS[0], self.annual_return),
            (Self::LABELS[1], self.extra_return),
            (Self::LABELS[2], self.annual_volatility),
            (Self::LABELS[3], self.sharpe_ratio),
            (Self::LABELS[4], self.max_drawdown),
        ]
    }

    /// 자산 곡선에서 보고서를 계산합니다.
    pub fn from_equity_curve(
        curve: &EquityCurve,
        config: &AnalysisConfig,
    ) -> MetricsResult<Self> {
        analysis_with_config(&curve.values(), config)
    }
}

impl std::fmt::Display for PerformanceReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let width = Self::LABELS.iter().map(|l| l.len()).max().unwrap_or(0);
        writeln!(f, "{:width$}  {:>14}", "", "Evaluate", width = width)?;
        for (label, value) in self.rows() {
            writeln!(f, "{:width$}  {:>14.6}", label, value, width = width)?;
        }
        Ok(())
    }
}

/// 자산 곡선과 무위험 이자율로 성과 보고서를 계산합니다 (연 252 거래일).
pub fn analysis(curve: &[f64], riskless_rate: f64) -> MetricsResult<PerformanceReport> {
    analysis_with_config(
        curve,
        &AnalysisConfig {
            riskless_rate,
            trading_days_per_year: TRADING_DAYS_PER_YEAR,
        },
    )
}

/// 설정의 무위험 이자율과 연간 거래일 수로 성과 보고서를 계산합니다.
///
/// 수익률 평균과 표준편차는 NaN을 건너뜁니다 (0 가격 등으로 생긴 값).
pub fn analysis_with_config(
    curve: &[f64],
    config: &AnalysisConfig,
) -> MetricsResult<PerformanceReport> {
    if curve.len() < 2 {
        return Err(MetricsError::InsufficientData {
            required: 2,
            provided: curve.len(),
        });
    }

    let days = f64::from(config.trading_days_per_year);
    let returns = simple_returns(curve);

    let annual_return = nan_mean(&returns) * days;
    let annual_volatility = nan_sample_std(&returns) * days.sqrt();
    let extra_return = annual_return - config.riskless_rate;
    let sharpe_ratio = extra_return / annual_volatility;

    Ok(PerformanceReport {
        annual_return,
        extra_return,
        annual_volatility,
        sharpe_ratio,
        max_drawdown: max_drawdown(curve),
    })
}

/// 최대 낙폭 `max_t (peak_t - curve_t) / peak_t`.
///
/// NaN 낙폭이 있으면 결과도 NaN입니다. 빈 입력은 0입니다.
pub fn max_drawdown(curve: &[f64]) -> f64 {
    running_max(curve)
        .into_iter()
        .zip(curve)
        .map(|(peak, &value)| (peak - value) / peak)
        .fold(0.0, |acc: f64, dd| {
            // f64::max는 NaN을 무시하므로 직접 전파
            if acc.is_nan() || dd.is_nan() {
                f64::NAN
            } else {
                acc.max(dd)
            }
        })
}
