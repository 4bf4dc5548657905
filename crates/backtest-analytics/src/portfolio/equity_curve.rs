//! 자산 곡선(Equity Curve) 데이터 모듈
//!
//! 시뮬레이터가 날짜별로 기록한 총자산 가치 `cash + position * price`의 시계열입니다.
//! 생성 후에는 읽기 전용으로 취급합니다.

use backtest_core::{running_max, simple_returns};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// 단일 자산 곡선 데이터 포인트
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquityPoint {
    /// 거래일
    pub date: NaiveDate,
    /// 총자산 가치
    pub equity: f64,
}

/// 자산 곡선 데이터
///
/// 포인트는 날짜 오름차순으로 추가된다고 가정합니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EquityCurve {
    points: Vec<EquityPoint>,
}

impl EquityCurve {
    /// 빈 자산 곡선을 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 용량을 예약한 빈 자산 곡선을 생성합니다.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// 새로운 자산 가치를 추가합니다.
    pub fn push(&mut self, date: NaiveDate, equity: f64) {
        self.points.push(EquityPoint { date, equity });
    }

    /// 모든 데이터 포인트를 반환합니다.
    pub fn points(&self) -> &[EquityPoint] {
        &self.points
    }

    /// 날짜 목록을 반환합니다.
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.points.iter().map(|p| p.date).collect()
    }

    /// 자산 가치 목록을 반환합니다.
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.equity).collect()
    }

    /// 마지막 자산 가치를 반환합니다.
    pub fn current_equity(&self) -> Option<f64> {
        self.points.last().map(|p| p.equity)
    }

    /// 데이터 포인트 수를 반환합니다.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// 데이터가 비어있는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// 기간 수익률 시계열 (첫 포인트 제외).
    pub fn returns(&self) -> Vec<f64> {
        simple_returns(&self.values())
    }

    /// 각 시점의 고점 대비 낙폭 비율 `(peak - equity) / peak`.
    pub fn drawdowns(&self) -> Vec<f64> {
        let values = self.values();
        running_max(&values)
            .into_iter()
            .zip(values)
            .map(|(peak, equity)| (peak - equity) / peak)
            .collect()
    }

    /// `date`(Date), `equity`(f64) 컬럼의 `DataFrame`으로 변환합니다.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let dates = DateChunked::from_naive_date("date".into(), self.points.iter().map(|p| p.date));
        let equity: Vec<f64> = self.values();

        DataFrame::new(vec![
            dates.into_series().into_column(),
            Series::new("equity".into(), equity).into_column(),
        ])
    }
}

impl FromIterator<(NaiveDate, f64)> for EquityCurve {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, f64)>>(iter: I) -> Self {
        Self {
            points: iter
                .into_iter()
                .map(|(date, equity)| EquityPoint { date, equity })
                .collect(),
        }
    }
}
