//! 수치 시계열 공통 계산.
//!
//! 전략(이동평균, 횡단면 정규화)과 성과 분석(수익률, 변동성, 낙폭)에서 공유합니다.
//! 평균과 표준편차는 NaN을 건너뛰고 계산합니다.

/// NaN을 제외한 산술 평균. 유효한 값이 없으면 NaN.
pub fn nan_mean(values: &[f64]) -> f64 {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));

    if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    }
}

/// NaN을 제외한 표본 표준편차 (자유도 1). 유효한 값이 2개 미만이면 NaN.
pub fn nan_sample_std(values: &[f64]) -> f64 {
    let valid: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if valid.len() < 2 {
        return f64::NAN;
    }

    let mean = valid.iter().sum::<f64>() / valid.len() as f64;
    let sum_sq: f64 = valid.iter().map(|v| (v - mean).powi(2)).sum();
    (sum_sq / (valid.len() - 1) as f64).sqrt()
}

/// 윈도우 이동평균. 윈도우가 채워지기 전 위치는 NaN입니다.
///
/// `window`는 1 이상이어야 합니다.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    debug_assert!(window > 0);

    (0..values.len())
        .map(|i| {
            if i + 1 < window {
                f64::NAN
            } else {
                values[i + 1 - window..=i].iter().sum::<f64>() / window as f64
            }
        })
        .collect()
}

/// 단순 수익률 `(x[t] - x[t-1]) / x[t-1]`, t ≥ 1.
///
/// 결과 길이는 입력보다 1 작습니다 (첫 기간은 수익률이 없음).
pub fn simple_returns(values: &[f64]) -> Vec<f64> {
    values
        .windows(2)
        .map(|w| (w[1] - w[0]) / w[0])
        .collect()
}

/// 누적 최대값 (현재 위치 포함).
pub fn running_max(values: &[f64]) -> Vec<f64> {
    let mut peak = f64::NEG_INFINITY;
    values
        .iter()
        .map(|&v| {
            if v > peak {
                peak = v;
            }
            peak
        })
        .collect()
}
