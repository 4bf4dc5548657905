//! 신호 생성기 인터페이스.

use backtest_core::PeriodRecord;

use crate::error::StrategyResult;

/// 가격 레코드에서 행별 신호를 만드는 생성기.
///
/// 반환되는 신호는 입력 레코드와 위치 기준으로 1:1 정렬되어야 합니다.
/// 양수는 매수, 음수는 매도, 0은 보유를 뜻합니다.
pub trait SignalGenerator: Send + Sync {
    /// 전략 이름 반환.
    fn name(&self) -> &str;

    /// 레코드별 신호 계산.
    fn signal(&self, records: &[PeriodRecord]) -> StrategyResult<Vec<f64>>;
}

impl<G: SignalGenerator + ?Sized> SignalGenerator for Box<G> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn signal(&self, records: &[PeriodRecord]) -> StrategyResult<Vec<f64>> {
        (**self).signal(records)
    }
}
