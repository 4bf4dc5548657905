//! 신호 값 해석.
//!
//! 신호는 기간당 하나의 실수입니다. 부호는 방향, 크기는 원하는 포지션 변화량입니다.

use serde::{Deserialize, Serialize};

/// 신호 값의 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalDirection {
    /// 포지션 증가 희망
    Buy,
    /// 포지션 감소 희망
    Sell,
    /// 거래 없음
    Hold,
}

impl SignalDirection {
    /// 신호 값에서 방향을 결정합니다.
    ///
    /// NaN은 양수도 음수도 아니므로 `Hold`입니다.
    pub fn from_value(value: f64) -> Self {
        if value > 0.0 {
            SignalDirection::Buy
        } else if value < 0.0 {
            SignalDirection::Sell
        } else {
            SignalDirection::Hold
        }
    }
}

impl std::fmt::Display for SignalDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalDirection::Buy => write!(f, "BUY"),
            SignalDirection::Sell => write!(f, "SELL"),
            SignalDirection::Hold => write!(f, "HOLD"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_from_value() {
        assert_eq!(SignalDirection::from_value(0.5), SignalDirection::Buy);
        assert_eq!(SignalDirection::from_value(-2.0), SignalDirection::Sell);
        assert_eq!(SignalDirection::from_value(0.0), SignalDirection::Hold);
        assert_eq!(SignalDirection::from_value(-0.0), SignalDirection::Hold);
        assert_eq!(SignalDirection::from_value(f64::NAN), SignalDirection::Hold);
    }

    #[test]
    fn test_direction_display() {
        assert_eq!(SignalDirection::Buy.to_string(), "BUY");
        assert_eq!(SignalDirection::Hold.to_string(), "HOLD");
    }
}
