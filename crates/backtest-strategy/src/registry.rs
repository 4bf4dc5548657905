//! 설정 기반 전략 생성.

use backtest_core::{StrategyConfig, StrategyKind};
use tracing::info;

use crate::error::StrategyResult;
use crate::strategies::{CrossSectionStrategy, ReverseStrategy};
use crate::traits::SignalGenerator;

/// 설정에 맞는 신호 생성기를 생성합니다.
pub fn build_strategy(config: &StrategyConfig) -> StrategyResult<Box<dyn SignalGenerator>> {
    let reverse = ReverseStrategy::new(config.window)?;

    let strategy: Box<dyn SignalGenerator> = match config.kind {
        StrategyKind::Reverse => Box::new(reverse),
        StrategyKind::CrossSection => {
            Box::new(CrossSectionStrategy::new(reverse).with_epsilon(config.epsilon))
        }
    };

    info!(
        strategy = strategy.name(),
        window = config.window,
        "Signal generator built"
    );
    Ok(strategy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrategyError;

    #[test]
    fn test_build_reverse() {
        let strategy = build_strategy(&StrategyConfig::default()).unwrap();
        assert_eq!(strategy.name(), "reverse");
    }

    #[test]
    fn test_build_cross_section() {
        let config = StrategyConfig {
            kind: StrategyKind::CrossSection,
            ..Default::default()
        };
        let strategy = build_strategy(&config).unwrap();
        assert_eq!(strategy.name(), "cross_section(reverse)");
    }

    #[test]
    fn test_build_rejects_zero_window() {
        let config = StrategyConfig {
            window: 0,
            ..Default::default()
        };
        assert!(matches!(
            build_strategy(&config),
            Err(StrategyError::InvalidParameter(_))
        ));
    }
}
