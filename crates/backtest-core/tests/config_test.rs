//! Configuration loading from TOML files.

use std::fs;

use backtest_core::{AppConfig, StrategyKind};
use tempfile::tempdir;

#[test]
fn test_load_without_file_uses_defaults() {
    let config = AppConfig::load(None).unwrap();
    assert_eq!(config.analysis.trading_days_per_year, 252);
    assert_eq!(config.logging.format, "pretty");
}

#[test]
fn test_load_toml_overrides_sections() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("backtest.toml");
    fs::write(
        &path,
        r#"
[trading]
cash = 1000.0
max_position = 0.25
margin = 0.0

[strategy]
kind = "cross_section"
window = 10

[data]
path = "data/universe.feather"
"#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(config.trading.cash, 1000.0);
    assert_eq!(config.trading.max_position, 0.25);
    assert_eq!(config.trading.margin, 0.0);
    assert_eq!(config.strategy.kind, StrategyKind::CrossSection);
    assert_eq!(config.strategy.window, 10);
    assert_eq!(config.strategy.epsilon, 1e-6);
    assert_eq!(config.data.path, "data/universe.feather");
    assert_eq!(config.analysis.riskless_rate, 0.03);
}

#[test]
fn test_load_rejects_invalid_trading_section() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[trading]\nmargin = -1.0\n").unwrap();

    assert!(AppConfig::load(Some(&path)).is_err());
}

#[test]
fn test_load_missing_file_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    assert!(AppConfig::load(Some(&path)).is_err());
}
