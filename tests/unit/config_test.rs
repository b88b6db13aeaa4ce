//! Unit tests for config module

use std::time::Duration;

use hover_preview::config::{LoaderConfig, PreviewConfig};
use hover_preview::preview::{LoaderMode, PreviewError, Size};
use hover_preview::{Config, FeatureFlag, SettingsStore};

#[test]
fn default_config_has_expected_values() {
    let config = Config::default();
    let preview = &config.preview;
    assert!(preview.enabled);
    assert_eq!(preview.frame_count, 6);
    assert_eq!(preview.hover_delay(), Duration::from_millis(500));
    assert_eq!(preview.frame_interval(), Duration::from_millis(800));
    assert_eq!(preview.retry_delay(), Duration::from_secs(5));
    assert_eq!(preview.preview_size(), Size::new(320.0, 180.0));
    assert_eq!(preview.cache_capacity, 20);
    assert_eq!(preview.overlay_margin, 20);
    assert_eq!(config.loader.workers, 4);
}

#[test]
fn config_serialization_roundtrip() {
    let mut config = Config::default();
    config.preview.frame_count = 8;
    config.loader.workers = 0;
    let toml_str = toml::to_string(&config).unwrap();
    let parsed: Config = toml::from_str(&toml_str).unwrap();
    assert_eq!(parsed, config);
}

#[test]
fn missing_fields_take_defaults() {
    let toml_str = r#"
[preview]
hover_delay_ms = 250
"#;
    let config: Config = toml::from_str(toml_str).unwrap();
    assert_eq!(config.preview.hover_delay_ms, 250);
    assert_eq!(config.preview.frame_count, 6);
    assert_eq!(config.loader, LoaderConfig::default());
}

#[test]
fn empty_file_is_all_defaults() {
    let config: Config = toml::from_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn validate_rejects_unusable_values() {
    let cases = [
        PreviewConfig {
            frame_count: 0,
            ..PreviewConfig::default()
        },
        PreviewConfig {
            cache_capacity: 0,
            ..PreviewConfig::default()
        },
        PreviewConfig {
            frame_interval_ms: 0,
            ..PreviewConfig::default()
        },
        PreviewConfig {
            preview_height: 0,
            ..PreviewConfig::default()
        },
    ];
    for config in cases {
        assert!(matches!(
            config.validate(),
            Err(PreviewError::InvalidConfig(_))
        ));
    }
    assert!(PreviewConfig::default().validate().is_ok());
}

#[test]
fn zero_hover_delay_is_allowed() {
    let config = PreviewConfig {
        hover_delay_ms: 0,
        ..PreviewConfig::default()
    };
    assert!(config.validate().is_ok());
}

#[test]
fn loader_workers_map_to_modes() {
    assert_eq!(LoaderConfig { workers: 0 }.mode(), LoaderMode::Inline);
    assert_eq!(LoaderConfig { workers: 3 }.mode(), LoaderMode::Pool(3));
}

#[test]
fn settings_stores_report_the_flag() {
    assert!(true.preview_enabled());
    let config = PreviewConfig {
        enabled: false,
        ..PreviewConfig::default()
    };
    assert!(!config.preview_enabled());

    let flag = FeatureFlag::new(true);
    let shared = flag.clone();
    shared.set(false);
    assert!(!flag.preview_enabled());
}
