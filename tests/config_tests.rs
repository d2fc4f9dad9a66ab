// tests/config_tests.rs
//! Configuration layering: defaults, files, environment overrides

use iir_core::config::{ButterworthConfig, ConfigError, ConfigLoader, FilterConfig, StageConfig};
use iir_core::error::FilterError;
use iir_core::processing::{FilterBank, FilterKind};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
#[serial]
fn test_defaults_without_files() {
    let dir = TempDir::new().unwrap();
    let loader = ConfigLoader::with_paths(vec![dir.path().join("missing.toml")]);
    let config = loader.load().unwrap();
    assert_eq!(config, FilterConfig::default());
}

#[test]
#[serial]
fn test_later_files_take_precedence() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "base.toml",
        r#"
[butterworth]
kind = "highpass"
order = 3
sampling_frequency = 500.0
cutoff = 5.0
"#,
    );
    let local = write(
        &dir,
        "local.toml",
        r#"
[butterworth]
order = 6
"#,
    );

    let config = ConfigLoader::with_paths(vec![base, local]).load().unwrap();
    assert_eq!(config.butterworth.kind, FilterKind::HighPass);
    assert_eq!(config.butterworth.order, 6);
    assert_eq!(config.butterworth.sampling_frequency, 500.0);
    assert_eq!(config.butterworth.cutoff, Some(5.0));

    let filter = config.butterworth.build::<f64>().unwrap();
    assert_eq!(filter.a_order(), 7);
}

#[test]
#[serial]
fn test_environment_overrides_files() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "iir.toml",
        r#"
[butterworth]
order = 3
"#,
    );

    std::env::set_var("IIR_BUTTERWORTH__ORDER", "8");
    std::env::set_var("IIR_BUTTERWORTH__SAMPLING_FREQUENCY", "2000");
    let result = ConfigLoader::with_paths(vec![path]).load();
    std::env::remove_var("IIR_BUTTERWORTH__ORDER");
    std::env::remove_var("IIR_BUTTERWORTH__SAMPLING_FREQUENCY");

    let config = result.unwrap();
    assert_eq!(config.butterworth.order, 8);
    assert_eq!(config.butterworth.sampling_frequency, 2000.0);
}

#[test]
#[serial]
fn test_band_section() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "band.toml",
        r#"
[butterworth]
kind = "bandreject"
order = 2
sampling_frequency = 1000.0
lower = 45.0
upper = 55.0
"#,
    );

    let config = ConfigLoader::new().load_from_file(&path).unwrap();
    let filter = config.butterworth.build::<f64>().unwrap();
    assert_eq!(filter.kind(), FilterKind::BandReject);
    assert_eq!(filter.a_order(), 5);
}

#[test]
#[serial]
fn test_band_section_without_edges() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "band.toml",
        r#"
[butterworth]
kind = "bandpass"
lower = 45.0
"#,
    );

    match ConfigLoader::new().load_from_file(&path) {
        Err(ConfigError::Invalid { section, source }) => {
            assert_eq!(section, "butterworth");
            assert!(matches!(source, FilterError::FrequencyKindMismatch { .. }));
        }
        other => panic!("expected invalid configuration, got {:?}", other),
    }
}

#[test]
#[serial]
fn test_export_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("exported.toml");

    let mut config = FilterConfig::default();
    config.butterworth = ButterworthConfig {
        kind: FilterKind::BandPass,
        order: 3,
        sampling_frequency: 250.0,
        cutoff: None,
        lower: Some(8.0),
        upper: Some(30.0),
    };
    config.bank.stages = vec![
        StageConfig::highpass(2, 0.5),
        StageConfig::band(FilterKind::BandReject, 2, 48.0, 52.0),
        StageConfig::lowpass(4, 100.0),
    ];
    config.bank.sampling_frequency = 250.0;

    ConfigLoader::export(&config, &path).unwrap();
    let reloaded = ConfigLoader::new().load_from_file(&path).unwrap();
    assert_eq!(reloaded.butterworth.kind, FilterKind::BandPass);
    assert_eq!(reloaded.butterworth.lower, Some(8.0));
    assert_eq!(reloaded.bank.stages.len(), 3);

    let bank = FilterBank::<f64>::from_config(&reloaded.bank).unwrap();
    assert_eq!(bank.stage_count(), 3);
}

#[test]
fn test_json_representation() {
    let config = FilterConfig::default();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["butterworth"]["kind"], "lowpass");
    assert_eq!(json["bank"]["stages"][0]["kind"], "highpass");
    assert!(json["butterworth"].get("lower").is_none());

    let back: FilterConfig = serde_json::from_value(json).unwrap();
    assert_eq!(back, config);
}
