//! 설정 파일 왕복과 단위 변환 테스트.
use irrigation_design_core::config::{self, Config};
use irrigation_design_core::geometry::{ClipOutput, ClipStrategy, DEFAULT_SAMPLE_COUNT};
use irrigation_design_core::hydraulics::LookupMode;
use irrigation_design_core::units::{convert_area, convert_pressure, AreaUnit, PressureUnit};

#[test]
fn default_config_is_written_and_reloaded() {
    let dir = std::env::temp_dir().join(format!("irrigation-cfg-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("irrigation.toml");
    let _ = std::fs::remove_file(&path);

    let cfg = config::load_or_default(&path).expect("create default");
    assert!(path.exists());
    assert_eq!(cfg.clip.sample_count, DEFAULT_SAMPLE_COUNT);

    let again = config::load_or_default(&path).expect("reload");
    assert_eq!(again.hydraulics.lookup_mode, LookupMode::NextRow);
    assert_eq!(again.hydraulics.target_head_loss, 1.9);
    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn partial_config_uses_defaults() {
    let cfg: Config = toml::from_str(
        r#"
[clip]
sample_count = 128
output = "Mask"
strategy = "Exact"
"#,
    )
    .expect("partial config");
    assert_eq!(cfg.clip.sample_count, 128);
    assert_eq!(cfg.clip.output, ClipOutput::Mask);
    assert_eq!(cfg.clip.strategy, ClipStrategy::Exact);
    assert_eq!(cfg.hydraulics.head_loss_ratio, 0.2);
    assert!(cfg.hydraulics.tables_path.is_none());
}

#[test]
fn section_with_only_tables_path_keeps_other_defaults() {
    let cfg: Config = toml::from_str("[hydraulics]\ntables_path = \"custom.toml\"\n")
        .expect("tables_path only");
    assert_eq!(
        cfg.hydraulics.tables_path.as_deref(),
        Some(std::path::Path::new("custom.toml"))
    );
    assert_eq!(cfg.hydraulics.lookup_mode, LookupMode::NextRow);
    assert_eq!(cfg.hydraulics.target_head_loss, 1.9);
    assert_eq!(cfg.hydraulics.head_loss_ratio, 0.2);
    assert_eq!(cfg.clip.sample_count, DEFAULT_SAMPLE_COUNT);

    let cfg: Config = toml::from_str("[clip]\nsample_count = 16\n[display]\narea_unit = \"Rai\"\n")
        .expect("partial sections");
    assert_eq!(cfg.clip.sample_count, 16);
    assert_eq!(cfg.clip.output, ClipOutput::Polygon);
    assert_eq!(cfg.clip.strategy, ClipStrategy::Sampled);
    assert_eq!(cfg.display.area_unit, AreaUnit::Rai);
    assert_eq!(cfg.display.pressure_unit, PressureUnit::Bar);
}

#[test]
fn pressure_to_water_column() {
    let m = convert_pressure(1.0, PressureUnit::Bar, PressureUnit::MeterWaterColumn);
    assert!((m - 10.1972).abs() < 1e-9);
    let ksc = convert_pressure(1.0, PressureUnit::KgPerCm2, PressureUnit::Bar);
    assert!((ksc - 0.980665).abs() < 1e-12);
}

#[test]
fn thai_land_units() {
    assert_eq!(convert_area(1600.0, AreaUnit::SquareMeter, AreaUnit::Rai), 1.0);
    assert_eq!(convert_area(1.0, AreaUnit::Rai, AreaUnit::Ngan), 4.0);
    assert_eq!(convert_area(1.0, AreaUnit::Ngan, AreaUnit::SquareWah), 100.0);
}
