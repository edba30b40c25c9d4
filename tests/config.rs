use channel_dash::config::{parse_channel_colors, ConfigError, DashboardConfig};
use channel_dash::{Channel, ColorScheme};
use egui::Color32;

#[test]
fn defaults_without_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = DashboardConfig::load_or_default(dir.path()).unwrap();
    assert_eq!(cfg.data_path, std::path::PathBuf::from("dados_agregados.parquet"));
    assert_eq!(cfg.default_agent_count, 5);
    assert_eq!(cfg.chart.base_height, 500.0);
    assert_eq!(cfg.chart.row_height, 25.0);
    assert_eq!(
        cfg.channel_colors.get(Channel::Presencial),
        Some(Color32::from_rgb(0x1f, 0x77, 0xb4))
    );
}

#[test]
fn blank_config_file_means_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dashboard.yaml"), "\n  \n").unwrap();
    let cfg = DashboardConfig::load_or_default(dir.path()).unwrap();
    assert_eq!(cfg.title, DashboardConfig::default().title);
    assert_eq!(cfg.default_agent_count, 5);
}

#[test]
fn yaml_overrides_are_applied() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("dashboard.yaml"),
        "title: Vendas\n\
         data_path: data/agg.parquet\n\
         color_scheme: light\n\
         default_agent_count: 3\n\
         channel_colors:\n  \"Sem canal\": \"#000000\"\n",
    )
    .unwrap();
    let cfg = DashboardConfig::load_or_default(dir.path()).unwrap();
    assert_eq!(cfg.title, "Vendas");
    assert_eq!(cfg.data_path, std::path::PathBuf::from("data/agg.parquet"));
    assert_eq!(cfg.color_scheme, ColorScheme::Light);
    assert_eq!(cfg.default_agent_count, 3);
    assert_eq!(cfg.channel_colors.get(Channel::SemCanal), Some(Color32::BLACK));
    // the given map replaces the defaults
    assert_eq!(cfg.channel_colors.get(Channel::WhatsApp), None);
}

#[test]
fn json_config_is_supported() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("dashboard.json"),
        r#"{ "chart_base_height": 400.0, "chart_row_height": 30.0 }"#,
    )
    .unwrap();
    let cfg = DashboardConfig::load_or_default(dir.path()).unwrap();
    assert_eq!(cfg.chart.base_height, 400.0);
    assert_eq!(cfg.chart.row_height, 30.0);
}

#[test]
fn unknown_channel_is_rejected() {
    let map = [("Fax".to_string(), "#ffffff".to_string())].into_iter().collect();
    assert!(matches!(
        parse_channel_colors(&map),
        Err(ConfigError::UnknownChannel(name)) if name == "Fax"
    ));
}

#[test]
fn malformed_color_is_rejected() {
    let map = [("Site".to_string(), "red".to_string())].into_iter().collect();
    assert!(matches!(
        parse_channel_colors(&map),
        Err(ConfigError::InvalidColor { .. })
    ));
}

#[test]
fn unknown_keys_fail_the_load() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("dashboard.yml"), "colour_scheme: dark\n").unwrap();
    assert!(matches!(
        DashboardConfig::load_or_default(dir.path()),
        Err(ConfigError::Yaml(_))
    ));
}
