// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证资源配置的加载 / 校验 / 保存
// ==========================================

use chrono::NaiveDate;
use sortie_deconflict::config::{
    ConfigError, ConfigManager, EventTypeRule, ResourceConfig, CONFIG_PATH_ENV,
};
use sortie_deconflict::domain::AirspaceId;
use sortie_deconflict::pipeline::DeconflictionPipeline;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_builtin_config_tables() {
    let config = ResourceConfig::default();

    let dtf = config.rule("DTF").unwrap();
    assert!(dtf.needs_sequential_pairs());
    assert_eq!(dtf.needs_cm, 2);

    let tac = config.rule("TAC").unwrap();
    assert_eq!(tac.block_unit_options(), vec![2, 1]);
    assert_eq!(tac.minimum_block_units(), 1);

    assert!(config.is_no_airspace_event("tr4301"));
    assert!(!config.is_no_airspace_event("TR4201"));
    assert!(config.is_reserved(22));
    assert!(!config.is_reserved(17));
    assert_eq!(config.cm_pool.len(), 10);
    assert_eq!(config.overlap_buffer_minutes, 15);
}

#[test]
fn test_schedule_url() {
    let config = ResourceConfig::default();
    let date = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
    let url = config.schedule_url(date).unwrap();
    assert!(url.contains("!2026-03-09!"));

    let mut without = ResourceConfig::default();
    without.schedule_url_template = None;
    assert!(without.schedule_url(date).is_none());
}

// ==========================================
// 校验
// ==========================================

#[test]
fn test_validation_rejects_bad_values() {
    let cases: Vec<(&str, Box<dyn Fn(&mut ResourceConfig)>)> = vec![
        ("squadron_prefix", Box::new(|c: &mut ResourceConfig| c.squadron_prefix = "B1".to_string())),
        ("overlap_buffer_minutes", Box::new(|c: &mut ResourceConfig| c.overlap_buffer_minutes = -5)),
        (
            "event_types",
            Box::new(|c: &mut ResourceConfig| {
                c.event_types.insert(
                    "XX".to_string(),
                    EventTypeRule {
                        block_units_min: Some(3),
                        ..EventTypeRule::formation(2, AirspaceId::Area4, 1)
                    },
                );
            }),
        ),
        (
            "event_types",
            Box::new(|c: &mut ResourceConfig| {
                c.airspace_pools.remove(&AirspaceId::Moa2);
            }),
        ),
        ("tacan_pair_offset", Box::new(|c: &mut ResourceConfig| c.tacan_pair_offset = 0)),
        (
            "dedicated_tacan",
            Box::new(|c: &mut ResourceConfig| {
                let first = c.dedicated_tacan[0].clone();
                c.dedicated_tacan.push(first);
            }),
        ),
        (
            "dedicated_tacan",
            Box::new(|c: &mut ResourceConfig| c.dedicated_tacan[0].base = u32::MAX),
        ),
        (
            "cm_pool",
            Box::new(|c: &mut ResourceConfig| {
                let first = c.cm_pool[0];
                c.cm_pool.push(first);
            }),
        ),
    ];

    for (expected_field, mutate) in cases {
        let mut config = ResourceConfig::default();
        mutate(&mut config);
        match config.validate() {
            Err(ConfigError::InvalidValue { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("{} 应校验失败, 实际: {:?}", expected_field, other),
        }
    }
}

#[test]
fn test_invalid_config_blocks_pipeline() {
    let mut config = ResourceConfig::default();
    config.tacan_pair_offset = 200;
    assert!(DeconflictionPipeline::new(Arc::new(config)).is_err());
}

// ==========================================
// 加载 / 保存
// ==========================================

#[test]
fn test_load_partial_json_uses_field_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    // 以内置配置为底, 去掉带默认值的字段
    let mut value = serde_json::to_value(ResourceConfig::default()).unwrap();
    let object = value.as_object_mut().unwrap();
    for key in ["overlap_buffer_minutes", "remark_window_chars", "lead_markers"] {
        object.remove(key);
    }
    fs::write(&path, serde_json::to_string(&value).unwrap()).unwrap();

    let config = ConfigManager::load_from_path(&path).unwrap();
    assert_eq!(config.overlap_buffer_minutes, 15);
    assert_eq!(config.remark_window_chars, 40);
    assert!(config.lead_markers.is_empty());
}

#[test]
fn test_saved_invalid_config_rejected_on_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = ResourceConfig::default();
    config.squadron_prefix = String::new();
    fs::write(&path, serde_json::to_string(&config).unwrap()).unwrap();

    let result = ConfigManager::with_path(&path).load();
    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));

    // save 同样拒绝
    assert!(ConfigManager::save(&config, &path).is_err());
}

#[test]
fn test_env_var_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("env.json");

    let mut config = ResourceConfig::default();
    config.squadron_prefix = "RZ".to_string();
    ConfigManager::save(&config, &path).unwrap();

    std::env::set_var(CONFIG_PATH_ENV, &path);
    let loaded = ConfigManager::new().load();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert_eq!(loaded.unwrap().squadron_prefix, "RZ");
}
