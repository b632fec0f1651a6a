// ==========================================
// 飞行排班消冲系统 - 资源配置表
// ==========================================
// 职责: 科目规则 / 空域池 / TACAN 预设 / 辅助频率池
// 红线: 单次运行内只读, 以不可变值注入引擎
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::{AirspaceId, Frequency};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ==========================================
// EventTypeRule - 科目资源规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventTypeRule {
    /// 理想空域块单位 (0 表示不需要空域)
    pub block_units: u32,

    /// 可接受的最小块单位 (可降级科目, 如 TAC)
    #[serde(default)]
    pub block_units_min: Option<u32>,

    /// 空域偏好顺序 (未列出的空域池作为溢出依次追加)
    #[serde(default)]
    pub preferred_airspace: Vec<AirspaceId>,

    /// 争用偏好: 时间重叠航班中出现触发科目时改用该顺序
    #[serde(default)]
    pub contested_preference: Option<ContestedPreference>,

    #[serde(default)]
    pub needs_tacan: bool,

    /// 所需 TACAN 频道对数量
    #[serde(default)]
    pub tacan_pairs: u32,

    /// 频道对必须连续 (DTF)
    #[serde(default)]
    pub tacan_sequential: bool,

    /// 所需辅助频率数量 (0-2)
    #[serde(default)]
    pub needs_cm: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContestedPreference {
    pub trigger_event_types: Vec<String>,
    pub preferred_airspace: Vec<AirspaceId>,
}

impl EventTypeRule {
    /// 不占用任何资源的科目
    pub fn ground() -> Self {
        Self {
            block_units: 0,
            block_units_min: None,
            preferred_airspace: Vec::new(),
            contested_preference: None,
            needs_tacan: false,
            tacan_pairs: 0,
            tacan_sequential: false,
            needs_cm: 0,
        }
    }

    /// 需要空域 + 1 对 TACAN + 辅助频率的编队科目
    pub fn formation(block_units: u32, preferred: AirspaceId, needs_cm: u32) -> Self {
        Self {
            block_units,
            preferred_airspace: vec![preferred],
            needs_tacan: true,
            tacan_pairs: 1,
            needs_cm,
            ..Self::ground()
        }
    }

    /// 尝试的块单位序列: 理想值, 然后是 (若可降级) 最小值
    pub fn block_unit_options(&self) -> Vec<u32> {
        match self.block_units_min {
            Some(min) if min > 0 && min < self.block_units => vec![self.block_units, min],
            _ => vec![self.block_units],
        }
    }

    /// 报告用的最低需求
    pub fn minimum_block_units(&self) -> u32 {
        self.block_unit_options()
            .last()
            .copied()
            .unwrap_or(self.block_units)
    }

    pub fn needs_sequential_pairs(&self) -> bool {
        self.tacan_sequential && self.tacan_pairs == 2
    }
}

// ==========================================
// AirspacePool - 空域池
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirspacePool {
    pub label: String,
    pub block_units: u32,
    pub physical_blocks: Vec<String>,
    /// 物理块全部占用时的溢出标签 (None 时回退为第一个物理块)
    #[serde(default)]
    pub overflow_block: Option<String>,
}

// ==========================================
// TacanPreset - 专用 TACAN 频道对
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TacanPreset {
    pub base: u32,
    pub paired: u32,
    #[serde(default)]
    pub preset_name: Option<String>,
    #[serde(default)]
    pub preset_freq: Option<Frequency>,
}

// ==========================================
// ResourceConfig - 资源配置表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// 中队呼号前缀
    pub squadron_prefix: String,

    /// 科目规则 (key: 科目类别代码)
    pub event_types: BTreeMap<String, EventTypeRule>,

    pub airspace_pools: BTreeMap<AirspaceId, AirspacePool>,

    /// 专用 TACAN 频道对 (按优先级)
    pub dedicated_tacan: Vec<TacanPreset>,

    /// 保留频道 (不得用作临时分配的基频道)
    pub reserved_channels: Vec<u32>,

    /// 配对频道偏移 (paired = base + offset), 同时为临时基频道上限
    pub tacan_pair_offset: u32,

    pub tacan_max_channel: u32,

    /// 辅助频率池 (按声明顺序分配)
    pub cm_pool: Vec<Frequency>,

    /// 不需要空域的完整科目代码前缀
    #[serde(default)]
    pub no_airspace_prefixes: Vec<String>,

    /// 重叠容差 (分钟)
    #[serde(default = "default_overlap_buffer")]
    pub overlap_buffer_minutes: i32,

    /// 长机标记 (决定编队代表科目)
    #[serde(default)]
    pub lead_markers: Vec<String>,

    /// 角色标记 (科目代码第二轮识别)
    #[serde(default)]
    pub role_markers: Vec<String>,

    /// 备注关键字 (按该顺序输出)
    #[serde(default)]
    pub remark_keywords: Vec<String>,

    /// 备注扫描窗口 (字符数)
    #[serde(default = "default_remark_window")]
    pub remark_window_chars: usize,

    /// 排班文档地址模板 ({date} -> YYYY-MM-DD)
    #[serde(default)]
    pub schedule_url_template: Option<String>,
}

fn default_overlap_buffer() -> i32 {
    15
}

fn default_remark_window() -> usize {
    40
}

impl ResourceConfig {
    pub fn rule(&self, event_type: &str) -> Option<&EventTypeRule> {
        self.event_types.get(event_type)
    }

    pub fn pool(&self, airspace: AirspaceId) -> Option<&AirspacePool> {
        self.airspace_pools.get(&airspace)
    }

    pub fn is_reserved(&self, channel: u32) -> bool {
        self.reserved_channels.contains(&channel)
    }

    /// 完整科目代码是否属于免空域族 (如 TR43xx / TR44xx)
    pub fn is_no_airspace_event(&self, full_event_code: &str) -> bool {
        let code = full_event_code.to_uppercase();
        self.no_airspace_prefixes
            .iter()
            .any(|prefix| code.starts_with(prefix.as_str()))
    }

    pub fn event_codes(&self) -> impl Iterator<Item = &str> {
        self.event_types.keys().map(String::as_str)
    }

    /// 按日期生成排班文档地址
    pub fn schedule_url(&self, date: NaiveDate) -> Option<String> {
        self.schedule_url_template
            .as_ref()
            .map(|template| template.replace("{date}", &date.format("%Y-%m-%d").to_string()))
    }

    // ==========================================
    // 配置校验
    // ==========================================

    /// 校验配置自洽性
    pub fn validate(&self) -> ConfigResult<()> {
        if self.squadron_prefix.trim().is_empty()
            || !self.squadron_prefix.chars().all(|c| c.is_ascii_alphabetic())
        {
            return Err(invalid("squadron_prefix", "呼号前缀必须为非空字母串"));
        }

        if self.overlap_buffer_minutes < 0 {
            return Err(invalid("overlap_buffer_minutes", "重叠容差不能为负数"));
        }

        for (id, pool) in &self.airspace_pools {
            if pool.block_units == 0 {
                return Err(invalid(
                    "airspace_pools",
                    &format!("空域池 {} 容量为 0", id),
                ));
            }
        }

        for (code, rule) in &self.event_types {
            if code.is_empty() || code.chars().any(|c| c.is_whitespace()) {
                return Err(invalid("event_types", &format!("非法科目代码: '{}'", code)));
            }
            if let Some(min) = rule.block_units_min {
                if min > rule.block_units {
                    return Err(invalid(
                        "event_types",
                        &format!("{}: block_units_min ({}) > block_units ({})", code, min, rule.block_units),
                    ));
                }
            }
            let contested = rule
                .contested_preference
                .iter()
                .flat_map(|c| c.preferred_airspace.iter());
            for airspace in rule.preferred_airspace.iter().chain(contested) {
                if !self.airspace_pools.contains_key(airspace) {
                    return Err(invalid(
                        "event_types",
                        &format!("{}: 偏好空域 {} 未配置", code, airspace),
                    ));
                }
            }
        }

        if self.tacan_pair_offset == 0 || self.tacan_pair_offset >= self.tacan_max_channel {
            return Err(invalid(
                "tacan_pair_offset",
                &format!(
                    "配对偏移 {} 必须在 (0, {}) 之间",
                    self.tacan_pair_offset, self.tacan_max_channel
                ),
            ));
        }

        let mut seen_bases = HashSet::new();
        for preset in &self.dedicated_tacan {
            if preset.base == 0
                || preset.base > self.tacan_max_channel
                || preset.paired > self.tacan_max_channel
            {
                return Err(invalid(
                    "dedicated_tacan",
                    &format!("频道对 {}/{} 超出范围", preset.base, preset.paired),
                ));
            }
            if !seen_bases.insert(preset.base) {
                return Err(invalid(
                    "dedicated_tacan",
                    &format!("基频道 {} 重复", preset.base),
                ));
            }
        }

        let mut seen_cms = HashSet::new();
        for cm in &self.cm_pool {
            if !seen_cms.insert(*cm) {
                return Err(invalid("cm_pool", &format!("辅助频率 {} 重复", cm)));
            }
        }

        Ok(())
    }
}

fn invalid(field: &str, message: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.to_string(),
    }
}

// ==========================================
// 内置中队配置
// ==========================================
impl Default for ResourceConfig {
    fn default() -> Self {
        let mut event_types = BTreeMap::new();
        for code in ["IR", "AN", "SLL", "ON", "IPROF"] {
            event_types.insert(code.to_string(), EventTypeRule::ground());
        }
        event_types.insert(
            "TR".to_string(),
            EventTypeRule {
                block_units: 1,
                preferred_airspace: vec![AirspaceId::Area4],
                ..EventTypeRule::ground()
            },
        );
        event_types.insert("FRM".to_string(), EventTypeRule::formation(1, AirspaceId::Area4, 1));
        event_types.insert("DIV".to_string(), EventTypeRule::formation(2, AirspaceId::Area4, 1));
        event_types.insert("OCF".to_string(), EventTypeRule::formation(1, AirspaceId::Area4, 1));
        event_types.insert("BITS".to_string(), EventTypeRule::formation(1, AirspaceId::Area4, 1));
        event_types.insert("BFM".to_string(), EventTypeRule::formation(2, AirspaceId::Moa2, 1));
        event_types.insert("FTX".to_string(), EventTypeRule::formation(2, AirspaceId::Moa2, 1));
        event_types.insert("SEM".to_string(), EventTypeRule::formation(2, AirspaceId::Moa2, 1));
        event_types.insert(
            "DTF".to_string(),
            EventTypeRule {
                tacan_pairs: 2,
                tacan_sequential: true,
                ..EventTypeRule::formation(2, AirspaceId::Moa2, 2)
            },
        );
        // TAC: 默认优先 MOA 2, 与 BFM/FTX 时间重叠时让出 MOA 2
        event_types.insert(
            "TAC".to_string(),
            EventTypeRule {
                block_units_min: Some(1),
                preferred_airspace: vec![AirspaceId::Moa2, AirspaceId::Area4],
                contested_preference: Some(ContestedPreference {
                    trigger_event_types: vec!["BFM".to_string(), "FTX".to_string()],
                    preferred_airspace: vec![AirspaceId::Area4, AirspaceId::Moa2],
                }),
                ..EventTypeRule::formation(2, AirspaceId::Moa2, 1)
            },
        );

        let mut airspace_pools = BTreeMap::new();
        airspace_pools.insert(
            AirspaceId::Area4,
            AirspacePool {
                label: "Area 4".to_string(),
                block_units: 4,
                physical_blocks: ["A4-1", "A4-2", "A4-3", "A4-4"].map(String::from).to_vec(),
                overflow_block: None,
            },
        );
        // MOA 2: 每个物理块 = 2 单位, 极端情况三分
        airspace_pools.insert(
            AirspaceId::Moa2,
            AirspacePool {
                label: "MOA 2".to_string(),
                block_units: 4,
                physical_blocks: ["MOA2-A", "MOA2-B"].map(String::from).to_vec(),
                overflow_block: Some("MOA2-C".to_string()),
            },
        );

        let dedicated_tacan = [
            (17, 80, "TAC17", 265_900),
            (18, 81, "TAC18", 261_350),
            (19, 82, "TAC19", 264_350),
            (20, 83, "TAC20", 271_700),
            (21, 84, "TAC21", 225_800),
        ]
        .into_iter()
        .map(|(base, paired, name, khz)| TacanPreset {
            base,
            paired,
            preset_name: Some(name.to_string()),
            preset_freq: Some(Frequency::from_khz(khz)),
        })
        .collect();

        let cm_pool = [
            234_500, 246_700, 246_800, 246_900, 299_500, 300_600, 303_000, 333_300, 333_550,
            357_000,
        ]
        .into_iter()
        .map(Frequency::from_khz)
        .collect();

        Self {
            squadron_prefix: "BT".to_string(),
            event_types,
            airspace_pools,
            dedicated_tacan,
            reserved_channels: vec![22, 23, 24, 25, 26],
            tacan_pair_offset: 63,
            tacan_max_channel: 126,
            cm_pool,
            no_airspace_prefixes: vec!["TR43".to_string(), "TR44".to_string()],
            overlap_buffer_minutes: default_overlap_buffer(),
            lead_markers: vec!["LEAD".to_string()],
            role_markers: vec!["LEAD".to_string(), "PLAT".to_string()],
            remark_keywords: ["RTB", "O/I", "MB", "CRM-F", "CS/HS", "HP/HS", "HS/SD", "HS"]
                .map(String::from)
                .to_vec(),
            remark_window_chars: default_remark_window(),
            schedule_url_template: Some(
                "https://www.cnatra.navy.mil/scheds/TW1/SQ-VT-9/!{date}!VT-9!Frontpage.pdf"
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ResourceConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.event_types.len(), 15);
        assert_eq!(config.pool(AirspaceId::Area4).unwrap().block_units, 4);
        assert_eq!(config.dedicated_tacan[0].preset_name.as_deref(), Some("TAC17"));
    }

    #[test]
    fn test_block_unit_options() {
        let config = ResourceConfig::default();
        assert_eq!(config.rule("TAC").unwrap().block_unit_options(), vec![2, 1]);
        assert_eq!(config.rule("BFM").unwrap().block_unit_options(), vec![2]);
        assert_eq!(config.rule("TAC").unwrap().minimum_block_units(), 1);

        // min == 0 不视为可降级
        let rule = EventTypeRule {
            block_units_min: Some(0),
            ..EventTypeRule::formation(2, AirspaceId::Area4, 1)
        };
        assert_eq!(rule.block_unit_options(), vec![2]);
    }

    #[test]
    fn test_no_airspace_prefix() {
        let config = ResourceConfig::default();
        assert!(config.is_no_airspace_event("TR4301"));
        assert!(config.is_no_airspace_event("tr4412"));
        assert!(!config.is_no_airspace_event("TR4201"));
    }

    #[test]
    fn test_schedule_url() {
        let config = ResourceConfig::default();
        let url = config
            .schedule_url(NaiveDate::from_ymd_opt(2026, 3, 9).unwrap())
            .unwrap();
        assert_eq!(
            url,
            "https://www.cnatra.navy.mil/scheds/TW1/SQ-VT-9/!2026-03-09!VT-9!Frontpage.pdf"
        );
    }

    #[test]
    fn test_validate_rejects_min_above_ideal() {
        let mut config = ResourceConfig::default();
        config.event_types.get_mut("FRM").unwrap().block_units_min = Some(3);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_unknown_pool() {
        let mut config = ResourceConfig::default();
        config.airspace_pools.remove(&AirspaceId::Moa2);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_preset_beyond_max() {
        let mut config = ResourceConfig::default();
        config.dedicated_tacan[0].paired = 200;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_round_trip_keeps_pool_keys() {
        let config = ResourceConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"area4\""));
        let parsed: ResourceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
