// ==========================================
// 飞行排班消冲系统 - 呼号规范化与展开
// ==========================================
// "BT 3 2"        -> ["BT32"]
// "BT21/22"       -> ["BT21", "BT22"]
// "BT81/82/83/84" -> ["BT81", "BT82", "BT83", "BT84"]
// "BT21/2"        -> ["BT21", "BT22"]
// ==========================================

/// 去除呼号中的所有空白
pub fn normalize_callsign(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// 展开组合呼号
///
/// 基础编队 = 前缀 + 编队号; 两位后缀独立成呼号 (前缀 + 后缀),
/// 一位后缀拼接在基础编队之后
pub fn expand_callsign(raw: &str, prefix: &str) -> Vec<String> {
    let normalized = normalize_callsign(raw);
    if !normalized.contains('/') {
        return vec![normalized];
    }

    let base_len = prefix.chars().count() + 1;
    let base: String = normalized.chars().take(base_len).collect();
    let remainder: String = normalized.chars().skip(base_len).collect();

    remainder
        .split('/')
        .filter(|suffix| !suffix.is_empty())
        .map(|suffix| {
            if suffix.chars().count() == 2 {
                format!("{}{}", prefix, suffix)
            } else {
                format!("{}{}", base, suffix)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_callsign("BT 3 2"), "BT32");
        assert_eq!(normalize_callsign("BT11"), "BT11");
    }

    #[test]
    fn test_expand_two_digit_suffixes() {
        assert_eq!(expand_callsign("BT21/22", "BT"), vec!["BT21", "BT22"]);
        assert_eq!(
            expand_callsign("BT81/82/83/84", "BT"),
            vec!["BT81", "BT82", "BT83", "BT84"]
        );
        assert_eq!(expand_callsign("BT 2 1 / 2 2", "BT"), vec!["BT21", "BT22"]);
    }

    #[test]
    fn test_expand_single_digit_suffix() {
        assert_eq!(expand_callsign("BT21/2", "BT"), vec!["BT21", "BT22"]);
    }

    #[test]
    fn test_expand_plain_callsign() {
        assert_eq!(expand_callsign("BT 5 1", "BT"), vec!["BT51"]);
    }

    #[test]
    fn test_expand_other_prefix() {
        assert_eq!(expand_callsign("RZ31/32", "RZ"), vec!["RZ31", "RZ32"]);
    }
}
