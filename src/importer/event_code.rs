// ==========================================
// 飞行排班消冲系统 - 科目代码识别表
// ==========================================
// 最长前缀匹配: "BITS4101" 命中 BITS 而非更短的同前缀代码
// 构建一次, 提取过程中只读
// ==========================================

use crate::config::ResourceConfig;

/// 识别出的科目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventMatch {
    pub event_type: String,
    pub full_code: String,
}

#[derive(Debug, Clone)]
pub struct EventCodeTable {
    // 按长度降序, 同长度按字母序
    codes: Vec<String>,
}

impl EventCodeTable {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut codes: Vec<String> = codes
            .into_iter()
            .map(|c| c.as_ref().trim().to_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        codes.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        codes.dedup();
        Self { codes }
    }

    pub fn from_config(config: &ResourceConfig) -> Self {
        Self::new(config.event_codes())
    }

    /// 以已知科目代码为前缀时返回最长的那个
    pub fn lookup(&self, token: &str) -> Option<&str> {
        let cleaned = token.trim().to_uppercase();
        self.codes
            .iter()
            .find(|code| cleaned.starts_with(code.as_str()))
            .map(String::as_str)
    }

    /// 从中间字段中识别科目
    ///
    /// 第一轮: 首个以科目代码开头的词, 完整代码即该词
    /// 第二轮: 紧跟角色标记 (LEAD/PLAT) 的词, 去除标点后匹配,
    ///         完整代码为 "<词> <标记>"
    pub fn find_event(&self, middle: &str, role_markers: &[String]) -> Option<EventMatch> {
        let tokens: Vec<&str> = middle.split_whitespace().collect();

        for token in &tokens {
            if let Some(code) = self.lookup(token) {
                return Some(EventMatch {
                    event_type: code.to_string(),
                    full_code: token.to_uppercase(),
                });
            }
        }

        for pair in tokens.windows(2) {
            let marker = pair[1].to_uppercase();
            if !role_markers.iter().any(|m| m.eq_ignore_ascii_case(&marker)) {
                continue;
            }
            let stripped = pair[0].trim_matches(|c: char| !c.is_ascii_alphanumeric());
            if let Some(code) = self.lookup(stripped) {
                return Some(EventMatch {
                    event_type: code.to_string(),
                    full_code: format!("{} {}", stripped.to_uppercase(), marker),
                });
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
