use serde::{Deserialize, Serialize};

/// 翻译与主歌词对齐时允许的最大时间差 (秒)。
pub const TRANSLATION_TOLERANCE_SECS: f64 = 0.5;

/// 从一行带时间戳的原始文本中解析出的条目。
/// 主歌词段和翻译段都会先被解析成这种结构。
#[derive(Debug, Clone, PartialEq)]
pub struct TimedLine {
    pub time: f64,    // 开始时间 (秒)
    pub text: String, // 去掉时间戳并修剪后的文本，保证非空
}

/// 最终输出的歌词行：一条主歌词，附带至多一条匹配到的翻译。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LyricLine {
    pub time: f64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
}

impl LyricLine {
    pub fn has_translation(&self) -> bool {
        self.translation.is_some()
    }
}

/// 按段落标记 (`[翻译]` 等) 切分后的原始行。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LyricSections<'a> {
    pub primary: Vec<&'a str>,
    pub translation: Vec<&'a str>,
    pub marker_index: Option<usize>, // 标记行所在的行号 (从 0 开始)
}

impl LyricSections<'_> {
    pub fn has_translation_section(&self) -> bool {
        self.marker_index.is_some()
    }
}

/// 区分当前正在解析的是哪一段，翻译段需要额外过滤占位符。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Primary,
    Translation,
}

/// 解析选项。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncOptions {
    /// 翻译行与主歌词行之间可接受的最大时间差 (秒)。
    pub translation_tolerance_secs: f64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        SyncOptions {
            translation_tolerance_secs: TRANSLATION_TOLERANCE_SECS,
        }
    }
}
