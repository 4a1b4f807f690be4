//! # LRC 歌词解析器
//!
//! 将带 `[mm:ss]` / `[mm:ss.fff]` 时间戳的文本解析为按时间排序的歌词行，
//! 并在存在 `[翻译]` 段落时把翻译按最近时间戳合并进主歌词。
//!
//! 解析是全函数：任何输入都不会报错，无法识别的行直接丢弃。

use crate::lyrics_merger::merge_translations;
use crate::types::{LyricLine, LyricSections, SegmentKind, SyncOptions, TimedLine};
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// 匹配一行中第一个时间戳，捕获分、秒和可选的 1~3 位小数部分
static LRC_TIMESTAMP_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[([0-9]{1,2}):([0-9]{1,2})(?:\.([0-9]{1,3}))?\]")
        .expect("未能编译 LRC_TIMESTAMP_REGEX")
});

/// 翻译段落的标记行。拉丁字母形式不区分大小写。
const TRANSLATION_MARKERS: [&str; 2] = ["[翻译]", "[翻譯]"];
const TRANSLATION_MARKER_LATIN: &str = "[translation]";

/// 翻译段中表示“无翻译”的占位符
const TRANSLATION_PLACEHOLDERS: [&str; 3] = ["/", "//", "///"];

/// 去除两端空白，同时去掉 UTF-8 BOM (U+FEFF)。
fn trim_lrc(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// 判断一行是否为翻译段落标记。
pub fn is_translation_marker(line: &str) -> bool {
    let trimmed = trim_lrc(line);
    TRANSLATION_MARKERS.contains(&trimmed) || trimmed.eq_ignore_ascii_case(TRANSLATION_MARKER_LATIN)
}

/// 按行切分原始文本，并以第一个翻译标记为界拆成主歌词段与翻译段。
/// 标记行本身不属于任何一段。
pub fn split_sections(raw: &str) -> LyricSections<'_> {
    let lines: Vec<&str> = raw.lines().collect();

    match lines.iter().position(|line| is_translation_marker(line)) {
        Some(marker_index) => LyricSections {
            primary: lines[..marker_index].to_vec(),
            translation: lines[marker_index + 1..].to_vec(),
            marker_index: Some(marker_index),
        },
        None => LyricSections {
            primary: lines,
            translation: Vec::new(),
            marker_index: None,
        },
    }
}

fn captures_to_secs(caps: &Captures<'_>) -> Option<f64> {
    let minutes: u32 = caps.get(1)?.as_str().parse().ok()?;
    let seconds: u32 = caps.get(2)?.as_str().parse().ok()?;
    // ".5" 表示 500 毫秒，".05" 表示 50 毫秒
    let milliseconds: u32 = match caps.get(3) {
        Some(fraction) => format!("{:0<3}", fraction.as_str()).parse().ok()?,
        None => 0,
    };
    Some(f64::from(minutes * 60 + seconds) + f64::from(milliseconds) / 1000.0)
}

/// 解析一行中出现的第一个时间戳，返回秒数。
pub fn parse_timestamp(line: &str) -> Option<f64> {
    LRC_TIMESTAMP_REGEX
        .captures(line)
        .and_then(|caps| captures_to_secs(&caps))
}

/// 解析单行歌词。
///
/// 只移除第一个时间戳，其余内容修剪空白后作为文本。
/// 没有时间戳或文本为空时返回 `None`。
pub fn parse_timed_line(line: &str) -> Option<TimedLine> {
    let caps = LRC_TIMESTAMP_REGEX.captures(line)?;
    let time = captures_to_secs(&caps)?;

    let text = LRC_TIMESTAMP_REGEX.replace(line, "");
    let text = trim_lrc(&text);
    if text.is_empty() {
        return None;
    }

    Some(TimedLine {
        time,
        text: text.to_string(),
    })
}

fn is_placeholder(text: &str) -> bool {
    TRANSLATION_PLACEHOLDERS.contains(&text)
}

/// 解析一个段落中的所有行，并按时间稳定排序。
pub fn parse_segment(lines: &[&str], kind: SegmentKind) -> Vec<TimedLine> {
    let mut parsed: Vec<TimedLine> = lines
        .iter()
        .filter_map(|line| {
            let timed = parse_timed_line(line);
            if timed.is_none() && !trim_lrc(line).is_empty() {
                trace!("[LrcParser] 跳过无时间戳或无文本的行: '{}'", trim_lrc(line));
            }
            timed
        })
        .filter(|timed| kind == SegmentKind::Primary || !is_placeholder(&timed.text))
        .collect();

    // sort_by 是稳定排序，同一时间的行保持原有顺序
    parsed.sort_by(|a, b| a.time.total_cmp(&b.time));
    parsed
}

/// 使用默认选项解析 LRC 文本。
pub fn parse(raw: &str) -> Vec<LyricLine> {
    parse_with_options(raw, &SyncOptions::default())
}

/// 解析 LRC 文本，翻译对齐使用 `options` 中的容差。
pub fn parse_with_options(raw: &str, options: &SyncOptions) -> Vec<LyricLine> {
    let sections = split_sections(raw);

    let primary = parse_segment(&sections.primary, SegmentKind::Primary);
    let translations = parse_segment(&sections.translation, SegmentKind::Translation);

    if sections.has_translation_section() {
        debug!(
            "[LrcParser] 解析完成: 主歌词 {} 行, 翻译 {} 行, 翻译标记位于第 {:?} 行",
            primary.len(),
            translations.len(),
            sections.marker_index
        );
    } else {
        debug!("[LrcParser] 解析完成: 主歌词 {} 行, 无翻译段落", primary.len());
    }

    merge_translations(primary, &translations, options.translation_tolerance_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    #[test]
    fn test_fraction_padding() {
        assert!((parse_timestamp("[01:02.5]").unwrap() - 62.5).abs() < EPSILON);
        assert!((parse_timestamp("[01:02.50]").unwrap() - 62.5).abs() < EPSILON);
        assert!((parse_timestamp("[01:02.500]").unwrap() - 62.5).abs() < EPSILON);
        assert!((parse_timestamp("[00:00.05]").unwrap() - 0.05).abs() < EPSILON);
        assert_eq!(parse_timestamp("[01:02]"), Some(62.0));
    }

    #[test]
    fn test_timestamp_rejects_malformed() {
        assert_eq!(parse_timestamp("no timestamp here"), None);
        assert_eq!(parse_timestamp("[100:00.00]"), None);
        assert_eq!(parse_timestamp("[ti:Song Title]"), None);
        assert_eq!(parse_timestamp("[01:02.1234]"), None);
    }

    #[test]
    fn test_parse_timed_line_strips_first_timestamp() {
        let line = parse_timed_line("  [00:12.34]  Hello world  ").unwrap();
        assert!((line.time - 12.34).abs() < EPSILON);
        assert_eq!(line.text, "Hello world");

        // 只移除第一个时间戳
        let line = parse_timed_line("[00:01.00][00:05.00]Repeat").unwrap();
        assert_eq!(line.time, 1.0);
        assert_eq!(line.text, "[00:05.00]Repeat");
    }

    #[test]
    fn test_parse_timed_line_drops_empty_text() {
        assert_eq!(parse_timed_line("[00:01.00]"), None);
        assert_eq!(parse_timed_line("[00:01.00]   "), None);
    }

    #[test]
    fn test_byte_order_mark_is_trimmed() {
        let lines = parse("\u{feff}[00:01.00]Hello\n[00:02.00]World");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].text, "Hello");

        assert!(is_translation_marker("\u{feff}[翻译]"));
        let lines = parse("[00:01.00]Hello\n\u{feff}[翻译]\n[00:01.20]你好");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[0].translation.as_deref(), Some("你好"));
    }

    #[test]
    fn test_translation_marker_variants() {
        assert!(is_translation_marker("[翻译]"));
        assert!(is_translation_marker("  [翻譯] "));
        assert!(is_translation_marker("[Translation]"));
        assert!(is_translation_marker("[TRANSLATION]"));
        assert!(!is_translation_marker("[翻译] extra"));
        assert!(!is_translation_marker("[00:01.00][翻译]"));
    }

    #[test]
    fn test_split_sections_without_marker() {
        let sections = split_sections("[00:01.00]a\r\n[00:02.00]b");
        assert_eq!(sections.primary, vec!["[00:01.00]a", "[00:02.00]b"]);
        assert!(sections.translation.is_empty());
        assert!(!sections.has_translation_section());
    }

    #[test]
    fn test_split_sections_uses_first_marker() {
        let sections = split_sections("[00:01.00]a\n[翻译]\n[00:01.00]甲\n[translation]\n[00:02.00]乙");
        assert_eq!(sections.primary, vec!["[00:01.00]a"]);
        assert_eq!(sections.marker_index, Some(1));
        assert!(sections.has_translation_section());
        assert_eq!(
            sections.translation,
            vec!["[00:01.00]甲", "[translation]", "[00:02.00]乙"]
        );
    }

    #[test]
    fn test_segment_is_stably_sorted() {
        let lines = ["[00:03.00]c", "[00:01.00]a1", "[00:02.00]b", "[00:01.00]a2"];
        let parsed = parse_segment(&lines, SegmentKind::Primary);
        let texts: Vec<&str> = parsed.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["a1", "a2", "b", "c"]);
    }

    #[test]
    fn test_placeholders_only_dropped_from_translation_segment() {
        let lines = ["[00:01.00]/", "[00:02.00]//", "[00:03.00] /// ", "[00:04.00]a/b"];
        let translations = parse_segment(&lines, SegmentKind::Translation);
        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].text, "a/b");

        let primary = parse_segment(&lines, SegmentKind::Primary);
        assert_eq!(primary.len(), 4);
    }

    #[test]
    fn test_parse_end_to_end() {
        let raw = "[00:01.00]Hello\n[00:02.00]World\n[翻译]\n[00:01.20]你好\n[00:02.60]世界";
        let lines = parse(raw);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].time, 1.0);
        assert_eq!(lines[0].text, "Hello");
        assert_eq!(lines[0].translation.as_deref(), Some("你好"));
        assert!(lines[0].has_translation());
        assert_eq!(lines[1].time, 2.0);
        assert_eq!(lines[1].text, "World");
        assert_eq!(lines[1].translation, None);
    }

    #[test]
    fn test_parse_garbage_yields_empty() {
        assert!(parse("").is_empty());
        assert!(parse("just some words\nno timestamps at all").is_empty());
        assert!(parse("[ti:Title]\n[ar:Artist]\n[翻译]").is_empty());
    }

    #[test]
    fn test_parse_is_idempotent_and_sorted() {
        let raw = "[00:05.00]e\n[00:01.00]a\n[00:03.5]c\n[translation]\n[00:03.40]丙\n[00:01.10]甲";
        let first = parse(raw);
        let second = parse(raw);
        assert_eq!(first, second);
        assert!(first.windows(2).all(|pair| pair[0].time <= pair[1].time));
        assert_eq!(first[0].translation.as_deref(), Some("甲"));
        assert_eq!(first[1].translation.as_deref(), Some("丙"));
        assert_eq!(first[2].translation, None);
    }

    #[test]
    fn test_parse_with_custom_tolerance() {
        let raw = "[00:10.00]Line\n[翻译]\n[00:10.60]行";
        assert_eq!(parse(raw)[0].translation, None);

        let options = SyncOptions {
            translation_tolerance_secs: 1.0,
        };
        let lines = parse_with_options(raw, &options);
        assert_eq!(lines[0].translation.as_deref(), Some("行"));
    }
}
