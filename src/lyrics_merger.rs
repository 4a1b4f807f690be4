use crate::types::{LyricLine, TimedLine};
use log::{debug, trace};

/// 在已按时间排序的翻译列表中查找与 `time` 最接近的一行。
///
/// 只有时间差不超过 `tolerance_secs` 的行才会被接受；时间差相同时保留先出现的行。
/// 翻译行一旦超过 `time + tolerance_secs` 即停止扫描。
pub fn closest_translation(
    time: f64,
    translations: &[TimedLine],
    tolerance_secs: f64,
) -> Option<&TimedLine> {
    let mut best_match: Option<&TimedLine> = None;
    let mut smallest_diff = f64::INFINITY;

    for trans in translations {
        let diff = (trans.time - time).abs();
        if diff <= tolerance_secs && diff < smallest_diff {
            smallest_diff = diff;
            best_match = Some(trans);
        }
        if trans.time > time + tolerance_secs {
            break;
        }
    }
    best_match
}

/// 将翻译合并到主歌词。
///
/// 两个列表都必须已按时间升序排列。翻译行不会被“消耗”，
/// 同一行翻译可以同时匹配到多行主歌词。
pub fn merge_translations(
    primary: Vec<TimedLine>,
    translations: &[TimedLine],
    tolerance_secs: f64,
) -> Vec<LyricLine> {
    if translations.is_empty() {
        trace!("[LyricsMerger] 没有翻译行，跳过合并。");
    }

    let merged: Vec<LyricLine> = primary
        .into_iter()
        .map(|TimedLine { time, text }| LyricLine {
            time,
            text,
            translation: closest_translation(time, translations, tolerance_secs)
                .map(|trans| trans.text.clone()),
        })
        .collect();

    if !translations.is_empty() {
        let matched = merged.iter().filter(|line| line.has_translation()).count();
        debug!(
            "[LyricsMerger] 翻译合并完成: {}/{} 行主歌词匹配到翻译 (容差 {}s)",
            matched,
            merged.len(),
            tolerance_secs
        );
    }
    merged
}
