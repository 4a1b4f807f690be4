use crate::types::LyricLine;

/// 根据播放进度查找当前应高亮的歌词行。
///
/// 返回最后一个满足 `time <= current_time` 的行的索引；
/// 列表为空或播放进度早于第一行时返回 `None`。
///
/// `lines` 必须已按时间升序排列 (`lrc_parser::parse` 的输出满足这一点)。
/// 这里不会重新排序，传入未排序的列表时结果没有意义。
/// 每次调用都从头计算，因此向前或向后跳转进度都是安全的。
pub fn find_active_index(lines: &[LyricLine], current_time: f64) -> Option<usize> {
    // NaN 与任何时间比较都为 false，自然得到 None
    lines
        .partition_point(|line| line.time <= current_time)
        .checked_sub(1)
}

/// 将 `find_active_index` 的结果转换为宿主侧使用的哨兵值，没有活动行时为 `-1`。
pub fn active_index_or_sentinel(index: Option<usize>) -> i64 {
    index.map_or(-1, |i| i as i64)
}
