//! # lyric_sync
//!
//! 解析 LRC 歌词（可附带 `[翻译]` 段落），按最近时间戳对齐翻译，
//! 并根据播放进度找出当前歌词行。
//!
//! ```
//! let lines = lyric_sync::parse("[00:01.00]Hello\n[翻译]\n[00:01.20]你好");
//! assert_eq!(lines[0].translation.as_deref(), Some("你好"));
//! assert_eq!(lyric_sync::find_active_index(&lines, 1.5), Some(0));
//! ```

pub mod active_line;
pub mod app_settings;
pub mod error;
pub mod logger;
pub mod lrc_parser;
pub mod lyrics_merger;
pub mod types;

pub use active_line::{active_index_or_sentinel, find_active_index};
pub use error::{Result, SyncError};
pub use lrc_parser::{parse, parse_with_options};
pub use types::{LyricLine, SyncOptions, TRANSLATION_TOLERANCE_SECS, TimedLine};
