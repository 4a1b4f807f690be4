//! 命令行工具：解析 LRC 文件并输出 JSON，或查询某一时刻的活动歌词行。
//!
//! ```bash
//! lyric_sync parse song.lrc
//! lyric_sync active song.lrc --at 12.5 --show
//! cat song.lrc | lyric_sync --tolerance 0.3 parse -
//! ```

use clap::{Parser, Subcommand};
use lyric_sync::app_settings::{AppSettings, parse_tolerance};
use lyric_sync::{LyricLine, Result, SyncError, logger};
use log::LevelFilter;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "lyric_sync", version, about = "LRC 歌词解析与同步")]
struct Cli {
    /// 配置文件路径，默认使用系统数据目录下的 lyric_sync.ini
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// 覆盖配置中的翻译对齐容差 (秒)
    #[arg(long, global = true, value_parser = parse_tolerance_arg)]
    tolerance: Option<f64>,

    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// 解析歌词并以 JSON 输出
    Parse {
        /// LRC 文件路径，"-" 表示标准输入
        input: PathBuf,
    },
    /// 输出指定播放进度下的活动行索引，没有时为 -1
    Active {
        input: PathBuf,

        /// 播放进度 (秒)
        #[arg(long, allow_negative_numbers = true)]
        at: f64,

        /// 同时输出该行的文本和翻译
        #[arg(long)]
        show: bool,
    },
}

fn parse_tolerance_arg(value: &str) -> std::result::Result<f64, String> {
    parse_tolerance(value).map_err(|e| e.to_string())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("错误: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => AppSettings::load_or_create(path),
        None => AppSettings::load(),
    };
    if cli.verbose {
        settings.log_settings.console_log_level = LevelFilter::Debug;
    }
    if let Some(tolerance) = cli.tolerance {
        settings.sync_settings.translation_tolerance_secs = tolerance;
    }

    if let Err(e) = logger::init_global_logger(&settings.log_settings) {
        eprintln!("日志记录器初始化失败: {e}");
    }

    let options = settings.sync_options();
    match cli.command {
        Commands::Parse { input } => {
            let lines = lyric_sync::parse_with_options(&read_input(&input)?, &options);
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &lines)?;
            writeln!(stdout)?;
        }
        Commands::Active { input, at, show } => {
            if at.is_nan() {
                return Err(SyncError::InvalidArgument("播放进度不能是 NaN".to_string()));
            }
            let lines = lyric_sync::parse_with_options(&read_input(&input)?, &options);
            let index = lyric_sync::find_active_index(&lines, at);
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{}", lyric_sync::active_index_or_sentinel(index))?;
            if show && let Some(line) = index.and_then(|i| lines.get(i)) {
                write_line_detail(&mut stdout, line)?;
            }
        }
    }
    Ok(())
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut content = String::new();
        io::stdin().read_to_string(&mut content)?;
        Ok(content)
    } else {
        log::debug!("读取歌词文件 {path:?}");
        Ok(std::fs::read_to_string(path)?)
    }
}

fn write_line_detail(out: &mut impl Write, line: &LyricLine) -> io::Result<()> {
    writeln!(out, "{:.3}\t{}", line.time, line.text)?;
    if let Some(translation) = &line.translation {
        writeln!(out, "\t{translation}")?;
    }
    Ok(())
}
