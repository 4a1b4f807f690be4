use crate::app_settings::LogSettings;
use crate::error::Result;
use chrono::Local;
use directories::ProjectDirs;
use fern::Dispatch;
use log::LevelFilter;
use std::fs;
use std::path::PathBuf;

const LOG_FILE_NAME: &str = "lyric_sync.log";

fn get_log_file_path() -> std::result::Result<PathBuf, String> {
    if let Some(proj_dirs) = ProjectDirs::from("com", "LyricSync", "LyricSync") {
        let log_dir = proj_dirs.data_local_dir();
        if !log_dir.exists() {
            fs::create_dir_all(log_dir)
                .map_err(|e| format!("无法创建日志目录 {log_dir:?}: {e}"))?;
        }
        Ok(log_dir.join(LOG_FILE_NAME))
    } else {
        Ok(PathBuf::from(LOG_FILE_NAME))
    }
}

fn format_record(
    out: fern::FormatCallback<'_>,
    message: &std::fmt::Arguments<'_>,
    record: &log::Record<'_>,
) {
    out.finish(format_args!(
        "[{}][{}][{}] {}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
        record.level(),
        record.target(),
        message
    ));
}

/// 初始化全局日志记录器。控制台输出到 stderr，文件日志按设置启用。
///
/// 全局记录器只能设置一次，重复调用会返回错误。
pub fn init_global_logger(settings: &LogSettings) -> Result<()> {
    let console_dispatch = Dispatch::new()
        .level(settings.console_log_level)
        .chain(std::io::stderr());

    let mut final_dispatch = Dispatch::new()
        .format(format_record)
        .level(max_level(settings))
        .chain(console_dispatch);

    let mut file_log_path = None;
    if settings.enable_file_log {
        match get_log_file_path().and_then(|path| {
            fern::log_file(&path)
                .map(|file| (path.clone(), file))
                .map_err(|e| format!("无法打开日志文件 {path:?}: {e}"))
        }) {
            Ok((path, log_file)) => {
                final_dispatch = final_dispatch.chain(
                    Dispatch::new()
                        .level(settings.file_log_level)
                        .chain(log_file),
                );
                file_log_path = Some(path);
            }
            Err(e) => eprintln!("{e}。文件日志将被禁用。"),
        }
    }

    final_dispatch.apply()?;
    match file_log_path {
        Some(path) => log::debug!("日志记录器已初始化。日志路径: {path:?}"),
        None => log::debug!("日志记录器已初始化 (未启用文件日志)。"),
    }
    Ok(())
}

/// 顶层 dispatch 的级别取控制台和文件中更详细的一方。
fn max_level(settings: &LogSettings) -> LevelFilter {
    if settings.enable_file_log {
        settings.console_log_level.max(settings.file_log_level)
    } else {
        settings.console_log_level
    }
}
