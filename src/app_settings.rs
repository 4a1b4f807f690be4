use crate::error::{Result, SyncError};
use crate::types::{SyncOptions, TRANSLATION_TOLERANCE_SECS};
use directories::ProjectDirs;
use ini::Ini;
use log::LevelFilter;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

const LOGGING_SECTION: &str = "Logging";
const SYNC_SECTION: &str = "Sync";
const CONFIG_FILE_NAME: &str = "lyric_sync.ini";

#[derive(Debug, Clone, PartialEq)]
pub struct LogSettings {
    pub enable_file_log: bool,
    pub file_log_level: LevelFilter,
    pub console_log_level: LevelFilter,
}

impl Default for LogSettings {
    fn default() -> Self {
        LogSettings {
            enable_file_log: false,
            file_log_level: LevelFilter::Info,
            console_log_level: LevelFilter::Warn,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncSettings {
    pub translation_tolerance_secs: f64,
}

impl Default for SyncSettings {
    fn default() -> Self {
        SyncSettings {
            translation_tolerance_secs: TRANSLATION_TOLERANCE_SECS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppSettings {
    pub log_settings: LogSettings,
    pub sync_settings: SyncSettings,
}

impl AppSettings {
    /// 默认配置文件路径，位于系统的本地数据目录下。
    pub fn config_path() -> Option<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "LyricSync", "LyricSync") {
            let config_dir = proj_dirs.data_local_dir();
            if !config_dir.exists()
                && let Err(e) = fs::create_dir_all(config_dir)
            {
                log::error!("无法创建配置目录 {config_dir:?}: {e}");
                return None;
            }
            Some(config_dir.join(CONFIG_FILE_NAME))
        } else {
            log::error!("无法获取项目配置目录路径。");
            None
        }
    }

    /// 从默认路径加载配置，任何失败都退回默认配置。
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_create(&path),
            None => {
                log::warn!("无法确定配置文件路径。将使用运行时默认配置。");
                AppSettings::default()
            }
        }
    }

    /// 加载指定路径的配置；文件不存在时写入一份默认配置。
    pub fn load_or_create(path: &Path) -> Self {
        if !path.exists() {
            log::info!("配置文件 {path:?} 未找到。将创建并使用默认配置。");
            let default_settings = AppSettings::default();
            if let Err(e) = default_settings.save_to_path(path) {
                log::error!("无法保存初始默认配置文件到 {path:?}: {e}");
            }
            return default_settings;
        }

        match Self::load_from_path(path) {
            Ok(settings) => {
                log::info!("从 {path:?} 加载配置成功。");
                settings
            }
            Err(e) => {
                log::error!("加载配置文件 {path:?} 失败: {e}。将使用默认配置。");
                AppSettings::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let conf = Ini::load_from_file(path)?;
        Ok(Self::from_ini(&conf))
    }

    /// 逐项读取配置，缺失或无法解析的项使用默认值。
    pub fn from_ini(conf: &Ini) -> Self {
        let defaults = AppSettings::default();

        let log_section = conf.section(Some(LOGGING_SECTION));
        let log_settings = LogSettings {
            enable_file_log: log_section
                .and_then(|s| s.get("EnableFileLog"))
                .and_then(|s| s.trim().parse::<bool>().ok())
                .unwrap_or(defaults.log_settings.enable_file_log),
            file_log_level: log_section
                .and_then(|s| s.get("FileLogLevel"))
                .and_then(|s| LevelFilter::from_str(s.trim()).ok())
                .unwrap_or(defaults.log_settings.file_log_level),
            console_log_level: log_section
                .and_then(|s| s.get("ConsoleLogLevel"))
                .and_then(|s| LevelFilter::from_str(s.trim()).ok())
                .unwrap_or(defaults.log_settings.console_log_level),
        };

        let sync_section = conf.section(Some(SYNC_SECTION));
        let translation_tolerance_secs = match sync_section
            .and_then(|s| s.get("TranslationTolerance"))
            .map(|s| parse_tolerance(s.trim()))
        {
            Some(Ok(tolerance)) => tolerance,
            Some(Err(e)) => {
                log::warn!("{e}，将使用默认容差。");
                defaults.sync_settings.translation_tolerance_secs
            }
            None => defaults.sync_settings.translation_tolerance_secs,
        };

        AppSettings {
            log_settings,
            sync_settings: SyncSettings {
                translation_tolerance_secs,
            },
        }
    }

    pub fn to_ini(&self) -> Ini {
        let mut conf = Ini::new();
        conf.with_section(Some(LOGGING_SECTION))
            .set(
                "EnableFileLog",
                self.log_settings.enable_file_log.to_string(),
            )
            .set("FileLogLevel", self.log_settings.file_log_level.to_string())
            .set(
                "ConsoleLogLevel",
                self.log_settings.console_log_level.to_string(),
            );
        conf.with_section(Some(SYNC_SECTION)).set(
            "TranslationTolerance",
            self.sync_settings.translation_tolerance_secs.to_string(),
        );
        conf
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        self.to_ini().write_to_file(path)?;
        log::info!("配置已保存到 {path:?}。");
        Ok(())
    }

    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            translation_tolerance_secs: self.sync_settings.translation_tolerance_secs,
        }
    }
}

/// 解析容差秒数，必须是非负的有限数。
pub fn parse_tolerance(value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(tolerance) if tolerance.is_finite() && tolerance >= 0.0 => Ok(tolerance),
        _ => Err(SyncError::InvalidArgument(format!(
            "无效的翻译容差 '{value}'"
        ))),
    }
}
