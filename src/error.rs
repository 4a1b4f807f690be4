use thiserror::Error;

/// 解析核心本身不会失败，这里只覆盖外围的文件读写、配置和输出。
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON 序列化错误: {0}")]
    Json(#[from] serde_json::Error),

    #[error("配置错误: {0}")]
    Config(String),

    #[error("日志初始化失败: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error("无效的参数: {0}")]
    InvalidArgument(String),
}

impl From<ini::Error> for SyncError {
    fn from(err: ini::Error) -> Self {
        match err {
            ini::Error::Io(io_err) => Self::Io(io_err),
            ini::Error::Parse(parse_err) => Self::Config(parse_err.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
