// src/common/error.rs
use thiserror::Error;

/// 数据获取错误
///
/// 解析失败（行列缺失、数值非法）同样归入此类，由抓取边界统一返回
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response: no field {column_from_end} from the end in row {row}")]
    MalformedResponse { row: usize, column_from_end: usize },

    #[error("Invalid number: {0:?}")]
    InvalidNumber(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    #[error("Network connection failed: {0}")]
    Connectivity(String),

    #[error("Time synchronization failed: {0}")]
    TimeSync(String),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Display initialization failed")]
    DisplayInit,

    #[error("Display update failed")]
    DisplayUpdateFailed,

    #[error("Display sleep failed")]
    DisplaySleepFailed,

    #[error("Rendering failed")]
    RenderingFailed,

    #[error("Configuration error: {0}")]
    ConfigError(&'static str),
}

impl AppError {
    /// 错误类别名称，显示在错误屏幕的 "Error Type" 一行
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Connectivity(_) => "ConnectivityError",
            AppError::TimeSync(_) => "TimeSyncError",
            AppError::Fetch(_) => "FetchError",
            AppError::DisplayInit
            | AppError::DisplayUpdateFailed
            | AppError::DisplaySleepFailed
            | AppError::RenderingFailed => "RenderError",
            AppError::ConfigError(_) => "ConfigError",
        }
    }
}

pub type Result<T> = core::result::Result<T, AppError>;
