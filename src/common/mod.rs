// src/common/mod.rs

/// 公共模块定义
///
/// 配置、错误类型以及读数类型
pub mod config;
pub mod error;
pub mod types;

pub use types::{ClimateReading, Readings, Tenths};
