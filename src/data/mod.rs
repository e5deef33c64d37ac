// src/data/mod.rs

//! 数据层：从 InfluxDB 获取读数，并判断哪些读数需要重绘
pub mod change_detector;
pub mod fetcher;

pub use change_detector::{RedrawPlan, RenderState, Thresholds};
pub use fetcher::InfluxFetcher;
