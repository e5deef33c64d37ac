//! 墨水屏室内气候显示
//!
//! 定时从 InfluxDB 读取温度、湿度和 CO2 浓度，
//! 只在读数变化超过阈值时局部刷新 296x128 的墨水屏

pub mod common;
pub mod data;
pub mod driver;
pub mod graphics;
pub mod render;
pub mod tasks;
