// src/data/change_detector.rs
use crate::common::types::{Readings, Tenths};

/// 各读数的重绘阈值，差值严格大于阈值才重绘
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// 温度阈值，单位 0.1°C
    pub temperature: u32,
    /// 湿度阈值，单位 0.1%
    pub humidity: u32,
    /// CO2 阈值，单位 ppm
    pub co2: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            temperature: 3,
            humidity: 20,
            co2: 50,
        }
    }
}

/// 每个读数是否需要重绘
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RedrawPlan {
    pub temperature: bool,
    pub humidity: bool,
    pub co2: bool,
}

impl RedrawPlan {
    pub const fn any(&self) -> bool {
        self.temperature || self.humidity || self.co2
    }

    /// 日期时间区域跟随任意读数一起重绘
    pub const fn date(&self) -> bool {
        self.any()
    }
}

/// 上一次绘制到屏幕上的读数，`None` 表示尚未绘制
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderState {
    pub temperature: Option<Tenths>,
    pub humidity: Option<Tenths>,
    pub co2: Option<i32>,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            temperature: None,
            humidity: None,
            co2: None,
        }
    }

    /// 比较新读数和已绘制的读数，决定哪些区域需要重绘
    pub fn detect(&self, readings: &Readings, thresholds: &Thresholds) -> RedrawPlan {
        RedrawPlan {
            temperature: self
                .temperature
                .is_none_or(|last| last.abs_diff(readings.temperature) > thresholds.temperature),
            humidity: self
                .humidity
                .is_none_or(|last| last.abs_diff(readings.humidity) > thresholds.humidity),
            co2: self
                .co2
                .is_none_or(|last| last.abs_diff(readings.co2) > thresholds.co2),
        }
    }

    /// 只记录实际重绘过的读数
    pub fn commit(&mut self, readings: &Readings, plan: &RedrawPlan) {
        if plan.temperature {
            self.temperature = Some(readings.temperature);
        }
        if plan.humidity {
            self.humidity = Some(readings.humidity);
        }
        if plan.co2 {
            self.co2 = Some(readings.co2);
        }
    }
}
