// src/common/types.rs

use core::fmt;

use crate::common::error::FetchError;

/// 保留一位小数的读数，以 0.1 为单位存储整数
///
/// 温度和湿度都按一位小数比较和显示，用整数存储使阈值比较精确
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Tenths(i32);

impl Tenths {
    pub const fn from_tenths(tenths: i32) -> Self {
        Self(tenths)
    }

    pub const fn tenths(self) -> i32 {
        self.0
    }

    /// 解析十进制文本并舍入到一位小数
    ///
    /// 按解析后的二进制浮点值精确舍入，恰好居中时取偶数（"0.25" 得 0.2，"23.45" 得 23.4）
    pub fn parse_rounded(text: &str) -> Result<Self, FetchError> {
        let trimmed = text.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| FetchError::InvalidNumber(trimmed.into()))?;
        if !value.is_finite() {
            return Err(FetchError::InvalidNumber(trimmed.into()));
        }

        // "-3.2" -> "-32"，超出 i32 范围时解析失败
        format!("{:.1}", value)
            .replace('.', "")
            .parse()
            .map(Self)
            .map_err(|_| FetchError::InvalidNumber(trimmed.into()))
    }

    pub fn abs_diff(self, other: Self) -> u32 {
        self.0.abs_diff(other.0)
    }
}

impl fmt::Display for Tenths {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

/// 解析 CO2 浓度：在第一个小数点处截断后按整数解析
pub fn parse_ppm(text: &str) -> Result<i32, FetchError> {
    let trimmed = text.trim();
    let integer_part = trimmed.split('.').next().unwrap_or_default();
    integer_part
        .parse()
        .map_err(|_| FetchError::InvalidNumber(trimmed.into()))
}

/// 同一个 bucket 中的温湿度读数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClimateReading {
    pub temperature: Tenths,
    pub humidity: Tenths,
}

/// 一个周期内成功获取的全部读数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Readings {
    pub temperature: Tenths,
    pub humidity: Tenths,
    pub co2: i32,
}

impl Readings {
    pub fn new(climate: ClimateReading, co2: i32) -> Self {
        Self {
            temperature: climate.temperature,
            humidity: climate.humidity,
            co2,
        }
    }
}
