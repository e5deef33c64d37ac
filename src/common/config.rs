// src/common/config.rs
use embassy_time::Duration;
use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;

use crate::common::error::{AppError, Result};

pub struct LayoutConfig;

impl LayoutConfig {
    pub const DISPLAY_WIDTH: u32 = 296;
    pub const DISPLAY_HEIGHT: u32 = 128;

    // 区域定义
    pub const DATE_REGION: Rectangle = Rectangle::new(Point::new(40, 0), Size::new(256, 20));

    pub const TEMPERATURE_REGION: Rectangle =
        Rectangle::new(Point::new(190, 23), Size::new(106, 27));

    pub const HUMIDITY_REGION: Rectangle =
        Rectangle::new(Point::new(190, 60), Size::new(106, 27));

    pub const CO2_REGION: Rectangle = Rectangle::new(Point::new(190, 100), Size::new(106, 27));

    // 文本锚点
    pub const DATE_ANCHOR: Point = Point::new(60, 3);
    pub const TEMPERATURE_ANCHOR: Point = Point::new(205, 36);
    pub const HUMIDITY_ANCHOR: Point = Point::new(203, 73);
    pub const CO2_ANCHOR: Point = Point::new(204, 113);

    pub const TEMPERATURE_LABEL_ANCHOR: Point = Point::new(7, 36);
    pub const HUMIDITY_LABEL_ANCHOR: Point = Point::new(7, 73);
    pub const CO2_LABEL_ANCHOR: Point = Point::new(7, 113);

    // 分隔线
    pub const SEPARATOR_LINES: [(Point, Point); 2] = [
        (Point::new(5, 54), Point::new(286, 54)),
        (Point::new(5, 93), Point::new(286, 93)),
    ];

    // 错误信息
    pub const ERROR_ANCHOR: Point = Point::new(7, 25);
    pub const ERROR_WRAP_WIDTH: u32 = Self::DISPLAY_WIDTH - 20;
}

/// InfluxDB 连接配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfluxConfig {
    pub url: &'static str,
    pub org: &'static str,
    pub token: &'static str,
    pub bucket: &'static str,
    pub bucket_co2: &'static str,
}

/// WiFi 配置，SSID 为空表示由宿主系统管理网络
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WifiConfig {
    pub ssid: &'static str,
    pub psk: &'static str,
    pub country: &'static str,
    pub interface: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemConfig {
    pub influx: InfluxConfig,
    pub wifi: WifiConfig,
    /// 两次轮询之间的间隔
    pub poll_interval: Duration,
    /// 错误信息在屏幕上停留的时间
    pub error_backoff: Duration,
    /// 时间戳相对 UTC 的小时偏移
    pub utc_offset_hours: i8,
    pub snapshot_path: &'static str,
}

impl SystemConfig {
    /// 读取编译期注入的配置（见 build.rs）并校验
    pub fn load() -> Result<Self> {
        let config = Self {
            influx: InfluxConfig {
                url: option_env!("INFLUXDB_URL").unwrap_or("http://localhost:8086"),
                org: option_env!("INFLUXDB_ORG").unwrap_or(""),
                token: option_env!("INFLUXDB_TOKEN").unwrap_or(""),
                bucket: option_env!("INFLUXDB_BUCKET").unwrap_or("climate"),
                bucket_co2: option_env!("INFLUXDB_BUCKET_CO2").unwrap_or("co2"),
            },
            wifi: WifiConfig {
                ssid: option_env!("WIFI_SSID").unwrap_or(""),
                psk: option_env!("WIFI_PSK").unwrap_or(""),
                country: option_env!("WIFI_COUNTRY").unwrap_or("GB"),
                interface: option_env!("WIFI_INTERFACE").unwrap_or("wlan0"),
            },
            poll_interval: Duration::from_secs(parse_number(
                option_env!("POLL_INTERVAL_SECS"),
                30,
                "POLL_INTERVAL_SECS must be a whole number of seconds",
            )?),
            error_backoff: Duration::from_secs(parse_number(
                option_env!("ERROR_BACKOFF_SECS"),
                20,
                "ERROR_BACKOFF_SECS must be a whole number of seconds",
            )?),
            utc_offset_hours: parse_number(
                option_env!("UTC_OFFSET_HOURS"),
                1,
                "UTC_OFFSET_HOURS must be between -25 and 25",
            )?,
            snapshot_path: option_env!("SNAPSHOT_PATH").unwrap_or("epd_climate.pbm"),
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.influx.url.is_empty() {
            return Err(AppError::ConfigError("INFLUXDB_URL is empty"));
        }
        if self.influx.bucket.is_empty() || self.influx.bucket_co2.is_empty() {
            return Err(AppError::ConfigError("bucket names must not be empty"));
        }
        if !(-25..=25).contains(&self.utc_offset_hours) {
            return Err(AppError::ConfigError(
                "UTC_OFFSET_HOURS must be between -25 and 25",
            ));
        }
        Ok(())
    }
}

fn parse_number<T: core::str::FromStr>(
    value: Option<&str>,
    default: T,
    message: &'static str,
) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            log::error!("Invalid configuration value {:?}: {}", raw, message);
            AppError::ConfigError(message)
        }),
    }
}
