use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    mono_font::ascii::FONT_9X15,
    pixelcolor::BinaryColor,
    prelude::DrawTarget,
    text::Baseline,
};
use heapless::String;
use jiff::{Timestamp, tz::Offset};

use crate::{
    common::{
        config::LayoutConfig,
        error::{AppError, Result},
    },
    render::TextRenderer,
};

/// "DD/MM/YYYY : HH:MM:SS"
pub type DateTimeString = String<32>;

/// 把UTC时间戳按固定小时偏移格式化为本地时间文本
pub fn format_timestamp(timestamp: Timestamp, utc_offset_hours: i8) -> Result<DateTimeString> {
    let offset = Offset::from_hours(utc_offset_hours).map_err(|e| {
        log::error!("Invalid UTC offset {}: {}", utc_offset_hours, e);
        AppError::ConfigError("UTC_OFFSET_HOURS must be between -25 and 25")
    })?;
    let dt = offset.to_datetime(timestamp);

    let mut text = DateTimeString::new();
    write!(
        text,
        "{:02}/{:02}/{:04} : {:02}:{:02}:{:02}",
        dt.day(),
        dt.month(),
        dt.year(),
        dt.hour(),
        dt.minute(),
        dt.second()
    )
    .map_err(|_| AppError::RenderingFailed)?;
    Ok(text)
}

/// 日期时间行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeText {
    text: DateTimeString,
}

impl DateTimeText {
    pub fn new(timestamp: Timestamp, utc_offset_hours: i8) -> Result<Self> {
        Ok(Self {
            text: format_timestamp(timestamp, utc_offset_hours)?,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Drawable for DateTimeText {
    type Color = BinaryColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> core::result::Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut renderer = TextRenderer::new(&FONT_9X15, Baseline::Top, LayoutConfig::DATE_ANCHOR);
        renderer.draw_text(target, &self.text)
    }
}
