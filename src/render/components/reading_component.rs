use core::fmt::Write;

use embedded_graphics::{
    Drawable,
    mono_font::ascii::FONT_10X20,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point},
    primitives::Rectangle,
    text::Baseline,
};
use heapless::String;

use crate::{
    common::{Tenths, config::LayoutConfig},
    render::TextRenderer,
};

/// 单个读数在屏幕上的数值文本
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadingField {
    Temperature(Tenths),
    Humidity(Tenths),
    Co2(i32),
}

impl ReadingField {
    /// 数值所在区域，重绘前先清空
    pub const fn region(&self) -> Rectangle {
        match self {
            ReadingField::Temperature(_) => LayoutConfig::TEMPERATURE_REGION,
            ReadingField::Humidity(_) => LayoutConfig::HUMIDITY_REGION,
            ReadingField::Co2(_) => LayoutConfig::CO2_REGION,
        }
    }

    pub const fn anchor(&self) -> Point {
        match self {
            ReadingField::Temperature(_) => LayoutConfig::TEMPERATURE_ANCHOR,
            ReadingField::Humidity(_) => LayoutConfig::HUMIDITY_ANCHOR,
            ReadingField::Co2(_) => LayoutConfig::CO2_ANCHOR,
        }
    }

    pub fn text(&self) -> String<16> {
        let mut text = String::new();
        // 最长的文本（i32::MIN）也不超过容量
        let _ = match self {
            ReadingField::Temperature(value) => write!(text, "{}", value),
            ReadingField::Humidity(value) => write!(text, "{}%", value),
            ReadingField::Co2(value) => write!(text, "{}", value),
        };
        text
    }
}

impl Drawable for ReadingField {
    type Color = BinaryColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut renderer = TextRenderer::new(&FONT_10X20, Baseline::Middle, self.anchor());
        renderer.draw_text(target, &self.text())
    }
}
