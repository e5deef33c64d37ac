use embedded_graphics::{
    Drawable,
    mono_font::ascii::FONT_10X20,
    pixelcolor::BinaryColor,
    prelude::{DrawTarget, Point, Primitive},
    primitives::{Line, PrimitiveStyle},
    text::Baseline,
};

use crate::{common::config::LayoutConfig, render::TextRenderer};

const LABELS: [(&str, Point); 3] = [
    ("Celsius:", LayoutConfig::TEMPERATURE_LABEL_ANCHOR),
    ("Humidity:", LayoutConfig::HUMIDITY_LABEL_ANCHOR),
    ("CO2:", LayoutConfig::CO2_LABEL_ANCHOR),
];

/// 不随读数变化的标签和分隔线
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticLayout;

impl Drawable for StaticLayout {
    type Color = BinaryColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut renderer = TextRenderer::new(&FONT_10X20, Baseline::Middle, Point::zero());
        for (label, anchor) in LABELS {
            renderer.move_to(anchor);
            renderer.draw_text(target, label)?;
        }

        let stroke = PrimitiveStyle::with_stroke(BinaryColor::On, 1);
        for (start, end) in LayoutConfig::SEPARATOR_LINES {
            Line::new(start, end).into_styled(stroke).draw(target)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use embedded_graphics::primitives::ContainsPoint;

    use super::*;
    use crate::graphics::buffer::FrameBuffer;

    #[test]
    fn draws_separators_and_keeps_value_regions_clear() {
        let mut display = FrameBuffer::new();
        StaticLayout.draw(&mut display).unwrap();

        assert_eq!(display.pixel(5, 54), Some(BinaryColor::On));
        assert_eq!(display.pixel(286, 93), Some(BinaryColor::On));
        assert_eq!(display.pixel(287, 93), Some(BinaryColor::Off));

        for region in [
            LayoutConfig::DATE_REGION,
            LayoutConfig::TEMPERATURE_REGION,
            LayoutConfig::HUMIDITY_REGION,
            LayoutConfig::CO2_REGION,
        ] {
            for y in 0..128 {
                for x in 0..296 {
                    if region.contains(Point::new(x, y)) {
                        assert_eq!(display.pixel(x as usize, y as usize), Some(BinaryColor::Off));
                    }
                }
            }
        }
    }
}
