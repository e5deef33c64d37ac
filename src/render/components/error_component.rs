use embedded_graphics::{
    Drawable, mono_font::ascii::FONT_6X10, pixelcolor::BinaryColor, prelude::DrawTarget,
    text::Baseline,
};

use crate::{
    common::{config::LayoutConfig, error::AppError},
    render::TextRenderer,
};

/// 错误屏幕上的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    text: String,
}

impl ErrorMessage {
    pub fn new(kind: &str, message: &str) -> Self {
        Self {
            text: format!("Error Type: {}\nMessage: {}", kind, message),
        }
    }

    pub fn from_error(error: &AppError) -> Self {
        Self::new(error.kind(), &error.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Drawable for ErrorMessage {
    type Color = BinaryColor;

    type Output = ();

    fn draw<D>(&self, target: &mut D) -> Result<Self::Output, D::Error>
    where
        D: DrawTarget<Color = Self::Color>,
    {
        let mut renderer = TextRenderer::new(&FONT_6X10, Baseline::Top, LayoutConfig::ERROR_ANCHOR);
        renderer.draw_text_multiline(target, &self.text, LayoutConfig::ERROR_WRAP_WIDTH)
    }
}
