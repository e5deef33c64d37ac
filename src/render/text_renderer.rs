//! 等宽字体文本渲染器，支持按宽度自动换行的多行渲染

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};

// 文本渲染器
pub struct TextRenderer<'a> {
    font: &'a MonoFont<'a>,
    baseline: Baseline,
    current_x: i32,
    current_y: i32,
}

impl<'a> TextRenderer<'a> {
    pub fn new(font: &'a MonoFont<'a>, baseline: Baseline, position: Point) -> Self {
        Self {
            font,
            baseline,
            current_x: position.x,
            current_y: position.y,
        }
    }

    // 单个字符的步进宽度
    pub fn char_advance(&self) -> u32 {
        self.font.character_size.width + self.font.character_spacing
    }

    pub fn line_height(&self) -> i32 {
        self.font.character_size.height as i32
    }

    // 渲染单行文本，完成后移动到下一行
    pub fn draw_text<D>(&mut self, display: &mut D, text: &str) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        Text::with_baseline(
            text,
            Point::new(self.current_x, self.current_y),
            style,
            self.baseline,
        )
        .draw(display)?;

        self.current_y += self.line_height();
        Ok(())
    }

    // 渲染多行文本（遇到换行符或超出宽度时换行）
    pub fn draw_text_multiline<D>(
        &mut self,
        display: &mut D,
        text: &str,
        max_width: u32,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        for line in wrap_text(text, max_width, self.char_advance()) {
            self.draw_text(display, &line)?;
        }
        Ok(())
    }

    // 计算文本宽度
    pub fn calculate_text_width(&self, text: &str) -> u32 {
        text.chars().count() as u32 * self.char_advance()
    }

    // 移动到指定位置
    pub fn move_to(&mut self, position: Point) {
        self.current_x = position.x;
        self.current_y = position.y;
    }

    // 获取当前绘制位置
    pub fn current_position(&self) -> Point {
        Point::new(self.current_x, self.current_y)
    }
}

/// 按单词换行，单词本身超出宽度时按字符拆开
///
/// 文本中的 `\n` 总是开始新的一行
pub fn wrap_text(text: &str, max_width: u32, char_width: u32) -> Vec<String> {
    let max_chars = (max_width / char_width.max(1)).max(1) as usize;
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut line_len = 0;

        for word in paragraph.split_whitespace() {
            let word_len = word.chars().count();
            let needed = if line_len == 0 { word_len } else { line_len + 1 + word_len };

            if needed <= max_chars {
                if line_len > 0 {
                    current_line.push(' ');
                }
                current_line.push_str(word);
                line_len = needed;
                continue;
            }

            if line_len > 0 {
                lines.push(core::mem::take(&mut current_line));
                line_len = 0;
            }

            // 过长的单词逐字符拆分
            for c in word.chars() {
                if line_len == max_chars {
                    lines.push(core::mem::take(&mut current_line));
                    line_len = 0;
                }
                current_line.push(c);
                line_len += 1;
            }
        }

        lines.push(current_line);
    }

    lines
}
