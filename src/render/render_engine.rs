use embassy_time::{Duration, Timer};
use embedded_graphics::Drawable;
use embedded_graphics::draw_target::DrawTarget;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{Point, Primitive, Size};
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};

use crate::common::Readings;
use crate::common::config::LayoutConfig;
use crate::common::error::{AppError, Result};
use crate::data::RedrawPlan;
use crate::driver::display::DisplayDriver;
use crate::graphics::buffer::FrameBuffer;
use crate::render::components::{DateTimeText, ErrorMessage, ReadingField, StaticLayout};

/// 渲染引擎 - 负责管理显示缓冲区、脏区域标记和协调渲染刷新
pub struct RenderEngine<D: DisplayDriver> {
    /// 显示缓冲区
    display_buffer: FrameBuffer,
    /// 显示驱动
    display_driver: D,
    /// 脏区域标记（用于部分刷新）
    dirty_region: Option<Rectangle>,
    /// 屏幕尺寸
    screen_size: (u32, u32),
}

impl<D: DisplayDriver> RenderEngine<D> {
    /// 创建新的渲染引擎实例
    pub fn new(display_driver: D) -> Self {
        Self {
            display_buffer: FrameBuffer::new(),
            display_driver,
            dirty_region: None,
            screen_size: (LayoutConfig::DISPLAY_WIDTH, LayoutConfig::DISPLAY_HEIGHT),
        }
    }

    /// 唤醒显示设备
    pub fn init(&mut self) -> Result<()> {
        self.display_driver.init().map_err(|e| {
            log::error!("Failed to initialize display: {:?}", e);
            AppError::DisplayInit
        })
    }

    /// 让显示设备进入休眠
    pub fn sleep(&mut self) -> Result<()> {
        self.display_driver.sleep().map_err(|e| {
            log::error!("Failed to put display to sleep: {:?}", e);
            AppError::DisplaySleepFailed
        })
    }

    /// 标记脏区域（用于部分刷新）
    pub fn mark_dirty(&mut self, region: Rectangle) {
        // 确保区域在屏幕范围内
        let adjusted_region = self.adjust_region_to_screen(region);
        if adjusted_region.size == Size::zero() {
            return;
        }

        // 合并已有的脏区域
        self.dirty_region = Some(match self.dirty_region.take() {
            Some(existing) => self.merge_regions(existing, adjusted_region),
            None => adjusted_region,
        });

        log::debug!("Marked dirty region: {:?}", self.dirty_region);
    }

    /// 清空脏区域标记
    pub fn clear_dirty(&mut self) {
        self.dirty_region = None;
        log::debug!("Dirty region cleared");
    }

    pub fn dirty_region(&self) -> Option<Rectangle> {
        self.dirty_region
    }

    /// 绘制标签和分隔线并全屏刷新
    pub async fn draw_static(&mut self) -> Result<()> {
        log::info!("Drawing static layout");
        self.draw(&StaticLayout)?;
        self.full_refresh().await
    }

    /// 清空区域并在其中绘制组件
    pub fn redraw_region(
        &mut self,
        region: Rectangle,
        component: &impl Drawable<Color = BinaryColor>,
    ) -> Result<()> {
        log::debug!("Redrawing region: {:?}", region);

        self.clear_region(region)?;
        self.draw(component)?;
        self.mark_dirty(region);
        Ok(())
    }

    /// 按重绘计划更新读数和时间戳区域，并局部刷新
    pub async fn render_readings(
        &mut self,
        readings: &Readings,
        plan: &RedrawPlan,
        timestamp: &DateTimeText,
    ) -> Result<()> {
        if !plan.any() {
            log::debug!("Nothing changed, skipping redraw");
            return Ok(());
        }

        let fields = [
            (plan.temperature, ReadingField::Temperature(readings.temperature)),
            (plan.humidity, ReadingField::Humidity(readings.humidity)),
            (plan.co2, ReadingField::Co2(readings.co2)),
        ];
        for (_, field) in fields.iter().filter(|(changed, _)| *changed) {
            self.redraw_region(field.region(), field)?;
        }

        if plan.date() {
            self.redraw_region(LayoutConfig::DATE_REGION, timestamp)?;
        }

        self.flush().await
    }

    /// 把已修改的区域提交到面板
    pub async fn flush(&mut self) -> Result<()> {
        self.partial_refresh().await
    }

    /// 全屏刷新屏幕
    pub async fn full_refresh(&mut self) -> Result<()> {
        log::info!("Performing full display refresh");

        // 清空脏区域
        self.clear_dirty();

        self.display_driver
            .update_frame(self.display_buffer.buffer())
            .map_err(|e| {
                log::error!("Failed to update frame: {:?}", e);
                AppError::DisplayUpdateFailed
            })?;

        self.display_driver.display_frame().map_err(|e| {
            log::error!("Failed to display frame: {:?}", e);
            AppError::DisplayUpdateFailed
        })?;

        log::debug!("Full refresh completed successfully");
        Ok(())
    }

    /// 部分刷新屏幕
    pub async fn partial_refresh(&mut self) -> Result<()> {
        let Some(dirty_region) = self.dirty_region.take() else {
            log::debug!("No dirty region to refresh");
            return Ok(());
        };

        log::debug!("Performing partial refresh for region: {:?}", dirty_region);

        // 确保区域对齐到8像素边界（墨水屏部分刷新的常见要求）
        let aligned_region = self.align_to_eight_pixels(dirty_region);

        if let Err(e) = self.display_driver.update_partial_frame(
            self.display_buffer.buffer(),
            aligned_region.top_left.x as u32,
            aligned_region.top_left.y as u32,
            aligned_region.size.width,
            aligned_region.size.height,
        ) {
            log::error!("Failed to update partial frame: {:?}", e);
            // 重新标记脏区域，以便下次尝试
            self.dirty_region = Some(dirty_region);
            return Err(AppError::DisplayUpdateFailed);
        }

        if let Err(e) = self.display_driver.display_frame() {
            log::error!("Failed to display frame: {:?}", e);
            self.dirty_region = Some(dirty_region);
            return Err(AppError::DisplayUpdateFailed);
        }

        log::debug!("Partial refresh completed successfully");
        Ok(())
    }

    /// 显示错误信息
    ///
    /// 清屏后显示错误类别和信息，停留 `backoff` 后清屏并重绘静态布局
    pub async fn show_error(&mut self, error: &AppError, backoff: Duration) -> Result<()> {
        let message = ErrorMessage::from_error(error);
        log::warn!("Showing error screen: {}", message.as_str());

        self.clear_buffer();
        self.draw(&message)?;
        self.full_refresh().await?;

        Timer::after(backoff).await;

        self.clear_buffer();
        self.draw_static().await
    }

    /// 清空显示缓冲区
    pub fn clear_buffer(&mut self) {
        // FrameBuffer 的绘制不会失败
        let _ = self.display_buffer.clear(BinaryColor::Off);
        log::debug!("Display buffer cleared");
    }

    /// 获取显示缓冲区引用
    pub fn get_buffer(&self) -> &FrameBuffer {
        &self.display_buffer
    }

    pub fn display_driver(&self) -> &D {
        &self.display_driver
    }

    fn draw(&mut self, component: &impl Drawable<Color = BinaryColor>) -> Result<()> {
        component.draw(&mut self.display_buffer).map_err(|e| {
            log::error!("Failed to draw component: {:?}", e);
            AppError::RenderingFailed
        })?;
        Ok(())
    }

    fn clear_region(&mut self, region: Rectangle) -> Result<()> {
        region
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::Off))
            .draw(&mut self.display_buffer)
            .map_err(|e| {
                log::error!("Failed to clear region {:?}: {:?}", region, e);
                AppError::RenderingFailed
            })
    }

    /// 确保区域在屏幕范围内
    fn adjust_region_to_screen(&self, region: Rectangle) -> Rectangle {
        let (width, height) = self.screen_size;

        let left = core::cmp::max(0, region.top_left.x);
        let top = core::cmp::max(0, region.top_left.y);

        let right = core::cmp::min(
            (width - 1) as i32,
            region.top_left.x + region.size.width as i32 - 1,
        );
        let bottom = core::cmp::min(
            (height - 1) as i32,
            region.top_left.y + region.size.height as i32 - 1,
        );

        if left > right || top > bottom {
            // 区域完全在屏幕外
            Rectangle::new(Point::new(0, 0), Size::new(0, 0))
        } else {
            Rectangle::new(
                Point::new(left, top),
                Size::new((right - left + 1) as u32, (bottom - top + 1) as u32),
            )
        }
    }

    /// 合并两个区域
    fn merge_regions(&self, region1: Rectangle, region2: Rectangle) -> Rectangle {
        let left = core::cmp::min(region1.top_left.x, region2.top_left.x);
        let top = core::cmp::min(region1.top_left.y, region2.top_left.y);

        let right = core::cmp::max(
            region1.top_left.x + region1.size.width as i32 - 1,
            region2.top_left.x + region2.size.width as i32 - 1,
        );

        let bottom = core::cmp::max(
            region1.top_left.y + region1.size.height as i32 - 1,
            region2.top_left.y + region2.size.height as i32 - 1,
        );

        Rectangle::new(
            Point::new(left, top),
            Size::new((right - left + 1) as u32, (bottom - top + 1) as u32),
        )
    }

    /// 对齐区域到8像素边界（墨水屏部分刷新要求）
    fn align_to_eight_pixels(&self, region: Rectangle) -> Rectangle {
        let (width, height) = self.screen_size;

        // 左、上边界向下对齐到8的倍数
        let aligned_left = (region.top_left.x / 8) * 8;
        let aligned_top = (region.top_left.y / 8) * 8;

        // 右、下边界向上对齐到8的倍数，且不超出屏幕
        let aligned_right = (((region.top_left.x + region.size.width as i32 + 7) / 8) * 8)
            .min(width as i32);
        let aligned_bottom = (((region.top_left.y + region.size.height as i32 + 7) / 8) * 8)
            .min(height as i32);

        Rectangle::new(
            Point::new(aligned_left, aligned_top),
            Size::new(
                (aligned_right - aligned_left) as u32,
                (aligned_bottom - aligned_top) as u32,
            ),
        )
    }
}
