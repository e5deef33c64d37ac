//! 帧缓冲区管理（1bit/像素，黑白）

use core::convert::Infallible;

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Pixel, Point, Size};

/// 屏幕分辨率
pub const WIDTH: usize = 296;
pub const HEIGHT: usize = 128;
/// 每行字节数
pub const ROW_BYTES: usize = WIDTH.div_ceil(8);
/// 缓冲区大小（296*128 / 8 = 4736字节）
pub const BUFFER_SIZE: usize = ROW_BYTES * HEIGHT;

/// 帧缓冲区
///
/// 行优先存储，每字节 8 个像素，高位在左。置位表示黑色（`BinaryColor::On`），
/// 与 PBM(P4) 格式的位定义一致。
#[derive(Clone)]
pub struct FrameBuffer {
    buffer: [u8; BUFFER_SIZE],
}

impl FrameBuffer {
    /// 创建新的帧缓冲区（全白）
    pub fn new() -> Self {
        Self {
            buffer: [0x00; BUFFER_SIZE],
        }
    }

    /// 设置指定位置的像素颜色，越界坐标被忽略
    pub fn set_pixel(&mut self, x: usize, y: usize, color: BinaryColor) {
        if x >= WIDTH || y >= HEIGHT {
            return;
        }

        let index = y * ROW_BYTES + x / 8;
        let mask = 0x80 >> (x % 8);
        match color {
            BinaryColor::On => self.buffer[index] |= mask,
            BinaryColor::Off => self.buffer[index] &= !mask,
        }
    }

    /// 读取指定位置的像素颜色
    pub fn pixel(&self, x: usize, y: usize) -> Option<BinaryColor> {
        if x >= WIDTH || y >= HEIGHT {
            return None;
        }

        let index = y * ROW_BYTES + x / 8;
        let mask = 0x80 >> (x % 8);
        Some(BinaryColor::from(self.buffer[index] & mask != 0))
    }

    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// 导出为 PBM(P4) 图像，用于模拟器查看
    pub fn to_pbm(&self) -> Vec<u8> {
        encode_pbm(&self.buffer)
    }
}

/// 把整帧数据编码为 PBM(P4) 图像
pub fn encode_pbm(frame: &[u8]) -> Vec<u8> {
    let header = format!("P4\n{} {}\n", WIDTH, HEIGHT);
    let mut pbm = Vec::with_capacity(header.len() + frame.len());
    pbm.extend_from_slice(header.as_bytes());
    pbm.extend_from_slice(frame);
    pbm
}

impl Default for FrameBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x >= 0 && y >= 0 {
                self.set_pixel(x as usize, y as usize, color);
            }
        }
        Ok(())
    }
}
