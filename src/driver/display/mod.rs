// src/driver/display/mod.rs

/// 电子墨水屏驱动模块
///
/// 本模块定义了电子墨水屏（EPD）驱动的通用接口，
/// 模拟器驱动把每次提交的画面保存为 PBM 图像
use crate::common::error::Result;

#[cfg(feature = "simulator")]
mod simulator;

#[cfg(feature = "simulator")]
pub use simulator::SimulatorEpdDriver;

/// 条件编译导入平台特定驱动
///
/// 根据编译特性选择默认的显示驱动实现
#[cfg(feature = "simulator")]
pub type DefaultDisplayDriver = simulator::SimulatorEpdDriver;

/// 电子墨水屏驱动trait
///
/// 定义电子墨水屏设备的通用操作接口。缓冲区格式与
/// [`FrameBuffer`](crate::graphics::buffer::FrameBuffer) 相同：296x128，行优先，置位为黑
pub trait DisplayDriver {
    /// 初始化显示设备
    ///
    /// 唤醒EPD显示设备，准备接收数据
    fn init(&mut self) -> Result<()>;

    /// 更新帧缓冲区
    ///
    /// 将整帧图像数据写入EPD显示缓冲区
    fn update_frame(&mut self, buffer: &[u8]) -> Result<()>;

    /// 更新部分帧缓冲区
    ///
    /// 仅写入 `(x, y, width, height)` 区域的图像数据，`x` 与 `width` 需按8像素对齐
    ///
    /// # 参数
    /// - `buffer`: 整帧图像数据
    /// - `x`: 区域起始X坐标
    /// - `y`: 区域起始Y坐标
    /// - `width`: 区域宽度
    /// - `height`: 区域高度
    fn update_partial_frame(
        &mut self,
        buffer: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()>;

    /// 刷新显示
    ///
    /// 将已写入的数据刷新到面板上，这是最慢的一步
    fn display_frame(&mut self) -> Result<()>;

    /// 进入休眠模式
    fn sleep(&mut self) -> Result<()>;
}
