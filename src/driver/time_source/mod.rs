// src/driver/time_source/mod.rs
use jiff::Timestamp;

use crate::common::error::{AppError, Result};

#[cfg(feature = "simulator")]
mod linux;

#[cfg(feature = "simulator")]
pub use linux::SystemTimeSource;

#[cfg(feature = "simulator")]
pub type DefaultTimeSource = SystemTimeSource;

// 时间逻辑声明
// 时间源只提供UTC时间戳，时区偏移在渲染时间文本时处理
// 时钟校准由外部完成（宿主系统的NTP服务），这里只确认时钟已被校准

/// 早于该时刻的时钟视为尚未校准（2024-01-01T00:00:00Z）
pub const EARLIEST_VALID_TIME: Timestamp = Timestamp::constant(1_704_067_200, 0);

pub trait TimeSource {
    /// 获取当前UTC时间
    fn now(&self) -> Result<Timestamp>;

    /// 校准时钟，失败时系统无法启动
    async fn synchronize(&mut self) -> Result<()>;
}

/// 确认时钟读数可信
pub fn check_synchronized(now: Timestamp) -> Result<()> {
    if now < EARLIEST_VALID_TIME {
        log::error!("System clock reads {}, which predates {}", now, EARLIEST_VALID_TIME);
        return Err(AppError::TimeSync(format!(
            "clock not synchronized (reads {})",
            now
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_recent_clock() {
        let now = Timestamp::constant(1_790_000_000, 0);
        assert!(check_synchronized(now).is_ok());
    }

    #[test]
    fn rejects_unset_clock() {
        let error = check_synchronized(Timestamp::UNIX_EPOCH).unwrap_err();
        assert_eq!(error.kind(), "TimeSyncError");
    }
}
