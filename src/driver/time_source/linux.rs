// src/driver/time_source/linux.rs

use jiff::Timestamp;

use super::{TimeSource, check_synchronized};
use crate::common::error::Result;

/// 系统时钟时间源，依赖宿主系统的NTP服务校准
#[derive(Debug, Default)]
pub struct SystemTimeSource;

impl SystemTimeSource {
    pub fn new() -> Self {
        Self
    }
}

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Result<Timestamp> {
        Ok(Timestamp::now())
    }

    async fn synchronize(&mut self) -> Result<()> {
        let now = Timestamp::now();
        check_synchronized(now)?;
        log::info!("System clock synchronized: {}", now);
        Ok(())
    }
}
