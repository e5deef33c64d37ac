// src/driver/display/simulator.rs
use std::path::PathBuf;

use log::{debug, info};

use super::DisplayDriver;
use crate::common::error::{AppError, Result};
use crate::graphics::buffer::{BUFFER_SIZE, HEIGHT, ROW_BYTES, encode_pbm};

/// 模拟器墨水屏驱动
///
/// 在内存中维护控制器RAM，每次 `display_frame` 把面板内容写成 PBM 图像
pub struct SimulatorEpdDriver {
    snapshot_path: PathBuf,
    ram: Vec<u8>,
    awake: bool,
    refresh_count: u32,
}

impl SimulatorEpdDriver {
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        let snapshot_path = snapshot_path.into();
        info!(
            "Initializing Simulator EPD driver, snapshots go to {}",
            snapshot_path.display()
        );

        Self {
            snapshot_path,
            ram: vec![0x00; BUFFER_SIZE],
            awake: false,
            refresh_count: 0,
        }
    }

    /// 已完成的刷新次数
    pub fn refresh_count(&self) -> u32 {
        self.refresh_count
    }

    fn ensure_awake(&self) -> Result<()> {
        if self.awake {
            Ok(())
        } else {
            log::error!("EPD is asleep, call init first");
            Err(AppError::DisplayUpdateFailed)
        }
    }
}

impl DisplayDriver for SimulatorEpdDriver {
    fn init(&mut self) -> Result<()> {
        self.awake = true;
        debug!("EPD woke up");
        Ok(())
    }

    fn sleep(&mut self) -> Result<()> {
        self.awake = false;
        debug!("EPD entered sleep mode");
        Ok(())
    }

    fn update_frame(&mut self, buffer: &[u8]) -> Result<()> {
        self.ensure_awake()?;
        if buffer.len() != BUFFER_SIZE {
            log::error!("Frame has {} bytes, expected {}", buffer.len(), BUFFER_SIZE);
            return Err(AppError::DisplayUpdateFailed);
        }

        self.ram.copy_from_slice(buffer);
        Ok(())
    }

    fn update_partial_frame(
        &mut self,
        buffer: &[u8],
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    ) -> Result<()> {
        self.ensure_awake()?;
        let (x, y, width, height) = (x as usize, y as usize, width as usize, height as usize);
        if buffer.len() != BUFFER_SIZE
            || x % 8 != 0
            || width % 8 != 0
            || x + width > ROW_BYTES * 8
            || y + height > HEIGHT
        {
            log::error!(
                "Invalid partial window {}x{} at ({}, {})",
                width,
                height,
                x,
                y
            );
            return Err(AppError::DisplayUpdateFailed);
        }

        let first_byte = x / 8;
        let last_byte = (x + width) / 8;
        for row in y..y + height {
            let range = row * ROW_BYTES + first_byte..row * ROW_BYTES + last_byte;
            self.ram[range.clone()].copy_from_slice(&buffer[range]);
        }
        Ok(())
    }

    fn display_frame(&mut self) -> Result<()> {
        self.ensure_awake()?;
        std::fs::write(&self.snapshot_path, encode_pbm(&self.ram)).map_err(|e| {
            log::error!(
                "Failed to write snapshot {}: {}",
                self.snapshot_path.display(),
                e
            );
            AppError::DisplayUpdateFailed
        })?;

        self.refresh_count += 1;
        debug!("Simulated refresh #{} written", self.refresh_count);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("epd_climate_{}_{}.pbm", name, std::process::id()))
    }

    #[test]
    fn refuses_updates_while_asleep() {
        let mut driver = SimulatorEpdDriver::new(snapshot_path("asleep"));
        assert_eq!(
            driver.update_frame(&[0; BUFFER_SIZE]),
            Err(AppError::DisplayUpdateFailed)
        );
    }

    #[test]
    fn writes_full_frame_snapshot() {
        let path = snapshot_path("full");
        let mut driver = SimulatorEpdDriver::new(&path);
        driver.init().unwrap();
        driver.update_frame(&[0xff; BUFFER_SIZE]).unwrap();
        driver.display_frame().unwrap();

        let written = std::fs::read(&path).unwrap();
        assert_eq!(written, encode_pbm(&[0xff; BUFFER_SIZE]));
        assert_eq!(driver.refresh_count(), 1);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn partial_update_only_touches_window() {
        let path = snapshot_path("partial");
        let mut driver = SimulatorEpdDriver::new(&path);
        driver.init().unwrap();
        driver
            .update_partial_frame(&[0xff; BUFFER_SIZE], 8, 2, 16, 3)
            .unwrap();
        driver.display_frame().unwrap();

        let written = std::fs::read(&path).unwrap();
        let frame = &written[written.len() - BUFFER_SIZE..];
        assert_eq!(frame[2 * ROW_BYTES], 0x00);
        assert_eq!(frame[2 * ROW_BYTES + 1], 0xff);
        assert_eq!(frame[4 * ROW_BYTES + 2], 0xff);
        assert_eq!(frame[4 * ROW_BYTES + 3], 0x00);
        assert_eq!(frame[5 * ROW_BYTES + 1], 0x00);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_unaligned_windows() {
        let mut driver = SimulatorEpdDriver::new(snapshot_path("unaligned"));
        driver.init().unwrap();
        assert!(
            driver
                .update_partial_frame(&[0; BUFFER_SIZE], 3, 0, 8, 8)
                .is_err()
        );
        assert!(
            driver
                .update_partial_frame(&[0; BUFFER_SIZE], 288, 0, 16, 8)
                .is_err()
        );
    }
}
