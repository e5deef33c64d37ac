use core::fmt::Debug;
use std::path::PathBuf;
use std::process::Command;

use wifi_rs::WiFi;
use wifi_rs::prelude::*;

use crate::common::config::WifiConfig;
use crate::common::error::{AppError, Result};
use crate::driver::network::NetworkDriver;

/// Linux 网络驱动
///
/// 通过 sysfs 读取网卡状态，通过 `wifi-rs` 加入无线网络。
/// 未配置 SSID 时认为网络由宿主系统管理，始终视为已连接
pub struct LinuxNetworkDriver {
    interface: String,
    sysfs_root: PathBuf,
    host_managed: bool,
}

impl LinuxNetworkDriver {
    pub fn new(wifi: &WifiConfig) -> Self {
        Self {
            interface: wifi.interface.into(),
            sysfs_root: PathBuf::from("/sys"),
            host_managed: wifi.ssid.is_empty(),
        }
    }

    /// 指定 sysfs 根目录
    pub fn with_sysfs_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.sysfs_root = root.into();
        self
    }

    fn operstate_path(&self) -> PathBuf {
        self.sysfs_root
            .join("class/net")
            .join(&self.interface)
            .join("operstate")
    }

    fn set_regulatory_domain(&self, country: &str) {
        if country.is_empty() {
            return;
        }

        match Command::new("iw").args(["reg", "set", country]).output() {
            Ok(output) if output.status.success() => {
                log::debug!("Regulatory domain set to {}", country);
            }
            Ok(output) => log::warn!(
                "iw reg set {} failed: {}",
                country,
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            Err(e) => log::warn!("Failed to run iw: {}", e),
        }
    }
}

impl NetworkDriver for LinuxNetworkDriver {
    async fn connect(&mut self, wifi: &WifiConfig) -> Result<()> {
        if self.host_managed {
            return Ok(());
        }

        log::info!("Linux WiFi connecting to SSID: {}", wifi.ssid);
        // wifi-rs 不设置国家码
        self.set_regulatory_domain(wifi.country);

        let mut controller = WiFi::new(Some(Config {
            interface: Some(self.interface.as_str()),
        }));
        join_result(controller.connect(wifi.ssid, wifi.psk))
    }

    fn is_connected(&self) -> bool {
        if self.host_managed {
            return true;
        }

        match std::fs::read_to_string(self.operstate_path()) {
            Ok(state) => state.trim() == "up",
            Err(e) => {
                log::debug!("Cannot read {}: {}", self.operstate_path().display(), e);
                false
            }
        }
    }
}

/// 把 wifi-rs 的连接结果映射为连接错误
fn join_result<E: Debug>(result: core::result::Result<bool, E>) -> Result<()> {
    match result {
        Ok(true) => {
            log::info!("Linux WiFi connected successfully");
            Ok(())
        }
        Ok(false) => {
            log::warn!("Linux WiFi connection failed - invalid password");
            Err(AppError::Connectivity("connection rejected".into()))
        }
        Err(e) => {
            log::error!("Linux WiFi connection error: {:?}", e);
            Err(AppError::Connectivity(format!("{:?}", e)))
        }
    }
}
