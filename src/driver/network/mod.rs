// src/driver/network/mod.rs
use crate::common::config::WifiConfig;
use crate::common::error::{AppError, Result};

mod linux;

pub use linux::LinuxNetworkDriver;

// 默认网络驱动选择
pub type DefaultNetworkDriver = LinuxNetworkDriver;

pub trait NetworkDriver {
    /// 加入配置中的无线网络
    async fn connect(&mut self, wifi: &WifiConfig) -> Result<()>;

    fn is_connected(&self) -> bool;
}

/// 确保网络已连接：已连接时直接返回，否则发起一次连接
pub async fn ensure_connected<N: NetworkDriver>(driver: &mut N, wifi: &WifiConfig) -> Result<()> {
    if driver.is_connected() {
        return Ok(());
    }

    log::info!("Network is down, connecting to {:?}", wifi.ssid);
    driver.connect(wifi).await?;

    if driver.is_connected() {
        log::info!("Network connected");
        Ok(())
    } else {
        log::warn!("Connect to {:?} returned but link is still down", wifi.ssid);
        Err(AppError::Connectivity(format!(
            "link still down after joining {:?}",
            wifi.ssid
        )))
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;

    struct FlakyNetwork {
        connected: bool,
        connects: u32,
        comes_up: bool,
    }

    impl NetworkDriver for FlakyNetwork {
        async fn connect(&mut self, _wifi: &WifiConfig) -> Result<()> {
            self.connects += 1;
            self.connected = self.comes_up;
            Ok(())
        }

        fn is_connected(&self) -> bool {
            self.connected
        }
    }

    const WIFI: WifiConfig = WifiConfig {
        ssid: "home",
        psk: "secret",
        country: "GB",
        interface: "wlan0",
    };

    #[test]
    fn skips_connect_when_already_up() {
        let mut network = FlakyNetwork {
            connected: true,
            connects: 0,
            comes_up: true,
        };
        block_on(ensure_connected(&mut network, &WIFI)).unwrap();
        assert_eq!(network.connects, 0);
    }

    #[test]
    fn connects_when_down() {
        let mut network = FlakyNetwork {
            connected: false,
            connects: 0,
            comes_up: true,
        };
        block_on(ensure_connected(&mut network, &WIFI)).unwrap();
        assert_eq!(network.connects, 1);
        assert!(network.is_connected());
    }

    #[test]
    fn reports_link_that_never_comes_up() {
        let mut network = FlakyNetwork {
            connected: false,
            connects: 0,
            comes_up: false,
        };
        let error = block_on(ensure_connected(&mut network, &WIFI)).unwrap_err();
        assert_eq!(error.kind(), "ConnectivityError");
    }
}
