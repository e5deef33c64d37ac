use anyhow::{Context, Result};
use std::path::Path;

// 编译期注入的配置项，运行时通过 option_env! 读取
const CONFIG_KEYS: [&str; 13] = [
    "INFLUXDB_URL",
    "INFLUXDB_ORG",
    "INFLUXDB_TOKEN",
    "INFLUXDB_BUCKET",
    "INFLUXDB_BUCKET_CO2",
    "WIFI_SSID",
    "WIFI_PSK",
    "WIFI_COUNTRY",
    "WIFI_INTERFACE",
    "POLL_INTERVAL_SECS",
    "ERROR_BACKOFF_SECS",
    "UTC_OFFSET_HOURS",
    "SNAPSHOT_PATH",
];

const ENV_FILE: &str = ".env";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", ENV_FILE);

    // .env 可选，已在环境中设置的变量优先
    if Path::new(ENV_FILE).exists() {
        dotenvy::from_filename(ENV_FILE).with_context(|| format!("解析 {} 失败", ENV_FILE))?;
    }

    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
        if let Ok(value) = std::env::var(key) {
            if value.contains('\n') {
                anyhow::bail!("{} 不能包含换行符", key);
            }
            println!("cargo:rustc-env={}={}", key, value);
        }
    }

    Ok(())
}
