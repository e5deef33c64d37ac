//! 墨水屏气候显示程序主入口

use embassy_executor::Spawner;
use epd_climate::common::config::SystemConfig;
use epd_climate::common::error::Result;
use epd_climate::driver::display::DefaultDisplayDriver;
use epd_climate::driver::http_client::ReqwestHttpClient;
use epd_climate::driver::network::DefaultNetworkDriver;
use epd_climate::driver::time_source::DefaultTimeSource;
use epd_climate::tasks::{DefaultClimateMonitor, main_task};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    env_logger::init();
    log::info!("EPD climate display starting");

    if let Err(e) = run().await {
        log::error!("Main task error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = SystemConfig::load()?;
    log::info!(
        "InfluxDB {} (buckets {:?}, {:?})",
        config.influx.url,
        config.influx.bucket,
        config.influx.bucket_co2
    );

    let display = DefaultDisplayDriver::new(config.snapshot_path);
    let network = DefaultNetworkDriver::new(&config.wifi);
    let time_source = DefaultTimeSource::new();
    let http_client = ReqwestHttpClient::new()?;

    let monitor = DefaultClimateMonitor::new(display, network, time_source, http_client, config);
    main_task(monitor).await
}
