// src/tasks/main_task.rs

//! 主任务模块 - 轮询 InfluxDB 并按需刷新屏幕
//!
//! 每个周期：确认网络连接 → 获取读数 → 判断变化 → 局部重绘。
//! 周期内的任何错误都会显示在屏幕上，然后等待下一个周期。

use embassy_time::Timer;

use crate::common::config::SystemConfig;
use crate::common::error::{AppError, Result};
use crate::data::{InfluxFetcher, RedrawPlan, RenderState, Thresholds};
use crate::driver::display::DisplayDriver;
use crate::driver::http_client::HttpClient;
use crate::driver::network::{NetworkDriver, ensure_connected};
use crate::driver::time_source::TimeSource;
use crate::render::RenderEngine;
use crate::render::components::DateTimeText;

/// 单个周期的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// 至少一个区域被重绘
    Redrawn(RedrawPlan),
    /// 所有读数都在阈值以内
    Unchanged,
    /// 周期失败，错误已显示在屏幕上
    Failed(AppError),
}

/// 气候监视器，持有渲染状态和全部驱动
pub struct ClimateMonitor<D, N, T, C>
where
    D: DisplayDriver,
    N: NetworkDriver,
    T: TimeSource,
    C: HttpClient,
{
    renderer: RenderEngine<D>,
    network: N,
    time_source: T,
    fetcher: InfluxFetcher<C>,
    state: RenderState,
    thresholds: Thresholds,
    config: SystemConfig,
}

impl<D, N, T, C> ClimateMonitor<D, N, T, C>
where
    D: DisplayDriver,
    N: NetworkDriver,
    T: TimeSource,
    C: HttpClient,
{
    pub fn new(display: D, network: N, time_source: T, http_client: C, config: SystemConfig) -> Self {
        Self {
            renderer: RenderEngine::new(display),
            network,
            time_source,
            fetcher: InfluxFetcher::new(http_client, config.influx.clone()),
            state: RenderState::new(),
            thresholds: Thresholds::default(),
            config,
        }
    }

    pub fn state(&self) -> &RenderState {
        &self.state
    }

    pub fn renderer(&self) -> &RenderEngine<D> {
        &self.renderer
    }

    /// 启动：初始化屏幕、连接网络、校准时钟，最后绘制静态布局
    ///
    /// 失败时错误会显示在屏幕上并返回，调用方应当退出
    pub async fn startup(&mut self) -> Result<()> {
        self.renderer.init()?;

        if let Err(e) = self.connect_and_sync().await {
            log::error!("Startup failed: {}", e);
            if let Err(display_error) = self.renderer.show_error(&e, self.config.error_backoff).await
            {
                log::error!("Failed to show startup error: {}", display_error);
            }
            return Err(e);
        }

        self.renderer.clear_buffer();
        self.renderer.draw_static().await
    }

    async fn connect_and_sync(&mut self) -> Result<()> {
        ensure_connected(&mut self.network, &self.config.wifi).await?;
        self.time_source.synchronize().await
    }

    /// 执行一个轮询周期
    ///
    /// 错误不会向外传播：显示错误屏幕后返回 [`CycleOutcome::Failed`]，`RenderState` 保持不变
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        match self.try_cycle().await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("Cycle failed: {} ({})", e, e.kind());
                if let Err(display_error) =
                    self.renderer.show_error(&e, self.config.error_backoff).await
                {
                    log::error!("Failed to show error screen: {}", display_error);
                }
                CycleOutcome::Failed(e)
            }
        }
    }

    async fn try_cycle(&mut self) -> Result<CycleOutcome> {
        ensure_connected(&mut self.network, &self.config.wifi).await?;

        let readings = self.fetcher.fetch_all()?;
        let plan = self.state.detect(&readings, &self.thresholds);

        if !plan.any() {
            log::debug!("Readings within tolerance: {:?}", readings);
            return Ok(CycleOutcome::Unchanged);
        }

        let timestamp = DateTimeText::new(self.time_source.now()?, self.config.utc_offset_hours)?;
        self.renderer
            .render_readings(&readings, &plan, &timestamp)
            .await?;

        self.state.commit(&readings, &plan);
        log::info!(
            "Redrawn {:?} at {}: {} C, {} %, {} ppm",
            plan,
            timestamp.as_str(),
            readings.temperature,
            readings.humidity,
            readings.co2
        );
        Ok(CycleOutcome::Redrawn(plan))
    }

    /// 无限循环执行周期
    pub async fn run(&mut self) {
        loop {
            let outcome = self.run_cycle().await;
            log::debug!("Cycle outcome: {:?}", outcome);
            Timer::after(self.config.poll_interval).await;
        }
    }
}

#[cfg(feature = "simulator")]
pub type DefaultClimateMonitor = ClimateMonitor<
    crate::driver::display::DefaultDisplayDriver,
    crate::driver::network::DefaultNetworkDriver,
    crate::driver::time_source::DefaultTimeSource,
    crate::driver::http_client::ReqwestHttpClient,
>;

/// 主任务：启动后进入轮询循环，启动失败时返回错误
#[cfg(feature = "simulator")]
pub async fn main_task(mut monitor: DefaultClimateMonitor) -> Result<()> {
    log::info!("Main task started");

    monitor.startup().await?;
    log::info!("Startup complete, polling every {} s", monitor.config.poll_interval.as_secs());
    monitor.run().await;
    Ok(())
}
