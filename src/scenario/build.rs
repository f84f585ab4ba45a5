//! 场景装配与运行

use tracing::info;

use crate::metrics::MetricsRecorder;
use crate::resource::ResourceHandle;
use crate::sim::{RunStats, SimError, Simulator};

use super::arrival::ArrivalGenerator;
use super::config::ScenarioConfig;
use super::disruption::DisruptionManager;
use super::monitor::QueueMonitor;
use super::world::CheckpointWorld;

/// 一次场景运行的结果
#[derive(Debug, Clone)]
pub struct ScenarioOutput {
    pub metrics: MetricsRecorder,
    pub stats: RunStats,
}

/// 校验配置并注册四个场景进程，返回尚未运行的仿真器与世界。
pub fn build_checkpoint(config: &ScenarioConfig) -> Result<(Simulator, CheckpointWorld), SimError> {
    config.validate()?;

    let lanes = ResourceHandle::new("security_lanes", config.capacity)?;
    let world = CheckpointWorld::new(config.random_seed, lanes.clone());
    let mut sim = Simulator::default();

    sim.spawn(ArrivalGenerator::new(
        config.arrival_rate,
        config.service_rate,
        lanes.clone(),
    ));
    sim.spawn(DisruptionManager::new(
        config.disruption_start_time,
        config.disruption_unit_count,
        config.disruption_hold_duration,
        lanes.clone(),
    ));
    sim.spawn(QueueMonitor::new(config.sampling_interval, lanes));

    Ok((sim, world))
}

/// 运行安检口场景直到 `stop_time`。
pub fn run_checkpoint(config: &ScenarioConfig) -> Result<ScenarioOutput, SimError> {
    let (mut sim, mut world) = build_checkpoint(config)?;
    info!(
        lanes = config.capacity,
        arrival_rate = config.arrival_rate,
        service_rate = config.service_rate,
        seed = config.random_seed,
        "--- 开始安检口仿真 ---"
    );
    let stats = sim.run_until(config.stop_time, &mut world)?;
    Ok(ScenarioOutput {
        metrics: world.metrics,
        stats,
    })
}
