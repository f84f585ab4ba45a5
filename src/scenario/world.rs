//! 安检口仿真世界
//!
//! 持有唯一的随机数源、指标记录器以及通道资源句柄。

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::any::Any;

use crate::metrics::MetricsRecorder;
use crate::resource::ResourceHandle;
use crate::sim::{SimError, SimTime, Simulator, World};

use super::distributions::exponential;

pub struct CheckpointWorld {
    rng: StdRng,
    pub metrics: MetricsRecorder,
    lanes: ResourceHandle,
}

impl CheckpointWorld {
    pub fn new(seed: u64, lanes: ResourceHandle) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            metrics: MetricsRecorder::default(),
            lanes,
        }
    }

    /// 从 `dyn World` 取回具体类型。
    pub fn downcast(world: &mut dyn World) -> Result<&mut Self, SimError> {
        world
            .as_any_mut()
            .downcast_mut::<CheckpointWorld>()
            .ok_or(SimError::UnexpectedWorld("CheckpointWorld"))
    }

    pub fn lanes(&self) -> &ResourceHandle {
        &self.lanes
    }

    /// 按 `rate` 抽取一个指数分布的时长。所有进程共用同一个随机数源。
    pub fn sample_exp(&mut self, rate: f64) -> SimTime {
        SimTime(exponential(&mut self.rng, rate))
    }
}

impl World for CheckpointWorld {
    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn on_tick(&mut self, _sim: &mut Simulator) {
        let in_use = self.lanes.in_use();
        debug_assert!(in_use <= self.lanes.capacity());
        self.metrics.observe_in_service(in_use);
    }
}
