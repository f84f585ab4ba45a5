//! 排队监视器：按固定间隔记录等待队列长度，只会被调度器的停止时间终止。

use crate::metrics::QueueSample;
use crate::resource::ResourceHandle;
use crate::sim::{Process, SimError, SimTime, Simulator, Step, Wake, World};

use super::world::CheckpointWorld;

#[derive(Debug)]
pub struct QueueMonitor {
    interval: SimTime,
    lanes: ResourceHandle,
}

impl QueueMonitor {
    pub fn new(interval: SimTime, lanes: ResourceHandle) -> Self {
        Self { interval, lanes }
    }
}

impl Process for QueueMonitor {
    fn name(&self) -> &'static str {
        "queue_monitor"
    }

    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        world: &mut dyn World,
    ) -> Result<Step, SimError> {
        if let Wake::Granted(_) = wake {
            return Err(SimError::UnexpectedWake {
                process: self.name(),
                wake,
            });
        }
        CheckpointWorld::downcast(world)?
            .metrics
            .record_queue_sample(QueueSample {
                sample_time: sim.now(),
                queue_length: self.lanes.queue_len(),
            });
        Ok(Step::delay(self.interval))
    }
}
