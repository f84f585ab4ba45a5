//! 到达生成器：泊松到达，每次到达启动一个新的旅客进程。没有终止状态。

use crate::resource::ResourceHandle;
use crate::sim::{Process, SimError, Simulator, Step, Wake, World};

use super::passenger::Passenger;
use super::world::CheckpointWorld;

#[derive(Debug)]
pub struct ArrivalGenerator {
    arrival_rate: f64,
    service_rate: f64,
    lanes: ResourceHandle,
    spawned: u64,
}

impl ArrivalGenerator {
    pub fn new(arrival_rate: f64, service_rate: f64, lanes: ResourceHandle) -> Self {
        Self {
            arrival_rate,
            service_rate,
            lanes,
            spawned: 0,
        }
    }
}

impl Process for ArrivalGenerator {
    fn name(&self) -> &'static str {
        "arrival_generator"
    }

    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        world: &mut dyn World,
    ) -> Result<Step, SimError> {
        match wake {
            Wake::Start => {}
            Wake::Timeout => {
                self.spawned += 1;
                sim.spawn(Passenger::new(
                    self.spawned,
                    self.service_rate,
                    self.lanes.clone(),
                ));
            }
            wake => {
                return Err(SimError::UnexpectedWake {
                    process: self.name(),
                    wake,
                });
            }
        }
        let gap = CheckpointWorld::downcast(world)?.sample_exp(self.arrival_rate);
        Ok(Step::delay(gap))
    }
}
