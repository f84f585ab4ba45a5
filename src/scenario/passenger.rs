//! 旅客进程：到达 → 排队等通道 → 接受安检 → 离开。

use crate::metrics::PerformanceRecord;
use crate::resource::{Grant, Priority, ResourceHandle};
use crate::sim::{Process, SimError, SimTime, Simulator, Step, Wake, World};

use super::world::CheckpointWorld;

/// 普通旅客的优先级
pub const PASSENGER_PRIORITY: Priority = 0;

#[derive(Debug, Clone, Copy)]
enum State {
    Arriving,
    WaitingForLane,
    Screening(Grant),
}

#[derive(Debug)]
pub struct Passenger {
    id: u64,
    arrival_time: SimTime,
    service_rate: f64,
    lanes: ResourceHandle,
    state: State,
}

impl Passenger {
    pub fn new(id: u64, service_rate: f64, lanes: ResourceHandle) -> Self {
        Self {
            id,
            arrival_time: SimTime::ZERO,
            service_rate,
            lanes,
            state: State::Arriving,
        }
    }
}

impl Process for Passenger {
    fn name(&self) -> &'static str {
        "passenger"
    }

    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        world: &mut dyn World,
    ) -> Result<Step, SimError> {
        match (self.state, wake) {
            (State::Arriving, Wake::Start) => {
                self.arrival_time = sim.now();
                self.state = State::WaitingForLane;
                Ok(Step::acquire(&self.lanes, PASSENGER_PRIORITY))
            }
            (State::WaitingForLane, Wake::Granted(grant)) => {
                let w = CheckpointWorld::downcast(world)?;
                w.metrics
                    .record_passenger(PerformanceRecord::new(self.id, self.arrival_time, sim.now()));
                let service = w.sample_exp(self.service_rate);
                self.state = State::Screening(grant);
                Ok(Step::delay(service))
            }
            (State::Screening(grant), Wake::Timeout) => {
                self.lanes.release(&grant, sim)?;
                Ok(Step::Completed)
            }
            (_, wake) => Err(SimError::UnexpectedWake {
                process: self.name(),
                wake,
            }),
        }
    }
}
