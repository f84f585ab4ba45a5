//! 中断管理进程
//!
//! 到达中断开始时间后，以高优先级依次申请 `unit_count` 条通道：每拿到一条就保持
//! `hold` 时长，再去申请下一条；全部拿到并保持完毕后一次性释放。
//!
//! 因此通道减少的总时长是 `unit_count × hold` 再加上等待授予的时间，而不是单个
//! `hold`。

use tracing::info;

use crate::resource::{Grant, Priority, ResourceHandle};
use crate::sim::{Process, SimError, SimTime, Simulator, Step, Wake, World};

/// 工作人员占用通道的优先级，低于任何旅客的数值，保证插队。
pub const STAFF_PRIORITY: Priority = -1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    WaitingForStart,
    Claiming,
    Holding,
}

#[derive(Debug)]
pub struct DisruptionManager {
    start_time: SimTime,
    unit_count: usize,
    hold: SimTime,
    lanes: ResourceHandle,
    claims: Vec<Grant>,
    state: State,
}

impl DisruptionManager {
    pub fn new(start_time: SimTime, unit_count: usize, hold: SimTime, lanes: ResourceHandle) -> Self {
        Self {
            start_time,
            unit_count,
            hold,
            lanes,
            claims: Vec::with_capacity(unit_count),
            state: State::Idle,
        }
    }

    fn claim_next(&mut self, sim: &mut Simulator) -> Result<Step, SimError> {
        if self.claims.len() < self.unit_count {
            self.state = State::Claiming;
            return Ok(Step::acquire(&self.lanes, STAFF_PRIORITY));
        }

        info!(now = %sim.now(), lanes = self.claims.len(), "--- 中断结束：通道重新开放 ---");
        for grant in self.claims.drain(..) {
            self.lanes.release(&grant, sim)?;
        }
        Ok(Step::Completed)
    }
}

impl Process for DisruptionManager {
    fn name(&self) -> &'static str {
        "disruption_manager"
    }

    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        _world: &mut dyn World,
    ) -> Result<Step, SimError> {
        match (self.state, wake) {
            (State::Idle, Wake::Start) => {
                self.state = State::WaitingForStart;
                Ok(Step::delay(self.start_time.since(sim.now())))
            }
            (State::WaitingForStart, Wake::Timeout) => {
                info!(now = %sim.now(), lanes = self.unit_count, "--- 中断开始：关闭通道 ---");
                self.claim_next(sim)
            }
            (State::Claiming, Wake::Granted(grant)) => {
                info!(now = %sim.now(), claimed = self.claims.len() + 1, waited = %grant.waited(), "工作人员占用一条通道");
                self.claims.push(grant);
                self.state = State::Holding;
                Ok(Step::delay(self.hold))
            }
            (State::Holding, Wake::Timeout) => self.claim_next(sim),
            (_, wake) => Err(SimError::UnexpectedWake {
                process: self.name(),
                wake,
            }),
        }
    }
}
