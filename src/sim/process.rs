//! 进程模型
//!
//! 进程是一个显式的状态机：每次被调度器唤醒时执行一步，直到遇到挂起点
//! （延迟一段时间 / 申请资源单元）或结束。挂起中的进程本身就是"续体"，
//! 由事件队列（定时唤醒）或资源的等待队列（等待授予）持有。

use super::error::SimError;
use super::event::Event;
use super::simulator::Simulator;
use super::time::SimTime;
use super::world::World;
use crate::resource::{Grant, Priority, ResourceHandle};
use std::fmt;
use tracing::trace;

/// 进程 ID，由 `Simulator::spawn` 分配。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProcessId(pub u64);

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "p{}", self.0)
    }
}

/// 进程被唤醒的原因。
#[derive(Debug, Clone, PartialEq)]
pub enum Wake {
    /// 第一次运行
    Start,
    /// `Suspend::Delay` 到期
    Timeout,
    /// `Suspend::Acquire` 已被授予
    Granted(Grant),
}

/// 挂起点。
#[derive(Debug)]
pub enum Suspend {
    Delay(SimTime),
    Acquire {
        resource: ResourceHandle,
        priority: Priority,
    },
}

/// 进程执行一步的结果。
#[derive(Debug)]
pub enum Step {
    Suspended(Suspend),
    Completed,
}

impl Step {
    pub fn delay(duration: SimTime) -> Step {
        Step::Suspended(Suspend::Delay(duration))
    }

    pub fn acquire(resource: &ResourceHandle, priority: Priority) -> Step {
        Step::Suspended(Suspend::Acquire {
            resource: resource.clone(),
            priority,
        })
    }
}

/// 可挂起的并发活动。
pub trait Process: Send + 'static {
    /// 用于日志的进程类型名
    fn name(&self) -> &'static str;

    /// 从上一个挂起点继续执行，直到下一个挂起点或结束。
    fn resume(
        &mut self,
        wake: Wake,
        sim: &mut Simulator,
        world: &mut dyn World,
    ) -> Result<Step, SimError>;
}

/// 唤醒一个进程的事件。
pub(crate) struct Resume {
    pub(crate) pid: ProcessId,
    pub(crate) process: Box<dyn Process>,
    pub(crate) wake: Wake,
}

impl Event for Resume {
    fn execute(self: Box<Self>, sim: &mut Simulator, world: &mut dyn World) -> Result<(), SimError> {
        let Resume {
            pid,
            mut process,
            mut wake,
        } = *self;

        // 资源可立即授予时不让出控制权，直接继续执行下一步。
        loop {
            match process.resume(wake, sim, world)? {
                Step::Completed => {
                    trace!(%pid, process = process.name(), now = %sim.now(), "进程结束");
                    return Ok(());
                }
                Step::Suspended(Suspend::Delay(duration)) => {
                    sim.schedule_after(
                        duration,
                        Resume {
                            pid,
                            process,
                            wake: Wake::Timeout,
                        },
                    )?;
                    return Ok(());
                }
                Step::Suspended(Suspend::Acquire { resource, priority }) => {
                    match resource.acquire(pid, priority, sim.now(), process) {
                        Some((grant, p)) => {
                            process = p;
                            wake = Wake::Granted(grant);
                        }
                        None => return Ok(()),
                    }
                }
            }
        }
    }
}
