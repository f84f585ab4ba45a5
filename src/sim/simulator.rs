//! 仿真器
//!
//! 定义事件驱动仿真器（EventScheduler），维护虚拟时间与事件队列。

use super::error::SimError;
use super::event::Event;
use super::process::{Process, ProcessId, Resume, Wake};
use super::scheduled_event::{EventId, ScheduledEvent};
use super::time::SimTime;
use super::world::World;
use std::collections::BinaryHeap;
use tracing::{debug, info, trace};

/// 一次 `run_until` / `run` 的执行统计。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RunStats {
    /// 实际执行的事件数
    pub executed: u64,
    /// 因超过停止时间而被丢弃的事件数
    pub discarded: usize,
    pub finished_at: SimTime,
}

/// 事件驱动仿真器：维护当前时间与事件队列。
///
/// 单线程协作式执行：同一时刻只有一个事件在运行，运行中的事件不会被打断。
#[derive(Default)]
pub struct Simulator {
    now: SimTime,
    next_seq: u64,
    next_pid: u64,
    q: BinaryHeap<ScheduledEvent>,
}

impl Simulator {
    /// 获取当前仿真时间
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// 队列中尚未执行的事件数
    pub fn pending(&self) -> usize {
        self.q.len()
    }

    /// 调度事件在指定时间执行
    #[tracing::instrument(skip(self, ev), fields(event_type = std::any::type_name::<E>(), schedule_at = %at))]
    pub fn schedule<E: Event>(&mut self, at: SimTime, ev: E) -> EventId {
        debug_assert!(
            at.total_cmp(&self.now).is_ge(),
            "event time must be >= current time"
        );
        let seq = self.next_seq;
        trace!(now = %self.now, seq, "调度事件");

        self.next_seq = self.next_seq.wrapping_add(1);
        self.q.push(ScheduledEvent {
            at,
            seq,
            ev: Box::new(ev),
        });

        trace!(queue_size = self.q.len(), "事件已加入队列");
        EventId { at, seq }
    }

    /// 调度事件在当前时间执行（排在同一时刻已调度事件之后）。
    pub fn schedule_now<E: Event>(&mut self, ev: E) -> EventId {
        self.schedule(self.now, ev)
    }

    /// 调度事件在 `delay` 之后执行；负数或非有限的延迟是编程错误。
    pub fn schedule_after<E: Event>(&mut self, delay: SimTime, ev: E) -> Result<EventId, SimError> {
        if !delay.is_valid_duration() {
            return Err(SimError::InvalidDuration(delay.as_f64()));
        }
        Ok(self.schedule(self.now + delay, ev))
    }

    /// 启动一个新的进程：第一步作为当前时刻的事件调度。
    pub fn spawn<P: Process>(&mut self, process: P) -> ProcessId {
        let pid = ProcessId(self.next_pid);
        self.next_pid = self.next_pid.wrapping_add(1);
        debug!(%pid, process = process.name(), now = %self.now, "启动进程");
        self.schedule_now(Resume {
            pid,
            process: Box::new(process),
            wake: Wake::Start,
        });
        pid
    }

    /// 运行直到事件队列为空或下一个事件晚于 `until`。
    ///
    /// 晚于 `until` 的事件会被丢弃而不是执行：挂起中的进程不会再完成剩余逻辑。
    /// 任一事件返回错误都会立即中止运行。
    #[tracing::instrument(skip(self, world))]
    pub fn run_until(&mut self, until: SimTime, world: &mut dyn World) -> Result<RunStats, SimError> {
        info!("▶️  开始运行仿真");
        let mut executed = 0u64;
        while let Some(top) = self.q.peek() {
            if top.at.total_cmp(&until).is_gt() {
                break;
            }
            let Some(item) = self.q.pop() else { break };
            executed += 1;
            self.now = item.at;
            debug!(now = %self.now, seq = item.seq, remaining_queue = self.q.len(), "执行事件");
            item.ev.execute(self, world)?;
            world.on_tick(self);
        }

        let discarded = self.q.len();
        self.q.clear();
        if self.now.total_cmp(&until).is_lt() {
            self.now = until;
        }

        info!(
            total_events = executed,
            discarded,
            final_time = %self.now,
            "✅ 仿真完成"
        );
        Ok(RunStats {
            executed,
            discarded,
            finished_at: self.now,
        })
    }

    /// 运行所有事件直到队列为空。
    #[tracing::instrument(skip(self, world))]
    pub fn run(&mut self, world: &mut dyn World) -> Result<RunStats, SimError> {
        info!("▶️  开始运行仿真");
        debug!(now = %self.now, queue_size = self.q.len(), "初始状态");

        let mut executed = 0u64;
        while let Some(item) = self.q.pop() {
            executed += 1;
            self.now = item.at;

            debug!(
                event_num = executed,
                now = %self.now,
                seq = item.seq,
                remaining_queue = self.q.len(),
                "执行事件"
            );

            item.ev.execute(self, world)?;
            world.on_tick(self);
        }

        info!(total_events = executed, final_time = %self.now, "✅ 仿真完成");
        Ok(RunStats {
            executed,
            discarded: 0,
            finished_at: self.now,
        })
    }
}
