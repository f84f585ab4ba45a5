//! 共享资源句柄
//!
//! 多个进程通过克隆同一个句柄来竞争同一个 `PriorityResource`。
//! 等待中的进程连同请求一起停放在资源里，被授予时以"当前时刻"事件的形式恢复。

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;

use crate::sim::{Process, ProcessId, Resume, SimError, SimTime, Simulator, Wake};

use super::priority::{Acquired, PriorityResource};
use super::request::{Grant, Priority};

/// 停放在等待队列中的进程
pub(crate) struct Parked {
    pid: ProcessId,
    process: Box<dyn Process>,
}

#[derive(Clone)]
pub struct ResourceHandle {
    inner: Arc<Mutex<PriorityResource<Parked>>>,
}

impl ResourceHandle {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self, SimError> {
        Ok(Self {
            inner: Arc::new(Mutex::new(PriorityResource::new(name, capacity)?)),
        })
    }

    // 所有访问都由协作式调度器串行化，锁只是为了满足 `Send`。
    fn lock(&self) -> MutexGuard<'_, PriorityResource<Parked>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn name(&self) -> String {
        self.lock().name().to_string()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn in_use(&self) -> usize {
        self.lock().in_use()
    }

    pub fn queue_len(&self) -> usize {
        self.lock().queue_len()
    }

    pub fn waiting_priorities(&self) -> Vec<Priority> {
        self.lock().waiting_priorities()
    }

    pub fn held_priorities(&self) -> Vec<Priority> {
        self.lock().held_priorities()
    }

    pub fn is_held(&self, grant: &Grant) -> bool {
        self.lock().is_held(grant)
    }

    /// 立即授予时把进程交还给调用者继续执行；否则进程停放在等待队列中。
    pub(crate) fn acquire(
        &self,
        pid: ProcessId,
        priority: Priority,
        now: SimTime,
        process: Box<dyn Process>,
    ) -> Option<(Grant, Box<dyn Process>)> {
        let mut res = self.lock();
        match res.acquire(priority, now, Parked { pid, process }) {
            Acquired::Granted(grant, parked) => {
                debug!(%pid, resource = res.name(), grant = grant.id, priority, in_use = res.in_use(), "立即授予资源单元");
                Some((grant, parked.process))
            }
            Acquired::Queued(req) => {
                debug!(%pid, resource = res.name(), request = req.id, priority, queue_len = res.queue_len(), "进入等待队列");
                None
            }
        }
    }

    /// 释放一个单元。若有等待者被提升，其恢复作为当前时刻的事件调度。
    pub fn release(&self, grant: &Grant, sim: &mut Simulator) -> Result<(), SimError> {
        let promoted = self.lock().release(grant, sim.now())?;
        if let Some((next, Parked { pid, process })) = promoted {
            debug!(%pid, grant = next.id, priority = next.priority, waited = %next.waited(), "等待者获得资源单元");
            sim.schedule_now(Resume {
                pid,
                process,
                wake: Wake::Granted(next),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ResourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let res = self.lock();
        f.debug_struct("ResourceHandle")
            .field("name", &res.name())
            .field("capacity", &res.capacity())
            .field("in_use", &res.in_use())
            .field("queue_len", &res.queue_len())
            .finish()
    }
}
