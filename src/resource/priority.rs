//! 容量受限、按优先级排队的资源
//!
//! 请求按（优先级，请求时间，插入顺序）服务。优先级数值更小的请求只会越过其他
//! *等待中*的请求，不会抢占已被持有的单元。

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::sim::{SimError, SimTime};

use super::request::{Grant, Priority, Request};

// 进程内唯一的资源标识，用来区分不同资源发出的 grant。
static NEXT_RESOURCE_ID: AtomicU64 = AtomicU64::new(0);

/// `acquire` 的结果：立即授予，或进入等待队列。
#[derive(Debug)]
pub enum Acquired<W> {
    Granted(Grant, W),
    Queued(Request),
}

/// 优先级资源。`W` 是等待者随请求一起停放的数据（例如挂起的进程）。
#[derive(Debug)]
pub struct PriorityResource<W> {
    id: u64,
    name: String,
    capacity: usize,
    next_id: u64,
    held: BTreeMap<u64, Grant>,
    waiting: BTreeMap<Request, W>,
}

impl<W> PriorityResource<W> {
    pub fn new(name: impl Into<String>, capacity: usize) -> Result<Self, SimError> {
        if capacity == 0 {
            return Err(SimError::config("capacity", "must be at least 1"));
        }
        Ok(Self {
            id: NEXT_RESOURCE_ID.fetch_add(1, Ordering::Relaxed),
            name: name.into(),
            capacity,
            next_id: 0,
            held: BTreeMap::new(),
            waiting: BTreeMap::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// 当前被持有的单元数
    pub fn in_use(&self) -> usize {
        self.held.len()
    }

    /// 等待队列长度
    pub fn queue_len(&self) -> usize {
        self.waiting.len()
    }

    /// 等待队列中各请求的优先级（队头在前）
    pub fn waiting_priorities(&self) -> Vec<Priority> {
        self.waiting.keys().map(|r| r.priority).collect()
    }

    /// 当前持有者的优先级（按 grant 顺序）
    pub fn held_priorities(&self) -> Vec<Priority> {
        self.held.values().map(|g| g.priority).collect()
    }

    /// `grant` 是否由本资源发出且仍被持有。
    pub fn is_held(&self, grant: &Grant) -> bool {
        grant.resource == self.id && self.held.get(&grant.id) == Some(grant)
    }

    /// 申请一个单元。有空闲单元时立即授予，否则按优先级排队。
    pub fn acquire(&mut self, priority: Priority, now: SimTime, waiter: W) -> Acquired<W> {
        let req = Request {
            id: self.next_id,
            priority,
            requested_at: now,
        };
        self.next_id = self.next_id.wrapping_add(1);

        if self.held.len() < self.capacity {
            // 有空闲单元时等待队列必然为空（释放时总会提升队头）。
            debug_assert!(self.waiting.is_empty());
            let grant = Grant::from_request(req, self.id, now);
            self.held.insert(grant.id, grant);
            return Acquired::Granted(grant, waiter);
        }

        self.waiting.insert(req, waiter);
        Acquired::Queued(req)
    }

    /// 释放一个单元；若有等待者，立即把队头提升为持有者并返回。
    pub fn release(&mut self, grant: &Grant, now: SimTime) -> Result<Option<(Grant, W)>, SimError> {
        if !self.is_held(grant) {
            return Err(SimError::UnknownGrant(grant.id, self.name.clone()));
        }
        self.held.remove(&grant.id);

        let Some((req, waiter)) = self.waiting.pop_first() else {
            return Ok(None);
        };
        let promoted = Grant::from_request(req, self.id, now);
        self.held.insert(promoted.id, promoted);
        debug_assert!(self.held.len() <= self.capacity);
        Ok(Some((promoted, waiter)))
    }
}
