//! 资源请求与授予记录

use crate::sim::SimTime;
use std::cmp::Ordering;

/// 优先级：数值越小越先被服务。
pub type Priority = i32;

/// 一个等待中的资源请求。
///
/// 排序：优先级升序，其次请求时间升序，最后按插入顺序（`id`）。
#[derive(Debug, Clone, Copy)]
pub struct Request {
    pub id: u64,
    pub priority: Priority,
    pub requested_at: SimTime,
}

impl Ord for Request {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.requested_at.total_cmp(&other.requested_at))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for Request {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Request {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Request {}

/// 已授予（持有中）的资源单元。释放时交还给资源。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grant {
    /// 发出该 grant 的资源
    pub resource: u64,
    pub id: u64,
    pub priority: Priority,
    pub requested_at: SimTime,
    pub granted_at: SimTime,
}

impl Grant {
    pub(crate) fn from_request(req: Request, resource: u64, granted_at: SimTime) -> Self {
        Self {
            resource,
            id: req.id,
            priority: req.priority,
            requested_at: req.requested_at,
            granted_at,
        }
    }

    /// 从请求到授予所等待的时间
    pub fn waited(&self) -> SimTime {
        self.granted_at.since(self.requested_at)
    }
}
