//! 指标记录类型

use serde::Serialize;

use crate::sim::SimTime;

/// 一位旅客的等待记录，在其获得安检通道时写入。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceRecord {
    pub id: u64,
    pub arrival_time: SimTime,
    pub wait_time: SimTime,
    pub service_start_time: SimTime,
}

impl PerformanceRecord {
    pub fn new(id: u64, arrival_time: SimTime, service_start_time: SimTime) -> Self {
        Self {
            id,
            arrival_time,
            wait_time: service_start_time.since(arrival_time),
            service_start_time,
        }
    }

    /// 旅客显示名，如 `Pax_1`
    pub fn name(&self) -> String {
        format!("Pax_{}", self.id)
    }
}

/// 一次排队长度采样。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QueueSample {
    pub sample_time: SimTime,
    pub queue_length: usize,
}
