//! 指标记录器
//!
//! 被动的数据汇：进程只往里追加，运行结束后对外只读。

use serde::Serialize;

use super::records::{PerformanceRecord, QueueSample};

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct MetricsRecorder {
    passengers: Vec<PerformanceRecord>,
    queue: Vec<QueueSample>,
    /// 观察到的同时在用单元数的最大值
    peak_in_service: usize,
}

impl MetricsRecorder {
    pub fn record_passenger(&mut self, record: PerformanceRecord) {
        self.passengers.push(record);
    }

    pub fn record_queue_sample(&mut self, sample: QueueSample) {
        self.queue.push(sample);
    }

    pub fn observe_in_service(&mut self, in_use: usize) {
        self.peak_in_service = self.peak_in_service.max(in_use);
    }

    pub fn passengers(&self) -> &[PerformanceRecord] {
        &self.passengers
    }

    pub fn queue_samples(&self) -> &[QueueSample] {
        &self.queue
    }

    pub fn peak_in_service(&self) -> usize {
        self.peak_in_service
    }
}
