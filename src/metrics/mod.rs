//! 指标模块
//!
//! 旅客等待记录与排队长度时间序列，是仿真对外的两个数据产品。

mod recorder;
mod records;

pub use recorder::MetricsRecorder;
pub use records::{PerformanceRecord, QueueSample};
