//! 场景配置
//!
//! 默认值复现原始的安检口实验：4 条通道，第 40 分钟起依次关闭 3 条。

use serde::{Deserialize, Serialize};

use crate::sim::{SimError, SimTime};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// 旅客到达率 λ（人/分钟）
    pub arrival_rate: f64,
    /// 单通道服务率 μ（人/分钟）
    pub service_rate: f64,
    /// 安检通道数
    pub capacity: usize,
    pub random_seed: u64,
    pub stop_time: SimTime,
    pub disruption_start_time: SimTime,
    /// 管理进程依次占用的通道数
    pub disruption_unit_count: usize,
    /// 每占用一条通道后的保持时长
    pub disruption_hold_duration: SimTime,
    /// 排队长度采样间隔
    pub sampling_interval: SimTime,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            arrival_rate: 2.0,
            service_rate: 0.8,
            capacity: 4,
            random_seed: 42,
            stop_time: SimTime(120.0),
            disruption_start_time: SimTime(40.0),
            disruption_unit_count: 3,
            disruption_hold_duration: SimTime(40.0),
            sampling_interval: SimTime(1.0),
        }
    }
}

fn positive_rate(field: &'static str, v: f64) -> Result<(), SimError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(SimError::config(field, format!("must be a positive finite rate, got {v}")))
    }
}

fn valid_time(field: &'static str, t: SimTime) -> Result<(), SimError> {
    if t.is_valid_duration() {
        Ok(())
    } else {
        Err(SimError::config(field, format!("must be finite and non-negative, got {t}")))
    }
}

impl ScenarioConfig {
    /// 在运行开始前检查所有参数。
    pub fn validate(&self) -> Result<(), SimError> {
        positive_rate("arrival_rate", self.arrival_rate)?;
        positive_rate("service_rate", self.service_rate)?;
        if self.capacity == 0 {
            return Err(SimError::config("capacity", "must be at least 1"));
        }
        valid_time("stop_time", self.stop_time)?;
        valid_time("disruption_start_time", self.disruption_start_time)?;
        valid_time("disruption_hold_duration", self.disruption_hold_duration)?;
        valid_time("sampling_interval", self.sampling_interval)?;
        if self.sampling_interval.as_f64() <= 0.0 {
            return Err(SimError::config("sampling_interval", "must be positive"));
        }
        // 管理进程会一直持有已占用的通道，超过容量的那次申请永远不会被授予。
        if self.disruption_unit_count > self.capacity {
            return Err(SimError::config(
                "disruption_unit_count",
                format!("must not exceed capacity ({})", self.capacity),
            ));
        }
        Ok(())
    }
}
