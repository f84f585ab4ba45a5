//! 仿真时间类型
//!
//! 定义虚拟时间及其比较/运算。场景中单位为分钟，引擎本身不关心单位。

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

/// 虚拟时间（非负实数）。时长同样用 `SimTime` 表示。
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(pub f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    pub fn as_f64(self) -> f64 {
        self.0
    }

    /// 是否可以作为一段合法的时长（有限且非负）。
    pub fn is_valid_duration(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }

    /// 全序比较；事件队列依赖它保证排序稳定。
    pub fn total_cmp(&self, other: &SimTime) -> Ordering {
        self.0.total_cmp(&other.0)
    }

    /// `self - earlier`，用于计算等待时间。
    pub fn since(self, earlier: SimTime) -> SimTime {
        SimTime(self.0 - earlier.0)
    }
}

impl Add for SimTime {
    type Output = SimTime;

    fn add(self, rhs: SimTime) -> SimTime {
        SimTime(self.0 + rhs.0)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
