//! 安检口场景
//!
//! 在仿真引擎之上编码具体实验：泊松到达、指数服务时间，以及一段脚本化的
//! 通道关闭/恢复窗口。进程之间只通过通道资源和指标记录器交互。

mod arrival;
mod build;
mod config;
mod disruption;
mod distributions;
mod monitor;
mod passenger;
mod world;

pub use arrival::ArrivalGenerator;
pub use build::{ScenarioOutput, build_checkpoint, run_checkpoint};
pub use config::ScenarioConfig;
pub use disruption::{DisruptionManager, STAFF_PRIORITY};
pub use distributions::exponential;
pub use monitor::QueueMonitor;
pub use passenger::{PASSENGER_PRIORITY, Passenger};
pub use world::CheckpointWorld;
