//! 安检口仿真
//!
//! 运行带通道中断窗口的安检口仿真，并输出一行运行摘要。

use checkpoint_sim::scenario::{ScenarioConfig, run_checkpoint};
use checkpoint_sim::sim::SimTime;
use clap::Parser;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
enum ConfigLoadError {
    #[error("read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Parser)]
#[command(
    name = "checkpoint-sim",
    about = "安检口离散事件仿真：优先级通道资源 + 中断窗口"
)]
struct Args {
    /// 场景配置 JSON；缺省字段取默认值
    #[arg(long)]
    config: Option<PathBuf>,

    /// 旅客到达率（人/分钟）
    #[arg(long)]
    arrival_rate: Option<f64>,

    /// 单通道服务率（人/分钟）
    #[arg(long)]
    service_rate: Option<f64>,

    /// 安检通道数
    #[arg(long)]
    lanes: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// 仿真运行到多少分钟
    #[arg(long)]
    until: Option<f64>,

    #[arg(long)]
    disruption_start: Option<f64>,

    /// 中断期间依次关闭的通道数
    #[arg(long)]
    disruption_lanes: Option<usize>,

    #[arg(long)]
    disruption_hold: Option<f64>,

    /// 排队长度采样间隔（分钟）
    #[arg(long)]
    sample_interval: Option<f64>,
}

fn load_config(args: &Args) -> Result<ScenarioConfig, ConfigLoadError> {
    let mut cfg = match &args.config {
        Some(path) => {
            let raw = fs::read_to_string(path).map_err(|source| ConfigLoadError::Read {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw).map_err(|source| ConfigLoadError::Parse {
                path: path.clone(),
                source,
            })?
        }
        None => ScenarioConfig::default(),
    };

    if let Some(v) = args.arrival_rate {
        cfg.arrival_rate = v;
    }
    if let Some(v) = args.service_rate {
        cfg.service_rate = v;
    }
    if let Some(v) = args.lanes {
        cfg.capacity = v;
    }
    if let Some(v) = args.seed {
        cfg.random_seed = v;
    }
    if let Some(v) = args.until {
        cfg.stop_time = SimTime(v);
    }
    if let Some(v) = args.disruption_start {
        cfg.disruption_start_time = SimTime(v);
    }
    if let Some(v) = args.disruption_lanes {
        cfg.disruption_unit_count = v;
    }
    if let Some(v) = args.disruption_hold {
        cfg.disruption_hold_duration = SimTime(v);
    }
    if let Some(v) = args.sample_interval {
        cfg.sampling_interval = SimTime(v);
    }
    Ok(cfg)
}

fn main() -> ExitCode {
    // 初始化 tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_file(true)
        .with_line_number(true)
        .with_target(true)
        .init();

    let args = Args::parse();
    let cfg = match load_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(error = %e, "加载配置失败");
            return ExitCode::FAILURE;
        }
    };

    let out = match run_checkpoint(&cfg) {
        Ok(out) => out,
        Err(e) => {
            error!(error = %e, "仿真中止");
            return ExitCode::FAILURE;
        }
    };

    println!(
        "done @ {}, passengers={}, samples={}, peak_in_service={}, discarded_events={}",
        out.stats.finished_at,
        out.metrics.passengers().len(),
        out.metrics.queue_samples().len(),
        out.metrics.peak_in_service(),
        out.stats.discarded
    );
    ExitCode::SUCCESS
}
