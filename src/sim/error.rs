//! 仿真错误类型
//!
//! 引擎中没有可重试的错误：所有错误都意味着场景或 API 使用有误，直接中止运行。

use thiserror::Error;

use super::process::Wake;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// 请求了负数（或非有限）的延迟。
    #[error("invalid duration {0}: delays must be finite and non-negative")]
    InvalidDuration(f64),

    /// 释放了一个当前并未持有的 grant。
    #[error("grant #{0} is not currently held by resource `{1}`")]
    UnknownGrant(u64, String),

    /// 场景参数非法，运行不会开始。
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfiguration {
        field: &'static str,
        reason: String,
    },

    #[error("world is not a {0}")]
    UnexpectedWorld(&'static str),

    #[error("process `{process}` resumed with unexpected wake-up {wake:?}")]
    UnexpectedWake { process: &'static str, wake: Wake },
}

impl SimError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        SimError::InvalidConfiguration {
            field,
            reason: reason.into(),
        }
    }
}
