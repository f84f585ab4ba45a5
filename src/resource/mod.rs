//! 资源模块
//!
//! 容量受限、按优先级排队的资源，以及供进程共享的句柄。

mod handle;
mod priority;
mod request;

pub use handle::ResourceHandle;
pub use priority::{Acquired, PriorityResource};
pub use request::{Grant, Priority, Request};
