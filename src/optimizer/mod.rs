// 优化后端集成模块
// 类型定义、HTTP 客户端、实时轮询与健康探测

pub mod models;
pub mod client;
pub mod poller;
pub mod health;

#[cfg(test)]
mod tests;

pub use client::{HttpOptimizerClient, MockOptimizerClient, OptimizerClient, OptimizerClientManager};
pub use health::{OptimizerHealthChecker, UpstreamHealth};
pub use models::*;
pub use poller::{LiveFeedState, LivePoller};
