// 优化后端健康探测
// 供详细健康检查端点聚合上游状态

use crate::errors::EnerboardError;
use crate::optimizer::client::OptimizerClientManager;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{instrument, warn};

/// 上游健康探测结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamHealth {
    /// 是否可达
    pub reachable: bool,
    /// 上游报告的状态
    pub status: Option<String>,
    /// 求解器是否就绪
    pub optimizer_ready: Option<bool>,
    /// 硫回收数据是否加载
    pub sulfur_data_loaded: Option<bool>,
    /// 探测耗时（毫秒）
    pub latency_ms: u64,
    /// 失败原因
    pub error_message: Option<String>,
}

/// 优化后端健康检查器
pub struct OptimizerHealthChecker;

impl OptimizerHealthChecker {
    /// 探测上游健康状态
    ///
    /// 探测失败不向上传播错误，以便健康端点总能返回聚合结果。
    #[instrument(skip(manager))]
    pub async fn check(manager: &OptimizerClientManager) -> UpstreamHealth {
        let start = Instant::now();

        match manager.client().health().await {
            Ok(health) => UpstreamHealth {
                reachable: true,
                status: Some(health.status),
                optimizer_ready: Some(health.optimizer_ready),
                sulfur_data_loaded: Some(health.sulfur_data_loaded),
                latency_ms: start.elapsed().as_millis() as u64,
                error_message: None,
            },
            Err(e) => {
                warn!(error = %e, "优化后端健康探测失败");
                UpstreamHealth {
                    reachable: false,
                    status: None,
                    optimizer_ready: None,
                    sulfur_data_loaded: None,
                    latency_ms: start.elapsed().as_millis() as u64,
                    error_message: Some(e.to_string()),
                }
            }
        }
    }

    /// 快速探测（仅返回可达性）
    pub async fn quick_check(manager: &OptimizerClientManager) -> Result<bool, EnerboardError> {
        manager.client().health().await?;
        Ok(true)
    }
}
