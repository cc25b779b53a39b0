// 优化模拟服务
// 看板与聊天共用的优化后端门面：输入校验、重试、实时快照缓存

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::config::OptimizerConfig;
use crate::errors::EnerboardError;
use crate::optimizer::{
    validate_optimization_request, LiveFeedState, LivePoller, OptimizationRequest,
    OptimizationResponse, OptimizerClientManager, OptimizerHealthChecker, ScenarioList,
    SystemInfo, UpstreamHealth,
};

/// 全局模拟服务实例
static SIMULATION: OnceCell<Arc<SimulationService>> = OnceCell::new();

/// 实时数据响应
///
/// 从轮询缓存读取，loading/error 标志与快照一起返回。
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LiveFeedResponse {
    /// 最近一次成功的快照
    pub snapshot: Option<crate::optimizer::LiveState>,
    /// 是否尚未完成首次拉取
    pub is_loading: bool,
    /// 最近一次失败信息
    pub error: Option<String>,
    /// 连续失败次数
    pub consecutive_failures: u32,
    /// 快照时间
    pub last_success_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// 优化模拟服务
pub struct SimulationService {
    manager: Arc<OptimizerClientManager>,
    feed: Arc<RwLock<LiveFeedState>>,
}

impl SimulationService {
    /// 初始化全局模拟服务
    ///
    /// 创建客户端管理器，按配置启动实时轮询任务。
    pub fn init(config: OptimizerConfig) -> Result<Arc<Self>, EnerboardError> {
        let manager = Arc::new(OptimizerClientManager::new(config.clone())?);

        let feed = if config.poll_enabled {
            let poller = LivePoller::new(manager.clone(), config.poll_interval);
            let (state, _handle) = poller.spawn();
            info!(interval = config.poll_interval, "实时数据轮询已启动");
            state
        } else {
            info!("实时数据轮询已禁用");
            Arc::new(RwLock::new(LiveFeedState::default()))
        };

        let service = Arc::new(Self { manager, feed });

        SIMULATION
            .set(service.clone())
            .map_err(|_| EnerboardError::internal("模拟服务已经初始化"))?;

        Ok(service)
    }

    /// 获取全局模拟服务
    pub fn get() -> Result<Arc<Self>, EnerboardError> {
        SIMULATION
            .get()
            .cloned()
            .ok_or_else(|| EnerboardError::internal("模拟服务未初始化"))
    }

    /// 使用指定管理器构造（测试用，不注册全局实例）
    pub fn with_manager(manager: Arc<OptimizerClientManager>) -> Self {
        Self {
            manager,
            feed: Arc::new(RwLock::new(LiveFeedState::default())),
        }
    }

    /// 执行调度优化
    ///
    /// 先做本地边界校验，再带重试地调用上游。
    #[instrument(skip(self, request), fields(elec = request.elec_demand, steam = request.steam_demand))]
    pub async fn optimize(
        &self,
        request: OptimizationRequest,
    ) -> Result<OptimizationResponse, EnerboardError> {
        validate_optimization_request(&request)?;

        let manager = self.manager.clone();
        let request = Arc::new(request);

        let response = self
            .manager
            .with_retry(move || {
                let manager = manager.clone();
                let request = request.clone();
                Box::pin(async move { manager.client().optimize(&request).await })
            })
            .await?;

        info!(
            status = %response.status,
            total_cost = response.total_cost,
            savings = response.savings,
            "优化模拟完成"
        );
        Ok(response)
    }

    /// 读取实时数据（来自轮询缓存，不触发上游请求）
    pub async fn live_feed(&self) -> LiveFeedResponse {
        let state = self.feed.read().await;
        LiveFeedResponse {
            snapshot: state.snapshot.clone(),
            is_loading: state.is_loading,
            error: state.last_error.clone(),
            consecutive_failures: state.consecutive_failures,
            last_success_at: state.last_success_at,
        }
    }

    /// 获取预定义场景
    #[instrument(skip(self))]
    pub async fn scenarios(&self) -> Result<ScenarioList, EnerboardError> {
        self.manager.client().scenarios().await
    }

    /// 获取系统配置信息
    #[instrument(skip(self))]
    pub async fn system_info(&self) -> Result<SystemInfo, EnerboardError> {
        self.manager.client().system_info().await
    }

    /// 探测上游健康状态
    pub async fn backend_health(&self) -> UpstreamHealth {
        OptimizerHealthChecker::check(&self.manager).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_service() -> SimulationService {
        let config = OptimizerConfig {
            base_url: "mock".to_string(),
            timeout: 5,
            retry_attempts: 1,
            poll_interval: 5,
            poll_enabled: false,
        };
        SimulationService::with_manager(Arc::new(OptimizerClientManager::new(config).unwrap()))
    }

    #[tokio::test]
    async fn test_optimize_rejects_invalid_input_before_upstream() {
        let service = mock_service();
        let request = OptimizationRequest {
            elec_demand: 151.0,
            steam_demand: 400.0,
            constraints: None,
            hour: None,
            verbose: false,
        };

        let err = service.optimize(request).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_optimize_via_mock_backend() {
        let service = mock_service();
        let request = OptimizationRequest {
            elec_demand: 60.0,
            steam_demand: 400.0,
            constraints: None,
            hour: Some(14),
            verbose: false,
        };

        let response = service.optimize(request).await.unwrap();
        assert!(response.is_optimal());
    }

    #[tokio::test]
    async fn test_live_feed_initially_loading() {
        let service = mock_service();
        let feed = service.live_feed().await;
        assert!(feed.is_loading);
        assert!(feed.snapshot.is_none());
    }

    #[tokio::test]
    async fn test_backend_health_via_mock() {
        let service = mock_service();
        let health = service.backend_health().await;
        assert!(health.reachable);
        assert_eq!(health.optimizer_ready, Some(true));
    }
}
