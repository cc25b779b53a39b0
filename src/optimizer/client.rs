// 优化后端客户端模块
// 封装对外部能源调度优化服务的 HTTP 访问

use crate::config::OptimizerConfig;
use crate::errors::EnerboardError;
use crate::optimizer::models::{
    plant, BackendHealth, LiveEnvelope, LiveState, OptimizationRequest, OptimizationResponse,
    Scenario, ScenarioList, ScenarioParams, SystemInfo,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// 优化后端客户端特征
#[async_trait]
pub trait OptimizerClient: Send + Sync {
    /// 执行调度优化
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse, EnerboardError>;

    /// 获取电站实时状态
    async fn live_state(&self) -> Result<LiveState, EnerboardError>;

    /// 检查后端健康状态
    async fn health(&self) -> Result<BackendHealth, EnerboardError>;

    /// 获取系统配置信息
    async fn system_info(&self) -> Result<SystemInfo, EnerboardError>;

    /// 获取预定义场景
    async fn scenarios(&self) -> Result<ScenarioList, EnerboardError>;
}

/// 优化后端客户端管理器
#[derive(Clone)]
pub struct OptimizerClientManager {
    config: Arc<OptimizerConfig>,
    client: Arc<dyn OptimizerClient>,
}

impl OptimizerClientManager {
    /// 创建新的客户端管理器
    ///
    /// base_url 为 "mock" 时使用内置 Mock 客户端（测试/离线演示）。
    pub fn new(config: OptimizerConfig) -> Result<Self, EnerboardError> {
        let config = Arc::new(config);

        let client: Arc<dyn OptimizerClient> = if config.base_url == "mock" {
            Arc::new(MockOptimizerClient::new())
        } else {
            Arc::new(HttpOptimizerClient::new(config.clone())?)
        };

        info!("优化后端客户端初始化完成，端点: {}", config.base_url);

        Ok(Self { config, client })
    }

    /// 使用指定客户端构造（测试用）
    pub fn with_client(config: OptimizerConfig, client: Arc<dyn OptimizerClient>) -> Self {
        Self {
            config: Arc::new(config),
            client,
        }
    }

    /// 获取客户端
    pub fn client(&self) -> Arc<dyn OptimizerClient> {
        self.client.clone()
    }

    /// 获取配置
    pub fn config(&self) -> Arc<OptimizerConfig> {
        self.config.clone()
    }

    /// 执行带重试的操作
    ///
    /// 验证类错误（上游 400）不重试，其余错误按固定递增间隔重试。
    pub async fn with_retry<F, T>(&self, operation: F) -> Result<T, EnerboardError>
    where
        F: Fn() -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<T, EnerboardError>> + Send>>
            + Send
            + Sync,
        T: Send,
    {
        let mut last_error = None;

        for attempt in 1..=self.config.retry_attempts {
            match timeout(Duration::from_secs(self.config.timeout), operation()).await {
                Ok(Ok(result)) => {
                    if attempt > 1 {
                        info!("操作在第 {} 次尝试后成功", attempt);
                    }
                    return Ok(result);
                }
                Ok(Err(e)) => {
                    if e.is_client_error() {
                        // 输入问题，重试没有意义
                        return Err(e);
                    }
                    warn!("第 {} 次尝试失败: {}", attempt, e);
                    last_error = Some(e);

                    if attempt < self.config.retry_attempts {
                        let delay = Duration::from_millis(1000 * attempt as u64);
                        tokio::time::sleep(delay).await;
                    }
                }
                Err(_) => {
                    let timeout_error = EnerboardError::timeout(format!(
                        "优化后端请求超时 ({}s)",
                        self.config.timeout
                    ));
                    warn!("第 {} 次尝试超时", attempt);
                    last_error = Some(timeout_error);

                    if attempt < self.config.retry_attempts {
                        let delay = Duration::from_millis(1000 * attempt as u64);
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            EnerboardError::optimizer("所有重试尝试都失败了")
        }))
    }
}

/// HTTP 客户端实现
pub struct HttpOptimizerClient {
    config: Arc<OptimizerConfig>,
    http_client: reqwest::Client,
}

impl HttpOptimizerClient {
    pub fn new(config: Arc<OptimizerConfig>) -> Result<Self, EnerboardError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| EnerboardError::optimizer(format!("创建 HTTP 客户端失败: {}", e)))?;

        Ok(Self { config, http_client })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// 将上游非 2xx 响应转换为错误
    ///
    /// 上游以 {"detail": "..."} 报告错误；400 视为输入问题（例如
    /// "No optimal solution found"），其余状态码视为优化服务故障。
    async fn error_from_response(
        &self,
        endpoint: &str,
        response: reqwest::Response,
    ) -> EnerboardError {
        let status = response.status();
        let detail = response
            .json::<serde_json::Value>()
            .await
            .ok()
            .and_then(|body| body.get("detail").and_then(|d| d.as_str()).map(String::from))
            .unwrap_or_else(|| format!("上游返回状态码 {}", status));

        if status == reqwest::StatusCode::BAD_REQUEST {
            EnerboardError::validation_simple(detail)
        } else {
            EnerboardError::optimizer_with_endpoint(detail, endpoint)
        }
    }
}

#[async_trait]
impl OptimizerClient for HttpOptimizerClient {
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse, EnerboardError> {
        debug!(
            elec_demand = request.elec_demand,
            steam_demand = request.steam_demand,
            "调用优化后端"
        );

        let endpoint = self.endpoint("/api/optimize");
        let response = self
            .http_client
            .post(&endpoint)
            .json(request)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(&endpoint, response).await);
        }

        let result: OptimizationResponse = response
            .json()
            .await
            .map_err(|e| EnerboardError::optimizer(format!("解析优化响应失败: {}", e)))?;

        debug!(
            status = %result.status,
            total_cost = result.total_cost,
            savings = result.savings,
            "优化完成"
        );
        Ok(result)
    }

    async fn live_state(&self) -> Result<LiveState, EnerboardError> {
        let endpoint = self.endpoint("/api/live");
        let response = self.http_client.get(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(&endpoint, response).await);
        }

        let envelope: LiveEnvelope = response
            .json()
            .await
            .map_err(|e| EnerboardError::optimizer(format!("解析实时状态失败: {}", e)))?;

        if !envelope.success {
            return Err(EnerboardError::optimizer("上游实时接口返回失败标记"));
        }

        Ok(envelope.data)
    }

    async fn health(&self) -> Result<BackendHealth, EnerboardError> {
        let endpoint = self.endpoint("/api/health");
        let response = self.http_client.get(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(&endpoint, response).await);
        }

        let health: BackendHealth = response
            .json()
            .await
            .map_err(|e| EnerboardError::optimizer(format!("解析健康状态失败: {}", e)))?;
        Ok(health)
    }

    async fn system_info(&self) -> Result<SystemInfo, EnerboardError> {
        let endpoint = self.endpoint("/api/system-info");
        let response = self.http_client.get(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(&endpoint, response).await);
        }

        let info: SystemInfo = response
            .json()
            .await
            .map_err(|e| EnerboardError::optimizer(format!("解析系统信息失败: {}", e)))?;
        Ok(info)
    }

    async fn scenarios(&self) -> Result<ScenarioList, EnerboardError> {
        let endpoint = self.endpoint("/api/scenarios");
        let response = self.http_client.get(&endpoint).send().await?;

        if !response.status().is_success() {
            return Err(self.error_from_response(&endpoint, response).await);
        }

        let scenarios: ScenarioList = response
            .json()
            .await
            .map_err(|e| EnerboardError::optimizer(format!("解析场景列表失败: {}", e)))?;
        Ok(scenarios)
    }
}

/// Mock 客户端实现
///
/// 返回形状正确的合理数据，供测试和无后端的本地演示使用。
pub struct MockOptimizerClient;

impl MockOptimizerClient {
    pub fn new() -> Self {
        Self
    }
}

impl Default for MockOptimizerClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OptimizerClient for MockOptimizerClient {
    async fn optimize(
        &self,
        request: &OptimizationRequest,
    ) -> Result<OptimizationResponse, EnerboardError> {
        use crate::optimizer::models::{CostBreakdown, GtaResult};

        let hour = request.hour.unwrap_or(12);
        let grid_cost = plant::grid_cost(hour);

        // 简单均分需求，不做真实求解
        let per_gta_power = (request.elec_demand / 3.0).min(37.0);
        let per_gta_soutirage = (request.steam_demand / 3.0).min(plant::MAX_SOUTIRAGE);
        let grid_import = (request.elec_demand - per_gta_power * 3.0).max(0.0);
        let boiler_output =
            (request.steam_demand - per_gta_soutirage * 3.0 - 90.0).clamp(0.0, plant::MAX_BOILER_CAPACITY);

        let grid = grid_import * grid_cost * 1000.0;
        let boiler = boiler_output * plant::BOILER_COST;
        let sulfur = 90.0 * plant::SULFURIC_HEAT_COST;
        let gta_fuel = per_gta_power * 3.0 * plant::GTA_FUEL_COST * 1000.0;
        let total_cost = grid + boiler + sulfur + gta_fuel;
        let baseline_cost = total_cost * 1.18;

        let mut demands = HashMap::new();
        demands.insert("electricity".to_string(), request.elec_demand);
        demands.insert("steam".to_string(), request.steam_demand);

        Ok(OptimizationResponse {
            status: "Optimal".to_string(),
            gtas: (1..=3)
                .map(|n| GtaResult {
                    gta_number: n,
                    admission: (per_gta_soutirage + per_gta_power * 3.6).min(plant::MAX_ADMISSION),
                    soutirage: per_gta_soutirage,
                    power: per_gta_power,
                })
                .collect(),
            grid_import,
            boiler_output,
            sulfur_steam: 90.0,
            total_cost,
            cost_breakdown: CostBreakdown {
                grid,
                boiler,
                sulfur,
                gta_fuel,
            },
            baseline_cost,
            savings: baseline_cost - total_cost,
            demands,
            constraints_applied: request
                .constraints
                .clone()
                .unwrap_or_else(|| serde_json::json!({})),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn live_state(&self) -> Result<LiveState, EnerboardError> {
        use crate::optimizer::models::{GtaOperation, GtaOperations, LiveDemands};

        Ok(LiveState {
            timestamp: chrono::Utc::now().to_rfc3339(),
            gta_operations: GtaOperations {
                gta1: GtaOperation { power: 22.0, admission: 175.0, soutirage: 145.0 },
                gta2: GtaOperation { power: 24.0, admission: 195.0, soutirage: 155.0 },
                gta3: GtaOperation { power: 21.0, admission: 170.0, soutirage: 140.0 },
            },
            total_power_generated: 67.0,
            total_steam_gta: 440.0,
            sulfur_flow: 45.0,
            free_steam_equivalent: 90.0,
            mp_pressure: Some(8.8),
            pressure_alert: false,
            grid_import_estimated: 3.5,
            boiler_usage_estimated: 50.0,
            efficiency_percent: 86.5,
            cost_per_hour: 19850.0,
            co2_emissions_kg_per_hour: 45200.0,
            free_energy_percent: 15.5,
            demands: LiveDemands {
                electricity: 70.5,
                steam: 580.0,
            },
            steam_economics: None,
            opportunity_cost: None,
        })
    }

    async fn health(&self) -> Result<BackendHealth, EnerboardError> {
        Ok(BackendHealth {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            optimizer_ready: true,
            sulfur_data_loaded: true,
        })
    }

    async fn system_info(&self) -> Result<SystemInfo, EnerboardError> {
        let mut financial_constants = HashMap::new();
        financial_constants.insert("grid_peak_cost".to_string(), plant::GRID_PEAK_COST);
        financial_constants.insert("grid_off_peak_cost".to_string(), plant::GRID_OFF_PEAK_COST);
        financial_constants.insert("boiler_cost".to_string(), plant::BOILER_COST);
        financial_constants.insert("sulfuric_heat_cost".to_string(), plant::SULFURIC_HEAT_COST);
        financial_constants.insert("gta_fuel_cost".to_string(), plant::GTA_FUEL_COST);
        financial_constants.insert("peak_hours_start".to_string(), plant::PEAK_HOURS_START as f64);
        financial_constants.insert("peak_hours_end".to_string(), plant::PEAK_HOURS_END as f64);

        let mut system_constraints = HashMap::new();
        system_constraints.insert(
            "max_total_steam_production".to_string(),
            plant::MAX_TOTAL_STEAM_PRODUCTION,
        );
        system_constraints.insert(
            "max_total_power_production".to_string(),
            plant::MAX_TOTAL_POWER_PRODUCTION,
        );
        system_constraints.insert("max_grid_import".to_string(), plant::MAX_GRID_IMPORT);
        system_constraints.insert("max_boiler_capacity".to_string(), plant::MAX_BOILER_CAPACITY);

        Ok(SystemInfo {
            financial_constants,
            physics_coefficients: serde_json::json!({
                "max_admission": plant::MAX_ADMISSION,
                "min_admission": 0.0,
            }),
            system_constraints,
            gta_models: Vec::new(),
        })
    }

    async fn scenarios(&self) -> Result<ScenarioList, EnerboardError> {
        Ok(ScenarioList {
            scenarios: vec![
                Scenario {
                    name: "Normal Operation".to_string(),
                    description: "所有 GTA 可用的典型白天工况".to_string(),
                    params: ScenarioParams {
                        elec_demand: 60.0,
                        steam_demand: 400.0,
                        constraints: serde_json::json!({}),
                        hour: 14,
                    },
                },
                Scenario {
                    name: "GTA 2 Maintenance".to_string(),
                    description: "GTA 2 检修，降容运行".to_string(),
                    params: ScenarioParams {
                        elec_demand: 60.0,
                        steam_demand: 400.0,
                        constraints: serde_json::json!({ "gta2_status": "MAINTENANCE" }),
                        hour: 14,
                    },
                },
                Scenario {
                    name: "Peak Hours High Demand".to_string(),
                    description: "峰时高需求工况".to_string(),
                    params: ScenarioParams {
                        elec_demand: 70.0,
                        steam_demand: 450.0,
                        constraints: serde_json::json!({}),
                        hour: 19,
                    },
                },
                Scenario {
                    name: "Night Operation".to_string(),
                    description: "谷时低需求工况".to_string(),
                    params: ScenarioParams {
                        elec_demand: 40.0,
                        steam_demand: 300.0,
                        constraints: serde_json::json!({}),
                        hour: 2,
                    },
                },
            ],
        })
    }
}
