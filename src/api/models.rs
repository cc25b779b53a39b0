// API 通用数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 健康状态
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// 依赖健康状态
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DependencyHealth {
    /// 依赖名称（database / optimizer-backend）
    pub name: String,
    /// 健康状态
    pub status: HealthStatus,
    /// 响应时间（毫秒）
    pub response_time_ms: u64,
    /// 详情
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// 失败原因
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 健康检查响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 整体状态
    pub status: HealthStatus,
    /// 检查时间
    pub timestamp: DateTime<Utc>,
    /// 服务版本
    pub version: String,
    /// 依赖状态
    pub dependencies: Vec<DependencyHealth>,
}

/// 版本信息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VersionInfo {
    /// 服务名称
    pub name: String,
    /// 语义化版本
    pub version: String,
    /// API 版本
    pub api_version: String,
    /// 构建环境
    pub profile: String,
}

impl VersionInfo {
    pub fn current() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            api_version: "v1".to_string(),
            profile: if cfg!(debug_assertions) {
                "development".to_string()
            } else {
                "production".to_string()
            },
        }
    }
}

/// 分页查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PaginationQuery {
    /// 页码，从 1 开始
    pub page: Option<u32>,
    /// 每页大小，默认 20，最大 100
    pub page_size: Option<u32>,
}

impl PaginationQuery {
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(20).clamp(1, 100)
    }
}
