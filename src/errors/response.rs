// 错误响应格式化

use crate::errors::EnerboardError;
use actix_web::HttpResponse;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 错误响应结构
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetail,
    pub timestamp: DateTime<Utc>,
    pub request_id: Option<String>,
    pub trace_id: Option<String>,
}

/// 错误详情
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    pub details: Option<serde_json::Value>,
    pub retry_after: Option<u64>,
}

impl ErrorResponse {
    /// 从 EnerboardError 创建错误响应
    pub fn from_error(error: &EnerboardError) -> Self {
        let mut details = None;
        let mut retry_after = None;

        // 根据错误类型设置详细信息
        match error {
            EnerboardError::Database { code, .. } => {
                if let Some(code) = code {
                    details = Some(serde_json::json!({ "database_code": code }));
                }
            }
            EnerboardError::Optimizer { endpoint, .. } => {
                if let Some(endpoint) = endpoint {
                    details = Some(serde_json::json!({ "endpoint": endpoint }));
                }
            }
            EnerboardError::Validation { field, .. } => {
                details = Some(serde_json::json!({ "field": field }));
            }
            EnerboardError::Sharing { link_id, .. } => {
                if let Some(link_id) = link_id {
                    details = Some(serde_json::json!({ "link_id": link_id }));
                }
            }
            EnerboardError::RateLimit { retry_after: ra } => {
                retry_after = *ra;
            }
            EnerboardError::ExternalService { service, .. } => {
                details = Some(serde_json::json!({ "service": service }));
            }
            EnerboardError::Timeout { operation } => {
                details = Some(serde_json::json!({ "operation": operation }));
            }
            _ => {}
        }

        Self {
            success: false,
            error: ErrorDetail {
                code: error.error_code().to_string(),
                message: error.to_string(),
                details,
                retry_after,
            },
            timestamp: Utc::now(),
            request_id: None,
            trace_id: None,
        }
    }

    /// 设置请求 ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// 设置追踪 ID
    pub fn with_trace_id(mut self, trace_id: String) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// 转换为 HTTP 响应
    pub fn into_http_response(self) -> HttpResponse {
        let status_code = match self.error.code.as_str() {
            "CONFIGURATION_ERROR" => 500,
            "DATABASE_ERROR" => 500,
            "OPTIMIZER_ERROR" => 502,
            "CACHE_ERROR" => 500,
            "AUTHENTICATION_ERROR" => 401,
            "AUTHORIZATION_ERROR" => 403,
            "VALIDATION_ERROR" => 400,
            "NOT_FOUND" => 404,
            "CONFLICT" => 409,
            "RATE_LIMIT" => 429,
            "SHARING_ERROR" => 410,
            "EXTERNAL_SERVICE_ERROR" => 502,
            "INTERNAL_ERROR" => 500,
            "SERVICE_UNAVAILABLE" => 503,
            "TIMEOUT_ERROR" => 408,
            _ => 500,
        };

        let mut response = HttpResponse::build(
            actix_web::http::StatusCode::from_u16(status_code)
                .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR),
        );

        // 添加重试头
        if let Some(retry_after) = self.error.retry_after {
            response.insert_header(("Retry-After", retry_after.to_string()));
        }

        // 添加请求 ID 头
        if let Some(ref request_id) = self.request_id {
            response.insert_header(("X-Request-ID", request_id.clone()));
        }

        // 添加追踪 ID 头
        if let Some(ref trace_id) = self.trace_id {
            response.insert_header(("X-Trace-ID", trace_id.clone()));
        }

        response.json(self)
    }

    /// 创建通用错误响应
    pub fn generic_error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: message.into(),
                details: None,
                retry_after: None,
            },
            timestamp: Utc::now(),
            request_id: None,
            trace_id: None,
        }
    }

    /// 创建验证错误响应
    pub fn validation_error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error: ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.into(),
                details: Some(serde_json::json!({ "field": field.into() })),
                retry_after: None,
            },
            timestamp: Utc::now(),
            request_id: None,
            trace_id: None,
        }
    }
}
