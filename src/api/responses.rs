// 统一响应格式

use actix_web::{HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// 统一 API 响应结构
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// 是否成功
    pub success: bool,
    /// 响应数据
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// 错误信息
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
    /// 请求 ID
    pub request_id: String,
    /// 响应时间戳
    pub timestamp: DateTime<Utc>,
    /// API 版本
    pub version: String,
}

impl<T> ApiResponse<T> {
    /// 创建成功响应
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            request_id: generate_request_id(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 创建无内容响应
    pub fn no_content() -> Self {
        Self {
            success: true,
            data: None,
            error: None,
            request_id: generate_request_id(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 创建错误响应
    pub fn error(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            request_id: generate_request_id(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// API 错误信息
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 错误详情
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// 错误字段（用于表单验证错误）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    /// 创建错误响应
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
            field: None,
        }
    }

    /// 创建资源不存在错误响应
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
            field: None,
        }
    }

    /// 创建未授权错误响应
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "AUTHENTICATION_ERROR".to_string(),
            message: message.into(),
            details: None,
            field: None,
        }
    }
}

/// 生成请求 ID
fn generate_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// HTTP 响应构建器
pub struct HttpResponseBuilder;

impl HttpResponseBuilder {
    /// 创建 200 OK 响应
    pub fn ok<T: Serialize>(data: T) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Ok().json(ApiResponse::ok(data)))
    }

    /// 创建 201 Created 响应
    pub fn created<T: Serialize>(data: T) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Created().json(ApiResponse::ok(data)))
    }

    /// 创建 204 No Content 响应
    pub fn no_content() -> ActixResult<HttpResponse> {
        Ok(HttpResponse::NoContent().json(ApiResponse::<serde_json::Value>::no_content()))
    }

    /// 创建 400 Bad Request 响应
    pub fn bad_request(message: impl Into<String>) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::BadRequest()
            .json(ApiResponse::<serde_json::Value>::error(ApiError::bad_request(message))))
    }

    /// 创建 401 Unauthorized 响应
    pub fn unauthorized(message: impl Into<String>) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::<serde_json::Value>::error(ApiError::unauthorized(message))))
    }

    /// 创建 404 Not Found 响应
    pub fn not_found(resource: impl Into<String>) -> ActixResult<HttpResponse> {
        Ok(HttpResponse::NotFound()
            .json(ApiResponse::<serde_json::Value>::error(ApiError::not_found(resource))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_ok() {
        let response = ApiResponse::ok(serde_json::json!({ "value": 42 }));
        assert!(response.success);
        assert!(response.data.is_some());
        assert!(response.error.is_none());
        assert!(!response.request_id.is_empty());
    }

    #[test]
    fn test_api_response_error() {
        let response: ApiResponse<serde_json::Value> =
            ApiResponse::error(ApiError::bad_request("参数错误"));
        assert!(!response.success);
        assert!(response.data.is_none());
        assert_eq!(response.error.unwrap().code, "BAD_REQUEST");
    }
}
