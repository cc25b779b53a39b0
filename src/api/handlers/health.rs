// 健康检查处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use chrono::Utc;

use crate::api::models::{DependencyHealth, HealthResponse, HealthStatus};
use crate::api::responses::HttpResponseBuilder;
use crate::db;
use crate::services::simulation::SimulationService;

/// 简单健康检查
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    summary = "简单健康检查",
    description = "返回服务的基本健康状态",
    responses(
        (status = 200, description = "服务健康", body = HealthResponse)
    )
)]
pub async fn health_check() -> ActixResult<HttpResponse> {
    let health_response = HealthResponse {
        status: HealthStatus::Healthy,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies: vec![],
    };

    HttpResponseBuilder::ok(health_response)
}

/// 详细健康检查
///
/// 聚合数据库与优化后端两个依赖的状态。
#[utoipa::path(
    get,
    path = "/health/detailed",
    tag = "Health",
    summary = "详细健康检查",
    description = "返回服务及其依赖（数据库、优化后端）的详细健康状态",
    responses(
        (status = 200, description = "检查完成", body = HealthResponse)
    )
)]
pub async fn health_detailed() -> ActixResult<HttpResponse> {
    let mut dependencies = Vec::new();
    let mut overall_status = HealthStatus::Healthy;

    // 检查数据库连接
    let db_health = check_database_health().await;
    merge_status(&mut overall_status, &db_health.status);
    dependencies.push(db_health);

    // 检查优化后端
    let optimizer_health = check_optimizer_health().await;
    merge_status(&mut overall_status, &optimizer_health.status);
    dependencies.push(optimizer_health);

    let health_response = HealthResponse {
        status: overall_status,
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        dependencies,
    };

    HttpResponseBuilder::ok(health_response)
}

/// 就绪检查
#[utoipa::path(
    get,
    path = "/ready",
    tag = "Health",
    summary = "就绪检查",
    description = "服务是否已准备好处理请求（数据库可用）",
    responses(
        (status = 200, description = "已就绪"),
        (status = 503, description = "未就绪")
    )
)]
pub async fn readiness_check() -> ActixResult<HttpResponse> {
    match db::DatabaseHealthChecker::quick_check().await {
        Ok(_) => HttpResponseBuilder::ok(serde_json::json!({ "ready": true })),
        Err(e) => Ok(HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "ready": false,
            "error": e.to_string(),
        }))),
    }
}

/// 存活检查
#[utoipa::path(
    get,
    path = "/live",
    tag = "Health",
    summary = "存活检查",
    description = "进程级存活探针",
    responses(
        (status = 200, description = "存活")
    )
)]
pub async fn liveness_check() -> ActixResult<HttpResponse> {
    HttpResponseBuilder::ok(serde_json::json!({ "alive": true }))
}

/// 检查数据库健康
async fn check_database_health() -> DependencyHealth {
    let health = db::DatabaseHealthChecker::check_health().await;

    let status = match health.status {
        db::HealthStatus::Healthy => HealthStatus::Healthy,
        db::HealthStatus::Degraded => HealthStatus::Degraded,
        db::HealthStatus::Unhealthy => HealthStatus::Unhealthy,
    };

    DependencyHealth {
        name: "database".to_string(),
        status,
        response_time_ms: health.response_time_ms,
        details: health.version.map(|v| serde_json::json!({ "version": v })),
        error: health.error_message,
    }
}

/// 检查优化后端健康
async fn check_optimizer_health() -> DependencyHealth {
    match SimulationService::get() {
        Ok(simulation) => {
            let upstream = simulation.backend_health().await;
            DependencyHealth {
                name: "optimizer-backend".to_string(),
                status: if upstream.reachable {
                    HealthStatus::Healthy
                } else {
                    HealthStatus::Unhealthy
                },
                response_time_ms: upstream.latency_ms,
                details: Some(serde_json::json!({
                    "optimizer_ready": upstream.optimizer_ready,
                    "sulfur_data_loaded": upstream.sulfur_data_loaded,
                })),
                error: upstream.error_message,
            }
        }
        Err(e) => DependencyHealth {
            name: "optimizer-backend".to_string(),
            status: HealthStatus::Unhealthy,
            response_time_ms: 0,
            details: None,
            error: Some(e.to_string()),
        },
    }
}

/// 合并整体状态
fn merge_status(overall: &mut HealthStatus, dependency: &HealthStatus) {
    match dependency {
        HealthStatus::Unhealthy => *overall = HealthStatus::Unhealthy,
        HealthStatus::Degraded if *overall == HealthStatus::Healthy => {
            *overall = HealthStatus::Degraded
        }
        _ => {}
    }
}

/// 配置健康检查路由
pub fn configure_health_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/health/detailed", web::get().to(health_detailed))
        .route("/ready", web::get().to(readiness_check))
        .route("/live", web::get().to(liveness_check));
}
