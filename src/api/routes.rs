// API 路由定义
// 定义所有 API 端点的路由配置

use actix_web::{web, HttpResponse, Result as ActixResult};
use utoipa::OpenApi;

use crate::api::handlers::{
    auth, chart, chat, dashboard, health, notification, share, simulation, version,
};
use crate::api::middleware::RequestIdMiddleware;
use crate::api::responses::HttpResponseBuilder;

/// API 文档聚合
#[derive(OpenApi)]
#[openapi(
    info(
        title = "EnerBoard API",
        description = "化工厂能源看板平台 API 接口文档",
        version = "1.0.0",
        contact(
            name = "EnerBoard Team",
            url = "https://github.com/enerboard/enerboard"
        ),
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        health::health_check,
        health::health_detailed,
        health::readiness_check,
        health::liveness_check,
        version::get_version,
        auth::login,
        auth::me,
        dashboard::create_dashboard,
        dashboard::list_dashboards,
        dashboard::get_dashboard,
        dashboard::update_dashboard,
        dashboard::archive_dashboard,
        dashboard::delete_dashboard,
        dashboard::list_tabs,
        dashboard::create_tab,
        dashboard::delete_tab,
        dashboard::list_templates,
        chart::create_chart,
        chart::list_charts,
        chart::get_chart,
        chart::update_chart,
        chart::delete_chart,
        chart::list_versions,
        chart::place_chart,
        chart::list_placements,
        chart::remove_placement,
        chat::create_session,
        chat::list_sessions,
        chat::get_session,
        chat::close_session,
        chat::list_messages,
        chat::post_message,
        chat::execute_command,
        chat::list_agents,
        chat::list_commands,
        notification::list_notifications,
        notification::unread_count,
        notification::mark_read,
        notification::mark_all_read,
        share::create_share_link,
        share::list_share_links,
        share::revoke_share_link,
        share::resolve_shared,
        simulation::optimize,
        simulation::live,
        simulation::scenarios,
        simulation::system_info,
        simulation::backend_health,
    ),
    components(schemas(
        crate::api::models::HealthResponse,
        crate::api::models::HealthStatus,
        crate::api::models::DependencyHealth,
        crate::api::models::VersionInfo,
        crate::api::responses::ApiError,
        crate::services::auth::LoginRequest,
        crate::services::auth::LoginResponse,
        crate::services::auth::UserInfo,
        crate::services::dashboard::CreateDashboardRequest,
        crate::services::dashboard::UpdateDashboardRequest,
        crate::services::dashboard::DashboardResponse,
        crate::services::chart::CreateChartRequest,
        crate::services::chart::UpdateChartRequest,
        crate::services::chart::PlaceChartRequest,
        crate::services::chart::ChartResponse,
        crate::services::chat::CreateSessionRequest,
        crate::services::chat::PostMessageRequest,
        crate::services::chat::ExecuteCommandRequest,
        crate::services::notification::NotificationResponse,
        crate::services::notification::UnreadCountResponse,
        crate::services::sharing::CreateShareLinkRequest,
        crate::services::sharing::ShareLinkResponse,
        crate::services::sharing::SharedDashboardView,
        crate::optimizer::OptimizationRequest,
        crate::optimizer::OptimizationResponse,
        crate::optimizer::GtaResult,
        crate::optimizer::CostBreakdown,
        crate::optimizer::LiveState,
        crate::optimizer::BackendHealth,
        crate::optimizer::SystemInfo,
        crate::optimizer::Scenario,
        crate::services::simulation::LiveFeedResponse,
    )),
    tags(
        (name = "Health", description = "健康检查相关接口"),
        (name = "Version", description = "版本信息相关接口"),
        (name = "Auth", description = "认证相关接口"),
        (name = "Dashboard", description = "看板管理相关接口"),
        (name = "Chart", description = "图表管理相关接口"),
        (name = "Chat", description = "聊天与 Agent 相关接口"),
        (name = "Notification", description = "通知相关接口"),
        (name = "Sharing", description = "看板分享相关接口"),
        (name = "Simulation", description = "优化模拟与实时数据相关接口"),
    )
)]
pub struct ApiDoc;

/// API 根路径处理器
async fn api_root() -> ActixResult<HttpResponse> {
    let info = serde_json::json!({
        "name": "EnerBoard API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "化工厂能源看板平台 API 接口",
        "documentation": "/api/v1/docs",
        "timestamp": chrono::Utc::now(),
        "endpoints": {
            "health": {
                "simple": "/api/v1/health",
                "detailed": "/api/v1/health/detailed",
                "ready": "/api/v1/ready",
                "live": "/api/v1/live"
            },
            "simulation": {
                "optimize": "/api/v1/simulation/optimize",
                "live": "/api/v1/simulation/live",
                "scenarios": "/api/v1/simulation/scenarios",
                "system_info": "/api/v1/simulation/system-info"
            },
            "docs": {
                "openapi": "/api/v1/openapi.json",
                "swagger": "/api/v1/docs"
            }
        }
    });

    HttpResponseBuilder::ok(info)
}

/// 配置 API 路由
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // 全局中间件
            .wrap(RequestIdMiddleware)
            .service(
                web::scope("/v1")
                    // API 根路径
                    .route("", web::get().to(api_root))
                    // 健康检查路由
                    .configure(health::configure_health_routes)
                    // 版本信息路由
                    .configure(version::configure_version_routes)
                    // 认证路由
                    .configure(auth::configure_auth_routes)
                    // 看板管理路由
                    .configure(dashboard::configure_dashboard_routes)
                    // 图表管理路由
                    .configure(chart::configure_chart_routes)
                    // 聊天路由
                    .configure(chat::configure_chat_routes)
                    // 通知路由
                    .configure(notification::configure_notification_routes)
                    // 分享路由
                    .configure(share::configure_share_routes)
                    // 优化模拟路由
                    .configure(simulation::configure_simulation_routes)
                    // OpenAPI JSON 端点
                    .route("/openapi.json", web::get().to(get_openapi_spec)),
            ),
    );
}

/// 获取 OpenAPI 规范
async fn get_openapi_spec() -> ActixResult<HttpResponse> {
    let openapi = ApiDoc::openapi();
    HttpResponseBuilder::ok(openapi)
}

/// 配置 Swagger UI
pub fn configure_swagger_ui(cfg: &mut web::ServiceConfig) {
    cfg.service(
        utoipa_swagger_ui::SwaggerUi::new("/api/v1/docs/{_:.*}")
            .url("/api/v1/openapi.json", ApiDoc::openapi()),
    );
}

/// API 路由配置辅助函数
pub struct ApiRouteConfig;

impl ApiRouteConfig {
    /// 配置所有 API 路由
    pub fn configure_all(cfg: &mut web::ServiceConfig) {
        // 配置主要路由
        configure_routes(cfg);

        // 配置 Swagger UI
        configure_swagger_ui(cfg);
    }

    /// 配置开发环境路由
    pub fn configure_dev(cfg: &mut web::ServiceConfig) {
        Self::configure_all(cfg);
    }

    /// 配置生产环境路由（不暴露 Swagger UI）
    pub fn configure_prod(cfg: &mut web::ServiceConfig) {
        configure_routes(cfg);
    }
}
