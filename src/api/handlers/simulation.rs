// 优化模拟 API 处理器
// 看板前端与外部优化后端之间的代理层

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::optimizer::OptimizationRequest;
use crate::services::simulation::SimulationService;

/// 执行调度优化
#[utoipa::path(
    post,
    path = "/simulation/optimize",
    tag = "Simulation",
    summary = "执行一次调度优化",
    description = "边界校验：电力 [0,150] MW、蒸汽 [0,600] T/hr、小时 [0,23]；\
                   校验通过后转发给外部优化后端",
    request_body = OptimizationRequest,
    responses(
        (status = 200, description = "优化完成"),
        (status = 400, description = "输入越界或无可行解"),
        (status = 502, description = "优化后端不可用")
    ),
    security(("bearer_auth" = []))
)]
pub async fn optimize(
    _auth: AuthExtractor,
    request: web::Json<OptimizationRequest>,
) -> ActixResult<HttpResponse> {
    let simulation = SimulationService::get()?;
    let response = simulation.optimize(request.into_inner()).await?;
    HttpResponseBuilder::ok(response)
}

/// 获取实时电站状态
#[utoipa::path(
    get,
    path = "/simulation/live",
    tag = "Simulation",
    summary = "获取电站实时状态",
    description = "从服务端轮询缓存读取最近快照，附带加载/错误标志；不触发上游请求",
    responses(
        (status = 200, description = "实时快照与轮询状态")
    ),
    security(("bearer_auth" = []))
)]
pub async fn live(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let simulation = SimulationService::get()?;
    let feed = simulation.live_feed().await;
    HttpResponseBuilder::ok(feed)
}

/// 获取预定义场景
#[utoipa::path(
    get,
    path = "/simulation/scenarios",
    tag = "Simulation",
    summary = "获取预定义优化场景",
    responses(
        (status = 200, description = "场景列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn scenarios(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let simulation = SimulationService::get()?;
    let scenarios = simulation.scenarios().await?;
    HttpResponseBuilder::ok(scenarios)
}

/// 获取系统配置信息
#[utoipa::path(
    get,
    path = "/simulation/system-info",
    tag = "Simulation",
    summary = "获取优化系统配置信息",
    description = "财务常量、物理系数与系统约束，供前端展示与输入校验",
    responses(
        (status = 200, description = "系统配置信息")
    ),
    security(("bearer_auth" = []))
)]
pub async fn system_info(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let simulation = SimulationService::get()?;
    let info = simulation.system_info().await?;
    HttpResponseBuilder::ok(info)
}

/// 探测优化后端健康状态
#[utoipa::path(
    get,
    path = "/simulation/backend-health",
    tag = "Simulation",
    summary = "探测优化后端健康状态",
    responses(
        (status = 200, description = "探测结果（含不可达信息）")
    ),
    security(("bearer_auth" = []))
)]
pub async fn backend_health(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let simulation = SimulationService::get()?;
    let health = simulation.backend_health().await;
    HttpResponseBuilder::ok(health)
}

/// 配置模拟路由
pub fn configure_simulation_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/simulation")
            .route("/optimize", web::post().to(optimize))
            .route("/live", web::get().to(live))
            .route("/scenarios", web::get().to(scenarios))
            .route("/system-info", web::get().to(system_info))
            .route("/backend-health", web::get().to(backend_health)),
    );
}
