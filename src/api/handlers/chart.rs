// 图表管理 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::db::DatabaseManager;
use crate::services::chart::{
    ChartService, CreateChartRequest, PlaceChartRequest, UpdateChartRequest,
};

/// 创建图表
#[utoipa::path(
    post,
    path = "/charts",
    tag = "Chart",
    summary = "创建图表",
    request_body = CreateChartRequest,
    responses(
        (status = 201, description = "图表创建成功"),
        (status = 400, description = "请求参数错误")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_chart(
    auth: AuthExtractor,
    request: web::Json<CreateChartRequest>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let chart = service.create(auth.0.user_id, request.into_inner()).await?;
    HttpResponseBuilder::created(chart)
}

/// 列出图表
#[utoipa::path(
    get,
    path = "/charts",
    tag = "Chart",
    summary = "列出当前用户可见的图表",
    responses(
        (status = 200, description = "图表列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_charts(auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let charts = service.list(auth.0.user_id).await?;
    HttpResponseBuilder::ok(charts)
}

/// 获取图表详情
#[utoipa::path(
    get,
    path = "/charts/{chart_id}",
    tag = "Chart",
    summary = "获取图表详情",
    params(
        ("chart_id" = Uuid, Path, description = "图表 ID")
    ),
    responses(
        (status = 200, description = "图表详情"),
        (status = 404, description = "图表不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_chart(auth: AuthExtractor, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let chart = service.get(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(chart)
}

/// 更新图表
#[utoipa::path(
    put,
    path = "/charts/{chart_id}",
    tag = "Chart",
    summary = "更新图表，配置变更会生成版本快照",
    params(
        ("chart_id" = Uuid, Path, description = "图表 ID")
    ),
    request_body = UpdateChartRequest,
    responses(
        (status = 200, description = "更新成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_chart(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<UpdateChartRequest>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let chart = service
        .update(auth.0.user_id, path.into_inner(), request.into_inner())
        .await?;
    HttpResponseBuilder::ok(chart)
}

/// 删除图表
#[utoipa::path(
    delete,
    path = "/charts/{chart_id}",
    tag = "Chart",
    summary = "删除图表",
    params(
        ("chart_id" = Uuid, Path, description = "图表 ID")
    ),
    responses(
        (status = 204, description = "删除成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_chart(auth: AuthExtractor, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    service.delete(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::no_content()
}

/// 查询版本历史
#[utoipa::path(
    get,
    path = "/charts/{chart_id}/versions",
    tag = "Chart",
    summary = "查询图表版本历史",
    params(
        ("chart_id" = Uuid, Path, description = "图表 ID")
    ),
    responses(
        (status = 200, description = "版本列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_versions(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let versions = service.versions(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(versions)
}

/// 放置图表到标签页
#[utoipa::path(
    post,
    path = "/charts/{chart_id}/placements",
    tag = "Chart",
    summary = "将图表放置到看板标签页",
    params(
        ("chart_id" = Uuid, Path, description = "图表 ID")
    ),
    request_body = PlaceChartRequest,
    responses(
        (status = 201, description = "放置成功"),
        (status = 409, description = "图表已在该标签页上")
    ),
    security(("bearer_auth" = []))
)]
pub async fn place_chart(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<PlaceChartRequest>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let placement = service
        .place(auth.0.user_id, path.into_inner(), request.into_inner())
        .await?;
    HttpResponseBuilder::created(placement)
}

/// 列出标签页布局
#[utoipa::path(
    get,
    path = "/tabs/{tab_id}/placements",
    tag = "Chart",
    summary = "列出标签页上的图表布局",
    params(
        ("tab_id" = Uuid, Path, description = "标签页 ID")
    ),
    responses(
        (status = 200, description = "布局列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_placements(
    _auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    let placements = service.placements(path.into_inner()).await?;
    HttpResponseBuilder::ok(placements)
}

/// 移除布局
#[utoipa::path(
    delete,
    path = "/placements/{placement_id}",
    tag = "Chart",
    summary = "从标签页移除图表",
    params(
        ("placement_id" = Uuid, Path, description = "布局 ID")
    ),
    responses(
        (status = 204, description = "移除成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn remove_placement(
    _auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = chart_service()?;
    service.remove_placement(path.into_inner()).await?;
    HttpResponseBuilder::no_content()
}

/// 构造图表服务
fn chart_service() -> Result<ChartService, crate::errors::EnerboardError> {
    let db_manager = DatabaseManager::get()?;
    Ok(ChartService::new(db_manager.get_connection().clone()))
}

/// 配置图表路由
pub fn configure_chart_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/charts")
            .route("", web::post().to(create_chart))
            .route("", web::get().to(list_charts))
            .route("/{chart_id}", web::get().to(get_chart))
            .route("/{chart_id}", web::put().to(update_chart))
            .route("/{chart_id}", web::delete().to(delete_chart))
            .route("/{chart_id}/versions", web::get().to(list_versions))
            .route("/{chart_id}/placements", web::post().to(place_chart)),
    )
    .route("/tabs/{tab_id}/placements", web::get().to(list_placements))
    .route("/placements/{placement_id}", web::delete().to(remove_placement));
}
