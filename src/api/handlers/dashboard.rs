// 看板管理 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::db::DatabaseManager;
use crate::services::dashboard::{
    CreateDashboardRequest, DashboardService, UpdateDashboardRequest,
};

/// 看板列表查询参数
#[derive(Debug, Deserialize, ToSchema)]
pub struct ListDashboardsQuery {
    /// 是否包含已归档看板
    #[serde(default)]
    pub include_archived: bool,
}

/// 创建标签页请求
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTabRequest {
    /// 标签页标题
    pub title: String,
}

/// 创建看板
#[utoipa::path(
    post,
    path = "/dashboards",
    tag = "Dashboard",
    summary = "创建看板",
    request_body = CreateDashboardRequest,
    responses(
        (status = 201, description = "看板创建成功"),
        (status = 400, description = "请求参数错误"),
        (status = 403, description = "没有团队权限")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_dashboard(
    auth: AuthExtractor,
    request: web::Json<CreateDashboardRequest>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let dashboard = service.create(auth.0.user_id, request.into_inner()).await?;
    HttpResponseBuilder::created(dashboard)
}

/// 列出看板
#[utoipa::path(
    get,
    path = "/dashboards",
    tag = "Dashboard",
    summary = "列出当前用户可见的看板",
    params(
        ("include_archived" = Option<bool>, Query, description = "是否包含已归档看板")
    ),
    responses(
        (status = 200, description = "看板列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_dashboards(
    auth: AuthExtractor,
    query: web::Query<ListDashboardsQuery>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let dashboards = service.list(auth.0.user_id, query.include_archived).await?;
    HttpResponseBuilder::ok(dashboards)
}

/// 获取看板详情
#[utoipa::path(
    get,
    path = "/dashboards/{dashboard_id}",
    tag = "Dashboard",
    summary = "获取看板详情",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    responses(
        (status = 200, description = "看板详情"),
        (status = 404, description = "看板不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_dashboard(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let dashboard = service.get(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(dashboard)
}

/// 更新看板
#[utoipa::path(
    put,
    path = "/dashboards/{dashboard_id}",
    tag = "Dashboard",
    summary = "更新看板",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    request_body = UpdateDashboardRequest,
    responses(
        (status = 200, description = "更新成功"),
        (status = 403, description = "没有编辑权限"),
        (status = 404, description = "看板不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn update_dashboard(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<UpdateDashboardRequest>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let dashboard = service
        .update(auth.0.user_id, path.into_inner(), request.into_inner())
        .await?;
    HttpResponseBuilder::ok(dashboard)
}

/// 归档看板
#[utoipa::path(
    post,
    path = "/dashboards/{dashboard_id}/archive",
    tag = "Dashboard",
    summary = "归档看板",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    responses(
        (status = 200, description = "归档成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn archive_dashboard(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let dashboard = service.archive(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(dashboard)
}

/// 删除看板
#[utoipa::path(
    delete,
    path = "/dashboards/{dashboard_id}",
    tag = "Dashboard",
    summary = "删除看板",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    responses(
        (status = 204, description = "删除成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_dashboard(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    service.delete(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::no_content()
}

/// 列出标签页
#[utoipa::path(
    get,
    path = "/dashboards/{dashboard_id}/tabs",
    tag = "Dashboard",
    summary = "列出看板标签页",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    responses(
        (status = 200, description = "标签页列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_tabs(auth: AuthExtractor, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let tabs = service.list_tabs(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(tabs)
}

/// 创建标签页
#[utoipa::path(
    post,
    path = "/dashboards/{dashboard_id}/tabs",
    tag = "Dashboard",
    summary = "创建看板标签页",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    request_body = CreateTabRequest,
    responses(
        (status = 201, description = "标签页创建成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_tab(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<CreateTabRequest>,
) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let tab = service
        .create_tab(auth.0.user_id, path.into_inner(), request.into_inner().title)
        .await?;
    HttpResponseBuilder::created(tab)
}

/// 删除标签页
#[utoipa::path(
    delete,
    path = "/dashboards/{dashboard_id}/tabs/{tab_id}",
    tag = "Dashboard",
    summary = "删除看板标签页",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID"),
        ("tab_id" = Uuid, Path, description = "标签页 ID")
    ),
    responses(
        (status = 204, description = "删除成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_tab(
    auth: AuthExtractor,
    path: web::Path<(Uuid, Uuid)>,
) -> ActixResult<HttpResponse> {
    let (dashboard_id, tab_id) = path.into_inner();
    let service = dashboard_service()?;
    service.delete_tab(auth.0.user_id, dashboard_id, tab_id).await?;
    HttpResponseBuilder::no_content()
}

/// 列出看板模板
#[utoipa::path(
    get,
    path = "/dashboard-templates",
    tag = "Dashboard",
    summary = "列出看板模板",
    responses(
        (status = 200, description = "模板列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_templates(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = dashboard_service()?;
    let templates = service.list_templates().await?;
    HttpResponseBuilder::ok(templates)
}

/// 构造看板服务
fn dashboard_service() -> Result<DashboardService, crate::errors::EnerboardError> {
    let db_manager = DatabaseManager::get()?;
    Ok(DashboardService::new(db_manager.get_connection().clone()))
}

/// 配置看板路由
pub fn configure_dashboard_routes(cfg: &mut web::ServiceConfig) {
    use crate::api::handlers::share;

    cfg.service(
        web::scope("/dashboards")
            .route("", web::post().to(create_dashboard))
            .route("", web::get().to(list_dashboards))
            .route("/{dashboard_id}", web::get().to(get_dashboard))
            .route("/{dashboard_id}", web::put().to(update_dashboard))
            .route("/{dashboard_id}", web::delete().to(delete_dashboard))
            .route("/{dashboard_id}/archive", web::post().to(archive_dashboard))
            .route("/{dashboard_id}/tabs", web::get().to(list_tabs))
            .route("/{dashboard_id}/tabs", web::post().to(create_tab))
            .route("/{dashboard_id}/tabs/{tab_id}", web::delete().to(delete_tab))
            // 看板分享链接
            .route(
                "/{dashboard_id}/share-links",
                web::post().to(share::create_share_link),
            )
            .route(
                "/{dashboard_id}/share-links",
                web::get().to(share::list_share_links),
            ),
    )
    .route("/dashboard-templates", web::get().to(list_templates));
}
