// 分享链接 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::config::ConfigLoader;
use crate::db::DatabaseManager;
use crate::services::sharing::{CreateShareLinkRequest, SharingService};

/// 创建分享链接
#[utoipa::path(
    post,
    path = "/dashboards/{dashboard_id}/share-links",
    tag = "Sharing",
    summary = "为看板创建分享链接",
    description = "明文令牌只在本次响应中返回一次",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    request_body = CreateShareLinkRequest,
    responses(
        (status = 201, description = "分享链接创建成功"),
        (status = 400, description = "看板已归档或参数错误")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_share_link(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<CreateShareLinkRequest>,
) -> ActixResult<HttpResponse> {
    let service = sharing_service()?;
    let link = service
        .create_link(auth.0.user_id, path.into_inner(), request.into_inner())
        .await?;
    HttpResponseBuilder::created(link)
}

/// 列出看板分享链接
#[utoipa::path(
    get,
    path = "/dashboards/{dashboard_id}/share-links",
    tag = "Sharing",
    summary = "列出看板的分享链接",
    params(
        ("dashboard_id" = Uuid, Path, description = "看板 ID")
    ),
    responses(
        (status = 200, description = "链接列表（不含明文令牌）")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_share_links(
    _auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = sharing_service()?;
    let links = service.list_links(path.into_inner()).await?;
    HttpResponseBuilder::ok(links)
}

/// 撤销分享链接
#[utoipa::path(
    delete,
    path = "/share-links/{link_id}",
    tag = "Sharing",
    summary = "撤销分享链接",
    params(
        ("link_id" = Uuid, Path, description = "链接 ID")
    ),
    responses(
        (status = 200, description = "撤销成功")
    ),
    security(("bearer_auth" = []))
)]
pub async fn revoke_share_link(
    _auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = sharing_service()?;
    let link = service.revoke_link(path.into_inner()).await?;
    HttpResponseBuilder::ok(link)
}

/// 通过令牌访问分享看板（公开端点）
#[utoipa::path(
    get,
    path = "/shared/{token}",
    tag = "Sharing",
    summary = "通过分享令牌访问看板",
    description = "公开端点，不需要认证；过期或撤销的链接返回 410",
    params(
        ("token" = String, Path, description = "分享令牌")
    ),
    responses(
        (status = 200, description = "看板视图"),
        (status = 404, description = "链接不存在"),
        (status = 410, description = "链接已过期或被撤销")
    )
)]
pub async fn resolve_shared(path: web::Path<String>) -> ActixResult<HttpResponse> {
    let service = sharing_service()?;
    let view = service.resolve(&path.into_inner()).await?;
    HttpResponseBuilder::ok(view)
}

/// 构造分享服务
fn sharing_service() -> Result<SharingService, crate::errors::EnerboardError> {
    let db_manager = DatabaseManager::get()?;
    let config = ConfigLoader::get();
    Ok(SharingService::new(
        db_manager.get_connection().clone(),
        config.security.share_link_ttl,
    ))
}

/// 配置分享路由
///
/// 看板下的子路径在看板路由的 scope 内注册（见 dashboard 处理器）。
pub fn configure_share_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/share-links/{link_id}", web::delete().to(revoke_share_link))
        .route("/shared/{token}", web::get().to(resolve_shared));
}
