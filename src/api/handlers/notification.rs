// 通知 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use uuid::Uuid;

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::db::DatabaseManager;
use crate::services::notification::{NotificationQuery, NotificationService};

/// 列出通知
#[utoipa::path(
    get,
    path = "/notifications",
    tag = "Notification",
    summary = "列出当前用户的通知",
    params(
        ("unread_only" = Option<bool>, Query, description = "仅未读"),
        ("limit" = Option<u64>, Query, description = "数量上限")
    ),
    responses(
        (status = 200, description = "通知列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_notifications(
    auth: AuthExtractor,
    query: web::Query<NotificationQuery>,
) -> ActixResult<HttpResponse> {
    let service = notification_service()?;
    let notifications = service.list(auth.0.user_id, query.into_inner()).await?;
    HttpResponseBuilder::ok(notifications)
}

/// 未读数量
#[utoipa::path(
    get,
    path = "/notifications/unread-count",
    tag = "Notification",
    summary = "获取未读通知数量",
    responses(
        (status = 200, description = "未读数量")
    ),
    security(("bearer_auth" = []))
)]
pub async fn unread_count(auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = notification_service()?;
    let count = service.unread_count(auth.0.user_id).await?;
    HttpResponseBuilder::ok(count)
}

/// 标记已读
#[utoipa::path(
    post,
    path = "/notifications/{notification_id}/read",
    tag = "Notification",
    summary = "标记通知已读",
    params(
        ("notification_id" = Uuid, Path, description = "通知 ID")
    ),
    responses(
        (status = 200, description = "标记成功"),
        (status = 404, description = "通知不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_read(auth: AuthExtractor, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    let service = notification_service()?;
    let notification = service.mark_read(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(notification)
}

/// 全部标记已读
#[utoipa::path(
    post,
    path = "/notifications/read-all",
    tag = "Notification",
    summary = "标记所有通知已读",
    responses(
        (status = 200, description = "标记成功，返回更新数量")
    ),
    security(("bearer_auth" = []))
)]
pub async fn mark_all_read(auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = notification_service()?;
    let updated = service.mark_all_read(auth.0.user_id).await?;
    HttpResponseBuilder::ok(serde_json::json!({ "updated": updated }))
}

/// 构造通知服务
fn notification_service() -> Result<NotificationService, crate::errors::EnerboardError> {
    let db_manager = DatabaseManager::get()?;
    Ok(NotificationService::new(db_manager.get_connection().clone()))
}

/// 配置通知路由
pub fn configure_notification_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/notifications")
            .route("", web::get().to(list_notifications))
            .route("/unread-count", web::get().to(unread_count))
            .route("/read-all", web::post().to(mark_all_read))
            .route("/{notification_id}/read", web::post().to(mark_read)),
    );
}
