// 版本信息处理器

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::api::models::VersionInfo;
use crate::api::responses::HttpResponseBuilder;

/// 获取版本信息
#[utoipa::path(
    get,
    path = "/version",
    tag = "Version",
    summary = "获取版本信息",
    responses(
        (status = 200, description = "版本信息", body = VersionInfo)
    )
)]
pub async fn get_version() -> ActixResult<HttpResponse> {
    HttpResponseBuilder::ok(VersionInfo::current())
}

/// 配置版本信息路由
pub fn configure_version_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/version", web::get().to(get_version));
}
