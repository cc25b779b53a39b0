// 认证 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::config::ConfigLoader;
use crate::db::DatabaseManager;
use crate::services::auth::{AuthService, LoginRequest, LoginResponse, UserInfo};

/// 用户登录
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "Auth",
    summary = "用户登录",
    description = "邮箱密码登录，返回 JWT 访问令牌",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "登录成功", body = LoginResponse),
        (status = 401, description = "邮箱或密码错误")
    )
)]
pub async fn login(request: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    let db_manager = DatabaseManager::get()?;
    let config = ConfigLoader::get();
    let service = AuthService::new(
        db_manager.get_connection().clone(),
        config.security.clone(),
    );

    let response = service.login(request.into_inner()).await?;

    HttpResponseBuilder::ok(response)
}

/// 获取当前用户
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "Auth",
    summary = "获取当前用户信息",
    responses(
        (status = 200, description = "用户信息", body = UserInfo),
        (status = 401, description = "未认证")
    ),
    security(("bearer_auth" = []))
)]
pub async fn me(auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let db_manager = DatabaseManager::get()?;
    let config = ConfigLoader::get();
    let service = AuthService::new(
        db_manager.get_connection().clone(),
        config.security.clone(),
    );

    let user = service.current_user(auth.0.user_id).await?;

    HttpResponseBuilder::ok(user)
}

/// 配置认证路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me)),
    );
}
