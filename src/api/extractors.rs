// API 请求提取器
// 从请求中提取认证用户等上下文

use actix_web::{dev::Payload, FromRequest, HttpRequest};
use futures::future::{ready, Ready};

use crate::api::middleware::auth::{AuthenticatedUser, JwtUtils};
use crate::config::ConfigLoader;
use crate::errors::EnerboardError;

/// 认证用户提取器
///
/// 从 Authorization: Bearer <token> 头解析 JWT，
/// 验证失败时以 401 拒绝请求。
#[derive(Debug, Clone)]
pub struct AuthExtractor(pub AuthenticatedUser);

impl FromRequest for AuthExtractor {
    type Error = EnerboardError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req).map(AuthExtractor))
    }
}

/// 管理员提取器
///
/// 在认证基础上要求 admin 角色。
#[derive(Debug, Clone)]
pub struct AdminExtractor(pub AuthenticatedUser);

impl FromRequest for AdminExtractor {
    type Error = EnerboardError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(extract_user(req).and_then(|user| {
            if user.is_admin() {
                Ok(AdminExtractor(user))
            } else {
                Err(EnerboardError::forbidden("需要管理员权限"))
            }
        }))
    }
}

/// 从请求头解析认证用户
fn extract_user(req: &HttpRequest) -> Result<AuthenticatedUser, EnerboardError> {
    let header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| EnerboardError::authentication("缺少认证头"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| EnerboardError::authentication("认证头格式无效"))?;

    let config = ConfigLoader::get();
    JwtUtils::verify(token, &config.security.jwt_secret)
}
