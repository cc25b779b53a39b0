// 认证服务
// 处理用户认证与令牌管理

use bcrypt::verify;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::middleware::auth::JwtUtils;
use crate::config::SecurityConfig;
use crate::db::entities::user;
use crate::db::repositories::UserRepository;
use crate::errors::EnerboardError;

/// 登录请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct LoginRequest {
    /// 邮箱
    pub email: String,
    /// 密码
    pub password: String,
}

/// 用户信息
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserInfo {
    /// 用户 ID
    pub id: Uuid,
    /// 邮箱
    pub email: String,
    /// 显示名称
    pub display_name: String,
    /// 角色
    pub role: user::UserRole,
}

impl From<user::Model> for UserInfo {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            role: model.role,
        }
    }
}

/// 登录响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    /// 访问令牌
    pub access_token: String,
    /// 令牌类型
    pub token_type: String,
    /// 过期时间（秒）
    pub expires_in: i64,
    /// 用户信息
    pub user: UserInfo,
}

/// 认证服务
pub struct AuthService {
    db: DatabaseConnection,
    security: SecurityConfig,
}

impl AuthService {
    /// 创建新的认证服务
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        Self { db, security }
    }

    /// 用户登录
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, EnerboardError> {
        let user = UserRepository::find_by_email(&self.db, &request.email)
            .await?
            .ok_or_else(|| EnerboardError::authentication("邮箱或密码错误"))?;

        if !user.is_active() {
            warn!(user_id = %user.id, "非活跃用户尝试登录");
            return Err(EnerboardError::authentication("账户不可用"));
        }

        let password_ok = verify(&request.password, &user.password_hash)
            .map_err(|e| EnerboardError::internal(format!("密码校验失败: {}", e)))?;

        if !password_ok {
            return Err(EnerboardError::authentication("邮箱或密码错误"));
        }

        let access_token = JwtUtils::issue(
            user.id,
            &user.role,
            &self.security.jwt_secret,
            self.security.jwt_expiration,
        )?;

        UserRepository::touch_login(&self.db, user.id).await?;

        info!(user_id = %user.id, "用户登录成功");

        Ok(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: self.security.jwt_expiration as i64,
            user: user.into(),
        })
    }

    /// 获取当前用户信息
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: Uuid) -> Result<UserInfo, EnerboardError> {
        let user = UserRepository::find_by_id(&self.db, user_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("用户"))?;
        Ok(user.into())
    }
}
