// JWT 认证工具与提取支持
// 令牌签发/验证与请求内的用户身份表示

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::entities::user::UserRole;
use crate::errors::EnerboardError;

/// JWT 声明结构
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// 用户 ID
    pub sub: String,
    /// 用户角色
    pub role: String,
    /// 签发时间
    pub iat: i64,
    /// 过期时间
    pub exp: i64,
    /// 签发者
    pub iss: String,
}

/// 已认证用户
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub role: UserRole,
}

impl AuthenticatedUser {
    /// 是否为管理员
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 是否可以编辑资源
    pub fn can_edit(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Operator)
    }
}

/// JWT 工具
pub struct JwtUtils;

impl JwtUtils {
    const ISSUER: &'static str = "enerboard";

    /// 签发访问令牌
    pub fn issue(
        user_id: Uuid,
        role: &UserRole,
        secret: &str,
        expiration_secs: u64,
    ) -> Result<String, EnerboardError> {
        let now = Utc::now().timestamp();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            role: Self::role_name(role).to_string(),
            iat: now,
            exp: now + expiration_secs as i64,
            iss: Self::ISSUER.to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| EnerboardError::internal(format!("令牌签发失败: {}", e)))
    }

    /// 验证令牌并还原用户身份
    pub fn verify(token: &str, secret: &str) -> Result<AuthenticatedUser, EnerboardError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[Self::ISSUER]);

        let data = decode::<JwtClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                EnerboardError::authentication("令牌已过期")
            }
            _ => EnerboardError::authentication("令牌无效"),
        })?;

        let user_id = Uuid::parse_str(&data.claims.sub)
            .map_err(|_| EnerboardError::authentication("令牌主体无效"))?;

        Ok(AuthenticatedUser {
            user_id,
            role: Self::parse_role(&data.claims.role)?,
        })
    }

    fn role_name(role: &UserRole) -> &'static str {
        match role {
            UserRole::Admin => "admin",
            UserRole::Operator => "operator",
            UserRole::Viewer => "viewer",
        }
    }

    fn parse_role(name: &str) -> Result<UserRole, EnerboardError> {
        match name {
            "admin" => Ok(UserRole::Admin),
            "operator" => Ok(UserRole::Operator),
            "viewer" => Ok(UserRole::Viewer),
            _ => Err(EnerboardError::authentication("令牌角色无效")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-of-sufficient-length";

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let user_id = Uuid::new_v4();
        let token = JwtUtils::issue(user_id, &UserRole::Operator, SECRET, 3600).unwrap();

        let user = JwtUtils::verify(&token, SECRET).unwrap();
        assert_eq!(user.user_id, user_id);
        assert_eq!(user.role, UserRole::Operator);
        assert!(user.can_edit());
        assert!(!user.is_admin());
    }

    #[test]
    fn test_verify_rejects_wrong_secret() {
        let token = JwtUtils::issue(Uuid::new_v4(), &UserRole::Viewer, SECRET, 3600).unwrap();
        let result = JwtUtils::verify(&token, "another-secret-key-also-long-enough");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(JwtUtils::verify("not.a.token", SECRET).is_err());
    }
}
