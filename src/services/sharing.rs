// 分享服务
// 看板分享链接的签发、解析与撤销

use rand::RngCore;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::entities::share_link::{self, SharePermission};
use crate::db::repositories::{DashboardRepository, ShareLinkRepository};
use crate::errors::EnerboardError;
use crate::services::dashboard::DashboardResponse;

/// 创建分享链接请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateShareLinkRequest {
    /// 访问权限（默认只读）
    pub permission: Option<SharePermission>,
    /// 有效期（秒），缺省用配置的默认值
    pub ttl_seconds: Option<u64>,
}

/// 分享链接响应
///
/// token 仅在创建时返回一次，之后只能看到元信息。
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ShareLinkResponse {
    pub id: Uuid,
    pub dashboard_id: Uuid,
    /// 明文令牌，仅创建时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub permission: SharePermission,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub revoked: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ShareLinkResponse {
    fn from_model(model: share_link::Model, token: Option<String>) -> Self {
        Self {
            id: model.id,
            dashboard_id: model.dashboard_id,
            token,
            permission: model.permission.clone(),
            expires_at: model.expires_at.with_timezone(&chrono::Utc),
            revoked: model.is_revoked(),
            created_at: model.created_at.with_timezone(&chrono::Utc),
        }
    }
}

/// 分享访问视图
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct SharedDashboardView {
    /// 被分享的看板
    pub dashboard: DashboardResponse,
    /// 链接权限
    pub permission: SharePermission,
    /// 链接过期时间
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// 分享服务
pub struct SharingService {
    db: DatabaseConnection,
    default_ttl: u64,
}

impl SharingService {
    /// 创建新的分享服务
    pub fn new(db: DatabaseConnection, default_ttl: u64) -> Self {
        Self { db, default_ttl }
    }

    /// 创建分享链接
    #[instrument(skip(self, request))]
    pub async fn create_link(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
        request: CreateShareLinkRequest,
    ) -> Result<ShareLinkResponse, EnerboardError> {
        // 看板必须存在且未归档
        let dashboard = DashboardRepository::find_by_id(&self.db, dashboard_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;
        if dashboard.is_archived {
            return Err(EnerboardError::validation("dashboard", "已归档的看板不能分享"));
        }

        let ttl = request.ttl_seconds.unwrap_or(self.default_ttl);
        if ttl == 0 {
            return Err(EnerboardError::validation("ttl_seconds", "有效期必须大于 0"));
        }

        let token = Self::generate_token();
        let token_hash = Self::hash_token(&token);
        let expires_at = chrono::Utc::now() + chrono::Duration::seconds(ttl as i64);

        let created = ShareLinkRepository::create(
            &self.db,
            dashboard_id,
            token_hash,
            request.permission.unwrap_or(SharePermission::View),
            user_id,
            expires_at,
        )
        .await?;

        info!(link_id = %created.id, dashboard_id = %dashboard_id, "分享链接已签发");
        Ok(ShareLinkResponse::from_model(created, Some(token)))
    }

    /// 列出看板的分享链接
    #[instrument(skip(self))]
    pub async fn list_links(
        &self,
        dashboard_id: Uuid,
    ) -> Result<Vec<ShareLinkResponse>, EnerboardError> {
        let links = ShareLinkRepository::list_for_dashboard(&self.db, dashboard_id).await?;
        Ok(links
            .into_iter()
            .map(|l| ShareLinkResponse::from_model(l, None))
            .collect())
    }

    /// 撤销分享链接
    #[instrument(skip(self))]
    pub async fn revoke_link(&self, link_id: Uuid) -> Result<ShareLinkResponse, EnerboardError> {
        let revoked = ShareLinkRepository::revoke(&self.db, link_id).await?;
        Ok(ShareLinkResponse::from_model(revoked, None))
    }

    /// 通过明文令牌解析分享链接（公开访问路径）
    ///
    /// 过期或撤销的链接返回 410。
    #[instrument(skip(self, token))]
    pub async fn resolve(&self, token: &str) -> Result<SharedDashboardView, EnerboardError> {
        let token_hash = Self::hash_token(token);

        let link = ShareLinkRepository::find_by_token_hash(&self.db, &token_hash)
            .await?
            .ok_or_else(|| EnerboardError::not_found("分享链接"))?;

        if link.is_revoked() {
            return Err(EnerboardError::sharing_with_id("链接已被撤销", link.id.to_string()));
        }
        if link.is_expired() {
            return Err(EnerboardError::sharing_with_id("链接已过期", link.id.to_string()));
        }

        let dashboard = DashboardRepository::find_by_id(&self.db, link.dashboard_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;

        Ok(SharedDashboardView {
            dashboard: dashboard.into(),
            permission: link.permission,
            expires_at: link.expires_at.with_timezone(&chrono::Utc),
        })
    }

    /// 生成随机令牌（32 字节，十六进制）
    fn generate_token() -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        hex_encode(&bytes)
    }

    /// 计算令牌哈希
    fn hash_token(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex_encode(&hasher.finalize())
    }
}

/// 字节转十六进制
fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_token_is_unique_and_hex() {
        let a = SharingService::generate_token();
        let b = SharingService::generate_token();

        assert_eq!(a.len(), 64);
        assert_ne!(a, b);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_hash_token_is_stable() {
        let token = "deadbeef";
        let h1 = SharingService::hash_token(token);
        let h2 = SharingService::hash_token(token);

        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64);
        assert_ne!(h1, token);
    }

    #[test]
    fn test_hash_differs_per_token() {
        assert_ne!(
            SharingService::hash_token("token-a"),
            SharingService::hash_token("token-b")
        );
    }
}
