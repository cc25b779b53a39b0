// 分享链接仓储实现

use crate::db::entities::{prelude::*, share_link};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 分享链接仓储
pub struct ShareLinkRepository;

impl ShareLinkRepository {
    /// 创建分享链接记录
    #[instrument(skip(db, token_hash))]
    pub async fn create(
        db: &DatabaseConnection,
        dashboard_id: Uuid,
        token_hash: String,
        permission: share_link::SharePermission,
        created_by: Uuid,
        expires_at: chrono::DateTime<chrono::Utc>,
    ) -> Result<share_link::Model, EnerboardError> {
        info!(dashboard_id = %dashboard_id, "创建分享链接");

        let model = share_link::ActiveModel {
            id: Set(Uuid::new_v4()),
            dashboard_id: Set(dashboard_id),
            token_hash: Set(token_hash),
            permission: Set(permission),
            created_by: Set(created_by),
            expires_at: Set(expires_at.into()),
            revoked_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };

        let result = model.insert(db).await?;
        info!(link_id = %result.id, "分享链接创建成功");
        Ok(result)
    }

    /// 根据令牌哈希查找链接
    #[instrument(skip(db, token_hash))]
    pub async fn find_by_token_hash(
        db: &DatabaseConnection,
        token_hash: &str,
    ) -> Result<Option<share_link::Model>, EnerboardError> {
        let link = ShareLink::find()
            .filter(share_link::Column::TokenHash.eq(token_hash))
            .one(db)
            .await?;
        Ok(link)
    }

    /// 列出看板的分享链接
    #[instrument(skip(db))]
    pub async fn list_for_dashboard(
        db: &DatabaseConnection,
        dashboard_id: Uuid,
    ) -> Result<Vec<share_link::Model>, EnerboardError> {
        let links = ShareLink::find()
            .filter(share_link::Column::DashboardId.eq(dashboard_id))
            .order_by_desc(share_link::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(links)
    }

    /// 撤销分享链接
    #[instrument(skip(db))]
    pub async fn revoke(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<share_link::Model, EnerboardError> {
        info!(link_id = %id, "撤销分享链接");

        let link = ShareLink::find_by_id(id)
            .one(db)
            .await?
            .ok_or_else(|| EnerboardError::not_found("分享链接"))?;

        if link.is_revoked() {
            return Ok(link);
        }

        let mut active_model: share_link::ActiveModel = link.into();
        active_model.revoked_at = Set(Some(chrono::Utc::now().into()));

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 清理已过期的链接
    #[instrument(skip(db))]
    pub async fn prune_expired(db: &DatabaseConnection) -> Result<u64, EnerboardError> {
        let result = ShareLink::delete_many()
            .filter(share_link::Column::ExpiresAt.lt(chrono::Utc::now()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
