// 通知仓储实现

use crate::db::entities::{notification, prelude::*};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 通知仓储
pub struct NotificationRepository;

impl NotificationRepository {
    /// 创建通知
    #[instrument(skip(db, title, body, payload))]
    pub async fn create(
        db: &DatabaseConnection,
        user_id: Uuid,
        kind: notification::NotificationKind,
        severity: notification::NotificationSeverity,
        title: String,
        body: String,
        payload: serde_json::Value,
    ) -> Result<notification::Model, EnerboardError> {
        let model = notification::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            kind: Set(kind),
            severity: Set(severity),
            title: Set(title),
            body: Set(body),
            payload: Set(payload),
            read_at: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// 列出用户通知
    #[instrument(skip(db))]
    pub async fn list(
        db: &DatabaseConnection,
        user_id: Uuid,
        unread_only: bool,
        limit: u64,
    ) -> Result<Vec<notification::Model>, EnerboardError> {
        let mut query = Notification::find()
            .filter(notification::Column::UserId.eq(user_id));

        if unread_only {
            query = query.filter(notification::Column::ReadAt.is_null());
        }

        let notifications = query
            .order_by_desc(notification::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;
        Ok(notifications)
    }

    /// 未读数量
    #[instrument(skip(db))]
    pub async fn unread_count(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<u64, EnerboardError> {
        let count = Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::ReadAt.is_null())
            .count(db)
            .await?;
        Ok(count)
    }

    /// 标记单条已读
    #[instrument(skip(db))]
    pub async fn mark_read(
        db: &DatabaseConnection,
        id: Uuid,
        user_id: Uuid,
    ) -> Result<notification::Model, EnerboardError> {
        let notification = Notification::find_by_id(id)
            .filter(notification::Column::UserId.eq(user_id))
            .one(db)
            .await?
            .ok_or_else(|| EnerboardError::not_found("通知"))?;

        if notification.is_read() {
            return Ok(notification);
        }

        let mut active_model: notification::ActiveModel = notification.into();
        active_model.read_at = Set(Some(chrono::Utc::now().into()));

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 标记全部已读
    #[instrument(skip(db))]
    pub async fn mark_all_read(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<u64, EnerboardError> {
        info!(user_id = %user_id, "标记全部通知已读");

        let result = Notification::update_many()
            .col_expr(notification::Column::ReadAt, Expr::value(chrono::Utc::now()))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::ReadAt.is_null())
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }

    /// 删除过期通知（保留最近 days 天）
    #[instrument(skip(db))]
    pub async fn prune_older_than(
        db: &DatabaseConnection,
        days: i64,
    ) -> Result<u64, EnerboardError> {
        let cutoff = chrono::Utc::now() - chrono::Duration::days(days);

        let result = Notification::delete_many()
            .filter(notification::Column::CreatedAt.lt(cutoff))
            .filter(notification::Column::ReadAt.is_not_null())
            .exec(db)
            .await?;

        Ok(result.rows_affected)
    }
}
