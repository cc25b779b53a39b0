// 通知服务
// 压力告警、优化结果与系统通知的创建与查询

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::entities::notification::{self, NotificationKind, NotificationSeverity};
use crate::db::repositories::NotificationRepository;
use crate::errors::EnerboardError;
use crate::optimizer::LiveState;

/// 通知响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct NotificationResponse {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub severity: NotificationSeverity,
    pub title: String,
    pub body: String,
    pub payload: serde_json::Value,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<notification::Model> for NotificationResponse {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            kind: model.kind.clone(),
            severity: model.severity.clone(),
            title: model.title.clone(),
            body: model.body.clone(),
            payload: model.payload.clone(),
            is_read: model.is_read(),
            created_at: model.created_at.with_timezone(&chrono::Utc),
        }
    }
}

/// 未读数量响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

/// 通知查询参数
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NotificationQuery {
    /// 仅未读
    #[serde(default)]
    pub unread_only: bool,
    /// 数量上限（默认 50）
    pub limit: Option<u64>,
}

/// 通知服务
pub struct NotificationService {
    db: DatabaseConnection,
}

impl NotificationService {
    /// 创建新的通知服务
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 创建通知
    #[instrument(skip(self, title, body, payload))]
    pub async fn notify(
        &self,
        user_id: Uuid,
        kind: NotificationKind,
        severity: NotificationSeverity,
        title: impl Into<String>,
        body: impl Into<String>,
        payload: serde_json::Value,
    ) -> Result<NotificationResponse, EnerboardError> {
        let created = NotificationRepository::create(
            &self.db,
            user_id,
            kind,
            severity,
            title.into(),
            body.into(),
            payload,
        )
        .await?;
        Ok(created.into())
    }

    /// 基于实时快照生成压力告警通知
    ///
    /// 仅在快照带有 pressure_alert 标记时创建，正常快照静默返回。
    #[instrument(skip(self, state))]
    pub async fn notify_pressure_alert(
        &self,
        user_id: Uuid,
        state: &LiveState,
    ) -> Result<Option<NotificationResponse>, EnerboardError> {
        if !state.pressure_alert {
            return Ok(None);
        }

        let pressure = state
            .mp_pressure
            .map(|p| format!("{:.2} bar", p))
            .unwrap_or_else(|| "未知".to_string());

        info!(user_id = %user_id, pressure = %pressure, "创建压力告警通知");

        let created = self
            .notify(
                user_id,
                NotificationKind::PressureAlert,
                NotificationSeverity::Critical,
                "MP 蒸汽压力低于阈值",
                format!("当前 MP 蒸汽压力 {}，低于 8.5 bar 告警线", pressure),
                serde_json::json!({ "mp_pressure": state.mp_pressure, "timestamp": state.timestamp }),
            )
            .await?;
        Ok(Some(created))
    }

    /// 列出通知
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Uuid,
        query: NotificationQuery,
    ) -> Result<Vec<NotificationResponse>, EnerboardError> {
        let limit = query.limit.unwrap_or(50).min(200);
        let notifications =
            NotificationRepository::list(&self.db, user_id, query.unread_only, limit).await?;
        Ok(notifications.into_iter().map(Into::into).collect())
    }

    /// 未读数量
    #[instrument(skip(self))]
    pub async fn unread_count(&self, user_id: Uuid) -> Result<UnreadCountResponse, EnerboardError> {
        let unread = NotificationRepository::unread_count(&self.db, user_id).await?;
        Ok(UnreadCountResponse { unread })
    }

    /// 标记单条已读
    #[instrument(skip(self))]
    pub async fn mark_read(
        &self,
        user_id: Uuid,
        notification_id: Uuid,
    ) -> Result<NotificationResponse, EnerboardError> {
        let updated = NotificationRepository::mark_read(&self.db, notification_id, user_id).await?;
        Ok(updated.into())
    }

    /// 标记全部已读
    #[instrument(skip(self))]
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, EnerboardError> {
        NotificationRepository::mark_all_read(&self.db, user_id).await
    }
}
