// 通知实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 通知类型枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_kind")]
pub enum NotificationKind {
    /// 系统通知
    #[sea_orm(string_value = "system")]
    System,
    /// MP 蒸汽压力告警
    #[sea_orm(string_value = "pressure_alert")]
    PressureAlert,
    /// 优化模拟完成
    #[sea_orm(string_value = "optimization")]
    Optimization,
    /// 分享相关
    #[sea_orm(string_value = "sharing")]
    Sharing,
    /// 聊天消息
    #[sea_orm(string_value = "chat")]
    Chat,
}

/// 通知严重级别枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "notification_severity")]
pub enum NotificationSeverity {
    #[sea_orm(string_value = "info")]
    Info,
    #[sea_orm(string_value = "warning")]
    Warning,
    #[sea_orm(string_value = "critical")]
    Critical,
}

/// 通知实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "notifications")]
pub struct Model {
    /// 通知 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 接收用户 ID
    pub user_id: Uuid,

    /// 通知类型
    pub kind: NotificationKind,

    /// 严重级别
    pub severity: NotificationSeverity,

    /// 通知标题
    #[sea_orm(column_type = "String(Some(255))")]
    pub title: String,

    /// 通知正文
    #[sea_orm(column_type = "Text")]
    pub body: String,

    /// 附加数据（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub payload: Json,

    /// 已读时间（NULL 表示未读）
    #[sea_orm(nullable)]
    pub read_at: Option<DateTimeWithTimeZone>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：通知 -> 用户
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 通知是否已读
    pub fn is_read(&self) -> bool {
        self.read_at.is_some()
    }

    /// 通知是否为告警
    pub fn is_alert(&self) -> bool {
        matches!(
            self.severity,
            NotificationSeverity::Warning | NotificationSeverity::Critical
        )
    }
}
