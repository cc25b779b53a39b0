// 聊天消息实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 消息作者枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chat_author")]
pub enum ChatAuthor {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "agent")]
    Agent,
    #[sea_orm(string_value = "system")]
    System,
}

/// 聊天消息实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    /// 消息 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 所属会话 ID
    pub session_id: Uuid,

    /// 消息作者
    pub author: ChatAuthor,

    /// 消息正文
    #[sea_orm(column_type = "Text")]
    pub content: String,

    /// 附加数据（JSON 格式，如优化结果）
    #[sea_orm(column_type = "Json")]
    pub payload: Json,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：消息 -> 会话
    #[sea_orm(
        belongs_to = "super::chat_session::Entity",
        from = "Column::SessionId",
        to = "super::chat_session::Column::Id"
    )]
    Session,
}

impl Related<super::chat_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Session.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 消息是否携带优化结果
    pub fn has_optimization_result(&self) -> bool {
        self.payload
            .get("optimization_result")
            .map(|v| !v.is_null())
            .unwrap_or(false)
    }
}
