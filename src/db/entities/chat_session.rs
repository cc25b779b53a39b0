// 聊天会话实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 会话状态枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chat_session_status")]
pub enum ChatSessionStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// 聊天会话实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_sessions")]
pub struct Model {
    /// 会话 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 用户 ID
    pub user_id: Uuid,

    /// 绑定的 Agent ID
    #[sea_orm(nullable)]
    pub agent_id: Option<Uuid>,

    /// 会话标题
    #[sea_orm(column_type = "String(Some(255))")]
    pub title: String,

    /// 会话状态
    pub status: ChatSessionStatus,

    /// 会话上下文（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub context: Json,

    /// 最后消息时间
    #[sea_orm(nullable)]
    pub last_message_at: Option<DateTimeWithTimeZone>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 会话关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：会话 -> 用户
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,

    /// 多对一：会话 -> Agent
    #[sea_orm(
        belongs_to = "super::chat_agent::Entity",
        from = "Column::AgentId",
        to = "super::chat_agent::Column::Id"
    )]
    Agent,

    /// 一对多：会话 -> 消息
    #[sea_orm(has_many = "super::chat_message::Entity")]
    Messages,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::chat_agent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agent.def()
    }
}

impl Related<super::chat_message::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 会话上下文
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionContext {
    /// 关联的看板 ID（从看板发起的会话）
    pub dashboard_id: Option<Uuid>,
    /// 最近一次优化请求的参数
    pub last_optimization: Option<serde_json::Value>,
    /// 自定义数据
    pub custom_data: std::collections::HashMap<String, serde_json::Value>,
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            dashboard_id: None,
            last_optimization: None,
            custom_data: std::collections::HashMap::new(),
        }
    }
}

/// 会话实用方法
impl Model {
    /// 检查会话是否活跃
    pub fn is_active(&self) -> bool {
        self.status == ChatSessionStatus::Active
    }

    /// 获取会话上下文
    pub fn get_context(&self) -> Result<SessionContext, serde_json::Error> {
        serde_json::from_value(self.context.clone())
    }

    /// 会话空闲时间（秒）
    pub fn idle_time(&self) -> i64 {
        let now = chrono::Utc::now();
        let reference = self
            .last_message_at
            .unwrap_or(self.created_at)
            .with_timezone(&chrono::Utc);
        (now - reference).num_seconds()
    }
}
