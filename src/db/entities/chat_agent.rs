// 聊天 Agent 实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Agent 状态枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chat_agent_status")]
pub enum ChatAgentStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// 聊天 Agent 实体
///
/// Agent 是能回答命令的对话机器人，例如执行优化模拟的能源助手。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_agents")]
pub struct Model {
    /// Agent ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// Agent 名称
    #[sea_orm(column_type = "String(Some(255))", unique)]
    pub name: String,

    /// Agent 描述
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// Agent 状态
    pub status: ChatAgentStatus,

    /// 能力描述（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub capabilities: Json,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// Agent 关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 一对多：Agent -> 命令
    #[sea_orm(has_many = "super::agent_command::Entity")]
    Commands,

    /// 一对多：Agent -> 会话
    #[sea_orm(has_many = "super::chat_session::Entity")]
    Sessions,
}

impl Related<super::agent_command::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Commands.def()
    }
}

impl Related<super::chat_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Agent 能力描述
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentCapabilities {
    /// 支持的命令名称
    pub commands: Vec<String>,
    /// 支持的语言
    pub languages: Vec<String>,
}

impl Default for AgentCapabilities {
    fn default() -> Self {
        Self {
            commands: Vec::new(),
            languages: vec!["zh-CN".to_string()],
        }
    }
}

impl Model {
    /// 检查 Agent 是否活跃
    pub fn is_active(&self) -> bool {
        self.status == ChatAgentStatus::Active
    }

    /// 获取能力描述
    pub fn get_capabilities(&self) -> Result<AgentCapabilities, serde_json::Error> {
        serde_json::from_value(self.capabilities.clone())
    }
}
