// Agent 命令实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Agent 命令实体
///
/// 命令是 Agent 暴露的可调用操作，名称在 Agent 内唯一。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agent_commands")]
pub struct Model {
    /// 命令 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 所属 Agent ID
    pub agent_id: Uuid,

    /// 命令名称（Agent 内唯一）
    #[sea_orm(column_type = "String(Some(100))")]
    pub name: String,

    /// 命令描述
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// 参数模式（JSON Schema）
    #[sea_orm(column_type = "Json")]
    pub argument_schema: Json,

    /// 是否启用
    pub enabled: bool,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：命令 -> Agent
    #[sea_orm(
        belongs_to = "super::chat_agent::Entity",
        from = "Column::AgentId",
        to = "super::chat_agent::Column::Id"
    )]
    Agent,
}

impl Related<super::chat_agent::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
