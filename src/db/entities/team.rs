// 团队实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 团队状态枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "team_status")]
pub enum TeamStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "suspended")]
    Suspended,
    #[sea_orm(string_value = "archived")]
    Archived,
}

/// 团队实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teams")]
pub struct Model {
    /// 团队 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 团队名称
    #[sea_orm(column_type = "String(Some(255))")]
    pub name: String,

    /// 团队标识符
    #[sea_orm(column_type = "String(Some(100))", unique)]
    pub slug: String,

    /// 团队描述
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// 团队状态
    pub status: TeamStatus,

    /// 团队设置（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub settings: Json,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 团队关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 一对多：团队 -> 成员
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMembers,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 检查团队是否活跃
    pub fn is_active(&self) -> bool {
        self.status == TeamStatus::Active
    }
}
