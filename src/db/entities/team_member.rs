// 团队成员实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 团队成员角色枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "team_member_role")]
pub enum TeamMemberRole {
    #[sea_orm(string_value = "owner")]
    Owner,
    #[sea_orm(string_value = "editor")]
    Editor,
    #[sea_orm(string_value = "viewer")]
    Viewer,
}

/// 团队成员实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "team_members")]
pub struct Model {
    /// 成员记录 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 团队 ID
    pub team_id: Uuid,

    /// 用户 ID
    pub user_id: Uuid,

    /// 成员角色
    pub role: TeamMemberRole,

    /// 加入时间
    pub joined_at: DateTimeWithTimeZone,
}

/// 团队成员关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：成员 -> 团队
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::TeamId",
        to = "super::team::Column::Id"
    )]
    Team,

    /// 多对一：成员 -> 用户
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::team::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Team.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 是否可以编辑团队资源
    pub fn can_edit(&self) -> bool {
        matches!(self.role, TeamMemberRole::Owner | TeamMemberRole::Editor)
    }
}
