// 看板实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 看板实体
///
/// 归属者为用户或团队二选一，由数据库 dashboard_owner_check 约束保证。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dashboards")]
pub struct Model {
    /// 看板 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 归属用户 ID（与 owner_team_id 互斥）
    #[sea_orm(nullable)]
    pub owner_user_id: Option<Uuid>,

    /// 归属团队 ID（与 owner_user_id 互斥）
    #[sea_orm(nullable)]
    pub owner_team_id: Option<Uuid>,

    /// 看板名称
    #[sea_orm(column_type = "String(Some(255))")]
    pub name: String,

    /// 看板标识符（归属者内唯一）
    #[sea_orm(column_type = "String(Some(100))")]
    pub slug: String,

    /// 看板描述
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// 布局配置（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub layout: Json,

    /// 是否为默认看板
    pub is_default: bool,

    /// 是否已归档
    pub is_archived: bool,

    /// 创建者用户 ID
    pub created_by: Uuid,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 看板归属者
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum DashboardOwner {
    /// 用户私有看板
    User(Uuid),
    /// 团队共享看板
    Team(Uuid),
}

/// 看板关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：看板 -> 归属用户
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::OwnerUserId",
        to = "super::user::Column::Id"
    )]
    OwnerUser,

    /// 多对一：看板 -> 归属团队
    #[sea_orm(
        belongs_to = "super::team::Entity",
        from = "Column::OwnerTeamId",
        to = "super::team::Column::Id"
    )]
    OwnerTeam,

    /// 一对多：看板 -> 标签页
    #[sea_orm(has_many = "super::dashboard_tab::Entity")]
    Tabs,

    /// 一对多：看板 -> 分享链接
    #[sea_orm(has_many = "super::share_link::Entity")]
    ShareLinks,
}

impl Related<super::dashboard_tab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tabs.def()
    }
}

impl Related<super::share_link::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShareLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 看板实用方法
impl Model {
    /// 获取归属者
    ///
    /// 数据库约束保证两个字段恰好一个非空。
    pub fn owner(&self) -> Option<DashboardOwner> {
        match (self.owner_user_id, self.owner_team_id) {
            (Some(user_id), None) => Some(DashboardOwner::User(user_id)),
            (None, Some(team_id)) => Some(DashboardOwner::Team(team_id)),
            _ => None,
        }
    }

    /// 是否为团队看板
    pub fn is_team_owned(&self) -> bool {
        self.owner_team_id.is_some()
    }

    /// 检查用户是否为归属者本人
    pub fn is_owned_by_user(&self, user_id: Uuid) -> bool {
        self.owner_user_id == Some(user_id)
    }
}
