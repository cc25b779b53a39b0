// 看板标签页实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 看板标签页实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dashboard_tabs")]
pub struct Model {
    /// 标签页 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 所属看板 ID
    pub dashboard_id: Uuid,

    /// 标签页标题
    #[sea_orm(column_type = "String(Some(255))")]
    pub title: String,

    /// 排序位置（看板内唯一）
    pub position: i32,

    /// 标签页设置（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub settings: Json,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 标签页关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：标签页 -> 看板
    #[sea_orm(
        belongs_to = "super::dashboard::Entity",
        from = "Column::DashboardId",
        to = "super::dashboard::Column::Id"
    )]
    Dashboard,

    /// 一对多：标签页 -> 图表布局
    #[sea_orm(has_many = "super::chart_placement::Entity")]
    Placements,
}

impl Related<super::dashboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dashboard.def()
    }
}

impl Related<super::chart_placement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Placements.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
