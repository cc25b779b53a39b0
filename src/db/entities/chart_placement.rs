// 图表布局实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 图表在标签页网格上的布局
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_placements")]
pub struct Model {
    /// 布局记录 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 标签页 ID
    pub tab_id: Uuid,

    /// 图表 ID
    pub chart_id: Uuid,

    /// 网格 X 坐标
    pub grid_x: i32,

    /// 网格 Y 坐标
    pub grid_y: i32,

    /// 网格宽度
    pub grid_w: i32,

    /// 网格高度
    pub grid_h: i32,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：布局 -> 标签页
    #[sea_orm(
        belongs_to = "super::dashboard_tab::Entity",
        from = "Column::TabId",
        to = "super::dashboard_tab::Column::Id"
    )]
    Tab,

    /// 多对一：布局 -> 图表
    #[sea_orm(
        belongs_to = "super::chart::Entity",
        from = "Column::ChartId",
        to = "super::chart::Column::Id"
    )]
    Chart,
}

impl Related<super::dashboard_tab::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tab.def()
    }
}

impl Related<super::chart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chart.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
