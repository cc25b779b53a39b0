// 图表版本快照实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 图表配置版本快照
///
/// 每次图表查询或渲染配置变更时保存一份快照，版本号在图表内连续。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chart_versions")]
pub struct Model {
    /// 快照 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 图表 ID
    pub chart_id: Uuid,

    /// 版本号（图表内唯一）
    pub version: i32,

    /// 查询配置快照
    #[sea_orm(column_type = "Json")]
    pub query: Json,

    /// 渲染配置快照
    #[sea_orm(column_type = "Json")]
    pub config: Json,

    /// 快照创建者
    #[sea_orm(nullable)]
    pub created_by: Option<Uuid>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：版本 -> 图表
    #[sea_orm(
        belongs_to = "super::chart::Entity",
        from = "Column::ChartId",
        to = "super::chart::Column::Id"
    )]
    Chart,
}

impl Related<super::chart::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chart.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
