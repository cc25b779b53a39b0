// 图表实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 图表类型枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chart_kind")]
pub enum ChartKind {
    #[sea_orm(string_value = "line")]
    Line,
    #[sea_orm(string_value = "bar")]
    Bar,
    #[sea_orm(string_value = "gauge")]
    Gauge,
    #[sea_orm(string_value = "pie")]
    Pie,
    #[sea_orm(string_value = "table")]
    Table,
    #[sea_orm(string_value = "stat")]
    Stat,
}

/// 图表数据来源枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "chart_source")]
pub enum ChartSource {
    /// 实时电站指标（来自轮询缓存）
    #[sea_orm(string_value = "live_metric")]
    LiveMetric,
    /// 优化模拟结果
    #[sea_orm(string_value = "optimization_result")]
    OptimizationResult,
    /// 静态数据
    #[sea_orm(string_value = "static")]
    Static,
}

/// 图表实体
///
/// 与看板相同的归属规则：用户或团队二选一（chart_owner_check）。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "charts")]
pub struct Model {
    /// 图表 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 归属用户 ID（与 owner_team_id 互斥）
    #[sea_orm(nullable)]
    pub owner_user_id: Option<Uuid>,

    /// 归属团队 ID（与 owner_user_id 互斥）
    #[sea_orm(nullable)]
    pub owner_team_id: Option<Uuid>,

    /// 图表标题
    #[sea_orm(column_type = "String(Some(255))")]
    pub title: String,

    /// 图表类型
    pub kind: ChartKind,

    /// 数据来源
    pub source: ChartSource,

    /// 查询配置（JSON 格式，如指标名、字段路径）
    #[sea_orm(column_type = "Json")]
    pub query: Json,

    /// 渲染配置（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub config: Json,

    /// 当前版本号
    pub current_version: i32,

    /// 创建者用户 ID
    pub created_by: Uuid,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 图表关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 一对多：图表 -> 布局
    #[sea_orm(has_many = "super::chart_placement::Entity")]
    Placements,

    /// 一对多：图表 -> 版本快照
    #[sea_orm(has_many = "super::chart_version::Entity")]
    Versions,
}

impl Related<super::chart_placement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Placements.def()
    }
}

impl Related<super::chart_version::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Versions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// 是否为团队图表
    pub fn is_team_owned(&self) -> bool {
        self.owner_team_id.is_some()
    }

    /// 是否展示实时数据
    pub fn is_live(&self) -> bool {
        self.source == ChartSource::LiveMetric
    }
}
