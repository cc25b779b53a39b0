// 看板模板实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 看板模板实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "dashboard_templates")]
pub struct Model {
    /// 模板 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 模板名称
    #[sea_orm(column_type = "String(Some(255))", unique)]
    pub name: String,

    /// 模板描述
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    /// 模板定义（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub definition: Json,

    /// 是否为内置模板
    pub is_builtin: bool,

    /// 创建者用户 ID
    #[sea_orm(nullable)]
    pub created_by: Option<Uuid>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// 模板定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateDefinition {
    /// 标签页定义
    pub tabs: Vec<TemplateTab>,
}

/// 模板标签页定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateTab {
    /// 标签页标题
    pub title: String,
    /// 图表定义
    pub charts: Vec<TemplateChart>,
}

/// 模板图表定义
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TemplateChart {
    /// 图表标题
    pub title: String,
    /// 图表类型
    pub kind: String,
    /// 数据来源
    pub source: String,
    /// 查询配置
    pub query: serde_json::Value,
}

impl Model {
    /// 解析模板定义
    pub fn get_definition(&self) -> Result<TemplateDefinition, serde_json::Error> {
        serde_json::from_value(self.definition.clone())
    }
}
