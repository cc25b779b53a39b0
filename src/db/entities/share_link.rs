// 分享链接实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 分享权限枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "share_permission")]
pub enum SharePermission {
    #[sea_orm(string_value = "view")]
    View,
    #[sea_orm(string_value = "comment")]
    Comment,
}

/// 看板分享链接实体
///
/// 令牌只保存 SHA-256 哈希，明文仅在创建时返回一次。
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "share_links")]
pub struct Model {
    /// 链接 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 分享的看板 ID
    pub dashboard_id: Uuid,

    /// 令牌哈希（SHA-256 十六进制）
    #[sea_orm(column_type = "String(Some(64))", unique)]
    #[serde(skip_serializing)]
    pub token_hash: String,

    /// 访问权限
    pub permission: SharePermission,

    /// 创建者用户 ID
    pub created_by: Uuid,

    /// 过期时间
    pub expires_at: DateTimeWithTimeZone,

    /// 撤销时间（NULL 表示未撤销）
    #[sea_orm(nullable)]
    pub revoked_at: Option<DateTimeWithTimeZone>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 多对一：链接 -> 看板
    #[sea_orm(
        belongs_to = "super::dashboard::Entity",
        from = "Column::DashboardId",
        to = "super::dashboard::Column::Id"
    )]
    Dashboard,

    /// 多对一：链接 -> 创建者
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::CreatedBy",
        to = "super::user::Column::Id"
    )]
    Creator,
}

impl Related<super::dashboard::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Dashboard.def()
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 分享链接实用方法
impl Model {
    /// 链接是否已过期
    pub fn is_expired(&self) -> bool {
        chrono::Utc::now() > self.expires_at
    }

    /// 链接是否被撤销
    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    /// 链接是否可用
    pub fn is_usable(&self) -> bool {
        !self.is_expired() && !self.is_revoked()
    }

    /// 剩余有效时间（秒），已失效返回 0
    pub fn remaining_time(&self) -> i64 {
        let now = chrono::Utc::now();
        let expires_utc = self.expires_at.with_timezone(&chrono::Utc);
        if now > expires_utc {
            0
        } else {
            (expires_utc - now).num_seconds()
        }
    }
}
