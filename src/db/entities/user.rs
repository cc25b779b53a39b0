// 用户实体定义

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 用户状态枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
pub enum UserStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
    #[sea_orm(string_value = "suspended")]
    Suspended,
}

/// 用户角色枚举
#[derive(Debug, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[sea_orm(string_value = "admin")]
    Admin,
    #[sea_orm(string_value = "operator")]
    Operator,
    #[sea_orm(string_value = "viewer")]
    Viewer,
}

/// 用户实体
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// 用户 ID
    #[sea_orm(primary_key)]
    pub id: Uuid,

    /// 邮箱（登录名）
    #[sea_orm(column_type = "String(Some(255))", unique)]
    pub email: String,

    /// 密码哈希
    #[sea_orm(column_type = "String(Some(255))")]
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// 显示名称
    #[sea_orm(column_type = "String(Some(255))")]
    pub display_name: String,

    /// 用户角色
    pub role: UserRole,

    /// 用户状态
    pub status: UserStatus,

    /// 用户偏好（JSON 格式）
    #[sea_orm(column_type = "Json")]
    pub preferences: Json,

    /// 最后登录时间
    #[sea_orm(nullable)]
    pub last_login_at: Option<DateTimeWithTimeZone>,

    /// 创建时间
    pub created_at: DateTimeWithTimeZone,

    /// 更新时间
    pub updated_at: DateTimeWithTimeZone,
}

/// 用户关联关系
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// 一对多：用户 -> 团队成员关系
    #[sea_orm(has_many = "super::team_member::Entity")]
    TeamMembers,

    /// 一对多：用户 -> 聊天会话
    #[sea_orm(has_many = "super::chat_session::Entity")]
    ChatSessions,

    /// 一对多：用户 -> 通知
    #[sea_orm(has_many = "super::notification::Entity")]
    Notifications,
}

impl Related<super::team_member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TeamMembers.def()
    }
}

impl Related<super::chat_session::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChatSessions.def()
    }
}

impl Related<super::notification::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Notifications.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// 用户偏好
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPreferences {
    /// 界面语言
    pub locale: String,
    /// 主题（light/dark）
    pub theme: String,
    /// 默认看板 ID
    pub default_dashboard_id: Option<Uuid>,
    /// 是否接收压力告警通知
    pub pressure_alerts_enabled: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            locale: "zh-CN".to_string(),
            theme: "light".to_string(),
            default_dashboard_id: None,
            pressure_alerts_enabled: true,
        }
    }
}

/// 用户实用方法
impl Model {
    /// 检查用户是否活跃
    pub fn is_active(&self) -> bool {
        self.status == UserStatus::Active
    }

    /// 检查用户是否为管理员
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 检查用户是否可以修改资源（管理员或操作员）
    pub fn can_edit(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Operator)
    }

    /// 获取用户偏好
    pub fn get_preferences(&self) -> Result<UserPreferences, serde_json::Error> {
        serde_json::from_value(self.preferences.clone())
    }
}
