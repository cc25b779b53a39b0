// 用户仓储实现

use crate::db::entities::{prelude::*, user};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 用户仓储
pub struct UserRepository;

impl UserRepository {
    /// 创建新用户
    #[instrument(skip(db, password_hash))]
    pub async fn create(
        db: &DatabaseConnection,
        email: String,
        password_hash: String,
        display_name: String,
        role: user::UserRole,
    ) -> Result<user::Model, EnerboardError> {
        info!(email = %email, "创建新用户");

        // 邮箱唯一性检查
        if Self::find_by_email(db, &email).await?.is_some() {
            return Err(EnerboardError::conflict(format!("邮箱 {} 已被注册", email)));
        }

        let now = chrono::Utc::now();
        let model = user::ActiveModel {
            id: Set(Uuid::new_v4()),
            email: Set(email),
            password_hash: Set(password_hash),
            display_name: Set(display_name),
            role: Set(role),
            status: Set(user::UserStatus::Active),
            preferences: Set(serde_json::to_value(user::UserPreferences::default())?),
            last_login_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = model.insert(db).await?;
        info!(user_id = %result.id, "用户创建成功");
        Ok(result)
    }

    /// 根据 ID 查找用户
    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<user::Model>, EnerboardError> {
        let user = User::find_by_id(id).one(db).await?;
        Ok(user)
    }

    /// 根据邮箱查找用户
    #[instrument(skip(db))]
    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<user::Model>, EnerboardError> {
        let user = User::find()
            .filter(user::Column::Email.eq(email))
            .one(db)
            .await?;
        Ok(user)
    }

    /// 更新最后登录时间
    #[instrument(skip(db))]
    pub async fn touch_login(db: &DatabaseConnection, id: Uuid) -> Result<(), EnerboardError> {
        User::update_many()
            .col_expr(user::Column::LastLoginAt, Expr::value(chrono::Utc::now()))
            .col_expr(user::Column::UpdatedAt, Expr::value(chrono::Utc::now()))
            .filter(user::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(())
    }

    /// 更新用户偏好
    #[instrument(skip(db, preferences))]
    pub async fn update_preferences(
        db: &DatabaseConnection,
        id: Uuid,
        preferences: user::UserPreferences,
    ) -> Result<user::Model, EnerboardError> {
        let user = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("用户"))?;

        let mut active_model: user::ActiveModel = user.into();
        active_model.preferences = Set(serde_json::to_value(preferences)?);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 列出用户所属团队的 ID
    #[instrument(skip(db))]
    pub async fn team_ids(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<Vec<Uuid>, EnerboardError> {
        use crate::db::entities::team_member;

        let memberships = TeamMember::find()
            .filter(team_member::Column::UserId.eq(user_id))
            .all(db)
            .await?;

        Ok(memberships.into_iter().map(|m| m.team_id).collect())
    }
}
