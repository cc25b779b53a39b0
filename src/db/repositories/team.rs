// 团队仓储实现

use crate::db::entities::{prelude::*, team, team_member};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 团队仓储
pub struct TeamRepository;

impl TeamRepository {
    /// 创建新团队
    #[instrument(skip(db))]
    pub async fn create(
        db: &DatabaseConnection,
        name: String,
        slug: String,
        description: Option<String>,
    ) -> Result<team::Model, EnerboardError> {
        info!(slug = %slug, "创建新团队");

        if Self::find_by_slug(db, &slug).await?.is_some() {
            return Err(EnerboardError::conflict(format!("团队标识符 {} 已存在", slug)));
        }

        let now = chrono::Utc::now();
        let model = team::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            slug: Set(slug),
            description: Set(description),
            status: Set(team::TeamStatus::Active),
            settings: Set(serde_json::json!({})),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = model.insert(db).await?;
        info!(team_id = %result.id, "团队创建成功");
        Ok(result)
    }

    /// 根据 ID 查找团队
    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<team::Model>, EnerboardError> {
        let team = Team::find_by_id(id).one(db).await?;
        Ok(team)
    }

    /// 根据标识符查找团队
    #[instrument(skip(db))]
    pub async fn find_by_slug(
        db: &DatabaseConnection,
        slug: &str,
    ) -> Result<Option<team::Model>, EnerboardError> {
        let team = Team::find()
            .filter(team::Column::Slug.eq(slug))
            .one(db)
            .await?;
        Ok(team)
    }

    /// 添加团队成员
    #[instrument(skip(db))]
    pub async fn add_member(
        db: &DatabaseConnection,
        team_id: Uuid,
        user_id: Uuid,
        role: team_member::TeamMemberRole,
    ) -> Result<team_member::Model, EnerboardError> {
        info!(team_id = %team_id, user_id = %user_id, "添加团队成员");

        let existing = TeamMember::find()
            .filter(team_member::Column::TeamId.eq(team_id))
            .filter(team_member::Column::UserId.eq(user_id))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(EnerboardError::conflict("用户已是团队成员"));
        }

        let model = team_member::ActiveModel {
            id: Set(Uuid::new_v4()),
            team_id: Set(team_id),
            user_id: Set(user_id),
            role: Set(role),
            joined_at: Set(chrono::Utc::now().into()),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// 移除团队成员
    #[instrument(skip(db))]
    pub async fn remove_member(
        db: &DatabaseConnection,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<u64, EnerboardError> {
        let result = TeamMember::delete_many()
            .filter(team_member::Column::TeamId.eq(team_id))
            .filter(team_member::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// 查询用户在团队中的成员关系
    #[instrument(skip(db))]
    pub async fn find_membership(
        db: &DatabaseConnection,
        team_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<team_member::Model>, EnerboardError> {
        let membership = TeamMember::find()
            .filter(team_member::Column::TeamId.eq(team_id))
            .filter(team_member::Column::UserId.eq(user_id))
            .one(db)
            .await?;
        Ok(membership)
    }

    /// 列出团队成员
    #[instrument(skip(db))]
    pub async fn list_members(
        db: &DatabaseConnection,
        team_id: Uuid,
    ) -> Result<Vec<team_member::Model>, EnerboardError> {
        let members = TeamMember::find()
            .filter(team_member::Column::TeamId.eq(team_id))
            .order_by_asc(team_member::Column::JoinedAt)
            .all(db)
            .await?;
        Ok(members)
    }
}
