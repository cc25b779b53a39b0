// 看板仓储实现

use crate::db::entities::{dashboard, dashboard_tab, dashboard_template, prelude::*};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 看板仓储
pub struct DashboardRepository;

impl DashboardRepository {
    /// 创建新看板
    ///
    /// 归属者互斥规则除数据库约束外在服务层提前校验，
    /// 这里只负责持久化。
    #[instrument(skip(db))]
    pub async fn create(
        db: &DatabaseConnection,
        owner: dashboard::DashboardOwner,
        name: String,
        slug: String,
        description: Option<String>,
        created_by: Uuid,
    ) -> Result<dashboard::Model, EnerboardError> {
        info!(slug = %slug, "创建新看板");

        let (owner_user_id, owner_team_id) = match owner {
            dashboard::DashboardOwner::User(id) => (Some(id), None),
            dashboard::DashboardOwner::Team(id) => (None, Some(id)),
        };

        let now = chrono::Utc::now();
        let model = dashboard::ActiveModel {
            id: Set(Uuid::new_v4()),
            owner_user_id: Set(owner_user_id),
            owner_team_id: Set(owner_team_id),
            name: Set(name),
            slug: Set(slug),
            description: Set(description),
            layout: Set(serde_json::json!({})),
            is_default: Set(false),
            is_archived: Set(false),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = model.insert(db).await?;
        info!(dashboard_id = %result.id, "看板创建成功");
        Ok(result)
    }

    /// 根据 ID 查找看板
    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<dashboard::Model>, EnerboardError> {
        let dashboard = Dashboard::find_by_id(id).one(db).await?;
        Ok(dashboard)
    }

    /// 列出用户可见的看板
    ///
    /// 包含用户私有看板和其所属团队的看板，默认排除已归档。
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &DatabaseConnection,
        user_id: Uuid,
        team_ids: &[Uuid],
        include_archived: bool,
    ) -> Result<Vec<dashboard::Model>, EnerboardError> {
        let mut condition = Condition::any()
            .add(dashboard::Column::OwnerUserId.eq(user_id));

        if !team_ids.is_empty() {
            condition = condition.add(dashboard::Column::OwnerTeamId.is_in(team_ids.to_vec()));
        }

        let mut query = Dashboard::find().filter(condition);

        if !include_archived {
            query = query.filter(dashboard::Column::IsArchived.eq(false));
        }

        let dashboards = query
            .order_by_desc(dashboard::Column::UpdatedAt)
            .all(db)
            .await?;
        Ok(dashboards)
    }

    /// 更新看板基本信息
    #[instrument(skip(db))]
    pub async fn update(
        db: &DatabaseConnection,
        id: Uuid,
        name: Option<String>,
        description: Option<Option<String>>,
        layout: Option<serde_json::Value>,
    ) -> Result<dashboard::Model, EnerboardError> {
        let dashboard = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;

        let mut active_model: dashboard::ActiveModel = dashboard.into();
        if let Some(name) = name {
            active_model.name = Set(name);
        }
        if let Some(description) = description {
            active_model.description = Set(description);
        }
        if let Some(layout) = layout {
            active_model.layout = Set(layout);
        }
        active_model.updated_at = Set(chrono::Utc::now().into());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 归档看板
    #[instrument(skip(db))]
    pub async fn archive(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<dashboard::Model, EnerboardError> {
        info!(dashboard_id = %id, "归档看板");

        let dashboard = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;

        let mut active_model: dashboard::ActiveModel = dashboard.into();
        active_model.is_archived = Set(true);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 删除看板
    #[instrument(skip(db))]
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), EnerboardError> {
        info!(dashboard_id = %id, "删除看板");

        let result = Dashboard::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(EnerboardError::not_found("看板"));
        }
        Ok(())
    }

    /// 创建标签页
    ///
    /// 位置取当前最大 position + 1。
    #[instrument(skip(db))]
    pub async fn create_tab(
        db: &DatabaseConnection,
        dashboard_id: Uuid,
        title: String,
    ) -> Result<dashboard_tab::Model, EnerboardError> {
        let max_position = DashboardTab::find()
            .filter(dashboard_tab::Column::DashboardId.eq(dashboard_id))
            .order_by_desc(dashboard_tab::Column::Position)
            .one(db)
            .await?
            .map(|t| t.position)
            .unwrap_or(-1);

        let now = chrono::Utc::now();
        let model = dashboard_tab::ActiveModel {
            id: Set(Uuid::new_v4()),
            dashboard_id: Set(dashboard_id),
            title: Set(title),
            position: Set(max_position + 1),
            settings: Set(serde_json::json!({})),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// 列出看板标签页
    #[instrument(skip(db))]
    pub async fn list_tabs(
        db: &DatabaseConnection,
        dashboard_id: Uuid,
    ) -> Result<Vec<dashboard_tab::Model>, EnerboardError> {
        let tabs = DashboardTab::find()
            .filter(dashboard_tab::Column::DashboardId.eq(dashboard_id))
            .order_by_asc(dashboard_tab::Column::Position)
            .all(db)
            .await?;
        Ok(tabs)
    }

    /// 删除标签页
    #[instrument(skip(db))]
    pub async fn delete_tab(db: &DatabaseConnection, tab_id: Uuid) -> Result<(), EnerboardError> {
        let result = DashboardTab::delete_by_id(tab_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(EnerboardError::not_found("标签页"));
        }
        Ok(())
    }

    /// 列出看板模板
    #[instrument(skip(db))]
    pub async fn list_templates(
        db: &DatabaseConnection,
    ) -> Result<Vec<dashboard_template::Model>, EnerboardError> {
        let templates = DashboardTemplate::find()
            .order_by_asc(dashboard_template::Column::Name)
            .all(db)
            .await?;
        Ok(templates)
    }

    /// 根据 ID 查找模板
    #[instrument(skip(db))]
    pub async fn find_template(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<dashboard_template::Model>, EnerboardError> {
        let template = DashboardTemplate::find_by_id(id).one(db).await?;
        Ok(template)
    }
}
