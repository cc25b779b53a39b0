// 看板服务
// 看板、标签页与模板的业务逻辑

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::entities::{dashboard, dashboard_tab, dashboard_template};
use crate::db::repositories::{DashboardRepository, TeamRepository, UserRepository};
use crate::errors::EnerboardError;

/// 创建看板请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateDashboardRequest {
    /// 看板名称
    pub name: String,
    /// 看板标识符
    pub slug: String,
    /// 描述
    pub description: Option<String>,
    /// 归属团队 ID；为空时归属当前用户
    pub owner_team_id: Option<Uuid>,
    /// 从模板实例化（可选）
    pub template_id: Option<Uuid>,
}

/// 更新看板请求
#[derive(Debug, Clone, Deserialize, Default, ToSchema)]
pub struct UpdateDashboardRequest {
    /// 看板名称
    pub name: Option<String>,
    /// 描述
    pub description: Option<String>,
    /// 布局配置
    pub layout: Option<serde_json::Value>,
}

/// 看板响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub id: Uuid,
    pub owner: Option<dashboard::DashboardOwner>,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub layout: serde_json::Value,
    pub is_default: bool,
    pub is_archived: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<dashboard::Model> for DashboardResponse {
    fn from(model: dashboard::Model) -> Self {
        Self {
            id: model.id,
            owner: model.owner(),
            name: model.name.clone(),
            slug: model.slug.clone(),
            description: model.description.clone(),
            layout: model.layout.clone(),
            is_default: model.is_default,
            is_archived: model.is_archived,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}

/// 看板服务
pub struct DashboardService {
    db: DatabaseConnection,
}

impl DashboardService {
    /// 创建新的看板服务
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 创建看板
    ///
    /// 归属规则：指定团队时要求用户是团队成员且有编辑权限，
    /// 否则归属用户本人。
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateDashboardRequest,
    ) -> Result<DashboardResponse, EnerboardError> {
        Self::validate_slug(&request.slug)?;

        let owner = match request.owner_team_id {
            Some(team_id) => {
                let membership = TeamRepository::find_membership(&self.db, team_id, user_id)
                    .await?
                    .ok_or_else(|| EnerboardError::forbidden("不是该团队的成员"))?;
                if !membership.can_edit() {
                    return Err(EnerboardError::forbidden("没有团队编辑权限"));
                }
                dashboard::DashboardOwner::Team(team_id)
            }
            None => dashboard::DashboardOwner::User(user_id),
        };

        let created = DashboardRepository::create(
            &self.db,
            owner,
            request.name,
            request.slug,
            request.description,
            user_id,
        )
        .await?;

        // 从模板实例化标签页
        if let Some(template_id) = request.template_id {
            self.apply_template(created.id, template_id).await?;
        }

        Ok(created.into())
    }

    /// 获取看板（含可见性检查）
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
    ) -> Result<DashboardResponse, EnerboardError> {
        let dashboard = self.load_visible(user_id, dashboard_id).await?;
        Ok(dashboard.into())
    }

    /// 列出用户可见的看板
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        user_id: Uuid,
        include_archived: bool,
    ) -> Result<Vec<DashboardResponse>, EnerboardError> {
        let team_ids = UserRepository::team_ids(&self.db, user_id).await?;
        let dashboards =
            DashboardRepository::list_visible(&self.db, user_id, &team_ids, include_archived)
                .await?;
        Ok(dashboards.into_iter().map(Into::into).collect())
    }

    /// 更新看板
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
        request: UpdateDashboardRequest,
    ) -> Result<DashboardResponse, EnerboardError> {
        self.ensure_editable(user_id, dashboard_id).await?;

        let updated = DashboardRepository::update(
            &self.db,
            dashboard_id,
            request.name,
            request.description.map(Some),
            request.layout,
        )
        .await?;
        Ok(updated.into())
    }

    /// 归档看板
    #[instrument(skip(self))]
    pub async fn archive(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
    ) -> Result<DashboardResponse, EnerboardError> {
        self.ensure_editable(user_id, dashboard_id).await?;
        let archived = DashboardRepository::archive(&self.db, dashboard_id).await?;
        Ok(archived.into())
    }

    /// 删除看板
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, dashboard_id: Uuid) -> Result<(), EnerboardError> {
        self.ensure_editable(user_id, dashboard_id).await?;
        DashboardRepository::delete(&self.db, dashboard_id).await
    }

    /// 创建标签页
    #[instrument(skip(self))]
    pub async fn create_tab(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
        title: String,
    ) -> Result<dashboard_tab::Model, EnerboardError> {
        self.ensure_editable(user_id, dashboard_id).await?;
        DashboardRepository::create_tab(&self.db, dashboard_id, title).await
    }

    /// 列出标签页
    #[instrument(skip(self))]
    pub async fn list_tabs(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
    ) -> Result<Vec<dashboard_tab::Model>, EnerboardError> {
        self.load_visible(user_id, dashboard_id).await?;
        DashboardRepository::list_tabs(&self.db, dashboard_id).await
    }

    /// 删除标签页
    #[instrument(skip(self))]
    pub async fn delete_tab(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
        tab_id: Uuid,
    ) -> Result<(), EnerboardError> {
        self.ensure_editable(user_id, dashboard_id).await?;
        DashboardRepository::delete_tab(&self.db, tab_id).await
    }

    /// 列出模板
    #[instrument(skip(self))]
    pub async fn list_templates(
        &self,
    ) -> Result<Vec<dashboard_template::Model>, EnerboardError> {
        DashboardRepository::list_templates(&self.db).await
    }

    /// 将模板应用到看板（按模板定义创建标签页）
    #[instrument(skip(self))]
    async fn apply_template(
        &self,
        dashboard_id: Uuid,
        template_id: Uuid,
    ) -> Result<(), EnerboardError> {
        let template = DashboardRepository::find_template(&self.db, template_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板模板"))?;

        let definition = template
            .get_definition()
            .map_err(|e| EnerboardError::internal(format!("模板定义损坏: {}", e)))?;

        for tab in definition.tabs {
            DashboardRepository::create_tab(&self.db, dashboard_id, tab.title).await?;
        }

        info!(dashboard_id = %dashboard_id, template = %template.name, "模板应用完成");
        Ok(())
    }

    /// 加载看板并检查可见性
    async fn load_visible(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
    ) -> Result<dashboard::Model, EnerboardError> {
        let dashboard = DashboardRepository::find_by_id(&self.db, dashboard_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;

        match dashboard.owner() {
            Some(dashboard::DashboardOwner::User(owner_id)) if owner_id == user_id => Ok(dashboard),
            Some(dashboard::DashboardOwner::Team(team_id)) => {
                TeamRepository::find_membership(&self.db, team_id, user_id)
                    .await?
                    .ok_or_else(|| EnerboardError::forbidden("没有访问该看板的权限"))?;
                Ok(dashboard)
            }
            _ => Err(EnerboardError::forbidden("没有访问该看板的权限")),
        }
    }

    /// 检查编辑权限
    async fn ensure_editable(
        &self,
        user_id: Uuid,
        dashboard_id: Uuid,
    ) -> Result<(), EnerboardError> {
        let dashboard = DashboardRepository::find_by_id(&self.db, dashboard_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("看板"))?;

        match dashboard.owner() {
            Some(dashboard::DashboardOwner::User(owner_id)) if owner_id == user_id => Ok(()),
            Some(dashboard::DashboardOwner::Team(team_id)) => {
                let membership = TeamRepository::find_membership(&self.db, team_id, user_id)
                    .await?
                    .ok_or_else(|| EnerboardError::forbidden("没有编辑该看板的权限"))?;
                if membership.can_edit() {
                    Ok(())
                } else {
                    Err(EnerboardError::forbidden("没有编辑该看板的权限"))
                }
            }
            _ => Err(EnerboardError::forbidden("没有编辑该看板的权限")),
        }
    }

    /// 校验看板标识符格式
    fn validate_slug(slug: &str) -> Result<(), EnerboardError> {
        use once_cell::sync::Lazy;
        use regex::Regex;

        static SLUG_RE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9-]{1,98}[a-z0-9]$").unwrap());

        if SLUG_RE.is_match(slug) {
            Ok(())
        } else {
            Err(EnerboardError::validation(
                "slug",
                "标识符只能包含小写字母、数字和连字符，长度 3-100",
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_validation() {
        assert!(DashboardService::validate_slug("plant-overview").is_ok());
        assert!(DashboardService::validate_slug("a1b").is_ok());

        assert!(DashboardService::validate_slug("ab").is_err());
        assert!(DashboardService::validate_slug("-bad").is_err());
        assert!(DashboardService::validate_slug("Bad-Slug").is_err());
        assert!(DashboardService::validate_slug("has space").is_err());
    }
}
