// 图表服务
// 图表、布局与版本快照的业务逻辑

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::entities::{chart, chart_placement, chart_version};
use crate::db::repositories::{ChartRepository, TeamRepository, UserRepository};
use crate::errors::EnerboardError;

/// 创建图表请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateChartRequest {
    /// 图表标题
    pub title: String,
    /// 图表类型
    pub kind: chart::ChartKind,
    /// 数据来源
    pub source: chart::ChartSource,
    /// 查询配置
    pub query: serde_json::Value,
    /// 渲染配置
    #[serde(default)]
    pub config: serde_json::Value,
    /// 归属团队 ID；为空时归属当前用户
    pub owner_team_id: Option<Uuid>,
}

/// 更新图表请求
#[derive(Debug, Clone, Deserialize, Default, ToSchema)]
pub struct UpdateChartRequest {
    /// 图表标题
    pub title: Option<String>,
    /// 查询配置
    pub query: Option<serde_json::Value>,
    /// 渲染配置
    pub config: Option<serde_json::Value>,
}

/// 放置图表请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PlaceChartRequest {
    /// 目标标签页 ID
    pub tab_id: Uuid,
    /// 网格 X 坐标
    #[serde(default)]
    pub grid_x: i32,
    /// 网格 Y 坐标
    #[serde(default)]
    pub grid_y: i32,
    /// 网格宽度
    #[serde(default = "default_grid_w")]
    pub grid_w: i32,
    /// 网格高度
    #[serde(default = "default_grid_h")]
    pub grid_h: i32,
}

fn default_grid_w() -> i32 {
    4
}

fn default_grid_h() -> i32 {
    3
}

/// 图表响应
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ChartResponse {
    pub id: Uuid,
    pub title: String,
    pub kind: chart::ChartKind,
    pub source: chart::ChartSource,
    pub query: serde_json::Value,
    pub config: serde_json::Value,
    pub current_version: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<chart::Model> for ChartResponse {
    fn from(model: chart::Model) -> Self {
        Self {
            id: model.id,
            title: model.title.clone(),
            kind: model.kind.clone(),
            source: model.source.clone(),
            query: model.query.clone(),
            config: model.config.clone(),
            current_version: model.current_version,
            created_at: model.created_at.with_timezone(&chrono::Utc),
            updated_at: model.updated_at.with_timezone(&chrono::Utc),
        }
    }
}

/// 图表服务
pub struct ChartService {
    db: DatabaseConnection,
}

impl ChartService {
    /// 创建新的图表服务
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 创建图表
    #[instrument(skip(self, request))]
    pub async fn create(
        &self,
        user_id: Uuid,
        request: CreateChartRequest,
    ) -> Result<ChartResponse, EnerboardError> {
        let (owner_user_id, owner_team_id) = match request.owner_team_id {
            Some(team_id) => {
                let membership = TeamRepository::find_membership(&self.db, team_id, user_id)
                    .await?
                    .ok_or_else(|| EnerboardError::forbidden("不是该团队的成员"))?;
                if !membership.can_edit() {
                    return Err(EnerboardError::forbidden("没有团队编辑权限"));
                }
                (None, Some(team_id))
            }
            None => (Some(user_id), None),
        };

        let created = ChartRepository::create(
            &self.db,
            owner_user_id,
            owner_team_id,
            request.title,
            request.kind,
            request.source,
            request.query,
            request.config,
            user_id,
        )
        .await?;

        Ok(created.into())
    }

    /// 获取图表
    #[instrument(skip(self))]
    pub async fn get(
        &self,
        user_id: Uuid,
        chart_id: Uuid,
    ) -> Result<ChartResponse, EnerboardError> {
        let chart = self.load_visible(user_id, chart_id).await?;
        Ok(chart.into())
    }

    /// 列出可见图表
    #[instrument(skip(self))]
    pub async fn list(&self, user_id: Uuid) -> Result<Vec<ChartResponse>, EnerboardError> {
        let team_ids = UserRepository::team_ids(&self.db, user_id).await?;
        let charts = ChartRepository::list_visible(&self.db, user_id, &team_ids).await?;
        Ok(charts.into_iter().map(Into::into).collect())
    }

    /// 更新图表；查询或渲染配置变化时生成新的版本快照
    #[instrument(skip(self, request))]
    pub async fn update(
        &self,
        user_id: Uuid,
        chart_id: Uuid,
        request: UpdateChartRequest,
    ) -> Result<ChartResponse, EnerboardError> {
        self.load_visible(user_id, chart_id).await?;

        let updated = ChartRepository::update_config(
            &self.db,
            chart_id,
            request.title,
            request.query,
            request.config,
            user_id,
        )
        .await?;
        Ok(updated.into())
    }

    /// 删除图表
    #[instrument(skip(self))]
    pub async fn delete(&self, user_id: Uuid, chart_id: Uuid) -> Result<(), EnerboardError> {
        self.load_visible(user_id, chart_id).await?;
        ChartRepository::delete(&self.db, chart_id).await
    }

    /// 查询版本历史
    #[instrument(skip(self))]
    pub async fn versions(
        &self,
        user_id: Uuid,
        chart_id: Uuid,
    ) -> Result<Vec<chart_version::Model>, EnerboardError> {
        self.load_visible(user_id, chart_id).await?;
        ChartRepository::list_versions(&self.db, chart_id).await
    }

    /// 放置图表到标签页
    #[instrument(skip(self, request))]
    pub async fn place(
        &self,
        user_id: Uuid,
        chart_id: Uuid,
        request: PlaceChartRequest,
    ) -> Result<chart_placement::Model, EnerboardError> {
        self.load_visible(user_id, chart_id).await?;

        if request.grid_w <= 0 || request.grid_h <= 0 {
            return Err(EnerboardError::validation("grid", "网格尺寸必须为正数"));
        }

        ChartRepository::place(
            &self.db,
            request.tab_id,
            chart_id,
            request.grid_x,
            request.grid_y,
            request.grid_w,
            request.grid_h,
        )
        .await
    }

    /// 列出标签页布局
    #[instrument(skip(self))]
    pub async fn placements(
        &self,
        tab_id: Uuid,
    ) -> Result<Vec<chart_placement::Model>, EnerboardError> {
        ChartRepository::list_placements(&self.db, tab_id).await
    }

    /// 移除布局
    #[instrument(skip(self))]
    pub async fn remove_placement(
        &self,
        placement_id: Uuid,
    ) -> Result<(), EnerboardError> {
        ChartRepository::remove_placement(&self.db, placement_id).await
    }

    /// 加载图表并检查可见性
    async fn load_visible(
        &self,
        user_id: Uuid,
        chart_id: Uuid,
    ) -> Result<chart::Model, EnerboardError> {
        let chart = ChartRepository::find_by_id(&self.db, chart_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("图表"))?;

        if chart.owner_user_id == Some(user_id) {
            return Ok(chart);
        }

        if let Some(team_id) = chart.owner_team_id {
            TeamRepository::find_membership(&self.db, team_id, user_id)
                .await?
                .ok_or_else(|| EnerboardError::forbidden("没有访问该图表的权限"))?;
            return Ok(chart);
        }

        Err(EnerboardError::forbidden("没有访问该图表的权限"))
    }
}
