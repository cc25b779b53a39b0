// 图表仓储实现

use crate::db::entities::{chart, chart_placement, chart_version, prelude::*};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 图表仓储
pub struct ChartRepository;

impl ChartRepository {
    /// 创建新图表，同时写入初始版本快照
    #[instrument(skip(db, query, config))]
    pub async fn create(
        db: &DatabaseConnection,
        owner_user_id: Option<Uuid>,
        owner_team_id: Option<Uuid>,
        title: String,
        kind: chart::ChartKind,
        source: chart::ChartSource,
        query: serde_json::Value,
        config: serde_json::Value,
        created_by: Uuid,
    ) -> Result<chart::Model, EnerboardError> {
        info!(title = %title, "创建新图表");

        let txn = db.begin().await?;
        let now = chrono::Utc::now();
        let chart_id = Uuid::new_v4();

        let model = chart::ActiveModel {
            id: Set(chart_id),
            owner_user_id: Set(owner_user_id),
            owner_team_id: Set(owner_team_id),
            title: Set(title),
            kind: Set(kind),
            source: Set(source),
            query: Set(query.clone()),
            config: Set(config.clone()),
            current_version: Set(1),
            created_by: Set(created_by),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };
        let result = model.insert(&txn).await?;

        let version = chart_version::ActiveModel {
            id: Set(Uuid::new_v4()),
            chart_id: Set(chart_id),
            version: Set(1),
            query: Set(query),
            config: Set(config),
            created_by: Set(Some(created_by)),
            created_at: Set(now.into()),
        };
        version.insert(&txn).await?;

        txn.commit().await?;
        info!(chart_id = %result.id, "图表创建成功");
        Ok(result)
    }

    /// 根据 ID 查找图表
    #[instrument(skip(db))]
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<chart::Model>, EnerboardError> {
        let chart = Chart::find_by_id(id).one(db).await?;
        Ok(chart)
    }

    /// 列出用户可见的图表
    #[instrument(skip(db))]
    pub async fn list_visible(
        db: &DatabaseConnection,
        user_id: Uuid,
        team_ids: &[Uuid],
    ) -> Result<Vec<chart::Model>, EnerboardError> {
        let mut condition = Condition::any().add(chart::Column::OwnerUserId.eq(user_id));

        if !team_ids.is_empty() {
            condition = condition.add(chart::Column::OwnerTeamId.is_in(team_ids.to_vec()));
        }

        let charts = Chart::find()
            .filter(condition)
            .order_by_desc(chart::Column::UpdatedAt)
            .all(db)
            .await?;
        Ok(charts)
    }

    /// 更新图表配置并生成新的版本快照
    ///
    /// 版本号在事务内按 current_version + 1 分配，保证连续。
    #[instrument(skip(db, query, config))]
    pub async fn update_config(
        db: &DatabaseConnection,
        id: Uuid,
        title: Option<String>,
        query: Option<serde_json::Value>,
        config: Option<serde_json::Value>,
        updated_by: Uuid,
    ) -> Result<chart::Model, EnerboardError> {
        let chart = Self::find_by_id(db, id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("图表"))?;

        let config_changed = query.is_some() || config.is_some();
        let next_version = chart.current_version + 1;
        let now = chrono::Utc::now();

        let new_query = query.unwrap_or_else(|| chart.query.clone());
        let new_config = config.unwrap_or_else(|| chart.config.clone());

        let txn = db.begin().await?;

        let mut active_model: chart::ActiveModel = chart.into();
        if let Some(title) = title {
            active_model.title = Set(title);
        }
        if config_changed {
            active_model.query = Set(new_query.clone());
            active_model.config = Set(new_config.clone());
            active_model.current_version = Set(next_version);
        }
        active_model.updated_at = Set(now.into());
        let result = active_model.update(&txn).await?;

        if config_changed {
            let version = chart_version::ActiveModel {
                id: Set(Uuid::new_v4()),
                chart_id: Set(id),
                version: Set(next_version),
                query: Set(new_query),
                config: Set(new_config),
                created_by: Set(Some(updated_by)),
                created_at: Set(now.into()),
            };
            version.insert(&txn).await?;
        }

        txn.commit().await?;
        info!(chart_id = %id, version = next_version, "图表配置更新");
        Ok(result)
    }

    /// 删除图表
    #[instrument(skip(db))]
    pub async fn delete(db: &DatabaseConnection, id: Uuid) -> Result<(), EnerboardError> {
        let result = Chart::delete_by_id(id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(EnerboardError::not_found("图表"));
        }
        Ok(())
    }

    /// 列出图表版本历史
    #[instrument(skip(db))]
    pub async fn list_versions(
        db: &DatabaseConnection,
        chart_id: Uuid,
    ) -> Result<Vec<chart_version::Model>, EnerboardError> {
        let versions = ChartVersion::find()
            .filter(chart_version::Column::ChartId.eq(chart_id))
            .order_by_desc(chart_version::Column::Version)
            .all(db)
            .await?;
        Ok(versions)
    }

    /// 放置图表到标签页
    #[instrument(skip(db))]
    pub async fn place(
        db: &DatabaseConnection,
        tab_id: Uuid,
        chart_id: Uuid,
        grid_x: i32,
        grid_y: i32,
        grid_w: i32,
        grid_h: i32,
    ) -> Result<chart_placement::Model, EnerboardError> {
        let existing = ChartPlacement::find()
            .filter(chart_placement::Column::TabId.eq(tab_id))
            .filter(chart_placement::Column::ChartId.eq(chart_id))
            .one(db)
            .await?;

        if existing.is_some() {
            return Err(EnerboardError::conflict("图表已在该标签页上"));
        }

        let model = chart_placement::ActiveModel {
            id: Set(Uuid::new_v4()),
            tab_id: Set(tab_id),
            chart_id: Set(chart_id),
            grid_x: Set(grid_x),
            grid_y: Set(grid_y),
            grid_w: Set(grid_w),
            grid_h: Set(grid_h),
            created_at: Set(chrono::Utc::now().into()),
        };

        let result = model.insert(db).await?;
        Ok(result)
    }

    /// 列出标签页上的图表布局
    #[instrument(skip(db))]
    pub async fn list_placements(
        db: &DatabaseConnection,
        tab_id: Uuid,
    ) -> Result<Vec<chart_placement::Model>, EnerboardError> {
        let placements = ChartPlacement::find()
            .filter(chart_placement::Column::TabId.eq(tab_id))
            .all(db)
            .await?;
        Ok(placements)
    }

    /// 移除布局
    #[instrument(skip(db))]
    pub async fn remove_placement(
        db: &DatabaseConnection,
        placement_id: Uuid,
    ) -> Result<(), EnerboardError> {
        let result = ChartPlacement::delete_by_id(placement_id).exec(db).await?;
        if result.rows_affected == 0 {
            return Err(EnerboardError::not_found("图表布局"));
        }
        Ok(())
    }
}
