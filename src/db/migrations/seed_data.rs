// 种子数据管理
// 用于开发和测试环境的初始数据

use crate::errors::EnerboardError;
use sea_orm::{ConnectionTrait, DatabaseConnection, Statement};
use tracing::{info, instrument};
use uuid::Uuid;

/// 种子数据管理器
pub struct SeedDataManager {
    db: DatabaseConnection,
}

impl SeedDataManager {
    /// 创建新的种子数据管理器
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 初始化所有种子数据
    #[instrument(skip(self))]
    pub async fn seed_all(&self) -> Result<(), EnerboardError> {
        info!("开始初始化种子数据");

        // 检查是否已经有数据
        if self.has_existing_data().await? {
            info!("检测到现有数据，跳过种子数据初始化");
            return Ok(());
        }

        // 创建默认团队
        let team_id = self.create_default_team().await?;

        // 创建管理员用户
        let admin_user_id = self.create_admin_user().await?;

        // 加入团队
        self.add_team_member(team_id, admin_user_id).await?;

        // 创建能源看板模板
        self.create_energy_template().await?;

        // 创建默认看板
        self.create_default_dashboard(team_id, admin_user_id).await?;

        // 创建能源助手 Agent 及命令
        let agent_id = self.create_copilot_agent().await?;
        self.create_agent_commands(agent_id).await?;

        info!("种子数据初始化完成");
        Ok(())
    }

    /// 清理种子数据
    #[instrument(skip(self))]
    pub async fn clean_all(&self) -> Result<(), EnerboardError> {
        info!("清理种子数据");

        // 依赖顺序逆序删除
        let statements = [
            "DELETE FROM share_links",
            "DELETE FROM notifications",
            "DELETE FROM chat_messages",
            "DELETE FROM chat_sessions",
            "DELETE FROM agent_commands",
            "DELETE FROM chat_agents",
            "DELETE FROM chart_versions",
            "DELETE FROM chart_placements",
            "DELETE FROM charts",
            "DELETE FROM dashboard_tabs",
            "DELETE FROM dashboards",
            "DELETE FROM dashboard_templates",
            "DELETE FROM team_members",
            "DELETE FROM teams",
            "DELETE FROM users",
        ];

        for sql in statements {
            self.execute(sql.to_string()).await?;
        }

        info!("种子数据清理完成");
        Ok(())
    }

    /// 检查是否已存在数据
    async fn has_existing_data(&self) -> Result<bool, EnerboardError> {
        let result = self.db
            .query_one(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                "SELECT EXISTS(SELECT 1 FROM users) AS exists".to_string(),
            ))
            .await?;

        if let Some(row) = result {
            Ok(row.try_get("", "exists").unwrap_or(false))
        } else {
            Ok(false)
        }
    }

    /// 创建默认团队
    async fn create_default_team(&self) -> Result<Uuid, EnerboardError> {
        let team_id = Uuid::new_v4();
        let sql = format!(
            r#"
            INSERT INTO teams (id, name, slug, description, status)
            VALUES ('{}', '运营团队', 'operations', '电站运营与能源调度团队', 'active')
            "#,
            team_id
        );
        self.execute(sql).await?;
        info!(team_id = %team_id, "默认团队创建成功");
        Ok(team_id)
    }

    /// 创建管理员用户
    async fn create_admin_user(&self) -> Result<Uuid, EnerboardError> {
        let user_id = Uuid::new_v4();
        // 默认密码 admin123，仅用于开发环境
        let password_hash = bcrypt::hash("admin123", bcrypt::DEFAULT_COST)
            .map_err(|e| EnerboardError::internal(format!("密码哈希失败: {}", e)))?;

        let sql = format!(
            r#"
            INSERT INTO users (id, email, password_hash, display_name, role, status)
            VALUES ('{}', 'admin@enerboard.local', '{}', '系统管理员', 'admin', 'active')
            "#,
            user_id, password_hash
        );
        self.execute(sql).await?;
        info!(user_id = %user_id, "管理员用户创建成功");
        Ok(user_id)
    }

    /// 添加团队成员
    async fn add_team_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), EnerboardError> {
        let sql = format!(
            r#"
            INSERT INTO team_members (team_id, user_id, role)
            VALUES ('{}', '{}', 'owner')
            "#,
            team_id, user_id
        );
        self.execute(sql).await
    }

    /// 创建能源看板模板
    async fn create_energy_template(&self) -> Result<(), EnerboardError> {
        let definition = serde_json::json!({
            "tabs": [
                {
                    "title": "实时监控",
                    "charts": [
                        { "title": "总发电功率", "kind": "gauge", "source": "live_metric", "query": { "metric": "total_power_generated" } },
                        { "title": "MP 蒸汽压力", "kind": "stat", "source": "live_metric", "query": { "metric": "mp_pressure" } },
                        { "title": "小时成本", "kind": "line", "source": "live_metric", "query": { "metric": "cost_per_hour" } }
                    ]
                },
                {
                    "title": "优化模拟",
                    "charts": [
                        { "title": "GTA 调度方案", "kind": "table", "source": "optimization_result", "query": { "field": "gtas" } },
                        { "title": "成本构成", "kind": "pie", "source": "optimization_result", "query": { "field": "cost_breakdown" } }
                    ]
                }
            ]
        });

        let sql = format!(
            r#"
            INSERT INTO dashboard_templates (name, description, definition, is_builtin)
            VALUES ('能源总览', '电站实时监控与优化模拟的标准布局', '{}', TRUE)
            "#,
            definition.to_string().replace('\'', "''")
        );
        self.execute(sql).await
    }

    /// 创建默认看板
    async fn create_default_dashboard(
        &self,
        team_id: Uuid,
        created_by: Uuid,
    ) -> Result<(), EnerboardError> {
        let sql = format!(
            r#"
            INSERT INTO dashboards (owner_team_id, name, slug, description, is_default, created_by)
            VALUES ('{}', '电站总览', 'plant-overview', '默认能源调度看板', TRUE, '{}')
            "#,
            team_id, created_by
        );
        self.execute(sql).await
    }

    /// 创建能源助手 Agent
    async fn create_copilot_agent(&self) -> Result<Uuid, EnerboardError> {
        let agent_id = Uuid::new_v4();
        let capabilities = serde_json::json!({
            "commands": ["optimize", "live", "scenarios"],
            "languages": ["zh-CN", "fr-FR"]
        });

        let sql = format!(
            r#"
            INSERT INTO chat_agents (id, name, description, status, capabilities)
            VALUES ('{}', 'energy-copilot', '能源调度助手，支持优化模拟与实时状态查询', 'active', '{}')
            "#,
            agent_id,
            capabilities.to_string().replace('\'', "''")
        );
        self.execute(sql).await?;
        info!(agent_id = %agent_id, "能源助手 Agent 创建成功");
        Ok(agent_id)
    }

    /// 创建 Agent 命令
    async fn create_agent_commands(&self, agent_id: Uuid) -> Result<(), EnerboardError> {
        let commands = [
            (
                "optimize",
                "执行一次调度优化模拟",
                serde_json::json!({
                    "type": "object",
                    "required": ["elec_demand", "steam_demand"],
                    "properties": {
                        "elec_demand": { "type": "number", "minimum": 0, "maximum": 150 },
                        "steam_demand": { "type": "number", "minimum": 0, "maximum": 600 },
                        "hour": { "type": "integer", "minimum": 0, "maximum": 23 }
                    }
                }),
            ),
            (
                "live",
                "查询当前电站实时状态",
                serde_json::json!({ "type": "object", "properties": {} }),
            ),
            (
                "scenarios",
                "列出预定义的优化场景",
                serde_json::json!({ "type": "object", "properties": {} }),
            ),
        ];

        for (name, description, schema) in commands {
            let sql = format!(
                r#"
                INSERT INTO agent_commands (agent_id, name, description, argument_schema)
                VALUES ('{}', '{}', '{}', '{}')
                "#,
                agent_id,
                name,
                description,
                schema.to_string().replace('\'', "''")
            );
            self.execute(sql).await?;
        }

        Ok(())
    }

    /// 执行 SQL
    async fn execute(&self, sql: String) -> Result<(), EnerboardError> {
        self.db
            .execute(Statement::from_string(
                sea_orm::DatabaseBackend::Postgres,
                sql,
            ))
            .await?;
        Ok(())
    }
}
