// 聊天服务
// 会话、消息与 Agent 命令分发

use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::db::entities::{agent_command, chat_agent, chat_message, chat_session};
use crate::db::repositories::ChatRepository;
use crate::errors::EnerboardError;
use crate::optimizer::OptimizationRequest;
use crate::services::simulation::SimulationService;

/// 创建会话请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateSessionRequest {
    /// 会话标题（缺省为"新会话"）
    pub title: Option<String>,
    /// 绑定的 Agent 名称（如 energy-copilot）
    pub agent_name: Option<String>,
}

/// 发送消息请求
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct PostMessageRequest {
    /// 消息正文；以 "/" 开头时按 Agent 命令处理
    pub content: String,
}

/// 执行命令请求
#[derive(Debug, Clone, Deserialize, Default, ToSchema)]
pub struct ExecuteCommandRequest {
    /// 命令参数
    #[serde(default)]
    pub arguments: serde_json::Value,
}

/// 聊天服务
pub struct ChatService {
    db: DatabaseConnection,
}

impl ChatService {
    /// 创建新的聊天服务
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// 创建会话
    #[instrument(skip(self, request))]
    pub async fn create_session(
        &self,
        user_id: Uuid,
        request: CreateSessionRequest,
    ) -> Result<chat_session::Model, EnerboardError> {
        let agent_id = match request.agent_name {
            Some(name) => {
                let agent = ChatRepository::find_agent_by_name(&self.db, &name)
                    .await?
                    .ok_or_else(|| EnerboardError::not_found("聊天 Agent"))?;
                if !agent.is_active() {
                    return Err(EnerboardError::validation("agent_name", "Agent 不可用"));
                }
                Some(agent.id)
            }
            None => None,
        };

        let title = request.title.unwrap_or_else(|| "新会话".to_string());
        ChatRepository::create_session(&self.db, user_id, agent_id, title).await
    }

    /// 列出用户会话
    #[instrument(skip(self))]
    pub async fn list_sessions(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<chat_session::Model>, EnerboardError> {
        ChatRepository::list_sessions(&self.db, user_id).await
    }

    /// 获取会话（含归属检查）
    #[instrument(skip(self))]
    pub async fn get_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<chat_session::Model, EnerboardError> {
        let session = ChatRepository::find_session(&self.db, session_id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("聊天会话"))?;

        if session.user_id != user_id {
            return Err(EnerboardError::forbidden("没有访问该会话的权限"));
        }
        Ok(session)
    }

    /// 关闭会话
    #[instrument(skip(self))]
    pub async fn close_session(
        &self,
        user_id: Uuid,
        session_id: Uuid,
    ) -> Result<chat_session::Model, EnerboardError> {
        self.get_session(user_id, session_id).await?;
        ChatRepository::close_session(&self.db, session_id).await
    }

    /// 列出会话消息
    #[instrument(skip(self))]
    pub async fn list_messages(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        limit: u64,
    ) -> Result<Vec<chat_message::Model>, EnerboardError> {
        self.get_session(user_id, session_id).await?;
        ChatRepository::list_messages(&self.db, session_id, limit).await
    }

    /// 发送消息
    ///
    /// 以 "/" 开头的消息按命令解析并分发给会话绑定的 Agent，
    /// Agent 的回复作为新消息追加。
    #[instrument(skip(self, request))]
    pub async fn post_message(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        request: PostMessageRequest,
    ) -> Result<Vec<chat_message::Model>, EnerboardError> {
        let session = self.get_session(user_id, session_id).await?;

        if !session.is_active() {
            return Err(EnerboardError::validation("session", "会话已关闭"));
        }
        if request.content.trim().is_empty() {
            return Err(EnerboardError::validation("content", "消息不能为空"));
        }

        let user_message = ChatRepository::append_message(
            &self.db,
            session_id,
            chat_message::ChatAuthor::User,
            request.content.clone(),
            serde_json::json!({}),
        )
        .await?;

        let mut messages = vec![user_message];

        // 命令消息触发 Agent 回复
        if let Some(command_line) = request.content.strip_prefix('/') {
            let reply = self.dispatch_command(&session, command_line).await?;
            messages.push(reply);
        }

        Ok(messages)
    }

    /// 列出活跃 Agent
    #[instrument(skip(self))]
    pub async fn list_agents(&self) -> Result<Vec<chat_agent::Model>, EnerboardError> {
        ChatRepository::list_agents(&self.db).await
    }

    /// 列出 Agent 命令
    #[instrument(skip(self))]
    pub async fn list_commands(
        &self,
        agent_id: Uuid,
    ) -> Result<Vec<agent_command::Model>, EnerboardError> {
        ChatRepository::list_commands(&self.db, agent_id).await
    }

    /// 显式执行命令
    #[instrument(skip(self, request))]
    pub async fn execute_command(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        command_name: &str,
        request: ExecuteCommandRequest,
    ) -> Result<chat_message::Model, EnerboardError> {
        let session = self.get_session(user_id, session_id).await?;
        self.run_command(&session, command_name, request.arguments)
            .await
    }

    /// 解析命令行并执行
    ///
    /// 形如 "optimize elec=60 steam=400 hour=14"。
    async fn dispatch_command(
        &self,
        session: &chat_session::Model,
        command_line: &str,
    ) -> Result<chat_message::Model, EnerboardError> {
        let mut parts = command_line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| EnerboardError::validation("content", "缺少命令名称"))?;

        let mut arguments = serde_json::Map::new();
        for part in parts {
            if let Some((key, value)) = part.split_once('=') {
                let value = value
                    .parse::<f64>()
                    .map(serde_json::Value::from)
                    .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
                arguments.insert(key.to_string(), value);
            }
        }

        self.run_command(session, name, serde_json::Value::Object(arguments))
            .await
    }

    /// 执行 Agent 命令并追加回复消息
    async fn run_command(
        &self,
        session: &chat_session::Model,
        command_name: &str,
        arguments: serde_json::Value,
    ) -> Result<chat_message::Model, EnerboardError> {
        let agent_id = session
            .agent_id
            .ok_or_else(|| EnerboardError::validation("session", "会话没有绑定 Agent"))?;

        let command = ChatRepository::find_command(&self.db, agent_id, command_name)
            .await?
            .ok_or_else(|| EnerboardError::not_found(format!("命令 {}", command_name)))?;

        info!(session_id = %session.id, command = %command.name, "执行 Agent 命令");

        let (content, payload) = match command.name.as_str() {
            "optimize" => self.command_optimize(&arguments).await?,
            "live" => self.command_live().await?,
            "scenarios" => self.command_scenarios().await?,
            other => {
                warn!(command = %other, "未实现的 Agent 命令");
                return Err(EnerboardError::validation("command", "未实现的命令"));
            }
        };

        ChatRepository::append_message(
            &self.db,
            session.id,
            chat_message::ChatAuthor::Agent,
            content,
            payload,
        )
        .await
    }

    /// optimize 命令：执行一次调度优化
    async fn command_optimize(
        &self,
        arguments: &serde_json::Value,
    ) -> Result<(String, serde_json::Value), EnerboardError> {
        let elec_demand = arguments
            .get("elec")
            .or_else(|| arguments.get("elec_demand"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| EnerboardError::validation("elec_demand", "缺少电力需求参数"))?;
        let steam_demand = arguments
            .get("steam")
            .or_else(|| arguments.get("steam_demand"))
            .and_then(|v| v.as_f64())
            .ok_or_else(|| EnerboardError::validation("steam_demand", "缺少蒸汽需求参数"))?;
        let hour = arguments.get("hour").and_then(|v| v.as_u64()).map(|h| h as u8);

        let simulation = SimulationService::get()?;
        let response = simulation
            .optimize(OptimizationRequest {
                elec_demand,
                steam_demand,
                constraints: arguments.get("constraints").cloned(),
                hour,
                verbose: false,
            })
            .await?;

        let content = format!(
            "优化完成：总成本 {:.0} DH/hr，相对基准节省 {:.0} DH/hr。电网进口 {:.1} MW，锅炉出力 {:.1} T/hr。",
            response.total_cost, response.savings, response.grid_import, response.boiler_output
        );
        let payload = serde_json::json!({ "optimization_result": response });
        Ok((content, payload))
    }

    /// live 命令：查询实时状态
    async fn command_live(&self) -> Result<(String, serde_json::Value), EnerboardError> {
        let simulation = SimulationService::get()?;
        let feed = simulation.live_feed().await;

        match feed.snapshot {
            Some(state) => {
                let content = format!(
                    "当前发电 {:.1} MW，抽汽 {:.1} T/hr，小时成本 {:.0} DH/hr{}",
                    state.total_power_generated,
                    state.total_steam_gta,
                    state.cost_per_hour,
                    if state.pressure_alert { "，⚠️ MP 压力告警" } else { "" }
                );
                let payload = serde_json::json!({ "live_state": state });
                Ok((content, payload))
            }
            None => {
                let content = match feed.error {
                    Some(error) => format!("实时数据暂不可用：{}", error),
                    None => "实时数据正在加载".to_string(),
                };
                Ok((content, serde_json::json!({})))
            }
        }
    }

    /// scenarios 命令：列出预定义场景
    async fn command_scenarios(&self) -> Result<(String, serde_json::Value), EnerboardError> {
        let simulation = SimulationService::get()?;
        let scenarios = simulation.scenarios().await?;

        let names: Vec<&str> = scenarios
            .scenarios
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        let content = format!("可用场景：{}", names.join("、"));
        let payload = serde_json::json!({ "scenarios": scenarios.scenarios });
        Ok((content, payload))
    }
}
