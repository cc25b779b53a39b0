// 聊天仓储实现
// 覆盖会话、消息、Agent 与命令

use crate::db::entities::{agent_command, chat_agent, chat_message, chat_session, prelude::*};
use crate::errors::EnerboardError;
use sea_orm::{prelude::*, *};
use tracing::{info, instrument};
use uuid::Uuid;

/// 聊天仓储
pub struct ChatRepository;

impl ChatRepository {
    /// 创建新会话
    #[instrument(skip(db))]
    pub async fn create_session(
        db: &DatabaseConnection,
        user_id: Uuid,
        agent_id: Option<Uuid>,
        title: String,
    ) -> Result<chat_session::Model, EnerboardError> {
        info!(user_id = %user_id, "创建聊天会话");

        let now = chrono::Utc::now();
        let model = chat_session::ActiveModel {
            id: Set(Uuid::new_v4()),
            user_id: Set(user_id),
            agent_id: Set(agent_id),
            title: Set(title),
            status: Set(chat_session::ChatSessionStatus::Active),
            context: Set(serde_json::to_value(chat_session::SessionContext::default())?),
            last_message_at: Set(None),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        };

        let result = model.insert(db).await?;
        info!(session_id = %result.id, "会话创建成功");
        Ok(result)
    }

    /// 根据 ID 查找会话
    #[instrument(skip(db))]
    pub async fn find_session(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<Option<chat_session::Model>, EnerboardError> {
        let session = ChatSession::find_by_id(id).one(db).await?;
        Ok(session)
    }

    /// 列出用户的会话
    #[instrument(skip(db))]
    pub async fn list_sessions(
        db: &DatabaseConnection,
        user_id: Uuid,
    ) -> Result<Vec<chat_session::Model>, EnerboardError> {
        let sessions = ChatSession::find()
            .filter(chat_session::Column::UserId.eq(user_id))
            .order_by_desc(chat_session::Column::LastMessageAt)
            .all(db)
            .await?;
        Ok(sessions)
    }

    /// 关闭会话
    #[instrument(skip(db))]
    pub async fn close_session(
        db: &DatabaseConnection,
        id: Uuid,
    ) -> Result<chat_session::Model, EnerboardError> {
        let session = Self::find_session(db, id)
            .await?
            .ok_or_else(|| EnerboardError::not_found("聊天会话"))?;

        let mut active_model: chat_session::ActiveModel = session.into();
        active_model.status = Set(chat_session::ChatSessionStatus::Closed);
        active_model.updated_at = Set(chrono::Utc::now().into());

        let result = active_model.update(db).await?;
        Ok(result)
    }

    /// 追加消息并刷新会话时间
    #[instrument(skip(db, content, payload))]
    pub async fn append_message(
        db: &DatabaseConnection,
        session_id: Uuid,
        author: chat_message::ChatAuthor,
        content: String,
        payload: serde_json::Value,
    ) -> Result<chat_message::Model, EnerboardError> {
        let now = chrono::Utc::now();
        let txn = db.begin().await?;

        let model = chat_message::ActiveModel {
            id: Set(Uuid::new_v4()),
            session_id: Set(session_id),
            author: Set(author),
            content: Set(content),
            payload: Set(payload),
            created_at: Set(now.into()),
        };
        let result = model.insert(&txn).await?;

        ChatSession::update_many()
            .col_expr(chat_session::Column::LastMessageAt, Expr::value(now))
            .col_expr(chat_session::Column::UpdatedAt, Expr::value(now))
            .filter(chat_session::Column::Id.eq(session_id))
            .exec(&txn)
            .await?;

        txn.commit().await?;
        Ok(result)
    }

    /// 列出会话消息（按时间正序）
    #[instrument(skip(db))]
    pub async fn list_messages(
        db: &DatabaseConnection,
        session_id: Uuid,
        limit: u64,
    ) -> Result<Vec<chat_message::Model>, EnerboardError> {
        let messages = ChatMessage::find()
            .filter(chat_message::Column::SessionId.eq(session_id))
            .order_by_asc(chat_message::Column::CreatedAt)
            .limit(limit)
            .all(db)
            .await?;
        Ok(messages)
    }

    /// 列出活跃的 Agent
    #[instrument(skip(db))]
    pub async fn list_agents(
        db: &DatabaseConnection,
    ) -> Result<Vec<chat_agent::Model>, EnerboardError> {
        let agents = ChatAgent::find()
            .filter(chat_agent::Column::Status.eq(chat_agent::ChatAgentStatus::Active))
            .order_by_asc(chat_agent::Column::Name)
            .all(db)
            .await?;
        Ok(agents)
    }

    /// 根据名称查找 Agent
    #[instrument(skip(db))]
    pub async fn find_agent_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Option<chat_agent::Model>, EnerboardError> {
        let agent = ChatAgent::find()
            .filter(chat_agent::Column::Name.eq(name))
            .one(db)
            .await?;
        Ok(agent)
    }

    /// 列出 Agent 的启用命令
    #[instrument(skip(db))]
    pub async fn list_commands(
        db: &DatabaseConnection,
        agent_id: Uuid,
    ) -> Result<Vec<agent_command::Model>, EnerboardError> {
        let commands = AgentCommand::find()
            .filter(agent_command::Column::AgentId.eq(agent_id))
            .filter(agent_command::Column::Enabled.eq(true))
            .order_by_asc(agent_command::Column::Name)
            .all(db)
            .await?;
        Ok(commands)
    }

    /// 查找 Agent 的指定命令
    #[instrument(skip(db))]
    pub async fn find_command(
        db: &DatabaseConnection,
        agent_id: Uuid,
        name: &str,
    ) -> Result<Option<agent_command::Model>, EnerboardError> {
        let command = AgentCommand::find()
            .filter(agent_command::Column::AgentId.eq(agent_id))
            .filter(agent_command::Column::Name.eq(name))
            .filter(agent_command::Column::Enabled.eq(true))
            .one(db)
            .await?;
        Ok(command)
    }
}
