// 聊天 API 处理器

use actix_web::{web, HttpResponse, Result as ActixResult};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::extractors::AuthExtractor;
use crate::api::responses::HttpResponseBuilder;
use crate::db::DatabaseManager;
use crate::services::chat::{
    ChatService, CreateSessionRequest, ExecuteCommandRequest, PostMessageRequest,
};

/// 消息列表查询参数
#[derive(Debug, Deserialize, ToSchema)]
pub struct MessagesQuery {
    /// 数量上限（默认 100）
    pub limit: Option<u64>,
}

/// 创建聊天会话
#[utoipa::path(
    post,
    path = "/chat/sessions",
    tag = "Chat",
    summary = "创建聊天会话",
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "会话创建成功"),
        (status = 404, description = "Agent 不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_session(
    auth: AuthExtractor,
    request: web::Json<CreateSessionRequest>,
) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let session = service
        .create_session(auth.0.user_id, request.into_inner())
        .await?;
    HttpResponseBuilder::created(session)
}

/// 列出会话
#[utoipa::path(
    get,
    path = "/chat/sessions",
    tag = "Chat",
    summary = "列出当前用户的聊天会话",
    responses(
        (status = 200, description = "会话列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_sessions(auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let sessions = service.list_sessions(auth.0.user_id).await?;
    HttpResponseBuilder::ok(sessions)
}

/// 获取会话详情
#[utoipa::path(
    get,
    path = "/chat/sessions/{session_id}",
    tag = "Chat",
    summary = "获取会话详情",
    params(
        ("session_id" = Uuid, Path, description = "会话 ID")
    ),
    responses(
        (status = 200, description = "会话详情"),
        (status = 404, description = "会话不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn get_session(auth: AuthExtractor, path: web::Path<Uuid>) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let session = service.get_session(auth.0.user_id, path.into_inner()).await?;
    HttpResponseBuilder::ok(session)
}

/// 关闭会话
#[utoipa::path(
    post,
    path = "/chat/sessions/{session_id}/close",
    tag = "Chat",
    summary = "关闭聊天会话",
    params(
        ("session_id" = Uuid, Path, description = "会话 ID")
    ),
    responses(
        (status = 200, description = "会话已关闭")
    ),
    security(("bearer_auth" = []))
)]
pub async fn close_session(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let session = service
        .close_session(auth.0.user_id, path.into_inner())
        .await?;
    HttpResponseBuilder::ok(session)
}

/// 列出会话消息
#[utoipa::path(
    get,
    path = "/chat/sessions/{session_id}/messages",
    tag = "Chat",
    summary = "列出会话消息",
    params(
        ("session_id" = Uuid, Path, description = "会话 ID"),
        ("limit" = Option<u64>, Query, description = "数量上限")
    ),
    responses(
        (status = 200, description = "消息列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_messages(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    query: web::Query<MessagesQuery>,
) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let messages = service
        .list_messages(auth.0.user_id, path.into_inner(), query.limit.unwrap_or(100))
        .await?;
    HttpResponseBuilder::ok(messages)
}

/// 发送消息
///
/// 以 "/" 开头的消息按 Agent 命令处理，响应中包含 Agent 的回复。
#[utoipa::path(
    post,
    path = "/chat/sessions/{session_id}/messages",
    tag = "Chat",
    summary = "发送消息",
    params(
        ("session_id" = Uuid, Path, description = "会话 ID")
    ),
    request_body = PostMessageRequest,
    responses(
        (status = 201, description = "消息已发送，返回新增消息（含 Agent 回复）"),
        (status = 400, description = "消息或命令无效")
    ),
    security(("bearer_auth" = []))
)]
pub async fn post_message(
    auth: AuthExtractor,
    path: web::Path<Uuid>,
    request: web::Json<PostMessageRequest>,
) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let messages = service
        .post_message(auth.0.user_id, path.into_inner(), request.into_inner())
        .await?;
    HttpResponseBuilder::created(messages)
}

/// 执行 Agent 命令
#[utoipa::path(
    post,
    path = "/chat/sessions/{session_id}/commands/{command_name}",
    tag = "Chat",
    summary = "执行 Agent 命令",
    params(
        ("session_id" = Uuid, Path, description = "会话 ID"),
        ("command_name" = String, Path, description = "命令名称")
    ),
    request_body = ExecuteCommandRequest,
    responses(
        (status = 201, description = "命令执行完成，返回 Agent 回复"),
        (status = 404, description = "命令不存在")
    ),
    security(("bearer_auth" = []))
)]
pub async fn execute_command(
    auth: AuthExtractor,
    path: web::Path<(Uuid, String)>,
    request: web::Json<ExecuteCommandRequest>,
) -> ActixResult<HttpResponse> {
    let (session_id, command_name) = path.into_inner();
    let service = chat_service()?;
    let message = service
        .execute_command(auth.0.user_id, session_id, &command_name, request.into_inner())
        .await?;
    HttpResponseBuilder::created(message)
}

/// 列出 Agent
#[utoipa::path(
    get,
    path = "/chat/agents",
    tag = "Chat",
    summary = "列出活跃的聊天 Agent",
    responses(
        (status = 200, description = "Agent 列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_agents(_auth: AuthExtractor) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let agents = service.list_agents().await?;
    HttpResponseBuilder::ok(agents)
}

/// 列出 Agent 命令
#[utoipa::path(
    get,
    path = "/chat/agents/{agent_id}/commands",
    tag = "Chat",
    summary = "列出 Agent 的可用命令",
    params(
        ("agent_id" = Uuid, Path, description = "Agent ID")
    ),
    responses(
        (status = 200, description = "命令列表")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_commands(
    _auth: AuthExtractor,
    path: web::Path<Uuid>,
) -> ActixResult<HttpResponse> {
    let service = chat_service()?;
    let commands = service.list_commands(path.into_inner()).await?;
    HttpResponseBuilder::ok(commands)
}

/// 构造聊天服务
fn chat_service() -> Result<ChatService, crate::errors::EnerboardError> {
    let db_manager = DatabaseManager::get()?;
    Ok(ChatService::new(db_manager.get_connection().clone()))
}

/// 配置聊天路由
pub fn configure_chat_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/chat")
            .route("/sessions", web::post().to(create_session))
            .route("/sessions", web::get().to(list_sessions))
            .route("/sessions/{session_id}", web::get().to(get_session))
            .route("/sessions/{session_id}/close", web::post().to(close_session))
            .route("/sessions/{session_id}/messages", web::get().to(list_messages))
            .route("/sessions/{session_id}/messages", web::post().to(post_message))
            .route(
                "/sessions/{session_id}/commands/{command_name}",
                web::post().to(execute_command),
            )
            .route("/agents", web::get().to(list_agents))
            .route("/agents/{agent_id}/commands", web::get().to(list_commands)),
    );
}
