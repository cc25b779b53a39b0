// 数据库实体模块
// 包含所有 SeaORM 实体定义

pub mod team;
pub mod user;
pub mod team_member;

// 看板相关实体
pub mod dashboard;
pub mod dashboard_tab;
pub mod dashboard_template;
pub mod chart;
pub mod chart_placement;
pub mod chart_version;

// 聊天相关实体
pub mod chat_agent;
pub mod agent_command;
pub mod chat_session;
pub mod chat_message;

// 通知与分享
pub mod notification;
pub mod share_link;

pub mod prelude;
pub use prelude::*;
