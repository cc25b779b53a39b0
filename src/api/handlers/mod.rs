// API 处理器模块

pub mod auth;
pub mod chart;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod notification;
pub mod share;
pub mod simulation;
pub mod version;
