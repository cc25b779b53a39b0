// 服务层模块
// 包含所有业务逻辑服务

pub mod auth;
pub mod chart;
pub mod chat;
pub mod dashboard;
pub mod notification;
pub mod sharing;
pub mod simulation;

pub use auth::*;
pub use chart::*;
pub use chat::*;
pub use dashboard::*;
pub use notification::*;
pub use sharing::*;
pub use simulation::*;
