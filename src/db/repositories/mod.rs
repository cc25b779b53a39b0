// 数据仓储模块
// 每个聚合一个仓储，封装实体查询逻辑

pub mod user;
pub mod team;
pub mod dashboard;
pub mod chart;
pub mod chat;
pub mod notification;
pub mod share_link;

pub use user::UserRepository;
pub use team::TeamRepository;
pub use dashboard::DashboardRepository;
pub use chart::ChartRepository;
pub use chat::ChatRepository;
pub use notification::NotificationRepository;
pub use share_link::ShareLinkRepository;
