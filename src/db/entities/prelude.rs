// 实体预导入模块
// 提供便捷的实体导入

pub use super::team::{Entity as Team, Model as TeamModel, ActiveModel as TeamActiveModel};
pub use super::user::{Entity as User, Model as UserModel, ActiveModel as UserActiveModel};
pub use super::team_member::{
    Entity as TeamMember, Model as TeamMemberModel, ActiveModel as TeamMemberActiveModel,
};
pub use super::dashboard::{
    Entity as Dashboard, Model as DashboardModel, ActiveModel as DashboardActiveModel,
};
pub use super::dashboard_tab::{
    Entity as DashboardTab, Model as DashboardTabModel, ActiveModel as DashboardTabActiveModel,
};
pub use super::dashboard_template::{
    Entity as DashboardTemplate, Model as DashboardTemplateModel,
    ActiveModel as DashboardTemplateActiveModel,
};
pub use super::chart::{Entity as Chart, Model as ChartModel, ActiveModel as ChartActiveModel};
pub use super::chart_placement::{
    Entity as ChartPlacement, Model as ChartPlacementModel,
    ActiveModel as ChartPlacementActiveModel,
};
pub use super::chart_version::{
    Entity as ChartVersion, Model as ChartVersionModel, ActiveModel as ChartVersionActiveModel,
};
pub use super::chat_agent::{
    Entity as ChatAgent, Model as ChatAgentModel, ActiveModel as ChatAgentActiveModel,
};
pub use super::agent_command::{
    Entity as AgentCommand, Model as AgentCommandModel, ActiveModel as AgentCommandActiveModel,
};
pub use super::chat_session::{
    Entity as ChatSession, Model as ChatSessionModel, ActiveModel as ChatSessionActiveModel,
};
pub use super::chat_message::{
    Entity as ChatMessage, Model as ChatMessageModel, ActiveModel as ChatMessageActiveModel,
};
pub use super::notification::{
    Entity as Notification, Model as NotificationModel, ActiveModel as NotificationActiveModel,
};
pub use super::share_link::{
    Entity as ShareLink, Model as ShareLinkModel, ActiveModel as ShareLinkActiveModel,
};
