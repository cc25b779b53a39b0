// API 模块
// 统一导出所有 API 相关组件

pub mod routes;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod responses;
pub mod extractors;

pub use routes::*;
pub use models::*;
pub use responses::*;
pub use extractors::*;
