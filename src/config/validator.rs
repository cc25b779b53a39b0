// 配置验证器
// 提供详细的配置验证逻辑

use crate::config::AppConfig;
use enerboard_common::CommonError;
use url::Url;

/// 配置验证器
pub struct ConfigValidator;

impl ConfigValidator {
    /// 验证完整配置
    pub fn validate_all(config: &AppConfig) -> Result<(), Vec<CommonError>> {
        let mut errors = Vec::new();

        // 验证各个模块
        if let Err(e) = Self::validate_server(&config.server) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_database(&config.database) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_optimizer(&config.optimizer) {
            errors.push(e);
        }

        #[cfg(feature = "redis")]
        if let Err(e) = Self::validate_redis(&config.redis) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_security(&config.security) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_logging(&config.logging) {
            errors.push(e);
        }

        if let Err(e) = Self::validate_environment(&config.environment) {
            errors.push(e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// 验证服务器配置
    pub fn validate_server(config: &crate::config::ServerConfig) -> Result<(), CommonError> {
        if config.port == 0 {
            return Err(CommonError::validation("服务器端口不能为 0"));
        }

        if config.host.is_empty() {
            return Err(CommonError::validation("服务器主机地址不能为空"));
        }

        if let Some(workers) = config.workers {
            if workers == 0 {
                return Err(CommonError::validation("工作线程数不能为 0"));
            }
            if workers > 32 {
                return Err(CommonError::validation("工作线程数不建议超过 32"));
            }
        }

        Ok(())
    }

    /// 验证数据库配置
    pub fn validate_database(config: &crate::config::DatabaseConfig) -> Result<(), CommonError> {
        if config.url.is_empty() {
            return Err(CommonError::validation("数据库 URL 不能为空"));
        }

        // 验证 URL 格式
        if Url::parse(&config.url).is_err() {
            return Err(CommonError::validation("数据库 URL 格式无效"));
        }

        if config.max_connections == 0 {
            return Err(CommonError::validation("数据库最大连接数不能为 0"));
        }

        if config.min_connections > config.max_connections {
            return Err(CommonError::validation("数据库最小连接数不能大于最大连接数"));
        }

        if config.connect_timeout == 0 {
            return Err(CommonError::validation("数据库连接超时不能为 0"));
        }

        Ok(())
    }

    /// 验证优化服务配置
    pub fn validate_optimizer(config: &crate::config::OptimizerConfig) -> Result<(), CommonError> {
        if config.base_url.is_empty() {
            return Err(CommonError::validation("优化后端地址不能为空"));
        }

        // 验证端点 URL 格式与协议
        match Url::parse(&config.base_url) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    return Err(CommonError::validation("优化后端地址必须使用 http 或 https"));
                }
            }
            Err(_) => {
                return Err(CommonError::validation("优化后端地址格式无效"));
            }
        }

        if config.timeout == 0 {
            return Err(CommonError::validation("优化请求超时不能为 0"));
        }

        if config.poll_interval == 0 {
            return Err(CommonError::validation("实时数据轮询间隔不能为 0"));
        }

        if config.retry_attempts == 0 {
            return Err(CommonError::validation("重试次数不能为 0"));
        }

        Ok(())
    }

    /// 验证 Redis 配置
    #[cfg(feature = "redis")]
    pub fn validate_redis(config: &crate::config::RedisConfig) -> Result<(), CommonError> {
        if config.url.is_empty() {
            return Err(CommonError::validation("Redis URL 不能为空"));
        }

        if !config.url.starts_with("redis://") && !config.url.starts_with("rediss://") {
            return Err(CommonError::validation("Redis URL 必须以 redis:// 或 rediss:// 开头"));
        }

        if config.max_connections == 0 {
            return Err(CommonError::validation("Redis 最大连接数不能为 0"));
        }

        Ok(())
    }

    /// 验证安全配置
    pub fn validate_security(config: &crate::config::SecurityConfig) -> Result<(), CommonError> {
        if config.jwt_secret.len() < 32 {
            return Err(CommonError::validation("JWT 密钥长度不能少于 32 个字符"));
        }

        if config.jwt_expiration == 0 {
            return Err(CommonError::validation("JWT 过期时间不能为 0"));
        }

        if !(4..=31).contains(&config.bcrypt_cost) {
            return Err(CommonError::validation("bcrypt 成本参数必须在 4-31 之间"));
        }

        if config.cors_origins.is_empty() {
            return Err(CommonError::validation("CORS 来源列表不能为空"));
        }

        if config.share_link_ttl == 0 {
            return Err(CommonError::validation("分享链接有效期不能为 0"));
        }

        Ok(())
    }

    /// 验证日志配置
    pub fn validate_logging(config: &crate::config::LoggingConfig) -> Result<(), CommonError> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.level.as_str()) {
            return Err(CommonError::validation(
                format!("无效的日志级别: {}", config.level)
            ));
        }

        let valid_formats = ["json", "pretty", "compact", "full"];
        if !valid_formats.contains(&config.format.as_str()) {
            return Err(CommonError::validation(
                format!("无效的日志格式: {}", config.format)
            ));
        }

        if config.file_enabled && config.file_path.is_none() {
            return Err(CommonError::validation("启用文件日志时必须指定文件路径"));
        }

        Ok(())
    }

    /// 验证环境配置
    pub fn validate_environment(config: &crate::config::EnvironmentConfig) -> Result<(), CommonError> {
        let valid_environments = ["development", "production", "test", "staging"];
        if !valid_environments.contains(&config.name.as_str()) {
            return Err(CommonError::validation(
                format!("无效的环境名称: {}", config.name)
            ));
        }

        Ok(())
    }
}
