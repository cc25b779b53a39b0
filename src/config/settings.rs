// 应用程序设置和配置
// 定义配置结构体和加载逻辑

use config::{Config, ConfigError, Environment, File};
use enerboard_common::CommonError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 应用程序配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub optimizer: OptimizerConfig,
    #[cfg(feature = "redis")]
    pub redis: RedisConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub environment: EnvironmentConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub keep_alive: u64,
    pub client_timeout: u64,
    pub client_shutdown: u64,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
    pub idle_timeout: u64,
    pub max_lifetime: u64,
}

/// 优化服务配置
///
/// 外部能源调度优化后端（FastAPI 服务）的访问参数。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// 优化后端基础地址，例如 http://localhost:8000
    pub base_url: String,
    /// 单次请求超时（秒）
    pub timeout: u64,
    /// 失败重试次数
    pub retry_attempts: u32,
    /// 实时数据轮询间隔（秒）
    pub poll_interval: u64,
    /// 是否启动实时数据轮询任务
    pub poll_enabled: bool,
}

/// Redis 配置
#[cfg(feature = "redis")]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub response_timeout: u64,
}

/// 安全配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub bcrypt_cost: u32,
    pub cors_origins: Vec<String>,
    /// 分享链接默认有效期（秒）
    pub share_link_ttl: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file_enabled: bool,
    pub file_path: Option<String>,
    pub max_file_size: Option<u64>,
    pub max_files: Option<u32>,
}

/// 环境配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub name: String,
    pub debug: bool,
    pub version: String,
}

impl AppConfig {
    /// 从环境变量和配置文件加载配置
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Config::builder();

        // 1. 加载默认配置
        config = config.add_source(Config::try_from(&AppConfig::default())?);

        // 2. 尝试加载配置文件
        if Path::new("config.toml").exists() {
            config = config.add_source(File::with_name("config"));
        }

        // 3. 加载环境变量（优先级最高）
        config = config.add_source(
            Environment::with_prefix("ENERBOARD")
                .prefix_separator("_")
                .separator("__")
        );

        // 4. 构建配置
        let config = config.build()?;

        // 5. 反序列化为结构体
        let mut app_config: AppConfig = config.try_deserialize()?;

        // 6. 设置版本信息
        app_config.environment.version = env!("CARGO_PKG_VERSION").to_string();

        Ok(app_config)
    }

    /// 验证配置
    pub fn validate(&self) -> Result<(), CommonError> {
        use crate::config::ConfigValidator;

        match ConfigValidator::validate_all(self) {
            Ok(()) => Ok(()),
            Err(errors) => {
                let error_messages: Vec<String> = errors.iter()
                    .map(|e| e.to_string())
                    .collect();
                Err(CommonError::configuration(
                    format!("配置验证失败: {}", error_messages.join("; "))
                ))
            }
        }
    }

    /// 获取环境类型
    pub fn is_development(&self) -> bool {
        self.environment.name == "development"
    }

    /// 获取环境类型
    pub fn is_production(&self) -> bool {
        self.environment.name == "production"
    }

    /// 获取环境类型
    pub fn is_test(&self) -> bool {
        self.environment.name == "test"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                workers: None,
                keep_alive: 75,
                client_timeout: 5000,
                client_shutdown: 5000,
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/enerboard".to_string(),
                max_connections: 10,
                min_connections: 1,
                connect_timeout: 30,
                idle_timeout: 600,
                max_lifetime: 1800,
            },
            optimizer: OptimizerConfig {
                base_url: "http://localhost:8000".to_string(),
                timeout: 30,
                retry_attempts: 3,
                poll_interval: 5,
                poll_enabled: true,
            },
            #[cfg(feature = "redis")]
            redis: RedisConfig {
                url: "redis://localhost:6379".to_string(),
                max_connections: 10,
                connection_timeout: 5,
                response_timeout: 5,
            },
            security: SecurityConfig {
                jwt_secret: "your-super-secret-jwt-key-change-this-in-production".to_string(),
                jwt_expiration: 3600,
                bcrypt_cost: 12,
                cors_origins: vec!["*".to_string()],
                share_link_ttl: 7 * 24 * 3600,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "json".to_string(),
                file_enabled: false,
                file_path: None,
                max_file_size: Some(100 * 1024 * 1024), // 100MB
                max_files: Some(10),
            },
            environment: EnvironmentConfig {
                name: "development".to_string(),
                debug: true,
                version: "0.1.0".to_string(),
            },
        }
    }
}
