// 配置系统测试

#[cfg(test)]
mod tests {
    use crate::config::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.optimizer.base_url, "http://localhost:8000");
        assert_eq!(config.optimizer.poll_interval, 5);
        assert!(config.optimizer.poll_enabled);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();

        // 默认配置应该通过验证（JWT 密钥需要足够长）
        config.security.jwt_secret = "a".repeat(32);

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_config_validation() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "a".repeat(32);

        // 测试无效的端口
        config.server.port = 0;
        assert!(config.validate().is_err());

        // 重置端口，测试无效的数据库连接数
        config.server.port = 8080;
        config.database.max_connections = 0;
        assert!(config.validate().is_err());

        // 重置数据库连接数，测试无效的轮询间隔
        config.database.max_connections = 10;
        config.optimizer.poll_interval = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_optimizer_endpoint_validation() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "a".repeat(32);

        // 非 http(s) 协议被拒绝
        config.optimizer.base_url = "ftp://optimizer.local".to_string();
        assert!(config.validate().is_err());

        // 空地址被拒绝
        config.optimizer.base_url = String::new();
        assert!(config.validate().is_err());

        // https 地址通过
        config.optimizer.base_url = "https://optimizer.plant.local:8000".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_environment_methods() {
        let mut config = AppConfig::default();

        config.environment.name = "development".to_string();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.is_test());

        config.environment.name = "production".to_string();
        assert!(!config.is_development());
        assert!(config.is_production());
        assert!(!config.is_test());

        config.environment.name = "test".to_string();
        assert!(!config.is_development());
        assert!(!config.is_production());
        assert!(config.is_test());
    }

    #[test]
    fn test_config_validator_security() {
        use crate::config::ConfigValidator;

        let mut security = SecurityConfig {
            jwt_secret: "short".to_string(),
            jwt_expiration: 3600,
            bcrypt_cost: 12,
            cors_origins: vec!["*".to_string()],
            share_link_ttl: 3600,
        };

        // 密钥过短
        assert!(ConfigValidator::validate_security(&security).is_err());

        // 合法配置
        security.jwt_secret = "a".repeat(32);
        assert!(ConfigValidator::validate_security(&security).is_ok());

        // 分享链接有效期为 0
        security.share_link_ttl = 0;
        assert!(ConfigValidator::validate_security(&security).is_err());
    }

    #[test]
    fn test_config_validator_logging() {
        use crate::config::ConfigValidator;

        let mut logging = LoggingConfig {
            level: "info".to_string(),
            format: "json".to_string(),
            file_enabled: false,
            file_path: None,
            max_file_size: None,
            max_files: None,
        };

        assert!(ConfigValidator::validate_logging(&logging).is_ok());

        logging.level = "verbose".to_string();
        assert!(ConfigValidator::validate_logging(&logging).is_err());

        logging.level = "info".to_string();
        logging.file_enabled = true;
        assert!(ConfigValidator::validate_logging(&logging).is_err());
    }
}
