// 错误处理系统测试

#[cfg(test)]
mod tests {
    use crate::errors::{EnerboardError, ErrorResponse};

    #[test]
    fn test_error_creation() {
        let error = EnerboardError::validation("elec_demand", "电力需求超出范围");
        assert_eq!(error.error_code(), "VALIDATION_ERROR");
        assert_eq!(error.status_code(), 400);
        assert!(error.is_client_error());
        assert!(!error.is_server_error());
    }

    #[test]
    fn test_database_error() {
        let error = EnerboardError::database_with_code("连接失败", "23505");
        assert_eq!(error.error_code(), "DATABASE_ERROR");
        assert_eq!(error.status_code(), 500);
        assert!(!error.is_client_error());
        assert!(error.is_server_error());
    }

    #[test]
    fn test_optimizer_error() {
        let error = EnerboardError::optimizer_with_endpoint("求解器不可用", "/api/optimize");
        assert_eq!(error.error_code(), "OPTIMIZER_ERROR");
        assert_eq!(error.status_code(), 502);
    }

    #[test]
    fn test_rate_limit_error() {
        let error = EnerboardError::rate_limit(Some(60));
        assert_eq!(error.error_code(), "RATE_LIMIT");
        assert_eq!(error.status_code(), 429);
    }

    #[test]
    fn test_sharing_error() {
        let error = EnerboardError::sharing("链接已过期");
        assert_eq!(error.error_code(), "SHARING_ERROR");
        assert_eq!(error.status_code(), 410);
    }

    #[test]
    fn test_error_logging() {
        let validation_error = EnerboardError::validation("field", "message");
        assert!(!validation_error.should_log());

        let internal_error = EnerboardError::internal("something went wrong");
        assert!(internal_error.should_log());
    }

    #[test]
    fn test_error_response_creation() {
        let error = EnerboardError::validation("steam_demand", "蒸汽需求超出范围");
        let response = ErrorResponse::from_error(&error);

        assert!(!response.success);
        assert_eq!(response.error.code, "VALIDATION_ERROR");
        assert!(response.error.message.contains("蒸汽需求超出范围"));
        assert!(response.error.details.is_some());
    }

    #[test]
    fn test_error_response_retry_after() {
        let error = EnerboardError::rate_limit(Some(30));
        let response = ErrorResponse::from_error(&error);
        assert_eq!(response.error.retry_after, Some(30));
    }

    #[test]
    fn test_common_error_conversion() {
        let common = enerboard_common::CommonError::not_found("看板");
        let error: EnerboardError = common.into();
        assert_eq!(error.error_code(), "NOT_FOUND");
        assert_eq!(error.status_code(), 404);
    }
}
