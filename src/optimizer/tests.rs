// 优化后端集成测试

#[cfg(test)]
mod tests {
    use crate::optimizer::client::{MockOptimizerClient, OptimizerClient};
    use crate::optimizer::models::*;

    fn request(elec: f64, steam: f64, hour: Option<u8>) -> OptimizationRequest {
        OptimizationRequest {
            elec_demand: elec,
            steam_demand: steam,
            constraints: None,
            hour,
            verbose: false,
        }
    }

    #[test]
    fn test_validate_accepts_boundary_values() {
        assert!(validate_optimization_request(&request(0.0, 0.0, Some(0))).is_ok());
        assert!(validate_optimization_request(&request(150.0, 600.0, Some(23))).is_ok());
        assert!(validate_optimization_request(&request(60.0, 400.0, None)).is_ok());
    }

    #[test]
    fn test_validate_rejects_elec_demand_over_limit() {
        let err = validate_optimization_request(&request(151.0, 400.0, None)).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("elec_demand"));
    }

    #[test]
    fn test_validate_rejects_steam_demand_over_limit() {
        let err = validate_optimization_request(&request(60.0, 601.0, None)).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("steam_demand"));
    }

    #[test]
    fn test_validate_rejects_hour_out_of_range() {
        let err = validate_optimization_request(&request(60.0, 400.0, Some(24))).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(err.to_string().contains("hour"));
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        assert!(validate_optimization_request(&request(-1.0, 400.0, None)).is_err());
        assert!(validate_optimization_request(&request(60.0, -0.1, None)).is_err());
        assert!(validate_optimization_request(&request(f64::NAN, 400.0, None)).is_err());
    }

    #[test]
    fn test_validate_rejects_non_object_constraints() {
        let mut req = request(60.0, 400.0, None);
        req.constraints = Some(serde_json::json!([1, 2, 3]));
        assert!(validate_optimization_request(&req).is_err());

        req.constraints = Some(serde_json::json!({ "gta2_status": "OFF" }));
        assert!(validate_optimization_request(&req).is_ok());
    }

    #[test]
    fn test_grid_cost_tariff_bands() {
        // ONE 峰平谷电价表
        assert_eq!(plant::grid_cost(19), plant::GRID_PEAK_COST);
        assert_eq!(plant::grid_cost(17), plant::GRID_PEAK_COST);
        assert_eq!(plant::grid_cost(22), plant::GRID_OFF_PEAK_COST);
        assert_eq!(plant::grid_cost(10), plant::GRID_STANDARD_COST);
        assert_eq!(plant::grid_cost(7), plant::GRID_STANDARD_COST);
        assert_eq!(plant::grid_cost(2), plant::GRID_OFF_PEAK_COST);
    }

    #[tokio::test]
    async fn test_mock_optimize_returns_optimal() {
        let client = MockOptimizerClient::new();
        let response = client.optimize(&request(60.0, 400.0, Some(14))).await.unwrap();

        assert!(response.is_optimal());
        assert_eq!(response.gtas.len(), 3);
        assert!(response.total_cost > 0.0);
        assert!(response.savings >= 0.0);
        assert_eq!(response.demands.get("electricity"), Some(&60.0));
        assert_eq!(response.demands.get("steam"), Some(&400.0));
    }

    #[tokio::test]
    async fn test_mock_optimize_respects_gta_limits() {
        let client = MockOptimizerClient::new();
        let response = client.optimize(&request(150.0, 600.0, Some(19))).await.unwrap();

        for gta in &response.gtas {
            assert!(gta.power <= 37.0);
            assert!(gta.admission <= plant::MAX_ADMISSION);
            assert!(gta.soutirage <= plant::MAX_SOUTIRAGE);
        }
        assert!(response.boiler_output <= plant::MAX_BOILER_CAPACITY);
    }

    #[tokio::test]
    async fn test_mock_live_state_shape() {
        let client = MockOptimizerClient::new();
        let state = client.live_state().await.unwrap();

        assert!(state.total_power_generated > 0.0);
        assert!(state.mp_pressure.is_some());
        assert!(!state.pressure_alert);
        assert!(state.demands.steam > 0.0);
    }

    #[tokio::test]
    async fn test_mock_health_and_scenarios() {
        let client = MockOptimizerClient::new();

        let health = client.health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.optimizer_ready);

        let scenarios = client.scenarios().await.unwrap();
        assert!(!scenarios.scenarios.is_empty());
        for scenario in &scenarios.scenarios {
            // 预定义场景自身必须通过输入校验
            let req = OptimizationRequest {
                elec_demand: scenario.params.elec_demand,
                steam_demand: scenario.params.steam_demand,
                constraints: Some(scenario.params.constraints.clone()),
                hour: Some(scenario.params.hour),
                verbose: false,
            };
            assert!(validate_optimization_request(&req).is_ok());
        }
    }

    #[test]
    fn test_optimization_response_parses_upstream_payload() {
        // 上游 FastAPI 返回的实际字段形状
        let payload = serde_json::json!({
            "status": "Optimal",
            "gtas": [
                { "gta_number": 1, "admission": 170.0, "soutirage": 130.0, "power": 21.5 },
                { "gta_number": 2, "admission": 180.0, "soutirage": 140.0, "power": 22.8 },
                { "gta_number": 3, "admission": 165.0, "soutirage": 120.0, "power": 20.9 }
            ],
            "grid_import": 5.2,
            "boiler_output": 42.0,
            "sulfur_steam": 88.0,
            "total_cost": 21500.0,
            "cost_breakdown": { "grid": 4500.0, "boiler": 11928.0, "sulfur": 1760.0, "gta_fuel": 3312.0 },
            "baseline_cost": 25000.0,
            "savings": 3500.0,
            "demands": { "electricity": 60.0, "steam": 400.0 },
            "constraints_applied": { "cap_steam": 420 },
            "timestamp": "2025-06-01T14:00:00"
        });

        let response: OptimizationResponse = serde_json::from_value(payload).unwrap();
        assert!(response.is_optimal());
        assert_eq!(response.gtas[1].gta_number, 2);
        assert_eq!(response.cost_breakdown.boiler, 11928.0);
    }

    #[test]
    fn test_live_envelope_parses_upstream_payload() {
        let payload = serde_json::json!({
            "success": true,
            "data": {
                "timestamp": "2025-06-01T14:00:00",
                "gta_operations": {
                    "gta1": { "power": 22.0, "admission": 175.0, "soutirage": 145.0 },
                    "gta2": { "power": 24.0, "admission": 195.0, "soutirage": 155.0 },
                    "gta3": { "power": 21.0, "admission": 170.0, "soutirage": 140.0 }
                },
                "total_power_generated": 67.0,
                "total_steam_gta": 440.0,
                "sulfur_flow": 45.0,
                "free_steam_equivalent": 90.0,
                "mp_pressure": 8.2,
                "pressure_alert": true,
                "grid_import_estimated": 3.5,
                "boiler_usage_estimated": 50.0,
                "efficiency_percent": 86.5,
                "cost_per_hour": 19850.0,
                "co2_emissions_kg_per_hour": 45200.0,
                "free_energy_percent": 15.5,
                "demands": { "electricity": 70.5, "steam": 580.0 },
                "steam_economics": {
                    "blended_cost_per_ton": 45.2,
                    "total_steam_cost_per_hour": 26216.0,
                    "source_breakdown": {
                        "sulfur_percent": 15.5, "gta_percent": 75.9, "boiler_percent": 8.6,
                        "sulfur_tons": 90.0, "gta_tons": 440.0, "boiler_tons": 50.0
                    }
                },
                "opportunity_cost": {
                    "lost_power_mw": 74.8,
                    "lost_revenue_per_hour": 41140.0,
                    "extraction_efficiency": 47.2
                }
            }
        });

        let envelope: LiveEnvelope = serde_json::from_value(payload).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.data.mp_pressure, Some(8.2));
        assert!(envelope.data.pressure_alert);
        let economics = envelope.data.steam_economics.unwrap();
        assert_eq!(economics.source_breakdown.boiler_tons, 50.0);
    }

    #[test]
    fn test_live_state_tolerates_missing_pressure() {
        // 传感器缺失时 mp_pressure 为 null
        let payload = serde_json::json!({
            "timestamp": "2025-06-01T02:00:00",
            "gta_operations": {
                "gta1": { "power": 20.0, "admission": 160.0, "soutirage": 120.0 },
                "gta2": { "power": 20.0, "admission": 160.0, "soutirage": 120.0 },
                "gta3": { "power": 20.0, "admission": 160.0, "soutirage": 120.0 }
            },
            "total_power_generated": 60.0,
            "total_steam_gta": 360.0,
            "sulfur_flow": 30.0,
            "free_steam_equivalent": 60.0,
            "mp_pressure": null,
            "pressure_alert": false,
            "grid_import_estimated": 2.0,
            "boiler_usage_estimated": 40.0,
            "efficiency_percent": 80.0,
            "cost_per_hour": 15000.0,
            "co2_emissions_kg_per_hour": 40000.0,
            "free_energy_percent": 12.0,
            "demands": { "electricity": 62.0, "steam": 460.0 }
        });

        let state: LiveState = serde_json::from_value(payload).unwrap();
        assert!(state.mp_pressure.is_none());
        assert!(state.steam_economics.is_none());
    }
}
