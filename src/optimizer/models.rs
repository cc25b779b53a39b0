// 优化后端数据模型
// 与外部能源调度优化服务（FastAPI）的请求/响应类型

use crate::errors::EnerboardError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// 输入校验边界
///
/// 与优化后端的 Pydantic 模型保持一致，在发起上游请求之前拦截非法输入。
pub mod limits {
    /// 电力需求上限 (MW)
    pub const MAX_ELEC_DEMAND: f64 = 150.0;
    /// 蒸汽需求上限 (T/hr)
    pub const MAX_STEAM_DEMAND: f64 = 600.0;
    /// 小时上限
    pub const MAX_HOUR: u8 = 23;
}

/// 电站常量镜像
///
/// 来源为优化后端的系统配置，作为本地兜底（上游 system-info 不可达时）
/// 以及 Mock 客户端的数据来源。
pub mod plant {
    /// 峰时电价 (DH/kWh, 17:00-22:00)
    pub const GRID_PEAK_COST: f64 = 1.271;
    /// 平时电价 (DH/kWh, 07:00-17:00)
    pub const GRID_STANDARD_COST: f64 = 0.897;
    /// 谷时电价 (DH/kWh, 22:00-07:00)
    pub const GRID_OFF_PEAK_COST: f64 = 0.552;
    /// 辅助锅炉蒸汽成本 (DH/T)
    pub const BOILER_COST: f64 = 284.0;
    /// 硫酸余热回收蒸汽成本 (DH/T)
    pub const SULFURIC_HEAT_COST: f64 = 20.0;
    /// GTA 燃料成本 (DH/kWh)
    pub const GTA_FUEL_COST: f64 = 0.65;
    /// 峰时开始
    pub const PEAK_HOURS_START: u8 = 17;
    /// 峰时结束
    pub const PEAK_HOURS_END: u8 = 22;
    /// 单台 GTA 最大进汽量 (T/hr)
    pub const MAX_ADMISSION: f64 = 190.0;
    /// 单台 GTA 最大抽汽量 (T/hr)
    pub const MAX_SOUTIRAGE: f64 = 100.0;
    /// 全厂蒸汽产能上限 (T/hr)
    pub const MAX_TOTAL_STEAM_PRODUCTION: f64 = 600.0;
    /// 全厂发电上限 (MW)
    pub const MAX_TOTAL_POWER_PRODUCTION: f64 = 111.0;
    /// 电网进口上限 (MW)
    pub const MAX_GRID_IMPORT: f64 = 100.0;
    /// 锅炉产能上限 (T/hr)
    pub const MAX_BOILER_CAPACITY: f64 = 200.0;
    /// MP 蒸汽压力告警阈值 (bar)
    pub const CRITICAL_PRESSURE: f64 = 8.5;

    /// 按小时取电网电价（ONE 峰平谷电价表）
    pub fn grid_cost(hour: u8) -> f64 {
        match hour {
            17..=21 => GRID_PEAK_COST,
            7..=16 => GRID_STANDARD_COST,
            _ => GRID_OFF_PEAK_COST,
        }
    }
}

/// 优化请求
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptimizationRequest {
    /// 电力需求 (MW)，范围 [0, 150]
    pub elec_demand: f64,
    /// MP 蒸汽需求 (T/hr)，范围 [0, 600]
    pub steam_demand: f64,
    /// 业务约束，如 {"gta2_status": "MAINTENANCE", "cap_steam": 420}
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraints: Option<serde_json::Value>,
    /// 电价小时 (0-23)，缺省由后端取当前时间
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u8>,
    /// 是否输出详细求解日志
    #[serde(default)]
    pub verbose: bool,
}

/// 单台 GTA 的调度结果
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GtaResult {
    /// GTA 编号 (1-3)
    pub gta_number: u32,
    /// HP 蒸汽进汽量 (T/hr)
    pub admission: f64,
    /// MP 蒸汽抽汽量 (T/hr)
    pub soutirage: f64,
    /// 发电功率 (MW)
    pub power: f64,
}

/// 成本构成明细
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CostBreakdown {
    /// 电网购电成本 (DH/hr)
    pub grid: f64,
    /// 锅炉运行成本 (DH/hr)
    pub boiler: f64,
    /// 硫酸余热回收成本 (DH/hr)
    pub sulfur: f64,
    /// GTA 燃料成本 (DH/hr)
    pub gta_fuel: f64,
}

/// 优化响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OptimizationResponse {
    /// 求解状态（Optimal / Infeasible 等）
    pub status: String,
    /// GTA 调度方案
    pub gtas: Vec<GtaResult>,
    /// 电网进口 (MW)
    pub grid_import: f64,
    /// 辅助锅炉蒸汽产量 (T/hr)
    pub boiler_output: f64,
    /// 硫酸余热回收蒸汽 (T/hr)
    pub sulfur_steam: f64,
    /// 总运行成本 (DH/hr)
    pub total_cost: f64,
    /// 成本构成
    pub cost_breakdown: CostBreakdown,
    /// 朴素策略基准成本 (DH/hr)
    pub baseline_cost: f64,
    /// 相对基准的节省 (DH/hr)
    pub savings: f64,
    /// 输入需求回显
    pub demands: HashMap<String, f64>,
    /// 实际生效的约束
    pub constraints_applied: serde_json::Value,
    /// 优化时间戳（ISO 8601）
    pub timestamp: String,
}

impl OptimizationResponse {
    /// 求解是否最优
    pub fn is_optimal(&self) -> bool {
        self.status == "Optimal"
    }
}

/// 单台 GTA 的实时运行数据
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GtaOperation {
    /// 发电功率 (MW)
    pub power: f64,
    /// HP 进汽量 (T/hr)
    pub admission: f64,
    /// MP 抽汽量 (T/hr)
    pub soutirage: f64,
}

/// 三台 GTA 的实时运行数据
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GtaOperations {
    pub gta1: GtaOperation,
    pub gta2: GtaOperation,
    pub gta3: GtaOperation,
}

/// 蒸汽来源构成
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SteamSourceBreakdown {
    pub sulfur_percent: f64,
    pub gta_percent: f64,
    pub boiler_percent: f64,
    pub sulfur_tons: f64,
    pub gta_tons: f64,
    pub boiler_tons: f64,
}

/// 蒸汽经济性指标
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SteamEconomics {
    /// 综合蒸汽成本 (DH/T)
    pub blended_cost_per_ton: f64,
    /// 每小时蒸汽总成本 (DH/hr)
    pub total_steam_cost_per_hour: f64,
    /// 来源构成
    pub source_breakdown: SteamSourceBreakdown,
}

/// 抽汽机会成本
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct OpportunityCost {
    /// 因抽汽损失的发电量 (MW)
    pub lost_power_mw: f64,
    /// 损失电量的价值 (DH/hr)
    pub lost_revenue_per_hour: f64,
    /// 抽汽效率 (%)
    pub extraction_efficiency: f64,
}

/// 需求估计
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LiveDemands {
    /// 电力需求 (MW)
    pub electricity: f64,
    /// 蒸汽需求 (T/hr)
    pub steam: f64,
}

/// 电站实时状态快照
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct LiveState {
    /// 快照时间戳（ISO 8601）
    pub timestamp: String,
    /// GTA 运行数据
    pub gta_operations: GtaOperations,
    /// 总发电功率 (MW)
    pub total_power_generated: f64,
    /// GTA 总抽汽量 (T/hr)
    pub total_steam_gta: f64,
    /// 硫磺流量 (T/hr)
    pub sulfur_flow: f64,
    /// 余热回收蒸汽当量 (T/hr)
    pub free_steam_equivalent: f64,
    /// MP 蒸汽压力 (bar)，传感器缺失时为空
    pub mp_pressure: Option<f64>,
    /// 压力是否低于告警阈值
    pub pressure_alert: bool,
    /// 估计电网进口 (MW)
    pub grid_import_estimated: f64,
    /// 估计锅炉用量 (T/hr)
    pub boiler_usage_estimated: f64,
    /// 系统效率 (%)
    pub efficiency_percent: f64,
    /// 小时成本 (DH/hr)
    pub cost_per_hour: f64,
    /// CO2 排放 (kg/hr)
    pub co2_emissions_kg_per_hour: f64,
    /// 免费能源占比 (%)
    pub free_energy_percent: f64,
    /// 需求估计
    pub demands: LiveDemands,
    /// 蒸汽经济性
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steam_economics: Option<SteamEconomics>,
    /// 抽汽机会成本
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opportunity_cost: Option<OpportunityCost>,
}

/// 实时接口响应包装
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiveEnvelope {
    pub success: bool,
    pub data: LiveState,
}

/// 优化后端健康状态
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BackendHealth {
    pub status: String,
    pub timestamp: String,
    pub optimizer_ready: bool,
    pub sulfur_data_loaded: bool,
}

/// 系统配置信息（来自上游 system-info）
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SystemInfo {
    pub financial_constants: HashMap<String, f64>,
    pub physics_coefficients: serde_json::Value,
    pub system_constraints: HashMap<String, f64>,
    pub gta_models: Vec<serde_json::Value>,
}

/// 预定义场景参数
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScenarioParams {
    pub elec_demand: f64,
    pub steam_demand: f64,
    pub constraints: serde_json::Value,
    pub hour: u8,
}

/// 预定义优化场景
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub params: ScenarioParams,
}

/// 场景列表响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScenarioList {
    pub scenarios: Vec<Scenario>,
}

/// 校验优化请求
///
/// 边界与上游一致：电力 [0,150] MW，蒸汽 [0,600] T/hr，小时 [0,23]；
/// constraints 若提供必须是 JSON 对象。
pub fn validate_optimization_request(request: &OptimizationRequest) -> Result<(), EnerboardError> {
    if !request.elec_demand.is_finite() || request.elec_demand < 0.0 {
        return Err(EnerboardError::validation(
            "elec_demand",
            "电力需求必须是非负数值",
        ));
    }
    if request.elec_demand > limits::MAX_ELEC_DEMAND {
        return Err(EnerboardError::validation(
            "elec_demand",
            format!("电力需求不能超过 {} MW", limits::MAX_ELEC_DEMAND),
        ));
    }

    if !request.steam_demand.is_finite() || request.steam_demand < 0.0 {
        return Err(EnerboardError::validation(
            "steam_demand",
            "蒸汽需求必须是非负数值",
        ));
    }
    if request.steam_demand > limits::MAX_STEAM_DEMAND {
        return Err(EnerboardError::validation(
            "steam_demand",
            format!("蒸汽需求不能超过 {} T/hr", limits::MAX_STEAM_DEMAND),
        ));
    }

    if let Some(hour) = request.hour {
        if hour > limits::MAX_HOUR {
            return Err(EnerboardError::validation(
                "hour",
                "小时必须在 0-23 之间",
            ));
        }
    }

    if let Some(constraints) = &request.constraints {
        if !constraints.is_object() {
            return Err(EnerboardError::validation(
                "constraints",
                "业务约束必须是 JSON 对象",
            ));
        }
    }

    Ok(())
}
