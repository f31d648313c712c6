//! 執行結果模型（單次演算法執行的輸出）

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::algorithm::SolverKind;
use crate::allocation::RoomAllocation;
use crate::{Result, SchedError};

/// 所有變體共有的欄位
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunCommon {
    /// 求解器的初始配置
    #[serde(alias = "alokasi_ruangan_awal")]
    pub initial_allocation: RoomAllocation,

    /// 求解器的結果配置
    #[serde(alias = "alokasi_ruangan")]
    pub final_allocation: RoomAllocation,

    /// 搜尋耗時（秒）
    pub search_time: f64,

    /// 執行的迭代數（基因演算法為世代數）
    pub iteration: u64,
}

impl RunCommon {
    /// 創建共有欄位
    pub fn new(
        initial_allocation: RoomAllocation,
        final_allocation: RoomAllocation,
        search_time: f64,
        iteration: u64,
    ) -> Self {
        Self {
            initial_allocation,
            final_allocation,
            search_time,
            iteration,
        }
    }
}

/// 爬山法執行結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HillRun {
    #[serde(flatten)]
    pub common: RunCommon,

    /// 每次迭代的目標值
    pub objective_over_iteration: Vec<f64>,

    /// 陷入區域最佳解時的迭代
    #[serde(default)]
    pub local_optima_iteration: Option<u64>,

    /// 橫移次數
    #[serde(default)]
    pub sideways_moves: Option<u64>,

    /// 橫移上限
    #[serde(default)]
    pub max_sideways: Option<u64>,

    /// 重啟次數
    #[serde(default)]
    pub restart_count: Option<u64>,

    /// 每次重啟的迭代數
    #[serde(default)]
    pub iterations_per_restart: Option<Vec<u64>>,
}

impl HillRun {
    /// 創建爬山法結果
    pub fn new(common: RunCommon, objective_over_iteration: Vec<f64>) -> Self {
        Self {
            common,
            objective_over_iteration,
            ..Self::default()
        }
    }

    /// 建構器模式：設置橫移資訊
    pub fn with_sideways(mut self, sideways_moves: u64, max_sideways: u64) -> Self {
        self.sideways_moves = Some(sideways_moves);
        self.max_sideways = Some(max_sideways);
        self
    }

    /// 建構器模式：設置重啟資訊
    pub fn with_restarts(mut self, restart_count: u64, iterations_per_restart: Vec<u64>) -> Self {
        self.restart_count = Some(restart_count);
        self.iterations_per_restart = Some(iterations_per_restart);
        self
    }

    /// 建構器模式：設置區域最佳解迭代
    pub fn with_local_optima_iteration(mut self, iteration: u64) -> Self {
        self.local_optima_iteration = Some(iteration);
        self
    }
}

/// 模擬退火執行結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatedRun {
    #[serde(flatten)]
    pub common: RunCommon,

    /// 每次迭代的目標值
    pub objective_over_iteration: Vec<f64>,

    /// 卡在區域最佳解的次數
    #[serde(default)]
    pub local_optima_stuck_count: u64,

    /// 每次迭代的能量差（正值代表變差）
    pub delta_energy_over_iteration: Vec<f64>,

    /// 每次迭代的溫度
    pub temperature_over_iteration: Vec<f64>,
}

impl SimulatedRun {
    /// 創建模擬退火結果
    pub fn new(
        common: RunCommon,
        objective_over_iteration: Vec<f64>,
        delta_energy_over_iteration: Vec<f64>,
        temperature_over_iteration: Vec<f64>,
    ) -> Self {
        Self {
            common,
            objective_over_iteration,
            local_optima_stuck_count: 0,
            delta_energy_over_iteration,
            temperature_over_iteration,
        }
    }

    /// 建構器模式：設置卡住次數
    pub fn with_stuck_count(mut self, count: u64) -> Self {
        self.local_optima_stuck_count = count;
        self
    }
}

/// 基因演算法執行結果
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneticRun {
    #[serde(flatten)]
    pub common: RunCommon,

    /// 族群大小
    pub population_size: u64,

    /// 每代最佳目標值
    pub objective_best_over_iteration: Vec<f64>,

    /// 每代平均目標值
    pub objective_avg_over_iteration: Vec<f64>,

    /// 回傳的演算法參數（如交配率）
    #[serde(default)]
    pub params: BTreeMap<String, f64>,
}

impl GeneticRun {
    /// 創建基因演算法結果
    pub fn new(
        common: RunCommon,
        population_size: u64,
        objective_best_over_iteration: Vec<f64>,
        objective_avg_over_iteration: Vec<f64>,
    ) -> Self {
        Self {
            common,
            population_size,
            objective_best_over_iteration,
            objective_avg_over_iteration,
            params: BTreeMap::new(),
        }
    }

    /// 建構器模式：加入演算法參數
    pub fn with_param(mut self, name: impl Into<String>, value: f64) -> Self {
        self.params.insert(name.into(), value);
        self
    }
}

/// 執行結果（依求解器類型區分的封閉變體）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RunRecord {
    Hill(HillRun),
    Simulated(SimulatedRun),
    Genetic(GeneticRun),
}

impl RunRecord {
    /// 從不含類型標記的回應記錄解碼
    ///
    /// 回應內容不帶類型，由呼叫的端點決定。
    pub fn from_wire(kind: SolverKind, value: serde_json::Value) -> Result<Self> {
        let record = match kind {
            SolverKind::Hill => RunRecord::Hill(serde_json::from_value(value)?),
            SolverKind::Simulated => RunRecord::Simulated(serde_json::from_value(value)?),
            SolverKind::Genetic => RunRecord::Genetic(serde_json::from_value(value)?),
        };
        Ok(record)
    }

    /// 求解器類型
    pub fn kind(&self) -> SolverKind {
        match self {
            RunRecord::Hill(_) => SolverKind::Hill,
            RunRecord::Simulated(_) => SolverKind::Simulated,
            RunRecord::Genetic(_) => SolverKind::Genetic,
        }
    }

    /// 共有欄位
    pub fn common(&self) -> &RunCommon {
        match self {
            RunRecord::Hill(run) => &run.common,
            RunRecord::Simulated(run) => &run.common,
            RunRecord::Genetic(run) => &run.common,
        }
    }

    pub fn initial_allocation(&self) -> &RoomAllocation {
        &self.common().initial_allocation
    }

    pub fn final_allocation(&self) -> &RoomAllocation {
        &self.common().final_allocation
    }

    pub fn search_time(&self) -> f64 {
        self.common().search_time
    }

    pub fn iteration(&self) -> u64 {
        self.common().iteration
    }

    /// 檢查記錄的結構不變量
    pub fn validate(&self, run_id: &str) -> Result<()> {
        let invalid = |reason: String| SchedError::InvalidRun {
            run_id: run_id.to_string(),
            reason,
        };

        let common = self.common();
        common.initial_allocation.validate().map_err(invalid)?;
        common.final_allocation.validate().map_err(invalid)?;

        if !common.search_time.is_finite() || common.search_time < 0.0 {
            return Err(invalid(format!("搜尋耗時無效: {}", common.search_time)));
        }

        match self {
            RunRecord::Hill(_) => {}
            RunRecord::Simulated(run) => {
                let deltas = run.delta_energy_over_iteration.len();
                let temperatures = run.temperature_over_iteration.len();
                if deltas != temperatures {
                    return Err(invalid(format!(
                        "能量差序列長度 {} 與溫度序列長度 {} 不一致",
                        deltas, temperatures
                    )));
                }
            }
            RunRecord::Genetic(run) => {
                if run.population_size == 0 {
                    return Err(invalid("族群大小必須大於零".to_string()));
                }
            }
        }

        Ok(())
    }
}
