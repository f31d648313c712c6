//! 求解請求

use sched_core::config::QueryPairs;
use sched_core::{
    AlgorithmSelection, GeneticParams, HillParams, Result, SchedError, SimulatedParams,
    SolverEndpoint, SolverKind,
};
use serde::{Deserialize, Serialize};

/// 演算法與其參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AlgorithmParams {
    Hill(HillParams),
    Simulated(SimulatedParams),
    Genetic(GeneticParams),
}

impl AlgorithmParams {
    /// 以預設參數建立
    pub fn for_selection(selection: AlgorithmSelection) -> Self {
        match selection {
            AlgorithmSelection::Hill(variant) => AlgorithmParams::Hill(HillParams::new(variant)),
            AlgorithmSelection::Simulated => AlgorithmParams::Simulated(SimulatedParams::new()),
            AlgorithmSelection::Genetic => AlgorithmParams::Genetic(GeneticParams::new()),
        }
    }

    /// 對應的演算法選擇（變體提示）
    pub fn selection(&self) -> AlgorithmSelection {
        match self {
            AlgorithmParams::Hill(params) => AlgorithmSelection::Hill(params.variant),
            AlgorithmParams::Simulated(_) => AlgorithmSelection::Simulated,
            AlgorithmParams::Genetic(_) => AlgorithmSelection::Genetic,
        }
    }

    pub fn kind(&self) -> SolverKind {
        self.selection().kind()
    }

    /// 檢查參數並轉換為查詢參數
    pub fn query_pairs(&self) -> Result<QueryPairs> {
        match self {
            AlgorithmParams::Hill(params) => params.query_pairs(),
            AlgorithmParams::Simulated(params) => params.query_pairs(),
            AlgorithmParams::Genetic(params) => params.query_pairs(),
        }
    }
}

/// 已驗證、可送出的求解請求
#[derive(Debug, Clone, PartialEq)]
pub struct SolveRequest {
    /// 變體提示，隨結果一起保存
    pub selection: AlgorithmSelection,

    /// 完整網址（含查詢參數）
    pub url: String,

    /// 查詢參數
    pub query: QueryPairs,

    /// 排課問題（JSON）
    pub body: serde_json::Value,
}

impl SolveRequest {
    /// 建立求解請求
    ///
    /// 先解析問題 JSON，無效時在送出任何請求前以
    /// [`SchedError::MalformedInput`] 拒絕；接著檢查演算法參數。
    pub fn new(endpoint: &SolverEndpoint, params: &AlgorithmParams, problem_json: &str) -> Result<Self> {
        let body: serde_json::Value = serde_json::from_str(problem_json)
            .map_err(|err| SchedError::MalformedInput(err.to_string()))?;
        Self::from_value(endpoint, params, body)
    }

    /// 從已解析的問題建立求解請求
    pub fn from_value(
        endpoint: &SolverEndpoint,
        params: &AlgorithmParams,
        body: serde_json::Value,
    ) -> Result<Self> {
        let query = params.query_pairs()?;
        let url = endpoint.url(params.kind(), &query);

        Ok(Self {
            selection: params.selection(),
            url,
            query,
            body,
        })
    }

    pub fn kind(&self) -> SolverKind {
        self.selection.kind()
    }
}
