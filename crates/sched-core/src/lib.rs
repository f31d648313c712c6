//! # Sched Core
//!
//! 求解結果的核心資料模型與類型定義

pub mod algorithm;
pub mod allocation;
pub mod collection;
pub mod config;
pub mod interval;
pub mod run;

// Re-export 主要類型
pub use algorithm::{AlgorithmSelection, HillVariant, SolverKind};
pub use allocation::RoomAllocation;
pub use collection::RunCollection;
pub use config::{GeneticParams, HillParams, ProjectionConfig, SimulatedParams, SolverEndpoint};
pub use interval::{Day, Interval};
pub use run::{GeneticRun, HillRun, RunCommon, RunRecord, SimulatedRun};

/// 排課結果錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum SchedError {
    #[error("求解回應不含任何執行結果")]
    EmptyCollection,

    #[error("傳輸錯誤: {0}")]
    Transport(String),

    #[error("輸入格式錯誤: {0}")]
    MalformedInput(String),

    #[error("參數 {name} 無效: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("未知的演算法: {0}")]
    UnknownAlgorithm(String),

    #[error("找不到執行結果: {0}")]
    RunNotFound(String),

    #[error("執行結果 {run_id} 無效: {reason}")]
    InvalidRun { run_id: String, reason: String },

    #[error("找不到教室: {0}")]
    RoomNotFound(String),

    #[error("已有求解請求進行中")]
    SolveInProgress,

    #[error("目前沒有進行中的求解請求")]
    NoSolveInProgress,

    #[error("解碼錯誤: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for SchedError {
    fn from(err: serde_json::Error) -> Self {
        SchedError::Decode(err.to_string())
    }
}

impl SchedError {
    /// 建立參數錯誤
    pub fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        SchedError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SchedError>;
