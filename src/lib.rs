//! # Sched
//!
//! 排課求解結果模型與課表投影
//!
//! - [`model`]: 區間、教室配置、執行記錄、參數設定
//! - [`calc`]: 最佳執行選擇、衍生序列、課表投影、摘要
//! - [`session`]: 求解請求、回應解碼、結果狀態機

pub use sched_calc as calc;
pub use sched_core as model;
pub use sched_session as session;

pub use sched_calc::{
    BestRunSelector, ChartSeries, DerivedSeriesCalculator, HeadlineMetrics, RunSummary,
    ScheduleGrid, ScheduleProjector,
};
pub use sched_core::{
    AlgorithmSelection, Day, Interval, ProjectionConfig, Result, RoomAllocation, RunCollection,
    RunRecord, SchedError, SolverEndpoint, SolverKind,
};
pub use sched_session::{
    AlgorithmParams, Session, SessionState, SolveRequest, SolverTransport, TransportResponse,
};
