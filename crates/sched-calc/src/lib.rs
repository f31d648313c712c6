//! # Sched Calculation Engine
//!
//! 執行結果的目標值解析、最佳執行選擇、衍生序列與課表投影

pub mod derived;
pub mod objective;
pub mod projection;
pub mod selector;
pub mod summary;

// Re-export 主要類型
pub use derived::{ChartSeries, DerivedSeriesCalculator, SecondaryMetric};
pub use objective::ObjectiveResolver;
pub use projection::{ScheduleGrid, ScheduleProjector};
pub use selector::BestRunSelector;
pub use summary::{format_number, HeadlineMetrics, RunSummary};
