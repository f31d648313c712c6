//! 執行摘要與顯示格式

use sched_core::{AlgorithmSelection, RunCollection, RunRecord};
use serde::Serialize;

use crate::derived::{DerivedSeriesCalculator, SecondaryMetric};
use crate::objective::ObjectiveResolver;

/// 平均目標值圖表標題
pub const AVERAGE_CHART_TITLE: &str = "Average Objective vs Generasi";

/// 摘要表欄位標題
pub const SUMMARY_HEADERS: [&str; 13] = [
    "Run",
    "Best Objective",
    "Avg Objective",
    "Duration (s)",
    "Iterations",
    "Local Optima Iter",
    "Stuck Count",
    "Sideways Moves",
    "Restarts",
    "Max Sideways",
    "Iter per Restart",
    "Population",
    "Params",
];

const MISSING: &str = "-";

/// 數值顯示格式
///
/// 非有限值顯示為 `-`，整數不帶小數，其餘固定小數位數。
pub fn format_number(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return MISSING.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.fract() == 0.0 {
        return format!("{}", value);
    }
    format!("{:.*}", decimals, value)
}

/// 指標數值格式：絕對值小於 1 時取 3 位小數，否則 2 位
pub fn format_metric(value: f64) -> String {
    let decimals = if value.abs() < 1.0 { 3 } else { 2 };
    format_number(value, decimals)
}

fn or_missing<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| MISSING.to_string())
}

/// 目標值圖表標題
pub fn objective_chart_title(run: &RunRecord) -> &'static str {
    match run {
        RunRecord::Genetic(_) => "Best Objective vs Generasi",
        RunRecord::Hill(_) | RunRecord::Simulated(_) => "Objective vs Iterasi",
    }
}

/// 執行選單標籤：`Run N — <最終目標值>`
pub fn run_option_label(collection: &RunCollection, run_id: &str) -> Option<String> {
    let label = collection.label(run_id)?;
    let run = collection.get(run_id)?;
    Some(format!(
        "{} — {}",
        label,
        format_number(ObjectiveResolver::final_objective(run), 2)
    ))
}

/// 頂部指標卡
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineMetrics {
    pub final_objective: f64,
    pub duration: f64,
    pub iteration_title: &'static str,
    pub iteration_value: u64,
    pub secondary: SecondaryMetric,
}

impl HeadlineMetrics {
    /// 計算指標；爬山法的迭代指標優先使用區域最佳解迭代
    pub fn from_run(run: &RunRecord, hint: AlgorithmSelection) -> Self {
        let iteration_title = match run {
            RunRecord::Genetic(_) => "Generations",
            RunRecord::Hill(_) | RunRecord::Simulated(_) => "Iterations",
        };
        let iteration_value = match run {
            RunRecord::Hill(hill) => hill.local_optima_iteration.unwrap_or(hill.common.iteration),
            RunRecord::Simulated(_) | RunRecord::Genetic(_) => run.iteration(),
        };

        Self {
            final_objective: ObjectiveResolver::final_objective(run),
            duration: run.search_time(),
            iteration_title,
            iteration_value,
            secondary: DerivedSeriesCalculator::secondary_metric(run, hint),
        }
    }

    /// 顯示用（標題, 數值, 單位）
    pub fn display(&self) -> Vec<(&'static str, String, &'static str)> {
        vec![
            ("Final Objective", format_number(self.final_objective, 2), ""),
            ("Duration", format_number(self.duration, 3), "s"),
            (self.iteration_title, self.iteration_value.to_string(), ""),
            (
                self.secondary.title,
                format_metric(self.secondary.value as f64),
                self.secondary.suffix,
            ),
        ]
    }
}

/// 摘要表的一列
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub run_id: String,
    pub label: String,
    pub best_objective: f64,
    pub average_objective: Option<f64>,
    pub duration: f64,
    pub iterations: u64,
    pub local_optima_iteration: u64,
    pub stuck_count: Option<u64>,
    pub sideways_moves: Option<u64>,
    pub restarts: Option<u64>,
    pub max_sideways: Option<u64>,
    pub iterations_per_restart: Vec<u64>,
    pub population: Option<u64>,
    pub params: Vec<(String, f64)>,
}

impl RunSummary {
    /// 為單筆執行建立摘要
    pub fn from_run(run_id: &str, label: String, run: &RunRecord) -> Self {
        let mut summary = Self {
            run_id: run_id.to_string(),
            label,
            best_objective: ObjectiveResolver::final_objective(run),
            average_objective: ObjectiveResolver::final_average_objective(run),
            duration: run.search_time(),
            iterations: run.iteration(),
            local_optima_iteration: run.iteration(),
            stuck_count: None,
            sideways_moves: None,
            restarts: None,
            max_sideways: None,
            iterations_per_restart: Vec::new(),
            population: None,
            params: Vec::new(),
        };

        match run {
            RunRecord::Hill(hill) => {
                summary.local_optima_iteration =
                    hill.local_optima_iteration.unwrap_or(hill.common.iteration);
                summary.sideways_moves = hill.sideways_moves;
                summary.restarts = hill.restart_count;
                summary.max_sideways = hill.max_sideways;
                summary.iterations_per_restart =
                    hill.iterations_per_restart.clone().unwrap_or_default();
            }
            RunRecord::Simulated(sim) => {
                summary.stuck_count = Some(sim.local_optima_stuck_count);
            }
            RunRecord::Genetic(genetic) => {
                summary.population = Some(genetic.population_size);
                summary.params = genetic
                    .params
                    .iter()
                    .map(|(name, value)| (name.clone(), *value))
                    .collect();
            }
        }

        summary
    }

    /// 整個集合的摘要表（插入順序）
    pub fn table(collection: &RunCollection) -> Vec<Self> {
        collection
            .iter()
            .enumerate()
            .map(|(idx, (run_id, run))| Self::from_run(run_id, format!("Run {}", idx + 1), run))
            .collect()
    }

    /// 顯示用欄位，順序同 [`SUMMARY_HEADERS`]
    pub fn cells(&self) -> Vec<String> {
        let per_restart = if self.iterations_per_restart.is_empty() {
            MISSING.to_string()
        } else {
            self.iterations_per_restart
                .iter()
                .map(u64::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        };
        let params = if self.params.is_empty() {
            MISSING.to_string()
        } else {
            self.params
                .iter()
                .map(|(name, value)| format!("{}={}", name, format_metric(*value)))
                .collect::<Vec<_>>()
                .join(", ")
        };

        vec![
            self.label.clone(),
            format_number(self.best_objective, 2),
            self.average_objective
                .map(|avg| format_number(avg, 2))
                .unwrap_or_else(|| MISSING.to_string()),
            format_number(self.duration, 3),
            self.iterations.to_string(),
            self.local_optima_iteration.to_string(),
            or_missing(self.stuck_count),
            or_missing(self.sideways_moves),
            or_missing(self.restarts),
            or_missing(self.max_sideways),
            per_restart,
            or_missing(self.population),
            params,
        ]
    }
}
