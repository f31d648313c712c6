//! 目標值解析

use sched_core::RunRecord;

/// 目標值解析器
///
/// 目標值越低越好。序列不保證單調遞減（橫移與接受較差解都會讓它回升），
/// 因此只取最後一個元素，不做任何搜尋。
pub struct ObjectiveResolver;

impl ObjectiveResolver {
    /// 最終目標值；序列為空時為 `+inf`
    pub fn final_objective(run: &RunRecord) -> f64 {
        Self::objective_series(run)
            .last()
            .copied()
            .unwrap_or(f64::INFINITY)
    }

    /// 可繪圖的目標值序列（基因演算法為每代最佳值）
    pub fn objective_series(run: &RunRecord) -> &[f64] {
        match run {
            RunRecord::Hill(hill) => &hill.objective_over_iteration,
            RunRecord::Simulated(sim) => &sim.objective_over_iteration,
            RunRecord::Genetic(genetic) => &genetic.objective_best_over_iteration,
        }
    }

    /// 次要目標值序列（僅基因演算法的每代平均值）
    pub fn secondary_objective_series(run: &RunRecord) -> &[f64] {
        match run {
            RunRecord::Genetic(genetic) => &genetic.objective_avg_over_iteration,
            RunRecord::Hill(_) | RunRecord::Simulated(_) => &[],
        }
    }

    /// 最後一代平均目標值（僅基因演算法）
    pub fn final_average_objective(run: &RunRecord) -> Option<f64> {
        Self::secondary_objective_series(run).last().copied()
    }
}
