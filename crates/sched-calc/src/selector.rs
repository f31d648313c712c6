//! 最佳執行選擇

use sched_core::{RunCollection, SchedError};

use crate::objective::ObjectiveResolver;

/// 最佳執行選擇器
pub struct BestRunSelector;

impl BestRunSelector {
    /// 選出最終目標值最小的執行
    ///
    /// 線性掃描，只有嚴格更小才替換，因此同分時保留最早插入的執行。
    pub fn pick_best(collection: &RunCollection) -> sched_core::Result<&str> {
        let mut runs = collection.iter();
        let (first_id, first_run) = runs.next().ok_or(SchedError::EmptyCollection)?;

        let mut best_id = first_id;
        let mut best_objective = ObjectiveResolver::final_objective(first_run);

        for (run_id, run) in runs {
            let objective = ObjectiveResolver::final_objective(run);
            if objective < best_objective {
                best_id = run_id;
                best_objective = objective;
            }
        }

        tracing::debug!("最佳執行: {} (目標值 {})", best_id, best_objective);

        Ok(best_id)
    }
}
