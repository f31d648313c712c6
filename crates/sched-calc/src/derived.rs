//! 衍生序列與次要指標

use sched_core::{AlgorithmSelection, HillVariant, RunRecord};
use serde::Serialize;

use crate::objective::ObjectiveResolver;

/// 次要指標（依變體決定顯示內容）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SecondaryMetric {
    pub title: &'static str,
    pub value: u64,
    pub suffix: &'static str,
}

impl SecondaryMetric {
    fn new(title: &'static str, value: u64, suffix: &'static str) -> Self {
        Self {
            title,
            value,
            suffix,
        }
    }
}

/// 單筆執行的所有圖表資料
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub objective_title: &'static str,
    pub objective: Vec<f64>,
    pub average: Vec<f64>,
    pub temperature: Vec<f64>,
    pub acceptance: Vec<f64>,
}

impl ChartSeries {
    /// 收集圖表序列；不適用於該變體的序列為空
    pub fn from_run(run: &RunRecord) -> Self {
        Self {
            objective_title: crate::summary::objective_chart_title(run),
            objective: ObjectiveResolver::objective_series(run).to_vec(),
            average: ObjectiveResolver::secondary_objective_series(run).to_vec(),
            temperature: DerivedSeriesCalculator::temperature_series(run).to_vec(),
            acceptance: DerivedSeriesCalculator::acceptance_probability_series(run),
        }
    }
}

/// 衍生序列計算器
pub struct DerivedSeriesCalculator;

impl DerivedSeriesCalculator {
    /// Metropolis 接受機率
    ///
    /// - 溫度 <= 0：0
    /// - 能量差 <= 0（改善或持平）：1
    /// - 其他：`exp(-delta / temperature)`
    ///
    /// 無法比較的輸入（NaN）視為 0，保證結果落在 `[0, 1]`。
    pub fn acceptance_probability(delta: f64, temperature: f64) -> f64 {
        if temperature.is_nan() || delta.is_nan() || temperature <= 0.0 {
            return 0.0;
        }
        if delta <= 0.0 {
            return 1.0;
        }
        (-delta / temperature).exp().clamp(0.0, 1.0)
    }

    /// 接受機率序列（僅模擬退火，其餘為空）
    ///
    /// 長度與能量差序列相同；缺少對應溫度時以 1 計算。
    pub fn acceptance_probability_series(run: &RunRecord) -> Vec<f64> {
        match run {
            RunRecord::Simulated(sim) => sim
                .delta_energy_over_iteration
                .iter()
                .enumerate()
                .map(|(idx, &delta)| {
                    let temperature = sim
                        .temperature_over_iteration
                        .get(idx)
                        .copied()
                        .unwrap_or(1.0);
                    Self::acceptance_probability(delta, temperature)
                })
                .collect(),
            RunRecord::Hill(_) | RunRecord::Genetic(_) => Vec::new(),
        }
    }

    /// 溫度序列（僅模擬退火）
    pub fn temperature_series(run: &RunRecord) -> &[f64] {
        match run {
            RunRecord::Simulated(sim) => &sim.temperature_over_iteration,
            RunRecord::Hill(_) | RunRecord::Genetic(_) => &[],
        }
    }

    /// 次要指標
    ///
    /// 執行記錄無法分辨爬山法子變體，需由發出求解請求的一方提供 `hint`。
    pub fn secondary_metric(run: &RunRecord, hint: AlgorithmSelection) -> SecondaryMetric {
        match run {
            RunRecord::Hill(hill) => match hint.hill_variant() {
                Some(HillVariant::Sideways) => SecondaryMetric::new(
                    "Sideways Moves",
                    hill.sideways_moves.unwrap_or(0),
                    "moves",
                ),
                Some(HillVariant::RandomRestart) => SecondaryMetric::new(
                    "Restart Count",
                    hill.restart_count.unwrap_or(0),
                    "restarts",
                ),
                _ => SecondaryMetric::new("Total Iterations", hill.common.iteration, ""),
            },
            RunRecord::Simulated(sim) => {
                SecondaryMetric::new("Stuck Count", sim.local_optima_stuck_count, "")
            }
            RunRecord::Genetic(genetic) => {
                SecondaryMetric::new("Population Size", genetic.population_size, "")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use sched_core::{GeneticRun, HillRun, RunCommon, SimulatedRun};

    fn simulated(deltas: Vec<f64>, temperatures: Vec<f64>) -> RunRecord {
        RunRecord::Simulated(SimulatedRun::new(RunCommon::default(), vec![], deltas, temperatures))
    }

    fn hill_with_counters() -> RunRecord {
        let common = RunCommon {
            iteration: 120,
            ..RunCommon::default()
        };
        RunRecord::Hill(
            HillRun::new(common, vec![5.0])
                .with_sideways(7, 10)
                .with_restarts(3, vec![40, 40, 40]),
        )
    }

    #[test]
    fn test_acceptance_series() {
        let run = simulated(vec![0.0, -1.0, 5.0], vec![10.0, 10.0, 0.0]);
        assert_eq!(DerivedSeriesCalculator::acceptance_probability_series(&run), vec![1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_acceptance_metropolis() {
        let run = simulated(vec![2.0], vec![4.0]);
        let series = DerivedSeriesCalculator::acceptance_probability_series(&run);
        assert!((series[0] - (-0.5f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_acceptance_missing_temperature() {
        let run = simulated(vec![1.0, 1.0], vec![2.0]);
        let series = DerivedSeriesCalculator::acceptance_probability_series(&run);

        assert_eq!(series.len(), 2);
        assert!((series[1] - (-1.0f64).exp()).abs() < 1e-12);
    }

    #[test]
    fn test_chart_series() {
        let run = RunRecord::Simulated(SimulatedRun::new(
            RunCommon::default(),
            vec![9.0, 8.0],
            vec![1.0, -1.0],
            vec![2.0, 1.5],
        ));
        let charts = ChartSeries::from_run(&run);

        assert_eq!(charts.objective_title, "Objective vs Iterasi");
        assert_eq!(charts.objective, vec![9.0, 8.0]);
        assert!(charts.average.is_empty());
        assert_eq!(charts.temperature, vec![2.0, 1.5]);
        assert_eq!(charts.acceptance.len(), 2);
        assert_eq!(charts.acceptance[1], 1.0);
    }

    #[test]
    fn test_acceptance_not_simulated() {
        assert!(DerivedSeriesCalculator::acceptance_probability_series(&hill_with_counters()).is_empty());
        assert!(DerivedSeriesCalculator::temperature_series(&hill_with_counters()).is_empty());
    }

    #[rstest]
    #[case(f64::NAN, 10.0, 0.0)]
    #[case(1.0, f64::NAN, 0.0)]
    #[case(f64::NEG_INFINITY, 1.0, 1.0)]
    #[case(f64::INFINITY, 1.0, 0.0)]
    #[case(-3.0, -1.0, 0.0)]
    fn test_acceptance_edge_values(#[case] delta: f64, #[case] temperature: f64, #[case] expected: f64) {
        assert_eq!(DerivedSeriesCalculator::acceptance_probability(delta, temperature), expected);
    }

    #[rstest]
    #[case(AlgorithmSelection::Hill(HillVariant::Sideways), "Sideways Moves", 7, "moves")]
    #[case(AlgorithmSelection::Hill(HillVariant::RandomRestart), "Restart Count", 3, "restarts")]
    #[case(AlgorithmSelection::Hill(HillVariant::Steepest), "Total Iterations", 120, "")]
    #[case(AlgorithmSelection::Hill(HillVariant::Stochastic), "Total Iterations", 120, "")]
    fn test_secondary_metric_hill(
        #[case] hint: AlgorithmSelection,
        #[case] title: &str,
        #[case] value: u64,
        #[case] suffix: &str,
    ) {
        let metric = DerivedSeriesCalculator::secondary_metric(&hill_with_counters(), hint);
        assert_eq!((metric.title, metric.value, metric.suffix), (title, value, suffix));
    }

    #[test]
    fn test_secondary_metric_defaults_to_zero() {
        let run = RunRecord::Hill(HillRun::new(RunCommon::default(), vec![]));
        let metric = DerivedSeriesCalculator::secondary_metric(
            &run,
            AlgorithmSelection::Hill(HillVariant::Sideways),
        );
        assert_eq!(metric.value, 0);
    }

    #[test]
    fn test_secondary_metric_other_kinds() {
        let sim = simulated(vec![], vec![]);
        let metric = DerivedSeriesCalculator::secondary_metric(&sim, AlgorithmSelection::Simulated);
        assert_eq!((metric.title, metric.value), ("Stuck Count", 0));

        let genetic = RunRecord::Genetic(GeneticRun::new(RunCommon::default(), 30, vec![], vec![]));
        let metric = DerivedSeriesCalculator::secondary_metric(&genetic, AlgorithmSelection::Genetic);
        assert_eq!((metric.title, metric.value), ("Population Size", 30));
    }

    proptest! {
        #[test]
        fn acceptance_stays_in_unit_interval(
            pairs in prop::collection::vec((-1.0e6f64..1.0e6, -1.0e3f64..1.0e3), 0..64),
        ) {
            let (deltas, temperatures): (Vec<f64>, Vec<f64>) = pairs.iter().copied().unzip();
            let series = DerivedSeriesCalculator::acceptance_probability_series(
                &simulated(deltas.clone(), temperatures.clone()),
            );

            prop_assert_eq!(series.len(), deltas.len());
            for (idx, p) in series.iter().enumerate() {
                prop_assert!((0.0..=1.0).contains(p));
                if temperatures[idx] <= 0.0 {
                    prop_assert_eq!(*p, 0.0);
                } else if deltas[idx] <= 0.0 {
                    prop_assert_eq!(*p, 1.0);
                }
            }
        }
    }
}
