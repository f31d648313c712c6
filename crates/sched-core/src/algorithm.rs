//! 演算法選擇

use serde::{Deserialize, Serialize};

use crate::{Result, SchedError};

/// 求解器類型（決定回應記錄的形狀）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SolverKind {
    /// 爬山法
    Hill,
    /// 模擬退火
    Simulated,
    /// 基因演算法
    Genetic,
}

impl SolverKind {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverKind::Hill => "hill",
            SolverKind::Simulated => "simulated",
            SolverKind::Genetic => "genetic",
        }
    }
}

impl std::fmt::Display for SolverKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 爬山法子變體
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HillVariant {
    /// 最陡上升
    Steepest,
    /// 隨機爬山
    Stochastic,
    /// 允許橫移
    Sideways,
    /// 隨機重啟
    RandomRestart,
}

impl HillVariant {
    /// 查詢參數值
    pub fn as_str(self) -> &'static str {
        match self {
            HillVariant::Steepest => "steepest",
            HillVariant::Stochastic => "stochastic",
            HillVariant::Sideways => "sideways",
            HillVariant::RandomRestart => "random_restart",
        }
    }
}

/// 呼叫端選擇的演算法
///
/// 同時作為變體提示：執行記錄本身只帶 [`SolverKind`]，無法分辨爬山法子變體，
/// 因此由發出求解請求的一方攜帶。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "variant", rename_all = "lowercase")]
pub enum AlgorithmSelection {
    Hill(HillVariant),
    Simulated,
    Genetic,
}

impl AlgorithmSelection {
    /// 從顯示名稱解析演算法
    pub fn from_label(label: &str) -> Result<Self> {
        match label {
            "Steepest Ascent Hill-Climbing" => Ok(AlgorithmSelection::Hill(HillVariant::Steepest)),
            "Stochastic Hill-Climbing" => Ok(AlgorithmSelection::Hill(HillVariant::Stochastic)),
            "Sideways Move Hill-Climbing" => Ok(AlgorithmSelection::Hill(HillVariant::Sideways)),
            "Random Restart Hill-Climbing" => {
                Ok(AlgorithmSelection::Hill(HillVariant::RandomRestart))
            }
            "Simulated Annealing" => Ok(AlgorithmSelection::Simulated),
            "Genetic Algorithm" => Ok(AlgorithmSelection::Genetic),
            other => Err(SchedError::UnknownAlgorithm(other.to_string())),
        }
    }

    /// 顯示名稱
    pub fn label(self) -> &'static str {
        match self {
            AlgorithmSelection::Hill(HillVariant::Steepest) => "Steepest Ascent Hill-Climbing",
            AlgorithmSelection::Hill(HillVariant::Stochastic) => "Stochastic Hill-Climbing",
            AlgorithmSelection::Hill(HillVariant::Sideways) => "Sideways Move Hill-Climbing",
            AlgorithmSelection::Hill(HillVariant::RandomRestart) => "Random Restart Hill-Climbing",
            AlgorithmSelection::Simulated => "Simulated Annealing",
            AlgorithmSelection::Genetic => "Genetic Algorithm",
        }
    }

    /// 對應的求解器類型
    pub fn kind(self) -> SolverKind {
        match self {
            AlgorithmSelection::Hill(_) => SolverKind::Hill,
            AlgorithmSelection::Simulated => SolverKind::Simulated,
            AlgorithmSelection::Genetic => SolverKind::Genetic,
        }
    }

    /// 變體名稱（爬山法為子變體，其餘為類型名稱）
    pub fn variant_name(self) -> &'static str {
        match self {
            AlgorithmSelection::Hill(variant) => variant.as_str(),
            AlgorithmSelection::Simulated => "simulated",
            AlgorithmSelection::Genetic => "genetic",
        }
    }

    /// 爬山法子變體
    pub fn hill_variant(self) -> Option<HillVariant> {
        match self {
            AlgorithmSelection::Hill(variant) => Some(variant),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Steepest Ascent Hill-Climbing", "steepest", SolverKind::Hill)]
    #[case("Stochastic Hill-Climbing", "stochastic", SolverKind::Hill)]
    #[case("Sideways Move Hill-Climbing", "sideways", SolverKind::Hill)]
    #[case("Random Restart Hill-Climbing", "random_restart", SolverKind::Hill)]
    #[case("Simulated Annealing", "simulated", SolverKind::Simulated)]
    #[case("Genetic Algorithm", "genetic", SolverKind::Genetic)]
    fn test_from_label(#[case] label: &str, #[case] variant: &str, #[case] kind: SolverKind) {
        let selection = AlgorithmSelection::from_label(label).unwrap();
        assert_eq!(selection.variant_name(), variant);
        assert_eq!(selection.kind(), kind);
        assert_eq!(selection.label(), label);
    }

    #[test]
    fn test_unknown_label() {
        let err = AlgorithmSelection::from_label("Tabu Search").unwrap_err();
        assert!(matches!(err, SchedError::UnknownAlgorithm(name) if name == "Tabu Search"));
    }

    #[test]
    fn test_hill_variant() {
        let selection = AlgorithmSelection::Hill(HillVariant::Sideways);
        assert_eq!(selection.hill_variant(), Some(HillVariant::Sideways));
        assert_eq!(AlgorithmSelection::Genetic.hill_variant(), None);
    }
}
