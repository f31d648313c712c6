//! 求解參數與投影配置

use serde::{Deserialize, Serialize};

use crate::algorithm::{HillVariant, SolverKind};
use crate::{Result, SchedError};

/// 查詢參數（名稱, 值）
pub type QueryPairs = Vec<(String, String)>;

/// 課表投影配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// 第一個顯示時刻
    pub first_hour: u32,

    /// 顯示的時刻數量
    pub hour_count: u32,
}

impl ProjectionConfig {
    /// 創建投影配置（預設 7 點起共 11 個時刻，即 7..=17）
    pub fn new() -> Self {
        Self {
            first_hour: 7,
            hour_count: 11,
        }
    }

    /// 建構器模式：設置時刻範圍
    pub fn with_hours(mut self, first_hour: u32, hour_count: u32) -> Self {
        self.first_hour = first_hour;
        self.hour_count = hour_count;
        self
    }

    /// 顯示範圍的結束時刻（不含），溢位時截在 `u32::MAX`
    pub fn end_hour(&self) -> u32 {
        self.first_hour.saturating_add(self.hour_count)
    }

    /// 最後一個顯示時刻（含）
    pub fn last_hour(&self) -> Option<u32> {
        self.end_hour().checked_sub(1)
    }

    /// 時刻是否在顯示範圍內
    pub fn contains_hour(&self, hour: u32) -> bool {
        hour >= self.first_hour && hour < self.end_hour()
    }

    /// 時刻對應的列索引
    pub fn hour_index(&self, hour: u32) -> Option<usize> {
        self.contains_hour(hour)
            .then(|| (hour - self.first_hour) as usize)
    }

    /// 所有顯示時刻
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.first_hour..self.end_hour()
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// 爬山法參數
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HillParams {
    /// 子變體
    pub variant: HillVariant,

    /// 橫移上限（僅 sideways 使用）
    pub max_sideways: Option<u32>,

    /// 重啟上限（僅 random_restart 使用）
    pub max_restart: Option<u32>,

    /// 每次重啟的迭代上限（僅 random_restart 使用）
    pub max_iterations_per_restart: Option<u32>,
}

impl HillParams {
    /// 創建爬山法參數
    pub fn new(variant: HillVariant) -> Self {
        Self {
            variant,
            max_sideways: None,
            max_restart: None,
            max_iterations_per_restart: None,
        }
    }

    /// 建構器模式：設置橫移上限
    pub fn with_max_sideways(mut self, max_sideways: u32) -> Self {
        self.max_sideways = Some(max_sideways);
        self
    }

    /// 建構器模式：設置重啟上限
    pub fn with_max_restart(mut self, max_restart: u32) -> Self {
        self.max_restart = Some(max_restart);
        self
    }

    /// 建構器模式：設置每次重啟的迭代上限
    pub fn with_max_iterations_per_restart(mut self, max_iterations: u32) -> Self {
        self.max_iterations_per_restart = Some(max_iterations);
        self
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        if self.variant == HillVariant::RandomRestart {
            if self.max_restart == Some(0) {
                return Err(SchedError::invalid_parameter("max_restart", "必須 >= 1"));
            }
            if self.max_iterations_per_restart == Some(0) {
                return Err(SchedError::invalid_parameter(
                    "max_iterations_per_restart",
                    "必須 >= 1",
                ));
            }
        }
        Ok(())
    }

    /// 轉換為查詢參數；只送出該子變體使用的參數
    pub fn query_pairs(&self) -> Result<QueryPairs> {
        self.validate()?;

        let mut pairs = vec![("variant".to_string(), self.variant.as_str().to_string())];
        match self.variant {
            HillVariant::Sideways => {
                if let Some(max_sideways) = self.max_sideways {
                    pairs.push(("max_sideways".to_string(), max_sideways.to_string()));
                }
            }
            HillVariant::RandomRestart => {
                if let Some(max_restart) = self.max_restart {
                    pairs.push(("max_restart".to_string(), max_restart.to_string()));
                }
                if let Some(max_iterations) = self.max_iterations_per_restart {
                    pairs.push((
                        "max_iterations_per_restart".to_string(),
                        max_iterations.to_string(),
                    ));
                }
            }
            HillVariant::Steepest | HillVariant::Stochastic => {}
        }
        Ok(pairs)
    }
}

/// 模擬退火參數（未設置時由求解服務決定）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulatedParams {
    /// 初始溫度（> 0）
    pub initial_temp: Option<f64>,

    /// 降溫係數（0 < decay < 1）
    pub decay: Option<f64>,
}

impl SimulatedParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置初始溫度
    pub fn with_initial_temp(mut self, initial_temp: f64) -> Self {
        self.initial_temp = Some(initial_temp);
        self
    }

    /// 建構器模式：設置降溫係數
    pub fn with_decay(mut self, decay: f64) -> Self {
        self.decay = Some(decay);
        self
    }

    /// 檢查參數範圍
    pub fn validate(&self) -> Result<()> {
        if let Some(temp) = self.initial_temp {
            if !temp.is_finite() || temp <= 0.0 {
                return Err(SchedError::invalid_parameter("initial_temp", "必須大於 0"));
            }
        }
        if let Some(decay) = self.decay {
            if !decay.is_finite() || decay <= 0.0 || decay >= 1.0 {
                return Err(SchedError::invalid_parameter("decay", "必須在 (0, 1) 區間內"));
            }
        }
        Ok(())
    }

    /// 轉換為查詢參數
    pub fn query_pairs(&self) -> Result<QueryPairs> {
        self.validate()?;

        let mut pairs = Vec::new();
        if let Some(temp) = self.initial_temp {
            pairs.push(("initial_temp".to_string(), temp.to_string()));
        }
        if let Some(decay) = self.decay {
            pairs.push(("decay".to_string(), decay.to_string()));
        }
        Ok(pairs)
    }
}

/// 基因演算法參數
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeneticParams {
    pub population_size: u32,
    pub max_generations: u32,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub tournament_k: u32,
    pub elitism: u32,
}

impl GeneticParams {
    /// 創建預設參數（族群 50，200 代）
    pub fn new() -> Self {
        Self {
            population_size: 50,
            max_generations: 200,
            crossover_rate: 0.9,
            mutation_rate: 0.2,
            tournament_k: 3,
            elitism: 1,
        }
    }

    /// 建構器模式：設置族群大小與世代數
    pub fn with_population(mut self, population_size: u32, max_generations: u32) -> Self {
        self.population_size = population_size;
        self.max_generations = max_generations;
        self
    }

    /// 建構器模式：設置交配率與突變率
    pub fn with_rates(mut self, crossover_rate: f64, mutation_rate: f64) -> Self {
        self.crossover_rate = crossover_rate;
        self.mutation_rate = mutation_rate;
        self
    }

    /// 建構器模式：設置競賽選擇大小
    pub fn with_tournament_k(mut self, tournament_k: u32) -> Self {
        self.tournament_k = tournament_k;
        self
    }

    /// 建構器模式：設置菁英數量
    pub fn with_elitism(mut self, elitism: u32) -> Self {
        self.elitism = elitism;
        self
    }

    /// 實際送出的菁英數量：不得達到族群大小，超出時下修為 `population_size - 1`
    pub fn effective_elitism(&self) -> u32 {
        if self.elitism >= self.population_size {
            self.population_size.saturating_sub(1)
        } else {
            self.elitism
        }
    }

    /// 檢查參數範圍（菁英數量會被下修而非拒絕）
    pub fn validate(&self) -> Result<()> {
        if self.population_size < 1 {
            return Err(SchedError::invalid_parameter("population_size", "必須 >= 1"));
        }
        if self.max_generations < 1 {
            return Err(SchedError::invalid_parameter("max_generations", "必須 >= 1"));
        }
        for (name, rate) in [
            ("crossover_rate", self.crossover_rate),
            ("mutation_rate", self.mutation_rate),
        ] {
            if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
                return Err(SchedError::invalid_parameter(name, "必須在 [0, 1] 區間內"));
            }
        }
        if self.tournament_k < 1 || self.tournament_k > self.population_size {
            return Err(SchedError::invalid_parameter(
                "tournament_k",
                format!("必須在 [1, {}] 區間內", self.population_size),
            ));
        }
        Ok(())
    }

    /// 轉換為查詢參數
    pub fn query_pairs(&self) -> Result<QueryPairs> {
        self.validate()?;

        Ok(vec![
            ("population_size".to_string(), self.population_size.to_string()),
            ("max_generations".to_string(), self.max_generations.to_string()),
            ("crossover_rate".to_string(), self.crossover_rate.to_string()),
            ("mutation_rate".to_string(), self.mutation_rate.to_string()),
            ("tournament_k".to_string(), self.tournament_k.to_string()),
            ("elitism".to_string(), self.effective_elitism().to_string()),
        ])
    }
}

impl Default for GeneticParams {
    fn default() -> Self {
        Self::new()
    }
}

/// 求解服務位置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverEndpoint {
    /// 服務根網址
    pub base_url: String,
}

impl SolverEndpoint {
    /// 預設服務根網址
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:8000";

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// 各求解器的端點路徑
    pub fn path(kind: SolverKind) -> &'static str {
        match kind {
            SolverKind::Hill => "/api/hill-climbing",
            SolverKind::Simulated => "/api/sim-anneal",
            SolverKind::Genetic => "/api/genetic-algorithm",
        }
    }

    /// 組合完整網址；沒有查詢參數時不附加 `?`
    ///
    /// 參數值皆為數字或固定識別字，不需要額外編碼。
    pub fn url(&self, kind: SolverKind, query: &[(String, String)]) -> String {
        let base = self.base_url.trim_end_matches('/');
        let mut url = format!("{}{}", base, Self::path(kind));
        if !query.is_empty() {
            let joined: Vec<String> = query
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            url.push('?');
            url.push_str(&joined.join("&"));
        }
        url
    }
}

impl Default for SolverEndpoint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(pairs: &QueryPairs) -> Vec<&str> {
        pairs.iter().map(|(name, _)| name.as_str()).collect()
    }

    #[test]
    fn test_projection_window_near_u32_max() {
        let config = ProjectionConfig::new().with_hours(u32::MAX - 2, 5);

        assert_eq!(config.end_hour(), u32::MAX);
        assert_eq!(config.last_hour(), Some(u32::MAX - 1));
        assert!(config.contains_hour(u32::MAX - 1));
        assert!(!config.contains_hour(u32::MAX));
        assert_eq!(config.hour_index(u32::MAX - 1), Some(1));
        assert_eq!(config.hours().count(), 2);
    }

    #[test]
    fn test_projection_defaults() {
        let config = ProjectionConfig::default();

        assert_eq!(config.hours().collect::<Vec<_>>(), (7..=17).collect::<Vec<_>>());
        assert_eq!(config.last_hour(), Some(17));
        assert_eq!(config.hour_index(7), Some(0));
        assert_eq!(config.hour_index(17), Some(10));
        assert_eq!(config.hour_index(18), None);
        assert_eq!(config.hour_index(6), None);
    }

    #[test]
    fn test_hill_params_gating() {
        let steepest = HillParams::new(HillVariant::Steepest)
            .with_max_sideways(5)
            .with_max_restart(3);
        assert_eq!(names(&steepest.query_pairs().unwrap()), vec!["variant"]);

        let sideways = HillParams::new(HillVariant::Sideways).with_max_sideways(0);
        let pairs = sideways.query_pairs().unwrap();
        assert_eq!(names(&pairs), vec!["variant", "max_sideways"]);
        assert_eq!(pairs[1].1, "0");

        let restart = HillParams::new(HillVariant::RandomRestart)
            .with_max_restart(4)
            .with_max_iterations_per_restart(100);
        assert_eq!(
            names(&restart.query_pairs().unwrap()),
            vec!["variant", "max_restart", "max_iterations_per_restart"]
        );
    }

    #[test]
    fn test_hill_params_rejects_zero_restart() {
        let params = HillParams::new(HillVariant::RandomRestart).with_max_restart(0);
        assert!(matches!(
            params.validate(),
            Err(SchedError::InvalidParameter { name, .. }) if name == "max_restart"
        ));
    }

    #[test]
    fn test_simulated_params() {
        assert!(SimulatedParams::new().query_pairs().unwrap().is_empty());

        let params = SimulatedParams::new().with_initial_temp(100.0).with_decay(0.95);
        assert_eq!(
            params.query_pairs().unwrap(),
            vec![
                ("initial_temp".to_string(), "100".to_string()),
                ("decay".to_string(), "0.95".to_string()),
            ]
        );

        assert!(SimulatedParams::new().with_initial_temp(0.0).validate().is_err());
        assert!(SimulatedParams::new().with_decay(1.0).validate().is_err());
        assert!(SimulatedParams::new().with_decay(0.0).validate().is_err());
    }

    #[test]
    fn test_genetic_params_defaults() {
        let pairs = GeneticParams::default().query_pairs().unwrap();
        assert_eq!(
            pairs,
            vec![
                ("population_size".to_string(), "50".to_string()),
                ("max_generations".to_string(), "200".to_string()),
                ("crossover_rate".to_string(), "0.9".to_string()),
                ("mutation_rate".to_string(), "0.2".to_string()),
                ("tournament_k".to_string(), "3".to_string()),
                ("elitism".to_string(), "1".to_string()),
            ]
        );
    }

    #[test]
    fn test_genetic_elitism_clamped() {
        let params = GeneticParams::new()
            .with_population(10, 5)
            .with_elitism(10);
        assert_eq!(params.effective_elitism(), 9);

        let single = GeneticParams::new()
            .with_population(1, 5)
            .with_tournament_k(1)
            .with_elitism(4);
        assert_eq!(single.effective_elitism(), 0);
    }

    #[test]
    fn test_genetic_params_ranges() {
        assert!(GeneticParams::new().with_population(0, 10).validate().is_err());
        assert!(GeneticParams::new().with_population(10, 0).validate().is_err());
        assert!(GeneticParams::new().with_rates(1.5, 0.1).validate().is_err());
        assert!(GeneticParams::new().with_rates(0.5, -0.1).validate().is_err());
        assert!(GeneticParams::new().with_tournament_k(0).validate().is_err());
        assert!(GeneticParams::new().with_tournament_k(51).validate().is_err());
        assert!(GeneticParams::new().with_tournament_k(50).validate().is_ok());
    }

    #[test]
    fn test_endpoint_url() {
        let endpoint = SolverEndpoint::new("http://solver:9000/");
        assert_eq!(
            endpoint.url(SolverKind::Simulated, &[]),
            "http://solver:9000/api/sim-anneal"
        );

        let query = vec![("variant".to_string(), "steepest".to_string())];
        assert_eq!(
            SolverEndpoint::default().url(SolverKind::Hill, &query),
            "http://localhost:8000/api/hill-climbing?variant=steepest"
        );
    }
}
