//! 課表投影（稀疏時段 → 日 × 時刻格）

use sched_core::{Day, Interval, ProjectionConfig, RoomAllocation, RunRecord};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// 日 × 時刻課表格
///
/// 每格保存佔用的課程代碼，依插入順序且不重複。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduleGrid {
    config: ProjectionConfig,
    /// 以 `day.index() * hour_count + hour_index` 定址
    cells: Vec<Vec<String>>,
}

impl ScheduleGrid {
    /// 創建空的課表格
    pub fn empty(config: ProjectionConfig) -> Self {
        let size = Day::COUNT * config.hour_count as usize;
        Self {
            config,
            cells: vec![Vec::new(); size],
        }
    }

    fn slot(&self, day: Day, hour: u32) -> Option<usize> {
        self.config
            .hour_index(hour)
            .map(|hour_idx| day.index() * self.config.hour_count as usize + hour_idx)
    }

    /// 加入課程代碼；時刻超出顯示範圍時回傳 false
    fn insert(&mut self, day: Day, hour: u32, class_code: &str) -> bool {
        let Some(slot) = self.slot(day, hour) else {
            return false;
        };
        let cell = &mut self.cells[slot];
        if !cell.iter().any(|code| code == class_code) {
            cell.push(class_code.to_string());
        }
        true
    }

    /// 獲取格子內容；超出顯示範圍時為空
    pub fn cell(&self, day: Day, hour: u32) -> &[String] {
        self.slot(day, hour)
            .map(|slot| self.cells[slot].as_slice())
            .unwrap_or(&[])
    }

    /// 投影配置
    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// 格子總數（日數 × 時刻數）
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// 是否完全沒有佔用
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    /// 所有有佔用的格子
    pub fn occupied_cells(&self) -> BTreeMap<(Day, u32), Vec<String>> {
        let mut occupied = BTreeMap::new();
        for day in Day::ALL {
            for hour in self.config.hours() {
                let cell = self.cell(day, hour);
                if !cell.is_empty() {
                    occupied.insert((day, hour), cell.to_vec());
                }
            }
        }
        occupied
    }

    /// 依時刻列出各日的格子（顯示用：每列一個時刻、每欄一天）
    pub fn rows(&self) -> Vec<(u32, Vec<&[String]>)> {
        self.config
            .hours()
            .map(|hour| {
                let cells = Day::ALL.iter().map(|&day| self.cell(day, hour)).collect();
                (hour, cells)
            })
            .collect()
    }
}

/// 課表投影器
pub struct ScheduleProjector;

impl ScheduleProjector {
    /// 以預設配置（7..=17 點）投影
    pub fn project(allocation: &RoomAllocation, key: &str) -> ScheduleGrid {
        Self::project_with(ProjectionConfig::default(), allocation, key)
    }

    /// 投影單一教室的時段
    ///
    /// 不存在的教室得到空格；超出顯示範圍的時刻直接略過，不視為錯誤。
    pub fn project_with(
        config: ProjectionConfig,
        allocation: &RoomAllocation,
        key: &str,
    ) -> ScheduleGrid {
        Self::project_intervals(config, allocation.intervals(key))
    }

    /// 投影任意時段列表
    pub fn project_intervals(config: ProjectionConfig, intervals: &[Interval]) -> ScheduleGrid {
        let mut grid = ScheduleGrid::empty(config);
        let mut dropped = 0u64;

        for interval in intervals {
            // 只走訪與顯示範圍重疊的時刻
            let start = interval.start_hour.max(config.first_hour);
            let end = interval.end_hour.min(config.end_hour());
            let shown = end.saturating_sub(start);

            dropped += u64::from(interval.duration_hours() - shown);
            for hour in start..end {
                if !grid.insert(interval.day, hour, &interval.class_code) {
                    dropped += 1;
                }
            }
        }

        if dropped > 0 {
            tracing::debug!("{} 個時刻超出顯示範圍，已略過", dropped);
        }

        grid
    }

    /// 可投影的教室：初始與結果配置的聯集，字典序排列
    pub fn available_keys(run: &RunRecord) -> Vec<String> {
        let keys: BTreeSet<&str> = run
            .initial_allocation()
            .rooms()
            .chain(run.final_allocation().rooms())
            .collect();
        keys.into_iter().map(str::to_string).collect()
    }

    /// 同時投影初始與結果配置（前後對照）
    pub fn project_comparison(
        config: ProjectionConfig,
        run: &RunRecord,
        key: &str,
    ) -> (ScheduleGrid, ScheduleGrid) {
        (
            Self::project_with(config, run.initial_allocation(), key),
            Self::project_with(config, run.final_allocation(), key),
        )
    }
}
