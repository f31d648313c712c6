//! 求解結果狀態機
//!
//! `Idle → Solving → Ready | Failed`，選擇的執行與教室只存在於 `Ready` 之中，
//! 隨集合一起建立與清除，不會各自漂移。

use chrono::{DateTime, Utc};
use sched_calc::{BestRunSelector, ChartSeries, HeadlineMetrics, ScheduleGrid, ScheduleProjector};
use sched_core::{AlgorithmSelection, ProjectionConfig, Result, RunCollection, RunRecord, SchedError};
use uuid::Uuid;

use crate::request::SolveRequest;
use crate::response;
use crate::transport::{SolverTransport, TransportResponse};

/// 求解成功後的結果狀態
#[derive(Debug, Clone, PartialEq)]
pub struct ReadyState {
    /// 求解ID（日誌追蹤用）
    pub solve_id: Uuid,

    /// 完成時間
    pub completed_at: DateTime<Utc>,

    /// 發出請求時的演算法選擇（變體提示）
    pub selection: AlgorithmSelection,

    runs: RunCollection,
    selected_run: String,
    available_rooms: Vec<String>,
    selected_room: Option<String>,
}

impl ReadyState {
    /// 建立結果狀態；預設選擇最佳執行，並盡量保留先前選擇的教室
    fn new(
        selection: AlgorithmSelection,
        runs: RunCollection,
        previous_room: Option<String>,
    ) -> Result<Self> {
        let best = BestRunSelector::pick_best(&runs)?.to_string();
        let mut state = Self {
            solve_id: Uuid::new_v4(),
            completed_at: Utc::now(),
            selection,
            runs,
            selected_run: best,
            available_rooms: Vec::new(),
            selected_room: previous_room,
        };
        state.refresh_rooms();
        Ok(state)
    }

    /// 重新計算可選教室，並修正教室選擇
    fn refresh_rooms(&mut self) {
        self.available_rooms = self
            .runs
            .get(&self.selected_run)
            .map(ScheduleProjector::available_keys)
            .unwrap_or_default();

        let keep = self
            .selected_room
            .as_ref()
            .is_some_and(|room| self.available_rooms.contains(room));
        if !keep {
            self.selected_room = self.available_rooms.first().cloned();
        }
    }

    pub fn runs(&self) -> &RunCollection {
        &self.runs
    }

    pub fn selected_run_id(&self) -> &str {
        &self.selected_run
    }

    /// 目前選擇的執行
    pub fn selected_run(&self) -> Option<&RunRecord> {
        self.runs.get(&self.selected_run)
    }

    /// 可選教室（初始與結果配置的聯集，字典序）
    pub fn available_rooms(&self) -> &[String] {
        &self.available_rooms
    }

    pub fn selected_room(&self) -> Option<&str> {
        self.selected_room.as_deref()
    }

    /// 切換執行
    pub fn select_run(&mut self, run_id: &str) -> Result<()> {
        if !self.runs.contains(run_id) {
            return Err(SchedError::RunNotFound(run_id.to_string()));
        }
        self.selected_run = run_id.to_string();
        self.refresh_rooms();
        tracing::debug!("切換執行: {}", run_id);
        Ok(())
    }

    /// 切換教室
    pub fn select_room(&mut self, room: &str) -> Result<()> {
        if !self.available_rooms.iter().any(|r| r == room) {
            return Err(SchedError::RoomNotFound(room.to_string()));
        }
        self.selected_room = Some(room.to_string());
        Ok(())
    }

    /// 目前執行的頂部指標
    pub fn headline_metrics(&self) -> Option<HeadlineMetrics> {
        self.selected_run()
            .map(|run| HeadlineMetrics::from_run(run, self.selection))
    }

    /// 目前執行的圖表資料
    pub fn chart_series(&self) -> Option<ChartSeries> {
        self.selected_run().map(ChartSeries::from_run)
    }

    /// 目前執行與教室的前後課表
    pub fn schedule_comparison(&self, config: ProjectionConfig) -> Option<(ScheduleGrid, ScheduleGrid)> {
        let run = self.selected_run()?;
        let room = self.selected_room.as_deref()?;
        Some(ScheduleProjector::project_comparison(config, run, room))
    }
}

/// 會話狀態
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// 尚未求解
    Idle,

    /// 求解中；保留先前狀態，回應為空時還原
    Solving {
        selection: AlgorithmSelection,
        previous: Box<SessionState>,
    },

    /// 求解成功
    Ready(ReadyState),

    /// 求解失敗，所有衍生狀態已清除
    Failed { reason: String },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Solving { .. } => "solving",
            SessionState::Ready(_) => "ready",
            SessionState::Failed { .. } => "failed",
        }
    }
}

/// 求解會話
///
/// 單執行緒使用；同一時間最多一個求解請求。
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_solving(&self) -> bool {
        matches!(self.state, SessionState::Solving { .. })
    }

    /// 可顯示的結果；求解中時為先前的結果
    pub fn ready(&self) -> Option<&ReadyState> {
        match &self.state {
            SessionState::Ready(ready) => Some(ready),
            SessionState::Solving { previous, .. } => match previous.as_ref() {
                SessionState::Ready(ready) => Some(ready),
                _ => None,
            },
            SessionState::Idle | SessionState::Failed { .. } => None,
        }
    }

    /// 求解中不允許變更選擇
    fn ready_mut(&mut self) -> Result<Option<&mut ReadyState>> {
        match &mut self.state {
            SessionState::Ready(ready) => Ok(Some(ready)),
            SessionState::Solving { .. } => Err(SchedError::SolveInProgress),
            SessionState::Idle | SessionState::Failed { .. } => Ok(None),
        }
    }

    /// 最近一次失敗原因
    pub fn failure(&self) -> Option<&str> {
        match &self.state {
            SessionState::Failed { reason } => Some(reason),
            _ => None,
        }
    }

    /// 進入求解中；已有請求時拒絕
    pub fn begin_solve(&mut self, selection: AlgorithmSelection) -> Result<()> {
        if self.is_solving() {
            return Err(SchedError::SolveInProgress);
        }
        let previous = std::mem::replace(&mut self.state, SessionState::Idle);
        self.state = SessionState::Solving {
            selection,
            previous: Box::new(previous),
        };
        tracing::info!("開始求解: {}", selection.label());
        Ok(())
    }

    /// 結束求解
    ///
    /// - 成功：整批替換集合，選擇最佳執行
    /// - 回應為空：回報 [`SchedError::EmptyCollection`]，還原求解前的狀態
    /// - 其他失敗：清除集合與所有選擇，進入 `Failed`
    pub fn finish_solve(&mut self, outcome: Result<TransportResponse>) -> Result<&ReadyState> {
        let (selection, previous) = match std::mem::replace(&mut self.state, SessionState::Idle) {
            SessionState::Solving {
                selection,
                previous,
            } => (selection, *previous),
            other => {
                self.state = other;
                return Err(SchedError::NoSolveInProgress);
            }
        };

        let decoded = outcome.and_then(|resp| response::interpret(selection.kind(), &resp));
        let previous_room = match &previous {
            SessionState::Ready(ready) => ready.selected_room.clone(),
            _ => None,
        };

        match decoded.and_then(|runs| ReadyState::new(selection, runs, previous_room)) {
            Ok(ready) => {
                tracing::info!(
                    "求解完成 {}: {} 筆執行，最佳 {}",
                    ready.solve_id,
                    ready.runs.len(),
                    ready.selected_run
                );
                self.state = SessionState::Ready(ready);
                self.ready().ok_or(SchedError::NoSolveInProgress)
            }
            Err(SchedError::EmptyCollection) => {
                tracing::warn!("求解回應為空，保留先前結果");
                self.state = previous;
                Err(SchedError::EmptyCollection)
            }
            Err(err) => {
                tracing::warn!("求解失敗: {}", err);
                let reason = match &err {
                    SchedError::Transport(msg) => msg.clone(),
                    other => other.to_string(),
                };
                self.state = SessionState::Failed { reason };
                Err(err)
            }
        }
    }

    /// 送出請求並等待完成
    pub fn solve<T: SolverTransport + ?Sized>(
        &mut self,
        transport: &T,
        request: &SolveRequest,
    ) -> Result<&ReadyState> {
        self.begin_solve(request.selection)?;
        tracing::debug!("POST {}", request.url);
        let outcome = transport.post(request);
        self.finish_solve(outcome)
    }

    /// 切換執行
    pub fn select_run(&mut self, run_id: &str) -> Result<()> {
        match self.ready_mut()? {
            Some(ready) => ready.select_run(run_id),
            None => Err(SchedError::RunNotFound(run_id.to_string())),
        }
    }

    /// 切換教室
    pub fn select_room(&mut self, room: &str) -> Result<()> {
        match self.ready_mut()? {
            Some(ready) => ready.select_room(room),
            None => Err(SchedError::RoomNotFound(room.to_string())),
        }
    }

    /// 回到初始狀態；求解中不可重設（不支援取消）
    pub fn reset(&mut self) -> Result<()> {
        if self.is_solving() {
            return Err(SchedError::SolveInProgress);
        }
        self.state = SessionState::Idle;
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
