//! 執行結果集合（單次求解回應的所有執行）

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::run::RunRecord;
use crate::{Result, SchedError};

/// 執行結果集合
///
/// 保留回應中的插入順序，「Run N」標籤依此順序編號。
/// 集合只會整批建立或整批替換，不提供單筆修改。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunCollection {
    entries: Vec<(String, RunRecord)>,
}

impl RunCollection {
    /// 創建空集合
    pub fn new() -> Self {
        Self::default()
    }

    /// 從（執行ID, 記錄）序列建立集合，ID 重複時失敗
    pub fn from_entries<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, RunRecord)>,
    {
        let mut collection = Self::new();
        for (run_id, record) in entries {
            if collection.contains(&run_id) {
                return Err(SchedError::InvalidRun {
                    run_id,
                    reason: "執行ID重複".to_string(),
                });
            }
            collection.entries.push((run_id, record));
        }
        Ok(collection)
    }

    /// 獲取執行記錄
    pub fn get(&self, run_id: &str) -> Option<&RunRecord> {
        self.entries
            .iter()
            .find(|(id, _)| id == run_id)
            .map(|(_, record)| record)
    }

    /// 檢查是否包含執行
    pub fn contains(&self, run_id: &str) -> bool {
        self.position(run_id).is_some()
    }

    /// 執行在集合中的位置（從 0 開始）
    pub fn position(&self, run_id: &str) -> Option<usize> {
        self.entries.iter().position(|(id, _)| id == run_id)
    }

    /// 依插入順序遍歷
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RunRecord)> {
        self.entries
            .iter()
            .map(|(id, record)| (id.as_str(), record))
    }

    /// 所有執行ID（插入順序）
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(id, _)| id.as_str())
    }

    /// 第一筆執行ID
    pub fn first_id(&self) -> Option<&str> {
        self.entries.first().map(|(id, _)| id.as_str())
    }

    /// 顯示標籤（Run 1, Run 2, ...）
    pub fn label(&self, run_id: &str) -> Option<String> {
        self.position(run_id).map(|idx| format!("Run {}", idx + 1))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for RunCollection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (run_id, record) in &self.entries {
            map.serialize_entry(run_id, record)?;
        }
        map.end()
    }
}
