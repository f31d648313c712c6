//! 教室配置模型

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::interval::Interval;

/// 教室配置：教室代碼 → 該教室的上課時段（依求解服務給定的順序）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomAllocation {
    rooms: BTreeMap<String, Vec<Interval>>,
}

impl RoomAllocation {
    /// 創建空的配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：加入教室時段
    pub fn with_room(mut self, room: impl Into<String>, intervals: Vec<Interval>) -> Self {
        self.insert(room, intervals);
        self
    }

    /// 設置教室時段（覆蓋既有資料）
    pub fn insert(&mut self, room: impl Into<String>, intervals: Vec<Interval>) {
        self.rooms.insert(room.into(), intervals);
    }

    /// 獲取教室的時段；不存在的教室回傳空切片
    pub fn intervals(&self, room: &str) -> &[Interval] {
        self.rooms.get(room).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 檢查是否包含教室
    pub fn contains_room(&self, room: &str) -> bool {
        self.rooms.contains_key(room)
    }

    /// 所有教室代碼（字典序）
    pub fn rooms(&self) -> impl Iterator<Item = &str> {
        self.rooms.keys().map(String::as_str)
    }

    /// 教室數量
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// 時段總數
    pub fn interval_count(&self) -> usize {
        self.rooms.values().map(Vec::len).sum()
    }

    /// 檢查配置結構：教室代碼不可為空，每個時段必須開始早於結束
    pub fn validate(&self) -> std::result::Result<(), String> {
        for (room, intervals) in &self.rooms {
            if room.is_empty() {
                return Err("教室代碼不可為空".to_string());
            }
            if let Some(bad) = intervals.iter().find(|iv| !iv.is_valid()) {
                return Err(format!(
                    "教室 {} 的時段 {} {} {}-{} 無效",
                    room, bad.class_code, bad.day, bad.start_hour, bad.end_hour
                ));
            }
        }
        Ok(())
    }
}
