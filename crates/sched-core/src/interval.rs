//! 上課時段模型

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// 上課日（週一到週五）
///
/// 求解服務以印尼語星期名稱傳送（Senin..Jumat），兩種寫法皆可解析，
/// 序列化時一律輸出英文縮寫。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    #[serde(rename = "Mon", alias = "Senin")]
    Mon,
    #[serde(rename = "Tue", alias = "Selasa")]
    Tue,
    #[serde(rename = "Wed", alias = "Rabu")]
    Wed,
    #[serde(rename = "Thu", alias = "Kamis")]
    Thu,
    #[serde(rename = "Fri", alias = "Jumat")]
    Fri,
}

impl Day {
    /// 所有上課日，依週序排列
    pub const ALL: [Day; 5] = [Day::Mon, Day::Tue, Day::Wed, Day::Thu, Day::Fri];

    /// 上課日數量
    pub const COUNT: usize = 5;

    /// 週序索引（週一 = 0）
    pub fn index(self) -> usize {
        match self {
            Day::Mon => 0,
            Day::Tue => 1,
            Day::Wed => 2,
            Day::Thu => 3,
            Day::Fri => 4,
        }
    }

    /// 英文縮寫
    pub fn as_str(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
        }
    }

    /// 求解服務使用的星期名稱
    pub fn wire_name(self) -> &'static str {
        match self {
            Day::Mon => "Senin",
            Day::Tue => "Selasa",
            Day::Wed => "Rabu",
            Day::Thu => "Kamis",
            Day::Fri => "Jumat",
        }
    }

    /// 從 chrono 星期轉換（週末沒有對應的上課日）
    pub fn from_weekday(weekday: Weekday) -> Option<Self> {
        match weekday {
            Weekday::Mon => Some(Day::Mon),
            Weekday::Tue => Some(Day::Tue),
            Weekday::Wed => Some(Day::Wed),
            Weekday::Thu => Some(Day::Thu),
            Weekday::Fri => Some(Day::Fri),
            Weekday::Sat | Weekday::Sun => None,
        }
    }

    /// 轉換為 chrono 星期
    pub fn to_weekday(self) -> Weekday {
        match self {
            Day::Mon => Weekday::Mon,
            Day::Tue => Weekday::Tue,
            Day::Wed => Weekday::Wed,
            Day::Thu => Weekday::Thu,
            Day::Fri => Weekday::Fri,
        }
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 上課時段（半開區間 `[start_hour, end_hour)`）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// 課程班級代碼
    #[serde(alias = "kode_kelas_kuliah")]
    pub class_code: String,

    /// 上課日
    #[serde(alias = "hari")]
    pub day: Day,

    /// 開始時刻（含）
    #[serde(alias = "waktu_mulai")]
    pub start_hour: u32,

    /// 結束時刻（不含）
    #[serde(alias = "waktu_akhir")]
    pub end_hour: u32,
}

impl Interval {
    /// 創建新的上課時段
    pub fn new(class_code: impl Into<String>, day: Day, start_hour: u32, end_hour: u32) -> Self {
        Self {
            class_code: class_code.into(),
            day,
            start_hour,
            end_hour,
        }
    }

    /// 檢查時段是否有效（開始早於結束）
    pub fn is_valid(&self) -> bool {
        self.start_hour < self.end_hour
    }

    /// 時段涵蓋的整點時刻
    pub fn hours(&self) -> std::ops::Range<u32> {
        self.start_hour..self.end_hour
    }

    /// 時段長度（小時）
    pub fn duration_hours(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour)
    }
}
