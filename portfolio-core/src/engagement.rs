//! Bản ghi kinh nghiệm (engagement) và cách hiểu mốc bắt đầu/kết thúc.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::TimelineError;

/// Từ khóa trong `end` báo hiệu engagement còn kéo dài ra tương lai.
pub const FUTURE_SENTINEL: &str = "Future";
/// Từ khóa trong `end` báo hiệu engagement kéo dài tới hiện tại.
pub const PRESENT_SENTINEL: &str = "Present";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Nhóm engagement, quyết định lớp CSS của thanh.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Education,
    Project,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Work => "work",
            Category::Education => "education",
            Category::Project => "project",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "work" => Category::Work,
            "education" => Category::Education,
            "project" => Category::Project,
            _ => Category::Other(tag),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.as_str().to_string()
    }
}

/// Một khoảng làm việc/học tập hiển thị thành một thanh trên biểu đồ.
///
/// `start` và `end` giữ nguyên chuỗi gốc vì tooltip hiển thị đúng chuỗi đó.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Engagement {
    pub name: String,
    pub role: String,
    pub start: String,
    pub end: String,
    #[serde(rename = "type", alias = "category")]
    pub category: Category,
    #[serde(default)]
    pub skills: Vec<String>,
}

impl Engagement {
    pub fn start_date(&self) -> Result<NaiveDate, TimelineError> {
        parse_date("start", &self.start)
    }

    pub fn end_marker(&self) -> Result<EngagementEnd, TimelineError> {
        EngagementEnd::parse(&self.end)
    }
}

/// Mốc kết thúc đã phân loại.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngagementEnd {
    On(NaiveDate),
    Present,
    Future,
}

impl EngagementEnd {
    /// "Future" được ưu tiên khi chuỗi chứa cả hai từ khóa (ví dụ "Present/Future").
    pub fn parse(text: &str) -> Result<Self, TimelineError> {
        if text.contains(FUTURE_SENTINEL) {
            Ok(EngagementEnd::Future)
        } else if text.contains(PRESENT_SENTINEL) {
            Ok(EngagementEnd::Present)
        } else {
            parse_date("end", text).map(EngagementEnd::On)
        }
    }

    pub fn is_ongoing(&self) -> bool {
        !matches!(self, EngagementEnd::On(_))
    }
}

/// Mốc 00:00 UTC của một ngày, tính bằng mili giây từ epoch.
pub fn date_ms(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis()
}

/// Đọc danh sách engagement từ chuỗi JSON (mảng bản ghi).
pub fn engagements_from_json(json: &str) -> Result<Vec<Engagement>, TimelineError> {
    serde_json::from_str(json).map_err(|err| TimelineError::Parse(err.to_string()))
}

fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, TimelineError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| TimelineError::InvalidDate {
        field,
        value: value.to_string(),
    })
}
