//! Logic lõi cho trang portfolio: timeline Gantt, tooltip và các hiệu ứng trang.
//!
//! Crate này không phụ thuộc DOM; lớp `portfolio-ui` đọc kích thước từ trang,
//! gọi các hàm ở đây rồi ghi kết quả ngược lại thành style.

mod data;
pub mod effects;
mod engagement;
mod gantt;
mod tooltip;

use serde::{Deserialize, Serialize};

pub use data::{portfolio_engagements, TYPEWRITER_ROLES};
pub use engagement::{
    date_ms, engagements_from_json, Category, Engagement, EngagementEnd, FUTURE_SENTINEL,
    PRESENT_SENTINEL,
};
pub use gantt::{
    bar_geometry, layout_bar, layout_timeline, resolve_end_ms, today_marker, year_markers, Bar,
    BarGeometry, TimelineLayout, TimelineWindow, TodayMarker, YearMarker, APPROX_YEAR_MS,
    MS_PER_DAY, ONGOING_CLASS,
};
pub use tooltip::{
    compute_placement, BarId, HoverTable, Placement, Rect, Size, TooltipCommand, TooltipContent,
    TooltipState, Viewport,
};

/// Cấu hình trục thời gian, ngưỡng hiển thị và khoảng cách tooltip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TimelineConfig {
    /// Năm đầu tiên của trục (tính cả năm này).
    pub min_year: i32,
    /// Năm cuối cùng của trục (tính cả năm này).
    pub max_year: i32,
    /// Phần kéo dài thêm (ms) cho mốc kết thúc "Future".
    pub future_extension_ms: i64,
    /// Thanh rộng hơn ngưỡng này (%) mới có lớp hiệu ứng shine.
    pub shine_threshold_percent: f64,
    /// Khoảng cách (px) giữa tooltip và cạnh trên của thanh.
    pub tooltip_gap_px: f64,
    /// Lề tối thiểu (px) giữa tooltip và mép viewport.
    pub viewport_margin_px: f64,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            min_year: 2021,
            max_year: 2026,
            future_extension_ms: APPROX_YEAR_MS,
            shine_threshold_percent: 15.0,
            tooltip_gap_px: 10.0,
            viewport_margin_px: 10.0,
        }
    }
}

impl TimelineConfig {
    /// Dựng cửa sổ thời gian từ cặp năm đã cấu hình.
    pub fn window(&self) -> Result<TimelineWindow, TimelineError> {
        TimelineWindow::new(self.min_year, self.max_year)
    }
}

/// Lỗi chung khi dựng timeline.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("Ngày không hợp lệ ở trường `{field}`: {value:?}")]
    InvalidDate { field: &'static str, value: String },
    #[error("Khoảng năm không hợp lệ: {min_year}..={max_year}")]
    InvalidWindow { min_year: i32, max_year: i32 },
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}
