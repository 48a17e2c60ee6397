//! Trục năm, vạch "hôm nay" và hình học các thanh Gantt.
//!
//! Mọi vị trí được tính theo phần trăm chiều rộng trục. Trục dùng năm cố định
//! 365 ngày nên tỉ lệ đều giữa các năm, không bám sát lịch thật.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::engagement::{date_ms, Engagement, EngagementEnd};
use crate::tooltip::{BarId, HoverTable, TooltipContent};
use crate::{TimelineConfig, TimelineError};

pub const MS_PER_DAY: i64 = 86_400_000;
/// Độ dài một năm trên trục; không hiệu chỉnh năm nhuận.
pub const APPROX_YEAR_MS: i64 = 365 * MS_PER_DAY;
pub const ONGOING_CLASS: &str = "ongoing";

/// Cửa sổ `[min_year, max_year]` mà toàn bộ biểu đồ được co giãn theo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineWindow {
    min_year: i32,
    max_year: i32,
    axis_start_ms: i64,
    window_end_ms: i64,
    total_duration_ms: i64,
}

impl TimelineWindow {
    pub fn new(min_year: i32, max_year: i32) -> Result<Self, TimelineError> {
        let invalid = || TimelineError::InvalidWindow { min_year, max_year };
        if min_year > max_year {
            return Err(invalid());
        }
        let start = NaiveDate::from_ymd_opt(min_year, 1, 1).ok_or_else(invalid)?;
        let end = NaiveDate::from_ymd_opt(max_year, 12, 31).ok_or_else(invalid)?;
        let years = i64::from(max_year) - i64::from(min_year) + 1;

        Ok(Self {
            min_year,
            max_year,
            axis_start_ms: date_ms(start),
            window_end_ms: date_ms(end),
            total_duration_ms: years * APPROX_YEAR_MS,
        })
    }

    pub fn min_year(&self) -> i32 {
        self.min_year
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    /// 00:00 UTC ngày 1/1 của `min_year`.
    pub fn axis_start_ms(&self) -> i64 {
        self.axis_start_ms
    }

    /// 00:00 UTC ngày 31/12 của `max_year`.
    pub fn window_end_ms(&self) -> i64 {
        self.window_end_ms
    }

    pub fn total_duration_ms(&self) -> i64 {
        self.total_duration_ms
    }

    pub fn year_start_ms(&self, year: i32) -> Option<i64> {
        if !(self.min_year..=self.max_year).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, 1, 1).map(date_ms)
    }

    pub fn percent_at(&self, ms: i64) -> f64 {
        self.span_percent(ms - self.axis_start_ms)
    }

    pub fn span_percent(&self, duration_ms: i64) -> f64 {
        duration_ms as f64 / self.total_duration_ms as f64 * 100.0
    }

    pub fn contains(&self, ms: i64) -> bool {
        (self.axis_start_ms..=self.window_end_ms).contains(&ms)
    }
}

/// Nhãn năm trên dải trục; đường lưới dọc dùng chung vị trí này.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearMarker {
    pub year: i32,
    pub left_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TodayMarker {
    pub at_ms: i64,
    pub left_percent: f64,
}

/// Khoảng hiển thị đã kẹp vào cửa sổ cùng vị trí phần trăm tương ứng.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarGeometry {
    pub visual_start_ms: i64,
    pub visual_end_ms: i64,
    pub left_percent: f64,
    pub width_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub id: BarId,
    pub class_name: String,
    pub name: String,
    pub role: String,
    pub geometry: BarGeometry,
    pub show_shine: bool,
    pub ongoing: bool,
}

impl Bar {
    /// Class đầy đủ gắn lên phần tử thanh; bản ghi còn tiếp diễn có thêm `ongoing`.
    pub fn element_class(&self) -> String {
        if self.ongoing {
            format!("{} {ONGOING_CLASS}", self.class_name)
        } else {
            self.class_name.clone()
        }
    }
}

/// Kết quả của một lượt dựng biểu đồ; không được giữ lại giữa các lượt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimelineLayout {
    pub window: TimelineWindow,
    pub years: Vec<YearMarker>,
    pub today: Option<TodayMarker>,
    pub bars: Vec<Bar>,
    pub hover: HoverTable,
}

pub fn year_markers(window: &TimelineWindow) -> Vec<YearMarker> {
    (window.min_year..=window.max_year)
        .filter_map(|year| {
            window.year_start_ms(year).map(|ms| YearMarker {
                year,
                left_percent: window.percent_at(ms),
            })
        })
        .collect()
}

/// Chỉ trả về vạch khi `now` nằm trong cửa sổ; không kẹp.
pub fn today_marker(window: &TimelineWindow, now: DateTime<Utc>) -> Option<TodayMarker> {
    let at_ms = now.timestamp_millis();
    window.contains(at_ms).then(|| TodayMarker {
        at_ms,
        left_percent: window.percent_at(at_ms),
    })
}

pub fn resolve_end_ms(end: EngagementEnd, now: DateTime<Utc>, config: &TimelineConfig) -> i64 {
    let now_ms = now.timestamp_millis();
    match end {
        EngagementEnd::On(date) => date_ms(date),
        EngagementEnd::Present => now_ms,
        EngagementEnd::Future => now_ms.saturating_add(config.future_extension_ms),
    }
}

/// Kẹp `[start_ms, end_ms]` vào cửa sổ rồi quy ra phần trăm.
///
/// Độ rộng không âm và `left + width` không vượt 100 (năm nhuận trong cửa sổ
/// có thể đẩy mốc 31/12 quá 100% khi chia theo năm 365 ngày).
pub fn bar_geometry(window: &TimelineWindow, start_ms: i64, end_ms: i64) -> BarGeometry {
    let visual_start = start_ms.clamp(window.axis_start_ms, window.window_end_ms);
    let visual_end = end_ms.min(window.window_end_ms).max(visual_start);

    let left_percent = window.percent_at(visual_start).max(0.0);
    let width_percent = window
        .span_percent(visual_end - visual_start)
        .clamp(0.0, (100.0 - left_percent).max(0.0));

    BarGeometry {
        visual_start_ms: visual_start,
        visual_end_ms: visual_end,
        left_percent,
        width_percent,
    }
}

pub fn layout_bar(
    window: &TimelineWindow,
    engagement: &Engagement,
    id: BarId,
    now: DateTime<Utc>,
    config: &TimelineConfig,
) -> Result<Bar, TimelineError> {
    let start_ms = date_ms(engagement.start_date()?);
    let end = engagement.end_marker()?;
    let geometry = bar_geometry(window, start_ms, resolve_end_ms(end, now, config));

    Ok(Bar {
        id,
        class_name: format!("gantt-bar {}", engagement.category.as_str()),
        name: engagement.name.clone(),
        role: engagement.role.clone(),
        show_shine: geometry.width_percent > config.shine_threshold_percent,
        ongoing: end.is_ongoing(),
        geometry,
    })
}

/// Dựng toàn bộ biểu đồ. Lỗi ở bất kỳ bản ghi nào đều hủy cả lượt dựng.
pub fn layout_timeline(
    engagements: &[Engagement],
    config: &TimelineConfig,
    now: DateTime<Utc>,
) -> Result<TimelineLayout, TimelineError> {
    let window = config.window()?;
    let mut hover = HoverTable::default();
    let mut bars = Vec::with_capacity(engagements.len());

    for engagement in engagements {
        let id = hover.insert(TooltipContent::from_engagement(engagement));
        bars.push(layout_bar(&window, engagement, id, now, config)?);
    }

    Ok(TimelineLayout {
        years: year_markers(&window),
        today: today_marker(&window, now),
        window,
        bars,
        hover,
    })
}
