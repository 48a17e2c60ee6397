//! Nội dung, vị trí và trạng thái của tooltip dùng chung cho mọi thanh.

use serde::{Deserialize, Serialize};

use crate::engagement::Engagement;
use crate::TimelineConfig;

/// Chỉ số của một thanh trong lượt dựng hiện tại.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BarId(pub usize);

/// Dữ liệu hiển thị trong tooltip khi rê chuột vào một thanh.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    pub role: String,
    pub date_range: String,
    pub tags: Vec<String>,
}

impl TooltipContent {
    pub fn from_engagement(engagement: &Engagement) -> Self {
        Self {
            title: engagement.name.clone(),
            role: engagement.role.clone(),
            date_range: format!("{} — {}", engagement.start, engagement.end),
            tags: engagement.skills.clone(),
        }
    }
}

/// Bảng `BarId -> TooltipContent` cho handler hover dùng chung.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct HoverTable {
    entries: Vec<TooltipContent>,
}

impl HoverTable {
    pub fn insert(&mut self, content: TooltipContent) -> BarId {
        self.entries.push(content);
        BarId(self.entries.len() - 1)
    }

    pub fn get(&self, id: BarId) -> Option<&TooltipContent> {
        self.entries.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

/// Tọa độ trang (đã cộng `scroll_y`) của góc trên-trái tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub top: f64,
    pub left: f64,
}

/// Đặt tooltip phía trên thanh, canh giữa theo chiều ngang.
///
/// Cạnh trái được ghim trước, cạnh phải ghim sau cùng: khi tooltip rộng hơn
/// vùng khả dụng thì cạnh phải vẫn nằm trong viewport.
pub fn compute_placement(
    bar: Rect,
    tooltip: Size,
    viewport: Viewport,
    config: &TimelineConfig,
) -> Placement {
    let margin = config.viewport_margin_px;
    let top = bar.top - tooltip.height - config.tooltip_gap_px + viewport.scroll_y;

    let mut left = bar.left + bar.width / 2.0 - tooltip.width / 2.0;
    if left < margin {
        left = margin;
    }
    if left + tooltip.width > viewport.width - margin {
        left = viewport.width - tooltip.width - margin;
    }

    Placement { top, left }
}

/// Lệnh mà lớp DOM cần thực hiện sau mỗi sự kiện con trỏ.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TooltipCommand {
    /// Ghi đè nội dung bằng thanh này, đo lại và đặt lại vị trí.
    Show(BarId),
    Hide,
    /// Sự kiện cũ, không còn ứng với thanh đang hiển thị.
    Ignore,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TooltipState {
    #[default]
    Hidden,
    Visible(BarId),
}

impl TooltipState {
    pub fn enter(&mut self, bar: BarId) -> TooltipCommand {
        *self = TooltipState::Visible(bar);
        TooltipCommand::Show(bar)
    }

    pub fn leave(&mut self, bar: BarId) -> TooltipCommand {
        match *self {
            TooltipState::Visible(current) if current == bar => {
                *self = TooltipState::Hidden;
                TooltipCommand::Hide
            }
            _ => TooltipCommand::Ignore,
        }
    }

    pub fn visible_bar(&self) -> Option<BarId> {
        match self {
            TooltipState::Visible(bar) => Some(*bar),
            TooltipState::Hidden => None,
        }
    }
}
