//! Phép tính thuần cho các hiệu ứng trang: điều hướng, typewriter, bộ đếm,
//! bộ lọc dự án, nghiêng thẻ theo con trỏ và nền gradient.

use serde::{Deserialize, Serialize};

use crate::tooltip::{Rect, Viewport};

pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;
/// Section được coi là đang xem sớm hơn mép trên của nó chừng này px.
pub const SECTION_ACTIVATION_OFFSET: f64 = 100.0;
/// Chiều cao navbar cố định, trừ đi khi cuộn tới anchor.
pub const ANCHOR_SCROLL_OFFSET: f64 = 80.0;
pub const COUNTER_DURATION_MS: f64 = 2000.0;
pub const PROJECT_FADE_OUT_MS: i32 = 300;
pub const FILTER_ALL: &str = "all";
pub const DYNAMIC_BACKGROUND_MIN_WIDTH: f64 = 768.0;
pub const TILT_RESET_TRANSFORM: &str = "perspective(1000px) rotateX(0) rotateY(0) translateY(0)";

const TILT_DAMPING: f64 = 20.0;
const ORB_SPEED_STEP: f64 = 20.0;
const HERO_STAGGER_BASE_MS: i32 = 200;
const HERO_STAGGER_STEP_MS: i32 = 100;
const CODE_LINE_STEP_S: f64 = 0.1;

/// Trạng thái tải của tài liệu theo `document.readyState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentReadiness {
    Loading,
    Interactive,
    Complete,
}

impl DocumentReadiness {
    /// Giá trị lạ được coi như đang tải để hiệu ứng chờ sự kiện.
    pub fn parse(ready_state: &str) -> Self {
        match ready_state {
            "complete" => DocumentReadiness::Complete,
            "interactive" => DocumentReadiness::Interactive,
            _ => DocumentReadiness::Loading,
        }
    }

    /// `DOMContentLoaded` đã phát.
    pub fn dom_ready(self) -> bool {
        self != DocumentReadiness::Loading
    }

    /// `load` đã phát.
    pub fn loaded(self) -> bool {
        self == DocumentReadiness::Complete
    }
}

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLL_THRESHOLD
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionBounds {
    pub id: String,
    pub offset_top: f64,
    pub height: f64,
}

/// Section cuối cùng (theo thứ tự tài liệu) có dải chứa `scroll_y`.
pub fn active_section(sections: &[SectionBounds], scroll_y: f64) -> Option<&str> {
    sections
        .iter()
        .rev()
        .find(|section| {
            let top = section.offset_top - SECTION_ACTIVATION_OFFSET;
            scroll_y >= top && scroll_y < top + section.height
        })
        .map(|section| section.id.as_str())
}

pub fn anchor_scroll_top(offset_top: f64) -> f64 {
    offset_top - ANCHOR_SCROLL_OFFSET
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypewriterTiming {
    pub type_ms: u32,
    pub delete_ms: u32,
    /// Dừng khi đã gõ xong một từ.
    pub hold_ms: u32,
    /// Dừng trước khi bắt đầu từ tiếp theo.
    pub next_word_ms: u32,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            type_ms: 100,
            delete_ms: 50,
            hold_ms: 2000,
            next_word_ms: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypewriterFrame {
    pub text: String,
    pub delay_ms: u32,
}

/// Gõ rồi xóa lần lượt từng vai trò, lặp vòng.
#[derive(Debug, Clone)]
pub struct Typewriter {
    roles: Vec<String>,
    timing: TypewriterTiming,
    role_index: usize,
    char_index: usize,
    deleting: bool,
}

impl Typewriter {
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::with_timing(roles, TypewriterTiming::default())
    }

    pub fn with_timing<I, S>(roles: I, timing: TypewriterTiming) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            timing,
            role_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    /// Trả về chuỗi cần hiển thị và thời gian chờ trước lần gọi kế tiếp.
    pub fn tick(&mut self) -> TypewriterFrame {
        let Some(role) = self.roles.get(self.role_index) else {
            return TypewriterFrame {
                text: String::new(),
                delay_ms: self.timing.type_ms,
            };
        };
        let len = role.chars().count();

        let mut delay_ms = if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
            self.timing.delete_ms
        } else {
            self.char_index = (self.char_index + 1).min(len);
            self.timing.type_ms
        };
        let text: String = role.chars().take(self.char_index).collect();

        if !self.deleting && self.char_index == len {
            self.deleting = true;
            delay_ms = self.timing.hold_ms;
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.role_index = (self.role_index + 1) % self.roles.len();
            delay_ms = self.timing.next_word_ms;
        }

        TypewriterFrame { text, delay_ms }
    }

    pub fn role_index(&self) -> usize {
        self.role_index
    }
}

pub fn ease_out_quart(progress: f64) -> f64 {
    1.0 - (1.0 - progress).powi(4)
}

pub fn animation_progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if duration_ms <= 0.0 {
        return 1.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

pub fn counter_value(target: i64, elapsed_ms: f64, duration_ms: f64) -> i64 {
    let eased = ease_out_quart(animation_progress(elapsed_ms, duration_ms));
    (target as f64 * eased).floor() as i64
}

pub fn project_visible(filter: &str, category: &str) -> bool {
    filter == FILTER_ALL || filter == category
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn translate(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tilt {
    pub rotate_x: f64,
    pub rotate_y: f64,
}

impl Tilt {
    pub fn transform(&self) -> String {
        format!(
            "perspective(1000px) rotateX({}deg) rotateY({}deg) translateY(-5px)",
            self.rotate_x, self.rotate_y
        )
    }
}

/// `pointer` theo tọa độ client, cùng hệ với `card`.
pub fn card_tilt(card: Rect, pointer: Point) -> Tilt {
    let x = pointer.x - card.left;
    let y = pointer.y - card.top;

    Tilt {
        rotate_x: (y - card.height / 2.0) / TILT_DAMPING,
        rotate_y: (card.width / 2.0 - x) / TILT_DAMPING,
    }
}

pub fn dynamic_background_enabled(viewport_width: f64) -> bool {
    viewport_width > DYNAMIC_BACKGROUND_MIN_WIDTH
}

/// Orb thứ `index` trôi nhanh dần theo thứ tự, lệch về phía con trỏ.
pub fn orb_offset(index: usize, pointer: Point, viewport: Viewport) -> Point {
    let speed = (index + 1) as f64 * ORB_SPEED_STEP;
    let x = pointer.x / viewport.width;
    let y = pointer.y / viewport.height;

    Point {
        x: (x - 0.5) * speed,
        y: (y - 0.5) * speed,
    }
}

pub fn stagger_delay_ms(index: usize) -> i32 {
    HERO_STAGGER_BASE_MS + index as i32 * HERO_STAGGER_STEP_MS
}

pub fn code_line_delay_s(index: usize) -> f64 {
    index as f64 * CODE_LINE_STEP_S
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(id: &str, offset_top: f64, height: f64) -> SectionBounds {
        SectionBounds {
            id: id.to_string(),
            offset_top,
            height,
        }
    }

    #[test]
    fn late_start_runs_load_effects_immediately() {
        let complete = DocumentReadiness::parse("complete");
        assert!(complete.dom_ready());
        assert!(complete.loaded());

        let interactive = DocumentReadiness::parse("interactive");
        assert!(interactive.dom_ready());
        assert!(!interactive.loaded());

        let loading = DocumentReadiness::parse("loading");
        assert!(!loading.dom_ready());
        assert!(!loading.loaded());
        assert_eq!(DocumentReadiness::parse(""), DocumentReadiness::Loading);
    }

    #[test]
    fn navbar_switches_after_threshold() {
        assert!(!navbar_scrolled(0.0));
        assert!(!navbar_scrolled(50.0));
        assert!(navbar_scrolled(50.5));
    }

    #[test]
    fn active_section_uses_activation_offset() {
        let sections = vec![
            section("home", 0.0, 600.0),
            section("about", 600.0, 800.0),
            section("experience", 1400.0, 900.0),
        ];

        assert_eq!(active_section(&sections, 0.0), Some("home"));
        assert_eq!(active_section(&sections, 499.0), Some("home"));
        assert_eq!(active_section(&sections, 500.0), Some("about"));
        assert_eq!(active_section(&sections, 1350.0), Some("experience"));
        assert_eq!(active_section(&sections, 5000.0), None);
    }

    #[test]
    fn active_section_prefers_later_overlap() {
        let sections = vec![section("a", 0.0, 1000.0), section("b", 300.0, 400.0)];
        assert_eq!(active_section(&sections, 250.0), Some("b"));
    }

    #[test]
    fn typewriter_types_holds_deletes_and_advances() {
        let mut writer = Typewriter::new(["ab", "xyz"]);

        assert_eq!(
            writer.tick(),
            TypewriterFrame {
                text: "a".into(),
                delay_ms: 100
            }
        );
        assert_eq!(
            writer.tick(),
            TypewriterFrame {
                text: "ab".into(),
                delay_ms: 2000
            }
        );
        assert_eq!(
            writer.tick(),
            TypewriterFrame {
                text: "a".into(),
                delay_ms: 50
            }
        );
        assert_eq!(
            writer.tick(),
            TypewriterFrame {
                text: String::new(),
                delay_ms: 500
            }
        );
        assert_eq!(writer.role_index(), 1);
        assert_eq!(writer.tick().text, "x");
    }

    #[test]
    fn typewriter_wraps_to_first_role() {
        let mut writer = Typewriter::new(["a"]);
        writer.tick();
        writer.tick();
        assert_eq!(writer.role_index(), 0);
        assert_eq!(writer.tick().text, "a");
    }

    #[test]
    fn typewriter_counts_characters_not_bytes() {
        let mut writer = Typewriter::new(["Bác sĩ"]);
        assert_eq!(writer.tick().text, "B");
        assert_eq!(writer.tick().text, "Bá");
    }

    #[test]
    fn typewriter_without_roles_stays_empty() {
        let mut writer = Typewriter::new(Vec::<String>::new());
        assert_eq!(writer.tick().text, "");
    }

    #[test]
    fn counter_eases_to_target() {
        assert_eq!(counter_value(120, 0.0, COUNTER_DURATION_MS), 0);
        assert_eq!(counter_value(120, 1000.0, COUNTER_DURATION_MS), 112);
        assert_eq!(counter_value(120, 2000.0, COUNTER_DURATION_MS), 120);
        assert_eq!(counter_value(120, 9000.0, COUNTER_DURATION_MS), 120);
        assert_eq!(counter_value(7, 10.0, 0.0), 7);
    }

    #[test]
    fn filter_matches_all_or_exact_category() {
        assert!(project_visible("all", "bi"));
        assert!(project_visible("bi", "bi"));
        assert!(!project_visible("bi", "data"));
    }

    #[test]
    fn tilt_is_flat_at_card_centre() {
        let card = Rect {
            left: 100.0,
            top: 50.0,
            width: 200.0,
            height: 100.0,
        };
        let tilt = card_tilt(card, Point { x: 200.0, y: 100.0 });
        assert_eq!(tilt.rotate_x, 0.0);
        assert_eq!(tilt.rotate_y, 0.0);

        let corner = card_tilt(card, Point { x: 100.0, y: 50.0 });
        assert_eq!(corner.rotate_x, -2.5);
        assert_eq!(corner.rotate_y, 5.0);
        assert_eq!(
            corner.transform(),
            "perspective(1000px) rotateX(-2.5deg) rotateY(5deg) translateY(-5px)"
        );
    }

    #[test]
    fn orbs_move_faster_with_index() {
        let viewport = Viewport {
            width: 1000.0,
            height: 800.0,
            scroll_y: 0.0,
        };
        let centre = orb_offset(3, Point { x: 500.0, y: 400.0 }, viewport);
        assert_eq!(centre, Point { x: 0.0, y: 0.0 });

        let corner = Point { x: 1000.0, y: 0.0 };
        assert_eq!(orb_offset(0, corner, viewport), Point { x: 10.0, y: -10.0 });
        assert_eq!(orb_offset(1, corner, viewport), Point { x: 20.0, y: -20.0 });
    }

    #[test]
    fn hero_stagger_and_anchor_offsets() {
        assert_eq!(stagger_delay_ms(0), 200);
        assert_eq!(stagger_delay_ms(5), 700);
        assert_eq!(anchor_scroll_top(880.0), 800.0);
        assert!(dynamic_background_enabled(1024.0));
        assert!(!dynamic_background_enabled(768.0));
    }
}
