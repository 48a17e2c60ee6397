#![cfg(target_arch = "wasm32")]

//! Vẽ biểu đồ Gantt vào `#gantt-chart` và điều khiển tooltip dùng chung.

use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use portfolio_core::{
    compute_placement, layout_timeline, BarId, Engagement, HoverTable, Size, TimelineConfig,
    TimelineLayout, TooltipCommand, TooltipContent, TooltipState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{console, Document, Element, Event, HtmlElement, MouseEvent, Window};

use crate::dom;

const CHART_ID: &str = "gantt-chart";
const TOOLTIP_ID: &str = "gantt-tooltip";
const BAR_SELECTOR: &str = ".gantt-bar";
const BAR_ID_ATTR: &str = "data-bar";
const VISIBLE_CLASS: &str = "visible";

struct ChartRegions {
    years: Element,
    grid_lines: Element,
    bars: Element,
}

impl ChartRegions {
    fn find(document: &Document) -> Result<Option<Self>, JsValue> {
        let Some(chart) = document.get_element_by_id(CHART_ID) else {
            return Ok(None);
        };
        let years = chart.query_selector(".gantt-years")?;
        let grid_lines = chart.query_selector(".gantt-grid-lines")?;
        let bars = chart.query_selector(".gantt-bars")?;

        Ok(match (years, grid_lines, bars) {
            (Some(years), Some(grid_lines), Some(bars)) => Some(Self {
                years,
                grid_lines,
                bars,
            }),
            _ => None,
        })
    }
}

/// Trạng thái hover của biểu đồ: tooltip singleton và bảng nội dung theo thanh.
struct HoverSession {
    window: Window,
    document: Document,
    tooltip: HtmlElement,
    state: TooltipState,
    table: HoverTable,
    config: TimelineConfig,
}

impl HoverSession {
    fn enter(&mut self, bar: &Element, id: BarId) -> Result<(), JsValue> {
        if self.state.visible_bar() == Some(id) {
            return Ok(());
        }
        let TooltipCommand::Show(id) = self.state.enter(id) else {
            return Ok(());
        };
        let Some(content) = self.table.get(id) else {
            return Ok(());
        };

        write_tooltip(&self.document, &self.tooltip, content)?;
        self.tooltip.class_list().add_1(VISIBLE_CLASS)?;

        // Đo sau khi ghi nội dung: kích thước đổi theo độ dài nội dung.
        let measured = dom::rect_of(&self.tooltip);
        let placement = compute_placement(
            dom::rect_of(bar),
            Size {
                width: measured.width,
                height: measured.height,
            },
            dom::viewport(&self.window)?,
            &self.config,
        );

        let top = format!("{}px", placement.top);
        let left = format!("{}px", placement.left);
        dom::set_styles(&self.tooltip, &[("top", top.as_str()), ("left", left.as_str())])
    }

    fn leave(&mut self, id: BarId) -> Result<(), JsValue> {
        if self.state.leave(id) == TooltipCommand::Hide {
            self.tooltip.class_list().remove_1(VISIBLE_CLASS)?;
        }
        Ok(())
    }

    fn reset(&mut self, table: HoverTable) -> Result<(), JsValue> {
        self.table = table;
        self.state = TooltipState::Hidden;
        self.tooltip.class_list().remove_1(VISIBLE_CLASS)
    }
}

/// Biểu đồ đã gắn vào trang. Listener hover được gỡ khi handle bị drop.
#[wasm_bindgen]
pub struct GanttChart {
    regions: ChartRegions,
    session: Rc<RefCell<HoverSession>>,
    engagements: Vec<Engagement>,
    on_over: Closure<dyn FnMut(Event)>,
    on_out: Closure<dyn FnMut(Event)>,
}

impl GanttChart {
    /// `Ok(None)` khi trang không có đủ vùng chứa của biểu đồ.
    pub fn attach(
        window: &Window,
        engagements: Vec<Engagement>,
        config: TimelineConfig,
    ) -> Result<Option<Self>, JsValue> {
        let document = dom::document(window)?;
        let Some(regions) = ChartRegions::find(&document)? else {
            console::warn_1(&JsValue::from_str(
                "Không tìm thấy #gantt-chart hoặc vùng con, bỏ qua biểu đồ Gantt",
            ));
            return Ok(None);
        };

        let layout = layout_timeline(&engagements, &config, Utc::now())
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;
        let tooltip = ensure_tooltip(&document)?;

        let session = Rc::new(RefCell::new(HoverSession {
            window: window.clone(),
            document,
            tooltip,
            state: TooltipState::Hidden,
            table: HoverTable::default(),
            config,
        }));

        let on_over = {
            let session = session.clone();
            dom::listen(&regions.bars, "mouseover", move |event: Event| {
                let Some((bar, id)) = hovered_bar(event.target()) else {
                    return;
                };
                if let Err(err) = session.borrow_mut().enter(&bar, id) {
                    dom::report(&err);
                }
            })?
        };

        let on_out = {
            let session = session.clone();
            dom::listen(&regions.bars, "mouseout", move |event: Event| {
                let Some((_, id)) = hovered_bar(event.target()) else {
                    return;
                };
                let related = event
                    .dyn_ref::<MouseEvent>()
                    .and_then(MouseEvent::related_target);
                // Di chuyển giữa các phần tử con của cùng một thanh.
                if hovered_bar(related).map(|(_, next)| next) == Some(id) {
                    return;
                }
                if let Err(err) = session.borrow_mut().leave(id) {
                    dom::report(&err);
                }
            })?
        };

        let chart = Self {
            regions,
            session,
            engagements,
            on_over,
            on_out,
        };
        chart.draw(layout)?;
        Ok(Some(chart))
    }

    fn draw(&self, layout: TimelineLayout) -> Result<(), JsValue> {
        let document = self.session.borrow().document.clone();
        let TimelineLayout {
            years,
            today,
            bars,
            hover,
            ..
        } = layout;

        self.regions.years.set_text_content(None);
        self.regions.grid_lines.set_text_content(None);
        self.regions.bars.set_text_content(None);

        for marker in &years {
            let left = format!("{}%", marker.left_percent);

            let label = dom::create_html(&document, "div", "year-marker")?;
            label.set_text_content(Some(&marker.year.to_string()));
            dom::set_styles(&label, &[("left", left.as_str()), ("position", "absolute")])?;
            self.regions.years.append_child(&label)?;

            let line = dom::create_html(&document, "div", "grid-line")?;
            dom::set_styles(&line, &[("left", left.as_str())])?;
            self.regions.grid_lines.append_child(&line)?;
        }

        if let Some(today) = today {
            let line = dom::create_html(&document, "div", "today-line")?;
            line.set_title("Today");
            let left = format!("{}%", today.left_percent);
            dom::set_styles(&line, &[("left", left.as_str())])?;
            self.regions.grid_lines.append_child(&line)?;
        }

        for bar in &bars {
            let element = dom::create_html(&document, "div", &bar.element_class())?;
            element.set_attribute(BAR_ID_ATTR, &bar.id.0.to_string())?;
            let left = format!("{}%", bar.geometry.left_percent);
            let width = format!("{}%", bar.geometry.width_percent);
            dom::set_styles(&element, &[("left", left.as_str()), ("width", width.as_str())])?;

            let label = dom::create(&document, "div", "gantt-bar-label")?;
            label.append_child(&dom::create_text(&document, "span", "", &bar.name)?)?;
            label.append_child(&dom::create_text(&document, "small", "", &bar.role)?)?;
            element.append_child(&label)?;

            if bar.show_shine {
                element.append_child(&dom::create(&document, "div", "gantt-progress-shine")?)?;
            }
            self.regions.bars.append_child(&element)?;
        }

        self.session.borrow_mut().reset(hover)
    }
}

#[wasm_bindgen]
impl GanttChart {
    /// Dựng lại toàn bộ biểu đồ với cấu hình mới (thay thế, không diff).
    pub fn render(&self, config: Option<JsValue>) -> Result<(), JsValue> {
        let config = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                serde_wasm_bindgen::from_value::<TimelineConfig>(value)?
            }
            _ => self.session.borrow().config.clone(),
        };
        let layout = layout_timeline(&self.engagements, &config, Utc::now())
            .map_err(|err| JsValue::from_str(&format!("Timeline error: {err}")))?;

        self.session.borrow_mut().config = config;
        self.draw(layout)
    }
}

impl Drop for GanttChart {
    fn drop(&mut self) {
        let bars = &self.regions.bars;
        let _ = bars
            .remove_event_listener_with_callback("mouseover", self.on_over.as_ref().unchecked_ref());
        let _ = bars
            .remove_event_listener_with_callback("mouseout", self.on_out.as_ref().unchecked_ref());
    }
}

/// Dùng lại `#gantt-tooltip` nếu đã có, nếu không thì tạo mới trên `<body>`.
fn ensure_tooltip(document: &Document) -> Result<HtmlElement, JsValue> {
    if let Some(existing) = document.get_element_by_id(TOOLTIP_ID) {
        return existing
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str("#gantt-tooltip không phải HtmlElement"));
    }

    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Document không có thẻ <body>"))?;
    let tooltip = dom::create_html(document, "div", "gantt-tooltip")?;
    tooltip.set_id(TOOLTIP_ID);
    body.append_child(&tooltip)?;
    Ok(tooltip)
}

fn write_tooltip(
    document: &Document,
    tooltip: &HtmlElement,
    content: &TooltipContent,
) -> Result<(), JsValue> {
    tooltip.set_text_content(None);

    let header = dom::create(document, "div", "tooltip-header")?;
    header.append_child(&dom::create_text(document, "div", "tooltip-title", &content.title)?)?;
    header.append_child(&dom::create_text(document, "div", "tooltip-role", &content.role)?)?;
    header.append_child(&dom::create_text(
        document,
        "span",
        "tooltip-date",
        &content.date_range,
    )?)?;
    tooltip.append_child(&header)?;

    let tags = dom::create(document, "div", "tooltip-tags")?;
    for tag in &content.tags {
        tags.append_child(&dom::create_text(document, "span", "tooltip-tag", tag)?)?;
    }
    tooltip.append_child(&tags)?;
    Ok(())
}

/// Thanh chứa `target` cùng chỉ số của nó trong bảng hover.
fn hovered_bar(target: Option<web_sys::EventTarget>) -> Option<(Element, BarId)> {
    let element = target?.dyn_into::<Element>().ok()?;
    let bar = element.closest(BAR_SELECTOR).ok()??;
    let id = bar.get_attribute(BAR_ID_ATTR)?.parse().ok()?;
    Some((bar, BarId(id)))
}
