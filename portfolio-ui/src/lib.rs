//! Lớp giao diện (web-sys) của trang portfolio cho môi trường WebAssembly.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod effects;
#[cfg(target_arch = "wasm32")]
mod gantt;
#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::cell::{Cell, RefCell};

    use crate::gantt::GanttChart;
    use crate::{dom, effects, styles};
    use portfolio_core::effects::DocumentReadiness;
    use portfolio_core::{portfolio_engagements, TimelineConfig};
    use serde_wasm_bindgen::from_value;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Window};

    type Feature = fn(&Window, &Document) -> Result<(), JsValue>;

    thread_local! {
        /// Biểu đồ do `init_portfolio` gắn, sống suốt vòng đời trang.
        static PAGE_CHART: RefCell<Option<GanttChart>> = const { RefCell::new(None) };
        /// Host đã tự gắn biểu đồ qua `mount_gantt_chart`.
        static HOST_MOUNTED: Cell<bool> = const { Cell::new(false) };
    }

    /// Khởi tạo mọi hiệu ứng của trang; chờ `DOMContentLoaded` nếu tài liệu
    /// còn đang tải. Lỗi ở một hiệu ứng không chặn các hiệu ứng khác.
    #[wasm_bindgen]
    pub fn init_portfolio() -> Result<(), JsValue> {
        let window = dom::window()?;
        let document = dom::document(&window)?;

        if DocumentReadiness::parse(&document.ready_state()).dom_ready() {
            start_page(&window, &document);
            return Ok(());
        }

        let ready_document = document.clone();
        dom::listen_forever(&document, "DOMContentLoaded", move |_| {
            start_page(&window, &ready_document)
        })
    }

    fn start_page(window: &Window, document: &Document) {
        if let Err(err) = styles::ensure_styles(document) {
            dom::report(&err);
        }

        let features: [(&str, Feature); 10] = [
            ("navigation", effects::init_navigation),
            ("typewriter", effects::init_typewriter),
            ("counters", effects::init_counters),
            ("project filter", effects::init_project_filter),
            ("scroll reveal", |_, document| effects::init_scroll_reveal(document)),
            ("smooth scroll", effects::init_smooth_scroll),
            ("parallax cards", |_, document| effects::init_parallax_cards(document)),
            ("gantt chart", init_gantt_for_page),
            ("skill tags", |_, document| effects::init_skill_tags(document)),
            ("dynamic background", effects::init_dynamic_background),
        ];

        for (name, init) in features {
            if let Err(err) = init(window, document) {
                web_sys::console::error_2(&JsValue::from_str(&format!("[{name}]")), &err);
            }
        }

        if let Err(err) = effects::init_on_load(window, document) {
            dom::report(&err);
        }
        effects::log_greeting();
    }

    fn init_gantt_for_page(window: &Window, _: &Document) -> Result<(), JsValue> {
        if HOST_MOUNTED.with(Cell::get) {
            return Ok(());
        }
        let chart = GanttChart::attach(
            window,
            portfolio_engagements(),
            TimelineConfig::default(),
        )?;
        PAGE_CHART.with(|slot| *slot.borrow_mut() = chart);
        Ok(())
    }

    /// Gắn biểu đồ Gantt với bảng kinh nghiệm dựng sẵn và giao handle cho host.
    /// Biểu đồ `init_portfolio` đã gắn (nếu có) bị gỡ listener trước. Trả về
    /// `undefined` khi trang không có `#gantt-chart`.
    #[wasm_bindgen]
    pub fn mount_gantt_chart(config: Option<JsValue>) -> Result<Option<GanttChart>, JsValue> {
        let window = dom::window()?;
        let config = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                from_value::<TimelineConfig>(value)?
            }
            _ => TimelineConfig::default(),
        };

        HOST_MOUNTED.with(|mounted| mounted.set(true));
        drop(PAGE_CHART.with(|slot| slot.borrow_mut().take()));
        GanttChart::attach(&window, portfolio_engagements(), config)
    }
}

#[cfg(target_arch = "wasm32")]
pub use gantt::GanttChart;
#[cfg(target_arch = "wasm32")]
pub use wasm_ui::{init_portfolio, mount_gantt_chart};

#[cfg(not(target_arch = "wasm32"))]
pub fn init_portfolio() -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "portfolio-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_gantt_chart(_: Option<wasm_bindgen::JsValue>) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "portfolio-ui chỉ hỗ trợ biên dịch target wasm32",
    ))
}
