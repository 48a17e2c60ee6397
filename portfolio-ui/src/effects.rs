#![cfg(target_arch = "wasm32")]

//! Gắn các hiệu ứng trang vào DOM. Mỗi hiệu ứng tự bỏ qua khi trang thiếu
//! element tương ứng.

use std::cell::RefCell;
use std::rc::Rc;

use portfolio_core::effects::{
    active_section, anchor_scroll_top, animation_progress, card_tilt, code_line_delay_s,
    counter_value, dynamic_background_enabled, navbar_scrolled, orb_offset, project_visible,
    stagger_delay_ms, DocumentReadiness, Point, SectionBounds, Typewriter, COUNTER_DURATION_MS, FILTER_ALL,
    PROJECT_FADE_OUT_MS, TILT_RESET_TRANSFORM,
};
use portfolio_core::TYPEWRITER_ROLES;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollToOptions, Window,
};

use crate::dom;

const ACTIVE_CLASS: &str = "active";
const REVEAL_SELECTOR: &str = ".section-header, .highlight-card, .skill-category, .timeline-item, .project-card, .education-card, .contact-card";
const TILT_SELECTOR: &str = ".project-card, .highlight-card, .skill-category";
const HERO_SELECTOR: &str =
    ".hero-badge, .hero-title, .hero-roles, .hero-description, .hero-stats, .hero-cta";

pub fn init_navigation(window: &Window, document: &Document) -> Result<(), JsValue> {
    let (Some(navbar), Some(toggle), Some(menu)) = (
        document.get_element_by_id("navbar"),
        document.get_element_by_id("nav-toggle"),
        document.get_element_by_id("nav-menu"),
    ) else {
        return Ok(());
    };

    {
        let scroll_window = window.clone();
        let document = document.clone();
        dom::listen_forever(window, "scroll", move |_| {
            let scroll_y = scroll_window.scroll_y().unwrap_or_default();
            let result = navbar
                .class_list()
                .toggle_with_force("scrolled", navbar_scrolled(scroll_y))
                .and_then(|_| update_active_link(&document, scroll_y));
            if let Err(err) = result {
                dom::report(&err);
            }
        })?;
    }

    {
        let toggle_target = toggle.clone();
        let menu = menu.clone();
        dom::listen_forever(&toggle, "click", move |_| {
            let result = toggle_target
                .class_list()
                .toggle(ACTIVE_CLASS)
                .and_then(|_| menu.class_list().toggle(ACTIVE_CLASS));
            if let Err(err) = result {
                dom::report(&err);
            }
        })?;
    }

    for link in dom::query_all(document, ".nav-link")? {
        let toggle = toggle.clone();
        let menu = menu.clone();
        dom::listen_forever(&link, "click", move |_| {
            let result = toggle
                .class_list()
                .remove_1(ACTIVE_CLASS)
                .and_then(|_| menu.class_list().remove_1(ACTIVE_CLASS));
            if let Err(err) = result {
                dom::report(&err);
            }
        })?;
    }
    Ok(())
}

fn update_active_link(document: &Document, scroll_y: f64) -> Result<(), JsValue> {
    let sections: Vec<SectionBounds> = dom::query_all_html(document, "section[id]")?
        .iter()
        .map(|section| SectionBounds {
            id: section.id(),
            offset_top: f64::from(section.offset_top()),
            height: f64::from(section.offset_height()),
        })
        .collect();
    let current = active_section(&sections, scroll_y).map(|id| format!("#{id}"));

    for link in dom::query_all(document, ".nav-link")? {
        let is_current = current.is_some() && link.get_attribute("href") == current;
        link.class_list().toggle_with_force(ACTIVE_CLASS, is_current)?;
    }
    Ok(())
}

pub fn init_typewriter(window: &Window, document: &Document) -> Result<(), JsValue> {
    let Some(element) = document.get_element_by_id("typewriter") else {
        return Ok(());
    };
    type_next(window.clone(), element, Typewriter::new(TYPEWRITER_ROLES))
}

fn type_next(window: Window, element: Element, mut writer: Typewriter) -> Result<(), JsValue> {
    let frame = writer.tick();
    element.set_text_content(Some(&frame.text));

    let delay = i32::try_from(frame.delay_ms).unwrap_or(i32::MAX);
    let next_window = window.clone();
    dom::set_timeout(&window, delay, move || {
        if let Err(err) = type_next(next_window, element, writer) {
            dom::report(&err);
        }
    })
}

pub fn init_counters(window: &Window, document: &Document) -> Result<(), JsValue> {
    let counters = dom::query_all(document, ".stat-number")?;
    if counters.is_empty() {
        return Ok(());
    }

    let window = window.clone();
    let observer = observe_intersections(0.5, None, move |entry, observer| {
        if !entry.is_intersecting() {
            return Ok(());
        }
        let counter = entry.target();
        let target = counter
            .get_attribute("data-count")
            .and_then(|value| value.trim().parse::<i64>().ok())
            .unwrap_or_default();
        animate_counter(&window, counter.clone(), target)?;
        observer.unobserve(&counter);
        Ok(())
    })?;

    for counter in &counters {
        observer.observe(counter);
    }
    Ok(())
}

fn animate_counter(window: &Window, element: Element, target: i64) -> Result<(), JsValue> {
    let frame: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let handle = frame.clone();
    let next_window = window.clone();
    let mut started_at: Option<f64> = None;

    *frame.borrow_mut() = Some(Closure::wrap(Box::new(move |now: f64| {
        let elapsed = now - *started_at.get_or_insert(now);
        let value = counter_value(target, elapsed, COUNTER_DURATION_MS);
        element.set_text_content(Some(&value.to_string()));

        if animation_progress(elapsed, COUNTER_DURATION_MS) < 1.0 {
            if let Some(callback) = handle.borrow().as_ref() {
                let scheduled =
                    next_window.request_animation_frame(callback.as_ref().unchecked_ref());
                if let Err(err) = scheduled {
                    dom::report(&err);
                }
            }
        } else {
            let _ = handle.borrow_mut().take();
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = frame.borrow().as_ref() {
        window.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}

pub fn init_project_filter(window: &Window, document: &Document) -> Result<(), JsValue> {
    let buttons = dom::query_all(document, ".filter-btn")?;
    let projects = dom::query_all_html(document, ".project-card")?;
    if buttons.is_empty() {
        return Ok(());
    }

    for button in &buttons {
        let window = window.clone();
        let buttons = buttons.clone();
        let projects = projects.clone();
        let target = button.clone();
        dom::listen_forever(button, "click", move |_| {
            if let Err(err) = apply_filter(&window, &buttons, &target, &projects) {
                dom::report(&err);
            }
        })?;
    }
    Ok(())
}

fn apply_filter(
    window: &Window,
    buttons: &[Element],
    active: &Element,
    projects: &[HtmlElement],
) -> Result<(), JsValue> {
    for button in buttons {
        button.class_list().remove_1(ACTIVE_CLASS)?;
    }
    active.class_list().add_1(ACTIVE_CLASS)?;

    let filter = active
        .get_attribute("data-filter")
        .unwrap_or_else(|| FILTER_ALL.to_string());

    for project in projects {
        let category = project.get_attribute("data-category").unwrap_or_default();
        if project_visible(&filter, &category) {
            dom::set_styles(
                project,
                &[("display", "block"), ("animation", "fadeInUp 0.5s ease forwards")],
            )?;
        } else {
            dom::set_styles(project, &[("animation", "fadeOut 0.3s ease forwards")])?;
            let project = project.clone();
            dom::set_timeout(window, PROJECT_FADE_OUT_MS, move || {
                // Bộ lọc khác có thể đã hiện lại thẻ này trong lúc chờ.
                let style = project.style();
                let still_hidden = style
                    .get_property_value("animation")
                    .map(|value| value.contains("fadeOut"))
                    .unwrap_or(false);
                if still_hidden {
                    if let Err(err) = style.set_property("display", "none") {
                        dom::report(&err);
                    }
                }
            })?;
        }
    }
    Ok(())
}

pub fn init_scroll_reveal(document: &Document) -> Result<(), JsValue> {
    let elements = dom::query_all(document, REVEAL_SELECTOR)?;
    if elements.is_empty() {
        return Ok(());
    }
    for element in &elements {
        element.class_list().add_1("reveal")?;
    }

    let observer = observe_intersections(0.1, Some("0px 0px -50px 0px"), |entry, _| {
        if entry.is_intersecting() {
            entry.target().class_list().add_1(ACTIVE_CLASS)?;
        }
        Ok(())
    })?;
    for element in &elements {
        observer.observe(element);
    }
    Ok(())
}

/// Observer sống suốt vòng đời trang; `handler` chạy cho từng entry.
fn observe_intersections<F>(
    threshold: f64,
    root_margin: Option<&str>,
    mut handler: F,
) -> Result<IntersectionObserver, JsValue>
where
    F: FnMut(IntersectionObserverEntry, &IntersectionObserver) -> Result<(), JsValue> + 'static,
{
    let callback = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if let Err(err) = handler(entry, &observer) {
                    dom::report(&err);
                }
            }
        },
    ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(threshold));
    if let Some(margin) = root_margin {
        options.set_root_margin(margin);
    }

    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options)?;
    callback.forget();
    Ok(observer)
}

pub fn init_smooth_scroll(window: &Window, document: &Document) -> Result<(), JsValue> {
    for anchor in dom::query_all(document, "a[href^=\"#\"]")? {
        let window = window.clone();
        let document = document.clone();
        let href = anchor.get_attribute("href").unwrap_or_default();
        dom::listen_forever(&anchor, "click", move |event: Event| {
            event.prevent_default();

            // "#" đứng một mình không phải selector hợp lệ.
            let Some(target) = document
                .query_selector(&href)
                .ok()
                .flatten()
                .and_then(|element| element.dyn_into::<HtmlElement>().ok())
            else {
                return;
            };

            let options = ScrollToOptions::new();
            options.set_top(anchor_scroll_top(f64::from(target.offset_top())));
            options.set_behavior(ScrollBehavior::Smooth);
            window.scroll_to_with_scroll_to_options(&options);
        })?;
    }
    Ok(())
}

pub fn init_parallax_cards(document: &Document) -> Result<(), JsValue> {
    for card in dom::query_all_html(document, TILT_SELECTOR)? {
        {
            let target = card.clone();
            dom::listen_forever(&card, "mousemove", move |event: Event| {
                let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let pointer = Point {
                    x: f64::from(mouse.client_x()),
                    y: f64::from(mouse.client_y()),
                };
                let transform = card_tilt(dom::rect_of(&target), pointer).transform();
                if let Err(err) = target.style().set_property("transform", &transform) {
                    dom::report(&err);
                }
            })?;
        }

        let target = card.clone();
        dom::listen_forever(&card, "mouseleave", move |_| {
            if let Err(err) = target.style().set_property("transform", TILT_RESET_TRANSFORM) {
                dom::report(&err);
            }
        })?;
    }
    Ok(())
}

pub fn init_skill_tags(document: &Document) -> Result<(), JsValue> {
    for tag in dom::query_all_html(document, ".skill-tag")? {
        for (event, scale) in [("mouseenter", "scale(1.1)"), ("mouseleave", "scale(1)")] {
            let target = tag.clone();
            dom::listen_forever(&tag, event, move |_| {
                if let Err(err) = target.style().set_property("transform", scale) {
                    dom::report(&err);
                }
            })?;
        }
    }
    Ok(())
}

pub fn init_dynamic_background(window: &Window, document: &Document) -> Result<(), JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or_default();
    if !dynamic_background_enabled(width) {
        return Ok(());
    }
    let orbs = dom::query_all_html(document, ".gradient-orb")?;
    if orbs.is_empty() {
        return Ok(());
    }

    let window = window.clone();
    dom::listen_forever(document, "mousemove", move |event: Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
            return;
        };
        let viewport = match dom::viewport(&window) {
            Ok(viewport) => viewport,
            Err(err) => return dom::report(&err),
        };
        let pointer = Point {
            x: f64::from(mouse.client_x()),
            y: f64::from(mouse.client_y()),
        };

        for (index, orb) in orbs.iter().enumerate() {
            let transform = orb_offset(index, pointer, viewport).translate();
            if let Err(err) = orb.style().set_property("transform", &transform) {
                dom::report(&err);
            }
        }
    })
}

/// Hiệu ứng chạy khi trang tải xong: body `loaded`, hero xuất hiện lần lượt,
/// từng dòng khối code hiện dần. Nếu `load` đã phát thì chạy ngay.
pub fn init_on_load(window: &Window, document: &Document) -> Result<(), JsValue> {
    if DocumentReadiness::parse(&document.ready_state()).loaded() {
        run_load_effects(window, document);
        return Ok(());
    }

    let load_window = window.clone();
    let document = document.clone();
    dom::listen_forever(window, "load", move |_| {
        run_load_effects(&load_window, &document)
    })
}

fn run_load_effects(window: &Window, document: &Document) {
    if let Err(err) = reveal_hero(window, document) {
        dom::report(&err);
    }
    if let Err(err) = animate_code_block(document) {
        dom::report(&err);
    }
}

fn reveal_hero(window: &Window, document: &Document) -> Result<(), JsValue> {
    if let Some(body) = document.body() {
        body.class_list().add_1("loaded")?;
    }

    for (index, element) in dom::query_all_html(document, HERO_SELECTOR)?
        .into_iter()
        .enumerate()
    {
        dom::set_styles(
            &element,
            &[("opacity", "0"), ("transform", "translateY(30px)")],
        )?;
        dom::set_timeout(window, stagger_delay_ms(index), move || {
            let result = dom::set_styles(
                &element,
                &[
                    ("transition", "opacity 0.8s ease, transform 0.8s ease"),
                    ("opacity", "1"),
                    ("transform", "translateY(0)"),
                ],
            );
            if let Err(err) = result {
                dom::report(&err);
            }
        })?;
    }
    Ok(())
}

fn animate_code_block(document: &Document) -> Result<(), JsValue> {
    let Some(code) = document.query_selector(".code-content code")? else {
        return Ok(());
    };

    let source = code.inner_html();
    code.set_inner_html("");
    for (index, line) in source.split('\n').enumerate() {
        let span = dom::create_html(document, "span", "")?;
        span.set_inner_html(&format!("{line}\n"));
        let animation = format!("fadeInUp 0.5s ease {}s forwards", code_line_delay_s(index));
        dom::set_styles(&span, &[("opacity", "0"), ("animation", animation.as_str())])?;
        code.append_child(&span)?;
    }
    Ok(())
}

pub fn log_greeting() {
    web_sys::console::log_2(
        &JsValue::from_str("%c Welcome to my portfolio! "),
        &JsValue::from_str(
            "background: linear-gradient(135deg, #6366f1, #a855f7); color: white; font-size: 16px; padding: 10px 20px; border-radius: 8px;",
        ),
    );
    web_sys::console::log_2(
        &JsValue::from_str("%c Built with passion for data and design ✨"),
        &JsValue::from_str("color: #a855f7; font-size: 12px;"),
    );
}
