#![cfg(target_arch = "wasm32")]

use portfolio_core::{Rect, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

pub fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("Không có window"))
}

pub fn document(window: &Window) -> Result<Document, JsValue> {
    window
        .document()
        .ok_or_else(|| JsValue::from_str("Không truy cập được document"))
}

pub fn create(document: &Document, tag: &str, class: &str) -> Result<Element, JsValue> {
    let element = document.create_element(tag)?;
    if !class.is_empty() {
        element.set_class_name(class);
    }
    Ok(element)
}

pub fn create_html(document: &Document, tag: &str, class: &str) -> Result<HtmlElement, JsValue> {
    create(document, tag, class)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| JsValue::from_str("Element vừa tạo không phải HtmlElement"))
}

pub fn create_text(
    document: &Document,
    tag: &str,
    class: &str,
    text: &str,
) -> Result<Element, JsValue> {
    let element = create(document, tag, class)?;
    element.set_text_content(Some(text));
    Ok(element)
}

pub fn set_styles(element: &HtmlElement, properties: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in properties {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Mọi element khớp `selector`, theo thứ tự tài liệu.
pub fn query_all(document: &Document, selector: &str) -> Result<Vec<Element>, JsValue> {
    let nodes = document.query_selector_all(selector)?;
    Ok((0..nodes.length())
        .filter_map(|index| nodes.get(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

pub fn query_all_html(document: &Document, selector: &str) -> Result<Vec<HtmlElement>, JsValue> {
    Ok(query_all(document, selector)?
        .into_iter()
        .filter_map(|element| element.dyn_into::<HtmlElement>().ok())
        .collect())
}

pub fn rect_of(element: &Element) -> Rect {
    let rect = element.get_bounding_client_rect();
    Rect {
        left: rect.left(),
        top: rect.top(),
        width: rect.width(),
        height: rect.height(),
    }
}

pub fn viewport(window: &Window) -> Result<Viewport, JsValue> {
    Ok(Viewport {
        width: window.inner_width()?.as_f64().unwrap_or_default(),
        height: window.inner_height()?.as_f64().unwrap_or_default(),
        scroll_y: window.scroll_y()?,
    })
}

pub fn listen<F>(
    target: &EventTarget,
    event: &str,
    handler: F,
) -> Result<Closure<dyn FnMut(Event)>, JsValue>
where
    F: FnMut(Event) + 'static,
{
    let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    Ok(closure)
}

/// Như `listen`, nhưng listener sống suốt vòng đời trang.
pub fn listen_forever<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    listen(target, event, handler)?.forget();
    Ok(())
}

pub fn set_timeout<F>(window: &Window, delay_ms: i32, callback: F) -> Result<(), JsValue>
where
    F: FnOnce() + 'static,
{
    let callback = Closure::once_into_js(callback);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        delay_ms,
    )?;
    Ok(())
}

pub fn report(err: &JsValue) {
    web_sys::console::error_1(err);
}
