use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, Window};

use folio_shared::markup::{
    toast_html, ERROR_TOAST_STYLE, NOTICE_TOAST_STYLE, PROTECTION_CSS, PROTECTION_STYLE_ID,
    TOAST_CLASS,
};

pub fn get_element<T: JsCast>(document: &Document, id: &str) -> Result<T, JsValue> {
    let element = document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("Missing element: {id}")))?;
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("Invalid element type: {id}")))
}

pub fn add_listener<F>(target: &EventTarget, name: &str, handler: F) -> Result<(), JsValue>
where
    F: FnMut(Event) + 'static,
{
    let callback = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(name, callback.as_ref().unchecked_ref())?;
    callback.forget();
    Ok(())
}

/// Browser timers take an `i32` delay; larger values would wrap negative.
pub fn timer_delay(ms: u32) -> i32 {
    i32::try_from(ms).unwrap_or(i32::MAX)
}

pub fn find_element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    document
        .get_element_by_id(id)
        .and_then(|element| element.dyn_into::<T>().ok())
}

pub fn set_display(element: &HtmlElement, visible: bool, shown_as: &str) {
    let value = if visible { shown_as } else { "none" };
    let _ = element.style().set_property("display", value);
}

pub fn set_body_scroll(document: &Document, locked: bool) {
    if let Some(body) = document.body() {
        let value = if locked { "hidden" } else { "auto" };
        let _ = body.style().set_property("overflow", value);
    }
}

pub fn set_class(element: &Element, class: &str, on: bool) {
    let list = element.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}

pub fn closest_attribute(target: &Element, selector: &str, attribute: &str) -> Option<String> {
    target
        .closest(selector)
        .ok()
        .flatten()
        .and_then(|element| element.get_attribute(attribute))
}

pub fn inject_style(document: &Document, id: &str, css: &str) -> Result<(), JsValue> {
    if document.get_element_by_id(id).is_some() {
        return Ok(());
    }
    let style = document.create_element("style")?;
    style.set_id(id);
    style.set_text_content(Some(css));
    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Missing document head"))?;
    head.append_child(&style)?;
    Ok(())
}

pub fn inject_protection_style(document: &Document) -> Result<(), JsValue> {
    inject_style(document, PROTECTION_STYLE_ID, PROTECTION_CSS)
}

fn remove_later(window: &Window, element: Element, duration_ms: u32) -> Result<(), JsValue> {
    let onexpire = Closure::once(move || element.remove());
    window.set_timeout_with_callback_and_timeout_and_arguments_0(
        onexpire.as_ref().unchecked_ref(),
        timer_delay(duration_ms),
    )?;
    onexpire.forget();
    Ok(())
}

fn append_toast(
    window: &Window,
    document: &Document,
    class: Option<&str>,
    style: &str,
    icon: &str,
    message: &str,
    duration_ms: u32,
) -> Result<(), JsValue> {
    let toast = document.create_element("div")?;
    if let Some(class) = class {
        toast.set_class_name(class);
    }
    toast.set_attribute("style", style)?;
    toast.set_inner_html(&toast_html(icon, message));
    let body = document
        .body()
        .ok_or_else(|| JsValue::from_str("Missing document body"))?;
    body.append_child(&toast)?;
    remove_later(window, toast, duration_ms)
}

/// Replaces any visible notice with `message`.
pub fn show_notice(window: &Window, document: &Document, message: &str, duration_ms: u32) {
    log::info!("protection notice: {message}");
    if let Ok(Some(existing)) = document.query_selector(&format!(".{TOAST_CLASS}")) {
        existing.remove();
    }
    if let Err(err) = append_toast(
        window,
        document,
        Some(TOAST_CLASS),
        NOTICE_TOAST_STYLE,
        "fa-shield-alt",
        message,
        duration_ms,
    ) {
        log::error!("failed to show notice: {err:?}");
    }
}

pub fn show_error_toast(window: &Window, document: &Document, message: &str, duration_ms: u32) {
    if let Err(err) = append_toast(
        window,
        document,
        None,
        ERROR_TOAST_STYLE,
        "fa-exclamation-circle",
        message,
        duration_ms,
    ) {
        log::error!("failed to show error message: {err:?}");
    }
}
