use std::cell::Cell;
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    AddEventListenerOptions, Document, Element, Event, HtmlElement, KeyboardEvent, Window,
};

use folio_shared::markup::PROTECTED_IMAGE_CLASS;
use folio_shared::protection::{
    blocked_shortcut, blocks_context_menu, blocks_drag, blocks_selection, blocks_touch, KeyInput,
    Notice,
};

use crate::dom::{add_listener, inject_protection_style, set_display, show_notice};
use crate::viewer::SharedViewer;

const TOUCH_EVENTS: [&str; 2] = ["touchstart", "touchmove"];

fn target_protected(event: &Event) -> bool {
    event
        .target()
        .and_then(|target| target.dyn_into::<Element>().ok())
        .and_then(|element| {
            element
                .closest(&format!(".{PROTECTED_IMAGE_CLASS}"))
                .ok()
                .flatten()
        })
        .is_some()
}

fn viewer_open(viewer: &SharedViewer) -> bool {
    viewer
        .try_borrow()
        .map(|viewer| viewer.is_open())
        .unwrap_or(true)
}

/// Installs the page-wide deterrents. They only discourage casual copying.
pub fn install(
    window: &Window,
    document: &Document,
    viewer: &SharedViewer,
    notice_ms: u32,
) -> Result<(), JsValue> {
    inject_protection_style(document)?;

    {
        let viewer = viewer.clone();
        let window = window.clone();
        let document_cb = document.clone();
        add_listener(document, "contextmenu", move |event| {
            if blocks_context_menu(viewer_open(&viewer), target_protected(&event)) {
                event.prevent_default();
                show_notice(&window, &document_cb, Notice::RightClick.message(), notice_ms);
            }
        })?;
    }

    add_listener(document, "dragstart", move |event| {
        if blocks_drag(target_protected(&event)) {
            event.prevent_default();
        }
    })?;

    {
        let viewer = viewer.clone();
        add_listener(document, "selectstart", move |event| {
            if blocks_selection(viewer_open(&viewer), target_protected(&event)) {
                event.prevent_default();
            }
        })?;
    }

    {
        let window = window.clone();
        let document_cb = document.clone();
        add_listener(document, "keydown", move |event| {
            let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                return;
            };
            let key = event.key();
            let input = KeyInput {
                key: &key,
                ctrl: event.ctrl_key(),
                meta: event.meta_key(),
                shift: event.shift_key(),
            };
            if let Some(notice) = blocked_shortcut(&input) {
                event.prevent_default();
                show_notice(&window, &document_cb, notice.message(), notice_ms);
            }
        })?;
    }

    log::info!("protection initialized");
    Ok(())
}

fn supports_touch(window: &Window) -> bool {
    Reflect::has(window.as_ref(), &JsValue::from_str("ontouchstart")).unwrap_or(false)
}

/// Decoy overlay and touch suppression that exist only while the viewer is open.
pub struct ViewerGuard {
    overlay: Option<HtmlElement>,
    open: Rc<Cell<bool>>,
    touch: Option<Closure<dyn FnMut(Event)>>,
}

impl ViewerGuard {
    pub fn new(overlay: Option<HtmlElement>) -> Self {
        Self {
            overlay,
            open: Rc::new(Cell::new(false)),
            touch: None,
        }
    }

    pub fn has_touch_listener(&self) -> bool {
        self.touch.is_some()
    }

    pub fn enable(&mut self, window: &Window, document: &Document) {
        self.open.set(true);
        if let Some(overlay) = &self.overlay {
            set_display(overlay, true, "block");
        }
        if self.touch.is_some() || !supports_touch(window) {
            return;
        }
        let open = self.open.clone();
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if blocks_touch(open.get()) {
                event.prevent_default();
            }
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        for name in TOUCH_EVENTS {
            if let Err(err) = document.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                callback.as_ref().unchecked_ref(),
                &options,
            ) {
                log::warn!("failed to add {name} guard: {err:?}");
            }
        }
        self.touch = Some(callback);
        log::debug!("touch protection enabled");
    }

    pub fn disable(&mut self, document: &Document) {
        self.open.set(false);
        if let Some(overlay) = &self.overlay {
            set_display(overlay, false, "block");
        }
        let Some(callback) = self.touch.take() else {
            return;
        };
        for name in TOUCH_EVENTS {
            let _ = document
                .remove_event_listener_with_callback(name, callback.as_ref().unchecked_ref());
        }
        log::debug!("touch protection disabled");
    }
}
