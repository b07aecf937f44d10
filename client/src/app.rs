use std::cell::{Cell, RefCell};
use std::rc::Rc;

use js_sys::Reflect;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, Event, EventTarget, HtmlButtonElement, KeyboardEvent, Window};

use folio_shared::markup::{year_card_html, ACCESS_WARNING, VIEW_BUTTON_CLASS, YEAR_CARD_CLASS};
use folio_shared::protection::{viewer_key, ViewerKey};
use folio_shared::resolver::candidate_paths;
use folio_shared::{Catalog, Direction, ImageProbe, Navigator, ProbeResult, ViewerConfig};

use crate::dom::{add_listener, closest_attribute, get_element, show_error_toast};
use crate::loader::{revoke, ObjectUrlProbe};
use crate::protection;
use crate::viewer::{close_viewer, navigate_viewer, open_viewer, SharedViewer, Viewer};

const CONFIG_ELEMENT_ID: &str = "folioConfig";

fn debug_enabled(window: &Window) -> bool {
    let search = window.location().search().ok().unwrap_or_default();
    search.contains("debug=1")
        || search.contains("debug=true")
        || search.contains("log=1")
        || search.contains("log=true")
}

fn document_ready_state(document: &Document) -> Option<String> {
    Reflect::get(document.as_ref(), &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

fn init_logging(window: &Window) {
    let level = if debug_enabled(window) {
        log::Level::Debug
    } else {
        log::Level::Info
    };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already installed".into());
    }
}

pub fn read_config(document: &Document) -> ViewerConfig {
    let text = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .unwrap_or_default();
    ViewerConfig::from_json(&text).unwrap_or_else(|err| {
        log::warn!("ignoring host config: {err}");
        ViewerConfig::default()
    })
}

pub fn render_year_cards(
    document: &Document,
    grid: &Element,
    catalog: &Catalog,
) -> Result<usize, JsValue> {
    grid.set_inner_html("");
    for entry in catalog.entries() {
        let card = document.create_element("div")?;
        card.set_class_name(YEAR_CARD_CLASS);
        card.set_attribute("data-year", entry.year)?;
        card.set_inner_html(&year_card_html(entry));
        grid.append_child(&card)?;
    }
    let count = catalog.entries().len();
    log::info!("created {count} year cards");
    Ok(count)
}

fn year_from_click(event: &Event) -> Option<String> {
    let target: Element = event.target()?.dyn_into().ok()?;
    closest_attribute(&target, &format!(".{VIEW_BUTTON_CLASS}"), "data-year")
        .or_else(|| closest_attribute(&target, &format!(".{YEAR_CARD_CLASS}"), "data-year"))
}

fn bind_controls(document: &Document, viewer: &SharedViewer) -> Result<(), JsValue> {
    {
        let viewer = viewer.clone();
        add_listener(document, "click", move |event: Event| {
            if let Some(year) = year_from_click(&event) {
                log::debug!("project card clicked for year {year}");
                open_viewer(&viewer, &year);
            }
        })?;
    }

    let close_button: HtmlButtonElement = get_element(document, "modalClose")?;
    {
        let viewer = viewer.clone();
        add_listener(&close_button, "click", move |_: Event| close_viewer(&viewer))?;
    }

    for (id, direction) in [("prevBtn", Direction::Previous), ("nextBtn", Direction::Next)] {
        let button: HtmlButtonElement = get_element(document, id)?;
        let viewer = viewer.clone();
        add_listener(&button, "click", move |_: Event| {
            navigate_viewer(&viewer, direction);
        })?;
    }

    let modal: Element = get_element(document, "imageViewerModal")?;
    {
        let viewer = viewer.clone();
        let backdrop: EventTarget = modal.clone().into();
        add_listener(&modal, "click", move |event: Event| {
            if event.target().as_ref() == Some(&backdrop) {
                log::debug!("modal background clicked");
                close_viewer(&viewer);
            }
        })?;
    }

    {
        let viewer = viewer.clone();
        add_listener(document, "keydown", move |event: Event| {
            let Ok(event) = event.dyn_into::<KeyboardEvent>() else {
                return;
            };
            let open = viewer
                .try_borrow()
                .map(|viewer| viewer.is_open())
                .unwrap_or(false);
            if !open {
                return;
            }
            let Some(action) = viewer_key(&event.key()) else {
                return;
            };
            event.prevent_default();
            match action {
                ViewerKey::Previous => navigate_viewer(&viewer, Direction::Previous),
                ViewerKey::Next => navigate_viewer(&viewer, Direction::Next),
                ViewerKey::Close => close_viewer(&viewer),
            }
        })?;
    }

    log::debug!("event listeners bound");
    Ok(())
}

/// Probes the first page of the first project once so a broken asset
/// layout is reported before anyone opens the viewer.
fn check_image_access(
    window: &Window,
    document: &Document,
    config: &ViewerConfig,
    catalog: &Catalog,
) {
    let Some(entry) = catalog.first() else {
        return;
    };
    let Some(path) = candidate_paths(&config.base_path, entry.year, 1).into_iter().next() else {
        return;
    };
    let window = window.clone();
    let document = document.clone();
    let timeout_ms = config.probe_timeout_ms;
    let toast_ms = config.error_toast_ms;
    let year = entry.year;
    spawn_local(async move {
        let mut probe = ObjectUrlProbe::new(window.clone(), timeout_ms);
        match probe.probe(&path).await {
            ProbeResult::Loaded(url) => {
                revoke(&url);
                log::info!("image access check passed: {path}");
            }
            ProbeResult::Failed | ProbeResult::TimedOut => {
                log::error!("image access check failed: cannot access {path}");
                log::warn!("check that the asset folder exists and is lowercase");
                log::warn!("check that {year}/ exists under the asset folder");
                log::warn!("check file name case; static hosts are case-sensitive");
                show_error_toast(&window, &document, ACCESS_WARNING, toast_ms);
            }
        }
    });
}

#[wasm_bindgen(start)]
pub fn run() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    let started = Rc::new(Cell::new(false));

    if document_ready_state(&document).as_deref() != Some("loading") {
        started.set(true);
        return start_app();
    }

    let onready_started = started.clone();
    let onready = Closure::<dyn FnMut(Event)>::new(move |_| {
        if onready_started.replace(true) {
            return;
        }
        if let Err(err) = start_app() {
            web_sys::console::error_1(&err);
        }
    });
    document.add_event_listener_with_callback(
        "DOMContentLoaded",
        onready.as_ref().unchecked_ref(),
    )?;
    onready.forget();

    Ok(())
}

fn start_app() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("Missing window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Missing document"))?;
    init_logging(&window);

    let Some(grid) = document.get_element_by_id("yearsGrid") else {
        log::info!("no project grid on this page; viewer not started");
        return Ok(());
    };

    let config = read_config(&document);
    log::debug!("base path for images: {}", config.base_path);
    let catalog = Catalog::builtin();
    render_year_cards(&document, &grid, &catalog)?;

    let viewer: SharedViewer = Rc::new(RefCell::new(Viewer::new(
        window.clone(),
        document.clone(),
        config.clone(),
        Navigator::new(catalog),
    )?));
    bind_controls(&document, &viewer)?;
    protection::install(&window, &document, &viewer, config.notice_ms)?;

    if config.access_check {
        check_image_access(&window, &document, &config, &catalog);
    }
    log::info!("viewer ready");
    Ok(())
}
