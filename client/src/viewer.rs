use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement, HtmlImageElement, Window};

use folio_shared::markup::{not_found_html, LOADED_CLASS};
use folio_shared::{
    resolve_page, Direction, LoadTicket, NavigateOutcome, Navigator, Resolution, ViewerConfig,
};

use crate::dom::{
    find_element, get_element, set_body_scroll, set_class, set_display, show_error_toast,
};
use crate::loader::{revoke, ObjectUrlProbe};
use crate::protection::ViewerGuard;

pub type SharedViewer = Rc<RefCell<Viewer>>;

pub struct ViewerElements {
    pub modal: HtmlElement,
    pub title: Element,
    pub indicator: Element,
    pub prev: HtmlButtonElement,
    pub next: HtmlButtonElement,
    pub image: HtmlImageElement,
    pub spinner: HtmlElement,
    pub error: HtmlElement,
}

impl ViewerElements {
    pub fn from_document(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            modal: get_element(document, "imageViewerModal")?,
            title: get_element(document, "modalTitle")?,
            indicator: get_element(document, "pageIndicator")?,
            prev: get_element(document, "prevBtn")?,
            next: get_element(document, "nextBtn")?,
            image: get_element(document, "projectImage")?,
            spinner: get_element(document, "loadingSpinner")?,
            error: get_element(document, "errorMessage")?,
        })
    }
}

pub struct Viewer {
    window: Window,
    document: Document,
    config: ViewerConfig,
    navigator: Navigator,
    elements: ViewerElements,
    guard: ViewerGuard,
    object_url: Option<String>,
}

impl Viewer {
    pub fn new(
        window: Window,
        document: Document,
        config: ViewerConfig,
        navigator: Navigator,
    ) -> Result<Self, JsValue> {
        let elements = ViewerElements::from_document(&document)?;
        let guard = ViewerGuard::new(find_element(&document, "protectionOverlay"));
        Ok(Self {
            window,
            document,
            config,
            navigator,
            elements,
            guard,
            object_url: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.navigator.is_open()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn touch_guarded(&self) -> bool {
        self.guard.has_touch_listener()
    }

    fn sync_ui(&self) {
        let Some(view) = self.navigator.view() else {
            return;
        };
        self.elements.title.set_text_content(Some(&view.title));
        self.elements.indicator.set_text_content(Some(&view.indicator));
        self.elements.prev.set_disabled(view.prev_disabled);
        self.elements.next.set_disabled(view.next_disabled);
    }

    fn show_loading(&self) {
        set_display(&self.elements.spinner, true, "block");
        set_display(&self.elements.error, false, "block");
        set_class(&self.elements.image, LOADED_CLASS, false);
    }

    fn replace_object_url(&mut self, next: Option<String>) {
        if let Some(previous) = std::mem::replace(&mut self.object_url, next) {
            revoke(&previous);
        }
    }

    fn apply_resolution(&mut self, ticket: &LoadTicket, resolution: Resolution<String>) {
        if !self.navigator.finish_load(ticket) {
            if let Resolution::Found { image, .. } = resolution {
                revoke(&image);
            }
            return;
        }
        set_display(&self.elements.spinner, false, "block");
        match resolution {
            Resolution::Found { image, path, .. } => {
                log::debug!("displaying {path}");
                self.elements.image.set_src(&image);
                self.replace_object_url(Some(image));
                set_class(&self.elements.image, LOADED_CLASS, true);
            }
            Resolution::Placeholder { data_url, .. } => {
                self.replace_object_url(None);
                self.elements.image.set_src(&data_url);
                set_class(&self.elements.image, LOADED_CLASS, true);
                let message = not_found_html(&ticket.year, ticket.page);
                self.elements
                    .error
                    .set_inner_html(&format!("<p>{message}</p>"));
                set_display(&self.elements.error, true, "block");
            }
        }
    }

    fn reset_ui(&mut self) {
        set_display(&self.elements.modal, false, "block");
        set_body_scroll(&self.document, false);
        self.replace_object_url(None);
        self.elements.image.set_src("");
        set_class(&self.elements.image, LOADED_CLASS, false);
        set_display(&self.elements.spinner, false, "block");
        set_display(&self.elements.error, false, "block");
        self.guard.disable(&self.document);
    }
}

fn start_load(viewer: &SharedViewer, ticket: LoadTicket) {
    let (window, base_path, timeout_ms) = {
        let viewer = viewer.borrow();
        viewer.show_loading();
        (
            viewer.window.clone(),
            viewer.config.base_path.clone(),
            viewer.config.probe_timeout_ms,
        )
    };
    log::info!("loading page {} for year {}", ticket.page, ticket.year);
    let viewer = viewer.clone();
    spawn_local(async move {
        let mut probe = ObjectUrlProbe::new(window, timeout_ms);
        let resolution = resolve_page(&mut probe, &base_path, &ticket.year, ticket.page).await;
        viewer.borrow_mut().apply_resolution(&ticket, resolution);
    });
}

pub fn open_viewer(viewer: &SharedViewer, year: &str) {
    log::info!("opening viewer for year {year}");
    let opened = viewer.borrow_mut().navigator.open(year);
    match opened {
        Ok(ticket) => {
            {
                let mut state = viewer.borrow_mut();
                set_display(&state.elements.modal, true, "block");
                set_body_scroll(&state.document, true);
                state.sync_ui();
                let window = state.window.clone();
                let document = state.document.clone();
                state.guard.enable(&window, &document);
            }
            start_load(viewer, ticket);
        }
        Err(err) => {
            log::error!("{err}");
            let state = viewer.borrow();
            show_error_toast(
                &state.window,
                &state.document,
                &err.to_string(),
                state.config.error_toast_ms,
            );
        }
    }
}

pub fn navigate_viewer(viewer: &SharedViewer, direction: Direction) {
    let outcome = {
        let mut state = viewer.borrow_mut();
        let outcome = state.navigator.navigate(direction);
        if matches!(outcome, NavigateOutcome::Moved(_)) {
            state.sync_ui();
        }
        outcome
    };
    match outcome {
        NavigateOutcome::Moved(ticket) => start_load(viewer, ticket),
        NavigateOutcome::Busy => log::debug!("page navigation blocked: still loading"),
        NavigateOutcome::AtStart => log::debug!("cannot navigate before page 1"),
        NavigateOutcome::AtEnd => log::debug!("cannot navigate beyond the last page"),
        NavigateOutcome::Closed => {}
    }
}

pub fn close_viewer(viewer: &SharedViewer) {
    let mut state = viewer.borrow_mut();
    state.navigator.close();
    state.reset_ui();
    log::info!("viewer closed and reset");
}
