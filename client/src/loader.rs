use std::cell::Cell;
use std::rc::Rc;

use js_sys::{Array, Promise};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{future_to_promise, JsFuture};
use web_sys::{Blob, HtmlImageElement, Response, Url, Window};

use folio_shared::{ImageProbe, ProbeResult};

use crate::dom::timer_delay;

/// Loads candidates through `fetch` and hands them to the page as object URLs,
/// so the asset path never appears on the displayed image.
pub struct ObjectUrlProbe {
    window: Window,
    timeout_ms: u32,
}

impl ObjectUrlProbe {
    pub fn new(window: Window, timeout_ms: u32) -> Self {
        Self { window, timeout_ms }
    }
}

impl ImageProbe for ObjectUrlProbe {
    type Loaded = String;

    async fn probe(&mut self, path: &str) -> ProbeResult<String> {
        let expired = Rc::new(Cell::new(false));
        let timeout = match timeout_promise(&self.window, self.timeout_ms, expired.clone()) {
            Ok(timeout) => timeout,
            Err(err) => {
                log::warn!("probe timer unavailable: {err:?}");
                return ProbeResult::Failed;
            }
        };
        let work = future_to_promise(fetch_object_url(
            self.window.clone(),
            path.to_string(),
            expired,
        ));
        match JsFuture::from(Promise::race(&Array::of2(&work, &timeout))).await {
            Ok(value) => match value.as_string() {
                Some(url) => ProbeResult::Loaded(url),
                None => ProbeResult::TimedOut,
            },
            Err(_) => ProbeResult::Failed,
        }
    }
}

/// Resolves with `undefined` after `ms`, marking `expired` first.
fn timeout_promise(window: &Window, ms: u32, expired: Rc<Cell<bool>>) -> Result<Promise, JsValue> {
    let mut scheduled = Ok(0);
    let promise = Promise::new(&mut |resolve, _reject| {
        let expired = expired.clone();
        let ontimeout = Closure::once(move || {
            expired.set(true);
            let _ = resolve.call0(&JsValue::UNDEFINED);
        });
        scheduled = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            ontimeout.as_ref().unchecked_ref(),
            timer_delay(ms),
        );
        ontimeout.forget();
    });
    scheduled.map(|_| promise)
}

async fn fetch_object_url(
    window: Window,
    path: String,
    expired: Rc<Cell<bool>>,
) -> Result<JsValue, JsValue> {
    let response: Response = JsFuture::from(window.fetch_with_str(&path))
        .await?
        .dyn_into()?;
    if !response.ok() {
        return Err(JsValue::from_str(&format!(
            "HTTP {} for {path}",
            response.status()
        )));
    }
    let blob: Blob = JsFuture::from(response.blob()?).await?.dyn_into()?;
    let url = Url::create_object_url_with_blob(&blob)?;
    if let Err(err) = decode_image(&url).await {
        let _ = Url::revoke_object_url(&url);
        return Err(err);
    }
    if expired.get() {
        let _ = Url::revoke_object_url(&url);
        return Err(JsValue::from_str("probe expired"));
    }
    Ok(JsValue::from_str(&url))
}

async fn decode_image(url: &str) -> Result<(), JsValue> {
    let image = HtmlImageElement::new()?;
    image.set_src(url);
    JsFuture::from(image.decode()).await?;
    Ok(())
}

pub fn revoke(url: &str) {
    if url.starts_with("blob:") {
        let _ = Url::revoke_object_url(url);
    }
}
