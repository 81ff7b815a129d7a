//! Page collaborators backed by the DOM, `fetch`, Plotly and Bootstrap.

use async_trait::async_trait;
use common::{FormSnapshot, PlotLayout, TraceSpec};
use gloo_net::http::Request;
use js_sys::Array;
use serde::Serialize;
use submission::{
    ChartSurface, FormSource, HttpReply, NotificationArea, PageDocument, Result, SubmitError,
    SubmitEvent, Transport,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, Event, FormData, HtmlDocument, HtmlFormElement};

use crate::bindings;

/// Readable text for a thrown JS value.
pub(crate) fn describe(value: &JsValue) -> String {
    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    format!("{:?}", value)
}

pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }
}

impl FormSource for DomForm {
    fn snapshot(&self) -> Result<FormSnapshot> {
        let form_error = |e: JsValue| SubmitError::Form(describe(&e));

        let data = FormData::new_with_form(&self.form).map_err(form_error)?;
        let entries = js_sys::try_iter(data.as_ref())
            .map_err(form_error)?
            .ok_or_else(|| SubmitError::Form("FormData is not iterable".to_string()))?;

        let mut snapshot = FormSnapshot::new();
        for entry in entries {
            let pair = Array::from(&entry.map_err(form_error)?);
            let name = pair.get(0).as_string().unwrap_or_default();
            match pair.get(1).as_string() {
                Some(value) => snapshot.push(name, value),
                None => log::warn!("Skipping non-text form field '{}'", name),
            }
        }

        log::trace!("Form snapshot: {:?}", snapshot);
        Ok(snapshot)
    }
}

/// Posts the form with `fetch`.
pub struct FetchTransport;

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_form(&self, endpoint: &str, form: &FormSnapshot) -> Result<HttpReply> {
        log::debug!("POST request to: {}", endpoint);

        let body = FormData::new().map_err(|e| SubmitError::Transport(describe(&e)))?;
        for field in form.iter() {
            body.append_with_str(&field.name, &field.value)
                .map_err(|e| SubmitError::Transport(describe(&e)))?;
        }

        let response = Request::post(endpoint)
            .body(body)
            .map_err(|e| SubmitError::Transport(format!("Failed to build request: {}", e)))?
            .send()
            .await
            .map_err(|e| {
                let error_msg = format!("Request failed: {}", e);
                log::error!("POST {} - {}", endpoint, error_msg);
                SubmitError::Transport(error_msg)
            })?;

        let status = response.status();
        log::trace!("POST {} - HTTP {}, reading body", endpoint, status);
        let body = response.text().await.map_err(|e| {
            let error_msg = format!("Failed to read response: {}", e);
            log::error!("POST {} - {}", endpoint, error_msg);
            SubmitError::Transport(error_msg)
        })?;

        Ok(HttpReply { status, body })
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    // Plain objects, not `Map`s: Plotly reads traces by property
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| SubmitError::Render(e.to_string()))
}

/// Chart target element, drawn with Plotly.
pub struct PlotlyChart {
    target: Element,
}

impl PlotlyChart {
    pub fn new(target: Element) -> Self {
        Self { target }
    }
}

impl ChartSurface for PlotlyChart {
    fn new_plot(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()> {
        bindings::new_plot(&self.target, &to_js(traces)?, &to_js(layout)?)
            .map(|_| ())
            .map_err(|e| SubmitError::Render(describe(&e)))
    }

    fn react(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()> {
        bindings::react(&self.target, &to_js(traces)?, &to_js(layout)?)
            .map(|_| ())
            .map_err(|e| SubmitError::Render(describe(&e)))
    }
}

pub struct DocumentWriter {
    document: Document,
}

impl DocumentWriter {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

impl PageDocument for DocumentWriter {
    fn replace_with(&self, text: &str) -> Result<()> {
        let document_error = |e: JsValue| SubmitError::Document(describe(&e));

        let document = self.document.unchecked_ref::<HtmlDocument>();
        document.open().map_err(document_error)?;
        document
            .write(&Array::of1(&JsValue::from_str(text)))
            .map_err(document_error)?;
        document.close().map_err(document_error)
    }
}

/// Toast container; each child element is one Bootstrap toast.
pub struct ToastContainer {
    container: Element,
}

impl ToastContainer {
    pub fn new(container: Element) -> Self {
        Self { container }
    }
}

impl NotificationArea for ToastContainer {
    fn pending(&self) -> usize {
        self.container.children().length() as usize
    }

    fn show(&self, index: usize) -> Result<()> {
        let element = self
            .container
            .children()
            .item(index as u32)
            .ok_or_else(|| SubmitError::Notification(format!("No toast at index {}", index)))?;

        bindings::get_or_create_toast(&element)
            .and_then(|toast| toast.show())
            .map_err(|e| SubmitError::Notification(describe(&e)))
    }
}

pub struct DomSubmitEvent<'a>(pub &'a Event);

impl SubmitEvent for DomSubmitEvent<'_> {
    fn prevent_default(&self) {
        self.0.prevent_default();
    }
}
