use submission::{
    log_outcome, ControllerConfig, FormSubmissionController, NotificationArea, PageHandles,
    RenderMode,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlFormElement, Window};

use crate::dom::{
    describe, DocumentWriter, DomForm, DomSubmitEvent, FetchTransport, PlotlyChart,
    ToastContainer,
};
use crate::settings::AppSettings;

/// Endpoint used when the page names none.
pub const DEFAULT_ENDPOINT: &str = "fetch";

/// Which of the two chart pages the bundle was loaded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageVariant {
    /// Form and chart only; every answer repaints the chart.
    Form,
    /// Form, chart and toasts; answers update the chart in place.
    Index,
}

impl PageVariant {
    pub fn detect(has_toasts: bool) -> Self {
        if has_toasts {
            PageVariant::Index
        } else {
            PageVariant::Form
        }
    }

    pub fn render_mode(self) -> RenderMode {
        match self {
            PageVariant::Form => RenderMode::NewPlot,
            PageVariant::Index => RenderMode::React,
        }
    }
}

/// First non-blank candidate, in priority order.
pub fn pick_endpoint<I>(candidates: I) -> String
where
    I: IntoIterator<Item = Option<String>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(|c| c.trim().to_string())
        .find(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
}

/// Settings, then `data-fetch-href` on the form, then the template's global
/// `fetch_href`, then the form's own `action`.
fn resolve_endpoint(settings: &AppSettings, window: &Window, form: &HtmlFormElement) -> String {
    let global = js_sys::Reflect::get(window.as_ref(), &JsValue::from_str("fetch_href"))
        .ok()
        .and_then(|v| v.as_string());

    pick_endpoint([
        settings.endpoint.clone(),
        form.get_attribute("data-fetch-href"),
        global,
        form.get_attribute("action"),
    ])
}

fn page_error(message: &str) -> JsValue {
    JsValue::from_str(message)
}

fn find(document: &Document, selector: &str) -> Result<Element, JsValue> {
    document
        .query_selector(selector)?
        .ok_or_else(|| page_error(&format!("No element matches '{}'", selector)))
}

/// Attach once the page, and with it Plotly, has loaded.
pub fn mount_when_loaded(settings: AppSettings) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| page_error("No window"))?;
    let document = window.document().ok_or_else(|| page_error("No document"))?;

    if document.ready_state() == "complete" {
        log::debug!("Document already loaded, mounting now");
        return mount(&settings).map(|_| ());
    }

    log::debug!("Waiting for the window load event");
    let on_load = Closure::once(move |_event: Event| {
        if let Err(err) = mount(&settings) {
            log::error!("Failed to attach to page: {}", describe(&err));
        }
    });
    window.add_event_listener_with_callback("load", on_load.as_ref().unchecked_ref())?;
    on_load.forget();
    Ok(())
}

/// Build the controller over the page, draw the initial chart and take over
/// the form.
pub fn mount(settings: &AppSettings) -> Result<FormSubmissionController, JsValue> {
    let window = web_sys::window().ok_or_else(|| page_error("No window"))?;
    let document = window.document().ok_or_else(|| page_error("No document"))?;

    let form: HtmlFormElement = find(&document, &settings.form_selector)?
        .dyn_into()
        .map_err(|_| page_error(&format!("'{}' is not a form", settings.form_selector)))?;
    let graph = find(&document, &settings.graph_selector)?;
    let toasts = document.query_selector(&settings.toasts_selector)?;

    let variant = PageVariant::detect(toasts.is_some());
    let endpoint = resolve_endpoint(settings, &window, &form);
    log::info!("Mounting {:?} page, endpoint: {}", variant, endpoint);

    let config = ControllerConfig::new(endpoint).with_render_mode(variant.render_mode());
    let controller = FormSubmissionController::new(
        config,
        PageHandles {
            form: Box::new(DomForm::new(form.clone())),
            transport: Box::new(FetchTransport),
            chart: Box::new(PlotlyChart::new(graph)),
            document: Box::new(DocumentWriter::new(document)),
            notifications: toasts
                .map(|el| Box::new(ToastContainer::new(el)) as Box<dyn NotificationArea>),
        },
    );

    match controller.initialize() {
        Ok(shown) => log::debug!("Initial chart drawn, {} notification(s) shown", shown),
        Err(err) => log::error!("Failed to draw initial chart: {}", err),
    }

    attach_submit(&form, controller.clone())?;
    Ok(controller)
}

fn attach_submit(
    form: &HtmlFormElement,
    controller: FormSubmissionController,
) -> Result<(), JsValue> {
    let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        log::trace!("Form submit intercepted");
        let pending = controller.submit_form(&DomSubmitEvent(&event));
        wasm_bindgen_futures::spawn_local(async move {
            log_outcome(&pending.await);
        });
    });
    form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())?;
    on_submit.forget();
    Ok(())
}
