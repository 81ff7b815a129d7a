//! In-memory stand-ins for the page, used by the controller tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashSet, VecDeque};
use std::rc::Rc;

use async_trait::async_trait;
use common::{FormSnapshot, PlotLayout, TraceSpec};
use tokio::sync::oneshot;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::config::ControllerConfig;
use crate::controller::{FormSubmissionController, PageHandles};
use crate::error::{Result, SubmitError};
use crate::ports::{
    ChartSurface, FormSource, HttpReply, NotificationArea, PageDocument, SubmitEvent, Transport,
};

/// Initialize tracing for tests with output to STDERR.
///
/// The level comes from RUST_LOG and defaults to WARN. The subscriber is
/// removed when the returned guard is dropped.
pub fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
    let log_level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|level| match level.to_uppercase().as_str() {
            "ERROR" => Some(Level::ERROR),
            "WARN" => Some(Level::WARN),
            "INFO" => Some(Level::INFO),
            "DEBUG" => Some(Level::DEBUG),
            "TRACE" => Some(Level::TRACE),
            _ => None,
        })
        .unwrap_or(Level::WARN);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_default(subscriber)
}

#[derive(Clone, Default)]
pub struct FakeForm {
    fields: Rc<RefCell<FormSnapshot>>,
}

impl FakeForm {
    /// Replace the form contents, as a user editing the inputs would.
    pub fn fill(&self, fields: &[(&str, &str)]) {
        *self.fields.borrow_mut() = fields.iter().copied().collect();
    }
}

impl FormSource for FakeForm {
    fn snapshot(&self) -> Result<FormSnapshot> {
        Ok(self.fields.borrow().clone())
    }
}

/// A scripted reply of the fake endpoint.
pub enum Scripted {
    Reply(HttpReply),
    Fail(String),
    /// Resolves when the test sends the reply through the paired sender.
    Gated(oneshot::Receiver<HttpReply>),
}

#[derive(Clone, Default)]
pub struct FakeTransport {
    script: Rc<RefCell<VecDeque<Scripted>>>,
    requests: Rc<RefCell<Vec<(String, FormSnapshot)>>>,
}

impl FakeTransport {
    pub fn reply(&self, status: u16, body: impl Into<String>) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Reply(HttpReply::new(status, body)));
    }

    pub fn fail(&self, message: &str) {
        self.script
            .borrow_mut()
            .push_back(Scripted::Fail(message.to_string()));
    }

    /// Queue a reply the test releases later.
    pub fn gate(&self) -> oneshot::Sender<HttpReply> {
        let (tx, rx) = oneshot::channel();
        self.script.borrow_mut().push_back(Scripted::Gated(rx));
        tx
    }

    pub fn requests(&self) -> Vec<(String, FormSnapshot)> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Transport for FakeTransport {
    async fn post_form(&self, endpoint: &str, form: &FormSnapshot) -> Result<HttpReply> {
        self.requests
            .borrow_mut()
            .push((endpoint.to_string(), form.clone()));

        let next = self.script.borrow_mut().pop_front();
        match next {
            Some(Scripted::Reply(reply)) => Ok(reply),
            Some(Scripted::Fail(message)) => Err(SubmitError::Transport(message)),
            Some(Scripted::Gated(rx)) => rx
                .await
                .map_err(|_| SubmitError::Transport("connection dropped".to_string())),
            None => Err(SubmitError::Transport("no reply scripted".to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawKind {
    NewPlot,
    React,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Draw {
    pub kind: DrawKind,
    pub traces: Vec<TraceSpec>,
    pub layout: PlotLayout,
}

#[derive(Clone, Default)]
pub struct FakeChart {
    draws: Rc<RefCell<Vec<Draw>>>,
    failing: Rc<Cell<bool>>,
}

impl FakeChart {
    pub fn draws(&self) -> Vec<Draw> {
        self.draws.borrow().clone()
    }

    /// Traces on screen, `None` before the first draw.
    pub fn displayed(&self) -> Option<Vec<TraceSpec>> {
        self.draws.borrow().last().map(|d| d.traces.clone())
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.set(failing);
    }

    fn record(&self, kind: DrawKind, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()> {
        if self.failing.get() {
            return Err(SubmitError::Render("Plotly is not defined".to_string()));
        }
        self.draws.borrow_mut().push(Draw {
            kind,
            traces: traces.to_vec(),
            layout: layout.clone(),
        });
        Ok(())
    }
}

impl ChartSurface for FakeChart {
    fn new_plot(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()> {
        self.record(DrawKind::NewPlot, traces, layout)
    }

    fn react(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()> {
        self.record(DrawKind::React, traces, layout)
    }
}

#[derive(Clone, Default)]
pub struct FakeDocument {
    writes: Rc<RefCell<Vec<String>>>,
}

impl FakeDocument {
    pub fn content(&self) -> Option<String> {
        self.writes.borrow().last().cloned()
    }

    pub fn writes(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl PageDocument for FakeDocument {
    fn replace_with(&self, text: &str) -> Result<()> {
        self.writes.borrow_mut().push(text.to_string());
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct FakeToasts {
    count: usize,
    broken: HashSet<usize>,
    shown: Rc<RefCell<Vec<usize>>>,
}

impl FakeToasts {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Self::default()
        }
    }

    /// Make the toast at `index` throw when shown.
    pub fn broken_at(mut self, index: usize) -> Self {
        self.broken.insert(index);
        self
    }

    pub fn shown(&self) -> Vec<usize> {
        self.shown.borrow().clone()
    }
}

impl NotificationArea for FakeToasts {
    fn pending(&self) -> usize {
        self.count
    }

    fn show(&self, index: usize) -> Result<()> {
        if self.broken.contains(&index) {
            return Err(SubmitError::Notification(format!("toast {} has no element", index)));
        }
        self.shown.borrow_mut().push(index);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeEvent {
    prevented: Cell<bool>,
}

impl FakeEvent {
    pub fn default_prevented(&self) -> bool {
        self.prevented.get()
    }
}

impl SubmitEvent for FakeEvent {
    fn prevent_default(&self) {
        self.prevented.set(true);
    }
}

/// A whole fake page. Fields are shared handles, so assertions can be made
/// after the controller has taken ownership of its copies.
#[derive(Clone, Default)]
pub struct TestPage {
    pub form: FakeForm,
    pub transport: FakeTransport,
    pub chart: FakeChart,
    pub document: FakeDocument,
    pub toasts: Option<FakeToasts>,
}

impl TestPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_toasts(mut self, toasts: FakeToasts) -> Self {
        self.toasts = Some(toasts);
        self
    }

    pub fn controller(&self, config: ControllerConfig) -> FormSubmissionController {
        let notifications = self
            .toasts
            .clone()
            .map(|t| Box::new(t) as Box<dyn NotificationArea>);

        FormSubmissionController::new(
            config,
            PageHandles {
                form: Box::new(self.form.clone()),
                transport: Box::new(self.transport.clone()),
                chart: Box::new(self.chart.clone()),
                document: Box::new(self.document.clone()),
                notifications,
            },
        )
    }
}
