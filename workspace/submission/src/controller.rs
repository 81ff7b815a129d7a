use std::future::Future;
use std::rc::Rc;

use common::{ChartPayload, PlotLayout};
use tracing::{debug, error, info, instrument, warn};

use crate::config::{ControllerConfig, RenderMode};
use crate::error::Result;
use crate::ports::{
    ChartSurface, FormSource, NotificationArea, PageDocument, SubmitEvent, Transport,
};
use crate::response::ServerResponse;
use crate::state::{Phase, SubmissionTracker};

/// How a submission ended when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The chart now shows the returned traces.
    Rendered { status: u16, traces: usize },
    /// The endpoint answered 400 and the document was replaced by its body.
    ValidationFailed { bytes: usize },
}

/// Everything on the page the controller works with.
pub struct PageHandles {
    pub form: Box<dyn FormSource>,
    pub transport: Box<dyn Transport>,
    pub chart: Box<dyn ChartSurface>,
    pub document: Box<dyn PageDocument>,
    /// Only present on pages with a toast container
    pub notifications: Option<Box<dyn NotificationArea>>,
}

struct Inner {
    config: ControllerConfig,
    page: PageHandles,
    tracker: SubmissionTracker,
}

/// Takes over a form: posts it to the endpoint and draws the answer.
///
/// Cloning is cheap and every clone drives the same form and chart, so a
/// clone can be moved into each event callback.
#[derive(Clone)]
pub struct FormSubmissionController {
    inner: Rc<Inner>,
}

impl FormSubmissionController {
    pub fn new(config: ControllerConfig, page: PageHandles) -> Self {
        Self {
            inner: Rc::new(Inner {
                config,
                page,
                tracker: SubmissionTracker::new(),
            }),
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.inner.config
    }

    pub fn phase(&self) -> Phase {
        self.inner.tracker.phase()
    }

    /// Number of submissions started since the page loaded.
    pub fn submissions(&self) -> u64 {
        self.inner.tracker.issued()
    }

    /// Page-load step: draw an empty chart and show pending notifications.
    ///
    /// Notifications are shown even when the chart could not be drawn.
    /// Returns how many notifications were shown.
    pub fn initialize(&self) -> Result<usize> {
        info!(mode = ?self.inner.config.render_mode, "Initializing chart page");
        let drawn = self
            .inner
            .page
            .chart
            .new_plot(ChartPayload::empty().traces(), &PlotLayout::default());
        let shown = self.show_notifications();
        drawn.map(|_| shown)
    }

    fn show_notifications(&self) -> usize {
        let Some(area) = &self.inner.page.notifications else {
            return 0;
        };

        let pending = area.pending();
        let mut shown = 0;
        for index in 0..pending {
            match area.show(index) {
                Ok(()) => shown += 1,
                Err(err) => warn!(index, %err, "Failed to show notification"),
            }
        }
        debug!(shown, pending, "Notifications shown");
        shown
    }

    /// Take over a submit event.
    ///
    /// The native submission is suppressed before this returns; the request
    /// itself only starts once the returned future is polled.
    pub fn submit_form(
        &self,
        event: &dyn SubmitEvent,
    ) -> impl Future<Output = Result<SubmitOutcome>> + 'static {
        event.prevent_default();
        let controller = self.clone();
        async move { controller.send_data().await }
    }

    /// Post the current form and act on the reply.
    #[instrument(skip(self), fields(endpoint = %self.inner.config.endpoint))]
    pub async fn send_data(&self) -> Result<SubmitOutcome> {
        let ticket = self.inner.tracker.begin();
        let submission = ticket.id();

        let form = self.inner.page.form.snapshot()?;
        debug!(submission, fields = form.len(), "Posting form");

        let reply = self
            .inner
            .page
            .transport
            .post_form(&self.inner.config.endpoint, &form)
            .await?;
        debug!(submission, status = reply.status, "Reply received");

        match ServerResponse::interpret(reply)? {
            ServerResponse::ValidationFailed(text) => {
                warn!(submission, "Form rejected, replacing document with the response");
                self.inner.page.document.replace_with(&text)?;
                Ok(SubmitOutcome::ValidationFailed { bytes: text.len() })
            }
            ServerResponse::Chart { status, payload } => {
                self.update_chart(&payload)?;
                Ok(SubmitOutcome::Rendered {
                    status,
                    traces: payload.len(),
                })
            }
        }
    }

    /// Redraw the chart with `payload`, legend on.
    pub fn update_chart(&self, payload: &ChartPayload) -> Result<()> {
        debug!(traces = payload.len(), names = ?payload.trace_names(), "Got chart payload");

        let chart = &self.inner.page.chart;
        let layout = PlotLayout::default();
        match self.inner.config.render_mode {
            RenderMode::NewPlot => chart.new_plot(payload.traces(), &layout),
            RenderMode::React => chart.react(payload.traces(), &layout),
        }
    }
}

/// Log how a submission ended. Failures stop here.
pub fn log_outcome(result: &Result<SubmitOutcome>) {
    match result {
        Ok(SubmitOutcome::Rendered { status, traces }) => {
            info!(status, traces, "Chart updated")
        }
        Ok(SubmitOutcome::ValidationFailed { bytes }) => {
            info!(bytes, "Document replaced by validation response")
        }
        Err(err) => error!(%err, "Form submission failed"),
    }
}
