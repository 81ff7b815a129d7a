//! Page collaborators the controller drives.
//!
//! The browser bundle implements these over the DOM, `fetch`, Plotly and
//! Bootstrap; tests implement them with in-memory fakes.

use async_trait::async_trait;
use common::{FormSnapshot, PlotLayout, TraceSpec};

use crate::error::Result;

/// Raw reply of the chart endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// The form being taken over.
pub trait FormSource {
    /// Current field values, read fresh on every call.
    fn snapshot(&self) -> Result<FormSnapshot>;
}

/// Sends the form to the endpoint.
#[async_trait(?Send)]
pub trait Transport {
    /// POST `form` as multipart form data. Any status counts as a reply;
    /// only a failed exchange is an error.
    async fn post_form(&self, endpoint: &str, form: &FormSnapshot) -> Result<HttpReply>;
}

/// The chart target element and the plotting library behind it.
pub trait ChartSurface {
    /// Draw from scratch, discarding whatever was there.
    fn new_plot(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()>;

    /// Update the existing chart in place.
    fn react(&self, traces: &[TraceSpec], layout: &PlotLayout) -> Result<()>;
}

/// The whole page document.
pub trait PageDocument {
    /// Replace the document content with `text`, verbatim.
    fn replace_with(&self, text: &str) -> Result<()>;
}

/// Container of pre-rendered notifications.
pub trait NotificationArea {
    /// Number of notifications present in the container.
    fn pending(&self) -> usize;

    /// Show the notification at `index` (document order).
    fn show(&self, index: usize) -> Result<()>;
}

/// A form submission event.
pub trait SubmitEvent {
    /// Stop the browser from submitting the form itself.
    fn prevent_default(&self);
}
