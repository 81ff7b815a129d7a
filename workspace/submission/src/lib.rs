//! Form submission controller for chart pages.
//!
//! The controller intercepts a form's submission, posts its fields to the
//! chart endpoint and redraws the chart from the `{ "info": [...] }` reply.
//! A `400` reply replaces the whole document with the returned page. Every
//! failure comes back as a [`SubmitError`] for the caller to log.
//!
//! The page itself (form, `fetch`, plotting library, toasts) is reached only
//! through the traits in [`ports`], so the flow runs the same in the browser
//! and in tests.

pub mod config;
pub mod controller;
pub mod error;
pub mod ports;
pub mod response;
pub mod state;

#[cfg(test)]
mod test_utils;

pub use config::{ControllerConfig, RenderMode};
pub use controller::{log_outcome, FormSubmissionController, PageHandles, SubmitOutcome};
pub use error::{Result, SubmitError};
pub use ports::{
    ChartSurface, FormSource, HttpReply, NotificationArea, PageDocument, SubmitEvent, Transport,
};
pub use response::{ServerResponse, BAD_REQUEST};
pub use state::{Phase, SubmissionTicket, SubmissionTracker};
