//! Wire types shared between the submission controller and the browser bundle.
//! These mirror the JSON the chart endpoint answers with and the options the
//! plotting library accepts, so neither side re-declares the shapes.

mod form;
mod payload;

pub use form::{FormField, FormSnapshot};
pub use payload::{ChartPayload, PlotLayout, TraceSpec};
