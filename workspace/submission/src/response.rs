use common::ChartPayload;
use tracing::{debug, warn};

use crate::error::{Result, SubmitError};
use crate::ports::HttpReply;

/// Status the endpoint answers with when the form does not validate.
pub const BAD_REQUEST: u16 = 400;

/// What the endpoint's reply means for the page.
#[derive(Debug, Clone, PartialEq)]
pub enum ServerResponse {
    /// HTTP 400: the body is an HTML page to show instead of the current one.
    ValidationFailed(String),
    /// Any other status with a decodable trace list.
    Chart { status: u16, payload: ChartPayload },
}

impl ServerResponse {
    /// Classify a reply.
    ///
    /// A 400 is never decoded as JSON. For every other status the body must
    /// decode fully before anything is drawn, so a bad body leaves the chart
    /// as it was.
    pub fn interpret(reply: HttpReply) -> Result<Self> {
        let HttpReply { status, body } = reply;

        if status == BAD_REQUEST {
            debug!(status, bytes = body.len(), "Endpoint rejected the form");
            return Ok(ServerResponse::ValidationFailed(body));
        }

        if !(200..300).contains(&status) {
            warn!(status, "Unexpected status from chart endpoint, decoding body anyway");
        }

        let payload = ChartPayload::from_json(&body)
            .map_err(|source| SubmitError::MalformedPayload { status, source })?;
        Ok(ServerResponse::Chart { status, payload })
    }
}
