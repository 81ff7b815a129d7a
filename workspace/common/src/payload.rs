use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One plotted series.
///
/// The endpoint decides its shape (usually `{x, y, name, type}`); it is handed
/// to the plotting library untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TraceSpec(pub Value);

impl TraceSpec {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Series name shown in the legend, when the trace carries one.
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }
}

impl From<Value> for TraceSpec {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Success body of the chart endpoint: `{ "info": [trace, ...] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartPayload {
    pub info: Vec<TraceSpec>,
}

impl ChartPayload {
    /// The payload drawn on page load.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Decode a response body. `info` must be an array; its elements are not
    /// inspected.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(body)
    }

    pub fn traces(&self) -> &[TraceSpec] {
        &self.info
    }

    pub fn len(&self) -> usize {
        self.info.len()
    }

    pub fn is_empty(&self) -> bool {
        self.info.is_empty()
    }

    /// Names of the traces that have one, in order.
    pub fn trace_names(&self) -> Vec<&str> {
        self.info.iter().filter_map(TraceSpec::name).collect()
    }
}

/// Layout options passed with every draw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotLayout {
    pub showlegend: bool,
}

impl Default for PlotLayout {
    fn default() -> Self {
        Self { showlegend: true }
    }
}
