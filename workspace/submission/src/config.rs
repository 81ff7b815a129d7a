use serde::{Deserialize, Serialize};

/// How a successful response is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Repaint the chart from scratch (`Plotly.newPlot`).
    #[default]
    NewPlot,
    /// Update the existing chart in place (`Plotly.react`).
    React,
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// URL the form is posted to
    pub endpoint: String,
    /// Drawing call used for responses
    pub render_mode: RenderMode,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            endpoint: "fetch".to_string(),
            render_mode: RenderMode::NewPlot,
        }
    }
}

impl ControllerConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub fn with_render_mode(mut self, render_mode: RenderMode) -> Self {
        self.render_mode = render_mode;
        self
    }
}
