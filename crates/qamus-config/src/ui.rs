use serde::{Deserialize, Serialize};

fn default_max_results() -> usize {
    20
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_max_results")]
    pub max_results: usize,
    /// Print results as JSON lines instead of text
    #[serde(default)]
    pub json: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            max_results: default_max_results(),
            json: false,
        }
    }
}
