//! Serializable description of an experiment: an initial graph, a rule and
//! the runner settings.
//!
//! ```json
//! {
//!   "meta": { "name": "rule-2236-growth", "version": "1.0" },
//!   "rule": { "degree": 3, "number": 2236 },
//!   "initial": { "adjacency": [[0, 1, 1, 1], ...], "state": [1, 0, 0, 0] },
//!   "config": { "max_ticks": 100, "history_window": 16 }
//! }
//! ```

use gra_core::{generators, Graph};
use serde::{Deserialize, Serialize};

use crate::automaton::{AutomatonConfig, GraphAutomaton};
use crate::error::AutomatonResult;
use crate::rule::RuleCode;

/// Root document of an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentDescription {
    /// Metadata about the experiment.
    pub meta: ExperimentMeta,
    /// Rule applied at every tick.
    pub rule: RuleCode,
    /// Generation 0.
    pub initial: Graph,
    /// Runner settings.
    #[serde(default)]
    pub config: AutomatonConfig,
}

/// Metadata about the experiment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentMeta {
    /// Name of the experiment.
    pub name: String,
    /// Version of the description schema.
    #[serde(default = "default_version")]
    pub version: String,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl ExperimentDescription {
    /// Create a description with default runner settings.
    pub fn new(name: impl Into<String>, rule: RuleCode, initial: Graph) -> Self {
        Self {
            meta: ExperimentMeta {
                name: name.into(),
                version: default_version(),
                description: None,
            },
            rule,
            initial,
            config: AutomatonConfig::default(),
        }
    }

    /// Growth of the ten-vertex cubic graph under rule 2236.
    pub fn sample() -> AutomatonResult<Self> {
        let initial = generators::cubic_ten(generators::CUBIC_TEN_STATE.to_vec())?;
        let rule = RuleCode::new(3, 2236)?;
        let mut description = Self::new("rule-2236-growth", rule, initial);
        description.meta.description =
            Some("Ten-vertex cubic graph evolved under degree-3 rule 2236".to_string());
        description.config.max_order = Some(10_000);
        Ok(description)
    }

    /// Set the runner settings.
    pub fn with_config(mut self, config: AutomatonConfig) -> Self {
        self.config = config;
        self
    }

    /// Build a runner positioned at generation 0.
    pub fn build_automaton(&self) -> AutomatonResult<GraphAutomaton> {
        GraphAutomaton::with_config(self.initial.clone(), self.rule, self.config.clone())
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> AutomatonResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Deserialize from JSON; the rule and graph are validated on the way in.
    pub fn from_json(json: &str) -> AutomatonResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
