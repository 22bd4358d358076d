//! Score models.
//!
//! A match draws on several named score types at once ("affinity", "bid",
//! "recommendation", ...). Each type carries its own weight and a default
//! that stands in for pairs without an edge.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One raw score for a (paper, reviewer) pair.
///
/// Either `weight` or `label` must be present. A label is converted to a
/// number through the owning [`ScoreSpec::translate_map`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEdge {
    /// Paper id.
    pub paper: String,
    /// Reviewer id.
    pub reviewer: String,
    /// Numeric score. Takes precedence over `label`.
    pub weight: Option<f64>,
    /// Categorical score (e.g. a bid such as "Very High").
    pub label: Option<String>,
}

/// Weight and default of a score type, as seen by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightSpec {
    /// Multiplier applied to the raw value.
    pub weight: f64,
    /// Raw value assumed when a pair has no edge.
    pub default: f64,
}

/// A named score type with its edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreSpec {
    /// Score type name.
    pub name: String,
    /// Multiplier applied to every raw value of this type.
    pub weight: f64,
    /// Raw value for pairs without an edge. `None` means 0.
    pub default: Option<f64>,
    /// Label → number conversion for categorical edges.
    #[serde(default)]
    pub translate_map: HashMap<String, f64>,
    /// Raw score edges.
    #[serde(default)]
    pub edges: Vec<ScoreEdge>,
}

impl ScoreEdge {
    /// Creates a numeric score edge.
    pub fn new(paper: impl Into<String>, reviewer: impl Into<String>, weight: f64) -> Self {
        Self {
            paper: paper.into(),
            reviewer: reviewer.into(),
            weight: Some(weight),
            label: None,
        }
    }

    /// Creates a label-only score edge.
    pub fn labeled(
        paper: impl Into<String>,
        reviewer: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            paper: paper.into(),
            reviewer: reviewer.into(),
            weight: None,
            label: Some(label.into()),
        }
    }
}

impl ScoreSpec {
    /// Creates a score type with the given weight and no default.
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
            default: None,
            translate_map: HashMap::new(),
            edges: Vec::new(),
        }
    }

    /// Sets the default raw value.
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = Some(default);
        self
    }

    /// Adds a label translation.
    pub fn with_translation(mut self, label: impl Into<String>, value: f64) -> Self {
        self.translate_map.insert(label.into(), value);
        self
    }

    /// Adds a numeric edge.
    pub fn with_edge(mut self, paper: impl Into<String>, reviewer: impl Into<String>, weight: f64) -> Self {
        self.edges.push(ScoreEdge::new(paper, reviewer, weight));
        self
    }

    /// Adds an arbitrary edge.
    pub fn with_score_edge(mut self, edge: ScoreEdge) -> Self {
        self.edges.push(edge);
        self
    }

    /// The aggregator's view of this score type.
    pub fn weight_spec(&self) -> WeightSpec {
        WeightSpec {
            weight: self.weight,
            default: self.default.unwrap_or(0.0),
        }
    }

    /// Numeric value of an edge: its weight, else its translated label.
    ///
    /// Returns `None` when neither is available.
    pub fn edge_value(&self, edge: &ScoreEdge) -> Option<f64> {
        if let Some(w) = edge.weight {
            return Some(w);
        }
        edge.label
            .as_ref()
            .and_then(|label| self.translate_map.get(label))
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_spec_default_is_zero() {
        let spec = ScoreSpec::new("affinity", 1.0);
        assert_eq!(spec.weight_spec().default, 0.0);
        let spec = spec.with_default(0.5);
        assert!((spec.weight_spec().default - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_edge_value_prefers_weight() {
        let spec = ScoreSpec::new("bid", 1.0).with_translation("High", 0.5);
        let mut edge = ScoreEdge::labeled("P1", "R1", "High");
        assert_eq!(spec.edge_value(&edge), Some(0.5));

        edge.weight = Some(0.9);
        assert_eq!(spec.edge_value(&edge), Some(0.9));

        let unknown = ScoreEdge::labeled("P1", "R1", "Neutral");
        assert_eq!(spec.edge_value(&unknown), None);
    }
}
