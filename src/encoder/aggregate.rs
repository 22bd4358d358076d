//! Weighted combination of score types.
//!
//! aggregate(r, p) = Σ_t weight_t · (score_t(r, p) if present else default_t)
//!
//! Only score types known to the aggregator contribute. Unknown names in a
//! raw score map are ignored.

use std::collections::{BTreeMap, HashMap};

use crate::models::{ScoreSpec, WeightSpec};

/// Combines named raw scores into one scalar per pair.
///
/// Types are kept in name order so the floating-point sum is evaluated in
/// the same order on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostAggregator {
    weights: BTreeMap<String, WeightSpec>,
}

impl CostAggregator {
    /// Creates an aggregator from a weight mapping.
    pub fn new(weights: impl IntoIterator<Item = (String, WeightSpec)>) -> Self {
        Self {
            weights: weights.into_iter().collect(),
        }
    }

    /// Creates an aggregator from score specifications.
    pub fn from_specs(specs: &[ScoreSpec]) -> Self {
        Self::new(specs.iter().map(|s| (s.name.clone(), s.weight_spec())))
    }

    /// Score type names, in evaluation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.weights.keys().map(String::as_str)
    }

    /// Number of score types.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    /// Whether no score type is configured.
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    /// Aggregates a raw score map for one pair.
    pub fn aggregate(&self, raw: &HashMap<String, f64>) -> f64 {
        self.weights
            .iter()
            .map(|(name, spec)| spec.weight * raw.get(name).copied().unwrap_or(spec.default))
            .sum()
    }

    /// Aggregates values given positionally in [`names`](Self::names) order.
    ///
    /// `None` stands for an absent edge.
    pub fn combine(&self, values: &[Option<f64>]) -> f64 {
        self.weights
            .values()
            .zip(values)
            .map(|(spec, value)| spec.weight * value.unwrap_or(spec.default))
            .sum()
    }

    /// Effective raw value of a type: the edge value, else the default.
    pub fn effective(&self, name: &str, value: Option<f64>) -> f64 {
        match value {
            Some(v) => v,
            None => self.weights.get(name).map_or(0.0, |s| s.default),
        }
    }
}
