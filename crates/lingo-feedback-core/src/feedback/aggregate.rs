//! Weighted overall score.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::{MetricSet, unit};

/// Per-metric weights of the overall score. Weights sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MetricWeights {
    /// Weight of accuracy.
    pub accuracy: f64,
    /// Weight of fluency.
    pub fluency: f64,
    /// Weight of pronunciation.
    pub pronunciation: f64,
    /// Weight of vocabulary.
    pub vocabulary: f64,
    /// Weight of grammar.
    pub grammar: f64,
}

/// The weights every report uses.
pub const WEIGHTS: MetricWeights = MetricWeights {
    accuracy: 0.3,
    fluency: 0.2,
    pronunciation: 0.2,
    vocabulary: 0.15,
    grammar: 0.15,
};

/// Weighted sum of the metrics under [`WEIGHTS`].
pub fn overall_score(metrics: &MetricSet) -> f64 {
    let w = WEIGHTS;
    unit(
        metrics.accuracy * w.accuracy
            + metrics.fluency * w.fluency
            + metrics.pronunciation * w.pronunciation
            + metrics.vocabulary * w.vocabulary
            + metrics.grammar * w.grammar,
    )
}
