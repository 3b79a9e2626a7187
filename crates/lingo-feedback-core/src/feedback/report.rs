//! The feedback report returned for every evaluated response.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::metrics::MetricSet;
use super::suggestions::Suggestion;
use crate::language::Language;

/// Metrics, suggestions and overall score for one response.
///
/// Serializes as `{metrics, suggestions, overall_score, language}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FeedbackReport {
    /// Individual metric scores.
    pub metrics: MetricSet,
    /// Suggestions in generation order.
    pub suggestions: Vec<Suggestion>,
    /// Weighted combination of the metrics.
    pub overall_score: f64,
    /// Language the analysis ran in, after any fallback.
    pub language: Language,
}

impl FeedbackReport {
    /// Whether the overall score reaches `min_score`.
    pub fn passes(&self, min_score: f64) -> bool {
        self.overall_score >= min_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(overall_score: f64) -> FeedbackReport {
        FeedbackReport {
            metrics: MetricSet {
                accuracy: 1.0,
                fluency: 0.0,
                pronunciation: 0.9,
                vocabulary: 0.0,
                grammar: 0.7,
            },
            suggestions: Vec::new(),
            overall_score,
            language: Language::Es,
        }
    }

    #[test]
    fn json_shape() {
        let json = serde_json::to_value(report(0.585)).unwrap();
        for key in ["metrics", "suggestions", "overall_score", "language"] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert_eq!(json["language"], "es");
        assert_eq!(json["metrics"]["pronunciation"], 0.9);
    }

    #[test]
    fn passes_gate_inclusively() {
        assert!(report(0.6).passes(0.6));
        assert!(!report(0.59).passes(0.6));
    }
}
