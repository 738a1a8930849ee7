use tracing::warn;

use super::capability::SentimentClassifier;
use crate::types::review::{PolarityBreakdown, SentimentScore};

/// Per-segment sentiment. Implementations never fail: anything they cannot
/// score comes back as `SentimentScore::degraded()`.
pub trait SentimentScorer {
    fn name(&self) -> &'static str;

    /// Score of one segment plus the polarity shares behind it, when the
    /// variant has them.
    fn score_segment(&self, text: &str) -> (SentimentScore, Option<PolarityBreakdown>);

    fn score(&self, text: &str) -> SentimentScore {
        self.score_segment(text).0
    }

    /// Review-level shares. By default the mean of the segment shares.
    fn breakdown(&self, _text: &str, segment_shares: &[PolarityBreakdown]) -> Option<PolarityBreakdown> {
        PolarityBreakdown::mean(segment_shares)
    }
}

/// Scorer that hands each segment to an external classifier.
pub struct ModelScorer {
    classifier: Box<dyn SentimentClassifier>,
}

impl ModelScorer {
    pub fn new(classifier: impl SentimentClassifier + 'static) -> Self {
        ModelScorer { classifier: Box::new(classifier) }
    }
}

impl SentimentScorer for ModelScorer {
    fn name(&self) -> &'static str {
        "model"
    }

    fn score_segment(&self, text: &str) -> (SentimentScore, Option<PolarityBreakdown>) {
        if text.trim().is_empty() {
            return (SentimentScore::degraded(), None);
        }
        match self.classifier.classify_full(text) {
            Ok(full) => (SentimentScore::new(full.label, full.confidence), Some(full.probabilities)),
            Err(e) => {
                warn!(error = %e, "sentiment classifier failed, scoring segment as neutral");
                (SentimentScore::degraded(), None)
            }
        }
    }
}
