//! The two external capabilities the pipeline treats as black boxes: a
//! sentiment classifier and a natural-language-inference (entailment) model.
//!
//! Both traits are implemented for plain closures so callers can plug in any
//! backend (a hosted model, a local runtime, a test stub) without a wrapper.

use serde::{Deserialize, Serialize};

use crate::error::CapabilityError;
use crate::types::review::{Label, PolarityBreakdown};

/// Winning label, its confidence, and the three-way distribution behind it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label: Label,
    pub confidence: f32,
    pub probabilities: PolarityBreakdown,
}

impl Classification {
    /// For classifiers that only report a winner: the remaining mass is
    /// split evenly between the other two labels.
    pub fn from_label(label: Label, confidence: f32) -> Self {
        Classification { label, confidence, probabilities: PolarityBreakdown::concentrated(label, confidence) }
    }
}

pub trait SentimentClassifier {
    /// Label and confidence in [0, 1] for `text`.
    fn classify(&self, text: &str) -> Result<(Label, f32), CapabilityError>;

    fn classify_full(&self, text: &str) -> Result<Classification, CapabilityError> {
        let (label, confidence) = self.classify(text)?;
        Ok(Classification::from_label(label, confidence))
    }
}

impl<F> SentimentClassifier for F
where
    F: Fn(&str) -> Result<(Label, f32), CapabilityError>,
{
    fn classify(&self, text: &str) -> Result<(Label, f32), CapabilityError> {
        self(text)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Entailment,
    Neutral,
    Contradiction,
}

impl Relation {
    /// Understands both spelled-out NLI labels and the `LABEL_n` ids used by
    /// MNLI checkpoints (0 = contradiction, 1 = neutral, 2 = entailment).
    pub fn from_model_label(raw: &str) -> Option<Relation> {
        match raw.trim().to_uppercase().as_str() {
            "ENTAILMENT" | "LABEL_2" => Some(Relation::Entailment),
            "NEUTRAL" | "LABEL_1" => Some(Relation::Neutral),
            "CONTRADICTION" | "LABEL_0" => Some(Relation::Contradiction),
            _ => None,
        }
    }
}

pub trait EntailmentModel {
    /// How `premise` relates to `hypothesis`.
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<Relation, CapabilityError>;
}

impl<F> EntailmentModel for F
where
    F: Fn(&str, &str) -> Result<Relation, CapabilityError>,
{
    fn entails(&self, premise: &str, hypothesis: &str) -> Result<Relation, CapabilityError> {
        self(premise, hypothesis)
    }
}
