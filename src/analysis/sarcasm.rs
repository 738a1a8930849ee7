use std::collections::HashSet;

use tracing::{debug, warn};

use super::capability::{EntailmentModel, Relation};
use crate::config::SarcasmConfig;
use crate::parsing::tokenize;
use crate::types::review::{Label, SarcasmCue, SarcasmFlag};

pub const POSITIVE_HYPOTHESIS: &str = "This review is positive.";
pub const NEGATIVE_HYPOTHESIS: &str = "This review is negative.";

/// Review-level sarcasm check: an optional entailment probe plus surface
/// keyword cues, OR-ed together.
pub struct SarcasmDetector {
    praise_words: HashSet<String>,
    negative_outcomes: HashSet<String>,
    window: usize,
    min_exclamations: usize,
    entailment: Option<Box<dyn EntailmentModel>>,
}

impl SarcasmDetector {
    pub fn new(config: &SarcasmConfig) -> Self {
        let normalise = |words: &[String]| words.iter().map(|w| w.trim().to_lowercase()).collect::<HashSet<_>>();
        SarcasmDetector {
            praise_words: normalise(&config.praise_words),
            negative_outcomes: normalise(&config.negative_outcomes),
            window: config.window,
            min_exclamations: config.min_exclamations,
            entailment: None,
        }
    }

    pub fn with_entailment(mut self, model: impl EntailmentModel + 'static) -> Self {
        self.entailment = Some(Box::new(model));
        self
    }

    pub fn uses_entailment(&self) -> bool {
        self.entailment.is_some()
    }

    /// Runs every cue over `review`. `surface` is the dominant polarity the
    /// review shows before any sarcasm handling; it picks the hypothesis the
    /// entailment probe must contradict. A Neutral surface skips the probe.
    pub fn detect(&self, review: &str, surface: Label) -> SarcasmFlag {
        let mut cues = Vec::new();
        if let Some(cue) = self.entailment_cue(review, surface) {
            cues.push(cue);
        }
        let tokens = tokenize(review);
        if let Some(cue) = self.praise_near_outcome(&tokens) {
            cues.push(cue);
        }
        if let Some(cue) = self.exclamatory_outcome(review, &tokens) {
            cues.push(cue);
        }
        if !cues.is_empty() {
            debug!(cues = ?cues.iter().map(SarcasmCue::name).collect::<Vec<_>>(), "sarcasm cues fired");
        }
        SarcasmFlag::from_cues(cues)
    }

    fn probe(&self, model: &dyn EntailmentModel, premise: &str, hypothesis: &str) -> Relation {
        match model.entails(premise, hypothesis) {
            Ok(relation) => relation,
            Err(e) => {
                warn!(error = %e, hypothesis, "entailment model failed, treating probe as neutral");
                Relation::Neutral
            }
        }
    }

    fn entailment_cue(&self, review: &str, surface: Label) -> Option<SarcasmCue> {
        let model = self.entailment.as_deref()?;
        let hypothesis = match surface {
            Label::Positive => POSITIVE_HYPOTHESIS,
            Label::Negative => NEGATIVE_HYPOTHESIS,
            Label::Neutral => return None,
        };
        let relation = self.probe(model, review, hypothesis);
        debug!(?relation, ?surface, "entailment probe");
        (relation == Relation::Contradiction).then_some(SarcasmCue::EntailmentContradiction { hypothesis: surface })
    }

    fn praise_near_outcome(&self, tokens: &[String]) -> Option<SarcasmCue> {
        for (i, token) in tokens.iter().enumerate() {
            if !self.praise_words.contains(token) {
                continue;
            }
            // up to `window` words between the praise word and the outcome
            let start = i.saturating_sub(self.window + 1);
            let end = (i + self.window + 2).min(tokens.len());
            if let Some(outcome) = tokens[start..end].iter().find(|t| self.negative_outcomes.contains(*t)) {
                return Some(SarcasmCue::PraiseNearNegativeOutcome {
                    praise: token.clone(),
                    outcome: outcome.clone(),
                });
            }
        }
        None
    }

    fn exclamatory_outcome(&self, review: &str, tokens: &[String]) -> Option<SarcasmCue> {
        let exclamations = review.chars().filter(|c| *c == '!').count();
        if exclamations == 0 || exclamations < self.min_exclamations {
            return None;
        }
        tokens
            .iter()
            .find(|t| self.negative_outcomes.contains(*t))
            .map(|outcome| SarcasmCue::ExclamatoryOutcome { exclamations, outcome: outcome.clone() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CapabilityError;
    use std::cell::Cell;
    use std::rc::Rc;

    fn detector() -> SarcasmDetector {
        SarcasmDetector::new(&SarcasmConfig::default())
    }

    fn contradicts(hypothesis: &'static str) -> impl Fn(&str, &str) -> Result<Relation, CapabilityError> {
        move |_: &str, h: &str| {
            if h == hypothesis {
                Ok(Relation::Contradiction)
            } else {
                Ok(Relation::Entailment)
            }
        }
    }

    #[test]
    fn praise_next_to_bad_outcome() {
        let flag = detector().detect("Great, another software update that breaks everything!", Label::Negative);
        assert!(flag.detected);
        assert_eq!(
            flag.cues,
            vec![SarcasmCue::PraiseNearNegativeOutcome { praise: "great".to_string(), outcome: "breaks".to_string() }]
        );
    }

    #[test]
    fn outcome_before_praise_also_counts() {
        let flag = detector().detect("It crashes hourly, just perfect", Label::Positive);
        assert!(flag.detected);
    }

    #[test]
    fn distant_pair_is_ignored() {
        let flag = detector().detect(
            "Great phone and the case fits well and the box was tidy so shame it breaks",
            Label::Positive,
        );
        assert!(!flag.detected);
    }

    #[test]
    fn window_counts_words_between_the_pair() {
        let six_between = detector().detect("great one two three four five six breaks", Label::Positive);
        assert!(six_between.detected);
        let six_before = detector().detect("breaks one two three four five six great", Label::Positive);
        assert!(six_before.detected);

        let seven_between = detector().detect("great one two three four five six seven breaks", Label::Positive);
        assert!(!seven_between.detected);
    }

    #[test]
    fn exclamation_heavy_outcome() {
        let flag = detector().detect("Worst purchase ever!!!", Label::Negative);
        assert!(flag.detected);
        assert_eq!(flag.cues[0].name(), "exclamatory-outcome");

        let calm = detector().detect("Worst purchase ever!", Label::Negative);
        assert!(!calm.detected);
    }

    #[test]
    fn sincere_reviews_pass() {
        assert!(!detector().detect("Great camera quality, terrible battery life.", Label::Negative).detected);
        assert!(!detector().detect("", Label::Neutral).detected);
    }

    #[test]
    fn entailment_contradicting_surface_polarity() {
        let detector = detector().with_entailment(contradicts(POSITIVE_HYPOTHESIS));
        assert!(detector.uses_entailment());

        let flag = detector.detect("Oh sure, I adore waiting", Label::Positive);
        assert_eq!(flag.cues, vec![SarcasmCue::EntailmentContradiction { hypothesis: Label::Positive }]);

        // the contradicted hypothesis does not match a negative surface
        assert!(!detector.detect("Oh sure, I adore waiting", Label::Negative).detected);
        assert!(!detector.detect("Oh sure, I adore waiting", Label::Neutral).detected);
    }

    #[test]
    fn neutral_surface_sends_no_probe() {
        let calls = Rc::new(Cell::new(0));
        let seen = calls.clone();
        let detector = detector().with_entailment(move |_: &str, _: &str| -> Result<Relation, CapabilityError> {
            seen.set(seen.get() + 1);
            Ok(Relation::Contradiction)
        });
        assert!(!detector.detect("It arrived", Label::Neutral).detected);
        assert_eq!(calls.get(), 0);

        assert!(detector.detect("It arrived", Label::Negative).detected);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn failing_entailment_model_is_neutral() {
        let detector = detector().with_entailment(|_: &str, _: &str| -> Result<Relation, CapabilityError> {
            Err(CapabilityError::Unavailable("no model".to_string()))
        });
        assert!(!detector.detect("I adore it", Label::Positive).detected);
    }
}
