use tracing::{debug, info};

use super::aggregator::{aggregate, dominant_polarity, fold_aspects, ScoredSegment};
use super::aspect_tagger::AspectTagger;
use super::lexicon::LexiconScorer;
use super::remote::{InferenceClient, RemoteClassifier, RemoteEntailment};
use super::sarcasm::SarcasmDetector;
use super::scorer::{ModelScorer, SentimentScorer};
use crate::config::{Config, ScorerKind};
use crate::error::ConfigError;
use crate::parsing::ClauseSplitter;
use crate::types::review::{PolarityBreakdown, Review, Segment, Verdict};

/// The whole review pipeline: split, tag, score, check for sarcasm, aggregate.
pub struct Analyzer {
    splitter: ClauseSplitter,
    tagger: AspectTagger,
    scorer: Box<dyn SentimentScorer>,
    sarcasm: SarcasmDetector,
}

impl Analyzer {
    pub fn new(
        splitter: ClauseSplitter,
        tagger: AspectTagger,
        scorer: impl SentimentScorer + 'static,
        sarcasm: SarcasmDetector,
    ) -> Self {
        Analyzer { splitter, tagger, scorer: Box::new(scorer), sarcasm }
    }

    /// Builds every stage from `config`, choosing the scorer variant and
    /// wiring the entailment probe when enabled.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let splitter = ClauseSplitter::from_config(&config.splitter)?;
        let tagger = AspectTagger::new(&config.aspects);

        let needs_client = config.scorer == ScorerKind::Model || config.entailment_enabled();
        let client = if needs_client {
            Some(
                InferenceClient::from_config(&config.model)
                    .map_err(|e| ConfigError::Invalid(format!("cannot build inference client: {}", e)))?,
            )
        } else {
            None
        };

        let mut sarcasm = SarcasmDetector::new(&config.sarcasm);
        if let (true, Some(client)) = (config.entailment_enabled(), &client) {
            sarcasm = sarcasm.with_entailment(RemoteEntailment::new(
                client.clone(),
                config.model.nli_model.clone(),
                config.model.contradiction_threshold,
            ));
        }

        let analyzer = match (config.scorer, client) {
            (ScorerKind::Model, Some(client)) => {
                let classifier = RemoteClassifier::new(client, config.model.sentiment_model.clone());
                Analyzer::new(splitter, tagger, ModelScorer::new(classifier), sarcasm)
            }
            _ => Analyzer::new(splitter, tagger, LexiconScorer::from_config(&config.lexicon), sarcasm),
        };
        info!(
            scorer = analyzer.scorer_name(),
            entailment = analyzer.sarcasm.uses_entailment(),
            aspect_keywords = analyzer.tagger.keyword_count(),
            "analyzer ready"
        );
        Ok(analyzer)
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    /// Splits, tags and scores `text`. A non-blank text always yields at
    /// least one segment.
    pub fn score_segments(&self, text: &str) -> Vec<ScoredSegment> {
        let mut segments = self.splitter.split(text);
        if segments.is_empty() && !text.trim().is_empty() {
            let trimmed = text.trim();
            let start = text[..text.len() - text.trim_start().len()].chars().count();
            segments.push(Segment { text: trimmed.to_string(), span: start..start + trimmed.chars().count() });
        }
        segments
            .into_iter()
            .map(|segment| {
                let aspect = self.tagger.tag(&segment.text);
                let (score, shares) = self.scorer.score_segment(&segment.text);
                debug!(segment = %segment.text, %aspect, label = %score.label, "scored segment");
                ScoredSegment { segment, aspect, score, shares }
            })
            .collect()
    }

    pub fn analyze(&self, review: &Review) -> Verdict {
        if review.is_blank() {
            debug!("blank review, returning neutral verdict");
            return Verdict::empty();
        }
        let text = review.as_str();
        let scored = self.score_segments(text);

        let surface = dominant_polarity(fold_aspects(&scored).iter().map(|a| a.score.label));
        let sarcasm = self.sarcasm.detect(text.trim(), surface);

        let mut verdict = aggregate(&scored, sarcasm);
        let shares: Vec<PolarityBreakdown> = scored.iter().filter_map(|s| s.shares).collect();
        verdict.breakdown = self.scorer.breakdown(text, &shares);
        if verdict.sarcasm.detected {
            verdict.breakdown = verdict.breakdown.map(PolarityBreakdown::adjusted_for_sarcasm);
        }
        debug!(overall = %verdict.overall.label, sarcasm = verdict.sarcasm.detected, "verdict");
        verdict
    }

    pub fn analyze_text(&self, text: &str) -> Verdict {
        self.analyze(&Review::new(text))
    }
}
