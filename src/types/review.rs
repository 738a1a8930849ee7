//*** START FILE: src/types/review.rs ***//
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// A submitted review. The text is never modified after construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Review(String);

impl Review {
    pub fn new(text: impl Into<String>) -> Self {
        Review(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the review holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl From<&str> for Review {
    fn from(text: &str) -> Self {
        Review::new(text)
    }
}

/// A clause of a review together with its character span in the original text.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub span: Range<usize>, // char offsets, end exclusive
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Aspect {
    Battery,
    Camera,
    Performance,
    Display,
    Software,
    Price,
    General,
}

impl Aspect {
    pub fn name(&self) -> &'static str {
        match self {
            Aspect::Battery => "battery",
            Aspect::Camera => "camera",
            Aspect::Performance => "performance",
            Aspect::Display => "display",
            Aspect::Software => "software",
            Aspect::Price => "price",
            Aspect::General => "general",
        }
    }
}

impl fmt::Display for Aspect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Positive,
    Negative,
    Neutral,
}

impl Label {
    /// Maps the label vocabulary of common sentiment checkpoints onto the
    /// three-way scale ("LABEL_2", "pos", "5 stars", "NEGATIVE", ...).
    /// Anything unrecognised is Neutral.
    pub fn from_model_label(raw: &str) -> Label {
        let s = raw.trim().to_lowercase();
        match s.as_str() {
            "label_0" | "1 star" | "2 stars" => return Label::Negative,
            "label_1" | "3 stars" => return Label::Neutral,
            "label_2" | "4 stars" | "5 stars" => return Label::Positive,
            _ => {}
        }
        if s.contains("pos") {
            Label::Positive
        } else if s.contains("neg") {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    pub fn inverted(self) -> Label {
        match self {
            Label::Positive => Label::Negative,
            Label::Negative => Label::Positive,
            Label::Neutral => Label::Neutral,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Label::Positive => "Positive",
            Label::Negative => "Negative",
            Label::Neutral => "Neutral",
        };
        f.write_str(s)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SentimentScore {
    pub label: Label,
    pub confidence: Option<f32>,
}

impl SentimentScore {
    pub fn new(label: Label, confidence: f32) -> Self {
        SentimentScore { label, confidence: Some(confidence.clamp(0.0, 1.0)) }
    }

    /// Neutral without any confidence attached; used for blank reviews.
    pub fn neutral() -> Self {
        SentimentScore { label: Label::Neutral, confidence: None }
    }

    /// What a scorer returns when it could not score a segment at all.
    pub fn degraded() -> Self {
        SentimentScore { label: Label::Neutral, confidence: Some(0.0) }
    }
}

/// Proportions of positive, neutral and negative evidence in a text plus the
/// normalised compound score in [-1, 1].
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityBreakdown {
    pub positive: f32,
    pub neutral: f32,
    pub negative: f32,
    pub compound: f32,
}

impl PolarityBreakdown {
    /// Normalises the three shares; compound is positive minus negative.
    pub fn from_shares(positive: f32, neutral: f32, negative: f32) -> Self {
        let (positive, neutral, negative) = (positive.max(0.0), neutral.max(0.0), negative.max(0.0));
        let total = positive + neutral + negative;
        if total <= 0.0 {
            return PolarityBreakdown { positive: 0.0, neutral: 1.0, negative: 0.0, compound: 0.0 };
        }
        let (positive, neutral, negative) = (positive / total, neutral / total, negative / total);
        PolarityBreakdown { positive, neutral, negative, compound: positive - negative }
    }

    /// A distribution where `label` holds `confidence` and the other two
    /// labels split the rest evenly.
    pub fn concentrated(label: Label, confidence: f32) -> Self {
        let confidence = confidence.clamp(0.0, 1.0);
        let rest = (1.0 - confidence) / 2.0;
        match label {
            Label::Positive => PolarityBreakdown::from_shares(confidence, rest, rest),
            Label::Neutral => PolarityBreakdown::from_shares(rest, confidence, rest),
            Label::Negative => PolarityBreakdown::from_shares(rest, rest, confidence),
        }
    }

    /// Share-wise mean; `None` for an empty input.
    pub fn mean<'a, I>(items: I) -> Option<PolarityBreakdown>
    where
        I: IntoIterator<Item = &'a PolarityBreakdown>,
    {
        let mut count = 0usize;
        let mut sum = PolarityBreakdown::default();
        for item in items {
            sum.positive += item.positive;
            sum.neutral += item.neutral;
            sum.negative += item.negative;
            sum.compound += item.compound;
            count += 1;
        }
        if count == 0 {
            return None;
        }
        let n = count as f32;
        Some(PolarityBreakdown {
            positive: sum.positive / n,
            neutral: sum.neutral / n,
            negative: sum.negative / n,
            compound: sum.compound / n,
        })
    }

    /// Shares shown once a review reads as sarcastic: positive damped to 60%,
    /// negative raised to `1.3 * negative + 0.05` (capped at 1), compound
    /// recomputed from the adjusted shares.
    pub fn adjusted_for_sarcasm(self) -> PolarityBreakdown {
        let positive = self.positive * 0.6;
        let negative = (self.negative * 1.3 + 0.05).min(1.0);
        let neutral = self.neutral;
        let total = positive + neutral + negative;
        let compound = if total > 0.0 { (positive - negative) / total } else { 0.0 };
        PolarityBreakdown { positive, neutral, negative, compound }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "cue", rename_all = "snake_case")]
pub enum SarcasmCue {
    /// The review contradicts the hypothesis matching its own surface polarity.
    EntailmentContradiction { hypothesis: Label },
    /// Praise word within a few tokens of a negative outcome ("great ... breaks").
    PraiseNearNegativeOutcome { praise: String, outcome: String },
    /// Several exclamation marks around a negative outcome keyword.
    ExclamatoryOutcome { exclamations: usize, outcome: String },
}

impl SarcasmCue {
    pub fn name(&self) -> &'static str {
        match self {
            SarcasmCue::EntailmentContradiction { .. } => "entailment-contradiction",
            SarcasmCue::PraiseNearNegativeOutcome { .. } => "praise-near-negative-outcome",
            SarcasmCue::ExclamatoryOutcome { .. } => "exclamatory-outcome",
        }
    }
}

impl fmt::Display for SarcasmCue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SarcasmCue::EntailmentContradiction { hypothesis } => {
                write!(f, "{} (review contradicts \"{}\" reading)", self.name(), hypothesis)
            }
            SarcasmCue::PraiseNearNegativeOutcome { praise, outcome } => {
                write!(f, "{} ('{}' near '{}')", self.name(), praise, outcome)
            }
            SarcasmCue::ExclamatoryOutcome { exclamations, outcome } => {
                write!(f, "{} ({}x '!' with '{}')", self.name(), exclamations, outcome)
            }
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct SarcasmFlag {
    pub detected: bool,
    pub cues: Vec<SarcasmCue>,
}

impl SarcasmFlag {
    pub fn from_cues(cues: Vec<SarcasmCue>) -> Self {
        SarcasmFlag { detected: !cues.is_empty(), cues }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AspectVerdict {
    pub aspect: Aspect,
    pub score: SentimentScore,
    pub clause: String, // the segment that decided this entry
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Verdict {
    pub overall: SentimentScore,
    pub aspects: Vec<AspectVerdict>,
    pub sarcasm: SarcasmFlag,
    pub breakdown: Option<PolarityBreakdown>,
}

impl Verdict {
    /// The verdict for a review with nothing to analyse.
    pub fn empty() -> Self {
        Verdict {
            overall: SentimentScore::neutral(),
            aspects: Vec::new(),
            sarcasm: SarcasmFlag::default(),
            breakdown: None,
        }
    }

    pub fn aspect(&self, aspect: Aspect) -> Option<&AspectVerdict> {
        self.aspects.iter().find(|entry| entry.aspect == aspect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_labels_normalise_to_three_way_scale() {
        assert_eq!(Label::from_model_label("positive"), Label::Positive);
        assert_eq!(Label::from_model_label("NEGATIVE"), Label::Negative);
        assert_eq!(Label::from_model_label("neutral"), Label::Neutral);
        assert_eq!(Label::from_model_label("LABEL_0"), Label::Negative);
        assert_eq!(Label::from_model_label("LABEL_2"), Label::Positive);
        assert_eq!(Label::from_model_label("5 stars"), Label::Positive);
        assert_eq!(Label::from_model_label("1 star"), Label::Negative);
        assert_eq!(Label::from_model_label("3 stars"), Label::Neutral);
        assert_eq!(Label::from_model_label("mixed"), Label::Neutral);
    }

    #[test]
    fn confidence_is_clamped() {
        assert_eq!(SentimentScore::new(Label::Positive, 1.7).confidence, Some(1.0));
        assert_eq!(SentimentScore::new(Label::Negative, -0.2).confidence, Some(0.0));
    }

    #[test]
    fn concentrated_distribution_keeps_the_label_on_top() {
        let b = PolarityBreakdown::concentrated(Label::Negative, 0.8);
        assert!((b.negative - 0.8).abs() < 1e-6);
        assert!((b.positive - 0.1).abs() < 1e-6);
        assert!((b.compound + 0.7).abs() < 1e-6);
    }

    #[test]
    fn mean_of_breakdowns() {
        let items = [
            PolarityBreakdown::from_shares(1.0, 0.0, 0.0),
            PolarityBreakdown::from_shares(0.0, 0.0, 1.0),
        ];
        let mean = PolarityBreakdown::mean(&items).unwrap();
        assert!((mean.positive - 0.5).abs() < 1e-6);
        assert!((mean.negative - 0.5).abs() < 1e-6);
        assert!(mean.compound.abs() < 1e-6);
        assert!(PolarityBreakdown::mean(&[]).is_none());
    }

    #[test]
    fn sarcasm_adjustment_shifts_shares_negative() {
        let before = PolarityBreakdown::from_shares(0.7, 0.2, 0.1);
        let after = before.adjusted_for_sarcasm();
        assert!((after.positive - 0.42).abs() < 1e-6);
        assert!((after.negative - 0.18).abs() < 1e-6);
        assert!((after.neutral - 0.2).abs() < 1e-6);
        assert!(after.compound < before.compound);

        let capped = PolarityBreakdown::from_shares(0.0, 0.0, 1.0).adjusted_for_sarcasm();
        assert_eq!(capped.negative, 1.0);
    }

    #[test]
    fn blank_review_detection() {
        assert!(Review::new("  \n\t").is_blank());
        assert!(!Review::new(" ok ").is_blank());
    }

    #[test]
    fn flag_follows_cues() {
        assert!(!SarcasmFlag::from_cues(Vec::new()).detected);
        let flag = SarcasmFlag::from_cues(vec![SarcasmCue::ExclamatoryOutcome {
            exclamations: 3,
            outcome: "worst".to_string(),
        }]);
        assert!(flag.detected);
        assert_eq!(flag.cues[0].name(), "exclamatory-outcome");
    }
}
//*** END FILE: src/types/review.rs ***//
