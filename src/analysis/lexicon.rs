//*** START FILE: src/analysis/lexicon.rs ***//
use std::collections::{HashMap, HashSet};

use super::scorer::SentimentScorer;
use crate::config::LexiconConfig;
use crate::parsing::tokenize;
use crate::types::review::{Label, PolarityBreakdown, SentimentScore};

// Valence on a -4..4 scale, tuned for product reviews.
const DEFAULT_VALENCE: &[(&str, f32)] = &[
    // positive
    ("amazing", 2.8),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("best", 3.2),
    ("better", 1.9),
    ("brilliant", 2.8),
    ("crisp", 1.5),
    ("delightful", 2.9),
    ("durable", 1.6),
    ("easy", 1.9),
    ("efficient", 1.8),
    ("excellent", 3.2),
    ("fantastic", 2.6),
    ("fast", 1.2),
    ("fine", 0.8),
    ("flawless", 2.8),
    ("good", 1.9),
    ("great", 3.1),
    ("happy", 2.7),
    ("helpful", 1.8),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("incredible", 2.6),
    ("love", 3.2),
    ("loved", 2.9),
    ("loves", 2.7),
    ("lovely", 2.8),
    ("nice", 1.8),
    ("outstanding", 3.0),
    ("perfect", 2.7),
    ("pleased", 1.9),
    ("recommend", 1.5),
    ("reliable", 1.9),
    ("responsive", 1.5),
    ("satisfied", 1.8),
    ("sharp", 1.2),
    ("smooth", 1.6),
    ("solid", 1.4),
    ("stunning", 2.9),
    ("superb", 3.1),
    ("vibrant", 1.8),
    ("wonderful", 2.7),
    ("worth", 1.6),
    // negative
    ("annoying", -1.9),
    ("awful", -2.0),
    ("bad", -2.5),
    ("blurry", -1.5),
    ("breaks", -1.8),
    ("broke", -1.8),
    ("broken", -2.0),
    ("buggy", -2.0),
    ("bugs", -1.6),
    ("cheap", -0.8),
    ("crash", -2.0),
    ("crashes", -2.0),
    ("dead", -2.2),
    ("defective", -2.4),
    ("dies", -2.1),
    ("disappointed", -2.1),
    ("disappointing", -2.2),
    ("drains", -1.3),
    ("dull", -1.7),
    ("fail", -2.1),
    ("fails", -2.0),
    ("flimsy", -1.6),
    ("freezes", -1.6),
    ("frustrating", -2.2),
    ("garbage", -2.5),
    ("hate", -2.7),
    ("horrible", -2.5),
    ("junk", -2.2),
    ("lags", -1.5),
    ("laggy", -1.7),
    ("mediocre", -1.3),
    ("overheats", -1.8),
    ("overpriced", -1.9),
    ("poor", -2.1),
    ("problem", -1.7),
    ("problems", -1.7),
    ("refund", -1.2),
    ("regret", -2.0),
    ("ruined", -2.4),
    ("ruins", -2.2),
    ("slow", -1.2),
    ("sluggish", -1.7),
    ("terrible", -2.5),
    ("unreliable", -2.0),
    ("unusable", -2.6),
    ("useless", -2.3),
    ("waste", -2.3),
    ("worse", -2.1),
    ("worst", -3.1),
    ("wrong", -2.1),
];

const DEFAULT_NEGATORS: &[&str] = &[
    "not", "no", "never", "none", "nobody", "nothing", "neither", "nor", "nowhere", "without", "cannot",
    "can't", "cant", "don't", "dont", "doesn't", "doesnt", "didn't", "didnt", "isn't", "isnt", "aren't",
    "arent", "wasn't", "wasnt", "weren't", "werent", "won't", "wont", "wouldn't", "wouldnt", "shouldn't",
    "shouldnt", "couldn't", "couldnt", "hardly", "barely", "scarcely",
];

// Added to the magnitude of the next sentiment word.
const DEFAULT_BOOSTERS: &[(&str, f32)] = &[
    ("absolutely", 0.293),
    ("extremely", 0.293),
    ("highly", 0.293),
    ("incredibly", 0.293),
    ("really", 0.293),
    ("so", 0.293),
    ("super", 0.293),
    ("totally", 0.293),
    ("very", 0.293),
    ("kinda", -0.293),
    ("marginally", -0.293),
    ("slightly", -0.293),
    ("somewhat", -0.293),
];

/// Valence, negator and booster tables. Built once from the built-in lists
/// plus whatever the config adds, then only read.
#[derive(Debug, Clone)]
pub struct Lexicon {
    valence: HashMap<String, f32>,
    negators: HashSet<String>,
    boosters: HashMap<String, f32>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Lexicon {
            valence: DEFAULT_VALENCE.iter().map(|(w, v)| (w.to_string(), *v)).collect(),
            negators: DEFAULT_NEGATORS.iter().map(|w| w.to_string()).collect(),
            boosters: DEFAULT_BOOSTERS.iter().map(|(w, b)| (w.to_string(), *b)).collect(),
        }
    }
}

impl Lexicon {
    pub fn from_config(config: &LexiconConfig) -> Self {
        let mut lexicon = Lexicon::default();
        for (word, valence) in &config.valence {
            lexicon.valence.insert(word.trim().to_lowercase(), *valence);
        }
        for word in &config.negators {
            lexicon.negators.insert(word.trim().to_lowercase());
        }
        lexicon
    }

    pub fn valence(&self, token: &str) -> Option<f32> {
        self.valence.get(token).copied()
    }

    pub fn is_negator(&self, token: &str) -> bool {
        self.negators.contains(token)
    }

    pub fn booster(&self, token: &str) -> Option<f32> {
        self.boosters.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.valence.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valence.is_empty()
    }
}

/// The V1 scorer: sums token valences, flips a word preceded by a negator
/// within `negation_window` tokens, squashes the sum into [-1, 1] and
/// thresholds it.
#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Lexicon,
    negation_window: usize,
    threshold: f32,
    alpha: f32,
}

impl LexiconScorer {
    pub fn new(lexicon: Lexicon, config: &LexiconConfig) -> Self {
        LexiconScorer {
            lexicon,
            negation_window: config.negation_window,
            threshold: config.threshold,
            alpha: config.normalization_alpha,
        }
    }

    pub fn from_config(config: &LexiconConfig) -> Self {
        LexiconScorer::new(Lexicon::from_config(config), config)
    }

    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    fn negated(&self, tokens: &[String], index: usize) -> bool {
        let start = index.saturating_sub(self.negation_window);
        tokens[start..index].iter().any(|t| self.lexicon.is_negator(t))
    }

    /// Proportions of positive/neutral/negative evidence and the compound
    /// score. `None` when the text has no tokens at all.
    pub fn polarity(&self, text: &str) -> Option<PolarityBreakdown> {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return None;
        }

        let mut sum = 0.0_f32;
        let mut positive = 0.0_f32;
        let mut negative = 0.0_f32;
        let mut neutral = 0.0_f32;
        for (i, token) in tokens.iter().enumerate() {
            let Some(mut valence) = self.lexicon.valence(token) else {
                neutral += 1.0;
                continue;
            };
            if i > 0 {
                if let Some(boost) = self.lexicon.booster(&tokens[i - 1]) {
                    valence += valence.signum() * boost;
                }
            }
            if self.negated(&tokens, i) {
                valence = -valence;
            }
            sum += valence;
            if valence > 0.0 {
                positive += valence;
            } else {
                negative += -valence;
            }
        }

        let total = positive + negative + neutral;
        let compound = (sum / (sum * sum + self.alpha).sqrt()).clamp(-1.0, 1.0);
        Some(PolarityBreakdown {
            positive: positive / total,
            neutral: neutral / total,
            negative: negative / total,
            compound,
        })
    }

    pub fn label_for(&self, compound: f32) -> Label {
        if compound > 0.0 && compound >= self.threshold {
            Label::Positive
        } else if compound < 0.0 && compound <= -self.threshold {
            Label::Negative
        } else {
            Label::Neutral
        }
    }
}

impl SentimentScorer for LexiconScorer {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score_segment(&self, text: &str) -> (SentimentScore, Option<PolarityBreakdown>) {
        let Some(breakdown) = self.polarity(text) else {
            return (SentimentScore::degraded(), None);
        };
        let score = match self.label_for(breakdown.compound) {
            Label::Neutral => SentimentScore::new(Label::Neutral, breakdown.neutral),
            label => SentimentScore::new(label, breakdown.compound.abs()),
        };
        (score, Some(breakdown))
    }

    /// Scored over the whole review text rather than averaged per segment.
    fn breakdown(&self, text: &str, _segment_shares: &[PolarityBreakdown]) -> Option<PolarityBreakdown> {
        self.polarity(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scorer() -> LexiconScorer {
        LexiconScorer::from_config(&LexiconConfig::default())
    }

    #[test]
    fn polar_words_decide_the_label() {
        assert_eq!(scorer().score("Great camera quality").label, Label::Positive);
        assert_eq!(scorer().score("terrible battery life.").label, Label::Negative);
        assert_eq!(scorer().score("The box is blue").label, Label::Neutral);
    }

    #[test]
    fn lone_negator_invents_no_polarity() {
        let score = scorer().score("not");
        assert_eq!(score.label, Label::Neutral);
    }

    #[test]
    fn negator_within_window_flips() {
        assert_eq!(scorer().score("not good").label, Label::Negative);
        assert_eq!(scorer().score("it is not really that bad").label, Label::Positive);
        // four tokens between the negator and the word: outside the default window
        assert_eq!(scorer().score("not that the screen is good").label, Label::Positive);
    }

    #[test]
    fn boosters_raise_magnitude() {
        let plain = scorer().polarity("good").unwrap().compound;
        let boosted = scorer().polarity("very good").unwrap().compound;
        let damped = scorer().polarity("slightly good").unwrap().compound;
        assert!(boosted > plain);
        assert!(damped < plain);
        assert!(damped > 0.0);
    }

    #[test]
    fn breakdown_shares_sum_to_one() {
        let b = scorer().polarity("great phone but awful case").unwrap();
        assert!((b.positive + b.neutral + b.negative - 1.0).abs() < 1e-5);
        assert!(b.positive > 0.0 && b.negative > 0.0);
        assert!(b.compound.abs() <= 1.0);
    }

    #[test]
    fn empty_text_is_degraded() {
        assert_eq!(scorer().score(""), SentimentScore::degraded());
        assert_eq!(scorer().score("!!!"), SentimentScore::degraded());
        assert!(scorer().breakdown("", &[]).is_none());
    }

    #[test]
    fn config_extends_the_tables() {
        let mut config = LexiconConfig::default();
        config.valence.insert("Meh".to_string(), -1.5);
        config.negators.push("nah".to_string());
        let scorer = LexiconScorer::from_config(&config);
        assert_eq!(scorer.score("meh").label, Label::Negative);
        assert_eq!(scorer.score("nah great").label, Label::Negative);
        assert!(scorer.lexicon().len() > DEFAULT_VALENCE.len());
    }
}
//*** END FILE: src/analysis/lexicon.rs ***//
