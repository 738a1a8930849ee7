use serde::{Deserialize, Serialize};

use crate::types::review::{
    Aspect, AspectVerdict, Label, PolarityBreakdown, SarcasmFlag, Segment, SentimentScore, Verdict,
};

/// One segment after tagging and scoring, ready to be folded into a verdict.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoredSegment {
    pub segment: Segment,
    pub aspect: Aspect,
    pub score: SentimentScore,
    pub shares: Option<PolarityBreakdown>,
}

/// Groups segments by aspect. Aspects keep the order in which they first
/// appear; the score comes from the last segment carrying that aspect.
pub fn fold_aspects(scored: &[ScoredSegment]) -> Vec<AspectVerdict> {
    let mut entries: Vec<AspectVerdict> = Vec::new();
    for item in scored {
        let verdict = AspectVerdict { aspect: item.aspect, score: item.score, clause: item.segment.text.clone() };
        match entries.iter_mut().find(|e| e.aspect == item.aspect) {
            Some(existing) => *existing = verdict,
            None => entries.push(verdict),
        }
    }
    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    pub label: Label,
    pub votes: usize,
    pub total: usize,
}

impl Vote {
    pub fn share(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.votes as f32 / self.total as f32
        }
    }
}

/// Majority label. Ties go to Negative when it is among the leaders, then to
/// Neutral; Positive only wins outright. `None` for an empty input.
pub fn majority_vote<I>(labels: I) -> Option<Vote>
where
    I: IntoIterator<Item = Label>,
{
    let (mut positive, mut negative, mut neutral) = (0usize, 0usize, 0usize);
    for label in labels {
        match label {
            Label::Positive => positive += 1,
            Label::Negative => negative += 1,
            Label::Neutral => neutral += 1,
        }
    }
    let total = positive + negative + neutral;
    if total == 0 {
        return None;
    }
    let best = positive.max(negative).max(neutral);
    let label = if negative == best {
        Label::Negative
    } else if neutral == best {
        Label::Neutral
    } else {
        Label::Positive
    };
    Some(Vote { label, votes: best, total })
}

/// The polarity a sarcasm check should test against: the majority label when
/// it is polar, otherwise whichever of Positive and Negative has more votes,
/// Positive on a tie.
pub fn dominant_polarity<I>(labels: I) -> Label
where
    I: IntoIterator<Item = Label>,
{
    let labels: Vec<Label> = labels.into_iter().collect();
    match majority_vote(labels.iter().copied()) {
        Some(Vote { label: Label::Positive, .. }) => Label::Positive,
        Some(Vote { label: Label::Negative, .. }) => Label::Negative,
        _ => {
            let positive = labels.iter().filter(|l| **l == Label::Positive).count();
            let negative = labels.iter().filter(|l| **l == Label::Negative).count();
            if positive >= negative {
                Label::Positive
            } else {
                Label::Negative
            }
        }
    }
}

/// Folds scored segments and the review-level sarcasm flag into a verdict.
/// Sarcasm only overrides a Positive overall label; aspect rows are kept as
/// scored.
pub fn aggregate(scored: &[ScoredSegment], sarcasm: SarcasmFlag) -> Verdict {
    let aspects = fold_aspects(scored);
    let overall = match majority_vote(aspects.iter().map(|a| a.score.label)) {
        Some(vote) => {
            let label = if sarcasm.detected && vote.label == Label::Positive {
                Label::Negative
            } else {
                vote.label
            };
            SentimentScore::new(label, vote.share())
        }
        None => SentimentScore::neutral(),
    };
    Verdict { overall, aspects, sarcasm, breakdown: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::review::SarcasmCue;

    fn scored(text: &str, aspect: Aspect, label: Label) -> ScoredSegment {
        ScoredSegment {
            segment: Segment { text: text.to_string(), span: 0..text.chars().count() },
            aspect,
            score: SentimentScore::new(label, 0.7),
            shares: None,
        }
    }

    fn sarcastic() -> SarcasmFlag {
        SarcasmFlag::from_cues(vec![SarcasmCue::PraiseNearNegativeOutcome {
            praise: "great".to_string(),
            outcome: "breaks".to_string(),
        }])
    }

    #[test]
    fn later_segment_overrides_same_aspect() {
        let segments = vec![
            scored("battery is good", Aspect::Battery, Label::Positive),
            scored("camera is fine", Aspect::Camera, Label::Positive),
            scored("battery dies by noon", Aspect::Battery, Label::Negative),
        ];
        let aspects = fold_aspects(&segments);
        assert_eq!(aspects.len(), 2);
        assert_eq!(aspects[0].aspect, Aspect::Battery);
        assert_eq!(aspects[0].score.label, Label::Negative);
        assert_eq!(aspects[0].clause, "battery dies by noon");
        assert_eq!(aspects[1].aspect, Aspect::Camera);
    }

    #[test]
    fn ties_lean_negative_then_neutral() {
        let vote = majority_vote([Label::Positive, Label::Negative]).unwrap();
        assert_eq!(vote.label, Label::Negative);
        let vote = majority_vote([Label::Positive, Label::Neutral]).unwrap();
        assert_eq!(vote.label, Label::Neutral);
        let vote = majority_vote([Label::Positive, Label::Positive, Label::Negative]).unwrap();
        assert_eq!(vote, Vote { label: Label::Positive, votes: 2, total: 3 });
        assert!(majority_vote(Vec::new()).is_none());
    }

    #[test]
    fn dominant_polarity_is_never_neutral() {
        assert_eq!(dominant_polarity([Label::Negative, Label::Positive]), Label::Negative);
        assert_eq!(dominant_polarity([Label::Neutral, Label::Neutral]), Label::Positive);
        assert_eq!(dominant_polarity([Label::Neutral, Label::Neutral, Label::Negative]), Label::Negative);
        assert_eq!(dominant_polarity([Label::Neutral, Label::Neutral, Label::Positive]), Label::Positive);
        assert_eq!(dominant_polarity(Vec::new()), Label::Positive);
    }

    #[test]
    fn sarcasm_flips_only_the_overall_label() {
        let segments = vec![
            scored("great screen", Aspect::Display, Label::Positive),
            scored("lovely camera", Aspect::Camera, Label::Positive),
        ];
        let verdict = aggregate(&segments, sarcastic());
        assert_eq!(verdict.overall.label, Label::Negative);
        assert!(verdict.aspects.iter().all(|a| a.score.label == Label::Positive));
        assert!(verdict.sarcasm.detected);
    }

    #[test]
    fn sarcasm_leaves_non_positive_overall_alone() {
        let segments = vec![scored("meh", Aspect::General, Label::Neutral)];
        assert_eq!(aggregate(&segments, sarcastic()).overall.label, Label::Neutral);
    }

    #[test]
    fn nothing_to_fold_is_neutral() {
        let verdict = aggregate(&[], SarcasmFlag::default());
        assert_eq!(verdict, Verdict::empty());
    }

    #[test]
    fn aggregation_does_not_touch_its_input() {
        let segments = vec![scored("great screen", Aspect::Display, Label::Positive)];
        let before = segments.clone();
        let _ = aggregate(&segments, sarcastic());
        assert_eq!(segments, before);
    }
}
