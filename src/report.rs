use serde::Serialize;
use std::io::Write;

use crate::types::review::{Review, SarcasmFlag, SentimentScore, Verdict};

/// Anything that shows a verdict to someone: the GUI, a terminal, a JSON pipe.
pub trait VerdictSink {
    fn present(&mut self, review: &Review, verdict: &Verdict);
}

pub fn percent(share: f32) -> String {
    format!("{:.1}%", share * 100.0)
}

pub fn score_summary(score: &SentimentScore) -> String {
    match score.confidence {
        Some(confidence) => format!("{} ({:.2})", score.label, confidence),
        None => score.label.to_string(),
    }
}

/// "Likely" or "Unlikely", followed by the cues that fired.
pub fn sarcasm_summary(flag: &SarcasmFlag) -> String {
    if !flag.detected {
        return "Unlikely".to_string();
    }
    let cues: Vec<String> = flag.cues.iter().map(|c| c.to_string()).collect();
    format!("Likely: {}", cues.join("; "))
}

/// One line per aspect: label plus the clause that decided it.
pub fn aspect_lines(verdict: &Verdict) -> Vec<String> {
    verdict
        .aspects
        .iter()
        .map(|entry| format!("- {}: {}  |  \u{201c}{}\u{201d}", entry.aspect, score_summary(&entry.score), entry.clause))
        .collect()
}

pub struct TextReport<W: Write> {
    out: W,
}

impl<W: Write> TextReport<W> {
    pub fn new(out: W) -> Self {
        TextReport { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_report(&mut self, review: &Review, verdict: &Verdict) -> std::io::Result<()> {
        writeln!(self.out, "Review: {}", review.as_str().trim())?;
        if let Some(b) = &verdict.breakdown {
            writeln!(
                self.out,
                "Negative: {}  Neutral: {}  Positive: {}  (compound {:.3})",
                percent(b.negative),
                percent(b.neutral),
                percent(b.positive),
                b.compound
            )?;
        }
        writeln!(self.out, "Overall: {}", score_summary(&verdict.overall))?;
        writeln!(self.out, "Sarcasm/Irony: {}", sarcasm_summary(&verdict.sarcasm))?;
        let lines = aspect_lines(verdict);
        if !lines.is_empty() {
            writeln!(self.out, "Aspect-level:")?;
            for line in lines {
                writeln!(self.out, "{}", line)?;
            }
        }
        self.out.flush()
    }
}

impl<W: Write> VerdictSink for TextReport<W> {
    fn present(&mut self, review: &Review, verdict: &Verdict) {
        if let Err(e) = self.write_report(review, verdict) {
            tracing::error!(error = %e, "failed to write text report");
        }
    }
}

#[derive(Serialize)]
struct Record<'a> {
    review: &'a str,
    verdict: &'a Verdict,
}

pub struct JsonReport<W: Write> {
    out: W,
    pretty: bool,
}

impl<W: Write> JsonReport<W> {
    pub fn new(out: W, pretty: bool) -> Self {
        JsonReport { out, pretty }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VerdictSink for JsonReport<W> {
    fn present(&mut self, review: &Review, verdict: &Verdict) {
        let record = Record { review: review.as_str(), verdict };
        let written = if self.pretty {
            serde_json::to_writer_pretty(&mut self.out, &record)
        } else {
            serde_json::to_writer(&mut self.out, &record)
        };
        let result = written.map_err(std::io::Error::from).and_then(|_| writeln!(self.out));
        if let Err(e) = result {
            tracing::error!(error = %e, "failed to write json report");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::review::{Aspect, AspectVerdict, Label, PolarityBreakdown, SarcasmCue};

    fn verdict() -> Verdict {
        Verdict {
            overall: SentimentScore::new(Label::Negative, 0.5),
            aspects: vec![
                AspectVerdict {
                    aspect: Aspect::Camera,
                    score: SentimentScore::new(Label::Positive, 0.62),
                    clause: "Great camera quality".to_string(),
                },
                AspectVerdict {
                    aspect: Aspect::Battery,
                    score: SentimentScore::new(Label::Negative, 0.54),
                    clause: "terrible battery life.".to_string(),
                },
            ],
            sarcasm: SarcasmFlag::default(),
            breakdown: Some(PolarityBreakdown { positive: 0.25, neutral: 0.5, negative: 0.25, compound: 0.1 }),
        }
    }

    #[test]
    fn text_report_lists_every_part() {
        let review = Review::new("Great camera quality, terrible battery life.");
        let mut sink = TextReport::new(Vec::new());
        sink.present(&review, &verdict());
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert!(text.contains("Overall: Negative (0.50)"));
        assert!(text.contains("Sarcasm/Irony: Unlikely"));
        assert!(text.contains("Negative: 25.0%  Neutral: 50.0%  Positive: 25.0%"));
        assert!(text.contains("- camera: Positive (0.62)  |  \u{201c}Great camera quality\u{201d}"));
        assert!(text.contains("- battery: Negative (0.54)"));
    }

    #[test]
    fn sarcasm_summary_names_cues() {
        let flag = SarcasmFlag::from_cues(vec![SarcasmCue::PraiseNearNegativeOutcome {
            praise: "great".to_string(),
            outcome: "breaks".to_string(),
        }]);
        assert_eq!(sarcasm_summary(&flag), "Likely: praise-near-negative-outcome ('great' near 'breaks')");
    }

    #[test]
    fn json_report_is_parseable() {
        let review = Review::new("Great camera quality, terrible battery life.");
        let mut sink = JsonReport::new(Vec::new(), false);
        sink.present(&review, &verdict());
        let out = String::from_utf8(sink.into_inner()).unwrap();
        let value: serde_json::Value = serde_json::from_str(out.trim()).unwrap();
        assert_eq!(value["verdict"]["overall"]["label"], "Negative");
        assert_eq!(value["verdict"]["aspects"][0]["aspect"], "camera");
        assert_eq!(value["verdict"]["sarcasm"]["detected"], false);
        assert_eq!(value["review"], "Great camera quality, terrible battery life.");
    }
}
