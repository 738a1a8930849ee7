use regex::Regex;

use crate::config::SplitterConfig;
use crate::error::ConfigError;
use crate::types::review::Segment;

/// Breaks a review into clauses on contrastive markers ("but", "however", ...),
/// clause punctuation and, optionally, sentence boundaries.
#[derive(Debug, Clone)]
pub struct ClauseSplitter {
    pattern: Regex,
}

impl ClauseSplitter {
    pub fn from_config(config: &SplitterConfig) -> Result<Self, ConfigError> {
        let mut markers: Vec<&str> = config.markers.iter().map(|m| m.trim()).filter(|m| !m.is_empty()).collect();
        // longest first so "even though" wins over "though"
        markers.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

        let mut alternatives: Vec<String> = Vec::new();
        if !markers.is_empty() {
            let words: Vec<String> = markers
                .iter()
                .map(|m| m.split_whitespace().map(regex::escape).collect::<Vec<_>>().join(r"\s+"))
                .collect();
            alternatives.push(format!(r"\b(?:{})\b", words.join("|")));
        }
        if !config.separators.is_empty() {
            let class: String = config.separators.chars().map(|c| regex::escape(&c.to_string())).collect();
            alternatives.push(format!("[{}]", class));
        }
        if config.sentence_boundaries {
            alternatives.push(r"[.!?]+\s+".to_string());
        }
        if alternatives.is_empty() {
            return Err(ConfigError::Invalid("clause splitter has nothing to split on".to_string()));
        }

        let pattern = Regex::new(&format!("(?i){}", alternatives.join("|")))?;
        Ok(ClauseSplitter { pattern })
    }

    /// Ordered, trimmed, non-empty segments of `text`. A text without any
    /// marker comes back as a single segment.
    pub fn split(&self, text: &str) -> Vec<Segment> {
        // Matching runs on the trimmed body so a trailing "!  " is not a boundary.
        let offset = text.len() - text.trim_start().len();
        let body = text.trim();

        let mut segments = Vec::new();
        let mut piece_start = offset;
        for separator in self.pattern.find_iter(body) {
            push_piece(text, piece_start, offset + separator.start(), &mut segments);
            piece_start = offset + separator.end();
        }
        push_piece(text, piece_start, offset + body.len(), &mut segments);
        segments
    }
}

fn push_piece(text: &str, start: usize, end: usize, segments: &mut Vec<Segment>) {
    let piece = &text[start..end];
    let trimmed = piece.trim();
    if trimmed.is_empty() {
        return;
    }
    let byte_start = start + (piece.len() - piece.trim_start().len());
    let char_start = text[..byte_start].chars().count();
    let char_end = char_start + trimmed.chars().count();
    segments.push(Segment { text: trimmed.to_string(), span: char_start..char_end });
}
