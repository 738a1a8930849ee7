use std::collections::HashMap;

use crate::config::AspectKeywords;
use crate::parsing::tokenize;
use crate::types::review::Aspect;

/// Keyword lookup from segment tokens to an aspect.
#[derive(Debug, Clone, Default)]
pub struct AspectTagger {
    keywords: HashMap<String, Aspect>,
}

impl AspectTagger {
    /// Builds the lookup table. When a keyword is listed under two aspects the
    /// one declared first keeps it.
    pub fn new(table: &[AspectKeywords]) -> Self {
        let mut keywords = HashMap::new();
        for entry in table {
            for keyword in &entry.keywords {
                keywords.entry(keyword.trim().to_lowercase()).or_insert(entry.aspect);
            }
        }
        AspectTagger { keywords }
    }

    fn lookup(&self, token: &str) -> Option<Aspect> {
        if let Some(aspect) = self.keywords.get(token) {
            return Some(*aspect);
        }
        // plain plural: "photos" -> "photo"
        token
            .strip_suffix('s')
            .filter(|stem| stem.len() > 1)
            .and_then(|stem| self.keywords.get(stem).copied())
    }

    /// The aspect of the first keyword in token order, General when none match.
    pub fn tag(&self, segment_text: &str) -> Aspect {
        tokenize(segment_text)
            .iter()
            .find_map(|token| self.lookup(token))
            .unwrap_or(Aspect::General)
    }

    pub fn keyword_count(&self) -> usize {
        self.keywords.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn tagger() -> AspectTagger {
        AspectTagger::new(&Config::default().aspects)
    }

    #[test]
    fn first_keyword_in_token_order_wins() {
        assert_eq!(tagger().tag("terrible battery life"), Aspect::Battery);
        assert_eq!(tagger().tag("the screen drains the battery"), Aspect::Display);
        assert_eq!(tagger().tag("another software update that breaks everything!"), Aspect::Software);
    }

    #[test]
    fn unmatched_segments_are_general() {
        assert_eq!(tagger().tag("Great"), Aspect::General);
        assert_eq!(tagger().tag(""), Aspect::General);
    }

    #[test]
    fn matches_whole_tokens_and_plurals() {
        // "ui" must not fire inside "quite"
        assert_eq!(tagger().tag("quite nice"), Aspect::General);
        assert_eq!(tagger().tag("Photos look washed out"), Aspect::Camera);
        assert_eq!(tagger().tag("PRICE is fair"), Aspect::Price);
    }

    #[test]
    fn tagging_is_deterministic() {
        let tagger = tagger();
        let text = "fast app with a bright screen and good camera";
        let first = tagger.tag(text);
        for _ in 0..10 {
            assert_eq!(tagger.tag(text), first);
        }
        assert_eq!(first, Aspect::Performance);
    }

    #[test]
    fn earlier_declaration_keeps_shared_keyword() {
        let table = vec![
            AspectKeywords { aspect: Aspect::Battery, keywords: vec!["power".to_string()] },
            AspectKeywords { aspect: Aspect::Performance, keywords: vec!["Power".to_string()] },
        ];
        let tagger = AspectTagger::new(&table);
        assert_eq!(tagger.tag("power"), Aspect::Battery);
        assert_eq!(tagger.keyword_count(), 1);
    }
}
