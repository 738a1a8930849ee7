//*** START FILE: src/analysis/mod.rs ***//
pub mod aggregator;
pub mod aspect_tagger;
pub mod capability;
pub mod lexicon;
pub mod pipeline;
pub mod remote;
pub mod sarcasm;
pub mod scorer;

// Re-export key items that main.rs and the front ends use
pub use aggregator::{aggregate, dominant_polarity, majority_vote, ScoredSegment};
pub use aspect_tagger::AspectTagger;
pub use capability::{Classification, EntailmentModel, Relation, SentimentClassifier};
pub use lexicon::{Lexicon, LexiconScorer};
pub use pipeline::Analyzer;
pub use sarcasm::SarcasmDetector;
pub use scorer::{ModelScorer, SentimentScorer};
//*** END FILE: src/analysis/mod.rs ***//
