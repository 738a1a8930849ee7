//*** START FILE: src/lib.rs ***//

// Declare all modules that are part of this library
pub mod config;
pub mod error;
pub mod types {
    pub mod review;
}
pub mod parsing;
pub mod analysis;
pub mod report;

// Re-exports for the binary and for callers embedding the analyzer
pub use analysis::Analyzer;
pub use config::Config;
pub use types::review::{Aspect, AspectVerdict, Label, Review, SarcasmCue, SarcasmFlag, SentimentScore, Verdict};

//*** END FILE: src/lib.rs ***//
