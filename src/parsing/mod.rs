//*** START FILE: src/parsing/mod.rs ***//
pub mod clause_splitter;
pub mod tokenizer;

// Re-export the pieces the analysis stages reach for
pub use clause_splitter::ClauseSplitter;
pub use tokenizer::tokenize;
//*** END FILE: src/parsing/mod.rs ***//
