//! Metric consumers: each metric is built from injected `Embedder`
//! and/or `Llm` handles and scores one candidate row at a time. The
//! orchestrating evaluation loop lives with the caller.

pub mod answer_relevance;
pub mod context_recall;
pub mod output;
pub mod semantic_similarity;

pub use answer_relevance::AnswerRelevance;
pub use context_recall::ContextRecall;
pub use semantic_similarity::SemanticSimilarity;
