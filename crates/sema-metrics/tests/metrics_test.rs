use std::sync::Arc;

use async_trait::async_trait;
use sema_core::{Embedder, Llm, ProviderError, Result};
use sema_metrics::{AnswerRelevance, ContextRecall, SemanticSimilarity};

/// Deterministic embedder: the vector is derived from a hash of the
/// text, so equal texts always get equal vectors.
struct HashEmbedder {
    dimension: usize,
}

impl HashEmbedder {
    fn new(dimension: usize) -> Self {
        Self { dimension }
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        let mut h: u64 = 0xcbf29ce484222325;
        for b in text.bytes() {
            h ^= b as u64;
            h = h.wrapping_mul(0x100000001b3);
        }
        (0..self.dimension)
            .map(|i| {
                let shifted = h.rotate_left((i % 64) as u32);
                ((shifted & 0xff) as f32) / 255.0 + 0.01
            })
            .collect()
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        Ok(self.vector_for(text))
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|t| self.vector_for(t)).collect())
    }
}

/// Embedder that violates the fixed-dimension contract on purpose.
struct MixedDimEmbedder;

#[async_trait]
impl Embedder for MixedDimEmbedder {
    fn dimension(&self) -> usize {
        3
    }

    async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
        Ok(vec![1.0, 0.0, 0.0])
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts
            .iter()
            .enumerate()
            .map(|(i, _)| if i == 0 { vec![1.0, 0.0, 0.0] } else { vec![1.0, 0.0] })
            .collect())
    }
}

/// LLM returning canned outputs, in order.
struct CannedLlm {
    outputs: Vec<String>,
}

impl CannedLlm {
    fn new(outputs: &[&str]) -> Self {
        Self {
            outputs: outputs.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[async_trait]
impl Llm for CannedLlm {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        self.outputs
            .first()
            .cloned()
            .ok_or_else(|| ProviderError::invalid_response("canned", "no outputs"))
    }

    async fn generate(&self, _prompt: &str, n: usize) -> Result<Vec<String>> {
        if n > self.outputs.len() {
            return Err(ProviderError::invalid_response("canned", "not enough outputs"));
        }
        Ok(self.outputs[..n].to_vec())
    }
}

#[tokio::test]
async fn test_identical_texts_score_one() {
    let metric = SemanticSimilarity::new(Arc::new(HashEmbedder::new(16)));
    let score = metric.score("the cat sat", "the cat sat").await.unwrap();
    assert!((score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_scoring_is_deterministic() {
    let metric = SemanticSimilarity::new(Arc::new(HashEmbedder::new(16)));
    let a = metric.score("one text", "another text").await.unwrap();
    let b = metric.score("one text", "another text").await.unwrap();
    assert_eq!(a, b);
    assert!((0.0..=1.0).contains(&a));
}

#[tokio::test]
async fn test_mixed_dimensions_rejected() {
    let metric = SemanticSimilarity::new(Arc::new(MixedDimEmbedder));
    let err = metric.score("candidate", "reference").await.unwrap_err();
    assert!(matches!(err, ProviderError::DimensionMismatch { .. }));
}

#[tokio::test]
async fn test_provider_shared_across_metrics() {
    // One provider instance feeds two metrics concurrently.
    let embedder: Arc<dyn Embedder> = Arc::new(HashEmbedder::new(8));
    let m1 = SemanticSimilarity::new(embedder.clone());
    let m2 = SemanticSimilarity::new(embedder);
    let (a, b) = tokio::join!(m1.score("x", "y"), m2.score("x", "y"));
    assert_eq!(a.unwrap(), b.unwrap());
}

#[tokio::test]
async fn test_relevance_of_restated_question_is_one() {
    let llm = CannedLlm::new(&[
        r#"{"question": "Where was Einstein born?", "noncommittal": false}"#,
        r#"{"question": "Where was Einstein born?", "noncommittal": false}"#,
        r#"{"question": "Where was Einstein born?", "noncommittal": false}"#,
    ]);
    let metric = AnswerRelevance::new(Arc::new(HashEmbedder::new(16)), Arc::new(llm), 3);
    let score = metric
        .score(
            "Where was Einstein born?",
            "Einstein was born in Germany.",
            &["Einstein was a German-born physicist.".to_string()],
        )
        .await
        .unwrap();
    assert!((score - 1.0).abs() < 1e-5);
}

#[tokio::test]
async fn test_noncommittal_answer_scores_zero() {
    let llm = CannedLlm::new(&[
        r#"{"question": "Where was Einstein born?", "noncommittal": false}"#,
        r#"{"question": "Where was Einstein born?", "noncommittal": true}"#,
    ]);
    let metric = AnswerRelevance::new(Arc::new(HashEmbedder::new(16)), Arc::new(llm), 2);
    let score = metric
        .score("Where was Einstein born?", "I don't know.", &[])
        .await
        .unwrap();
    assert_eq!(score, 0.0);
}

#[tokio::test]
async fn test_relevance_rejects_empty_inputs() {
    let llm = CannedLlm::new(&[r#"{"question": "q", "noncommittal": false}"#]);
    let metric = AnswerRelevance::new(Arc::new(HashEmbedder::new(16)), Arc::new(llm), 1);
    let err = metric.score("", "some answer", &[]).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_recall_counts_attributed_fraction() {
    let llm = CannedLlm::new(&[r#"[
        {"statement": "a", "reason": "r", "Attributed": "1"},
        {"statement": "b", "reason": "r", "Attributed": "0"},
        {"statement": "c", "reason": "r", "Attributed": "1"},
        {"statement": "d", "reason": "r", "Attributed": "0"}
    ]"#]);
    let metric = ContextRecall::new(Arc::new(llm));
    let score = metric
        .score("q", &["ctx".to_string()], "ground truth text")
        .await
        .unwrap();
    assert!((score - 0.5).abs() < 1e-6);
}

#[tokio::test]
async fn test_recall_surfaces_unparseable_output() {
    let llm = CannedLlm::new(&["I cannot classify that."]);
    let metric = ContextRecall::new(Arc::new(llm));
    let err = metric
        .score("q", &[], "ground truth text")
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::InvalidResponse { .. }));
}
