//! Answer relevance: how well the answer addresses the question
//!
//! The LLM generates `strictness` candidate questions for the given
//! answer (and flags noncommittal answers); the score is the mean
//! cosine similarity between the original question and the generated
//! ones, zeroed when any sample was noncommittal. Answers with
//! incomplete, redundant or unnecessary information are penalized.
//! Scores range from 0 to 1, 1 being the best.

use std::sync::Arc;

use sema_core::{cosine, Embedder, Llm, ProviderError, Result};
use tracing::debug;

use crate::output::extract_json;

const QUESTION_GEN_EXAMPLES: &str = r#"Generate a question for the given answer and identify if the answer is noncommittal. Respond with JSON: {"question": "...", "noncommittal": true|false}

Answer: Albert Einstein was born in Germany.
Context: Albert Einstein was a German-born theoretical physicist who is widely held to be one of the greatest and most influential scientists of all time
Output: {"question":"Where was Albert Einstein born?","noncommittal":false}

Answer: It can change its skin color based on the temperature of its environment.
Context: A recent scientific study has discovered a new species of frog in the Amazon rainforest that has the unique ability to change its skin color based on the temperature of its environment.
Output: {"question":"What unique ability does the newly discovered species of frog have?","noncommittal":false}

Answer: Everest
Context: The tallest mountain on Earth, measured from sea level, is a renowned peak located in the Himalayas.
Output: {"question":"What is the tallest mountain on Earth?","noncommittal":false}

Answer: I don't know about the groundbreaking feature of the smartphone invented in 2023 as I am unaware of information beyond 2022.
Context: In 2023, a groundbreaking invention was announced: a smartphone with a battery life of one month, revolutionizing the way people use mobile technology.
Output: {"question":"What was the groundbreaking feature of the smartphone invented in 2023?","noncommittal":true}"#;

pub struct AnswerRelevance {
    embedder: Arc<dyn Embedder>,
    llm: Arc<dyn Llm>,
    strictness: usize,
}

impl AnswerRelevance {
    /// `strictness` is the number of questions generated per answer;
    /// 3 to 5 is the useful range.
    pub fn new(embedder: Arc<dyn Embedder>, llm: Arc<dyn Llm>, strictness: usize) -> Self {
        Self {
            embedder,
            llm,
            strictness: strictness.max(1),
        }
    }

    pub async fn score(&self, question: &str, answer: &str, contexts: &[String]) -> Result<f32> {
        if question.trim().is_empty() || answer.trim().is_empty() {
            return Err(ProviderError::invalid_input(
                "question and answer must be non-empty",
            ));
        }

        let prompt = format!(
            "{}\n\nAnswer: {}\nContext: {}\nOutput:",
            QUESTION_GEN_EXAMPLES,
            answer,
            contexts.join("\n"),
        );

        let outputs = self.llm.generate(&prompt, self.strictness).await?;

        let mut generated = Vec::with_capacity(outputs.len());
        let mut noncommittal = false;
        for output in &outputs {
            let value = extract_json(output).ok_or_else(|| {
                ProviderError::invalid_response("llm", "question generation output is not JSON")
            })?;
            let q = value
                .get("question")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .trim()
                .to_string();
            if q.is_empty() {
                return Err(ProviderError::invalid_response(
                    "llm",
                    "generated sample has no question",
                ));
            }
            noncommittal |= value
                .get("noncommittal")
                .map(|v| v.as_bool().unwrap_or(v.as_i64() == Some(1)))
                .unwrap_or(false);
            generated.push(q);
        }
        debug!(samples = generated.len(), noncommittal, "generated questions");

        let question_vec = self.embedder.embed(question).await?;
        let generated_vecs = self.embedder.embed_batch(&generated).await?;

        let mut total = 0.0;
        for vec in &generated_vecs {
            total += cosine(&question_vec, vec)?;
        }
        let mean = total / generated_vecs.len() as f32;

        if noncommittal {
            Ok(0.0)
        } else {
            Ok(mean.clamp(0.0, 1.0))
        }
    }
}
