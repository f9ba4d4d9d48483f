//! Context recall: fraction of the ground-truth answer attributable
//! to the retrieved context
//!
//! The LLM classifies each ground-truth sentence as attributable to
//! the context or not; score = attributed / total.

use std::sync::Arc;

use serde_json::Value;
use sema_core::{Llm, ProviderError, Result};

use crate::output::extract_json;

const CLASSIFY_EXAMPLES: &str = r#"Given a context and an answer, analyze each sentence in the answer and classify if the sentence can be attributed to the given context or not. Use only "1" (yes) or "0" (no) as a binary classification. Respond with a JSON array of {"statement": "...", "reason": "...", "Attributed": "0"|"1"}.

Question: What can you tell me about Albert Einstein?
Context: Albert Einstein (14 March 1879 - 18 April 1955) was a German-born theoretical physicist, widely held to be one of the greatest and most influential scientists of all time. Best known for developing the theory of relativity, he also made important contributions to quantum mechanics. He received the 1921 Nobel Prize in Physics for his services to theoretical physics, and especially for his discovery of the law of the photoelectric effect.
Answer: Albert Einstein born in 14 March 1879 was a German-born theoretical physicist, widely held to be one of the greatest and most influential scientists of all time. He received the 1921 Nobel Prize in Physics for his services to theoretical physics. He published 4 papers in 1905. Einstein moved to Switzerland in 1895.
Classification: [
  {"statement": "Albert Einstein, born on 14 March 1879, was a German-born theoretical physicist, widely held to be one of the greatest and most influential scientists of all time.", "reason": "The date of birth of Einstein is mentioned clearly in the context.", "Attributed": "1"},
  {"statement": "He received the 1921 Nobel Prize in Physics for his services to theoretical physics.", "reason": "The exact sentence is present in the given context.", "Attributed": "1"},
  {"statement": "He published 4 papers in 1905.", "reason": "There is no mention about papers he wrote in the given context.", "Attributed": "0"},
  {"statement": "Einstein moved to Switzerland in 1895.", "reason": "There is no supporting evidence for this in the given context.", "Attributed": "0"}
]

Question: Who won the 2020 ICC world cup?
Context: Who won the 2022 ICC Men's T20 World Cup? England defeated Pakistan to win the World Cup.
Answer: England
Classification: [
  {"statement": "England won the 2022 ICC Men's T20 World Cup.", "reason": "From context it is clear that England defeated Pakistan to win the World Cup.", "Attributed": "1"}
]"#;

pub struct ContextRecall {
    llm: Arc<dyn Llm>,
}

impl ContextRecall {
    pub fn new(llm: Arc<dyn Llm>) -> Self {
        Self { llm }
    }

    pub async fn score(
        &self,
        question: &str,
        contexts: &[String],
        ground_truth: &str,
    ) -> Result<f32> {
        if ground_truth.trim().is_empty() {
            return Err(ProviderError::invalid_input("ground truth must be non-empty"));
        }

        let prompt = format!(
            "{}\n\nQuestion: {}\nContext: {}\nAnswer: {}\nClassification:",
            CLASSIFY_EXAMPLES,
            question,
            contexts.join("\n"),
            ground_truth,
        );

        let response = self.llm.complete(&prompt).await?;
        let value = extract_json(&response).ok_or_else(|| {
            ProviderError::invalid_response("llm", "classification output is not JSON")
        })?;
        let items = value.as_array().ok_or_else(|| {
            ProviderError::invalid_response("llm", "classification output is not a JSON array")
        })?;
        if items.is_empty() {
            return Err(ProviderError::invalid_response(
                "llm",
                "classification output is empty",
            ));
        }

        let attributed = items.iter().filter(|item| is_attributed(item)).count();
        Ok(attributed as f32 / items.len() as f32)
    }
}

fn is_attributed(item: &Value) -> bool {
    match item.get("Attributed").or_else(|| item.get("attributed")) {
        Some(Value::String(s)) => s.trim() == "1",
        Some(Value::Number(n)) => n.as_i64() == Some(1),
        Some(Value::Bool(b)) => *b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attributed_flag_variants() {
        assert!(is_attributed(&serde_json::json!({"Attributed": "1"})));
        assert!(is_attributed(&serde_json::json!({"Attributed": 1})));
        assert!(is_attributed(&serde_json::json!({"attributed": true})));
        assert!(!is_attributed(&serde_json::json!({"Attributed": "0"})));
        assert!(!is_attributed(&serde_json::json!({"reason": "none"})));
    }
}
