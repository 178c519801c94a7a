use chatgpt::prelude::*;
use chatgpt::types::CompletionResponse;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::quiz::Question;

/// Optional LLM elaboration on wrong answers.
pub struct Tutor {
    persona: Persona,
    chat_gpt: ChatGPT,
}

impl Tutor {
    pub fn new(chat_gpt: ChatGPT, persona: Persona) -> Self {
        Self { persona, chat_gpt }
    }

    pub async fn explain_wrong_answer(&self, question: &Question, chosen: &str) -> Result<String> {
        debug!("Asking the tutor about {}", question.kind);
        let response: CompletionResponse = self
            .chat_gpt
            .send_message(prompt(question, chosen, self.persona))
            .await?;
        let content = response.message().content.clone();
        debug!("Tutor replied with {} characters", content.len());
        Ok(content)
    }
}

fn prompt(question: &Question, chosen: &str, persona: Persona) -> String {
    let mut prompt = format!(
        "You are a chat bot helping a student practise introductory statistics with a TI-84 calculator.
        The student answered this multiple-choice question:
        {}
        Options: {}.
        The student chose {}, but the correct answer is {}.
        Reference explanation: {}",
        question.text,
        question.options.join(" | "),
        chosen,
        question.correct_option(),
        question.explanation,
    );
    if let Some(steps) = &question.extras.calculator_steps {
        prompt.push_str(&format!("\nCalculator steps: {}", steps));
    }
    prompt.push_str(&format!(
        "\nExplain the most likely mistake and how to avoid it, in at most two short paragraphs. Write {}.",
        persona.voice()
    ));
    prompt
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Persona {
    #[default]
    Professor,
    Coach,
}

impl Persona {
    pub fn from_name(name: &str) -> Option<Persona> {
        match name.trim().to_ascii_lowercase().as_str() {
            "professor" => Some(Persona::Professor),
            "coach" => Some(Persona::Coach),
            _ => None,
        }
    }

    fn voice(&self) -> &'static str {
        match self {
            Persona::Professor => "like a patient statistics professor",
            Persona::Coach => "like an upbeat sports coach cheering the student on",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::options::Choices;
    use crate::quiz::Topic;

    #[test]
    fn prompt_names_both_answers_and_the_voice() {
        let question = Question::new(
            Topic::Counting,
            "permutation",
            "How many ways?".to_string(),
            Choices {
                options: vec!["120".into(), "720".into()],
                correct: 1,
            },
            "P(10, 3) = 720".to_string(),
        )
        .with_calculator_steps("10 → MATH → PRB → 2:nPr → 3");
        let text = prompt(&question, "120", Persona::Coach);
        assert!(text.contains("chose 120"));
        assert!(text.contains("correct answer is 720"));
        assert!(text.contains("2:nPr"));
        assert!(text.contains("sports coach"));
    }

    #[test]
    fn persona_names() {
        assert_eq!(Persona::from_name(" Coach "), Some(Persona::Coach));
        assert_eq!(Persona::from_name("professor"), Some(Persona::Professor));
        assert_eq!(Persona::from_name("pirate"), None);
    }
}
