pub mod bank;
pub mod generators;
pub mod options;
pub mod score;
pub mod stats;
pub mod topic;
pub mod tutor;

use xxhash_rust::xxh3::xxh3_64;

pub use bank::{QuestionBank, Session};
pub use score::Scoreboard;
pub use topic::{ExamGroup, Topic};

const UNIT_SEPARATOR: char = '\u{1f}';

/// Optional teaching material attached to a question.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Extras {
    /// Conceptual nudge shown on request, independent of the explanation.
    pub hint: Option<String>,
    /// TI-84 keystrokes.
    pub calculator_steps: Option<String>,
    /// Worked calculator example, one step per line.
    pub example: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Question {
    pub topic: Topic,
    /// Topic variant tag, e.g. `descriptive-stats/median`.
    pub kind: String,
    pub text: String,
    pub options: Vec<String>,
    pub correct: usize,
    pub explanation: String,
    pub extras: Extras,
}

impl Question {
    pub fn new(
        topic: Topic,
        variant: &str,
        text: String,
        choices: options::Choices,
        explanation: String,
    ) -> Self {
        let kind = if variant.is_empty() {
            topic.slug().to_string()
        } else {
            format!("{}/{}", topic.slug(), variant)
        };
        Self {
            topic,
            kind,
            text,
            options: choices.options,
            correct: choices.correct,
            explanation,
            extras: Extras::default(),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.extras.hint = Some(hint.into());
        self
    }

    pub fn with_calculator_steps(mut self, steps: impl Into<String>) -> Self {
        self.extras.calculator_steps = Some(steps.into());
        self
    }

    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.extras.example = Some(example.into());
        self
    }

    pub fn correct_option(&self) -> &str {
        &self.options[self.correct]
    }

    pub fn is_correct(&self, answer: &str) -> bool {
        self.correct_option() == answer.trim()
    }

    /// Identity used for repetition checks: the text plus the rendered options.
    /// Stored in persisted sessions, so it must not depend on the toolchain.
    pub fn fingerprint(&self) -> u64 {
        let mut key = self.text.clone();
        for option in &self.options {
            key.push(UNIT_SEPARATOR);
            key.push_str(option);
        }
        xxh3_64(key.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use options::Choices;

    fn sample() -> Question {
        Question::new(
            Topic::ZScore,
            "",
            "What is z?".to_string(),
            Choices {
                options: vec!["1.00".into(), "2.00".into()],
                correct: 1,
            },
            "z = 2.00".to_string(),
        )
    }

    #[test]
    fn builder_fills_extras() {
        let question = sample().with_hint("subtract the mean").with_example("(120 - 100) / 10");
        assert_eq!(question.kind, "z-score");
        assert_eq!(question.extras.hint.as_deref(), Some("subtract the mean"));
        assert!(question.extras.calculator_steps.is_none());
        assert_eq!(question.correct_option(), "2.00");
        assert!(question.is_correct(" 2.00"));
        assert!(!question.is_correct("1.00"));
    }

    #[test]
    fn fingerprint_is_xxh3_of_the_separated_key() {
        let question = sample();
        assert_eq!(
            question.fingerprint(),
            xxh3_64("What is z?\u{1f}1.00\u{1f}2.00".as_bytes())
        );

        let mut shifted = sample();
        shifted.text = "What is z?1".to_string();
        shifted.options = vec![".00".into(), "2.00".into()];
        assert_ne!(question.fingerprint(), shifted.fingerprint());
    }

    #[test]
    fn fingerprint_depends_on_option_order() {
        let a = sample();
        let mut b = sample();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.options.reverse();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
