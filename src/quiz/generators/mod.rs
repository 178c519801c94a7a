//! One generator per topic. Every generator is a pure function of the RNG it
//! is handed.

pub mod concepts;
pub mod counting;
pub mod descriptive;
pub mod distributions;
pub mod empirical;
pub mod probability;
pub mod regression;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use crate::quiz::options;
use crate::quiz::{Question, Topic};

pub type Generator = fn(&mut dyn RngCore) -> Question;

/// The generator that produces questions for `topic`.
pub fn for_topic(topic: Topic) -> Generator {
    match topic {
        Topic::VariableTypes => concepts::variable_types,
        Topic::DescriptiveStats => descriptive::descriptive_stats,
        Topic::Regression => regression::regression,
        Topic::EmpiricalRule => empirical::empirical_rule,
        Topic::Counting => counting::counting,
        Topic::MeanCorrection => descriptive::mean_correction,
        Topic::ZScore => descriptive::z_score,
        Topic::Formulas => concepts::formulas,
        Topic::EmpiricalRuleConcepts => empirical::empirical_rule_concepts,
        Topic::ConceptualQuestions => concepts::conceptual,
        Topic::TrueFalse => concepts::true_false,
        Topic::BasicProbability => probability::basic_probability,
        Topic::ConditionalProbability => probability::conditional_probability,
        Topic::BinomialDistribution => distributions::binomial,
        Topic::NormalDistribution => distributions::normal,
        Topic::SamplingDistributions => distributions::sampling,
        Topic::ProbabilityDistributions => probability::discrete_distribution,
        Topic::VennDiagrams => probability::venn_diagram,
        Topic::ProbabilityTrueFalse => concepts::probability_true_false,
    }
}

/// A hand-written multiple-choice item.
pub(crate) struct PoolItem {
    pub question: &'static str,
    pub options: &'static [&'static str],
    pub correct: usize,
    pub explanation: &'static str,
}

/// Picks an item from `pool` and shuffles its options.
pub(crate) fn from_pool<R: Rng + ?Sized>(
    rng: &mut R,
    topic: Topic,
    pool: &[PoolItem],
    hint: &str,
) -> Question {
    let index = rng.gen_range(0..pool.len());
    let item = &pool[index];
    let choices = options::shuffle_fixed(rng, item.options, item.correct);
    Question::new(
        topic,
        &format!("item-{}", index),
        item.question.to_string(),
        choices,
        item.explanation.to_string(),
    )
    .with_hint(hint)
}

pub(crate) struct Statement {
    pub text: &'static str,
    pub is_true: bool,
    pub explanation: &'static str,
}

/// True/False item; options are always `["True", "False"]` in that order.
pub(crate) fn from_statements<R: Rng + ?Sized>(
    rng: &mut R,
    topic: Topic,
    statements: &[Statement],
    hint: &str,
) -> Question {
    let index = rng.gen_range(0..statements.len());
    let statement = &statements[index];
    let verdict = if statement.is_true { "true" } else { "false" };
    Question::new(
        topic,
        &format!("statement-{}", index),
        format!("True or False: {}", statement.text),
        options::Choices {
            options: vec!["True".to_string(), "False".to_string()],
            correct: if statement.is_true { 0 } else { 1 },
        },
        format!("This statement is {}. {}", verdict, statement.explanation),
    )
    .with_hint(hint)
    .with_calculator_steps("This is a conceptual question.")
}

/// Picks one scenario template.
pub(crate) fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &'a [&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

pub(crate) fn join(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use crate::quiz::Question;

    /// Structural invariants every generated question must satisfy.
    pub fn assert_well_formed(question: &Question) {
        assert!(!question.text.is_empty());
        assert!(question.options.len() >= 2, "{:?}", question);
        assert!(question.correct < question.options.len(), "{:?}", question);
        let unique: HashSet<_> = question.options.iter().collect();
        assert_eq!(unique.len(), question.options.len(), "{:?}", question.options);
        assert!(!question.explanation.is_empty());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn every_generator_tags_its_own_topic() {
        let mut rng = StdRng::seed_from_u64(42);
        for topic in Topic::ALL {
            for _ in 0..25 {
                let question = for_topic(topic)(&mut rng);
                assert_eq!(question.topic, topic);
                assert!(question.kind.starts_with(topic.slug()));
                testing::assert_well_formed(&question);
            }
        }
    }

    #[test]
    fn computed_explanations_state_the_answer() {
        let mut rng = StdRng::seed_from_u64(43);
        for topic in Topic::ALL {
            for _ in 0..200 {
                let question = for_topic(topic)(&mut rng);
                if question.kind.contains("/item-") || question.kind.contains("/statement-") {
                    continue;
                }
                let answer = question.correct_option().to_lowercase();
                assert!(
                    question.explanation.to_lowercase().contains(&answer),
                    "{}: {:?} lacks {:?}",
                    question.kind,
                    question.explanation,
                    answer
                );
            }
        }
    }

    proptest! {
        #[test]
        fn generated_questions_are_well_formed(seed in any::<u64>(), pick in 0usize..19) {
            let mut rng = StdRng::seed_from_u64(seed);
            let topic = Topic::ALL[pick];
            let question = for_topic(topic)(&mut rng);
            let unique: std::collections::HashSet<_> = question.options.iter().collect();
            prop_assert_eq!(unique.len(), question.options.len());
            prop_assert!(question.correct < question.options.len());
        }
    }
}
