//! Basic, conditional and discrete probability, plus Venn diagrams.
//!
//! Probabilities are drawn as whole hundredths so the numbers printed in the
//! question are exactly the numbers used in the computation.

use rand::seq::index;
use rand::{Rng, RngCore};

use super::{from_pool, pick, PoolItem};
use crate::quiz::options::{self, AnswerFormat, DEFAULT_OPTION_COUNT};
use crate::quiz::{Question, Topic};

/// Renders a probability given in hundredths without trailing zeros.
pub fn prob(hundredths: u32) -> String {
    let text = format!("{:.2}", hundredths as f64 / 100.0);
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

#[allow(clippy::too_many_arguments)]
fn numeric(
    rng: &mut dyn RngCore,
    topic: Topic,
    variant: &str,
    text: String,
    answer: f64,
    confusable: f64,
    format: AnswerFormat,
    working: String,
) -> Question {
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, Some(confusable), format);
    let shown = choices.answer().to_string();
    Question::new(topic, variant, text, choices, format!("{} = {}", working, shown))
}

const BASICS_STEPS: &str = "TI-84 Calculator Steps:\n1. Use the HOME screen\n2. Addition rule: P(A∪B) = P(A) + P(B) - P(A∩B)\n3. Complement: P(A') = 1 - P(A)";

pub fn basic_probability(rng: &mut dyn RngCore) -> Question {
    match rng.gen_range(0..4) {
        0 => {
            let a: u32 = rng.gen_range(1..=8) * 10;
            let b: u32 = rng.gen_range(1..=8) * 10;
            let low = (a + b).saturating_sub(100).max(1);
            let both = rng.gen_range(low..=a.min(b));
            addition_rule(rng, a, b, both)
        }
        1 => {
            let a = rng.gen_range(1..=9) * 10;
            let answer = (100 - a) as f64 / 100.0;
            numeric(
                rng,
                Topic::BasicProbability,
                "complement",
                format!("If P(A) = {}, what is P(A')?", prob(a)),
                answer,
                a as f64 / 100.0,
                AnswerFormat::Proportion,
                format!("P(A') = 1 - P(A) = 1 - {}", prob(a)),
            )
            .with_hint("Use the complement rule: P(A') = 1 - P(A).")
            .with_calculator_steps(BASICS_STEPS)
        }
        2 => {
            let a = rng.gen_range(1..=9) * 10;
            let b = rng.gen_range(1..=9) * 10;
            let (pa, pb) = (a as f64 / 100.0, b as f64 / 100.0);
            numeric(
                rng,
                Topic::BasicProbability,
                "multiplication",
                format!(
                    "Events A and B are independent with P(A) = {} and P(B) = {}. What is the probability that both occur?",
                    prob(a),
                    prob(b)
                ),
                pa * pb,
                pa + pb - pa * pb,
                AnswerFormat::Proportion,
                format!("P(A∩B) = P(A) × P(B) = {} × {}", prob(a), prob(b)),
            )
            .with_hint("For independent events, multiply: P(A∩B) = P(A) × P(B).")
            .with_calculator_steps(BASICS_STEPS)
        }
        _ => from_pool(
            rng,
            Topic::BasicProbability,
            BASIC_CONCEPTS,
            "Think about how each kind of probability is determined.",
        )
        .with_calculator_steps("This is a conceptual question that doesn't require calculator computation."),
    }
}

/// P(A∪B) from P(A), P(B) and P(A∩B), all in hundredths.
pub fn addition_rule<R: Rng + ?Sized>(rng: &mut R, a: u32, b: u32, both: u32) -> Question {
    let union = (a + b - both) as f64 / 100.0;
    let choices = options::generate(
        rng,
        union,
        DEFAULT_OPTION_COUNT,
        Some(((a + b) as f64 / 100.0).min(1.0)),
        AnswerFormat::Proportion,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::BasicProbability,
        "addition",
        format!(
            "If P(A) = {}, P(B) = {}, and P(A∩B) = {}, what is P(A∪B)?",
            prob(a),
            prob(b),
            prob(both)
        ),
        choices,
        format!(
            "P(A∪B) = P(A) + P(B) - P(A∩B) = {} + {} - {} = {}",
            prob(a),
            prob(b),
            prob(both),
            shown
        ),
    )
    .with_hint("Use the addition rule; don't count the overlap twice.")
    .with_calculator_steps(BASICS_STEPS)
    .with_example("If P(A) = 0.3, P(B) = 0.4, P(A∩B) = 0.1\nP(A∪B) = 0.3 + 0.4 - 0.1 = 0.6")
}

const BASIC_CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "Which type of probability is based on long-run frequencies of outcomes in repeated trials?",
        options: &["Experimental", "Theoretical", "Subjective"],
        correct: 0,
        explanation: "Experimental probability comes from observed outcomes of repeated trials.",
    },
    PoolItem {
        question: "If two events are disjoint (mutually exclusive), what is true about their intersection?",
        options: &["P(A∩B) = 0", "P(A∩B) = 1", "P(A∩B) = P(A) × P(B)", "P(A∩B) = P(A) + P(B)"],
        correct: 0,
        explanation: "Disjoint events cannot occur together, so their intersection has probability zero.",
    },
    PoolItem {
        question: "What is the primary characteristic of a subjective probability?",
        options: &["It's based on personal judgment", "It's derived from mathematical formulas", "It requires repeated experiments", "It's always accurate"],
        correct: 0,
        explanation: "Subjective probability reflects personal judgment or belief.",
    },
    PoolItem {
        question: "Which of these can NOT be a probability?",
        options: &["1.2", "0", "0.5", "1"],
        correct: 0,
        explanation: "Every probability lies between 0 and 1 inclusive.",
    },
];

const CONDITIONAL_STEPS: &str = "Home screen: P(A∩B) / P(A)";

pub fn conditional_probability(rng: &mut dyn RngCore) -> Question {
    match rng.gen_range(0..3) {
        0 => {
            let a: u32 = rng.gen_range(2..=9) * 10;
            let b: u32 = rng.gen_range(2..=9) * 10;
            let low = (a + b).saturating_sub(100).max(5);
            let high = a.min(b);
            let both = if low <= high { rng.gen_range(low..=high) } else { high };
            let given = both as f64 / a as f64;
            numeric(
                rng,
                Topic::ConditionalProbability,
                "definition",
                format!(
                    "If P(A) = {}, P(B) = {} and P(A∩B) = {}, what is P(B|A)?",
                    prob(a),
                    prob(b),
                    prob(both)
                ),
                given,
                both as f64 / b as f64,
                AnswerFormat::Proportion,
                format!("P(B|A) = P(A∩B) / P(A) = {} / {}", prob(both), prob(a)),
            )
            .with_hint("Condition on A: divide the overlap by P(A), not P(B).")
            .with_calculator_steps(CONDITIONAL_STEPS)
        }
        1 => {
            let a = rng.gen_range(1..=9) * 10;
            let b_given_a = rng.gen_range(1..=9) * 10;
            let (pa, pba) = (a as f64 / 100.0, b_given_a as f64 / 100.0);
            numeric(
                rng,
                Topic::ConditionalProbability,
                "general-multiplication",
                format!(
                    "P(A) = {} and P(B|A) = {}. What is P(A∩B)?",
                    prob(a),
                    prob(b_given_a)
                ),
                pa * pba,
                pba,
                AnswerFormat::Proportion,
                format!("P(A∩B) = P(A) × P(B|A) = {} × {}", prob(a), prob(b_given_a)),
            )
            .with_hint("Use the general multiplication rule: P(A∩B) = P(A) × P(B|A).")
            .with_calculator_steps("Home screen: P(A) × P(B|A)")
        }
        _ => {
            let counts: [u32; 4] = [
                rng.gen_range(5..=40),
                rng.gen_range(5..=40),
                rng.gen_range(5..=40),
                rng.gen_range(5..=40),
            ];
            two_way_table(rng, counts)
        }
    }
}

const TABLE_SUBJECTS: &[&str] = &["students", "shoppers", "patients", "voters"];

/// `counts` are `[A∧B, A∧¬B, ¬A∧B, ¬A∧¬B]`; asks P(B | A).
pub fn two_way_table<R: Rng + ?Sized>(rng: &mut R, counts: [u32; 4]) -> Question {
    let [ab, a_not_b, not_a_b, neither] = counts;
    let subject = pick(rng, TABLE_SUBJECTS);
    let answer = ab as f64 / (ab + a_not_b) as f64;
    let reversed = ab as f64 / (ab + not_a_b) as f64;
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, Some(reversed), AnswerFormat::Proportion);
    let shown = choices.answer().to_string();
    Question::new(
        Topic::ConditionalProbability,
        "two-way-table",
        format!(
            "A survey of {} found: {} are in A and B, {} are in A only, {} are in B only, {} are in neither. If one of those in A is chosen at random, what is the probability they are also in B?",
            subject, ab, a_not_b, not_a_b, neither
        ),
        choices,
        format!(
            "P(B|A) = {} / ({} + {}) = {}",
            ab, ab, a_not_b, shown
        ),
    )
    .with_hint("Restrict attention to the A row only.")
    .with_calculator_steps(format!("Home screen: {} / ({} + {})", ab, ab, a_not_b))
}

const VENN_PAIRS: &[(&str, &str)] = &[
    ("rock music", "country music"),
    ("Science", "Business"),
    ("basketball", "football"),
    ("pizza", "burgers"),
    ("Math", "English"),
    ("Art", "Music"),
];

pub fn venn_diagram(rng: &mut dyn RngCore) -> Question {
    let (first, second) = VENN_PAIRS[rng.gen_range(0..VENN_PAIRS.len())];
    let a: u32 = rng.gen_range(20..=60);
    let b: u32 = rng.gen_range(20..=60);
    let low = (a + b).saturating_sub(100).max(5);
    let both = rng.gen_range(low..=a.min(b));
    let union = a + b - both;
    let setup = format!(
        "In a survey, {}% of respondents like {}, {}% like {}, and {}% like both.",
        a, first, b, second, both
    );

    let (variant, question, answer, confusable, working) = match rng.gen_range(0..3) {
        0 => (
            "union",
            format!("What percentage like {} or {}?", first, second),
            union,
            a + b,
            format!("P(A∪B) = {}% + {}% - {}%", a, b, both),
        ),
        1 => (
            "only",
            format!("What percentage like {} but not {}?", first, second),
            a - both,
            a + b - 2 * both,
            format!("P(A and not B) = {}% - {}%", a, both),
        ),
        _ => (
            "neither",
            format!("What percentage like neither {} nor {}?", first, second),
            100 - union,
            union,
            format!("P(neither) = 100% - ({}% + {}% - {}%)", a, b, both),
        ),
    };
    let choices = options::generate(
        rng,
        answer as f64,
        DEFAULT_OPTION_COUNT,
        Some(confusable as f64),
        AnswerFormat::Integer,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::VennDiagrams,
        variant,
        format!("{} {}", setup, question),
        choices,
        format!("{} = {}%", working, shown),
    )
    .with_hint("Draw the two circles and fill in the overlap first.")
    .with_calculator_steps("This is a direct application of the addition rule.")
}

/// A discrete distribution: distinct values with probabilities in tenths
/// that sum to exactly one.
pub fn sample_distribution<R: Rng + ?Sized>(rng: &mut R) -> Vec<(u32, u32)> {
    let n = rng.gen_range(3..=5);
    let mut values: Vec<u32> = index::sample(rng, 10, n).into_iter().map(|v| v as u32).collect();
    values.sort_unstable();
    let mut cuts: Vec<u32> = index::sample(rng, 9, n - 1)
        .into_iter()
        .map(|c| c as u32 + 1)
        .collect();
    cuts.sort_unstable();
    cuts.push(10);
    let mut previous = 0;
    values
        .into_iter()
        .zip(cuts)
        .map(|(value, cut)| {
            let tenths = cut - previous;
            previous = cut;
            (value, tenths)
        })
        .collect()
}

pub fn expected_value(distribution: &[(u32, u32)]) -> f64 {
    distribution
        .iter()
        .map(|(x, p)| *x as f64 * *p as f64 / 10.0)
        .sum()
}

pub fn variance(distribution: &[(u32, u32)]) -> f64 {
    let mu = expected_value(distribution);
    distribution
        .iter()
        .map(|(x, p)| (*x as f64 - mu).powi(2) * *p as f64 / 10.0)
        .sum()
}

fn describe_distribution(distribution: &[(u32, u32)]) -> String {
    distribution
        .iter()
        .map(|(x, p)| format!("P(X={})={}", x, prob(p * 10)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn discrete_distribution(rng: &mut dyn RngCore) -> Question {
    let distribution = sample_distribution(rng);
    let ask = rng.gen_range(0..3);
    distribution_question(rng, &distribution, ask)
}

/// `ask`: 0 = expected value, 1 = variance, otherwise an upper tail.
pub fn distribution_question<R: Rng + ?Sized>(
    rng: &mut R,
    distribution: &[(u32, u32)],
    ask: u32,
) -> Question {
    let table = describe_distribution(distribution);
    let mu = expected_value(distribution);
    let (variant, text, answer, confusable, format, working, hint) = match ask {
        0 => (
            "expected-value",
            format!(
                "A discrete random variable X has the distribution {}. What is E(X)?",
                table
            ),
            mu,
            distribution.iter().map(|(x, _)| *x as f64).sum::<f64>() / distribution.len() as f64,
            AnswerFormat::Fixed2,
            format!(
                "E(X) = Σ x·P(X=x) = {}",
                distribution
                    .iter()
                    .map(|(x, p)| format!("{}({})", x, prob(p * 10)))
                    .collect::<Vec<_>>()
                    .join(" + ")
            ),
            "Multiply each value by its probability and add.",
        ),
        1 => {
            let var = variance(distribution);
            (
                "variance",
                format!(
                    "A discrete random variable X has the distribution {}. What is Var(X)?",
                    table
                ),
                var,
                var.sqrt(),
                AnswerFormat::Fixed2,
                format!("E(X) = {:.2}; Var(X) = Σ (x - μ)²·P(X=x)", mu),
                "Find E(X) first, then weight the squared deviations by their probabilities.",
            )
        }
        _ => {
            let threshold = distribution
                .get(distribution.len() / 2)
                .map(|(x, _)| *x)
                .unwrap_or_default();
            let tail: u32 = distribution
                .iter()
                .filter(|(x, _)| *x >= threshold)
                .map(|(_, p)| p)
                .sum();
            let strict: u32 = distribution
                .iter()
                .filter(|(x, _)| *x > threshold)
                .map(|(_, p)| p)
                .sum();
            (
                "tail",
                format!(
                    "A random variable X has the distribution {}. What is P(X ≥ {})?",
                    table, threshold
                ),
                tail as f64 / 10.0,
                strict as f64 / 10.0,
                AnswerFormat::Proportion,
                format!("P(X ≥ {}) = sum of P(X=x) for x ≥ {}", threshold, threshold),
                "Add the probabilities of every value at or above the threshold.",
            )
        }
    };
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, Some(confusable), format);
    let shown = choices.answer().to_string();
    let lists = format!(
        "L1: {}\nL2: {}\nSTAT → CALC → 1:1-Var Stats L1, L2\nx̄ = E(X), σx = √Var(X)",
        distribution.iter().map(|(x, _)| x.to_string()).collect::<Vec<_>>().join(", "),
        distribution.iter().map(|(_, p)| prob(p * 10)).collect::<Vec<_>>().join(", "),
    );
    Question::new(
        Topic::ProbabilityDistributions,
        variant,
        text,
        choices,
        format!("{} = {}", working, shown),
    )
    .with_hint(hint)
    .with_calculator_steps("Enter values in L1 and probabilities in L2, then run 1-Var Stats L1, L2.")
    .with_example(lists)
}
