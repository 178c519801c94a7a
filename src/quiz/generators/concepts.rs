//! Hand-written pools: variable types, formulas, concepts and true/false.

use rand::{Rng, RngCore};

use super::{from_pool, from_statements, PoolItem, Statement};
use crate::quiz::options::shuffle_fixed;
use crate::quiz::{Question, Topic};

struct Variable {
    name: &'static str,
    kind: usize,
    reason: &'static str,
}

const VARIABLE_KINDS: [&str; 3] = ["Categorical", "Quantitative Discrete", "Quantitative Continuous"];

const VARIABLES: &[Variable] = &[
    Variable { name: "age in years", kind: 2, reason: "age is measured on a continuous scale and can take any value within a range" },
    Variable { name: "number of siblings", kind: 1, reason: "it is a countable whole number" },
    Variable { name: "hair color", kind: 0, reason: "hair color is a quality that cannot be measured numerically" },
    Variable { name: "height in centimeters", kind: 2, reason: "height can take any value within a range" },
    Variable { name: "zip code", kind: 0, reason: "although written with digits, a zip code is a label for an area and arithmetic on it is meaningless" },
    Variable { name: "number of pets", kind: 1, reason: "it is a countable whole number" },
    Variable { name: "blood type", kind: 0, reason: "blood type is a category with no numerical value" },
    Variable { name: "temperature in Celsius", kind: 2, reason: "temperature is measured on a continuous scale" },
    Variable { name: "marital status", kind: 0, reason: "it records categories such as single or married" },
    Variable { name: "number of students in a classroom", kind: 1, reason: "students are counted in whole numbers" },
    Variable { name: "time it takes to run a marathon", kind: 2, reason: "time is measured on a continuous scale" },
    Variable { name: "political affiliation", kind: 0, reason: "it falls into named categories" },
    Variable { name: "weight of a bag of apples", kind: 2, reason: "weight is measured and can be any value within a range" },
    Variable { name: "number of cars in a parking lot", kind: 1, reason: "cars are counted in whole numbers" },
];

pub fn variable_types(rng: &mut dyn RngCore) -> Question {
    let index = rng.gen_range(0..VARIABLES.len());
    let variable = &VARIABLES[index];
    let choices = shuffle_fixed(rng, &VARIABLE_KINDS, variable.kind);
    Question::new(
        Topic::VariableTypes,
        &format!("item-{}", index),
        format!("Which type of variable is {}?", variable.name),
        choices,
        format!(
            "{} is a {} variable because {}.",
            capitalize(variable.name),
            VARIABLE_KINDS[variable.kind].to_lowercase(),
            variable.reason
        ),
    )
    .with_hint("Is the value a measurement, a count, or a label?")
    .with_calculator_steps("Conceptual question, no calculator needed.")
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

const FORMULAS: &[PoolItem] = &[
    PoolItem {
        question: "What is the formula for the standard deviation of a sample?",
        options: &["√(Σ(x-x̄)²/n)", "√(Σ(x-x̄)²/(n-1))", "Σ(x-x̄)²/n", "Σ(x-x̄)²/(n-1)"],
        correct: 1,
        explanation: "The sample standard deviation uses n-1 in the denominator (Bessel's correction) to give an unbiased estimate.",
    },
    PoolItem {
        question: "What is the formula for the mean of a dataset?",
        options: &["Σx/n", "Σx/(n-1)", "√(Σx²/n)", "Σx²/n"],
        correct: 0,
        explanation: "The mean is the sum of all values divided by the number of values: x̄ = Σx/n.",
    },
    PoolItem {
        question: "What is the formula for the variance of a sample?",
        options: &["Σ(x-x̄)²/n", "Σ(x-x̄)²/(n-1)", "√(Σ(x-x̄)²/n)", "√(Σ(x-x̄)²/(n-1))"],
        correct: 1,
        explanation: "The sample variance divides the squared deviations by n-1.",
    },
    PoolItem {
        question: "What is the formula for the correlation coefficient?",
        options: &["Σxy/n", "Σ(x-x̄)(y-ȳ)/n", "Σ(x-x̄)(y-ȳ)/(n-1)", "Σ(x-x̄)(y-ȳ)/(n·sx·sy)"],
        correct: 3,
        explanation: "r is the covariance divided by the product of the standard deviations.",
    },
    PoolItem {
        question: "What is the formula for a z-score?",
        options: &["(x-μ)/σ", "(μ-x)/σ", "σ/(x-μ)", "(x-μ)·σ"],
        correct: 0,
        explanation: "A z-score is the distance from the mean measured in standard deviations: z = (x-μ)/σ.",
    },
    PoolItem {
        question: "What is the formula for the number of combinations of r items chosen from n?",
        options: &["n!/(r!(n-r)!)", "n!/(n-r)!", "n!/r!", "nʳ"],
        correct: 0,
        explanation: "Combinations ignore order, so the n!/(n-r)! arrangements are divided by the r! orderings of each group.",
    },
    PoolItem {
        question: "What is the formula for the interquartile range?",
        options: &["Q3 - Q1", "Q3 + Q1", "max - min", "(Q3 - Q1)/2"],
        correct: 0,
        explanation: "The IQR is the spread of the middle half of the data: Q3 - Q1.",
    },
];

pub fn formulas(rng: &mut dyn RngCore) -> Question {
    from_pool(
        rng,
        Topic::Formulas,
        FORMULAS,
        "Remember the key formulas and when to use n versus n-1.",
    )
}

const CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "What is the difference between a parameter and a statistic?",
        options: &[
            "A parameter describes a population, a statistic describes a sample",
            "A statistic describes a population, a parameter describes a sample",
            "They are the same thing",
            "Parameters are always larger than statistics",
        ],
        correct: 0,
        explanation: "A parameter is a numerical characteristic of a population, while a statistic is a numerical characteristic of a sample.",
    },
    PoolItem {
        question: "What is the difference between descriptive and inferential statistics?",
        options: &[
            "Descriptive summarizes data, inferential draws conclusions about a population",
            "Inferential summarizes data, descriptive draws conclusions about a population",
            "They are the same thing",
            "Descriptive statistics are always more accurate",
        ],
        correct: 0,
        explanation: "Descriptive statistics summarize the data at hand; inferential statistics use samples to draw conclusions about populations.",
    },
    PoolItem {
        question: "What is the difference between a sample and a population?",
        options: &[
            "A sample is a subset of a population",
            "A population is a subset of a sample",
            "They are the same thing",
            "A sample is always larger than a population",
        ],
        correct: 0,
        explanation: "A sample is a subset of the population used to make inferences about the whole population.",
    },
    PoolItem {
        question: "Which measure of center is most resistant to outliers?",
        options: &["Median", "Mean", "Range", "Standard deviation"],
        correct: 0,
        explanation: "The median depends only on the middle of the ordered data, so extreme values barely move it.",
    },
    PoolItem {
        question: "In a left-skewed distribution, how do the mean and median usually compare?",
        options: &[
            "The mean is less than the median",
            "The mean is greater than the median",
            "They are always equal",
            "The median is always zero",
        ],
        correct: 0,
        explanation: "The long left tail pulls the mean toward smaller values, below the median.",
    },
];

pub fn conceptual(rng: &mut dyn RngCore) -> Question {
    from_pool(
        rng,
        Topic::ConceptualQuestions,
        CONCEPTS,
        "Think about the fundamental vocabulary of statistics.",
    )
}

const EXAM1_STATEMENTS: &[Statement] = &[
    Statement { text: "The mean is usually greater than the median in a right-skewed distribution.", is_true: true, explanation: "The mean is pulled toward the long right tail." },
    Statement { text: "Correlation implies causation.", is_true: false, explanation: "Two variables can be correlated without one causing the other." },
    Statement { text: "The standard deviation can never be negative.", is_true: true, explanation: "It is the square root of an average of squared deviations." },
    Statement { text: "A z-score of 0 means the value is at the mean.", is_true: true, explanation: "z = (x-μ)/σ is zero exactly when x = μ." },
    Statement { text: "The median is resistant to outliers.", is_true: true, explanation: "Extreme values do not change the middle of the ordered data." },
    Statement { text: "A correlation coefficient of 0.9 indicates a weak relationship.", is_true: false, explanation: "r = 0.9 indicates a very strong positive linear relationship." },
    Statement { text: "The mode is always unique in a dataset.", is_true: false, explanation: "A dataset can have several modes or none at all." },
    Statement { text: "In a normal distribution, the mean equals the median.", is_true: true, explanation: "The normal distribution is symmetric about its mean." },
    Statement { text: "Adding the same constant to every value changes the standard deviation.", is_true: false, explanation: "Shifting every value moves the center but leaves the spread unchanged." },
    Statement { text: "The range uses only the two most extreme values.", is_true: true, explanation: "Range = max - min." },
    Statement { text: "r² can be negative when the slope is negative.", is_true: false, explanation: "r² is a square, so it lies between 0 and 1." },
    Statement { text: "A sample standard deviation divides by n-1.", is_true: true, explanation: "Bessel's correction makes the sample variance unbiased." },
];

pub fn true_false(rng: &mut dyn RngCore) -> Question {
    from_statements(
        rng,
        Topic::TrueFalse,
        EXAM1_STATEMENTS,
        "Consider the statistical principle involved.",
    )
}

const EXAM2_STATEMENTS: &[Statement] = &[
    Statement { text: "In a standard normal distribution, the total area under the curve equals 1.", is_true: true, explanation: "The total area under any probability density function is 1." },
    Statement { text: "Subjective probability can be calculated using mathematical formulas.", is_true: false, explanation: "Subjective probability reflects personal judgment, not a formula." },
    Statement { text: "In a Venn diagram, disjoint events have no overlap.", is_true: true, explanation: "Disjoint events cannot occur together, so their intersection is empty." },
    Statement { text: "The variance of a probability distribution is always positive or zero.", is_true: true, explanation: "It is a weighted average of squared deviations." },
    Statement { text: "The expected value of a discrete random variable can be negative.", is_true: true, explanation: "It is a weighted average and follows the values the variable takes." },
    Statement { text: "In a normal distribution, the mean, median, and mode are all equal.", is_true: true, explanation: "The curve is symmetric and single-peaked at the mean." },
    Statement { text: "The standard normal distribution has mean 0 and standard deviation 1.", is_true: true, explanation: "That is the definition of the Z distribution." },
    Statement { text: "All normal distributions have the same spread regardless of their standard deviation.", is_true: false, explanation: "A larger σ gives a flatter, wider curve." },
    Statement { text: "A binomial experiment has exactly two possible outcomes for each trial.", is_true: true, explanation: "Each trial is a success or a failure." },
    Statement { text: "The standard deviation of a binomial distribution is n×p.", is_true: false, explanation: "n×p is the mean; the standard deviation is √(n×p×(1-p))." },
    Statement { text: "The Central Limit Theorem says a sample mean always equals the population mean.", is_true: false, explanation: "It describes the distribution of sample means, not any single sample." },
    Statement { text: "The standard deviation of the sampling distribution of x̄ is σ/√n.", is_true: true, explanation: "That quantity is the standard error of the mean." },
    Statement { text: "If two events are independent, knowing one occurred tells you nothing about the other.", is_true: true, explanation: "Independence means P(A|B) = P(A)." },
    Statement { text: "If P(A|B) = P(A), then events A and B are independent.", is_true: true, explanation: "This is one of the equivalent definitions of independence." },
    Statement { text: "Disjoint events with nonzero probabilities are independent.", is_true: false, explanation: "If one occurs the other cannot, so knowing one changes the other's probability to 0." },
];

pub fn probability_true_false(rng: &mut dyn RngCore) -> Question {
    from_statements(
        rng,
        Topic::ProbabilityTrueFalse,
        EXAM2_STATEMENTS,
        "Think about the definitions and properties of the concept involved.",
    )
}
