use rand::seq::SliceRandom;
use rand::{Rng, RngCore};

use super::{join, pick};
use crate::quiz::options::{self, AnswerFormat, DEFAULT_OPTION_COUNT};
use crate::quiz::{stats, Question, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Statistic {
    Mean,
    Median,
    SampleStd,
    Range,
    Iqr,
}

impl Statistic {
    const ALL: [Statistic; 5] = [
        Statistic::Mean,
        Statistic::Median,
        Statistic::SampleStd,
        Statistic::Range,
        Statistic::Iqr,
    ];

    fn label(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::SampleStd => "sample standard deviation",
            Statistic::Range => "range",
            Statistic::Iqr => "interquartile range (IQR)",
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Statistic::Mean => "mean",
            Statistic::Median => "median",
            Statistic::SampleStd => "std",
            Statistic::Range => "range",
            Statistic::Iqr => "iqr",
        }
    }

    pub fn compute(&self, data: &[f64]) -> f64 {
        match self {
            Statistic::Mean => stats::mean(data),
            Statistic::Median => stats::median(data),
            Statistic::SampleStd => stats::sample_std(data),
            Statistic::Range => stats::range(data),
            Statistic::Iqr => stats::iqr(data),
        }
    }
}

const DATA_TEMPLATES: &[&str] = &[
    "Given the data: {data}. What is the {stat}?",
    "A teacher recorded these quiz scores: {data}. What is the {stat} of the scores?",
    "The number of customers served each hour was: {data}. Find the {stat}.",
    "A runner logged these lap times in seconds: {data}. What is the {stat}?",
];

pub fn descriptive_stats(rng: &mut dyn RngCore) -> Question {
    let size = rng.gen_range(8..=12);
    let data: Vec<f64> = (0..size).map(|_| rng.gen_range(10..=50) as f64).collect();
    let statistic = *Statistic::ALL.choose(rng).unwrap_or(&Statistic::Mean);
    describe(rng, &data, statistic)
}

/// Builds the question for a given dataset and statistic.
pub fn describe<R: Rng + ?Sized>(rng: &mut R, data: &[f64], statistic: Statistic) -> Question {
    let answer = statistic.compute(data);
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, None, AnswerFormat::Fixed2);
    let shown = choices.answer().to_string();

    let mut sorted = data.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let working = match statistic {
        Statistic::Mean => format!(
            "Mean = ({}) / {} = {} / {}",
            join(data).replace(", ", " + "),
            data.len(),
            stats::sum(data),
            data.len()
        ),
        Statistic::Median => format!("Median = middle of the sorted data [{}]", join(&sorted)),
        Statistic::SampleStd => "s = √(Σ(x-x̄)²/(n-1))".to_string(),
        Statistic::Range => format!(
            "Range = max - min = {} - {}",
            sorted.last().copied().unwrap_or_default(),
            sorted.first().copied().unwrap_or_default()
        ),
        Statistic::Iqr => {
            let (q1, q3) = stats::quartiles(data);
            format!("Q1 = {}, Q3 = {}, IQR = Q3 - Q1", q1, q3)
        }
    };

    let text = pick(rng, DATA_TEMPLATES)
        .replace("{data}", &join(data))
        .replace("{stat}", statistic.label());
    let steps = match statistic {
        Statistic::Mean => "Enter data in L1 → STAT → CALC → 1:1-Var Stats → read x̄",
        Statistic::Median => "After 1-Var Stats, scroll down and read Med",
        Statistic::SampleStd => "After 1-Var Stats, read Sx",
        Statistic::Range => "After 1-Var Stats, read maxX and minX, then subtract",
        Statistic::Iqr => "After 1-Var Stats, scroll down, read Q1 and Q3, then subtract",
    };
    let hint = match statistic {
        Statistic::Mean => "Add all values and divide by how many there are.",
        Statistic::Median => "Sort the data and find the middle value.",
        Statistic::SampleStd => "For a sample, divide the squared deviations by n-1.",
        Statistic::Range => "Largest value minus smallest value.",
        Statistic::Iqr => "Find the medians of the lower and upper halves.",
    };

    Question::new(
        Topic::DescriptiveStats,
        statistic.tag(),
        text,
        choices,
        format!("{} = {}", working, shown),
    )
    .with_hint(hint)
    .with_calculator_steps(steps)
    .with_example(format!("L1: {}\nSTAT → CALC → 1:1-Var Stats\n{}", join(data), steps))
}

pub fn mean_correction(rng: &mut dyn RngCore) -> Question {
    if rng.gen_bool(0.5) {
        let n = rng.gen_range(10..=20);
        let old_mean = rng.gen_range(50..=100);
        let wrong_value = rng.gen_range(10..=40);
        let right_value = wrong_value + rng.gen_range(10..=30);
        corrected_mean(rng, n, old_mean, wrong_value, right_value)
    } else {
        constant_shift(rng)
    }
}

/// New mean after replacing one mis-recorded value.
pub fn corrected_mean<R: Rng + ?Sized>(
    rng: &mut R,
    n: u32,
    old_mean: i32,
    wrong_value: i32,
    right_value: i32,
) -> Question {
    let new_mean = old_mean as f64 + (right_value - wrong_value) as f64 / n as f64;
    // Forgetting to divide the correction by n is the classic slip.
    let slip = (old_mean + right_value - wrong_value) as f64;
    let choices = options::generate(
        rng,
        new_mean,
        DEFAULT_OPTION_COUNT,
        Some(slip),
        AnswerFormat::Fixed2,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::MeanCorrection,
        "corrected-mean",
        format!(
            "{} data values have a mean of {}. One value was recorded as {} but should be {}. What is the corrected mean?",
            n, old_mean, wrong_value, right_value
        ),
        choices,
        format!(
            "New mean = {} + ({} - {}) / {} = {}",
            old_mean, right_value, wrong_value, n, shown
        ),
    )
    .with_hint("The sum changes by (correct - wrong); spread that change over all n values.")
    .with_calculator_steps("Home screen: OldMean + (Correct - Wrong) / N")
}

fn constant_shift(rng: &mut dyn RngCore) -> Question {
    let c = rng.gen_range(2..=10);
    let options = [
        format!("It increases by {}", c),
        format!("It decreases by {}", c),
        format!("It is multiplied by {}", c),
        "It stays the same".to_string(),
    ];
    let (variant, text, correct, reason) = match rng.gen_range(0..3) {
        0 => (
            "add",
            format!("If you add {} to each value in a dataset, what happens to the mean?", c),
            0,
            format!("Adding {} to every value adds {} to the sum and so to the mean.", c, c),
        ),
        1 => (
            "subtract",
            format!("If you subtract {} from each value in a dataset, what happens to the mean?", c),
            1,
            format!("Subtracting {} from every value takes {} off the sum and so off the mean.", c, c),
        ),
        _ => (
            "multiply",
            format!("If you multiply each value in a dataset by {}, what happens to the mean?", c),
            2,
            format!("Multiplying every value by {} multiplies the sum, and so the mean, by {}.", c, c),
        ),
    };
    let fixed: Vec<&str> = options.iter().map(String::as_str).collect();
    let choices = options::shuffle_fixed(rng, &fixed, correct);
    let explanation = format!("{}: {}", choices.answer(), reason);
    Question::new(Topic::MeanCorrection, variant, text, choices, explanation)
        .with_hint("Think about how the same operation on every value moves the average.")
}

const Z_TEMPLATES: &[&str] = &[
    "What is the z-score for a value of {x} in a distribution with mean {mean} and standard deviation {std}?",
    "Exam scores have a mean of {mean} and a standard deviation of {std}. A student scored {x}. What is the student's z-score?",
    "Adult heights in a study have mean {mean} cm and standard deviation {std} cm. What is the z-score of a height of {x} cm?",
];

pub fn z_score(rng: &mut dyn RngCore) -> Question {
    let mean = rng.gen_range(50..=200);
    let std = rng.gen_range(5..=25);
    let value = mean + rng.gen_range(-30..=30);
    standard_score(rng, value, mean, std)
}

pub fn standard_score<R: Rng + ?Sized>(rng: &mut R, value: i32, mean: i32, std: i32) -> Question {
    let z = stats::z_score(value as f64, mean as f64, std as f64);
    // Dividing by the variance instead of σ.
    let confusable = (value - mean) as f64 / (std * std) as f64;
    let choices = options::generate(
        rng,
        z,
        DEFAULT_OPTION_COUNT,
        Some(confusable),
        AnswerFormat::Fixed2,
    );
    let shown = choices.answer().to_string();
    let text = pick(rng, Z_TEMPLATES)
        .replace("{x}", &value.to_string())
        .replace("{mean}", &mean.to_string())
        .replace("{std}", &std.to_string());
    Question::new(
        Topic::ZScore,
        "",
        text,
        choices,
        format!(
            "z = (x - μ) / σ = ({} - {}) / {} = {} / {} = {}",
            value,
            mean,
            std,
            value - mean,
            std,
            shown
        ),
    )
    .with_hint("Use z = (x - μ) / σ.")
    .with_calculator_steps(format!("Home screen: ({} - {}) / {}", value, mean, std))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generators::testing::assert_well_formed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sample_std_question_shows_bessel_corrected_value() {
        let mut rng = StdRng::seed_from_u64(1);
        let question = describe(
            &mut rng,
            &[10.0, 20.0, 30.0, 40.0, 50.0],
            Statistic::SampleStd,
        );
        assert_well_formed(&question);
        assert_eq!(question.correct_option(), "15.81");
        assert!(question.explanation.ends_with("15.81"));
        assert_eq!(question.kind, "descriptive-stats/std");
    }

    #[test]
    fn every_statistic_matches_a_recomputation() {
        let mut rng = StdRng::seed_from_u64(8);
        let data = [12.0, 45.0, 33.0, 18.0, 27.0, 40.0, 21.0, 15.0, 38.0];
        for statistic in Statistic::ALL {
            let question = describe(&mut rng, &data, statistic);
            assert_eq!(
                question.correct_option(),
                AnswerFormat::Fixed2.format(statistic.compute(&data))
            );
        }
        let question = describe(&mut rng, &data, Statistic::Median);
        assert_eq!(question.correct_option(), "27.00");
    }

    #[test]
    fn z_score_of_two() {
        let mut rng = StdRng::seed_from_u64(4);
        let question = standard_score(&mut rng, 120, 100, 10);
        assert_eq!(question.correct_option(), "2.00");
        assert!(question.options.contains(&"0.20".to_string()));
        assert!(question.explanation.ends_with("= 2.00"));
    }

    #[test]
    fn corrected_mean_spreads_the_fix_over_n() {
        let mut rng = StdRng::seed_from_u64(6);
        let question = corrected_mean(&mut rng, 10, 70, 20, 40);
        assert_eq!(question.correct_option(), "72.00");
        assert!(question.options.contains(&"90.00".to_string()));
    }

    #[test]
    fn constant_shift_answers_follow_the_operation() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..30 {
            let question = mean_correction(&mut rng);
            assert_well_formed(&question);
            let answer = question.correct_option();
            if question.kind.ends_with("/add") {
                assert!(answer.starts_with("It increases"));
            } else if question.kind.ends_with("/subtract") {
                assert!(answer.starts_with("It decreases"));
            } else if question.kind.ends_with("/multiply") {
                assert!(answer.starts_with("It is multiplied"));
            }
            assert!(
                question.explanation.contains(answer),
                "{:?} lacks {:?}",
                question.explanation,
                answer
            );
        }
    }
}
