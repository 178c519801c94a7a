use rand::{Rng, RngCore};

use super::{from_pool, PoolItem};
use crate::quiz::options;
use crate::quiz::{stats, Question, Topic};

fn percent(value: f64) -> String {
    format!("{}%", value)
}

pub fn empirical_rule(rng: &mut dyn RngCore) -> Question {
    let mean = rng.gen_range(100..=500);
    let std = rng.gen_range(10..=50);
    if rng.gen_bool(0.5) {
        let k = rng.gen_range(1..=3);
        within(rng, mean, std, k)
    } else {
        let mut k = rng.gen_range(-3..=3);
        if k == 0 {
            k = 1;
        }
        below(rng, mean, std, mean + k * std)
    }
}

/// Share of the data between `mean - k·std` and `mean + k·std`.
pub fn within<R: Rng + ?Sized>(rng: &mut R, mean: i32, std: i32, k: u32) -> Question {
    let lower = mean - k as i32 * std;
    let upper = mean + k as i32 * std;
    let answer = percent(stats::empirical_within(k).unwrap_or(68.0));
    let fixed = ["68%", "95%", "99.7%", "50%"];
    let correct = fixed.iter().position(|o| *o == answer).unwrap_or(0);
    let choices = options::shuffle_fixed(rng, &fixed, correct);
    Question::new(
        Topic::EmpiricalRule,
        "within",
        format!(
            "A bell-shaped distribution has a mean of {} and a standard deviation of {}. About what percentage of the data falls between {} and {}?",
            mean, std, lower, upper
        ),
        choices,
        format!(
            "{} to {} is the mean ± {} standard deviation(s), which holds about {} of the data.",
            lower, upper, k, answer
        ),
    )
    .with_hint("Remember the 68-95-99.7 rule.")
    .with_calculator_steps(format!(
        "Home screen: ({} - {}) / {} gives the number of standard deviations",
        upper, mean, std
    ))
}

/// Percentile of `value` in a bell-shaped distribution; `value` must sit a
/// whole number of standard deviations from the mean.
pub fn below<R: Rng + ?Sized>(rng: &mut R, mean: i32, std: i32, value: i32) -> Question {
    let z = stats::z_score(value as f64, mean as f64, std as f64).round() as i32;
    let answer = stats::empirical_percentile(z).unwrap_or(50.0);
    let mut pool: Vec<f64> = (-3..=3)
        .filter_map(stats::empirical_percentile)
        .filter(|p| *p != answer)
        .collect();
    // Nearest neighbours first makes the distractors plausible.
    pool.sort_by(|a, b| (a - answer).abs().total_cmp(&(b - answer).abs()));
    let mut labels: Vec<String> = pool.into_iter().take(3).map(percent).collect();
    labels.push(percent(answer));
    let fixed: Vec<&str> = labels.iter().map(String::as_str).collect();
    let choices = options::shuffle_fixed(rng, &fixed, fixed.len() - 1);
    Question::new(
        Topic::EmpiricalRule,
        "percentile",
        format!(
            "A bell-shaped distribution has a mean of {} and a standard deviation of {}. Approximately what percentage of the data lies below {}?",
            mean, std, value
        ),
        choices,
        format!(
            "z = ({} - {}) / {} = {}, and by the 68-95-99.7 rule about {} of the data lies below that point.",
            value,
            mean,
            std,
            z,
            percent(answer)
        ),
    )
    .with_hint("Split the 68%, 95% and 99.7% symmetrically around the mean; half of the data lies below it.")
    .with_calculator_steps(format!("Home screen: ({} - {}) / {}", value, mean, std))
}

const CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "What does the empirical rule tell us about normal distributions?",
        options: &[
            "It gives approximate percentages of data within 1, 2 and 3 standard deviations of the mean",
            "It is exact for every dataset",
            "It only works for small samples",
            "It requires the mean to be 0",
        ],
        correct: 0,
        explanation: "The empirical rule gives approximate percentages (68%, 95%, 99.7%) within 1, 2 and 3 standard deviations of the mean of a normal distribution.",
    },
    PoolItem {
        question: "When is the empirical rule most accurate?",
        options: &["For any distribution", "For normal distributions", "For skewed distributions", "For small samples"],
        correct: 1,
        explanation: "The rule describes bell-shaped (normal) data; for other shapes it is only a rough guide.",
    },
    PoolItem {
        question: "In a normal distribution, what percentage of data falls within 1 standard deviation of the mean?",
        options: &["68%", "95%", "99.7%", "50%"],
        correct: 0,
        explanation: "About 68% of the data lies within one standard deviation of the mean.",
    },
    PoolItem {
        question: "In a normal distribution, what percentage of data falls within 2 standard deviations of the mean?",
        options: &["68%", "95%", "99.7%", "50%"],
        correct: 1,
        explanation: "About 95% of the data lies within two standard deviations of the mean.",
    },
    PoolItem {
        question: "In a normal distribution, what percentage of data falls within 3 standard deviations of the mean?",
        options: &["68%", "95%", "99.7%", "50%"],
        correct: 2,
        explanation: "About 99.7% of the data lies within three standard deviations of the mean.",
    },
    PoolItem {
        question: "What is the empirical rule also known as?",
        options: &["The 68-95-99.7 rule", "The normal rule", "The standard rule", "The distribution rule"],
        correct: 0,
        explanation: "It is named after its three percentages: 68%, 95% and 99.7%.",
    },
    PoolItem {
        question: "About what percentage of normal data lies more than 2 standard deviations above the mean?",
        options: &["2.5%", "5%", "16%", "0.15%"],
        correct: 0,
        explanation: "95% lies within 2 standard deviations, leaving 5% split evenly between the two tails.",
    },
];

pub fn empirical_rule_concepts(rng: &mut dyn RngCore) -> Question {
    from_pool(
        rng,
        Topic::EmpiricalRuleConcepts,
        CONCEPTS,
        "Think about what the empirical rule describes about the spread of bell-shaped data.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generators::testing::assert_well_formed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn two_standard_deviations_hold_95_percent() {
        let mut rng = StdRng::seed_from_u64(1);
        let question = within(&mut rng, 300, 20, 2);
        assert_well_formed(&question);
        assert_eq!(question.correct_option(), "95%");
        assert!(question.text.contains("between 260 and 340"));
    }

    #[test]
    fn one_standard_deviation_above_is_the_84th_percentile() {
        let mut rng = StdRng::seed_from_u64(2);
        let question = below(&mut rng, 100, 15, 115);
        assert_well_formed(&question);
        assert_eq!(question.options.len(), 4);
        assert_eq!(question.correct_option(), "84%");
    }

    #[test]
    fn far_tail_percentile() {
        let mut rng = StdRng::seed_from_u64(3);
        let question = below(&mut rng, 100, 10, 70);
        assert_eq!(question.correct_option(), "0.15%");
    }

    #[test]
    fn random_empirical_questions_are_well_formed() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..40 {
            assert_well_formed(&empirical_rule(&mut rng));
            assert_well_formed(&empirical_rule_concepts(&mut rng));
        }
    }
}
