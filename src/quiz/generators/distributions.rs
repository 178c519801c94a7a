use rand::{Rng, RngCore};

use super::probability::prob;
use super::{from_pool, PoolItem};
use crate::quiz::options::{self, AnswerFormat, DEFAULT_OPTION_COUNT};
use crate::quiz::{stats, Question, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinomialAsk {
    Exactly,
    AtMost,
    Mean,
    StdDev,
}

pub fn binomial(rng: &mut dyn RngCore) -> Question {
    let ask = match rng.gen_range(0..5) {
        0 => BinomialAsk::Exactly,
        1 => BinomialAsk::AtMost,
        2 => BinomialAsk::Mean,
        3 => BinomialAsk::StdDev,
        _ => {
            return from_pool(
                rng,
                Topic::BinomialDistribution,
                BINOMIAL_CONCEPTS,
                "Recall the four conditions of a binomial setting.",
            )
        }
    };
    let n: u64 = rng.gen_range(5..=20);
    let p = rng.gen_range(1..=9) * 10;
    let expected = (n as f64 * p as f64 / 100.0).round() as i64;
    let k = (expected + rng.gen_range(-2..=2)).clamp(0, n as i64) as u64;
    binomial_question(rng, n, p, k, ask)
}

/// `p` is given in hundredths.
pub fn binomial_question<R: Rng + ?Sized>(
    rng: &mut R,
    n: u64,
    p: u32,
    k: u64,
    ask: BinomialAsk,
) -> Question {
    let success = p as f64 / 100.0;
    let setup = format!(
        "A binomial experiment has n = {} trials with probability of success p = {}.",
        n,
        prob(p)
    );
    let (variant, question, answer, confusable, format, working, steps) = match ask {
        BinomialAsk::Exactly => (
            "pmf",
            format!("What is P(X = {})?", k),
            stats::binomial_pmf(n, success, k),
            // Dropping the nCr factor.
            success.powi(k as i32) * (1.0 - success).powi((n - k) as i32),
            AnswerFormat::Proportion,
            format!("P(X = {}) = C({}, {})·{}^{}·{}^{}", k, n, k, prob(p), k, prob(100 - p), n - k),
            format!("2nd → VARS → A:binompdf({}, {}, {})", n, prob(p), k),
        ),
        BinomialAsk::AtMost => (
            "cdf",
            format!("What is P(X ≤ {})?", k),
            (0..=k).map(|i| stats::binomial_pmf(n, success, i)).sum::<f64>(),
            stats::binomial_pmf(n, success, k),
            AnswerFormat::Proportion,
            format!("P(X ≤ {}) = P(X = 0) + … + P(X = {})", k, k),
            format!("2nd → VARS → B:binomcdf({}, {}, {})", n, prob(p), k),
        ),
        BinomialAsk::Mean => (
            "mean",
            "What is the mean of X?".to_string(),
            n as f64 * success,
            n as f64 * (1.0 - success),
            AnswerFormat::Fixed2,
            format!("μ = np = {} × {}", n, prob(p)),
            format!("Home screen: {} × {}", n, prob(p)),
        ),
        BinomialAsk::StdDev => {
            let variance = n as f64 * success * (1.0 - success);
            (
                "std",
                "What is the standard deviation of X?".to_string(),
                variance.sqrt(),
                variance,
                AnswerFormat::Fixed2,
                format!("σ = √(np(1-p)) = √({} × {} × {})", n, prob(p), prob(100 - p)),
                format!("Home screen: √({} × {} × {})", n, prob(p), prob(100 - p)),
            )
        }
    };
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, Some(confusable), format);
    let shown = choices.answer().to_string();
    Question::new(
        Topic::BinomialDistribution,
        variant,
        format!("{} {}", setup, question),
        choices,
        format!("{} = {}", working, shown),
    )
    .with_hint(match ask {
        BinomialAsk::Exactly => "Use C(n, k)·p^k·(1-p)^(n-k).",
        BinomialAsk::AtMost => "Add P(X = i) for every i from 0 up to k.",
        BinomialAsk::Mean => "The mean of a binomial is np.",
        BinomialAsk::StdDev => "Take the square root of np(1-p).",
    })
    .with_calculator_steps(steps)
}

const BINOMIAL_CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "Which of these is NOT a condition for a binomial setting?",
        options: &["The data must be normally distributed", "A fixed number of trials", "Independent trials", "The same probability of success on each trial"],
        correct: 0,
        explanation: "A binomial setting needs a fixed n, two outcomes, independent trials and a constant p; normality is not required.",
    },
    PoolItem {
        question: "Which TI-84 function gives P(X ≤ k) for a binomial random variable?",
        options: &["binomcdf", "binompdf", "normalcdf", "invNorm"],
        correct: 0,
        explanation: "binomcdf accumulates probabilities from 0 up to k; binompdf gives a single value.",
    },
    PoolItem {
        question: "How many outcomes does each trial of a binomial experiment have?",
        options: &["Two", "Three", "Any number", "One"],
        correct: 0,
        explanation: "Each trial is a success or a failure.",
    },
];

pub fn normal(rng: &mut dyn RngCore) -> Question {
    let mean = rng.gen_range(60..=120);
    let std = rng.gen_range(5..=20);
    let low = mean + rng.gen_range(-20..=5) * std / 10;
    let high = low + rng.gen_range(5..=20) * std / 10;
    let region = match rng.gen_range(0..3) {
        0 => Region::Below(high),
        1 => Region::Above(low),
        _ => Region::Between(low, high),
    };
    normal_question(rng, mean, std, region)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Below(i32),
    Above(i32),
    Between(i32, i32),
}

/// Area under N(`mean`, `std`) over `region`, rounded to three decimals.
pub fn normal_question<R: Rng + ?Sized>(rng: &mut R, mean: i32, std: i32, region: Region) -> Question {
    let z = |x: i32| stats::z_score(x as f64, mean as f64, std as f64);
    let (variant, question, answer, confusable, working, steps) = match region {
        Region::Below(x) => (
            "below",
            format!("What is P(X < {})?", x),
            stats::normal_cdf(z(x)),
            1.0 - stats::normal_cdf(z(x)),
            format!("z = ({} - {}) / {} = {:.2}; P(Z < {:.2})", x, mean, std, z(x), z(x)),
            format!("2nd → VARS → 2:normalcdf(-1E99, {}, {}, {})", x, mean, std),
        ),
        Region::Above(x) => (
            "above",
            format!("What is P(X > {})?", x),
            1.0 - stats::normal_cdf(z(x)),
            stats::normal_cdf(z(x)),
            format!("z = ({} - {}) / {} = {:.2}; P(Z > {:.2}) = 1 - P(Z < {:.2})", x, mean, std, z(x), z(x), z(x)),
            format!("2nd → VARS → 2:normalcdf({}, 1E99, {}, {})", x, mean, std),
        ),
        Region::Between(a, b) => (
            "between",
            format!("What is P({} < X < {})?", a, b),
            stats::normal_cdf(z(b)) - stats::normal_cdf(z(a)),
            stats::normal_cdf(z(b)),
            format!("P({:.2} < Z < {:.2}) = P(Z < {:.2}) - P(Z < {:.2})", z(a), z(b), z(b), z(a)),
            format!("2nd → VARS → 2:normalcdf({}, {}, {}, {})", a, b, mean, std),
        ),
    };
    let choices = options::generate(
        rng,
        answer,
        DEFAULT_OPTION_COUNT,
        Some(confusable),
        AnswerFormat::Proportion,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::NormalDistribution,
        variant,
        format!(
            "X is normally distributed with mean {} and standard deviation {}. {}",
            mean, std, question
        ),
        choices,
        format!("{} = {}", working, shown),
    )
    .with_hint("Standardize with z = (x - μ) / σ, then find the area on the correct side.")
    .with_calculator_steps(steps)
}

pub fn sampling(rng: &mut dyn RngCore) -> Question {
    match rng.gen_range(0..4) {
        0 | 1 => {
            let sigma = rng.gen_range(2..=12) * 5;
            let n = [4, 9, 16, 25, 36, 49, 64, 81, 100][rng.gen_range(0..9)];
            standard_error_question(rng, sigma, n)
        }
        2 => {
            let mean = rng.gen_range(40..=200);
            let sigma = rng.gen_range(2..=6) * 5;
            let n = [25, 36, 49, 64, 100][rng.gen_range(0..5)];
            let offset = rng.gen_range(-3..=3);
            sample_mean_question(rng, mean, sigma, n, mean + offset)
        }
        _ => from_pool(
            rng,
            Topic::SamplingDistributions,
            CLT_CONCEPTS,
            "Think about what happens to the distribution of x̄ as n grows.",
        ),
    }
}

/// σ/√n for a perfect-square `n`.
pub fn standard_error_question<R: Rng + ?Sized>(rng: &mut R, sigma: u32, n: u64) -> Question {
    let answer = stats::standard_error(sigma as f64, n);
    let choices = options::generate(
        rng,
        answer,
        DEFAULT_OPTION_COUNT,
        Some(sigma as f64 / n as f64),
        AnswerFormat::Fixed2,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::SamplingDistributions,
        "standard-error",
        format!(
            "A population has standard deviation σ = {}. What is the standard deviation of the sampling distribution of x̄ for samples of size n = {}?",
            sigma, n
        ),
        choices,
        format!("σx̄ = σ / √n = {} / √{} = {}", sigma, n, shown),
    )
    .with_hint("Divide σ by the square root of n, not by n.")
    .with_calculator_steps(format!("Home screen: {} / √({})", sigma, n))
}

/// P(x̄ < `threshold`) via the central limit theorem.
pub fn sample_mean_question<R: Rng + ?Sized>(
    rng: &mut R,
    mean: i32,
    sigma: u32,
    n: u64,
    threshold: i32,
) -> Question {
    let error = stats::standard_error(sigma as f64, n);
    let z = (threshold - mean) as f64 / error;
    let answer = stats::normal_cdf(z);
    // Using σ instead of σ/√n.
    let confusable = stats::normal_cdf((threshold - mean) as f64 / sigma as f64);
    let choices = options::generate(
        rng,
        answer,
        DEFAULT_OPTION_COUNT,
        Some(confusable),
        AnswerFormat::Proportion,
    );
    let shown = choices.answer().to_string();
    Question::new(
        Topic::SamplingDistributions,
        "sample-mean",
        format!(
            "A population has mean μ = {} and standard deviation σ = {}. For a random sample of n = {}, what is P(x̄ < {})?",
            mean, sigma, n, threshold
        ),
        choices,
        format!(
            "σx̄ = {} / √{} = {:.2}; z = ({} - {}) / {:.2} = {:.2}; P(Z < {:.2}) = {}",
            sigma, n, error, threshold, mean, error, z, z, shown
        ),
    )
    .with_hint("By the central limit theorem x̄ is approximately normal with mean μ and standard deviation σ/√n.")
    .with_calculator_steps(format!(
        "2nd → VARS → 2:normalcdf(-1E99, {}, {}, {:.2})",
        threshold, mean, error
    ))
}

const CLT_CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "According to the central limit theorem, what is the shape of the sampling distribution of x̄ for large n?",
        options: &["Approximately normal", "Uniform", "The same shape as the population", "Skewed right"],
        correct: 0,
        explanation: "For large samples the distribution of x̄ is approximately normal whatever the population's shape.",
    },
    PoolItem {
        question: "What is the mean of the sampling distribution of x̄?",
        options: &["μ, the population mean", "μ/√n", "σ/√n", "0"],
        correct: 0,
        explanation: "x̄ is an unbiased estimator, so its sampling distribution is centered at μ.",
    },
    PoolItem {
        question: "What happens to the standard error of x̄ when the sample size is multiplied by 4?",
        options: &["It is halved", "It is doubled", "It is divided by 4", "It stays the same"],
        correct: 0,
        explanation: "σ/√(4n) = (σ/√n)/2.",
    },
    PoolItem {
        question: "What sample size is commonly considered large enough for the central limit theorem to apply?",
        options: &["n ≥ 30", "n ≥ 5", "n ≥ 100", "n ≥ 1000"],
        correct: 0,
        explanation: "The usual rule of thumb is n ≥ 30.",
    },
];
