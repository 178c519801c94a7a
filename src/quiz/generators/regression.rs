use rand::{Rng, RngCore};

use super::{from_pool, join, PoolItem};
use crate::quiz::options::{self, AnswerFormat, DEFAULT_OPTION_COUNT};
use crate::quiz::{stats, Question, Topic};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ask {
    Slope,
    Intercept,
    Correlation,
    Determination,
    Prediction,
}

const LINREG_STEPS: &str = "Enter x in L1 and y in L2 → STAT → CALC → 8:LinReg(a+bx) L1, L2 → ENTER (turn DiagnosticOn to see r and r²)";

/// Noisy points around a random line, rounded to one decimal like
/// calculator-entered data.
pub fn sample_points<R: Rng + ?Sized>(rng: &mut R) -> (Vec<f64>, Vec<f64>) {
    let n = rng.gen_range(6..=9);
    let sign = if rng.gen_bool(0.5) { -1.0 } else { 1.0 };
    let slope = rng.gen_range(1.5..5.0) * sign;
    let intercept = rng.gen_range(20.0..50.0);
    let mut x: Vec<f64> = Vec::with_capacity(n);
    while x.len() < n {
        let candidate = rng.gen_range(1..=12) as f64;
        if !x.contains(&candidate) {
            x.push(candidate);
        }
    }
    x.sort_by(|a, b| a.total_cmp(b));
    let y = x
        .iter()
        .map(|v| {
            let noisy = slope * v + intercept + (rng.gen::<f64>() - 0.5) * 10.0;
            (noisy * 10.0).round() / 10.0
        })
        .collect();
    (x, y)
}

pub fn regression(rng: &mut dyn RngCore) -> Question {
    let ask = match rng.gen_range(0..6) {
        0 => Ask::Slope,
        1 => Ask::Intercept,
        2 => Ask::Correlation,
        3 => Ask::Determination,
        4 => Ask::Prediction,
        _ => return concept(rng),
    };
    let (x, y) = sample_points(rng);
    let at = rng.gen_range(1..=12) as f64;
    fit_question(rng, &x, &y, ask, at)
}

/// Numeric regression question on the given points. `at` is the x used for
/// a prediction.
pub fn fit_question<R: Rng + ?Sized>(rng: &mut R, x: &[f64], y: &[f64], ask: Ask, at: f64) -> Question {
    let (slope, intercept) = stats::linear_regression(x, y);
    let r = stats::correlation(x, y);
    let shown_r = format!("{:.3}", r);
    let data = format!("x: {}\ny: {}", join(x), join(y));

    let (variant, text, answer, confusable, format, working) = match ask {
        Ask::Slope => (
            "slope",
            format!("Find the slope b of the least-squares line ŷ = a + bx for:\n{}", data),
            slope,
            Some(intercept),
            AnswerFormat::Fixed2,
            "b = Σ(x-x̄)(y-ȳ) / Σ(x-x̄)²".to_string(),
        ),
        Ask::Intercept => (
            "intercept",
            format!("Find the y-intercept a of the least-squares line ŷ = a + bx for:\n{}", data),
            intercept,
            Some(slope),
            AnswerFormat::Fixed2,
            "a = ȳ - b·x̄".to_string(),
        ),
        Ask::Correlation => (
            "correlation",
            format!("Find the correlation coefficient r for:\n{}", data),
            r,
            Some(-r),
            AnswerFormat::Proportion,
            "r = cov(x, y) / (sx·sy)".to_string(),
        ),
        Ask::Determination => (
            "r-squared",
            format!(
                "For a dataset, the correlation coefficient r is {}. What is the coefficient of determination, r²?",
                shown_r
            ),
            // Square the rounded r the student is shown.
            shown_r.parse::<f64>().unwrap_or(r).powi(2),
            Some(shown_r.parse::<f64>().unwrap_or(r).abs()),
            AnswerFormat::Proportion,
            format!("r² = ({})²", shown_r),
        ),
        Ask::Prediction => (
            "prediction",
            format!(
                "Using the least-squares line for the data below, predict y when x = {}.\n{}",
                at, data
            ),
            intercept + slope * at,
            Some(slope + intercept * at),
            AnswerFormat::Fixed2,
            format!(
                "ŷ = {:.2} + {:.2}·{}",
                intercept, slope, at
            ),
        ),
    };

    // r is negative half the time; keep distractors on the right side of 0.
    let format = if ask == Ask::Correlation && answer < 0.0 {
        AnswerFormat::Fixed2
    } else {
        format
    };
    let choices = options::generate(rng, answer, DEFAULT_OPTION_COUNT, confusable, format);
    let shown = choices.answer().to_string();

    Question::new(
        Topic::Regression,
        variant,
        text,
        choices,
        format!("{} = {}", working, shown),
    )
    .with_hint(match ask {
        Ask::Determination => "r² is simply r squared.",
        Ask::Correlation => "r keeps the sign of the slope and lies between -1 and 1.",
        _ => "Fit the least-squares line first.",
    })
    .with_calculator_steps(LINREG_STEPS)
    .with_example(format!(
        "L1: {}\nL2: {}\nSTAT → CALC → 8:LinReg(a+bx) L1, L2\na = {:.2}, b = {:.2}, r = {}",
        join(x),
        join(y),
        intercept,
        slope,
        shown_r
    ))
}

const CONCEPTS: &[PoolItem] = &[
    PoolItem {
        question: "What does the slope in a regression equation represent?",
        options: &["The y-intercept", "The change in y per unit change in x", "The correlation coefficient", "The standard deviation"],
        correct: 1,
        explanation: "The slope is the predicted change in y for each one-unit increase in x.",
    },
    PoolItem {
        question: "What does the y-intercept in a regression equation represent?",
        options: &["The slope of the line", "The predicted y when x = 0", "The correlation coefficient", "The standard deviation"],
        correct: 1,
        explanation: "The intercept is the predicted value of y when x equals zero.",
    },
    PoolItem {
        question: "What does a correlation coefficient of 0.8 indicate?",
        options: &["No relationship", "Weak positive relationship", "Strong positive relationship", "Perfect negative relationship"],
        correct: 2,
        explanation: "r = 0.8 indicates a strong positive linear relationship.",
    },
    PoolItem {
        question: "What is the range of possible values for a correlation coefficient?",
        options: &["0 to 1", "-1 to 1", "-∞ to ∞", "0 to ∞"],
        correct: 1,
        explanation: "r always lies between -1 and 1.",
    },
    PoolItem {
        question: "If r² = 0.64, what share of the variation in y is explained by the linear model?",
        options: &["64%", "80%", "36%", "8%"],
        correct: 0,
        explanation: "r² is the proportion of variance in y explained by the fit, here 64%.",
    },
    PoolItem {
        question: "What is a residual?",
        options: &["Observed y minus predicted y", "Predicted y minus x", "The slope times x", "The mean of y"],
        correct: 0,
        explanation: "A residual is y - ŷ, the vertical distance from a point to the line.",
    },
];

fn concept(rng: &mut dyn RngCore) -> Question {
    from_pool(
        rng,
        Topic::Regression,
        CONCEPTS,
        "Think about the relationship between the variables and what each part of the line means.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generators::testing::assert_well_formed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const X: [f64; 5] = [1.0, 2.0, 3.0, 4.0, 5.0];
    const Y: [f64; 5] = [3.0, 5.0, 7.0, 9.0, 11.0];

    #[test]
    fn exact_line_gives_exact_answers() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(fit_question(&mut rng, &X, &Y, Ask::Slope, 0.0).correct_option(), "2.00");
        assert_eq!(fit_question(&mut rng, &X, &Y, Ask::Intercept, 0.0).correct_option(), "1.00");
        assert_eq!(fit_question(&mut rng, &X, &Y, Ask::Correlation, 0.0).correct_option(), "1.000");
        assert_eq!(fit_question(&mut rng, &X, &Y, Ask::Prediction, 10.0).correct_option(), "21.00");
    }

    #[test]
    fn r_squared_squares_the_displayed_r() {
        let mut rng = StdRng::seed_from_u64(2);
        let y = [2.0, 4.5, 5.0, 8.5, 9.0];
        let question = fit_question(&mut rng, &X, &y, Ask::Determination, 0.0);
        assert_well_formed(&question);
        let r: f64 = format!("{:.3}", stats::correlation(&X, &y)).parse().unwrap();
        assert_eq!(question.correct_option(), format!("{:.3}", r * r));
    }

    #[test]
    fn negative_correlation_keeps_its_sign() {
        let mut rng = StdRng::seed_from_u64(3);
        let down = [10.0, 8.0, 6.0, 4.0, 2.0];
        let question = fit_question(&mut rng, &X, &down, Ask::Correlation, 0.0);
        assert_eq!(question.correct_option(), "-1.00");
    }

    #[test]
    fn sampled_points_are_distinct_in_x() {
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..20 {
            let (x, y) = sample_points(&mut rng);
            assert_eq!(x.len(), y.len());
            assert!(x.windows(2).all(|w| w[0] < w[1]));
            assert_well_formed(&regression(&mut rng));
        }
    }
}
