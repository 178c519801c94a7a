//! Multiple-choice option synthesis for numeric answers.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;

pub const DEFAULT_OPTION_COUNT: usize = 4;

// Upper bound on random distractor draws before falling back to evenly spaced ones.
const MAX_DRAWS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerFormat {
    /// Whole numbers, e.g. counts.
    Integer,
    /// Two decimals.
    Fixed2,
    /// Three decimals, for proportions and r². Distractors stay within [0, 1].
    Proportion,
}

impl AnswerFormat {
    pub fn format(&self, value: f64) -> String {
        let (text, decimals) = match self {
            AnswerFormat::Integer => (format!("{}", value.round() as i64), 0),
            AnswerFormat::Fixed2 => (format!("{:.2}", value), 2),
            AnswerFormat::Proportion => (format!("{:.3}", value), 3),
        };
        // "-0.00" and "0.00" would read as two different answers.
        if decimals > 0 && text.starts_with('-') && text[1..].chars().all(|c| c == '0' || c == '.')
        {
            return text[1..].to_string();
        }
        text
    }
}

/// Shuffled options with the position of the correct one.
#[derive(Debug, Clone, PartialEq)]
pub struct Choices {
    pub options: Vec<String>,
    pub correct: usize,
}

impl Choices {
    pub fn answer(&self) -> &str {
        &self.options[self.correct]
    }
}

fn draw_wrong<R: Rng + ?Sized>(rng: &mut R, correct: f64, format: AnswerFormat) -> Option<f64> {
    match format {
        AnswerFormat::Integer => {
            let factor = rng.gen_range(0.8..=1.2);
            let wrong = (correct * factor).round() + rng.gen_range(-5..=5) as f64;
            if wrong == correct.round() || (wrong < 0.0 && correct >= 0.0) {
                return None;
            }
            Some(wrong)
        }
        AnswerFormat::Fixed2 => {
            let noise = (rng.gen::<f64>() - 0.5) * ((correct * 0.4).abs() + 2.0);
            Some(correct + noise)
        }
        AnswerFormat::Proportion => {
            let noise = (rng.gen::<f64>() - 0.5) * ((correct * 0.4).abs() + 0.2);
            let wrong = correct + noise;
            (0.0..=1.0).contains(&wrong).then_some(wrong)
        }
    }
}

fn spaced_wrong(correct: f64, step: usize, format: AnswerFormat) -> f64 {
    let unit = match format {
        AnswerFormat::Integer => 1.0,
        AnswerFormat::Fixed2 => 0.01,
        AnswerFormat::Proportion => 0.001,
    };
    let offset = unit * step.div_ceil(2) as f64;
    if step % 2 == 1 {
        correct + offset
    } else {
        correct - offset
    }
}

/// Builds `count` distinct formatted options around `correct`.
///
/// `confusable` is a conceptually related wrong answer (e.g. nCr when nPr was
/// asked) that is always included when it formats differently from the
/// correct one. Distinctness is decided on the formatted strings.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    correct: f64,
    count: usize,
    confusable: Option<f64>,
    format: AnswerFormat,
) -> Choices {
    let answer = format.format(correct);
    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(count);
    seen.insert(answer.clone());
    options.push(answer.clone());

    if let Some(other) = confusable {
        let text = format.format(other);
        if seen.insert(text.clone()) {
            options.push(text);
        }
    }

    let mut draws = 0;
    let mut step = 1;
    while options.len() < count {
        let wrong = if draws < MAX_DRAWS {
            draws += 1;
            match draw_wrong(rng, correct, format) {
                Some(wrong) => wrong,
                None => continue,
            }
        } else {
            step += 1;
            spaced_wrong(correct, step, format)
        };
        let text = format.format(wrong);
        if seen.insert(text.clone()) {
            options.push(text);
        }
    }

    options.shuffle(rng);
    let correct = options.iter().position(|o| *o == answer).unwrap_or(0);
    Choices { options, correct }
}

/// Shuffles a fixed list of textual options, tracking the correct one.
pub fn shuffle_fixed<R: Rng + ?Sized>(rng: &mut R, options: &[&str], correct: usize) -> Choices {
    let answer = options.get(correct).copied().unwrap_or_default();
    let mut options: Vec<String> = options.iter().map(|o| o.to_string()).collect();
    options.shuffle(rng);
    let correct = options.iter().position(|o| o == answer).unwrap_or(0);
    Choices { options, correct }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn formats_by_mode() {
        assert_eq!(AnswerFormat::Integer.format(120.0), "120");
        assert_eq!(AnswerFormat::Fixed2.format(15.811), "15.81");
        assert_eq!(AnswerFormat::Proportion.format(0.5), "0.500");
        assert_eq!(AnswerFormat::Fixed2.format(-0.001), "0.00");
        assert_eq!(AnswerFormat::Fixed2.format(-1.5), "-1.50");
    }

    #[test]
    fn confusable_answer_is_always_offered() {
        let mut rng = StdRng::seed_from_u64(7);
        let choices = generate(&mut rng, 720.0, 4, Some(120.0), AnswerFormat::Integer);
        assert!(choices.options.contains(&"120".to_string()));
        assert_eq!(choices.answer(), "720");
    }

    #[test]
    fn zero_integer_answer_still_gets_distractors() {
        let mut rng = StdRng::seed_from_u64(1);
        let choices = generate(&mut rng, 0.0, 4, None, AnswerFormat::Integer);
        assert_eq!(choices.options.len(), 4);
        assert_eq!(choices.answer(), "0");
    }

    #[test]
    fn proportions_stay_in_the_unit_interval() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let choices = generate(&mut rng, 0.98, 4, None, AnswerFormat::Proportion);
            for option in &choices.options {
                let value: f64 = option.parse().unwrap();
                assert!((0.0..=1.0).contains(&value), "{option}");
            }
        }
    }

    #[test]
    fn shuffled_fixed_options_keep_the_right_answer() {
        let mut rng = StdRng::seed_from_u64(11);
        let choices = shuffle_fixed(&mut rng, &["68%", "95%", "99.7%", "50%"], 1);
        assert_eq!(choices.answer(), "95%");
        assert_eq!(choices.options.len(), 4);
    }

    proptest! {
        #[test]
        fn options_are_distinct_and_contain_the_answer(
            seed in any::<u64>(),
            correct in -500.0f64..500.0,
            integer in any::<bool>(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let format = if integer { AnswerFormat::Integer } else { AnswerFormat::Fixed2 };
            let correct = if integer { correct.round().abs() } else { correct };
            let choices = generate(&mut rng, correct, DEFAULT_OPTION_COUNT, None, format);

            prop_assert_eq!(choices.options.len(), DEFAULT_OPTION_COUNT);
            prop_assert_eq!(choices.answer(), format.format(correct));
            let unique: HashSet<_> = choices.options.iter().collect();
            prop_assert_eq!(unique.len(), choices.options.len());
        }
    }
}
