use rand::{Rng, RngCore};

use super::pick;
use crate::quiz::options::{self, AnswerFormat, DEFAULT_OPTION_COUNT};
use crate::quiz::{stats, Question, Topic};

const ORDERED: &[&str] = &[
    "From {n} items, how many ways can you choose and arrange {r} of them?",
    "A club of {n} members elects a president, vice president and so on for {r} distinct offices. How many ways can the offices be filled?",
    "How many different {r}-letter codes can be made from {n} distinct letters if no letter repeats?",
];

const UNORDERED: &[&str] = &[
    "From {n} items, how many ways can you choose a group of {r} of them (order doesn't matter)?",
    "A committee of {r} is chosen from {n} volunteers. How many different committees are possible?",
    "How many {r}-topping pizzas can be made from {n} available toppings?",
];

pub fn counting(rng: &mut dyn RngCore) -> Question {
    match rng.gen_range(0..5) {
        0 => {
            let n = rng.gen_range(3..=8);
            arrangement(rng, n)
        }
        _ => {
            let n = rng.gen_range(6..=15);
            let r = rng.gen_range(2..=n.min(5));
            let ordered = rng.gen_bool(0.5);
            selection(rng, n, r, ordered)
        }
    }
}

/// Ways to line up all `n` items.
pub fn arrangement<R: Rng + ?Sized>(rng: &mut R, n: u64) -> Question {
    let answer = stats::factorial(n);
    let choices = options::generate(
        rng,
        answer as f64,
        DEFAULT_OPTION_COUNT,
        Some((n * n) as f64),
        AnswerFormat::Integer,
    );
    Question::new(
        Topic::Counting,
        "factorial",
        format!("How many ways can you arrange {} books on a shelf?", n),
        choices,
        format!("Arranging all {} items is {}! = {}", n, n, answer),
    )
    .with_hint("Arranging every item uses n!.")
    .with_calculator_steps(format!("{} → MATH → PRB → 4:! → ENTER", n))
}

/// nPr when `ordered`, nCr otherwise; the other count is offered as a distractor.
pub fn selection<R: Rng + ?Sized>(rng: &mut R, n: u64, r: u64, ordered: bool) -> Question {
    let permutations = stats::perm(n, r);
    let combinations = stats::comb(n, r);
    let (answer, confusable) = if ordered {
        (permutations, combinations)
    } else {
        (combinations, permutations)
    };
    let choices = options::generate(
        rng,
        answer as f64,
        DEFAULT_OPTION_COUNT,
        Some(confusable as f64),
        AnswerFormat::Integer,
    );
    let template = pick(rng, if ordered { ORDERED } else { UNORDERED });
    let text = template
        .replace("{n}", &n.to_string())
        .replace("{r}", &r.to_string());

    let (variant, explanation, hint, steps) = if ordered {
        (
            "permutation",
            format!("Order matters, so this is P({}, {}) = {}!/({} - {})! = {}", n, r, n, n, r, answer),
            "When order matters use nPr = n!/(n-r)!.",
            format!("{} → MATH → PRB → 2:nPr → {} → ENTER", n, r),
        )
    } else {
        (
            "combination",
            format!(
                "Order does not matter, so this is C({}, {}) = {}!/({}!({} - {})!) = {}",
                n, r, n, r, n, r, answer
            ),
            "When order does not matter use nCr = n!/(r!(n-r)!).",
            format!("{} → MATH → PRB → 3:nCr → {} → ENTER", n, r),
        )
    };

    Question::new(Topic::Counting, variant, text, choices, explanation)
        .with_hint(hint)
        .with_calculator_steps(steps)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::generators::testing::assert_well_formed;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn permutation_offers_the_combination_as_a_trap() {
        let mut rng = StdRng::seed_from_u64(10);
        let question = selection(&mut rng, 10, 3, true);
        assert_well_formed(&question);
        assert_eq!(question.correct_option(), "720");
        assert!(question.options.contains(&"120".to_string()));
    }

    #[test]
    fn combination_offers_the_permutation_as_a_trap() {
        let mut rng = StdRng::seed_from_u64(10);
        let question = selection(&mut rng, 10, 3, false);
        assert_eq!(question.correct_option(), "120");
        assert!(question.options.contains(&"720".to_string()));
        assert!(question.explanation.ends_with("= 120"));
    }

    #[test]
    fn arrangement_is_a_factorial() {
        let mut rng = StdRng::seed_from_u64(3);
        let question = arrangement(&mut rng, 5);
        assert_eq!(question.correct_option(), "120");
    }

    #[test]
    fn random_counting_questions_are_integers() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..50 {
            let question = counting(&mut rng);
            assert_well_formed(&question);
            for option in &question.options {
                assert!(option.parse::<u64>().is_ok(), "{option}");
            }
        }
    }
}
