use serde::{Deserialize, Serialize};

const MAX_MULTIPLIER: u32 = 5;

/// Running score for one quiz run. Skipped questions are never recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub score: u32,
    pub total: u32,
    pub streak: u32,
    pub multiplier: u32,
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self {
            score: 0,
            total: 0,
            streak: 0,
            multiplier: 1,
        }
    }
}

impl Scoreboard {
    /// Records an answer and returns the points it earned.
    pub fn record(&mut self, correct: bool) -> u32 {
        self.total += 1;
        if !correct {
            self.streak = 0;
            self.multiplier = 1;
            return 0;
        }

        let earned = self.multiplier;
        self.score += earned;
        self.streak += 1;
        self.multiplier = if self.streak > 3 {
            (self.streak / 3).min(MAX_MULTIPLIER)
        } else {
            1
        };
        earned
    }

    pub fn score_line(&self) -> String {
        format!("Score: {} / {}", self.score, self.total)
    }

    /// `None` until a streak has started.
    pub fn streak_line(&self) -> Option<String> {
        (self.streak > 0).then(|| format!("{} 🔥 ({}x)", self.streak, self.multiplier))
    }

    pub fn summary(&self) -> String {
        match self.streak_line() {
            Some(streak) => format!("{}\nStreak: {}", self.score_line(), streak),
            None => self.score_line(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multiplier_grows_after_three_in_a_row() {
        let mut board = Scoreboard::default();
        let earned: Vec<u32> = (0..7).map(|_| board.record(true)).collect();
        // streak 4 and 5 give 4/3 = 1 and 5/3 = 1; streak 6 gives 2.
        assert_eq!(earned, vec![1, 1, 1, 1, 1, 1, 2]);
        assert_eq!(board.score, 8);
        assert_eq!(board.multiplier, 2);
        assert_eq!(board.streak_line().as_deref(), Some("7 🔥 (2x)"));
    }

    #[test]
    fn multiplier_is_capped() {
        let mut board = Scoreboard::default();
        for _ in 0..30 {
            board.record(true);
        }
        assert_eq!(board.multiplier, MAX_MULTIPLIER);
    }

    #[test]
    fn wrong_answer_resets_the_streak() {
        let mut board = Scoreboard::default();
        for _ in 0..6 {
            board.record(true);
        }
        assert_eq!(board.record(false), 0);
        assert_eq!(board.streak, 0);
        assert_eq!(board.multiplier, 1);
        assert_eq!(board.score_line(), "Score: 6 / 7");
        assert!(board.streak_line().is_none());
        assert_eq!(board.summary(), "Score: 6 / 7");
    }
}
