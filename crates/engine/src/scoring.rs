//! Points awarded to a prediction once its match is completed.
//!
//! An exact scoreline is worth [`EXACT_SCORE_POINTS`]. Guessing only the
//! outcome (home win, draw or away win) is worth [`OUTCOME_POINTS`]. Anything
//! else, including a prediction without a guess, is worth nothing.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

pub const EXACT_SCORE_POINTS: i32 = 3;
pub const OUTCOME_POINTS: i32 = 1;

/// Goals scored by the home and the away team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreline {
    pub home: i32,
    pub away: i32,
}

/// Result of a match seen from the home team.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    HomeWin,
    Draw,
    AwayWin,
}

impl Scoreline {
    pub const fn new(home: i32, away: i32) -> Self {
        Self { home, away }
    }

    /// Build a scoreline only when both sides are known.
    pub fn from_parts(home: Option<i32>, away: Option<i32>) -> Option<Self> {
        Some(Self::new(home?, away?))
    }

    pub fn outcome(self) -> Outcome {
        match self.home.cmp(&self.away) {
            Ordering::Greater => Outcome::HomeWin,
            Ordering::Equal => Outcome::Draw,
            Ordering::Less => Outcome::AwayWin,
        }
    }
}

/// Score a guess against the final scoreline.
pub fn points(actual: Scoreline, guess: Option<Scoreline>) -> i32 {
    match guess {
        Some(guess) if guess == actual => EXACT_SCORE_POINTS,
        Some(guess) if guess.outcome() == actual.outcome() => OUTCOME_POINTS,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(actual: (i32, i32), guess: (i32, i32)) -> i32 {
        points(
            Scoreline::new(actual.0, actual.1),
            Some(Scoreline::new(guess.0, guess.1)),
        )
    }

    #[test]
    fn exact_guess_is_worth_three() {
        assert_eq!(score((2, 2), (2, 2)), 3);
        assert_eq!(score((3, 1), (3, 1)), 3);
        assert_eq!(score((0, 4), (0, 4)), 3);
    }

    #[test]
    fn right_outcome_is_worth_one() {
        assert_eq!(score((2, 2), (0, 0)), 1);
        assert_eq!(score((2, 0), (1, 0)), 1);
        assert_eq!(score((1, 3), (0, 1)), 1);
    }

    #[test]
    fn wrong_outcome_is_worth_nothing() {
        assert_eq!(score((2, 0), (0, 2)), 0);
        assert_eq!(score((1, 1), (2, 1)), 0);
        assert_eq!(score((0, 1), (0, 0)), 0);
    }

    #[test]
    fn missing_guess_is_worth_nothing() {
        assert_eq!(points(Scoreline::new(1, 0), None), 0);
        assert_eq!(Scoreline::from_parts(Some(1), None), None);
    }

    #[test]
    fn outcome_follows_goal_difference() {
        assert_eq!(Scoreline::new(3, 2).outcome(), Outcome::HomeWin);
        assert_eq!(Scoreline::new(0, 0).outcome(), Outcome::Draw);
        assert_eq!(Scoreline::new(1, 5).outcome(), Outcome::AwayWin);
    }
}
