//! End-of-round rating

use serde::{Deserialize, Serialize};

use crate::consts::PASS_SCORE;

/// Qualitative rating tiers, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rating {
    RoyalMaster,
    BalloonChampion,
    GreatPopper,
    GoodJob,
    KeepPracticing,
}

impl Rating {
    /// Pure mapping from final score to tier
    pub fn for_score(score: u64) -> Self {
        match score {
            500.. => Rating::RoyalMaster,
            300..=499 => Rating::BalloonChampion,
            200..=299 => Rating::GreatPopper,
            100..=199 => Rating::GoodJob,
            _ => Rating::KeepPracticing,
        }
    }

    /// 1 = highest tier, 5 = lowest
    pub fn tier(&self) -> u8 {
        match self {
            Rating::RoyalMaster => 1,
            Rating::BalloonChampion => 2,
            Rating::GreatPopper => 3,
            Rating::GoodJob => 4,
            Rating::KeepPracticing => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Rating::RoyalMaster => "Royal Master!",
            Rating::BalloonChampion => "Balloon Champion!",
            Rating::GreatPopper => "Great Popper!",
            Rating::GoodJob => "Good Job!",
            Rating::KeepPracticing => "Keep Practicing!",
        }
    }

    /// Only the top tier earns the crown badge
    pub fn shows_crown(&self) -> bool {
        *self == Rating::RoyalMaster
    }
}

/// What the outcome screen offers besides Back
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextAction {
    Continue,
    Retry,
}

/// Classified result of a finished round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub score: u64,
    pub rating: Rating,
    /// Score met the pass threshold
    pub passed: bool,
}

impl Outcome {
    pub fn next_action(&self) -> NextAction {
        if self.passed {
            NextAction::Continue
        } else {
            NextAction::Retry
        }
    }

    pub fn message(&self) -> &'static str {
        if self.passed {
            "Outstanding performance! Royal reflexes have earned a place in the celebration!"
        } else {
            "Good effort! Every balloon popped was a moment of joy. Try again to improve!"
        }
    }
}

/// Classify a final score
pub fn classify(score: u64) -> Outcome {
    Outcome {
        score,
        rating: Rating::for_score(score),
        passed: score >= PASS_SCORE,
    }
}
