//! Domain models for Revela
//!
//! These are the raw records the engine consumes. They are owned by the data
//! store and treated as immutable for the duration of a scoring pass.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    /// Negative = expense, positive = income. Store adapters normalize to
    /// this convention; the engine never re-derives sign from category text.
    pub amount: f64,
    pub category: String,
    pub description: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount > 0.0
    }

    pub fn is_expense(&self) -> bool {
        self.amount < 0.0
    }
}

/// Lifecycle status of a savings goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    Active,
    Completed,
    Archived,
}

impl GoalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            _ => Err(format!("Unknown goal status: {}", s)),
        }
    }
}

impl std::fmt::Display for GoalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A savings goal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub user_id: String,
    pub title: String,
    /// Target amount, >= 0
    pub target_amount: f64,
    /// Amount saved so far, >= 0
    pub current_amount: f64,
    pub deadline: Option<NaiveDate>,
    pub status: GoalStatus,
}

impl Goal {
    /// Fraction of the goal reached, clamped to [0, 1]. Zero-target goals
    /// report zero progress.
    pub fn progress(&self) -> f64 {
        if self.target_amount > 0.0 {
            (self.current_amount / self.target_amount).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Mood recorded in an emotion entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Stressed,
    Anxious,
    Sad,
    Happy,
    Excited,
    Optimistic,
    Neutral,
    /// Any mood outside the fixed vocabulary
    Other,
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stressed => "stressed",
            Self::Anxious => "anxious",
            Self::Sad => "sad",
            Self::Happy => "happy",
            Self::Excited => "excited",
            Self::Optimistic => "optimistic",
            Self::Neutral => "neutral",
            Self::Other => "other",
        }
    }

    /// Moods counted toward stress-day spending
    pub fn is_stressful(&self) -> bool {
        matches!(self, Self::Stressed | Self::Anxious | Self::Sad)
    }

    /// Moods counted toward happy-day spending
    pub fn is_uplifting(&self) -> bool {
        matches!(self, Self::Happy | Self::Excited | Self::Optimistic)
    }
}

impl std::str::FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stressed" => Ok(Self::Stressed),
            "anxious" => Ok(Self::Anxious),
            "sad" => Ok(Self::Sad),
            "happy" => Ok(Self::Happy),
            "excited" => Ok(Self::Excited),
            "optimistic" => Ok(Self::Optimistic),
            "neutral" => Ok(Self::Neutral),
            _ => Ok(Self::Other),
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A mood journal entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Emotion {
    pub id: String,
    pub user_id: String,
    pub date: NaiveDate,
    pub mood: Mood,
    pub note: Option<String>,
}
