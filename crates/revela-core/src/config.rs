//! Analysis configuration
//!
//! Every tunable threshold used by the generators, the enricher, and the
//! scorer lives here, so the policy is visible in one place instead of being
//! scattered as inline constants.

use std::time::Duration;

/// Policy constants for insight generation and revelation scoring
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    /// Transaction window for spending-pattern and bias analysis (days)
    pub pattern_window_days: i64,
    /// Transaction window for revelation scoring (days)
    pub score_window_days: i64,
    /// Emotion window for mood correlation and scoring (days)
    pub emotion_window_days: i64,
    /// Length of one comparison period in the spending-pattern analysis (days)
    pub period_days: i64,
    /// Minimum |percent change| for a spending-pattern insight (strict)
    pub spending_change_threshold: f64,
    /// Percent change above which a spending increase becomes a warning
    pub spending_warning_threshold: f64,
    /// Goal progress (percent) considered on track
    pub goal_on_track_percent: f64,
    /// Fraction of average income a goal may demand per month before it is
    /// flagged as unrealistic
    pub income_commitment_ratio: f64,
    /// Months assumed remaining when a goal has no deadline
    pub default_months_to_deadline: f64,
    /// Subscription-like transaction count above which status-quo bias fires
    pub subscription_count_threshold: usize,
    /// Fraction of subscription spend treated as recoverable
    pub subscription_savings_ratio: f64,
    /// Fraction of a grown category treated as recoverable
    pub increase_savings_ratio: f64,
    /// Stress-day spending must exceed happy-day spending by this factor
    pub stress_spending_ratio: f64,
    /// Fraction of stress-day spend treated as recoverable
    pub stress_savings_ratio: f64,
    /// Probability that an insight gets a quote attached
    pub quote_probability: f64,
    /// Upper bound on a single external quote fetch
    pub quote_timeout: Duration,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pattern_window_days: 60,
            score_window_days: 90,
            emotion_window_days: 30,
            period_days: 30,
            spending_change_threshold: 15.0,
            spending_warning_threshold: 25.0,
            goal_on_track_percent: 80.0,
            income_commitment_ratio: 0.3,
            default_months_to_deadline: 12.0,
            subscription_count_threshold: 3,
            subscription_savings_ratio: 0.3,
            increase_savings_ratio: 0.2,
            stress_spending_ratio: 1.3,
            stress_savings_ratio: 0.3,
            quote_probability: 0.5,
            quote_timeout: Duration::from_secs(5),
        }
    }
}
