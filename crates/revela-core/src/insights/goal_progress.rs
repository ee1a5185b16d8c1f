//! Goal-progress generator
//!
//! Rates each active goal by how far along it is and whether the remaining
//! pace fits the user's income.

use chrono::NaiveDate;

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::Goal;
use crate::signals;

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Actionable, Insight, InsightCategory, Severity};

/// Months until the deadline, at least 1; the configured default when the
/// goal has none
pub(crate) fn months_to_deadline(goal: &Goal, today: NaiveDate, config: &AnalysisConfig) -> f64 {
    match goal.deadline {
        Some(deadline) => ((deadline - today).num_days() as f64 / 30.0).max(1.0),
        None => config.default_months_to_deadline,
    }
}

/// Monthly saving needed to close the gap by the deadline
pub(crate) fn required_monthly_saving(
    goal: &Goal,
    today: NaiveDate,
    config: &AnalysisConfig,
) -> f64 {
    (goal.target_amount - goal.current_amount) / months_to_deadline(goal, today, config)
}

pub struct GoalProgressGenerator;

impl GoalProgressGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GoalProgressGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for GoalProgressGenerator {
    fn id(&self) -> &'static str {
        "goal_progress"
    }

    fn name(&self) -> &'static str {
        "Goal Progress"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let config = ctx.config;
        let window = ctx.transactions_since(config.pattern_window_days);
        let average_income = signals::average_income(window.iter().copied());

        let mut insights = Vec::new();

        for goal in ctx.goals {
            let progress = if goal.target_amount > 0.0 {
                goal.current_amount / goal.target_amount * 100.0
            } else {
                0.0
            };
            let months = months_to_deadline(goal, ctx.today, config);
            let required = required_monthly_saving(goal, ctx.today, config);

            let mut description = format!("{:.1}% complete", progress);
            let severity = if progress >= config.goal_on_track_percent {
                description.push_str(" - excellent progress!");
                Severity::Positive
            } else if required > average_income * config.income_commitment_ratio {
                description.push_str(" - pace needs to pick up");
                Severity::Warning
            } else {
                Severity::Neutral
            };

            let fact = if progress > 50.0 {
                "People who reach 50% of a goal have a 90% chance of finishing it"
            } else {
                "Visualizing your goals daily raises the odds of success by 42%"
            };

            let insight = Insight::new(
                format!("goal-{}", goal.id),
                InsightCategory::Goals,
                severity,
                goal.title.clone(),
                description,
                progress,
                Actionable {
                    title: if progress > config.goal_on_track_percent {
                        "Finish the goal".to_string()
                    } else {
                        "Accelerate your progress".to_string()
                    },
                    description: format!("You need ${:.0}/month to reach this goal", required),
                    impact: format!("{:.0} months remaining", months),
                },
            )
            .with_fact(fact);

            insights.push(insight);
        }

        Ok(insights)
    }
}
