//! Spending-pattern generator
//!
//! Compares each category's trailing 30 days against the 30 days before that
//! and surfaces the changes big enough to act on.

use crate::error::Result;
use crate::signals;

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Actionable, Comparison, Insight, InsightCategory, Severity};

pub struct SpendingPatternGenerator;

impl SpendingPatternGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SpendingPatternGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for SpendingPatternGenerator {
    fn id(&self) -> &'static str {
        "spending_pattern"
    }

    fn name(&self) -> &'static str {
        "Spending Patterns"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let config = ctx.config;
        let window = ctx.transactions_since(config.pattern_window_days);
        if window.is_empty() {
            return Ok(vec![]);
        }

        let boundary = ctx.cutoff(config.period_days);
        let (previous_period, current_period) =
            signals::period_split(window.iter().copied(), boundary);

        // (category, current, previous, change%)
        let mut changes: Vec<(String, f64, f64, f64)> = Vec::new();

        for category in signals::group_by_category(window.iter().copied()).into_keys() {
            let current = signals::category_amount(current_period.iter().copied(), &category);
            let previous = signals::category_amount(previous_period.iter().copied(), &category);

            // A category with no prior baseline has no meaningful change
            if previous <= 0.0 {
                continue;
            }

            let change = (current - previous) / previous * 100.0;
            if change.abs() > config.spending_change_threshold {
                changes.push((category, current, previous, change));
            }
        }

        // Largest swings first; category name breaks ties deterministically
        changes.sort_by(|a, b| {
            b.3.abs()
                .partial_cmp(&a.3.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.cmp(&b.0))
        });

        let mut insights = Vec::new();

        for (category, current, previous, change) in changes {
            let is_increase = change > 0.0;

            let severity = if change > config.spending_warning_threshold {
                Severity::Warning
            } else if change < -config.spending_change_threshold {
                Severity::Positive
            } else {
                Severity::Neutral
            };

            let actionable = if is_increase {
                Actionable {
                    title: "Review the triggers".to_string(),
                    description: format!(
                        "Identify what caused this {:.1}% increase in {}",
                        change, category
                    ),
                    impact: format!(
                        "Potential saving: ${:.0}/month",
                        current * config.increase_savings_ratio
                    ),
                }
            } else {
                Actionable {
                    title: "Keep up the discipline".to_string(),
                    description: format!(
                        "Your {:.1}% reduction in {} is excellent",
                        change.abs(),
                        category
                    ),
                    impact: format!("Realized saving: ${:.0}", previous - current),
                }
            };

            let fact = if is_increase {
                "Impulse purchases rise by about 40% when we are stressed"
            } else {
                "Cutting one spending category improves control over all the others"
            };

            let insight = Insight::new(
                format!("spending-{}", category),
                InsightCategory::Spending,
                severity,
                format!(
                    "{} spending on {}",
                    if is_increase { "Increased" } else { "Reduced" },
                    category
                ),
                format!(
                    "{}{:.1}% vs the previous 30 days",
                    if is_increase { "+" } else { "" },
                    change
                ),
                current,
                actionable,
            )
            .with_comparison(Comparison {
                previous,
                change,
                period: "previous 30 days".to_string(),
            })
            .with_fact(fact);

            insights.push(insight);
        }

        Ok(insights)
    }
}
