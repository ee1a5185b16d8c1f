//! Cognitive-bias generator
//!
//! Wires detection logic to the catalog for the two biases the data can
//! actually reveal: status quo (subscription pile-up) and optimism
//! (unrealistic goals). The rest of the catalog stays data-only.

use regex::Regex;
use std::sync::OnceLock;

use crate::biases::{lookup, BiasKind};
use crate::error::Result;
use crate::models::Transaction;
use crate::signals;

use super::engine::{AnalysisContext, InsightGenerator};
use super::goal_progress::required_monthly_saving;
use super::types::{Actionable, Insight, InsightCategory, Severity};

/// Case-insensitive subscription-equivalent marker
fn subscription_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| {
        Regex::new(r"(?i)subscription|abonnement|membership").expect("marker pattern is valid")
    })
}

fn is_subscription_like(tx: &Transaction) -> bool {
    let marker = subscription_marker();
    marker.is_match(&tx.category)
        || tx
            .description
            .as_deref()
            .map_or(false, |d| marker.is_match(d))
}

pub struct BiasDetectionGenerator;

impl BiasDetectionGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BiasDetectionGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for BiasDetectionGenerator {
    fn id(&self) -> &'static str {
        "bias_detection"
    }

    fn name(&self) -> &'static str {
        "Cognitive Biases"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        let config = ctx.config;
        let window = ctx.transactions_since(config.pattern_window_days);

        let mut insights = Vec::new();

        // Status-quo bias: subscriptions piling up through inertia
        let subscriptions: Vec<&Transaction> = window
            .iter()
            .copied()
            .filter(|t| is_subscription_like(t))
            .collect();

        if subscriptions.len() > config.subscription_count_threshold {
            let total: f64 = subscriptions.iter().map(|t| t.amount.abs()).sum();

            insights.push(
                Insight::new(
                    "bias-status-quo",
                    InsightCategory::Behavioral,
                    Severity::Warning,
                    "Status quo bias detected",
                    format!(
                        "{} active subscriptions - some may be going unused",
                        subscriptions.len()
                    ),
                    total,
                    Actionable {
                        title: "Subscription audit".to_string(),
                        description: "Review your subscriptions and cancel the unused ones"
                            .to_string(),
                        impact: format!(
                            "Potential saving: ${:.0}/month",
                            total * config.subscription_savings_ratio
                        ),
                    },
                )
                .with_bias(lookup(BiasKind::StatusQuo)),
            );
        }

        // Optimism bias: goals that outrun the income funding them
        let average_income = signals::average_income(window.iter().copied());
        let unrealistic = ctx
            .goals
            .iter()
            .filter(|goal| {
                required_monthly_saving(goal, ctx.today, config)
                    > average_income * config.income_commitment_ratio
            })
            .count();

        if unrealistic > 0 {
            insights.push(
                Insight::new(
                    "bias-optimism",
                    InsightCategory::Behavioral,
                    Severity::Warning,
                    "Optimism bias in your goals",
                    format!(
                        "{} goal(s) each need more than {:.0}% of your income",
                        unrealistic,
                        config.income_commitment_ratio * 100.0
                    ),
                    unrealistic as f64,
                    Actionable {
                        title: "Reassess your goals".to_string(),
                        description: "Adjust your goals so they are realistic and reachable"
                            .to_string(),
                        impact: "Goal success rates improve by 65% when targets are realistic"
                            .to_string(),
                    },
                )
                .with_bias(lookup(BiasKind::OptimismBias)),
            );
        }

        Ok(insights)
    }
}
