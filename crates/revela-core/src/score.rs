//! Revelation scoring
//!
//! Five sub-scores reduced from the raw snapshot, composed into three
//! dimensions and one overall 0-100 number. Each sub-score is rounded to an
//! integer before composition; the composites round again. That accumulated
//! rounding is part of the contract, so tests can pin exact values.

use serde::Serialize;

use crate::insights::bias_detection::BiasDetectionGenerator;
use crate::insights::engine::{AnalysisContext, InsightGenerator};
use crate::insights::types::Severity;
use crate::signals;

/// The five raw sub-scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreBreakdown {
    pub cashflow: u8,
    pub spending_control: u8,
    pub saving_rate: u8,
    pub goal_achievement: u8,
    pub bias_awareness: u8,
}

/// Composite 0-100 health/discipline/progress metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevelationScore {
    pub overall: u8,
    pub financial_health: u8,
    pub behavioral_discipline: u8,
    pub goal_progress: u8,
    pub breakdown: ScoreBreakdown,
}

/// Round and pin to the 0-100 scale
fn clamp_score(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

/// Mean of two sub-scores, rounded
fn midpoint(a: u8, b: u8) -> u8 {
    clamp_score((a as f64 + b as f64) / 2.0)
}

/// Penalty a detected bias insight applies to awareness
fn severity_penalty(severity: Severity) -> f64 {
    match severity {
        Severity::Critical => 30.0,
        Severity::Warning => 20.0,
        Severity::Neutral => 10.0,
        Severity::Positive => 0.0,
    }
}

pub struct RevelationScorer;

impl RevelationScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one snapshot
    pub fn score(&self, ctx: &AnalysisContext<'_>) -> RevelationScore {
        let window = ctx.transactions_since(ctx.config.score_window_days);
        let (income, expenses) = signals::income_expense_split(window.iter().copied());

        let cashflow = cashflow_score(income, expenses);
        let spending_control =
            spending_control_score(&signals::monthly_expense_series(window.iter().copied()));
        let saving_rate = saving_rate_score(income, expenses);
        let goal_achievement = goal_achievement_score(ctx);
        let bias_awareness = bias_awareness_score(ctx);

        let financial_health = midpoint(cashflow, saving_rate);
        let behavioral_discipline = midpoint(spending_control, bias_awareness);
        let goal_progress = goal_achievement;
        let overall = clamp_score(
            (financial_health as f64 + behavioral_discipline as f64 + goal_progress as f64) / 3.0,
        );

        RevelationScore {
            overall,
            financial_health,
            behavioral_discipline,
            goal_progress,
            breakdown: ScoreBreakdown {
                cashflow,
                spending_control,
                saving_rate,
                goal_achievement,
                bias_awareness,
            },
        }
    }
}

impl Default for RevelationScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Net flow as a share of income, offset so break-even lands at 50
fn cashflow_score(income: f64, expenses: f64) -> u8 {
    let ratio = if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    };
    clamp_score(ratio * 100.0 + 50.0)
}

/// Regularity of monthly spending: lower variation scores higher
fn spending_control_score(monthly_expenses: &[f64]) -> u8 {
    if monthly_expenses.len() < 2 {
        return 50;
    }

    let mean = monthly_expenses.iter().sum::<f64>() / monthly_expenses.len() as f64;
    let variance = monthly_expenses
        .iter()
        .map(|expense| (expense - mean).powi(2))
        .sum::<f64>()
        / monthly_expenses.len() as f64;
    let coefficient = if variance > 0.0 {
        variance.sqrt() / mean
    } else {
        0.0
    };

    clamp_score(100.0 - coefficient * 100.0)
}

/// Share of income kept
fn saving_rate_score(income: f64, expenses: f64) -> u8 {
    let rate = if income > 0.0 {
        (income - expenses) / income
    } else {
        0.0
    };
    clamp_score(rate * 100.0)
}

/// Mean clamped progress across goals; 50 when there are none
fn goal_achievement_score(ctx: &AnalysisContext<'_>) -> u8 {
    if ctx.goals.is_empty() {
        return 50;
    }

    let total: f64 = ctx.goals.iter().map(|goal| goal.progress() * 100.0).sum();

    clamp_score(total / ctx.goals.len() as f64)
}

/// 100 minus a penalty per detected bias, floored at zero
///
/// Runs the bias generator on the raw snapshot, not the enriched insight set.
fn bias_awareness_score(ctx: &AnalysisContext<'_>) -> u8 {
    let biases = BiasDetectionGenerator::new()
        .generate(ctx)
        .unwrap_or_default();
    let penalty: f64 = biases
        .iter()
        .map(|insight| severity_penalty(insight.severity))
        .sum();
    clamp_score(100.0 - penalty)
}
