//! Emotional-spending generator
//!
//! Correlates mood entries with same-day spending to flag stress-driven
//! purchases.

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::error::Result;
use crate::signals;

use super::engine::{AnalysisContext, InsightGenerator};
use super::types::{Actionable, Insight, InsightCategory, Severity};

pub struct EmotionalSpendingGenerator;

impl EmotionalSpendingGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EmotionalSpendingGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightGenerator for EmotionalSpendingGenerator {
    fn id(&self) -> &'static str {
        "emotional_spending"
    }

    fn name(&self) -> &'static str {
        "Emotional Spending"
    }

    fn generate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
        if ctx.emotions.is_empty() {
            return Ok(vec![]);
        }

        let stressful_days: HashSet<NaiveDate> = ctx
            .emotions
            .iter()
            .filter(|e| e.mood.is_stressful())
            .map(|e| e.date)
            .collect();
        let happy_days: HashSet<NaiveDate> = ctx
            .emotions
            .iter()
            .filter(|e| e.mood.is_uplifting())
            .map(|e| e.date)
            .collect();

        let stress_spending = signals::spending_on_days(ctx.transactions, &stressful_days);
        let happy_spending = signals::spending_on_days(ctx.transactions, &happy_days);

        // Without a happy-day baseline the ratio is meaningless; stay quiet
        let config = ctx.config;
        if happy_spending <= 0.0
            || stress_spending <= happy_spending * config.stress_spending_ratio
        {
            return Ok(vec![]);
        }

        let insight = Insight::new(
            "emotional-stress-spending",
            InsightCategory::Emotional,
            Severity::Warning,
            "Emotional spending detected",
            format!(
                "+{:.0}% spending on stressful days",
                (stress_spending / happy_spending - 1.0) * 100.0
            ),
            stress_spending - happy_spending,
            Actionable {
                title: "An anti-stress strategy".to_string(),
                description: "Find alternatives to shopping for the days you feel stressed"
                    .to_string(),
                impact: format!(
                    "Potential saving: ${:.0}/month",
                    stress_spending * config.stress_savings_ratio
                ),
            },
        )
        .with_fact("Stress increases impulse buying by 79% on average");

        Ok(vec![insight])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AnalysisConfig;
    use crate::models::{Emotion, Mood, Transaction};
    use chrono::Duration;

    fn emotion(date: NaiveDate, mood: Mood) -> Emotion {
        Emotion {
            id: format!("e-{}-{}", date, mood),
            user_id: "u1".to_string(),
            date,
            mood,
            note: None,
        }
    }

    fn expense(date: NaiveDate, amount: f64) -> Transaction {
        Transaction {
            id: format!("t-{}-{}", date, amount),
            user_id: "u1".to_string(),
            date,
            amount: -amount,
            category: "shopping".to_string(),
            description: None,
        }
    }

    fn run(transactions: &[Transaction], emotions: &[Emotion]) -> Vec<Insight> {
        let config = AnalysisConfig::default();
        let ctx = AnalysisContext::new(
            transactions,
            &[],
            emotions,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &config,
        );
        EmotionalSpendingGenerator::new().generate(&ctx).unwrap()
    }

    #[test]
    fn test_stress_spending_spike_is_flagged() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let stressed = today - Duration::days(3);
        let happy = today - Duration::days(10);

        let emotions = vec![emotion(stressed, Mood::Stressed), emotion(happy, Mood::Happy)];
        let txs = vec![expense(stressed, 300.0), expense(happy, 100.0)];

        let insights = run(&txs, &emotions);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Warning);
        assert_eq!(insights[0].value, 200.0);
        // 30% of the stress-day spend
        assert!(insights[0].actionable.impact.contains("$90"));
    }

    #[test]
    fn test_zero_happy_baseline_is_guarded() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let happy = today - Duration::days(5);

        // All moods uplifting, all spending on happy days: no stress baseline
        let emotions = vec![emotion(happy, Mood::Happy)];
        let txs = vec![expense(happy, 200.0)];
        assert!(run(&txs, &emotions).is_empty());

        // Stress spending exists but no happy-day spending at all
        let stressed = today - Duration::days(2);
        let emotions = vec![emotion(stressed, Mood::Anxious)];
        let txs = vec![expense(stressed, 500.0)];
        assert!(run(&txs, &emotions).is_empty());
    }

    #[test]
    fn test_moderate_difference_stays_quiet() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let stressed = today - Duration::days(3);
        let happy = today - Duration::days(10);

        let emotions = vec![emotion(stressed, Mood::Sad), emotion(happy, Mood::Excited)];
        // 120 vs 100: below the 1.3x ratio
        let txs = vec![expense(stressed, 120.0), expense(happy, 100.0)];
        assert!(run(&txs, &emotions).is_empty());
    }

    #[test]
    fn test_no_emotions_no_insights() {
        let today = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        let txs = vec![expense(today, 400.0)];
        assert!(run(&txs, &[]).is_empty());
    }
}
