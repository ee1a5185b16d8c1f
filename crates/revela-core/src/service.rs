//! Revelation service - the per-request orchestrator
//!
//! Fetches one user's data concurrently, runs the generators and the scorer
//! over the snapshot, and assembles the complete revelation bundle the HTTP
//! layer serializes.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::AnalysisConfig;
use crate::enrich::QuoteEnricher;
use crate::error::Result;
use crate::external::QuoteProvider;
use crate::insights::engine::{AnalysisContext, InsightEngine};
use crate::insights::types::{Insight, InsightCategory, Severity};
use crate::models::{Emotion, Goal, Transaction};
use crate::score::{RevelationScore, RevelationScorer};
use crate::store::{DataStore, DateRange};

/// Insights are recomputed on a daily cadence
const NEXT_UPDATE_IN: &str = "24h";

/// Composite score below which a dimension earns a priority block
const LOW_SCORE_THRESHOLD: u8 = 50;

/// Points of improvement potential per actionable insight
const IMPROVEMENT_POINTS_PER_INSIGHT: usize = 25;

/// Insights bucketed for display; an insight can appear in several buckets
#[derive(Debug, Clone, Serialize)]
pub struct CategorizedInsights {
    pub critical: Vec<Insight>,
    pub warning: Vec<Insight>,
    pub positive: Vec<Insight>,
    pub behavioral: Vec<Insight>,
    pub emotional: Vec<Insight>,
    pub goals: Vec<Insight>,
    pub spending: Vec<Insight>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Critical,
    High,
    Opportunity,
}

/// One recommended focus area
#[derive(Debug, Clone, Serialize)]
pub struct Priority {
    pub level: PriorityLevel,
    pub title: String,
    pub description: String,
    pub actions: Vec<String>,
}

/// Display statistics for the revelation screen
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevelationStats {
    pub total_insights: usize,
    pub biases_detected: usize,
    pub quotes_included: usize,
    pub average_severity: f64,
    pub improvement_potential: u8,
}

/// Everything the revelation screen needs in one response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteRevelation {
    pub score: RevelationScore,
    pub insights: CategorizedInsights,
    pub priorities: Vec<Priority>,
    pub stats: RevelationStats,
    pub timestamp: DateTime<Utc>,
    pub next_update_in: String,
}

/// The insights orchestrator
///
/// Explicitly constructed with its collaborators injected; one instance per
/// process, no global state. Every call computes fresh values scoped to that
/// call.
pub struct RevelationService<S> {
    store: S,
    engine: InsightEngine,
    enricher: QuoteEnricher,
    scorer: RevelationScorer,
    config: AnalysisConfig,
    clock: Arc<dyn Clock>,
}

impl<S: DataStore> RevelationService<S> {
    pub fn new(store: S, quote_provider: Arc<dyn QuoteProvider>) -> Self {
        Self::with_config(store, quote_provider, AnalysisConfig::default())
    }

    pub fn with_config(
        store: S,
        quote_provider: Arc<dyn QuoteProvider>,
        config: AnalysisConfig,
    ) -> Self {
        let enricher = QuoteEnricher::from_config(quote_provider, &config);
        Self {
            store,
            engine: InsightEngine::new(),
            enricher,
            scorer: RevelationScorer::new(),
            config,
            clock: Arc::new(SystemClock),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_enricher(mut self, enricher: QuoteEnricher) -> Self {
        self.enricher = enricher;
        self
    }

    /// One concurrent fetch at the broadest window each consumer needs;
    /// generators narrow it in memory
    async fn fetch_snapshot(
        &self,
        user_id: &str,
    ) -> Result<(Vec<Transaction>, Vec<Goal>, Vec<Emotion>)> {
        let today = self.clock.today();
        let window_days = self
            .config
            .score_window_days
            .max(self.config.pattern_window_days);
        let transaction_range = DateRange::since(today - Duration::days(window_days));
        let emotion_range = DateRange::since(today - Duration::days(self.config.emotion_window_days));

        let (transactions, goals, emotions) = tokio::try_join!(
            self.store.list_transactions(user_id, transaction_range),
            self.store.list_active_goals(user_id),
            self.store.list_emotions(user_id, emotion_range),
        )?;

        Ok((transactions, goals, emotions))
    }

    /// Generate, enrich, and rank the smart insights for one user
    pub async fn generate_smart_insights(&self, user_id: &str) -> Result<Vec<Insight>> {
        let (transactions, goals, emotions) = self.fetch_snapshot(user_id).await?;
        let ctx = AnalysisContext::new(
            &transactions,
            &goals,
            &emotions,
            self.clock.today(),
            &self.config,
        );

        let mut insights = self.engine.run_all(&ctx);
        self.enricher.enrich(&mut insights).await;

        tracing::info!(
            user = user_id,
            count = insights.len(),
            "Smart insights generated"
        );
        Ok(insights)
    }

    /// Compute the composite revelation score for one user
    pub async fn calculate_revelation_score(&self, user_id: &str) -> Result<RevelationScore> {
        let (transactions, goals, emotions) = self.fetch_snapshot(user_id).await?;
        let ctx = AnalysisContext::new(
            &transactions,
            &goals,
            &emotions,
            self.clock.today(),
            &self.config,
        );

        Ok(self.scorer.score(&ctx))
    }

    /// Insights + score + priorities + stats, assembled for the revelation
    /// screen in one call
    pub async fn get_complete_revelation(&self, user_id: &str) -> Result<CompleteRevelation> {
        let (insights, score) = tokio::try_join!(
            self.generate_smart_insights(user_id),
            self.calculate_revelation_score(user_id),
        )?;

        let priorities = build_priorities(&insights, &score);
        let stats = build_stats(&insights);
        let categorized = categorize(insights);

        Ok(CompleteRevelation {
            score,
            insights: categorized,
            priorities,
            stats,
            timestamp: self.clock.now(),
            next_update_in: NEXT_UPDATE_IN.to_string(),
        })
    }
}

fn of_severity(insights: &[Insight], severity: Severity) -> Vec<Insight> {
    insights
        .iter()
        .filter(|i| i.severity == severity)
        .cloned()
        .collect()
}

fn of_category(insights: &[Insight], category: InsightCategory) -> Vec<Insight> {
    insights
        .iter()
        .filter(|i| i.category == category)
        .cloned()
        .collect()
}

fn categorize(insights: Vec<Insight>) -> CategorizedInsights {
    CategorizedInsights {
        critical: of_severity(&insights, Severity::Critical),
        warning: of_severity(&insights, Severity::Warning),
        positive: of_severity(&insights, Severity::Positive),
        behavioral: of_category(&insights, InsightCategory::Behavioral),
        emotional: of_category(&insights, InsightCategory::Emotional),
        goals: of_category(&insights, InsightCategory::Goals),
        spending: of_category(&insights, InsightCategory::Spending),
    }
}

fn build_priorities(insights: &[Insight], score: &RevelationScore) -> Vec<Priority> {
    let mut priorities = Vec::new();

    let critical: Vec<&Insight> = insights
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .collect();
    if !critical.is_empty() {
        priorities.push(Priority {
            level: PriorityLevel::Critical,
            title: "Immediate action required".to_string(),
            description: format!("{} critical issue(s) detected", critical.len()),
            actions: critical.iter().map(|i| i.actionable.title.clone()).collect(),
        });
    }

    if score.financial_health < LOW_SCORE_THRESHOLD {
        priorities.push(Priority {
            level: PriorityLevel::High,
            title: "Improve financial health".to_string(),
            description: "Your cashflow and saving rate need attention".to_string(),
            actions: vec![
                "Analyze your spending".to_string(),
                "Optimize your income".to_string(),
                "Build a realistic budget".to_string(),
            ],
        });
    }

    if score.behavioral_discipline < LOW_SCORE_THRESHOLD {
        priorities.push(Priority {
            level: PriorityLevel::High,
            title: "Strengthen behavioral discipline".to_string(),
            description: "Cognitive biases are weighing on your financial decisions".to_string(),
            actions: vec![
                "Identify your triggers".to_string(),
                "Automate your decisions".to_string(),
                "Put guardrails in place".to_string(),
            ],
        });
    }

    let positive: Vec<&Insight> = insights
        .iter()
        .filter(|i| i.severity == Severity::Positive)
        .collect();
    if !positive.is_empty() {
        priorities.push(Priority {
            level: PriorityLevel::Opportunity,
            title: "Build on your wins".to_string(),
            description: format!("{} strength(s) to maintain and develop", positive.len()),
            actions: positive.iter().map(|i| i.actionable.title.clone()).collect(),
        });
    }

    priorities
}

fn build_stats(insights: &[Insight]) -> RevelationStats {
    let average_severity = if insights.is_empty() {
        0.0
    } else {
        insights
            .iter()
            .map(|i| i.severity.rank() as f64)
            .sum::<f64>()
            / insights.len() as f64
    };

    let actionable = insights
        .iter()
        .filter(|i| matches!(i.severity, Severity::Warning | Severity::Critical))
        .count();

    RevelationStats {
        total_insights: insights.len(),
        biases_detected: insights.iter().filter(|i| i.bias.is_some()).count(),
        quotes_included: insights.iter().filter(|i| i.quote.is_some()).count(),
        average_severity,
        improvement_potential: (actionable * IMPROVEMENT_POINTS_PER_INSIGHT).min(100) as u8,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::Actionable;

    fn insight(id: &str, category: InsightCategory, severity: Severity) -> Insight {
        Insight::new(
            id,
            category,
            severity,
            "t",
            "d",
            1.0,
            Actionable {
                title: format!("act-{}", id),
                description: "b".to_string(),
                impact: "c".to_string(),
            },
        )
    }

    fn neutral_score() -> RevelationScore {
        use crate::score::ScoreBreakdown;
        RevelationScore {
            overall: 70,
            financial_health: 70,
            behavioral_discipline: 70,
            goal_progress: 70,
            breakdown: ScoreBreakdown {
                cashflow: 70,
                spending_control: 70,
                saving_rate: 70,
                goal_achievement: 70,
                bias_awareness: 70,
            },
        }
    }

    #[test]
    fn test_categorize_buckets_are_non_exclusive() {
        let insights = vec![
            insight("a", InsightCategory::Behavioral, Severity::Warning),
            insight("b", InsightCategory::Spending, Severity::Positive),
        ];
        let categorized = categorize(insights);

        assert_eq!(categorized.warning.len(), 1);
        assert_eq!(categorized.behavioral.len(), 1);
        assert_eq!(categorized.warning[0].id, categorized.behavioral[0].id);
        assert_eq!(categorized.positive.len(), 1);
        assert_eq!(categorized.spending.len(), 1);
        assert!(categorized.critical.is_empty());
    }

    #[test]
    fn test_priorities_for_healthy_profile() {
        let insights = vec![insight("a", InsightCategory::Spending, Severity::Positive)];
        let priorities = build_priorities(&insights, &neutral_score());

        assert_eq!(priorities.len(), 1);
        assert_eq!(priorities[0].level, PriorityLevel::Opportunity);
        assert_eq!(priorities[0].actions, vec!["act-a".to_string()]);
    }

    #[test]
    fn test_priorities_for_struggling_profile() {
        let mut score = neutral_score();
        score.financial_health = 40;
        score.behavioral_discipline = 30;

        let insights = vec![insight("a", InsightCategory::Spending, Severity::Critical)];
        let priorities = build_priorities(&insights, &score);

        assert_eq!(priorities.len(), 3);
        assert_eq!(priorities[0].level, PriorityLevel::Critical);
        assert_eq!(priorities[1].level, PriorityLevel::High);
        assert_eq!(priorities[2].level, PriorityLevel::High);
    }

    #[test]
    fn test_stats_counts_and_potential() {
        let insights = vec![
            insight("a", InsightCategory::Spending, Severity::Warning),
            insight("b", InsightCategory::Goals, Severity::Critical),
            insight("c", InsightCategory::Spending, Severity::Positive),
        ];
        let stats = build_stats(&insights);

        assert_eq!(stats.total_insights, 3);
        assert_eq!(stats.biases_detected, 0);
        // (3 + 4 + 1) / 3
        assert!((stats.average_severity - 8.0 / 3.0).abs() < 1e-9);
        assert_eq!(stats.improvement_potential, 50);
    }

    #[test]
    fn test_improvement_potential_is_capped() {
        let insights: Vec<Insight> = (0..6)
            .map(|i| {
                insight(
                    &format!("w{}", i),
                    InsightCategory::Spending,
                    Severity::Warning,
                )
            })
            .collect();
        let stats = build_stats(&insights);
        assert_eq!(stats.improvement_potential, 100);
    }

    #[test]
    fn test_empty_stats_are_zeroed() {
        let stats = build_stats(&[]);
        assert_eq!(stats.total_insights, 0);
        assert_eq!(stats.average_severity, 0.0);
        assert_eq!(stats.improvement_potential, 0);
    }
}
