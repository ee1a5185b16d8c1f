//! Insight engine - runs the registered generators over one data snapshot

use chrono::{Duration, NaiveDate};

use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::models::{Emotion, Goal, Transaction};

use super::bias_detection::BiasDetectionGenerator;
use super::emotional_spending::EmotionalSpendingGenerator;
use super::goal_progress::GoalProgressGenerator;
use super::spending_pattern::SpendingPatternGenerator;
use super::types::Insight;

/// One user's fetched data plus the analysis parameters
///
/// The snapshot holds the broadest window the orchestrator fetched; each
/// generator narrows it to its own window in memory.
pub struct AnalysisContext<'a> {
    pub transactions: &'a [Transaction],
    pub goals: &'a [Goal],
    pub emotions: &'a [Emotion],
    /// The "now" every window is derived from
    pub today: NaiveDate,
    pub config: &'a AnalysisConfig,
}

impl<'a> AnalysisContext<'a> {
    pub fn new(
        transactions: &'a [Transaction],
        goals: &'a [Goal],
        emotions: &'a [Emotion],
        today: NaiveDate,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            transactions,
            goals,
            emotions,
            today,
            config,
        }
    }

    /// Date `days` before today
    pub fn cutoff(&self, days: i64) -> NaiveDate {
        self.today - Duration::days(days)
    }

    /// Transactions no older than `days`
    pub fn transactions_since(&self, days: i64) -> Vec<&'a Transaction> {
        let cutoff = self.cutoff(days);
        self.transactions
            .iter()
            .filter(|t| t.date >= cutoff)
            .collect()
    }
}

/// One analytical dimension
///
/// Generators are pure over the snapshot: no I/O, no shared state, total on
/// empty input. Enrichment happens afterwards in the orchestrator.
pub trait InsightGenerator: Send + Sync {
    /// Stable identifier, used as the insight id prefix and in logs
    fn id(&self) -> &'static str;

    /// Human-readable name
    fn name(&self) -> &'static str;

    /// Analyze the snapshot and produce zero or more insights
    fn generate(&self, ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>>;
}

/// Registry that runs every generator and merges their output
pub struct InsightEngine {
    generators: Vec<Box<dyn InsightGenerator>>,
}

impl Default for InsightEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl InsightEngine {
    /// Engine with the built-in generators registered
    pub fn new() -> Self {
        let mut engine = Self { generators: vec![] };

        engine.register(Box::new(SpendingPatternGenerator::new()));
        engine.register(Box::new(GoalProgressGenerator::new()));
        engine.register(Box::new(BiasDetectionGenerator::new()));
        engine.register(Box::new(EmotionalSpendingGenerator::new()));

        engine
    }

    pub fn register(&mut self, generator: Box<dyn InsightGenerator>) {
        self.generators.push(generator);
    }

    /// Run every generator and collect insights, sorted by severity
    ///
    /// A failing generator is logged and contributes nothing; one bad signal
    /// never blanks the whole response.
    pub fn run_all(&self, ctx: &AnalysisContext<'_>) -> Vec<Insight> {
        let mut all_insights = vec![];

        for generator in &self.generators {
            match generator.generate(ctx) {
                Ok(insights) => {
                    tracing::debug!(
                        generator = generator.id(),
                        count = insights.len(),
                        "Insight generation complete"
                    );
                    all_insights.extend(insights);
                }
                Err(e) => {
                    tracing::warn!(
                        generator = generator.id(),
                        error = %e,
                        "Insight generation failed"
                    );
                }
            }
        }

        // Stable sort: ties keep generator emission order
        all_insights.sort_by(|a, b| b.severity.rank().cmp(&a.severity.rank()));

        all_insights
    }

    /// Ids of the registered generators
    pub fn generator_ids(&self) -> Vec<&'static str> {
        self.generators.iter().map(|g| g.id()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insights::types::{Actionable, InsightCategory, Severity};
    use crate::Error;

    fn empty_ctx_parts() -> (Vec<Transaction>, Vec<Goal>, Vec<Emotion>, AnalysisConfig) {
        (vec![], vec![], vec![], AnalysisConfig::default())
    }

    struct FailingGenerator;

    impl InsightGenerator for FailingGenerator {
        fn id(&self) -> &'static str {
            "failing"
        }

        fn name(&self) -> &'static str {
            "Failing"
        }

        fn generate(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
            Err(Error::InvalidData("boom".to_string()))
        }
    }

    struct StaticGenerator(Severity);

    impl InsightGenerator for StaticGenerator {
        fn id(&self) -> &'static str {
            "static"
        }

        fn name(&self) -> &'static str {
            "Static"
        }

        fn generate(&self, _ctx: &AnalysisContext<'_>) -> Result<Vec<Insight>> {
            Ok(vec![Insight::new(
                format!("static-{}", self.0),
                InsightCategory::Spending,
                self.0,
                "t",
                "d",
                1.0,
                Actionable {
                    title: "a".to_string(),
                    description: "b".to_string(),
                    impact: "c".to_string(),
                },
            )])
        }
    }

    #[test]
    fn test_engine_registers_builtin_generators() {
        let engine = InsightEngine::new();
        let ids = engine.generator_ids();
        assert!(ids.contains(&"spending_pattern"));
        assert!(ids.contains(&"goal_progress"));
        assert!(ids.contains(&"bias_detection"));
        assert!(ids.contains(&"emotional_spending"));
    }

    #[test]
    fn test_empty_snapshot_yields_no_insights() {
        let (txs, goals, emotions, config) = empty_ctx_parts();
        let ctx = AnalysisContext::new(
            &txs,
            &goals,
            &emotions,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &config,
        );
        let insights = InsightEngine::new().run_all(&ctx);
        assert!(insights.is_empty());
    }

    #[test]
    fn test_failing_generator_is_isolated() {
        let (txs, goals, emotions, config) = empty_ctx_parts();
        let ctx = AnalysisContext::new(
            &txs,
            &goals,
            &emotions,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &config,
        );

        let mut engine = InsightEngine { generators: vec![] };
        engine.register(Box::new(FailingGenerator));
        engine.register(Box::new(StaticGenerator(Severity::Neutral)));

        let insights = engine.run_all(&ctx);
        assert_eq!(insights.len(), 1);
        assert_eq!(insights[0].severity, Severity::Neutral);
    }

    #[test]
    fn test_run_all_sorts_by_descending_severity() {
        let (txs, goals, emotions, config) = empty_ctx_parts();
        let ctx = AnalysisContext::new(
            &txs,
            &goals,
            &emotions,
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            &config,
        );

        let mut engine = InsightEngine { generators: vec![] };
        engine.register(Box::new(StaticGenerator(Severity::Positive)));
        engine.register(Box::new(StaticGenerator(Severity::Critical)));
        engine.register(Box::new(StaticGenerator(Severity::Warning)));

        let insights = engine.run_all(&ctx);
        let ranks: Vec<u8> = insights.iter().map(|i| i.severity.rank()).collect();
        assert_eq!(ranks, vec![4, 3, 1]);
    }
}
