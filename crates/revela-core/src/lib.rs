//! Revela Core Library
//!
//! The insights and revelation scoring engine for the Revela personal
//! finance app:
//! - Signal aggregators reducing raw transactions to numeric summaries
//! - Pluggable insight generators (spending patterns, goal progress,
//!   cognitive biases, emotional spending)
//! - Best-effort quote/fact enrichment with local fallbacks
//! - The composite 0-100 revelation score with its five sub-scores
//! - The per-request orchestrator assembling the revelation bundle
//!
//! Persistence, authentication, and delivery are external collaborators:
//! the engine consumes a [`store::DataStore`] and a
//! [`external::QuoteProvider`] and produces plain records for the HTTP
//! layer to serialize.

pub mod biases;
pub mod clock;
pub mod config;
pub mod enrich;
pub mod error;
pub mod external;
pub mod insights;
pub mod models;
pub mod psychology;
pub mod score;
pub mod service;
pub mod signals;
pub mod store;

pub use biases::{BiasKind, BiasSeverity, BiasType, CognitiveBias};
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AnalysisConfig;
pub use enrich::QuoteEnricher;
pub use error::{Error, Result};
pub use external::{
    EconomicIndicators, ExternalContent, MarketSentiment, NewsArticle, QuoteProvider,
    SentimentLabel, ZenQuotesProvider,
};
pub use insights::{
    Actionable, AnalysisContext, Comparison, Insight, InsightCategory, InsightEngine,
    InsightGenerator, Quote, Severity,
};
pub use models::{Emotion, Goal, GoalStatus, Mood, Transaction};
pub use score::{RevelationScore, RevelationScorer, ScoreBreakdown};
pub use service::{
    CategorizedInsights, CompleteRevelation, Priority, PriorityLevel, RevelationService,
    RevelationStats,
};
pub use store::{DataStore, DateRange, MemoryStore};
