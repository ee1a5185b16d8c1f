//! Quote enrichment
//!
//! Attaches a motivational quote to roughly half of the generated insights.
//! The external fetch is bounded by a timeout and any failure degrades to the
//! curated local pool; enrichment can never fail a request.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

use crate::config::AnalysisConfig;
use crate::external::QuoteProvider;
use crate::insights::types::Insight;
use crate::psychology;

pub struct QuoteEnricher {
    provider: Arc<dyn QuoteProvider>,
    /// Chance that any single insight gets a quote
    probability: f64,
    /// Upper bound on one provider call
    timeout: Duration,
    /// Fixed seed for deterministic sampling in tests
    seed: Option<u64>,
}

impl QuoteEnricher {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        let config = AnalysisConfig::default();
        Self::from_config(provider, &config)
    }

    pub fn from_config(provider: Arc<dyn QuoteProvider>, config: &AnalysisConfig) -> Self {
        Self {
            provider,
            probability: config.quote_probability,
            timeout: config.quote_timeout,
            seed: None,
        }
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = probability.clamp(0.0, 1.0);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    /// Attach quotes in place. Never raises; the worst case is an insight
    /// whose quote stays unset because the coin flip skipped it.
    pub async fn enrich(&self, insights: &mut [Insight]) {
        let mut rng = self.rng();

        for insight in insights.iter_mut() {
            if !rng.gen_bool(self.probability) {
                continue;
            }

            let fetch = self.provider.fetch_random_quote(Some(insight.category));
            insight.quote = Some(match tokio::time::timeout(self.timeout, fetch).await {
                Ok(Ok(quote)) => quote,
                Ok(Err(e)) => {
                    warn!(insight = %insight.id, error = %e, "Quote fetch failed, using local pool");
                    psychology::fallback_quote(&mut rng, insight.category)
                }
                Err(_) => {
                    warn!(insight = %insight.id, "Quote fetch timed out, using local pool");
                    psychology::fallback_quote(&mut rng, insight.category)
                }
            });
        }
    }
}
