//! External content providers
//!
//! Everything in here is best-effort: a quote, a market-sentiment read, a
//! news list, or an indicator set either arrives or degrades to a local
//! fallback. Nothing the engine computes depends on these calls succeeding.

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::warn;

use crate::error::{Error, Result};
use crate::insights::types::{InsightCategory, Quote};

const ZENQUOTES_BASE_URL: &str = "https://zenquotes.io";
const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co";
const NEWS_API_BASE_URL: &str = "https://newsapi.org";

/// Provider seam for motivational quotes
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch one quote, loosely matched to the category. Errors are expected
    /// and handled by the caller's fallback.
    async fn fetch_random_quote(&self, category: Option<InsightCategory>) -> Result<Quote>;
}

/// ZenQuotes-compatible quote provider
pub struct ZenQuotesProvider {
    client: Client,
    base_url: String,
    timeout: Duration,
}

#[derive(Debug, Deserialize)]
struct ZenQuote {
    q: String,
    a: String,
}

impl ZenQuotesProvider {
    pub fn new() -> Self {
        Self::with_base_url(ZENQUOTES_BASE_URL)
    }

    /// Point the provider at a different host (tests, proxies)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            timeout: Duration::from_secs(5),
        }
    }
}

impl Default for ZenQuotesProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteProvider for ZenQuotesProvider {
    async fn fetch_random_quote(&self, _category: Option<InsightCategory>) -> Result<Quote> {
        // The API serves random quotes only; category matching is the
        // caller's fallback concern
        let url = format!("{}/api/random", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let quotes: Vec<ZenQuote> = response.json().await?;
        let first = quotes
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidData("empty quote response".to_string()))?;

        Ok(Quote {
            text: first.q,
            author: first.a,
        })
    }
}

/// Aggregate market mood derived from news sentiment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Neutral,
    Negative,
}

#[derive(Debug, Clone, Serialize)]
pub struct MarketSentiment {
    pub sentiment: SentimentLabel,
    pub confidence: f64,
    pub summary: String,
    pub recommendation: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct IndicatorReading {
    pub rate: f64,
    pub trend: &'static str,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EconomicIndicators {
    pub inflation: IndicatorReading,
    pub interest_rate: IndicatorReading,
    pub unemployment: IndicatorReading,
    pub gdp_growth: IndicatorReading,
    pub last_updated: String,
    pub source: &'static str,
}

#[derive(Debug, Deserialize)]
struct SentimentFeed {
    #[serde(default)]
    feed: Vec<SentimentFeedEntry>,
}

#[derive(Debug, Deserialize)]
struct SentimentFeedEntry {
    /// The feed serves this as either a number or a numeric string
    #[serde(default)]
    overall_sentiment_score: Option<serde_json::Value>,
}

impl SentimentFeedEntry {
    fn score(&self) -> Option<f64> {
        match self.overall_sentiment_score.as_ref()? {
            serde_json::Value::Number(n) => n.as_f64(),
            serde_json::Value::String(s) => s.parse().ok(),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct NewsResponse {
    #[serde(default)]
    articles: Vec<NewsResponseArticle>,
}

#[derive(Debug, Deserialize)]
struct NewsResponseArticle {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, rename = "publishedAt")]
    published_at: String,
    #[serde(default)]
    source: NewsResponseSource,
}

#[derive(Debug, Default, Deserialize)]
struct NewsResponseSource {
    #[serde(default)]
    name: String,
}

/// Best-effort fetchers for market context, with a 1-hour in-memory cache
pub struct ExternalContent {
    client: Client,
    sentiment_base_url: String,
    news_base_url: String,
    alpha_vantage_key: Option<String>,
    news_api_key: Option<String>,
    cache_ttl: Duration,
    sentiment_cache: Mutex<Option<(MarketSentiment, Instant)>>,
    news_cache: Mutex<Option<(Vec<NewsArticle>, Instant)>>,
}

impl ExternalContent {
    pub fn new(alpha_vantage_key: Option<String>, news_api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            sentiment_base_url: ALPHA_VANTAGE_BASE_URL.to_string(),
            news_base_url: NEWS_API_BASE_URL.to_string(),
            alpha_vantage_key,
            news_api_key,
            cache_ttl: Duration::from_secs(3600),
            sentiment_cache: Mutex::new(None),
            news_cache: Mutex::new(None),
        }
    }

    /// Read API keys from `ALPHA_VANTAGE_KEY` / `NEWS_API_KEY`
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("ALPHA_VANTAGE_KEY").ok(),
            std::env::var("NEWS_API_KEY").ok(),
        )
    }

    /// Current market sentiment; cached, falls back to a neutral read
    pub async fn market_sentiment(&self) -> MarketSentiment {
        if let Some(cached) = self.cached_sentiment() {
            return cached;
        }

        let Some(key) = self.alpha_vantage_key.as_deref() else {
            return fallback_sentiment();
        };

        match self.fetch_sentiment(key).await {
            Ok(sentiment) => {
                self.store_sentiment(sentiment.clone());
                sentiment
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch market sentiment");
                fallback_sentiment()
            }
        }
    }

    /// Recent financial news; cached, falls back to a canned list
    pub async fn financial_news(&self, limit: usize) -> Vec<NewsArticle> {
        if let Some(cached) = self.cached_news() {
            return cached;
        }

        let Some(key) = self.news_api_key.as_deref() else {
            return fallback_news();
        };

        match self.fetch_news(key, limit).await {
            Ok(articles) => {
                self.store_news(articles.clone());
                articles
            }
            Err(e) => {
                warn!(error = %e, "Failed to fetch financial news");
                fallback_news()
            }
        }
    }

    /// Headline economic indicators. Estimates until a real feed is wired;
    /// callers treat them as contextual color only.
    pub fn economic_indicators(&self) -> EconomicIndicators {
        EconomicIndicators {
            inflation: IndicatorReading {
                rate: 2.1,
                trend: "stable",
            },
            interest_rate: IndicatorReading {
                rate: 3.5,
                trend: "increasing",
            },
            unemployment: IndicatorReading {
                rate: 7.2,
                trend: "decreasing",
            },
            gdp_growth: IndicatorReading {
                rate: 1.8,
                trend: "stable",
            },
            last_updated: Utc::now().to_rfc3339(),
            source: "Estimated Data",
        }
    }

    async fn fetch_sentiment(&self, key: &str) -> Result<MarketSentiment> {
        let url = format!(
            "{}/query?function=NEWS_SENTIMENT&apikey={}&limit=5",
            self.sentiment_base_url, key
        );
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        let feed: SentimentFeed = response.json().await?;
        Ok(analyze_sentiment_feed(&feed.feed))
    }

    async fn fetch_news(&self, key: &str, limit: usize) -> Result<Vec<NewsArticle>> {
        let url = format!(
            "{}/v2/everything?q=finance+economics&sortBy=publishedAt&pageSize={}&apiKey={}",
            self.news_base_url, limit, key
        );
        let response = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(10))
            .send()
            .await?
            .error_for_status()?;

        let news: NewsResponse = response.json().await?;
        Ok(news
            .articles
            .into_iter()
            .map(|a| NewsArticle {
                title: a.title,
                description: a.description,
                published_at: a.published_at,
                source: a.source.name,
            })
            .collect())
    }

    fn cached_sentiment(&self) -> Option<MarketSentiment> {
        let cache = self.sentiment_cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|(_, at)| at.elapsed() < self.cache_ttl)
            .map(|(sentiment, _)| sentiment.clone())
    }

    fn store_sentiment(&self, sentiment: MarketSentiment) {
        if let Ok(mut cache) = self.sentiment_cache.lock() {
            *cache = Some((sentiment, Instant::now()));
        }
    }

    fn cached_news(&self) -> Option<Vec<NewsArticle>> {
        let cache = self.news_cache.lock().ok()?;
        cache
            .as_ref()
            .filter(|(_, at)| at.elapsed() < self.cache_ttl)
            .map(|(articles, _)| articles.clone())
    }

    fn store_news(&self, articles: Vec<NewsArticle>) {
        if let Ok(mut cache) = self.news_cache.lock() {
            *cache = Some((articles, Instant::now()));
        }
    }
}

/// Map a news feed to an aggregate sentiment read
fn analyze_sentiment_feed(entries: &[SentimentFeedEntry]) -> MarketSentiment {
    let scores: Vec<f64> = entries.iter().filter_map(|e| e.score()).collect();
    let average = if scores.is_empty() {
        0.0
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    };

    let (sentiment, recommendation) = if average > 0.1 {
        (
            SentimentLabel::Positive,
            "Favorable conditions for investing, but stay cautious",
        )
    } else if average < -0.1 {
        (
            SentimentLabel::Negative,
            "Uncertain period: favor caution and diversification",
        )
    } else {
        (
            SentimentLabel::Neutral,
            "Stable market: keep your current investment strategy",
        )
    };

    MarketSentiment {
        sentiment,
        confidence: (average.abs() + 0.5).min(0.9),
        summary: format!(
            "Market sentiment is {} based on {} news sources",
            match sentiment {
                SentimentLabel::Positive => "positive",
                SentimentLabel::Neutral => "neutral",
                SentimentLabel::Negative => "negative",
            },
            scores.len()
        ),
        recommendation: recommendation.to_string(),
    }
}

fn fallback_sentiment() -> MarketSentiment {
    MarketSentiment {
        sentiment: SentimentLabel::Neutral,
        confidence: 0.7,
        summary: "Moderate market sentiment with some uncertainty".to_string(),
        recommendation: "Keep a balanced approach to your investments".to_string(),
    }
}

fn fallback_news() -> Vec<NewsArticle> {
    vec![
        NewsArticle {
            title: "Why diversification matters in uncertain times".to_string(),
            description: "Experts recommend spreading portfolios across asset classes"
                .to_string(),
            published_at: Utc::now().to_rfc3339(),
            source: "Revela Digest".to_string(),
        },
        NewsArticle {
            title: "Automated saving keeps gaining ground".to_string(),
            description: "Scheduled transfers are becoming the default way to save".to_string(),
            published_at: Utc::now().to_rfc3339(),
            source: "Revela Digest".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: f64) -> SentimentFeedEntry {
        SentimentFeedEntry {
            overall_sentiment_score: Some(serde_json::json!(score)),
        }
    }

    #[test]
    fn test_sentiment_thresholds() {
        assert_eq!(
            analyze_sentiment_feed(&[entry(0.3), entry(0.2)]).sentiment,
            SentimentLabel::Positive
        );
        assert_eq!(
            analyze_sentiment_feed(&[entry(-0.4)]).sentiment,
            SentimentLabel::Negative
        );
        assert_eq!(
            analyze_sentiment_feed(&[entry(0.05), entry(-0.05)]).sentiment,
            SentimentLabel::Neutral
        );
    }

    #[test]
    fn test_sentiment_scores_parse_from_strings() {
        let payload = r#"{"feed": [{"overall_sentiment_score": "0.25"}, {"title": "no score"}]}"#;
        let feed: SentimentFeed = serde_json::from_str(payload).unwrap();
        let sentiment = analyze_sentiment_feed(&feed.feed);
        assert_eq!(sentiment.sentiment, SentimentLabel::Positive);
        assert!(sentiment.summary.contains("1 news sources"));
    }

    #[test]
    fn test_sentiment_confidence_is_bounded() {
        let strong = analyze_sentiment_feed(&[entry(0.9)]);
        assert_eq!(strong.confidence, 0.9);

        let weak = analyze_sentiment_feed(&[]);
        assert_eq!(weak.confidence, 0.5);
        assert_eq!(weak.sentiment, SentimentLabel::Neutral);
    }

    #[test]
    fn test_zen_quote_payload_parses() {
        let payload = r#"[{"q": "Stay the course.", "a": "Jack Bogle", "h": "<blockquote>"}]"#;
        let quotes: Vec<ZenQuote> = serde_json::from_str(payload).unwrap();
        assert_eq!(quotes[0].q, "Stay the course.");
        assert_eq!(quotes[0].a, "Jack Bogle");
    }

    #[tokio::test]
    async fn test_missing_keys_fall_back() {
        let content = ExternalContent::new(None, None);
        let sentiment = content.market_sentiment().await;
        assert_eq!(sentiment.sentiment, SentimentLabel::Neutral);
        assert_eq!(sentiment.confidence, 0.7);

        let news = content.financial_news(3).await;
        assert_eq!(news.len(), 2);
    }

    #[tokio::test]
    async fn test_sentiment_cache_is_served_first() {
        let content = ExternalContent::new(None, None);
        let marker = MarketSentiment {
            sentiment: SentimentLabel::Positive,
            confidence: 0.8,
            summary: "cached".to_string(),
            recommendation: "cached".to_string(),
        };
        content.store_sentiment(marker);

        let served = content.market_sentiment().await;
        assert_eq!(served.summary, "cached");
    }

    #[test]
    fn test_indicators_carry_all_readings() {
        let content = ExternalContent::new(None, None);
        let indicators = content.economic_indicators();
        assert!(indicators.inflation.rate > 0.0);
        assert_eq!(indicators.interest_rate.trend, "increasing");
        assert_eq!(indicators.source, "Estimated Data");
    }
}
