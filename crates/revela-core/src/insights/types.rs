//! Core types for computed insights

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::biases::CognitiveBias;

/// Analytical dimension an insight belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Spending,
    Saving,
    Goals,
    Emotional,
    Behavioral,
}

impl InsightCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spending => "spending",
            Self::Saving => "saving",
            Self::Goals => "goals",
            Self::Emotional => "emotional",
            Self::Behavioral => "behavioral",
        }
    }
}

impl fmt::Display for InsightCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for InsightCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "spending" => Ok(Self::Spending),
            "saving" => Ok(Self::Saving),
            "goals" => Ok(Self::Goals),
            "emotional" => Ok(Self::Emotional),
            "behavioral" => Ok(Self::Behavioral),
            _ => Err(format!("Unknown insight category: {}", s)),
        }
    }
}

/// Severity level of an insight; drives downstream sort order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// A win worth reinforcing
    Positive,
    /// Informational only
    Neutral,
    /// Should be addressed soon
    Warning,
    /// Requires immediate attention
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }

    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Self::Positive => 1,
            Self::Neutral => 2,
            Self::Warning => 3,
            Self::Critical => 4,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "positive" => Ok(Self::Positive),
            "neutral" => Ok(Self::Neutral),
            "warning" => Ok(Self::Warning),
            "critical" => Ok(Self::Critical),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// A motivational quote attached to an insight
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub text: String,
    pub author: String,
}

/// Period-over-period context for a spending change
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub previous: f64,
    /// Percent change vs the previous period
    pub change: f64,
    pub period: String,
}

/// The concrete next step an insight recommends
#[derive(Debug, Clone, Serialize)]
pub struct Actionable {
    pub title: String,
    pub description: String,
    pub impact: String,
}

/// A single computed observation about a user's finances
///
/// Transient: built fresh per request and never persisted. `id` is unique
/// within one generation pass.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Insight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: InsightCategory,
    pub severity: Severity,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bias: Option<&'static CognitiveBias>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<Quote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psychological_fact: Option<String>,
    pub actionable: Actionable,
}

impl Insight {
    pub fn new(
        id: impl Into<String>,
        category: InsightCategory,
        severity: Severity,
        title: impl Into<String>,
        description: impl Into<String>,
        value: f64,
        actionable: Actionable,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category,
            severity,
            value,
            comparison: None,
            bias: None,
            quote: None,
            psychological_fact: None,
            actionable,
        }
    }

    pub fn with_comparison(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn with_bias(mut self, bias: &'static CognitiveBias) -> Self {
        self.bias = Some(bias);
        self
    }

    pub fn with_fact(mut self, fact: impl Into<String>) -> Self {
        self.psychological_fact = Some(fact.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biases::{lookup, BiasKind};

    #[test]
    fn test_severity_rank_ordering() {
        assert!(Severity::Critical.rank() > Severity::Warning.rank());
        assert!(Severity::Warning.rank() > Severity::Neutral.rank());
        assert!(Severity::Neutral.rank() > Severity::Positive.rank());
    }

    #[test]
    fn test_severity_round_trip() {
        for severity in [
            Severity::Positive,
            Severity::Neutral,
            Severity::Warning,
            Severity::Critical,
        ] {
            assert_eq!(Severity::from_str(severity.as_str()).unwrap(), severity);
        }
    }

    #[test]
    fn test_insight_builder() {
        let insight = Insight::new(
            "bias-status-quo",
            InsightCategory::Behavioral,
            Severity::Warning,
            "Status quo bias detected",
            "4 active subscriptions",
            63.96,
            Actionable {
                title: "Subscription audit".to_string(),
                description: "Review and cancel unused subscriptions".to_string(),
                impact: "Potential saving: $19/month".to_string(),
            },
        )
        .with_bias(lookup(BiasKind::StatusQuo))
        .with_fact("Our brain prefers avoiding hard decisions");

        assert_eq!(insight.id, "bias-status-quo");
        assert_eq!(insight.bias.unwrap().key, BiasKind::StatusQuo);
        assert!(insight.quote.is_none());
    }

    #[test]
    fn test_insight_serializes_camel_case() {
        let insight = Insight::new(
            "spending-dining",
            InsightCategory::Spending,
            Severity::Neutral,
            "t",
            "d",
            10.0,
            Actionable {
                title: "a".to_string(),
                description: "b".to_string(),
                impact: "c".to_string(),
            },
        )
        .with_fact("fact");

        let json = serde_json::to_value(&insight).unwrap();
        assert_eq!(json["psychologicalFact"], "fact");
        assert_eq!(json["severity"], "neutral");
        assert!(json.get("quote").is_none());
    }
}
