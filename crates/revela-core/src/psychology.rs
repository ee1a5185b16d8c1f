//! Curated psychology content
//!
//! Local quote pools and psychological facts used when the external providers
//! are unavailable, and served directly by the facts endpoint.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::insights::types::{InsightCategory, Quote};

/// A sourced psychological fact with a relevance weight for ranking
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PsychologyFact {
    pub fact: &'static str,
    pub source: &'static str,
    pub category: &'static str,
    pub relevance: u8,
}

static FACTS: [PsychologyFact; 8] = [
    PsychologyFact {
        fact: "People spend 12-18% more when paying by card instead of cash",
        source: "MIT Sloan Study, 2001",
        category: "spending",
        relevance: 9,
    },
    PsychologyFact {
        fact: "Automating savings raises the average saving rate by 85%",
        source: "Behavioral Economics Research",
        category: "saving",
        relevance: 10,
    },
    PsychologyFact {
        fact: "Financial decisions made under stress are 23% less optimal",
        source: "Journal of Economic Psychology",
        category: "emotional",
        relevance: 8,
    },
    PsychologyFact {
        fact: "It takes 66 days on average to build a new financial habit",
        source: "University College London",
        category: "behavioral",
        relevance: 9,
    },
    PsychologyFact {
        fact: "People who visualize their goals are 42% more likely to reach them",
        source: "Dominican University Study",
        category: "goals",
        relevance: 10,
    },
    PsychologyFact {
        fact: "The anchoring effect makes us overvalue the first price we see",
        source: "Kahneman & Tversky Research",
        category: "cognitive",
        relevance: 7,
    },
    PsychologyFact {
        fact: "A loss feels about twice as painful as an equivalent gain feels good",
        source: "Prospect Theory",
        category: "emotional",
        relevance: 9,
    },
    PsychologyFact {
        fact: "People spend \"bonus\" money more freely than regular salary",
        source: "Mental Accounting Research",
        category: "spending",
        relevance: 8,
    },
];

/// Facts for a category, most relevant first (top 3), or the overall top 5
pub fn facts_for(category: Option<&str>) -> Vec<&'static PsychologyFact> {
    let mut facts: Vec<&PsychologyFact> = match category {
        Some(cat) => FACTS.iter().filter(|f| f.category == cat).collect(),
        None => FACTS.iter().collect(),
    };
    facts.sort_by(|a, b| b.relevance.cmp(&a.relevance));
    facts.truncate(if category.is_some() { 3 } else { 5 });
    facts
}

/// A random sample of distinct facts, for the facts endpoint
pub fn random_facts<R: Rng>(rng: &mut R, count: usize) -> Vec<&'static PsychologyFact> {
    let mut all: Vec<&PsychologyFact> = FACTS.iter().collect();
    all.shuffle(rng);
    all.truncate(count);
    all
}

static SPENDING_QUOTES: [(&str, &str); 2] = [
    (
        "It is not how much you earn, but how much you save, that determines your wealth.",
        "Benjamin Franklin",
    ),
    ("A penny saved is a penny earned.", "Proverb"),
];

static SAVING_QUOTES: [(&str, &str); 2] = [
    (
        "Do not save what is left after spending, but spend what is left after saving.",
        "Warren Buffett",
    ),
    (
        "Wealth consists not in having great possessions, but in having few wants.",
        "Epictetus",
    ),
];

static GOAL_QUOTES: [(&str, &str); 2] = [
    ("A goal without a plan is just a wish.", "Antoine de Saint-Exupéry"),
    ("Success is setting goals and reaching them.", "Zig Ziglar"),
];

static GENERAL_QUOTES: [(&str, &str); 3] = [
    (
        "Success is going from failure to failure without losing your enthusiasm.",
        "Winston Churchill",
    ),
    (
        "Discipline is the bridge between goals and accomplishment.",
        "Jim Rohn",
    ),
    ("Your only limit is you.", "Anonymous"),
];

/// Curated pool for a category; categories without a dedicated pool fall
/// through to the general one
pub fn quote_pool(category: InsightCategory) -> &'static [(&'static str, &'static str)] {
    match category {
        InsightCategory::Spending => &SPENDING_QUOTES,
        InsightCategory::Saving => &SAVING_QUOTES,
        InsightCategory::Goals => &GOAL_QUOTES,
        InsightCategory::Emotional | InsightCategory::Behavioral => &GENERAL_QUOTES,
    }
}

/// Pick one curated quote for the category
pub fn fallback_quote<R: Rng>(rng: &mut R, category: InsightCategory) -> Quote {
    let pool = quote_pool(category);
    let (text, author) = pool
        .choose(rng)
        .copied()
        .unwrap_or(("Your only limit is you.", "Anonymous"));
    Quote {
        text: text.to_string(),
        author: author.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_facts_for_category_are_ranked() {
        let facts = facts_for(Some("emotional"));
        assert_eq!(facts.len(), 2);
        assert!(facts[0].relevance >= facts[1].relevance);
    }

    #[test]
    fn test_facts_without_category_take_top_five() {
        let facts = facts_for(None);
        assert_eq!(facts.len(), 5);
        assert!(facts.windows(2).all(|w| w[0].relevance >= w[1].relevance));
    }

    #[test]
    fn test_random_facts_are_deterministic_with_seed() {
        let mut a = StdRng::seed_from_u64(7);
        let mut b = StdRng::seed_from_u64(7);
        let first = random_facts(&mut a, 3);
        let second = random_facts(&mut b, 3);
        assert_eq!(first.len(), 3);
        assert!(first
            .iter()
            .zip(second.iter())
            .all(|(x, y)| x.fact == y.fact));
    }

    #[test]
    fn test_every_category_has_a_pool() {
        for category in [
            InsightCategory::Spending,
            InsightCategory::Saving,
            InsightCategory::Goals,
            InsightCategory::Emotional,
            InsightCategory::Behavioral,
        ] {
            assert!(!quote_pool(category).is_empty());
        }
    }

    #[test]
    fn test_fallback_quote_comes_from_pool() {
        let mut rng = StdRng::seed_from_u64(1);
        let quote = fallback_quote(&mut rng, InsightCategory::Goals);
        assert!(GOAL_QUOTES.iter().any(|(text, _)| *text == quote.text));
    }
}
