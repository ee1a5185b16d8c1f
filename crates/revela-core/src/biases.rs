//! Cognitive-bias catalog
//!
//! Static table of the behavioral-economics patterns the engine can attach to
//! an insight. Entries are data only; the detectors that wire them up live in
//! [`crate::insights::bias_detection`].

use serde::Serialize;

/// Catalog keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BiasKind {
    StatusQuo,
    AvailabilityHeuristic,
    OptimismBias,
    MentalAccounting,
    LossAversion,
    PresentBias,
}

impl BiasKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StatusQuo => "status_quo",
            Self::AvailabilityHeuristic => "availability_heuristic",
            Self::OptimismBias => "optimism_bias",
            Self::MentalAccounting => "mental_accounting",
            Self::LossAversion => "loss_aversion",
            Self::PresentBias => "present_bias",
        }
    }

    pub const ALL: [BiasKind; 6] = [
        Self::StatusQuo,
        Self::AvailabilityHeuristic,
        Self::OptimismBias,
        Self::MentalAccounting,
        Self::LossAversion,
        Self::PresentBias,
    ];
}

impl std::str::FromStr for BiasKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "status_quo" => Ok(Self::StatusQuo),
            "availability_heuristic" => Ok(Self::AvailabilityHeuristic),
            "optimism_bias" => Ok(Self::OptimismBias),
            "mental_accounting" => Ok(Self::MentalAccounting),
            "loss_aversion" => Ok(Self::LossAversion),
            "present_bias" => Ok(Self::PresentBias),
            _ => Err(format!("Unknown bias: {}", s)),
        }
    }
}

impl std::fmt::Display for BiasKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which side of financial behavior a bias distorts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasType {
    Spending,
    Saving,
    Planning,
    Emotional,
}

/// How damaging a bias tends to be when left unchecked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BiasSeverity {
    Low,
    Medium,
    High,
}

/// One catalog entry. Never mutated at runtime.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CognitiveBias {
    pub key: BiasKind,
    pub name: &'static str,
    #[serde(rename = "type")]
    pub bias_type: BiasType,
    pub description: &'static str,
    pub psychological_fact: &'static str,
    pub severity: BiasSeverity,
    pub recommendation: &'static str,
}

static CATALOG: [CognitiveBias; 6] = [
    CognitiveBias {
        key: BiasKind::StatusQuo,
        name: "Status quo bias",
        bias_type: BiasType::Planning,
        description: "Tendency to keep costly habits through inertia",
        psychological_fact: "Our brain prefers avoiding hard decisions, even when they cost us money",
        severity: BiasSeverity::Medium,
        recommendation: "Schedule a monthly review of your subscriptions and recurring charges",
    },
    CognitiveBias {
        key: BiasKind::AvailabilityHeuristic,
        name: "Availability heuristic",
        bias_type: BiasType::Spending,
        description: "Overweighting recent and vivid expenses",
        psychological_fact: "We judge how likely something is by how easily we can recall it",
        severity: BiasSeverity::Low,
        recommendation: "Budget from 3-month averages rather than your latest expenses",
    },
    CognitiveBias {
        key: BiasKind::OptimismBias,
        name: "Optimism bias",
        bias_type: BiasType::Planning,
        description: "Systematic overestimation of your future income",
        psychological_fact: "80% of people believe they are above average with money",
        severity: BiasSeverity::High,
        recommendation: "Base your goals on past performance, not on hopes",
    },
    CognitiveBias {
        key: BiasKind::MentalAccounting,
        name: "Mental accounting",
        bias_type: BiasType::Spending,
        description: "Treating money differently depending on its source",
        psychological_fact: "We spend \"bonus\" money more easily than regular salary",
        severity: BiasSeverity::Medium,
        recommendation: "Treat all income the same way in your budget",
    },
    CognitiveBias {
        key: BiasKind::LossAversion,
        name: "Loss aversion",
        bias_type: BiasType::Emotional,
        description: "Excessive fear of losing money that blocks investing",
        psychological_fact: "Losing $100 hurts about twice as much as gaining $100 feels good",
        severity: BiasSeverity::Medium,
        recommendation: "Focus on long-term gains rather than short-term losses",
    },
    CognitiveBias {
        key: BiasKind::PresentBias,
        name: "Present bias",
        bias_type: BiasType::Saving,
        description: "Excessive preference for immediate rewards",
        psychological_fact: "Our brain values future rewards about 50% less than immediate ones",
        severity: BiasSeverity::High,
        recommendation: "Automate your savings to sidestep the temptation to spend",
    },
];

/// The full catalog
pub fn catalog() -> &'static [CognitiveBias] {
    &CATALOG
}

/// Look up one entry by key
pub fn lookup(kind: BiasKind) -> &'static CognitiveBias {
    CATALOG
        .iter()
        .find(|b| b.key == kind)
        .expect("catalog covers every BiasKind")
}
