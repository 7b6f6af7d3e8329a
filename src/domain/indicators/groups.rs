use serde::{Deserialize, Serialize};
use std::fmt;

/// Display sections of the indicator sidebar.
///
/// Membership is decided by case-sensitive substring match against a fixed
/// token set per group. Groups are evaluated independently, so a name can
/// land in more than one section (e.g. `GTJPY10YR` is both a rate and a
/// currency indicator) or in none at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorGroup {
    MarketIndices,
    InterestRates,
    Etfs,
    CurrencyRates,
}

impl IndicatorGroup {
    /// All groups in sidebar order
    pub const ALL: [IndicatorGroup; 4] = [
        IndicatorGroup::MarketIndices,
        IndicatorGroup::InterestRates,
        IndicatorGroup::Etfs,
        IndicatorGroup::CurrencyRates,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::MarketIndices => "Market Indices",
            Self::InterestRates => "Interest Rates",
            Self::Etfs => "ETFs",
            Self::CurrencyRates => "Currency Rates",
        }
    }

    pub fn tokens(&self) -> &'static [&'static str] {
        match self {
            Self::MarketIndices => &["VIX", "DXY", "BDIY", "MXEU", "MXRU", "MXIN"],
            Self::InterestRates => &["USGG", "GTTL", "US0001M", "GTITL", "GTJPY", "GTGBP"],
            Self::Etfs => &["LF98TRUU", "LG30TRUU", "LP01TREU"],
            Self::CurrencyRates => &["JPY", "ECSURPUS"],
        }
    }

    /// True iff `name` contains at least one of this group's tokens
    pub fn matches(&self, name: &str) -> bool {
        self.tokens().iter().any(|token| name.contains(token))
    }

    /// Snake-case section key, used to build unique widget ids
    pub fn key(&self) -> &'static str {
        match self {
            Self::MarketIndices => "market_indices",
            Self::InterestRates => "interest_rates",
            Self::Etfs => "etfs",
            Self::CurrencyRates => "currency_rates",
        }
    }
}

impl fmt::Display for IndicatorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Every group whose token set matches `name`, in sidebar order
pub fn groups_for(name: &str) -> Vec<IndicatorGroup> {
    IndicatorGroup::ALL
        .into_iter()
        .filter(|group| group.matches(name))
        .collect()
}

/// Result of partitioning the model's feature names into display groups
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAssignment {
    sections: Vec<(IndicatorGroup, Vec<String>)>,
    unassigned: Vec<String>,
}

impl GroupAssignment {
    /// Names in `group`, in model feature order
    pub fn members(&self, group: IndicatorGroup) -> &[String] {
        self.sections
            .iter()
            .find(|(g, _)| *g == group)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    /// Sections in sidebar order, empty ones included
    pub fn sections(&self) -> impl Iterator<Item = (IndicatorGroup, &[String])> {
        self.sections
            .iter()
            .map(|(group, names)| (*group, names.as_slice()))
    }

    /// Names no group claims. Still part of the feature vector.
    pub fn unassigned(&self) -> &[String] {
        &self.unassigned
    }
}

/// Stable per-group filter over the model's ordered feature names
pub fn classify<S: AsRef<str>>(feature_names: &[S]) -> GroupAssignment {
    let sections = IndicatorGroup::ALL
        .into_iter()
        .map(|group| {
            let members = feature_names
                .iter()
                .map(AsRef::as_ref)
                .filter(|name| group.matches(name))
                .map(str::to_string)
                .collect();
            (group, members)
        })
        .collect();

    let unassigned = feature_names
        .iter()
        .map(AsRef::as_ref)
        .filter(|name| groups_for(name).is_empty())
        .map(str::to_string)
        .collect();

    GroupAssignment {
        sections,
        unassigned,
    }
}

/// Unique widget key for a (section, indicator) pair
pub fn widget_key(section_key: &str, name: &str) -> String {
    format!("{}_{}", section_key, name)
}
