use super::{FilterChain, RegexFilter};
use crate::error::ConfigError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Value class a masked text box restricts its content to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    #[default]
    Any,
    Number,
    Decimal,
    UNumber,
    UDecimal,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Any,
        FilterKind::Number,
        FilterKind::Decimal,
        FilterKind::UNumber,
        FilterKind::UDecimal,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Number => "number",
            Self::Decimal => "decimal",
            Self::UNumber => "unumber",
            Self::UDecimal => "udecimal",
        }
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FilterKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                ConfigError::invalid_value(
                    "filter",
                    format!("unknown filter kind '{value}' (expected any, number, decimal, unumber or udecimal)"),
                )
            })
    }
}

/// Maps filter kinds to shared, read-only filter chains.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    filters: IndexMap<FilterKind, Arc<FilterChain>>,
    fallback: Arc<FilterChain>,
}

impl FilterRegistry {
    /// Registry without any mapping; every lookup yields the permissive filter.
    pub fn empty() -> Self {
        Self {
            filters: IndexMap::new(),
            fallback: Arc::new(FilterChain::null()),
        }
    }

    /// The five built-in kinds.
    pub fn standard() -> Self {
        let null = Arc::new(FilterChain::null());
        let mut filters = IndexMap::new();
        filters.insert(FilterKind::Any, null.clone());
        filters.insert(
            FilterKind::Number,
            Arc::new(RegexFilter::number().into_chain()),
        );
        filters.insert(
            FilterKind::Decimal,
            Arc::new(RegexFilter::decimal().into_chain()),
        );
        filters.insert(
            FilterKind::UNumber,
            Arc::new(RegexFilter::unumber().into_chain()),
        );
        filters.insert(
            FilterKind::UDecimal,
            Arc::new(RegexFilter::udecimal().into_chain()),
        );
        Self {
            filters,
            fallback: null,
        }
    }

    pub fn with_filter(mut self, kind: FilterKind, chain: FilterChain) -> Self {
        self.filters.insert(kind, Arc::new(chain));
        self
    }

    /// Never fails: kinds without a mapping get the permissive filter.
    pub fn filter_for(&self, kind: FilterKind) -> Arc<FilterChain> {
        self.filters
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| self.fallback.clone())
    }

    pub fn kinds(&self) -> impl Iterator<Item = FilterKind> + '_ {
        self.filters.keys().copied()
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
