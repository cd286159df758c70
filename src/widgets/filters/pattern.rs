use super::{FilterChain, predicate};
use crate::error::FilterError;
use regex::Regex;

/// Filter accepting text that matches a pattern and fits a maximum length.
#[derive(Debug, Clone)]
pub struct RegexFilter {
    regex: Option<Regex>,
    max_len: Option<usize>,
    chain: FilterChain,
}

impl RegexFilter {
    /// An empty `pattern` puts no constraint on the content.
    pub fn new(pattern: &str, max_len: Option<usize>) -> Result<Self, FilterError> {
        let regex = if pattern.is_empty() {
            None
        } else {
            Some(Regex::new(pattern)?)
        };
        Ok(Self::with_regex(regex, max_len))
    }

    /// Pattern check first, then the length check.
    fn with_regex(regex: Option<Regex>, max_len: Option<usize>) -> Self {
        let pattern_check = regex.clone();
        let chain = FilterChain::new()
            .with_predicate(predicate(move |candidate| {
                Ok(pattern_check
                    .as_ref()
                    .is_none_or(|regex| regex.is_match(candidate)))
            }))
            .with_predicate(predicate(move |candidate| {
                Ok(max_len.is_none_or(|max_len| candidate.chars().count() <= max_len))
            }));

        Self {
            regex,
            max_len,
            chain,
        }
    }

    pub fn pattern(pattern: &str) -> Result<Self, FilterError> {
        Self::new(pattern, None)
    }

    pub fn max_length(max_len: usize) -> Self {
        Self::with_regex(None, Some(max_len))
    }

    /// Unsigned integer, digits only.
    pub fn unumber() -> Self {
        Self::preset(r"^\d*$")
    }

    /// Optionally signed integer.
    pub fn number() -> Self {
        Self::preset(r"^-?\d*$")
    }

    /// Unsigned decimal with `.` or `,` as separator.
    pub fn udecimal() -> Self {
        Self::preset(r"^\d*([.,]\d*)?$")
    }

    /// Optionally signed decimal with `.` or `,` as separator.
    pub fn decimal() -> Self {
        Self::preset(r"^-?\d*([\.,]\d*)?$")
    }

    fn preset(pattern: &str) -> Self {
        Self::new(pattern, None).expect("preset filter pattern must compile")
    }

    pub fn pattern_str(&self) -> Option<&str> {
        self.regex.as_ref().map(Regex::as_str)
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }

    pub fn into_chain(self) -> FilterChain {
        self.chain
    }

    pub fn is_valid(&self, candidate: &str) -> Result<bool, FilterError> {
        self.chain.is_valid(candidate)
    }
}
