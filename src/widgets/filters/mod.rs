//! Value-class filters that decide whether a prospective text is acceptable
//! before a keystroke is committed.

mod pattern;
mod registry;

pub use pattern::RegexFilter;
pub use registry::{FilterKind, FilterRegistry};

use crate::error::FilterError;
use std::fmt;
use std::sync::Arc;

/// A single check over a candidate string.
///
/// `Ok(false)` rejects the candidate. `Err` aborts validation for the whole
/// keystroke and reaches the caller unchanged.
pub type Predicate = Arc<dyn Fn(&str) -> Result<bool, FilterError> + Send + Sync>;

/// Ordered set of predicates that must all accept a candidate.
#[derive(Clone, Default)]
pub struct FilterChain {
    predicates: Vec<Predicate>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_predicates(predicates: impl IntoIterator<Item = Predicate>) -> Self {
        let mut chain = Self::new();
        for predicate in predicates {
            chain.add_predicate(predicate);
        }
        chain
    }

    /// Accepts every candidate.
    pub fn null() -> Self {
        Self::new()
    }

    /// Accepts candidates that parse as a 32-bit signed integer.
    pub fn integer() -> Self {
        Self::from_predicates([predicate(|candidate| {
            Ok(candidate.trim().parse::<i32>().is_ok())
        })])
    }

    pub fn with_predicate(mut self, predicate: Predicate) -> Self {
        self.add_predicate(predicate);
        self
    }

    /// Appends `predicate`. Returns `false` when that same predicate is
    /// already registered.
    pub fn add_predicate(&mut self, predicate: Predicate) -> bool {
        if self
            .predicates
            .iter()
            .any(|existing| Arc::ptr_eq(existing, &predicate))
        {
            return false;
        }
        self.predicates.push(predicate);
        true
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Runs the predicates in registration order, stopping at the first one
    /// that rejects or fails.
    pub fn is_valid(&self, candidate: &str) -> Result<bool, FilterError> {
        for check in &self.predicates {
            if !check(candidate)? {
                tracing::trace!(candidate, "filter rejected candidate");
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterChain")
            .field("predicates", &self.predicates.len())
            .finish()
    }
}

/// Wraps a closure as a shareable [`Predicate`].
pub fn predicate<F>(check: F) -> Predicate
where
    F: Fn(&str) -> Result<bool, FilterError> + Send + Sync + 'static,
{
    Arc::new(check)
}

#[cfg(test)]
mod tests {
    use super::{FilterChain, predicate};
    use crate::error::FilterError;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn empty_chain_accepts_everything() {
        let chain = FilterChain::new();
        for candidate in ["", "abc", "-1.5", "  \t", "ünïcödé"] {
            assert!(chain.is_valid(candidate).expect("no predicates"));
        }
        assert!(FilterChain::null().is_empty());
    }

    #[test]
    fn duplicate_predicate_is_registered_once() {
        let check = predicate(|_| Ok(true));
        let mut chain = FilterChain::new();
        assert!(chain.add_predicate(check.clone()));
        assert!(!chain.add_predicate(check.clone()));
        assert_eq!(chain.len(), 1);

        assert!(chain.add_predicate(predicate(|_| Ok(true))));
        assert_eq!(chain.len(), 2);
    }

    #[test]
    fn evaluation_stops_at_first_rejection() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let chain = FilterChain::new()
            .with_predicate(predicate(|candidate| Ok(candidate.len() < 3)))
            .with_predicate(predicate(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(true)
            }));

        assert!(!chain.is_valid("long").expect("rejects"));
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        assert!(chain.is_valid("ok").expect("accepts"));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn predicate_error_propagates_unchanged() {
        let chain = FilterChain::new()
            .with_predicate(predicate(|_| Err(FilterError::predicate("boom"))))
            .with_predicate(predicate(|_| Ok(false)));

        let err = chain.is_valid("x").expect_err("error must surface");
        assert!(matches!(err, FilterError::Predicate { ref message } if message == "boom"));
    }

    #[test]
    fn integer_filter_accepts_machine_integers_only() {
        let chain = FilterChain::integer();
        assert!(chain.is_valid("42").expect("valid"));
        assert!(chain.is_valid("-2147483648").expect("valid"));
        assert!(chain.is_valid("+7").expect("valid"));
        assert!(!chain.is_valid("2147483648").expect("valid"));
        assert!(!chain.is_valid("").expect("valid"));
        assert!(!chain.is_valid("4a").expect("valid"));
    }
}
