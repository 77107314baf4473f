//! Condition filter chain
//!
//! Filters veto candidates before anything is instantiated. Each filter sees
//! the full candidate array and answers with one verdict per slot. A slot
//! already rejected by an earlier filter is passed as `None`; slots are never
//! re-compacted, so positions line up across every filter.

use std::time::Instant;

use autoconf_meta::ModuleMetadata;

use crate::capability::{Capabilities, CapabilityInjector};
use crate::conditions::{OnEnvironmentCondition, OnInstanceCondition, OnTypeCondition};
use crate::error::BoxError;
use crate::{Error, Result};

/// A pluggable candidate veto.
pub trait ImportFilter: Capabilities + Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    /// One verdict per slot of `candidates`; `false` rejects the candidate.
    fn matches(
        &self,
        candidates: &[Option<&str>],
        metadata: &ModuleMetadata,
    ) -> std::result::Result<Vec<bool>, BoxError>;
}

/// Ordered registry of filters, composed with logical AND.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn ImportFilter>>,
}

impl FilterChain {
    /// Create an empty chain; every candidate passes.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a chain holding the reference conditions.
    ///
    /// Registers, in order:
    /// - `on-type` ([`OnTypeCondition`])
    /// - `on-instance` ([`OnInstanceCondition`])
    /// - `on-environment` ([`OnEnvironmentCondition`])
    pub fn with_builtins() -> Self {
        let mut chain = Self::new();
        chain.register(OnTypeCondition::default());
        chain.register(OnInstanceCondition::default());
        chain.register(OnEnvironmentCondition::default());
        chain
    }

    /// Append a filter; it runs after every filter already registered.
    pub fn register(&mut self, filter: impl ImportFilter + 'static) {
        self.filters.push(Box::new(filter));
    }

    /// Names of the registered filters, in order.
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub(crate) fn inject(&mut self, injector: &CapabilityInjector<'_>) {
        for filter in &mut self.filters {
            injector.inject(filter.as_mut());
        }
    }

    /// Keep only the candidates every filter accepts, preserving order.
    ///
    /// # Errors
    ///
    /// Returns `Error::Extension` if a filter fails and
    /// `Error::InvalidFilterMask` if a filter answers with the wrong number
    /// of verdicts.
    pub fn apply(
        &self,
        configurations: Vec<String>,
        metadata: &ModuleMetadata,
    ) -> Result<Vec<String>> {
        let start = Instant::now();
        let mut skip = vec![false; configurations.len()];
        let mut skipped = false;

        for filter in &self.filters {
            let candidates: Vec<Option<&str>> = configurations
                .iter()
                .zip(&skip)
                .map(|(module, &rejected)| (!rejected).then_some(module.as_str()))
                .collect();

            let verdicts = filter
                .matches(&candidates, metadata)
                .map_err(|e| Error::extension(format!("filter '{}'", filter.name()), e))?;

            if verdicts.len() != candidates.len() {
                return Err(Error::InvalidFilterMask {
                    filter: filter.name().to_string(),
                    expected: candidates.len(),
                    actual: verdicts.len(),
                });
            }

            for (slot, matched) in verdicts.into_iter().enumerate() {
                if !matched {
                    skip[slot] = true;
                    skipped = true;
                }
            }
        }

        if !skipped {
            return Ok(configurations);
        }

        let total = configurations.len();
        let result: Vec<String> = configurations
            .into_iter()
            .zip(skip)
            .filter_map(|(module, rejected)| (!rejected).then_some(module))
            .collect();

        tracing::trace!(
            filtered = total - result.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Filtered auto-configuration candidates"
        );
        Ok(result)
    }
}

impl std::fmt::Debug for FilterChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterChain")
            .field("filters", &self.names())
            .finish()
    }
}
