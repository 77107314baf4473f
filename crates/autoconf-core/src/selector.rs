//! The resolution engine
//!
//! [`ImportSelector`] resolves one site at a time:
//!
//! ```text
//! enabled? -> candidates -> exclusions -> validate -> subtract -> filter -> notify
//! ```
//!
//! Filters and listeners are handed their capabilities once, when the
//! selector is built.

use std::collections::BTreeSet;
use std::sync::Arc;

use autoconf_meta::CatalogCache;

use crate::capability::CapabilityInjector;
use crate::config::EngineConfig;
use crate::context::ResolutionContext;
use crate::entry::ResolutionEntry;
use crate::exclusion::{ExclusionResolver, dedup_preserving_order};
use crate::filter::{FilterChain, ImportFilter};
use crate::group::{ImportGroup, Resolve};
use crate::listener::{ImportListener, ImportNotifier};
use crate::site::SiteDescriptor;
use crate::sorter::PrioritySorter;
use crate::Result;

/// Builder for [`ImportSelector`].
#[derive(Debug)]
pub struct ImportSelectorBuilder {
    cache: Arc<CatalogCache>,
    config: EngineConfig,
    context: ResolutionContext,
    filters: FilterChain,
    notifier: ImportNotifier,
}

impl ImportSelectorBuilder {
    /// Use `config` instead of the default engine configuration.
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Collaborators made available to filters and listeners.
    pub fn context(mut self, context: ResolutionContext) -> Self {
        self.context = context;
        self
    }

    /// Replace the filter chain.
    pub fn filters(mut self, filters: FilterChain) -> Self {
        self.filters = filters;
        self
    }

    /// Append a filter to the chain.
    pub fn filter(mut self, filter: impl ImportFilter + 'static) -> Self {
        self.filters.register(filter);
        self
    }

    /// Append a listener.
    pub fn listener(mut self, listener: impl ImportListener + 'static) -> Self {
        self.notifier.register(listener);
        self
    }

    /// Inject capabilities into every extension and build the selector.
    pub fn build(mut self) -> ImportSelector {
        let injector = CapabilityInjector::new(&self.context);
        self.filters.inject(&injector);
        self.notifier.inject(&injector);
        tracing::debug!(
            extension_point = %self.config.extension_point,
            filters = self.filters.len(),
            listeners = self.notifier.len(),
            "Built import selector"
        );

        ImportSelector {
            cache: self.cache,
            config: self.config,
            context: self.context,
            filters: self.filters,
            notifier: self.notifier,
        }
    }
}

/// Resolves sites against the catalog.
#[derive(Debug)]
pub struct ImportSelector {
    cache: Arc<CatalogCache>,
    config: EngineConfig,
    context: ResolutionContext,
    filters: FilterChain,
    notifier: ImportNotifier,
}

impl ImportSelector {
    /// Start building a selector reading from `cache`.
    ///
    /// The builder starts with the reference conditions, no listeners, the
    /// default configuration and an empty context.
    pub fn builder(cache: Arc<CatalogCache>) -> ImportSelectorBuilder {
        ImportSelectorBuilder {
            cache,
            config: EngineConfig::default(),
            context: ResolutionContext::empty(),
            filters: FilterChain::with_builtins(),
            notifier: ImportNotifier::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Whether resolution is switched on for `site`.
    ///
    /// The site's own override wins; otherwise the enablement property
    /// decides, defaulting to on.
    pub fn is_enabled(&self, site: &SiteDescriptor) -> Result<bool> {
        if let Some(enabled) = site.enabled {
            return Ok(enabled);
        }
        Ok(self
            .context
            .properties
            .get_bool(&self.config.enabled_property())?
            .unwrap_or(true))
    }

    /// Resolve one site into its accepted modules and exclusions.
    ///
    /// # Errors
    ///
    /// - `Error::Meta` if the catalog has no candidates or cannot be loaded
    /// - `Error::InvalidExclusions` if the site excludes a known type that
    ///   is not a candidate
    /// - `Error::Extension` or `Error::InvalidFilterMask` if a filter or
    ///   listener misbehaves
    pub fn resolve(&self, site: &SiteDescriptor) -> Result<ResolutionEntry> {
        if !self.is_enabled(site)? {
            tracing::debug!(origin = %site.origin, "Auto-configuration disabled for site");
            return Ok(ResolutionEntry::disabled());
        }

        let candidates =
            dedup_preserving_order(self.cache.load_candidates(&self.config.extension_point)?);

        let resolver = ExclusionResolver::new(&self.config);
        let exclusions = resolver.resolve(site, self.context.properties.as_ref());
        resolver.validate(&candidates, &exclusions, self.context.types.as_ref())?;

        let remaining: Vec<String> = candidates
            .into_iter()
            .filter(|module| !exclusions.contains(module))
            .collect();

        let metadata = self.cache.metadata()?;
        let accepted = self.filters.apply(remaining, &metadata)?;

        let exclusions: BTreeSet<String> = exclusions.into_iter().collect();
        self.notifier.notify(&accepted, &exclusions)?;

        tracing::debug!(
            origin = %site.origin,
            accepted = accepted.len(),
            excluded = exclusions.len(),
            "Resolved site"
        );
        Ok(ResolutionEntry::new(accepted, exclusions))
    }

    /// Resolve a single site and return only the accepted modules.
    ///
    /// Empty for a disabled site.
    pub fn select_imports(&self, site: &SiteDescriptor) -> Result<Vec<String>> {
        Ok(self.resolve(site)?.configurations().to_vec())
    }

    /// Start a deferred group backed by this selector.
    pub fn group(&self) -> Result<ImportGroup<'_, Self>> {
        let catalog = self.cache.catalog()?;
        let metadata = self.cache.metadata()?;
        let sorter = PrioritySorter::from_catalog(&catalog, &self.config.extension_point, metadata);
        Ok(ImportGroup::new(self, sorter))
    }
}

impl Resolve for ImportSelector {
    fn resolve(&self, site: &SiteDescriptor) -> Result<ResolutionEntry> {
        ImportSelector::resolve(self, site)
    }
}
