//! Capability injection for filters and listeners
//!
//! Filters and listeners are third-party extensions and take no constructor
//! dependencies on the host. Instead each one implements [`Capabilities`],
//! overriding only the hooks for the collaborators it needs. The
//! [`CapabilityInjector`] runs every hook once, when the extension is
//! registered with the engine.

use std::sync::Arc;

use autoconf_meta::EnvironmentKind;

use crate::context::{InstanceRegistry, ResolutionContext, TypeResolver};
use crate::properties::PropertySource;

/// Hooks through which an extension receives host collaborators.
///
/// Every hook defaults to ignoring its argument.
pub trait Capabilities {
    fn inject_types(&mut self, _types: Arc<dyn TypeResolver>) {}

    fn inject_instances(&mut self, _instances: Arc<dyn InstanceRegistry>) {}

    fn inject_properties(&mut self, _properties: Arc<dyn PropertySource>) {}

    fn inject_environment(&mut self, _environment: EnvironmentKind) {}
}

/// Hands the collaborators of a [`ResolutionContext`] to extensions.
pub struct CapabilityInjector<'a> {
    context: &'a ResolutionContext,
}

impl<'a> CapabilityInjector<'a> {
    pub fn new(context: &'a ResolutionContext) -> Self {
        Self { context }
    }

    /// Run every capability hook of `target`.
    pub fn inject<T: Capabilities + ?Sized>(&self, target: &mut T) {
        target.inject_types(Arc::clone(&self.context.types));
        target.inject_instances(Arc::clone(&self.context.instances));
        target.inject_properties(Arc::clone(&self.context.properties));
        target.inject_environment(self.context.environment);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::NameSet;

    #[derive(Default)]
    struct NeedsTypes {
        types: Option<Arc<dyn TypeResolver>>,
        environment: Option<EnvironmentKind>,
    }

    impl Capabilities for NeedsTypes {
        fn inject_types(&mut self, types: Arc<dyn TypeResolver>) {
            self.types = Some(types);
        }

        fn inject_environment(&mut self, environment: EnvironmentKind) {
            self.environment = Some(environment);
        }
    }

    struct NeedsNothing;

    impl Capabilities for NeedsNothing {}

    #[test]
    fn test_injects_declared_capabilities() {
        let context = ResolutionContext::empty()
            .with_types(["demo.Type"].into_iter().collect::<NameSet>())
            .with_environment(EnvironmentKind::Reactive);
        let injector = CapabilityInjector::new(&context);

        let mut target = NeedsTypes::default();
        injector.inject(&mut target);

        assert!(target.types.unwrap().is_present("demo.Type"));
        assert_eq!(target.environment, Some(EnvironmentKind::Reactive));
    }

    #[test]
    fn test_injects_through_trait_object() {
        let context = ResolutionContext::empty();
        let injector = CapabilityInjector::new(&context);

        let mut boxed: Box<dyn Capabilities> = Box::new(NeedsNothing);
        injector.inject(boxed.as_mut());
    }
}
