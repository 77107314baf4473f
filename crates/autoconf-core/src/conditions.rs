//! Reference condition filters
//!
//! Each condition reads one kind of metadata hint and checks it against a
//! host collaborator received through capability injection. A candidate
//! without the relevant hint always matches.

use std::sync::Arc;

use autoconf_meta::{EnvironmentKind, ModuleHints, ModuleMetadata};

use crate::capability::Capabilities;
use crate::context::{InstanceRegistry, TypeResolver};
use crate::error::BoxError;
use crate::filter::ImportFilter;

fn verdicts<F>(candidates: &[Option<&str>], metadata: &ModuleMetadata, check: F) -> Vec<bool>
where
    F: Fn(&ModuleHints) -> bool,
{
    candidates
        .iter()
        .map(|candidate| match candidate.and_then(|m| metadata.get(m)) {
            Some(hints) => check(hints),
            None => true,
        })
        .collect()
}

fn missing(filter: &str, capability: &str) -> BoxError {
    format!("{filter} condition evaluated without an injected {capability}").into()
}

/// Requires every type listed in `on_types` to be known to the runtime.
#[derive(Default)]
pub struct OnTypeCondition {
    types: Option<Arc<dyn TypeResolver>>,
}

impl Capabilities for OnTypeCondition {
    fn inject_types(&mut self, types: Arc<dyn TypeResolver>) {
        self.types = Some(types);
    }
}

impl ImportFilter for OnTypeCondition {
    fn name(&self) -> &str {
        "on-type"
    }

    fn matches(
        &self,
        candidates: &[Option<&str>],
        metadata: &ModuleMetadata,
    ) -> Result<Vec<bool>, BoxError> {
        let types = self
            .types
            .as_ref()
            .ok_or_else(|| missing(self.name(), "type resolver"))?;
        Ok(verdicts(candidates, metadata, |hints| {
            hints.on_types.iter().all(|t| types.is_present(t))
        }))
    }
}

/// Requires every instance listed in `on_instances` to be registered.
#[derive(Default)]
pub struct OnInstanceCondition {
    instances: Option<Arc<dyn InstanceRegistry>>,
}

impl Capabilities for OnInstanceCondition {
    fn inject_instances(&mut self, instances: Arc<dyn InstanceRegistry>) {
        self.instances = Some(instances);
    }
}

impl ImportFilter for OnInstanceCondition {
    fn name(&self) -> &str {
        "on-instance"
    }

    fn matches(
        &self,
        candidates: &[Option<&str>],
        metadata: &ModuleMetadata,
    ) -> Result<Vec<bool>, BoxError> {
        let instances = self
            .instances
            .as_ref()
            .ok_or_else(|| missing(self.name(), "instance registry"))?;
        Ok(verdicts(candidates, metadata, |hints| {
            hints.on_instances.iter().all(|i| instances.contains(i))
        }))
    }
}

/// Requires the runtime environment to satisfy `on_environment`.
#[derive(Default)]
pub struct OnEnvironmentCondition {
    environment: Option<EnvironmentKind>,
}

impl Capabilities for OnEnvironmentCondition {
    fn inject_environment(&mut self, environment: EnvironmentKind) {
        self.environment = Some(environment);
    }
}

impl ImportFilter for OnEnvironmentCondition {
    fn name(&self) -> &str {
        "on-environment"
    }

    fn matches(
        &self,
        candidates: &[Option<&str>],
        metadata: &ModuleMetadata,
    ) -> Result<Vec<bool>, BoxError> {
        let environment = self
            .environment
            .ok_or_else(|| missing(self.name(), "environment kind"))?;
        Ok(verdicts(candidates, metadata, |hints| {
            hints
                .on_environment
                .is_none_or(|required| required.is_satisfied_by(environment))
        }))
    }
}
