//! Import event notification
//!
//! After filtering, every registered listener is told which candidates
//! survived and which were excluded. Listeners observe; they cannot change
//! the outcome, but a failing listener aborts resolution.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::capability::{Capabilities, CapabilityInjector};
use crate::error::BoxError;
use crate::{Error, Result};

/// Snapshot of one resolution decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportEvent {
    configurations: Vec<String>,
    exclusions: BTreeSet<String>,
}

impl ImportEvent {
    pub fn new(configurations: Vec<String>, exclusions: BTreeSet<String>) -> Self {
        Self {
            configurations,
            exclusions,
        }
    }

    /// Candidates that passed every filter.
    pub fn configurations(&self) -> &[String] {
        &self.configurations
    }

    /// Modules the site excluded.
    pub fn exclusions(&self) -> &BTreeSet<String> {
        &self.exclusions
    }
}

/// Observer of resolution decisions.
pub trait ImportListener: Capabilities + Send + Sync {
    /// Name used in diagnostics.
    fn name(&self) -> &str;

    fn on_import(&self, event: &ImportEvent) -> std::result::Result<(), BoxError>;
}

/// Ordered registry of listeners.
#[derive(Default)]
pub struct ImportNotifier {
    listeners: Vec<Box<dyn ImportListener>>,
}

impl ImportNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a listener; listeners are invoked in registration order.
    pub fn register(&mut self, listener: impl ImportListener + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub(crate) fn inject(&mut self, injector: &CapabilityInjector<'_>) {
        for listener in &mut self.listeners {
            injector.inject(listener.as_mut());
        }
    }

    /// Deliver one event to every listener.
    ///
    /// Does nothing when no listener is registered.
    ///
    /// # Errors
    ///
    /// Returns `Error::Extension` naming the first listener that fails.
    pub fn notify(&self, configurations: &[String], exclusions: &BTreeSet<String>) -> Result<()> {
        if self.listeners.is_empty() {
            return Ok(());
        }

        let event = ImportEvent::new(configurations.to_vec(), exclusions.clone());
        for listener in &self.listeners {
            listener
                .on_import(&event)
                .map_err(|e| Error::extension(format!("listener '{}'", listener.name()), e))?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ImportNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.listeners.iter().map(|l| l.name()).collect();
        f.debug_struct("ImportNotifier")
            .field("listeners", &names)
            .finish()
    }
}

/// Listener that keeps every event it receives.
///
/// Clones share the same log, so the host can register one clone and read
/// the recorded events through another.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    events: Arc<Mutex<Vec<ImportEvent>>>,
}

impl ImportReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded so far, oldest first.
    pub fn events(&self) -> Vec<ImportEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Capabilities for ImportReport {}

impl ImportListener for ImportReport {
    fn name(&self) -> &str {
        "import-report"
    }

    fn on_import(&self, event: &ImportEvent) -> std::result::Result<(), BoxError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
        Ok(())
    }
}
