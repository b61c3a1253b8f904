//! Services provided by the embedding host.

use std::{collections::HashMap, fmt::Debug};

use parking_lot::Mutex;
use tracing::trace;

use crate::{Error, Result, settings::SettingsValues};

/// Host-side collaborators the toolkit calls but does not implement:
/// user-visible notices and settings storage.
pub trait HostServices: Send + Sync + Debug {
    /// Show a host-native notice.
    fn notice(&self, message: &str) -> Result<()>;

    /// Store `values` under `namespace`.
    fn persist(&self, namespace: &str, values: &SettingsValues) -> Result<()>;

    /// Load values previously stored under `namespace`.
    fn load(&self, namespace: &str) -> Result<Option<SettingsValues>>;
}

/// In-memory [`HostServices`] for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemoryHost {
    /// Stored values by namespace.
    store: Mutex<HashMap<String, SettingsValues>>,
    /// Notices in arrival order.
    notices: Mutex<Vec<String>>,
    /// When set, every call fails with this message.
    failure: Mutex<Option<String>>,
}

impl MemoryHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Notices received so far.
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }

    /// Make every subsequent call fail with `message`, or succeed again with
    /// `None`.
    pub fn set_failure(&self, message: Option<&str>) {
        *self.failure.lock() = message.map(str::to_string);
    }

    /// Fail if a failure has been configured.
    fn check(&self) -> Result<()> {
        match &*self.failure.lock() {
            Some(msg) => Err(Error::Host(msg.clone())),
            None => Ok(()),
        }
    }
}

impl HostServices for MemoryHost {
    fn notice(&self, message: &str) -> Result<()> {
        self.check()?;
        trace!(message, "host_notice");
        self.notices.lock().push(message.to_string());
        Ok(())
    }

    fn persist(&self, namespace: &str, values: &SettingsValues) -> Result<()> {
        self.check()?;
        self.store
            .lock()
            .insert(namespace.to_string(), values.clone());
        Ok(())
    }

    fn load(&self, namespace: &str) -> Result<Option<SettingsValues>> {
        self.check()?;
        Ok(self.store.lock().get(namespace).cloned())
    }
}
