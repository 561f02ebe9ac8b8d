// SPDX-FileCopyrightText: 2026 Plugreg Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One-shot publication of a registry store.
//!
//! Hosts that initialize the registry from several places at startup can
//! share a `RegistryCell`. Each caller builds a complete store before trying
//! to publish it; exactly one store wins and every caller gets that instance.
//! There is no reload.

use std::sync::{Arc, OnceLock};

use plugreg_core::RegistryError;
use tracing::debug;

use crate::registry::RegistryStore;

#[derive(Debug, Default)]
pub struct RegistryCell {
    store: OnceLock<Arc<RegistryStore>>,
}

impl RegistryCell {
    pub const fn new() -> Self {
        Self {
            store: OnceLock::new(),
        }
    }

    /// The published store, if any.
    pub fn get(&self) -> Option<Arc<RegistryStore>> {
        self.store.get().cloned()
    }

    /// Return the published store, loading and publishing one first if needed.
    ///
    /// `load` may run on several threads at once during a startup race; all
    /// but the first result are discarded. A failed load publishes nothing.
    pub fn get_or_load<F>(&self, load: F) -> Result<Arc<RegistryStore>, RegistryError>
    where
        F: FnOnce() -> Result<RegistryStore, RegistryError>,
    {
        if let Some(store) = self.store.get() {
            return Ok(Arc::clone(store));
        }

        let built = Arc::new(load()?);
        let published = self.store.get_or_init(|| built);
        debug!(plugins = published.len(), "registry store published");
        Ok(Arc::clone(published))
    }
}
