use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::traits::KeyValueStore;

/// A named storage scope inside a [`LayeredStore`].
pub struct Scope {
    name: String,
    store: Box<dyn KeyValueStore>,
}

impl Scope {
    pub fn new(name: impl Into<String>, store: impl KeyValueStore + 'static) -> Self {
        Self {
            name: name.into(),
            store: Box::new(store),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }
}

impl std::fmt::Debug for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scope").field("name", &self.name).finish()
    }
}

/// Redundant storage across several scopes (e.g. durable + session).
///
/// Writes go to every scope. Reads return the value from the first scope,
/// in priority order, that holds a non-empty value for the key.
#[derive(Debug)]
pub struct LayeredStore {
    scopes: Vec<Scope>,
}

impl LayeredStore {
    /// Build a layered store. `scopes` are listed highest read priority first.
    pub fn new(scopes: Vec<Scope>) -> StoreResult<Self> {
        if scopes.is_empty() {
            return Err(StoreError::NoScopes);
        }
        Ok(Self { scopes })
    }

    pub fn scopes(&self) -> &[Scope] {
        &self.scopes
    }
}

impl KeyValueStore for LayeredStore {
    /// A scope whose read fails is skipped so lower scopes still get a
    /// chance. If no scope holds the key, the first failure is returned.
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut first_err = None;
        for scope in &self.scopes {
            match scope.store.get(key) {
                Ok(Some(value)) if !value.is_empty() => {
                    debug!(scope = %scope.name, key, "layered read hit");
                    return Ok(Some(value));
                }
                Ok(_) => continue,
                Err(e) => {
                    warn!(scope = %scope.name, key, error = %e, "scope read failed, trying next");
                    first_err.get_or_insert(e);
                }
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    /// Every scope is attempted even if an earlier one fails; the first
    /// failure is returned.
    fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut first_err = None;
        for scope in &self.scopes {
            if let Err(e) = scope.store.put(key, value) {
                warn!(scope = %scope.name, key, error = %e, "scope write failed");
                first_err.get_or_insert(e);
            }
        }
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut existed = false;
        for scope in &self.scopes {
            existed |= scope.store.remove(key)?;
        }
        Ok(existed)
    }
}
