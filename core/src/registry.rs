//! Named registry of implicit parameter providers.
//!
//! # Design
//! Providers are looked up by name at dispatch time, not captured at
//! resolution time, so a provider registered (or replaced) after a client
//! was built is picked up by the next call — the usual shape for refreshed
//! access tokens. Registration happens during setup; lookup happens on every
//! dispatch, so the map sits behind a `RwLock` and hands out `Arc` clones.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{BoxError, Error};

/// What a provider may inspect about the call it is supplying a value for.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    pub method_name: &'a str,
    pub http_method: &'a str,
    pub url: &'a str,
}

/// Supplies the value of one implicit parameter at call time.
///
/// Implementations must be safe for concurrent use; `supply` is called on
/// every dispatch that references the provider.
pub trait ImplicitParameterProvider: Send + Sync {
    fn supply(&self, context: &CallContext<'_>) -> Result<String, BoxError>;
}

impl<F> ImplicitParameterProvider for F
where
    F: Fn(&CallContext<'_>) -> Result<String, BoxError> + Send + Sync,
{
    fn supply(&self, context: &CallContext<'_>) -> Result<String, BoxError> {
        self(context)
    }
}

/// Name-keyed provider registry shared by a factory and its clients.
#[derive(Default)]
pub struct ProviderRegistry {
    providers: RwLock<HashMap<String, Arc<dyn ImplicitParameterProvider>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider under `name`. An empty name is rejected; a
    /// repeated name silently replaces the previous provider.
    pub fn register(
        &self,
        name: impl Into<String>,
        provider: impl ImplicitParameterProvider + 'static,
    ) -> Result<(), Error> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::Registry(
                "provider name must not be empty".to_string(),
            ));
        }
        let mut providers = self
            .providers
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.insert(name, Arc::new(provider));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Option<Arc<dyn ImplicitParameterProvider>> {
        let providers = self
            .providers
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        providers.get(name).cloned()
    }
}
