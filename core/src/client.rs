//! Client factory and the generated-client call surface.
//!
//! # Design
//! The dynamic-proxy trick of the JVM world is replaced by an explicit
//! registration table: [`ClientFactory::interface_client`] resolves every
//! method of a descriptor eagerly (so configuration errors surface at
//! construction, not mid-call) and stores the resulting contexts keyed by
//! method name. Calls go through the generic entry point
//! [`RestClient::call`], typed by the expected return type at the call site.
//!
//! The provider registry is shared between the factory and every client it
//! builds; registrations made after a client exists are visible on its next
//! dispatch, which is how refreshable values like access tokens stay live.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::context::{InterfaceContext, MethodContext};
use crate::descriptor::InterfaceDescriptor;
use crate::error::Error;
use crate::executor::MethodExecutor;
use crate::http::Transport;
use crate::registry::{ImplicitParameterProvider, ProviderRegistry};

/// Builds callable clients from interface descriptors over one transport.
pub struct ClientFactory {
    transport: Arc<dyn Transport>,
    registry: Arc<ProviderRegistry>,
}

impl ClientFactory {
    pub fn new(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            registry: Arc::new(ProviderRegistry::new()),
        }
    }

    /// Registers a named implicit parameter provider, visible to every
    /// client built by this factory — including those built earlier.
    pub fn register_implicit_parameter_provider(
        &self,
        name: impl Into<String>,
        provider: impl ImplicitParameterProvider + 'static,
    ) -> Result<(), Error> {
        self.registry.register(name, provider)
    }

    /// Resolves a descriptor into a callable client. Every method context is
    /// resolved here, once; any configuration error fails the whole client.
    pub fn interface_client(&self, descriptor: &InterfaceDescriptor) -> Result<RestClient, Error> {
        let interface = InterfaceContext::resolve(descriptor);
        let mut methods = HashMap::with_capacity(descriptor.methods.len());
        for method in &descriptor.methods {
            let context = MethodContext::resolve(&interface, method)?;
            if methods.insert(context.name.clone(), Arc::new(context)).is_some() {
                return Err(Error::Config(format!(
                    "method '{}' is declared more than once",
                    method.name
                )));
            }
        }
        Ok(RestClient {
            transport: Arc::clone(&self.transport),
            registry: Arc::clone(&self.registry),
            methods,
        })
    }
}

/// A generated client: a table of resolved method contexts plus the shared
/// transport and registry. Immutable after construction; concurrent calls
/// are safe.
pub struct RestClient {
    transport: Arc<dyn Transport>,
    registry: Arc<ProviderRegistry>,
    methods: HashMap<String, Arc<MethodContext>>,
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("methods", &self.methods.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl RestClient {
    /// Dispatches one call: positional `args` follow the method's parameter
    /// declaration order, and the response body is decoded as `R`.
    pub fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        args: &[Option<String>],
    ) -> Result<R, Error> {
        self.executor::<R>(method)?.invoke(args)
    }

    /// Binds a reusable executor for one method. Useful on hot paths to
    /// skip the per-call table lookup; no network activity happens here.
    pub fn executor<R: DeserializeOwned>(&self, method: &str) -> Result<MethodExecutor<R>, Error> {
        let context = self
            .methods
            .get(method)
            .ok_or_else(|| Error::UnknownMethod(method.to_string()))?;
        Ok(MethodExecutor::new(
            Arc::clone(context),
            Arc::clone(&self.transport),
            Arc::clone(&self.registry),
        ))
    }

    /// Read access to a resolved method context, mainly for diagnostics.
    pub fn method_context(&self, method: &str) -> Option<&MethodContext> {
        self.methods.get(method).map(Arc::as_ref)
    }
}
