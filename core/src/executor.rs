//! Per-method dispatch unit: merges arguments, executes, decodes.
//!
//! # Design
//! A `MethodExecutor` is an immutable binding of a resolved [`MethodContext`]
//! to a transport, a provider registry, and a response handler. Creating one
//! performs no network activity; `invoke` takes `&self` and mutates nothing,
//! so one executor can serve concurrent calls as long as the transport and
//! registry can.
//!
//! Parameter merging is last-write-wins in source order constant → provided
//! → positional. Per the resolution invariants the sources are disjoint, so
//! the ordering only matters for positional duplicates.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::context::MethodContext;
use crate::error::Error;
use crate::handler::ResponseHandler;
use crate::http::{HttpRequest, HttpResponse, Transport};
use crate::registry::{CallContext, ProviderRegistry};

/// A callable unit bound to one method's verb, URL, and return type.
pub struct MethodExecutor<R> {
    context: Arc<MethodContext>,
    transport: Arc<dyn Transport>,
    registry: Arc<ProviderRegistry>,
    handler: ResponseHandler<R>,
}

impl<R: DeserializeOwned> MethodExecutor<R> {
    pub(crate) fn new(
        context: Arc<MethodContext>,
        transport: Arc<dyn Transport>,
        registry: Arc<ProviderRegistry>,
    ) -> Self {
        Self {
            context,
            transport,
            registry,
            handler: ResponseHandler::new(),
        }
    }

    pub fn context(&self) -> &MethodContext {
        &self.context
    }

    /// Dispatches one call: positional `args` are matched against the
    /// method's parameter bindings (a `None` argument contributes no
    /// parameter), implicit parameters are resolved, and the merged request
    /// is executed and decoded. Transport and decode failures propagate
    /// unchanged.
    pub fn invoke(&self, args: &[Option<String>]) -> Result<R, Error> {
        let request = self.build_request(args)?;
        let response = self.execute(&request)?;
        self.handler.handle(response)
    }

    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, Error> {
        self.transport
            .execute(request)
            .map_err(|e| Error::Transport(e.to_string()))
    }

    fn build_request(&self, args: &[Option<String>]) -> Result<HttpRequest, Error> {
        let context = &*self.context;
        let mut params: Vec<(String, String)> = Vec::new();

        for (name, value) in &context.const_implicit_params {
            put(&mut params, name, value.clone());
        }

        let call_context = CallContext {
            method_name: &context.name,
            http_method: &context.method,
            url: &context.url,
        };
        for (name, provider_name) in &context.provided_implicit_params {
            let provider = self
                .registry
                .lookup(provider_name)
                .ok_or_else(|| Error::MissingProvider(provider_name.clone()))?;
            let value = provider.supply(&call_context).map_err(|e| Error::Provider {
                name: provider_name.clone(),
                message: e.to_string(),
            })?;
            put(&mut params, name, value);
        }

        for (&position, name) in &context.index_to_param {
            if let Some(Some(value)) = args.get(position) {
                put(&mut params, name, value.clone());
            }
        }

        Ok(HttpRequest {
            method: context.method.clone(),
            url: context.url.clone(),
            params,
        })
    }
}

/// Insert or overwrite `name` while keeping the position of its first write.
fn put(params: &mut Vec<(String, String)>, name: &str, value: String) {
    match params.iter_mut().find(|(existing, _)| existing.as_str() == name) {
        Some(entry) => entry.1 = value,
        None => params.push((name.to_string(), value)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::context::InterfaceContext;
    use crate::descriptor::{ImplicitParam, InterfaceDescriptor, MethodDescriptor};
    use crate::error::BoxError;

    /// Transport double: records every request and replays a canned response.
    struct RecordingTransport {
        requests: Mutex<Vec<HttpRequest>>,
        status: u16,
        body: String,
    }

    impl RecordingTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                requests: Mutex::new(Vec::new()),
                status,
                body: body.to_string(),
            }
        }

        fn last_request(&self) -> HttpRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, BoxError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(HttpResponse {
                status: self.status,
                headers: Vec::new(),
                body: self.body.clone(),
            })
        }
    }

    struct FailingTransport;

    impl Transport for FailingTransport {
        fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, BoxError> {
            Err("connection refused".into())
        }
    }

    fn resolve(descriptor: MethodDescriptor) -> Arc<MethodContext> {
        let interface = InterfaceContext::resolve(
            &InterfaceDescriptor::new().base_url("http://example.com"),
        );
        Arc::new(MethodContext::resolve(&interface, &descriptor).unwrap())
    }

    fn executor<R: DeserializeOwned>(
        descriptor: MethodDescriptor,
        transport: Arc<dyn Transport>,
        registry: Arc<ProviderRegistry>,
    ) -> MethodExecutor<R> {
        MethodExecutor::new(resolve(descriptor), transport, registry)
    }

    #[test]
    fn positional_args_are_bound_by_declaration_order() {
        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("search").url("/search").param("q").param("page"),
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(ProviderRegistry::new()),
        );
        exec.invoke(&[Some("cats".to_string()), Some("2".to_string())])
            .unwrap();

        let request = transport.last_request();
        assert_eq!(request.method, "GET");
        assert_eq!(request.url, "http://example.com/search");
        assert_eq!(
            request.params,
            vec![
                ("q".to_string(), "cats".to_string()),
                ("page".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    fn absent_argument_contributes_no_parameter() {
        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("search").param("q").param("page"),
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(ProviderRegistry::new()),
        );
        exec.invoke(&[None, Some("2".to_string())]).unwrap();

        let request = transport.last_request();
        assert_eq!(request.params, vec![("page".to_string(), "2".to_string())]);

        // Too few arguments behaves like trailing Nones.
        exec.invoke(&[Some("cats".to_string())]).unwrap();
        let request = transport.last_request();
        assert_eq!(request.params, vec![("q".to_string(), "cats".to_string())]);
    }

    #[test]
    fn implicit_parameters_are_merged_in() {
        let registry = Arc::new(ProviderRegistry::new());
        registry
            .register("accessTokenProvider", |_: &CallContext<'_>| {
                Ok::<_, BoxError>("tok-1".to_string())
            })
            .unwrap();

        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("friends")
                .param("owner_id")
                .implicit(ImplicitParam::constant("v", "5.41"))
                .implicit(ImplicitParam::provided("access_token", "accessTokenProvider")),
            Arc::clone(&transport) as Arc<dyn Transport>,
            registry,
        );
        exec.invoke(&[Some("42".to_string())]).unwrap();

        let request = transport.last_request();
        assert_eq!(
            request.params,
            vec![
                ("v".to_string(), "5.41".to_string()),
                ("access_token".to_string(), "tok-1".to_string()),
                ("owner_id".to_string(), "42".to_string())
            ]
        );
    }

    #[test]
    fn provider_values_are_looked_up_live_per_call() {
        let registry = Arc::new(ProviderRegistry::new());
        registry
            .register("accessTokenProvider", |_: &CallContext<'_>| {
                Ok::<_, BoxError>("first".to_string())
            })
            .unwrap();

        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("friends")
                .implicit(ImplicitParam::provided("access_token", "accessTokenProvider")),
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::clone(&registry),
        );

        exec.invoke(&[]).unwrap();
        assert_eq!(transport.last_request().params[0].1, "first");

        registry
            .register("accessTokenProvider", |_: &CallContext<'_>| {
                Ok::<_, BoxError>("second".to_string())
            })
            .unwrap();
        exec.invoke(&[]).unwrap();
        assert_eq!(transport.last_request().params[0].1, "second");
    }

    #[test]
    fn missing_provider_is_a_dispatch_error() {
        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("friends")
                .implicit(ImplicitParam::provided("access_token", "nobody")),
            transport,
            Arc::new(ProviderRegistry::new()),
        );
        let err = exec.invoke(&[]).unwrap_err();
        assert!(matches!(err, Error::MissingProvider(name) if name == "nobody"));
    }

    #[test]
    fn provider_failure_propagates_with_its_message() {
        let registry = Arc::new(ProviderRegistry::new());
        registry
            .register("accessTokenProvider", |_: &CallContext<'_>| {
                Err::<String, BoxError>("token expired".into())
            })
            .unwrap();

        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("friends")
                .implicit(ImplicitParam::provided("access_token", "accessTokenProvider")),
            Arc::new(RecordingTransport::replying(200, "[]")),
            registry,
        );
        let err = exec.invoke(&[]).unwrap_err();
        match err {
            Error::Provider { name, message } => {
                assert_eq!(name, "accessTokenProvider");
                assert!(message.contains("token expired"));
            }
            other => panic!("expected Provider error, got {other:?}"),
        }
    }

    #[test]
    fn transport_failure_becomes_transport_error() {
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("friends"),
            Arc::new(FailingTransport),
            Arc::new(ProviderRegistry::new()),
        );
        let err = exec.invoke(&[]).unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
    }

    #[test]
    fn provider_value_overwrites_constant_for_shared_name() {
        let registry = Arc::new(ProviderRegistry::new());
        registry
            .register("versionProvider", |_: &CallContext<'_>| {
                Ok::<_, BoxError>("6.0".to_string())
            })
            .unwrap();

        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("versioned")
                .implicit(ImplicitParam::constant("v", "5.41"))
                .implicit(ImplicitParam::provided("v", "versionProvider"))
                .implicit(ImplicitParam::constant("lang", "en")),
            Arc::clone(&transport) as Arc<dyn Transport>,
            registry,
        );
        exec.invoke(&[]).unwrap();

        // Provided source wins over constant; the overwrite keeps the
        // constant's first-write position in the merged set.
        let request = transport.last_request();
        assert_eq!(
            request.params,
            vec![
                ("lang".to_string(), "en".to_string()),
                ("v".to_string(), "6.0".to_string())
            ]
        );
    }

    #[test]
    fn later_positional_write_wins_for_duplicate_names() {
        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("dup").param("x").param("x"),
            Arc::clone(&transport) as Arc<dyn Transport>,
            Arc::new(ProviderRegistry::new()),
        );
        exec.invoke(&[Some("first".to_string()), Some("second".to_string())])
            .unwrap();
        let request = transport.last_request();
        assert_eq!(request.params, vec![("x".to_string(), "second".to_string())]);
    }

    #[test]
    fn call_context_exposes_resolved_method_and_url() {
        let registry = Arc::new(ProviderRegistry::new());
        registry
            .register("urlEcho", |ctx: &CallContext<'_>| {
                Ok::<_, BoxError>(format!("{} {}", ctx.http_method, ctx.url))
            })
            .unwrap();

        let transport = Arc::new(RecordingTransport::replying(200, "[]"));
        let exec: MethodExecutor<Vec<String>> = executor(
            MethodDescriptor::new("probe")
                .url("/probe")
                .method("POST")
                .implicit(ImplicitParam::provided("echo", "urlEcho")),
            Arc::clone(&transport) as Arc<dyn Transport>,
            registry,
        );
        exec.invoke(&[]).unwrap();
        assert_eq!(
            transport.last_request().params[0].1,
            "POST http://example.com/probe"
        );
    }
}
