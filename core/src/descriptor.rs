//! Declarative description of a REST interface and its methods.
//!
//! # Design
//! Descriptors are the configuration surface of the crate: plain data with
//! chainable builders, no behavior. They deliberately allow invalid shapes
//! (an [`ImplicitParam`] with both a constant and a provider, say) so that
//! validation can live in one place — resolution — and fail fast at client
//! construction rather than mid-call.

/// Interface-level defaults plus the methods the client will expose.
#[derive(Debug, Clone, Default)]
pub struct InterfaceDescriptor {
    pub base_url: Option<String>,
    pub default_method: Option<String>,
    pub methods: Vec<MethodDescriptor>,
}

impl InterfaceDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// HTTP verb inherited by methods without their own override.
    pub fn default_method(mut self, method: impl Into<String>) -> Self {
        self.default_method = Some(method.into());
        self
    }

    pub fn method(mut self, method: MethodDescriptor) -> Self {
        self.methods.push(method);
        self
    }
}

/// One callable method: optional URL/verb overrides, positional parameter
/// names (declaration order = argument position), and implicit parameters.
#[derive(Debug, Clone)]
pub struct MethodDescriptor {
    pub name: String,
    pub url: Option<String>,
    pub method: Option<String>,
    pub params: Vec<String>,
    pub implicit_params: Vec<ImplicitParam>,
}

impl MethodDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: None,
            method: None,
            params: Vec::new(),
            implicit_params: Vec::new(),
        }
    }

    /// URL override: used verbatim when absolute, appended to the interface
    /// base URL otherwise.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Declares the next positional parameter. The first call binds argument
    /// position 0, the second position 1, and so on.
    pub fn param(mut self, name: impl Into<String>) -> Self {
        self.params.push(name.into());
        self
    }

    pub fn implicit(mut self, param: ImplicitParam) -> Self {
        self.implicit_params.push(param);
        self
    }
}

/// A parameter injected into every request of a method, sourced from either
/// a constant value or a named runtime provider — exactly one of the two.
#[derive(Debug, Clone)]
pub struct ImplicitParam {
    pub name: String,
    pub const_value: Option<String>,
    pub provider_name: Option<String>,
}

impl ImplicitParam {
    pub fn constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            const_value: Some(value.into()),
            provider_name: None,
        }
    }

    pub fn provided(name: impl Into<String>, provider_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            const_value: None,
            provider_name: Some(provider_name.into()),
        }
    }
}
