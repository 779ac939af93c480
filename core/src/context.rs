//! Interface and method context resolution.
//!
//! # Design
//! Resolution turns descriptors into immutable request templates, once per
//! interface and once per method, at client construction time. It is
//! deterministic and side-effect-free, so resolved contexts can be cached
//! and shared freely across concurrent dispatches. All descriptor validation
//! lives here: an implicit parameter declaring both or neither of
//! {constant, provider} is rejected as a configuration error, as is an
//! implicit parameter whose name collides with a positional one.
//!
//! Base-URL strings pass through unchecked; URL validity is the transport's
//! problem.

use std::collections::BTreeMap;

use crate::descriptor::{InterfaceDescriptor, MethodDescriptor};
use crate::error::Error;

/// Interface-level defaults, extracted once per interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterfaceContext {
    pub base_url: String,
    pub default_method: String,
}

impl InterfaceContext {
    /// Extracts interface-level defaults. Absent annotations fall back to an
    /// empty base URL and `"GET"`.
    pub fn resolve(descriptor: &InterfaceDescriptor) -> InterfaceContext {
        InterfaceContext {
            base_url: descriptor.base_url.clone().unwrap_or_default(),
            default_method: descriptor
                .default_method
                .clone()
                .unwrap_or_else(|| "GET".to_string()),
        }
    }
}

/// The fully resolved, immutable request template for one method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodContext {
    pub name: String,
    pub method: String,
    pub url: String,
    /// Distinct declared parameter names, first-occurrence order.
    pub params: Vec<String>,
    /// Zero-based argument position to parameter name.
    pub index_to_param: BTreeMap<usize, String>,
    pub const_implicit_params: BTreeMap<String, String>,
    /// Implicit parameter name to the provider name that supplies it.
    pub provided_implicit_params: BTreeMap<String, String>,
}

impl MethodContext {
    /// Resolves one method descriptor against its interface context.
    pub fn resolve(
        interface: &InterfaceContext,
        descriptor: &MethodDescriptor,
    ) -> Result<MethodContext, Error> {
        let method = descriptor
            .method
            .clone()
            .unwrap_or_else(|| interface.default_method.clone());

        let url = match &descriptor.url {
            Some(url_override) => join_url(&interface.base_url, url_override),
            None => interface.base_url.clone(),
        };

        let mut params = Vec::new();
        let mut index_to_param = BTreeMap::new();
        for (position, name) in descriptor.params.iter().enumerate() {
            if !params.contains(name) {
                params.push(name.clone());
            }
            index_to_param.insert(position, name.clone());
        }

        let mut const_implicit_params = BTreeMap::new();
        let mut provided_implicit_params = BTreeMap::new();
        for implicit in &descriptor.implicit_params {
            if params.contains(&implicit.name) {
                return Err(Error::Config(format!(
                    "method '{}': implicit parameter '{}' is also declared positionally",
                    descriptor.name, implicit.name
                )));
            }
            match (&implicit.const_value, &implicit.provider_name) {
                (Some(value), None) => {
                    const_implicit_params.insert(implicit.name.clone(), value.clone());
                }
                (None, Some(provider)) => {
                    provided_implicit_params.insert(implicit.name.clone(), provider.clone());
                }
                (Some(_), Some(_)) => {
                    return Err(Error::Config(format!(
                        "method '{}': implicit parameter '{}' declares both a constant and a provider",
                        descriptor.name, implicit.name
                    )));
                }
                (None, None) => {
                    return Err(Error::Config(format!(
                        "method '{}': implicit parameter '{}' declares neither a constant nor a provider",
                        descriptor.name, implicit.name
                    )));
                }
            }
        }

        Ok(MethodContext {
            name: descriptor.name.clone(),
            method,
            url,
            params,
            index_to_param,
            const_implicit_params,
            provided_implicit_params,
        })
    }
}

/// Applies the URL override rule: absolute overrides (containing a scheme)
/// replace the base; relative overrides are appended path-wise with exactly
/// one separator.
fn join_url(base: &str, url_override: &str) -> String {
    if url_override.contains("://") || base.is_empty() {
        return url_override.to_string();
    }
    let prefix = base.trim_end_matches('/');
    let suffix = url_override.trim_start_matches('/');
    if suffix.is_empty() {
        return prefix.to_string();
    }
    format!("{prefix}/{suffix}")
}
