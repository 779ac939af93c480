//! Declarative HTTP client core.
//!
//! # Overview
//! Turns a declarative interface description — base URL, per-method verb and
//! URL overrides, positional parameter names, implicit parameters — into a
//! callable client whose invocations become HTTP requests and whose
//! responses decode into typed values.
//!
//! # Design
//! - Descriptors are plain data built with chainable builders; all
//!   validation happens once, at client construction.
//! - Resolution produces immutable `InterfaceContext` / `MethodContext`
//!   templates; dispatch merges live arguments and implicit parameter values
//!   into a plain-data `HttpRequest`.
//! - The network belongs to the caller: requests are executed through the
//!   injected [`Transport`], and response bodies decode through serde. No
//!   connection management, retries, or caching live here.
//! - Implicit parameter providers are looked up by name on every dispatch,
//!   so values that refresh between calls (access tokens) stay current.

pub mod client;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod executor;
pub mod handler;
pub mod http;
pub mod registry;

pub use client::{ClientFactory, RestClient};
pub use context::{InterfaceContext, MethodContext};
pub use descriptor::{ImplicitParam, InterfaceDescriptor, MethodDescriptor};
pub use error::{BoxError, Error};
pub use executor::MethodExecutor;
pub use handler::ResponseHandler;
pub use http::{HttpRequest, HttpResponse, Transport};
pub use registry::{CallContext, ImplicitParameterProvider, ProviderRegistry};
