//! Error types for the declarative client core.
//!
//! # Design
//! Configuration mistakes (`Config`, `Registry`, `UnknownMethod`) are kept
//! apart from call-time failures (`MissingProvider`, `Provider`, `Transport`,
//! `Http`, `Decode`) so callers can tell "fix your descriptor" from "the call
//! failed." Collaborator failures are carried as messages; nothing is retried
//! or silently recovered.

use std::fmt;

/// Boxed error type accepted from collaborators (transports and providers).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors surfaced by resolution, registration, and dispatch.
#[derive(Debug)]
pub enum Error {
    /// A descriptor is malformed — detected eagerly at resolution time.
    Config(String),

    /// An invalid registration was attempted on the provider registry.
    Registry(String),

    /// A call named a method the descriptor never declared.
    UnknownMethod(String),

    /// A provided implicit parameter references a provider name with no
    /// current registration.
    MissingProvider(String),

    /// A registered provider failed while supplying a value.
    Provider { name: String, message: String },

    /// The transport failed to execute the request.
    Transport(String),

    /// The server returned a non-2xx status.
    Http { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    Decode(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "invalid descriptor: {msg}"),
            Error::Registry(msg) => write!(f, "invalid registration: {msg}"),
            Error::UnknownMethod(name) => write!(f, "unknown method: {name}"),
            Error::MissingProvider(name) => {
                write!(f, "no implicit parameter provider registered as '{name}'")
            }
            Error::Provider { name, message } => {
                write!(f, "provider '{name}' failed: {message}")
            }
            Error::Transport(msg) => write!(f, "transport failed: {msg}"),
            Error::Http { status, body } => write!(f, "HTTP {status}: {body}"),
            Error::Decode(msg) => write!(f, "deserialization failed: {msg}"),
        }
    }
}

impl std::error::Error for Error {}
