//! Response decoding bound to a method's declared return type.
//!
//! # Design
//! The return type is carried as a generic parameter rather than a runtime
//! descriptor: serde's `DeserializeOwned` already covers parameterized types
//! such as `HashMap<String, serde_json::Value>`. The handler interprets the
//! status line before decoding — non-2xx responses become an `Http` error
//! with the raw status and body instead of a confusing decode failure.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::http::HttpResponse;

/// Decoder from a raw response body to the declared return type `R`.
#[derive(Debug)]
pub struct ResponseHandler<R> {
    _marker: PhantomData<fn() -> R>,
}

impl<R: DeserializeOwned> ResponseHandler<R> {
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }

    pub fn handle(&self, response: HttpResponse) -> Result<R, Error> {
        if !(200..300).contains(&response.status) {
            return Err(Error::Http {
                status: response.status,
                body: response.body,
            });
        }
        serde_json::from_str(&response.body).map_err(|e| Error::Decode(e.to_string()))
    }
}

impl<R: DeserializeOwned> Default for ResponseHandler<R> {
    fn default() -> Self {
        Self::new()
    }
}
