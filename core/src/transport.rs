//! Transport abstraction for pluggable HTTP backends.
//!
//! Sessions never talk to an HTTP library directly. The blocking session
//! takes a [`BlockingTransport`], the async session an [`AsyncTransport`];
//! tests substitute scripted stubs for both.

use std::future::Future;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Executes a request on the calling thread.
pub trait BlockingTransport: Send + Sync {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Executes a request, suspending at the network call.
pub trait AsyncTransport: Send + Sync {
    fn send(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}
