//! The request-execution capability the fault decorator wraps and exposes

use std::sync::Arc;

use crate::message::{Request, Response};

/// Turns a [`Request`] into a [`Response`] or a failure.
///
/// Implemented by concrete HTTP stacks, test stubs, and decorators such as
/// [`SoapTrip`](crate::SoapTrip) that wrap another transport.
pub trait Transport {
    /// Failure reported when no response could be produced
    type Error;

    /// Execute a request, blocking until the response head is available
    fn execute(&self, request: Request) -> Result<Response, Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Error = T::Error;

    fn execute(&self, request: Request) -> Result<Response, Self::Error> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    type Error = T::Error;

    fn execute(&self, request: Request) -> Result<Response, Self::Error> {
        (**self).execute(request)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    type Error = T::Error;

    fn execute(&self, request: Request) -> Result<Response, Self::Error> {
        (**self).execute(request)
    }
}
