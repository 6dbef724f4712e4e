//! Error types for the SOAP fault decorator

use crate::message::Response;
use thiserror::Error;

/// A SOAP Fault found in a response body.
///
/// The fault owns the response it was found in, so status, headers and the
/// full body remain available even though no success value is returned.
#[derive(Debug, Error)]
#[error("FaultCode: '{fault_code}' FaultString: '{fault_string}'")]
pub struct SoapFault {
    /// Text of the `faultcode` element
    pub fault_code: String,
    /// Text of the `faultstring` element
    pub fault_string: String,
    /// The response carrying the fault, with a replayable body
    pub response: Response,
}

impl SoapFault {
    /// The response the fault was found in
    pub fn response(&self) -> &Response {
        &self.response
    }

    /// Mutable access to the response, e.g. to read its body
    pub fn response_mut(&mut self) -> &mut Response {
        &mut self.response
    }

    /// Give up the fault and keep the response
    pub fn into_response(self) -> Response {
        self.response
    }
}

/// Errors returned by [`SoapTrip`](crate::SoapTrip)
///
/// `E` is the error type of the wrapped transport. It is carried as-is and
/// displays exactly as the wrapped transport produced it.
#[derive(Debug, Error)]
pub enum Error<E> {
    /// The wrapped transport failed; the body was never inspected
    #[error(transparent)]
    Transport(E),

    /// The exchange succeeded but the body carried a SOAP Fault
    #[error(transparent)]
    Fault(Box<SoapFault>),
}

impl<E> Error<E> {
    /// Whether the body carried a SOAP Fault
    pub fn is_fault(&self) -> bool {
        matches!(self, Error::Fault(_))
    }

    /// The SOAP Fault, if this is one
    pub fn as_fault(&self) -> Option<&SoapFault> {
        match self {
            Error::Fault(fault) => Some(fault),
            Error::Transport(_) => None,
        }
    }

    /// Take the SOAP Fault, dropping a transport failure
    pub fn into_fault(self) -> Option<SoapFault> {
        match self {
            Error::Fault(fault) => Some(*fault),
            Error::Transport(_) => None,
        }
    }

    /// The wrapped transport's failure, if this is one
    pub fn as_transport(&self) -> Option<&E> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Fault(_) => None,
        }
    }

    /// Take the wrapped transport's failure as it was returned
    pub fn into_transport(self) -> Option<E> {
        match self {
            Error::Transport(err) => Some(err),
            Error::Fault(_) => None,
        }
    }
}

impl<E> From<SoapFault> for Error<E> {
    fn from(fault: SoapFault) -> Self {
        Error::Fault(Box::new(fault))
    }
}

/// Errors raised by [`UreqTransport`](crate::UreqTransport)
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network or HTTP communication error
    #[error("Network/HTTP error: {0}")]
    Network(String),

    /// The transport configuration was rejected
    #[error("Invalid transport configuration: {0}")]
    Configuration(String),
}
