//! SOAP Fault detection for HTTP transports
//!
//! SOAP services frequently report application errors inside the response
//! envelope rather than through the HTTP status. This crate provides
//! [`SoapTrip`], a decorator over any [`Transport`] that scans each
//! response body for a `Fault` and returns it as an error, while leaving
//! the body fully readable afterward.
//!
//! There is no process-wide default instance. Wire the decorator around
//! whichever transport the application uses:
//!
//! ```no_run
//! use soaptrip::{Request, SoapTrip, Transport, UreqTransport};
//!
//! let transport = SoapTrip::new(UreqTransport::new());
//! let response = transport.execute(Request::get("http://192.168.1.100:1400/status"));
//! ```
//!
//! For inspecting a response obtained some other way, use [`parse_fault`]
//! directly, or [`scan`] for a bare byte stream.

mod config;
mod error;
mod message;
mod scanner;
mod soap_trip;
mod transport;
mod ureq_transport;

pub use config::TransportConfig;
pub use error::{Error, SoapFault, TransportError};
pub use message::{Body, Request, Response};
pub use scanner::{parse_fault, scan, Fault, Replay, FAULT_CODE, FAULT_STRING};
pub use soap_trip::SoapTrip;
pub use transport::Transport;
pub use ureq_transport::UreqTransport;
