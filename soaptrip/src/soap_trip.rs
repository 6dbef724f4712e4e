//! Transport decorator that turns SOAP Faults into errors

use crate::error::Error;
use crate::message::{Request, Response};
use crate::scanner::parse_fault;
use crate::transport::Transport;

/// Wraps a [`Transport`] and inspects every successful response for a SOAP
/// Fault.
///
/// A transport failure is returned as [`Error::Transport`] without touching
/// anything. A response carrying a fault becomes [`Error::Fault`], which
/// still owns the response. Any other response is returned with its body
/// replaced by a byte-identical replay.
///
/// The decorator keeps no per-call state, so one instance can serve many
/// threads as long as the wrapped transport can.
///
/// # Example
///
/// ```no_run
/// use soaptrip::{Request, SoapTrip, Transport, UreqTransport};
///
/// let transport = SoapTrip::new(UreqTransport::new());
/// let request = Request::soap(
///     "http://192.168.1.100:1400/MediaRenderer/AVTransport/Control",
///     "urn:schemas-upnp-org:service:AVTransport:1",
///     "Play",
///     "<InstanceID>0</InstanceID><Speed>1</Speed>",
/// );
///
/// match transport.execute(request) {
///     Ok(response) => println!("status {}", response.status()),
///     Err(err) => match err.as_fault() {
///         Some(fault) => eprintln!("fault {} ({})", fault.fault_code, fault.fault_string),
///         None => eprintln!("transport failed: {}", err),
///     },
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SoapTrip<T> {
    inner: T,
}

impl<T> SoapTrip<T> {
    pub fn new(inner: T) -> Self {
        Self { inner }
    }

    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Transport> Transport for SoapTrip<T> {
    type Error = Error<T::Error>;

    fn execute(&self, request: Request) -> Result<Response, Self::Error> {
        let response = self.inner.execute(request).map_err(Error::Transport)?;
        Ok(parse_fault(response)?)
    }
}
