//! Send a SOAP action through `SoapTrip<UreqTransport>` and report faults
//!
//! ```text
//! RUST_LOG=soaptrip=debug cargo run --example soap_call -- \
//!     --url http://192.168.1.100:1400/MediaRenderer/RenderingControl/Control \
//!     --service urn:schemas-upnp-org:service:RenderingControl:1 \
//!     --action GetVolume \
//!     --payload "<InstanceID>0</InstanceID><Channel>Master</Channel>"
//! ```

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use soaptrip::{Error, Request, SoapTrip, Transport, TransportConfig, UreqTransport};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(about = "Call a SOAP action and surface SOAP faults")]
struct Args {
    /// Control URL of the service
    #[arg(long)]
    url: String,

    /// Service type URI
    #[arg(long)]
    service: String,

    /// Action name
    #[arg(long)]
    action: String,

    /// Inner XML of the action element
    #[arg(long, default_value = "")]
    payload: String,

    /// Overall request timeout in seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let inner = match UreqTransport::with_config(TransportConfig::local_network()) {
        Ok(transport) => transport,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    let transport = SoapTrip::new(inner);

    let request = Request::soap(&args.url, &args.service, &args.action, &args.payload)
        .timeout(Duration::from_secs(args.timeout));

    match transport.execute(request) {
        Ok(response) => {
            println!("HTTP {}", response.status());
            match response.into_string() {
                Ok(body) => println!("{}", body),
                Err(e) => eprintln!("Failed to read body: {}", e),
            }
            ExitCode::SUCCESS
        }
        Err(Error::Fault(fault)) => {
            eprintln!("SOAP fault (HTTP {}): {}", fault.response().status(), fault);
            ExitCode::FAILURE
        }
        Err(Error::Transport(e)) => {
            eprintln!("Request failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
