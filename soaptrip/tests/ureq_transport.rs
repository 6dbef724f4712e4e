//! HTTP-level tests of `UreqTransport` wrapped in `SoapTrip`

use std::time::Duration;

use mockito::{Matcher, Server};
use soaptrip::{Request, SoapTrip, Transport, TransportConfig, TransportError, UreqTransport};

const SERVICE_URI: &str = "urn:schemas-upnp-org:service:RenderingControl:1";

const UPNP_FAULT: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <s:Fault>
            <faultcode>s:Client</faultcode>
            <faultstring>UPnPError</faultstring>
            <detail>
                <UPnPError xmlns="urn:schemas-upnp-org:control-1-0">
                    <errorCode>402</errorCode>
                </UPnPError>
            </detail>
        </s:Fault>
    </s:Body>
</s:Envelope>"#;

const VOLUME_RESPONSE: &str = r#"<s:Envelope xmlns:s="http://schemas.xmlsoap.org/soap/envelope/">
    <s:Body>
        <u:GetVolumeResponse xmlns:u="urn:schemas-upnp-org:service:RenderingControl:1">
            <CurrentVolume>25</CurrentVolume>
        </u:GetVolumeResponse>
    </s:Body>
</s:Envelope>"#;

fn get_volume(url: String) -> Request {
    Request::soap(
        url,
        SERVICE_URI,
        "GetVolume",
        "<InstanceID>0</InstanceID><Channel>Master</Channel>",
    )
}

#[test]
fn test_fault_with_error_status_is_detected() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/MediaRenderer/RenderingControl/Control")
        .match_header(
            "soapaction",
            "\"urn:schemas-upnp-org:service:RenderingControl:1#GetVolume\"",
        )
        .match_body(Matcher::Regex("<u:GetVolume xmlns:u=".to_string()))
        .with_status(500)
        .with_header("content-type", "text/xml; charset=\"utf-8\"")
        .with_body(UPNP_FAULT)
        .create();

    let transport = SoapTrip::new(UreqTransport::new());
    let url = format!("{}/MediaRenderer/RenderingControl/Control", server.url());
    let err = transport.execute(get_volume(url)).unwrap_err();

    mock.assert();
    assert_eq!(err.to_string(), "FaultCode: 's:Client' FaultString: 'UPnPError'");

    let fault = err.into_fault().expect("Expected a SOAP fault");
    assert_eq!(fault.response().status(), 500);
    assert!(fault
        .response()
        .header("Content-Type")
        .unwrap()
        .starts_with("text/xml"));
    assert_eq!(fault.into_response().into_string().unwrap(), UPNP_FAULT);
}

#[test]
fn test_success_body_is_readable() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/MediaRenderer/RenderingControl/Control")
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(VOLUME_RESPONSE)
        .create();

    let config = TransportConfig {
        read_timeout: Duration::from_secs(5),
        ..Default::default()
    };
    let transport = SoapTrip::new(UreqTransport::with_config(config).unwrap());
    let url = format!("{}/MediaRenderer/RenderingControl/Control", server.url());
    let response = transport
        .execute(get_volume(url).timeout(Duration::from_secs(5)))
        .unwrap();

    mock.assert();
    assert_eq!(response.status(), 200);
    assert_eq!(response.into_string().unwrap(), VOLUME_RESPONSE);
}

#[test]
fn test_get_without_body() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/status")
        .with_status(404)
        .with_body("not found")
        .create();

    let transport = SoapTrip::new(UreqTransport::new());
    let response = transport
        .execute(Request::get(format!("{}/status", server.url())))
        .unwrap();

    mock.assert();
    assert_eq!(response.status(), 404);
    assert_eq!(response.into_string().unwrap(), "not found");
}

#[test]
fn test_connection_failure_passes_through() {
    let config = TransportConfig {
        connect_timeout: Duration::from_secs(1),
        ..Default::default()
    };
    let transport = SoapTrip::new(UreqTransport::with_config(config).unwrap());

    let err = transport
        .execute(get_volume("http://127.0.0.1:1/Control".to_string()))
        .unwrap_err();

    assert!(!err.is_fault());
    match err.into_transport() {
        Some(TransportError::Network(_)) => {}
        other => panic!("Expected TransportError::Network, got {:?}", other),
    }
}
