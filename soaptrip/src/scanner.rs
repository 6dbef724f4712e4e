//! Streaming SOAP Fault detection with body replay.
//!
//! The scanner pulls the body through a `quick-xml` reader while a tee
//! keeps a copy of every byte taken from the source. Whatever the reader
//! did not consume stays in the source, so the replay stream is simply
//! "copied bytes, then the rest of the source".
//!
//! Matching is deliberately loose: any element whose local name is
//! `faultcode` or `faultstring` (ASCII case-insensitive, prefix ignored)
//! counts, at any depth and in any namespace. Tokenizer errors end the
//! scan quietly; a body that cannot be parsed is reported as fault-free.

use std::io::{self, BufReader, Chain, Cursor, Read};
use std::ops::ControlFlow;

use quick_xml::events::Event;
use quick_xml::encoding::Decoder;
use quick_xml::Reader;

use crate::error::SoapFault;
use crate::message::{Body, Response};

/// Local name of the element carrying the fault code
pub const FAULT_CODE: &str = "faultcode";

/// Local name of the element carrying the fault description
pub const FAULT_STRING: &str = "faultstring";

/// The two fields extracted from a SOAP Fault
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fault {
    pub fault_code: String,
    pub fault_string: String,
}

impl Fault {
    /// Attach the response the fault was found in
    pub fn into_soap_fault(self, response: Response) -> SoapFault {
        SoapFault {
            fault_code: self.fault_code,
            fault_string: self.fault_string,
            response,
        }
    }
}

/// Byte-identical replacement for a scanned stream.
///
/// Yields the bytes copied during the scan followed by whatever the scan
/// left unread. Owns the original source and drops it exactly once.
#[derive(Debug)]
pub struct Replay<R> {
    inner: Chain<Cursor<Vec<u8>>, R>,
}

impl<R: Read> Replay<R> {
    fn new(copied: Vec<u8>, rest: R) -> Self {
        Self {
            inner: Cursor::new(copied).chain(rest),
        }
    }
}

impl<R> Replay<R> {
    /// Number of bytes the scan pulled from the source
    pub fn buffered_len(&self) -> usize {
        self.inner.get_ref().0.get_ref().len()
    }

    /// The original source, positioned after the buffered bytes
    pub fn get_ref(&self) -> &R {
        self.inner.get_ref().1
    }
}

impl<R: Read> Read for Replay<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

/// Reader that keeps a copy of everything read through it
struct Tee<R> {
    source: R,
    copied: Vec<u8>,
}

impl<R: Read> Read for Tee<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.source.read(buf)?;
        self.copied.extend_from_slice(&buf[..n]);
        Ok(n)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Code,
    String,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Option<Self> {
        if name.eq_ignore_ascii_case(FAULT_CODE.as_bytes()) {
            Some(Field::Code)
        } else if name.eq_ignore_ascii_case(FAULT_STRING.as_bytes()) {
            Some(Field::String)
        } else {
            None
        }
    }
}

#[derive(Debug, Default)]
struct Capture {
    text: Option<String>,
    sealed: bool,
}

impl Capture {
    fn push(&mut self, text: &str) {
        if !self.sealed && !text.is_empty() {
            self.text.get_or_insert_with(String::new).push_str(text);
        }
    }

    // First complete value wins; later elements of the same name are ignored.
    fn seal(&mut self) {
        if self.text.is_some() {
            self.sealed = true;
        }
    }
}

#[derive(Debug, Default)]
struct ScanState {
    depth: usize,
    // Fault field element currently open, with the depth it opened at
    open: Option<(Field, usize)>,
    code: Capture,
    string: Capture,
}

impl ScanState {
    fn capture(&mut self, field: Field) -> &mut Capture {
        match field {
            Field::Code => &mut self.code,
            Field::String => &mut self.string,
        }
    }

    // Only text sitting directly inside the field element counts.
    fn push_text(&mut self, text: &str) {
        if let Some((field, depth)) = self.open {
            if depth == self.depth {
                self.capture(field).push(text);
            }
        }
    }

    // A child element ends the field's leading text run.
    fn interrupt(&mut self) {
        if let Some((field, _)) = self.open {
            self.capture(field).seal();
        }
    }

    fn wants_text(&self) -> bool {
        matches!(self.open, Some((_, depth)) if depth == self.depth)
    }

    fn on_event(&mut self, event: Event<'_>, decoder: Decoder) -> ControlFlow<()> {
        match event {
            Event::Start(e) => {
                self.interrupt();
                self.depth += 1;
                if self.open.is_none() {
                    self.open = Field::from_local_name(e.local_name().as_ref())
                        .map(|field| (field, self.depth));
                }
            }
            Event::Empty(_) => {
                self.interrupt();
            }
            Event::End(_) => {
                if let Some((field, depth)) = self.open {
                    if depth == self.depth {
                        self.capture(field).seal();
                        self.open = None;
                    }
                }
                self.depth = self.depth.saturating_sub(1);
            }
            Event::Text(e) => {
                if self.wants_text() {
                    match e.unescape() {
                        Ok(text) => self.push_text(&text),
                        Err(err) => {
                            tracing::trace!(error = %err, depth = self.depth, "Undecodable text, ending fault scan");
                            return ControlFlow::Break(());
                        }
                    }
                }
            }
            Event::CData(e) => {
                if self.wants_text() {
                    match decoder.decode(&e) {
                        Ok(text) => self.push_text(&text),
                        Err(err) => {
                            tracing::trace!(error = %err, depth = self.depth, "Undecodable CDATA, ending fault scan");
                            return ControlFlow::Break(());
                        }
                    }
                }
            }
            Event::Eof => return ControlFlow::Break(()),
            _ => {}
        }

        if self.code.sealed && self.string.sealed {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    }

    fn into_fault(self) -> Option<Fault> {
        match (self.code.text, self.string.text) {
            (Some(fault_code), Some(fault_string)) => Some(Fault {
                fault_code,
                fault_string,
            }),
            _ => None,
        }
    }
}

/// Scan a body stream for a SOAP Fault.
///
/// Returns the fault when both `faultcode` and `faultstring` carried text,
/// and a replay stream that reads back exactly the bytes of `source`.
/// Malformed, truncated or unreadable input never fails the scan.
pub fn scan<R: Read>(source: R) -> (Option<Fault>, Replay<R>) {
    let tee = Tee {
        source,
        copied: Vec::new(),
    };
    let mut reader = Reader::from_reader(BufReader::new(tee));
    let mut state = ScanState::default();
    let mut buf = Vec::new();

    loop {
        let flow = match reader.read_event_into(&mut buf) {
            Ok(event) => state.on_event(event, reader.decoder()),
            Err(err) => {
                tracing::trace!(
                    error = %err,
                    position = reader.buffer_position(),
                    depth = state.depth,
                    "XML error, ending fault scan"
                );
                ControlFlow::Break(())
            }
        };
        if flow.is_break() {
            break;
        }
        buf.clear();
    }

    let Tee { source, copied } = reader.into_inner().into_inner();
    (state.into_fault(), Replay::new(copied, source))
}

/// Inspect a response body for a SOAP Fault.
///
/// The response body is replaced by a replay of the original bytes in
/// both outcomes. On a fault the response travels inside the returned
/// [`SoapFault`].
pub fn parse_fault(mut response: Response) -> Result<Response, SoapFault> {
    let body = response.replace_body(Body::empty());
    let (fault, replay) = scan(body);
    response.replace_body(Body::new(replay));

    match fault {
        Some(fault) => {
            tracing::debug!(
                status = response.status(),
                fault_code = %fault.fault_code,
                "SOAP fault found in response body"
            );
            Err(fault.into_soap_fault(response))
        }
        None => Ok(response),
    }
}
