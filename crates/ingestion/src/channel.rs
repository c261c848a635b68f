//! LineChannel - newline-framed text over a serial device or any byte stream.

use std::io::{self, Read};
use std::thread;
use std::time::Duration;

use contracts::{BaudRate, CancelToken, ChannelParams, ContractError, LineSource};
use tracing::{debug, info, instrument, trace, warn};

const READ_CHUNK: usize = 256;

/// Longest accepted frame, terminator excluded
const MAX_FRAME_LEN: usize = 4096;

struct Transport {
    name: String,
    reader: Box<dyn Read + Send>,
    /// Driver already waits `poll_interval` before reporting a timeout
    blocks_on_timeout: bool,
}

/// Line-oriented reader with a Closed/Open state machine
///
/// Lines end at `\n` or `\r`, so `\r\n` framing from microcontrollers yields a
/// single line. Empty lines never reach the caller. A frame longer than
/// 4 KiB is dropped up to its terminator.
///
/// End of stream moves the channel back to Closed.
pub struct LineChannel {
    transport: Option<Transport>,
    pending: Vec<u8>,
    /// Prefix of `pending` already searched for a terminator
    scanned: usize,
    /// Inside an oversized frame, dropping bytes until the next terminator
    discarding: bool,
    poll_interval: Duration,
}

impl LineChannel {
    /// Create a closed channel
    pub fn new() -> Self {
        Self {
            transport: None,
            pending: Vec::new(),
            scanned: 0,
            discarding: false,
            poll_interval: ChannelParams::default().poll_interval,
        }
    }

    /// Sleep between empty polls on non-blocking transports
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Open a serial device (8N1, no flow control)
    ///
    /// An already open stream is closed first. On failure the channel stays Closed.
    #[instrument(
        name = "channel_open",
        skip(self, params),
        fields(baud = params.baud_rate.as_u32())
    )]
    pub fn open(&mut self, address: &str, params: &ChannelParams) -> Result<(), ContractError> {
        self.close();

        let reader = open_device(address, params)?;
        self.poll_interval = params.poll_interval;
        self.install(address, Box::new(reader), true);
        Ok(())
    }

    /// Open the channel over an arbitrary byte stream
    pub fn attach<R>(&mut self, name: impl Into<String>, reader: R)
    where
        R: Read + Send + 'static,
    {
        self.close();
        self.install(name, Box::new(reader), false);
    }

    fn install(
        &mut self,
        name: impl Into<String>,
        reader: Box<dyn Read + Send>,
        blocks_on_timeout: bool,
    ) {
        let name = name.into();
        info!(channel = %name, "channel opened");
        self.transport = Some(Transport {
            name,
            reader,
            blocks_on_timeout,
        });
    }

    /// Block until a complete line is available
    ///
    /// Returns `Ok(None)` at end of stream, on cancellation, or when Closed.
    /// A trailing unterminated fragment is returned before end of stream closes
    /// the channel.
    pub fn read_line(&mut self, cancel: &CancelToken) -> Result<Option<String>, ContractError> {
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            if cancel.is_cancelled() {
                debug!("line read cancelled");
                return Ok(None);
            }

            if let Some(line) = self.take_line() {
                trace!(line = %line, "line framed");
                return Ok(Some(line));
            }

            let (result, blocks_on_timeout) = match self.transport.as_mut() {
                Some(t) => (t.reader.read(&mut chunk), t.blocks_on_timeout),
                None => return Ok(None),
            };

            match result {
                Ok(0) => {
                    debug!("end of stream");
                    let partial = self.take_partial();
                    self.close();
                    return Ok(partial);
                }
                Ok(n) => self.pending.extend_from_slice(&chunk[..n]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) if is_empty_poll(e.kind()) => {
                    if !blocks_on_timeout {
                        thread::sleep(self.poll_interval);
                    }
                }
                Err(e) => {
                    warn!(error = %e, "channel read failed");
                    return Err(ContractError::Io(e));
                }
            }
        }
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_some()
    }

    /// Name or device path of the open stream
    pub fn address(&self) -> Option<&str> {
        self.transport.as_ref().map(|t| t.name.as_str())
    }

    /// Release the stream; no-op when already Closed
    pub fn close(&mut self) {
        if let Some(transport) = self.transport.take() {
            info!(channel = %transport.name, "channel closed");
        }
        self.pending.clear();
        self.scanned = 0;
        self.discarding = false;
    }

    /// Next complete frame, searching only bytes not seen before
    fn take_line(&mut self) -> Option<String> {
        loop {
            let Some(offset) = self.pending[self.scanned..].iter().position(is_terminator) else {
                self.scanned = self.pending.len();
                if self.pending.len() > MAX_FRAME_LEN {
                    self.overflow();
                }
                return None;
            };

            let end = self.scanned + offset;
            let frame: Vec<u8> = self.pending.drain(..=end).collect();
            self.scanned = 0;

            if std::mem::take(&mut self.discarding) {
                continue;
            }
            if end > MAX_FRAME_LEN {
                warn_oversized();
                continue;
            }
            if end > 0 {
                return Some(String::from_utf8_lossy(&frame[..end]).into_owned());
            }
        }
    }

    fn take_partial(&mut self) -> Option<String> {
        let frame = std::mem::take(&mut self.pending);
        self.scanned = 0;
        if frame.is_empty() || std::mem::take(&mut self.discarding) {
            return None;
        }
        Some(String::from_utf8_lossy(&frame).into_owned())
    }

    /// Drop the oversized frame collected so far, warning once per frame
    fn overflow(&mut self) {
        if !self.discarding {
            warn_oversized();
            self.discarding = true;
        }
        self.pending.clear();
        self.scanned = 0;
    }
}

fn warn_oversized() {
    warn!(
        limit = MAX_FRAME_LEN,
        "frame exceeds length limit, discarding until next terminator"
    );
}

fn is_terminator(byte: &u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

fn is_empty_poll(kind: io::ErrorKind) -> bool {
    matches!(kind, io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock)
}

impl Default for LineChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LineChannel {
    fn drop(&mut self) {
        self.close();
    }
}

impl LineSource for LineChannel {
    fn read_line(&mut self, cancel: &CancelToken) -> Result<Option<String>, ContractError> {
        LineChannel::read_line(self, cancel)
    }

    fn is_open(&self) -> bool {
        LineChannel::is_open(self)
    }

    fn close(&mut self) {
        LineChannel::close(self)
    }
}

/// Map a requested rate onto the supported set, warning on fallback
pub fn select_baud_rate(requested: u32) -> BaudRate {
    match BaudRate::try_from_u32(requested) {
        Some(rate) => rate,
        None => {
            let fallback = BaudRate::default();
            warn!(requested, fallback = fallback.as_u32(), "unsupported baud rate");
            fallback
        }
    }
}

#[cfg(feature = "serial")]
fn open_device(
    address: &str,
    params: &ChannelParams,
) -> Result<crate::serial::SerialTransport, ContractError> {
    crate::serial::SerialTransport::open(address, params)
}

#[cfg(not(feature = "serial"))]
fn open_device(address: &str, _params: &ChannelParams) -> Result<io::Empty, ContractError> {
    Err(ContractError::connection(
        address,
        contracts::ConnectionFailure::Other,
        "built without serial support",
    ))
}
