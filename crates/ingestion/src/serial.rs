//! Serial device transport for `LineChannel`.

use std::io::{self, Read};
use std::thread;

use contracts::{ChannelParams, ConnectionFailure, ContractError};
use serialport::{ClearBuffer, DataBits, FlowControl, Parity, SerialPort, StopBits};
use tracing::{debug, warn};

/// Opened serial port, read in `poll_interval` timeouts
pub(crate) struct SerialTransport {
    port: Box<dyn SerialPort>,
}

impl SerialTransport {
    pub(crate) fn open(address: &str, params: &ChannelParams) -> Result<Self, ContractError> {
        let port = serialport::new(address, params.baud_rate.as_u32())
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(params.poll_interval)
            .open()
            .map_err(|e| connection_error(address, e))?;

        if let Err(e) = port.clear(ClearBuffer::All) {
            warn!(address, error = %e, "failed to flush serial buffers");
        }

        debug!(
            address,
            settle_ms = params.settle_delay.as_millis() as u64,
            "waiting for device to settle"
        );
        thread::sleep(params.settle_delay);

        Ok(Self { port })
    }
}

impl Read for SerialTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.port.read(buf)
    }
}

fn connection_error(address: &str, err: serialport::Error) -> ContractError {
    let reason = match err.kind() {
        serialport::ErrorKind::NoDevice | serialport::ErrorKind::Io(io::ErrorKind::NotFound) => {
            ConnectionFailure::NotFound
        }
        serialport::ErrorKind::Io(io::ErrorKind::PermissionDenied) => {
            ConnectionFailure::PermissionDenied
        }
        _ => ConnectionFailure::Other,
    };

    warn!(address, reason = %reason, error = %err.description, "serial open failed");
    ContractError::connection(address, reason, err.description)
}
