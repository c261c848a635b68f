//! LineSource trait - Line-delivery stream abstraction
//!
//! Decouples the ingestion pipeline from the concrete transport (serial device,
//! file, socket, in-memory feed).

use crate::{CancelToken, ContractError};

/// Line-delivery stream
///
/// Implementations guarantee line framing: every returned line was terminated by
/// `\n` or `\r` on the wire (or was the trailing fragment at end of stream), has the
/// terminator stripped, and is never empty.
///
/// # Example
///
/// ```ignore
/// let cancel = CancelToken::new();
/// while let Some(line) = source.read_line(&cancel)? {
///     println!("received: {line}");
/// }
/// source.close();
/// ```
pub trait LineSource {
    /// Read one terminated line, blocking until one is available
    ///
    /// Returns `Ok(None)` at end of stream, when `cancel` fires, or when the source
    /// is closed. Transport failures are returned as errors.
    fn read_line(&mut self, cancel: &CancelToken) -> Result<Option<String>, ContractError>;

    /// Check if the source is currently open
    fn is_open(&self) -> bool;

    /// Close the source
    ///
    /// Must be idempotent.
    fn close(&mut self);
}
