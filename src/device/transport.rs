use crate::device::command::{Command, Quirk};
use crate::foundation::error::LumyteResult;

/// Capability to issue tagged, optionally chunked writes to the hardware.
///
/// Implementations wrap whatever carries the bytes (a HID feature-report
/// handle in production, a recording stub in tests). The encoder never
/// retries: a rejected or truncated write surfaces here unchanged and the
/// caller decides what dies with it.
pub trait Transport: Send {
    /// Issue one write transaction.
    ///
    /// `transaction_id` overrides the transport's default tag when a device
    /// revision demands it. `remaining_packets` tells the transport how many
    /// further transactions complete the current chunked frame; 0 marks the
    /// last (or only) chunk.
    fn run_command(
        &mut self,
        command: Command,
        args: &[u8],
        transaction_id: Option<u8>,
        remaining_packets: usize,
    ) -> LumyteResult<()>;

    /// Query a device-specific protocol deviation.
    fn has_quirk(&self, quirk: Quirk) -> bool;
}
