/// Raw hardware command selectors, a 2-byte command class/id pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Upload one row of a multi-row frame.
    SetFrameDataMatrix,
    /// Upload the sole row of a single-row device.
    SetFrameDataSingle,
    /// Flip the last uploaded frame onto the display.
    ShowFrame,
}

impl Command {
    /// Command class byte.
    pub fn class(self) -> u8 {
        0x03
    }

    /// Command id byte.
    pub fn id(self) -> u8 {
        match self {
            Command::SetFrameDataMatrix => 0x0B,
            Command::SetFrameDataSingle => 0x0C,
            Command::ShowFrame => 0x0A,
        }
    }
}

/// Device-specific protocol deviations, queried via the transport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quirk {
    /// Matrix frame uploads require the 0x80 transaction tag.
    CustomFrame80,
}

/// Frame id used when the caller does not supply one.
pub const DEFAULT_FRAME_ID: u8 = 0xFF;

/// Hard cap on pixels per transaction, regardless of device width.
pub const MAX_COLUMNS: usize = 24;

/// Alternate transaction tag selected by [`Quirk::CustomFrame80`] and
/// always used by single-row devices.
pub const ALT_TRANSACTION_ID: u8 = 0x80;
