use crate::device::command::{
    ALT_TRANSACTION_ID, Command, DEFAULT_FRAME_ID, MAX_COLUMNS, Quirk,
};
use crate::device::transport::Transport;
use crate::foundation::error::{LumyteError, LumyteResult};
use crate::frame::buffer::FrameBuffer;

/// Serializes framebuffers into chunked hardware write transactions.
///
/// Two encodings exist, selected by device height: single-row devices get
/// one transaction for their sole row; matrix devices get one transaction
/// per row with a remaining-packets countdown so the transport can treat
/// the whole frame as a single chunked write and detect truncation.
///
/// Serialization borrows the framebuffer for its whole duration, so a
/// frame cannot be mutated while it is on the wire.
pub struct FrameLink {
    transport: Box<dyn Transport>,
    width: usize,
    height: usize,
}

impl FrameLink {
    /// Bind an encoder to a device of the given dimensions.
    pub fn new(transport: Box<dyn Transport>, width: usize, height: usize) -> LumyteResult<Self> {
        if width == 0 || height == 0 {
            return Err(LumyteError::config("device dimensions must be non-zero"));
        }
        Ok(Self {
            transport,
            width,
            height,
        })
    }

    /// Device width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Device height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Transmit the frame's pixel data without displaying it.
    ///
    /// Pair with [`FrameLink::commit`] to flip the frame onto the display,
    /// or use [`FrameLink::update`] for both at once.
    pub fn prepare(&mut self, frame: &FrameBuffer, frame_id: Option<u8>) -> LumyteResult<()> {
        if frame.width() != self.width || frame.height() != self.height {
            return Err(LumyteError::render(format!(
                "frame is {}x{} but device is {}x{}",
                frame.width(),
                frame.height(),
                self.width,
                self.height,
            )));
        }

        let flat = frame.flatten();
        let frame_id = frame_id.unwrap_or(DEFAULT_FRAME_ID);

        if self.height == 1 {
            self.send_single(&flat)
        } else {
            self.send_matrix(&flat, frame_id)
        }
    }

    /// Flip the last prepared frame onto the display.
    pub fn commit(&mut self) -> LumyteResult<()> {
        self.transport.run_command(Command::ShowFrame, &[], None, 0)
    }

    /// Transmit and display in one step: [`FrameLink::prepare`] then
    /// [`FrameLink::commit`].
    pub fn update(&mut self, frame: &FrameBuffer, frame_id: Option<u8>) -> LumyteResult<()> {
        self.prepare(frame, frame_id)?;
        self.commit()
    }

    fn col_count(&self) -> usize {
        self.width.min(MAX_COLUMNS)
    }

    fn send_single(&mut self, flat: &[u8]) -> LumyteResult<()> {
        let cols = self.col_count();
        let mut args = Vec::with_capacity(2 + cols * 4);
        args.push(0);
        args.push(cols as u8);
        args.extend_from_slice(&flat[..cols * 4]);

        self.transport.run_command(
            Command::SetFrameDataSingle,
            &args,
            Some(ALT_TRANSACTION_ID),
            0,
        )
    }

    fn send_matrix(&mut self, flat: &[u8], frame_id: u8) -> LumyteResult<()> {
        let cols = self.col_count();
        let tid = self
            .transport
            .has_quirk(Quirk::CustomFrame80)
            .then_some(ALT_TRANSACTION_ID);

        for row in 0..self.height {
            let start = row * self.width * 4;
            let mut args = Vec::with_capacity(4 + cols * 4);
            args.push(frame_id);
            args.push(row as u8);
            args.push(0);
            args.push(cols as u8);
            args.extend_from_slice(&flat[start..start + cols * 4]);

            let remaining = self.height - row - 1;
            self.transport
                .run_command(Command::SetFrameDataMatrix, &args, tid, remaining)?;
        }

        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/device/encode.rs"]
mod tests;
