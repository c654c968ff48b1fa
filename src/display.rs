//! Core display operations

use log::{debug, trace, warn};

use crate::command::{Command, FULL_FRAME_WINDOW, INIT_SEQUENCE, Opcode};
use crate::config::{CONTROL_COMMAND, CONTROL_DATA, Config, HEIGHT, WIDTH};
use crate::encoder::PageBuffer;
use crate::error::Error;
use crate::interface::Transport;
use crate::surface::{IntensityGrid, PixelSurface};

type DisplayResult<T> = core::result::Result<(), Error<T>>;

/// Controller lifecycle state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum State {
    /// No session has been opened, or initialization failed
    #[default]
    Uninitialized,
    /// Session open and initialization sequence sent
    Ready,
    /// Session released by [`Ssd1306::close`]
    Closed,
}

/// Core display driver for SSD1306
///
/// Owns the [`Transport`] and the session handle it opens. The handle is
/// opened by [`initialize`](Self::initialize) and released exactly once, by
/// [`close`](Self::close) or when the driver is dropped.
///
/// Updates are not atomic: if a write fails mid-frame the panel keeps the
/// bytes already sent.
pub struct Ssd1306<T>
where
    T: Transport,
{
    /// Bus transport
    transport: T,
    /// Open session, `None` until initialized and after close
    handle: Option<T::Handle>,
    /// Driver configuration
    config: Config,
    /// Lifecycle state
    state: State,
}

impl<T> Ssd1306<T>
where
    T: Transport,
{
    /// Panel width in pixels
    pub const WIDTH: u32 = WIDTH;
    /// Panel height in pixels
    pub const HEIGHT: u32 = HEIGHT;

    /// Create a new driver; no bus traffic until [`initialize`](Self::initialize)
    pub fn new(transport: T, config: Config) -> Self {
        debug!("creating new Ssd1306 instance at 0x{:02X}", config.address);
        Self {
            transport,
            handle: None,
            config,
            state: State::Uninitialized,
        }
    }

    /// Open the session and send the initialization sequence
    ///
    /// Safe to call again on a ready driver: the sequence is re-sent over the
    /// existing session and leaves the panel in the same state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Open`] if the session cannot be opened, or
    /// [`Error::Init`] wrapping the first failed write. In both cases the
    /// session is closed and [`update`](Self::update) is rejected until a
    /// later `initialize` succeeds.
    pub fn initialize(&mut self) -> DisplayResult<T> {
        if self.handle.is_none() {
            debug!("opening session at 0x{:02X}", self.config.address);
            let handle = self
                .transport
                .open(self.config.address)
                .map_err(Error::Open)?;
            self.handle = Some(handle);
        }

        for (step, command) in INIT_SEQUENCE.iter().enumerate() {
            debug!("init step {}: {:?}", step, command);
            if let Err(source) = self.send_command(command) {
                self.release_handle();
                self.state = State::Uninitialized;
                return Err(Error::Init { step, source });
            }
        }

        self.state = State::Ready;
        Ok(())
    }

    /// Blank surface sized to the panel, ready to draw on
    pub fn surface(&self) -> PixelSurface {
        PixelSurface::new()
    }

    /// Display a full frame
    ///
    /// Sets the address window to the whole panel, then writes all 1024
    /// bytes of the encoded surface.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotReady`] unless initialized, [`Error::Write`] if
    /// the address window cannot be set, or [`Error::Frame`] if a data write
    /// fails part way through the frame.
    pub fn update(&mut self, surface: &PixelSurface) -> DisplayResult<T> {
        self.ensure_ready()?;
        self.send_frame(&PageBuffer::encode(surface))
    }

    /// Display a full frame from an external grid
    ///
    /// # Errors
    ///
    /// As [`update`](Self::update), plus [`Error::InvalidSurface`] if the grid
    /// is not 128x64. Nothing is sent for a mismatched grid.
    pub fn update_from<G: IntensityGrid + ?Sized>(&mut self, grid: &G) -> DisplayResult<T> {
        self.ensure_ready()?;
        let frame = PageBuffer::try_encode(grid)?;
        self.send_frame(&frame)
    }

    /// Set panel contrast (0x00 = lowest, 0xFF = highest)
    pub fn set_contrast(&mut self, contrast: u8) -> DisplayResult<T> {
        self.ensure_ready()?;
        self.send_bytes(&[Opcode::SetContrast as u8, contrast])
    }

    /// Switch the panel on or off; display RAM is retained while off
    pub fn set_display_on(&mut self, on: bool) -> DisplayResult<T> {
        self.ensure_ready()?;
        let opcode = if on {
            Opcode::DisplayOn
        } else {
            Opcode::DisplayOff
        };
        self.send_bytes(&[opcode as u8])
    }

    /// Select inverted mode, where clear RAM bits light the pixel
    pub fn set_inverted(&mut self, inverted: bool) -> DisplayResult<T> {
        self.ensure_ready()?;
        let opcode = if inverted {
            Opcode::InvertDisplay
        } else {
            Opcode::NormalDisplay
        };
        self.send_bytes(&[opcode as u8])
    }

    /// Release the session
    ///
    /// Valid in any state and idempotent. Never fails: a transport error
    /// while closing is logged and dropped.
    pub fn close(&mut self) {
        if self.release_handle() {
            debug!("session closed");
        }
        self.state = State::Closed;
    }

    /// Current lifecycle state
    pub fn state(&self) -> State {
        self.state
    }

    /// Panel width in pixels
    pub fn width(&self) -> u32 {
        Self::WIDTH
    }

    /// Panel height in pixels
    pub fn height(&self) -> u32 {
        Self::HEIGHT
    }

    /// Access the underlying configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Access the underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn ensure_ready(&self) -> DisplayResult<T> {
        match self.state {
            State::Ready => Ok(()),
            state => Err(Error::NotReady(state)),
        }
    }

    fn send_frame(&mut self, frame: &PageBuffer) -> DisplayResult<T> {
        for command in &FULL_FRAME_WINDOW {
            self.send_command(command).map_err(Error::Write)?;
        }

        trace!("sending {} data bytes", frame.as_bytes().len());
        for (written, byte) in frame.as_bytes().iter().enumerate() {
            self.write(CONTROL_DATA, *byte)
                .map_err(|source| Error::Frame { written, source })?;
        }
        Ok(())
    }

    fn send_bytes(&mut self, bytes: &[u8]) -> DisplayResult<T> {
        for byte in bytes {
            self.write(CONTROL_COMMAND, *byte).map_err(Error::Write)?;
        }
        Ok(())
    }

    /// Send an opcode and its parameters as command writes
    fn send_command(&mut self, command: &Command) -> Result<(), T::Error> {
        for byte in command.bytes() {
            self.write(CONTROL_COMMAND, byte)?;
        }
        Ok(())
    }

    fn write(&mut self, control: u8, data: u8) -> Result<(), T::Error> {
        match self.handle.as_mut() {
            Some(handle) => self.transport.write_register(handle, control, data),
            // ensure_ready / initialize guarantee an open handle
            None => Ok(()),
        }
    }

    /// Close the handle if open; returns whether one was open
    fn release_handle(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                if let Err(e) = self.transport.close(handle) {
                    warn!("failed to close session: {:?}", e);
                }
                true
            }
            None => false,
        }
    }
}

impl<T> Drop for Ssd1306<T>
where
    T: Transport,
{
    fn drop(&mut self) {
        self.close();
    }
}
