//! SSD1306 command definitions
//!
//! This module defines the opcode catalogue of the SSD1306 controller and the
//! ordered command tables the driver sends. Commands travel over I2C one byte
//! per register write, each prefixed by the command control byte (`0x00`).
//! Parameter bytes are sent the same way, as further command writes.
//!
//! ## Command Structure
//!
//! A [`Command`] is one [`Opcode`] followed by zero or more parameter bytes:
//! 1. Write `[0x00, opcode]`
//! 2. Write `[0x00, param]` for every parameter, in order
//!
//! ## Example
//!
//! ```
//! use ssd1306_panel::command::{INIT_SEQUENCE, Opcode};
//!
//! // The panel stays dark until the very last command
//! let first = INIT_SEQUENCE.first().map(|cmd| cmd.opcode);
//! let last = INIT_SEQUENCE.last().map(|cmd| cmd.opcode);
//! assert_eq!(first, Some(Opcode::DisplayOff));
//! assert_eq!(last, Some(Opcode::DisplayOn));
//! ```

/// SSD1306 opcodes
///
/// Opcodes that carry their argument in the low bits (start line, segment
/// remap) are listed with the argument already folded in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    // Fundamental commands
    /// Set contrast control (0x81), 1 parameter: contrast 0x00..=0xFF
    SetContrast = 0x81,
    /// Resume display from RAM content (0xA4)
    DisplayAllOnResume = 0xA4,
    /// Light every pixel regardless of RAM (0xA5)
    DisplayAllOn = 0xA5,
    /// Normal display, RAM bit 1 lights the pixel (0xA6)
    NormalDisplay = 0xA6,
    /// Inverted display, RAM bit 0 lights the pixel (0xA7)
    InvertDisplay = 0xA7,
    /// Display off, sleep mode (0xAE)
    DisplayOff = 0xAE,
    /// Display on (0xAF)
    DisplayOn = 0xAF,

    // Scrolling commands
    /// Continuous right horizontal scroll setup (0x26)
    RightHorizontalScroll = 0x26,
    /// Continuous left horizontal scroll setup (0x27)
    LeftHorizontalScroll = 0x27,
    /// Continuous vertical and right horizontal scroll setup (0x29)
    VerticalRightHorizontalScroll = 0x29,
    /// Continuous vertical and left horizontal scroll setup (0x2A)
    VerticalLeftHorizontalScroll = 0x2A,
    /// Deactivate scroll (0x2E)
    ///
    /// RAM must be rewritten after scrolling was active.
    DeactivateScroll = 0x2E,
    /// Activate scroll (0x2F)
    ActivateScroll = 0x2F,
    /// Set vertical scroll area (0xA3)
    SetVerticalScrollArea = 0xA3,

    // Addressing commands
    /// Set memory addressing mode (0x20), 1 parameter:
    /// 0x00 = horizontal, 0x01 = vertical, 0x02 = page
    MemoryMode = 0x20,
    /// Set column address window (0x21), 2 parameters: start, end
    ColumnAddress = 0x21,
    /// Set page address window (0x22), 2 parameters: start, end
    PageAddress = 0x22,

    // Hardware configuration commands
    /// Set display start line 0 (0x40 | line)
    SetStartLine = 0x40,
    /// Segment remap, column 127 mapped to SEG0 (0xA0 | 1)
    SegmentRemap = 0xA1,
    /// Set multiplex ratio (0xA8), 1 parameter: mux - 1
    SetMultiplex = 0xA8,
    /// COM output scan from COM0 up (0xC0)
    ComScanInc = 0xC0,
    /// COM output scan from COM[N-1] down (0xC8)
    ComScanDec = 0xC8,
    /// Set display offset (0xD3), 1 parameter: vertical shift
    SetDisplayOffset = 0xD3,
    /// Set COM pins hardware configuration (0xDA), 1 parameter
    SetComPins = 0xDA,

    // Timing and driving scheme commands
    /// Set display clock divide ratio / oscillator frequency (0xD5), 1 parameter
    SetDisplayClockDiv = 0xD5,
    /// Set pre-charge period (0xD9), 1 parameter
    SetPrecharge = 0xD9,
    /// Set VCOMH deselect level (0xDB), 1 parameter
    SetVcomDetect = 0xDB,
    /// No operation (0xE3)
    Nop = 0xE3,

    // Charge pump
    /// Charge pump setting (0x8D), 1 parameter: 0x14 = enable, 0x10 = disable
    ChargePump = 0x8D,
}

impl From<Opcode> for u8 {
    fn from(opcode: Opcode) -> Self {
        opcode as u8
    }
}

/// One controller command: an opcode and its parameter bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Command {
    /// Command opcode
    pub opcode: Opcode,
    /// Parameter bytes sent after the opcode
    pub params: &'static [u8],
}

impl Command {
    /// Command without parameters
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode,
            params: &[],
        }
    }

    /// Command followed by parameter bytes
    pub const fn with_params(opcode: Opcode, params: &'static [u8]) -> Self {
        Self { opcode, params }
    }

    /// Bytes in send order: the opcode, then each parameter
    pub fn bytes(&self) -> impl Iterator<Item = u8> + '_ {
        core::iter::once(self.opcode as u8).chain(self.params.iter().copied())
    }

    /// Number of register writes this command takes
    pub fn write_count(&self) -> usize {
        1 + self.params.len()
    }
}

/// Initialization sequence for a 128x64 panel on the internal charge pump
///
/// Sent in order on every initialization. Each entry assumes the state left by
/// the ones before it: the charge pump is enabled before the panel is switched
/// on, and RAM display resumes before the final display-on.
pub const INIT_SEQUENCE: &[Command] = &[
    Command::new(Opcode::DisplayOff),
    // Suggested ratio, reset oscillator frequency
    Command::with_params(Opcode::SetDisplayClockDiv, &[0x80]),
    // 64 MUX
    Command::with_params(Opcode::SetMultiplex, &[0x3F]),
    Command::with_params(Opcode::SetDisplayOffset, &[0x00]),
    Command::new(Opcode::SetStartLine),
    Command::with_params(Opcode::ChargePump, &[0x14]),
    // Horizontal addressing
    Command::with_params(Opcode::MemoryMode, &[0x00]),
    Command::new(Opcode::SegmentRemap),
    Command::new(Opcode::ComScanDec),
    // Alternative COM pin config, no left/right remap
    Command::with_params(Opcode::SetComPins, &[0x12]),
    Command::with_params(Opcode::SetContrast, &[DEFAULT_CONTRAST]),
    Command::with_params(Opcode::SetPrecharge, &[0xF1]),
    Command::with_params(Opcode::SetVcomDetect, &[0x40]),
    Command::new(Opcode::DisplayAllOnResume),
    Command::new(Opcode::NormalDisplay),
    Command::new(Opcode::DeactivateScroll),
    Command::new(Opcode::DisplayOn),
];

/// Contrast programmed by [`INIT_SEQUENCE`]
pub const DEFAULT_CONTRAST: u8 = 0xCF;

/// Address window covering the whole panel
///
/// Columns 0..=127 and pages 0..=7. Sent before every frame so data writes
/// start at the top-left corner and wrap across all 1024 bytes.
pub const FULL_FRAME_WINDOW: [Command; 2] = [
    Command::with_params(Opcode::ColumnAddress, &[0x00, 0x7F]),
    Command::with_params(Opcode::PageAddress, &[0x00, 0x07]),
];

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn flatten(commands: &[Command]) -> Vec<u8> {
        commands.iter().flat_map(|cmd| cmd.bytes()).collect()
    }

    #[test]
    fn test_init_sequence_matches_datasheet_order() {
        assert_eq!(
            flatten(INIT_SEQUENCE),
            alloc::vec![
                0xAE, 0xD5, 0x80, 0xA8, 0x3F, 0xD3, 0x00, 0x40, 0x8D, 0x14, 0x20, 0x00, 0xA1,
                0xC8, 0xDA, 0x12, 0x81, 0xCF, 0xD9, 0xF1, 0xDB, 0x40, 0xA4, 0xA6, 0x2E, 0xAF,
            ]
        );
    }

    #[test]
    fn test_charge_pump_precedes_display_on() {
        let position = |opcode: Opcode| INIT_SEQUENCE.iter().position(|cmd| cmd.opcode == opcode);
        let pump = position(Opcode::ChargePump).unwrap();
        let on = position(Opcode::DisplayOn).unwrap();
        assert!(pump < on);
        assert_eq!(on, INIT_SEQUENCE.len() - 1);
    }

    #[test]
    fn test_full_frame_window_bytes() {
        assert_eq!(
            flatten(&FULL_FRAME_WINDOW),
            alloc::vec![0x21, 0x00, 0x7F, 0x22, 0x00, 0x07]
        );
    }

    #[test]
    fn test_write_count_includes_params() {
        assert_eq!(Command::new(Opcode::DisplayOn).write_count(), 1);
        assert_eq!(FULL_FRAME_WINDOW[0].write_count(), 3);
    }

    #[test]
    fn test_tables_match_panel_geometry() {
        use crate::config::{HEIGHT, PAGES, WIDTH};

        assert_eq!(INIT_SEQUENCE[2].params, &[(HEIGHT - 1) as u8]);
        assert_eq!(FULL_FRAME_WINDOW[0].params, &[0, (WIDTH - 1) as u8]);
        assert_eq!(FULL_FRAME_WINDOW[1].params, &[0, (PAGES - 1) as u8]);
    }

    #[test]
    fn test_opcode_into_u8() {
        assert_eq!(u8::from(Opcode::SetContrast), 0x81);
        assert_eq!(u8::from(Opcode::Nop), 0xE3);
    }
}
