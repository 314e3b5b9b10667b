//! Rotary encoder input - four contact pins decoded through a Gray table.
//!
//! The encoder exposes four switch contacts (ENC1..ENC4).  Each detent
//! flips exactly one of them, so the 4-bit raw sample walks a Gray
//! sequence.  [`GRAY_TABLE`] maps every raw sample to its position on
//! the 16-step wheel; [`gray::diff`] turns two positions into a signed
//! step and [`poller::EncoderPoller`] turns steps into keystrokes.

pub mod gray;
pub mod poller;


use core::convert::Infallible;

use embedded_hal::digital::InputPin;

/// Wheel position for each raw 4-bit pin sample.
pub const GRAY_TABLE: [u8; 16] = [10, 11, 9, 8, 13, 12, 14, 15, 5, 4, 6, 7, 2, 3, 1, 0];

/// Position of the encoder on its 16-step wheel, in `0..=15`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct GrayCode(u8);

impl GrayCode {
    /// Look up the wheel position of a raw sample.  Only the low 4 bits
    /// of `raw` are used.
    pub const fn from_raw(raw: u8) -> Self {
        GrayCode(GRAY_TABLE[(raw & 0x0F) as usize])
    }

    /// Wheel position from pin levels ordered ENC1..ENC4.
    pub const fn from_levels(levels: [bool; 4]) -> Self {
        Self::from_raw(raw_index(levels))
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Compose the raw sample `ENC1 | ENC2 << 1 | ENC3 << 2 | ENC4 << 3`.
pub const fn raw_index(levels: [bool; 4]) -> u8 {
    (levels[0] as u8) | (levels[1] as u8) << 1 | (levels[2] as u8) << 2 | (levels[3] as u8) << 3
}

/// The four encoder contacts, ordered ENC1..ENC4.
///
/// Pins are pulled up, so an open contact reads high.
pub struct EncoderPins<P> {
    pins: [P; 4],
}

impl<P> EncoderPins<P>
where
    P: InputPin<Error = Infallible>,
{
    pub fn new(pins: [P; 4]) -> Self {
        Self { pins }
    }

    /// Read all four levels, ENC1 first.
    pub fn levels(&mut self) -> [bool; 4] {
        let mut levels = [false; 4];
        for (level, pin) in levels.iter_mut().zip(self.pins.iter_mut()) {
            *level = match pin.is_high() {
                Ok(high) => high,
                Err(never) => match never {},
            };
        }
        levels
    }

    /// Sample the pins and look up the current wheel position.
    pub fn read(&mut self) -> GrayCode {
        GrayCode::from_levels(self.levels())
    }
}
